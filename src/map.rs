use glam::Vec2;

/// Layout compiled into the binary.
pub const DEFAULT_LAYOUT: &str = include_str!("../map/default.map");

pub const DEFAULT_TILE_SIZE: u32 = 64;

const EMPTY: u8 = 0;
const WALL: u8 = 1;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Empty,
    Wall,
    /// index outside the grid, which is where rays stop
    OutOfBounds,
}

#[derive(Clone, PartialEq, Debug)]
pub struct TileMap {
    width: usize,
    height: usize,
    tile_size: u32,
    cells: Vec<u8>,
}

impl TileMap {
    pub fn new(
        width: usize,
        height: usize,
        tile_size: u32,
        cells: Vec<u8>,
    ) -> anyhow::Result<Self> {
        if tile_size == 0 {
            anyhow::bail!("tile size must be positive");
        }
        let Some(area) = width.checked_mul(height) else {
            anyhow::bail!("map of {width}x{height} is too large");
        };
        if cells.len() != area {
            anyhow::bail!(
                "map of {width}x{height} needs {area} cells, got {}",
                cells.len()
            );
        }
        if let Some(bad) = cells.iter().find(|&&c| c != EMPTY && c != WALL) {
            anyhow::bail!("invalid cell value in map: {bad}");
        }

        log::info!("map is {width}x{height} tiles of {tile_size} units");
        Ok(Self {
            width,
            height,
            tile_size,
            cells,
        })
    }

    /// Parse a grid of `0`/`1` characters, one row per line.
    pub fn parse(layout: &str, tile_size: u32) -> anyhow::Result<Self> {
        let mut width = None;
        let mut height = 0;
        let mut cells = vec![];

        for line in layout.lines().map(str::trim).filter(|l| !l.is_empty()) {
            height += 1;
            let before = cells.len();
            for tile in line.chars() {
                cells.push(match tile {
                    '0' => EMPTY,
                    '1' => WALL,
                    other => anyhow::bail!("invalid tile in map row {height}: {other:?}"),
                });
            }

            let row = cells.len() - before;
            match width {
                None => width = Some(row),
                Some(w) if w != row => {
                    anyhow::bail!("map row {height} has {row} tiles, expected {w}")
                }
                Some(_) => {}
            }
        }

        let Some(width) = width else {
            anyhow::bail!("map has no rows");
        };

        Self::new(width, height, tile_size, cells)
    }

    pub fn default_map() -> anyhow::Result<Self> {
        Self::parse(DEFAULT_LAYOUT, DEFAULT_TILE_SIZE)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Tile index of a continuous coordinate.
    ///
    /// The coordinate is truncated to an integer and divided rounding down,
    /// the same as `coord >> 6` for 64-unit tiles.
    pub fn tile_index(&self, coord: f32) -> i64 {
        (coord as i64).div_euclid(self.tile_size as i64)
    }

    pub fn cell_at(&self, map_x: i64, map_y: i64) -> Cell {
        if map_x < 0 || map_y < 0 || map_x >= self.width as i64 || map_y >= self.height as i64 {
            return Cell::OutOfBounds;
        }

        match self.cells[map_y as usize * self.width + map_x as usize] {
            WALL => Cell::Wall,
            _ => Cell::Empty,
        }
    }

    pub fn cell_at_point(&self, point: Vec2) -> Cell {
        self.cell_at(self.tile_index(point.x), self.tile_index(point.y))
    }

    /// top left corner of a tile in map units
    pub fn idx_to_vec(&self, idx: usize) -> Vec2 {
        let x = idx % self.width;
        let y = idx / self.width;
        Vec2::new(x as f32, y as f32) * self.tile_size as f32
    }

    /// every tile with its top left corner, row by row
    pub fn tiles(&self) -> impl Iterator<Item = (Vec2, Cell)> + '_ {
        self.cells.iter().enumerate().map(|(idx, &c)| {
            (
                self.idx_to_vec(idx),
                if c == WALL { Cell::Wall } else { Cell::Empty },
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> TileMap {
        TileMap::parse("111\n101\n111\n", 64).unwrap()
    }

    #[test]
    fn queries_cells() {
        let map = ring();
        assert_eq!(map.cell_at(1, 1), Cell::Empty);
        assert_eq!(map.cell_at(0, 1), Cell::Wall);
        assert_eq!(map.cell_at(2, 2), Cell::Wall);
    }

    #[test]
    fn outside_grid_is_out_of_bounds() {
        let map = ring();
        assert_eq!(map.cell_at(-1, 0), Cell::OutOfBounds);
        assert_eq!(map.cell_at(0, -1), Cell::OutOfBounds);
        assert_eq!(map.cell_at(3, 0), Cell::OutOfBounds);
        assert_eq!(map.cell_at(0, 3), Cell::OutOfBounds);
        // would alias into the next row with a flat index
        assert_eq!(map.cell_at(3, 1), Cell::OutOfBounds);
    }

    #[test]
    fn tile_index_rounds_down() {
        let map = ring();
        assert_eq!(map.tile_index(0.), 0);
        assert_eq!(map.tile_index(63.9), 0);
        assert_eq!(map.tile_index(64.), 1);
        assert_eq!(map.tile_index(127.99), 1);
        assert_eq!(map.tile_index(-10.), -1);
        assert_eq!(map.cell_at_point(Vec2::new(-10., 70.)), Cell::OutOfBounds);
        assert_eq!(map.cell_at_point(Vec2::new(100., 100.)), Cell::Empty);
    }

    #[test]
    fn rejects_bad_layouts() {
        assert!(TileMap::new(2, 2, 64, vec![1, 1, 1]).is_err());
        assert!(TileMap::new(1, 1, 0, vec![1]).is_err());
        assert!(TileMap::new(1, 1, 64, vec![2]).is_err());
        assert!(TileMap::parse("11\n1\n", 64).is_err());
        assert!(TileMap::parse("1x\n11\n", 64).is_err());
        assert!(TileMap::parse("\n\n", 64).is_err());
    }

    #[test]
    fn rejects_overflowing_dimensions() {
        let err = TileMap::new(usize::MAX, 2, 64, vec![]).unwrap_err();
        assert!(err.to_string().contains("too large"), "{err}");
    }

    #[test]
    fn default_map_is_walled_in() {
        let map = TileMap::default_map().unwrap();
        assert_eq!((map.width(), map.height()), (8, 8));
        for i in 0..8 {
            assert_eq!(map.cell_at(i, 0), Cell::Wall);
            assert_eq!(map.cell_at(i, 7), Cell::Wall);
            assert_eq!(map.cell_at(0, i), Cell::Wall);
            assert_eq!(map.cell_at(7, i), Cell::Wall);
        }
        assert_eq!(map.cell_at_point(Vec2::new(300., 300.)), Cell::Empty);
    }

    #[test]
    fn lists_wall_corners() {
        let map = ring();
        let walls = map
            .tiles()
            .filter(|(_, cell)| *cell == Cell::Wall)
            .map(|(corner, _)| corner)
            .collect::<Vec<_>>();
        assert_eq!(walls.len(), 8);
        assert!(!walls.contains(&Vec2::new(64., 64.)));
        assert!(walls.contains(&Vec2::new(128., 0.)));
    }
}

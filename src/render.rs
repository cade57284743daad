use crate::config::Config;
use crate::map::{Cell, TileMap};
use crate::pose::Pose;
use crate::ray::{Face, RayHit};
use glam::Vec2;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BACKDROP: Color = Color::rgb(77, 77, 77);
    pub const FLOOR: Color = Color::rgb(0, 0, 0);
    pub const WALL: Color = Color::rgb(255, 255, 255);
    pub const PLAYER: Color = Color::rgb(255, 255, 0);
    pub const RAY: Color = Color::rgb(0, 255, 0);

    /// wall column facing the light
    pub const LIT: Color = Color::rgb(229, 0, 0);
    /// wall column facing away from the light
    pub const SHADED: Color = Color::rgb(178, 0, 0);
}

/// Primitive draw submission provided by the host.
pub trait Draw {
    /// filled convex quad, corners in order
    fn draw_quad(&mut self, points: [Vec2; 4], color: Color) -> anyhow::Result<()>;

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) -> anyhow::Result<()>;

    /// filled rectangle centred on `center`, rotated by `rotation` radians
    fn draw_rect(
        &mut self,
        center: Vec2,
        size: Vec2,
        rotation: f32,
        color: Color,
    ) -> anyhow::Result<()>;
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum DrawCommand {
    Quad {
        points: [Vec2; 4],
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
    },
    Rect {
        center: Vec2,
        size: Vec2,
        rotation: f32,
        color: Color,
    },
}

/// Records draw calls instead of issuing them.
impl Draw for Vec<DrawCommand> {
    fn draw_quad(&mut self, points: [Vec2; 4], color: Color) -> anyhow::Result<()> {
        self.push(DrawCommand::Quad { points, color });
        Ok(())
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) -> anyhow::Result<()> {
        self.push(DrawCommand::Line { from, to, color });
        Ok(())
    }

    fn draw_rect(
        &mut self,
        center: Vec2,
        size: Vec2,
        rotation: f32,
        color: Color,
    ) -> anyhow::Result<()> {
        self.push(DrawCommand::Rect {
            center,
            size,
            rotation,
            color,
        });
        Ok(())
    }
}

/// Corners of an axis aligned rectangle, clockwise from the top left.
pub fn rect_corners(pos: Vec2, size: Vec2) -> [Vec2; 4] {
    [
        pos,
        pos + Vec2::new(size.x, 0.),
        pos + size,
        pos + Vec2::new(0., size.y),
    ]
}

/// One wall slice in screen space.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ColumnDraw {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
}

impl ColumnDraw {
    pub fn corners(&self) -> [Vec2; 4] {
        rect_corners(self.pos, self.size)
    }
}

/// Maps ray distances to wall columns.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Projection {
    pub tile_size: f32,
    pub view_scale: f32,
    pub max_column_height: f32,
    pub x_offset: f32,
}

impl Projection {
    pub fn new(config: &Config, map: &TileMap) -> Self {
        Self {
            tile_size: map.tile_size() as f32,
            view_scale: config.view_scale,
            max_column_height: config.max_column_height,
            x_offset: config.view_x_offset,
        }
    }

    pub fn shade(face: Face) -> Color {
        match face {
            Face::Vertical => Color::LIT,
            Face::Horizontal => Color::SHADED,
        }
    }

    pub fn column_height(&self, distance: f32) -> f32 {
        // a zero distance gives infinity, which the cap takes care of
        ((self.tile_size * self.view_scale) / distance).min(self.max_column_height)
    }

    /// One column per hit, `screen_width` split evenly across the fan.
    pub fn project(
        &self,
        fan: &[RayHit],
        screen_width: f32,
        screen_height: f32,
    ) -> Vec<ColumnDraw> {
        if fan.is_empty() {
            return vec![];
        }

        let column_width = screen_width / fan.len() as f32;
        fan.iter()
            .enumerate()
            .map(|(r, hit)| {
                let height = self.column_height(hit.distance);
                ColumnDraw {
                    pos: Vec2::new(
                        r as f32 * column_width + self.x_offset,
                        screen_height / 2. - height / 2.,
                    ),
                    size: Vec2::new(column_width, height),
                    color: Self::shade(hit.face),
                }
            })
            .collect()
    }
}

/// Issue one quad per column. Columns under half a pixel tall, which is
/// what a miss projects to, are skipped.
pub fn render_columns(columns: &[ColumnDraw], draw: &mut impl Draw) -> anyhow::Result<()> {
    for column in columns.iter().filter(|c| c.size.y >= 0.5) {
        draw.draw_quad(column.corners(), column.color)?;
    }

    Ok(())
}

/// Top-down view of the grid, one screen unit per map unit.
pub fn draw_map(map: &TileMap, draw: &mut impl Draw) -> anyhow::Result<()> {
    let tile = map.tile_size() as f32;
    // leave a one unit gap so the grid shows through
    let inset = if tile > 2. { 1. } else { 0. };

    for (corner, cell) in map.tiles() {
        let color = match cell {
            Cell::Wall => Color::WALL,
            _ => Color::FLOOR,
        };
        draw.draw_quad(
            rect_corners(corner + inset, Vec2::splat(tile - 2. * inset)),
            color,
        )?;
    }

    Ok(())
}

/// Player marker, heading line and the rays of the current fan.
pub fn draw_player(pose: &Pose, fan: &[RayHit], draw: &mut impl Draw) -> anyhow::Result<()> {
    for point in fan.iter().filter_map(|hit| hit.point) {
        draw.draw_line(pose.pos(), point, Color::RAY)?;
    }

    draw.draw_rect(pose.pos(), Vec2::splat(8.), pose.angle(), Color::PLAYER)?;
    draw.draw_line(pose.pos(), pose.pos() + pose.dir() * 20., Color::PLAYER)?;

    Ok(())
}

use crate::map::{Cell, TileMap};
use crate::pose::Pose;
use crate::wrap_once;
use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

/// Distance reported by a ray that found no wall.
pub const NO_HIT: f32 = 1_000_000.;

/// Grid lines checked per family before a ray gives up.
pub const MAX_DEPTH: usize = 8;

/// nudge past a grid line so the tile looked up is the one being entered
const EPSILON: f32 = 0.0001;

/// Which family of grid lines the wall was hit on.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Face {
    /// a horizontal grid line, i.e. the north or south side of a tile
    Horizontal,
    /// a vertical grid line, i.e. the east or west side of a tile
    Vertical,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct RayHit {
    pub angle: f32,
    /// straight-line distance from the player to the hit
    pub radial: f32,
    /// perpendicular distance to the view plane, used for projection
    pub distance: f32,
    pub face: Face,
    pub point: Option<Vec2>,
}

impl RayHit {
    fn miss(angle: f32) -> Self {
        Self {
            angle,
            radial: NO_HIT,
            distance: NO_HIT,
            face: Face::Horizontal,
            point: None,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.point.is_some()
    }
}

/// One hit per screen column, left to right.
pub type Fan = Vec<RayHit>;

/// first crossing of a horizontal grid line and the step to the next one
fn horizontal_start(map: &TileMap, origin: Vec2, angle: f32) -> Option<(Vec2, Vec2)> {
    // LOOKING SIDEWAYS (parallel - will never cross)
    if angle == 0. || angle == PI {
        return None;
    }

    let tile = map.tile_size() as f32;
    let snapped = (map.tile_index(origin.y) * map.tile_size() as i64) as f32;
    let (y, dy) = if angle > PI {
        // LOOKING UP
        (snapped - EPSILON, -tile)
    } else {
        // LOOKING DOWN
        (snapped + tile, tile)
    };

    let cot = 1. / angle.tan();
    let ray = Vec2::new(origin.x + (y - origin.y) * cot, y);
    let step = Vec2::new(dy * cot, dy);
    Some((ray, step))
}

/// first crossing of a vertical grid line and the step to the next one
fn vertical_start(map: &TileMap, origin: Vec2, angle: f32) -> Option<(Vec2, Vec2)> {
    // LOOKING UP/DOWN (parallel - will never cross)
    if angle == FRAC_PI_2 || angle == 3. * FRAC_PI_2 {
        return None;
    }

    let tile = map.tile_size() as f32;
    let snapped = (map.tile_index(origin.x) * map.tile_size() as i64) as f32;
    let (x, dx) = if angle > FRAC_PI_2 && angle < 3. * FRAC_PI_2 {
        // LOOKING LEFT
        (snapped - EPSILON, -tile)
    } else {
        // LOOKING RIGHT
        (snapped + tile, tile)
    };

    let tan = angle.tan();
    let ray = Vec2::new(x, origin.y + (x - origin.x) * tan);
    let step = Vec2::new(dx, dx * tan);
    Some((ray, step))
}

/// Walk one family of grid lines until a wall, the map edge, or `MAX_DEPTH`.
fn search(map: &TileMap, origin: Vec2, start: Option<(Vec2, Vec2)>) -> Option<(Vec2, f32)> {
    let (mut ray, step) = start?;

    for _ in 0..MAX_DEPTH {
        match map.cell_at_point(ray) {
            Cell::Wall => return Some((ray, origin.distance(ray))),
            Cell::OutOfBounds => return None,
            Cell::Empty => ray += step,
        }
    }

    None
}

/// Cast a single ray at `angle` (already in `[0, 2π)`) from the pose.
pub fn cast_ray(pose: &Pose, map: &TileMap, angle: f32) -> RayHit {
    let origin = pose.pos();
    let h = search(map, origin, horizontal_start(map, origin, angle));
    let v = search(map, origin, vertical_start(map, origin, angle));

    // find shortest ray, horizontal wins ties
    let (point, radial, face) = match (h, v) {
        (Some((hp, dh)), Some((vp, dv))) => {
            if dv < dh {
                (vp, dv, Face::Vertical)
            } else {
                (hp, dh, Face::Horizontal)
            }
        }
        (Some((hp, dh)), None) => (hp, dh, Face::Horizontal),
        (None, Some((vp, dv))) => (vp, dv, Face::Vertical),
        (None, None) => return RayHit::miss(angle),
    };

    // fisheye: project onto the view direction
    let offset = wrap_once(pose.angle() - angle);

    RayHit {
        angle,
        radial,
        distance: radial * offset.cos(),
        face,
        point: Some(point),
    }
}

/// Cast `ray_count` rays spread over `fov` radians centred on the heading.
pub fn cast_fan(pose: &Pose, map: &TileMap, ray_count: usize, fov: f32) -> Fan {
    let ray_delta = if ray_count == 0 {
        0.
    } else {
        fov / ray_count as f32
    };

    let fan = (0..ray_count)
        .map(|r| {
            let angle = wrap_once(pose.angle() - fov / 2. + r as f32 * ray_delta);
            cast_ray(pose, map, angle)
        })
        .collect::<Fan>();

    log::trace!(
        "cast {} rays, {} hit",
        fan.len(),
        fan.iter().filter(|hit| hit.is_hit()).count()
    );
    fan
}

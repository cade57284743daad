//! Grid raycaster: casts a fan of rays over a tile map and turns the hits into
//! shaded wall columns for a pseudo-3D first person view.
//!
//! The crate never owns a window. Hosts feed key state in through
//! [`game::Controls`] and receive primitives through [`render::Draw`].

use std::f32::consts::TAU;

pub mod config;
pub mod game;
pub mod map;
pub mod pose;
pub mod ray;
pub mod render;

pub use config::Config;
pub use game::{Controls, Game, Key};
pub use map::{Cell, TileMap};
pub use pose::{Pose, PoseController};
pub use ray::{cast_fan, Face, Fan, RayHit, NO_HIT};
pub use render::{Color, ColumnDraw, Draw, DrawCommand, Projection};

/// Pull an angle back into `[0, 2π)` with at most one full-turn correction.
///
/// Angles more than one turn out of range stay out of range.
pub fn wrap_once(mut angle: f32) -> f32 {
    if angle < 0. {
        angle += TAU;
        // a tiny negative angle rounds up to exactly 2π
        if angle >= TAU {
            angle = 0.;
        }
    } else if angle >= TAU {
        angle -= TAU;
    }
    angle
}

use crate::config::Config;
use crate::map::TileMap;
use crate::pose::{Pose, PoseController};
use crate::ray::{cast_fan, Fan};
use crate::render::{self, rect_corners, Color, Draw, Projection};
use glam::Vec2;

/// Movement intents, W/S/A/D on a keyboard.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Key {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
}

/// Key state polled once per frame.
pub trait Controls {
    fn is_pressed(&self, key: Key) -> bool;
}

/// No keys held.
impl Controls for () {
    fn is_pressed(&self, _key: Key) -> bool {
        false
    }
}

impl<const N: usize> Controls for [Key; N] {
    fn is_pressed(&self, key: Key) -> bool {
        self.contains(&key)
    }
}

pub struct Game {
    config: Config,
    map: TileMap,
    controller: PoseController,
    projection: Projection,
    fan: Fan,
}

impl Game {
    /// initialize game
    pub fn new(config: Config, map: TileMap) -> anyhow::Result<Self> {
        config.validate()?;

        let pose = Pose::new(config.spawn, config.spawn_angle);
        log::info!(
            "spawning at ({}, {}) facing {}",
            config.spawn.x,
            config.spawn.y,
            config.spawn_angle
        );
        let projection = Projection::new(&config, &map);
        let fan = Fan::with_capacity(config.ray_count);

        Ok(Self {
            config,
            map,
            controller: PoseController::new(pose),
            projection,
            fan,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn pose(&self) -> &Pose {
        self.controller.pose()
    }

    /// fan cast by the last tick
    pub fn fan(&self) -> &Fan {
        &self.fan
    }

    /// Run one frame: apply held keys, cast the fan, draw.
    pub fn tick(&mut self, controls: &impl Controls, draw: &mut impl Draw) -> anyhow::Result<()> {
        self.controller.apply(controls, &self.config);

        self.fan = cast_fan(
            self.controller.pose(),
            &self.map,
            self.config.ray_count,
            self.config.fov,
        );

        draw.draw_quad(
            rect_corners(
                Vec2::ZERO,
                Vec2::new(self.config.width as f32, self.config.height as f32),
            ),
            Color::BACKDROP,
        )?;

        // DRAW MAP
        if self.config.show_map {
            render::draw_map(&self.map, draw)?;
            render::draw_player(self.controller.pose(), &self.fan, draw)?;
        }

        // DRAW WALLS
        let columns = self.projection.project(
            &self.fan,
            self.config.view_width,
            self.config.view_height,
        );
        render::render_columns(&columns, draw)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DrawCommand;

    fn game(show_map: bool) -> Game {
        let config = Config {
            show_map,
            ..Config::default()
        };
        Game::new(config, TileMap::default_map().unwrap()).unwrap()
    }

    #[test]
    fn idle_tick_keeps_pose() {
        let mut game = game(false);
        let before = *game.pose();
        let mut commands = Vec::<DrawCommand>::new();
        game.tick(&(), &mut commands).unwrap();

        assert_eq!(*game.pose(), before);
        assert_eq!(game.fan().len(), 60);
        // backdrop plus one column per ray
        assert_eq!(commands.len(), 61);
    }

    #[test]
    fn keys_move_the_player() {
        let mut game = game(false);
        let mut commands = Vec::<DrawCommand>::new();
        game.tick(&[Key::Forward], &mut commands).unwrap();
        assert_eq!(game.pose().pos(), Vec2::new(305., 300.));

        game.tick(&[Key::TurnRight, Key::Backward], &mut commands).unwrap();
        assert!((game.pose().angle() - 0.1).abs() < 1e-6);
        assert!(game.pose().pos().x < 305.);
    }

    #[test]
    fn map_view_is_optional() {
        let mut with_map = Vec::<DrawCommand>::new();
        game(true).tick(&(), &mut with_map).unwrap();
        let mut without = Vec::<DrawCommand>::new();
        game(false).tick(&(), &mut without).unwrap();

        // 64 tiles, 60 rays, player square and heading line
        assert_eq!(with_map.len(), without.len() + 64 + 60 + 2);
        assert!(matches!(with_map[0], DrawCommand::Quad { color, .. } if color == Color::BACKDROP));
    }

    #[test]
    fn rejects_invalid_config() {
        let config = Config {
            ray_count: 0,
            ..Config::default()
        };
        assert!(Game::new(config, TileMap::default_map().unwrap()).is_err());
    }
}

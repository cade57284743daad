use crate::config::Config;
use crate::game::{Controls, Key};
use crate::wrap_once;
use glam::Vec2;

/// Player position and heading.
///
/// `dir` is always `(cos angle, sin angle)`; it is re-derived on every turn
/// and never written on its own.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Pose {
    pos: Vec2,
    angle: f32,
    dir: Vec2,
}

impl Pose {
    pub fn new(pos: Vec2, angle: f32) -> Self {
        let angle = wrap_once(angle);
        Self {
            pos,
            angle,
            dir: Vec2::from_angle(angle),
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn dir(&self) -> Vec2 {
        self.dir
    }
}

/// Owns the [`Pose`] and applies movement commands to it.
///
/// There is no collision: moving into a wall walks straight through it.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PoseController {
    pose: Pose,
}

impl PoseController {
    pub fn new(pose: Pose) -> Self {
        Self { pose }
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn move_forward(&mut self, speed: f32) {
        self.pose.pos += self.pose.dir * speed;
    }

    pub fn move_backward(&mut self, speed: f32) {
        self.pose.pos -= self.pose.dir * speed;
    }

    /// counter-clockwise on screen, since y grows downward
    pub fn turn_left(&mut self, delta: f32) {
        self.turn(-delta);
    }

    pub fn turn_right(&mut self, delta: f32) {
        self.turn(delta);
    }

    fn turn(&mut self, delta: f32) {
        self.pose.angle += delta;
        self.pose.dir = Vec2::from_angle(self.pose.angle);
        self.pose.angle = wrap_once(self.pose.angle);
    }

    /// Apply one frame of held keys. Returns whether the pose changed.
    pub fn apply(&mut self, controls: &impl Controls, config: &Config) -> bool {
        let before = self.pose;

        if controls.is_pressed(Key::TurnLeft) {
            self.turn_left(config.turn_rate);
        }
        if controls.is_pressed(Key::TurnRight) {
            self.turn_right(config.turn_rate);
        }
        if controls.is_pressed(Key::Forward) {
            self.move_forward(config.move_speed);
        }
        if controls.is_pressed(Key::Backward) {
            self.move_backward(config.move_speed);
        }

        let changed = before != self.pose;
        if changed {
            log::debug!(
                "pose now at ({:.1}, {:.1}) facing {:.3}",
                self.pose.pos.x,
                self.pose.pos.y,
                self.pose.angle
            );
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    // same heading, allowing for the seam at 0 / 2π
    fn same_heading(a: f32, b: f32) -> bool {
        let d = (a - b).abs();
        d < 1e-4 || (TAU - d).abs() < 1e-4
    }

    fn assert_dir_matches(pose: &Pose) {
        assert!(close(pose.dir().x, pose.angle().cos()));
        assert!(close(pose.dir().y, pose.angle().sin()));
    }

    #[test]
    fn forward_then_backward_returns_home() {
        let mut ctl = PoseController::new(Pose::new(Vec2::new(300., 300.), 0.7));
        ctl.move_forward(5.);
        assert!(ctl.pose().pos().distance(Vec2::new(300., 300.)) > 4.9);
        ctl.move_backward(5.);
        assert!(ctl.pose().pos().distance(Vec2::new(300., 300.)) < 1e-3);
        assert_eq!(ctl.pose().angle(), 0.7);
    }

    #[test]
    fn forward_follows_heading() {
        let mut ctl = PoseController::new(Pose::new(Vec2::ZERO, FRAC_PI_2));
        ctl.move_forward(10.);
        assert!(close(ctl.pose().pos().x, 0.));
        // y grows downward, so a quarter turn points down the screen
        assert!(close(ctl.pose().pos().y, 10.));
    }

    #[test]
    fn left_then_right_restores_heading() {
        for start in [0., 0.05, 1.0, PI, TAU - 0.05] {
            let mut ctl = PoseController::new(Pose::new(Vec2::ZERO, start));
            ctl.turn_left(0.1);
            assert_dir_matches(ctl.pose());
            ctl.turn_right(0.1);
            assert_dir_matches(ctl.pose());
            assert!(
                same_heading(ctl.pose().angle(), start),
                "{start} became {}",
                ctl.pose().angle()
            );
        }
    }

    #[test]
    fn turning_stays_in_range() {
        let mut ctl = PoseController::new(Pose::new(Vec2::ZERO, 0.05));
        ctl.turn_left(0.1);
        assert!((0. ..TAU).contains(&ctl.pose().angle()));
        assert!(close(ctl.pose().angle(), TAU - 0.05));

        for _ in 0..100 {
            ctl.turn_right(0.1);
            assert!((0. ..TAU).contains(&ctl.pose().angle()));
            assert_dir_matches(ctl.pose());
        }
    }

    #[test]
    fn large_turn_is_corrected_once() {
        let mut ctl = PoseController::new(Pose::new(Vec2::ZERO, 0.));
        ctl.turn_right(2. * TAU + 1.5);
        // one correction leaves it past a full turn
        assert!(ctl.pose().angle() >= TAU);
        assert_dir_matches(ctl.pose());
    }

    #[test]
    fn no_collision() {
        let mut ctl = PoseController::new(Pose::new(Vec2::new(300., 300.), 0.));
        for _ in 0..100 {
            ctl.move_forward(5.);
        }
        assert!(close(ctl.pose().pos().x, 800.));
    }
}

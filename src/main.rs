use elacaster::{Color, Config, Controls, Draw, Game, Key, TileMap};
use glam::Vec2;
use sdl2::event::Event;
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::keyboard::Keycode;
use sdl2::pixels;
use sdl2::rect::{Point, Rect};
use sdl2::render::Canvas;
use sdl2::video::Window;
use std::collections::HashSet;
use std::time::{Duration, Instant};

// helper trait to convert strings into std::error types
trait StringToAnyhow<T> {
    fn ah(self) -> anyhow::Result<T>;
}

impl<T> StringToAnyhow<T> for Result<T, String> {
    fn ah(self) -> anyhow::Result<T> {
        self.map_err(|err| anyhow::anyhow!("{err}"))
    }
}

/// keys currently held down
struct HeldKeys(HashSet<Keycode>);

impl Controls for HeldKeys {
    fn is_pressed(&self, key: Key) -> bool {
        let (letter, arrow) = match key {
            Key::Forward => (Keycode::W, Keycode::Up),
            Key::Backward => (Keycode::S, Keycode::Down),
            Key::TurnLeft => (Keycode::A, Keycode::Left),
            Key::TurnRight => (Keycode::D, Keycode::Right),
        };
        self.0.contains(&letter) || self.0.contains(&arrow)
    }
}

struct Screen(Canvas<Window>);

fn sdl_color(color: Color) -> pixels::Color {
    pixels::Color::RGB(color.r, color.g, color.b)
}

fn point(v: Vec2) -> Point {
    Point::new(v.x.round() as i32, v.y.round() as i32)
}

impl Screen {
    fn fill_polygon(&mut self, points: &[Vec2], color: Color) -> anyhow::Result<()> {
        let (vx, vy): (Vec<i16>, Vec<i16>) = points
            .iter()
            .map(|p| (p.x.round() as i16, p.y.round() as i16))
            .unzip();
        self.0.filled_polygon(&vx, &vy, sdl_color(color)).ah()
    }
}

impl Draw for Screen {
    fn draw_quad(&mut self, points: [Vec2; 4], color: Color) -> anyhow::Result<()> {
        let [a, b, c, d] = points;
        if a.y == b.y && b.x == c.x && c.y == d.y && d.x == a.x {
            // axis aligned, the common case
            let min = a.min(c);
            let size = (a - c).abs().round();
            if size.x < 1. || size.y < 1. {
                // nothing to cover after rounding
                return Ok(());
            }
            self.0.set_draw_color(sdl_color(color));
            self.0
                .fill_rect(Rect::new(
                    min.x.round() as i32,
                    min.y.round() as i32,
                    size.x as u32,
                    size.y as u32,
                ))
                .ah()?;
            return Ok(());
        }

        self.fill_polygon(&points, color)
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) -> anyhow::Result<()> {
        self.0.set_draw_color(sdl_color(color));
        self.0.draw_line(point(from), point(to)).ah()?;
        Ok(())
    }

    fn draw_rect(
        &mut self,
        center: Vec2,
        size: Vec2,
        rotation: f32,
        color: Color,
    ) -> anyhow::Result<()> {
        let rot = Vec2::from_angle(rotation);
        let half = size / 2.;
        let corners = [
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, half.y),
        ]
        .map(|corner| center + rot.rotate(corner));

        self.fill_polygon(&corners, color)
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_custom_env("ELA_LOG");

    let config = Config::from_env()?;
    log::info!("loading map");
    let map = TileMap::default_map()?;

    // sdl boilerplate
    log::info!("initializing sdl2");
    let sdl_ctx = sdl2::init().ah()?;
    log::info!("initializing video");
    let video = sdl_ctx.video().ah()?;

    log::info!("initializing window");
    let mut window = video
        .window("ElaCaster", config.width, config.height)
        .position_centered()
        .build()?;
    window.set_resizable(false);
    log::info!("creating canvas");
    let mut screen = Screen(window.into_canvas().build()?);
    log::info!("pumping events");
    let mut events = sdl_ctx.event_pump().ah()?;

    let mut keys = HeldKeys(HashSet::new());

    log::info!("initializing game state");
    let mut game = Game::new(config, map)?;

    let delta = Duration::from_millis(1_000 / game.config().target_fps);

    'main_loop: loop {
        let prev = Instant::now();

        // handle events
        for ev in events.poll_iter() {
            match ev {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'main_loop,
                Event::KeyDown {
                    keycode: Some(k), ..
                } => {
                    keys.0.insert(k);
                }
                Event::KeyUp {
                    keycode: Some(k), ..
                } => {
                    keys.0.remove(&k);
                }
                _ => {}
            }
        }

        if let Err(err) = game.tick(&keys, &mut screen) {
            log::error!("error while drawing frame: {err}");
            return Err(err);
        }
        screen.0.present();

        let diff = prev.elapsed();
        if diff < delta {
            std::thread::sleep(delta - diff);
        }
    }

    Ok(())
}

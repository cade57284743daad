use anyhow::Context;
use glam::Vec2;
use std::f32::consts::PI;
use std::str::FromStr;

/// Everything tunable about a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    // window
    pub width: u32,
    pub height: u32,
    pub target_fps: u64,

    // casting
    pub ray_count: usize,
    pub fov: f32,

    // player
    pub spawn: Vec2,
    pub spawn_angle: f32,
    pub move_speed: f32,
    pub turn_rate: f32,

    // projection
    pub view_x_offset: f32,
    pub view_width: f32,
    pub view_height: f32,
    pub view_scale: f32,
    pub max_column_height: f32,

    /// draw the top-down map next to the 3d view
    pub show_map: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 512,
            target_fps: 30,
            ray_count: 60,
            fov: 60f32.to_radians(),
            spawn: Vec2::new(300., 300.),
            spawn_angle: 0.,
            move_speed: 5.,
            turn_rate: 0.1,
            view_x_offset: 530.,
            view_width: 480.,
            view_height: 320.,
            view_scale: 320.,
            max_column_height: 320.,
            show_map: true,
        }
    }
}

fn env_var<T>(vars: &impl Fn(&str) -> Option<String>, name: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let Some(raw) = vars(name) else {
        return Ok(None);
    };
    let value = raw
        .trim()
        .parse()
        .with_context(|| format!("invalid value for {name}: {raw:?}"))?;
    log::info!("{name} overridden to {raw}");

    Ok(Some(value))
}

fn env_override<T>(
    vars: &impl Fn(&str) -> Option<String>,
    name: &str,
    slot: &mut T,
) -> anyhow::Result<()>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    if let Some(value) = env_var(vars, name)? {
        *slot = value;
    }

    Ok(())
}

impl Config {
    /// defaults, overridden by any `ELA_*` variables that are set
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// defaults, overridden by whatever `vars` returns for each `ELA_*` name
    pub fn from_vars(vars: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut this = Self::default();

        env_override(&vars, "ELA_RAYS", &mut this.ray_count)?;
        if let Some(degrees) = env_var::<f32>(&vars, "ELA_FOV")? {
            this.fov = degrees.to_radians();
        }
        env_override(&vars, "ELA_FPS", &mut this.target_fps)?;
        env_override(&vars, "ELA_MOVE_SPEED", &mut this.move_speed)?;
        env_override(&vars, "ELA_TURN_RATE", &mut this.turn_rate)?;
        env_override(&vars, "ELA_SHOW_MAP", &mut this.show_map)?;

        this.validate()?;
        Ok(this)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.ray_count == 0 {
            anyhow::bail!("ray count must be at least 1");
        }
        // edge rays at a right angle or more would project behind the view
        if !(0. ..PI).contains(&self.fov) {
            anyhow::bail!("field of view must be within [0, 180) degrees");
        }
        if self.view_width <= 0. || self.view_height <= 0. {
            anyhow::bail!(
                "view must have a positive size, got {}x{}",
                self.view_width,
                self.view_height
            );
        }
        if self.target_fps == 0 {
            anyhow::bail!("target fps must be positive");
        }

        Ok(())
    }
}

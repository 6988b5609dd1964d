//! Tuning constants and the immutable screen size of a session.

use thiserror::Error;

use crate::fleet::FleetLayout;

/// Screen dimensions in world units, fixed for the whole session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Bounds { width, height }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("{name} must be a finite positive number, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("ship bottom margin must be finite and not negative, got {0}")]
    NegativeMargin(f32),
    #[error("at least one projectile must be allowed on screen")]
    NoProjectiles,
    #[error("the game needs at least one life")]
    NoLives,
    #[error("tick rate must be at least 1 tick per second")]
    ZeroTickRate,
    #[error("screen {width}x{height} is too small to hold a single enemy")]
    ScreenTooSmall { width: f32, height: f32 },
}

/// All tuning knobs.  Speeds are world units per second, durations seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub ship_width: f32,
    pub ship_height: f32,
    pub ship_speed: f32,
    pub ship_bottom_margin: f32,

    pub projectile_width: f32,
    pub projectile_height: f32,
    pub projectile_speed: f32,
    pub bullets_allowed: usize,

    pub enemy_width: f32,
    pub enemy_height: f32,
    pub fleet_speed: f32,
    pub drop_step: f32,

    pub starting_lives: u32,
    pub hit_pause_secs: f32,
    pub tick_rate: u32,

    /// World size of one character cell, used to lay out text.
    pub glyph_width: f32,
    pub glyph_height: f32,
}

impl Default for Settings {
    /// Values for a terminal whose cells are 8×16 world units.
    fn default() -> Self {
        Settings {
            ship_width: 24.0,
            ship_height: 16.0,
            ship_speed: 180.0,
            ship_bottom_margin: 16.0,

            projectile_width: 8.0,
            projectile_height: 16.0,
            projectile_speed: 480.0,
            bullets_allowed: 3,

            enemy_width: 24.0,
            enemy_height: 16.0,
            fleet_speed: 48.0,
            drop_step: 4.0,

            starting_lives: 3,
            hit_pause_secs: 0.5,
            tick_rate: 30,

            glyph_width: 8.0,
            glyph_height: 16.0,
        }
    }
}

impl Settings {
    /// Fixed logical duration of one tick.
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }

    /// Whole ticks spent in the hit pause, never fewer than one.
    pub fn hit_pause_ticks(&self) -> u32 {
        ((self.hit_pause_secs * self.tick_rate as f32).round() as u32).max(1)
    }

    pub fn validate(&self, bounds: Bounds) -> Result<(), SettingsError> {
        let positives = [
            ("ship width", self.ship_width),
            ("ship height", self.ship_height),
            ("ship speed", self.ship_speed),
            ("projectile width", self.projectile_width),
            ("projectile height", self.projectile_height),
            ("projectile speed", self.projectile_speed),
            ("enemy width", self.enemy_width),
            ("enemy height", self.enemy_height),
            ("fleet speed", self.fleet_speed),
            ("drop step", self.drop_step),
            ("hit pause", self.hit_pause_secs),
            ("glyph width", self.glyph_width),
            ("glyph height", self.glyph_height),
        ];
        for (name, value) in positives {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::NotPositive { name, value });
            }
        }
        if !self.ship_bottom_margin.is_finite() || self.ship_bottom_margin < 0.0 {
            return Err(SettingsError::NegativeMargin(self.ship_bottom_margin));
        }
        if self.bullets_allowed == 0 {
            return Err(SettingsError::NoProjectiles);
        }
        if self.starting_lives == 0 {
            return Err(SettingsError::NoLives);
        }
        if self.tick_rate == 0 {
            return Err(SettingsError::ZeroTickRate);
        }
        if FleetLayout::compute(self, bounds).capacity() == 0 {
            return Err(SettingsError::ScreenTooSmall {
                width: bounds.width,
                height: bounds.height,
            });
        }
        Ok(())
    }
}

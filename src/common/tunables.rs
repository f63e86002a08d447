//! Tunable gameplay constants.
//!
//! Everything here is plain data set once at startup. The core plugin validates the values and
//! falls back to the defaults when a section is inconsistent.

use std::time::Duration;

use bevy::prelude::*;
use thiserror::Error;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    pub player_speed: f32,
    /// Reach for hover/grab of interactables, in world units.
    pub interact_range: f32,
    pub rng_seed: u64,
    pub projectile: ProjectileTunables,
    pub drone: DroneTunables,
    pub enemy: EnemyTunables,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            player_speed: 420.0,
            interact_range: 60.0,
            rng_seed: 0x5EED_B1A5,
            projectile: ProjectileTunables::default(),
            drone: DroneTunables::default(),
            enemy: EnemyTunables::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileTunables {
    /// Hard ceiling on pooled projectiles (active + available).
    pub capacity_ceiling: usize,
    /// Projectiles pre-spawned at startup.
    pub warm_count: usize,
    /// Seconds an active projectile may stay out before it is reclaimed.
    pub lifetime_limit: f32,
    /// Seconds between shots while the trigger is held.
    pub fire_rate: f32,
    pub speed: f32,
    pub damage: i32,
    /// Distance from the launcher origin to the muzzle.
    pub muzzle_offset: f32,
}

impl Default for ProjectileTunables {
    fn default() -> Self {
        Self {
            capacity_ceiling: 50,
            warm_count: 20,
            lifetime_limit: 5.0,
            fire_rate: 0.1,
            speed: 900.0,
            damage: 1,
            muzzle_offset: 22.0,
        }
    }
}

/// Seconds to `Duration`, saturating: negative or NaN is zero, too large is `Duration::MAX`.
#[inline]
fn saturating_secs(v: f32) -> Duration {
    Duration::try_from_secs_f32(v.max(0.0)).unwrap_or(Duration::MAX)
}

impl ProjectileTunables {
    #[inline]
    pub fn lifetime(&self) -> Duration {
        saturating_secs(self.lifetime_limit)
    }

    #[inline]
    pub fn fire_period(&self) -> Duration {
        saturating_secs(self.fire_rate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DroneTunables {
    pub follow_distance: f32,
    pub max_follow_distance: f32,
    pub move_speed: f32,
    pub update_path_interval: f32,
    pub hover_amplitude: f32,
    pub hover_speed: f32,
    /// Angular smoothing factor (per second).
    pub rotation_speed: f32,
    pub look_at_player: bool,
    pub max_health: i32,
}

impl Default for DroneTunables {
    fn default() -> Self {
        Self {
            follow_distance: 100.0,
            max_follow_distance: 300.0,
            move_speed: 280.0,
            update_path_interval: 0.5,
            hover_amplitude: 0.2,
            hover_speed: 2.0,
            rotation_speed: 5.0,
            look_at_player: true,
            max_health: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyTunables {
    pub detection_range: f32,
    pub attack_range: f32,
    pub wander_radius: f32,
    /// Seconds between new wander destinations.
    pub wander_interval: f32,
    pub idle_min: f32,
    pub idle_max: f32,
    pub move_speed: f32,
    pub max_health: i32,
}

impl Default for EnemyTunables {
    fn default() -> Self {
        Self {
            detection_range: 300.0,
            attack_range: 40.0,
            wander_radius: 200.0,
            wander_interval: 5.0,
            idle_min: 2.0,
            idle_max: 5.0,
            move_speed: 160.0,
            max_health: 3,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TunablesError {
    #[error("projectile capacity ceiling must be at least 1")]
    ZeroCapacity,
    #[error("warm count {warm} exceeds capacity ceiling {ceiling}")]
    WarmAboveCeiling { warm: usize, ceiling: usize },
    #[error("{0} must be a positive number of seconds that fits a Duration")]
    InvalidDuration(&'static str),
    #[error("projectile speed must be positive")]
    NonPositiveSpeed,
    #[error("{0} range is inverted")]
    InvertedRange(&'static str),
    #[error("{0} max health must be positive")]
    NonPositiveHealth(&'static str),
}

#[inline]
fn positive_secs(v: f32, name: &'static str) -> Result<(), TunablesError> {
    if v > 0.0 && Duration::try_from_secs_f32(v).is_ok() {
        Ok(())
    } else {
        Err(TunablesError::InvalidDuration(name))
    }
}

impl Tunables {
    pub fn validate(&self) -> Result<(), TunablesError> {
        let p = &self.projectile;
        if p.capacity_ceiling == 0 {
            return Err(TunablesError::ZeroCapacity);
        }
        if p.warm_count > p.capacity_ceiling {
            return Err(TunablesError::WarmAboveCeiling {
                warm: p.warm_count,
                ceiling: p.capacity_ceiling,
            });
        }
        positive_secs(p.lifetime_limit, "lifetime_limit")?;
        positive_secs(p.fire_rate, "fire_rate")?;
        if !(p.speed.is_finite() && p.speed > 0.0) {
            return Err(TunablesError::NonPositiveSpeed);
        }

        let d = &self.drone;
        if d.follow_distance > d.max_follow_distance {
            return Err(TunablesError::InvertedRange("drone follow"));
        }
        positive_secs(d.update_path_interval, "update_path_interval")?;
        if d.max_health <= 0 {
            return Err(TunablesError::NonPositiveHealth("drone"));
        }

        let e = &self.enemy;
        if e.attack_range > e.detection_range {
            return Err(TunablesError::InvertedRange("enemy detection"));
        }
        if e.idle_min > e.idle_max {
            return Err(TunablesError::InvertedRange("enemy idle"));
        }
        positive_secs(e.wander_interval, "wander_interval")?;
        if e.max_health <= 0 {
            return Err(TunablesError::NonPositiveHealth("enemy"));
        }

        Ok(())
    }
}

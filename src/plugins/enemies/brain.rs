//! Wander/chase decision rules for a basic enemy.
//!
//! Pure per-frame logic: given what the enemy perceives, return what the navigation agent
//! should do. No ECS access, so every rule is testable with plain values.

use rand::Rng;

use bevy::ecs::component::Component;
use bevy::math::Vec2;

use crate::common::tunables::EnemyTunables;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyMode {
    Wandering,
    Idle,
    Chasing,
    Attacking,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NavCommand {
    MoveTo(Vec2),
    Stop,
    /// Leave the agent as it is.
    Hold,
}

#[derive(Clone, Copy, Debug)]
pub struct Perception {
    pub player_pos: Vec2,
    pub distance_to_player: f32,
    /// Agent has reached its current destination.
    pub arrived: bool,
}

#[derive(Component, Debug, Clone)]
pub struct WanderBrain {
    home: Vec2,
    mode: EnemyMode,
    since_destination: f32,
    idle_elapsed: f32,
    idle_for: f32,
}

/// Uniform random point in a disc.
pub fn random_point_in_disc(rng: &mut impl Rng, center: Vec2, radius: f32) -> Vec2 {
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    let r = radius * rng.gen_range(0.0f32..=1.0).sqrt();
    center + Vec2::new(angle.cos(), angle.sin()) * r
}

impl WanderBrain {
    /// The first wander step picks a destination immediately.
    pub fn new(home: Vec2, cfg: &EnemyTunables) -> Self {
        Self {
            home,
            mode: EnemyMode::Wandering,
            since_destination: cfg.wander_interval,
            idle_elapsed: 0.0,
            idle_for: 0.0,
        }
    }

    #[inline]
    pub fn mode(&self) -> EnemyMode {
        self.mode
    }

    #[inline]
    pub fn home(&self) -> Vec2 {
        self.home
    }

    pub fn step(
        &mut self,
        dt: f32,
        seen: Perception,
        cfg: &EnemyTunables,
        rng: &mut impl Rng,
    ) -> NavCommand {
        if seen.distance_to_player < cfg.detection_range {
            self.idle_elapsed = 0.0;
            if seen.distance_to_player <= cfg.attack_range {
                self.mode = EnemyMode::Attacking;
                return NavCommand::Stop;
            }
            self.mode = EnemyMode::Chasing;
            return NavCommand::MoveTo(seen.player_pos);
        }

        self.wander(dt, seen.arrived, cfg, rng)
    }

    fn wander(
        &mut self,
        dt: f32,
        arrived: bool,
        cfg: &EnemyTunables,
        rng: &mut impl Rng,
    ) -> NavCommand {
        self.since_destination += dt;

        if self.mode == EnemyMode::Idle {
            self.idle_elapsed += dt;
            if self.idle_elapsed >= self.idle_for {
                self.mode = EnemyMode::Wandering;
                self.idle_elapsed = 0.0;
            }
            return NavCommand::Stop;
        }

        // Lost the player.
        if matches!(self.mode, EnemyMode::Chasing | EnemyMode::Attacking) {
            self.mode = EnemyMode::Wandering;
        }

        if self.since_destination >= cfg.wander_interval {
            self.since_destination = 0.0;
            // `arrived` still describes the previous path this frame; skip the idle check.
            return NavCommand::MoveTo(random_point_in_disc(rng, self.home, cfg.wander_radius));
        }

        if arrived {
            self.mode = EnemyMode::Idle;
            self.idle_elapsed = 0.0;
            self.idle_for = if cfg.idle_max > cfg.idle_min {
                rng.gen_range(cfg.idle_min..cfg.idle_max)
            } else {
                cfg.idle_min
            };
            return NavCommand::Stop;
        }

        NavCommand::Hold
    }
}

//! Navigation plugin: a minimal straight-line agent.
//!
//! Stands in for a navmesh agent: callers set a destination or stop it, and read back the
//! remaining distance and current velocity. Steering writes `LinearVelocity` in the fixed
//! step; physics does the rest.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::state::GameState;

#[derive(Component, Debug, Clone)]
pub struct NavAgent {
    pub speed: f32,
    pub stopping_distance: f32,
    pub stopped: bool,
    destination: Option<Vec2>,
    remaining_distance: f32,
}

impl NavAgent {
    pub fn new(speed: f32, stopping_distance: f32) -> Self {
        Self {
            speed,
            stopping_distance,
            stopped: false,
            destination: None,
            remaining_distance: 0.0,
        }
    }

    /// Set a new destination. Until the next steering step the path counts as pending
    /// (`has_arrived` is false).
    pub fn set_destination(&mut self, dest: Vec2) {
        self.destination = Some(dest);
        self.stopped = false;
        self.remaining_distance = f32::INFINITY;
    }

    #[inline]
    pub fn destination(&self) -> Option<Vec2> {
        self.destination
    }

    /// Distance to the destination as of the last steering step (0 with no destination).
    #[inline]
    pub fn remaining_distance(&self) -> f32 {
        self.remaining_distance
    }

    #[inline]
    pub fn has_arrived(&self) -> bool {
        self.remaining_distance <= self.stopping_distance
    }

    /// Forget the current path (after a warp, or when disabled).
    pub fn clear(&mut self) {
        self.destination = None;
        self.remaining_distance = 0.0;
    }

    /// Velocity towards the destination from `pos`, and the distance left.
    pub fn steer(&self, pos: Vec2) -> (Vec2, f32) {
        let Some(dest) = self.destination else {
            return (Vec2::ZERO, 0.0);
        };
        let to = dest - pos;
        let dist = to.length();
        if self.stopped || dist <= self.stopping_distance {
            return (Vec2::ZERO, dist);
        }
        (to / dist * self.speed, dist)
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        steer_agents.run_if(in_state(GameState::InGame)),
    );
}

pub fn steer_agents(mut q: Query<(&Transform, &mut NavAgent, &mut LinearVelocity)>) {
    for (tf, mut agent, mut vel) in &mut q {
        let (v, remaining) = agent.steer(tf.translation.truncate());
        agent.remaining_distance = remaining;
        vel.0 = v;
    }
}

//! Launcher: rate-limited firing bound to trigger press/release.
//!
//! `FireControl` is the schedule. Activation fires once immediately and arms a repeating
//! timer; each frame `step(dt)` reports how many periods elapsed. Deactivation drops the
//! timer, so nothing keeps firing after release.
//!
//! The system steps every launcher *before* applying this frame's trigger signals:
//! a shot that was due this frame still goes out even if the trigger is released.

use std::time::Duration;

use bevy::prelude::*;

use crate::plugins::effects::{ImpactEffect, MuzzleFlash};

use super::messages::{SpawnProjectileRequest, TriggerPhase, TriggerSignal};
use super::pool::ProjectilePool;

#[derive(Debug, Clone)]
pub struct FireControl {
    period: Duration,
    schedule: Option<Timer>,
}

impl FireControl {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            schedule: None,
        }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[inline]
    pub fn is_firing(&self) -> bool {
        self.schedule.is_some()
    }

    /// Start firing. Returns the number of shots due right now (1, or 0 if already firing).
    pub fn activate(&mut self) -> u32 {
        if self.schedule.is_some() {
            return 0;
        }
        self.schedule = Some(Timer::new(self.period, TimerMode::Repeating));
        1
    }

    pub fn deactivate(&mut self) {
        self.schedule = None;
    }

    /// Advance the schedule. Returns shots due during this step.
    pub fn step(&mut self, dt: Duration) -> u32 {
        let Some(timer) = self.schedule.as_mut() else {
            return 0;
        };
        timer.tick(dt);
        timer.times_finished_this_tick()
    }
}

#[derive(Component, Debug, Clone)]
pub struct Launcher {
    pub fire: FireControl,
    pub speed: f32,
    pub muzzle_offset: f32,
    /// Unit aim direction in world space.
    pub aim: Vec2,
    pub impact_effect: Option<ImpactEffect>,
    /// Entity currently holding the launcher. Its shots never hit it.
    pub wielder: Option<Entity>,
    /// Set while the projectile pool is missing; a disabled launcher ignores its trigger.
    /// Cleared again on the first frame the pool is present.
    pub disabled: bool,
}

impl Launcher {
    pub fn new(period: Duration, speed: f32, muzzle_offset: f32) -> Self {
        Self {
            fire: FireControl::new(period),
            speed,
            muzzle_offset,
            aim: Vec2::Y,
            impact_effect: None,
            wielder: None,
            disabled: false,
        }
    }

    fn request(&self, owner: Entity, origin: Vec2) -> SpawnProjectileRequest {
        let dir = self.aim.normalize_or(Vec2::Y);
        SpawnProjectileRequest {
            owner,
            wielder: self.wielder,
            pos: origin + dir * self.muzzle_offset,
            vel: dir * self.speed,
            impact_effect: self.impact_effect,
        }
    }
}

fn emit_shots(
    shots: u32,
    owner: Entity,
    origin: Vec2,
    launcher: &Launcher,
    flash: Option<&mut MuzzleFlash>,
    writer: &mut MessageWriter<SpawnProjectileRequest>,
) {
    if shots == 0 {
        return;
    }
    for _ in 0..shots {
        writer.write(launcher.request(owner, origin));
    }
    if let Some(flash) = flash {
        flash.restart();
    }
}

/// Step fire schedules, apply trigger signals, and write spawn requests.
///
/// Without a pool the launchers are disabled and the failure is reported once; they come
/// back as soon as a pool exists.
pub fn drive_launchers(
    time: Res<Time<Virtual>>,
    pool: Option<Res<ProjectilePool>>,
    mut reported_missing_pool: Local<bool>,
    mut signals: MessageReader<TriggerSignal>,
    mut q: Query<(Entity, &Transform, &mut Launcher, Option<&mut MuzzleFlash>)>,
    mut writer: MessageWriter<SpawnProjectileRequest>,
) {
    if pool.is_none() {
        if !*reported_missing_pool {
            error!("no ProjectilePool in the world; launchers disabled");
            *reported_missing_pool = true;
        }
        for (_, _, mut launcher, _) in &mut q {
            launcher.fire.deactivate();
            launcher.disabled = true;
        }
        signals.clear();
        return;
    }

    *reported_missing_pool = false;
    let dt = time.delta();

    for (e, tf, mut launcher, mut flash) in &mut q {
        if launcher.disabled {
            launcher.disabled = false;
            info!("projectile pool available; launcher {e:?} re-enabled");
        }
        let shots = launcher.fire.step(dt);
        emit_shots(
            shots,
            e,
            tf.translation.truncate(),
            &launcher,
            flash.as_deref_mut(),
            &mut writer,
        );
    }

    for signal in signals.read() {
        let Ok((e, tf, mut launcher, mut flash)) = q.get_mut(signal.launcher) else {
            debug!("trigger signal for unknown launcher {:?}", signal.launcher);
            continue;
        };

        match signal.phase {
            TriggerPhase::Activated => {
                let shots = launcher.fire.activate();
                emit_shots(
                    shots,
                    e,
                    tf.translation.truncate(),
                    &launcher,
                    flash.as_deref_mut(),
                    &mut writer,
                );
            }
            TriggerPhase::Deactivated => launcher.fire.deactivate(),
        }
    }
}

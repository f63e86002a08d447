//! Effects plugin: platform effect profile, muzzle flash emitters, and short-lived
//! impact/death effects.
//!
//! Effects are fire-and-forget. Gameplay writes a `SpawnEffect` message and never hears
//! back; this plugin spawns a sprite, fades it, and despawns it when its timer runs out.
//!
//! Standalone headsets (Android builds) get a lighter profile: smaller, shorter effects.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;

/// Opaque description of a visual effect. Gameplay code carries it around without reading it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactEffect {
    pub color: Color,
    pub radius: f32,
    pub lifetime_secs: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    /// PC-tethered headset.
    Tethered,
    /// Standalone headset.
    Standalone,
}

impl Platform {
    pub fn detect() -> Self {
        if cfg!(target_os = "android") {
            Self::Standalone
        } else {
            Self::Tethered
        }
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct EffectProfile {
    pub platform: Platform,
    pub muzzle_flash_secs: f32,
    pub muzzle_color: Color,
    pub impact: ImpactEffect,
    pub death: ImpactEffect,
    /// Shown on an enemy as it starts an attack.
    pub attack: ImpactEffect,
}

impl EffectProfile {
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Tethered => Self {
                platform,
                muzzle_flash_secs: 0.06,
                muzzle_color: Color::srgb(1.0, 0.8, 0.4),
                impact: ImpactEffect {
                    color: Color::srgb(1.0, 0.7, 0.2),
                    radius: 14.0,
                    lifetime_secs: 3.0,
                },
                death: ImpactEffect {
                    color: Color::srgb(1.0, 0.35, 0.2),
                    radius: 40.0,
                    lifetime_secs: 3.0,
                },
                attack: ImpactEffect {
                    color: Color::srgb(0.95, 0.2, 0.6),
                    radius: 22.0,
                    lifetime_secs: 0.4,
                },
            },
            Platform::Standalone => Self {
                platform,
                muzzle_flash_secs: 0.04,
                muzzle_color: Color::srgb(1.0, 0.85, 0.5),
                impact: ImpactEffect {
                    color: Color::srgb(1.0, 0.75, 0.3),
                    radius: 8.0,
                    lifetime_secs: 1.0,
                },
                death: ImpactEffect {
                    color: Color::srgb(1.0, 0.4, 0.25),
                    radius: 24.0,
                    lifetime_secs: 1.5,
                },
                attack: ImpactEffect {
                    color: Color::srgb(0.95, 0.25, 0.6),
                    radius: 14.0,
                    lifetime_secs: 0.25,
                },
            },
        }
    }
}

/// Spawn a visual effect at a world position.
#[derive(Message, Clone, Copy, Debug)]
pub struct SpawnEffect {
    pub pos: Vec2,
    pub effect: ImpactEffect,
}

/// A live effect sprite.
#[derive(Component, Debug)]
pub struct EffectInstance {
    timer: Timer,
    base_alpha: f32,
}

/// Muzzle flash emitter attached to a launcher.
///
/// Firing restarts it (stop + play); it is lit until its timer finishes.
#[derive(Component, Debug, Clone)]
pub struct MuzzleFlash {
    timer: Timer,
    lit: bool,
}

impl MuzzleFlash {
    pub fn new(secs: f32) -> Self {
        Self {
            timer: Timer::from_seconds(secs, TimerMode::Once),
            lit: false,
        }
    }

    #[inline]
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    pub fn restart(&mut self) {
        self.timer.reset();
        self.lit = true;
    }

    pub fn stop(&mut self) {
        self.lit = false;
    }

    fn tick(&mut self, dt: std::time::Duration) {
        if !self.lit {
            return;
        }
        self.timer.tick(dt);
        if self.timer.is_finished() {
            self.lit = false;
        }
    }
}

pub fn plugin(app: &mut App) {
    let profile = EffectProfile::for_platform(Platform::detect());
    info!("effect profile: {:?}", profile.platform);

    app.insert_resource(profile)
        .add_message::<SpawnEffect>()
        .add_systems(
            PostUpdate,
            (spawn_effects, fade_effects, tick_muzzle_flashes)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_effects(mut commands: Commands, mut reader: MessageReader<SpawnEffect>) {
    for ev in reader.read() {
        let fx = ev.effect;
        let alpha = fx.color.alpha();
        commands.spawn((
            Name::new("Effect"),
            EffectInstance {
                timer: Timer::from_seconds(fx.lifetime_secs.max(0.01), TimerMode::Once),
                base_alpha: alpha,
            },
            Sprite {
                color: fx.color,
                custom_size: Some(Vec2::splat(fx.radius * 2.0)),
                ..default()
            },
            Transform::from_translation(ev.pos.extend(3.0)),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

fn fade_effects(
    time: Res<Time>,
    mut commands: Commands,
    mut q: Query<(Entity, &mut EffectInstance, &mut Sprite)>,
) {
    for (e, mut fx, mut sprite) in &mut q {
        fx.timer.tick(time.delta());
        if fx.timer.is_finished() {
            commands.entity(e).despawn();
            continue;
        }
        let remaining = 1.0 - timer_fraction(&fx.timer);
        sprite.color.set_alpha(fx.base_alpha * remaining);
    }
}

fn tick_muzzle_flashes(time: Res<Time>, mut q: Query<&mut MuzzleFlash>) {
    for mut flash in &mut q {
        flash.tick(time.delta());
    }
}

#[inline]
fn timer_fraction(timer: &Timer) -> f32 {
    let dur = timer.duration().as_secs_f32().max(0.0001);
    (timer.elapsed_secs() / dur).clamp(0.0, 1.0)
}

//! Idle/demo mode: an AI that plays the game
//!
//! Produces the same commands a player would (tilt samples and taps), so it
//! exercises the full session path. Seeded, so a run can be replayed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::session::Command;
use crate::sim::GameState;

/// Tilt signal is capped to what a real accelerometer reports
const MAX_SIGNAL: f32 = 1.0;
/// Dead zone around the target (pixels) where the autopilot stops steering
const AIM_TOLERANCE: f32 = 4.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    /// Chance of firing on a frame where the shot is lined up
    fire_chance: f64,
    /// Random tilt wobble added to each sample
    jitter: f32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            fire_chance: 0.8,
            jitter: 0.1,
        }
    }

    /// Commands for the next frame, based on the current state
    pub fn commands(&mut self, state: &GameState) -> Vec<Command> {
        let mut commands = Vec::new();
        if !state.is_playing() {
            commands.push(Command::Restart);
            return commands;
        }

        // Chase the lowest enemy (the one closest to breaching)
        let target = state.entities.enemies.iter().max_by(|a, b| {
            a.rect
                .bottom()
                .partial_cmp(&b.rect.bottom())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let Some(target) = target else {
            return commands;
        };

        let player_center = state.player.x + PLAYER_W / 2.0;
        let offset = target.rect.center_x() - player_center;
        let sensitivity = state.settings.tilt_sensitivity;

        if offset.abs() > AIM_TOLERANCE {
            // Positive signal moves left
            let wobble = self.rng.random_range(-self.jitter..=self.jitter);
            let signal = (-offset / sensitivity + wobble).clamp(-MAX_SIGNAL, MAX_SIGNAL);
            commands.push(Command::Tilt(signal));
        }

        let lined_up = (offset.abs() - target.rect.width() / 2.0) < BULLET_W;
        if lined_up && state.fire_cooldown.is_ready() && self.rng.random_bool(self.fire_chance) {
            commands.push(Command::Fire);
        }

        commands
    }
}

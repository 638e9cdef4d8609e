//! Per-frame simulation tick
//!
//! Core game loop that advances the simulation by one frame.

use super::collision::{resolve_breaches, resolve_projectile_hits};
use super::state::{GameEvent, GamePhase, GameState, Outcome};
use super::waves::WAVES;
use crate::consts::*;

/// Clamp a frame delta into `[0, MAX_FRAME_DT]`; NaN counts as no time
#[inline]
pub fn clamp_dt(dt: f32) -> f32 {
    if dt.is_nan() {
        return 0.0;
    }
    dt.clamp(0.0, MAX_FRAME_DT)
}

/// Advance the game state by one frame of `dt` seconds.
///
/// Order matters: motion, projectile hits, breaches, then the wave-clear
/// check. A fatal breach ends the run before a cleared wave is looked at.
pub fn tick(state: &mut GameState, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }
    let dt = clamp_dt(dt);
    let playfield = state.settings.playfield;

    // 1. Motion
    state.entities.advance(dt, &playfield);

    // 2. Projectiles vs enemies
    let hits = resolve_projectile_hits(&mut state.entities, &mut events);
    state.score += hits.score;

    // 3. Enemies vs player
    let player = state.player_rect();
    state.lives = resolve_breaches(&mut state.entities, &player, state.lives, &mut events);
    if state.lives == 0 {
        finish(state, &mut events);
        return events;
    }

    // 4. Wave clear
    if state.entities.is_clear() {
        advance_wave(state, hits.boss_destroyed, &mut events);
    }

    events
}

/// Spawn whatever follows a cleared formation, or end the run after the boss
fn advance_wave(state: &mut GameState, boss_destroyed: bool, events: &mut Vec<GameEvent>) {
    let last_wave = WAVES.len() as u32 - 1;

    if state.wave_index < last_wave {
        state.wave_index += 1;
        let count = state.spawn_wave(state.wave_index);
        events.push(GameEvent::WaveSpawned {
            wave_index: state.wave_index,
            count,
        });
    } else if state.wave_index == last_wave {
        state.wave_index += 1;
        let hp = state.spawn_boss();
        events.push(GameEvent::BossSpawned { hp });
    } else if boss_destroyed {
        finish(state, events);
    } else {
        // Boss got through without being destroyed; it comes back
        let hp = state.spawn_boss();
        events.push(GameEvent::BossSpawned { hp });
    }
}

fn finish(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::Over;
    let outcome = if state.lives > 0 {
        Outcome::Won
    } else {
        Outcome::Lost
    };
    log::info!(
        "{} score={} wave={}",
        outcome.title(),
        state.score,
        state.wave_label()
    );
    events.push(GameEvent::GameOver { outcome });
}

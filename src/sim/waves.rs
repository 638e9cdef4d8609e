//! Wave table and formation layout
//!
//! Waves are table-driven: each entry sets how many enemies spawn and how fast
//! they fall. Past the last entry the boss takes over.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::{Enemy, EnemyKind, EntityIds};
use crate::clamp_range;
use crate::consts::*;
use crate::settings::Playfield;

/// Enemy count and speed for one wave
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveDescriptor {
    pub count: u32,
    pub speed_mul: f32,
}

const fn wave(count: u32, speed_mul: f32) -> WaveDescriptor {
    WaveDescriptor { count, speed_mul }
}

pub const WAVES: [WaveDescriptor; 10] = [
    wave(4, 1.0),
    wave(5, 1.05),
    wave(6, 1.1),
    wave(7, 1.12),
    wave(8, 1.2),
    wave(9, 1.25),
    wave(10, 1.3),
    wave(11, 1.35),
    wave(12, 1.45),
    wave(14, 1.6),
];

/// Formation colors, cycled by grid index
pub const PALETTE: [&str; 4] = ["#ffd166", "#06d6a0", "#118ab2", "#ef476f"];

/// Descriptor for a wave; indices past the table reuse the last entry
pub fn descriptor(wave_index: u32) -> WaveDescriptor {
    let idx = (wave_index as usize).min(WAVES.len() - 1);
    WAVES[idx]
}

/// Lay out the formation for `wave_index` above the top of the playfield.
///
/// Up to [`MAX_SINGLE_ROW`] enemies fit in one row; larger waves split into two
/// rows. Columns are spaced evenly across the width and each row sits a fixed
/// gap above the previous one, so the whole formation enters from off-screen.
pub fn spawn_wave(wave_index: u32, playfield: &Playfield, ids: &mut EntityIds) -> Vec<Enemy> {
    let desc = descriptor(wave_index);
    let count = desc.count;
    let rows = if count > MAX_SINGLE_ROW { 2 } else { 1 };
    let per_row = count.div_ceil(rows);
    let spacing = playfield.width / (per_row + 1) as f32;
    let speed = ENEMY_SPEED * desc.speed_mul;

    let mut enemies = Vec::with_capacity(count as usize);
    for row in 0..rows {
        let y = -ENEMY_H - ENEMY_SPAWN_OFFSET - row as f32 * (ENEMY_H + ENEMY_ROW_GAP);
        for col in 0..per_row {
            let grid_index = row * per_row + col;
            if grid_index >= count {
                break;
            }
            let x = clamp_range(
                col as f32 * spacing + spacing - ENEMY_W / 2.0,
                0.0,
                playfield.width - ENEMY_W,
            );
            enemies.push(Enemy {
                id: ids.allocate(),
                rect: Rect::new(x, y, ENEMY_W, ENEMY_H),
                hp: 1,
                speed,
                kind: EnemyKind::Normal,
                color: PALETTE[grid_index as usize % PALETTE.len()].to_string(),
            });
        }
    }
    enemies
}

/// Hit points for a boss spawned at `score`
pub fn boss_hp(score: u64) -> u32 {
    let bonus = score / BOSS_HP_SCORE_STEP;
    BOSS_BASE_HP.saturating_add(u32::try_from(bonus).unwrap_or(u32::MAX))
}

/// A single oversized enemy, centered, with hit points that grow with score
pub fn spawn_boss(score: u64, playfield: &Playfield, ids: &mut EntityIds) -> Enemy {
    let width = (ENEMY_W * BOSS_SCALE).round();
    let height = (ENEMY_H * BOSS_SCALE).round();
    Enemy {
        id: ids.allocate(),
        rect: Rect::new(
            (playfield.width - width) / 2.0,
            -height - BOSS_SPAWN_OFFSET,
            width,
            height,
        ),
        hp: boss_hp(score),
        speed: BOSS_SPEED,
        kind: EnemyKind::Boss,
        color: BOSS_COLOR.to_string(),
    }
}

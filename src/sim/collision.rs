//! Collision resolution between projectiles, enemies and the player
//!
//! Both passes scan enemies from newest to oldest. That order decides which
//! enemy a projectile strikes when several overlap it, so it must stay stable.

use super::rect::Rect;
use super::state::{Entities, GameEvent};
use crate::consts::{GRAZE_SCORE, KILL_SCORE};

/// Totals from one projectile pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitSummary {
    /// Score earned this pass
    pub score: u64,
    /// A boss lost its last hit point
    pub boss_destroyed: bool,
}

/// Resolve projectile/enemy overlaps.
///
/// Each projectile strikes at most one enemy (the newest one it overlaps) and
/// is consumed by the hit. The struck enemy loses one hit point; reaching zero
/// removes it for [`KILL_SCORE`], otherwise the hit is worth [`GRAZE_SCORE`].
pub fn resolve_projectile_hits(entities: &mut Entities, events: &mut Vec<GameEvent>) -> HitSummary {
    let mut summary = HitSummary::default();
    let enemies = &mut entities.enemies;

    entities.projectiles.retain(|projectile| {
        let Some(idx) = enemies
            .iter()
            .rposition(|enemy| projectile.rect.overlaps(&enemy.rect))
        else {
            return true;
        };

        let enemy = &mut enemies[idx];
        let hp_left = enemy.damage();
        if hp_left == 0 {
            let enemy = enemies.remove(idx);
            summary.score += KILL_SCORE;
            summary.boss_destroyed |= enemy.is_boss();
            events.push(GameEvent::EnemyDestroyed {
                enemy_id: enemy.id,
                kind: enemy.kind,
            });
        } else {
            summary.score += GRAZE_SCORE;
            events.push(GameEvent::EnemyHit {
                enemy_id: enemy.id,
                hp_left,
            });
        }
        false
    });

    summary
}

/// Whether an enemy has reached the player: it touches the paddle or its
/// bottom edge has crossed the defense line.
#[inline]
pub fn breaches(enemy: &Rect, player: &Rect) -> bool {
    enemy.bottom() >= player.y() || enemy.overlaps(player)
}

/// Remove every enemy that reached the player, one life each.
///
/// Stops as soon as lives run out; returns the lives left.
pub fn resolve_breaches(
    entities: &mut Entities,
    player: &Rect,
    mut lives: u32,
    events: &mut Vec<GameEvent>,
) -> u32 {
    let mut idx = entities.enemies.len();
    while idx > 0 && lives > 0 {
        idx -= 1;
        if !breaches(&entities.enemies[idx].rect, player) {
            continue;
        }
        let enemy = entities.enemies.remove(idx);
        lives -= 1;
        events.push(GameEvent::PlayerBreached {
            enemy_id: enemy.id,
            lives_left: lives,
        });
    }
    lives
}

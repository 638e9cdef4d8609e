//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through the `dt` passed to `tick`
//! - IDs come from a monotonic counter, never the clock
//! - Stable iteration order (spawn order; collisions scan newest first)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;
pub mod waves;

pub use collision::{HitSummary, breaches, resolve_breaches, resolve_projectile_hits};
pub use rect::Rect;
pub use state::{
    Cooldown, Enemy, EnemyKind, Entities, EntityIds, GameEvent, GamePhase, GameState, Outcome,
    Player, Projectile,
};
pub use tick::{clamp_dt, tick};
pub use waves::{PALETTE, WAVES, WaveDescriptor, spawn_boss, spawn_wave};

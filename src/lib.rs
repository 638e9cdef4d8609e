//! Tilt Shooter - A tilt-controlled arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, waves, game state)
//! - `session`: Frame loop controller and command queue
//! - `snapshot`: Read-only render/HUD descriptors for the presentation layer
//! - `settings`: Playfield dimensions and tunables
//! - `autopilot`: Seeded demo input source

pub mod autopilot;
pub mod session;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use session::{Command, CommandSender, FrameOutcome, FrameToken, Session};
pub use settings::{Playfield, Settings, SettingsError};
pub use snapshot::Snapshot;

/// Game configuration constants
pub mod consts {
    /// Largest simulated step; longer frames (stalls, backgrounding) are clamped
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Player paddle
    pub const PLAYER_W: f32 = 50.0;
    pub const PLAYER_H: f32 = 50.0;
    pub const PLAYER_BOTTOM_PADDING: f32 = 20.0;

    /// Projectiles (pixels, pixels/s)
    pub const BULLET_W: f32 = 8.0;
    pub const BULLET_H: f32 = 16.0;
    pub const BULLET_SPEED: f32 = 700.0;
    /// Projectiles are pruned once their bottom edge is this far above the top
    pub const BULLET_TOP_MARGIN: f32 = 50.0;

    /// Normal enemies
    pub const ENEMY_W: f32 = 40.0;
    pub const ENEMY_H: f32 = 40.0;
    pub const ENEMY_SPEED: f32 = 180.0;
    /// Enemies are pruned once their top edge is this far below the bottom
    pub const ENEMY_BOTTOM_MARGIN: f32 = 200.0;
    /// Gap above the screen for the first formation row
    pub const ENEMY_SPAWN_OFFSET: f32 = 20.0;
    pub const ENEMY_ROW_GAP: f32 = 12.0;
    /// Formations wider than this split into two rows
    pub const MAX_SINGLE_ROW: u32 = 8;

    /// Boss
    pub const BOSS_SCALE: f32 = 1.8;
    pub const BOSS_BASE_HP: u32 = 40;
    /// One extra boss hit point per this many points scored
    pub const BOSS_HP_SCORE_STEP: u64 = 500;
    pub const BOSS_SPEED: f32 = 40.0;
    pub const BOSS_SPAWN_OFFSET: f32 = 40.0;
    pub const BOSS_COLOR: &str = "#9b5de5";

    /// Scoring
    pub const KILL_SCORE: u64 = 100;
    pub const GRAZE_SCORE: u64 = 25;

    /// Session defaults
    pub const DEFAULT_STARTING_LIVES: u32 = 3;
    pub const DEFAULT_FIRE_COOLDOWN: f32 = 0.05;
    pub const DEFAULT_TILT_SENSITIVITY: f32 = 50.0;
}

/// Clamp `value` into `[min, max]`, collapsing to `min` when the range is empty
/// and treating NaN as `min`
#[inline]
pub fn clamp_range(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        return min;
    }
    value.min(max).max(min)
}

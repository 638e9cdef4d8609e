//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives here. Presentation only ever sees
//! a [`crate::Snapshot`] built from this state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::waves;
use crate::clamp_range;
use crate::consts::*;
use crate::settings::{Playfield, Settings};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay; ticks run
    Playing,
    /// Run ended (won or lost); terminal until restart
    Over,
}

/// How a finished run ended, derived from the lives left when it ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    pub fn title(&self) -> &'static str {
        match self {
            Outcome::Won => "You Win!",
            Outcome::Lost => "Game Over",
        }
    }
}

/// Something that happened during a tick or command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Projectile took a hit point off an enemy that survived
    EnemyHit { enemy_id: u32, hp_left: u32 },
    /// Enemy hit points reached zero
    EnemyDestroyed { enemy_id: u32, kind: EnemyKind },
    /// Enemy crossed the defense line or touched the player
    PlayerBreached { enemy_id: u32, lives_left: u32 },
    /// New formation entered the playfield
    WaveSpawned { wave_index: u32, count: usize },
    BossSpawned { hp: u32 },
    GameOver { outcome: Outcome },
}

/// A player projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub rect: Rect,
}

impl Projectile {
    pub fn new(id: u32, x: f32, y: f32) -> Self {
        Self {
            id,
            rect: Rect::new(x, y, BULLET_W, BULLET_H),
        }
    }
}

/// Enemy types (also the display tag)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    #[default]
    Normal,
    Boss,
}

impl EnemyKind {
    pub fn tag(&self) -> &'static str {
        match self {
            EnemyKind::Normal => "normal",
            EnemyKind::Boss => "boss",
        }
    }
}

fn one_hp() -> u32 {
    1
}

/// An enemy entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub rect: Rect,
    /// Remaining hit points; missing values load as a one-hit enemy
    #[serde(default = "one_hp")]
    pub hp: u32,
    /// Downward speed in pixels/second
    pub speed: f32,
    #[serde(default)]
    pub kind: EnemyKind,
    pub color: String,
}

impl Enemy {
    /// Take one hit point; returns the hit points left.
    /// A zero value is treated as a one-hit enemy.
    pub fn damage(&mut self) -> u32 {
        self.hp = self.hp.max(1) - 1;
        self.hp
    }

    #[inline]
    pub fn is_boss(&self) -> bool {
        self.kind == EnemyKind::Boss
    }
}

/// The player's paddle; only the horizontal offset moves
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
}

impl Player {
    /// Centered on the playfield
    pub fn centered(playfield: &Playfield) -> Self {
        Self {
            x: playfield.player_max_x() / 2.0,
        }
    }

    /// Collision rectangle (bottom-anchored)
    pub fn rect(&self, playfield: &Playfield) -> Rect {
        Rect::new(self.x, playfield.player_top(), PLAYER_W, PLAYER_H)
    }

    /// Shift by `dx`, clamped to the playfield
    pub fn nudge(&mut self, dx: f32, playfield: &Playfield) {
        self.x = clamp_range(self.x + dx, 0.0, playfield.player_max_x());
    }
}

/// Monotonic entity ID allocator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn allocate(&mut self) -> u32 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Active projectiles and enemies (kept in spawn order)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entities {
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
}

impl Entities {
    pub fn add_projectile(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    pub fn add_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    pub fn remove_projectile(&mut self, id: u32) -> Option<Projectile> {
        let idx = self.projectiles.iter().position(|p| p.id == id)?;
        Some(self.projectiles.remove(idx))
    }

    pub fn remove_enemy(&mut self, id: u32) -> Option<Enemy> {
        let idx = self.enemies.iter().position(|e| e.id == id)?;
        Some(self.enemies.remove(idx))
    }

    /// Install a new formation, discarding every enemy and projectile
    pub fn replace_all(&mut self, enemies: Vec<Enemy>) {
        self.enemies = enemies;
        self.projectiles.clear();
    }

    /// Move everything by `dt` seconds, then drop what left the playfield
    pub fn advance(&mut self, dt: f32, playfield: &Playfield) {
        let bullet_step = Vec2::new(0.0, -BULLET_SPEED * dt);
        for projectile in &mut self.projectiles {
            projectile.rect = projectile.rect.translated(bullet_step);
        }
        for enemy in &mut self.enemies {
            enemy.rect = enemy.rect.translated(Vec2::new(0.0, enemy.speed * dt));
        }

        self.projectiles.retain(|p| p.rect.bottom() > -BULLET_TOP_MARGIN);
        let floor = playfield.height + ENEMY_BOTTOM_MARGIN;
        self.enemies.retain(|e| e.rect.y() < floor);
    }

    pub fn is_clear(&self) -> bool {
        self.enemies.is_empty()
    }
}

/// One-shot fire cooldown, counted down in host seconds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cooldown {
    remaining: f32,
}

impl Cooldown {
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn trigger(&mut self, duration: f32) {
        self.remaining = duration.max(0.0);
    }

    pub fn elapse(&mut self, dt: f32) {
        if dt > 0.0 {
            self.remaining = (self.remaining - dt).max(0.0);
        }
    }

    pub fn reset(&mut self) {
        self.remaining = 0.0;
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub settings: Settings,
    /// Current wave index (0-based; at or past the table means boss)
    pub wave_index: u32,
    pub lives: u32,
    pub score: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub entities: Entities,
    pub fire_cooldown: Cooldown,
    ids: EntityIds,
}

impl GameState {
    /// Create a new game with wave 0 already spawned
    pub fn new(settings: Settings) -> Self {
        let mut state = Self {
            player: Player::centered(&settings.playfield),
            lives: settings.starting_lives,
            settings,
            wave_index: 0,
            score: 0,
            phase: GamePhase::Playing,
            entities: Entities::default(),
            fire_cooldown: Cooldown::default(),
            ids: EntityIds::default(),
        };
        state.spawn_wave(0);
        state
    }

    #[inline]
    pub fn playfield(&self) -> &Playfield {
        &self.settings.playfield
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        self.ids.allocate()
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Whether the boss formation is (or has been) reached
    #[inline]
    pub fn in_boss_phase(&self) -> bool {
        self.wave_index as usize >= waves::WAVES.len()
    }

    pub fn player_rect(&self) -> Rect {
        self.player.rect(&self.settings.playfield)
    }

    /// Outcome of a finished run
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::Playing => None,
            GamePhase::Over if self.lives > 0 => Some(Outcome::Won),
            GamePhase::Over => Some(Outcome::Lost),
        }
    }

    /// Wave HUD text: "3/10" during normal waves, "11 (BOSS)" after
    pub fn wave_label(&self) -> String {
        let total = waves::WAVES.len() as u32;
        let current = self.wave_index.saturating_add(1);
        if self.in_boss_phase() {
            format!("{} (BOSS)", current.min(total + 1))
        } else {
            format!("{}/{}", current.min(total), total)
        }
    }

    /// Fire a projectile from the player's center.
    /// Returns false when not playing or still cooling down.
    pub fn fire(&mut self) -> bool {
        if !self.is_playing() {
            log::debug!("Fire ignored: game is over");
            return false;
        }
        if !self.fire_cooldown.is_ready() {
            log::debug!("Fire ignored: cooling down");
            return false;
        }
        self.fire_cooldown.trigger(self.settings.fire_cooldown);

        let x = self.player.x + (PLAYER_W - BULLET_W) / 2.0;
        let y = self.playfield().player_top() - BULLET_H;
        let id = self.next_entity_id();
        self.entities.add_projectile(Projectile::new(id, x, y));
        true
    }

    /// Apply one tilt sample; positive signal moves left
    pub fn apply_tilt(&mut self, signal: f32) {
        if !signal.is_finite() {
            return;
        }
        let dx = -signal * self.settings.tilt_sensitivity;
        self.player.nudge(dx, &self.settings.playfield);
    }

    /// Advance the host clock for the fire cooldown
    pub fn elapse_cooldown(&mut self, dt: f32) {
        self.fire_cooldown.elapse(dt);
    }

    /// Reset score, lives and waves and start over from wave 0
    pub fn restart(&mut self) {
        self.score = 0;
        self.lives = self.settings.starting_lives;
        self.wave_index = 0;
        self.phase = GamePhase::Playing;
        self.fire_cooldown.reset();
        self.ids = EntityIds::default();
        self.spawn_wave(0);
        log::info!("Game restarted");
    }

    /// Replace everything with the formation for `wave_index`
    pub fn spawn_wave(&mut self, wave_index: u32) -> usize {
        let enemies = waves::spawn_wave(wave_index, &self.settings.playfield, &mut self.ids);
        let count = enemies.len();
        self.entities.replace_all(enemies);
        log::info!("Wave {}: {} enemies", wave_index + 1, count);
        count
    }

    /// Replace the enemies with a boss scaled to the current score.
    /// Projectiles already in flight are kept.
    pub fn spawn_boss(&mut self) -> u32 {
        let boss = waves::spawn_boss(self.score, &self.settings.playfield, &mut self.ids);
        let hp = boss.hp;
        self.entities.enemies = vec![boss];
        log::info!("Boss spawned with {} hp", hp);
        hp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy(id: u32, y: f32, speed: f32) -> Enemy {
        Enemy {
            id,
            rect: Rect::new(100.0, y, ENEMY_W, ENEMY_H),
            hp: 1,
            speed,
            kind: EnemyKind::Normal,
            color: "#ffffff".to_string(),
        }
    }

    #[test]
    fn test_new_game() {
        let state = GameState::new(Settings::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.wave_index, 0);
        assert_eq!(state.entities.enemies.len(), 4);
        assert!(state.entities.projectiles.is_empty());
        assert_eq!(state.outcome(), None);
    }

    #[test]
    fn test_advance_moves_and_prunes() {
        let field = Playfield {
            width: 400.0,
            height: 800.0,
        };
        let mut entities = Entities::default();
        entities.add_projectile(Projectile::new(1, 10.0, 100.0));
        entities.add_projectile(Projectile::new(2, 10.0, -60.0));
        entities.add_enemy(enemy(3, 0.0, 100.0));
        entities.add_enemy(enemy(4, 999.0, 100.0));

        entities.advance(0.1, &field);

        assert_eq!(entities.projectiles.len(), 1);
        assert_eq!(entities.projectiles[0].rect.y(), 30.0);
        // Enemy 4 went past height + 200
        assert_eq!(entities.enemies.len(), 1);
        assert_eq!(entities.enemies[0].rect.y(), 10.0);
    }

    #[test]
    fn test_replace_all_clears_projectiles() {
        let mut entities = Entities::default();
        entities.add_projectile(Projectile::new(1, 0.0, 0.0));
        entities.add_enemy(enemy(2, 0.0, 1.0));
        entities.replace_all(vec![enemy(3, 0.0, 1.0), enemy(4, 0.0, 1.0)]);
        assert!(entities.projectiles.is_empty());
        assert_eq!(
            entities.enemies.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![3, 4]
        );
    }

    #[test]
    fn test_remove_by_id() {
        let mut entities = Entities::default();
        entities.add_enemy(enemy(1, 0.0, 1.0));
        entities.add_enemy(enemy(2, 0.0, 1.0));
        assert_eq!(entities.remove_enemy(1).map(|e| e.id), Some(1));
        assert!(entities.remove_enemy(1).is_none());
        assert!(entities.remove_projectile(7).is_none());
        assert_eq!(entities.enemies.len(), 1);
    }

    #[test]
    fn test_damage_treats_zero_hp_as_one() {
        let mut e = enemy(1, 0.0, 1.0);
        e.hp = 0;
        assert_eq!(e.damage(), 0);
        e.hp = 3;
        assert_eq!(e.damage(), 2);
    }

    #[test]
    fn test_missing_hp_deserializes_as_one() {
        let json = r##"{
            "id": 9,
            "rect": { "pos": [0.0, 0.0], "size": [40.0, 40.0] },
            "speed": 180.0,
            "color": "#ffd166"
        }"##;
        let e: Enemy = serde_json::from_str(json).unwrap();
        assert_eq!(e.hp, 1);
        assert_eq!(e.kind, EnemyKind::Normal);
    }

    #[test]
    fn test_tilt_clamps_to_playfield() {
        let mut state = GameState::new(Settings::with_playfield(400.0, 800.0));
        assert_eq!(state.player.x, 175.0);

        state.apply_tilt(-1.0);
        assert_eq!(state.player.x, 225.0);

        for _ in 0..20 {
            state.apply_tilt(-1.0);
        }
        assert_eq!(state.player.x, 350.0);

        for _ in 0..20 {
            state.apply_tilt(1.0);
        }
        assert_eq!(state.player.x, 0.0);

        state.apply_tilt(f32::NAN);
        assert_eq!(state.player.x, 0.0);
    }

    #[test]
    fn test_cooldown() {
        let mut cooldown = Cooldown::default();
        assert!(cooldown.is_ready());
        cooldown.trigger(0.05);
        assert!(!cooldown.is_ready());
        cooldown.elapse(0.03);
        assert!(!cooldown.is_ready());
        cooldown.elapse(0.03);
        assert!(cooldown.is_ready());
    }

    #[test]
    fn test_wave_label() {
        let mut state = GameState::new(Settings::default());
        assert_eq!(state.wave_label(), "1/10");
        state.wave_index = 9;
        assert_eq!(state.wave_label(), "10/10");
        state.wave_index = 10;
        assert_eq!(state.wave_label(), "11 (BOSS)");
        state.wave_index = 42;
        assert_eq!(state.wave_label(), "11 (BOSS)");
    }

    #[test]
    fn test_outcome_from_lives() {
        let mut state = GameState::new(Settings::default());
        state.phase = GamePhase::Over;
        assert_eq!(state.outcome(), Some(Outcome::Won));
        state.lives = 0;
        assert_eq!(state.outcome(), Some(Outcome::Lost));
    }

    #[test]
    fn test_ids_are_unique_and_reset_on_restart() {
        let mut state = GameState::new(Settings::default());
        let first_ids: Vec<u32> = state.entities.enemies.iter().map(|e| e.id).collect();
        assert_eq!(first_ids, vec![1, 2, 3, 4]);
        assert_eq!(state.next_entity_id(), 5);

        state.restart();
        let ids: Vec<u32> = state.entities.enemies.iter().map(|e| e.id).collect();
        assert_eq!(ids, first_ids);
    }
}

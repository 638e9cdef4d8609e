//! Render/HUD snapshot handed to the presentation layer after each frame
//!
//! Plain data, serializable, rounded to whole pixels the way the view places
//! things. Nothing in here points back into the simulation.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{GameState, Outcome, Rect};

/// How an entity should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Circle,
    Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub shape: Shape,
    pub color: String,
    /// Display tag (`"normal"`, `"boss"`, `"projectile"`)
    pub tag: String,
}

impl Sprite {
    fn from_rect(id: u32, rect: &Rect, shape: Shape, color: &str, tag: &str) -> Self {
        Self {
            id,
            x: rect.x().round(),
            y: rect.y().round(),
            w: rect.width(),
            h: rect.height(),
            shape,
            color: color.to_string(),
            tag: tag.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u32,
    pub wave: String,
}

/// End-of-run overlay with a restart button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub outcome: Outcome,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub enemies: Vec<Sprite>,
    pub projectiles: Vec<Sprite>,
    pub player: Sprite,
    pub hud: Hud,
    pub overlay: Option<Overlay>,
}

const PROJECTILE_COLOR: &str = "#ffffff";
const PLAYER_COLOR: &str = "#ffffff";

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let enemies = state
            .entities
            .enemies
            .iter()
            .map(|e| Sprite::from_rect(e.id, &e.rect, Shape::Circle, &e.color, e.kind.tag()))
            .collect();
        let projectiles = state
            .entities
            .projectiles
            .iter()
            .map(|p| Sprite::from_rect(p.id, &p.rect, Shape::Rect, PROJECTILE_COLOR, "projectile"))
            .collect();

        // The player is placed unrounded by the view
        let player_rect = state.player_rect();
        let player = Sprite {
            id: 0,
            x: player_rect.x(),
            y: player_rect.y(),
            w: PLAYER_W,
            h: PLAYER_H,
            shape: Shape::Rect,
            color: PLAYER_COLOR.to_string(),
            tag: "player".to_string(),
        };

        Self {
            enemies,
            projectiles,
            player,
            hud: Hud {
                score: state.score,
                lives: state.lives,
                wave: state.wave_label(),
            },
            overlay: state.outcome().map(|outcome| Overlay {
                outcome,
                title: outcome.title().to_string(),
            }),
        }
    }
}

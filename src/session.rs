//! Session controller: command queue and frame loop
//!
//! Input handlers never touch the game state directly. They push commands
//! through a [`CommandSender`] (usable from any thread); the queue is drained
//! at the start of each frame, so every command lands either before or after
//! a tick, never in the middle of one.
//!
//! The frame loop is driven by the host's display clock. Each `start()` hands
//! out a new [`FrameToken`]; frames presented with an older token are ignored,
//! so a continuation scheduled by a previous loop can never tick a new game.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, tick};
use crate::snapshot::Snapshot;

/// Input commands from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Tap/press
    Fire,
    /// One normalized tilt sample
    Tilt(f32),
    /// Restart button on the end-of-run overlay
    Restart,
}

/// Cloneable handle for queuing commands
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: Sender<Command>,
}

impl CommandSender {
    /// Queue a command; returns false once the session is gone
    pub fn send(&self, command: Command) -> bool {
        self.tx.send(command).is_ok()
    }

    pub fn fire(&self) -> bool {
        self.send(Command::Fire)
    }

    pub fn tilt(&self, signal: f32) -> bool {
        self.send(Command::Tilt(signal))
    }

    pub fn restart(&self) -> bool {
        self.send(Command::Restart)
    }
}

/// Identifies one run of the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Stopped,
}

/// Owns the game state and serializes all mutation through `frame`
#[derive(Debug)]
pub struct Session {
    state: GameState,
    rx: Receiver<Command>,
    tx: Sender<Command>,
    /// Current loop generation; `None` while stopped
    running: Option<u64>,
    generation: u64,
    last_time: Option<f64>,
    /// Events from the most recent frame
    events: Vec<GameEvent>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            state: GameState::new(settings),
            rx,
            tx,
            running: None,
            generation: 0,
            last_time: None,
            events: Vec::new(),
        }
    }

    pub fn sender(&self) -> CommandSender {
        CommandSender {
            tx: self.tx.clone(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for hosts (and tests) that run on the loop's thread
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Start (or restart) the frame loop. Any earlier token goes stale.
    /// Returns `None` when the game is over and nothing has restarted it.
    pub fn start(&mut self) -> Option<FrameToken> {
        if !self.state.is_playing() {
            return None;
        }
        self.generation += 1;
        self.running = Some(self.generation);
        self.last_time = None;
        Some(FrameToken(self.generation))
    }

    /// Cancel the loop (teardown)
    pub fn stop(&mut self) {
        self.running = None;
        self.last_time = None;
    }

    /// Apply queued commands without ticking.
    ///
    /// Hosts call this while the loop is stopped so the restart button works.
    pub fn pump(&mut self) {
        while let Ok(command) = self.rx.try_recv() {
            self.apply(command);
        }
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Fire => {
                self.state.fire();
            }
            Command::Tilt(signal) => self.state.apply_tilt(signal),
            Command::Restart => self.state.restart(),
        }
    }

    /// Run one frame at host time `now` (seconds).
    ///
    /// Runs the fire cooldown on the raw host delta, drains the command queue
    /// and ticks the simulation with the clamped delta. The first frame of a
    /// loop uses a zero delta.
    pub fn frame(&mut self, token: FrameToken, now: f64) -> FrameOutcome {
        self.events.clear();
        if self.running != Some(token.0) {
            return FrameOutcome::Stopped;
        }

        let elapsed = match self.last_time {
            Some(last) => (now - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(now);

        // Commands queued since the last frame see the cooldown as of now
        self.state.elapse_cooldown(elapsed);
        self.pump();
        self.events = tick(&mut self.state, elapsed);

        if self.state.is_playing() {
            FrameOutcome::Continue
        } else {
            log::debug!("Frame loop stopped: game over");
            self.stop();
            FrameOutcome::Stopped
        }
    }
}

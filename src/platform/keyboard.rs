//! Keyboard mapping
//!
//! Tracks held keys by DOM `KeyboardEvent.code` name.

use std::collections::HashSet;

use crate::sim::TickInput;

/// Currently held keys plus the idle-mode toggle
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<String>,
    idle_mode: bool,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, code: &str) {
        // Auto-repeat sends repeated keydowns; only the first toggles
        if self.held.insert(code.to_string()) && code == "KeyI" {
            self.idle_mode = !self.idle_mode;
            log::info!("Idle mode: {}", self.idle_mode);
        }
    }

    pub fn key_up(&mut self, code: &str) {
        self.held.remove(code);
    }

    /// Drop every held key (window blur)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_down(&self, code: &str) -> bool {
        self.held.contains(code)
    }

    pub fn idle_mode(&self) -> bool {
        self.idle_mode
    }

    /// Controls for the next tick
    pub fn input(&self) -> TickInput {
        TickInput {
            turn_left: self.is_down("ArrowLeft"),
            turn_right: self.is_down("ArrowRight"),
            thrust: self.is_down("ArrowUp"),
            brake: self.is_down("ArrowDown"),
            fire: self.is_down("Space"),
            cycle_weapon: self.is_down("KeyQ"),
            restart: self.is_down("KeyR"),
            idle_mode: self.idle_mode,
        }
    }
}

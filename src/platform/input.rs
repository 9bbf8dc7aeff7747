//! Input normalization
//!
//! Keyboard, pointer/touch and gamepad all collapse into the three session
//! commands. Held keys and buttons only fire once, on the press edge.

use std::collections::HashSet;

use crate::sim::tick::{Command, TickInput};

/// Standard-mapping gamepad buttons we care about
pub mod gamepad {
    pub const BUTTON_SOUTH: u32 = 0;
    pub const DPAD_UP: u32 = 12;
    pub const DPAD_DOWN: u32 = 13;
}

/// Map a DOM `KeyboardEvent.code` to a command
pub fn command_for_key(code: &str) -> Option<Command> {
    match code {
        "ArrowUp" | "KeyW" => Some(Command::MoveUp),
        "ArrowDown" | "KeyS" => Some(Command::MoveDown),
        "Space" => Some(Command::Throw),
        _ => None,
    }
}

/// Map a standard gamepad button index to a command
pub fn command_for_button(button: u32) -> Option<Command> {
    match button {
        gamepad::DPAD_UP => Some(Command::MoveUp),
        gamepad::DPAD_DOWN => Some(Command::MoveDown),
        gamepad::BUTTON_SOUTH => Some(Command::Throw),
        _ => None,
    }
}

/// Collects "just pressed" commands between ticks
#[derive(Debug, Default)]
pub struct InputMapper {
    held_keys: HashSet<String>,
    held_buttons: HashSet<u32>,
    pending: TickInput,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key pressed. Auto-repeat of a held key is ignored.
    pub fn key_down(&mut self, code: &str) -> Option<Command> {
        let command = command_for_key(code)?;
        if !self.held_keys.insert(code.to_string()) {
            return None;
        }
        self.push(command);
        Some(command)
    }

    pub fn key_up(&mut self, code: &str) {
        self.held_keys.remove(code);
    }

    /// Pointer or touch start anywhere on the canvas throws
    pub fn pointer_down(&mut self) -> Command {
        self.push(Command::Throw);
        Command::Throw
    }

    /// Gamepad button state from polling; fires on the press edge only
    pub fn gamepad_button(&mut self, button: u32, pressed: bool) -> Option<Command> {
        if !pressed {
            self.held_buttons.remove(&button);
            return None;
        }
        let command = command_for_button(button)?;
        if !self.held_buttons.insert(button) {
            return None;
        }
        self.push(command);
        Some(command)
    }

    /// Forget held state (focus lost, session reset)
    pub fn release_all(&mut self) {
        self.held_keys.clear();
        self.held_buttons.clear();
    }

    /// Take the commands gathered since the last tick
    pub fn take(&mut self) -> TickInput {
        std::mem::take(&mut self.pending)
    }

    fn push(&mut self, command: Command) {
        let pending = std::mem::take(&mut self.pending);
        self.pending = pending.with_command(command);
    }
}

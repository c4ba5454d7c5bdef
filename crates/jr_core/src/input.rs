//! Logical input actions with both edge-triggered and level-triggered queries.
//!
//! Physical sources (keyboard keys, gamepad buttons) are collapsed onto a
//! small set of [`Action`]s through [`InputBindings`]. The simulation only
//! ever sees actions.
//!
//! - **Level-triggered (held):** `is_held(action)` is true every frame the
//!   action is down. Used for movement and jumping.
//!
//! - **Edge-triggered (just_pressed):** true only during the frame the
//!   transition happened. Cleared by `end_frame()`, which the main loop calls
//!   only after at least one fixed simulation step has consumed it, so a press
//!   is never lost on a frame with zero steps.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Action {
    Up,
    Left,
    Right,
    Pause,
    Confirm,
    Back,
    Delete,
    Instructions,
    Restart,
    Letter(char),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum KeyName {
    Left,
    Right,
    Up,
    Down,
    Space,
    Enter,
    Escape,
    Backspace,
    Tab,
    Letter(char),
}

/// A physical input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Binding {
    Key(KeyName),
    Gamepad(u8),
}

/// One row of a binding table as written in the game config.
#[derive(Debug, Clone, Deserialize)]
pub struct BindingEntry {
    pub binding: Binding,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone)]
pub struct InputBindings {
    table: HashMap<Binding, Vec<Action>>,
}

impl InputBindings {
    pub fn from_entries(entries: Vec<BindingEntry>) -> Self {
        let mut table: HashMap<Binding, Vec<Action>> = HashMap::new();
        for entry in entries {
            table.entry(entry.binding).or_default().extend(entry.actions);
        }
        Self { table }
    }

    pub fn actions_for(&self, binding: Binding) -> &[Action] {
        self.table.get(&binding).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut table: HashMap<Binding, Vec<Action>> = HashMap::new();
        let mut bind = |binding: Binding, actions: &[Action]| {
            table.entry(binding).or_default().extend_from_slice(actions);
        };

        bind(Binding::Key(KeyName::Up), &[Action::Up]);
        bind(Binding::Key(KeyName::Space), &[Action::Up, Action::Confirm]);
        bind(Binding::Key(KeyName::Left), &[Action::Left]);
        bind(Binding::Key(KeyName::Right), &[Action::Right]);
        bind(Binding::Key(KeyName::Enter), &[Action::Confirm]);
        bind(Binding::Key(KeyName::Escape), &[Action::Quit]);
        bind(Binding::Key(KeyName::Backspace), &[Action::Delete, Action::Back]);
        bind(Binding::Key(KeyName::Tab), &[Action::Instructions]);
        for c in 'A'..='Z' {
            bind(Binding::Key(KeyName::Letter(c)), &[Action::Letter(c)]);
        }
        bind(Binding::Key(KeyName::Letter('P')), &[Action::Pause]);
        bind(Binding::Key(KeyName::Letter('R')), &[Action::Restart]);

        bind(Binding::Gamepad(0), &[Action::Quit]);
        bind(Binding::Gamepad(3), &[Action::Pause]);
        bind(Binding::Gamepad(5), &[Action::Right]);
        bind(Binding::Gamepad(7), &[Action::Left]);
        bind(Binding::Gamepad(13), &[Action::Back]);
        bind(Binding::Gamepad(14), &[Action::Up, Action::Confirm]);
        bind(Binding::Gamepad(15), &[Action::Instructions, Action::Restart]);

        Self { table }
    }
}

#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Action>,
    just_pressed: HashSet<Action>,
    just_released: HashSet<Action>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action_down(&mut self, action: Action) {
        if self.held.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    pub fn action_up(&mut self, action: Action) {
        if self.held.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Route a physical press/release through the binding table.
    pub fn apply(&mut self, bindings: &InputBindings, binding: Binding, pressed: bool) {
        let actions = bindings.actions_for(binding);
        if actions.is_empty() {
            log::trace!("Unbound input {:?}", binding);
        }
        for &action in actions {
            if pressed {
                self.action_down(action);
            } else {
                self.action_up(action);
            }
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    pub fn is_just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    pub fn is_just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Letters pressed this frame, in alphabetical order.
    pub fn just_pressed_letters(&self) -> Vec<char> {
        let mut letters: Vec<char> = self
            .just_pressed
            .iter()
            .filter_map(|a| match a {
                Action::Letter(c) => Some(*c),
                _ => None,
            })
            .collect();
        letters.sort_unstable();
        letters
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

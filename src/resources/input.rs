//! Per-frame keyboard input state.
//!
//! Captures the abstract keys the simulation cares about. The platform layer
//! implements [`InputSource`]; once per frame [`InputState::poll`] copies its
//! answers into [`BoolState`]s so behaviors can see both the held state and
//! the press/release edges.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

const KEY_COUNT: usize = 8;

/// Abstract key symbols, independent of platform key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Action1,
    Action2,
    Back,
    Debug,
}

impl Key {
    pub const ALL: [Key; KEY_COUNT] = [
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::Action1,
        Key::Action2,
        Key::Back,
        Key::Debug,
    ];

    fn slot(self) -> usize {
        self as usize
    }
}

/// Collaborator that knows which keys are physically held.
pub trait InputSource {
    fn is_key_pressed(&self, key: Key) -> bool;
}

/// Boolean key state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoolState {
    /// Whether the key is currently active/pressed this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,
}

impl BoolState {
    fn advance(&mut self, pressed: bool) {
        self.just_pressed = pressed && !self.active;
        self.just_released = !pressed && self.active;
        self.active = pressed;
    }
}

/// Keyboard state of every [`Key`] for the current frame.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    keys: [BoolState; KEY_COUNT],
}

impl InputState {
    /// Refresh every key from the source, computing press/release edges.
    pub fn poll(&mut self, source: &dyn InputSource) {
        for key in Key::ALL {
            self.keys[key.slot()].advance(source.is_key_pressed(key));
        }
    }

    pub fn key(&self, key: Key) -> BoolState {
        self.keys[key.slot()]
    }

    pub fn just_pressed(&self, key: Key) -> bool {
        self.keys[key.slot()].just_pressed
    }

    pub fn just_released(&self, key: Key) -> bool {
        self.keys[key.slot()].just_released
    }
}

impl InputSource for InputState {
    fn is_key_pressed(&self, key: Key) -> bool {
        self.keys[key.slot()].active
    }
}

/// Fixed set of held keys; handy for scripted drivers and tests.
#[derive(Debug, Clone, Default)]
pub struct HeldKeys(pub Vec<Key>);

impl InputSource for HeldKeys {
    fn is_key_pressed(&self, key: Key) -> bool {
        self.0.contains(&key)
    }
}

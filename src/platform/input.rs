//! Keyboard snapshot and event stream

use std::collections::{BTreeSet, VecDeque};

/// Keys bound to the two control schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
}

/// Keys held down at the moment of the query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySet(BTreeSet<Key>);

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.0.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.0.remove(&key);
    }

    #[inline]
    pub fn is_pressed(&self, key: Key) -> bool {
        self.0.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Key> for KeySet {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Discrete window/input events. Only `Quit` matters to the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Other,
}

/// Input collaborator, queried once per tick
pub trait InputSource {
    /// Drain events that arrived since the last call
    fn poll_events(&mut self) -> Vec<InputEvent>;
    /// Current key state
    fn pressed(&self) -> KeySet;
}

/// Replays a fixed sequence of key frames, then asks the game to quit
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<KeySet>,
    current: KeySet,
    quit_sent: bool,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = KeySet>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            current: KeySet::new(),
            quit_sent: false,
        }
    }

    /// Hold `keys` for `ticks` frames
    pub fn hold(keys: &[Key], ticks: usize) -> Self {
        let frame: KeySet = keys.iter().copied().collect();
        Self::new(std::iter::repeat_n(frame, ticks))
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        match self.frames.pop_front() {
            Some(frame) => {
                self.current = frame;
                Vec::new()
            }
            None => {
                self.current = KeySet::new();
                if self.quit_sent {
                    Vec::new()
                } else {
                    self.quit_sent = true;
                    vec![InputEvent::Quit]
                }
            }
        }
    }

    fn pressed(&self) -> KeySet {
        self.current.clone()
    }
}

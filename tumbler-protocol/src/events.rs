//! Abstract input events from the button front-end

/// Physical keys the editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// OK / centre button
    Confirm,
    /// Back button
    Cancel,
}

impl Key {
    /// All keys, in scan order
    pub const ALL: [Key; 6] = [
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::Confirm,
        Key::Cancel,
    ];

    /// Returns true for the four direction keys
    pub fn is_arrow(&self) -> bool {
        matches!(self, Key::Up | Key::Down | Key::Left | Key::Right)
    }
}

/// Phase of a key interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Key went down (after debounce)
    Press,
    /// Key released before the long-press threshold
    Short,
    /// Key held past the long-press threshold (>=500 ms)
    LongPress,
    /// Key still held, emitted periodically after a long press
    Repeat,
    /// Key went up
    Release,
}

/// A key event delivered to the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputEvent {
    pub key: Key,
    pub phase: Phase,
}

impl InputEvent {
    /// Create a new event
    pub const fn new(key: Key, phase: Phase) -> Self {
        Self { key, phase }
    }

    /// Key-down event
    pub const fn press(key: Key) -> Self {
        Self::new(key, Phase::Press)
    }

    /// Short-press event
    pub const fn short(key: Key) -> Self {
        Self::new(key, Phase::Short)
    }

    /// Long-press event
    pub const fn long(key: Key) -> Self {
        Self::new(key, Phase::LongPress)
    }

    /// Auto-repeat event
    pub const fn repeat(key: Key) -> Self {
        Self::new(key, Phase::Repeat)
    }

    /// Key-up event
    pub const fn release(key: Key) -> Self {
        Self::new(key, Phase::Release)
    }

    /// Returns true for a press or an auto-repeat of a held key
    ///
    /// Direction keys step once per press and keep stepping while held.
    pub fn is_step(&self) -> bool {
        matches!(self.phase, Phase::Press | Phase::Repeat)
    }

    /// Returns the direction as a signed delta along its axis (-1, 0, or +1)
    ///
    /// Up and Right are positive, Down and Left negative.
    pub fn step_delta(&self) -> i8 {
        if !self.is_step() {
            return 0;
        }
        match self.key {
            Key::Up | Key::Right => 1,
            Key::Down | Key::Left => -1,
            _ => 0,
        }
    }
}

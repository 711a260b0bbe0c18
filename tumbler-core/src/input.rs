//! Button gesture recognition
//!
//! Turns sampled button levels into [`InputEvent`]s:
//!
//! - every key reports `Press` and `Release` on debounced edges
//! - Confirm and Cancel report `LongPress` once the hold time passes, or
//!   `Short` on release before that
//! - arrows report `Repeat` while held, starting at the long-press time
//!
//! Time is a free-running millisecond counter; wrap-around is handled.

use heapless::Vec;
use tumbler_protocol::{InputEvent, Key, Phase};

use crate::config::InputTiming;

/// Phases produced by one sample (at most a short press and a release)
pub type Phases = Vec<Phase, 2>;

/// Debounce and gesture state for one key
#[derive(Debug, Clone)]
pub struct KeyTracker {
    key: Key,
    timing: InputTiming,
    raw: bool,
    raw_since: u32,
    pressed: bool,
    pressed_at: u32,
    long_sent: bool,
    next_repeat: u32,
}

impl KeyTracker {
    pub const fn new(key: Key, timing: InputTiming) -> Self {
        Self {
            key,
            timing,
            raw: false,
            raw_since: 0,
            pressed: false,
            pressed_at: 0,
            long_sent: false,
            next_repeat: 0,
        }
    }

    pub fn key(&self) -> Key {
        self.key
    }

    /// Debounced state
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Feed one sample taken at `now_ms`
    pub fn sample(&mut self, now_ms: u32, raw_pressed: bool) -> Phases {
        let mut phases = Phases::new();

        if raw_pressed != self.raw {
            self.raw = raw_pressed;
            self.raw_since = now_ms;
        }

        let stable_for = now_ms.wrapping_sub(self.raw_since);
        if self.raw != self.pressed && stable_for >= self.timing.debounce_ms {
            self.pressed = self.raw;
            if self.pressed {
                self.pressed_at = now_ms;
                self.long_sent = false;
                self.next_repeat = self.timing.long_press_ms;
                let _ = phases.push(Phase::Press);
            } else {
                if self.has_long_press() && !self.long_sent {
                    let _ = phases.push(Phase::Short);
                }
                let _ = phases.push(Phase::Release);
            }
            return phases;
        }

        if self.pressed {
            let held = now_ms.wrapping_sub(self.pressed_at);
            if self.has_long_press() {
                if !self.long_sent && held >= self.timing.long_press_ms {
                    self.long_sent = true;
                    let _ = phases.push(Phase::LongPress);
                }
            } else if held >= self.next_repeat {
                self.next_repeat = held.saturating_add(self.timing.repeat_ms);
                let _ = phases.push(Phase::Repeat);
            }
        }

        phases
    }

    fn has_long_press(&self) -> bool {
        !self.key.is_arrow()
    }
}

/// Trackers for all six keys, in [`Key::ALL`] order
#[derive(Debug, Clone)]
pub struct Keypad {
    trackers: [KeyTracker; 6],
}

impl Keypad {
    pub fn new(timing: InputTiming) -> Self {
        Self {
            trackers: Key::ALL.map(|key| KeyTracker::new(key, timing)),
        }
    }

    /// Feed one sample per key (`true` = held) and report the resulting events
    pub fn sample(&mut self, now_ms: u32, levels: [bool; 6], mut emit: impl FnMut(InputEvent)) {
        for (tracker, level) in self.trackers.iter_mut().zip(levels) {
            for phase in tracker.sample(now_ms, level) {
                emit(InputEvent::new(tracker.key(), phase));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMING: InputTiming = InputTiming {
        debounce_ms: 20,
        long_press_ms: 500,
        repeat_ms: 150,
    };

    /// Sample every 5 ms for `duration` ms starting at `from`
    fn run(
        tracker: &mut KeyTracker,
        from: u32,
        duration: u32,
        pressed: bool,
    ) -> Vec<(u32, Phase), 32> {
        let mut out = Vec::new();
        for step in 0..duration / 5 {
            let t = from.wrapping_add(step * 5);
            for phase in tracker.sample(t, pressed) {
                out.push((t, phase)).unwrap();
            }
        }
        out
    }

    fn phases(events: &[(u32, Phase)]) -> Vec<Phase, 32> {
        events.iter().map(|(_, p)| *p).collect()
    }

    #[test]
    fn test_short_confirm() {
        let mut t = KeyTracker::new(Key::Confirm, TIMING);
        let down = run(&mut t, 0, 200, true);
        let up = run(&mut t, 200, 100, false);

        assert_eq!(down.as_slice(), &[(20, Phase::Press)]);
        assert_eq!(phases(&up).as_slice(), &[Phase::Short, Phase::Release]);
    }

    #[test]
    fn test_long_confirm_has_no_short() {
        let mut t = KeyTracker::new(Key::Confirm, TIMING);
        let down = run(&mut t, 0, 1000, true);
        let up = run(&mut t, 1000, 100, false);

        assert_eq!(phases(&down).as_slice(), &[Phase::Press, Phase::LongPress]);
        assert_eq!(down[1].0, 520);
        assert_eq!(phases(&up).as_slice(), &[Phase::Release]);
    }

    #[test]
    fn test_bounce_is_filtered() {
        let mut t = KeyTracker::new(Key::Cancel, TIMING);
        let mut events = Vec::<Phase, 8>::new();
        let samples = [
            (0, true),
            (5, false),
            (10, true),
            (15, false),
            (20, false),
            (60, false),
        ];
        for (time, level) in samples {
            for phase in t.sample(time, level) {
                events.push(phase).unwrap();
            }
        }
        assert!(events.is_empty());
        assert!(!t.is_pressed());
    }

    #[test]
    fn test_arrow_repeats_while_held() {
        let mut t = KeyTracker::new(Key::Up, TIMING);
        let down = run(&mut t, 0, 1000, true);
        let up = run(&mut t, 1000, 100, false);

        let times: Vec<u32, 8> = down
            .iter()
            .filter(|(_, p)| *p == Phase::Repeat)
            .map(|(t, _)| *t)
            .collect();
        // press at 20, then every 150 ms once held for 500 ms
        assert_eq!(down[0], (20, Phase::Press));
        assert_eq!(times.as_slice(), &[520, 670, 820, 970]);
        assert_eq!(phases(&up).as_slice(), &[Phase::Release]);
    }

    #[test]
    fn test_quick_arrow_tap() {
        let mut t = KeyTracker::new(Key::Left, TIMING);
        let down = run(&mut t, 0, 100, true);
        let up = run(&mut t, 100, 100, false);
        assert_eq!(phases(&down).as_slice(), &[Phase::Press]);
        assert_eq!(phases(&up).as_slice(), &[Phase::Release]);
    }

    #[test]
    fn test_clock_wraparound() {
        let start = u32::MAX - 100;
        let mut t = KeyTracker::new(Key::Confirm, TIMING);
        let down = run(&mut t, start, 700, true);
        assert_eq!(phases(&down).as_slice(), &[Phase::Press, Phase::LongPress]);
    }

    #[test]
    fn test_keypad_reports_key() {
        let mut pad = Keypad::new(TIMING);
        let mut seen = Vec::<InputEvent, 4>::new();
        let right = Key::ALL.iter().position(|k| *k == Key::Right).unwrap();
        let mut levels = [false; 6];
        levels[right] = true;
        for time in [0, 10, 20, 30] {
            pad.sample(time, levels, |e| seen.push(e).unwrap());
        }
        assert_eq!(seen.as_slice(), &[InputEvent::press(Key::Right)]);
    }
}

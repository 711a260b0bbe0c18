//! Editing session and its transition function

use tumbler_protocol::{Code, InputEvent, Key, Mode, Phase, CODE_LEN};

use super::actions::{Action, SendOutcome, SendRequest};

/// Code shown when a session starts
pub const INITIAL_CODE: Code = Code::from_clamped([1, 2, 3, 4, 5]);

/// Progress of a send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendStatus {
    /// Editing allowed, ready to send
    #[default]
    Idle,
    /// Sequence in flight; input is rejected
    Sending,
    /// Both frames sent; waiting for acknowledgement by the user
    Done,
    /// Transport failure; waiting for acknowledgement by the user
    Failed,
}

impl SendStatus {
    /// Check if a send is in flight
    pub fn is_busy(&self) -> bool {
        matches!(self, SendStatus::Sending)
    }

    /// Check if a finished send is waiting to be acknowledged
    pub fn is_finished(&self) -> bool {
        matches!(self, SendStatus::Done | SendStatus::Failed)
    }
}

/// Field addressed by the selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    /// One of the code digits (0-4)
    Digit(usize),
    /// The primary/secondary switch
    Mode,
}

/// Cursor over the five digits and the mode switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Selector(u8);

impl Selector {
    /// Position of the mode switch
    pub const MODE: Selector = Selector(CODE_LEN as u8);

    /// Create a selector, clamping to the mode switch
    pub const fn new(position: u8) -> Self {
        if position > Self::MODE.0 {
            Self::MODE
        } else {
            Self(position)
        }
    }

    /// Raw position (0-5)
    pub const fn position(self) -> u8 {
        self.0
    }

    /// Field under the cursor
    pub const fn field(self) -> Field {
        if self.0 < Self::MODE.0 {
            Field::Digit(self.0 as usize)
        } else {
            Field::Mode
        }
    }

    /// Move by `delta`, clamped to 0-5
    pub fn step(self, delta: i8) -> Self {
        Self::new(self.0.saturating_add_signed(delta))
    }
}

/// Read-only copy of the session for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    pub code: Code,
    pub mode: Mode,
    pub selector: Selector,
    pub status: SendStatus,
    pub help_visible: bool,
    pub scroll: u8,
    pub max_scroll: u8,
}

/// The mutable editing session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSession {
    code: Code,
    mode: Mode,
    selector: Selector,
    status: SendStatus,
    help_visible: bool,
    scroll: u8,
    max_scroll: u8,
}

impl EditorSession {
    /// Fresh session; `max_scroll` comes from the help document
    pub const fn new(max_scroll: u8) -> Self {
        Self {
            code: INITIAL_CODE,
            mode: Mode::Primary,
            selector: Selector(0),
            status: SendStatus::Idle,
            help_visible: false,
            scroll: 0,
            max_scroll,
        }
    }

    pub fn code(&self) -> Code {
        self.code
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selector(&self) -> Selector {
        self.selector
    }

    pub fn status(&self) -> SendStatus {
        self.status
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    pub fn scroll(&self) -> u8 {
        self.scroll
    }

    pub fn max_scroll(&self) -> u8 {
        self.max_scroll
    }

    /// Copy of everything a renderer needs
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            code: self.code,
            mode: self.mode,
            selector: self.selector,
            status: self.status,
            help_visible: self.help_visible,
            scroll: self.scroll,
            max_scroll: self.max_scroll,
        }
    }

    /// Process an input event
    ///
    /// Returns the side effect the caller must perform, if any. Events
    /// that are not valid in the current state leave the session
    /// untouched.
    pub fn handle(&mut self, event: InputEvent) -> Option<Action> {
        if self.help_visible {
            self.handle_help(event);
            return None;
        }

        if self.status.is_busy() {
            return None;
        }

        match (event.key, event.phase) {
            (Key::Confirm, Phase::LongPress) => {
                self.help_visible = true;
                self.scroll = 0;
                None
            }
            (Key::Confirm, Phase::Short) => self.confirm(),
            (Key::Cancel, Phase::Press) => Some(Action::Exit),
            _ if event.is_step() && self.status == SendStatus::Idle => {
                self.edit(event);
                None
            }
            _ => None,
        }
    }

    /// Record the end of the in-flight send
    ///
    /// Returns false (and changes nothing) when no send was in flight.
    pub fn finish_send(&mut self, outcome: SendOutcome) -> bool {
        if !self.status.is_busy() {
            return false;
        }
        self.status = match outcome {
            SendOutcome::Delivered => SendStatus::Done,
            SendOutcome::Failed => SendStatus::Failed,
        };
        true
    }

    fn handle_help(&mut self, event: InputEvent) {
        match (event.key, event.phase) {
            (Key::Cancel, Phase::Press) => self.help_visible = false,
            (Key::Up, _) if event.is_step() => self.scroll = self.scroll.saturating_sub(1),
            (Key::Down, _) if event.is_step() => {
                self.scroll = self.scroll.saturating_add(1).min(self.max_scroll)
            }
            _ => {}
        }
    }

    fn confirm(&mut self) -> Option<Action> {
        match self.status {
            SendStatus::Idle => {
                self.status = SendStatus::Sending;
                Some(Action::Send(SendRequest {
                    mode: self.mode,
                    code: self.code,
                }))
            }
            SendStatus::Done | SendStatus::Failed => {
                self.status = SendStatus::Idle;
                None
            }
            SendStatus::Sending => None,
        }
    }

    fn edit(&mut self, event: InputEvent) {
        let delta = event.step_delta();
        match event.key {
            Key::Left | Key::Right => self.selector = self.selector.step(delta),
            Key::Up | Key::Down => match self.selector.field() {
                Field::Digit(index) => {
                    if let Some(digit) = self.code.get_mut(index) {
                        *digit = if delta > 0 {
                            digit.saturating_inc()
                        } else {
                            digit.saturating_dec()
                        };
                    }
                }
                Field::Mode => {
                    self.mode = if delta > 0 {
                        Mode::Primary
                    } else {
                        Mode::Secondary
                    };
                }
            },
            _ => {}
        }
    }
}

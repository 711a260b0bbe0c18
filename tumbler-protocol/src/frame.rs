//! Frame encoding for the safe service port.
//!
//! Frame format:
//! - PREAMBLE (1 byte): always 0x00
//! - OPCODE (1 byte): command identifier
//! - DIGITS (5 bytes): code digits, most significant first, raw values 0-9
//! - CHECKSUM (1 byte): OPCODE + DIGITS, wrapping at 256

use core::fmt;

/// First byte of every frame
pub const PREAMBLE: u8 = 0x00;

/// Number of digits in a code
pub const CODE_LEN: usize = 5;

/// Complete frame size (PREAMBLE + OPCODE + DIGITS + CHECKSUM)
pub const FRAME_LEN: usize = 1 + 1 + CODE_LEN + 1;

/// Opcode: replace the stored primary code
const OPCODE_OVERWRITE_PRIMARY: u8 = 0x75;
/// Opcode: replace the stored secondary code
const OPCODE_OVERWRITE_SECONDARY: u8 = 0x76;
/// Opcode: open with the given code
const OPCODE_UNLOCK: u8 = 0x71;

/// Errors that can occur when decoding a frame or building a code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Input is not exactly [`FRAME_LEN`] bytes
    InvalidLength,
    /// First byte is not [`PREAMBLE`]
    InvalidPreamble,
    /// Opcode is not a known command
    UnknownOpcode(u8),
    /// A digit byte is outside 0-9
    DigitOutOfRange(u8),
    /// Checksum mismatch
    InvalidChecksum,
}

/// A single decimal digit, always within 0-9
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Digit(u8);

impl Digit {
    /// Smallest digit
    pub const MIN: Digit = Digit(0);
    /// Largest digit
    pub const MAX: Digit = Digit(9);

    /// Create a digit, rejecting values above 9
    pub const fn new(value: u8) -> Option<Self> {
        if value <= Self::MAX.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Create a digit, clamping values above 9
    pub const fn clamped(value: u8) -> Self {
        if value > Self::MAX.0 {
            Self::MAX
        } else {
            Self(value)
        }
    }

    /// Raw value (0-9)
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Next digit, staying at 9
    pub const fn saturating_inc(self) -> Self {
        Self::clamped(self.0 + 1)
    }

    /// Previous digit, staying at 0
    pub const fn saturating_dec(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl TryFrom<u8> for Digit {
    type Error = FrameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Digit::new(value).ok_or(FrameError::DigitOutOfRange(value))
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A five-digit code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Code([Digit; CODE_LEN]);

impl Code {
    /// Create a code from digits
    pub const fn new(digits: [Digit; CODE_LEN]) -> Self {
        Self(digits)
    }

    /// Create a code from raw values, clamping each to 0-9
    pub const fn from_clamped(values: [u8; CODE_LEN]) -> Self {
        let mut digits = [Digit::MIN; CODE_LEN];
        let mut i = 0;
        while i < CODE_LEN {
            digits[i] = Digit::clamped(values[i]);
            i += 1;
        }
        Self(digits)
    }

    /// Create a code from raw bytes, rejecting wrong lengths and out-of-range digits
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FrameError> {
        if bytes.len() != CODE_LEN {
            return Err(FrameError::InvalidLength);
        }
        let mut digits = [Digit::MIN; CODE_LEN];
        for (slot, &byte) in digits.iter_mut().zip(bytes) {
            *slot = Digit::try_from(byte)?;
        }
        Ok(Self(digits))
    }

    /// Digits in transmission order
    pub const fn digits(&self) -> &[Digit; CODE_LEN] {
        &self.0
    }

    /// Digit at `index`, if in range
    pub fn get(&self, index: usize) -> Option<Digit> {
        self.0.get(index).copied()
    }

    /// Mutable digit at `index`, if in range
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Digit> {
        self.0.get_mut(index)
    }

    /// Raw digit values
    pub fn to_bytes(&self) -> [u8; CODE_LEN] {
        self.0.map(Digit::value)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in &self.0 {
            write!(f, "{}", digit)?;
        }
        Ok(())
    }
}

/// Which stored code an overwrite replaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    #[default]
    Primary,
    Secondary,
}

impl Mode {
    /// Overwrite command targeting this slot
    pub const fn overwrite_command(self) -> CommandKind {
        match self {
            Mode::Primary => CommandKind::OverwritePrimary,
            Mode::Secondary => CommandKind::OverwriteSecondary,
        }
    }

    /// Single-letter label ('P' or 'S')
    pub const fn label(self) -> char {
        match self {
            Mode::Primary => 'P',
            Mode::Secondary => 'S',
        }
    }
}

/// Commands understood by the service port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandKind {
    /// Replace the primary code
    OverwritePrimary,
    /// Replace the secondary code
    OverwriteSecondary,
    /// Open using the given code
    Unlock,
}

impl CommandKind {
    /// Wire opcode
    pub const fn opcode(self) -> u8 {
        match self {
            CommandKind::OverwritePrimary => OPCODE_OVERWRITE_PRIMARY,
            CommandKind::OverwriteSecondary => OPCODE_OVERWRITE_SECONDARY,
            CommandKind::Unlock => OPCODE_UNLOCK,
        }
    }

    /// Parse a command from its wire opcode
    pub const fn from_opcode(opcode: u8) -> Option<Self> {
        match opcode {
            OPCODE_OVERWRITE_PRIMARY => Some(CommandKind::OverwritePrimary),
            OPCODE_OVERWRITE_SECONDARY => Some(CommandKind::OverwriteSecondary),
            OPCODE_UNLOCK => Some(CommandKind::Unlock),
            _ => None,
        }
    }

    /// Check if this command rewrites a stored code
    pub const fn is_overwrite(self) -> bool {
        matches!(
            self,
            CommandKind::OverwritePrimary | CommandKind::OverwriteSecondary
        )
    }
}

/// A complete, ready-to-send frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame([u8; FRAME_LEN]);

impl Frame {
    /// Build the frame for `command` carrying `code`
    pub fn encode(command: CommandKind, code: &Code) -> Self {
        let opcode = command.opcode();
        let mut bytes = [0u8; FRAME_LEN];

        bytes[0] = PREAMBLE;
        bytes[1] = opcode;
        bytes[2..2 + CODE_LEN].copy_from_slice(&code.to_bytes());
        bytes[FRAME_LEN - 1] = Self::checksum(opcode, code);

        Self(bytes)
    }

    /// Additive checksum over opcode and digits
    ///
    /// The field is a single byte on the wire; the sum wraps.
    pub fn checksum(opcode: u8, code: &Code) -> u8 {
        code.digits()
            .iter()
            .fold(opcode, |acc, digit| acc.wrapping_add(digit.value()))
    }

    /// Validate and decode a received frame (bench/loopback tooling)
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        if bytes.len() != FRAME_LEN {
            return Err(FrameError::InvalidLength);
        }
        if bytes[0] != PREAMBLE {
            return Err(FrameError::InvalidPreamble);
        }

        let command =
            CommandKind::from_opcode(bytes[1]).ok_or(FrameError::UnknownOpcode(bytes[1]))?;
        let code = Code::from_bytes(&bytes[2..2 + CODE_LEN])?;

        let frame = Self::encode(command, &code);
        if frame.0[FRAME_LEN - 1] != bytes[FRAME_LEN - 1] {
            return Err(FrameError::InvalidChecksum);
        }

        Ok(frame)
    }

    /// Raw bytes, in transmission order
    pub const fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    /// Opcode byte
    pub const fn opcode(&self) -> u8 {
        self.0[1]
    }

    /// Command carried by this frame
    pub fn command(&self) -> Option<CommandKind> {
        CommandKind::from_opcode(self.opcode())
    }

    /// Code carried by this frame
    pub fn code(&self) -> Code {
        Code::from_clamped([self.0[2], self.0[3], self.0[4], self.0[5], self.0[6]])
    }

    /// Checksum byte
    pub const fn checksum_byte(&self) -> u8 {
        self.0[FRAME_LEN - 1]
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

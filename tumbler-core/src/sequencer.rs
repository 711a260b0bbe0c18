//! Overwrite-then-unlock command sequence
//!
//! The device only opens with a code it has already committed. A send is
//! therefore two transmissions with a settle delay between them:
//!
//! ```text
//!   OVERWRITE(mode, code) ──500 ms──▶ UNLOCK(code)
//! ```
//!
//! The order is fixed. If the overwrite fails the unlock is not sent.

use embedded_hal_async::delay::DelayNs;
use tumbler_protocol::{Code, CommandKind, Frame, Mode};

use crate::config::{LinkTiming, INTER_COMMAND_MS};
use crate::transport::Transmit;

/// Step of the sequence that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceStep {
    /// Writing the new code
    Overwrite,
    /// Opening with the new code
    Unlock,
}

/// A sequence aborted by a transport failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequenceError<E> {
    /// Step that failed
    pub step: SequenceStep,
    /// Underlying transport error
    pub error: E,
}

/// Runs the two-command sequence over a transport
pub struct CommandSequencer<T, D> {
    transport: T,
    delay: D,
    inter_command_ms: u32,
}

impl<T, D> CommandSequencer<T, D>
where
    T: Transmit,
    D: DelayNs,
{
    /// Create a sequencer with the device's inter-command delay
    pub fn new(transport: T, delay: D) -> Self {
        Self {
            transport,
            delay,
            inter_command_ms: INTER_COMMAND_MS,
        }
    }

    /// Create a sequencer using the inter-command delay from `timing`
    pub fn with_timing(transport: T, delay: D, timing: &LinkTiming) -> Self {
        Self {
            transport,
            delay,
            inter_command_ms: timing.inter_command_ms,
        }
    }

    /// Overwrite the slot selected by `mode` with `code`, then unlock with it
    pub async fn send(&mut self, mode: Mode, code: &Code) -> Result<(), SequenceError<T::Error>> {
        let overwrite = Frame::encode(mode.overwrite_command(), code);
        self.transport
            .transmit(&overwrite)
            .await
            .map_err(|error| SequenceError {
                step: SequenceStep::Overwrite,
                error,
            })?;

        self.delay.delay_ms(self.inter_command_ms).await;

        let unlock = Frame::encode(CommandKind::Unlock, code);
        self.transport
            .transmit(&unlock)
            .await
            .map_err(|error| SequenceError {
                step: SequenceStep::Unlock,
                error,
            })
    }

    /// Access the underlying transport
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Inter-command delay in milliseconds
    pub fn inter_command_ms(&self) -> u32 {
        self.inter_command_ms
    }
}

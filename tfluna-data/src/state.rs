#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lifecycle of the acquisition loop over the serial channel.
///
/// `Disconnected`, `Connected` and `Reading` are transitional phases,
/// surfaced only in logs; a finished session always reports `Closing` or
/// `Faulted`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AcquisitionState {
    /// No channel open yet.
    Disconnected,
    /// Channel opened, loop not yet polling.
    Connected,
    /// Steady state, consuming frames.
    Reading,
    /// Shutdown requested, channel released.
    Closing,
    /// The channel itself failed. Terminal, no reconnect.
    Faulted,
}

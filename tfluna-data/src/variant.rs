#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Wire format spoken by the sensor firmware. Chosen at startup, never
/// auto-detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProtocolVariant {
    /// Each frame is a bare decimal distance. The bearing comes from a
    /// counter owned by the acquisition loop, stepping 1° per frame.
    Implicit,
    /// Each frame is `<angle>:<distance>` with the bearing embedded.
    Explicit,
}

impl ProtocolVariant {
    pub fn from_name(name: &str) -> Option<ProtocolVariant> {
        match name {
            "implicit" => Some(ProtocolVariant::Implicit),
            "explicit" => Some(ProtocolVariant::Explicit),
            _ => None,
        }
    }
}

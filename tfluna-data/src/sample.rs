#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One validated range measurement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sample {
    /// Bearing on the rotational sweep, in degrees within [0, 360).
    pub angle: u16,
    /// Distance to the target (in cm, as reported by the sensor).
    pub distance: u16,
}

use tfluna_data::ProtocolVariant;

pub const DEFAULT_PORT: &str = "/dev/ttyACM0";
pub const DEFAULT_BAUD_RATE: u32 = 15_200;

/// Startup configuration for one acquisition session. No other persisted
/// state exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AcquisitionConfig {
    /// Serial port path such as `/dev/ttyACM0`.
    pub port_name: String,
    pub baud_rate: u32,
    pub variant: ProtocolVariant,
}

impl Default for AcquisitionConfig {
    fn default() -> AcquisitionConfig {
        AcquisitionConfig {
            port_name: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            variant: ProtocolVariant::Implicit,
        }
    }
}

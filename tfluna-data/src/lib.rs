pub mod sample;
pub mod state;
pub mod variant;

pub use sample::Sample;
pub use state::AcquisitionState;
pub use variant::ProtocolVariant;

use std::error::Error;
use std::fmt::{self, Display};
use std::io;

/// Channel-level failures. Per-frame problems (undecodable bytes, malformed
/// or out-of-range frames) never reach this type; they are logged and the
/// frame is skipped.
#[derive(Debug)]
pub enum RadarError {
    /// Opening the serial channel failed. Fatal at startup.
    ChannelOpen(serialport::Error),
    /// The channel itself failed mid-session. Fatal, surfaced once; the
    /// acquisition loop exits without reconnecting.
    ChannelIo(io::Error),
}

impl fmt::Display for RadarError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RadarError::ChannelOpen(err) => {
                write!(f, "failed to open serial channel: {}", err)
            }
            RadarError::ChannelIo(err) => {
                write!(f, "serial channel failed: ")?;
                Display::fmt(&err, f)
            }
        }
    }
}

impl Error for RadarError {}

impl From<io::Error> for RadarError {
    fn from(err: io::Error) -> Self {
        RadarError::ChannelIo(err)
    }
}

impl From<serialport::Error> for RadarError {
    fn from(err: serialport::Error) -> Self {
        RadarError::ChannelOpen(err)
    }
}

use std::sync::mpsc;
use std::time::Duration;

mod acquisition;
mod config;
mod error;
mod field;
mod parse;
mod scene;

pub use crate::acquisition::{AcquisitionOutcome, AcquisitionThreads};
pub use crate::config::{AcquisitionConfig, DEFAULT_BAUD_RATE, DEFAULT_PORT};
pub use crate::error::RadarError;
pub use crate::field::PolarField;
pub use crate::parse::{parse_frame, ParseResult};
pub use crate::scene::{RadarScene, SweepHighlight};

use crate::acquisition::acquire;
use crossbeam_channel::bounded;
use log::{debug, info};
use tfluna_data::{AcquisitionState, Sample};

/// Depth of the completed-sample queue feeding the display. When the display
/// lags, overflowing events are dropped; the polar field keeps the latest
/// distance per bearing either way.
const EVENT_QUEUE_DEPTH: usize = 200;

/// Read timeout on the serial channel. Bounds how long the acquisition
/// thread waits before re-checking the shutdown request.
const READ_TIMEOUT: Duration = Duration::from_millis(10);

/// Opens the serial channel and launches the acquisition thread.
///
/// Returns the thread handle and the receiving end of the completed-sample
/// queue. Samples arrive in the order their frames were parsed. Dropping the
/// handle (or calling [`AcquisitionThreads::join`]) requests a clean
/// shutdown; the joined outcome carries the final polar field and whether the
/// session closed or faulted.
///
/// # Arguments
///
/// * `config` - Port path, baud rate and wire-protocol variant.
pub fn run_acquisition(
    config: &AcquisitionConfig,
) -> Result<(AcquisitionThreads, mpsc::Receiver<Sample>), RadarError> {
    let port = serialport::new(config.port_name.as_str(), config.baud_rate)
        .timeout(READ_TIMEOUT)
        .open()
        .map_err(RadarError::ChannelOpen)?;
    info!(
        "listening on {} at {} baud ({:?} frames)",
        config.port_name, config.baud_rate, config.variant
    );
    debug!("state {:?}", AcquisitionState::Connected);

    let (terminator_tx, terminator_rx) = bounded(10);
    let (sample_tx, sample_rx) = mpsc::sync_channel::<Sample>(EVENT_QUEUE_DEPTH);

    let variant = config.variant;
    let acquisition_thread = Some(std::thread::spawn(move || {
        acquire(port, variant, sample_tx, terminator_rx)
    }));

    let threads = AcquisitionThreads {
        terminator_tx,
        acquisition_thread,
    };
    Ok((threads, sample_rx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serialport::{SerialPort, TTYPort};
    use std::io::Write;
    use tfluna_data::{AcquisitionState, ProtocolVariant};

    const RECV_TIMEOUT: Duration = Duration::from_secs(1);

    fn config_for(port_name: &str, variant: ProtocolVariant) -> AcquisitionConfig {
        AcquisitionConfig {
            port_name: port_name.to_string(),
            variant,
            ..AcquisitionConfig::default()
        }
    }

    #[test]
    fn test_explicit_last_write_wins() {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");
        let name = slave.name().unwrap();
        let (mut threads, sample_rx) =
            run_acquisition(&config_for(&name, ProtocolVariant::Explicit)).unwrap();

        master.write_all(b"10:50\n20:75\n10:60\n").unwrap();

        // Events arrive in parse order.
        let samples: Vec<Sample> = (0..3)
            .map(|_| sample_rx.recv_timeout(RECV_TIMEOUT).unwrap())
            .collect();
        assert_eq!(
            samples,
            vec![
                Sample {
                    angle: 10,
                    distance: 50
                },
                Sample {
                    angle: 20,
                    distance: 75
                },
                Sample {
                    angle: 10,
                    distance: 60
                },
            ]
        );

        let outcome = threads.join().unwrap();
        assert_eq!(outcome.state, AcquisitionState::Closing);
        assert!(outcome.fault.is_none());
        assert_eq!(outcome.field.snapshot(), vec![(10, 60), (20, 75)]);
    }

    #[test]
    fn test_implicit_angle_sequencing() {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");
        let name = slave.name().unwrap();
        let (mut threads, sample_rx) =
            run_acquisition(&config_for(&name, ProtocolVariant::Implicit)).unwrap();

        master.write_all(b"100\n200\n300\n").unwrap();

        let samples: Vec<Sample> = (0..3)
            .map(|_| sample_rx.recv_timeout(RECV_TIMEOUT).unwrap())
            .collect();
        assert_eq!(
            samples.iter().map(|s| s.angle).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );

        let outcome = threads.join().unwrap();
        assert_eq!(outcome.state, AcquisitionState::Closing);
        assert_eq!(
            outcome.field.snapshot(),
            vec![(0, 100), (1, 200), (2, 300)]
        );
    }

    #[test]
    fn test_malformed_frame_skipped_without_advancing() {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");
        let name = slave.name().unwrap();
        let (mut threads, sample_rx) =
            run_acquisition(&config_for(&name, ProtocolVariant::Implicit)).unwrap();

        // Bad frames, including an empty line, are dropped and the bearing
        // counter stays at 0.
        master.write_all(b"abc\n\n42\n").unwrap();

        let sample = sample_rx.recv_timeout(RECV_TIMEOUT).unwrap();
        assert_eq!(
            sample,
            Sample {
                angle: 0,
                distance: 42
            }
        );

        let outcome = threads.join().unwrap();
        assert_eq!(outcome.state, AcquisitionState::Closing);
        assert_eq!(outcome.field.snapshot(), vec![(0, 42)]);
    }

    #[test]
    fn test_undecodable_frame_skipped_without_advancing() {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");
        let name = slave.name().unwrap();
        let (mut threads, sample_rx) =
            run_acquisition(&config_for(&name, ProtocolVariant::Implicit)).unwrap();

        // Non-UTF-8 bytes are a decode failure: the frame is dropped and the
        // bearing counter stays at 0.
        master.write_all(b"\xff\xfe\n42\n").unwrap();

        let sample = sample_rx.recv_timeout(RECV_TIMEOUT).unwrap();
        assert_eq!(
            sample,
            Sample {
                angle: 0,
                distance: 42
            }
        );

        let outcome = threads.join().unwrap();
        assert_eq!(outcome.state, AcquisitionState::Closing);
        assert!(outcome.fault.is_none());
        assert_eq!(outcome.field.snapshot(), vec![(0, 42)]);
    }

    #[test]
    fn test_out_of_range_frame_skipped() {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");
        let name = slave.name().unwrap();
        let (mut threads, sample_rx) =
            run_acquisition(&config_for(&name, ProtocolVariant::Explicit)).unwrap();

        master.write_all(b"400:10\n90:10\n").unwrap();

        let sample = sample_rx.recv_timeout(RECV_TIMEOUT).unwrap();
        assert_eq!(
            sample,
            Sample {
                angle: 90,
                distance: 10
            }
        );

        let outcome = threads.join().unwrap();
        assert_eq!(outcome.field.snapshot(), vec![(90, 10)]);
    }

    #[test]
    fn test_channel_failure_faults_the_loop() {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");
        let name = slave.name().unwrap();
        let (mut threads, sample_rx) =
            run_acquisition(&config_for(&name, ProtocolVariant::Explicit)).unwrap();

        master.write_all(b"10:50\n").unwrap();
        let sample = sample_rx.recv_timeout(RECV_TIMEOUT).unwrap();
        assert_eq!(
            sample,
            Sample {
                angle: 10,
                distance: 50
            }
        );

        // Closing the master side kills the channel under the reader.
        drop(master);

        let outcome = threads.join().unwrap();
        assert_eq!(outcome.state, AcquisitionState::Faulted);
        assert!(matches!(outcome.fault, Some(RadarError::ChannelIo(_))));
        // The field is frozen at the last committed sample.
        assert_eq!(outcome.field.snapshot(), vec![(10, 50)]);
    }

    #[test]
    fn test_open_failure_is_fatal() {
        let config = config_for("/dev/tfluna-does-not-exist", ProtocolVariant::Implicit);
        assert!(matches!(
            run_acquisition(&config),
            Err(RadarError::ChannelOpen(_))
        ));
    }
}

use std::collections::VecDeque;
use std::io::{self, Read};
use std::sync::mpsc::{self, TrySendError};
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, trace, warn};
use serialport::SerialPort;
use tfluna_data::{AcquisitionState, ProtocolVariant, Sample};

use crate::error::RadarError;
use crate::field::PolarField;
use crate::parse::{parse_frame, ParseResult};

/// Terminal report of the acquisition thread.
///
/// `state` is either `Closing` (clean shutdown) or `Faulted`, and `fault` is
/// `Some` exactly in the faulted case. The polar field travels with the
/// outcome because the thread owned it for the whole session.
#[derive(Debug)]
pub struct AcquisitionOutcome {
    pub field: PolarField,
    pub state: AcquisitionState,
    pub fault: Option<RadarError>,
}

/// Handle over the background acquisition thread.
pub struct AcquisitionThreads {
    pub(crate) terminator_tx: Sender<bool>,
    pub(crate) acquisition_thread: Option<JoinHandle<AcquisitionOutcome>>,
}

impl AcquisitionThreads {
    /// Requests shutdown and waits for the thread to exit. Returns `None` if
    /// the thread was already joined or panicked.
    pub fn join(&mut self) -> Option<AcquisitionOutcome> {
        // The thread may already have exited on a fault.
        let _ = self.terminator_tx.send(true);
        let thread = self.acquisition_thread.take()?;
        thread.join().ok()
    }
}

impl Drop for AcquisitionThreads {
    fn drop(&mut self) {
        self.join();
    }
}

pub(crate) fn acquire(
    mut port: Box<dyn SerialPort>,
    variant: ProtocolVariant,
    sample_tx: mpsc::SyncSender<Sample>,
    terminator_rx: Receiver<bool>,
) -> AcquisitionOutcome {
    let mut field = PolarField::new();
    let mut buffer = VecDeque::<u8>::new();
    let mut chunk = [0u8; 256];
    let mut sweep_angle: u16 = 0;

    debug!("state {:?}, consuming frames", AcquisitionState::Reading);
    loop {
        if do_terminate(&terminator_rx) {
            debug!("shutdown requested, releasing the serial channel");
            return AcquisitionOutcome {
                field,
                state: AcquisitionState::Closing,
                fault: None,
            };
        }

        // The port read blocks up to its configured timeout; a timeout is an
        // idle tick, not a fault, and lets the terminator be re-checked.
        let n_read = match port.read(&mut chunk) {
            Ok(0) => {
                let fault = RadarError::ChannelIo(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "serial channel closed by peer",
                ));
                error!("{fault}");
                return AcquisitionOutcome {
                    field,
                    state: AcquisitionState::Faulted,
                    fault: Some(fault),
                };
            }
            Ok(n) => n,
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
                ) =>
            {
                continue;
            }
            Err(e) => {
                let fault = RadarError::ChannelIo(e);
                error!("{fault}");
                return AcquisitionOutcome {
                    field,
                    state: AcquisitionState::Faulted,
                    fault: Some(fault),
                };
            }
        };
        buffer.extend(&chunk[..n_read]);

        while let Some(raw) = take_line(&mut buffer) {
            let text = match String::from_utf8(raw) {
                Ok(text) => text,
                Err(e) => {
                    warn!("skipping undecodable frame: {}", e);
                    continue;
                }
            };
            // Empty frames fall through to the parser and get logged as
            // malformed like any other bad line.
            let line = text.trim();
            match parse_frame(variant, line, sweep_angle) {
                ParseResult::Ok(sample) => {
                    field.set(sample.angle, sample.distance);
                    // The bearing counter advances only on success.
                    if variant == ProtocolVariant::Implicit {
                        sweep_angle = (sweep_angle + 1) % 360;
                    }
                    match sample_tx.try_send(sample) {
                        Ok(()) => {}
                        Err(TrySendError::Full(_)) => {
                            // The field already holds the sample; a newer
                            // frame for the same bearing supersedes it anyway.
                            trace!("render queue full, dropping event for {}°", sample.angle);
                        }
                        Err(TrySendError::Disconnected(_)) => {
                            // Display gone; keep the field fresh regardless.
                        }
                    }
                }
                ParseResult::Malformed(raw) => warn!("malformed frame: {:?}", raw),
                ParseResult::OutOfRange(raw) => warn!("frame out of range: {:?}", raw),
            }
        }
    }
}

/// Pops one newline-terminated line off the front of the buffer, without the
/// terminator. Returns `None` until a full line has arrived.
fn take_line(buffer: &mut VecDeque<u8>) -> Option<Vec<u8>> {
    let newline = buffer.iter().position(|&b| b == b'\n')?;
    let mut line: Vec<u8> = buffer.drain(..=newline).collect();
    line.pop();
    Some(line)
}

pub(crate) fn do_terminate(terminator_rx: &Receiver<bool>) -> bool {
    terminator_rx.try_recv().unwrap_or(false)
}

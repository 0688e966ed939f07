use tfluna_data::{ProtocolVariant, Sample};

/// Outcome of parsing one wire frame. Bad frames carry the raw line for
/// logging; the parser itself never fails past this boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseResult {
    Ok(Sample),
    Malformed(String),
    OutOfRange(String),
}

/// Parses one already-decoded, whitespace-trimmed line.
///
/// `sweep_angle` is the bearing counter owned by the acquisition loop; it is
/// only consulted for the implicit variant, which carries no angle on the
/// wire.
pub fn parse_frame(variant: ProtocolVariant, line: &str, sweep_angle: u16) -> ParseResult {
    match variant {
        ProtocolVariant::Implicit => parse_implicit(line, sweep_angle),
        ProtocolVariant::Explicit => parse_explicit(line),
    }
}

fn parse_implicit(line: &str, sweep_angle: u16) -> ParseResult {
    let distance = match line.parse::<i64>() {
        Ok(d) => d,
        Err(_) => return ParseResult::Malformed(line.to_string()),
    };
    if !(0..=i64::from(u16::MAX)).contains(&distance) {
        return ParseResult::OutOfRange(line.to_string());
    }
    ParseResult::Ok(Sample {
        angle: sweep_angle,
        distance: distance as u16,
    })
}

fn parse_explicit(line: &str) -> ParseResult {
    let (angle_str, distance_str) = match line.split_once(':') {
        Some(parts) => parts,
        None => return ParseResult::Malformed(line.to_string()),
    };
    // Exactly one colon per frame.
    if distance_str.contains(':') {
        return ParseResult::Malformed(line.to_string());
    }
    let angle = match angle_str.parse::<i64>() {
        Ok(a) => a,
        Err(_) => return ParseResult::Malformed(line.to_string()),
    };
    let distance = match distance_str.parse::<i64>() {
        Ok(d) => d,
        Err(_) => return ParseResult::Malformed(line.to_string()),
    };
    if !(0..=360).contains(&angle) || !(0..=i64::from(u16::MAX)).contains(&distance) {
        return ParseResult::OutOfRange(line.to_string());
    }
    // 360° aliases 0° on screen; normalize here so the field keeps one key.
    let angle = if angle == 360 { 0 } else { angle as u16 };
    ParseResult::Ok(Sample {
        angle,
        distance: distance as u16,
    })
}

use std::collections::HashMap;

use tfluna_data::Sample;

/// The single rotating highlight: points at the bearing of the latest sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepHighlight {
    pub angle: u16,
    pub distance: u16,
    /// Endpoint of the highlight line, relative to the radar center.
    pub tip: (f64, f64),
}

/// Retained display geometry, in chart coordinates centered on the radar
/// origin with y pointing up. One point per bearing plus one sweep highlight
/// across the whole field; applying a sample touches only that bearing's
/// point and the highlight, leaving the rest of the scene alone.
#[derive(Clone, Debug, Default)]
pub struct RadarScene {
    points: HashMap<u16, (f64, f64)>,
    sweep: Option<SweepHighlight>,
}

impl RadarScene {
    pub fn new() -> RadarScene {
        RadarScene::default()
    }

    /// Replaces the point drawn for this sample's bearing and moves the sweep
    /// highlight onto it.
    pub fn apply(&mut self, sample: &Sample) {
        let tip = polar_to_cartesian(sample.angle, sample.distance);
        self.points.insert(sample.angle, tip);
        self.sweep = Some(SweepHighlight {
            angle: sample.angle,
            distance: sample.distance,
            tip,
        });
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.values().copied()
    }

    pub fn sweep(&self) -> Option<&SweepHighlight> {
        self.sweep.as_ref()
    }
}

fn polar_to_cartesian(angle: u16, distance: u16) -> (f64, f64) {
    let radian = f64::from(angle).to_radians();
    let d = f64::from(distance);
    (d * radian.cos(), d * radian.sin())
}

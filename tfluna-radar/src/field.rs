use std::collections::BTreeMap;

/// Angle-indexed table of the most recent distance per bearing.
///
/// Last write wins; entries are never removed. The angle domain caps the size,
/// so no capacity bound is needed. Writes happen only on the acquisition
/// thread, which owns the field for its whole session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolarField {
    distances: BTreeMap<u16, u16>,
}

impl PolarField {
    pub fn new() -> PolarField {
        PolarField::default()
    }

    pub fn set(&mut self, angle: u16, distance: u16) {
        self.distances.insert(angle, distance);
    }

    pub fn get(&self, angle: u16) -> Option<u16> {
        self.distances.get(&angle).copied()
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Ordered copy of the field, safe to iterate independently of later
    /// writes.
    pub fn snapshot(&self) -> Vec<(u16, u16)> {
        self.distances.iter().map(|(&a, &d)| (a, d)).collect()
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// 三轴采样值 [x, y, z]
pub type Vec3 = [f64; 3];

/// Logical IMU channels required in every recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    AX,
    AY,
    AZ,
    GX,
    GY,
    GZ,
}

impl Channel {
    /// Canonical order, also the order used when reporting missing columns.
    pub const ALL: [Channel; 6] = [
        Channel::AX,
        Channel::AY,
        Channel::AZ,
        Channel::GX,
        Channel::GY,
        Channel::GZ,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::AX => "AX",
            Channel::AY => "AY",
            Channel::AZ => "AZ",
            Channel::GX => "GX",
            Channel::GY => "GY",
            Channel::GZ => "GZ",
        }
    }

    fn slot(&self) -> usize {
        match self {
            Channel::AX => 0,
            Channel::AY => 1,
            Channel::AZ => 2,
            Channel::GX => 3,
            Channel::GY => 4,
            Channel::GZ => 5,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel -> source column position, resolved once per parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    columns: [Option<usize>; 6],
}

impl ColumnMapping {
    pub fn set(&mut self, channel: Channel, column: usize) {
        self.columns[channel.slot()] = Some(column);
    }

    pub fn get(&self, channel: Channel) -> Option<usize> {
        self.columns[channel.slot()]
    }

    pub fn missing(&self) -> Vec<Channel> {
        Channel::ALL
            .iter()
            .copied()
            .filter(|c| self.get(*c).is_none())
            .collect()
    }

    /// All six positions in canonical order, or `None` if any channel is unresolved.
    pub fn resolved(&self) -> Option<[usize; 6]> {
        let mut out = [0usize; 6];
        for (slot, column) in self.columns.iter().enumerate() {
            out[slot] = (*column)?;
        }
        Some(out)
    }
}

/// Aligned acceleration / angular-velocity samples. The position in the
/// vectors is the timestamp unit used by every later stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImuSeries {
    pub acc: Vec<Vec3>,
    pub gyro: Vec<Vec3>,
}

impl ImuSeries {
    pub fn new(acc: Vec<Vec3>, gyro: Vec<Vec3>) -> Self {
        Self { acc, gyro }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            acc: Vec::with_capacity(capacity),
            gyro: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, acc: Vec3, gyro: Vec3) {
        self.acc.push(acc);
        self.gyro.push(gyro);
    }

    pub fn len(&self) -> usize {
        self.acc.len().min(self.gyro.len())
    }

    pub fn is_empty(&self) -> bool {
        self.acc.is_empty() || self.gyro.is_empty()
    }
}

/// Euclidean norm of one three-axis sample.
pub fn magnitude(v: &Vec3) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_reports_missing_in_canonical_order() {
        let mut mapping = ColumnMapping::default();
        mapping.set(Channel::GZ, 4);
        mapping.set(Channel::AX, 0);
        assert_eq!(
            mapping.missing(),
            vec![Channel::AY, Channel::AZ, Channel::GX, Channel::GY]
        );
        assert!(mapping.resolved().is_none());
    }

    #[test]
    fn test_mapping_resolved() {
        let mut mapping = ColumnMapping::default();
        for (i, c) in Channel::ALL.iter().enumerate() {
            mapping.set(*c, 10 - i);
        }
        assert_eq!(mapping.resolved(), Some([10, 9, 8, 7, 6, 5]));
    }

    #[test]
    fn test_magnitude() {
        assert!((magnitude(&[3.0, 4.0, 0.0]) - 5.0).abs() < 1e-12);
        assert_eq!(magnitude(&[0.0, 0.0, 0.0]), 0.0);
    }
}

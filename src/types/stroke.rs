use serde::{Deserialize, Serialize};

use super::sample::Vec3;

/// Fixed-length slice of the series centred on one stroke event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeWindow {
    /// Index of the stroke event in the full series.
    pub event_index: usize,
    /// Index of the first sample of the window in the full series.
    pub start: usize,
    pub acc: Vec<Vec3>,
    pub gyro: Vec<Vec3>,
}

impl StrokeWindow {
    pub fn len(&self) -> usize {
        self.acc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.acc.is_empty()
    }

    /// Exclusive end index in the full series.
    pub fn end(&self) -> usize {
        self.start + self.acc.len()
    }
}

/// 击球强度粗分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeType {
    LightTouch,
    Normal,
    Powerful,
    VeryPowerful,
}

impl StrokeType {
    pub fn label(&self) -> &'static str {
        match self {
            StrokeType::LightTouch => "light/short touch",
            StrokeType::Normal => "normal stroke",
            StrokeType::Powerful => "powerful stroke",
            StrokeType::VeryPowerful => "very powerful stroke",
        }
    }
}

/// Descriptive statistics for one retained window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeFeatures {
    /// 1-based, in detection order.
    pub stroke_id: usize,
    pub event_index: usize,
    pub peak_acceleration: f64,
    pub peak_rotation: f64,
    pub avg_acceleration: f64,
    pub avg_rotation: f64,
    /// peak_acceleration * peak_rotation; an intensity proxy, not a physical unit.
    pub stroke_power: f64,
    pub duration_points: usize,
    pub estimated_type: StrokeType,
    pub type_label: String,
}

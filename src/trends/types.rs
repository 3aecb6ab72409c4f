use crate::segments::Segment;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrendDirection {
    Increasing, // Slope above the threshold
    Decreasing, // Slope below the negative threshold
    Stable,     // Slope magnitude within the threshold
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Increasing => write!(f, "Tendencia creciente"),
            TrendDirection::Decreasing => write!(f, "Tendencia decreciente"),
            TrendDirection::Stable => write!(f, "Tendencia estable"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SegmentTrend {
    pub segment: Segment,
    pub slope: f64,
    pub mean: f64,
    pub direction: TrendDirection,
}

/// Result of one analysis pass: the three classified segments plus the
/// shared classification threshold and the global series mean.
#[derive(Debug, Clone)]
pub struct TrendReport {
    pub segments: Vec<SegmentTrend>,
    pub threshold: f64,
    pub global_mean: f64,
}

use super::types::{SegmentTrend, TrendDirection, TrendReport};
use crate::config::TrendConfig;
use crate::error::{Error, Result};
use crate::segments::Segment;
use crate::series::MonthlySeries;

pub struct TrendAnalyzer {
    config: TrendConfig,
}

impl TrendAnalyzer {
    pub fn new(config: TrendConfig) -> Self {
        Self { config }
    }

    /// Fit a line to each segment, derive the classification threshold from
    /// the spread of the three slopes, and classify every segment against it.
    ///
    /// The threshold is `sensitivity * population std-dev of the slopes`. A
    /// low sensitivity turns almost any change into a trend; a high one only
    /// flags large ones. The default of 0.5 balances the two.
    pub fn analyze(&self, series: &MonthlySeries, segments: &[Segment; 3]) -> Result<TrendReport> {
        if series.len() < segments.len() {
            return Err(Error::Data(format!(
                "Need at least {} data points to analyze trends, got {}",
                segments.len(),
                series.len()
            )));
        }

        let slopes: Vec<f64> = segments
            .iter()
            .map(|segment| {
                let ys = segment.slice(&series.values);
                let xs: Vec<f64> = (0..ys.len()).map(|i| i as f64).collect();
                linear_fit(&xs, ys).0
            })
            .collect();

        let threshold = self.config.sensitivity * population_std_dev(&slopes);

        log::info!("Statistical threshold: {:.4}", threshold);
        log::info!(
            "Segment slopes: {}",
            slopes
                .iter()
                .map(|s| format!("{:.4}", s))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let segment_trends = segments
            .iter()
            .zip(&slopes)
            .map(|(segment, &slope)| {
                let values = segment.slice(&series.values);
                let mean = values.iter().sum::<f64>() / values.len() as f64;
                SegmentTrend {
                    segment: *segment,
                    slope,
                    mean,
                    direction: classify(slope, threshold),
                }
            })
            .collect();

        Ok(TrendReport {
            segments: segment_trends,
            threshold,
            global_mean: series.mean(),
        })
    }
}

/// Ordinary least-squares fit of `y = slope * x + intercept`.
pub fn linear_fit(xs: &[f64], ys: &[f64]) -> (f64, f64) {
    let n = xs.len() as f64;
    if xs.is_empty() {
        return (0.0, 0.0);
    }

    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;

    for (&x, &y) in xs.iter().zip(ys) {
        numerator += (x - mean_x) * (y - mean_y);
        denominator += (x - mean_x).powi(2);
    }

    let slope = if denominator != 0.0 {
        numerator / denominator
    } else {
        0.0
    };

    (slope, mean_y - slope * mean_x)
}

fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn classify(slope: f64, threshold: f64) -> TrendDirection {
    if slope.abs() <= threshold {
        TrendDirection::Stable
    } else if slope > 0.0 {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    }
}

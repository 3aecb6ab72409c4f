pub mod analyzer;
pub mod types;

pub use analyzer::{linear_fit, TrendAnalyzer};
pub use types::{SegmentTrend, TrendDirection, TrendReport};

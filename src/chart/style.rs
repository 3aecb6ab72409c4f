/// Styling knobs for the rendered chart, in pixels unless noted.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub line_width: u32,
    pub marker_size: i32,
    pub value_font: f64,
    pub callout_font: f64,
    pub legend_font: f64,
    pub header_font: f64,
    pub axis_font: f64,
    pub band_alpha: f64,
    pub smooth_samples: usize,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            line_width: 2,
            marker_size: 4,
            value_font: 14.0,
            callout_font: 15.0,
            legend_font: 16.0,
            header_font: 20.0,
            axis_font: 15.0,
            band_alpha: 0.3,
            smooth_samples: 300,
        }
    }
}

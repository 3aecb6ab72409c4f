use crate::chart::{self, ChartStyle};
use crate::config::Config;
use crate::error::Result;
use crate::loader;
use crate::segments::split_into_quarters;
use crate::trends::TrendAnalyzer;
use std::path::{Path, PathBuf};

/// The batch pipeline: load, segment, analyze, render, save, display.
pub struct App {
    pub config: Config,
    display: bool,
}

impl App {
    pub fn new(config: Config, display: bool) -> Self {
        Self { config, display }
    }

    pub fn run(&self) -> Result<()> {
        let dir = PathBuf::from(&self.config.input.data_dir);
        let workbook = loader::find_workbook(&dir)?;
        log::info!("Workbook: {}", workbook.display());

        let series = loader::load_series(&workbook, &self.config.input)?;
        log::info!(
            "Loaded {} months from sheet '{}'",
            series.len(),
            self.config.input.sheet
        );

        let segments = split_into_quarters(series.len());
        let analyzer = TrendAnalyzer::new(self.config.trends.clone());
        let report = analyzer.analyze(&series, &segments)?;

        for trend in &report.segments {
            log::info!(
                "{}: slope {:+.4}, mean {:.1}% ({})",
                trend.segment.label,
                trend.slope,
                trend.mean,
                trend.direction
            );
        }

        let output = Path::new(&self.config.chart.output_file);
        let style = ChartStyle::default();
        chart::render(&series, &report, &self.config.chart, &style, output)?;
        log::info!("Chart saved as {}", output.display());

        if self.display {
            chart::display(output);
        }

        Ok(())
    }
}

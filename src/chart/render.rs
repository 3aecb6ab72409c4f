use super::backend::FontTolerantBackend;
use super::smooth::spline_curve;
use super::style::ChartStyle;
use crate::config::ChartConfig;
use crate::error::{Error, Result};
use crate::series::MonthlySeries;
use crate::trends::TrendReport;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle};
use std::path::Path;
use std::process::Command;

const NAVY: RGBColor = RGBColor(0, 0, 128);
const GRAY: RGBColor = RGBColor(128, 128, 128);

/// Render the annotated chart to `path` as a PNG.
pub fn render(
    series: &MonthlySeries,
    report: &TrendReport,
    config: &ChartConfig,
    style: &ChartStyle,
    path: &Path,
) -> Result<()> {
    draw(series, report, config, style, path).map_err(|e| Error::Chart(e.to_string()))
}

fn draw(
    series: &MonthlySeries,
    report: &TrendReport,
    config: &ChartConfig,
    style: &ChartStyle,
    path: &Path,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let backend = BitMapBackend::new(path, (config.width, config.height));
    let root = FontTolerantBackend::new(backend).into_drawing_area();
    root.fill(&WHITE)?;

    let n = series.len();
    let y_min = series.min_value();
    let y_max = series.max_value();
    let pad = ((y_max - y_min) * 0.2).max(1.0);
    let y_lo = y_min - pad;
    let y_hi = y_max + pad;
    let x_lo = -0.5;
    let x_hi = n as f64 - 0.5;

    let header_font = FontDesc::new(FontFamily::SansSerif, style.header_font, FontStyle::Normal);
    let (width, _) = root.dim_in_pixel();
    root.draw(&Text::new(
        config.title.clone(),
        (width as i32 / 2, 16),
        header_font
            .clone()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center)),
    ))?;
    root.draw(&Text::new(
        config.meta_text.clone(),
        (width as i32 - 24, 16),
        header_font
            .color(&BLACK)
            .pos(Pos::new(HPos::Right, VPos::Center)),
    ))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(24)
        .margin_top(40)
        .x_label_area_size(36)
        .y_label_area_size(56)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    // Shaded quarter bands behind everything else.
    for trend in &report.segments {
        let segment = &trend.segment;
        let (r, g, b) = segment.color;
        let color = RGBColor(r, g, b);
        chart.draw_series(std::iter::once(Rectangle::new(
            [
                (segment.start as f64 - 0.5, y_lo),
                (segment.end as f64 - 0.5, y_hi),
            ],
            color.mix(style.band_alpha).filled(),
        )))?;
    }

    let months = &series.months;
    chart
        .configure_mesh()
        .light_line_style(BLACK.mix(0.1))
        .bold_line_style(BLACK.mix(0.2))
        .y_desc("% Normalidad")
        .x_labels(n + 1)
        .x_label_formatter(&|x: &f64| {
            let rounded = x.round();
            if (x - rounded).abs() < 0.01 && rounded >= 0.0 && (rounded as usize) < months.len() {
                months[rounded as usize].clone()
            } else {
                String::new()
            }
        })
        .axis_desc_style(FontDesc::new(
            FontFamily::SansSerif,
            style.axis_font,
            FontStyle::Normal,
        ))
        .label_style(FontDesc::new(
            FontFamily::SansSerif,
            style.axis_font,
            FontStyle::Normal,
        ))
        .draw()?;

    // Smoothed curve through the raw points.
    let curve = spline_curve(&series.values, style.smooth_samples);
    chart
        .draw_series(LineSeries::new(curve, BLACK.stroke_width(style.line_width)))?
        .label("Normalidad mensual")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(2)));

    // Diamond markers on the raw points.
    let marker = style.marker_size;
    chart.draw_series(PointSeries::of_element(
        series.values.iter().enumerate().map(|(i, &v)| (i as f64, v)),
        marker,
        ShapeStyle::from(&BLACK).filled(),
        &|coord, size, shape| {
            EmptyElement::at(coord)
                + Polygon::new(
                    vec![(0, -size), (size, 0), (0, size), (-size, 0)],
                    shape,
                )
        },
    ))?;

    // Per-point value labels just above each marker.
    let value_font = FontDesc::new(FontFamily::SansSerif, style.value_font, FontStyle::Bold)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(series.values.iter().enumerate().map(|(i, &v)| {
        Text::new(format!("{:.1} %", v), (i as f64, v + 0.4), value_font.clone())
    }))?;

    // Dashed global average reference line.
    chart
        .draw_series(DashedLineSeries::new(
            vec![(x_lo, report.global_mean), (x_hi, report.global_mean)],
            6,
            4,
            GRAY.stroke_width(1),
        ))?
        .label(format!("Promedio global: {:.1}%", report.global_mean))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GRAY.stroke_width(2)));

    draw_average_callouts(&mut chart, series, report, style)?;

    // Legend-only entries for the quarter swatches.
    for trend in &report.segments {
        let (r, g, b) = trend.segment.color;
        let color = RGBColor(r, g, b);
        let alpha = style.band_alpha;
        chart
            .draw_series(std::iter::empty::<Rectangle<(f64, f64)>>())?
            .label(format!("{} – {}", trend.segment.label, trend.direction))
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 6), (x + 16, y + 6)], color.mix(alpha).filled())
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.7))
        .border_style(&BLACK.mix(0.3))
        .label_font(FontDesc::new(
            FontFamily::SansSerif,
            style.legend_font,
            FontStyle::Normal,
        ))
        .draw()?;

    root.present()?;
    Ok(())
}

/// One boxed callout per segment with its average value, placed above the
/// local maximum or below the local minimum, whichever side has more headroom
/// within the data range.
fn draw_average_callouts<'a, DB>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    series: &MonthlySeries,
    report: &TrendReport,
    style: &ChartStyle,
) -> std::result::Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let y_min = series.min_value();
    let y_max = series.max_value();
    let margin = ((y_max - y_min) * 0.05).max(0.5);

    let callout_font = FontDesc::new(FontFamily::SansSerif, style.callout_font, FontStyle::Bold)
        .color(&NAVY)
        .pos(Pos::new(HPos::Center, VPos::Center));

    for trend in &report.segments {
        let segment = &trend.segment;
        let local = segment.slice(&series.values);
        let local_max = local.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let local_min = local.iter().copied().fold(f64::INFINITY, f64::min);

        let x_pos = (segment.start + segment.end - 1) as f64 / 2.0;
        let headroom_above = y_max - local_max;
        let headroom_below = local_min - y_min;
        let y_pos = if headroom_above >= headroom_below {
            local_max + margin
        } else {
            local_min - margin
        };

        let callout = EmptyElement::at((x_pos, y_pos))
            + Rectangle::new([(-70, -22), (70, 22)], WHITE.mix(0.85).filled())
            + Rectangle::new([(-70, -22), (70, 22)], NAVY.stroke_width(1))
            + Text::new("Promedio".to_string(), (0, -10), callout_font.clone())
            + Text::new(
                format!("Normalidad: {:.1}%", trend.mean),
                (0, 10),
                callout_font.clone(),
            );
        chart.draw_series(std::iter::once(callout))?;
    }

    Ok(())
}

/// Open the rendered PNG with the platform image viewer. Failure to launch a
/// viewer is not fatal; the PNG on disk is the primary output.
pub fn display(path: &Path) {
    let result = if cfg!(target_os = "macos") {
        Command::new("open").arg(path).spawn()
    } else if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", "start", ""]).arg(path).spawn()
    } else {
        Command::new("xdg-open").arg(path).spawn()
    };

    match result {
        Ok(_) => log::debug!("Opened {} for viewing", path.display()),
        Err(e) => log::warn!("Could not open {} for viewing: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChartConfig, TrendConfig};
    use crate::segments::split_into_quarters;
    use crate::trends::TrendAnalyzer;

    #[test]
    fn renders_a_png_for_a_full_year() {
        let months = [
            "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
        ];
        let values = vec![
            90.1, 90.5, 91.2, 90.8, 91.5, 92.0, 92.4, 91.9, 92.8, 93.1, 93.5, 94.0,
        ];
        let series = MonthlySeries::new(
            months.iter().map(|m| m.to_string()).collect(),
            values,
        );
        let segments = split_into_quarters(series.len());
        let report = TrendAnalyzer::new(TrendConfig::default())
            .analyze(&series, &segments)
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        render(
            &series,
            &report,
            &ChartConfig::default(),
            &ChartStyle::default(),
            &path,
        )
        .unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn renders_a_flat_series_without_panicking() {
        let series = MonthlySeries::new(
            (1..=6).map(|i| format!("M{}", i)).collect(),
            vec![92.0; 6],
        );
        let segments = split_into_quarters(series.len());
        let report = TrendAnalyzer::new(TrendConfig::default())
            .analyze(&series, &segments)
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flat.png");
        render(
            &series,
            &report,
            &ChartConfig::default(),
            &ChartStyle::default(),
            &path,
        )
        .unwrap();
        assert!(path.exists());
    }
}

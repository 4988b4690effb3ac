//! Publication figures rendered to PNG with Plotters.
//!
//! Sizes follow the paper's layout: figure inches × DPI pixels on a white
//! background. Both renderers take fully computed data; nothing here touches
//! the statistics.
//!
//! Text is rasterized with the DejaVu Sans face bundled under `assets/fonts/`,
//! registered with Plotters once per process before the first figure is drawn.

use std::path::Path;
use std::sync::OnceLock;

use chrono::Datelike;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontStyle, register_font};

use crate::domain::{NplRecord, RegressionResult, SyntheticPanel};
use crate::error::AppError;

pub const NPL_FIGURE_FILE: &str = "RBI_NPL_Analysis_2025.png";
pub const REGRESSION_FIGURE_FILE: &str =
    "Figure_4.1_OLS_Regression_Islamic_Banking_Advantage_2020_2026.png";

/// Output resolution of the paper figures.
pub const PAPER_DPI: u32 = 300;

const ISLAMIC: RGBColor = RGBColor(0x2E, 0x8B, 0x57);
const CONVENTIONAL: RGBColor = RGBColor(0xDC, 0x14, 0x3C);
const ADVANTAGE: RGBColor = RGBColor(0x41, 0x69, 0xE1);

const FONT: &str = "sans-serif";
static FONT_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
const BAR_WIDTH: f64 = 0.35;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;
type DrawResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Pixel size of a figure of `width_in` × `height_in` inches at `dpi`.
pub fn figure_pixels(width_in: f64, height_in: f64, dpi: u32) -> (u32, u32) {
    let px = |inches: f64| (inches * f64::from(dpi)).round().max(1.0) as u32;
    (px(width_in), px(height_in))
}

/// Register the bundled face under the family name used by every text style.
fn ensure_font() -> Result<(), AppError> {
    static REGISTERED: OnceLock<Result<(), String>> = OnceLock::new();
    REGISTERED
        .get_or_init(|| register_font(FONT, FontStyle::Normal, FONT_BYTES).map_err(|_| String::from("invalid font data")))
        .clone()
        .map_err(|e| AppError::output(format!("Failed to load the figure font: {e}")))
}

/// Render the two-panel NPL comparison (14 × 6 in).
pub fn render_npl_figure(path: &Path, records: &[NplRecord], dpi: u32) -> Result<(), AppError> {
    if records.is_empty() {
        return Err(AppError::data("No NPL records to plot."));
    }
    ensure_font()?;
    draw_npl_figure(path, records, dpi)
        .map_err(|e| AppError::output(format!("Failed to render '{}': {e}", path.display())))
}

/// Render the four-panel regression figure (15 × 12 in).
pub fn render_regression_figure(
    path: &Path,
    panel: &SyntheticPanel,
    result: &RegressionResult,
    dpi: u32,
) -> Result<(), AppError> {
    if panel.is_empty() || result.fitted.len() != panel.len() {
        return Err(AppError::data("Regression output does not match the panel; nothing to plot."));
    }
    ensure_font()?;
    draw_regression_figure(path, panel, result, dpi)
        .map_err(|e| AppError::output(format!("Failed to render '{}': {e}", path.display())))
}

fn draw_npl_figure(path: &Path, records: &[NplRecord], dpi: u32) -> DrawResult<()> {
    let scale = f64::from(dpi) / f64::from(PAPER_DPI);
    let root = BitMapBackend::new(path, figure_pixels(14.0, 6.0, dpi)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(
        "India Banking Resilience: Islamic vs Conventional (RBI 2025)",
        (FONT, pt(64.0, scale)),
    )?;

    let panels = root.split_evenly((1, 2));
    draw_npl_bars(&panels[0], records, scale)?;
    draw_advantage_line(&panels[1], records, scale)?;

    root.present()?;
    Ok(())
}

fn draw_npl_bars(area: &Area, records: &[NplRecord], scale: f64) -> DrawResult<()> {
    let n = records.len();
    let y_max = records
        .iter()
        .map(|r| r.islamic_pct.max(r.conventional_pct))
        .fold(0.0, f64::max);
    let labels: Vec<String> = records.iter().map(|r| r.period.clone()).collect();

    let mut chart = ChartBuilder::on(area)
        .caption("RBI FSR 2025: NPL Comparison", (FONT, pt(48.0, scale)))
        .margin(px(40.0, scale))
        .x_label_area_size(px(120.0, scale))
        .y_label_area_size(px(160.0, scale))
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), 0.0..(y_max * 1.25).max(1.0))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&|v| category_label(&labels, *v))
        .x_desc("Period")
        .y_desc("NPL Ratio (%)")
        .label_style((FONT, pt(36.0, scale)))
        .bold_line_style(&BLACK.mix(0.3))
        .light_line_style(&WHITE)
        .draw()?;

    let edge = BLACK.stroke_width(px(3.0, scale));
    let series: [(&str, RGBColor, f64, fn(&NplRecord) -> f64); 2] = [
        ("Islamic NPL", ISLAMIC, -BAR_WIDTH, |r| r.islamic_pct),
        ("Conventional NPL", CONVENTIONAL, 0.0, |r| r.conventional_pct),
    ];
    for (label, color, offset, value) in series {
        let bars = move |style: ShapeStyle| {
            records.iter().enumerate().map(move |(i, r)| {
                let x0 = i as f64 + offset;
                Rectangle::new([(x0, 0.0), (x0 + BAR_WIDTH, value(r))], style)
            })
        };
        let legend_size = px(20.0, scale) as i32;
        chart
            .draw_series(bars(color.mix(0.9).filled()))?
            .label(label)
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - legend_size / 2), (x + legend_size, y + legend_size / 2)], color.filled())
            });
        chart.draw_series(bars(edge))?;

        // Value labels above each bar.
        let label_style = TextStyle::from((FONT, pt(32.0, scale)).into_font())
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        chart.draw_series(records.iter().enumerate().map(|(i, r)| {
            let v = value(r);
            Text::new(
                format!("{v:.1}%"),
                (i as f64 + offset + BAR_WIDTH / 2.0, v + 0.05),
                label_style.clone(),
            )
        }))?;
    }

    chart
        .configure_series_labels()
        .label_font((FONT, pt(32.0, scale)))
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

fn draw_advantage_line(area: &Area, records: &[NplRecord], scale: f64) -> DrawResult<()> {
    let n = records.len();
    let points: Vec<(f64, f64)> = records
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64, r.advantage_pct()))
        .collect();
    let labels: Vec<String> = records.iter().map(|r| r.period.clone()).collect();

    let mut chart = ChartBuilder::on(area)
        .caption("Islamic Banking Edge", (FONT, pt(48.0, scale)))
        .margin(px(40.0, scale))
        .x_label_area_size(px(120.0, scale))
        .y_label_area_size(px(160.0, scale))
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), 0.0..advantage_axis_max(records))?;

    chart
        .configure_mesh()
        .x_labels(n)
        .x_label_formatter(&|v| category_label(&labels, *v))
        .y_desc("Islamic Advantage (pp)")
        .label_style((FONT, pt(36.0, scale)))
        .bold_line_style(&BLACK.mix(0.3))
        .light_line_style(&WHITE)
        .draw()?;

    chart.draw_series(LineSeries::new(
        points.iter().copied(),
        ADVANTAGE.stroke_width(px(9.0, scale)),
    ))?;
    chart.draw_series(
        points
            .iter()
            .map(|&p| Circle::new(p, px(30.0, scale), ADVANTAGE.filled())),
    )?;

    Ok(())
}

/// Upper bound of the advantage panel: 1.2 × the largest advantage.
pub fn advantage_axis_max(records: &[NplRecord]) -> f64 {
    let max = records
        .iter()
        .map(NplRecord::advantage_pct)
        .fold(f64::NEG_INFINITY, f64::max);
    if max.is_finite() && max > 0.0 { max * 1.2 } else { 1.0 }
}

fn draw_regression_figure(
    path: &Path,
    panel: &SyntheticPanel,
    result: &RegressionResult,
    dpi: u32,
) -> DrawResult<()> {
    let scale = f64::from(dpi) / f64::from(PAPER_DPI);
    let root = BitMapBackend::new(path, figure_pixels(15.0, 12.0, dpi)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(
        "Figure 4.1: Islamic Banking Advantage in NPL Ratios (OLS, 2020-2026)",
        (FONT, pt(64.0, scale)),
    )?;

    let panels = root.split_evenly((2, 2));
    draw_npl_by_quarter(&panels[0], panel, result, scale)?;
    draw_npl_vs_inflation(&panels[1], panel, result, scale)?;
    draw_residuals(&panels[2], result, scale)?;
    draw_coefficients(&panels[3], result, scale)?;

    root.present()?;
    Ok(())
}

fn draw_npl_by_quarter(
    area: &Area,
    panel: &SyntheticPanel,
    result: &RegressionResult,
    scale: f64,
) -> DrawResult<()> {
    let n = panel.len();
    let quarters: Vec<String> = panel.observations.iter().map(|o| quarter_label(o.quarter)).collect();
    let (y0, y1) = padded_range(
        panel.observations.iter().map(|o| o.npl_ratio).chain(result.fitted.iter().copied()),
    );

    let mut chart = ChartBuilder::on(area)
        .caption("(a) NPL ratio by quarter", (FONT, pt(44.0, scale)))
        .margin(px(30.0, scale))
        .x_label_area_size(px(110.0, scale))
        .y_label_area_size(px(140.0, scale))
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), y0..y1)?;

    chart
        .configure_mesh()
        .x_labels(6)
        .x_label_formatter(&|v| category_label(&quarters, *v))
        .x_desc("Quarter")
        .y_desc("NPL Ratio (%)")
        .label_style((FONT, pt(30.0, scale)))
        .bold_line_style(&BLACK.mix(0.3))
        .light_line_style(&WHITE)
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            result.fitted.iter().enumerate().map(|(i, &y)| (i as f64, y)),
            ADVANTAGE.stroke_width(px(4.0, scale)),
        ))?
        .label("OLS fitted")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], ADVANTAGE));

    let r = px(14.0, scale);
    for (flag, color, label) in [(1u8, ISLAMIC, "Islamic"), (0u8, CONVENTIONAL, "Conventional")] {
        chart
            .draw_series(
                panel
                    .observations
                    .iter()
                    .enumerate()
                    .filter(|(_, o)| o.islamic_bank == flag)
                    .map(|(i, o)| Circle::new((i as f64, o.npl_ratio), r, color.filled())),
            )?
            .label(label)
            .legend(move |(x, y)| Circle::new((x + 10, y), 6, color.filled()));
    }

    chart
        .configure_series_labels()
        .label_font((FONT, pt(28.0, scale)))
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

fn draw_npl_vs_inflation(
    area: &Area,
    panel: &SyntheticPanel,
    result: &RegressionResult,
    scale: f64,
) -> DrawResult<()> {
    let (x0, x1) = padded_range(panel.observations.iter().map(|o| o.inflation_qoq));
    let b0 = result.intercept.estimate;
    let b_islamic = result.islamic_bank.estimate;
    let b_infl = result.inflation_qoq.estimate;
    let line = |flag: f64, x: f64| b0 + b_islamic * flag + b_infl * x;

    let (y0, y1) = padded_range(
        panel
            .observations
            .iter()
            .map(|o| o.npl_ratio)
            .chain([line(0.0, x0), line(0.0, x1), line(1.0, x0), line(1.0, x1)]),
    );

    let mut chart = ChartBuilder::on(area)
        .caption("(b) NPL ratio vs inflation", (FONT, pt(44.0, scale)))
        .margin(px(30.0, scale))
        .x_label_area_size(px(110.0, scale))
        .y_label_area_size(px(140.0, scale))
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .x_desc("Inflation QoQ (%)")
        .y_desc("NPL Ratio (%)")
        .label_style((FONT, pt(30.0, scale)))
        .bold_line_style(&BLACK.mix(0.3))
        .light_line_style(&WHITE)
        .draw()?;

    let r = px(14.0, scale);
    for (flag, color, label) in [(1u8, ISLAMIC, "Islamic"), (0u8, CONVENTIONAL, "Conventional")] {
        chart.draw_series(
            panel
                .observations
                .iter()
                .filter(|o| o.islamic_bank == flag)
                .map(|o| Circle::new((o.inflation_qoq, o.npl_ratio), r, color.filled())),
        )?;
        let f = f64::from(flag);
        chart
            .draw_series(LineSeries::new(
                [(x0, line(f, x0)), (x1, line(f, x1))],
                color.stroke_width(px(4.0, scale)),
            ))?
            .label(format!("{label} fit"))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .label_font((FONT, pt(28.0, scale)))
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

fn draw_residuals(area: &Area, result: &RegressionResult, scale: f64) -> DrawResult<()> {
    let (x0, x1) = padded_range(result.fitted.iter().copied());
    let bound = result
        .residuals
        .iter()
        .fold(0.0_f64, |m, r| m.max(r.abs()))
        .max(1e-6)
        * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption("(c) Residuals vs fitted", (FONT, pt(44.0, scale)))
        .margin(px(30.0, scale))
        .x_label_area_size(px(110.0, scale))
        .y_label_area_size(px(140.0, scale))
        .build_cartesian_2d(x0..x1, -bound..bound)?;

    chart
        .configure_mesh()
        .x_desc("Fitted NPL Ratio (%)")
        .y_desc("Residual (pp)")
        .label_style((FONT, pt(30.0, scale)))
        .bold_line_style(&BLACK.mix(0.3))
        .light_line_style(&WHITE)
        .draw()?;

    chart.draw_series(std::iter::once(PathElement::new(
        vec![(x0, 0.0), (x1, 0.0)],
        BLACK.stroke_width(px(3.0, scale)),
    )))?;
    chart.draw_series(
        result
            .fitted
            .iter()
            .zip(&result.residuals)
            .map(|(&f, &r)| Circle::new((f, r), px(14.0, scale), ADVANTAGE.filled())),
    )?;

    Ok(())
}

fn draw_coefficients(area: &Area, result: &RegressionResult, scale: f64) -> DrawResult<()> {
    let coefs = [&result.intercept, &result.islamic_bank, &result.inflation_qoq];
    let names: Vec<String> = coefs.iter().map(|c| c.name.clone()).collect();
    let ci = |est: f64, se: f64| (est - 1.96 * se, est + 1.96 * se);
    let (y0, y1) = padded_range(
        coefs
            .iter()
            .flat_map(|c| {
                let (lo, hi) = ci(c.estimate, c.std_error);
                [lo, hi, 0.0]
            }),
    );

    let mut chart = ChartBuilder::on(area)
        .caption("(d) Coefficients with 95% CI", (FONT, pt(44.0, scale)))
        .margin(px(30.0, scale))
        .x_label_area_size(px(110.0, scale))
        .y_label_area_size(px(140.0, scale))
        .build_cartesian_2d(-0.5..(coefs.len() as f64 - 0.5), y0..y1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(coefs.len())
        .x_label_formatter(&|v| category_label(&names, *v))
        .y_desc("Estimate (pp)")
        .label_style((FONT, pt(30.0, scale)))
        .bold_line_style(&BLACK.mix(0.3))
        .light_line_style(&WHITE)
        .draw()?;

    let half = BAR_WIDTH / 2.0;
    chart.draw_series(coefs.iter().enumerate().map(|(i, c)| {
        let x = i as f64;
        let color = if c.estimate < 0.0 { ISLAMIC } else { CONVENTIONAL };
        Rectangle::new([(x - half, 0.0), (x + half, c.estimate)], color.mix(0.9).filled())
    }))?;

    let whisker = BLACK.stroke_width(px(4.0, scale));
    for (i, c) in coefs.iter().enumerate() {
        let x = i as f64;
        let (lo, hi) = ci(c.estimate, c.std_error);
        chart.draw_series([
            PathElement::new(vec![(x, lo), (x, hi)], whisker),
            PathElement::new(vec![(x - half / 2.0, lo), (x + half / 2.0, lo)], whisker),
            PathElement::new(vec![(x - half / 2.0, hi), (x + half / 2.0, hi)], whisker),
        ])?;
    }

    Ok(())
}

/// Label for an integer category position; blank between categories.
fn category_label(labels: &[String], v: f64) -> String {
    let idx = v.round();
    if (v - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

fn quarter_label(date: chrono::NaiveDate) -> String {
    format!("{}Q{}", date.year(), date.month0() / 3 + 1)
}

/// Min/max of `values` padded by 5% (or ±1 when the span is degenerate).
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !(min.is_finite() && max.is_finite()) {
        return (0.0, 1.0);
    }
    let span = max - min;
    if span < 1e-12 {
        return (min - 1.0, max + 1.0);
    }
    (min - 0.05 * span, max + 0.05 * span)
}

/// Scale a font size given at 300 DPI to the requested resolution.
fn pt(at_paper_dpi: f64, scale: f64) -> f64 {
    (at_paper_dpi * scale).max(1.0)
}

/// Scale a pixel size given at 300 DPI to the requested resolution.
fn px(at_paper_dpi: f64, scale: f64) -> u32 {
    (at_paper_dpi * scale).round().max(1.0) as u32
}

//! ASCII plotting of the synthetic panel for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - conventional-bank quarters: `o`
//! - Islamic-bank quarters: `I`
//! - fitted values: `-` line

use crate::domain::{RegressionResult, SyntheticPanel};

/// Render the NPL ratio by quarter, optionally with the fitted values overlaid.
pub fn render_panel_plot(
    panel: &SyntheticPanel,
    fit: Option<&RegressionResult>,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let observed: Vec<f64> = panel.observations.iter().map(|o| o.npl_ratio).collect();
    let fitted: Option<&[f64]> = fit
        .map(|r| r.fitted.as_slice())
        .filter(|f| f.len() == observed.len());

    let (y_min, y_max) = y_range(&observed, fitted).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);
    let n = observed.len().max(2);

    let mut grid = vec![vec![' '; width]; height];

    // Draw fitted values first (so observations can overlay).
    if let Some(fitted) = fitted {
        let mut prev = None;
        for (i, &y) in fitted.iter().enumerate() {
            let x = map_x(i, n, width);
            let yy = map_y(y, y_min, y_max, height);
            if let Some((x0, y0)) = prev {
                draw_line(&mut grid, x0, y0, x, yy, '-');
            } else {
                grid[yy][x] = '-';
            }
            prev = Some((x, yy));
        }
    }

    for (i, o) in panel.observations.iter().enumerate() {
        let x = map_x(i, n, width);
        let y = map_y(o.npl_ratio, y_min, y_max, height);
        grid[y][x] = if o.islamic_bank == 1 { 'I' } else { 'o' };
    }

    // Build final string. We include a small header with ranges.
    let mut out = String::new();
    match (panel.observations.first(), panel.observations.last()) {
        (Some(first), Some(last)) => out.push_str(&format!(
            "Plot: quarter=[{}, {}] | npl=[{y_min:.2}, {y_max:.2}]%\n",
            first.quarter, last.quarter
        )),
        _ => out.push_str(&format!("Plot: (empty panel) | npl=[{y_min:.2}, {y_max:.2}]%\n")),
    }

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn y_range(observed: &[f64], fitted: Option<&[f64]>) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for &y in observed.iter().chain(fitted.unwrap_or(&[])) {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(i: usize, n: usize, width: usize) -> usize {
    let width = width.max(2);
    let u = (i as f64 / (n as f64 - 1.0)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - merged records: `o`
//! - fitted trend: `-` line

use crate::domain::{Dataset, TrendFile, TrendModel, SOC, VOLTAGE};
use crate::error::AppError;

/// Render a plot of the merged records with the fitted trend overlaid.
pub fn render_merged_plot(
    dataset: &Dataset,
    trend: &TrendModel,
    width: usize,
    height: usize,
) -> Result<String, AppError> {
    let soc = dataset.numeric_column(SOC)?;
    let voltage = dataset.numeric_column(VOLTAGE)?;
    let points: Vec<(f64, f64)> = soc.iter().copied().zip(voltage.iter().copied()).collect();

    let (s_min, s_max) = soc_range(&soc).unwrap_or((0.0, 100.0));
    let curve = sample_trend(trend, s_min, s_max, width.max(2));
    Ok(render_plot(&points, &curve, s_min, s_max, width, height))
}

/// Render a plot from a saved trend JSON file (curve only, no overlay points).
pub fn render_trend_file_plot(file: &TrendFile, width: usize, height: usize) -> String {
    let (s_min, s_max) = soc_range(&file.grid.soc).unwrap_or((0.0, 100.0));
    let curve: Vec<(f64, f64)> = file
        .grid
        .soc
        .iter()
        .copied()
        .zip(file.grid.voltage.iter().copied())
        .collect();

    render_plot(&[], &curve, s_min, s_max, width, height)
}

fn render_plot(
    points: &[(f64, f64)],
    curve: &[(f64, f64)],
    s_min: f64,
    s_max: f64,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    // Determine voltage range from observed points and curve points.
    let (v_min, v_max) = voltage_range(points, curve).unwrap_or((0.0, 1.0));
    let (v_min, v_max) = pad_range(v_min, v_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw curve first (so points can overlay).
    draw_curve(&mut grid, curve, s_min, s_max, v_min, v_max);

    for &(s, v) in points {
        let x = map_x(s, s_min, s_max, width);
        let y = map_y(v, v_min, v_max, height);
        grid[y][x] = 'o';
    }

    // Build final string. We include a small header with ranges.
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: SOC=[{s_min:.3}, {s_max:.3}]% | voltage=[{v_min:.2}, {v_max:.2}]V\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn soc_range(soc: &[f64]) -> Option<(f64, f64)> {
    let mut min_s = f64::INFINITY;
    let mut max_s = f64::NEG_INFINITY;
    for &s in soc {
        min_s = min_s.min(s);
        max_s = max_s.max(s);
    }
    if min_s.is_finite() && max_s.is_finite() && max_s > min_s {
        Some((min_s, max_s))
    } else {
        None
    }
}

fn sample_trend(trend: &TrendModel, s_min: f64, s_max: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let s = s_min + u * (s_max - s_min);
        out.push((s, trend.evaluate(s)));
    }
    out
}

fn voltage_range(points: &[(f64, f64)], curve: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;

    for &(_, v) in points {
        min_v = min_v.min(v);
        max_v = max_v.max(v);
    }
    for &(_, v) in curve {
        min_v = min_v.min(v);
        max_v = max_v.max(v);
    }

    if min_v.is_finite() && max_v.is_finite() && max_v > min_v {
        Some((min_v, max_v))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(s: f64, s_min: f64, s_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((s - s_min) / (s_max - s_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(v: f64, v_min: f64, v_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((v - v_min) / (v_max - v_min)).clamp(0.0, 1.0);
    // v=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    s_min: f64,
    s_max: f64,
    v_min: f64,
    v_max: f64,
) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(s, v) in curve {
        let x = map_x(s, s_min, s_max, width);
        let yy = map_y(v, v_min, v_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, yy, '-');
        } else {
            grid[yy][x] = '-';
        }
        prev = Some((x, yy));
    }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldValue, Record};

    fn two_point_dataset() -> Dataset {
        Dataset::new(
            vec![SOC.to_string(), VOLTAGE.to_string()],
            vec![
                Record {
                    values: vec![FieldValue::Number(10.0), FieldValue::Number(2.5)],
                },
                Record {
                    values: vec![FieldValue::Number(90.0), FieldValue::Number(3.5)],
                },
            ],
        )
    }

    #[test]
    fn plot_golden_snapshot_small() {
        // Flat trend at 2.5 V; the two observed points sit on the corners.
        let trend = TrendModel {
            coefficients: [2.5, 0.0, 0.0],
        };

        let txt = render_merged_plot(&two_point_dataset(), &trend, 10, 5).unwrap();
        let expected = concat!(
            "Plot: SOC=[10.000, 90.000]% | voltage=[2.45, 3.55]V\n",
            "         o\n",
            "          \n",
            "          \n",
            "          \n",
            "o---------\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn trend_file_plot_uses_grid_range() {
        let trend = TrendModel {
            coefficients: [3.0, 0.01, 0.0],
        };
        let file = crate::io::curve::trend_file(
            &trend,
            crate::domain::Direction::Ascending,
            0.0,
            100.0,
        );
        let txt = render_trend_file_plot(&file, 40, 10);
        assert!(txt.starts_with("Plot: SOC=[0.000, 100.000]%"));
        assert!(txt.contains('-'));
        // No observed points in a curve-only plot (skip the header line).
        assert!(txt.lines().skip(1).all(|row| !row.contains('o')));
    }
}

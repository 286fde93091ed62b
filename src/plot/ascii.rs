//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual comparison of the solvers in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - training samples: `o`
//! - each curve: its own glyph (`.` for the ground truth, one letter per solver)

use crate::app::pipeline::RunOutput;
use crate::domain::SampleSet;

/// Glyph for the noise-free `sin(2πx)` curve.
const TRUTH_GLYPH: char = '.';

/// A named polyline to draw.
#[derive(Debug, Clone)]
pub struct PlotCurve {
    pub label: String,
    pub glyph: char,
    pub points: Vec<(f64, f64)>,
}

/// Plot the training samples, the ground truth and every solver's predictions.
pub fn render_run_plot(run: &RunOutput, width: usize, height: usize) -> String {
    let xs = &run.data.test_x;
    let mut curves = vec![PlotCurve {
        label: "sin(2πx)".to_string(),
        glyph: TRUTH_GLYPH,
        points: xs.iter().copied().zip(run.data.truth.iter().copied()).collect(),
    }];
    for r in &run.runs {
        curves.push(PlotCurve {
            label: r.solver.display_name().to_string(),
            glyph: r.solver.glyph(),
            points: xs.iter().copied().zip(r.predictions.iter().copied()).collect(),
        });
    }
    render_ascii_plot(&run.data.train, &curves, width, height)
}

/// Render samples and curves on a fixed-size character grid.
///
/// Curves are drawn in order and never overwrite each other; samples are drawn
/// last so they stay visible.
pub fn render_ascii_plot(
    samples: &SampleSet,
    curves: &[PlotCurve],
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = x_range(samples, curves).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = y_range(samples, curves).unwrap_or((-1.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    for curve in curves {
        draw_curve(&mut grid, &curve.points, curve.glyph, (x_min, x_max), (y_min, y_max));
    }

    for (&x, &t) in samples.x.iter().zip(samples.t.iter()) {
        if !(x.is_finite() && t.is_finite()) {
            continue;
        }
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(t, y_min, y_max, height);
        grid[row][col] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.2}, {y_max:.2}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    let mut legend = vec!["o training data".to_string()];
    legend.extend(curves.iter().map(|c| format!("{} {}", c.glyph, c.label)));
    out.push_str(&legend.join("  "));
    out.push('\n');

    out
}

fn finite_points<'a>(
    samples: &'a SampleSet,
    curves: &'a [PlotCurve],
) -> impl Iterator<Item = (f64, f64)> + 'a {
    samples
        .x
        .iter()
        .copied()
        .zip(samples.t.iter().copied())
        .chain(curves.iter().flat_map(|c| c.points.iter().copied()))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
}

fn x_range(samples: &SampleSet, curves: &[PlotCurve]) -> Option<(f64, f64)> {
    let (min_x, max_x) = finite_points(samples, curves)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (x, _)| (lo.min(x), hi.max(x)));
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn y_range(samples: &SampleSet, curves: &[PlotCurve]) -> Option<(f64, f64)> {
    let (min_y, max_y) = finite_points(samples, curves)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, y)| (lo.min(y), hi.max(y)));
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

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    ch: char,
    xr: (f64, f64),
    yr: (f64, f64),
) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        if !(x.is_finite() && y.is_finite()) {
            prev = None;
            continue;
        }
        let col = map_x(x, xr.0, xr.1, width);
        let row = map_y(y, yr.0, yr.1, height);
        match prev {
            Some((c0, r0)) => draw_line(grid, c0, r0, col, row, ch),
            None => draw_line(grid, col, row, col, row, ch),
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish). Only fills blank cells.
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

    #[test]
    fn plot_golden_snapshot_small() {
        let samples = SampleSet::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
        let curves = vec![PlotCurve {
            label: "fit".to_string(),
            glyph: '-',
            points: vec![(0.0, 0.0), (1.0, 0.0)],
        }];

        let txt = render_ascii_plot(&samples, &curves, 10, 5);
        let expected = concat!(
            "Plot: x=[0.000, 1.000] | y=[-0.05, 1.05]\n",
            "         o\n",
            "          \n",
            "          \n",
            "          \n",
            "o---------\n",
            "o training data  - fit\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn earlier_curves_keep_their_cells() {
        let samples = SampleSet::new(vec![0.0, 1.0], vec![-1.0, 1.0]).unwrap();
        let flat = vec![(0.0, 0.0), (1.0, 0.0)];
        let curves = vec![
            PlotCurve {
                label: "a".to_string(),
                glyph: 'a',
                points: flat.clone(),
            },
            PlotCurve {
                label: "b".to_string(),
                glyph: 'b',
                points: flat,
            },
        ];

        let txt = render_ascii_plot(&samples, &curves, 12, 7);
        assert!(txt.contains('a'));
        let grid_rows: Vec<&str> = txt.lines().skip(1).take(7).collect();
        assert!(grid_rows.iter().all(|row| !row.contains('b')));
    }
}

//! ASCII plotting for terminal output.
//!
//! Fixed-size grids only, so output is deterministic and golden tests stay
//! readable.
//!
//! Plot elements:
//! - cost bars: `#`, one row per option
//! - cost breakdown: stacked segments per option, see `BREAKDOWN_LEGEND`
//! - payment evolution: one line per option, `C` (Crédit), `L` (LOA), `D` (LLD)

use crate::domain::FinancingOption;
use crate::report::{Comparison, EvolutionPoint, fmt_eur};

const LABEL_WIDTH: usize = 7;

/// Horizontal bars of the cost of use, scaled to the most expensive option.
pub fn render_cost_bars(comparison: &Comparison, width: usize) -> String {
    let bar_width = width.max(10);
    let max = FinancingOption::ALL
        .iter()
        .map(|&o| comparison.costs(o).total_cost_usage)
        .fold(0.0_f64, f64::max);

    let mut out = String::new();
    out.push_str(&format!("Cost of use over the horizon (max {})\n", fmt_eur(max)));

    for option in FinancingOption::ALL {
        let value = comparison.costs(option).total_cost_usage;
        let len = if max > 0.0 {
            ((value / max) * bar_width as f64).round() as usize
        } else {
            0
        };
        let bar = "#".repeat(len.min(bar_width));
        out.push_str(&format!(
            "{:<lw$} {:<bw$} {}\n",
            option.label(),
            bar,
            fmt_eur(value),
            lw = LABEL_WIDTH,
            bw = bar_width
        ));
    }

    out
}

const BREAKDOWN_LEGEND: &str =
    "# payments | i interest | o purchase option | a insurance | m maintenance | p penalties | f fees";

/// Stacked bars of everything paid per option, scaled to the largest total.
///
/// Loan interest is carved out of the payments it is part of. The LOA bar
/// includes the purchase option, so it shows the cost of keeping the car.
pub fn render_cost_breakdown(comparison: &Comparison, width: usize) -> String {
    let bar_width = width.max(10);
    let segments: Vec<(FinancingOption, [(char, f64); 7])> = FinancingOption::ALL
        .iter()
        .map(|&o| (o, breakdown_segments(o, comparison)))
        .collect();
    let total = |s: &[(char, f64); 7]| s.iter().map(|&(_, v)| v).sum::<f64>();
    let max = segments.iter().map(|(_, s)| total(s)).fold(0.0_f64, f64::max);

    let mut out = String::new();
    out.push_str(&format!("Total cost breakdown (max {})\n", fmt_eur(max)));

    for (option, parts) in &segments {
        let mut bar = String::with_capacity(bar_width);
        let mut cumulative = 0.0;
        let mut drawn = 0;
        for &(ch, value) in parts {
            cumulative += value;
            // Rounding the running total keeps the bar length exact.
            let end = if max > 0.0 {
                (((cumulative / max) * bar_width as f64).round() as usize).min(bar_width)
            } else {
                0
            };
            if end > drawn {
                bar.extend(std::iter::repeat_n(ch, end - drawn));
                drawn = end;
            }
        }
        out.push_str(&format!(
            "{:<lw$} {:<bw$} {}\n",
            option.label(),
            bar,
            fmt_eur(total(parts)),
            lw = LABEL_WIDTH,
            bw = bar_width
        ));
    }
    out.push_str(BREAKDOWN_LEGEND);
    out.push('\n');

    out
}

fn breakdown_segments(option: FinancingOption, comparison: &Comparison) -> [(char, f64); 7] {
    let costs = comparison.costs(option);
    let fees = &costs.additional_fees;
    let interest = costs.total_interest.clamp(0.0, costs.total_payments);
    let purchase_option = match option {
        FinancingOption::Loa => costs.residual_value.unwrap_or(0.0),
        _ => 0.0,
    };
    [
        ('#', costs.total_payments - interest),
        ('i', interest),
        ('o', purchase_option),
        ('a', fees.insurance),
        ('m', fees.maintenance),
        ('p', fees.penalties),
        ('f', fees.establishment_fee),
    ]
}

/// Line plot of cumulative monthly payments per option.
pub fn render_payment_evolution(points: &[EvolutionPoint], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let Some((m_min, m_max)) = month_range(points) else {
        return "Cumulative payments: no data\n".to_string();
    };
    let (y_min, y_max) = y_range(points).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);
    // Cumulative payments are never negative.
    let y_min = y_min.max(0.0);
    let (x_min, x_max) = (m_min as f64, m_max as f64);

    let mut grid = vec![vec![' '; width]; height];

    // Draw order decides who wins a shared cell.
    for option in FinancingOption::ALL {
        let mut prev = None;
        for p in points {
            let x = map_x(p.month as f64, x_min, x_max, width);
            let y = map_y(p.value(option), y_min, y_max, height);
            match prev {
                Some((x0, y0)) => draw_line(&mut grid, x0, y0, x, y, marker(option)),
                None => draw_line(&mut grid, x, y, x, y, marker(option)),
            }
            prev = Some((x, y));
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Cumulative payments: month=[{m_min}, {m_max}] | y=[{y_min:.2}, {y_max:.2}] €\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    let legend: Vec<String> = FinancingOption::ALL
        .iter()
        .map(|&o| format!("{} = {}", marker(o), o.label()))
        .collect();
    out.push_str(&legend.join(" | "));
    out.push('\n');

    out
}

fn marker(option: FinancingOption) -> char {
    match option {
        FinancingOption::Credit => 'C',
        FinancingOption::Loa => 'L',
        FinancingOption::Lld => 'D',
    }
}

fn month_range(points: &[EvolutionPoint]) -> Option<(u32, u32)> {
    let min = points.iter().map(|p| p.month).min()?;
    let max = points.iter().map(|p| p.month).max()?;
    Some((min, if max > min { max } else { min + 1 }))
}

fn y_range(points: &[EvolutionPoint]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for p in points {
        for option in FinancingOption::ALL {
            let y = p.value(option);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
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

/// Integer line drawing (Bresenham). Occupied cells are left alone.
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

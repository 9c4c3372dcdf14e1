//! Terminal formatting: comparison table, summary and recommendation.
//!
//! We keep formatting code in one place so:
//! - the calculators stay free of presentation concerns
//! - output changes are localized (the snapshot tests below pin them down)
//!
//! Amounts are rounded to whole euros here and nowhere else.

use crate::advisor::{GENERIC_FAILURE_MESSAGE, RecommendationError};
use crate::calc::ProfileDefaults;
use crate::domain::{FinancingInput, FinancingOption, RecommendationResult};
use crate::report::{Comparison, is_high_mileage};

const LABEL_WIDTH: usize = 24;
const CELL_WIDTH: usize = 26;

/// Whole euros with space-grouped thousands, e.g. `12 672 €`.
pub fn fmt_eur(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{sign}{grouped} €")
}

/// Side-by-side comparison table.
pub fn format_comparison(input: &FinancingInput, comparison: &Comparison) -> String {
    let credit = &comparison.credit;
    let loa = &comparison.loa;
    let lld = &comparison.lld;

    let mut out = String::new();
    out.push_str(&format!(
        "=== Financing comparison over {} year(s) ===\n",
        comparison.duration
    ));
    out.push_str(&row(
        "criterion",
        FinancingOption::ALL.map(|o| o.display_name().to_string()),
    ));
    out.push_str(&row("", [(); 3].map(|_| "-".repeat(CELL_WIDTH - 2))));

    out.push_str(&row(
        "Ownership at term end",
        [
            "Yes".to_string(),
            "Optional (buy-out)".to_string(),
            "No, vehicle returned".to_string(),
        ],
    ));
    out.push_str(&row(
        "Cost of use",
        [
            fmt_eur(credit.total_cost_usage),
            fmt_eur(loa.total_cost_usage),
            fmt_eur(lld.total_cost_usage),
        ],
    ));

    let credit_detail = match credit.remaining_debt {
        Some(debt) if debt > 0.0 => format!("incl. {} still owed", fmt_eur(debt)),
        _ if credit.total_interest > 0.0 => format!("incl. {} interest", fmt_eur(credit.total_interest)),
        _ => String::new(),
    };
    let loa_detail = match loa.residual_value {
        Some(rv) if rv > 0.0 => format!("+{} to buy", fmt_eur(rv)),
        _ => String::new(),
    };
    out.push_str(&row("", [credit_detail, loa_detail, String::new()]));

    out.push_str(&row(
        "Monthly payment",
        FinancingOption::ALL.map(|o| format!("{}/month", fmt_eur(comparison.costs(o).monthly_payment))),
    ));
    out.push_str(&row(
        "Theoretical payment",
        FinancingOption::ALL.map(|o| match comparison.costs(o).theoretical_monthly_payment {
            Some(payment) => format!("{}/month", fmt_eur(payment)),
            None => "N/A".to_string(),
        }),
    ));
    out.push_str(&row(
        "Upfront amount",
        [
            upfront("Down payment", input.down_payment),
            upfront("First rent", input.first_payment_loa),
            upfront("First rent", input.first_payment_lld),
        ],
    ));
    out.push_str(&row(
        "Remaining debt",
        [
            match credit.remaining_debt {
                Some(debt) if debt > 0.0 => fmt_eur(debt),
                _ => "None".to_string(),
            },
            "N/A".to_string(),
            "N/A".to_string(),
        ],
    ));
    out.push_str(&row(
        "Residual value",
        [
            fmt_eur(credit.residual_value.unwrap_or(0.0)),
            fmt_eur(loa.residual_value.unwrap_or(0.0)),
            "N/A".to_string(),
        ],
    ));
    out.push_str(&row(
        "Mileage",
        [
            "Unlimited".to_string(),
            limited(loa.additional_fees.penalties),
            limited(lld.additional_fees.penalties),
        ],
    ));
    out.push_str(&row(
        "Maintenance",
        [
            format!("Yours: {}", fmt_eur(credit.additional_fees.maintenance)),
            "Sometimes included".to_string(),
            "Included".to_string(),
        ],
    ));
    out.push_str(&row(
        "Insurance",
        [
            format!("Free choice: {}", fmt_eur(credit.additional_fees.insurance)),
            format!("Often imposed: {}", fmt_eur(loa.additional_fees.insurance)),
            "Included".to_string(),
        ],
    ));
    out.push_str(&row(
        "Establishment fee",
        FinancingOption::ALL.map(|o| fmt_eur(comparison.costs(o).additional_fees.establishment_fee)),
    ));
    out.push_str(&row(
        "Cost of use + fees",
        FinancingOption::ALL.map(|o| fmt_eur(comparison.costs(o).total_cost_with_fees())),
    ));

    out
}

/// Ranking, savings, retained values and warnings.
pub fn format_summary(input: &FinancingInput, comparison: &Comparison) -> String {
    let mut out = String::new();

    let cheapest = comparison.cheapest();
    out.push_str(&format!(
        "Cheapest to use: {} ({}), saves {} vs {}.\n",
        cheapest,
        fmt_eur(comparison.costs(cheapest).total_cost_usage),
        fmt_eur(comparison.savings),
        comparison.most_expensive(),
    ));

    let ranking: Vec<String> = comparison
        .ranking
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. {} {}", i + 1, r.option, fmt_eur(r.total_cost_usage)))
        .collect();
    out.push_str(&format!("Ranking: {}\n", ranking.join(" | ")));

    let months = f64::from(comparison.duration * 12);
    let monthly: Vec<String> = FinancingOption::ALL
        .iter()
        .map(|&o| format!("{} {}", o, fmt_eur(comparison.costs(o).total_cost_usage / months)))
        .collect();
    out.push_str(&format!("Average monthly cost of use: {}\n", monthly.join(" | ")));

    out.push_str(&format!(
        "Residual value: Crédit {} (kept) | LOA {} (purchase option)\n",
        fmt_eur(comparison.credit.residual_value.unwrap_or(0.0)),
        fmt_eur(comparison.loa.residual_value.unwrap_or(0.0)),
    ));

    if is_high_mileage(input.mileage) {
        out.push_str(&format!(
            "Warning: at {} km/year, LOA/LLD mileage penalties add up quickly; a loan usually suits high-mileage drivers.\n",
            input.mileage
        ));
    }

    out
}

/// The recommendation, or the generic failure message.
pub fn format_recommendation(outcome: &Result<RecommendationResult, RecommendationError>) -> String {
    let mut out = String::from("=== Recommendation ===\n");
    match outcome {
        Ok(result) => {
            out.push_str(&format!("Recommended: {}\n", result.recommendation.display_name()));
            out.push_str(result.reasoning.trim());
            out.push('\n');
        }
        Err(_) => {
            out.push_str(GENERIC_FAILURE_MESSAGE);
            out.push('\n');
        }
    }
    out
}

/// Suggested defaults for a vehicle profile.
pub fn format_profile_defaults(
    vehicle_price: f64,
    down_payment: f64,
    duration: u32,
    defaults: &ProfileDefaults,
) -> String {
    format!(
        "Profile: price {} | down payment {} ({:.0}%) | {} year(s)\n\
         Suggested loan rate: {:.1}%\n\
         Suggested LOA residual value: {:.0}% ({})\n",
        fmt_eur(vehicle_price),
        fmt_eur(down_payment),
        defaults.down_payment_ratio * 100.0,
        duration,
        defaults.interest_rate,
        defaults.residual_value_rate,
        fmt_eur(vehicle_price * defaults.residual_value_rate / 100.0),
    )
}

fn row(label: &str, cells: [String; 3]) -> String {
    let line = format!(
        "{:<lw$} {:<cw$} {:<cw$} {}",
        label,
        cells[0],
        cells[1],
        cells[2],
        lw = LABEL_WIDTH,
        cw = CELL_WIDTH
    );
    let mut line = line.trim_end().to_string();
    line.push('\n');
    line
}

fn upfront(label: &str, amount: f64) -> String {
    if amount > 0.0 {
        format!("{label}: {}", fmt_eur(amount))
    } else {
        "None".to_string()
    }
}

fn limited(penalties: f64) -> String {
    if penalties > 0.0 {
        format!("Limited, {} penalty", fmt_eur(penalties))
    } else {
        "Limited".to_string()
    }
}

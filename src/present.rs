//! Turns view state into text.
//!
//! Everything here is a pure function of its arguments: rendering the same
//! state twice yields the same text.

use std::fmt::Write;

use crate::consts::SERVER_CURRENCY;
use crate::currency::{ExchangeRate, format_amount, format_fixed, format_grouped, parse_leading_number};
use crate::form::InputSet;
use crate::state::{Completed, ViewState};

/// Display-currency values derived from a completed simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Derived {
    /// Monthly investment in server currency, as typed.
    pub monthly: f64,
    pub usd_monthly: f64,
    pub usd_invested: f64,
    pub usd_interest: f64,
    pub duration_months: u32,
}

impl Derived {
    pub fn compute(completed: &Completed, rate: ExchangeRate) -> Self {
        let monthly = parse_leading_number(&completed.used_inputs.monthly_investment);
        Self {
            monthly,
            usd_monthly: rate.to_display(monthly),
            usd_invested: rate.to_display(completed.result.total_invested),
            usd_interest: rate.to_display(completed.result.total_interest),
            duration_months: completed.result.duration_months,
        }
    }
}

/// The result block, or `None` when there is no result yet.
pub fn render_result(last: Option<&Completed>, rate: ExchangeRate) -> Option<String> {
    let completed = last?;
    let d = Derived::compute(completed, rate);
    let inputs = &completed.used_inputs;

    let mut out = String::new();
    let _ = writeln!(out, "🧠 Investment Summary");
    let _ = writeln!(
        out,
        "If you invest {SERVER_CURRENCY} {} per month (approx. ${} USD), for {} year(s) \
         into a {}-year bond starting in {}, you will invest a total of approx. ${} \
         and earn approx. ${} in interest coupons.",
        format_grouped(d.monthly),
        format_fixed(d.usd_monthly),
        inputs.investment_years,
        inputs.bond_tenor_years,
        inputs.start_year,
        format_amount(d.usd_invested),
        format_amount(d.usd_interest),
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "💵 Simulation Summary (in USD)");
    let _ = writeln!(out, "Total Invested: ${}", format_amount(d.usd_invested));
    let _ = writeln!(out, "Total Interest: ${}", format_amount(d.usd_interest));
    let _ = writeln!(out, "Duration: {} months", d.duration_months);

    if completed.result.artifact_url().is_some() {
        let _ = writeln!(out);
        let _ = writeln!(out, "📄 See Full Simulation (/open)");
    }
    Some(out)
}

/// The form: one line per field, `(empty)` for blank values.
pub fn render_form(inputs: &InputSet) -> String {
    let width = inputs
        .entries()
        .map(|(field, _)| field.label().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (field, value) in inputs.entries() {
        let label = field.label();
        let shown = if value.is_empty() { "(empty)" } else { value };
        let _ = writeln!(out, "  {label:<width$}  {shown}");
    }
    out
}

/// The full home screen: title, form, run action, then the result block.
pub fn render_home(state: &ViewState, rate: ExchangeRate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📈 Bond Investment Simulator");
    let _ = writeln!(out);
    out.push_str(&render_form(&state.inputs));
    let _ = writeln!(out);
    if state.is_busy() {
        let _ = writeln!(out, "  … simulating");
    } else {
        let _ = writeln!(out, "  [Run Simulation] /run");
    }
    if let Some(result) = render_result(state.last.as_ref(), rate) {
        let _ = writeln!(out);
        out.push_str(&result);
    }
    out
}

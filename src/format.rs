// Display helpers. They read through the same resolver as filter/sort so
// the numbers on screen match the numbers used for ordering.

use crate::fields::{self, Context};
use crate::models::{FuelType, Vehicle};

pub const NOT_AVAILABLE: &str = "N/A";

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole US dollars with grouping: `$30,000`, `-$5,000`.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let body = group_thousands(rounded.unsigned_abs());
    if rounded < 0 { format!("-${body}") } else { format!("${body}") }
}

// Always signed: `+$1,200`, `-$5,000`
pub fn format_signed_currency(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let body = group_thousands(rounded.unsigned_abs());
    if rounded < 0 { format!("-${body}") } else { format!("+${body}") }
}

// One decimal, always signed: `+2.5`, `-0.3`
pub fn format_signed_number(value: f64) -> String {
    format!("{value:+.1}")
}

/// Electric vehicles show MPGe; everything else shows combined MPG,
/// falling back to MPGe when only that is recorded.
pub fn format_mpg(v: &Vehicle) -> String {
    let resolved = match v.fuel_type {
        FuelType::Electric => v.mpge.map(|n| (n, "MPGe")),
        _ => match (v.mpg_combined, fields::effective_mpg(v)) {
            (Some(n), _) => Some((n, "MPG")),
            (None, Some(n)) => Some((n, "MPGe")),
            (None, None) => None,
        },
    };
    match resolved {
        Some((n, unit)) => format!("{} {unit}", trim_number(n)),
        None => NOT_AVAILABLE.to_string(),
    }
}

// `76.0"`, flagged when the width came from the mirror buffer.
pub fn format_width(v: &Vehicle, ctx: &Context) -> String {
    let width = fields::effective_width(v, ctx);
    if v.mirror_width_inches.is_some() {
        format!("{width:.1}\"")
    } else {
        format!("{width:.1}\" (est.)")
    }
}

/// MSRP, else the used range, else N/A.
pub fn format_price(v: &Vehicle) -> String {
    match (v.msrp, v.used_price_low, v.used_price_high) {
        (Some(msrp), _, _) => format_currency(msrp),
        (None, Some(low), Some(high)) => {
            format!("{}\u{2013}{} used", format_currency(low), format_currency(high))
        }
        (None, None, Some(high)) => format!("{} used", format_currency(high)),
        _ => NOT_AVAILABLE.to_string(),
    }
}

// Drops a trailing ".0" so whole numbers read as integers.
pub(crate) fn trim_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        format!("{n:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(30000.0), "$30,000");
        assert_eq!(format_currency(1234567.4), "$1,234,567");
        assert_eq!(format_currency(999.0), "$999");
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(-5000.0), "-$5,000");
    }

    #[test]
    fn signed_labels() {
        assert_eq!(format_signed_currency(-5000.0), "-$5,000");
        assert_eq!(format_signed_currency(1200.0), "+$1,200");
        assert_eq!(format_signed_number(2.5), "+2.5");
        assert_eq!(format_signed_number(-0.3), "-0.3");
        assert_eq!(format_signed_number(3.0), "+3.0");
    }

    #[test]
    fn mpg_suffix_depends_on_fuel_type() {
        let gas = Vehicle { mpg_combined: Some(32.0), ..Default::default() };
        assert_eq!(format_mpg(&gas), "32 MPG");

        let ev = Vehicle {
            fuel_type: FuelType::Electric,
            mpge: Some(118.0),
            mpg_combined: Some(1.0),
            ..Default::default()
        };
        assert_eq!(format_mpg(&ev), "118 MPGe");

        let phev =
            Vehicle { fuel_type: FuelType::PlugInHybrid, mpge: Some(94.0), ..Default::default() };
        assert_eq!(format_mpg(&phev), "94 MPGe");

        assert_eq!(format_mpg(&Vehicle::default()), "N/A");
    }

    #[test]
    fn width_marks_estimates() {
        let v = Vehicle { body_width_inches: 70.0, ..Default::default() };
        assert_eq!(format_width(&v, &Context::with_mirror_buffer(6.0)), "76.0\" (est.)");
        let v = Vehicle { mirror_width_inches: Some(81.2), ..v };
        assert_eq!(format_width(&v, &Context::default()), "81.2\"");
    }

    #[test]
    fn price_prefers_msrp_then_used_range() {
        let v = Vehicle {
            used_price_low: Some(18000.0),
            used_price_high: Some(22000.0),
            ..Default::default()
        };
        assert_eq!(format_price(&v), "$18,000\u{2013}$22,000 used");
        let v = Vehicle { msrp: Some(35995.0), ..v };
        assert_eq!(format_price(&v), "$35,995");
        assert_eq!(format_price(&Vehicle::default()), "N/A");
    }
}

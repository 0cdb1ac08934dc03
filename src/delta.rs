// Baseline delta engine: signed difference of one field between a baseline
// vehicle and another vehicle, classified by the field's polarity.

use serde::Serialize;

use crate::fields::{self, Context, Field, Polarity};
use crate::format;
use crate::models::Vehicle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaPolarity {
    Favorable,
    Unfavorable,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delta {
    pub field: &'static str,
    /// comparison minus baseline
    pub magnitude: f64,
    pub label: String,
    pub polarity: DeltaPolarity,
}

/// Computes `comparison - baseline` for `field`.
///
/// Returns `None` when either vehicle has no effective value for the field,
/// or when the field is not numeric or has no declared polarity.
///
/// A difference that disappears at display precision (whole dollars, one
/// decimal otherwise) is reported as neutral "same".
pub fn delta(
    baseline: &Vehicle,
    comparison: &Vehicle,
    field: Field,
    ctx: &Context,
) -> Option<Delta> {
    let polarity = field.polarity()?;
    let base = fields::effective_number(baseline, field, ctx)?;
    let other = fields::effective_number(comparison, field, ctx)?;
    let magnitude = other - base;

    let shown = if field.is_monetary() {
        magnitude.round()
    } else {
        (magnitude * 10.0).round() / 10.0
    };
    if shown == 0.0 {
        return Some(Delta {
            field: field.label(),
            magnitude: 0.0,
            label: "same".to_string(),
            polarity: DeltaPolarity::Neutral,
        });
    }

    let improved = match polarity {
        Polarity::HigherIsBetter => magnitude > 0.0,
        Polarity::LowerIsBetter => magnitude < 0.0,
    };
    let label = if field.is_monetary() {
        format::format_signed_currency(magnitude)
    } else {
        format::format_signed_number(magnitude)
    };

    Some(Delta {
        field: field.label(),
        magnitude,
        label,
        polarity: if improved { DeltaPolarity::Favorable } else { DeltaPolarity::Unfavorable },
    })
}

// Deltas for a comparison row. Fields without a value on either side are skipped.
pub fn deltas(
    baseline: &Vehicle,
    comparison: &Vehicle,
    fields: &[Field],
    ctx: &Context,
) -> Vec<Delta> {
    fields
        .iter()
        .filter_map(|f| delta(baseline, comparison, *f, ctx))
        .collect()
}

/// Fields shown in the baseline comparison table.
pub const COMPARISON_FIELDS: [Field; 8] = [
    Field::Price,
    Field::Width,
    Field::Height,
    Field::GroundClearance,
    Field::Seats,
    Field::Legroom,
    Field::Mpg,
    Field::EvRange,
];

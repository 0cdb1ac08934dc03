// Comparator / sort engine. Orders by exactly one field; ties keep their
// input order in both directions.

use std::cmp::Ordering;

use crate::fields::{self, Context, Field, FieldKind, FieldValue};
use crate::models::{SortConfig, SortDirection, Vehicle};

#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Text(String),
    Rank(i32),
}

impl SortKey {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Rank(a), SortKey::Rank(b)) => a.cmp(b),
            // Keys for one field always share a variant.
            _ => Ordering::Equal,
        }
    }
}

// Sentinel rank for an unrated vehicle, per field.
fn rank_of(v: &Vehicle, field: Field) -> i32 {
    match field {
        Field::SafetyRating => v.safety_rating.rank(),
        Field::AutonomyLevel => v.autonomy_level.rank(),
        Field::LeaseRating => v.lease_rating.rank(),
        Field::DepreciationCategory => v.depreciation_category.rank(),
        Field::ReliabilityRating => v.reliability_rating.rank(),
        _ => 0,
    }
}

fn sort_key(v: &Vehicle, field: Field, ctx: &Context) -> SortKey {
    match field.kind() {
        FieldKind::Ranked => SortKey::Rank(rank_of(v, field)),
        FieldKind::Text => match fields::effective_value(v, field, ctx) {
            Some(FieldValue::Text(s)) => SortKey::Text(s.to_lowercase()),
            _ => SortKey::Text(String::new()),
        },
        // Missing after fallback sorts as +infinity: last ascending, first descending.
        FieldKind::Numeric => SortKey::Number(
            fields::effective_number(v, field, ctx).unwrap_or(f64::INFINITY),
        ),
    }
}

/// Sorts by an already-resolved field. Uses a stable sort.
pub fn sort_by_field<'a, I>(
    records: I,
    field: Field,
    direction: SortDirection,
    ctx: &Context,
) -> Vec<&'a Vehicle>
where
    I: IntoIterator<Item = &'a Vehicle>,
{
    let mut keyed: Vec<(SortKey, &Vehicle)> = records
        .into_iter()
        .map(|v| (sort_key(v, field, ctx), v))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match direction {
        SortDirection::Asc => a.compare(b),
        SortDirection::Desc => b.compare(a),
    });

    keyed.into_iter().map(|(_, v)| v).collect()
}

/// Orders `records` per `config`. An unrecognised field name leaves the
/// input order untouched.
///
/// Width sorts on the effective width, so the mirror buffer from `ctx`
/// applies here exactly as it does on display.
pub fn sort<'a, I>(records: I, config: &SortConfig, ctx: &Context) -> Vec<&'a Vehicle>
where
    I: IntoIterator<Item = &'a Vehicle>,
{
    match config.field.parse::<Field>() {
        Ok(field) => {
            tracing::debug!(%field, direction = ?config.direction, "sorting");
            sort_by_field(records, field, config.direction, ctx)
        }
        Err(e) => {
            tracing::warn!(error = %e, "ignoring sort configuration");
            records.into_iter().collect()
        }
    }
}

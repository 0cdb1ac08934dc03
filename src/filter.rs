// Predicate filter engine: a vehicle passes only if it satisfies every
// configured constraint (logical AND). Unset constraints never reject.

use crate::fields::{self, Context, Field, WidthFilterType};
use crate::models::{FilterConfig, Vehicle};

// Range check on an optional quantity. Any configured bound rejects a
// missing value, since there is nothing to compare.
fn within(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    match value {
        Some(x) => min.is_none_or(|lo| x >= lo) && max.is_none_or(|hi| x <= hi),
        None => false,
    }
}

// Empty set means no restriction.
fn member<T: PartialEq>(allowed: &[T], value: &T) -> bool {
    allowed.is_empty() || allowed.contains(value)
}

fn matches_search(v: &Vehicle, query: &str) -> bool {
    let haystack = format!(
        "{} {} {} {}",
        v.year,
        v.make,
        v.model,
        v.trim.as_deref().unwrap_or("")
    )
    .to_lowercase();
    query
        .split_whitespace()
        .all(|term| haystack.contains(&term.to_lowercase()))
}

impl FilterConfig {
    /// True when `v` satisfies every constraint in this configuration.
    pub fn matches(&self, v: &Vehicle, ctx: &Context) -> bool {
        let num = |field| fields::effective_number(v, field, ctx);

        // Identity and free text
        if let Some(query) = self.search.as_deref() {
            if !matches_search(v, query) {
                return false;
            }
        }
        if !self.makes.is_empty() && !self.makes.iter().any(|m| m.eq_ignore_ascii_case(&v.make)) {
            return false;
        }
        if !member(&self.ids, &v.id) {
            return false;
        }
        let year = Some(f64::from(v.year));
        if !within(year, self.min_year.map(f64::from), self.max_year.map(f64::from)) {
            return false;
        }

        // Unpriced vehicles count as $0: they pass any max but fail a positive min.
        let price = fields::effective_price(v).unwrap_or(0.0);
        if !within(Some(price), self.min_price, self.max_price) {
            return false;
        }

        // Dimensions
        if let Some(max_width) = self.max_width_inches {
            let width = match ctx.width_filter {
                WidthFilterType::Extended => fields::effective_width(v, ctx),
                WidthFilterType::Folded => fields::folded_width(v),
            };
            if width > max_width {
                return false;
            }
        }
        if !within(num(Field::Height), None, self.max_height_inches)
            || !within(num(Field::Length), None, self.max_length_inches)
            || !within(num(Field::GroundClearance), self.min_ground_clearance_inches, None)
            || !within(num(Field::Towing), self.min_towing_lbs, None)
        {
            return false;
        }

        // Set membership on raw values
        if !member(&self.body_types, &v.body_type)
            || !member(&self.fuel_types, &v.fuel_type)
            || !member(&self.plug_types, &v.plug_type)
            || !member(&self.seats, &v.seats)
            || !member(&self.doors, &v.doors)
            || !member(&self.safety_ratings, &v.safety_rating)
            || !member(&self.autonomy_levels, &v.autonomy_level)
        {
            return false;
        }
        if !self.insurance_categories.is_empty()
            && !v.insurance_category.is_some_and(|c| self.insurance_categories.contains(&c))
        {
            return false;
        }
        if !self.maintenance_categories.is_empty()
            && !v.maintenance_category.is_some_and(|c| self.maintenance_categories.contains(&c))
        {
            return false;
        }

        // Optional quantities
        if !within(num(Field::Legroom), self.min_legroom_inches, None)
            || !within(num(Field::CargoVolume), self.min_cargo_volume, None)
            || !within(num(Field::EvRange), self.min_ev_range, None)
            || !within(num(Field::ReviewScore), self.min_review_score, None)
            || !within(num(Field::Mpg), self.min_mpg, None)
            || !within(num(Field::Horsepower), self.min_horsepower, None)
            || !within(num(Field::ZeroToSixty), None, self.max_zero_to_sixty)
            || !within(num(Field::InsuranceCost), None, self.max_insurance_cost)
            || !within(num(Field::MaintenanceCost), None, self.max_maintenance_cost)
        {
            return false;
        }

        // Rank thresholds; unrated never meets a threshold
        if let Some(min) = self.min_safety_rating {
            if v.safety_rating.is_unrated() || v.safety_rating.rank() < min.rank() {
                return false;
            }
        }
        if let Some(min) = self.min_reliability {
            if v.reliability_rating.is_unrated() || v.reliability_rating.rank() < min.rank() {
                return false;
            }
        }

        self.required_features.iter().all(|f| v.has_feature(*f))
    }
}

/// Returns the vehicles that pass `config`, in their original order.
pub fn filter<'a, I>(records: I, config: &FilterConfig, ctx: &Context) -> Vec<&'a Vehicle>
where
    I: IntoIterator<Item = &'a Vehicle>,
{
    let mut seen = 0usize;
    let kept: Vec<&Vehicle> = records
        .into_iter()
        .inspect(|_| seen += 1)
        .filter(|v| config.matches(v, ctx))
        .collect();
    tracing::debug!(input = seen, kept = kept.len(), "filter applied");
    kept
}

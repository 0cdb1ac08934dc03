// Data structures for the vehicle dataset and the view configuration
// handed to the engine by the presentation layer.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::ranks::{
    null_as_unrated, AutonomyLevel, DepreciationCategory, LeaseRating, ReliabilityRating,
    SafetyRating,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    #[default]
    Sedan,
    Crossover,
    Suv,
    Truck,
    Minivan,
    Hatchback,
    Wagon,
    Coupe,
}

impl BodyType {
    pub fn as_str(self) -> &'static str {
        match self {
            BodyType::Sedan => "sedan",
            BodyType::Crossover => "crossover",
            BodyType::Suv => "suv",
            BodyType::Truck => "truck",
            BodyType::Minivan => "minivan",
            BodyType::Hatchback => "hatchback",
            BodyType::Wagon => "wagon",
            BodyType::Coupe => "coupe",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FuelType {
    #[default]
    Gasoline,
    Hybrid,
    Electric,
    Diesel,
    PlugInHybrid,
}

impl FuelType {
    pub fn as_str(self) -> &'static str {
        match self {
            FuelType::Gasoline => "gasoline",
            FuelType::Hybrid => "hybrid",
            FuelType::Electric => "electric",
            FuelType::Diesel => "diesel",
            FuelType::PlugInHybrid => "plug-in-hybrid",
        }
    }
}

// Charging connector. Gasoline vehicles are always `None`, electric never.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlugType {
    #[default]
    #[serde(rename = "none")]
    None,
    J1772,
    #[serde(rename = "CCS")]
    Ccs,
    #[serde(rename = "NACS")]
    Nacs,
    #[serde(rename = "CHAdeMO")]
    Chademo,
}

impl PlugType {
    pub fn as_str(self) -> &'static str {
        match self {
            PlugType::None => "none",
            PlugType::J1772 => "J1772",
            PlugType::Ccs => "CCS",
            PlugType::Nacs => "NACS",
            PlugType::Chademo => "CHAdeMO",
        }
    }
}

// Bucket for annual insurance / maintenance estimates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostBucket {
    Low,
    Medium,
    High,
}

/// Driver-assistance feature flags. Absent flags are `false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DriverAssist {
    pub adaptive_cruise: bool,
    pub lane_centering: bool,
    pub lane_keep_assist: bool,
    pub blind_spot_monitoring: bool,
    pub auto_emergency_braking: bool,
    pub rear_cross_traffic_alert: bool,
    pub hands_free_highway: bool,
    pub parking_assist: bool,
    pub surround_view_camera: bool,
    pub system_name: Option<String>, // marketing name, e.g. "BlueCruise"
}

// Names a single flag in `DriverAssist`, used by the feature filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssistFeature {
    AdaptiveCruise,
    LaneCentering,
    LaneKeepAssist,
    BlindSpotMonitoring,
    AutoEmergencyBraking,
    RearCrossTrafficAlert,
    HandsFreeHighway,
    ParkingAssist,
    SurroundViewCamera,
}

impl DriverAssist {
    pub fn has(&self, feature: AssistFeature) -> bool {
        match feature {
            AssistFeature::AdaptiveCruise => self.adaptive_cruise,
            AssistFeature::LaneCentering => self.lane_centering,
            AssistFeature::LaneKeepAssist => self.lane_keep_assist,
            AssistFeature::BlindSpotMonitoring => self.blind_spot_monitoring,
            AssistFeature::AutoEmergencyBraking => self.auto_emergency_braking,
            AssistFeature::RearCrossTrafficAlert => self.rear_cross_traffic_alert,
            AssistFeature::HandsFreeHighway => self.hands_free_highway,
            AssistFeature::ParkingAssist => self.parking_assist,
            AssistFeature::SurroundViewCamera => self.surround_view_camera,
        }
    }
}

/// A single vehicle in the catalog. Never mutated once loaded; derived
/// values go through [`crate::fields::effective_value`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    // Identity
    pub id: String,
    pub year: u16,
    pub make: String,
    pub model: String,
    pub trim: Option<String>,
    pub body_type: BodyType,

    // Dimensions (inches / pounds)
    pub body_width_inches: f64,
    pub mirrors_folded_width_inches: Option<f64>,
    pub mirror_width_inches: Option<f64>, // mirrors extended
    pub length_inches: Option<f64>,
    pub height_inches: f64,
    pub ground_clearance_inches: f64,
    pub towing_capacity_lbs: Option<f64>,

    // Capacity
    pub seats: u8,
    pub doors: u8,
    pub cargo_volume_cu_ft: Option<f64>,
    pub driver_legroom_inches: Option<f64>,

    // Powertrain
    pub fuel_type: FuelType,
    #[serde(default)]
    pub plug_type: PlugType,
    pub mpg_city: Option<f64>,
    pub mpg_highway: Option<f64>,
    pub mpg_combined: Option<f64>,
    pub mpge: Option<f64>,
    pub ev_range_miles: Option<f64>,

    // Pricing (USD)
    pub msrp: Option<f64>,
    pub used_price_low: Option<f64>,
    pub used_price_high: Option<f64>,

    // Ratings
    #[serde(
        default,
        deserialize_with = "null_as_unrated",
        skip_serializing_if = "SafetyRating::is_unrated"
    )]
    pub safety_rating: SafetyRating,
    pub review_score: Option<f64>, // 0-100
    #[serde(
        default,
        deserialize_with = "null_as_unrated",
        skip_serializing_if = "AutonomyLevel::is_unrated"
    )]
    pub autonomy_level: AutonomyLevel,
    #[serde(
        default,
        deserialize_with = "null_as_unrated",
        skip_serializing_if = "LeaseRating::is_unrated"
    )]
    pub lease_rating: LeaseRating,
    #[serde(
        default,
        deserialize_with = "null_as_unrated",
        skip_serializing_if = "DepreciationCategory::is_unrated"
    )]
    pub depreciation_category: DepreciationCategory,
    pub five_year_resale_percent: Option<f64>,
    #[serde(
        default,
        deserialize_with = "null_as_unrated",
        skip_serializing_if = "ReliabilityRating::is_unrated"
    )]
    pub reliability_rating: ReliabilityRating,

    // Ownership cost (USD per year)
    pub annual_insurance_cost: Option<f64>,
    pub annual_maintenance_cost: Option<f64>,
    pub insurance_category: Option<CostBucket>,
    pub maintenance_category: Option<CostBucket>,

    // Performance
    pub zero_to_sixty_seconds: Option<f64>,
    pub horsepower: Option<f64>,
    pub torque_lb_ft: Option<f64>,

    pub driver_assist: Option<DriverAssist>,

    #[serde(default)]
    pub standard_features: Vec<String>,
    pub notes: Option<String>,

    // Metadata
    #[serde(default)]
    pub last_updated: String,
    pub data_source: Option<String>,
}

impl Vehicle {
    /// "2024 Toyota RAV4 XLE"
    pub fn display_name(&self) -> String {
        match self.trim.as_deref().filter(|t| !t.is_empty()) {
            Some(trim) => format!("{} {} {} {}", self.year, self.make, self.model, trim),
            None => format!("{} {} {}", self.year, self.make, self.model),
        }
    }

    pub fn has_feature(&self, feature: AssistFeature) -> bool {
        self.driver_assist.as_ref().is_some_and(|da| da.has(feature))
    }

    // `lastUpdated` is free text in the dataset; only ISO dates parse.
    pub fn last_updated_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.last_updated.trim(), "%Y-%m-%d").ok()
    }
}

// Saved views outlive the enum tables they were written against. An entry
// that no longer decodes is dropped with a warning; the rest of the view
// is kept.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw.into_iter().filter_map(|value| decode_or_warn(&value)).collect())
}

fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| decode_or_warn(&value)))
}

fn decode_or_warn<T: DeserializeOwned>(value: &Value) -> Option<T> {
    match T::deserialize(value) {
        Ok(item) => Some(item),
        Err(e) => {
            tracing::warn!(%value, error = %e, "ignoring unrecognised view entry");
            None
        }
    }
}

// Case-insensitive; anything else falls back to ascending.
fn lenient_direction<'de, D>(deserializer: D) -> Result<SortDirection, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let name = raw.as_ref().and_then(Value::as_str).map(str::to_ascii_lowercase);
    let direction = match name.as_deref() {
        Some("asc") => SortDirection::Asc,
        Some("desc") => SortDirection::Desc,
        _ => {
            if let Some(value) = raw {
                tracing::warn!(%value, "unknown sort direction, using ascending");
            }
            SortDirection::default()
        }
    };
    Ok(direction)
}

// Constraints the filter engine applies. Every field is optional; an unset
// bound or an empty list places no restriction on that field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterConfig {
    // Free text over year/make/model/trim
    pub search: Option<String>,
    pub makes: Vec<String>,
    pub ids: Vec<String>,

    pub min_year: Option<u16>,
    pub max_year: Option<u16>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,

    // Dimensions
    pub max_width_inches: Option<f64>,
    pub max_height_inches: Option<f64>,
    pub max_length_inches: Option<f64>,
    pub min_ground_clearance_inches: Option<f64>,
    pub min_towing_lbs: Option<f64>,

    // Set membership
    #[serde(deserialize_with = "lenient_list")]
    pub body_types: Vec<BodyType>,
    #[serde(deserialize_with = "lenient_list")]
    pub fuel_types: Vec<FuelType>,
    #[serde(deserialize_with = "lenient_list")]
    pub plug_types: Vec<PlugType>,
    #[serde(deserialize_with = "lenient_list")]
    pub seats: Vec<u8>,
    #[serde(deserialize_with = "lenient_list")]
    pub doors: Vec<u8>,
    #[serde(deserialize_with = "lenient_list")]
    pub safety_ratings: Vec<SafetyRating>,
    #[serde(deserialize_with = "lenient_list")]
    pub autonomy_levels: Vec<AutonomyLevel>,
    #[serde(deserialize_with = "lenient_list")]
    pub insurance_categories: Vec<CostBucket>,
    #[serde(deserialize_with = "lenient_list")]
    pub maintenance_categories: Vec<CostBucket>,

    // Minimums on optional quantities; a missing value fails these
    pub min_legroom_inches: Option<f64>,
    pub min_cargo_volume: Option<f64>,
    pub min_ev_range: Option<f64>,
    pub min_review_score: Option<f64>,
    pub min_mpg: Option<f64>,
    pub min_horsepower: Option<f64>,
    pub max_zero_to_sixty: Option<f64>,
    pub max_insurance_cost: Option<f64>,
    pub max_maintenance_cost: Option<f64>,

    // Rank thresholds
    #[serde(deserialize_with = "lenient_option")]
    pub min_safety_rating: Option<SafetyRating>,
    #[serde(deserialize_with = "lenient_option")]
    pub min_reliability: Option<ReliabilityRating>,

    #[serde(deserialize_with = "lenient_list")]
    pub required_features: Vec<AssistFeature>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

// Field is kept as the raw name so a stale shared link with an unknown
// field degrades to "unsorted" instead of failing to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortConfig {
    pub field: String,
    #[serde(default, deserialize_with = "lenient_direction")]
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self { field: field.into(), direction }
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        Self::new("msrp", SortDirection::Asc)
    }
}

/// Decoded presentation state: what the user is looking at right now.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewState {
    pub filter: FilterConfig,
    pub sort: SortConfig,
    pub baseline_id: Option<String>,
    pub favorites: Vec<String>,
    pub favorites_only: bool,
}

impl ViewState {
    // Filter actually applied: favorites-only narrows to the favorite ids.
    pub fn effective_filter(&self) -> FilterConfig {
        let mut filter = self.filter.clone();
        if self.favorites_only {
            filter.ids = self.favorites.clone();
        }
        filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_deserializes_from_camel_case_json() {
        let json = r#"{
            "id": "toyota-rav4-2024",
            "year": 2024,
            "make": "Toyota",
            "model": "RAV4",
            "trim": "XLE",
            "bodyType": "crossover",
            "bodyWidthInches": 73.0,
            "heightInches": 67.0,
            "groundClearanceInches": 8.4,
            "seats": 5,
            "doors": 4,
            "fuelType": "hybrid",
            "mpgCombined": 39,
            "msrp": 32000,
            "safetyRating": "TSP+",
            "autonomyLevel": null,
            "driverAssist": { "adaptiveCruise": true, "systemName": "TSS 2.5" },
            "lastUpdated": "2024-05-01"
        }"#;
        let v: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(v.body_type, BodyType::Crossover);
        assert_eq!(v.fuel_type, FuelType::Hybrid);
        assert_eq!(v.plug_type, PlugType::None);
        assert_eq!(v.safety_rating, SafetyRating::TspPlus);
        assert_eq!(v.autonomy_level, AutonomyLevel::Unrated);
        assert!(v.has_feature(AssistFeature::AdaptiveCruise));
        assert!(!v.has_feature(AssistFeature::LaneCentering));
        assert_eq!(v.display_name(), "2024 Toyota RAV4 XLE");
        assert_eq!(v.last_updated_date(), NaiveDate::from_ymd_opt(2024, 5, 1));
    }

    #[test]
    fn plug_in_hybrid_uses_kebab_case() {
        let f: FuelType = serde_json::from_str("\"plug-in-hybrid\"").unwrap();
        assert_eq!(f, FuelType::PlugInHybrid);
        assert_eq!(f.as_str(), "plug-in-hybrid");
    }

    #[test]
    fn unrated_fields_are_omitted_when_serialized() {
        let v = Vehicle { id: "x".into(), ..Default::default() };
        let json = serde_json::to_value(&v).unwrap();
        assert!(json.get("safetyRating").is_none());
        assert!(json.get("reliabilityRating").is_none());
    }

    #[test]
    fn missing_driver_assist_means_no_features() {
        let v = Vehicle::default();
        assert!(!v.has_feature(AssistFeature::BlindSpotMonitoring));
    }

    #[test]
    fn favorites_only_restricts_ids() {
        let view = ViewState {
            favorites: vec!["a".into(), "b".into()],
            favorites_only: true,
            ..Default::default()
        };
        assert_eq!(view.effective_filter().ids, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn view_state_decodes_partial_json() {
        let json = r#"{
            "filter": {"maxPrice": 40000, "bodyTypes": ["suv"]},
            "sort": {"field": "safetyRating", "direction": "desc"}
        }"#;
        let view: ViewState = serde_json::from_str(json).unwrap();
        assert_eq!(view.filter.max_price, Some(40000.0));
        assert_eq!(view.filter.body_types, vec![BodyType::Suv]);
        assert_eq!(view.sort.direction, SortDirection::Desc);
        assert!(view.baseline_id.is_none());
    }

    #[test]
    fn stale_enum_entries_are_dropped_not_fatal() {
        let json = r#"{
            "filter": {
                "maxPrice": 40000,
                "bodyTypes": ["van", "suv"],
                "plugTypes": ["Type2", "NACS"],
                "seats": [5, 300],
                "safetyRatings": ["Superb"],
                "requiredFeatures": ["teleport", "adaptiveCruise"],
                "minSafetyRating": "Platinum",
                "minReliability": "good"
            },
            "sort": {"field": "msrp", "direction": "sideways"},
            "baselineId": "rav4"
        }"#;
        let view: ViewState = serde_json::from_str(json).unwrap();
        assert_eq!(view.filter.max_price, Some(40000.0));
        assert_eq!(view.filter.body_types, vec![BodyType::Suv]);
        assert_eq!(view.filter.plug_types, vec![PlugType::Nacs]);
        assert_eq!(view.filter.seats, vec![5]);
        assert!(view.filter.safety_ratings.is_empty());
        assert_eq!(view.filter.required_features, vec![AssistFeature::AdaptiveCruise]);
        assert_eq!(view.filter.min_safety_rating, None);
        assert_eq!(view.filter.min_reliability, Some(ReliabilityRating::Good));
        assert_eq!(view.sort.direction, SortDirection::Asc);
        assert_eq!(view.baseline_id.as_deref(), Some("rav4"));
    }

    #[test]
    fn sort_direction_ignores_case_and_null() {
        let decode = |json: &str| serde_json::from_str::<SortConfig>(json).unwrap();
        let sort = decode(r#"{"field":"width","direction":"DESC"}"#);
        assert_eq!(sort.direction, SortDirection::Desc);
        let sort = decode(r#"{"field":"width","direction":null}"#);
        assert_eq!(sort.direction, SortDirection::Asc);
        let sort = decode(r#"{"field":"width"}"#);
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn null_lists_decode_as_empty() {
        let filter: FilterConfig =
            serde_json::from_str(r#"{"fuelTypes":null,"minSafetyRating":null}"#).unwrap();
        assert!(filter.fuel_types.is_empty());
        assert!(filter.min_safety_rating.is_none());
    }
}

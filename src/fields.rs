//! Logical fields and the fallback resolver.
//!
//! Filtering, sorting, deltas and display formatting all read vehicle data
//! through [`effective_value`], so "width" or "MPG" means the same thing on
//! every surface.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::models::Vehicle;

pub const DEFAULT_MIRROR_BUFFER: f64 = 6.0;

// Added to body width when the folded-mirror width is unknown
pub const FOLDED_MIRROR_ALLOWANCE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidthFilterType {
    #[default]
    Extended,
    Folded,
}

/// Caller-supplied resolution settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Context {
    /// Inches added to body width when the mirrors-extended width is unknown.
    pub mirror_buffer: f64,
    pub width_filter: WidthFilterType,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            mirror_buffer: DEFAULT_MIRROR_BUFFER,
            width_filter: WidthFilterType::Extended,
        }
    }
}

impl Context {
    pub fn with_mirror_buffer(mirror_buffer: f64) -> Self {
        Self { mirror_buffer, ..Self::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    // Numeric
    Year,
    Price,
    Width,
    BodyWidth,
    FoldedWidth,
    Length,
    Height,
    GroundClearance,
    Towing,
    Seats,
    Doors,
    CargoVolume,
    Legroom,
    Mpg,
    MpgCity,
    MpgHighway,
    EvRange,
    ReviewScore,
    ResalePercent,
    InsuranceCost,
    MaintenanceCost,
    ZeroToSixty,
    Horsepower,
    Torque,
    // Free text
    Make,
    Model,
    Trim,
    BodyType,
    // Rank tables
    SafetyRating,
    AutonomyLevel,
    LeaseRating,
    DepreciationCategory,
    ReliabilityRating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Numeric,
    Text,
    Ranked,
}

/// Which direction of change is an improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
}

// Accepted names, lower-cased: the dataset's camelCase key plus short aliases
static FIELD_NAMES: Lazy<HashMap<&'static str, Field>> = Lazy::new(|| {
    use Field::*;
    HashMap::from([
        ("year", Year),
        ("msrp", Price),
        ("price", Price),
        ("width", Width),
        ("mirrorwidthinches", Width),
        ("effectivewidth", Width),
        ("bodywidth", BodyWidth),
        ("bodywidthinches", BodyWidth),
        ("foldedwidth", FoldedWidth),
        ("mirrorsfoldedwidthinches", FoldedWidth),
        ("length", Length),
        ("lengthinches", Length),
        ("height", Height),
        ("heightinches", Height),
        ("groundclearance", GroundClearance),
        ("groundclearanceinches", GroundClearance),
        ("towing", Towing),
        ("towingcapacitylbs", Towing),
        ("seats", Seats),
        ("doors", Doors),
        ("cargo", CargoVolume),
        ("cargovolumecuft", CargoVolume),
        ("legroom", Legroom),
        ("driverlegroominches", Legroom),
        ("mpg", Mpg),
        ("mpgcombined", Mpg),
        ("efficiency", Mpg),
        ("mpgcity", MpgCity),
        ("mpghighway", MpgHighway),
        ("evrange", EvRange),
        ("evrangemiles", EvRange),
        ("reviewscore", ReviewScore),
        ("score", ReviewScore),
        ("resale", ResalePercent),
        ("fiveyearresalepercent", ResalePercent),
        ("insurance", InsuranceCost),
        ("annualinsurancecost", InsuranceCost),
        ("maintenance", MaintenanceCost),
        ("annualmaintenancecost", MaintenanceCost),
        ("zerotosixty", ZeroToSixty),
        ("zerotosixtyseconds", ZeroToSixty),
        ("horsepower", Horsepower),
        ("hp", Horsepower),
        ("torque", Torque),
        ("torquelbft", Torque),
        ("make", Make),
        ("model", Model),
        ("trim", Trim),
        ("bodytype", BodyType),
        ("safety", SafetyRating),
        ("safetyrating", SafetyRating),
        ("autonomy", AutonomyLevel),
        ("autonomylevel", AutonomyLevel),
        ("lease", LeaseRating),
        ("leaserating", LeaseRating),
        ("depreciation", DepreciationCategory),
        ("depreciationcategory", DepreciationCategory),
        ("reliability", ReliabilityRating),
        ("reliabilityrating", ReliabilityRating),
    ])
});

impl FromStr for Field {
    type Err = CatalogError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let key: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        FIELD_NAMES
            .get(key.as_str())
            .copied()
            .ok_or_else(|| CatalogError::UnknownField(name.to_string()))
    }
}

impl Field {
    pub fn kind(self) -> FieldKind {
        match self {
            Field::Make | Field::Model | Field::Trim | Field::BodyType => FieldKind::Text,
            Field::SafetyRating
            | Field::AutonomyLevel
            | Field::LeaseRating
            | Field::DepreciationCategory
            | Field::ReliabilityRating => FieldKind::Ranked,
            _ => FieldKind::Numeric,
        }
    }

    /// Declared once per field; deltas never flip it.
    pub fn polarity(self) -> Option<Polarity> {
        use Field::*;
        match self {
            Year | Seats | CargoVolume | Legroom | GroundClearance | Towing | Mpg | MpgCity
            | MpgHighway | EvRange | ReviewScore | ResalePercent | Horsepower | Torque => {
                Some(Polarity::HigherIsBetter)
            }
            Price | Width | BodyWidth | FoldedWidth | Length | Height | InsuranceCost
            | MaintenanceCost | ZeroToSixty => Some(Polarity::LowerIsBetter),
            // More doors is neither better nor worse.
            Doors => None,
            // Ranks order the list but are compared by label, not by distance.
            Make | Model | Trim | BodyType | SafetyRating | AutonomyLevel | LeaseRating
            | DepreciationCategory | ReliabilityRating => None,
        }
    }

    pub fn is_monetary(self) -> bool {
        matches!(self, Field::Price | Field::InsuranceCost | Field::MaintenanceCost)
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Year => "Year",
            Field::Price => "Price",
            Field::Width => "Width",
            Field::BodyWidth => "Body Width",
            Field::FoldedWidth => "Folded Width",
            Field::Length => "Length",
            Field::Height => "Height",
            Field::GroundClearance => "Ground Clearance",
            Field::Towing => "Towing",
            Field::Seats => "Seats",
            Field::Doors => "Doors",
            Field::CargoVolume => "Cargo",
            Field::Legroom => "Legroom",
            Field::Mpg => "MPG",
            Field::MpgCity => "City MPG",
            Field::MpgHighway => "Highway MPG",
            Field::EvRange => "EV Range",
            Field::ReviewScore => "Review Score",
            Field::ResalePercent => "5-Year Resale",
            Field::InsuranceCost => "Insurance",
            Field::MaintenanceCost => "Maintenance",
            Field::ZeroToSixty => "0-60",
            Field::Horsepower => "Horsepower",
            Field::Torque => "Torque",
            Field::Make => "Make",
            Field::Model => "Model",
            Field::Trim => "Trim",
            Field::BodyType => "Body Type",
            Field::SafetyRating => "Safety",
            Field::AutonomyLevel => "Autonomy",
            Field::LeaseRating => "Lease",
            Field::DepreciationCategory => "Depreciation",
            Field::ReliabilityRating => "Reliability",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Number(f64),
    Text(&'a str),
    Rank(i32),
}

impl FieldValue<'_> {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Rank(r) => Some(f64::from(*r)),
            FieldValue::Text(_) => None,
        }
    }
}

/// Mirrors-extended width, else body width plus the caller's mirror buffer.
pub fn effective_width(v: &Vehicle, ctx: &Context) -> f64 {
    v.mirror_width_inches
        .unwrap_or(v.body_width_inches + ctx.mirror_buffer)
}

// Only the filter uses the folded width.
pub fn folded_width(v: &Vehicle) -> f64 {
    v.mirrors_folded_width_inches
        .unwrap_or(v.body_width_inches + FOLDED_MIRROR_ALLOWANCE)
}

/// Combined MPG, else MPG-equivalent.
pub fn effective_mpg(v: &Vehicle) -> Option<f64> {
    v.mpg_combined.or(v.mpge)
}

/// MSRP, else the top of the used-price range. `None` when neither is known;
/// the price range filter treats that as 0.
pub fn effective_price(v: &Vehicle) -> Option<f64> {
    v.msrp.or(v.used_price_high)
}

/// Resolves `field` on `v` after applying its fallback chain.
///
/// Rank fields yield `None` for an unrated vehicle; the sort engine looks up
/// the sentinel rank itself.
pub fn effective_value<'a>(v: &'a Vehicle, field: Field, ctx: &Context) -> Option<FieldValue<'a>> {
    use FieldValue::{Number, Rank, Text};

    let number = |n: Option<f64>| n.map(Number);
    match field {
        Field::Year => Some(Number(f64::from(v.year))),
        Field::Price => number(effective_price(v)),
        Field::Width => Some(Number(effective_width(v, ctx))),
        Field::BodyWidth => Some(Number(v.body_width_inches)),
        Field::FoldedWidth => Some(Number(folded_width(v))),
        Field::Length => number(v.length_inches),
        Field::Height => Some(Number(v.height_inches)),
        Field::GroundClearance => Some(Number(v.ground_clearance_inches)),
        Field::Towing => number(v.towing_capacity_lbs),
        Field::Seats => Some(Number(f64::from(v.seats))),
        Field::Doors => Some(Number(f64::from(v.doors))),
        Field::CargoVolume => number(v.cargo_volume_cu_ft),
        Field::Legroom => number(v.driver_legroom_inches),
        Field::Mpg => number(effective_mpg(v)),
        Field::MpgCity => number(v.mpg_city),
        Field::MpgHighway => number(v.mpg_highway),
        Field::EvRange => number(v.ev_range_miles),
        Field::ReviewScore => number(v.review_score),
        Field::ResalePercent => number(v.five_year_resale_percent),
        Field::InsuranceCost => number(v.annual_insurance_cost),
        Field::MaintenanceCost => number(v.annual_maintenance_cost),
        Field::ZeroToSixty => number(v.zero_to_sixty_seconds),
        Field::Horsepower => number(v.horsepower),
        Field::Torque => number(v.torque_lb_ft),
        Field::Make => Some(Text(&v.make)),
        Field::Model => Some(Text(&v.model)),
        Field::Trim => v.trim.as_deref().map(Text),
        Field::BodyType => Some(Text(v.body_type.as_str())),
        Field::SafetyRating => {
            (!v.safety_rating.is_unrated()).then(|| Rank(v.safety_rating.rank()))
        }
        Field::AutonomyLevel => {
            (!v.autonomy_level.is_unrated()).then(|| Rank(v.autonomy_level.rank()))
        }
        Field::LeaseRating => (!v.lease_rating.is_unrated()).then(|| Rank(v.lease_rating.rank())),
        Field::DepreciationCategory => {
            (!v.depreciation_category.is_unrated()).then(|| Rank(v.depreciation_category.rank()))
        }
        Field::ReliabilityRating => {
            (!v.reliability_rating.is_unrated()).then(|| Rank(v.reliability_rating.rank()))
        }
    }
}

/// Numeric effective value, if the field is numeric and present.
pub fn effective_number(v: &Vehicle, field: Field, ctx: &Context) -> Option<f64> {
    match effective_value(v, field, ctx)? {
        FieldValue::Number(n) => Some(n),
        _ => None,
    }
}

// Rank tables for the enumerated rating fields.
//
// Every rating type carries its own `Unrated` variant instead of relying on
// `Option`, so "no data" has a fixed place in the ordering of each field.
// Higher rank always means better.

use serde::{Deserialize, Deserializer, Serialize};

// IIHS-style crash rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SafetyRating {
    #[default]
    #[serde(skip)]
    Unrated,
    Pending,
    Marginal,
    Acceptable,
    Good,
    #[serde(rename = "TSP")]
    Tsp,
    #[serde(rename = "TSP+")]
    TspPlus,
}

impl SafetyRating {
    pub fn rank(self) -> i32 {
        match self {
            SafetyRating::Unrated => -1,
            SafetyRating::Pending => 0,
            SafetyRating::Marginal => 1,
            SafetyRating::Acceptable => 2,
            SafetyRating::Good => 3,
            SafetyRating::Tsp => 4,
            SafetyRating::TspPlus => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SafetyRating::Unrated => "",
            SafetyRating::Pending => "Pending",
            SafetyRating::Marginal => "Marginal",
            SafetyRating::Acceptable => "Acceptable",
            SafetyRating::Good => "Good",
            SafetyRating::Tsp => "TSP",
            SafetyRating::TspPlus => "TSP+",
        }
    }

    pub fn is_unrated(&self) -> bool {
        *self == SafetyRating::Unrated
    }
}

// Driver automation capability, SAE-style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AutonomyLevel {
    #[default]
    #[serde(skip)]
    Unrated,
    #[serde(rename = "none")]
    None,
    #[serde(rename = "L1")]
    Level1,
    #[serde(rename = "L2")]
    Level2,
    #[serde(rename = "L2+")]
    Level2Plus,
    #[serde(rename = "L3")]
    Level3,
}

impl AutonomyLevel {
    pub fn rank(self) -> i32 {
        match self {
            AutonomyLevel::Unrated => -1,
            AutonomyLevel::None => 0,
            AutonomyLevel::Level1 => 1,
            AutonomyLevel::Level2 => 2,
            AutonomyLevel::Level2Plus => 3,
            AutonomyLevel::Level3 => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AutonomyLevel::Unrated => "",
            AutonomyLevel::None => "none",
            AutonomyLevel::Level1 => "L1",
            AutonomyLevel::Level2 => "L2",
            AutonomyLevel::Level2Plus => "L2+",
            AutonomyLevel::Level3 => "L3",
        }
    }

    pub fn is_unrated(&self) -> bool {
        *self == AutonomyLevel::Unrated
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaseRating {
    #[default]
    #[serde(skip)]
    Unrated,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl LeaseRating {
    // Unrated shares the bottom rank with Poor.
    pub fn rank(self) -> i32 {
        match self {
            LeaseRating::Unrated | LeaseRating::Poor => 0,
            LeaseRating::Fair => 1,
            LeaseRating::Good => 2,
            LeaseRating::Excellent => 3,
        }
    }

    pub fn is_unrated(&self) -> bool {
        *self == LeaseRating::Unrated
    }
}

// Lower depreciation ranks higher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepreciationCategory {
    #[default]
    #[serde(skip)]
    Unrated,
    High,
    Average,
    Low,
}

impl DepreciationCategory {
    // Unrated shares the bottom rank with High.
    pub fn rank(self) -> i32 {
        match self {
            DepreciationCategory::Unrated | DepreciationCategory::High => 0,
            DepreciationCategory::Average => 1,
            DepreciationCategory::Low => 2,
        }
    }

    pub fn is_unrated(&self) -> bool {
        *self == DepreciationCategory::Unrated
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReliabilityRating {
    #[default]
    #[serde(skip)]
    Unrated,
    Poor,
    Average,
    Good,
    Excellent,
}

impl ReliabilityRating {
    // Unrated sits strictly below Poor.
    pub fn rank(self) -> i32 {
        match self {
            ReliabilityRating::Unrated => 0,
            ReliabilityRating::Poor => 1,
            ReliabilityRating::Average => 2,
            ReliabilityRating::Good => 3,
            ReliabilityRating::Excellent => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReliabilityRating::Unrated => "",
            ReliabilityRating::Poor => "poor",
            ReliabilityRating::Average => "average",
            ReliabilityRating::Good => "good",
            ReliabilityRating::Excellent => "excellent",
        }
    }

    pub fn is_unrated(&self) -> bool {
        *self == ReliabilityRating::Unrated
    }
}

/// Deserializes a missing or `null` rating as the type's default (`Unrated`).
pub(crate) fn null_as_unrated<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safety_ranks_match_table() {
        assert_eq!(SafetyRating::TspPlus.rank(), 5);
        assert_eq!(SafetyRating::Acceptable.rank(), 2);
        assert_eq!(SafetyRating::Pending.rank(), 0);
        assert_eq!(SafetyRating::Unrated.rank(), -1);
    }

    #[test]
    fn autonomy_unrated_is_below_none() {
        assert!(AutonomyLevel::Unrated.rank() < AutonomyLevel::None.rank());
    }

    #[test]
    fn lease_and_depreciation_unrated_tie_with_worst() {
        assert_eq!(LeaseRating::Unrated.rank(), LeaseRating::Poor.rank());
        assert_eq!(DepreciationCategory::Unrated.rank(), DepreciationCategory::High.rank());
    }

    #[test]
    fn reliability_unrated_is_strictly_below_poor() {
        assert!(ReliabilityRating::Unrated.rank() < ReliabilityRating::Poor.rank());
    }

    #[test]
    fn ratings_deserialize_from_display_strings() {
        let s: SafetyRating = serde_json::from_str("\"TSP+\"").unwrap();
        assert_eq!(s, SafetyRating::TspPlus);
        let a: AutonomyLevel = serde_json::from_str("\"L2+\"").unwrap();
        assert_eq!(a, AutonomyLevel::Level2Plus);
        let r: ReliabilityRating = serde_json::from_str("\"excellent\"").unwrap();
        assert_eq!(r, ReliabilityRating::Excellent);
    }
}

//! Data models for components, user profiles and recommendations

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "CPU")]
    Cpu,
    #[serde(rename = "GPU")]
    Gpu,
    #[serde(rename = "RAM")]
    Ram,
    Storage,
    Motherboard,
    #[serde(rename = "PSU")]
    Psu,
    Case,
    Cooler,
    Monitor,
    Keyboard,
    Mouse,
}

impl Category {
    /// Categories every build attempts, in purchase priority order.
    pub const CORE: [Category; 8] = [
        Category::Cpu,
        Category::Gpu,
        Category::Ram,
        Category::Storage,
        Category::Motherboard,
        Category::Psu,
        Category::Case,
        Category::Cooler,
    ];

    pub const ALL: [Category; 11] = [
        Category::Cpu,
        Category::Gpu,
        Category::Ram,
        Category::Storage,
        Category::Motherboard,
        Category::Psu,
        Category::Case,
        Category::Cooler,
        Category::Monitor,
        Category::Keyboard,
        Category::Mouse,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Cpu => "CPU",
            Category::Gpu => "GPU",
            Category::Ram => "RAM",
            Category::Storage => "Storage",
            Category::Motherboard => "Motherboard",
            Category::Psu => "PSU",
            Category::Case => "Case",
            Category::Cooler => "Cooler",
            Category::Monitor => "Monitor",
            Category::Keyboard => "Keyboard",
            Category::Mouse => "Mouse",
        }
    }

    pub fn is_peripheral(self) -> bool {
        matches!(self, Category::Monitor | Category::Keyboard | Category::Mouse)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AdvisorError::UnknownCategory(s.to_string()))
    }
}

/// A purchasable part. Prices are whole COP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub price: u64,
    pub performance: u32,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
}

impl Component {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Resolution {
    #[default]
    #[serde(rename = "1080p")]
    Fhd,
    #[serde(rename = "1440p")]
    Qhd,
    #[serde(rename = "4k")]
    Uhd,
}

impl Resolution {
    pub fn as_str(self) -> &'static str {
        match self {
            Resolution::Fhd => "1080p",
            Resolution::Qhd => "1440p",
            Resolution::Uhd => "4k",
        }
    }

    /// Multiplier applied to the target score for the extra pixels pushed.
    pub fn factor(self) -> f64 {
        match self {
            Resolution::Fhd => 1.0,
            Resolution::Qhd => 1.35,
            Resolution::Uhd => 1.9,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1080p" => Ok(Resolution::Fhd),
            "1440p" => Ok(Resolution::Qhd),
            "4k" => Ok(Resolution::Uhd),
            other => Err(AdvisorError::InvalidProfile(format!(
                "unrecognized resolution '{other}' (expected 1080p, 1440p or 4k)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cooling {
    #[default]
    Air,
    Liquid,
}

impl Cooling {
    pub fn as_str(self) -> &'static str {
        match self {
            Cooling::Air => "air",
            Cooling::Liquid => "liquid",
        }
    }
}

impl FromStr for Cooling {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "air" => Ok(Cooling::Air),
            "liquid" => Ok(Cooling::Liquid),
            other => Err(AdvisorError::InvalidProfile(format!(
                "unrecognized cooling preference '{other}' (expected air or liquid)"
            ))),
        }
    }
}

/// Answers collected by the front end before a recommendation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub use_cases: BTreeSet<String>,
    pub selected_apps: BTreeSet<String>,
    pub selected_games: BTreeSet<String>,
    pub budget: u64,
    pub resolution: Resolution,
    pub wants_peripherals: bool,
    pub cooling: Cooling,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            use_cases: BTreeSet::new(),
            selected_apps: BTreeSet::new(),
            selected_games: BTreeSet::new(),
            budget: 2_000_000,
            resolution: Resolution::default(),
            wants_peripherals: false,
            cooling: Cooling::default(),
        }
    }
}

impl UserProfile {
    pub fn has_use_case(&self, use_case: &str) -> bool {
        self.use_cases.contains(use_case)
    }

    /// Reject profiles the engine cannot do meaningful arithmetic on.
    pub fn validate(&self) -> Result<(), AdvisorError> {
        if self.budget == 0 {
            return Err(AdvisorError::InvalidProfile(
                "budget must be a positive amount".to_string(),
            ));
        }
        if self.use_cases.is_empty() {
            return Err(AdvisorError::InvalidProfile(
                "at least one use case must be selected".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierLabel {
    Economy,
    Balanced,
    Performance,
}

impl TierLabel {
    pub fn title(self) -> &'static str {
        match self {
            TierLabel::Economy => "Economy",
            TierLabel::Balanced => "Balanced",
            TierLabel::Performance => "Performance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetTier {
    pub label: TierLabel,
    pub ceiling: u64,
}

/// Outcome of one selection run against a single ceiling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub chosen_components: Vec<Component>,
    pub total_spent: u64,
    pub remaining_funds: u64,
}

impl SelectionResult {
    pub fn component(&self, category: Category) -> Option<&Component> {
        self.chosen_components.iter().find(|c| c.category == category)
    }

    pub fn is_empty(&self) -> bool {
        self.chosen_components.is_empty()
    }

    /// Core categories that had no affordable candidate.
    pub fn missing_categories(&self) -> Vec<Category> {
        Category::CORE
            .into_iter()
            .filter(|&cat| self.component(cat).is_none())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub tier: BudgetTier,
    pub selection: SelectionResult,
    pub estimated_performance: u64,
    pub meets_target: bool,
}

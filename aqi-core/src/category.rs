use crate::error::{AqiError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Ordinal air quality category, least to most severe.
///
/// The serialized form is the label name used by the trained model's label
/// encoder (e.g. `"Unhealthy for Sensitive"`).
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum CategoryLabel {
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Moderate")]
    Moderate,
    #[serde(rename = "Unhealthy for Sensitive")]
    UnhealthyForSensitive,
    #[serde(rename = "Unhealthy")]
    Unhealthy,
    #[serde(rename = "Very Unhealthy")]
    VeryUnhealthy,
}

/// One row of the category table.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct CategoryInfo {
    pub label: CategoryLabel,
    /// Label name as emitted by the label encoder
    pub name: &'static str,
    /// PM2.5 concentration (µg/m³) fed back into the lag state when a
    /// forecast day is predicted as this category
    pub representative_pm: f64,
    /// Ordinal risk 1-5, monotonic with severity
    pub risk_level: u8,
}

/// The single source of truth for both category mappings, indexed by
/// `CategoryLabel as usize`.
pub const CATEGORY_TABLE: [CategoryInfo; 5] = [
    CategoryInfo {
        label: CategoryLabel::Good,
        name: "Good",
        representative_pm: 40.0,
        risk_level: 1,
    },
    CategoryInfo {
        label: CategoryLabel::Moderate,
        name: "Moderate",
        representative_pm: 80.0,
        risk_level: 2,
    },
    CategoryInfo {
        label: CategoryLabel::UnhealthyForSensitive,
        name: "Unhealthy for Sensitive",
        representative_pm: 130.0,
        risk_level: 3,
    },
    CategoryInfo {
        label: CategoryLabel::Unhealthy,
        name: "Unhealthy",
        representative_pm: 180.0,
        risk_level: 4,
    },
    CategoryInfo {
        label: CategoryLabel::VeryUnhealthy,
        name: "Very Unhealthy",
        representative_pm: 250.0,
        risk_level: 5,
    },
];

/// Severity of a health advisory, used to colour alerts.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum AlertLevel {
    Success,
    Warning,
    Danger,
}

/// Health advisory shown for a forecast day.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub struct Advisory {
    pub level: AlertLevel,
    pub message: &'static str,
}

impl CategoryLabel {
    /// All labels in ascending severity.
    pub const ALL: [CategoryLabel; 5] = [
        CategoryLabel::Good,
        CategoryLabel::Moderate,
        CategoryLabel::UnhealthyForSensitive,
        CategoryLabel::Unhealthy,
        CategoryLabel::VeryUnhealthy,
    ];

    pub fn info(self) -> &'static CategoryInfo {
        &CATEGORY_TABLE[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn representative_pm(self) -> f64 {
        self.info().representative_pm
    }

    pub fn risk_level(self) -> u8 {
        self.info().risk_level
    }

    /// Look up a label by the name the label encoder emits.
    ///
    /// A name missing from [`CATEGORY_TABLE`] means the model was trained on
    /// a different label set; this is reported as a configuration error.
    pub fn from_name(name: &str) -> Result<Self> {
        let needle = name.trim();
        CATEGORY_TABLE
            .iter()
            .find(|c| c.name == needle)
            .map(|c| c.label)
            .ok_or_else(|| AqiError::UnknownCategoryLabel(needle.to_string()))
    }

    pub fn advisory(self) -> Advisory {
        match self {
            CategoryLabel::Good => Advisory {
                level: AlertLevel::Success,
                message: "Safe for outdoor activities",
            },
            CategoryLabel::Moderate => Advisory {
                level: AlertLevel::Warning,
                message: "Sensitive groups should be cautious",
            },
            _ => Advisory {
                level: AlertLevel::Danger,
                message: "Avoid outdoor exposure",
            },
        }
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CategoryLabel {
    type Err = AqiError;

    fn from_str(s: &str) -> Result<Self> {
        CategoryLabel::from_name(s)
    }
}

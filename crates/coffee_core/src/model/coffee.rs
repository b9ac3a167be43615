//! Coffee catalog domain model.
//!
//! # Responsibility
//! - Define the canonical coffee record and its id-less draft shape.
//! - Define the closed value sets for roast degree and physical state.
//! - Re-check typed invariants before any write reaches storage.
//!
//! # Invariants
//! - `id` is assigned by storage and never mutated afterwards.
//! - `sort_name` is never empty or whitespace-only.
//! - `price` is finite and strictly positive.
//! - `package_volume` is either absent or a positive integer, never zero.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned row identifier.
pub type CoffeeId = i64;

/// Roast level, selected from a closed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoastDegree {
    Light,
    Medium,
    Dark,
}

impl RoastDegree {
    /// Every selectable roast level, in display order.
    pub const ALL: [RoastDegree; 3] = [Self::Light, Self::Medium, Self::Dark];

    /// Stable text used for storage and serialization.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Dark => "dark",
        }
    }

    /// Parses stored or user-selected text. Case-insensitive, trimmed.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "medium" => Some(Self::Medium),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

impl Display for RoastDegree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical form the coffee is sold in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoffeeState {
    /// Whole beans.
    Bean,
    Ground,
}

impl CoffeeState {
    /// Every selectable state, in display order.
    pub const ALL: [CoffeeState; 2] = [Self::Bean, Self::Ground];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bean => "bean",
            Self::Ground => "ground",
        }
    }

    /// Parses stored or user-selected text. Case-insensitive, trimmed.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bean" => Some(Self::Bean),
            "ground" => Some(Self::Ground),
            _ => None,
        }
    }
}

impl Display for CoffeeState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Required form fields that can be reported as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    SortName,
    Price,
}

impl FormField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SortName => "sort_name",
            Self::Price => "price",
        }
    }
}

/// Validation failure raised before anything reaches storage.
///
/// Only the first violated rule is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is empty (or whitespace-only).
    MissingRequiredField { field: FormField },
    /// Price text is not a number, not finite, or not greater than zero.
    InvalidPrice { value: String },
    /// Volume text is not a positive whole number.
    InvalidVolume { value: String },
}

impl ValidationError {
    /// Stable snake_case code, safe to log.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingRequiredField { .. } => "missing_required_field",
            Self::InvalidPrice { .. } => "invalid_price",
            Self::InvalidVolume { .. } => "invalid_volume",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequiredField { field } => {
                write!(f, "missing required field `{}`", field.as_str())
            }
            Self::InvalidPrice { value } => {
                write!(f, "price `{value}` must be a number greater than zero")
            }
            Self::InvalidVolume { value } => {
                write!(f, "package_volume `{value}` must be a positive integer")
            }
        }
    }
}

impl Error for ValidationError {}

/// Every mutable field of a coffee record, without the storage id.
///
/// This is the payload for both insert and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoffeeDraft {
    pub sort_name: String,
    pub roast_degree: RoastDegree,
    pub state: CoffeeState,
    /// Free-form tasting notes. May be empty.
    pub flavor_description: String,
    pub price: f64,
    /// Grams per package. `None` means "not specified", never zero.
    pub package_volume: Option<u32>,
}

impl CoffeeDraft {
    /// Checks typed invariants in the same order the form validator does.
    ///
    /// # Errors
    /// - `MissingRequiredField` when `sort_name` is blank.
    /// - `InvalidPrice` when `price` is not finite or not > 0.
    /// - `InvalidVolume` when `package_volume == Some(0)`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.sort_name.trim().is_empty() {
            return Err(ValidationError::MissingRequiredField {
                field: FormField::SortName,
            });
        }

        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(ValidationError::InvalidPrice {
                value: self.price.to_string(),
            });
        }

        if self.package_volume == Some(0) {
            return Err(ValidationError::InvalidVolume {
                value: "0".to_string(),
            });
        }

        Ok(())
    }
}

/// Canonical persisted coffee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoffeeRecord {
    pub id: CoffeeId,
    pub sort_name: String,
    pub roast_degree: RoastDegree,
    pub state: CoffeeState,
    pub flavor_description: String,
    pub price: f64,
    pub package_volume: Option<u32>,
}

impl CoffeeRecord {
    /// Attaches a storage id to a draft.
    pub fn from_draft(id: CoffeeId, draft: CoffeeDraft) -> Self {
        Self {
            id,
            sort_name: draft.sort_name,
            roast_degree: draft.roast_degree,
            state: draft.state,
            flavor_description: draft.flavor_description,
            price: draft.price,
            package_volume: draft.package_volume,
        }
    }

    /// Returns the mutable fields, e.g. to prefill an edit form.
    pub fn to_draft(&self) -> CoffeeDraft {
        CoffeeDraft {
            sort_name: self.sort_name.clone(),
            roast_degree: self.roast_degree,
            state: self.state,
            flavor_description: self.flavor_description.clone(),
            price: self.price,
            package_volume: self.package_volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CoffeeDraft, CoffeeState, FormField, RoastDegree, ValidationError};

    fn draft() -> CoffeeDraft {
        CoffeeDraft {
            sort_name: "Arabica".to_string(),
            roast_degree: RoastDegree::Medium,
            state: CoffeeState::Bean,
            flavor_description: "nutty".to_string(),
            price: 450.0,
            package_volume: Some(250),
        }
    }

    #[test]
    fn enum_parse_is_case_insensitive_and_trimmed() {
        assert_eq!(RoastDegree::parse(" DARK "), Some(RoastDegree::Dark));
        assert_eq!(CoffeeState::parse("Ground"), Some(CoffeeState::Ground));
        assert_eq!(RoastDegree::parse("espresso"), None);
    }

    #[test]
    fn enum_text_roundtrips_for_every_value() {
        for degree in RoastDegree::ALL {
            assert_eq!(RoastDegree::parse(degree.as_str()), Some(degree));
        }
        for state in CoffeeState::ALL {
            assert_eq!(CoffeeState::parse(&state.to_string()), Some(state));
        }
    }

    #[test]
    fn validate_checks_name_before_price() {
        let mut invalid = draft();
        invalid.sort_name = "  ".to_string();
        invalid.price = -1.0;
        assert_eq!(
            invalid.validate(),
            Err(ValidationError::MissingRequiredField {
                field: FormField::SortName
            })
        );
    }

    #[test]
    fn validate_rejects_non_finite_price_and_zero_volume() {
        let mut nan_price = draft();
        nan_price.price = f64::NAN;
        assert!(matches!(
            nan_price.validate(),
            Err(ValidationError::InvalidPrice { .. })
        ));

        let mut zero_volume = draft();
        zero_volume.package_volume = Some(0);
        assert!(matches!(
            zero_volume.validate(),
            Err(ValidationError::InvalidVolume { .. })
        ));

        assert!(draft().validate().is_ok());
    }
}

//! Coffee form validation.
//!
//! # Responsibility
//! - Check raw add/edit form values before they are persisted.
//! - Normalize text fields and resolve optional numeric fields.
//!
//! # Invariants
//! - Rules are checked in a fixed order: sort name, price presence,
//!   price value, package volume. The first violation wins.
//! - Empty volume text resolves to `None`, never to zero.

use crate::model::coffee::{CoffeeDraft, CoffeeState, FormField, RoastDegree, ValidationError};
use serde::{Deserialize, Serialize};

/// Raw add/edit form values as collected from a front-end.
///
/// Roast degree and state come from closed selection lists and are already
/// typed; the remaining fields are free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoffeeForm {
    pub sort_name: String,
    pub roast_degree: RoastDegree,
    pub state: CoffeeState,
    pub flavor_description: String,
    pub price: String,
    pub package_volume: String,
}

/// Validates raw form values and returns a draft ready for insert/update.
///
/// # Errors
/// - `MissingRequiredField { SortName }` when `sort_name` is blank.
/// - `MissingRequiredField { Price }` when `price` is blank.
/// - `InvalidPrice` when `price` does not parse to a finite number > 0.
/// - `InvalidVolume` when non-empty `package_volume` is not an integer > 0.
pub fn validate_form(form: &CoffeeForm) -> Result<CoffeeDraft, ValidationError> {
    let sort_name = form.sort_name.trim();
    if sort_name.is_empty() {
        return Err(ValidationError::MissingRequiredField {
            field: FormField::SortName,
        });
    }

    let price_text = form.price.trim();
    if price_text.is_empty() {
        return Err(ValidationError::MissingRequiredField {
            field: FormField::Price,
        });
    }
    let price = parse_price(price_text)?;
    let package_volume = parse_package_volume(form.package_volume.trim())?;

    Ok(CoffeeDraft {
        sort_name: sort_name.to_string(),
        roast_degree: form.roast_degree,
        state: form.state,
        flavor_description: form.flavor_description.trim().to_string(),
        price,
        package_volume,
    })
}

/// Resolves selector text into a roast degree.
///
/// Front-ends that hand over the selection as text use this instead of
/// defaulting silently.
pub fn parse_roast_degree(value: &str) -> Result<RoastDegree, String> {
    RoastDegree::parse(value).ok_or_else(|| {
        format!(
            "unknown roast degree `{}`; expected {}",
            value.trim(),
            join_options(RoastDegree::ALL.iter().map(|degree| degree.as_str()))
        )
    })
}

/// Resolves selector text into a coffee state.
pub fn parse_coffee_state(value: &str) -> Result<CoffeeState, String> {
    CoffeeState::parse(value).ok_or_else(|| {
        format!(
            "unknown coffee state `{}`; expected {}",
            value.trim(),
            join_options(CoffeeState::ALL.iter().map(|state| state.as_str()))
        )
    })
}

fn parse_price(text: &str) -> Result<f64, ValidationError> {
    let invalid = || ValidationError::InvalidPrice {
        value: text.to_string(),
    };

    // A single comma is always the decimal mark (`450,5`), so `1,000` is 1.0.
    // Commas are never read as thousands separators.
    let normalized = if text.matches(',').count() == 1 && !text.contains('.') {
        text.replace(',', ".")
    } else {
        text.to_string()
    };

    let price = normalized.parse::<f64>().map_err(|_| invalid())?;
    if !price.is_finite() || price <= 0.0 {
        return Err(invalid());
    }
    Ok(price)
}

fn parse_package_volume(text: &str) -> Result<Option<u32>, ValidationError> {
    if text.is_empty() {
        return Ok(None);
    }

    match text.parse::<u32>() {
        Ok(volume) if volume > 0 => Ok(Some(volume)),
        _ => Err(ValidationError::InvalidVolume {
            value: text.to_string(),
        }),
    }
}

fn join_options<'a>(options: impl Iterator<Item = &'a str>) -> String {
    options.collect::<Vec<_>>().join("|")
}

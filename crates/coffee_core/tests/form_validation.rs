use coffee_core::{
    validate_form, CoffeeForm, CoffeeState, FormField, RoastDegree, ValidationError,
};

fn form(sort_name: &str, price: &str, package_volume: &str) -> CoffeeForm {
    CoffeeForm {
        sort_name: sort_name.to_string(),
        roast_degree: RoastDegree::Medium,
        state: CoffeeState::Bean,
        flavor_description: String::new(),
        price: price.to_string(),
        package_volume: package_volume.to_string(),
    }
}

fn missing(field: FormField) -> ValidationError {
    ValidationError::MissingRequiredField { field }
}

#[test]
fn valid_form_produces_normalized_draft() {
    let mut input = form("  Arabica ", " 450 ", " 250 ");
    input.flavor_description = "  nutty\n".to_string();
    input.roast_degree = RoastDegree::Light;
    input.state = CoffeeState::Ground;

    let draft = validate_form(&input).unwrap();
    assert_eq!(draft.sort_name, "Arabica");
    assert_eq!(draft.flavor_description, "nutty");
    assert_eq!(draft.price, 450.0);
    assert_eq!(draft.package_volume, Some(250));
    assert_eq!(draft.roast_degree, RoastDegree::Light);
    assert_eq!(draft.state, CoffeeState::Ground);
}

#[test]
fn empty_volume_resolves_to_absent() {
    let draft = validate_form(&form("Arabica", "10.5", "   ")).unwrap();
    assert_eq!(draft.package_volume, None);
    assert_eq!(draft.price, 10.5);
}

#[test]
fn blank_sort_name_is_missing_required_field() {
    assert_eq!(
        validate_form(&form("", "100", "")).unwrap_err(),
        missing(FormField::SortName)
    );
    assert_eq!(
        validate_form(&form(" \t ", "100", "")).unwrap_err(),
        missing(FormField::SortName)
    );
}

#[test]
fn missing_sort_name_wins_over_price_and_volume_errors() {
    assert_eq!(
        validate_form(&form("", "-5", "0")).unwrap_err(),
        missing(FormField::SortName)
    );
    assert_eq!(
        validate_form(&form("", "", "abc")).unwrap_err(),
        missing(FormField::SortName)
    );
}

#[test]
fn empty_price_is_missing_required_field_before_volume() {
    assert_eq!(
        validate_form(&form("X", "", "0")).unwrap_err(),
        missing(FormField::Price)
    );
    assert_eq!(
        validate_form(&form("X", "   ", "")).unwrap_err(),
        missing(FormField::Price)
    );
}

#[test]
fn non_positive_or_unparseable_price_is_invalid_price() {
    for price in ["-5", "0", "0.0", "abc", "12a", "1e999"] {
        let err = validate_form(&form("X", price, "")).unwrap_err();
        assert!(
            matches!(err, ValidationError::InvalidPrice { .. }),
            "price `{price}` gave {err:?}"
        );
    }
}

#[test]
fn invalid_price_wins_over_invalid_volume() {
    let err = validate_form(&form("X", "-1", "0")).unwrap_err();
    assert_eq!(
        err,
        ValidationError::InvalidPrice {
            value: "-1".to_string()
        }
    );
}

#[test]
fn non_positive_or_non_integer_volume_is_invalid_volume() {
    for volume in ["0", "-250", "2.5", "abc", "250g"] {
        let err = validate_form(&form("X", "10", volume)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidVolume {
                value: volume.to_string()
            }
        );
    }
}

#[test]
fn validation_errors_have_stable_codes() {
    assert_eq!(
        validate_form(&form("", "1", "")).unwrap_err().code(),
        "missing_required_field"
    );
    assert_eq!(
        validate_form(&form("X", "-5", "")).unwrap_err().code(),
        "invalid_price"
    );
    assert_eq!(
        validate_form(&form("X", "10", "0")).unwrap_err().code(),
        "invalid_volume"
    );
}

#[test]
fn comma_price_is_decimal_even_when_it_looks_like_thousands() {
    let draft = validate_form(&form("Kenya", "1,000", "")).unwrap();
    assert_eq!(draft.price, 1.0);
}

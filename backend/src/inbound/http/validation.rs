//! Request-body validation for the potential endpoint.
//!
//! Bounds arrive as loosely typed JSON; each one must be a JSON number or a
//! string that parses as one. Failures become `invalid_request` errors with a
//! machine-readable `details` block.

use serde_json::{Value, json};

use crate::domain::{BoundingBox, Error};

/// Message returned when the body or its `coords` object is absent.
pub(crate) const MISSING_COORDS_MESSAGE: &str = "No data or 'coords' key provided";
/// Message returned when a bound is missing or not numeric.
pub(crate) const INVALID_COORDS_MESSAGE: &str = "Invalid coordinate data format. Expected numerical values for 'south', 'west', 'north', 'east'.";

const COORDS_FIELD: &str = "coords";
const BOUND_FIELDS: [&str; 4] = ["south", "west", "north", "east"];

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidNumber,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidNumber => "invalid_number",
        }
    }
}

fn missing_coords_error() -> Error {
    Error::invalid_request(MISSING_COORDS_MESSAGE).with_details(json!({
        "field": COORDS_FIELD,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

fn invalid_bound_error(field: &str, code: ErrorCode) -> Error {
    Error::invalid_request(INVALID_COORDS_MESSAGE).with_details(json!({
        "field": format!("{COORDS_FIELD}.{field}"),
        "code": code.as_str(),
    }))
}

fn parse_bound(coords: &Value, field: &'static str) -> Result<f64, Error> {
    let raw = coords
        .get(field)
        .ok_or_else(|| invalid_bound_error(field, ErrorCode::MissingField))?;
    let parsed = match raw {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|value| value.is_finite())
        .ok_or_else(|| invalid_bound_error(field, ErrorCode::InvalidNumber))
}

/// Extract a [`BoundingBox`] from a `{"coords": {...}}` request body.
///
/// `None` covers a missing or undecodable body.
pub(crate) fn parse_bounds(payload: Option<&Value>) -> Result<BoundingBox, Error> {
    let coords = payload
        .and_then(|body| body.get(COORDS_FIELD))
        .filter(|coords| !coords.is_null())
        .ok_or_else(missing_coords_error)?;

    let [south, west, north, east] = BOUND_FIELDS;
    let bounds = BoundingBox::try_new(
        parse_bound(coords, south)?,
        parse_bound(coords, west)?,
        parse_bound(coords, north)?,
        parse_bound(coords, east)?,
    );
    bounds.map_err(|err| {
        Error::invalid_request(INVALID_COORDS_MESSAGE)
            .with_details(json!({ "reason": err.to_string() }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::numbers(json!({"coords": {"south": 40.99, "west": 29.0, "north": 41.01, "east": 29.02}}))]
    #[case::strings(json!({"coords": {"south": "40.99", "west": " 29.0", "north": "41.01", "east": "29.02"}}))]
    #[case::extra_keys(json!({"coords": {"south": 40.99, "west": 29, "north": 41.01, "east": 29.02, "zoom": 17}}))]
    fn accepts_numeric_bounds(#[case] body: Value) {
        let bounds = parse_bounds(Some(&body)).expect("bounds should parse");
        assert_eq!(bounds.south(), 40.99);
        assert_eq!(bounds.west(), 29.0);
        assert_eq!(bounds.north(), 41.01);
        assert_eq!(bounds.east(), 29.02);
    }

    #[rstest]
    #[case::no_body(None)]
    #[case::empty_object(Some(json!({})))]
    #[case::null_coords(Some(json!({"coords": null})))]
    #[case::array_body(Some(json!([1, 2, 3])))]
    fn missing_coords_use_missing_message(#[case] body: Option<Value>) {
        let error = parse_bounds(body.as_ref()).expect_err("must fail");
        assert_eq!(error.message(), MISSING_COORDS_MESSAGE);
        assert_eq!(error.details().and_then(|d| d.get("field")), Some(&json!("coords")));
    }

    #[rstest]
    #[case::missing_east(json!({"south": 1, "west": 2, "north": 3}), "coords.east", "missing_field")]
    #[case::word(json!({"south": "abc", "west": 2, "north": 3, "east": 4}), "coords.south", "invalid_number")]
    #[case::boolean(json!({"south": 1, "west": true, "north": 3, "east": 4}), "coords.west", "invalid_number")]
    #[case::null_bound(json!({"south": 1, "west": 2, "north": null, "east": 4}), "coords.north", "invalid_number")]
    #[case::infinite_string(json!({"south": 1, "west": 2, "north": 3, "east": "inf"}), "coords.east", "invalid_number")]
    #[case::coords_not_object(json!("40,29,41,29"), "coords.south", "missing_field")]
    fn invalid_bounds_use_format_message(
        #[case] coords: Value,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let body = json!({ "coords": coords });
        let error = parse_bounds(Some(&body)).expect_err("must fail");

        assert_eq!(error.message(), INVALID_COORDS_MESSAGE);
        let details = error.details().expect("details present");
        assert_eq!(details["field"], field);
        assert_eq!(details["code"], code);
    }
}

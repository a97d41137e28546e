//! Partial deep matching of JSON documents.
//!
//! Every key of an expected object must be present in the actual object and
//! match recursively; extra actual keys are ignored. Arrays match
//! element-wise and must have the same length. Numbers compare by value, so
//! `1` matches `1.0`.

use std::fmt;

use serde_json::Value;

/// First point where the actual document diverges from the expected one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonMismatch {
    /// Location of the divergence, e.g. `$.data.price`.
    pub path: String,
    /// What was expected there.
    pub expected: String,
    /// What was found, `None` if the key is absent.
    pub actual: Option<String>,
}

impl fmt::Display for JsonMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.actual {
            Some(actual) => write!(
                f,
                "JSON mismatch at {}: expected {}, got {}",
                self.path, self.expected, actual
            ),
            None => write!(f, "JSON mismatch at {}: expected {}, key is missing", self.path, self.expected),
        }
    }
}

/// Checks that `actual` contains `expected`.
///
/// # Errors
///
/// Returns the first mismatch found, depth first, in key order.
pub fn match_json(expected: &Value, actual: &Value) -> Result<(), JsonMismatch> {
    match_at("$", expected, actual)
}

fn match_at(path: &str, expected: &Value, actual: &Value) -> Result<(), JsonMismatch> {
    match (expected, actual) {
        (Value::Object(want), Value::Object(got)) => {
            for (key, want_value) in want {
                let child = format!("{path}.{key}");
                match got.get(key) {
                    Some(got_value) => match_at(&child, want_value, got_value)?,
                    None => {
                        return Err(JsonMismatch {
                            path: child,
                            expected: want_value.to_string(),
                            actual: None,
                        });
                    }
                }
            }
            Ok(())
        }
        (Value::Array(want), Value::Array(got)) => {
            if want.len() != got.len() {
                return Err(mismatch(
                    path,
                    format!("array of length {}", want.len()),
                    format!("array of length {}", got.len()),
                ));
            }
            want.iter()
                .zip(got)
                .enumerate()
                .try_for_each(|(i, (w, g))| match_at(&format!("{path}[{i}]"), w, g))
        }
        (Value::Number(want), Value::Number(got)) => {
            let equal = match (want.as_f64(), got.as_f64()) {
                (Some(a), Some(b)) => (a - b).abs() <= f64::EPSILON * a.abs().max(b.abs()).max(1.0),
                _ => want == got,
            };
            if equal {
                Ok(())
            } else {
                Err(mismatch(path, want.to_string(), got.to_string()))
            }
        }
        (want, got) if want == got => Ok(()),
        (want, got) => Err(mismatch(path, want.to_string(), got.to_string())),
    }
}

fn mismatch(path: &str, expected: String, actual: String) -> JsonMismatch {
    JsonMismatch {
        path: path.to_string(),
        expected,
        actual: Some(actual),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_subset_matches() {
        let actual = json!({
            "id": "1",
            "name": "Google Pixel 6 Pro",
            "data": {"color": "Cloudy White", "capacity": "128 GB"}
        });
        assert_eq!(
            match_json(&json!({"id": "1", "name": "Google Pixel 6 Pro"}), &actual),
            Ok(())
        );
    }

    #[test]
    fn test_nested_value_mismatch() {
        let actual = json!({"data": {"year": 2024, "price": 2099.99}});
        let err = match_json(&json!({"data": {"price": 2199.99}}), &actual).unwrap_err();
        assert_eq!(err.path, "$.data.price");
        assert_eq!(
            err.to_string(),
            "JSON mismatch at $.data.price: expected 2199.99, got 2099.99"
        );
    }

    #[test]
    fn test_missing_key() {
        let err = match_json(&json!({"message": "x"}), &json!({"error": "y"})).unwrap_err();
        assert_eq!(err.actual, None);
        assert_eq!(
            err.to_string(),
            "JSON mismatch at $.message: expected \"x\", key is missing"
        );
    }

    #[test]
    fn test_numbers_compare_by_value() {
        assert_eq!(match_json(&json!({"n": 1}), &json!({"n": 1.0})), Ok(()));
        assert!(match_json(&json!({"n": 1}), &json!({"n": "1"})).is_err());
    }

    #[test]
    fn test_arrays_are_elementwise() {
        assert_eq!(match_json(&json!([{"id": "1"}]), &json!([{"id": "1", "x": 0}])), Ok(()));
        let err = match_json(&json!([1, 2]), &json!([1])).unwrap_err();
        assert_eq!(err.path, "$");
        let err = match_json(&json!([1, 2]), &json!([1, 3])).unwrap_err();
        assert_eq!(err.path, "$[1]");
    }

    #[test]
    fn test_type_mismatch() {
        let err = match_json(&json!({"data": {}}), &json!({"data": null})).unwrap_err();
        assert_eq!(err.path, "$.data");
    }
}

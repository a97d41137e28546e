//! Template resolution against the run state.

use restcheck_domain::request::{RequestBody, RequestSpec};
use restcheck_domain::{Assertion, DomainResult, RunState};
use serde_json::Value;

use super::parser::parse_variables;

/// Replaces every `{{name}}` in `template` with its captured value.
///
/// # Errors
///
/// Returns [`restcheck_domain::DomainError::UndefinedVariable`] for the
/// first reference that was never captured.
pub fn resolve_str(template: &str, state: &RunState) -> DomainResult<String> {
    let references = parse_variables(template);
    if references.is_empty() {
        return Ok(template.to_string());
    }

    let mut resolved = String::with_capacity(template.len());
    let mut last = 0;
    for reference in references {
        resolved.push_str(&template[last..reference.span.start]);
        resolved.push_str(state.require(&reference.name)?);
        last = reference.span.end;
    }
    resolved.push_str(&template[last..]);

    Ok(resolved)
}

/// Resolves templates inside every string leaf of a JSON document.
///
/// Object keys are left alone.
///
/// # Errors
///
/// Fails on the first undefined variable.
pub fn resolve_json(value: &Value, state: &RunState) -> DomainResult<Value> {
    Ok(match value {
        Value::String(s) => Value::String(resolve_str(s, state)?),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| resolve_json(item, state))
                .collect::<DomainResult<_>>()?,
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| Ok((k.clone(), resolve_json(v, state)?)))
                .collect::<DomainResult<_>>()?,
        ),
        other => other.clone(),
    })
}

/// Resolves the URL, header values and body of a request.
///
/// # Errors
///
/// Fails on the first undefined variable.
pub fn resolve_request(request: &RequestSpec, state: &RunState) -> DomainResult<RequestSpec> {
    let mut resolved = request.clone();
    resolved.url = resolve_str(&request.url, state)?;
    resolved.headers = request
        .headers
        .iter()
        .map(|h| {
            let mut header = h.clone();
            header.value = resolve_str(&h.value, state)?;
            Ok(header)
        })
        .collect::<DomainResult<_>>()?;
    if let RequestBody::Json(body) = &request.body {
        resolved.body = RequestBody::Json(resolve_json(body, state)?);
    }
    Ok(resolved)
}

/// Resolves the expected values of JSON and header assertions.
///
/// # Errors
///
/// Fails on the first undefined variable.
pub fn resolve_assertions(
    assertions: &[Assertion],
    state: &RunState,
) -> DomainResult<Vec<Assertion>> {
    assertions
        .iter()
        .map(|assertion| {
            Ok(match assertion {
                Assertion::JsonMatch { expected } => Assertion::JsonMatch {
                    expected: resolve_json(expected, state)?,
                },
                Assertion::JsonPath {
                    path,
                    expected: Some(expected),
                } => Assertion::JsonPath {
                    path: path.clone(),
                    expected: Some(resolve_json(expected, state)?),
                },
                Assertion::HeaderEquals { name, value } => Assertion::HeaderEquals {
                    name: name.clone(),
                    value: resolve_str(value, state)?,
                },
                other => other.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use restcheck_domain::DomainError;
    use serde_json::json;

    fn state_with_id() -> RunState {
        let mut state = RunState::new();
        state.capture("object_id", "ff808181").unwrap();
        state
    }

    #[test]
    fn test_resolve_str() {
        let state = state_with_id();
        assert_eq!(
            resolve_str("https://api.restful-api.dev/objects/{{object_id}}", &state).unwrap(),
            "https://api.restful-api.dev/objects/ff808181"
        );
        assert_eq!(resolve_str("no refs", &state).unwrap(), "no refs");
    }

    #[test]
    fn test_undefined_variable_fails() {
        let state = RunState::new();
        assert_eq!(
            resolve_str("/objects/{{object_id}}", &state),
            Err(DomainError::UndefinedVariable("object_id".to_string()))
        );
    }

    #[test]
    fn test_resolve_json_leaves() {
        let state = state_with_id();
        let template = json!({
            "message": "Object with id = {{object_id}} has been deleted.",
            "nested": [{"id": "{{object_id}}"}, 3]
        });
        assert_eq!(
            resolve_json(&template, &state).unwrap(),
            json!({
                "message": "Object with id = ff808181 has been deleted.",
                "nested": [{"id": "ff808181"}, 3]
            })
        );
    }

    #[test]
    fn test_resolve_request() {
        let state = state_with_id();
        let request = RequestSpec::patch("https://x/objects/{{object_id}}")
            .with_json(json!({"data": {"price": 2199.99}}))
            .with_header("X-Object", "{{object_id}}");

        let resolved = resolve_request(&request, &state).unwrap();
        assert_eq!(resolved.url, "https://x/objects/ff808181");
        assert_eq!(resolved.body, request.body);
        assert_eq!(resolved.headers.iter().next().unwrap().value, "ff808181");
    }

    #[test]
    fn test_resolve_assertions_leaves_status_alone() {
        let state = state_with_id();
        let assertions = vec![
            Assertion::status(200),
            Assertion::json_match(json!({"id": "{{object_id}}"})),
        ];
        let resolved = resolve_assertions(&assertions, &state).unwrap();
        assert_eq!(resolved[0], Assertion::status(200));
        assert_eq!(resolved[1], Assertion::json_match(json!({"id": "ff808181"})));
    }
}

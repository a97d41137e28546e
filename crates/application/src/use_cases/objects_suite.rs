//! The objects API suite.
//!
//! Ten cases against the `/objects` resource, declared in execution order.
//! The create case captures the new object's id; update, partial update and
//! delete reuse it, so their expected bodies reflect the cumulative effect
//! of the earlier steps.

use restcheck_domain::request::RequestSpec;
use restcheck_domain::{Assertion, DeletionNotice, NewObject, TestCase, TestSuite};
use serde_json::{Value, json};

use crate::ApplicationResult;

/// Run-state variable holding the id returned by the create case.
pub const OBJECT_ID: &str = "object_id";

/// Case names, in execution order.
pub mod names {
    /// GET /objects.
    pub const LIST: &str = "GET /objects - lists all objects";
    /// GET /objects/1.
    pub const GET_BY_ID: &str = "GET /objects/{id} - returns a specific object";
    /// POST /objects, capturing the id.
    pub const CREATE: &str = "POST /objects - creates a new object";
    /// PUT /objects/{id}.
    pub const UPDATE: &str = "PUT /objects/{id} - updates an object";
    /// PATCH /objects/{id}.
    pub const PATCH: &str = "PATCH /objects/{id} - partially updates an object";
    /// DELETE /objects/{id}.
    pub const DELETE: &str = "DELETE /objects/{id} - deletes an object";
    /// GET /objects/999999.
    pub const GET_MISSING: &str = "GET /objects/{id} - returns 404 for a missing object";
    /// POST /objects with a schema check.
    pub const CREATE_SCHEMA: &str = "POST /objects - response matches the object schema";
    /// GET /objects with a header check.
    pub const HEADERS: &str = "GET /objects - returns JSON content type";
    /// POST /objects with `{}`.
    pub const CREATE_EMPTY: &str = "POST /objects - accepts an empty body";
}

/// Seeded object the API always serves under id "1".
const SEEDED_ID: &str = "1";
const SEEDED_NAME: &str = "Google Pixel 6 Pro";
/// An id the API never assigns.
const MISSING_ID: &str = "999999";

/// `{{name}}` reference to a run-state variable.
fn placeholder(name: &str) -> String {
    format!("{{{{{name}}}}}")
}

/// Schema a freshly created object must satisfy.
#[must_use]
pub fn created_object_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": { "type": "string" },
            "name": { "type": "string" },
            "data": { "type": "object" },
            "createdAt": { "type": "string" }
        },
        "required": ["id", "name", "data"]
    })
}

/// Builds the objects suite against `base_url` (e.g. `https://api.restful-api.dev`).
///
/// # Errors
///
/// Returns an error if `base_url` does not form valid request URLs.
pub fn objects_suite(base_url: &str) -> ApplicationResult<TestSuite> {
    let base = base_url.trim_end_matches('/');
    let collection = format!("{base}/objects");
    let item = |id: &str| format!("{collection}/{id}");
    let created = item(&placeholder(OBJECT_ID));

    RequestSpec::get(&collection).parse_url()?;

    let create_body = NewObject::named("MacBook Pro M3")
        .with_attr("year", 2023)
        .with_attr("price", 1999.99);
    let update_body = NewObject::named("MacBook Pro M3 (Updated)")
        .with_attr("year", 2024)
        .with_attr("price", 2099.99);
    let deleted = DeletionNotice::expected_for(&placeholder(OBJECT_ID));

    Ok(TestSuite::new("objects API")
        .with_case(TestCase::new(names::LIST, RequestSpec::get(&collection)).expect_status(200))
        .with_case(
            TestCase::new(names::GET_BY_ID, RequestSpec::get(item(SEEDED_ID)))
                .expect_status(200)
                .expect(Assertion::json_match(
                    json!({ "id": SEEDED_ID, "name": SEEDED_NAME }),
                )),
        )
        .with_case(
            TestCase::new(
                names::CREATE,
                RequestSpec::post(&collection).with_json(create_body.to_json()),
            )
            .expect_status(200)
            .capture(OBJECT_ID, "$.id"),
        )
        .with_case(
            TestCase::new(
                names::UPDATE,
                RequestSpec::put(&created).with_json(update_body.to_json()),
            )
            .expect_status(200)
            .expect(Assertion::json_match(
                json!({ "name": "MacBook Pro M3 (Updated)" }),
            )),
        )
        .with_case(
            TestCase::new(
                names::PATCH,
                RequestSpec::patch(&created).with_json(json!({ "data": { "price": 2199.99 } })),
            )
            .expect_status(200)
            .expect(Assertion::json_match(json!({ "data": { "price": 2199.99 } }))),
        )
        .with_case(
            TestCase::new(names::DELETE, RequestSpec::delete(&created))
                .expect_status(200)
                .expect(Assertion::json_match(json!({ "message": deleted.message }))),
        )
        .with_case(
            TestCase::new(names::GET_MISSING, RequestSpec::get(item(MISSING_ID)))
                .expect_status(404),
        )
        .with_case(
            TestCase::new(
                names::CREATE_SCHEMA,
                RequestSpec::post(&collection).with_json(
                    NewObject::named("Dell XPS 15")
                        .with_attr("year", 2023)
                        .to_json(),
                ),
            )
            .expect_status(200)
            .expect(Assertion::json_schema(created_object_schema())),
        )
        .with_case(
            TestCase::new(names::HEADERS, RequestSpec::get(&collection))
                .expect_status(200)
                .expect(Assertion::header("content-type", "application/json")),
        )
        .with_case(
            TestCase::new(
                names::CREATE_EMPTY,
                RequestSpec::post(&collection).with_json(json!({})),
            )
            .expect_status(200)
            .note(
                "the live API accepts an empty object; a stricter server would answer 400 \
                 and this case would then fail",
            ),
        ))
}

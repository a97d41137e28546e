//! Variable resolution module
//!
//! Request templates reference values captured earlier in the run with
//! `{{variable}}` syntax.
//!
//! ```
//! use restcheck_application::variable_resolver::resolve_str;
//! use restcheck_domain::RunState;
//!
//! let mut state = RunState::new();
//! state.capture("object_id", "ff80").unwrap();
//!
//! let url = resolve_str("https://api.restful-api.dev/objects/{{object_id}}", &state).unwrap();
//! assert_eq!(url, "https://api.restful-api.dev/objects/ff80");
//! ```

pub mod engine;
pub mod parser;

pub use engine::{resolve_assertions, resolve_json, resolve_request, resolve_str};
pub use parser::{VariableReference, parse_variables};

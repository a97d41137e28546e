//! Variable parser for {{variable}} syntax
//!
//! Parses strings to extract variable references with their positions.

use std::ops::Range;

/// Represents a parsed variable reference in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference {
    /// The variable name (without {{ }}), trimmed.
    pub name: String,

    /// Byte range in the original string where this reference appears.
    pub span: Range<usize>,
}

/// Parses a string and extracts all variable references.
///
/// An unclosed `{{` ends parsing; empty references like `{{ }}` are skipped.
///
/// ```
/// use restcheck_application::variable_resolver::parser::parse_variables;
///
/// let refs = parse_variables("/objects/{{object_id}}");
/// assert_eq!(refs.len(), 1);
/// assert_eq!(refs[0].name, "object_id");
/// assert_eq!(refs[0].span, 9..22);
/// ```
#[must_use]
pub fn parse_variables(input: &str) -> Vec<VariableReference> {
    let mut references = Vec::new();
    let mut offset = 0;

    while let Some(open) = input[offset..].find("{{") {
        let start = offset + open;
        let name_start = start + 2;
        let Some(close) = input[name_start..].find("}}") else {
            break;
        };
        let end = name_start + close + 2;

        let name = input[name_start..name_start + close].trim();
        if !name.is_empty() {
            references.push(VariableReference {
                name: name.to_string(),
                span: start..end,
            });
        }
        offset = end;
    }

    references
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_simple_variable() {
        let refs = parse_variables("{{object_id}}");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "object_id");
        assert_eq!(refs[0].span, 0..13);
    }

    #[test]
    fn test_parse_with_whitespace() {
        let refs = parse_variables("{{ object_id }}");
        assert_eq!(refs[0].name, "object_id");
    }

    #[test]
    fn test_no_variables() {
        assert!(parse_variables("https://api.restful-api.dev/objects/1").is_empty());
    }

    #[test]
    fn test_unclosed_variable() {
        assert!(parse_variables("{{object_id").is_empty());
    }

    #[test]
    fn test_empty_variable() {
        assert!(parse_variables("{{}}").is_empty());
        assert!(parse_variables("{{   }}").is_empty());
    }

    #[test]
    fn test_adjacent_variables() {
        let names: Vec<_> = parse_variables("{{a}}{{b}}/{{c}}")
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_single_brace_ignored() {
        assert!(parse_variables("{id}").is_empty());
        assert_eq!(
            parse_variables("Object with id = {{object_id}} has been deleted.").len(),
            1
        );
    }

    #[test]
    fn test_span_positions() {
        let input = "Object with id = {{object_id}} has been deleted.";
        let refs = parse_variables(input);
        assert_eq!(&input[refs[0].span.clone()], "{{object_id}}");
    }
}

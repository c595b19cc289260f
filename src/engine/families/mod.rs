//! Per-family configuration: column tables, identifier patterns,
//! classification rules, and QA aggregation.

pub mod backplane;
pub mod ccm;
pub mod dcb;
pub mod lvr;

use regex::Regex;

use crate::engine::error::EngineError;

/// A field counts as affirmative when it case-insensitively equals "yes".
pub fn affirmative(value: &str) -> bool {
    value.eq_ignore_ascii_case("yes")
}

/// Compile one identifier pattern from a family's fixed table.
pub(crate) fn compile(family: &'static str, pattern: &str) -> Result<Regex, EngineError> {
    Regex::new(pattern).map_err(|source| EngineError::Pattern { family, source })
}

/// Read a required attribute while decoding a typed record; a missing
/// field means the row is shorter than the schema and decoding bails out
/// with `Ok(None)`, which classify turns into a `ShortRow` rejection.
macro_rules! field {
    ($schema:expr, $row:expr, $name:literal) => {
        match $schema.field($row, $name)? {
            Some(value) => value.to_string(),
            None => return Ok(None),
        }
    };
}
pub(crate) use field;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affirmative_is_case_insensitive_yes() {
        assert!(affirmative("yes"));
        assert!(affirmative("Yes"));
        assert!(affirmative("YES"));
        assert!(!affirmative("no"));
        assert!(!affirmative(""));
        assert!(!affirmative("yes "));
    }
}

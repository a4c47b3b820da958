//! [`ContainsPattern`] definition.

use derive_more::Display;
use postgres_types::{FromSql, ToSql};

/// `ILIKE` pattern matching a substring anywhere in the target.
///
/// The input is taken literally: `LIKE` wildcards occurring in it are
/// escaped, so searching for `100%` matches the text `100%` and nothing else.
#[derive(Clone, Debug, Display, Eq, FromSql, PartialEq, ToSql)]
#[postgres(transparent)]
pub struct ContainsPattern(String);

impl ContainsPattern {
    /// Creates a new [`ContainsPattern`] out of the given `input`.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self(format!(
            "%{}%",
            input
                .replace('\\', r"\\")
                .replace('%', r"\%")
                .replace('_', r"\_"),
        ))
    }
}

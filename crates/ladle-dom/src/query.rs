//! Simple selector strings.
//!
//! Only the three lookups the indices can answer directly are supported:
//! a bare tag name, `#id` and `.class`. There is no combinator syntax.

use core::str::FromStr;

use thiserror::Error;

/// A lookup against one of the three indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Elements with this (lowercased) tag name.
    Tag(String),
    /// The first element with this `id`.
    Id(String),
    /// Elements carrying this class token.
    Class(String),
}

/// Why a selector string could not be turned into a [`Query`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Nothing but whitespace was given.
    #[error("empty query")]
    Empty,
    /// A `#` or `.` prefix with no name after it.
    #[error("missing name after `{0}`")]
    MissingName(char),
    /// Whitespace inside the name; combinators are not supported.
    #[error("unexpected whitespace in query `{0}`")]
    Whitespace(String),
}

impl Query {
    /// Parse `tag`, `#id` or `.class`. Surrounding whitespace is ignored and
    /// tag names are lowercased; ids and classes are kept as written.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] for empty input, a prefix without a name, or a
    /// name containing whitespace.
    pub fn parse(input: &str) -> Result<Self, QueryError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(QueryError::Empty);
        }
        if input.contains(char::is_whitespace) {
            return Err(QueryError::Whitespace(input.to_string()));
        }

        let (prefix, name) = match input.chars().next() {
            Some(c @ ('#' | '.')) => (Some(c), &input[1..]),
            _ => (None, input),
        };

        match prefix {
            Some(c) if name.is_empty() => Err(QueryError::MissingName(c)),
            Some('#') => Ok(Self::Id(name.to_string())),
            Some(_) => Ok(Self::Class(name.to_string())),
            None => Ok(Self::Tag(name.to_ascii_lowercase())),
        }
    }
}

impl FromStr for Query {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_form() {
        assert_eq!(Query::parse("P"), Ok(Query::Tag("p".to_string())));
        assert_eq!(Query::parse("#Main"), Ok(Query::Id("Main".to_string())));
        assert_eq!(Query::parse(" .card "), Ok(Query::Class("card".to_string())));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(Query::parse("   "), Err(QueryError::Empty));
        assert_eq!(Query::parse("#"), Err(QueryError::MissingName('#')));
        assert_eq!(Query::parse("."), Err(QueryError::MissingName('.')));
        assert_eq!(
            Query::parse("div p"),
            Err(QueryError::Whitespace("div p".to_string()))
        );
    }

    #[test]
    fn errors_have_readable_messages() {
        assert_eq!(
            QueryError::MissingName('.').to_string(),
            "missing name after `.`"
        );
    }

    #[test]
    fn from_str_matches_parse() {
        let query: Query = "#a".parse().unwrap();
        assert_eq!(query, Query::Id("a".to_string()));
    }
}

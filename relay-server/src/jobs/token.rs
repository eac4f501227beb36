//! Print token - the caller-held batch handle
//!
//! A poll response hands the printer a token; the printer presents the same
//! token back on fetch and acknowledge. The core never stores it: the token
//! IS the state, round-tripped through the printer verbatim.

use super::types::JobKey;
use thiserror::Error;

/// Token parse failure (not valid JSON, or not a JSON array of strings)
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token is not a JSON array of job keys: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Ordered list of job keys issued by one poll
///
/// The order and membership are exactly what the poll returned; encode and
/// parse never reorder or dedupe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintToken(Vec<JobKey>);

impl PrintToken {
    pub fn new(keys: Vec<JobKey>) -> Self {
        Self(keys)
    }

    /// Parse a token presented by a printer
    ///
    /// Accepts exactly a JSON array of strings. Anything else - bare text,
    /// an object, an array of numbers - is a [`TokenError`].
    pub fn parse(raw: &str) -> Result<Self, TokenError> {
        let keys: Vec<JobKey> = serde_json::from_str(raw)?;
        Ok(Self(keys))
    }

    /// Serialize for the poll response
    pub fn encode(&self) -> String {
        // Vec<JobKey> is a vec of plain strings; serialization cannot fail
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn keys(&self) -> &[JobKey] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_parse_round_trip_preserves_order() {
        let token = PrintToken::new(vec![
            JobKey::from("printJob:aa:2"),
            JobKey::from("printJob:aa:1"),
            JobKey::from("printJob:aa:3"),
        ]);

        let raw = token.encode();
        assert_eq!(raw, r#"["printJob:aa:2","printJob:aa:1","printJob:aa:3"]"#);

        let parsed = PrintToken::parse(&raw).unwrap();
        assert_eq!(parsed, token);
    }

    #[test]
    fn test_empty_token() {
        let token = PrintToken::new(vec![]);
        assert_eq!(token.encode(), "[]");
        assert!(PrintToken::parse("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_non_arrays() {
        assert!(PrintToken::parse("not-json").is_err());
        assert!(PrintToken::parse("{}").is_err());
        assert!(PrintToken::parse("[1,2]").is_err());
        assert!(PrintToken::parse("\"printJob:aa:1\"").is_err());
        assert!(PrintToken::parse("").is_err());
    }
}

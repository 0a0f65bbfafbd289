//! Licence plates

use crate::error::QuoteError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Licence plate, trimmed and upper-cased
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Plate(String);

impl Plate {
    /// Normalize a raw plate; blank input is rejected
    pub fn parse(raw: &str) -> Result<Self, QuoteError> {
        let normalized = raw.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(QuoteError::EmptyPlate);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Plate {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Plate {
    type Error = QuoteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Plate> for String {
    fn from(plate: Plate) -> Self {
        plate.0
    }
}

impl fmt::Display for Plate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes() {
        let plate = Plate::parse("  abc-1234 ").unwrap();
        assert_eq!(plate.as_str(), "ABC-1234");
        assert_eq!(plate, "ABC-1234".parse().unwrap());
    }

    #[test]
    fn test_rejects_blank() {
        assert_eq!(Plate::parse("   "), Err(QuoteError::EmptyPlate));
    }

    #[test]
    fn test_serde_normalizes() {
        let plate: Plate = serde_json::from_str(r#"" xy 99 ""#).unwrap();
        assert_eq!(plate.to_string(), "XY 99");
        assert!(serde_json::from_str::<Plate>(r#""""#).is_err());
    }
}

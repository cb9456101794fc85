//! Money types for API boundary enforcement
//!
//! - `StrictAmount`: format-validated, non-negative input amount

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Strict format amount - validates format during deserialization
///
/// Accepts a JSON string or a JSON number and rejects:
/// - `.5` (must be `0.5`) and `5.` (must be `5` or `5.0`)
/// - negative values
/// - empty strings, scientific notation, `+` prefix
///
/// Zero passes; whether a zero transfer is acceptable is the engine's call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrictAmount(Decimal);

impl StrictAmount {
    pub fn inner(self) -> Decimal {
        self.0
    }
}

impl std::ops::Deref for StrictAmount {
    type Target = Decimal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de> Deserialize<'de> for StrictAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum DecimalOrString {
            String(String),
            Number(Decimal),
        }

        let d = match DecimalOrString::deserialize(deserializer)? {
            DecimalOrString::String(s) => {
                if s.is_empty() {
                    return Err(D::Error::custom("Amount cannot be empty"));
                }
                if s.starts_with('.') {
                    return Err(D::Error::custom("Invalid format: use 0.5 not .5"));
                }
                if s.ends_with('.') {
                    return Err(D::Error::custom("Invalid format: use 5.0 not 5."));
                }
                if s.contains('e') || s.contains('E') {
                    return Err(D::Error::custom(
                        "Invalid format: scientific notation not allowed",
                    ));
                }
                if s.starts_with('+') {
                    return Err(D::Error::custom("Invalid format: + prefix not allowed"));
                }
                Decimal::from_str(&s)
                    .map_err(|e| D::Error::custom(format!("Invalid decimal: {}", e)))?
            }
            DecimalOrString::Number(d) => d,
        };

        if d.is_sign_negative() && !d.is_zero() {
            return Err(D::Error::custom("Amount cannot be negative"));
        }
        Ok(StrictAmount(d))
    }
}

impl Serialize for StrictAmount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Serialize as string to preserve precision
        serializer.serialize_str(&self.0.to_string())
    }
}

/// Non-empty string field
pub fn deserialize_non_empty_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if s.is_empty() {
        return Err(serde::de::Error::custom("string cannot be empty"));
    }
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<StrictAmount, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn test_accepts_string_and_number() {
        assert_eq!(*parse(r#""1.50""#).unwrap(), Decimal::new(150, 2));
        assert_eq!(*parse("1000").unwrap(), Decimal::from(1000));
        assert_eq!(*parse(r#""0""#).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_rejects_bad_formats() {
        let cases = [
            (r#"".5""#, "use 0.5 not .5"),
            (r#""5.""#, "use 5.0 not 5."),
            (r#""1.5e8""#, "scientific notation"),
            (r#""+5""#, "+ prefix"),
            (r#""""#, "cannot be empty"),
        ];
        for (json, needle) in cases {
            let err = parse(json).unwrap_err().to_string();
            assert!(err.contains(needle), "{} -> {}", json, err);
        }
    }

    #[test]
    fn test_rejects_negative() {
        assert!(parse(r#""-1.5""#).is_err());
        assert!(parse("-3").is_err());
    }

    #[test]
    fn test_serializes_as_string() {
        let amount = parse(r#""12.30""#).unwrap();
        assert_eq!(serde_json::to_string(&amount).unwrap(), r#""12.30""#);
    }
}

//! Validated value types shared across the CardioScan crates.
//!
//! These newtypes guarantee their invariants at construction time so that the
//! rest of the workspace never has to re-check them: a `NonEmptyText` always
//! contains at least one non-whitespace character, an `EmailAddress` is
//! structurally plausible, and a `Confidence` is always within `[0, 100]`.

use serde::Deserialize;

/// Errors that can occur when creating validated value types.
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    /// The input text was empty or contained only whitespace
    #[error("text cannot be empty")]
    Empty,
    /// The input was not a plausible email address
    #[error("invalid email address")]
    InvalidEmail,
    /// The confidence percentage was outside `[0, 100]`
    #[error("confidence must be between 0 and 100, got {0}")]
    ConfidenceOutOfRange(f64),
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one
/// non-whitespace character. The input is automatically trimmed of leading and
/// trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::Empty` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, ValueError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValueError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A structurally validated email address.
///
/// Validation is deliberately shallow: exactly one `@`, a non-empty local
/// part, a dotted non-empty domain, no whitespace, bounded length. Anything
/// stricter belongs to a confirmation-mail flow, not a type constructor.
/// The address is lowercased on construction so that lookups are
/// case-insensitive by default.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    const MAX_LEN: usize = 254;

    /// Parses and normalises an email address.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidEmail` if the input is not structurally
    /// plausible.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, ValueError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() || trimmed.len() > Self::MAX_LEN {
            return Err(ValueError::InvalidEmail);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(ValueError::InvalidEmail);
        }

        let mut parts = trimmed.splitn(2, '@');
        let local = parts.next().unwrap_or("");
        let domain = parts.next().unwrap_or("");

        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(ValueError::InvalidEmail);
        }
        // The domain must contain an interior dot.
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(ValueError::InvalidEmail);
        }

        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Returns the normalised address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for EmailAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for EmailAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EmailAddress::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// An analysis confidence percentage, guaranteed to lie within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Confidence(f64);

impl Confidence {
    /// Creates a new `Confidence` from a percentage value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::ConfidenceOutOfRange` if the value is not a finite
    /// number within `[0, 100]`.
    pub fn new(value: f64) -> Result<Self, ValueError> {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(ValueError::ConfidenceOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Returns the percentage value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for Confidence {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Confidence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Confidence::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_and_accepts() {
        let text = NonEmptyText::new("  Jane Doe  ").unwrap();
        assert_eq!(text.as_str(), "Jane Doe");
    }

    #[test]
    fn non_empty_text_rejects_whitespace_only() {
        assert!(matches!(NonEmptyText::new("   "), Err(ValueError::Empty)));
        assert!(matches!(NonEmptyText::new(""), Err(ValueError::Empty)));
    }

    #[test]
    fn email_parses_and_lowercases() {
        let email = EmailAddress::parse("Dr.Smith@Hospital.org").unwrap();
        assert_eq!(email.as_str(), "dr.smith@hospital.org");
    }

    #[test]
    fn email_rejects_malformed_inputs() {
        for bad in [
            "",
            "no-at-sign",
            "@missing.local",
            "missing-domain@",
            "two@@ats.com",
            "spaces in@mail.com",
            "nodot@domain",
            "trailingdot@domain.",
        ] {
            assert!(
                EmailAddress::parse(bad).is_err(),
                "expected rejection for {bad:?}"
            );
        }
    }

    #[test]
    fn confidence_bounds_are_enforced() {
        assert!(Confidence::new(0.0).is_ok());
        assert!(Confidence::new(98.7).is_ok());
        assert!(Confidence::new(100.0).is_ok());
        assert!(Confidence::new(-0.1).is_err());
        assert!(Confidence::new(100.1).is_err());
        assert!(Confidence::new(f64::NAN).is_err());
    }

    #[test]
    fn confidence_round_trips_through_serde() {
        let confidence = Confidence::new(96.5).unwrap();
        let json = serde_json::to_string(&confidence).unwrap();
        assert_eq!(json, "96.5");
        let back: Confidence = serde_json::from_str(&json).unwrap();
        assert_eq!(back, confidence);
    }

    #[test]
    fn confidence_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Confidence>("120.0").is_err());
    }
}

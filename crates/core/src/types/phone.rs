//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains characters other than digits and separators.
    #[error("phone number may contain only digits")]
    NonDigit,
    /// The input does not have exactly the expected number of digits.
    #[error("phone number must be exactly {expected} digits (got {got})")]
    WrongLength {
        /// Required digit count.
        expected: usize,
        /// Digit count actually supplied.
        got: usize,
    },
}

/// An Indian mobile number.
///
/// OTP delivery and WhatsApp contact both key off the subscriber number, so
/// this type stores exactly the 10 digits and renders country-code forms on
/// demand.
///
/// ## Constraints
///
/// - Spaces, dashes, and parentheses are stripped before validation
/// - An optional `+91` country prefix is stripped
/// - The remainder must be exactly 10 ASCII digits
///
/// ## Examples
///
/// ```
/// use onlylands_core::PhoneNumber;
///
/// // Valid numbers
/// assert!(PhoneNumber::parse("7021758061").is_ok());
/// assert!(PhoneNumber::parse("+91 7021758061").is_ok());
/// assert!(PhoneNumber::parse("70217-58061").is_ok());
///
/// // Invalid numbers
/// assert!(PhoneNumber::parse("").is_err());            // empty
/// assert!(PhoneNumber::parse("702175806").is_err());   // 9 digits
/// assert!(PhoneNumber::parse("70217580611").is_err()); // 11 digits
/// assert!(PhoneNumber::parse("70217abc61").is_err());  // letters
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Required number of subscriber digits.
    pub const DIGITS: usize = 10;

    /// Parse a `PhoneNumber` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input, after stripping separators and an
    /// optional `+91` prefix:
    /// - Is empty
    /// - Contains non-digit characters
    /// - Does not have exactly 10 digits
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let cleaned: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
            .collect();

        let digits = cleaned.strip_prefix("+91").unwrap_or(&cleaned);

        if digits.is_empty() {
            return Err(PhoneError::Empty);
        }

        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PhoneError::NonDigit);
        }

        if digits.len() != Self::DIGITS {
            return Err(PhoneError::WrongLength {
                expected: Self::DIGITS,
                got: digits.len(),
            });
        }

        Ok(Self(digits.to_owned()))
    }

    /// Returns the 10 subscriber digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `PhoneNumber` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// E.164 rendering (`+91XXXXXXXXXX`), the form the backend expects.
    #[must_use]
    pub fn e164(&self) -> String {
        format!("+91{}", self.0)
    }

    /// Digits-only rendering with country code (`91XXXXXXXXXX`), the form
    /// `wa.me` deep links expect.
    #[must_use]
    pub fn wa_me(&self) -> String {
        format!("91{}", self.0)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_ten_digits() {
        let phone = PhoneNumber::parse("7021758061").unwrap();
        assert_eq!(phone.as_str(), "7021758061");
    }

    #[test]
    fn test_parse_strips_country_code_and_separators() {
        let phone = PhoneNumber::parse("+91 7021-758-061").unwrap();
        assert_eq!(phone.as_str(), "7021758061");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(PhoneNumber::parse(""), Err(PhoneError::Empty));
        assert_eq!(PhoneNumber::parse("+91"), Err(PhoneError::Empty));
    }

    #[test]
    fn test_parse_rejects_nine_digits() {
        assert_eq!(
            PhoneNumber::parse("702175806"),
            Err(PhoneError::WrongLength {
                expected: 10,
                got: 9
            })
        );
    }

    #[test]
    fn test_parse_rejects_eleven_digits() {
        assert_eq!(
            PhoneNumber::parse("70217580611"),
            Err(PhoneError::WrongLength {
                expected: 10,
                got: 11
            })
        );
    }

    #[test]
    fn test_parse_rejects_letters() {
        assert_eq!(PhoneNumber::parse("70217abc61"), Err(PhoneError::NonDigit));
    }

    #[test]
    fn test_renderings() {
        let phone = PhoneNumber::parse("9876543210").unwrap();
        assert_eq!(phone.e164(), "+919876543210");
        assert_eq!(phone.wa_me(), "919876543210");
        assert_eq!(phone.to_string(), "9876543210");
    }
}

use serde::Serialize;
use std::fmt;

use crate::error::ForecastError;

/// A syntactically valid US zip code: exactly five ASCII digits.
///
/// No checksum or geocoding is done; upstream decides whether the code exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ZipCode(String);

impl ZipCode {
    pub const LEN: usize = 5;

    pub fn parse(input: &str) -> Result<Self, ForecastError> {
        if input.len() == Self::LEN && input.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(input.to_owned()))
        } else {
            Err(ForecastError::Validation { input: input.to_owned() })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for ZipCode {
    type Error = ForecastError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Free-function form of [`ZipCode::parse`].
pub fn validate(input: &str) -> Result<ZipCode, ForecastError> {
    ZipCode::parse(input)
}

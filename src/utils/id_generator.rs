// src/utils/id_generator.rs
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdType {
    Ride,
    Payout,
}

impl IdType {
    pub fn to_prefix(&self) -> &'static str {
        match self {
            IdType::Ride => "rid",
            IdType::Payout => "pay",
        }
    }

    fn from_prefix(prefix: &str) -> Result<Self, IdError> {
        match prefix {
            "rid" => Ok(IdType::Ride),
            "pay" => Ok(IdType::Payout),
            other => Err(IdError::UnknownType(other.to_string())),
        }
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_prefix())
    }
}

pub struct IdGenerator;

impl IdGenerator {
    /// Generate an ID with format: {prefix}-{date}-{random_suffix}
    /// Where random_suffix is 5 characters: 3 hexchars + 2 alphanumeric or 3 alphanumeric + 2 hexchars
    pub fn generate_with_timestamp(id_type: IdType, timestamp: DateTime<Utc>) -> String {
        let date_part = timestamp.format("%y%m%d").to_string(); // YYMMDD format
        let random_suffix = Self::generate_random_suffix();

        format!("{}-{}-{}", id_type.to_prefix(), date_part, random_suffix)
    }

    /// Keeps generating until `taken` reports the ID as free.
    pub fn generate_unique(
        id_type: IdType,
        timestamp: DateTime<Utc>,
        taken: impl Fn(&str) -> bool,
    ) -> String {
        loop {
            let id = Self::generate_with_timestamp(id_type, timestamp);
            if !taken(&id) {
                return id;
            }
            tracing::debug!("Regenerating colliding {} ID: {}", id_type, id);
        }
    }

    fn generate_random_suffix() -> String {
        if rand::random::<bool>() {
            format!(
                "{}{}",
                Self::generate_hex_chars(3),
                Self::generate_alphanumeric_chars(2)
            )
        } else {
            format!(
                "{}{}",
                Self::generate_alphanumeric_chars(3),
                Self::generate_hex_chars(2)
            )
        }
    }

    fn generate_hex_chars(n: usize) -> String {
        const HEX_CHARS: &[u8] = b"0123456789abcdef";
        Self::generate_from_chars(HEX_CHARS, n)
    }

    fn generate_alphanumeric_chars(n: usize) -> String {
        const ALPHANUMERIC_CHARS: &[u8] =
            b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
        Self::generate_from_chars(ALPHANUMERIC_CHARS, n)
    }

    fn generate_from_chars(charset: &[u8], n: usize) -> String {
        use rand::Rng;

        let mut rng = rand::rng();
        (0..n)
            .map(|_| charset[rng.random_range(0..charset.len())] as char)
            .collect()
    }

    /// Parse an ID to extract its components
    pub fn parse_id(id: &str) -> Result<ParsedId, IdError> {
        let parts: Vec<&str> = id.split('-').collect();
        let [prefix, date_part, random_suffix] = parts.as_slice() else {
            return Err(IdError::InvalidFormat);
        };

        if date_part.len() != 6 || random_suffix.len() != 5 {
            return Err(IdError::InvalidFormat);
        }
        if !random_suffix.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(IdError::InvalidFormat);
        }

        let id_type = IdType::from_prefix(prefix)?;
        let created_on =
            NaiveDate::parse_from_str(date_part, "%y%m%d").map_err(|_| IdError::InvalidDate)?;

        Ok(ParsedId {
            id_type,
            created_on,
            random_suffix: random_suffix.to_string(),
        })
    }

    /// Validate if an ID matches the expected format and type
    pub fn validate_id(id: &str, expected_type: Option<IdType>) -> bool {
        match Self::parse_id(id) {
            Ok(parsed) => expected_type.is_none_or(|expected| parsed.id_type == expected),
            Err(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedId {
    pub id_type: IdType,
    pub created_on: NaiveDate,
    pub random_suffix: String,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum IdError {
    #[error("Invalid ID format")]
    InvalidFormat,

    #[error("Unknown ID type: {0}")]
    UnknownType(String),

    #[error("Invalid date component in ID")]
    InvalidDate,
}

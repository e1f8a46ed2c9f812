use rust_decimal::Decimal;
use thiserror::Error;

use super::types::Tier;

/// Errors produced by the eligibility, restriction, and benefit rules.
///
/// Every variant is a deterministic business refusal: retrying with the
/// same input yields the same error.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CardError {
    /// A field was missing or malformed; no business rule ran.
    #[error("validation failed: {0}")]
    Validation(ValidationError),

    /// The applicant does not meet the requested tier's requirements.
    #[error("not eligible: {0}")]
    Eligibility(EligibilityError),

    /// The tier may not be used for purchases made in this country.
    #[error("purchase restricted: {tier} cards cannot be used for purchases in {country}")]
    Restriction {
        /// Tier of the card used for the purchase.
        tier: Tier,
        /// Country the purchase was made in.
        country: String,
    },

    /// The tier is not configured in the catalog.
    #[error("unknown card tier: {0}")]
    UnknownTier(String),

    /// The tier catalog configuration is invalid.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// No client with this id exists in the directory.
    #[error("client not found: {0}")]
    ClientNotFound(u64),
}

impl From<ValidationError> for CardError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<EligibilityError> for CardError {
    fn from(err: EligibilityError) -> Self {
        Self::Eligibility(err)
    }
}

/// A single validation error with field name and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Name of the invalid field (e.g. "monthly_income").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Business-rule rejection at registration time.
///
/// Rules are checked in the order income, club, country; the first
/// failing rule is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EligibilityError {
    #[error("monthly income {income} is below the minimum of ${minimum} USD required for {tier}")]
    Income {
        tier: Tier,
        income: Decimal,
        minimum: Decimal,
    },

    #[error("VISE CLUB subscription is required for {tier}")]
    Club { tier: Tier },

    #[error("{tier} cards are not available for residents of {country}")]
    Country { tier: Tier, country: String },
}

impl EligibilityError {
    /// Short rule identifier: `"income"`, `"club"` or `"country"`.
    pub fn rule(&self) -> &'static str {
        match self {
            Self::Income { .. } => "income",
            Self::Club { .. } => "club",
            Self::Country { .. } => "country",
        }
    }
}

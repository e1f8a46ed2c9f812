use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::CardError;

/// Payment-card product level.
///
/// Ordered from entry level to top tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Classic,
    Gold,
    Platinum,
    Black,
    White,
}

impl Tier {
    /// All tiers, entry level first.
    pub const ALL: [Tier; 5] = [
        Self::Classic,
        Self::Gold,
        Self::Platinum,
        Self::Black,
        Self::White,
    ];

    /// Display name as used in payloads and messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Gold => "Gold",
            Self::Platinum => "Platinum",
            Self::Black => "Black",
            Self::White => "White",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tier {
    type Err = CardError;

    /// Parse a tier name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CardError::UnknownTier(wanted.to_string()))
    }
}

/// Which of a tier's two day-based windows produced a discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowKind {
    Weekday,
    Weekend,
}

/// A percentage discount active on specific days above a minimum amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountWindow {
    /// Days of the week on which the window is open.
    pub days: Vec<Weekday>,
    /// Discount percentage (e.g. 15 for 15%).
    pub percent: Decimal,
    /// The purchase must be strictly greater than this amount.
    pub min_purchase: Decimal,
}

impl DiscountWindow {
    pub fn new(days: impl Into<Vec<Weekday>>, percent: Decimal, min_purchase: Decimal) -> Self {
        Self {
            days: days.into(),
            percent,
            min_purchase,
        }
    }

    /// Whether a purchase of `amount` on `day` qualifies for this window.
    pub fn applies(&self, day: Weekday, amount: Decimal) -> bool {
        self.days.contains(&day) && amount > self.min_purchase
    }
}

/// Static eligibility and benefit rules of one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRule {
    pub tier: Tier,
    /// Minimum monthly income in USD (inclusive).
    pub min_income: Decimal,
    /// Whether VISE CLUB membership is required.
    pub requires_club: bool,
    /// Countries whose residents cannot hold the card and in which the
    /// card cannot be used.
    #[serde(default)]
    pub restricted_countries: Vec<String>,
    #[serde(default)]
    pub weekday_window: Option<DiscountWindow>,
    #[serde(default)]
    pub weekend_window: Option<DiscountWindow>,
    /// Extra discount percentage for purchases outside the client's country.
    #[serde(default)]
    pub international_percent: Decimal,
}

impl TierRule {
    /// Whether `country` is in this tier's restricted set.
    pub fn restricts(&self, country: &str) -> bool {
        let country = normalize_country(country);
        self.restricted_countries
            .iter()
            .any(|c| normalize_country(c) == country)
    }
}

/// Registration status of a client record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientStatus {
    Pending,
    Registered,
    Rejected,
}

/// A prospective client asking for a card tier.
///
/// `requested_tier` is kept as the raw payload string; it is parsed during
/// evaluation so an unknown tier is reported as a validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientApplication {
    pub name: String,
    pub country: String,
    pub monthly_income: Decimal,
    pub vise_club_member: bool,
    pub requested_tier: String,
}

impl ClientApplication {
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        monthly_income: Decimal,
        vise_club_member: bool,
        requested_tier: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            monthly_income,
            vise_club_member,
            requested_tier: requested_tier.into(),
        }
    }
}

/// A client record as held by the client directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: u64,
    pub name: String,
    pub country: String,
    pub monthly_income: Decimal,
    pub vise_club_member: bool,
    pub card_tier: Tier,
    pub status: ClientStatus,
}

/// A purchase as submitted for evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub client_id: u64,
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    pub purchase_date: NaiveDate,
    pub purchase_country: String,
}

/// Outcome status of a recorded purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseStatus {
    Approved,
    Rejected,
}

/// A purchase record as held by the purchase ledger.
///
/// `final_amount == original_amount - discount_applied` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: u64,
    pub client_id: u64,
    pub original_amount: Decimal,
    pub currency: String,
    pub purchase_date: NaiveDate,
    pub purchase_country: String,
    pub discount_applied: Decimal,
    pub final_amount: Decimal,
    pub benefit_label: Option<String>,
    pub status: PurchaseStatus,
    /// Why the purchase was rejected, if it was.
    pub rejection_reason: Option<String>,
}

/// Compare-ready form of a country name: trimmed, lowercased, and with
/// Latin accents folded (`"Irán"` and `"iran"` compare equal).
pub fn normalize_country(country: &str) -> String {
    country.trim().to_lowercase().chars().map(fold_accent).collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

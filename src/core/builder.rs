use chrono::Weekday;
use rust_decimal::Decimal;

use super::types::*;

/// Builder for tier rules.
///
/// Starts from a rule with no requirements and no benefits, which is
/// exactly the Classic tier.
///
/// ```
/// use vise_benefits::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::Weekday;
///
/// let rule = TierRuleBuilder::new(Tier::Gold)
///     .min_income(dec!(500))
///     .weekday_window([Weekday::Mon, Weekday::Tue, Weekday::Wed], dec!(15), dec!(100))
///     .build();
///
/// assert!(!rule.requires_club);
/// assert_eq!(rule.weekday_window.unwrap().percent, dec!(15));
/// ```
pub struct TierRuleBuilder {
    tier: Tier,
    min_income: Decimal,
    requires_club: bool,
    restricted_countries: Vec<String>,
    weekday_window: Option<DiscountWindow>,
    weekend_window: Option<DiscountWindow>,
    international_percent: Decimal,
}

impl TierRuleBuilder {
    pub fn new(tier: Tier) -> Self {
        Self {
            tier,
            min_income: Decimal::ZERO,
            requires_club: false,
            restricted_countries: Vec::new(),
            weekday_window: None,
            weekend_window: None,
            international_percent: Decimal::ZERO,
        }
    }

    pub fn min_income(mut self, amount: Decimal) -> Self {
        self.min_income = amount;
        self
    }

    pub fn requires_club(mut self) -> Self {
        self.requires_club = true;
        self
    }

    pub fn restricted_countries<S: Into<String>>(
        mut self,
        countries: impl IntoIterator<Item = S>,
    ) -> Self {
        self.restricted_countries
            .extend(countries.into_iter().map(Into::into));
        self
    }

    /// Set the weekday window. `min_purchase` is an exclusive lower bound.
    pub fn weekday_window(
        mut self,
        days: impl Into<Vec<Weekday>>,
        percent: Decimal,
        min_purchase: Decimal,
    ) -> Self {
        self.weekday_window = Some(DiscountWindow::new(days, percent, min_purchase));
        self
    }

    /// Set the weekend window. `min_purchase` is an exclusive lower bound.
    pub fn weekend_window(
        mut self,
        days: impl Into<Vec<Weekday>>,
        percent: Decimal,
        min_purchase: Decimal,
    ) -> Self {
        self.weekend_window = Some(DiscountWindow::new(days, percent, min_purchase));
        self
    }

    pub fn international_percent(mut self, percent: Decimal) -> Self {
        self.international_percent = percent;
        self
    }

    pub fn build(self) -> TierRule {
        TierRule {
            tier: self.tier,
            min_income: self.min_income,
            requires_club: self.requires_club,
            restricted_countries: self.restricted_countries,
            weekday_window: self.weekday_window,
            weekend_window: self.weekend_window,
            international_percent: self.international_percent,
        }
    }
}

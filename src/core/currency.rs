use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies with their decimal precision rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar (2 decimal places)
    USD,
    /// Australian Dollar (2 decimal places)
    AUD,
    /// Euro (2 decimal places)
    EUR,
}

impl Currency {
    /// Returns the decimal scale (minor unit digits) for this currency
    pub fn scale(&self) -> u32 {
        match self {
            Currency::USD | Currency::AUD | Currency::EUR => 2,
        }
    }

    /// Returns the display symbol for this currency
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD | Currency::AUD => "$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Rounds an amount to the currency's minor unit.
    ///
    /// Rounding happens at presentation boundaries only; intermediate
    /// computation keeps full precision. Half-up rounding, so $10.055
    /// displays as $10.06.
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.scale(), RoundingStrategy::MidpointAwayFromZero)
    }

    /// Validates that a price has the correct scale for this currency
    /// and is not negative
    pub fn validate_price(&self, amount: Decimal) -> Result<(), String> {
        if amount.scale() > self.scale() {
            return Err(format!(
                "{} prices must have at most {} decimal places, got {}",
                self,
                self.scale(),
                amount.scale()
            ));
        }

        if amount < Decimal::ZERO {
            return Err(format!("{} price cannot be negative", self));
        }

        Ok(())
    }

    /// Formats an amount for display, e.g. "$110.00" or "$-16.67".
    ///
    /// A zero tax column is displayed as "$0.00" rather than omitted.
    pub fn format_amount(&self, amount: Decimal) -> String {
        format!(
            "{}{:.width$}",
            self.symbol(),
            self.round(amount),
            width = self.scale() as usize
        )
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::USD => write!(f, "USD"),
            Currency::AUD => write!(f, "AUD"),
            Currency::EUR => write!(f, "EUR"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "AUD" => Ok(Currency::AUD),
            "EUR" => Ok(Currency::EUR),
            _ => Err(format!("Invalid currency: {}", s)),
        }
    }
}

impl TryFrom<String> for Currency {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<&str> for Currency {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

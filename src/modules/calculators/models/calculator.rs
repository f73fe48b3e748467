// Fee calculators for enterprise fees and shipping methods.
//
// Admin-configured fees pick one calculator; the engine evaluates it against
// a monetary base, an item count and a weight during adjustment
// recalculation. A closed enum (rather than open subclassing keyed on a type
// string) keeps the per-item/per-order distinction exhaustive, which the
// tax-inheritance validation on enterprise fees relies on.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::{AppError, Result};

/// A fee calculator, selected per enterprise fee or shipping method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Calculator {
    /// Charges nothing
    None,
    /// Fixed amount, once per order
    FlatRate { amount: Decimal },
    /// Fixed amount for every item ("Flat Rate (per item)")
    PerItem { amount: Decimal },
    /// Percentage of the order base, once per order
    FlatPercentage { percent: Decimal },
    /// Percentage of each item's price, summed over the quantity
    FlatPercentPerItem { percent: Decimal },
    /// Rate per unit of weight across the whole base
    Weight { rate: Decimal },
    /// First item charged one price, additional items another, capped
    /// at max_items chargeable items
    FlexibleRate {
        first_item: Decimal,
        additional_item: Decimal,
        max_items: u32,
    },
    /// Tiered threshold: orders under the minimal amount pay the normal
    /// price, orders at or above it pay the discounted price
    PriceSack {
        minimal_amount: Decimal,
        normal_amount: Decimal,
        discount_amount: Decimal,
    },
}

impl Calculator {
    /// Compute the fee amount for a monetary base, an item count and a
    /// total weight.
    ///
    /// The base is the line item total for per-item fees and the order
    /// item total for per-order fees. Full precision is retained; rounding
    /// happens at presentation.
    pub fn compute(&self, base: Decimal, quantity: u32, weight: Decimal) -> Decimal {
        match self {
            Calculator::None => Decimal::ZERO,
            Calculator::FlatRate { amount } => *amount,
            Calculator::PerItem { amount } => *amount * Decimal::from(quantity),
            Calculator::FlatPercentage { percent } => base * *percent / Decimal::ONE_HUNDRED,
            // percent of the per-item price, times quantity, which reduces
            // to percent of the line total
            Calculator::FlatPercentPerItem { percent } => base * *percent / Decimal::ONE_HUNDRED,
            Calculator::Weight { rate } => *rate * weight,
            Calculator::FlexibleRate {
                first_item,
                additional_item,
                max_items,
            } => {
                if quantity == 0 {
                    return Decimal::ZERO;
                }
                let cap = max_items.saturating_sub(1);
                let additional_count = (quantity - 1).min(cap);
                *first_item + *additional_item * Decimal::from(additional_count)
            }
            Calculator::PriceSack {
                minimal_amount,
                normal_amount,
                discount_amount,
            } => {
                if base < *minimal_amount {
                    *normal_amount
                } else {
                    *discount_amount
                }
            }
        }
    }

    /// Whether this calculator charges per item.
    ///
    /// Only per-item calculators have a single product behind each charge,
    /// so only they can inherit a tax category from the product.
    pub fn is_per_item(&self) -> bool {
        matches!(
            self,
            Calculator::PerItem { .. } | Calculator::FlatPercentPerItem { .. }
        )
    }

    /// Admin-facing calculator name
    pub fn name(&self) -> &'static str {
        match self {
            Calculator::None => "None",
            Calculator::FlatRate { .. } => "Flat Rate (per order)",
            Calculator::PerItem { .. } => "Flat Rate (per item)",
            Calculator::FlatPercentage { .. } => "Flat Percent (per order)",
            Calculator::FlatPercentPerItem { .. } => "Flat Percent (per item)",
            Calculator::Weight { .. } => "Weight (per kg)",
            Calculator::FlexibleRate { .. } => "Flexible Rate",
            Calculator::PriceSack { .. } => "Price Sack",
        }
    }

    /// Validate calculator preferences
    pub fn validate(&self) -> Result<()> {
        if let Calculator::FlexibleRate { max_items, .. } = self {
            if *max_items == 0 {
                return Err(AppError::validation(
                    "Flexible Rate max items must be at least 1",
                ));
            }
        }

        Ok(())
    }
}

/// Parse a numeric calculator preference entered in the admin UI.
///
/// Accepts plain decimal numbers, optionally signed. Anything else (thousands
/// separators, currency symbols, exponents) is rejected with the message the
/// UI renders next to the field.
pub fn parse_numeric_preference(input: &str) -> Result<Decimal> {
    Decimal::from_str(input.trim()).map_err(|_| {
        AppError::validation("Invalid input. Please use only numbers. For example: 10, 5.5, -20")
    })
}

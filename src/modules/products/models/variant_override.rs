use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{AppError, Result};

use super::Variant;

/// A hub-scoped price/stock override for a shared variant.
///
/// Overrides resolve per field: an unset field falls through to the variant.
/// The shared variant is never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantOverride {
    pub id: Uuid,
    pub variant_id: Uuid,
    pub hub_id: Uuid,
    pub price: Option<Decimal>,
    on_demand: Option<bool>,
    count_on_hand: Option<i64>,
}

impl VariantOverride {
    pub fn new(
        variant_id: Uuid,
        hub_id: Uuid,
        price: Option<Decimal>,
        on_demand: Option<bool>,
        count_on_hand: Option<i64>,
    ) -> Result<Self> {
        if let Some(price) = price {
            if price < Decimal::ZERO {
                return Err(AppError::validation(format!(
                    "Price must be non-negative, got: {}",
                    price
                )));
            }
        }

        if on_demand == Some(true) && count_on_hand.is_some() {
            return Err(AppError::validation(
                "Count on hand must be blank if on demand",
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            variant_id,
            hub_id,
            price,
            on_demand,
            count_on_hand,
        })
    }

    /// The price this hub sells the variant at
    pub fn price_for(&self, variant: &Variant) -> Decimal {
        self.price.unwrap_or(variant.price)
    }

    /// Units available at this hub; None means unlimited
    pub fn available_quantity(&self, variant: &Variant) -> Option<i64> {
        match self.on_demand {
            Some(true) => None,
            Some(false) => Some(self.count_on_hand.unwrap_or(0)),
            None => match self.count_on_hand {
                Some(count) => Some(count),
                None => variant.available_quantity(),
            },
        }
    }
}

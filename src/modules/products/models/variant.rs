use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{AppError, Result};

/// The dimension a variant is sold in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantUnit {
    Weight,
    Volume,
    Items,
}

impl std::fmt::Display for VariantUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariantUnit::Weight => write!(f, "weight"),
            VariantUnit::Volume => write!(f, "volume"),
            VariantUnit::Items => write!(f, "items"),
        }
    }
}

/// A sellable product variant.
///
/// `unit_value` is stored in canonical base units (grams for weight, litres
/// for volume); `variant_unit_scale` records the display scale chosen at
/// creation, e.g. 1000 for kg. Items carry a free-text unit name and a
/// scale of 1.
///
/// Stock runs in exactly one mode: a finite `count_on_hand`, or `on_demand`
/// with unlimited availability and a blank count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub id: Uuid,
    pub name: String,
    pub supplier_id: Uuid,
    pub price: Decimal,
    pub variant_unit: VariantUnit,
    pub variant_unit_scale: Decimal,
    pub variant_unit_name: Option<String>,
    /// Quantity per unit sold, in canonical base units
    pub unit_value: Decimal,
    /// Shipping weight per unit, in kilograms
    pub weight: Decimal,
    on_demand: bool,
    count_on_hand: Option<i64>,
    pub tax_category_id: Option<Uuid>,
    /// Bulk-buy bundle size in base units, when the product is group-buyable
    pub group_buy_unit_size: Option<Decimal>,
}

impl Variant {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        supplier_id: Uuid,
        price: Decimal,
        variant_unit: VariantUnit,
        variant_unit_scale: Decimal,
        unit_value: Decimal,
        on_demand: bool,
        count_on_hand: Option<i64>,
    ) -> Result<Self> {
        if price < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Price must be non-negative, got: {}",
                price
            )));
        }

        if variant_unit_scale <= Decimal::ZERO {
            return Err(AppError::validation("Unit scale must be positive"));
        }

        Self::validate_stock(on_demand, count_on_hand)?;

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            supplier_id,
            price,
            variant_unit,
            variant_unit_scale,
            variant_unit_name: None,
            unit_value,
            weight: Decimal::ZERO,
            on_demand,
            count_on_hand,
            tax_category_id: None,
            group_buy_unit_size: None,
        })
    }

    pub fn on_demand(&self) -> bool {
        self.on_demand
    }

    pub fn count_on_hand(&self) -> Option<i64> {
        self.count_on_hand
    }

    /// Switch stock mode, holding the invariant that an on-demand variant
    /// carries no count
    pub fn set_stock(&mut self, on_demand: bool, count_on_hand: Option<i64>) -> Result<()> {
        Self::validate_stock(on_demand, count_on_hand)?;
        self.on_demand = on_demand;
        self.count_on_hand = count_on_hand;
        Ok(())
    }

    /// Units available for sale; None means unlimited (on demand)
    pub fn available_quantity(&self) -> Option<i64> {
        if self.on_demand {
            None
        } else {
            Some(self.count_on_hand.unwrap_or(0))
        }
    }

    /// Restock after a cancellation
    pub fn restock(&mut self, quantity: i64) {
        if !self.on_demand {
            self.count_on_hand = Some(self.count_on_hand.unwrap_or(0) + quantity);
        }
    }

    /// Change the display scale, e.g. "Weight (kg)" to "Weight (g)".
    ///
    /// The admin-entered display value is preserved, so the stored base-unit
    /// value rescales by new/old. The price never rescales.
    pub fn change_unit_scale(&mut self, new_scale: Decimal) -> Result<()> {
        if new_scale <= Decimal::ZERO {
            return Err(AppError::validation("Unit scale must be positive"));
        }

        self.unit_value = self.unit_value * new_scale / self.variant_unit_scale;
        self.variant_unit_scale = new_scale;
        Ok(())
    }

    fn validate_stock(on_demand: bool, count_on_hand: Option<i64>) -> Result<()> {
        if on_demand && count_on_hand.is_some() {
            return Err(AppError::validation(
                "Count on hand must be blank if on demand",
            ));
        }

        if let Some(count) = count_on_hand {
            if count < 0 {
                return Err(AppError::validation(format!(
                    "Count on hand must be non-negative, got: {}",
                    count
                )));
            }
        }

        Ok(())
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::products::{Variant, VariantOverride};

/// A single variant ordered on an order.
///
/// The line snapshots the variant data pricing cares about (supplier, tax
/// category, unit value, weight) so later catalog edits do not move already
/// placed orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub id: Uuid,
    pub variant_id: Uuid,
    pub variant_name: String,
    pub supplier_id: Uuid,
    pub tax_category_id: Option<Uuid>,
    pub quantity: i32,
    /// Group-buy ceiling the customer is willing to take
    pub max_quantity: Option<i32>,
    /// Price per unit
    pub price: Decimal,
    /// Shipping weight per unit, kilograms
    pub weight_per_unit: Decimal,
    /// Variant unit value in canonical base units, for group-buy aggregates
    pub unit_value: Decimal,
    /// Tax carried inside the line total under included-in-price rates.
    /// Recomputed on every recalculation pass.
    pub included_tax: Decimal,
}

impl LineItem {
    /// Snapshot a variant (with an optional hub override) into a line item
    pub fn from_variant(
        variant: &Variant,
        variant_override: Option<&VariantOverride>,
        quantity: i32,
    ) -> Result<Self> {
        Self::validate_quantity(quantity)?;

        let price = match variant_override {
            Some(vo) => vo.price_for(variant),
            None => variant.price,
        };

        Ok(Self {
            id: Uuid::new_v4(),
            variant_id: variant.id,
            variant_name: variant.name.clone(),
            supplier_id: variant.supplier_id,
            tax_category_id: variant.tax_category_id,
            quantity,
            max_quantity: None,
            price,
            weight_per_unit: variant.weight,
            unit_value: variant.unit_value,
            included_tax: Decimal::ZERO,
        })
    }

    /// Line total: price x quantity, full precision
    pub fn amount(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    /// Total shipping weight of the line, kilograms
    pub fn total_weight(&self) -> Decimal {
        self.weight_per_unit * Decimal::from(self.quantity)
    }

    pub fn set_quantity(&mut self, quantity: i32) -> Result<()> {
        Self::validate_quantity(quantity)?;
        self.quantity = quantity;
        Ok(())
    }

    fn validate_quantity(quantity: i32) -> Result<()> {
        if quantity <= 0 {
            return Err(AppError::validation(format!(
                "Quantity must be positive, got: {}",
                quantity
            )));
        }

        Ok(())
    }
}

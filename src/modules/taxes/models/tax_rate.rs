use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{AppError, Result};

/// A tax rate binds a tax category and a zone to a decimal rate.
///
/// `included_in_price` decides whether the tax is a component already inside
/// the taxed amount or an addition on top of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRate {
    pub id: Uuid,
    pub name: String,
    /// Decimal fraction, 0.10 = 10%
    pub amount: Decimal,
    pub zone_id: Uuid,
    pub tax_category_id: Uuid,
    pub included_in_price: bool,
}

impl TaxRate {
    /// Create a tax rate with validation
    pub fn new(
        name: impl Into<String>,
        amount: Decimal,
        zone_id: Uuid,
        tax_category_id: Uuid,
        included_in_price: bool,
    ) -> Result<Self> {
        Self::validate_amount(amount)?;

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            zone_id,
            tax_category_id,
            included_in_price,
        })
    }

    /// Compute the tax portion of a base amount.
    ///
    /// Included rates extract the tax from the given total, leaving the
    /// displayed price unchanged; added rates compute the amount charged on
    /// top. Full precision is retained for the caller to round at display.
    pub fn tax_portion(&self, base: Decimal) -> Decimal {
        if self.included_in_price {
            base - base / (Decimal::ONE + self.amount)
        } else {
            base * self.amount
        }
    }

    /// The rate as a percentage for labels, e.g. 0.10 -> 10
    pub fn percentage(&self) -> Decimal {
        (self.amount * Decimal::ONE_HUNDRED).normalize()
    }

    /// Label used for tax adjustments, e.g. "GST 10%"
    pub fn label(&self) -> String {
        format!("{} {}%", self.name, self.percentage())
    }

    /// Validate a tax rate is within 0..=1.0 with at most 4 decimal places
    fn validate_amount(amount: Decimal) -> Result<()> {
        if amount < Decimal::ZERO {
            return Err(AppError::validation("Tax rate cannot be negative"));
        }

        if amount > Decimal::ONE {
            return Err(AppError::validation("Tax rate cannot exceed 1.0 (100%)"));
        }

        if amount.normalize().scale() > 4 {
            return Err(AppError::validation(
                "Tax rate cannot have more than 4 decimal places",
            ));
        }

        Ok(())
    }
}

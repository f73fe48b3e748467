use rust_decimal::Decimal;

use crate::core::{AppError, Result};

/// Conversions between display units and the canonical base units used for
/// pricing, group-buy and report arithmetic.
///
/// Weight is canonical in grams, volume in litres. Items have no scale; a
/// variant sold in items carries a free-text unit name instead.
pub struct UnitConverter;

impl UnitConverter {
    /// Scale factor from a display unit to its canonical base unit
    pub fn scale_for(unit: &str) -> Result<Decimal> {
        let scale = match unit {
            // weight, canonical grams
            "g" => Decimal::ONE,
            "kg" => Decimal::new(1000, 0),
            "T" => Decimal::new(1_000_000, 0),
            "oz" => Decimal::new(2835, 2),
            "lb" => Decimal::new(4536, 1),
            // volume, canonical litres
            "mL" => Decimal::new(1, 3),
            "L" => Decimal::ONE,
            "kL" => Decimal::new(1000, 0),
            _ => {
                return Err(AppError::validation(format!("Unknown unit: {}", unit)));
            }
        };

        Ok(scale)
    }

    /// Convert a display-unit value to base units, e.g. 1.5 kg -> 1500 g
    pub fn to_base_units(value: Decimal, unit: &str) -> Result<Decimal> {
        Ok(value * Self::scale_for(unit)?)
    }

    /// Price per display unit at the scale chosen when the variant was
    /// created: price / (unit_value / scale)
    pub fn price_per_unit(price: Decimal, unit_value: Decimal, scale: Decimal) -> Result<Decimal> {
        if unit_value <= Decimal::ZERO {
            return Err(AppError::validation("Unit value must be positive"));
        }

        Ok(price / (unit_value / scale))
    }

    /// Group-buy fulfilled units: ordered quantity in base units divided by
    /// the bundle size.
    ///
    /// Items are (unit_value, quantity) pairs for every line ordered against
    /// the product. "Max fulfilled units" passes the max_quantity aggregate
    /// in place of the ordered quantity.
    pub fn fulfilled_units(items: &[(Decimal, i64)], group_buy_unit_size: Decimal) -> Result<Decimal> {
        if group_buy_unit_size <= Decimal::ZERO {
            return Err(AppError::validation("Group buy unit size must be positive"));
        }

        let total: Decimal = items
            .iter()
            .map(|(unit_value, quantity)| *unit_value * Decimal::from(*quantity))
            .sum();

        Ok(total / group_buy_unit_size)
    }
}

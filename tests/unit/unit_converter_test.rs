//! Tests for unit conversion and group-buy arithmetic
//!
//! The conversion table is fixed: weight is canonical in grams, volume in
//! litres. Price-per-unit display divides the stored price by the unit
//! value at the scale chosen when the variant was created.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use ordercalc::products::UnitConverter;

#[test]
fn test_weight_conversion_table() {
    assert_eq!(UnitConverter::to_base_units(dec!(1), "g").unwrap(), dec!(1));
    assert_eq!(
        UnitConverter::to_base_units(dec!(1), "kg").unwrap(),
        dec!(1000)
    );
    assert_eq!(
        UnitConverter::to_base_units(dec!(1), "T").unwrap(),
        dec!(1000000)
    );
    assert_eq!(
        UnitConverter::to_base_units(dec!(1), "oz").unwrap(),
        dec!(28.35)
    );
    assert_eq!(
        UnitConverter::to_base_units(dec!(1), "lb").unwrap(),
        dec!(453.6)
    );
}

#[test]
fn test_volume_conversion_table() {
    assert_eq!(
        UnitConverter::to_base_units(dec!(1), "mL").unwrap(),
        dec!(0.001)
    );
    assert_eq!(UnitConverter::to_base_units(dec!(1), "L").unwrap(), dec!(1));
    assert_eq!(
        UnitConverter::to_base_units(dec!(1), "kL").unwrap(),
        dec!(1000)
    );
}

#[test]
fn test_unknown_units_are_rejected() {
    for unit in ["stone", "gal", "KG", ""] {
        assert!(
            UnitConverter::to_base_units(dec!(1), unit).is_err(),
            "unit {:?} should be rejected",
            unit
        );
    }
}

proptest! {
    #[test]
    fn test_conversion_is_linear(
        value_milli in 0u64..10_000_000u64
    ) {
        let value = Decimal::from(value_milli) / dec!(1000);

        let single = UnitConverter::to_base_units(value, "kg").unwrap();
        let doubled = UnitConverter::to_base_units(value * dec!(2), "kg").unwrap();

        prop_assert_eq!(doubled, single * dec!(2));
    }

    #[test]
    fn test_price_per_unit_scales_back(
        price_cents in 1u64..10_000_000u64,
        units in 1u64..1_000u64
    ) {
        // a variant holding `units` kg priced at `price` displays a per-kg
        // price of price / units
        let price = Decimal::from(price_cents) / dec!(100);
        let unit_value = Decimal::from(units) * dec!(1000);

        let per_unit = UnitConverter::price_per_unit(price, unit_value, dec!(1000)).unwrap();

        prop_assert_eq!(per_unit, price / Decimal::from(units));
    }
}

#[test]
fn test_price_per_unit_requires_positive_unit_value() {
    assert!(UnitConverter::price_per_unit(dec!(4.50), Decimal::ZERO, dec!(1000)).is_err());
    assert!(UnitConverter::price_per_unit(dec!(4.50), dec!(-1), dec!(1000)).is_err());
}

#[test]
fn test_group_buy_fulfilled_units() {
    // 4 x 500 g plus 1 x 1 kg against a 2 kg bundle fulfils 1.5 units
    let ordered = vec![(dec!(500), 4), (dec!(1000), 1)];
    assert_eq!(
        UnitConverter::fulfilled_units(&ordered, dec!(2000)).unwrap(),
        dec!(1.5)
    );
}

#[test]
fn test_group_buy_max_uses_max_quantities() {
    // the same lines at their max quantities: 6 x 500 g plus 2 x 1 kg
    let max_ordered = vec![(dec!(500), 6), (dec!(1000), 2)];
    assert_eq!(
        UnitConverter::fulfilled_units(&max_ordered, dec!(2000)).unwrap(),
        dec!(2.5)
    );
}

#[test]
fn test_group_buy_requires_positive_unit_size() {
    assert!(UnitConverter::fulfilled_units(&[(dec!(500), 1)], Decimal::ZERO).is_err());
}

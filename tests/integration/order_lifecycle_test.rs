//! Integration tests for the order lifecycle
//!
//! Covers cancellation (with email/restock decisions returned to the
//! caller), resumption, stock clamping, and the editing rules around
//! shipped and canceled orders.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use ordercalc::calculators::Calculator;
use ordercalc::core::Currency;
use ordercalc::enterprise_fees::{Enterprise, EnterpriseFee, FeeType};
use ordercalc::orders::{
    CancellationOptions, Exchange, ExchangeDirection, Order, OrderAdjustmentRecalculator,
    OrderCycle, OrderState, Originator, ShipmentState, ShippingMethod,
};
use ordercalc::products::{Variant, VariantOverride, VariantUnit};
use ordercalc::taxes::TaxTable;

fn stocked_variant(name: &str, supplier_id: Uuid, price: Decimal, stock: i64) -> Variant {
    Variant::new(
        name,
        supplier_id,
        price,
        VariantUnit::Items,
        Decimal::ONE,
        Decimal::ONE,
        false,
        Some(stock),
    )
    .expect("valid variant")
}

#[test]
fn test_quantity_clamps_to_hub_stock() {
    let supplier = Uuid::new_v4();
    let variant = stocked_variant("Eggs", supplier, dec!(6), 12);
    let hub = Uuid::new_v4();

    // the hub overrides the shared stock down to 5
    let vo = VariantOverride::new(variant.id, hub, None, None, Some(5)).unwrap();

    let mut order = Order::new("R200001", Currency::USD);
    order.add_item(&variant, Some(&vo), 8).unwrap();

    assert_eq!(order.line_items[0].quantity, 5);
}

#[test]
fn test_out_of_stock_fails_instead_of_clamping_to_zero() {
    let supplier = Uuid::new_v4();
    let variant = stocked_variant("Eggs", supplier, dec!(6), 0);

    let mut order = Order::new("R200002", Currency::USD);
    assert!(order.add_item(&variant, None, 1).is_err());
}

#[test]
fn test_shipped_order_rejects_new_items() {
    let supplier = Uuid::new_v4();
    let distributor = Uuid::new_v4();
    let variant = stocked_variant("Eggs", supplier, dec!(6), 12);

    let mut order = Order::new("R200003", Currency::USD);
    order.distributor_id = Some(distributor);
    order.add_item(&variant, None, 2).unwrap();

    let method = ShippingMethod::new(
        "Pickup",
        Calculator::FlatRate { amount: dec!(0) },
        None,
        vec![distributor],
    );
    order.select_shipping_method(&method).unwrap();
    order.ship().unwrap();

    let err = order.add_item(&variant, None, 1).unwrap_err();
    assert_eq!(err.to_string(), "Cannot add item to shipped/canceled order");
    assert_eq!(order.shipment_state(), Some(ShipmentState::Shipped));
}

#[test]
fn test_cancellation_removes_fee_adjustments_and_keeps_manual_entries() {
    let supplier = Enterprise::new("Fresh Farm");
    let variant = stocked_variant("Eggs", supplier.id, dec!(6), 12);

    let fee = EnterpriseFee::new(
        "Packing",
        FeeType::Packing,
        supplier.id,
        Calculator::PerItem { amount: dec!(1) },
        None,
        false,
    )
    .unwrap();

    let coordinator = Enterprise::new("Co-op");
    let mut cycle = OrderCycle::new("Weekly", coordinator.id);
    cycle.exchanges.push(Exchange::new(
        ExchangeDirection::Incoming,
        supplier.id,
        vec![variant.id],
        vec![fee.id],
    ));

    let mut order = Order::new("R200004", Currency::USD);
    order.order_cycle = Some(cycle);
    order.add_item(&variant, None, 2).unwrap();
    order.add_manual_adjustment("Goodwill credit", dec!(-1), None).unwrap();

    let enterprises = vec![supplier, coordinator];
    let fees = vec![fee];
    let methods: Vec<ShippingMethod> = Vec::new();
    let taxes = TaxTable::default();
    let recalculator = OrderAdjustmentRecalculator::new(&enterprises, &fees, &methods, &taxes);
    recalculator.recalculate(&mut order).unwrap();

    assert!(order
        .adjustments
        .iter()
        .any(|a| matches!(a.originator, Originator::EnterpriseFee(_))));

    let outcome = order
        .cancel(CancellationOptions {
            send_email: true,
            restock: true,
        })
        .unwrap();

    assert!(order.is_canceled());
    assert!(outcome.email_queued);
    assert_eq!(outcome.restock_plan.len(), 1);
    assert_eq!(outcome.restock_plan[0].quantity, 2);

    // fee rows are gone, the manual entry stays
    assert!(!order
        .adjustments
        .iter()
        .any(|a| matches!(a.originator, Originator::EnterpriseFee(_))));
    assert!(order.adjustments.iter().any(|a| a.is_manual()));

    // recalculating a canceled order does not resurrect the fees
    recalculator.recalculate(&mut order).unwrap();
    assert!(!order
        .adjustments
        .iter()
        .any(|a| matches!(a.originator, Originator::EnterpriseFee(_))));
    assert_eq!(order.display_total(), "$11.00");
}

#[test]
fn test_canceled_order_freezes_line_items_and_adjustments() {
    let supplier = Uuid::new_v4();
    let variant = stocked_variant("Eggs", supplier, dec!(6), 12);

    let mut order = Order::new("R200005", Currency::USD);
    let line_id = order.add_item(&variant, None, 2).unwrap();
    order.cancel(CancellationOptions::default()).unwrap();

    assert!(order
        .update_item_quantity(line_id, 5, &variant, None)
        .is_err());
    assert!(order
        .remove_item(line_id, CancellationOptions::default())
        .is_err());
    assert!(order
        .add_manual_adjustment("Late fee", dec!(5), None)
        .is_err());
}

#[test]
fn test_removing_the_last_item_cancels_with_restock() {
    let supplier = Uuid::new_v4();
    let variant = stocked_variant("Eggs", supplier, dec!(6), 12);

    let mut order = Order::new("R200006", Currency::USD);
    let line_id = order.add_item(&variant, None, 3).unwrap();

    let outcome = order
        .remove_item(
            line_id,
            CancellationOptions {
                send_email: false,
                restock: true,
            },
        )
        .unwrap()
        .expect("cancellation outcome");

    assert!(order.is_canceled());
    assert!(!outcome.email_queued);
    assert_eq!(outcome.restock_plan.len(), 1);
    assert_eq!(outcome.restock_plan[0].variant_id, variant.id);
    assert_eq!(outcome.restock_plan[0].quantity, 3);

    // the caller applies the plan to its catalog
    let mut restocked = variant.clone();
    restocked.restock(outcome.restock_plan[0].quantity as i64);
    assert_eq!(restocked.count_on_hand(), Some(15));
}

#[test]
fn test_resume_returns_shipment_to_pending() {
    let supplier = Uuid::new_v4();
    let distributor = Uuid::new_v4();
    let variant = stocked_variant("Eggs", supplier, dec!(6), 12);

    let mut order = Order::new("R200007", Currency::USD);
    order.distributor_id = Some(distributor);
    order.add_item(&variant, None, 2).unwrap();

    let method = ShippingMethod::new(
        "Pickup",
        Calculator::FlatRate { amount: dec!(2.5) },
        None,
        vec![distributor],
    );
    order.select_shipping_method(&method).unwrap();
    order.ship().unwrap();

    order.cancel(CancellationOptions::default()).unwrap();
    order.resume().unwrap();

    assert_eq!(order.state(), OrderState::Resumed);
    assert_eq!(order.shipment_state(), Some(ShipmentState::Pending));
    // the captured shipping cost survives the cancel/resume round trip
    assert_eq!(order.shipment().unwrap().cost, dec!(2.5));
}

#[test]
fn test_checkout_walks_the_state_machine() {
    let mut order = Order::new("R200008", Currency::USD);

    for expected in [
        OrderState::Address,
        OrderState::Delivery,
        OrderState::Payment,
        OrderState::Complete,
    ] {
        assert_eq!(order.advance().unwrap(), expected);
    }

    assert!(order.completed_at.is_some());
    assert!(order.advance().is_err());

    order.cancel(CancellationOptions::default()).unwrap();
    assert_eq!(order.state(), OrderState::Canceled);
}

pub mod models;
pub mod services;

pub use models::{
    Address, Adjustable, Adjustment, AdjustmentState, CancellationOptions, CancellationOutcome,
    Exchange, ExchangeDirection, LineItem, Order, OrderCycle, OrderState, Originator,
    PaymentState, Shipment, ShipmentState, ShippingMethod,
};
pub use services::OrderAdjustmentRecalculator;

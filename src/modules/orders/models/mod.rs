mod address;
mod adjustment;
mod line_item;
mod order;
mod order_cycle;
mod shipment;

pub use address::Address;
pub use adjustment::{Adjustable, Adjustment, AdjustmentState, Originator};
pub use line_item::LineItem;
pub use order::{
    CancellationOptions, CancellationOutcome, Order, OrderState, PaymentState, RestockEntry,
};
pub use order_cycle::{Exchange, ExchangeDirection, OrderCycle};
pub use shipment::{Shipment, ShipmentState, ShippingMethod};

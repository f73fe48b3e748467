//! OrderCalc Fee & Tax Adjustment Engine Library
//!
//! This library provides the order fee, tax and adjustment calculation core
//! for a food-distribution marketplace admin platform. The web UI, persistence
//! and authentication layers are external collaborators: they hand this crate
//! an order-like aggregate and get back adjustments, totals and structured
//! validation errors.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::calculators;
pub use modules::enterprise_fees;
pub use modules::orders;
pub use modules::products;
pub use modules::reports;
pub use modules::subscriptions;
pub use modules::taxes;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing for embedding applications and tests.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ordercalc=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

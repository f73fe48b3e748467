pub mod models;
pub mod services;

pub use models::{Variant, VariantOverride, VariantUnit};
pub use services::UnitConverter;

pub mod models;
pub mod services;

pub use models::{TaxCategory, TaxRate, Zone};
pub use services::TaxTable;

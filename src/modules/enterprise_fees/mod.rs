pub mod models;

pub use models::{Enterprise, EnterpriseFee, FeeType};

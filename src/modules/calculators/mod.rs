pub mod models;

pub use models::{parse_numeric_preference, Calculator};

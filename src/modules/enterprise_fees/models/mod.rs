mod enterprise;
mod enterprise_fee;

pub use enterprise::Enterprise;
pub use enterprise_fee::{EnterpriseFee, FeeType};

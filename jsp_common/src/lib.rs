mod rupees;

pub mod op;
mod secret;

pub use rupees::{Rupees, RupeesConversionError, INR_CURRENCY_CODE};
pub use secret::Secret;

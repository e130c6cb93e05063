mod contact;
mod franchise;
mod order;
mod payment_log;
mod product;
mod profile;

pub use contact::*;
pub use franchise::*;
pub use order::*;
pub use payment_log::*;
pub use product::*;
pub use profile::*;

//! Domain types.

mod passphrase;
mod sync;

pub use passphrase::Passphrase;
pub use sync::{Checkout, Published, Status};

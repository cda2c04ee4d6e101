/// Public API for the 1Password CLI layer.
pub mod client;
pub mod errors;
pub mod records;

pub use client::{DEFAULT_OP_BIN, Directory, OpClient};
pub use errors::OpError;
pub use records::Member;

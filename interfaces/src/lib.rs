pub mod access;
pub mod defs;
pub mod state;

pub use access::{allowed_actions, can};
pub use defs::*;
pub use state::{ContentStore, StoreError};

//! Command implementations

pub mod restore;
pub mod save;

pub use restore::execute as restore;
pub use save::execute as save;

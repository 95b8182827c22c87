//! Paginated asset loading and the two scroll triggers that drive it.

pub mod loader;
pub mod state;
pub mod trigger;

#[cfg(test)]
pub mod testing;

pub use loader::*;
pub use state::FeedState;
pub use trigger::*;

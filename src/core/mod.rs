//! Core vocabulary of the transition engine.
//!
//! - States via the `State` trait
//! - Phases, categories and dispatch paths that key the handler registry
//! - The ordering template that sequences lifecycle phases
//!
//! Nothing in this module runs handlers; it only names things.

mod order;
mod path;
mod state;

pub use order::{Order, OrderError, OrderToken, Subject};
pub use path::{Category, DispatchPath, PathName, Phase};
pub use state::State;

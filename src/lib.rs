//! lifecycle-fsm: an ordered lifecycle-handler engine for finite state machines
//!
//! Given a current state, an action and a target state, the engine builds a
//! queue of lifecycle handlers and dispatches them one at a time. Any handler
//! may let the transition proceed, pause it until something calls `resume`, or
//! cancel it.
//!
//! # Core Concepts
//!
//! - **Dispatch paths**: `category.name.phase` addresses such as `state.Open.enter`
//!   or the wildcard `action.*.start`
//! - **Order**: the template deciding which paths a transition visits and in what order
//! - **Transition**: the queue of bound handlers plus its pause and settle status
//! - **StateMachine**: a reference owner that commits `to` on completion and
//!   stays in `from` on cancellation
//!
//! # Example
//!
//! ```rust
//! use lifecycle_fsm::core::{DispatchPath, Phase};
//! use lifecycle_fsm::dispatch::Event;
//! use lifecycle_fsm::machine::StateMachine;
//! use lifecycle_fsm::state_enum;
//! use serde_json::Value;
//! use std::sync::{Arc, Mutex};
//!
//! state_enum! {
//!     pub enum Door {
//!         Closed,
//!         Open,
//!     }
//! }
//!
//! let log = Arc::new(Mutex::new(Vec::new()));
//! let machine = StateMachine::builder()
//!     .initial(Door::Closed)
//!     .target(())
//!     .transition("open", Door::Closed, Door::Open)
//!     .build()
//!     .unwrap();
//!
//! for phase in [Phase::Start, Phase::Leave, Phase::Enter, Phase::End] {
//!     let log = Arc::clone(&log);
//!     machine.on(
//!         DispatchPath::any(phase),
//!         move |event: &Event<Door>, _: &(), _: &[Value]| {
//!             log.lock().unwrap().push(event.path().to_string());
//!         },
//!     );
//! }
//!
//! machine.fire("open", Vec::new()).unwrap();
//!
//! assert_eq!(machine.state(), Door::Open);
//! assert_eq!(
//!     *log.lock().unwrap(),
//!     vec!["action.*.start", "state.*.leave", "state.*.enter", "action.*.end"]
//! );
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod dispatch;
pub mod machine;
pub mod snapshot;

mod sync;

// Re-export commonly used types
pub use builder::{BuildError, Machine, StateMachineBuilder, TransitionBuilder};
pub use config::{ConfigError, EngineConfig};
pub use core::{DispatchPath, Order, OrderError, Phase, State};
pub use dispatch::{Event, HandlerOutcome, HandlerRegistry, Transition, TransitionError};
pub use machine::{MachineError, StateMachine};
pub use snapshot::{MachineSnapshot, SnapshotError};

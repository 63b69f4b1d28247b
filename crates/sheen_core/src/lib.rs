//! Sheen Core
//!
//! Foundational primitives shared by the Sheen motion runtime:
//!
//! - **Geometry**: points and rectangles used for layout snapshots
//! - **Event Dispatch**: pointer, scroll, resize and lifecycle events
//! - **State Machines**: flat statecharts for UI status flows
//! - **Scoped Teardown**: disposers that run when a section unmounts
//!
//! # Example
//!
//! ```rust
//! use sheen_core::lifecycle::Scope;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let disposed = Rc::new(Cell::new(false));
//! let mut scope = Scope::new("hero");
//!
//! let flag = disposed.clone();
//! scope.defer(move || flag.set(true));
//!
//! scope.dispose();
//! assert!(disposed.get());
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;
pub mod lifecycle;

pub use events::{Event, EventData, EventDispatcher, EventType};
pub use fsm::{EventId, StateId, StateMachine, Transition};
pub use geometry::{Point, Rect, Size};
pub use lifecycle::Scope;

//! Core primitives for the napkin outline.
//!
//! This crate provides the foundations the outline crate builds on:
//!
//! - **Object identity**: [`ObjectId`] handles and [`ObjectKind`]
//! - **Signal/Slot System**: synchronous change notifications
//! - **Errors**: [`OutlineError`] and the [`Result`] alias
//! - **Logging**: `tracing` targets and tree formatting options
//!
//! # Signal Example
//!
//! ```
//! use napkin_outline_core::Signal;
//!
//! let layout_changed = Signal::<()>::new();
//! layout_changed.connect(|_| println!("re-query the view"));
//! layout_changed.emit(());
//! ```

mod error;
pub mod logging;
pub mod object;
pub mod signal;

pub use error::{OutlineError, Result};
pub use logging::{PerfSpan, TreeFormatOptions, TreeStyle};
pub use object::{ObjectId, ObjectKind};
pub use signal::{ConnectionId, Signal};

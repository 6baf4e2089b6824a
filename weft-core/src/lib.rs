//! Weft Core Library
//!
//! This crate provides the foundational types for the weft dataflow engine.
//!
//! # Overview
//!
//! Weft executes directed acyclic graphs of computational nodes that exchange
//! data through a shared, typed key-value workspace. This crate holds the
//! pieces every other layer builds on:
//!
//! - **Workspace**: concurrent name→value map with typed retrieval
//! - **Value**: type-erased value container and the control-signal marker
//! - **Node**: the node trait, the immutable node spec, and a closure adapter
//! - **Error**: the `WeftError` taxonomy shared by the whole workspace
//! - **Logging**: process-wide leveled logger with a background drain thread
//!
//! # Example
//!
//! ```
//! use weft_core::prelude::*;
//!
//! let ws = Workspace::new();
//! ws.set("answer", 42_i64);
//! assert_eq!(ws.get::<i64>("answer").unwrap(), 42);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod logging;
pub mod node;
pub mod prelude;
pub mod value;
pub mod workspace;

pub use error::{Result, WeftError};
pub use node::{FnNode, Node, NodeSpec};
pub use value::{AnyValue, ControlSignal};
pub use workspace::Workspace;

//! Prelude for convenient imports.
//!
//! ```
//! use weft_core::prelude::*;
//! ```

pub use crate::error::{Result, WeftError};
pub use crate::logging::{LogLevel, Logger};
pub use crate::node::{FnNode, Node, NodeSpec};
pub use crate::value::{AnyValue, ControlSignal};
pub use crate::workspace::Workspace;

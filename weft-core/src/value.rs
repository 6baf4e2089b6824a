//! Type-erased values and the control-signal marker.
//!
//! Nodes exchange arbitrary Rust values through the workspace, so the stored
//! form is erased behind [`AnyValue`]. Retrieval recovers the concrete type
//! by downcast and fails cleanly on a mismatch rather than guessing.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A cheaply cloneable, type-erased value.
///
/// The payload is shared behind an [`Arc`], so cloning an `AnyValue` never
/// copies user data. The stored type's name is kept alongside the payload
/// for mismatch diagnostics.
#[derive(Clone)]
pub struct AnyValue {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl AnyValue {
    /// Wrap a value.
    pub fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Name of the stored type, as reported by `std::any::type_name`.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether the stored value is a `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Borrow the stored value as a `T`, if it is one.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyValue")
            .field("type", &self.type_name)
            .finish()
    }
}

/// Zero-content sentinel carried on control edges.
///
/// Writing a `ControlSignal` under a key marks the branch guarded by that
/// key as live; a branch whose control key is absent when it becomes ready
/// is pruned instead of executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlSignal;

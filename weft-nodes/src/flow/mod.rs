//! Flow control nodes.

mod collect;
mod router;

pub use collect::FirstPresentNode;
pub use router::ThresholdRouterNode;

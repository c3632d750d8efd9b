pub(crate) mod formatspecific;
mod node;
pub use formatspecific::FormatSpecific;
pub use node::{Node, NodeType};

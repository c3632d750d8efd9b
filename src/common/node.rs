use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
/// The type of a node in a path
pub enum NodeType {
    /// Start of an open path
    Move,
    /// End of a straight segment
    Line,
    /// A control point
    OffCurve,
    /// End of a cubic segment
    Curve,
    /// End of a quadratic segment
    QCurve,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A node in a path
pub struct Node {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Node type
    pub nodetype: NodeType,
    /// Whether the node is smooth
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub smooth: bool,
}

impl Node {
    /// Create an on-curve line node
    pub fn new_line(x: f64, y: f64) -> Self {
        Node {
            x,
            y,
            nodetype: NodeType::Line,
            smooth: false,
        }
    }
}

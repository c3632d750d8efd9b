use crate::common::{FormatSpecific, Node};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A component in a glyph
///
/// The reference is a glyph *name*, not a handle: it is resolved through the
/// font every time it is used, and may point at a glyph which does not exist.
pub struct Component {
    /// The referenced glyph name
    pub reference: SmolStr,
    /// The transformation applied to the component
    #[serde(
        default = "default_transform",
        skip_serializing_if = "crate::serde_helpers::is_identity"
    )]
    pub transform: kurbo::Affine,
    /// Format-specific data
    #[serde(default, skip_serializing_if = "FormatSpecific::is_empty")]
    pub format_specific: FormatSpecific,
}

fn default_transform() -> kurbo::Affine {
    kurbo::Affine::IDENTITY
}

impl Component {
    /// Create a new component referencing the given glyph, untransformed
    pub fn new(reference: impl Into<SmolStr>) -> Self {
        Component {
            reference: reference.into(),
            transform: kurbo::Affine::IDENTITY,
            format_specific: FormatSpecific::default(),
        }
    }

    /// Move the component by the given offset
    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.transform = kurbo::Affine::translate((x, y)) * self.transform;
        self
    }

    /// The position offset of the component
    pub fn offset(&self) -> kurbo::Vec2 {
        self.transform.translation()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// A path in a glyph
pub struct Path {
    /// A list of nodes in the path
    pub nodes: Vec<Node>,
    /// Whether the path is closed
    #[serde(default)]
    pub closed: bool,
    /// Format-specific data
    #[serde(default, skip_serializing_if = "FormatSpecific::is_empty")]
    pub format_specific: FormatSpecific,
}

impl Path {
    /// Create a closed path made of straight lines through the given points
    pub fn closed_polygon(points: &[(f64, f64)]) -> Self {
        Path {
            nodes: points.iter().map(|&(x, y)| Node::new_line(x, y)).collect(),
            closed: true,
            format_specific: FormatSpecific::default(),
        }
    }
}

/// A shape in a glyph, either a component or a path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Shape {
    /// A component in a glyph
    Component(Component),
    /// A path in a glyph
    Path(Path),
}

impl From<Component> for Shape {
    fn from(c: Component) -> Self {
        Shape::Component(c)
    }
}

impl From<Path> for Shape {
    fn from(p: Path) -> Self {
        Shape::Path(p)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_shape_serde_untagged() {
        let shapes = vec![
            Shape::Component(Component::new("ring").with_offset(120.0, 0.0)),
            Shape::Path(Path::closed_polygon(&[(0.0, 0.0), (100.0, 0.0), (50.0, 80.0)])),
        ];
        let serialized = serde_json::to_string(&shapes).unwrap();
        let deserialized: Vec<Shape> = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, shapes);
    }

    #[test]
    fn test_identity_transform_is_omitted() {
        let serialized = serde_json::to_string(&Component::new("a")).unwrap();
        assert_eq!(serialized, r#"{"reference":"a"}"#);
        let component: Component = serde_json::from_str(&serialized).unwrap();
        assert_eq!(component.transform, kurbo::Affine::IDENTITY);
    }

    #[test]
    fn test_offset() {
        let component = Component::new("a").with_offset(10.0, 20.0).with_offset(5.0, 0.0);
        assert_eq!(component.offset(), kurbo::Vec2::new(15.0, 20.0));
    }
}

use crate::{
    common::FormatSpecific,
    condition::{is_bracket_name, BracketCondition},
    shape::Shape,
    Component, Path,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
/// How a layer relates to the font's masters
pub enum LayerType {
    /// The main layer for the master with this ID
    DefaultForMaster(String),
    /// An extra layer (bracket, brace, backup...) belonging to the master with this ID
    AssociatedWithMaster(String),
    /// A layer not tied to any master
    #[default]
    FreeFloating,
}
impl LayerType {
    /// Is this the default (free floating) layer type?
    pub fn is_default(&self) -> bool {
        matches!(self, LayerType::FreeFloating)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// A layer of a glyph
pub struct Layer {
    /// Advance width
    pub width: f32,
    /// The layer's name; bracket layers carry their condition here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The layer's ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Which master the layer belongs to
    #[serde(default, skip_serializing_if = "LayerType::is_default")]
    pub master: LayerType,
    /// Paths and components
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<Shape>,
    /// Format-specific data
    #[serde(default, skip_serializing_if = "FormatSpecific::is_empty")]
    pub format_specific: FormatSpecific,
}

impl Layer {
    /// Create an empty layer with the given advance width
    pub fn new(width: f32) -> Layer {
        Layer {
            width,
            ..Default::default()
        }
    }

    /// Create the main layer for a master; the layer ID is the master ID
    pub fn master_layer(master_id: &str, width: f32) -> Layer {
        Layer {
            width,
            id: Some(master_id.to_string()),
            master: LayerType::DefaultForMaster(master_id.to_string()),
            ..Default::default()
        }
    }

    /// Create a bracket layer for a master
    pub fn bracket_layer(master_id: &str, layer_id: &str, name: &str, width: f32) -> Layer {
        Layer {
            width,
            name: Some(name.to_string()),
            id: Some(layer_id.to_string()),
            master: LayerType::AssociatedWithMaster(master_id.to_string()),
            ..Default::default()
        }
    }

    /// Does this layer's name carry a design-space condition?
    pub fn is_conditional(&self) -> bool {
        self.name.as_deref().is_some_and(is_bracket_name)
    }

    /// The condition encoded in this layer's name, if any
    pub fn condition(&self, default_suffix: &str) -> Option<BracketCondition> {
        self.name
            .as_deref()
            .and_then(|name| BracketCondition::parse(name, default_suffix))
    }

    /// The ID of the master this layer belongs to, whichever way it belongs
    pub fn associated_master_id(&self) -> Option<&str> {
        match &self.master {
            LayerType::DefaultForMaster(id) | LayerType::AssociatedWithMaster(id) => Some(id),
            LayerType::FreeFloating => None,
        }
    }

    /// A name to use in log messages
    pub fn debug_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("<unnamed layer>")
    }

    /// Iterate over the layer's components
    pub fn components(&self) -> impl DoubleEndedIterator<Item = &Component> {
        self.shapes.iter().filter_map(|x| {
            if let Shape::Component(c) = x {
                Some(c)
            } else {
                None
            }
        })
    }

    /// Iterate mutably over the layer's components
    pub fn components_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut Component> {
        self.shapes.iter_mut().filter_map(|x| {
            if let Shape::Component(c) = x {
                Some(c)
            } else {
                None
            }
        })
    }

    /// Iterate over the layer's paths
    pub fn paths(&self) -> impl DoubleEndedIterator<Item = &Path> {
        self.shapes.iter().filter_map(|x| {
            if let Shape::Path(p) = x {
                Some(p)
            } else {
                None
            }
        })
    }

    /// Add a component to the layer
    pub fn push_component(&mut self, c: Component) {
        self.shapes.push(Shape::Component(c))
    }

    /// Add a path to the layer
    pub fn push_path(&mut self, p: Path) {
        self.shapes.push(Shape::Path(p))
    }
}

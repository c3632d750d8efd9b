use crate::{
    common::FormatSpecific,
    layer::{Layer, LayerType},
    serde_helpers::{default_true, is_true},
};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::{
    collections::HashSet,
    ops::{Deref, DerefMut},
};

const KEY_COLOR: &str = "color";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// A list of glyphs in the font
pub struct GlyphList(pub Vec<Glyph>);
impl GlyphList {
    /// Get a glyph by name
    pub fn get(&self, g: &str) -> Option<&Glyph> {
        self.0.iter().find(|&glyph| glyph.name == g)
    }
    /// Get a glyph by name, mutably
    pub fn get_mut(&mut self, g: &str) -> Option<&mut Glyph> {
        self.0.iter_mut().find(|glyph| glyph.name == g)
    }
    /// Is there a glyph with this name?
    pub fn contains(&self, g: &str) -> bool {
        self.get(g).is_some()
    }
    /// Get an iterator over the glyphs
    pub fn iter(&self) -> std::slice::Iter<'_, Glyph> {
        self.0.iter()
    }
    /// The names of all glyphs, as a set
    pub fn names(&self) -> HashSet<SmolStr> {
        self.0.iter().map(|g| g.name.clone()).collect()
    }
}

impl Deref for GlyphList {
    type Target = Vec<Glyph>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl DerefMut for GlyphList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
/// The category of a glyph
pub enum GlyphCategory {
    /// A base glyph
    Base,
    /// A mark glyph
    Mark,
    /// An unknown / un-set category
    #[default]
    Unknown,
    /// A ligature glyph
    Ligature,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
/// A glyph in the font
pub struct Glyph {
    /// The name of the glyph
    pub name: SmolStr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// The production name of the glyph, if any
    pub production_name: Option<SmolStr>,
    /// The category of the glyph
    #[serde(default)]
    pub category: GlyphCategory,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    /// Unicode codepoints assigned to the glyph
    pub codepoints: Vec<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    /// The layers in the glyph
    ///
    /// These include master layers as well as bracket layers and other
    /// master-associated layers.
    pub layers: Vec<Layer>,
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    /// Whether the glyph is exported
    pub exported: bool,
    /// Format-specific data
    #[serde(default, skip_serializing_if = "FormatSpecific::is_empty")]
    pub format_specific: FormatSpecific,
}

impl Glyph {
    /// Create a new Glyph with the given name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            exported: true,
            ..Default::default()
        }
    }

    /// The main layer for the given master
    pub fn master_layer(&self, master_id: &str) -> Option<&Layer> {
        self.layers
            .iter()
            .find(|l| matches!(&l.master, LayerType::DefaultForMaster(m) if m == master_id))
    }
    /// The main layer for the given master, mutably
    pub fn master_layer_mut(&mut self, master_id: &str) -> Option<&mut Layer> {
        self.layers
            .iter_mut()
            .find(|l| matches!(&l.master, LayerType::DefaultForMaster(m) if m == master_id))
    }

    /// Does any layer of this glyph carry a design-space condition?
    pub fn has_conditional_layers(&self) -> bool {
        self.layers.iter().any(|l| l.is_conditional())
    }

    /// Iterate over the bracket layers of this glyph
    pub fn conditional_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(|l| l.is_conditional())
    }

    /// Remove all bracket layers, returning how many were removed
    pub fn remove_conditional_layers(&mut self) -> usize {
        let before = self.layers.len();
        self.layers.retain(|l| !l.is_conditional());
        before - self.layers.len()
    }

    /// The Glyphs color index of this glyph, if set
    pub fn color(&self) -> Option<u8> {
        self.format_specific
            .get(KEY_COLOR)
            .and_then(|x| x.as_u64())
            .and_then(|x| u8::try_from(x).ok())
    }

    /// Set the Glyphs color index of this glyph
    pub fn set_color(&mut self, color: u8) {
        self.format_specific
            .insert(KEY_COLOR.to_string(), serde_json::Value::from(color));
    }

    /// A copy of this glyph under a new name
    ///
    /// The copy has no codepoints and no production name; only the original
    /// is reachable from the cmap.
    pub fn duplicate_as(&self, name: &str) -> Glyph {
        Glyph {
            name: name.into(),
            production_name: None,
            codepoints: vec![],
            ..self.clone()
        }
    }
}

use std::collections::{BTreeSet, HashMap};

use smol_str::SmolStr;

use crate::Font;

/// Which glyphs use which other glyphs as components
///
/// Maps a glyph name to the names of every glyph which references it from
/// any layer. Referenced names need not exist in the font. This is derived
/// data: any change to a glyph's shapes invalidates it, so build it fresh
/// each time it is needed.
#[derive(Debug, Clone, Default)]
pub struct ComponentUsage {
    users: HashMap<SmolStr, BTreeSet<SmolStr>>,
}

impl ComponentUsage {
    /// Build the usage graph with one pass over every component in the font
    pub fn from_font(font: &Font) -> Self {
        let mut users: HashMap<SmolStr, BTreeSet<SmolStr>> = HashMap::new();
        for glyph in font.glyphs.iter() {
            for layer in &glyph.layers {
                for component in layer.components() {
                    users
                        .entry(component.reference.clone())
                        .or_default()
                        .insert(glyph.name.clone());
                }
            }
        }
        log::debug!(
            "Built component usage graph: {} glyphs used as components",
            users.len()
        );
        ComponentUsage { users }
    }

    /// The glyphs which use the given glyph as a component
    pub fn users_of(&self, glyph: &str) -> impl Iterator<Item = &SmolStr> {
        self.users.get(glyph).into_iter().flatten()
    }

    /// Is the given glyph used as a component anywhere?
    pub fn is_used(&self, glyph: &str) -> bool {
        self.users.get(glyph).is_some_and(|u| !u.is_empty())
    }
}

use crate::{
    common::FormatSpecific, features::Features, glyph::GlyphList, instance::Instance,
    master::Master, SwitchShapesError,
};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A representation of a font source
pub struct Font {
    /// Units per em
    pub upm: u16,
    /// Font version as (major, minor)
    pub version: (u16, u16),
    /// A list of named/static instances
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instances: Vec<Instance>,
    /// A list of the font's masters
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub masters: Vec<Master>,
    /// A list of the font's glyphs
    pub glyphs: GlyphList,
    /// An optional note about the font
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// The font's creation date
    pub date: chrono::DateTime<chrono::Utc>,
    /// A representation of the font's OpenType features
    #[serde(default)]
    pub features: Features,
    /// Format-specific data
    #[serde(default, skip_serializing_if = "FormatSpecific::is_empty")]
    pub format_specific: FormatSpecific,
    /// The file this font was loaded from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Font {
    fn default() -> Self {
        Self::new()
    }
}

impl Font {
    /// Create a new, empty font
    pub fn new() -> Self {
        Font {
            upm: 1000,
            version: (1, 0),
            instances: vec![],
            masters: vec![],
            glyphs: GlyphList(vec![]),
            note: None,
            date: chrono::Utc::now(),
            features: Features::default(),
            format_specific: FormatSpecific::default(),
            source: None,
        }
    }

    /// Find an instance by name
    pub fn instance(&self, name: &str) -> Option<&Instance> {
        self.instances.iter().find(|i| i.name == name)
    }

    /// The names of every glyph in the font
    pub fn glyph_names(&self) -> HashSet<SmolStr> {
        self.glyphs.names()
    }

    /// Save the font to a file
    ///
    /// The format is chosen from the file extension; `.babelfont` and
    /// `.json` files are written as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SwitchShapesError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("babelfont") | Some("json") => {
                let buffered = std::io::BufWriter::new(std::fs::File::create(path)?);
                serde_json::to_writer_pretty(buffered, self)?;
                Ok(())
            }
            _ => Err(SwitchShapesError::UnknownFileType {
                path: path.to_path_buf(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::Glyph;

    #[test]
    fn test_glyph_names() {
        let mut font = Font::new();
        font.glyphs.push(Glyph::new("a"));
        font.glyphs.push(Glyph::new("a.switch"));
        let names = font.glyph_names();
        assert_eq!(names.len(), 2);
        assert!(names.contains("a.switch"));
        assert!(!names.contains("b"));
    }

    #[test]
    fn test_save_unknown_extension() {
        let font = Font::new();
        assert!(matches!(
            font.save("font.glyphs"),
            Err(SwitchShapesError::UnknownFileType { .. })
        ));
    }
}

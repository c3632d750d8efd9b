use crate::{filters::FontFilter, Shape};
use regex::Regex;
use std::collections::HashSet;

/// A filter that removes glyphs matching wildcard patterns, the way a static
/// export applies a "Remove Glyphs" parameter
///
/// `*` matches any run of characters; every other character matches itself.
/// Components referencing a removed glyph are dropped from the glyphs which
/// remain.
pub struct RemoveGlyphs(Vec<Regex>);

impl RemoveGlyphs {
    /// Create a new RemoveGlyphs filter
    pub fn new(patterns: Vec<String>) -> Result<Self, crate::SwitchShapesError> {
        patterns
            .iter()
            .map(String::as_str)
            .map(wildcard_to_regex)
            .collect::<Result<Vec<_>, _>>()
            .map(RemoveGlyphs)
    }

    fn matches(&self, name: &str) -> bool {
        self.0.iter().any(|re| re.is_match(name))
    }
}

fn wildcard_to_regex(pattern: &str) -> Result<Regex, crate::SwitchShapesError> {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Regex::new(&format!("^{}$", body)).map_err(|e| {
        crate::SwitchShapesError::FilterError(format!("Bad pattern {}: {}", pattern, e))
    })
}

impl FontFilter for RemoveGlyphs {
    fn apply(&self, font: &mut crate::Font) -> Result<(), crate::SwitchShapesError> {
        let removed: HashSet<_> = font
            .glyphs
            .iter()
            .filter(|g| self.matches(&g.name))
            .map(|g| g.name.clone())
            .collect();
        log::info!("Removing {} glyphs", removed.len());
        font.glyphs.retain(|g| !removed.contains(&g.name));

        for glyph in font.glyphs.iter_mut() {
            for layer in &mut glyph.layers {
                let before = layer.shapes.len();
                layer.shapes.retain(|shape| match shape {
                    Shape::Component(c) => !removed.contains(&c.reference),
                    Shape::Path(_) => true,
                });
                if layer.shapes.len() != before {
                    log::debug!(
                        "Dropped {} components of removed glyphs from {}",
                        before - layer.shapes.len(),
                        glyph.name
                    );
                }
            }
        }
        Ok(())
    }

    fn from_str(s: &str) -> Result<Self, crate::SwitchShapesError>
    where
        Self: Sized,
    {
        RemoveGlyphs::new(
            s.split([',', '\n'])
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
        )
    }

    #[cfg(feature = "cli")]
    fn arg() -> clap::Arg
    where
        Self: Sized,
    {
        clap::Arg::new("removeglyphs")
            .long("remove-glyphs")
            .help("Remove glyphs matching the given patterns (comma-separated, * is a wildcard)")
            .value_name("PATTERNS")
            .action(clap::ArgAction::Append)
    }
}

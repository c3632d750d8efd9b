use crate::filters::FontFilter;
use regex::Regex;
use smol_str::SmolStr;
use std::{collections::HashMap, sync::LazyLock};

// Comments, glyph names, plus class and escaped names so that comments and
// classes can be left alone.
// The generated code is in the Glyphs dialect (`#ifdef VARIABLE`, `condition`),
// which a feature file parser would reject, so names are matched textually.
#[allow(clippy::unwrap_used)]
static GLYPH_NAME_MATCHER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[^\n]*|[@\\]?[\w.\-]+").unwrap());

/// A filter that swaps glyph names pairwise, the way a static export
/// applies a "Rename Glyphs" parameter
///
/// For each `a=b` pair the glyph called `a` becomes `b` and the glyph called
/// `b` becomes `a`. Component references and glyph names in the feature code
/// follow.
pub struct RenameGlyphs(Vec<(SmolStr, SmolStr)>);

impl RenameGlyphs {
    /// Create a new RenameGlyphs filter
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        RenameGlyphs(
            pairs
                .into_iter()
                .map(|(k, v)| (SmolStr::from(k), SmolStr::from(v)))
                .collect(),
        )
    }

    /// Parse a "Rename Glyphs" value: comma-separated `old=new` pairs
    pub fn parse_pairs(s: &str) -> Vec<(String, String)> {
        s.split(',')
            .flat_map(|x| x.split_once('='))
            .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
            .filter(|(k, v)| !k.is_empty() && !v.is_empty())
            .collect()
    }

    fn rename_token(token: &str, mapping: &HashMap<SmolStr, SmolStr>) -> String {
        if token.starts_with('@') || token.starts_with('#') {
            return token.to_string();
        }
        let (escape, name) = match token.strip_prefix('\\') {
            Some(name) => ("\\", name),
            None => ("", token),
        };
        if let Some(new_name) = mapping.get(name) {
            return format!("{}{}", escape, new_name);
        }
        // A glyph range, `a-z`
        if let Some((first, last)) = name.split_once('-') {
            if mapping.contains_key(first) || mapping.contains_key(last) {
                let first = mapping.get(first).map(|n| n.as_str()).unwrap_or(first);
                let last = mapping.get(last).map(|n| n.as_str()).unwrap_or(last);
                return format!("{}{}-{}", escape, first, last);
            }
        }
        token.to_string()
    }

    fn mapping(&self) -> HashMap<SmolStr, SmolStr> {
        let mut mapping = HashMap::new();
        for (old, new) in &self.0 {
            mapping.insert(old.clone(), new.clone());
            mapping.insert(new.clone(), old.clone());
        }
        mapping
    }
}

impl FontFilter for RenameGlyphs {
    fn apply(&self, font: &mut crate::Font) -> Result<(), crate::SwitchShapesError> {
        log::info!("Renaming glyphs: {:?}", self.0);
        let mapping = self.mapping();
        // Update glyph names
        for glyph in font.glyphs.iter_mut() {
            if let Some(new_name) = mapping.get(&glyph.name) {
                log::debug!("Renaming glyph {} to {}", glyph.name, new_name);
                glyph.name = new_name.clone();
            }
        }

        // Update component references
        for glyph in font.glyphs.iter_mut() {
            for layer in &mut glyph.layers {
                for comp in layer.components_mut() {
                    if let Some(new_ref) = mapping.get(&comp.reference) {
                        log::debug!(
                            "Updating component reference {} to {} in glyph {}",
                            comp.reference,
                            new_ref,
                            glyph.name
                        );
                        comp.reference = new_ref.clone();
                    }
                }
            }
        }

        // Update features
        font.features.map_code(|code| {
            GLYPH_NAME_MATCHER
                .replace_all(code, |caps: &regex::Captures| {
                    RenameGlyphs::rename_token(&caps[0], &mapping)
                })
                .to_string()
        });

        Ok(())
    }

    fn from_str(s: &str) -> Result<Self, crate::SwitchShapesError>
    where
        Self: Sized,
    {
        Ok(RenameGlyphs::new(RenameGlyphs::parse_pairs(s)))
    }

    #[cfg(feature = "cli")]
    fn arg() -> clap::Arg
    where
        Self: Sized,
    {
        clap::Arg::new("renameglyphs")
            .long("rename-glyphs")
            .help("Swap glyph names (comma-separated list of old=new pairs)")
            .value_name("GLYPHS")
            .action(clap::ArgAction::Append)
    }
}

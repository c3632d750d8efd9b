//! Turn bracket layers into alternate glyphs
//!
//! Variable fonts built from Glyphs sources switch glyph shapes at points in
//! the design space through bracket layers. Some toolchains cannot compile
//! bracket layers, and static exports ignore them. [`switch_shapes`] rewrites
//! a font so that each glyph with bracket layers gets a suffixed alternate
//! glyph holding the bracket shapes. Every composite using such a glyph, at
//! any depth, gets a suffixed copy whose components point at the alternates.
//! It then writes conditional substitution rules and instance export
//! parameters that select the alternates.
//!
//! The passes run in a fixed order: discovery, component usage, closure,
//! synthesis, reference rewriting, feature code, export parameters and
//! finally (optionally) erasing the original bracket layers.
//! Running the pipeline again on its own output creates nothing new.
mod closure;
mod feature_code;
mod parameters;
mod report;
mod rewrite;
mod synthesize;
#[cfg(test)]
pub(crate) mod test_fonts;
mod usage;

pub use closure::dependents;
pub use feature_code::{write_feature_code, Substitution, SubstitutionTable, FEATURE_TAGS};
pub use parameters::{ExportParameters, REMOVE_GLYPHS, RENAME_GLYPHS};
pub use report::{overview, BracketLayerReport, SwitchReport};
pub use rewrite::rewrite_references;
pub use synthesize::{synthesize, SynthesisOutcome};
pub use usage::ComponentUsage;

use smol_str::SmolStr;

use crate::{condition::DEFAULT_SUFFIX, Font, SwitchShapesError};

/// The Glyphs color index given to alternates made from bracket layers
pub const ALTERNATE_COLOR: u8 = 7;

/// How a run of [`switch_shapes`] behaves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchOptions {
    /// Suffix for the alternate glyphs, with its leading dot
    pub suffix: String,
    /// Write `rlig` and `rvrn` substitutions
    pub generate_feature_code: bool,
    /// Add "Remove Glyphs" and "Rename Glyphs" to exportable instances
    pub add_export_parameters: bool,
    /// Remove the bracket layers from the original glyphs afterwards
    ///
    /// This is the only step which changes glyphs other than the new
    /// alternates, and it makes a second run find nothing to do.
    pub erase_bracket_layers: bool,
    /// Produce a glyph listing of the created alternates
    pub open_overview: bool,
}

impl Default for SwitchOptions {
    fn default() -> Self {
        SwitchOptions {
            suffix: DEFAULT_SUFFIX.to_string(),
            generate_feature_code: true,
            add_export_parameters: true,
            erase_bracket_layers: false,
            open_overview: true,
        }
    }
}

impl SwitchOptions {
    /// Default options with the given suffix
    ///
    /// `switch`, `.switch` and `..switch` all mean `.switch`.
    pub fn new(suffix: &str) -> Result<Self, SwitchShapesError> {
        Ok(SwitchOptions {
            suffix: normalize_suffix(suffix)?,
            ..Default::default()
        })
    }
}

fn normalize_suffix(suffix: &str) -> Result<String, SwitchShapesError> {
    let bare = suffix.trim().trim_start_matches('.');
    if bare.is_empty() || bare.contains(char::is_whitespace) {
        return Err(SwitchShapesError::InvalidSuffix(suffix.to_string()));
    }
    Ok(format!(".{}", bare))
}

/// The name of a glyph's alternate
pub fn alternate_name(name: &str, suffix: &str) -> SmolStr {
    format!("{}{}", name, suffix).into()
}

/// The names of all glyphs with bracket layers, in font order
pub fn discover_bracket_glyphs(font: &Font) -> Vec<SmolStr> {
    font.glyphs
        .iter()
        .filter(|g| g.has_conditional_layers())
        .map(|g| g.name.clone())
        .collect()
}

/// Remove the bracket layers of the named glyphs, returning how many went
pub fn erase_bracket_layers(font: &mut Font, glyphs: &[SmolStr]) -> usize {
    let mut erased = 0;
    for name in glyphs {
        if let Some(glyph) = font.glyphs.get_mut(name) {
            let count = glyph.remove_conditional_layers();
            log::debug!("Erased {} bracket layers from {}", count, name);
            erased += count;
        }
    }
    log::info!("Erased {} bracket layers from {} glyphs", erased, glyphs.len());
    erased
}

/// Turn the font's bracket layers into alternate glyphs
///
/// Fails with [`SwitchShapesError::NoBracketLayers`], leaving the font
/// untouched, if there is nothing to do.
pub fn switch_shapes(
    font: &mut Font,
    options: &SwitchOptions,
) -> Result<SwitchReport, SwitchShapesError> {
    let suffix = normalize_suffix(&options.suffix)?;
    let bracket_glyphs = discover_bracket_glyphs(font);
    if bracket_glyphs.is_empty() {
        return Err(SwitchShapesError::NoBracketLayers);
    }
    log::info!("Found {} glyphs with bracket layers", bracket_glyphs.len());

    let usage = ComponentUsage::from_font(font);
    let affected_components = dependents(&usage, &bracket_glyphs);
    log::info!(
        "{} glyphs use them as components",
        affected_components.len()
    );

    let created = synthesize(font, &bracket_glyphs, &affected_components, &suffix);
    let references_rewritten = rewrite_references(font, &suffix);

    let substitutions = if options.generate_feature_code {
        Some(write_feature_code(font, &suffix).len())
    } else {
        None
    };

    let mut parameters_added = 0;
    let export_parameters = if options.add_export_parameters {
        let parameters =
            ExportParameters::from_font(font, &bracket_glyphs, &affected_components, &suffix);
        if parameters.is_empty() {
            log::info!("No alternates to switch in, so no export parameters were added");
            None
        } else {
            parameters_added = parameters.apply(font);
            Some(parameters)
        }
    } else {
        None
    };

    // After the feature code, which is compiled from these layers
    let bracket_layers_erased = if options.erase_bracket_layers {
        Some(erase_bracket_layers(font, &bracket_glyphs))
    } else {
        None
    };

    let overview = options
        .open_overview
        .then(|| report::overview(&created, &suffix));

    Ok(SwitchReport {
        suffix,
        bracket_glyphs,
        affected_components,
        created,
        references_rewritten,
        substitutions,
        export_parameters,
        parameters_added,
        bracket_layers_erased,
        overview,
    })
}

use std::{collections::BTreeSet, fmt};

use smol_str::SmolStr;

use super::{
    alternate_name, closure::dependents, discover_bracket_glyphs, feature_code::FEATURE_TAGS,
    parameters::ExportParameters, usage::ComponentUsage, SynthesisOutcome,
};
use crate::Font;

/// What a run of [`switch_shapes`](super::switch_shapes) found and did
#[derive(Debug, Clone)]
pub struct SwitchReport {
    /// The suffix the alternates were given
    pub suffix: String,
    /// Glyphs with bracket layers, in font order
    pub bracket_glyphs: Vec<SmolStr>,
    /// Glyphs using a bracket glyph at any depth
    pub affected_components: BTreeSet<SmolStr>,
    /// Glyphs created this run
    pub created: SynthesisOutcome,
    /// Component references repointed at alternates
    pub references_rewritten: usize,
    /// Substitutions written, if feature code was generated
    pub substitutions: Option<usize>,
    /// Parameter values, if the export parameters step ran
    pub export_parameters: Option<ExportParameters>,
    /// Parameters added to instances which had none of that name
    pub parameters_added: usize,
    /// Bracket layers removed from the original glyphs, if erasing was asked for
    pub bracket_layers_erased: Option<usize>,
    /// A glyph listing of everything created, if asked for
    pub overview: Option<String>,
}

impl fmt::Display for SwitchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let found = self.bracket_glyphs.len();
        let affected = self.affected_components.len();
        writeln!(f, "INITIAL SEARCH:")?;
        writeln!(f, "Glyphs with Bracket Layers: {}", found)?;
        writeln!(f, "Components from Bracket Layers: {}", affected)?;
        writeln!(
            f,
            "Total Glyphs + Components with Bracket Layers = {}",
            found + affected
        )?;
        writeln!(f)?;

        let conditional = self.created.conditional_created.len();
        let dependents = self.created.dependents_created.len();
        writeln!(f, "CREATED GLYPHS:")?;
        writeln!(f, "· Suffixed glyphs created: {}", conditional)?;
        writeln!(f, "· Suffixed glyphs from components created: {}", dependents)?;
        writeln!(
            f,
            "· Total Suffixed Glyphs + Components created = {}",
            conditional + dependents
        )?;
        writeln!(f, "· Component references updated: {}", self.references_rewritten)?;
        writeln!(f)?;

        writeln!(f, "OTHER ACTIONS:")?;
        match &self.export_parameters {
            Some(params) if self.parameters_added > 0 => {
                writeln!(f, "· Added {} custom parameters", self.parameters_added)?;
                writeln!(f, "  '{}': {}", super::REMOVE_GLYPHS, params.remove_pattern)?;
                writeln!(f, "  '{}': {}", super::RENAME_GLYPHS, params.rename_value())?;
            }
            Some(_) => writeln!(f, "· Every instance already has its export parameters")?,
            None => {}
        }
        if let Some(count) = self.substitutions {
            writeln!(
                f,
                "· Added {} features ({} substitutions)",
                FEATURE_TAGS.join(" & "),
                count
            )?;
        }
        if let Some(count) = self.bracket_layers_erased {
            writeln!(f, "· Erased {} existing bracket layers", count)?;
        }
        if self.export_parameters.is_some() {
            writeln!(f)?;
            write!(
                f,
                "Note: decide per instance whether the alternates should be switched in, in the '{}' parameter.",
                super::RENAME_GLYPHS
            )?;
        }
        Ok(())
    }
}

/// A glyph listing of the alternates created in a run, sorted, one
/// `/name` token per glyph
pub fn overview(created: &SynthesisOutcome, suffix: &str) -> String {
    let listing = |names: &[SmolStr]| {
        let mut alternates: Vec<SmolStr> =
            names.iter().map(|n| alternate_name(n, suffix)).collect();
        alternates.sort();
        alternates
            .iter()
            .map(|n| format!("/{}", n))
            .collect::<Vec<_>>()
            .join(" ")
    };
    format!(
        "Created Glyphs:\n{}\n\nComponents:\n{}",
        listing(&created.conditional_created),
        listing(&created.dependents_created)
    )
}

/// Which glyphs a run would touch, found without changing the font
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BracketLayerReport {
    /// Glyphs with at least one bracket layer
    pub bracket_glyphs: BTreeSet<SmolStr>,
    /// Glyphs using a bracket glyph as a component at any depth
    pub affected_components: BTreeSet<SmolStr>,
}

impl BracketLayerReport {
    /// Inspect a font
    pub fn from_font(font: &Font) -> Self {
        let bracket_glyphs: BTreeSet<SmolStr> = discover_bracket_glyphs(font).into_iter().collect();
        let usage = ComponentUsage::from_font(font);
        let affected_components = dependents(&usage, &bracket_glyphs);
        BracketLayerReport {
            bracket_glyphs,
            affected_components,
        }
    }

    /// Bracket glyphs and affected components together
    pub fn total(&self) -> usize {
        self.bracket_glyphs.len() + self.affected_components.len()
    }

    /// The affected glyphs as a glyph listing
    pub fn listing(&self) -> String {
        let slashed = |names: &BTreeSet<SmolStr>| {
            names
                .iter()
                .map(|n| format!("/{}", n))
                .collect::<String>()
        };
        format!(
            "Glyphs:\n{}\n\nComponents:\n{}",
            slashed(&self.bracket_glyphs),
            slashed(&self.affected_components)
        )
    }
}

impl fmt::Display for BracketLayerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |names: &BTreeSet<SmolStr>| {
            names
                .iter()
                .map(|n| n.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        write!(
            f,
            "Glyphs with Bracket Layers ({}):\n{}\n\nAffected Components ({}):\n{}\n\nTotal affected glyphs: {}",
            self.bracket_glyphs.len(),
            join(&self.bracket_glyphs),
            self.affected_components.len(),
            join(&self.affected_components),
            self.total()
        )
    }
}

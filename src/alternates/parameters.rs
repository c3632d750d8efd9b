use std::collections::{BTreeSet, HashSet};

use smol_str::SmolStr;

use super::alternate_name;
use crate::{instance::CustomParameter, Font};

/// Parameter removing the alternates from static exports
pub const REMOVE_GLYPHS: &str = "Remove Glyphs";
/// Parameter swapping the alternates in for static exports
pub const RENAME_GLYPHS: &str = "Rename Glyphs";

/// The values of the two export parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportParameters {
    /// Wildcard matching every glyph with the suffix, e.g. `*.switch`
    pub remove_pattern: String,
    /// `name=name.switch` pairs, bracket glyphs first, then composites
    pub rename_list: Vec<String>,
}

impl ExportParameters {
    /// Build the parameter values for the alternates present in the font
    ///
    /// Seeds come first in the order given, then dependents. A name is listed
    /// once, and only if its alternate exists, whichever run created it.
    pub fn from_font(
        font: &Font,
        seeds: &[SmolStr],
        dependents: &BTreeSet<SmolStr>,
        suffix: &str,
    ) -> Self {
        let names = font.glyph_names();
        let mut listed: HashSet<&SmolStr> = HashSet::new();
        let rename_list = seeds
            .iter()
            .chain(dependents.iter())
            .filter(|name| !name.ends_with(suffix))
            .filter(|name| names.contains(&alternate_name(name, suffix)))
            .filter(|name| listed.insert(*name))
            .map(|name| format!("{}={}", name, alternate_name(name, suffix)))
            .collect();
        ExportParameters {
            remove_pattern: format!("*.{}", suffix.trim_start_matches('.')),
            rename_list,
        }
    }

    /// Are there no alternates to switch in?
    pub fn is_empty(&self) -> bool {
        self.rename_list.is_empty()
    }

    /// The rename list as a single parameter value
    pub fn rename_value(&self) -> String {
        self.rename_list.join(", ")
    }

    /// Add both parameters to every exportable instance which has no
    /// parameter of the same name yet. Returns the number of parameters added.
    ///
    /// Every instance receives the same rename list, wherever it sits in the
    /// design space.
    pub fn apply(&self, font: &mut Font) -> usize {
        let rename_value = self.rename_value();
        let mut added = 0;
        for instance in font.instances.iter_mut().filter(|i| i.is_exportable()) {
            for (name, value) in [
                (REMOVE_GLYPHS, self.remove_pattern.as_str()),
                (RENAME_GLYPHS, rename_value.as_str()),
            ] {
                if instance.add_custom_parameter_if_absent(CustomParameter::new(name, value)) {
                    log::debug!("Added {:?} to instance {}", name, instance.name);
                    added += 1;
                } else {
                    log::debug!(
                        "Instance {} already has a {:?} parameter; leaving it",
                        instance.name,
                        name
                    );
                }
            }
        }
        log::info!("Added {} export parameters", added);
        added
    }
}

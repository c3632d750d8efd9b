//! Substitution rules which switch in the alternates under each condition
//!
//! Every bracket layer contributes a substitution of its glyph by the
//! alternate, under the layer's condition. Any glyph built, at whatever
//! depth, from a glyph with bracket layers is switched under the same
//! conditions. The rules are grouped by [`ConditionKey`] and rendered once
//! per tag in [`FEATURE_TAGS`].
use std::collections::{BTreeSet, HashMap, HashSet};

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::{condition::ConditionKey, Font, Glyph};

/// The features which receive the generated code
pub const FEATURE_TAGS: [&str; 2] = ["rlig", "rvrn"];

/// One `sub original by alternate;` rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// The glyph switched out
    pub original: SmolStr,
    /// The glyph switched in
    pub alternate: SmolStr,
}

/// Substitutions grouped by condition, in the order conditions were first seen
#[derive(Debug, Clone, Default)]
pub struct SubstitutionTable {
    groups: IndexMap<ConditionKey, Vec<Substitution>>,
}

impl SubstitutionTable {
    /// Collect the substitutions for every bracket layer in the font and for
    /// every glyph which uses a bracket glyph as a component.
    pub fn from_font(font: &Font, suffix: &str) -> Self {
        let mut table = SubstitutionTable::default();
        // glyph name -> (condition, alternate suffix) for each of its bracket layers
        let mut conditions: HashMap<SmolStr, Vec<(ConditionKey, SmolStr)>> = HashMap::new();

        for glyph in font.glyphs.iter() {
            for layer in glyph.conditional_layers() {
                let Some(condition) = layer.condition(suffix) else {
                    continue;
                };
                if glyph.name.ends_with(&format!(".{}", condition.suffix)) {
                    continue;
                }
                table.add(&condition.key, &glyph.name, &condition.suffix);
                let entry = conditions.entry(glyph.name.clone()).or_default();
                if !entry.contains(&(condition.key.clone(), condition.suffix.clone())) {
                    entry.push((condition.key, condition.suffix));
                }
            }
        }
        if conditions.is_empty() {
            return table;
        }

        let mut bases = BaseComponents::new(font);
        for glyph in font.glyphs.iter() {
            if glyph.name.ends_with(suffix) {
                continue;
            }
            for base in bases.of(&glyph.name) {
                for (key, alternate_suffix) in conditions.get(&base).into_iter().flatten() {
                    table.add(key, &glyph.name, alternate_suffix);
                }
            }
        }
        table
    }

    fn add(&mut self, key: &ConditionKey, original: &SmolStr, alternate_suffix: &str) {
        let alternate: SmolStr = format!("{}.{}", original, alternate_suffix).into();
        let group = self.groups.entry(key.clone()).or_default();
        if group.iter().any(|s| s.alternate == alternate) {
            return;
        }
        log::debug!("condition {}: sub {} by {}", key, original, alternate);
        group.push(Substitution {
            original: original.clone(),
            alternate,
        });
    }

    /// Are there no substitutions at all?
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The total number of substitutions, across all conditions
    pub fn len(&self) -> usize {
        self.groups.values().map(|g| g.len()).sum()
    }

    /// The substitutions under the given condition, in insertion order
    pub fn group(&self, key: &ConditionKey) -> Option<&[Substitution]> {
        self.groups.get(key).map(|g| g.as_slice())
    }

    /// The conditions, in the order they were first seen
    pub fn conditions(&self) -> impl Iterator<Item = &ConditionKey> {
        self.groups.keys()
    }

    /// Render the table as feature code
    ///
    /// The code only applies to variable builds. Within each condition the
    /// rules are sorted by alternate name.
    pub fn to_feature_code(&self) -> String {
        let mut lines = vec!["#ifdef VARIABLE".to_string()];
        for (key, group) in &self.groups {
            lines.push(format!("condition {};", key));
            let mut sorted: Vec<&Substitution> = group.iter().collect();
            sorted.sort_by(|a, b| a.alternate.cmp(&b.alternate));
            for sub in sorted {
                lines.push(format!("sub {} by {};", sub.original, sub.alternate));
            }
            lines.push(String::new());
        }
        lines.push("#endif".to_string());
        lines.join("\n")
    }
}

/// Compile the substitutions and store them under every tag in
/// [`FEATURE_TAGS`], replacing whatever code those features held.
pub fn write_feature_code(font: &mut Font, suffix: &str) -> SubstitutionTable {
    let table = SubstitutionTable::from_font(font, suffix);
    let code = table.to_feature_code();
    for tag in FEATURE_TAGS {
        font.features.set_feature(tag, code.clone());
    }
    log::info!(
        "Wrote {} substitutions under {} conditions to {}",
        table.len(),
        table.groups.len(),
        FEATURE_TAGS.join(", ")
    );
    table
}

/// Every glyph a glyph is built from, at any depth, memoized by name
struct BaseComponents<'a> {
    glyphs: HashMap<&'a str, &'a Glyph>,
    cache: HashMap<SmolStr, BTreeSet<SmolStr>>,
    visiting: HashSet<SmolStr>,
    cycles_cut: usize,
}

impl<'a> BaseComponents<'a> {
    fn new(font: &'a Font) -> Self {
        BaseComponents {
            glyphs: font.glyphs.iter().map(|g| (g.name.as_str(), g)).collect(),
            cache: HashMap::new(),
            visiting: HashSet::new(),
            cycles_cut: 0,
        }
    }

    fn of(&mut self, name: &str) -> BTreeSet<SmolStr> {
        if let Some(cached) = self.cache.get(name) {
            return cached.clone();
        }
        // Cycle; the glyph further up the stack collects everything on it
        if !self.visiting.insert(name.into()) {
            self.cycles_cut += 1;
            return BTreeSet::new();
        }
        let cycles_before = self.cycles_cut;
        let mut bases = BTreeSet::new();
        if let Some(glyph) = self.glyphs.get(name).copied() {
            for component in glyph.layers.iter().flat_map(|l| l.components()) {
                if bases.insert(component.reference.clone()) {
                    let deeper = self.of(&component.reference);
                    bases.extend(deeper);
                }
            }
        }
        self.visiting.remove(name);
        // A set cut short by a cycle is only complete at the top of the stack
        if self.cycles_cut == cycles_before || self.visiting.is_empty() {
            self.cache.insert(name.into(), bases.clone());
        }
        bases
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::alternates::test_fonts::{
        a_ring_font, composite, font_with, outline, triangle, with_bracket,
    };
    use pretty_assertions::assert_eq;

    fn bracketed(name: &str, layer_name: &str) -> Glyph {
        with_bracket(outline(name), layer_name, vec![triangle(80.0).into()])
    }

    #[test]
    fn test_a_ring() {
        let font = a_ring_font();
        let table = SubstitutionTable::from_font(&font, ".switch");
        assert_eq!(
            table.to_feature_code(),
            "#ifdef VARIABLE\ncondition wght < 400;\nsub a by a.switch;\nsub a_ring by a_ring.switch;\n\n#endif"
        );
    }

    #[test]
    fn test_abbreviated_and_full_tags_share_a_group() {
        let font = font_with(vec![bracketed("a", "[wg‹400]"), bracketed("b", "[wght<400]")]);
        let table = SubstitutionTable::from_font(&font, ".switch");
        assert_eq!(table.conditions().count(), 1);
        let group = table.group(&ConditionKey::new("wght < 400")).unwrap();
        assert_eq!(group.len(), 2);
    }

    #[test]
    fn test_targets_are_sorted_within_a_group() {
        let font = font_with(vec![
            bracketed("zed", "[wght<400]"),
            bracketed("b", "[wght<400]"),
            bracketed("a", "[wght<400]"),
        ]);
        let code = SubstitutionTable::from_font(&font, ".switch").to_feature_code();
        assert_eq!(
            code,
            "#ifdef VARIABLE\ncondition wght < 400;\nsub a by a.switch;\nsub b by b.switch;\nsub zed by zed.switch;\n\n#endif"
        );
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let font = font_with(vec![
            bracketed("b", "[wght>600]"),
            bracketed("a", "[wght<400]"),
        ]);
        let code = SubstitutionTable::from_font(&font, ".switch").to_feature_code();
        assert_eq!(
            code,
            "#ifdef VARIABLE\ncondition wght > 600;\nsub b by b.switch;\n\ncondition wght < 400;\nsub a by a.switch;\n\n#endif"
        );
    }

    #[test]
    fn test_nested_composites_follow_their_bases() {
        let font = font_with(vec![
            bracketed("c", "[wght<400]"),
            composite("b", &["c"]),
            composite("a", &["b"]),
        ]);
        let table = SubstitutionTable::from_font(&font, ".switch");
        let alternates: Vec<&str> = table
            .group(&ConditionKey::new("wght<400"))
            .unwrap()
            .iter()
            .map(|s| s.alternate.as_str())
            .collect();
        assert_eq!(alternates, vec!["c.switch", "b.switch", "a.switch"]);
    }

    #[test]
    fn test_per_layer_suffix() {
        let font = font_with(vec![
            bracketed("a", "Alt.ss01 [wght<400]"),
            composite("a_ring", &["a", "ring"]),
        ]);
        let code = SubstitutionTable::from_font(&font, ".switch").to_feature_code();
        assert_eq!(
            code,
            "#ifdef VARIABLE\ncondition wght < 400;\nsub a by a.ss01;\nsub a_ring by a_ring.ss01;\n\n#endif"
        );
    }

    #[test]
    fn test_composite_under_several_conditions() {
        let glyph = with_bracket(
            bracketed("a", "[wght<400]"),
            "[wght>700]",
            vec![triangle(120.0).into()],
        );
        let font = font_with(vec![glyph, composite("aacute", &["a", "acutecomb"])]);
        let table = SubstitutionTable::from_font(&font, ".switch");
        assert_eq!(table.conditions().count(), 2);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_alternates_are_not_compiled_again() {
        let mut font = a_ring_font();
        font.glyphs.push(composite("a.switch", &[]));
        font.glyphs.push(composite("a_ring.switch", &["a.switch", "ring"]));
        let table = SubstitutionTable::from_font(&font, ".switch");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_component_cycle_terminates() {
        let font = font_with(vec![
            bracketed("a", "[wght<400]"),
            composite("x", &["y", "a"]),
            composite("y", &["x"]),
        ]);
        let table = SubstitutionTable::from_font(&font, ".switch");
        let group = table.group(&ConditionKey::new("wght<400")).unwrap();
        let mut alternates: Vec<&str> = group.iter().map(|s| s.alternate.as_str()).collect();
        alternates.sort();
        assert_eq!(alternates, vec!["a.switch", "x.switch", "y.switch"]);
    }

    #[test]
    fn test_write_replaces_existing_features() {
        let mut font = a_ring_font();
        font.features.set_feature("rlig", "sub f i by f_i;".to_string());
        write_feature_code(&mut font, ".switch");
        let first = font.features.feature("rlig").unwrap().to_string();
        assert!(!first.contains("f_i"));
        assert_eq!(font.features.feature("rvrn"), Some(first.as_str()));
        write_feature_code(&mut font, ".switch");
        assert_eq!(font.features.features.len(), 2);
        assert_eq!(font.features.feature("rlig"), Some(first.as_str()));
    }

    #[test]
    fn test_nothing_to_compile() {
        let font = font_with(vec![outline("a")]);
        let table = SubstitutionTable::from_font(&font, ".switch");
        assert!(table.is_empty());
        assert_eq!(table.to_feature_code(), "#ifdef VARIABLE\n#endif");
    }
}

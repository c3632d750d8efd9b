use std::collections::{BTreeSet, HashSet};

use smol_str::SmolStr;

use super::{alternate_name, ALTERNATE_COLOR};
use crate::{Font, Glyph};

/// The glyphs created by one synthesis run, by the name of the glyph
/// each was copied from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthesisOutcome {
    /// Glyphs with bracket layers whose alternate was created, in font order
    pub conditional_created: Vec<SmolStr>,
    /// Glyphs using a bracket glyph whose alternate was created, sorted
    pub dependents_created: Vec<SmolStr>,
}

impl SynthesisOutcome {
    /// Did this run create nothing at all?
    pub fn is_empty(&self) -> bool {
        self.conditional_created.is_empty() && self.dependents_created.is_empty()
    }

    /// How many glyphs were created
    pub fn len(&self) -> usize {
        self.conditional_created.len() + self.dependents_created.len()
    }
}

/// Create the alternate glyphs.
///
/// Each seed gets an alternate whose master layers hold the shapes of its
/// bracket layers. Each dependent gets a plain copy, whose components are
/// repointed later. Nothing is created for a name which already carries the
/// suffix, or whose alternate already exists.
pub fn synthesize(
    font: &mut Font,
    seeds: &[SmolStr],
    dependents: &BTreeSet<SmolStr>,
    suffix: &str,
) -> SynthesisOutcome {
    let mut existing: HashSet<SmolStr> = font.glyph_names();
    let mut outcome = SynthesisOutcome::default();

    for seed in seeds {
        if seed.ends_with(suffix) {
            continue;
        }
        let new_name = alternate_name(seed, suffix);
        if existing.contains(&new_name) {
            log::debug!("{} already exists, not recreating it", new_name);
            continue;
        }
        let Some(source) = font.glyphs.get(seed) else {
            continue;
        };
        let alternate = conditional_alternate(source, &new_name);
        log::debug!("Created {} from the bracket layers of {}", new_name, seed);
        existing.insert(new_name);
        font.glyphs.push(alternate);
        outcome.conditional_created.push(seed.clone());
    }

    for dependent in dependents {
        if dependent.ends_with(suffix) {
            continue;
        }
        let new_name = alternate_name(dependent, suffix);
        if existing.contains(&new_name) {
            log::debug!("{} already exists, not recreating it", new_name);
            continue;
        }
        // Users may reference glyphs which are not in the font
        let Some(source) = font.glyphs.get(dependent) else {
            continue;
        };
        let copy = source.duplicate_as(&new_name);
        log::debug!("Created {} as a copy of {}", new_name, dependent);
        existing.insert(new_name);
        font.glyphs.push(copy);
        outcome.dependents_created.push(dependent.clone());
    }

    log::info!(
        "Created {} alternates of bracket glyphs and {} alternates of composites",
        outcome.conditional_created.len(),
        outcome.dependents_created.len()
    );
    outcome
}

fn conditional_alternate(source: &Glyph, new_name: &str) -> Glyph {
    let mut alternate = source.duplicate_as(new_name);
    alternate.set_color(ALTERNATE_COLOR);
    for layer in source.conditional_layers() {
        if layer.shapes.is_empty() {
            continue;
        }
        let Some(master_id) = layer.associated_master_id() else {
            log::warn!(
                "Bracket layer {} of {} belongs to no master; ignoring it",
                layer.debug_name(),
                source.name
            );
            continue;
        };
        match alternate.master_layer_mut(master_id) {
            Some(target) => {
                target.shapes = layer.shapes.clone();
                target.width = layer.width;
            }
            None => log::warn!(
                "{} has no layer for master {}; bracket layer {} was not copied",
                source.name,
                master_id,
                layer.debug_name()
            ),
        }
    }
    alternate.remove_conditional_layers();
    alternate
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        alternates::test_fonts::{
            a_ring_font, composite, font_with, outline, triangle, with_bracket, MASTER,
        },
        Shape,
    };
    use pretty_assertions::assert_eq;

    fn seeds(names: &[&str]) -> Vec<SmolStr> {
        names.iter().map(|s| SmolStr::from(*s)).collect()
    }

    fn set(names: &[&str]) -> BTreeSet<SmolStr> {
        names.iter().map(|s| SmolStr::from(*s)).collect()
    }

    #[test]
    fn test_conditional_alternate_takes_bracket_shapes() {
        let mut font = a_ring_font();
        let outcome = synthesize(&mut font, &seeds(&["a"]), &set(&["a_ring"]), ".switch");
        assert_eq!(outcome.conditional_created, seeds(&["a"]));
        assert_eq!(outcome.dependents_created, seeds(&["a_ring"]));
        assert_eq!(outcome.len(), 2);

        let alternate = font.glyphs.get("a.switch").unwrap();
        assert_eq!(alternate.color(), Some(ALTERNATE_COLOR));
        assert!(!alternate.has_conditional_layers());
        let master = alternate.master_layer(MASTER).unwrap();
        assert_eq!(master.shapes, vec![Shape::from(triangle(80.0))]);
        assert_eq!(master.width, 450.0);

        // The original is untouched
        let original = font.glyphs.get("a").unwrap();
        assert!(original.has_conditional_layers());
        assert_eq!(
            original.master_layer(MASTER).unwrap().shapes,
            vec![Shape::from(triangle(100.0))]
        );
    }

    #[test]
    fn test_dependent_copy_is_unchanged() {
        let mut font = a_ring_font();
        synthesize(&mut font, &seeds(&["a"]), &set(&["a_ring"]), ".switch");
        let copy = font.glyphs.get("a_ring.switch").unwrap();
        let original = font.glyphs.get("a_ring").unwrap();
        assert_eq!(copy.layers, original.layers);
        assert_eq!(copy.color(), None);
    }

    #[test]
    fn test_empty_bracket_layer_keeps_master_shapes() {
        let mut font = font_with(vec![with_bracket(outline("a"), "[wght<400]", vec![])]);
        synthesize(&mut font, &seeds(&["a"]), &BTreeSet::new(), ".switch");
        let alternate = font.glyphs.get("a.switch").unwrap();
        let master = alternate.master_layer(MASTER).unwrap();
        assert_eq!(master.shapes, vec![Shape::from(triangle(100.0))]);
        assert_eq!(master.width, 500.0);
        assert!(!alternate.has_conditional_layers());
    }

    #[test]
    fn test_rerun_creates_nothing() {
        let mut font = a_ring_font();
        synthesize(&mut font, &seeds(&["a"]), &set(&["a_ring"]), ".switch");
        let count = font.glyphs.len();
        let outcome = synthesize(&mut font, &seeds(&["a"]), &set(&["a_ring"]), ".switch");
        assert!(outcome.is_empty());
        assert_eq!(font.glyphs.len(), count);
    }

    #[test]
    fn test_no_double_suffix() {
        let mut font = font_with(vec![
            with_bracket(outline("a.switch"), "[wght<400]", vec![triangle(80.0).into()]),
            composite("b.switch", &["a.switch"]),
        ]);
        let outcome = synthesize(
            &mut font,
            &seeds(&["a.switch"]),
            &set(&["b.switch"]),
            ".switch",
        );
        assert!(outcome.is_empty());
        assert!(!font.glyphs.contains("a.switch.switch"));
        assert!(!font.glyphs.contains("b.switch.switch"));
    }

    #[test]
    fn test_seed_which_is_also_a_dependent_is_created_once() {
        let mut font = font_with(vec![
            with_bracket(outline("c"), "[wght<400]", vec![triangle(80.0).into()]),
            with_bracket(composite("b", &["c"]), "[wght<400]", vec![triangle(60.0).into()]),
        ]);
        let outcome = synthesize(&mut font, &seeds(&["c", "b"]), &set(&["b"]), ".switch");
        assert_eq!(outcome.conditional_created, seeds(&["c", "b"]));
        assert!(outcome.dependents_created.is_empty());
        assert_eq!(
            font.glyphs.iter().filter(|g| g.name == "b.switch").count(),
            1
        );
        // The bracket version wins
        assert!(!font.glyphs.get("b.switch").unwrap().has_conditional_layers());
    }

    #[test]
    fn test_missing_dependent_is_skipped() {
        let mut font = a_ring_font();
        let outcome = synthesize(&mut font, &seeds(&[]), &set(&["ghost"]), ".switch");
        assert!(outcome.is_empty());
        assert!(!font.glyphs.contains("ghost.switch"));
    }

    #[test]
    fn test_alternate_drops_codepoints() {
        let mut font = a_ring_font();
        font.glyphs.get_mut("a").unwrap().codepoints = vec![0x61];
        synthesize(&mut font, &seeds(&["a"]), &BTreeSet::new(), ".switch");
        assert!(font.glyphs.get("a.switch").unwrap().codepoints.is_empty());
        assert_eq!(font.glyphs.get("a").unwrap().codepoints, vec![0x61]);
    }
}

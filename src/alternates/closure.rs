use std::collections::{BTreeSet, HashSet};

use smol_str::SmolStr;

use super::usage::ComponentUsage;

/// Every glyph which uses any of the seed glyphs, directly or through any
/// depth of nested components.
///
/// Seeds are only part of the result if they use one another (or
/// themselves, through a cycle). Each glyph is expanded at most once, so
/// component cycles are harmless.
pub fn dependents<'a, I>(usage: &ComponentUsage, seeds: I) -> BTreeSet<SmolStr>
where
    I: IntoIterator<Item = &'a SmolStr>,
{
    let mut stack: Vec<SmolStr> = seeds.into_iter().cloned().collect();
    let mut visited: HashSet<SmolStr> = HashSet::new();
    let mut affected = BTreeSet::new();

    while let Some(current) = stack.pop() {
        if !visited.insert(current.clone()) {
            continue;
        }
        for user in usage.users_of(&current) {
            log::trace!("{} is used by {}", current, user);
            affected.insert(user.clone());
            if !visited.contains(user) {
                stack.push(user.clone());
            }
        }
    }
    affected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        alternates::test_fonts::{composite, font_with, outline},
        Font,
    };

    fn names(set: &BTreeSet<SmolStr>) -> Vec<&str> {
        set.iter().map(|s| s.as_str()).collect()
    }

    fn closure_of(font: &Font, seeds: &[&str]) -> BTreeSet<SmolStr> {
        let usage = ComponentUsage::from_font(font);
        let seeds: Vec<SmolStr> = seeds.iter().map(|s| SmolStr::from(*s)).collect();
        dependents(&usage, &seeds)
    }

    #[test]
    fn test_chain() {
        let font = font_with(vec![
            outline("c"),
            composite("b", &["c"]),
            composite("a", &["b"]),
            composite("unrelated", &["x"]),
        ]);
        assert_eq!(names(&closure_of(&font, &["c"])), vec!["a", "b"]);
    }

    #[test]
    fn test_diamond() {
        let font = font_with(vec![
            outline("base"),
            composite("left", &["base"]),
            composite("right", &["base"]),
            composite("top", &["left", "right"]),
        ]);
        assert_eq!(
            names(&closure_of(&font, &["base"])),
            vec!["left", "right", "top"]
        );
    }

    #[test]
    fn test_cycle_terminates() {
        let font = font_with(vec![
            composite("a", &["b"]),
            composite("b", &["c"]),
            composite("c", &["a"]),
        ]);
        // The seed comes back around through the cycle
        assert_eq!(names(&closure_of(&font, &["a"])), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_seeds_are_not_forced_in() {
        let font = font_with(vec![
            outline("a"),
            outline("b"),
            composite("b_a", &["b", "a"]),
            composite("e", &["a"]),
        ]);
        assert_eq!(names(&closure_of(&font, &["a", "b"])), vec!["b_a", "e"]);
        // ...but a seed used by another seed is a dependent
        let font = font_with(vec![outline("a"), composite("b", &["a"])]);
        assert_eq!(names(&closure_of(&font, &["a", "b"])), vec!["b"]);
    }

    #[test]
    fn test_no_seeds() {
        let font = font_with(vec![composite("b", &["a"])]);
        assert!(closure_of(&font, &[]).is_empty());
    }
}

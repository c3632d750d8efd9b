use std::collections::HashSet;

use smol_str::SmolStr;

use super::alternate_name;
use crate::Font;

/// Point the components of every alternate glyph at alternates.
///
/// A component of `x.switch` referencing `y` is repointed to `y.switch` when
/// that glyph exists; otherwise it keeps pointing at `y`. Alternates whose
/// original has gone are left alone. Returns the number of references
/// changed.
pub fn rewrite_references(font: &mut Font, suffix: &str) -> usize {
    let names: HashSet<SmolStr> = font.glyph_names();
    let mut rewritten = 0;
    for glyph in font.glyphs.iter_mut() {
        let Some(base) = glyph.name.strip_suffix(suffix) else {
            continue;
        };
        if !names.contains(base) {
            continue;
        }
        for layer in glyph.layers.iter_mut() {
            for component in layer.components_mut() {
                if component.reference.ends_with(suffix) {
                    continue;
                }
                let target = alternate_name(&component.reference, suffix);
                if names.contains(&target) {
                    log::debug!(
                        "{}: component {} now points at {}",
                        glyph.name,
                        component.reference,
                        target
                    );
                    component.reference = target;
                    rewritten += 1;
                }
            }
        }
    }
    log::info!("Rewrote {} component references", rewritten);
    rewritten
}

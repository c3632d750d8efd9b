//! Small fonts for the pipeline's unit tests
use crate::{Component, Font, Glyph, Instance, Layer, Master, Path, Shape};

pub(crate) const MASTER: &str = "m01";

pub(crate) fn triangle(size: f64) -> Path {
    Path::closed_polygon(&[(0.0, 0.0), (size, 0.0), (size / 2.0, size)])
}

/// A glyph whose master layer is made of the given components
pub(crate) fn composite(name: &str, components: &[&str]) -> Glyph {
    let mut glyph = Glyph::new(name);
    let mut layer = Layer::master_layer(MASTER, 500.0);
    for component in components {
        layer.push_component(Component::new(*component));
    }
    glyph.layers.push(layer);
    glyph
}

/// A glyph whose master layer is a single outline
pub(crate) fn outline(name: &str) -> Glyph {
    let mut glyph = Glyph::new(name);
    let mut layer = Layer::master_layer(MASTER, 500.0);
    layer.push_path(triangle(100.0));
    glyph.layers.push(layer);
    glyph
}

/// Add a bracket layer with the given shapes to a glyph
pub(crate) fn with_bracket(mut glyph: Glyph, layer_name: &str, shapes: Vec<Shape>) -> Glyph {
    let id = format!("{}-{}", glyph.name, glyph.layers.len());
    let mut layer = Layer::bracket_layer(MASTER, &id, layer_name, 450.0);
    layer.shapes = shapes;
    glyph.layers.push(layer);
    glyph
}

pub(crate) fn font_with(glyphs: Vec<Glyph>) -> Font {
    let mut font = Font::new();
    font.masters.push(Master::new("Regular", MASTER).with_location("wght", 400.0));
    font.instances.push(Instance::new("Regular"));
    let mut variable = Instance::new("Variable");
    variable.variable = true;
    font.instances.push(variable);
    font.glyphs.extend(glyphs);
    font
}

/// `a` has a bracket layer; `a_ring` is built from `a` and `ring`
pub(crate) fn a_ring_font() -> Font {
    font_with(vec![
        with_bracket(outline("a"), "[wght<400]", vec![triangle(80.0).into()]),
        outline("ring"),
        composite("a_ring", &["a", "ring"]),
    ])
}

pub(crate) fn component_references(font: &Font, glyph: &str) -> Vec<String> {
    font.glyphs
        .get(glyph)
        .map(|g| {
            g.layers
                .iter()
                .flat_map(|l| l.components())
                .map(|c| c.reference.to_string())
                .collect()
        })
        .unwrap_or_default()
}

//! # Switchshapes
//!
//! Switchshapes turns the bracket layers of a variable font source into
//! alternate glyphs. Bracket layers switch a glyph's shape in part of the
//! design space (`a` drawn differently below `wght` 400, say). Not every
//! toolchain compiles them, and static exports ignore them. This crate
//! rewrites the source so the switch is made explicit:
//!
//! - each glyph with bracket layers gets a suffixed alternate (`a.switch`)
//!   whose master layers hold the bracket shapes;
//! - each composite using such a glyph, at any depth, gets a suffixed copy
//!   (`a_ring.switch`) whose components point at the alternates;
//! - `rlig` and `rvrn` feature code substitutes the alternates under each
//!   bracket condition in variable builds;
//! - every static instance gets "Remove Glyphs" and "Rename Glyphs"
//!   parameters so static exports can swap the alternates in or out.
//!
//! Running it again on its output changes nothing.
//!
//! ```no_run
//! # use switchshapes::{load, switch_shapes, SwitchOptions, SwitchShapesError};
//! # fn main() -> Result<(), SwitchShapesError> {
//! let mut font = load("MyFont.babelfont")?;
//! let report = switch_shapes(&mut font, &SwitchOptions::new(".switch")?)?;
//! println!("{}", report);
//! font.save("MyFont-switched.babelfont")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Font Filters
//!
//! Filters implement the [`filters::FontFilter`] trait and can be chained:
//!
//! - [`filters::SwitchShapes`]: Run the whole pipeline with a given suffix
//! - [`filters::EraseBracketLayers`]: Drop every bracket layer
//! - [`filters::RenameGlyphs`]: Swap glyph names pairwise
//! - [`filters::RemoveGlyphs`]: Remove glyphs matching wildcard patterns
//! - [`filters::ApplyInstanceParameters`]: Preview a static export of an instance
//!
//! ## Feature Flags
//!
//! - `cli`: Build the `switchshapes` command-line tool

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]

pub mod alternates;
mod common;
pub mod condition;
mod error;
mod features;
/// Filters for font processing
pub mod filters;
mod font;
mod glyph;
mod instance;
mod layer;
mod master;
mod serde_helpers;
mod shape;

pub use crate::{
    alternates::{switch_shapes, BracketLayerReport, SwitchOptions, SwitchReport},
    common::{FormatSpecific, Node, NodeType},
    condition::{BracketCondition, ConditionKey},
    error::SwitchShapesError,
    features::Features,
    font::Font,
    glyph::{Glyph, GlyphCategory, GlyphList},
    instance::{CustomParameter, Instance},
    layer::{Layer, LayerType},
    master::Master,
    shape::{Component, Path, Shape},
};
use std::path::PathBuf;
// Ensure we export any types re-exported that we use in our public API
pub use kurbo::Affine;
pub use smol_str::SmolStr;

/// Load a Font from a file
///
/// `.babelfont` and `.json` files are read as the crate's JSON serialization.
pub fn load(filename: impl Into<PathBuf>) -> Result<Font, SwitchShapesError> {
    let pb = filename.into();
    let pb_clone = pb.clone();

    let mut font: Font = match pb.extension() {
        Some(ext) if ext == "babelfont" || ext == "json" => {
            let buffered = std::io::BufReader::new(std::fs::File::open(&pb)?);
            Ok(serde_json::from_reader(buffered)?)
        }
        _ => Err(SwitchShapesError::UnknownFileType { path: pb }),
    }?;
    font.source = Some(pb_clone);
    Ok(font)
}

use crate::{
    alternates::{switch_shapes, SwitchOptions},
    filters::FontFilter,
};

/// A filter that turns bracket layers into alternate glyphs
///
/// Runs the whole pipeline with default options and the given suffix, minus
/// the overview listing.
pub struct SwitchShapes(SwitchOptions);

impl SwitchShapes {
    /// Create a new SwitchShapes filter
    pub fn new(options: SwitchOptions) -> Self {
        SwitchShapes(options)
    }
}

impl FontFilter for SwitchShapes {
    fn apply(&self, font: &mut crate::Font) -> Result<(), crate::SwitchShapesError> {
        log::info!("Switching bracket layers to {} alternates", self.0.suffix);
        let report = switch_shapes(font, &self.0)?;
        log::debug!("{}", report);
        Ok(())
    }

    fn from_str(s: &str) -> Result<Self, crate::SwitchShapesError>
    where
        Self: Sized,
    {
        let mut options = SwitchOptions::new(s)?;
        options.open_overview = false;
        Ok(SwitchShapes::new(options))
    }

    #[cfg(feature = "cli")]
    fn arg() -> clap::Arg
    where
        Self: Sized,
    {
        clap::Arg::new("switchshapes")
            .long("switch-shapes")
            .help("Turn bracket layers into alternate glyphs with the given suffix")
            .value_name("SUFFIX")
            .action(clap::ArgAction::Append)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::alternates::test_fonts::a_ring_font;

    #[test]
    fn test_switch_shapes_filter() {
        let mut font = a_ring_font();
        SwitchShapes::from_str("alt").unwrap().apply(&mut font).unwrap();
        assert!(font.glyphs.contains("a.alt"));
        assert!(font.glyphs.contains("a_ring.alt"));
        assert!(font.features.feature("rlig").is_some());
    }

    #[test]
    fn test_bad_suffix() {
        assert!(SwitchShapes::from_str("").is_err());
    }
}

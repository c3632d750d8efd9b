use crate::{
    alternates::{discover_bracket_glyphs, erase_bracket_layers},
    filters::FontFilter,
};

/// A filter that drops every bracket layer from the font
#[derive(Default)]
pub struct EraseBracketLayers;

impl EraseBracketLayers {
    /// Create a new EraseBracketLayers filter
    pub fn new() -> Self {
        EraseBracketLayers
    }
}

impl FontFilter for EraseBracketLayers {
    fn apply(&self, font: &mut crate::Font) -> Result<(), crate::SwitchShapesError> {
        log::info!("Erasing all bracket layers from font");
        let glyphs = discover_bracket_glyphs(font);
        erase_bracket_layers(font, &glyphs);
        Ok(())
    }

    fn from_str(_s: &str) -> Result<Self, crate::SwitchShapesError>
    where
        Self: Sized,
    {
        Ok(EraseBracketLayers::new())
    }

    #[cfg(feature = "cli")]
    fn arg() -> clap::Arg
    where
        Self: Sized,
    {
        clap::Arg::new("erasebracketlayers")
            .long("erase-all-bracket-layers")
            .help("Drop all bracket layers from the font")
            .action(clap::ArgAction::SetTrue)
    }
}

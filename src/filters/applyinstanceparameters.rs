use crate::{
    alternates::{REMOVE_GLYPHS, RENAME_GLYPHS},
    filters::{FontFilter, RemoveGlyphs, RenameGlyphs},
};

/// A filter that applies an instance's glyph renaming and removal
/// parameters to the whole font
///
/// This shows what a static export of that instance will contain: names are
/// swapped first, then the matching glyphs are removed.
pub struct ApplyInstanceParameters(String);

impl ApplyInstanceParameters {
    /// Create a new ApplyInstanceParameters filter for the named instance
    pub fn new(instance: impl Into<String>) -> Self {
        ApplyInstanceParameters(instance.into())
    }
}

impl FontFilter for ApplyInstanceParameters {
    fn apply(&self, font: &mut crate::Font) -> Result<(), crate::SwitchShapesError> {
        let instance = font
            .instance(&self.0)
            .ok_or_else(|| crate::SwitchShapesError::InstanceNotFound(self.0.clone()))?;
        log::info!("Applying export parameters of instance {}", instance.name);
        let rename = instance
            .custom_parameter(RENAME_GLYPHS)
            .map(|cp| RenameGlyphs::from_str(&cp.value))
            .transpose()?;
        let remove = instance
            .custom_parameter(REMOVE_GLYPHS)
            .map(|cp| RemoveGlyphs::from_str(&cp.value))
            .transpose()?;
        if let Some(rename) = rename {
            rename.apply(font)?;
        }
        if let Some(remove) = remove {
            remove.apply(font)?;
        }
        Ok(())
    }

    fn from_str(s: &str) -> Result<Self, crate::SwitchShapesError>
    where
        Self: Sized,
    {
        Ok(ApplyInstanceParameters::new(s.trim()))
    }

    #[cfg(feature = "cli")]
    fn arg() -> clap::Arg
    where
        Self: Sized,
    {
        clap::Arg::new("applyinstanceparameters")
            .long("apply-instance-parameters")
            .help("Rename and remove glyphs as a static export of the named instance would")
            .value_name("INSTANCE")
            .action(clap::ArgAction::Append)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        alternates::{
            switch_shapes,
            test_fonts::{a_ring_font, component_references, triangle, MASTER},
            SwitchOptions,
        },
        Shape, SwitchShapesError,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn test_static_export_preview() {
        let mut font = a_ring_font();
        switch_shapes(&mut font, &SwitchOptions::default()).unwrap();
        ApplyInstanceParameters::new("Regular")
            .apply(&mut font)
            .unwrap();

        let mut names: Vec<&str> = font.glyphs.iter().map(|g| g.name.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["a", "a_ring", "ring"]);
        // `a` now carries the bracket shapes
        let a = font.glyphs.get("a").unwrap();
        assert_eq!(
            a.master_layer(MASTER).unwrap().shapes,
            vec![Shape::from(triangle(80.0))]
        );
        assert_eq!(component_references(&font, "a_ring"), vec!["a", "ring"]);
    }

    #[test]
    fn test_unknown_instance() {
        let mut font = a_ring_font();
        assert!(matches!(
            ApplyInstanceParameters::new("Black").apply(&mut font),
            Err(SwitchShapesError::InstanceNotFound(_))
        ));
    }

    #[test]
    fn test_instance_without_parameters_changes_nothing() {
        let mut font = a_ring_font();
        let before = font.glyphs.len();
        ApplyInstanceParameters::new("Regular")
            .apply(&mut font)
            .unwrap();
        assert_eq!(font.glyphs.len(), before);
    }
}

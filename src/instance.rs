use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::{
    common::FormatSpecific,
    serde_helpers::{default_true, is_true},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A named parameter attached to an instance, applied when it is exported
pub struct CustomParameter {
    /// Parameter name, e.g. "Remove Glyphs"
    pub name: String,
    /// Parameter value
    pub value: String,
    /// Disabled parameters are kept but not applied
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

impl CustomParameter {
    /// Create a new, enabled parameter
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        CustomParameter {
            name: name.into(),
            value: value.into(),
            disabled: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// A named instance of the font
pub struct Instance {
    /// The instance's ID
    #[serde(default)]
    pub id: String,
    /// The instance's name
    pub name: String,
    /// Location in design space, by axis tag
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub location: IndexMap<SmolStr, f64>,
    /// Is this a variable font setting rather than a static instance?
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub variable: bool,
    /// Is the instance exported at all?
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub exported: bool,
    /// Parameters applied when the instance is exported
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_parameters: Vec<CustomParameter>,
    /// Format-specific data
    #[serde(default, skip_serializing_if = "FormatSpecific::is_empty")]
    pub format_specific: FormatSpecific,
}

impl Instance {
    /// Create a new exported static instance
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Instance {
            id: name.clone(),
            name,
            exported: true,
            ..Default::default()
        }
    }

    /// Is this a static instance which gets exported?
    pub fn is_exportable(&self) -> bool {
        self.exported && !self.variable
    }

    /// The first enabled parameter with the given name
    pub fn custom_parameter(&self, name: &str) -> Option<&CustomParameter> {
        self.custom_parameters
            .iter()
            .find(|cp| cp.name == name && !cp.disabled)
    }

    /// Add a parameter unless one with the same name is already present
    /// (enabled or not). Returns whether it was added.
    pub fn add_custom_parameter_if_absent(&mut self, cp: CustomParameter) -> bool {
        if self.custom_parameters.iter().any(|existing| existing.name == cp.name) {
            return false;
        }
        self.custom_parameters.push(cp);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_custom_parameter_if_absent() {
        let mut instance = Instance::new("Regular");
        assert!(instance.add_custom_parameter_if_absent(CustomParameter::new(
            "Remove Glyphs",
            "*.alt"
        )));
        assert!(!instance.add_custom_parameter_if_absent(CustomParameter::new(
            "Remove Glyphs",
            "*.other"
        )));
        assert_eq!(instance.custom_parameters.len(), 1);
        assert_eq!(
            instance.custom_parameter("Remove Glyphs").map(|cp| cp.value.as_str()),
            Some("*.alt")
        );
    }

    #[test]
    fn test_disabled_parameters_still_block_and_are_not_applied() {
        let mut instance = Instance::new("Regular");
        let mut cp = CustomParameter::new("Rename Glyphs", "a=a.alt");
        cp.disabled = true;
        instance.custom_parameters.push(cp);
        assert!(instance.custom_parameter("Rename Glyphs").is_none());
        assert!(!instance.add_custom_parameter_if_absent(CustomParameter::new(
            "Rename Glyphs",
            "b=b.alt"
        )));
    }

    #[test]
    fn test_is_exportable() {
        let mut instance = Instance::new("Bold");
        assert!(instance.is_exportable());
        instance.variable = true;
        assert!(!instance.is_exportable());
        instance.variable = false;
        instance.exported = false;
        assert!(!instance.is_exportable());
    }
}

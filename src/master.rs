use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::common::FormatSpecific;

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A master of the font
pub struct Master {
    /// The master's name
    pub name: String,
    /// The master's ID; master layers carry the same ID
    pub id: String,
    /// Location in design space, by axis tag
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub location: IndexMap<SmolStr, f64>,
    /// Format-specific data
    #[serde(default, skip_serializing_if = "FormatSpecific::is_empty")]
    pub format_specific: FormatSpecific,
}

impl Master {
    /// Create a new master
    pub fn new<T, U>(name: T, id: U) -> Self
    where
        T: Into<String>,
        U: Into<String>,
    {
        Master {
            name: name.into(),
            id: id.into(),
            location: IndexMap::new(),
            format_specific: FormatSpecific::default(),
        }
    }

    /// Set a coordinate on the given axis
    pub fn with_location(mut self, axis: &str, value: f64) -> Self {
        self.location.insert(axis.into(), value);
        self
    }
}

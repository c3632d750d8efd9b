use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Data which one source format cares about but the pipeline does not
///
/// Glyph colors live here, under the `color` key, as they do in Glyphs files.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormatSpecific(Map<String, Value>);

impl FormatSpecific {
    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert a value, replacing any existing value with the same key
    pub fn insert(&mut self, key: String, value: Value) {
        self.0.insert(key, value);
    }

    /// Is there no format-specific data at all?
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

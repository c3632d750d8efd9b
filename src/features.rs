use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// The font's OpenType feature code
pub struct Features {
    /// Opentype classes
    ///
    /// The key should not start with @.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub classes: IndexMap<SmolStr, String>,
    /// Opentype prefixes
    ///
    /// A dictionary of OpenType lookups and other feature code to be placed
    /// before features are defined.
    /// The keys are user-defined names, the values are AFDKO feature code.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub prefixes: IndexMap<SmolStr, String>,
    /// OpenType features
    ///
    /// A list of OpenType feature code, expressed as a tuple (feature tag, code).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<(SmolStr, String)>,
}

impl Features {
    /// Render all classes, prefixes and features as a single feature file
    pub fn to_fea(&self) -> String {
        let mut fea = String::new();
        for (name, glyphs) in &self.classes {
            fea.push_str(&format!("@{} = [{}];\n", name, glyphs));
        }
        for (prefix, code) in &self.prefixes {
            if prefix != "anonymous" {
                fea.push_str(&format!("# Prefix: {}\n", prefix));
            }
            fea.push_str(code);
            fea.push('\n');
        }
        for (name, code) in &self.features {
            fea.push_str(&format!("feature {} {{\n{}\n}} {};\n", name, code, name));
        }
        fea
    }

    /// The code of the feature with the given tag
    pub fn feature(&self, tag: &str) -> Option<&str> {
        self.features
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, code)| code.as_str())
    }

    /// Set the code of a feature, replacing any existing code for that tag in full
    ///
    /// A feature which already exists keeps its position.
    pub fn set_feature(&mut self, tag: &str, code: String) {
        if let Some((_, existing)) = self.features.iter_mut().find(|(t, _)| t == tag) {
            *existing = code;
        } else {
            self.features.push((tag.into(), code));
        }
    }

    /// Apply a function to every piece of code: classes, prefixes and features
    pub(crate) fn map_code(&mut self, f: impl Fn(&str) -> String) {
        for code in self.classes.values_mut() {
            *code = f(code);
        }
        for code in self.prefixes.values_mut() {
            *code = f(code);
        }
        for (_, code) in self.features.iter_mut() {
            *code = f(code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_feature_replaces_in_place() {
        let mut features = Features::default();
        features.set_feature("liga", "sub f i by f_i;".to_string());
        features.set_feature("rlig", "sub a by b;".to_string());
        features.set_feature("liga", "sub f l by f_l;".to_string());
        assert_eq!(features.features.len(), 2);
        assert_eq!(features.features[0].0, "liga");
        assert_eq!(features.feature("liga"), Some("sub f l by f_l;"));
        assert_eq!(features.feature("rvrn"), None);
    }

    #[test]
    fn test_to_fea() {
        let mut features = Features::default();
        features
            .prefixes
            .insert("anonymous".into(), "languagesystem DFLT dflt;".into());
        features.classes.insert("vowels".into(), "a e".into());
        features.set_feature("rlig", "sub a by a.alt;".to_string());
        assert_eq!(
            features.to_fea(),
            "@vowels = [a e];\nlanguagesystem DFLT dflt;\nfeature rlig {\nsub a by a.alt;\n} rlig;\n"
        );
    }
}

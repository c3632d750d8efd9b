//! Bracket layer conditions
//!
//! A bracket layer encodes a design-space condition in its name, between
//! square brackets: `Bold [wg‹400]`, `[400‹wght‹700]`, `Alt.ss01 [wd‹80]`.
//! This module pulls that condition out of a layer name and turns it into a
//! canonical [`ConditionKey`], which is what feature code is grouped by.
//! Parsing is purely textual and never fails; whatever is found between the
//! brackets is canonicalized.
use regex::Regex;
use smol_str::SmolStr;
use std::{fmt, sync::LazyLock};

/// The suffix given to alternate glyphs unless the user asks for another
pub const DEFAULT_SUFFIX: &str = ".switch";

/// Glyphs' abbreviated axis names and the registered tags they stand for
pub const AXIS_ABBREVIATIONS: [(&str, &str); 5] = [
    ("wg", "wght"),
    ("wd", "wdth"),
    ("oz", "opsz"),
    ("it", "ital"),
    ("sl", "slnt"),
];

const THIN_SPACE: char = '\u{2009}';

// Words, numbers, comparison operators; anything else is kept as a token of its own.
#[allow(clippy::unwrap_used)]
static CONDITION_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z_][A-Za-z0-9_]*|-?[0-9]+(?:\.[0-9]+)?|<=|>=|==|[<>=‹›≤≥]|,|\S").unwrap()
});

/// Does this layer name encode a condition?
pub fn is_bracket_name(name: &str) -> bool {
    name.contains('[') && name.contains(']')
}

/// The canonical form of a bracket layer condition
///
/// Two payloads which differ only in spacing, range separator or axis tag
/// abbreviation produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConditionKey(SmolStr);

impl ConditionKey {
    /// Canonicalize a raw bracket payload
    pub fn new(payload: &str) -> Self {
        ConditionKey(canonicalize(payload).into())
    }

    /// The canonical expression, as it appears after `condition` in feature code
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ConditionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A condition parsed from a bracket layer's name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketCondition {
    /// The text found between the brackets, untouched
    pub payload: String,
    /// The canonical grouping key
    pub key: ConditionKey,
    /// The suffix for this layer's alternate, without its leading dot
    pub suffix: SmolStr,
}

impl BracketCondition {
    /// Parse the condition from a layer name.
    ///
    /// Returns `None` if the name is not a bracket layer name. `default_suffix`
    /// is the run's suffix, with or without its leading dot.
    pub fn parse(layer_name: &str, default_suffix: &str) -> Option<Self> {
        if !is_bracket_name(layer_name) {
            return None;
        }
        let payload = bracket_payload(layer_name).to_string();
        Some(BracketCondition {
            key: ConditionKey::new(&payload),
            suffix: layer_suffix(layer_name, default_suffix),
            payload,
        })
    }
}

/// The text between the first `[` and its matching `]`
///
/// Nested brackets are balanced. An unclosed bracket yields everything after it.
pub fn bracket_payload(name: &str) -> &str {
    let Some(open) = name.find('[') else {
        return "";
    };
    let rest = &name[open + 1..];
    let mut depth = 0usize;
    for (ix, ch) in rest.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' if depth == 0 => return &rest[..ix],
            ']' => depth -= 1,
            _ => {}
        }
    }
    rest
}

/// The alternate suffix a layer asks for, without its leading dot
///
/// `Alt.ss01 [wg‹400]` asks for `ss01`. Names with no dotted token before the
/// bracket, or whose token is the default suffix, get the default suffix.
pub fn layer_suffix(layer_name: &str, default_suffix: &str) -> SmolStr {
    let default = default_suffix.trim_start_matches('.');
    let before_bracket = layer_name.split('[').next().unwrap_or_default();
    match before_bracket.rsplit_once('.') {
        Some((_, token)) if !token.trim().is_empty() && token.trim() != default => {
            token.trim().into()
        }
        _ => default.into(),
    }
}

/// Canonicalize a bracket payload into feature code condition syntax
///
/// `wg‹400` becomes `wght < 400`, `400 ‹ wd‹ 700` becomes `400 < wdth < 700`,
/// and multiple axes are separated by `, `.
pub fn canonicalize(payload: &str) -> String {
    let payload = payload.replace(THIN_SPACE, " ");
    let mut out = String::with_capacity(payload.len() + 8);
    for token in CONDITION_TOKEN.find_iter(&payload).map(|m| m.as_str()) {
        let token = match token {
            "‹" => "<",
            "›" => ">",
            "≤" => "<=",
            "≥" => ">=",
            other => expand_axis_tag(other),
        };
        if token == "," {
            out.push(',');
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    }
    out
}

fn expand_axis_tag(token: &str) -> &str {
    AXIS_ABBREVIATIONS
        .iter()
        .find(|(abbreviation, _)| *abbreviation == token)
        .map(|(_, tag)| *tag)
        .unwrap_or(token)
}

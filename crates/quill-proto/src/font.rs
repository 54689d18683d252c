//! Font catalog entries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of the font catalog.
///
/// Only `scriptName` is interpreted natively; it is matched exactly against
/// the globally selected font name. Every other field (file URL, display
/// name, weights) belongs to the editing surface and is carried through
/// unchanged in `ENABLE_FONT`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontDescriptor {
    /// Family name used by the surface's stylesheet.
    #[serde(rename = "scriptName")]
    pub script_name: String,
    /// Surface-specific fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FontDescriptor {
    /// Descriptor carrying only a script name.
    pub fn new(script_name: impl Into<String>) -> Self {
        Self { script_name: script_name.into(), extra: Map::new() }
    }

    /// Attach a surface-specific field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn extra_fields_survive_round_trip() {
        let raw = json!({ "scriptName": "LXGW", "url": "fonts/lxgw.ttf", "weight": 400 });
        let font: FontDescriptor = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(font.script_name, "LXGW");
        assert_eq!(font.extra.get("url"), Some(&json!("fonts/lxgw.ttf")));
        assert_eq!(serde_json::to_value(&font).unwrap(), raw);
    }

    #[test]
    fn missing_script_name_is_rejected() {
        let result = serde_json::from_value::<FontDescriptor>(json!({ "url": "x.ttf" }));
        assert!(result.is_err());
    }
}

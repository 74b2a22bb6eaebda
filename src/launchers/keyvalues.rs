//! Valve KeyValues text format (`.vdf`, `.acf`).
//!
//! ```text
//! "libraryfolders"
//! {
//!     "0"
//!     {
//!         "path"      "C:\\Program Files (x86)\\Steam"
//!     }
//! }
//! ```
//!
//! Parsing is done by `keyvalues-parser`, the backend `steamlocate` uses.
//! Steam has changed key casing between client versions (`LibraryFolders`
//! vs `libraryfolders`, `BetaKey` vs `betakey`), so the parsed tree is
//! copied into [`KeyValues`] with every key lowercased. Values keep their
//! original text.

use keyvalues_parser::{Value as VdfValue, Vdf};
use thiserror::Error;

/// Errors produced while parsing KeyValues text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyValuesError {
    #[error("invalid KeyValues document: {message}")]
    Syntax { message: String },
}

/// A value in a KeyValues document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(String),
    Block(KeyValues),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Block(_) => None,
        }
    }

    pub fn as_block(&self) -> Option<&KeyValues> {
        match self {
            Value::Block(kv) => Some(kv),
            Value::String(_) => None,
        }
    }

    fn from_vdf(value: &VdfValue<'_>) -> Self {
        match value {
            VdfValue::Str(s) => Value::String(s.to_string()),
            VdfValue::Obj(obj) => {
                let mut entries = Vec::new();
                for (key, values) in obj.iter() {
                    let key = key.to_lowercase();
                    for value in values {
                        entries.push((key.clone(), Value::from_vdf(value)));
                    }
                }
                Value::Block(KeyValues { entries })
            }
        }
    }
}

/// Key/value pairs with lowercased keys.
///
/// Entries come in key order; a repeated key keeps every value in document
/// order and lookups return the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValues {
    entries: Vec<(String, Value)>,
}

impl KeyValues {
    /// Parse a whole document. The result holds the single top-level pair.
    pub fn parse(input: &str) -> Result<Self, KeyValuesError> {
        let vdf = Vdf::parse(input).map_err(|e| KeyValuesError::Syntax {
            message: e.to_string(),
        })?;

        Ok(Self {
            entries: vec![(vdf.key.to_lowercase(), Value::from_vdf(&vdf.value))],
        })
    }

    /// Look up a value. `key` is matched case-insensitively.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let key = key.to_lowercase();
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_block(&self, key: &str) -> Option<&KeyValues> {
        self.get(key).and_then(Value::as_block)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Strict JSON codec.

use serde_json::{Map, Value};

use super::{CodecError, ConfigCodec, ConfigDocument, ConfigFormat};

/// Strict JSON configuration codec.
///
/// Edits re-serialize the whole document with 2-space indentation and a
/// trailing newline. Key order is kept as read.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec;

impl JsonCodec {
    fn load_map(&self, doc: &ConfigDocument) -> Result<Map<String, Value>, CodecError> {
        if doc.is_blank() {
            return Ok(Map::new());
        }
        let value: Value = serde_json::from_str(doc.text())
            .map_err(|err| CodecError::parse(ConfigFormat::Json, err.to_string()))?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(CodecError::parse(
                ConfigFormat::Json,
                "expected JSON object at root",
            )),
        }
    }

    fn render(map: &Map<String, Value>) -> Result<ConfigDocument, CodecError> {
        let mut text = serde_json::to_string_pretty(map)
            .map_err(|err| CodecError::parse(ConfigFormat::Json, err.to_string()))?;
        text.push('\n');
        Ok(ConfigDocument::new(ConfigFormat::Json, text))
    }
}

impl ConfigCodec for JsonCodec {
    fn format(&self) -> ConfigFormat {
        ConfigFormat::Json
    }

    fn to_value(&self, doc: &ConfigDocument) -> Result<Value, CodecError> {
        self.load_map(doc).map(Value::Object)
    }

    fn set_key_path(
        &self,
        doc: &ConfigDocument,
        path: &[&str],
        value: &Value,
    ) -> Result<ConfigDocument, CodecError> {
        let mut root = self.load_map(doc)?;
        set_map_at_path(&mut root, path, value.clone())?;
        Self::render(&root)
    }

    fn delete_key_path(
        &self,
        doc: &ConfigDocument,
        path: &[&str],
    ) -> Result<ConfigDocument, CodecError> {
        let mut root = self.load_map(doc)?;
        if remove_map_at_path(&mut root, path).is_none() {
            return Ok(doc.clone());
        }
        Self::render(&root)
    }
}

/// Insert `value` at `path`, creating objects for missing segments.
///
/// Replacing an existing key keeps its position in the parent object.
pub(crate) fn set_map_at_path(
    root: &mut Map<String, Value>,
    path: &[&str],
    value: Value,
) -> Result<(), CodecError> {
    let Some((last, parents)) = path.split_last() else {
        return Err(CodecError::EmptyPath);
    };

    let mut current = root;
    for segment in parents {
        let entry = current
            .entry((*segment).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        current = entry
            .as_object_mut()
            .ok_or_else(|| CodecError::NotAnObject {
                segment: (*segment).to_string(),
            })?;
    }
    current.insert((*last).to_string(), value);
    Ok(())
}

/// Remove the value at `path`, returning it when it existed.
pub(crate) fn remove_map_at_path(root: &mut Map<String, Value>, path: &[&str]) -> Option<Value> {
    let (last, parents) = path.split_last()?;
    let mut current = root;
    for segment in parents {
        current = current.get_mut(*segment)?.as_object_mut()?;
    }
    current.shift_remove(*last)
}

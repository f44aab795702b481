//! TOML codec.
//!
//! Reads convert through `toml::Value` into JSON. Edits go through a
//! `toml_edit` document so comments, ordering and untouched tables survive.

use serde_json::{Map, Value};
use toml_edit::{ArrayOfTables, DocumentMut, InlineTable, Item, Table};

use super::{CodecError, ConfigCodec, ConfigDocument, ConfigFormat, value_at_path};

/// TOML configuration codec.
#[derive(Debug, Default, Clone, Copy)]
pub struct TomlCodec;

impl TomlCodec {
    fn parse(&self, doc: &ConfigDocument) -> Result<DocumentMut, CodecError> {
        doc.text()
            .parse::<DocumentMut>()
            .map_err(|err| CodecError::parse(ConfigFormat::Toml, err.to_string()))
    }

    fn finish(toml: DocumentMut) -> ConfigDocument {
        ConfigDocument::new(ConfigFormat::Toml, toml.to_string())
    }

    /// Insert or replace the `[[array_key]]` entry whose `name` field equals `name`.
    ///
    /// Any existing entries with that name are removed first and the new one
    /// is appended after the remaining entries. An inline `array_key = []`
    /// is converted to an array of tables.
    pub fn upsert_named_entry(
        &self,
        doc: &ConfigDocument,
        array_key: &str,
        name: &str,
        entry: &Map<String, Value>,
    ) -> Result<ConfigDocument, CodecError> {
        let mut toml = self.parse(doc)?;
        let root = toml.as_table_mut();

        if let Some(Item::Value(toml_edit::Value::Array(_))) = root.get(array_key)
            && let Some(Item::Value(toml_edit::Value::Array(inline))) = root.remove(array_key)
        {
            let mut tables = ArrayOfTables::new();
            for element in inline {
                match element {
                    toml_edit::Value::InlineTable(table) => tables.push(table.into_table()),
                    _ => {
                        return Err(CodecError::NotAnObject {
                            segment: array_key.to_string(),
                        });
                    }
                }
            }
            root.insert(array_key, Item::ArrayOfTables(tables));
        }

        let tables = root
            .entry(array_key)
            .or_insert(Item::ArrayOfTables(ArrayOfTables::new()))
            .as_array_of_tables_mut()
            .ok_or_else(|| CodecError::NotAnObject {
                segment: array_key.to_string(),
            })?;
        tables.retain(|table| entry_name(table) != Some(name));
        tables.push(json_object_to_table(entry));

        Ok(Self::finish(toml))
    }

    /// Remove every `[[array_key]]` entry named `name`.
    ///
    /// The key itself is dropped once no entries remain, including an empty
    /// inline `array_key = []`.
    pub fn remove_named_entry(
        &self,
        doc: &ConfigDocument,
        array_key: &str,
        name: &str,
    ) -> Result<ConfigDocument, CodecError> {
        let mut toml = self.parse(doc)?;
        let root = toml.as_table_mut();

        let now_empty = match root.get_mut(array_key) {
            Some(Item::ArrayOfTables(tables)) => {
                tables.retain(|table| entry_name(table) != Some(name));
                tables.is_empty()
            }
            Some(Item::Value(toml_edit::Value::Array(inline))) => {
                inline.retain(|element| {
                    element
                        .as_inline_table()
                        .and_then(|table| table.get("name"))
                        .and_then(|value| value.as_str())
                        != Some(name)
                });
                inline.is_empty()
            }
            _ => return Ok(doc.clone()),
        };
        if now_empty {
            root.remove(array_key);
        }

        Ok(Self::finish(toml))
    }

    /// Find the `[[array_key]]` entry named `name`.
    pub fn named_entry(
        &self,
        doc: &ConfigDocument,
        array_key: &str,
        name: &str,
    ) -> Result<Option<Value>, CodecError> {
        let root = self.to_value(doc)?;
        let found = value_at_path(&root, &[array_key])
            .and_then(Value::as_array)
            .and_then(|entries| {
                entries
                    .iter()
                    .rev()
                    .find(|entry| entry.get("name").and_then(Value::as_str) == Some(name))
            })
            .cloned();
        Ok(found)
    }
}

impl ConfigCodec for TomlCodec {
    fn format(&self) -> ConfigFormat {
        ConfigFormat::Toml
    }

    fn to_value(&self, doc: &ConfigDocument) -> Result<Value, CodecError> {
        if doc.is_blank() {
            return Ok(Value::Object(Map::new()));
        }
        let table: toml::Table = toml::from_str(doc.text())
            .map_err(|err| CodecError::parse(ConfigFormat::Toml, err.to_string()))?;
        Ok(toml_to_json_value(toml::Value::Table(table)))
    }

    fn set_key_path(
        &self,
        doc: &ConfigDocument,
        path: &[&str],
        value: &Value,
    ) -> Result<ConfigDocument, CodecError> {
        let Some((last, parents)) = path.split_last() else {
            return Err(CodecError::EmptyPath);
        };
        let mut toml = self.parse(doc)?;

        let mut table = toml.as_table_mut();
        for segment in parents {
            table = table
                .entry(segment)
                .or_insert(implicit_table())
                .as_table_mut()
                .ok_or_else(|| CodecError::NotAnObject {
                    segment: (*segment).to_string(),
                })?;
        }

        match value {
            Value::Object(map) => {
                table.insert(last, Item::Table(json_object_to_table(map)));
            }
            other => match json_to_toml_value(other) {
                Some(converted) => {
                    table.insert(last, Item::Value(converted));
                }
                None => {
                    table.remove(last);
                }
            },
        }

        Ok(Self::finish(toml))
    }

    fn delete_key_path(
        &self,
        doc: &ConfigDocument,
        path: &[&str],
    ) -> Result<ConfigDocument, CodecError> {
        let Some((last, parents)) = path.split_last() else {
            return Err(CodecError::EmptyPath);
        };
        let mut toml = self.parse(doc)?;

        let mut table: &mut dyn toml_edit::TableLike = toml.as_table_mut();
        for segment in parents {
            match table
                .get_mut(segment)
                .and_then(|item| item.as_table_like_mut())
            {
                Some(child) => table = child,
                None => return Ok(doc.clone()),
            }
        }
        if table.remove(last).is_none() {
            return Ok(doc.clone());
        }

        Ok(Self::finish(toml))
    }
}

fn implicit_table() -> Item {
    let mut table = Table::new();
    table.set_implicit(true);
    Item::Table(table)
}

fn entry_name(table: &Table) -> Option<&str> {
    table.get("name").and_then(|item| item.as_str())
}

/// Convert a JSON object into a standard table. Nested objects become inline tables.
fn json_object_to_table(map: &Map<String, Value>) -> Table {
    let mut table = Table::new();
    for (key, value) in map {
        if let Some(converted) = json_to_toml_value(value) {
            table.insert(key.as_str(), Item::Value(converted));
        }
    }
    table
}

/// Convert a JSON value into a TOML value. `null` has no TOML form and yields `None`.
fn json_to_toml_value(value: &Value) -> Option<toml_edit::Value> {
    let converted = match value {
        Value::Null => return None,
        Value::Bool(b) => toml_edit::Value::from(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => toml_edit::Value::from(i),
            None => toml_edit::Value::from(n.as_f64()?),
        },
        Value::String(s) => toml_edit::Value::from(s.as_str()),
        Value::Array(items) => {
            let array: toml_edit::Array = items.iter().filter_map(json_to_toml_value).collect();
            toml_edit::Value::Array(array)
        }
        Value::Object(map) => {
            let mut inline = InlineTable::new();
            for (key, value) in map {
                if let Some(converted) = json_to_toml_value(value) {
                    inline.insert(key.as_str(), converted);
                }
            }
            toml_edit::Value::InlineTable(inline)
        }
    };
    Some(converted)
}

/// Convert a single TOML value to a JSON value.
fn toml_to_json_value(toml_value: toml::Value) -> Value {
    match toml_value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(f.to_string())),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json_value).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json_value(value)))
                .collect(),
        ),
    }
}

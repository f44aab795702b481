//! Client configuration file codecs.
//!
//! Agents keep their MCP server lists in JSON, JSON-with-comments or TOML
//! files. Every codec works on a [`ConfigDocument`] that carries the file's
//! source text, so an edit only rewrites what the key path names and
//! everything else the user wrote stays where it was.

mod json;
mod jsonc;
mod toml_doc;

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

pub use json::JsonCodec;
pub use jsonc::JsoncCodec;
pub use toml_doc::TomlCodec;

/// On-disk format of an agent configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigFormat {
    /// Strict JSON, rewritten with 2-space indentation.
    Json,
    /// JSON with `//` and `/* */` comments and trailing commas, edited in place.
    JsonWithComments,
    /// TOML, edited through a format-preserving document.
    Toml,
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFormat::Json => f.write_str("JSON"),
            ConfigFormat::JsonWithComments => f.write_str("JSON with comments"),
            ConfigFormat::Toml => f.write_str("TOML"),
        }
    }
}

/// Errors raised while reading, editing or writing a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config: {message}")]
    Parse {
        format: ConfigFormat,
        message: String,
    },

    #[error("Expected '{segment}' to be an object")]
    NotAnObject { segment: String },

    #[error("Key path cannot be empty")]
    EmptyPath,
}

impl CodecError {
    pub(crate) fn parse(format: ConfigFormat, message: impl Into<String>) -> Self {
        CodecError::Parse {
            format,
            message: message.into(),
        }
    }

    fn in_file(self, path: &Path) -> Self {
        match self {
            CodecError::Parse { format, message } => CodecError::Parse {
                format,
                message: format!("{}: {message}", path.display()),
            },
            other => other,
        }
    }
}

/// Source text of a configuration file together with its format.
///
/// An empty text is a valid, empty document for every format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    format: ConfigFormat,
    text: String,
}

impl ConfigDocument {
    pub fn new(format: ConfigFormat, text: impl Into<String>) -> Self {
        Self {
            format,
            text: text.into(),
        }
    }

    pub fn empty(format: ConfigFormat) -> Self {
        Self::new(format, String::new())
    }

    pub fn format(&self) -> ConfigFormat {
        self.format
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Read/edit/write contract shared by every configuration format.
pub trait ConfigCodec: Send + Sync {
    /// Format handled by this codec.
    fn format(&self) -> ConfigFormat;

    /// Parse the whole document into a JSON value (an object at the root).
    fn to_value(&self, doc: &ConfigDocument) -> Result<Value, CodecError>;

    /// Set `value` at `path`, creating intermediate objects as needed.
    fn set_key_path(
        &self,
        doc: &ConfigDocument,
        path: &[&str],
        value: &Value,
    ) -> Result<ConfigDocument, CodecError>;

    /// Delete the entry at `path`. A missing entry leaves the document unchanged.
    fn delete_key_path(
        &self,
        doc: &ConfigDocument,
        path: &[&str],
    ) -> Result<ConfigDocument, CodecError>;

    /// Load a configuration file.
    ///
    /// A missing file yields an empty document. Content that does not parse
    /// is reported as [`CodecError::Parse`] so callers never overwrite it.
    fn read(&self, path: &Path) -> Result<ConfigDocument, CodecError> {
        if !path.exists() {
            return Ok(ConfigDocument::empty(self.format()));
        }
        let text = std::fs::read_to_string(path).map_err(|source| CodecError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let doc = ConfigDocument::new(self.format(), text);
        self.to_value(&doc).map_err(|err| err.in_file(path))?;
        Ok(doc)
    }

    /// Replace the file with the document, creating parent directories first.
    fn write(&self, path: &Path, doc: &ConfigDocument) -> Result<(), CodecError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| CodecError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, doc.text()).map_err(|source| CodecError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Look up the value at `path`, if any.
    fn get_key_path(
        &self,
        doc: &ConfigDocument,
        path: &[&str],
    ) -> Result<Option<Value>, CodecError> {
        let root = self.to_value(doc)?;
        Ok(value_at_path(&root, path).cloned())
    }
}

/// Create a codec for the given format.
pub fn codec_for(format: ConfigFormat) -> Box<dyn ConfigCodec> {
    match format {
        ConfigFormat::Json => Box::new(JsonCodec),
        ConfigFormat::JsonWithComments => Box::new(JsoncCodec),
        ConfigFormat::Toml => Box::new(TomlCodec),
    }
}

/// Walk `path` through nested objects.
pub fn value_at_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = root;
    for segment in path {
        current = current.as_object()?.get(*segment)?;
    }
    Some(current)
}

/// Wrap `value` in one object per remaining path segment.
pub(crate) fn nest_value(path: &[&str], value: &Value) -> Value {
    path.iter().rev().fold(value.clone(), |inner, segment| {
        let mut map = Map::new();
        map.insert((*segment).to_string(), inner);
        Value::Object(map)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn read_missing_file_returns_empty_document() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("absent.json");

        for format in [
            ConfigFormat::Json,
            ConfigFormat::JsonWithComments,
            ConfigFormat::Toml,
        ] {
            let doc = codec_for(format).read(&path).expect("read should succeed");
            assert!(doc.is_blank());
            assert_eq!(doc.format(), format);
        }
    }

    #[test]
    fn read_malformed_file_reports_parse_error_with_path() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("broken.json");
        std::fs::write(&path, "{ \"mcpServers\": ").expect("write file");

        let err = JsonCodec.read(&path).expect_err("malformed JSON must fail");

        match err {
            CodecError::Parse { format, message } => {
                assert_eq!(format, ConfigFormat::Json);
                assert!(message.contains("broken.json"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn write_creates_parent_directories() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("nested/deep/mcp.json");
        let doc = ConfigDocument::new(ConfigFormat::Json, "{}\n");

        JsonCodec.write(&path, &doc).expect("write should succeed");

        assert_eq!(std::fs::read_to_string(&path).expect("read"), "{}\n");
    }

    #[test]
    fn get_key_path_walks_nested_objects() {
        let doc = ConfigDocument::new(
            ConfigFormat::Json,
            r#"{"mcpServers": {"nia": {"command": "pipx"}}}"#,
        );

        let found = JsonCodec
            .get_key_path(&doc, &["mcpServers", "nia"])
            .expect("lookup");
        let missing = JsonCodec
            .get_key_path(&doc, &["mcpServers", "other"])
            .expect("lookup");

        assert_eq!(found, Some(json!({"command": "pipx"})));
        assert_eq!(missing, None);
    }

    #[test]
    fn nest_value_wraps_each_segment() {
        let nested = nest_value(&["a", "b"], &json!(1));
        assert_eq!(nested, json!({"a": {"b": 1}}));
    }
}

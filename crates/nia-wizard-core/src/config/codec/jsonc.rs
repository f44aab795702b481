//! JSON-with-comments codec.
//!
//! Edits are text patches against the original source. A small scanner
//! records the byte span of every object member, and an edit then replaces,
//! inserts or removes exactly one member. Comments, blank lines, key order
//! and indentation outside that member stay as the author wrote them.

use serde_json::{Map, Value};

use super::{CodecError, ConfigCodec, ConfigDocument, ConfigFormat, nest_value};

const INDENT_UNIT: &str = "  ";

/// Comment-tolerant JSON codec (VS Code style settings files).
#[derive(Debug, Default, Clone, Copy)]
pub struct JsoncCodec;

impl ConfigCodec for JsoncCodec {
    fn format(&self) -> ConfigFormat {
        ConfigFormat::JsonWithComments
    }

    fn to_value(&self, doc: &ConfigDocument) -> Result<Value, CodecError> {
        match parse_document(doc.text())? {
            None => Ok(Value::Object(Map::new())),
            Some(Node::Object(_)) => json5::from_str(doc.text())
                .map_err(|err| CodecError::parse(ConfigFormat::JsonWithComments, err.to_string())),
            Some(Node::Other { .. }) => Err(CodecError::parse(
                ConfigFormat::JsonWithComments,
                "expected object at root",
            )),
        }
    }

    fn set_key_path(
        &self,
        doc: &ConfigDocument,
        path: &[&str],
        value: &Value,
    ) -> Result<ConfigDocument, CodecError> {
        if path.is_empty() {
            return Err(CodecError::EmptyPath);
        }
        let text = doc.text();
        let root = match parse_document(text)? {
            Some(Node::Object(root)) => root,
            Some(Node::Other { .. }) => {
                return Err(CodecError::parse(
                    ConfigFormat::JsonWithComments,
                    "expected object at root",
                ));
            }
            None => {
                // Blank or comment-only: keep whatever is there and append a fresh object.
                let mut out = text.trim_end().to_string();
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(&render(&nest_value(path, value), "")?);
                out.push('\n');
                return Ok(ConfigDocument::new(ConfigFormat::JsonWithComments, out));
            }
        };

        let edits = plan_set(text, &root, path, value)?;
        Ok(ConfigDocument::new(
            ConfigFormat::JsonWithComments,
            apply_edits(text, edits),
        ))
    }

    fn delete_key_path(
        &self,
        doc: &ConfigDocument,
        path: &[&str],
    ) -> Result<ConfigDocument, CodecError> {
        if path.is_empty() {
            return Err(CodecError::EmptyPath);
        }
        let text = doc.text();
        let Some(Node::Object(root)) = parse_document(text)? else {
            return Ok(doc.clone());
        };
        match plan_delete(text, &root, path) {
            Some(edits) => Ok(ConfigDocument::new(
                ConfigFormat::JsonWithComments,
                apply_edits(text, edits),
            )),
            None => Ok(doc.clone()),
        }
    }
}

#[derive(Debug)]
enum Node {
    Object(ObjectNode),
    /// Arrays and scalars; only their span matters for editing.
    Other { start: usize, end: usize },
}

impl Node {
    fn start(&self) -> usize {
        match self {
            Node::Object(object) => object.start,
            Node::Other { start, .. } => *start,
        }
    }

    fn end(&self) -> usize {
        match self {
            Node::Object(object) => object.end,
            Node::Other { end, .. } => *end,
        }
    }
}

#[derive(Debug)]
struct ObjectNode {
    /// Offset of `{`.
    start: usize,
    /// Offset just past `}`.
    end: usize,
    members: Vec<Member>,
}

impl ObjectNode {
    /// Later duplicates win, as in a JSON parser.
    fn find(&self, key: &str) -> Option<&Member> {
        self.members.iter().rev().find(|member| member.key == key)
    }
}

#[derive(Debug)]
struct Member {
    key: String,
    key_start: usize,
    value: Node,
}

struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str, pos: usize) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn error(&self, message: &str) -> CodecError {
        let consumed = &self.src[..self.pos.min(self.src.len())];
        let line = consumed.matches('\n').count() + 1;
        let column = consumed.len() - consumed.rfind('\n').map_or(0, |i| i + 1) + 1;
        CodecError::parse(
            ConfigFormat::JsonWithComments,
            format!("{message} at line {line} column {column}"),
        )
    }

    fn skip_trivia(&mut self) -> Result<(), CodecError> {
        loop {
            match self.peek() {
                Some(b) if b.is_ascii_whitespace() => self.pos += 1,
                Some(b'/') => match self.bytes.get(self.pos + 1) {
                    Some(b'/') => {
                        while let Some(b) = self.peek() {
                            if b == b'\n' {
                                break;
                            }
                            self.pos += 1;
                        }
                    }
                    Some(b'*') => {
                        let body = self.pos + 2;
                        match self.src[body..].find("*/") {
                            Some(offset) => self.pos = body + offset + 2,
                            None => return Err(self.error("unterminated block comment")),
                        }
                    }
                    _ => return Err(self.error("unexpected '/'")),
                },
                _ => return Ok(()),
            }
        }
    }

    fn parse_value(&mut self) -> Result<Node, CodecError> {
        self.skip_trivia()?;
        match self.peek() {
            Some(b'{') => self.parse_object().map(Node::Object),
            Some(b'[') => self.parse_array(),
            Some(b'"') => {
                let (start, end) = self.parse_string()?;
                Ok(Node::Other { start, end })
            }
            Some(_) => self.parse_literal(),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_string(&mut self) -> Result<(usize, usize), CodecError> {
        let start = self.pos;
        self.pos += 1;
        while let Some(b) = self.peek() {
            match b {
                b'\\' => self.pos += 2,
                b'"' => {
                    self.pos += 1;
                    return Ok((start, self.pos));
                }
                b'\n' => break,
                _ => self.pos += 1,
            }
        }
        Err(self.error("unterminated string"))
    }

    fn parse_literal(&mut self) -> Result<Node, CodecError> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.') {
                self.pos += 1;
            } else {
                break;
            }
        }
        if start == self.pos {
            return Err(self.error("unexpected character"));
        }
        let literal = &self.src[start..self.pos];
        let valid = matches!(literal, "true" | "false" | "null")
            || serde_json::from_str::<serde_json::Number>(literal).is_ok();
        if !valid {
            return Err(self.error("invalid literal"));
        }
        Ok(Node::Other {
            start,
            end: self.pos,
        })
    }

    fn parse_array(&mut self) -> Result<Node, CodecError> {
        let start = self.pos;
        self.pos += 1;
        loop {
            self.skip_trivia()?;
            if self.peek() == Some(b']') {
                self.pos += 1;
                break;
            }
            self.parse_value()?;
            self.skip_trivia()?;
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.error("expected ',' or ']'")),
            }
        }
        Ok(Node::Other {
            start,
            end: self.pos,
        })
    }

    fn parse_object(&mut self) -> Result<ObjectNode, CodecError> {
        let start = self.pos;
        self.pos += 1;
        let mut members = Vec::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                Some(b'"') => {}
                _ => return Err(self.error("expected object key")),
            }
            let (key_start, key_end) = self.parse_string()?;
            let key: String = serde_json::from_str(&self.src[key_start..key_end])
                .map_err(|_| self.error("invalid object key"))?;
            self.skip_trivia()?;
            if self.peek() != Some(b':') {
                return Err(self.error("expected ':'"));
            }
            self.pos += 1;
            let value = self.parse_value()?;
            members.push(Member {
                key,
                key_start,
                value,
            });
            self.skip_trivia()?;
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.error("expected ',' or '}'")),
            }
        }
        Ok(ObjectNode {
            start,
            end: self.pos,
            members,
        })
    }
}

/// Parse a whole document. `None` means it holds nothing but whitespace and comments.
fn parse_document(src: &str) -> Result<Option<Node>, CodecError> {
    let mut scanner = Scanner::new(src, 0);
    scanner.skip_trivia()?;
    if scanner.peek().is_none() {
        return Ok(None);
    }
    let node = scanner.parse_value()?;
    scanner.skip_trivia()?;
    if scanner.peek().is_some() {
        return Err(scanner.error("unexpected trailing content"));
    }
    Ok(Some(node))
}

struct Edit {
    start: usize,
    end: usize,
    text: String,
}

impl Edit {
    fn insert(at: usize, text: String) -> Self {
        Self {
            start: at,
            end: at,
            text,
        }
    }

    fn remove(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            text: String::new(),
        }
    }
}

/// Apply non-overlapping edits, back to front so earlier offsets stay valid.
fn apply_edits(src: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by(|a, b| b.start.cmp(&a.start));
    let mut out = src.to_string();
    for edit in edits {
        out.replace_range(edit.start..edit.end, &edit.text);
    }
    out
}

fn plan_set(
    text: &str,
    root: &ObjectNode,
    path: &[&str],
    value: &Value,
) -> Result<Vec<Edit>, CodecError> {
    let mut object = root;
    for (index, segment) in path.iter().enumerate() {
        let rest = &path[index + 1..];
        match object.find(segment) {
            Some(member) if rest.is_empty() => {
                let indent = line_indent(text, member.key_start);
                return Ok(vec![Edit {
                    start: member.value.start(),
                    end: member.value.end(),
                    text: render(value, indent)?,
                }]);
            }
            Some(member) => match &member.value {
                Node::Object(child) => object = child,
                Node::Other { .. } => {
                    return Err(CodecError::NotAnObject {
                        segment: (*segment).to_string(),
                    });
                }
            },
            None => return insert_member(text, object, segment, &nest_value(rest, value)),
        }
    }
    Err(CodecError::EmptyPath)
}

fn insert_member(
    text: &str,
    object: &ObjectNode,
    key: &str,
    value: &Value,
) -> Result<Vec<Edit>, CodecError> {
    let key_json = serde_json::to_string(key)
        .map_err(|err| CodecError::parse(ConfigFormat::JsonWithComments, err.to_string()))?;

    let Some(last) = object.members.last() else {
        let indent = line_indent(text, object.start);
        let member_indent = format!("{indent}{INDENT_UNIT}");
        let member = format!("{key_json}: {}", render(value, &member_indent)?);
        let (inner_start, inner_end) = (object.start + 1, object.end - 1);
        if text[inner_start..inner_end].trim().is_empty() {
            return Ok(vec![Edit {
                start: inner_start,
                end: inner_end,
                text: format!("\n{member_indent}{member}\n{indent}"),
            }]);
        }
        return Ok(vec![Edit::insert(
            inner_start,
            format!("\n{member_indent}{member}"),
        )]);
    };

    let value_end = last.value.end();
    let line_end = text[value_end..]
        .find('\n')
        .map_or(text.len(), |offset| value_end + offset);
    let tail = text[value_end..line_end].trim_start();
    let (has_comma, after_comma) = match tail.strip_prefix(',') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, tail),
    };
    let indent = line_indent(text, last.key_start);
    let rendered = render(value, indent)?;

    let own_line = starts_line(text, last.key_start)
        && (after_comma.is_empty() || after_comma.starts_with("//"));
    if !own_line {
        return Ok(vec![Edit::insert(
            value_end,
            format!(", {key_json}: {rendered}"),
        )]);
    }

    let mut edits = vec![Edit::insert(
        line_end,
        format!("\n{indent}{key_json}: {rendered}"),
    )];
    if !has_comma {
        edits.push(Edit::insert(value_end, ",".to_string()));
    }
    Ok(edits)
}

fn plan_delete(text: &str, root: &ObjectNode, path: &[&str]) -> Option<Vec<Edit>> {
    let (last, parents) = path.split_last()?;
    let mut object = root;
    for segment in parents {
        match &object.find(segment)?.value {
            Node::Object(child) => object = child,
            Node::Other { .. } => return None,
        }
    }

    let index = object
        .members
        .iter()
        .rposition(|member| member.key == *last)?;
    let member = &object.members[index];
    let value_end = member.value.end();
    let start = if starts_line(text, member.key_start) {
        line_start(text, member.key_start)
    } else {
        member.key_start
    };

    let edit = match comma_after(text, value_end) {
        Some(comma) => Edit::remove(start, swallow_line_end(text, comma + 1)),
        // Last member without a trailing comma: drop the separator before it instead.
        None if index > 0 => {
            let previous = &object.members[index - 1];
            let separator = comma_after(text, previous.value.end())?;
            if text[separator + 1..member.key_start].trim().is_empty() {
                Edit::remove(separator, value_end)
            } else {
                // Comments after the separator belong to the previous member.
                return Some(vec![
                    Edit::remove(separator, separator + 1),
                    Edit::remove(start, swallow_line_end(text, value_end)),
                ]);
            }
        }
        None => Edit::remove(start, swallow_line_end(text, value_end)),
    };
    Some(vec![edit])
}

fn comma_after(text: &str, pos: usize) -> Option<usize> {
    let mut scanner = Scanner::new(text, pos);
    scanner.skip_trivia().ok()?;
    (scanner.peek() == Some(b',')).then_some(scanner.pos)
}

/// Extend `pos` over trailing blanks and one newline, when nothing else follows on the line.
fn swallow_line_end(text: &str, pos: usize) -> usize {
    let rest = &text[pos..];
    let blanks = rest.len() - rest.trim_start_matches(|c| c == ' ' || c == '\t').len();
    match rest[blanks..].as_bytes().first() {
        Some(b'\n') => pos + blanks + 1,
        Some(b'\r') if rest[blanks..].starts_with("\r\n") => pos + blanks + 2,
        _ => pos,
    }
}

fn line_start(text: &str, pos: usize) -> usize {
    text[..pos].rfind('\n').map_or(0, |i| i + 1)
}

fn starts_line(text: &str, pos: usize) -> bool {
    text[line_start(text, pos)..pos]
        .chars()
        .all(|c| c == ' ' || c == '\t')
}

fn line_indent(text: &str, pos: usize) -> &str {
    let line = &text[line_start(text, pos)..];
    let width = line.len() - line.trim_start_matches(|c| c == ' ' || c == '\t').len();
    &line[..width]
}

/// Pretty-print `value` so continuation lines sit under `indent`.
fn render(value: &Value, indent: &str) -> Result<String, CodecError> {
    let pretty = serde_json::to_string_pretty(value)
        .map_err(|err| CodecError::parse(ConfigFormat::JsonWithComments, err.to_string()))?;
    Ok(pretty.replace('\n', &format!("\n{indent}")))
}

//! Frontmatter header parser.
//!
//! Parses the restricted YAML-like header that content files open with:
//!
//! ```text
//! ---
//! title: "Five ways to cut CPA"
//! draft: false
//! tags: [seo, ai]
//! hero:
//!   title: Cut CPA
//!   lead: A short lead.
//! metrics:
//!   - label: CPA
//!     value: "-32%"
//! ---
//! ```
//!
//! Supported: top-level scalars, one level of nested mappings, block lists
//! of scalars, block lists of flat mappings (at top level or one level
//! down), and `[a, b]` flow lists. Deeper nesting, multi-line scalars and
//! block scalars are not supported; such lines are skipped and the result
//! for that key is partial.
//!
//! The parse is a fold of [`ParserState::feed`] over the header lines. The
//! state resets on every zero-indent `key:` line.

use serde::Serialize;
use std::collections::BTreeMap;

/// Delimiter line that opens and closes the header.
pub const DELIMITER: &str = "---";

/// A parsed frontmatter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// `null` or `~`.
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// Any numeric-looking scalar.
    Number(f64),
    /// Everything else, with surrounding quotes removed.
    String(String),
    /// Block or flow list.
    List(Vec<Value>),
    /// Nested mapping.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Returns the string content, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number, if this is a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the items, if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries, if this is a mapping.
    #[must_use]
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Short name of the value's type, for messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::List(_) => "array",
            Self::Map(_) => "object",
        }
    }
}

/// The parsed header of one content file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Frontmatter {
    fields: BTreeMap<String, Value>,
}

impl Frontmatter {
    /// Returns the top-level value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Resolves a dotted path such as `hero.title`.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.fields.get(parts.next()?)?;
        for part in parts {
            current = current.as_map()?.get(part)?;
        }
        Some(current)
    }

    /// Returns all top-level fields.
    #[must_use]
    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    /// Returns true if the header has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Reasons a file has no parseable header.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrontmatterError {
    /// The file does not start with a `---` line.
    #[error("missing opening `---` delimiter")]
    MissingOpening,
    /// No closing `---` line follows the opening one.
    #[error("frontmatter block is not closed by a `---` line")]
    Unterminated,
}

/// Parses the frontmatter header at the start of `raw`.
///
/// # Errors
///
/// Returns an error if the file does not begin with a delimited header.
/// An empty header (`---` immediately followed by `---`) is valid and
/// yields an empty [`Frontmatter`].
pub fn parse(raw: &str) -> Result<Frontmatter, FrontmatterError> {
    let lines = extract_block(raw)?;
    Ok(parse_block(&lines))
}

/// Returns the lines between the opening and closing delimiters.
///
/// # Errors
///
/// See [`parse`].
pub fn extract_block(raw: &str) -> Result<Vec<&str>, FrontmatterError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut lines = raw.lines();

    match lines.next() {
        Some(first) if first.trim_end() == DELIMITER => {}
        _ => return Err(FrontmatterError::MissingOpening),
    }

    let mut block = Vec::new();
    for line in lines {
        if line.trim_end() == DELIMITER {
            return Ok(block);
        }
        block.push(line);
    }

    Err(FrontmatterError::Unterminated)
}

/// Parses header lines (without delimiters).
#[must_use]
pub fn parse_block(lines: &[&str]) -> Frontmatter {
    lines
        .iter()
        .fold(ParserState::new(), |mut state, line| {
            state.feed(line);
            state
        })
        .finish()
}

/// Which container the next indented line belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Scope {
    /// No open container; indented lines are ignored.
    #[default]
    Root,
    /// A top-level key with an empty value. Its mapping may still be empty,
    /// in which case a first `- item` turns it into a list.
    Object {
        /// Top-level key.
        key: String,
    },
    /// A top-level list.
    List {
        /// Top-level key.
        key: String,
        /// Marker indent of the open mapping item, if the last item was one.
        item: Option<usize>,
    },
    /// A list held by a field of a top-level mapping.
    NestedList {
        /// Top-level key.
        key: String,
        /// Field within the mapping.
        field: String,
        /// Indent of the field line.
        field_indent: usize,
        /// Marker indent of the open mapping item, if the last item was one.
        item: Option<usize>,
    },
}

/// One classified header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry<'a> {
    KeyValue { key: &'a str, value: &'a str },
    Item(&'a str),
    Other,
}

impl<'a> Entry<'a> {
    fn classify(text: &'a str) -> Self {
        if text == "-" {
            return Self::Item("");
        }
        if let Some(rest) = text.strip_prefix("- ") {
            return Self::Item(rest.trim());
        }
        match text.find(':') {
            Some(idx) => Self::KeyValue {
                key: text[..idx].trim(),
                value: text[idx + 1..].trim(),
            },
            None => Self::Other,
        }
    }
}

/// Line-by-line parser state.
#[derive(Debug, Clone, Default)]
pub struct ParserState {
    fields: BTreeMap<String, Value>,
    scope: Scope,
}

impl ParserState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current scope.
    #[must_use]
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Returns the fields parsed so far.
    #[must_use]
    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    /// Consumes one header line.
    pub fn feed(&mut self, line: &str) {
        let trimmed_end = line.trim_end();
        let text = trimmed_end.trim_start();
        if text.is_empty() || text.starts_with('#') {
            return;
        }

        let indent = trimmed_end.len() - text.len();
        let entry = Entry::classify(text);

        if indent == 0 {
            if let Entry::KeyValue { key, value } = entry {
                self.open_top_level(key, value);
                return;
            }
        }

        match self.scope.clone() {
            Scope::Root => {}
            Scope::Object { key } => self.feed_object(&key, indent, entry),
            Scope::List { key, item } => self.feed_list(&key, indent, item, entry),
            Scope::NestedList {
                key,
                field,
                field_indent,
                item,
            } => self.feed_nested_list(&key, &field, field_indent, item, indent, entry),
        }
    }

    /// Finishes the parse.
    #[must_use]
    pub fn finish(self) -> Frontmatter {
        Frontmatter {
            fields: self.fields,
        }
    }

    fn open_top_level(&mut self, key: &str, value: &str) {
        if value.is_empty() {
            self.fields
                .insert(key.to_string(), Value::Map(BTreeMap::new()));
            self.scope = Scope::Object {
                key: key.to_string(),
            };
        } else {
            self.fields.insert(key.to_string(), coerce(value));
            self.scope = Scope::Root;
        }
    }

    fn feed_object(&mut self, key: &str, indent: usize, entry: Entry<'_>) {
        match entry {
            Entry::Item(_) => {
                let Some(Value::Map(map)) = self.fields.get(key) else {
                    return;
                };
                if !map.is_empty() {
                    return;
                }
                self.fields.insert(key.to_string(), Value::List(Vec::new()));
                self.scope = Scope::List {
                    key: key.to_string(),
                    item: None,
                };
                self.feed_list(key, indent, None, entry);
            }
            Entry::KeyValue { key: field, value } => {
                let Some(Value::Map(map)) = self.fields.get_mut(key) else {
                    return;
                };
                if value.is_empty() {
                    map.insert(field.to_string(), Value::List(Vec::new()));
                    self.scope = Scope::NestedList {
                        key: key.to_string(),
                        field: field.to_string(),
                        field_indent: indent,
                        item: None,
                    };
                } else {
                    map.insert(field.to_string(), coerce(value));
                }
            }
            Entry::Other => {}
        }
    }

    fn feed_list(&mut self, key: &str, indent: usize, item: Option<usize>, entry: Entry<'_>) {
        let Some(Value::List(list)) = self.fields.get_mut(key) else {
            return;
        };
        match entry {
            Entry::Item(text) => {
                let opened = push_item(list, text);
                self.scope = Scope::List {
                    key: key.to_string(),
                    item: opened.then_some(indent),
                };
            }
            Entry::KeyValue { key: field, value } => {
                if item.is_some_and(|marker| indent > marker) {
                    extend_last_item(list, field, value);
                }
            }
            Entry::Other => {}
        }
    }

    fn feed_nested_list(
        &mut self,
        key: &str,
        field: &str,
        field_indent: usize,
        item: Option<usize>,
        indent: usize,
        entry: Entry<'_>,
    ) {
        let continues_item = item.is_some_and(|marker| indent > marker);
        match entry {
            Entry::Item(text) if indent >= field_indent => {
                let Some(list) = self.nested_list_mut(key, field) else {
                    return;
                };
                let opened = push_item(list, text);
                self.scope = Scope::NestedList {
                    key: key.to_string(),
                    field: field.to_string(),
                    field_indent,
                    item: opened.then_some(indent),
                };
            }
            Entry::KeyValue {
                key: item_field,
                value,
            } if continues_item => {
                if let Some(list) = self.nested_list_mut(key, field) {
                    extend_last_item(list, item_field, value);
                }
            }
            Entry::KeyValue { .. } if indent <= field_indent => {
                // Sibling of the list-holding field.
                self.scope = Scope::Object {
                    key: key.to_string(),
                };
                self.feed_object(key, indent, entry);
            }
            _ => {}
        }
    }

    fn nested_list_mut(&mut self, key: &str, field: &str) -> Option<&mut Vec<Value>> {
        match self.fields.get_mut(key)? {
            Value::Map(map) => match map.get_mut(field)? {
                Value::List(list) => Some(list),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Pushes a list item. Returns true if the item opened a mapping.
fn push_item(list: &mut Vec<Value>, text: &str) -> bool {
    if let Some((field, value)) = split_item_pair(text) {
        let mut map = BTreeMap::new();
        map.insert(field.to_string(), coerce(value));
        list.push(Value::Map(map));
        true
    } else {
        list.push(coerce(text));
        false
    }
}

fn extend_last_item(list: &mut [Value], field: &str, value: &str) {
    if let Some(Value::Map(map)) = list.last_mut() {
        map.insert(field.to_string(), coerce(value));
    }
}

/// Splits `label: value` list items. Quoted and flow items stay scalars, as
/// do items whose colon is not followed by whitespace (e.g. URLs).
fn split_item_pair(text: &str) -> Option<(&str, &str)> {
    if text.starts_with(['"', '\'', '[']) {
        return None;
    }
    let idx = text.find(':')?;
    let after = &text[idx + 1..];
    if !(after.is_empty() || after.starts_with(char::is_whitespace)) {
        return None;
    }
    let key = text[..idx].trim();
    if key.is_empty() {
        return None;
    }
    Some((key, after.trim()))
}

/// Coerces a raw scalar.
#[must_use]
pub fn coerce(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" | "~" => return Value::Null,
        _ => {}
    }

    if raw.len() >= 2
        && ((raw.starts_with('"') && raw.ends_with('"'))
            || (raw.starts_with('\'') && raw.ends_with('\'')))
    {
        return Value::String(raw[1..raw.len() - 1].to_string());
    }

    if raw.len() >= 2 && raw.starts_with('[') && raw.ends_with(']') {
        let inner = raw[1..raw.len() - 1].trim();
        if inner.is_empty() {
            return Value::List(Vec::new());
        }
        return Value::List(inner.split(',').map(|s| coerce(s.trim())).collect());
    }

    if let Some(n) = parse_number(raw) {
        return Value::Number(n);
    }

    Value::String(raw.to_string())
}

fn parse_number(raw: &str) -> Option<f64> {
    if !raw.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}

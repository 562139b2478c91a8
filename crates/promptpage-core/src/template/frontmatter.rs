//! YAML frontmatter: splitting, parsing, and the canonical variable map
//!
//! Templates may start with a block delimited by `---` lines:
//!
//! ```yaml
//! ---
//! title: 个股分析
//! variables:
//!   股票代码: { type: stock, required: true }
//! ---
//! ```
//!
//! Variables may be declared either as a mapping keyed by name or as a list of
//! entries carrying an `id`. Both shapes are folded into [`VariableMetaMap`]
//! right here, so the rest of the engine only sees one form.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_yaml::{Mapping, Value};

use super::model::VariableMeta;

/// Variable metadata keyed by name, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableMetaMap(Vec<(String, VariableMeta)>);

impl VariableMetaMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&VariableMeta> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, meta)| meta)
    }

    /// Insert or replace; a replaced entry keeps its original position
    pub fn insert(&mut self, name: impl Into<String>, meta: VariableMeta) {
        let name = name.into();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = meta,
            None => self.0.push((name, meta)),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VariableMeta)> {
        self.0.iter().map(|(name, meta)| (name.as_str(), meta))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for VariableMetaMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, meta) in &self.0 {
            map.serialize_entry(name, meta)?;
        }
        map.end()
    }
}

/// The two accepted wire shapes of `variables`
#[derive(Debug)]
enum WireVariables {
    List(Vec<Value>),
    Map(Mapping),
}

impl WireVariables {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Sequence(entries) => Some(WireVariables::List(entries)),
            Value::Mapping(entries) => Some(WireVariables::Map(entries)),
            Value::Null => None,
            _ => {
                tracing::debug!("Ignoring frontmatter variables that are not a list or mapping");
                None
            }
        }
    }
}

fn key_text(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn meta_from(value: Value, name: &str) -> Option<VariableMeta> {
    if value.is_null() {
        return Some(VariableMeta::default());
    }
    match serde_yaml::from_value(value) {
        Ok(meta) => Some(meta),
        Err(e) => {
            tracing::debug!("Ignoring malformed metadata for variable '{}': {}", name, e);
            None
        }
    }
}

impl From<WireVariables> for VariableMetaMap {
    fn from(wire: WireVariables) -> Self {
        let mut map = VariableMetaMap::new();

        match wire {
            WireVariables::List(entries) => {
                for entry in entries {
                    let Some(id) = entry.get("id").and_then(key_text).filter(|id| !id.is_empty())
                    else {
                        continue;
                    };
                    if let Some(meta) = meta_from(entry, &id) {
                        map.insert(id, meta);
                    }
                }
            }
            WireVariables::Map(entries) => {
                for (key, value) in entries {
                    let Some(name) = key_text(&key) else {
                        continue;
                    };
                    if let Some(meta) = meta_from(value, &name) {
                        map.insert(name, meta);
                    }
                }
            }
        }

        map
    }
}

fn title_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn tag_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Sequence(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| key_text(&item))
                .collect(),
        ),
        Some(Value::String(tag)) => Some(vec![tag]),
        _ => None,
    })
}

#[derive(Debug, Deserialize)]
struct WireFrontmatter {
    #[serde(default, deserialize_with = "title_text")]
    title: Option<String>,
    #[serde(default, deserialize_with = "title_text")]
    description: Option<String>,
    #[serde(default)]
    variables: Option<Value>,
    #[serde(default, deserialize_with = "tag_list")]
    tags: Option<Vec<String>>,
    #[serde(flatten)]
    extra: Mapping,
}

/// Parsed frontmatter in canonical form
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Frontmatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "VariableMetaMap::is_empty")]
    pub variables: VariableMetaMap,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Keys this engine does not interpret, kept for export
    #[serde(flatten)]
    pub extra: Mapping,
}

impl From<WireFrontmatter> for Frontmatter {
    fn from(wire: WireFrontmatter) -> Self {
        Self {
            title: wire.title,
            description: wire.description,
            variables: wire
                .variables
                .and_then(WireVariables::from_value)
                .map(VariableMetaMap::from)
                .unwrap_or_default(),
            tags: wire.tags.unwrap_or_default(),
            extra: wire.extra,
        }
    }
}

/// Result of splitting frontmatter from a template
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Split {
    pub frontmatter: Frontmatter,
    pub body: String,
}

/// Strip one line terminator (`\n` or `\r\n`) from the start of `text`
fn strip_line_break(text: &str) -> Option<&str> {
    text.strip_prefix("\r\n").or_else(|| text.strip_prefix('\n'))
}

/// Locate the `---` block at the very start of `markdown`
///
/// Returns `(yaml, body)`. The closing delimiter must be a line of its own,
/// optionally followed by one line break.
fn locate_block(markdown: &str) -> Option<(&str, &str)> {
    let after_open = strip_line_break(markdown.strip_prefix("---")?)?;

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        let content = line.trim_end_matches('\n').trim_end_matches('\r');
        if content == "---" {
            let yaml = after_open[..offset]
                .strip_suffix('\n')
                .map(|yaml| yaml.strip_suffix('\r').unwrap_or(yaml))?;
            let body = &after_open[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }

    None
}

/// Split a template into frontmatter and body
///
/// Never fails: without a leading block, or when the block is not a YAML
/// mapping of the expected shape, the whole input becomes the body.
pub fn parse_frontmatter(markdown: &str) -> Split {
    let whole = || Split {
        frontmatter: Frontmatter::default(),
        body: markdown.to_string(),
    };

    let Some((yaml, body)) = locate_block(markdown) else {
        return whole();
    };

    let value: Value = match serde_yaml::from_str(yaml) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("Frontmatter is not valid YAML, treating as body: {}", e);
            return whole();
        }
    };

    if !value.is_mapping() {
        tracing::debug!("Frontmatter is not a mapping, treating as body");
        return whole();
    }

    match serde_yaml::from_value::<WireFrontmatter>(value) {
        Ok(wire) => Split {
            frontmatter: wire.into(),
            body: body.to_string(),
        },
        Err(e) => {
            tracing::debug!("Frontmatter has an unexpected shape, treating as body: {}", e);
            whole()
        }
    }
}

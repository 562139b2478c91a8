//! Template data model

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::frontmatter::Frontmatter;
use crate::autofill::AutoFillKind;

/// Where a stored template came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Shipped with the application, immutable
    Builtin,
    /// Imported or written by the user
    Local,
}

/// A template as persisted by a collaborator
///
/// `raw_text` is the single source of truth for both content and frontmatter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredTemplate {
    pub id: String,
    pub title: String,
    pub source: SourceKind,
    pub raw_text: String,
    /// Milliseconds since the Unix epoch
    pub updated_at: i64,
}

impl StoredTemplate {
    /// Builtin template read from `<file_name>`; the title is the file stem
    pub fn builtin(file_name: &str, raw_text: impl Into<String>, updated_at: i64) -> Self {
        let title = file_name
            .strip_suffix(".md")
            .or_else(|| file_name.strip_suffix(".MD"))
            .unwrap_or(file_name);

        Self {
            id: format!("builtin:{}", file_name),
            title: title.to_string(),
            source: SourceKind::Builtin,
            raw_text: raw_text.into(),
            updated_at,
        }
    }

    pub fn local(
        id: impl Into<String>,
        title: impl Into<String>,
        raw_text: impl Into<String>,
        updated_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            source: SourceKind::Local,
            raw_text: raw_text.into(),
            updated_at,
        }
    }

    pub fn is_builtin(&self) -> bool {
        self.source == SourceKind::Builtin
    }

    /// Replace content and title of a local template
    ///
    /// Returns `false` and leaves the template untouched when it is builtin.
    pub fn revise(
        &mut self,
        title: impl Into<String>,
        raw_text: impl Into<String>,
        updated_at: i64,
    ) -> bool {
        if self.is_builtin() {
            return false;
        }
        self.title = title.into();
        self.raw_text = raw_text.into();
        self.updated_at = updated_at;
        true
    }
}

/// Input widget a variable asks for
///
/// Unrecognized type names are kept verbatim in [`VariableType::Other`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VariableType {
    #[default]
    Text,
    Textarea,
    Stock,
    Date,
    Time,
    DateTime,
    Number,
    Select,
    Other(String),
}

impl VariableType {
    pub fn as_str(&self) -> &str {
        match self {
            VariableType::Text => "text",
            VariableType::Textarea => "textarea",
            VariableType::Stock => "stock",
            VariableType::Date => "date",
            VariableType::Time => "time",
            VariableType::DateTime => "datetime",
            VariableType::Number => "number",
            VariableType::Select => "select",
            VariableType::Other(name) => name,
        }
    }
}

impl From<String> for VariableType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "text" => VariableType::Text,
            "textarea" => VariableType::Textarea,
            "stock" => VariableType::Stock,
            "date" => VariableType::Date,
            "time" => VariableType::Time,
            "datetime" => VariableType::DateTime,
            "number" => VariableType::Number,
            "select" => VariableType::Select,
            _ => VariableType::Other(name),
        }
    }
}

impl From<VariableType> for String {
    fn from(var_type: VariableType) -> Self {
        match var_type {
            VariableType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional metadata describing one variable
///
/// Used both for frontmatter declarations and for name inference; the two are
/// combined with [`VariableMeta::layered`](super::layers).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableMeta {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub var_type: Option<VariableType>,
    #[serde(
        default,
        deserialize_with = "lenient::truthy",
        skip_serializing_if = "Option::is_none"
    )]
    pub required: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient::scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub placeholder: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub hint: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::scalar_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub options: Option<Vec<String>>,
    #[serde(
        rename = "autoFill",
        alias = "auto_fill",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub auto_fill: Option<AutoFillKind>,
}

/// A resolved template variable
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Variable {
    /// Placeholder text, trimmed; unique within a template
    pub name: String,
    #[serde(rename = "type")]
    pub var_type: VariableType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_fill: Option<AutoFillKind>,
    /// Initial value: declared default, else auto-fill output, else empty
    pub value: String,
}

impl Variable {
    /// Metadata to write back into frontmatter
    pub fn to_meta(&self) -> VariableMeta {
        VariableMeta {
            var_type: Some(self.var_type.clone()),
            required: Some(self.required),
            default: (!self.value.is_empty()).then(|| self.value.clone()),
            placeholder: self.placeholder.clone(),
            hint: self.hint.clone(),
            options: self.options.clone(),
            auto_fill: self.auto_fill.clone(),
        }
    }
}

/// A parsed template; recomputed on every parse, never mutated in place
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ParsedTemplate {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Markdown after the frontmatter block
    pub body: String,
    pub frontmatter: Frontmatter,
    pub variables: Vec<Variable>,
}

impl ParsedTemplate {
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|variable| variable.name == name)
    }
}

/// Deserializers that accept whatever scalar YAML hands us
mod lenient {
    use super::*;
    use serde_yaml::Value;

    fn stringify(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub(super) fn scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Value>::deserialize(deserializer)?.and_then(stringify))
    }

    pub(super) fn scalar_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Sequence(items)) => Some(items.into_iter().filter_map(stringify).collect()),
            _ => None,
        })
    }

    pub(super) fn truthy<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => None,
            Some(Value::Bool(b)) => Some(b),
            Some(Value::Number(n)) => Some(n.as_f64().is_some_and(|n| n != 0.0)),
            Some(Value::String(s)) => Some(!s.is_empty()),
            Some(_) => Some(true),
        })
    }
}

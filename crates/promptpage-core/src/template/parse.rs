//! Template parsing
//!
//! A parse is a fresh function of the stored markdown and the reference
//! instant. Variable metadata is layered as name inference, then frontmatter
//! declarations on top.

use chrono::{DateTime, TimeZone};

use super::engine::TemplateEngine;
use super::frontmatter::{parse_frontmatter, Frontmatter};
use super::layers::merge_layers;
use super::model::{ParsedTemplate, StoredTemplate, Variable};
use super::rules::PlaceholderRules;
use crate::autofill::infer_meta_by_name;

/// Title used when nothing better is available
pub const UNTITLED: &str = "未命名模板";

/// Text of the first `# heading` line
fn detect_heading(body: &str) -> Option<&str> {
    body.lines().find_map(|line| {
        let rest = line.strip_prefix('#')?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let title = rest.trim();
        (!title.is_empty()).then_some(title)
    })
}

fn pick_title(frontmatter: &Frontmatter, stored: &StoredTemplate, body: &str) -> String {
    frontmatter
        .title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .or_else(|| Some(stored.title.as_str()).filter(|title| !title.is_empty()))
        .or_else(|| detect_heading(body))
        .unwrap_or(UNTITLED)
        .to_string()
}

/// Parser with a fixed placeholder rule set
#[derive(Debug, Clone, Default)]
pub struct TemplateParser {
    engine: TemplateEngine,
}

impl TemplateParser {
    pub fn new(rules: PlaceholderRules) -> Self {
        Self {
            engine: TemplateEngine::new(rules),
        }
    }

    pub fn engine(&self) -> &TemplateEngine {
        &self.engine
    }

    /// Parse `stored` with `now` as the reference instant for auto-fill
    pub fn parse<Tz: TimeZone>(
        &self,
        stored: &StoredTemplate,
        now: &DateTime<Tz>,
    ) -> ParsedTemplate {
        let split = parse_frontmatter(&stored.raw_text);
        let frontmatter = split.frontmatter;
        let body = split.body;

        let mut names = self.engine.extract_placeholders(&body);
        for declared in frontmatter.variables.names() {
            if !declared.is_empty() && !names.iter().any(|name| name == declared) {
                names.push(declared.to_string());
            }
        }

        let variables: Vec<Variable> = names
            .into_iter()
            .map(|name| {
                let declared = frontmatter.variables.get(&name).cloned().unwrap_or_default();
                let meta = merge_layers([infer_meta_by_name(&name), declared]);

                let value = match (&meta.default, &meta.auto_fill) {
                    (Some(default), _) => default.clone(),
                    (None, Some(kind)) => kind.resolve(now),
                    (None, None) => String::new(),
                };

                Variable {
                    name,
                    var_type: meta.var_type.unwrap_or_default(),
                    required: meta.required.unwrap_or(false),
                    placeholder: meta.placeholder,
                    hint: meta.hint,
                    options: meta.options,
                    auto_fill: meta.auto_fill,
                    value,
                }
            })
            .collect();

        let title = pick_title(&frontmatter, stored, &body);
        tracing::debug!(
            "Parsed template '{}' ({}) with {} variables",
            title,
            stored.id,
            variables.len()
        );

        ParsedTemplate {
            id: stored.id.clone(),
            title,
            description: frontmatter.description.clone(),
            body,
            frontmatter,
            variables,
        }
    }
}

/// Parse `stored` under the default placeholder rules
pub fn parse_template<Tz: TimeZone>(stored: &StoredTemplate, now: &DateTime<Tz>) -> ParsedTemplate {
    TemplateParser::default().parse(stored, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autofill::AutoFillKind;
    use crate::template::VariableType;
    use chrono::FixedOffset;

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(8 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 3, 7, 10, 30, 0)
            .unwrap()
    }

    fn local(raw: &str) -> StoredTemplate {
        StoredTemplate::local("local:1", "", raw, 0)
    }

    #[test]
    fn test_name_inference_without_frontmatter() {
        let parsed = parse_template(&local("分析 [股票代码] 在 [今天] 的走势"), &now());

        assert_eq!(parsed.variables.len(), 2);
        let stock = parsed.variable("股票代码").unwrap();
        assert_eq!(stock.var_type, VariableType::Stock);
        assert_eq!(stock.value, "");

        let today = parsed.variable("今天").unwrap();
        assert_eq!(today.auto_fill, Some(AutoFillKind::Date));
        assert_eq!(today.value, "2026-03-07");
    }

    #[test]
    fn test_frontmatter_overrides_inference() {
        let raw = "---\nvariables:\n  今天:\n    type: text\n    default: 昨天\n    required: true\n---\n[今天]";
        let parsed = parse_template(&local(raw), &now());
        let today = parsed.variable("今天").unwrap();

        assert_eq!(today.var_type, VariableType::Text);
        assert_eq!(today.auto_fill, Some(AutoFillKind::Date));
        assert_eq!(today.value, "昨天");
        assert!(today.required);
    }

    #[test]
    fn test_declared_auto_fill_computes_value() {
        let raw = "---\nvariables:\n  报告日:\n    autoFill: trading_day\n---\n[报告日]";
        let parsed = parse_template(&local(raw), &now());
        // 2026-03-07 is a Saturday
        assert_eq!(parsed.variable("报告日").unwrap().value, "2026-03-06");
    }

    #[test]
    fn test_declared_only_variables_follow_body_order() {
        let raw = "---\nvariables:\n  额外: {}\n  行业: {}\n---\n[行业] [周期]";
        let parsed = parse_template(&local(raw), &now());
        let names: Vec<&str> = parsed.variables.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["行业", "周期", "额外"]);
    }

    #[test]
    fn test_unknown_auto_fill_resolves_empty() {
        let raw = "---\nvariables:\n  a:\n    autoFill: lunar\n---\n[a]";
        let parsed = parse_template(&local(raw), &now());
        let a = parsed.variable("a").unwrap();
        assert_eq!(a.auto_fill, Some(AutoFillKind::Other("lunar".to_string())));
        assert_eq!(a.value, "");
    }

    #[test]
    fn test_title_priority() {
        let with_fm = parse_template(
            &StoredTemplate::local("id", "存储标题", "---\ntitle: '  前言标题 '\n---\n# 正文标题", 0),
            &now(),
        );
        assert_eq!(with_fm.title, "前言标题");

        let stored = StoredTemplate::local("id", "存储标题", "# 正文标题", 0);
        let stored_title = parse_template(&stored, &now());
        assert_eq!(stored_title.title, "存储标题");

        let heading = parse_template(&local("intro\n## 二级\n#   正文标题  \n"), &now());
        assert_eq!(heading.title, "正文标题");

        let untitled = parse_template(&local("no heading"), &now());
        assert_eq!(untitled.title, UNTITLED);
    }

    #[test]
    fn test_bad_frontmatter_keeps_whole_text_as_body() {
        let raw = "---\ntitle: [unclosed\n---\n[行业]";
        let parsed = parse_template(&local(raw), &now());
        assert_eq!(parsed.body, raw);
        assert_eq!(parsed.variables.len(), 1);
    }

    #[test]
    fn test_description_is_exposed() {
        let parsed = parse_template(&local("---\ndescription: 说明\n---\n"), &now());
        assert_eq!(parsed.description.as_deref(), Some("说明"));
    }

    #[test]
    fn test_custom_rules_apply_to_parse() {
        let parser = TemplateParser::new(PlaceholderRules::default().with_reserved(["行业"]));
        let parsed = parser.parse(&local("[行业] [周期]"), &now());
        assert_eq!(parsed.variables.len(), 1);
        assert_eq!(parsed.variables[0].name, "周期");
    }
}

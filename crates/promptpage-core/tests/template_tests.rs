//! End-to-end template flow: parse, render, export

use chrono::{DateTime, FixedOffset, TimeZone};
use promptpage_core::template::{SourceKind, VariableType};
use promptpage_core::{
    export_markdown, parse_template, render, render_segments, AutoFillKind, StoredTemplate,
    TemplateContext,
};
use promptpage_testkit::{STOCK_ANALYSIS_TEMPLATE, WEEKLY_REVIEW_TEMPLATE};

fn saturday_morning() -> DateTime<FixedOffset> {
    // 2026-03-07 is a Saturday
    FixedOffset::east_opt(8 * 3600)
        .unwrap()
        .with_ymd_and_hms(2026, 3, 7, 9, 30, 0)
        .unwrap()
}

#[test]
fn test_stock_and_date_placeholders_end_to_end() {
    let stored = StoredTemplate::local("local:1", "", "分析 [股票代码] 在 [今天] 的走势", 0);
    let parsed = parse_template(&stored, &saturday_morning());

    assert_eq!(parsed.variables.len(), 2);
    assert_eq!(parsed.variables[0].name, "股票代码");
    assert_eq!(parsed.variables[0].var_type, VariableType::Stock);
    assert_eq!(parsed.variables[1].name, "今天");
    assert_eq!(parsed.variables[1].value, "2026-03-07");

    let mut context = TemplateContext::new();
    context.set("股票代码", "腾讯");
    for variable in &parsed.variables {
        if !variable.value.is_empty() {
            context.set(variable.name.clone(), variable.value.clone());
        }
    }

    let segments = render_segments(&parsed.body, &context);
    let filled: Vec<&str> = segments
        .iter()
        .filter(|segment| segment.filled)
        .map(|segment| segment.text.as_str())
        .collect();
    assert_eq!(filled, vec!["腾讯", "2026-03-07"]);
    assert_eq!(render(&parsed.body, &context), "分析 腾讯 在 2026-03-07 的走势");
}

#[test]
fn test_builtin_template_without_frontmatter() {
    let stored = StoredTemplate::builtin("个股分析.md", STOCK_ANALYSIS_TEMPLATE, 0);
    let parsed = parse_template(&stored, &saturday_morning());

    assert_eq!(stored.source, SourceKind::Builtin);
    assert_eq!(parsed.id, "builtin:个股分析.md");
    assert_eq!(parsed.title, "个股分析");
    assert_eq!(parsed.body, STOCK_ANALYSIS_TEMPLATE);
}

#[test]
fn test_list_frontmatter_template() {
    let stored = StoredTemplate::local("local:2", "", WEEKLY_REVIEW_TEMPLATE, 0);
    let parsed = parse_template(&stored, &saturday_morning());

    assert_eq!(parsed.title, "周度复盘");
    assert_eq!(parsed.description.as_deref(), Some("每周市场复盘"));

    let names: Vec<&str> = parsed.variables.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["周期", "关注行业", "最近交易日"]);

    let period = parsed.variable("周期").unwrap();
    assert_eq!(period.var_type, VariableType::Select);
    assert_eq!(period.value, "本周");

    let sector = parsed.variable("关注行业").unwrap();
    assert!(sector.required);
    assert_eq!(sector.hint.as_deref(), Some("例如 半导体"));

    let trading_day = parsed.variable("最近交易日").unwrap();
    assert_eq!(trading_day.auto_fill, Some(AutoFillKind::TradingDay));
    assert_eq!(trading_day.value, "2026-03-06");
}

#[test]
fn test_render_without_values_round_trips_body() {
    let stored = StoredTemplate::local("local:2", "", WEEKLY_REVIEW_TEMPLATE, 0);
    let parsed = parse_template(&stored, &saturday_morning());
    assert_eq!(render(&parsed.body, &TemplateContext::new()), parsed.body);
}

#[test]
fn test_export_and_reparse() {
    let now = saturday_morning();
    let stored = StoredTemplate::local("local:2", "", WEEKLY_REVIEW_TEMPLATE, 0);
    let first = parse_template(&stored, &now);
    let exported = export_markdown(&first).unwrap();

    assert!(exported.starts_with("---\ntitle: 周度复盘\n"));
    assert!(exported.ends_with(&first.body));

    let second = parse_template(&StoredTemplate::local("local:2", "", exported.as_str(), 0), &now);
    assert_eq!(second.title, first.title);
    assert_eq!(second.variables, first.variables);
    assert_eq!(second.frontmatter.tags, vec!["复盘"]);
}

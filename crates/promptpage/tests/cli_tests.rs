//! Integration tests for the promptpage CLI

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo_bin;
use predicates::prelude::*;
use promptpage_testkit::{temp_dir_in_workspace, write_sample_workspace};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Helper: command running inside `root` with colors off
fn promptpage(root: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin!(env!("CARGO_PKG_NAME")));
    cmd.current_dir(root)
        .env("NO_COLOR", "1")
        .env_remove("PROMPTPAGE_CONFIG")
        .env_remove("PROMPTPAGE_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("Failed to run promptpage");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn test_cli_version_flag() {
    let temp = temp_dir_in_workspace();
    promptpage(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("promptpage"));
}

#[test]
fn test_render_builtin_with_assignment() {
    let temp = temp_dir_in_workspace();
    write_sample_workspace(temp.path()).unwrap();

    promptpage(temp.path())
        .args(["render", "个股分析", "--set", "股票代码=腾讯控股，HK700"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# 个股分析\n"))
        .stdout(predicate::str::contains("分析 腾讯控股，HK700 在 "))
        .stdout(predicate::str::contains("[今天]").not());
}

#[test]
fn test_render_keeps_unfilled_placeholders_verbatim() {
    let temp = temp_dir_in_workspace();
    write_sample_workspace(temp.path()).unwrap();

    promptpage(temp.path())
        .args(["render", "个股分析", "--set", "今天="])
        .assert()
        .success()
        .stdout("# 个股分析\n\n分析 [股票代码] 在 [今天] 的走势。\n");
}

#[test]
fn test_render_json_lists_unfilled_variables() {
    let temp = temp_dir_in_workspace();
    write_sample_workspace(temp.path()).unwrap();

    let output = stdout_json(promptpage(temp.path()).args(["render", "周度复盘", "--json"]));
    assert_eq!(output["title"], "周度复盘");
    assert_eq!(output["unfilled"], serde_json::json!(["关注行业"]));
    assert!(output["prompt"].as_str().unwrap().contains("## 复盘 本周"));
    assert!(output["prompt"].as_str().unwrap().contains("[不是变量]"));
}

#[test]
fn test_parse_json_reports_variables_in_order() {
    let temp = temp_dir_in_workspace();
    write_sample_workspace(temp.path()).unwrap();

    let parsed = stdout_json(promptpage(temp.path()).args(["parse", "周度复盘", "--json"]));
    assert_eq!(parsed["id"], "builtin:周度复盘.md");
    assert_eq!(parsed["title"], "周度复盘");

    let variables = parsed["variables"].as_array().unwrap();
    let names: Vec<&str> = variables
        .iter()
        .map(|v| v["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["周期", "关注行业", "最近交易日"]);
    assert_eq!(variables[0]["type"], "select");
    assert_eq!(variables[0]["value"], "本周");
    assert_eq!(variables[1]["required"], true);
    assert_eq!(variables[2]["auto_fill"], "trading_day");
}

#[test]
fn test_parse_human_output() {
    let temp = temp_dir_in_workspace();
    write_sample_workspace(temp.path()).unwrap();

    promptpage(temp.path())
        .args(["parse", "周度复盘"])
        .assert()
        .success()
        .stdout(predicate::str::contains("周度复盘"))
        .stdout(predicate::str::contains("3 variable(s)"))
        .stdout(predicate::str::contains("options: 本周 / 上周"));
}

#[test]
fn test_unknown_template_fails() {
    let temp = temp_dir_in_workspace();
    write_sample_workspace(temp.path()).unwrap();

    promptpage(temp.path())
        .args(["parse", "不存在"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TEMPLATE_NOT_FOUND"));
}

#[test]
fn test_templates_lists_builtins_without_readme() {
    let temp = temp_dir_in_workspace();
    write_sample_workspace(temp.path()).unwrap();

    let listed = stdout_json(promptpage(temp.path()).args(["templates", "--json"]));
    let titles: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["个股分析", "周度复盘"]);
}

#[test]
fn test_export_then_parse_local_file() {
    let temp = temp_dir_in_workspace();
    write_sample_workspace(temp.path()).unwrap();

    promptpage(temp.path())
        .args(["export", "周度复盘", "--set", "关注行业=半导体", "-o", "out/复盘.md"])
        .assert()
        .success();

    let exported = fs::read_to_string(temp.path().join("out/复盘.md")).unwrap();
    assert!(exported.starts_with("---\ntitle: 周度复盘\n"));
    assert!(exported.contains("## 复盘 [周期]"));

    let parsed =
        stdout_json(promptpage(temp.path()).args(["parse", "out/复盘.md", "--json"]));
    assert_eq!(parsed["title"], "周度复盘");
    assert_eq!(parsed["variables"][1]["name"], "关注行业");
    assert_eq!(parsed["variables"][1]["value"], "半导体");
}

#[test]
fn test_search_uses_consolidated_catalog() {
    let temp = temp_dir_in_workspace();
    write_sample_workspace(temp.path()).unwrap();

    let results = stdout_json(promptpage(temp.path()).args(["search", "腾讯", "--json"]));
    assert_eq!(results[0]["code"], "00700.HK");
    assert_eq!(results[0]["display_code"], "HK700");
    assert_eq!(results[0]["label"], "腾讯控股，HK700");

    // Renamed by the delta source
    let results = stdout_json(promptpage(temp.path()).args(["search", "平安", "--json"]));
    assert_eq!(results[0]["code"], "000001.SZ");
    assert_eq!(results[0]["name"], "平安银行");
}

#[test]
fn test_search_rejects_out_of_range_limit() {
    let temp = temp_dir_in_workspace();
    write_sample_workspace(temp.path()).unwrap();

    promptpage(temp.path())
        .args(["search", "腾讯", "--limit", "500"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--limit"));
}

#[test]
fn test_search_without_matches() {
    let temp = temp_dir_in_workspace();
    write_sample_workspace(temp.path()).unwrap();

    promptpage(temp.path())
        .args(["search", "zzzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matches for 'zzzz'"));
}

#[test]
fn test_catalog_reports_partial_fallback() {
    let temp = temp_dir_in_workspace();
    write_sample_workspace(temp.path()).unwrap();

    let report = stdout_json(promptpage(temp.path()).args(["catalog", "--json"]));
    assert_eq!(report["market_counts"]["CN"], 2);
    assert_eq!(report["market_counts"]["HK"], 2);
    assert_eq!(report["used_full_fallback"], false);
    assert_eq!(report["used_partial_fallback"], true);
    assert!(report.get("items").is_none());
}

#[test]
fn test_catalog_without_config_uses_builtin_fallback() {
    let temp = temp_dir_in_workspace();

    let report = stdout_json(promptpage(temp.path()).args(["catalog", "--json", "--items"]));
    assert_eq!(report["used_full_fallback"], true);
    assert_eq!(report["items"].as_array().unwrap().len(), 6);
}

#[test]
fn test_invalid_catalog_source_fails() {
    let temp = temp_dir_in_workspace();
    let workspace = write_sample_workspace(temp.path()).unwrap();
    fs::write(&workspace.base, "not json").unwrap();

    promptpage(temp.path())
        .args(["catalog"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CATALOG_SOURCE_INVALID"));
}

#[test]
fn test_explicit_config_path() {
    let temp = temp_dir_in_workspace();
    let workspace = write_sample_workspace(&temp.path().join("ws")).unwrap();

    let listed = stdout_json(
        promptpage(temp.path())
            .arg("--config")
            .arg(&workspace.config)
            .args(["templates", "--json"]),
    );
    assert_eq!(listed.as_array().unwrap().len(), 2);
}

#[test]
fn test_invalid_config_fails() {
    let temp = temp_dir_in_workspace();
    fs::write(temp.path().join("promptpage.toml"), "[search]\nlimit = 0\n").unwrap();

    promptpage(temp.path())
        .args(["templates"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CONFIG_INVALID_VALUE"));
}

#[test]
fn test_autofill_by_name() {
    let temp = temp_dir_in_workspace();

    let rows =
        stdout_json(promptpage(temp.path()).args(["autofill", "--name", "今天", "--json"]));
    assert_eq!(rows[0]["kind"], "date");
    assert_eq!(rows[0]["value"].as_str().unwrap().len(), 10);

    promptpage(temp.path())
        .args(["autofill", "--name", "股票代码"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not auto-filled"));
}

#[test]
fn test_autofill_rejects_unknown_kind() {
    let temp = temp_dir_in_workspace();

    promptpage(temp.path())
        .args(["autofill", "fortnight"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown auto-fill kind"));
}

#[test]
fn test_autofill_reads_config_like_other_commands() {
    let temp = temp_dir_in_workspace();
    fs::write(temp.path().join("promptpage.toml"), "[search]\nlimit = 0\n").unwrap();

    promptpage(temp.path())
        .args(["autofill", "date"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CONFIG_INVALID_VALUE"));
}

#[test]
fn test_without_config_file_uses_prompts_in_current_dir() {
    let temp = temp_dir_in_workspace();
    fs::create_dir_all(temp.path().join("prompts")).unwrap();
    fs::write(temp.path().join("prompts/晨报.md"), "# 晨报\n\n[今天] 的 [股票代码]\n").unwrap();

    let listed = stdout_json(promptpage(temp.path()).args(["templates", "--json"]));
    assert_eq!(listed[0]["title"], "晨报");
    assert_eq!(listed[0]["variables"], serde_json::json!(["今天", "股票代码"]));
}

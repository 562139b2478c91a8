//! Sample data for tests
//!
//! Catalog fixtures are JSON arrays in the same shape the CLI reads from disk.
//! [`write_sample_workspace`] lays out a complete working directory with a
//! config file, builtin templates, and catalog sources.

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Stock analysis template without frontmatter
pub const STOCK_ANALYSIS_TEMPLATE: &str = "# 个股分析\n\n分析 [股票代码] 在 [今天] 的走势。\n";

/// Template with frontmatter declaring variables in list form
pub const WEEKLY_REVIEW_TEMPLATE: &str = "---
title: 周度复盘
description: 每周市场复盘
tags: [复盘]
variables:
  - id: 周期
    type: select
    options: [本周, 上周]
    default: 本周
  - id: 关注行业
    required: true
    hint: 例如 半导体
---
## 复盘 [周期]

重点关注 [关注行业]，截至 [最近交易日]。

```text
[不是变量]
```
";

/// Primary catalog: CN and HK only, with a placeholder-named entry
pub fn sample_base_catalog() -> Value {
    json!([
        { "code": "600519.SH", "name": "贵州茅台", "market": "CN", "aliases": ["茅台"] },
        { "code": "000001.SZ", "name": "000001.SZ", "market": "CN", "aliases": [] },
        { "code": "00700.HK", "name": "腾讯控股", "market": "HK", "aliases": ["腾讯", "TENCENT"] },
        { "code": "09988.HK", "name": "阿里巴巴-W", "market": "HK" },
        { "code": "", "name": "broken", "market": "CN" }
    ])
}

/// Delta catalog: renames the placeholder entry and adds aliases
pub fn sample_delta_catalog() -> Value {
    json!([
        { "code": "000001.SZ", "name": "平安银行", "market": "CN", "aliases": ["平银"] },
        { "code": "00700.HK", "name": "腾讯控股", "market": "HK", "aliases": ["鹅厂"] }
    ])
}

/// Paths inside a workspace written by [`write_sample_workspace`]
#[derive(Debug, Clone)]
pub struct SampleWorkspace {
    pub root: PathBuf,
    pub config: PathBuf,
    pub templates_dir: PathBuf,
    pub base: PathBuf,
    pub delta: PathBuf,
}

/// Write config, templates, and catalog sources under `root`
///
/// Layout:
///
/// ```text
/// promptpage.toml
/// prompts/个股分析.md
/// prompts/周度复盘.md
/// prompts/README.md
/// data/stocks.json
/// data/delta.json
/// ```
pub fn write_sample_workspace(root: &Path) -> std::io::Result<SampleWorkspace> {
    let templates_dir = root.join("prompts");
    let data_dir = root.join("data");
    fs::create_dir_all(&templates_dir)?;
    fs::create_dir_all(&data_dir)?;

    fs::write(templates_dir.join("个股分析.md"), STOCK_ANALYSIS_TEMPLATE)?;
    fs::write(templates_dir.join("周度复盘.md"), WEEKLY_REVIEW_TEMPLATE)?;
    fs::write(templates_dir.join("README.md"), "# Templates\n\n[not a template]\n")?;

    let base = data_dir.join("stocks.json");
    let delta = data_dir.join("delta.json");
    fs::write(&base, sample_base_catalog().to_string())?;
    fs::write(&delta, sample_delta_catalog().to_string())?;

    let config = root.join("promptpage.toml");
    fs::write(
        &config,
        "[search]\nlimit = 5\n\n[catalog]\nbase = \"data/stocks.json\"\ndelta = \"data/delta.json\"\n\n[templates]\ndir = \"prompts\"\n",
    )?;

    Ok(SampleWorkspace {
        root: root.to_path_buf(),
        config,
        templates_dir,
        base,
        delta,
    })
}

//! 端末向けの表示整形
//!
//! 地図ウィジェット・詳細パネル・フィルタの代わりに
//! テキストで一覧とパネルを描画する。

use property_map_common::{apply_filter, CouncilOption, DetailView, PropertyRecord, RecordSet};

/// フィルタ選択肢を件数付きで整形
pub fn render_councils(records: &RecordSet, options: &[CouncilOption], selected: &str) -> String {
    let mut out = String::new();
    for option in options {
        let count = apply_filter(records.records(), option.value()).len();
        let marker = if option.value() == selected { "●" } else { " " };
        out.push_str(&format!("{} {} ({})\n", marker, option.label(), count));
    }
    out
}

/// 物件一覧を表形式で整形
pub fn render_property_table(records: &[&PropertyRecord]) -> String {
    const HEADERS: [&str; 4] = ["Property ID", "Council", "Address", "Postcode"];

    let rows: Vec<[String; 4]> = records
        .iter()
        .map(|r| {
            [
                r.property_id.to_string(),
                r.council.clone(),
                r.full_address.clone(),
                r.postcode.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: &[&str]| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, &w)| format!("{:<w$}", cell, w = w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(&HEADERS));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&line(&cells));
        out.push('\n');
    }
    out
}

/// 詳細パネルを枠付きで整形
pub fn render_detail_panel(detail: &DetailView) -> String {
    let label_width = detail
        .fields
        .iter()
        .map(|f| f.label.chars().count() + 1)
        .max()
        .unwrap_or(0);
    let lines: Vec<String> = detail
        .fields
        .iter()
        .map(|f| format!("{:<w$} {}", format!("{}:", f.label), f.value, w = label_width))
        .collect();
    let inner = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("┌{}┐\n", "─".repeat(inner + 2)));
    for l in &lines {
        let pad = inner - l.chars().count();
        out.push_str(&format!("│ {}{} │\n", l, " ".repeat(pad)));
    }
    out.push_str(&format!("└{}┘\n", "─".repeat(inner + 2)));
    out
}

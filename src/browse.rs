//! 対話式ブラウズモジュール
//!
//! 端末上でフィルタ選択 → ピン選択 → 詳細パネル → 閉じる、を繰り返す。

use crate::error::Result;
use crate::report::{render_detail_panel, render_property_table};
use dialoguer::Select;
use property_map_common::{PropertyRecord, SelectionController};

/// メインメニューの操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseAction {
    /// 自治体フィルタを変更
    ChangeCouncil,
    /// ピン（物件）を選択
    SelectPin,
    /// 表示中の物件一覧
    ListPins,
    /// 終了
    Quit,
}

impl BrowseAction {
    const ALL: [BrowseAction; 4] = [
        BrowseAction::ChangeCouncil,
        BrowseAction::SelectPin,
        BrowseAction::ListPins,
        BrowseAction::Quit,
    ];

    fn label(&self) -> &'static str {
        match self {
            BrowseAction::ChangeCouncil => "Change council filter",
            BrowseAction::SelectPin => "Select a property pin",
            BrowseAction::ListPins => "List visible pins",
            BrowseAction::Quit => "Quit",
        }
    }
}

/// ピン選択肢の表示名
pub fn pin_label(record: &PropertyRecord) -> String {
    format!("#{}  {}", record.property_id, record.full_address)
}

/// 現在のフィルタ状態の見出し
pub fn status_line(controller: &SelectionController) -> String {
    let selected = controller.selected_council();
    let label = if selected.is_empty() {
        property_map_common::ALL_COUNCILS_LABEL
    } else {
        selected
    };
    format!("Council: {} / {} pins", label, controller.visible_count())
}

/// 対話式でブラウズ
pub fn run_interactive_browse(controller: &mut SelectionController) -> Result<()> {
    println!("🗺  物件マップ - 対話モード");
    println!("---");
    println!("操作: [↑↓]選択 [Enter]決定 [Esc]戻る");
    println!("---\n");

    loop {
        println!("{}", status_line(controller));

        let labels: Vec<&str> = BrowseAction::ALL.iter().map(BrowseAction::label).collect();
        let choice = Select::new()
            .with_prompt("操作")
            .items(&labels)
            .default(0)
            .interact_opt()?;

        let Some(index) = choice else {
            break;
        };

        match BrowseAction::ALL[index] {
            BrowseAction::ChangeCouncil => prompt_council(controller)?,
            BrowseAction::SelectPin => {
                if prompt_pin(controller)? {
                    show_panel(controller)?;
                }
            }
            BrowseAction::ListPins => {
                println!("{}", render_property_table(&controller.filtered()));
            }
            BrowseAction::Quit => break,
        }
    }

    println!("終了します");
    Ok(())
}

/// フィルタ選択（Escで変更なし）
fn prompt_council(controller: &mut SelectionController) -> Result<()> {
    let options = controller.council_options();
    let labels: Vec<&str> = options.iter().map(|o| o.label()).collect();
    let current = options
        .iter()
        .position(|o| o.value() == controller.selected_council())
        .unwrap_or(0);

    let choice = Select::new()
        .with_prompt("Council")
        .items(&labels)
        .default(current)
        .interact_opt()?;

    if let Some(index) = choice {
        let value = options[index].value().to_string();
        tracing::debug!(council = %value, "council changed");
        controller.on_council_change(value);
        println!("  → {}\n", options[index].label());
    }
    Ok(())
}

/// ピン選択（選択したらtrue）
fn prompt_pin(controller: &mut SelectionController) -> Result<bool> {
    let pins: Vec<PropertyRecord> = controller.filtered().into_iter().cloned().collect();
    if pins.is_empty() {
        println!("  → 表示中のピンがありません\n");
        return Ok(false);
    }

    let labels: Vec<String> = pins.iter().map(pin_label).collect();
    let choice = Select::new()
        .with_prompt("Pin")
        .items(&labels)
        .default(0)
        .max_length(15)
        .interact_opt()?;

    match choice {
        Some(index) => {
            tracing::debug!(property_id = %pins[index].property_id, "marker activated");
            controller.on_marker_activate(&pins[index]);
            Ok(true)
        }
        None => Ok(false),
    }
}

/// 詳細パネルを表示し、閉じるまで待つ
fn show_panel(controller: &mut SelectionController) -> Result<()> {
    if let Some(detail) = controller.detail() {
        println!("\n{}", render_detail_panel(&detail));
    }

    // Enter・Escどちらでも閉じる
    let _ = Select::new()
        .with_prompt("Panel")
        .items(&["Close panel"])
        .default(0)
        .interact_opt()?;

    controller.on_panel_dismiss();
    tracing::debug!("panel dismissed");
    println!();
    Ok(())
}

//! 対話式セッション
//!
//! メニュー: 行を追加 / メモリ表示・削除 / 全クリア / 出力 / 終了

use super::view::{format_cells, format_row, print_memory, print_sheet_preview};
use super::Session;
use crate::error::Result;
use crate::export::ExportOutcome;
use chrono::Utc;
use chrono_tz::Tz;
use dialoguer::{Confirm, MultiSelect, Select};
use pasiulymas_common::SkippedGroup;
use std::collections::BTreeSet;
use std::path::Path;

/// 対話アクション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionAction {
    /// シートから行を追加
    Add,
    /// メモリを表示して行を削除
    Review,
    /// メモリを全削除
    Clear,
    /// Excelに出力
    Export,
    /// 終了
    Quit,
}

impl SessionAction {
    const ALL: [SessionAction; 5] = [
        SessionAction::Add,
        SessionAction::Review,
        SessionAction::Clear,
        SessionAction::Export,
        SessionAction::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            SessionAction::Add => "➕ 行を追加",
            SessionAction::Review => "🧠 メモリを表示・削除",
            SessionAction::Clear => "🧹 すべてクリア",
            SessionAction::Export => "📥 出力",
            SessionAction::Quit => "終了",
        }
    }
}

/// 対話式セッションを実行
pub fn run_interactive(
    session: &mut Session,
    output_dir: &Path,
    tz: Tz,
    preview_rows: usize,
) -> Result<()> {
    let labels: Vec<&str> = SessionAction::ALL.iter().map(|a| a.label()).collect();

    loop {
        println!();
        let choice = Select::new()
            .with_prompt(format!("操作を選択 (メモリ: {}行)", session.store().len()))
            .items(&labels)
            .default(0)
            .interact()?;

        match SessionAction::ALL[choice] {
            SessionAction::Add => add_rows(session, preview_rows)?,
            SessionAction::Review => review_memory(session)?,
            SessionAction::Clear => {
                if session.store().is_empty() {
                    println!("ℹ 選択された行はありません");
                } else if Confirm::new()
                    .with_prompt("メモリをすべて削除しますか？")
                    .default(false)
                    .interact()?
                {
                    session.clear();
                    println!("✔ メモリをクリアしました");
                }
            }
            SessionAction::Export => {
                let now = Utc::now().with_timezone(&tz);
                let outcome = session.export(output_dir, &now)?;
                report_export(&outcome);
            }
            SessionAction::Quit => {
                if session.store().is_empty()
                    || Confirm::new()
                        .with_prompt("メモリは保存されません。終了しますか？")
                        .default(false)
                        .interact()?
                {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// シートを選んで行を追加
fn add_rows(session: &mut Session, preview_rows: usize) -> Result<()> {
    let choices = session.sheet_choices();
    if choices.is_empty() {
        println!("⚠ シートがありません");
        return Ok(());
    }

    let sheet_labels: Vec<&str> = choices.iter().map(|(_, label)| label.as_str()).collect();
    let picked = Select::new()
        .with_prompt("ファイルとシートを選択")
        .items(&sheet_labels)
        .default(0)
        .interact()?;
    let key = choices[picked].0;

    let (_, sheet) = session.sheet(key)?;
    if sheet.rows.is_empty() {
        println!("⚠ このシートにはデータ行がありません");
        return Ok(());
    }

    print_sheet_preview(sheet, preview_rows);

    let row_labels: Vec<String> = sheet
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| format!("{:>4} {}", i, format_cells(row)))
        .collect();
    let selected = MultiSelect::new()
        .with_prompt("✅ 追加する行を選択 (Space: 選択, Enter: 決定)")
        .items(&row_labels)
        .interact()?;

    if selected.is_empty() {
        println!("ℹ 行が選択されていません");
        return Ok(());
    }

    let added = session.add_rows(key, &selected)?;
    let duplicates = selected.len() - added;
    if duplicates > 0 {
        println!("✔ {}行を追加 ({}行は既にメモリにあります)", added, duplicates);
    } else {
        println!("✔ {}行を追加", added);
    }
    Ok(())
}

/// メモリを表示して削除する行を選ぶ
fn review_memory(session: &mut Session) -> Result<()> {
    print_memory(session.store());
    if session.store().is_empty() {
        return Ok(());
    }

    let row_labels: Vec<String> = session
        .store()
        .iter()
        .enumerate()
        .map(|(i, row)| format!("{:>4} {}", i, format_row(row)))
        .collect();
    let selected = MultiSelect::new()
        .with_prompt("🗑️ 削除する行を選択 (なしで戻る)")
        .items(&row_labels)
        .interact()?;

    if selected.is_empty() {
        return Ok(());
    }

    let indices: BTreeSet<usize> = selected.into_iter().collect();
    let removed = session.remove_rows(&indices);
    println!("✔ {}行を削除 (残り {}行)", removed, session.store().len());
    Ok(())
}

fn report_skipped(skipped: &[SkippedGroup]) {
    for group in skipped {
        println!(
            "⚠ {}: 列数が揃っていないため除外 ({:?})",
            group.originating_file, group.column_counts
        );
    }
}

/// 出力結果を表示
pub fn report_export(outcome: &ExportOutcome) {
    match outcome {
        ExportOutcome::Empty => println!("ℹ 選択された行はありません。出力しません"),
        ExportOutcome::AllSkipped(skipped) => {
            report_skipped(skipped);
            println!("⚠ 出力できる行がありません");
        }
        ExportOutcome::Written { path, rows, skipped } => {
            report_skipped(skipped);
            println!("✔ 出力: {} ({}行)", path.display(), rows);
        }
    }
}

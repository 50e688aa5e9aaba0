//! 出力表の組み立て
//!
//! 選択行を元ファイルごとにまとめ、各グループを
//! 「見出し行 + データ行 + 空行」のブロックとして1枚の表に連結する。

use crate::header::build_header;
use crate::selection::dedup_rows;
use crate::templates::TemplateRegistry;
use crate::types::{CellValue, RowRecord};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// 列数が揃わず出力から除外したグループ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedGroup {
    pub originating_file: String,
    pub column_counts: Vec<usize>,
}

/// 組み立て結果（表全体の見出しは持たない）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportTable {
    pub rows: Vec<Vec<CellValue>>,
    /// 見出し行の位置（書式設定用）
    pub header_rows: Vec<usize>,
    pub skipped: Vec<SkippedGroup>,
}

impl ExportTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 最大列数
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }
}

/// 元ファイル名でグループ化（初出順、グループ内は元の順序）
fn group_by_file(rows: Vec<RowRecord>) -> Vec<(String, Vec<Vec<CellValue>>)> {
    let mut groups: Vec<(String, Vec<Vec<CellValue>>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let slot = *index.entry(row.originating_file.clone()).or_insert_with(|| {
            groups.push((row.originating_file.clone(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(row.cells);
    }

    groups
}

/// 出力表を組み立てる
///
/// 入力が重複除去済みかどうかに関係なく、ここで改めて重複を除去する。
/// 同じファイル内で列数が異なるグループは出力せず `skipped` に記録する。
pub fn assemble(rows: &[RowRecord], registry: &TemplateRegistry) -> ExportTable {
    let mut unique = rows.to_vec();
    dedup_rows(&mut unique);

    let mut table = ExportTable::default();

    for (file, group_rows) in group_by_file(unique) {
        let counts: BTreeSet<usize> = group_rows.iter().map(|r| r.len()).collect();
        if counts.len() > 1 {
            tracing::warn!(
                file = %file,
                counts = ?counts,
                "column count differs within group, skipping"
            );
            table.skipped.push(SkippedGroup {
                originating_file: file,
                column_counts: counts.into_iter().collect(),
            });
            continue;
        }

        let column_count = counts.into_iter().next().unwrap_or(0);
        let header = build_header(registry, &file, column_count);
        tracing::debug!(file = %file, rows = group_rows.len(), column_count, "block assembled");

        table.header_rows.push(table.rows.len());
        table
            .rows
            .push(header.into_iter().map(CellValue::Text).collect());
        table.rows.extend(group_rows);
        table.rows.push(vec![CellValue::Empty; column_count]);
    }

    table
}

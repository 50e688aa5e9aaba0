//! 選択行の保管庫（メモリ）
//!
//! セッション中に選んだ行を蓄積する。追加時に重複を除去し、
//! 表示順（挿入順）のインデックスで削除できる。

use crate::types::{CellValue, RowRecord};
use std::collections::{BTreeSet, HashSet};

/// 選択行ストア
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    rows: Vec<RowRecord>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 行を追加
    ///
    /// すべての行に `tag` を付けてから末尾に追加し、重複を除去する（先勝ち）。
    /// 実際に増えた行数を返す。
    pub fn append<I>(&mut self, rows: I, tag: &str) -> usize
    where
        I: IntoIterator<Item = Vec<CellValue>>,
    {
        let before = self.rows.len();
        self.rows
            .extend(rows.into_iter().map(|cells| RowRecord::new(tag, cells)));
        dedup_rows(&mut self.rows);
        let added = self.rows.len() - before;
        tracing::debug!(tag, added, total = self.rows.len(), "rows appended");
        added
    }

    /// 指定位置の行を削除（範囲外は無視）
    ///
    /// 削除した行数を返す。残りの行は 0 から詰め直される。
    pub fn remove(&mut self, indices: &BTreeSet<usize>) -> usize {
        let before = self.rows.len();
        let mut position = 0;
        self.rows.retain(|_| {
            let keep = !indices.contains(&position);
            position += 1;
            keep
        });
        let removed = before - self.rows.len();
        tracing::debug!(removed, total = self.rows.len(), "rows removed");
        removed
    }

    /// 全削除
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 現在の内容のコピー
    pub fn snapshot(&self) -> Vec<RowRecord> {
        self.rows.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RowRecord> {
        self.rows.iter()
    }

    /// 元ファイル名の一覧（初出順）
    pub fn groups(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|r| r.originating_file.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

/// 重複行を除去（最初の出現を残す）
pub fn dedup_rows(rows: &mut Vec<RowRecord>) {
    let mut seen = HashSet::new();
    rows.retain(|row| seen.insert(row.clone()));
}

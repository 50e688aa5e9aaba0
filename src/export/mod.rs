pub mod excel;

use crate::error::Result;
use chrono::{DateTime, TimeZone};
use pasiulymas_common::{assemble, SelectionStore, SkippedGroup, TemplateRegistry};
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// 出力ファイル名: `pasiulymas_<YYYY-MM-DD_HH-MM>.xlsx`
pub fn output_file_name<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("pasiulymas_{}.xlsx", now.format("%Y-%m-%d_%H-%M"))
}

/// エクスポート結果
#[derive(Debug)]
pub enum ExportOutcome {
    /// メモリが空（ファイルは作らない）
    Empty,
    /// すべてのグループが列数不一致で除外された
    AllSkipped(Vec<SkippedGroup>),
    Written {
        path: PathBuf,
        rows: usize,
        skipped: Vec<SkippedGroup>,
    },
}

/// メモリの内容を1枚のExcelに書き出す
pub fn export_selection<Tz>(
    store: &SelectionStore,
    registry: &TemplateRegistry,
    output_dir: &Path,
    now: &DateTime<Tz>,
) -> Result<ExportOutcome>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if store.is_empty() {
        return Ok(ExportOutcome::Empty);
    }

    let table = assemble(&store.snapshot(), registry);
    if table.is_empty() {
        return Ok(ExportOutcome::AllSkipped(table.skipped));
    }

    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(output_file_name(now));
    excel::write_table(&table, &path)?;
    tracing::info!(path = %path.display(), rows = table.rows.len(), "export written");

    Ok(ExportOutcome::Written {
        path,
        rows: table.rows.len(),
        skipped: table.skipped,
    })
}

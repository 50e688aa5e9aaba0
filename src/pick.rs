//! `--pick` 引数の解析
//!
//! 形式: `FILE[#SHEET]=INDICES`
//! - FILE: ファイル名（`Sweets_Jan.xlsx`）または拡張子なし（`Sweets_Jan`）
//! - SHEET: 省略時は先頭シート
//! - INDICES: `0,2,5-7` のようなカンマ区切り（範囲は両端を含む）

use crate::error::{AppError, Result};
use crate::session::{Session, SheetKey};
use crate::workbook::LoadedWorkbook;
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickSpec {
    pub file: String,
    pub sheet: Option<String>,
    pub indices: Vec<usize>,
}

/// 範囲指定の上限（誤入力で巨大な Vec を作らないため）
const MAX_RANGE_LEN: usize = 100_000;

pub fn parse_pick(arg: &str) -> Result<PickSpec> {
    lazy_static::lazy_static! {
        static ref PICK_RE: Regex = Regex::new(r"^([^#=]+)(?:#([^=]+))?=(.+)$").unwrap();
    }

    let caps = PICK_RE
        .captures(arg.trim())
        .ok_or_else(|| AppError::InvalidPick(arg.to_string()))?;

    let file = caps[1].trim().to_string();
    let sheet = caps.get(2).map(|m| m.as_str().trim().to_string());
    let indices = parse_indices(&caps[3]).map_err(|reason| {
        AppError::InvalidPick(format!("{} ({})", arg, reason))
    })?;

    Ok(PickSpec { file, sheet, indices })
}

/// `0,2,5-7` をインデックス列に展開（入力順、重複はそのまま）
pub fn parse_indices(text: &str) -> std::result::Result<Vec<usize>, String> {
    lazy_static::lazy_static! {
        static ref RANGE_RE: Regex = Regex::new(r"^(\d+)\s*-\s*(\d+)$").unwrap();
    }

    let mut indices = Vec::new();
    for part in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if let Some(caps) = RANGE_RE.captures(part) {
            let start: usize = caps[1].parse().map_err(|_| format!("数値ではありません: {}", part))?;
            let end: usize = caps[2].parse().map_err(|_| format!("数値ではありません: {}", part))?;
            if start > end {
                return Err(format!("範囲が逆順です: {}", part));
            }
            if end - start >= MAX_RANGE_LEN {
                return Err(format!("範囲が大きすぎます: {}", part));
            }
            indices.extend(start..=end);
        } else {
            let index: usize = part
                .parse()
                .map_err(|_| format!("数値ではありません: {}", part))?;
            indices.push(index);
        }
    }

    if indices.is_empty() {
        return Err("行番号がありません".into());
    }
    Ok(indices)
}

/// 指定に対応するシートを探す
pub fn resolve_pick(spec: &PickSpec, workbooks: &[LoadedWorkbook]) -> Result<SheetKey> {
    let (wi, workbook) = workbooks
        .iter()
        .enumerate()
        .find(|(_, w)| w.file_name == spec.file || w.originating_file == spec.file)
        .ok_or_else(|| AppError::FileNotFound(spec.file.clone()))?;

    let sheet = match &spec.sheet {
        Some(name) => workbook.sheets.iter().position(|s| &s.name == name),
        None => (!workbook.sheets.is_empty()).then_some(0),
    }
    .ok_or_else(|| {
        AppError::SheetNotFound(format!(
            "{} -> {}",
            workbook.file_name,
            spec.sheet.as_deref().unwrap_or("(先頭シート)")
        ))
    })?;

    Ok(SheetKey { workbook: wi, sheet })
}

/// 指定順にメモリへ追加し、追加された行数の合計を返す
pub fn apply_picks(session: &mut Session, specs: &[PickSpec]) -> Result<usize> {
    let mut total = 0;
    for spec in specs {
        let key = resolve_pick(spec, session.workbooks())?;
        let (_, sheet) = session.sheet(key)?;
        let missing = spec.indices.iter().filter(|&&i| i >= sheet.rows.len()).count();
        if missing > 0 {
            tracing::warn!(file = %spec.file, sheet = %sheet.name, missing, "pick indices out of range ignored");
        }
        total += session.add_rows(key, &spec.indices)?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::ParsedSheet;
    use pasiulymas_common::{CellValue, TemplateRegistry};

    fn workbook() -> LoadedWorkbook {
        LoadedWorkbook {
            file_name: "Sweets_Jan.xlsx".into(),
            originating_file: "Sweets_Jan".into(),
            sheets: vec![
                ParsedSheet {
                    name: "Main".into(),
                    headers: vec!["a".into()],
                    rows: vec![vec![CellValue::from("x")]],
                },
                ParsedSheet {
                    name: "Extra list".into(),
                    headers: vec![],
                    rows: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_parse_pick_full() {
        let spec = parse_pick("Sweets_Jan.xlsx#Extra list=0,2,5-7").unwrap();
        assert_eq!(spec.file, "Sweets_Jan.xlsx");
        assert_eq!(spec.sheet.as_deref(), Some("Extra list"));
        assert_eq!(spec.indices, vec![0, 2, 5, 6, 7]);
    }

    #[test]
    fn test_parse_pick_without_sheet() {
        let spec = parse_pick("beverages_Feb=3").unwrap();
        assert_eq!(spec.file, "beverages_Feb");
        assert!(spec.sheet.is_none());
        assert_eq!(spec.indices, vec![3]);
    }

    #[test]
    fn test_parse_pick_invalid() {
        assert!(matches!(parse_pick("no-indices"), Err(AppError::InvalidPick(_))));
        assert!(matches!(parse_pick("f=a,b"), Err(AppError::InvalidPick(_))));
        assert!(matches!(parse_pick("f=5-2"), Err(AppError::InvalidPick(_))));
        assert!(matches!(parse_pick("f= , "), Err(AppError::InvalidPick(_))));
    }

    #[test]
    fn test_parse_indices_spaces() {
        assert_eq!(parse_indices(" 1 , 3 - 4 ").unwrap(), vec![1, 3, 4]);
    }

    #[test]
    fn test_resolve_by_stem_and_default_sheet() {
        let workbooks = vec![workbook()];
        let spec = parse_pick("Sweets_Jan=0").unwrap();
        let key = resolve_pick(&spec, &workbooks).unwrap();
        assert_eq!(key, SheetKey { workbook: 0, sheet: 0 });

        let spec = parse_pick("Sweets_Jan.xlsx#Extra list=0").unwrap();
        assert_eq!(resolve_pick(&spec, &workbooks).unwrap().sheet, 1);
    }

    #[test]
    fn test_resolve_unknown_sheet() {
        let workbooks = vec![workbook()];
        let spec = parse_pick("Sweets_Jan.xlsx#Nope=0").unwrap();
        assert!(matches!(
            resolve_pick(&spec, &workbooks),
            Err(AppError::SheetNotFound(_))
        ));
    }

    #[test]
    fn test_resolve_unknown_file() {
        let workbooks = vec![workbook()];
        let spec = parse_pick("Other=0").unwrap();
        assert!(matches!(
            resolve_pick(&spec, &workbooks),
            Err(AppError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_apply_picks_in_order() {
        let mut session = Session::new(vec![workbook()], TemplateRegistry::builtin());
        let specs = vec![
            parse_pick("Sweets_Jan=0,5").unwrap(),
            parse_pick("Sweets_Jan.xlsx#Main=0").unwrap(),
        ];
        assert_eq!(apply_picks(&mut session, &specs).unwrap(), 1);
        assert_eq!(session.store().len(), 1);
        assert_eq!(session.store().snapshot()[0].originating_file, "Sweets_Jan");
    }

    #[test]
    fn test_apply_picks_unknown_file_fails() {
        let mut session = Session::new(vec![workbook()], TemplateRegistry::builtin());
        let specs = vec![parse_pick("Nope=0").unwrap()];
        assert!(apply_picks(&mut session, &specs).is_err());
    }
}

//! セル値と選択行の型定義
//!
//! - CellValue: 1セルの値（文字列・数値・真偽値・空）
//! - RowRecord: 選択された1行 + 元ファイル名タグ

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// セル値
///
/// 数値はビット列で比較する（`-0.0` と `0.0` は同一扱い）。
/// これにより重複除去のキーとしてハッシュ可能になる。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    #[default]
    Empty,
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    fn number_bits(v: f64) -> u64 {
        if v == 0.0 {
            0.0f64.to_bits()
        } else {
            v.to_bits()
        }
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            (CellValue::Number(a), CellValue::Number(b)) => {
                Self::number_bits(*a) == Self::number_bits(*b)
            }
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Empty, CellValue::Empty) => true,
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            CellValue::Number(v) => Self::number_bits(*v).hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Empty => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(v) => write!(f, "{}", v),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

/// 選択された1行
///
/// `originating_file` は拡張子を除いた元ブックのファイル名。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowRecord {
    pub originating_file: String,
    pub cells: Vec<CellValue>,
}

impl RowRecord {
    pub fn new(originating_file: impl Into<String>, cells: Vec<CellValue>) -> Self {
        Self {
            originating_file: originating_file.into(),
            cells,
        }
    }

    /// 列数
    pub fn column_count(&self) -> usize {
        self.cells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_negative_zero_equals_zero() {
        assert_eq!(CellValue::Number(-0.0), CellValue::Number(0.0));

        let mut set = HashSet::new();
        set.insert(CellValue::Number(0.0));
        assert!(!set.insert(CellValue::Number(-0.0)));
    }

    #[test]
    fn test_different_variants_not_equal() {
        assert_ne!(CellValue::Text("1".into()), CellValue::Number(1.0));
        assert_ne!(CellValue::Empty, CellValue::Text(String::new()));
    }

    #[test]
    fn test_is_empty() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::Text(String::new()).is_empty());
        assert!(!CellValue::Text("  ".into()).is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
        assert!(!CellValue::Bool(false).is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::from("Cola").to_string(), "Cola");
    }

    #[test]
    fn test_serde_format() {
        let row = RowRecord::new("Sweets_Jan", vec![CellValue::from("A1"), CellValue::Number(3.0)]);
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"originatingFile\":\"Sweets_Jan\""));
        let back: RowRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }
}

//! ヘッダーテンプレート登録モジュール
//!
//! カテゴリキー（ファイル名の接頭辞）から列見出しの並びを引く。
//! 複数のキーが同じファイル名に一致しうるため、登録順を保持した `Vec` で管理し、
//! 先に登録されたキーを優先する。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 1カテゴリ分のテンプレート
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderTemplate {
    /// カテゴリキー（ファイル名の接頭辞）
    pub key: String,
    /// 列見出し
    pub labels: Vec<String>,
}

/// テンプレート登録簿
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateRegistry {
    entries: Vec<HeaderTemplate>,
}

/// Sweets / Snacks_ / Groceries 共通の見出し
const FOOD_LABELS: &[&str] = &[
    "", "Product code", "Product name", "Purchasing price", "Label",
    "Price with costs", "Target Margin", "Target offer", "VAT",
    "Offer with VAT", "RSP MIN", "RSP MAX", "Margin RSP MIN", "Margin RSP MAX",
    "", "Target Margin", "Target offer",
];

const BEVERAGE_LABELS: &[&str] = &[
    "Country", "Product code", "Product name", "Purchasing price", "Label",
    "Deposit (if needed)", "Sugar Tax", "Price with costs", "Target Margin",
    "Target offer", "VAT", "Offer with VAT", "RSP MIN", "RSP MAX",
    "Margins RSP MIN", "Margins RSP MAX", "Target Margin", "Target offer",
    "", "AS OF 2025", "CAN up to 0,33l", "CAN over 0,33",
    "PET up to 0,75l", "PET over 0,75l", "GLASS up to 0,5l", "GLASS over 0,5l",
];

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 組み込みテンプレート
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for key in ["Sweets", "Snacks_", "Groceries"] {
            registry.register(key, FOOD_LABELS.iter().map(|s| s.to_string()).collect());
        }
        registry.register(
            "beverages",
            BEVERAGE_LABELS.iter().map(|s| s.to_string()).collect(),
        );
        registry
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    ///
    /// 形式: `[{"key": "Sweets", "labels": ["", "Product code", ...]}, ...]`
    pub fn from_json(json: &str) -> Result<Self> {
        let registry: Self = serde_json::from_str(json)?;
        if let Some(empty) = registry.entries.iter().position(|e| e.key.is_empty()) {
            return Err(Error::Config(format!(
                "template #{} has an empty key",
                empty
            )));
        }
        Ok(registry)
    }

    /// テンプレートを登録（既存キーは位置を保ったまま置き換え）
    pub fn register(&mut self, key: impl Into<String>, labels: Vec<String>) {
        let key = key.into();
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(existing) => existing.labels = labels,
            None => self.entries.push(HeaderTemplate { key, labels }),
        }
    }

    /// ファイル名に一致するカテゴリキーを探す（大文字小文字を無視した前方一致、登録順で最初）
    pub fn resolve_category(&self, filename: &str) -> Option<&str> {
        let lower = filename.to_lowercase();
        self.entries
            .iter()
            .find(|e| lower.starts_with(&e.key.to_lowercase()))
            .map(|e| e.key.as_str())
    }

    /// カテゴリの見出しを取得
    ///
    /// `None` の場合は "Column 0", "Column 1", ... を `column_count` 個生成する。
    /// 未登録のキーも同じ扱い。
    pub fn get_template(&self, category: Option<&str>, column_count: usize) -> Vec<String> {
        category
            .and_then(|key| self.entries.iter().find(|e| e.key == key))
            .map(|e| e.labels.clone())
            .unwrap_or_else(|| generic_labels(column_count))
    }

    pub fn entries(&self) -> &[HeaderTemplate] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 汎用の列見出し
pub fn generic_labels(column_count: usize) -> Vec<String> {
    (0..column_count).map(|i| format!("Column {}", i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let registry = TemplateRegistry::builtin();
        let keys: Vec<_> = registry.entries().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["Sweets", "Snacks_", "Groceries", "beverages"]);
        assert_eq!(registry.entries()[0].labels.len(), 17);
        assert_eq!(registry.entries()[3].labels.len(), 26);
    }

    #[test]
    fn test_resolve_case_insensitive() {
        let registry = TemplateRegistry::builtin();
        assert_eq!(registry.resolve_category("sweets_jan"), Some("Sweets"));
        assert_eq!(registry.resolve_category("BEVERAGES_Feb"), Some("beverages"));
        assert_eq!(registry.resolve_category("Snacks_2025"), Some("Snacks_"));
    }

    #[test]
    fn test_resolve_requires_prefix() {
        let registry = TemplateRegistry::builtin();
        // "Snacks_" は末尾の "_" まで一致が必要
        assert_eq!(registry.resolve_category("Snacks2025"), None);
        assert_eq!(registry.resolve_category("my_Sweets"), None);
        assert_eq!(registry.resolve_category("UnknownCategory"), None);
    }

    #[test]
    fn test_first_registered_wins() {
        let mut registry = TemplateRegistry::new();
        registry.register("Bev", vec!["short".into()]);
        registry.register("Beverages", vec!["long".into()]);
        assert_eq!(registry.resolve_category("Beverages_Mar"), Some("Bev"));

        let mut reversed = TemplateRegistry::new();
        reversed.register("Beverages", vec!["long".into()]);
        reversed.register("Bev", vec!["short".into()]);
        assert_eq!(reversed.resolve_category("Beverages_Mar"), Some("Beverages"));
    }

    #[test]
    fn test_register_replaces_in_place() {
        let mut registry = TemplateRegistry::builtin();
        registry.register("Snacks_", vec!["A".into()]);
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.entries()[1].key, "Snacks_");
        assert_eq!(registry.entries()[1].labels, vec!["A".to_string()]);
    }

    #[test]
    fn test_get_template_generic() {
        let registry = TemplateRegistry::builtin();
        assert_eq!(
            registry.get_template(None, 3),
            vec!["Column 0", "Column 1", "Column 2"]
        );
        assert!(registry.get_template(None, 0).is_empty());
        assert_eq!(registry.get_template(Some("Sweets"), 3).len(), 17);
    }

    #[test]
    fn test_from_json_keeps_order() {
        let json = r#"[
            {"key": "Zeta", "labels": ["z"]},
            {"key": "Alpha", "labels": ["a", "b"]}
        ]"#;
        let registry = TemplateRegistry::from_json(json).unwrap();
        assert_eq!(registry.entries()[0].key, "Zeta");
        assert_eq!(registry.entries()[1].labels, vec!["a", "b"]);
    }

    #[test]
    fn test_from_json_rejects_empty_key() {
        let json = r#"[{"key": "", "labels": []}]"#;
        let result = TemplateRegistry::from_json(json);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}

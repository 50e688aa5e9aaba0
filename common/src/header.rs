//! 見出し行の生成

use crate::templates::{generic_labels, TemplateRegistry};

/// 元ファイル名と列数から見出し行を作る
///
/// 戻り値は常にちょうど `column_count` 個。テンプレートが長ければ切り詰め、
/// 短ければ右側を空文字で埋める。カテゴリ不明は "Column N" で代替する。
pub fn build_header(
    registry: &TemplateRegistry,
    originating_file: &str,
    column_count: usize,
) -> Vec<String> {
    let mut header = match registry.resolve_category(originating_file) {
        Some(key) => registry.get_template(Some(key), column_count),
        None => generic_labels(column_count),
    };
    header.truncate(column_count);
    header.resize(column_count, String::new());
    header
}

use calamine::Data;
use pasiulymas_common::CellValue;

/// calamine のセルを CellValue に変換
///
/// 日時は ISO 形式の文字列、エラーセルは表示文字列にする。
/// 空文字列（`=""` の結果など）は空セルとして扱う。
pub fn cell_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::String(v) if v.is_empty() => CellValue::Empty,
        Data::String(v) => CellValue::Text(v.clone()),
        Data::Float(v) => CellValue::Number(*v),
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Bool(v) => CellValue::Bool(*v),
        Data::DateTime(v) => match v.as_datetime() {
            Some(dt) => CellValue::Text(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => CellValue::Text(v.to_string()),
        },
        Data::DateTimeIso(v) => CellValue::Text(v.clone()),
        Data::DurationIso(v) => CellValue::Text(v.clone()),
        Data::Error(v) => CellValue::Text(format!("{v}")),
        Data::Empty => CellValue::Empty,
    }
}

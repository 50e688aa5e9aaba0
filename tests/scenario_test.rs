//! メモリ操作と出力表のシナリオテスト

use pasiulymas_common::{assemble, build_header, CellValue, SelectionStore, TemplateRegistry};
use std::collections::BTreeSet;

fn row(prefix: &str, width: usize) -> Vec<CellValue> {
    (0..width)
        .map(|i| CellValue::Text(format!("{}-{}", prefix, i)))
        .collect()
}

#[test]
fn test_same_batch_twice_keeps_two_rows() {
    let mut store = SelectionStore::new();
    let batch = vec![row("a", 3), row("b", 3)];
    store.append(batch.clone(), "Sweets_Jan");
    store.append(batch, "Sweets_Jan");
    assert_eq!(store.len(), 2);
}

#[test]
fn test_beverages_block_has_five_rows() {
    let mut store = SelectionStore::new();
    store.append(vec![row("a", 5), row("b", 5), row("c", 5)], "beverages_Feb");

    let table = assemble(&store.snapshot(), &TemplateRegistry::builtin());
    assert_eq!(table.rows.len(), 5);
    assert_eq!(table.rows[0].len(), 5);
    assert_eq!(table.rows[0][0], CellValue::from("Country"));
    assert_eq!(table.rows[4], vec![CellValue::Empty; 5]);
}

#[test]
fn test_unknown_category_generic_labels() {
    let header = build_header(&TemplateRegistry::builtin(), "UnknownCategory", 3);
    assert_eq!(header, vec!["Column 0", "Column 1", "Column 2"]);
}

#[test]
fn test_groups_follow_insertion_order() {
    let mut store = SelectionStore::new();
    store.append(vec![row("s1", 4), row("s2", 4)], "Sweets_A");
    store.append(vec![row("g1", 4)], "Groceries_B");

    let table = assemble(&store.snapshot(), &TemplateRegistry::builtin());
    let sweets_end = table
        .rows
        .iter()
        .position(|r| r == &row("s2", 4))
        .unwrap();
    let groceries_start = table
        .rows
        .iter()
        .position(|r| r == &row("g1", 4))
        .unwrap();
    assert!(sweets_end < groceries_start);
    assert_eq!(table.header_rows, vec![0, 4]);
}

#[test]
fn test_remove_out_of_range_is_noop() {
    let mut store = SelectionStore::new();
    store.append(vec![row("a", 2), row("b", 2), row("c", 2)], "f");
    let before = store.snapshot();

    let removed = store.remove(&BTreeSet::from([5]));
    assert_eq!(removed, 0);
    assert_eq!(store.snapshot(), before);
}

#[test]
fn test_remove_then_snapshot() {
    let mut store = SelectionStore::new();
    store.append(vec![row("a", 2), row("b", 2), row("c", 2)], "f");

    store.remove(&BTreeSet::from([0]));
    let snapshot = store.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].cells, row("b", 2));
    assert_eq!(snapshot[1].cells, row("c", 2));
}

#[test]
fn test_clear_law() {
    let mut store = SelectionStore::new();
    store.append(vec![row("a", 2)], "f");
    store.clear();
    assert!(store.is_empty());
    assert!(store.snapshot().is_empty());
    assert!(assemble(&store.snapshot(), &TemplateRegistry::builtin()).is_empty());
}

//! Filtered, sorted view derivation

use std::cmp::Ordering;

use crate::column::TableSpec;
use crate::rows::RowSet;
use crate::sort::Direction;
use crate::sort::SortState;
use crate::value::CellValue;

/// Derives the visible row positions for a search term and sort state.
///
/// Returns positions into `rows` in display order. Pure: no inputs are
/// mutated and the same inputs always produce the same output.
///
/// Filtering: a trimmed-empty search term matches every row. Otherwise a
/// row stays iff at least one searchable column yields a value whose
/// lowercase string form contains the lowercase trimmed term. Columns
/// opted out of search never contribute, even when their raw data would
/// match; missing values never match.
///
/// Sorting: `None` preserves filtered order. Otherwise rows are stably
/// sorted on the sort column's value — missing values always sort last
/// regardless of direction, two missing values tie, and ties keep the
/// filtered order. A sort keyed to an unknown or non-sortable column
/// leaves the order unchanged.
pub fn visible_indices<R>(
    rows: &RowSet<R>,
    spec: &TableSpec<R>,
    search_term: &str,
    sort: Option<&SortState>,
) -> Vec<usize> {
    let needle = search_term.trim().to_lowercase();

    let mut indices: Vec<usize> = if needle.is_empty() {
        (0..rows.len()).collect()
    } else {
        (0..rows.len())
            .filter(|&i| {
                let Some((_, row)) = rows.entry(i) else {
                    return false;
                };
                spec.columns()
                    .iter()
                    .filter(|c| c.is_searchable())
                    .any(|c| {
                        c.value(row)
                            .is_some_and(|v| v.search_text().contains(&needle))
                    })
            })
            .collect()
    };

    if let Some(state) = sort {
        if let Some(column) = spec.column(&state.key).filter(|c| c.is_sortable()) {
            // One accessor call per row, not per comparison.
            let keys: Vec<Option<CellValue>> = rows
                .iter()
                .map(|(_, row)| column.value(row))
                .collect();

            indices.sort_by(|&a, &b| match (&keys[a], &keys[b]) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(x), Some(y)) => {
                    let ordering = x.compare(y);
                    match state.direction {
                        Direction::Asc => ordering,
                        Direction::Desc => ordering.reverse(),
                    }
                }
            });
        }
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;

    #[derive(Clone)]
    struct Item {
        name: &'static str,
        price: Option<f64>,
        internal_note: &'static str,
    }

    fn item(name: &'static str, price: Option<f64>, internal_note: &'static str) -> Item {
        Item {
            name,
            price,
            internal_note,
        }
    }

    fn spec() -> TableSpec<Item> {
        TableSpec::new(vec![
            Column::new("name", "Name", |i: &Item| Some(i.name.into())),
            Column::new("price", "Price", |i: &Item| i.price.map(CellValue::from)),
            Column::new("note", "Note", |i: &Item| Some(i.internal_note.into()))
                .searchable(false),
        ])
        .unwrap()
    }

    fn rows() -> RowSet<Item> {
        RowSet::synthesized(vec![
            item("Claw hammer", Some(14.5), "restock"),
            item("Socket set", None, "clearance"),
            item("Hex bolts", Some(3.2), "hammer time"),
            item("Ball-peen hammer", Some(12.0), "restock"),
        ])
    }

    #[test]
    fn test_empty_search_passes_all_rows_in_order() {
        let rows = rows();
        let indices = visible_indices(&rows, &spec(), "", None);
        assert_eq!(indices, vec![0, 1, 2, 3]);

        // Whitespace-only terms behave like empty ones.
        let indices = visible_indices(&rows, &spec(), "   ", None);
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let rows = rows();
        let indices = visible_indices(&rows, &spec(), "HAMMER", None);
        assert_eq!(indices, vec![0, 3]);
    }

    #[test]
    fn test_unsearchable_columns_never_match() {
        // "clearance" only appears in the search-excluded note column.
        let rows = rows();
        let indices = visible_indices(&rows, &spec(), "clearance", None);
        assert!(indices.is_empty());

        // "hammer" matches rows 0 and 3 by name; row 2's note saying
        // "hammer time" must not pull it in.
        let indices = visible_indices(&rows, &spec(), "hammer", None);
        assert_eq!(indices, vec![0, 3]);
    }

    #[test]
    fn test_sort_ascending_and_descending() {
        let rows = rows();
        let asc = visible_indices(&rows, &spec(), "", Some(&SortState::asc("price")));
        // 3.2, 12.0, 14.5, then the missing price last.
        assert_eq!(asc, vec![2, 3, 0, 1]);

        let desc = visible_indices(&rows, &spec(), "", Some(&SortState::desc("price")));
        // 14.5, 12.0, 3.2 — missing price still last.
        assert_eq!(desc, vec![0, 3, 2, 1]);
    }

    #[test]
    fn test_missing_values_sort_last_both_directions() {
        let rows = rows();
        for state in [SortState::asc("price"), SortState::desc("price")] {
            let indices = visible_indices(&rows, &spec(), "", Some(&state));
            assert_eq!(*indices.last().unwrap(), 1);
        }
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let rows = RowSet::synthesized(vec![
            item("a", Some(5.0), ""),
            item("b", Some(5.0), ""),
            item("c", Some(1.0), ""),
        ]);
        let indices = visible_indices(&rows, &spec(), "", Some(&SortState::asc("price")));
        assert_eq!(indices, vec![2, 0, 1]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let rows = rows();
        let state = SortState::asc("name");
        let once = visible_indices(&rows, &spec(), "", Some(&state));
        let again = visible_indices(&rows, &spec(), "", Some(&state));
        assert_eq!(once, again);
    }

    #[test]
    fn test_unknown_or_unsortable_key_preserves_order() {
        let rows = rows();
        let indices = visible_indices(&rows, &spec(), "", Some(&SortState::asc("ghost")));
        assert_eq!(indices, vec![0, 1, 2, 3]);

        let unsortable_spec = TableSpec::new(vec![
            Column::new("name", "Name", |i: &Item| Some(i.name.into())).sortable(false),
        ])
        .unwrap();
        let indices = visible_indices(&rows, &unsortable_spec, "", Some(&SortState::asc("name")));
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_filter_then_sort_composes() {
        let rows = rows();
        let indices = visible_indices(&rows, &spec(), "hammer", Some(&SortState::asc("price")));
        // Ball-peen (12.0) before Claw (14.5).
        assert_eq!(indices, vec![3, 0]);
    }
}

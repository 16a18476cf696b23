// ABOUTME: Table extraction: one entry per <table> with its header row and data rows.
// ABOUTME: Rows of nested tables belong to the nested table, never to the enclosing one.

use crate::dom::Node;
use crate::result::TableEntry;

const CELL_TAGS: &[&str] = &["td", "th"];

struct Row<N> {
    cells: Vec<N>,
    in_head: bool,
}

/// The rows owned by `table`, in order, skipping over nested tables.
fn table_rows<'a, N: Node<'a>>(table: N) -> Vec<Row<N>> {
    let mut rows = Vec::new();
    let mut stack: Vec<(N, bool)> = table
        .child_elements()
        .into_iter()
        .rev()
        .map(|el| (el, false))
        .collect();

    while let Some((el, in_head)) = stack.pop() {
        if el.is_any(&["table"]) {
            continue;
        }
        if el.is_any(&["tr"]) {
            let cells = el
                .child_elements()
                .into_iter()
                .filter(|cell| cell.is_any(CELL_TAGS))
                .collect();
            rows.push(Row { cells, in_head });
            continue;
        }
        let in_head = in_head || el.is_any(&["thead"]);
        stack.extend(el.child_elements().into_iter().rev().map(|c| (c, in_head)));
    }

    rows
}

fn cell_texts<'a, N: Node<'a>>(cells: &[N]) -> Vec<String> {
    cells.iter().map(|c| c.text().trim().to_string()).collect()
}

/// Every `<table>` in document order.
///
/// The first row is the header row when it has `<th>` cells (headers are
/// those cells) or, lacking them, when it sits in `<thead>` (headers are all
/// of its cells). Otherwise `headers` is empty and every row is data. Rows
/// without cells are dropped; column counts are not checked.
///
/// A header row that mixes `<th>` and `<td>` keeps only its `<th>` texts;
/// its `<td>` cells appear neither in `headers` nor in `rows`.
pub fn extract_tables<'a, N: Node<'a>>(root: N) -> Vec<TableEntry> {
    root.find_all(&["table"])
        .into_iter()
        .enumerate()
        .map(|(table_index, table)| {
            let mut rows = table_rows(table);
            rows.retain(|row| !row.cells.is_empty());

            let mut headers = Vec::new();
            if let Some(first) = rows.first() {
                let th: Vec<N> = first
                    .cells
                    .iter()
                    .copied()
                    .filter(|c| c.is_any(&["th"]))
                    .collect();
                if !th.is_empty() {
                    headers = cell_texts(&th);
                } else if first.in_head {
                    headers = cell_texts(&first.cells);
                }
            }
            let data_start = usize::from(!headers.is_empty());

            TableEntry {
                table_index,
                headers,
                rows: rows[data_start..]
                    .iter()
                    .map(|row| cell_texts(&row.cells))
                    .collect(),
            }
        })
        .collect()
}

use crate::domain::entities::record::Row;
use crate::usecase::services::data_view::DataView;

const COLUMN_SEPARATOR: &str = " | ";

/// Renders the current page of `view` as a padded text table followed by a
/// pager footer and the page selector line.
pub fn render_page(view: &DataView<Row>) -> String {
    let rows = view.paged_results();
    let mut out = String::new();

    if rows.is_empty() {
        out.push_str("no matching records\n");
    } else {
        let columns = page_columns(&rows);
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|name| row.get(name).map(ToString::to_string).unwrap_or_default())
                    .collect()
            })
            .collect();
        let widths: Vec<usize> = columns
            .iter()
            .enumerate()
            .map(|(col_idx, name)| {
                cells
                    .iter()
                    .map(|row_cells| row_cells[col_idx].chars().count())
                    .fold(name.chars().count(), usize::max)
            })
            .collect();

        push_line(&mut out, &columns, &widths);
        let rule = widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("-+-");
        out.push_str(&rule);
        out.push('\n');
        for row_cells in &cells {
            push_line(&mut out, row_cells, &widths);
        }
    }

    let ceiling = view.page_ceiling();
    if ceiling > 0 {
        let current = view.current_page_number();
        out.push_str(&format!(
            "page {current} of {ceiling} ({} matches)\n",
            view.filtered_len()
        ));
        let selector = view
            .page_index_list()
            .into_iter()
            .map(|page| {
                if page == current {
                    format!("[{page}]")
                } else {
                    page.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&selector);
        out.push('\n');
    }

    out
}

/// Union of field names across the page, in first-seen order.
fn page_columns(rows: &[&Row]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for name in row.names() {
            if !columns.iter().any(|existing| existing == name) {
                columns.push(name.to_string());
            }
        }
    }
    columns
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR);
    out.push_str(line.trim_end());
    out.push('\n');
}

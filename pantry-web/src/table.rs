//! `TableMarkup` over a live `<table>` element.

use pantry_table::markup::{KEY_HINT, NAME_HINT, REVERSE_HINT, SORT_KEY_HINT, TYPE_HINT};
use pantry_table::{CellMarkup, ColumnHints, HeaderCell, SortOrder, TableMarkup};
use web_sys::Element;

fn children_with_tag(element: &Element, tag: &str) -> Vec<Element> {
    let children = element.children();
    (0..children.length())
        .filter_map(|i| children.item(i))
        .filter(|child| child.tag_name().eq_ignore_ascii_case(tag))
        .collect()
}

fn cells(row: &Element) -> Vec<Element> {
    let children = row.children();
    (0..children.length())
        .filter_map(|i| children.item(i))
        .filter(|c| {
            let tag = c.tag_name();
            tag.eq_ignore_ascii_case("td") || tag.eq_ignore_ascii_case("th")
        })
        .collect()
}

fn span(cell: &Element, name: &str) -> u32 {
    cell.get_attribute(name)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(1)
}

fn cell_markup(cell: &Element) -> CellMarkup {
    CellMarkup {
        text: cell.text_content().unwrap_or_default(),
        sort_key: cell.get_attribute(SORT_KEY_HINT),
        row_span: span(cell, "rowspan"),
        col_span: span(cell, "colspan"),
    }
}

pub fn aria_sort(order: SortOrder) -> &'static str {
    match order {
        SortOrder::None => "none",
        SortOrder::Ascending => "ascending",
        SortOrder::Descending => "descending",
    }
}

pub struct DomTable {
    table: Element,
}

impl DomTable {
    pub fn new(table: Element) -> Self {
        Self { table }
    }

    fn head(&self) -> Option<Element> {
        children_with_tag(&self.table, "thead").into_iter().next()
    }

    fn body(&self) -> Option<Element> {
        children_with_tag(&self.table, "tbody").into_iter().next()
    }

    /// Header cells of the first header row, for attaching click handlers.
    pub fn header_cells(&self) -> Vec<Element> {
        self.head()
            .and_then(|head| children_with_tag(&head, "tr").into_iter().next())
            .map(|row| cells(&row))
            .unwrap_or_default()
    }
}

impl TableMarkup for DomTable {
    fn tag_name(&self) -> String {
        self.table.tag_name().to_lowercase()
    }

    fn header_sections(&self) -> usize {
        children_with_tag(&self.table, "thead").len()
    }

    fn body_sections(&self) -> usize {
        children_with_tag(&self.table, "tbody").len()
    }

    fn header_rows(&self) -> Vec<Vec<HeaderCell>> {
        let Some(head) = self.head() else {
            return Vec::new();
        };
        children_with_tag(&head, "tr")
            .iter()
            .map(|row| {
                cells(row)
                    .iter()
                    .map(|cell| HeaderCell {
                        cell: cell_markup(cell),
                        hints: ColumnHints {
                            name: cell.get_attribute(NAME_HINT),
                            key: cell.get_attribute(KEY_HINT),
                            sort_type: cell.get_attribute(TYPE_HINT),
                            reverse: cell.has_attribute(REVERSE_HINT),
                        },
                    })
                    .collect()
            })
            .collect()
    }

    fn body_rows(&self) -> Vec<Vec<CellMarkup>> {
        let Some(body) = self.body() else {
            return Vec::new();
        };
        children_with_tag(&body, "tr")
            .iter()
            .map(|row| cells(row).iter().map(cell_markup).collect())
            .collect()
    }

    fn reorder_rows(&mut self, order: &[usize]) {
        let Some(body) = self.body() else {
            return;
        };
        let rows = children_with_tag(&body, "tr");
        for row in order.iter().filter_map(|&i| rows.get(i)) {
            // appending an attached node moves it
            if let Err(e) = body.append_child(row) {
                log::warn!("table: could not move row: {:?}", e);
            }
        }
    }

    fn set_indicator(&mut self, column: usize, order: SortOrder) {
        if let Some(cell) = self.header_cells().get(column) {
            if let Err(e) = cell.set_attribute("aria-sort", aria_sort(order)) {
                log::warn!("table: could not mark column {}: {:?}", column, e);
            }
        }
    }
}

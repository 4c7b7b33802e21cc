// src/table.rs
//! Table parser: located markup → [`DataSet`].
//!
//! Every `<table>` in the markup is read (nested ones too, each on its own
//! rows only). Header rows are the `<thead>` rows, or else the leading rows
//! made only of `<th>` cells; with neither, columns are numbered. Spans are
//! expanded by repeating the cell text, so each row lines up with the header.
//!
//! Choosing among several tables: the first whose header names the key
//! column wins. If none does, the first table is taken as a best guess and
//! the result says so ([`TableChoice::Fallback`]).

use scraper::{ElementRef, Html};

use crate::core::sanitize::{normalize_entities, normalize_ws};
use crate::data::DataSet;
use crate::error::{Error, Result};

const MAX_SPAN: usize = 1_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableChoice {
    /// Index of the table whose header contains the key column.
    Matched(usize),
    /// No header matched; table 0 was used.
    Fallback,
}

#[derive(Clone, Debug)]
pub struct ParsedTable {
    pub dataset: DataSet,
    pub choice: TableChoice,
    /// How many tables the markup held.
    pub candidates: usize,
}

pub fn parse(markup: &str, key_hint: &str) -> Result<ParsedTable> {
    let mut tables = parse_tables(markup);
    let candidates = tables.len();
    if tables.is_empty() {
        return Err(Error::Parse(s!("No tables found in HTML.")));
    }

    let (idx, choice) = match tables.iter().position(|t| t.find_column(key_hint).is_some()) {
        Some(i) => (i, TableChoice::Matched(i)),
        None => {
            logw!(
                "None of {candidates} table(s) has a '{key_hint}' column; falling back to the first one"
            );
            (0, TableChoice::Fallback)
        }
    };
    logd!("Parsed {candidates} table(s), using #{idx} ({choice:?})");

    Ok(ParsedTable { dataset: tables.swap_remove(idx), choice, candidates })
}

/// All tables in document order. Tables with no cells at all are skipped.
pub fn parse_tables(markup: &str) -> Vec<DataSet> {
    let doc = Html::parse_fragment(markup);
    doc.root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "table")
        .filter_map(read_table)
        .collect()
}

struct Cell {
    text: String,
    header: bool,
    colspan: usize,
    rowspan: usize,
}

struct Row {
    cells: Vec<Cell>,
    in_head: bool,
}

fn read_table(table: ElementRef<'_>) -> Option<DataSet> {
    let rows = table_rows(table);

    let (head, body): (Vec<Row>, Vec<Row>) = if rows.iter().any(|r| r.in_head) {
        rows.into_iter().partition(|r| r.in_head)
    } else {
        let lead = rows
            .iter()
            .take_while(|r| !r.cells.is_empty() && r.cells.iter().all(|c| c.header))
            .count();
        let mut head = rows;
        let body = head.split_off(lead);
        (head, body)
    };

    let head = expand_spans(&head);
    let body: Vec<Vec<String>> = expand_spans(&body)
        .into_iter()
        .filter(|r| r.iter().any(|c| !c.is_empty()))
        .collect();

    let width = head.iter().chain(&body).map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        return None;
    }
    let headers = (0..width).map(|col| header_label(&head, col)).collect();
    Some(DataSet::new(headers, body))
}

/// Direct rows only: `table > tr` and `table > thead|tbody|tfoot > tr`.
fn table_rows(table: ElementRef<'_>) -> Vec<Row> {
    let mut rows = Vec::new();
    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => rows.push(read_row(child, false)),
            section @ ("thead" | "tbody" | "tfoot") => {
                let in_head = section == "thead";
                rows.extend(
                    child
                        .children()
                        .filter_map(ElementRef::wrap)
                        .filter(|el| el.value().name() == "tr")
                        .map(|tr| read_row(tr, in_head)),
                );
            }
            _ => {}
        }
    }
    rows
}

fn read_row(tr: ElementRef<'_>, in_head: bool) -> Row {
    let cells = tr
        .children()
        .filter_map(ElementRef::wrap)
        .filter_map(|el| {
            let header = match el.value().name() {
                "th" => true,
                "td" => false,
                _ => return None,
            };
            Some(Cell {
                text: cell_text(el),
                header,
                colspan: span(el, "colspan"),
                rowspan: span(el, "rowspan"),
            })
        })
        .collect();
    Row { cells, in_head }
}

fn cell_text(el: ElementRef<'_>) -> String {
    normalize_ws(&normalize_entities(&el.text().collect::<String>()))
}

fn span(el: ElementRef<'_>, attr: &str) -> usize {
    el.value()
        .attr(attr)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(1)
        .min(MAX_SPAN)
}

/// Lay cells out on a grid, repeating spanned text across and down.
fn expand_spans(rows: &[Row]) -> Vec<Vec<String>> {
    // Per column: rows still covered from above, and the text to repeat.
    let mut pending: Vec<(usize, String)> = Vec::new();
    let mut grid = Vec::with_capacity(rows.len());

    for row in rows {
        let mut out: Vec<String> = Vec::new();
        let mut cells = row.cells.iter();
        let mut col = 0usize;

        loop {
            if col < pending.len() && pending[col].0 > 0 {
                pending[col].0 -= 1;
                out.push(pending[col].1.clone());
                col += 1;
                continue;
            }
            let Some(cell) = cells.next() else { break };
            for _ in 0..cell.colspan {
                if pending.len() <= col {
                    pending.resize(col + 1, (0, s!()));
                }
                pending[col] = (cell.rowspan - 1, cell.text.clone());
                out.push(cell.text.clone());
                col += 1;
            }
        }

        // Row spans hanging below this row's last own cell.
        let reach = pending.iter().rposition(|(left, _)| *left > 0).map_or(0, |i| i + 1);
        while col < reach {
            if pending[col].0 > 0 {
                pending[col].0 -= 1;
                out.push(pending[col].1.clone());
            } else {
                out.push(s!());
            }
            col += 1;
        }

        grid.push(out);
    }
    grid
}

/// Header text for one column: each header row's label, top to bottom,
/// blanks and repeats (from colspans) dropped.
fn header_label(head: &[Vec<String>], col: usize) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for row in head {
        if let Some(label) = row.get(col).map(String::as_str) {
            if !label.is_empty() && parts.last() != Some(&label) {
                parts.push(label);
            }
        }
    }
    if parts.is_empty() { col.to_string() } else { parts.join(" ") }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HINT: &str = "STATION FROM";

    #[test]
    fn selects_table_with_key_column_regardless_of_order() {
        let markup = r#"
            <div>
              <table class="summary"><tr><th>Zone</th><th>Total</th></tr><tr><td>SECR</td><td>12</td></tr></table>
              <table class="tablesorter">
                <thead><tr><th>Sr</th><th>Station From Code</th><th>Wagons</th></tr></thead>
                <tbody><tr><td>1</td><td>BYFS</td><td>58</td></tr></tbody>
              </table>
            </div>"#;

        let parsed = parse(markup, HINT).unwrap();
        assert_eq!(parsed.candidates, 2);
        assert_eq!(parsed.choice, TableChoice::Matched(1));
        assert_eq!(parsed.dataset.headers(), ["Sr", "Station From Code", "Wagons"]);
        assert_eq!(parsed.dataset.get(0, "Station From Code"), Some("BYFS"));
    }

    #[test]
    fn falls_back_to_first_table() {
        let markup = "<table><tr><th>A</th></tr><tr><td>1</td></tr></table>\
                      <table><tr><th>B</th></tr><tr><td>2</td></tr></table>";
        let parsed = parse(markup, HINT).unwrap();
        assert_eq!(parsed.choice, TableChoice::Fallback);
        assert_eq!(parsed.dataset.headers(), ["A"]);
    }

    #[test]
    fn no_table_is_a_parse_error() {
        let err = parse("<div class='tablesorter'>loading…</div>", HINT).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));

        let err = parse("<table></table>", HINT).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn leading_th_rows_become_header_without_thead() {
        let markup = "<table>\
            <tr><th>Station From</th><th>Commodity</th></tr>\
            <tr><td> byfs </td><td>COAL</td></tr>\
            <tr><td>ISCG</td><td>IORE</td></tr>\
        </table>";
        let ds = parse(markup, HINT).unwrap().dataset;
        assert_eq!(ds.headers(), ["Station From", "Commodity"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.cell(0, 0), Some("byfs"));
    }

    #[test]
    fn headerless_table_gets_numbered_columns() {
        let ds = parse("<table><tr><td>x</td><td>y</td></tr></table>", HINT).unwrap().dataset;
        assert_eq!(ds.headers(), ["0", "1"]);
        assert_eq!(ds.rows()[0], ["x", "y"]);
    }

    #[test]
    fn two_level_header_is_joined() {
        let markup = "<table><thead>\
            <tr><th rowspan=2>Sr</th><th colspan=2>Station</th></tr>\
            <tr><th>From</th><th>To</th></tr>\
        </thead><tbody><tr><td>1</td><td>BYFS</td><td>KIR</td></tr></tbody></table>";
        let parsed = parse(markup, HINT).unwrap();
        assert_eq!(parsed.dataset.headers(), ["Sr", "Station From", "Station To"]);
        assert_eq!(parsed.choice, TableChoice::Matched(0));
    }

    #[test]
    fn body_spans_repeat_text() {
        let markup = "<table>\
            <tr><th>Station From</th><th>Rake</th><th>Qty</th></tr>\
            <tr><td rowspan=2>BYFS</td><td>R1</td><td>1</td></tr>\
            <tr><td>R2</td><td>2</td></tr>\
            <tr><td colspan=2>TOTAL</td><td>3</td></tr>\
        </table>";
        let ds = parse(markup, HINT).unwrap().dataset;
        assert_eq!(ds.rows()[0], ["BYFS", "R1", "1"]);
        assert_eq!(ds.rows()[1], ["BYFS", "R2", "2"]);
        assert_eq!(ds.rows()[2], ["TOTAL", "TOTAL", "3"]);
    }

    #[test]
    fn nested_table_rows_stay_with_their_table() {
        let markup = "<table>\
            <tr><th>Station From</th><th>Detail</th></tr>\
            <tr><td>FOS</td><td><table><tr><td>inner</td></tr></table></td></tr>\
        </table>";
        let tables = parse_tables(markup);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].len(), 1);
        assert_eq!(tables[0].cell(0, 1), Some("inner"));
        assert_eq!(tables[1].headers(), ["0"]);
    }

    #[test]
    fn whitespace_and_nbsp_are_collapsed_and_blank_rows_dropped() {
        let markup = "<table>\
            <tr><th>Station&nbsp;From</th><th>Remarks</th></tr>\
            <tr><td>\n  SOBK\n</td><td>two   words</td></tr>\
            <tr><td>&nbsp;</td><td></td></tr>\
        </table>";
        let ds = parse(markup, HINT).unwrap().dataset;
        assert_eq!(ds.headers(), ["Station From", "Remarks"]);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.rows()[0], ["SOBK", "two words"]);
    }
}

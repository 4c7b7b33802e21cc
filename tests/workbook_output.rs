// tests/workbook_output.rs
//
// Saves a real workbook and reads the xlsx parts back.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use railgazer::DataSet;
use railgazer::config::RunConfig;
use railgazer::runner::export_partitions;
use railgazer::workbook::column_widths;

fn part(path: &Path, name: &str) -> String {
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut out = String::new();
    archive.by_name(name).unwrap().read_to_string(&mut out).unwrap();
    out
}

/// Value of `attr="..."` inside one tag.
fn attr<'a>(tag: &'a str, attr: &str) -> Option<&'a str> {
    let key = format!(" {attr}=\"");
    let start = tag.find(&key)? + key.len();
    let len = tag[start..].find('"')?;
    Some(&tag[start..start + len])
}

/// Every `<tag .../>` or `<tag ...>` opening, attributes included.
fn tags<'a>(xml: &'a str, tag: &str) -> Vec<&'a str> {
    let open = format!("<{tag} ");
    xml.match_indices(&open)
        .filter_map(|(i, _)| xml[i..].find('>').map(|end| &xml[i..i + end]))
        .collect()
}

fn sheet_names(book: &Path) -> Vec<String> {
    tags(&part(book, "xl/workbook.xml"), "sheet")
        .into_iter()
        .filter_map(|t| attr(t, "name").map(str::to_string))
        .collect()
}

fn shared_strings(book: &Path) -> Vec<String> {
    let xml = part(book, "xl/sharedStrings.xml");
    xml.split("<si>")
        .skip(1)
        .map(|si| {
            let t = &si[si.find("<t").unwrap()..];
            let body = &t[t.find('>').unwrap() + 1..];
            body[..body.find("</t>").unwrap()].to_string()
        })
        .collect()
}

/// Cell reference → text, for string cells.
fn cells(book: &Path, sheet_no: usize, strings: &[String]) -> BTreeMap<String, String> {
    let xml = part(book, &format!("xl/worksheets/sheet{sheet_no}.xml"));
    let mut out = BTreeMap::new();
    for (i, _) in xml.match_indices("<c r=\"") {
        let cell = &xml[i..i + xml[i..].find("</c>").unwrap_or(0)];
        let head = &cell[..cell.find('>').unwrap()];
        let (Some(r), Some("s")) = (attr(head, "r"), attr(head, "t")) else { continue };
        let v = &cell[cell.find("<v>").unwrap() + 3..cell.find("</v>").unwrap()];
        out.insert(r.to_string(), strings[v.parse::<usize>().unwrap()].clone());
    }
    out
}

/// 1-based column number → stored width.
fn col_widths(book: &Path, sheet_no: usize) -> BTreeMap<usize, f64> {
    let xml = part(book, &format!("xl/worksheets/sheet{sheet_no}.xml"));
    let mut out = BTreeMap::new();
    for tag in tags(&xml, "col") {
        let min: usize = attr(tag, "min").unwrap().parse().unwrap();
        let max: usize = attr(tag, "max").unwrap().parse().unwrap();
        let width: f64 = attr(tag, "width").unwrap().parse().unwrap();
        for col in min..=max {
            out.insert(col, width);
        }
    }
    out
}

fn demand() -> DataSet {
    DataSet::new(
        vec!["Sr".into(), "Station From".into(), "Remarks".into()],
        vec![
            vec!["1".into(), "byfs ".into(), "rake placed late evening".into()],
            vec!["2".into(), "ISCG".into(), "ok".into()],
            vec!["3".into(), " BYFS".into(), "".into()],
        ],
    )
}

#[test]
fn sheets_hold_header_and_matching_rows() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cfg = RunConfig::default();
    cfg.set_codes(["BYFS", "FOS", "ISCG"]);
    cfg.out_path = tmp.path().join("book.xlsx");

    let (path, _) = export_partitions(&demand(), &cfg, None).unwrap();
    assert_eq!(sheet_names(&path), ["BYFS", "FOS", "ISCG"]);

    let strings = shared_strings(&path);

    let byfs = cells(&path, 1, &strings);
    let header: Vec<&str> = ["A1", "B1", "C1"].iter().map(|r| byfs[*r].as_str()).collect();
    assert_eq!(header, ["Sr", "Station From", "Remarks"]);
    // key cells normalized, other cells verbatim, blank cells left empty
    assert_eq!(byfs["B2"], "BYFS");
    assert_eq!(byfs["C2"], "rake placed late evening");
    assert_eq!(byfs["A3"], "3");
    assert_eq!(byfs["B3"], "BYFS");
    assert!(!byfs.contains_key("C3"));
    assert!(!byfs.keys().any(|r| r.ends_with('4')));

    // no matches: header row only
    let fos = cells(&path, 2, &strings);
    assert_eq!(fos.len(), 3);
    assert!(fos.keys().all(|r| r.ends_with('1')));

    let iscg = cells(&path, 3, &strings);
    assert_eq!(iscg["A2"], "2");
    assert_eq!(iscg["B2"], "ISCG");
}

#[test]
fn stored_widths_cover_longest_entry_plus_padding() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cfg = RunConfig::default();
    cfg.set_codes(["BYFS", "FOS"]);
    cfg.out_path = tmp.path().join("widths.xlsx");

    let (path, _) = export_partitions(&demand(), &cfg, None).unwrap();

    let byfs = railgazer::partition::filter(&demand(), "STATION FROM", "BYFS").unwrap();
    let empty = railgazer::partition::filter(&demand(), "STATION FROM", "FOS").unwrap();
    for (sheet_no, ds) in [(1, byfs), (2, empty)] {
        let stored = col_widths(&path, sheet_no);
        let expected = column_widths(&ds);
        assert_eq!(stored.len(), expected.len(), "sheet {sheet_no}");
        for (col, want) in expected.iter().enumerate() {
            let got = stored[&(col + 1)];
            // xlsx stores character widths with a small pixel allowance on top
            assert!(got >= *want as f64 && got < *want as f64 + 1.0, "sheet {sheet_no} col {col}: {got} vs {want}");
        }
    }
    // "rake placed late evening" is 24 chars
    assert!(col_widths(&path, 1)[&3] >= 26.0);
    // the empty sheet sizes to its headers
    assert!(col_widths(&path, 2)[&3] < 10.0);
}

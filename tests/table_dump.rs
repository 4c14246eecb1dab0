// tests/table_dump.rs
//
// --table / --records output and file writing through the runner.
//
use std::fs;
use std::path::PathBuf;

use genplurals::config::options::{Options, OutputKind, Source};
use genplurals::csv::Delim;
use genplurals::runner;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("genplurals_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/pluralforms.html")
}

#[test]
fn table_rows_follow_switch_order() {
    let doc = fs::read_to_string(fixture()).unwrap();
    let (text, groups) = runner::generate(&doc, &OutputKind::Table { delim: Delim::Tsv, headers: true }).unwrap();
    assert_eq!(groups, 6);

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Code\tName\tForms\tRule");
    assert_eq!(lines[1], "ay\tAymará\t1\t0");
    assert_eq!(lines[4], "is\tIcelandic\t2\t(n%10!=1 || n%100==11) ? 1 : 0");
    assert_eq!(lines.len(), 1 + 12);
    assert_eq!(lines[12], "ar\tArabic\t6\tn==0 ? 0 : n==1 ? 1 : n==2 ? 2 : n%100>=3 && n%100<=10 ? 3 : n%100>=11 ? 4 : 5");
}

#[test]
fn records_dump_shows_dropped_rows_too() {
    let doc = fs::read_to_string(fixture()).unwrap();
    let (text, count) = runner::generate(&doc, &OutputKind::Records { delim: Delim::Csv, headers: false }).unwrap();
    // nav row (Home/Wiki/Search) + 14 language rows
    assert_eq!(count, 15);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Home,Wiki,Search");
    assert_eq!(lines[1], "ach,Acholi,nplurals=2; plural=(n > 1);");
    assert!(lines.contains(&"en,English,nplurals=2; plural=(n != 1);"));
}

#[test]
fn run_writes_output_file_from_saved_page() {
    let dir = tmp_dir("run_file");
    let out = dir.join("nested").join("plurals.js");
    let opts = Options {
        source: Source::File(fixture()),
        out: Some(out.clone()),
        ..Options::default()
    };
    let summary = runner::run(&opts).unwrap();
    assert_eq!(summary.items, 6);
    assert_eq!(summary.written.as_deref(), Some(out.as_path()));

    let js = fs::read_to_string(&out).unwrap();
    assert!(js.starts_with("// Do not edit this file"));
    assert!(js.ends_with("});\n"));
}

#[test]
fn missing_input_file_is_an_error_and_writes_nothing() {
    let dir = tmp_dir("run_missing");
    let out = dir.join("plurals.js");
    let opts = Options {
        source: Source::File(dir.join("nope.html")),
        out: Some(out.clone()),
        ..Options::default()
    };
    let err = runner::run(&opts).unwrap_err();
    assert!(err.to_string().contains("nope.html"));
    assert!(!out.exists());
}

#[test]
fn unknown_entity_in_a_cell_aborts_without_output() {
    let dir = tmp_dir("run_entity");
    let page = dir.join("page.html");
    fs::write(&page, "<tr><td>ja</td><td>Japan&madeup;</td><td>nplurals=1; plural=0;</td></tr>").unwrap();
    let out = dir.join("plurals.js");
    let opts = Options {
        source: Source::File(page),
        out: Some(out.clone()),
        ..Options::default()
    };
    assert!(runner::run(&opts).is_err());
    assert!(!out.exists());
}

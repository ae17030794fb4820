//! # End-to-End Label Tests
//!
//! Drive `batch::run` from spreadsheet bytes to archive bytes and look inside
//! the result: which documents exist, what each one embeds, and what the
//! preview shows.
//!
//! Fixture workbooks are built in memory with `rust_xlsxwriter`. The font
//! path points nowhere so every run uses the built-in bitmap font and output
//! is deterministic.

use image::{DynamicImage, Rgb, RgbImage};
use labelsmith::config::LabelSettings;
use labelsmith::ident::CAPACITY;
use labelsmith::render::{self, font::LabelFont};
use labelsmith::sheet::{CellValue, OrderRow};
use labelsmith::{LabelError, Logo, batch};
use pretty_assertions::assert_eq;
use rust_xlsxwriter::Workbook;
use std::io::{Cursor, Read};
use std::sync::Arc;
use zip::ZipArchive;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// A cell in a fixture workbook.
enum Cell<'a> {
    Text(&'a str),
    Number(f64),
}

fn workbook(rows: &[Vec<Cell>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(s) => sheet.write_string(r as u32, c as u16, *s).unwrap(),
                Cell::Number(n) => sheet.write_number(r as u32, c as u16, *n).unwrap(),
            };
        }
    }
    workbook.save_to_buffer().unwrap()
}

/// Header row plus one row per `(primary, secondary, quantity)`.
fn orders(rows: &[(&str, &str, f64)]) -> Vec<u8> {
    let mut all = vec![vec![Cell::Text("Name"), Cell::Text("Surname"), Cell::Text("Qty")]];
    for (primary, secondary, qty) in rows {
        all.push(vec![Cell::Text(primary), Cell::Text(secondary), Cell::Number(*qty)]);
    }
    workbook(&all)
}

fn white_logo() -> Logo {
    Logo::Default(Arc::new(DynamicImage::ImageRgb8(RgbImage::from_pixel(
        600,
        500,
        Rgb([255, 255, 255]),
    ))))
}

fn settings() -> LabelSettings {
    LabelSettings {
        font_path: "/nonexistent/arial.ttf".into(),
        ..Default::default()
    }
}

/// `(entry name, bytes)` for every archive entry, in archive order.
fn archive_entries(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).unwrap();
            let mut data = Vec::new();
            file.read_to_end(&mut data).unwrap();
            (file.name().to_string(), data)
        })
        .collect()
}

fn docx_part(docx: &[u8], name: &str) -> Vec<u8> {
    let mut archive = ZipArchive::new(Cursor::new(docx)).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut data = Vec::new();
    part.read_to_end(&mut data).unwrap();
    data
}

fn document_xml(docx: &[u8]) -> String {
    String::from_utf8(docx_part(docx, "word/document.xml")).unwrap()
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn two_rows_produce_two_documents() {
    let run = batch::run(
        &orders(&[("Alice", "Smith", 3.0), ("Bob", "Lee", 5.0)]),
        &white_logo(),
        &settings(),
    )
    .unwrap();

    assert_eq!(run.label_count, 2);
    let entries = archive_entries(&run.archive);
    let names: Vec<&str> = entries.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["Alice.docx", "Bob.docx"]);

    let alice = document_xml(&entries[0].1);
    assert!(alice.contains("name=\"resultaa.jpg\""), "{}", alice);
    assert!(alice.contains("descr=\"Alice  Smith&#10;3\""), "{}", alice);

    let bob = document_xml(&entries[1].1);
    assert!(bob.contains("name=\"resultab.jpg\""), "{}", bob);
    assert!(bob.contains("descr=\"Bob  Lee&#10;5\""), "{}", bob);
}

#[test]
fn preview_is_first_rendered_label() {
    let logo = white_logo();
    let settings = settings();
    let run = batch::run(
        &orders(&[("Alice", "Smith", 3.0), ("Bob", "Lee", 5.0)]),
        &logo,
        &settings,
    )
    .unwrap();

    let expected = render::render_label(
        logo.image(),
        &OrderRow::new("Alice", "Smith", CellValue::Number(3.0)),
        &LabelFont::bitmap(settings.font_size),
        &settings.layout,
    )
    .unwrap();
    assert!(run.preview.unwrap() == expected);
}

#[test]
fn documents_embed_rendered_label() {
    let run = batch::run(&orders(&[("Alice", "Smith", 3.0)]), &white_logo(), &settings()).unwrap();
    let entries = archive_entries(&run.archive);
    let media = docx_part(&entries[0].1, "word/media/image1.jpeg");

    let label = image::load_from_memory(&media).unwrap().to_rgb8();
    assert_eq!(label.dimensions(), (600, 500));
    // Ink on the text lines, clean paper above them
    let dark = |y0: u32, y1: u32| {
        (y0..y1).any(|y| (0..600).any(|x| label.get_pixel(x, y).0[0] < 100))
    };
    assert!(dark(370, 418));
    assert!(dark(440, 488));
    assert!(!dark(0, 300));
}

#[test]
fn illegal_characters_sanitized_in_document_name() {
    let run = batch::run(&orders(&[("A/B:C", "x", 1.0)]), &white_logo(), &settings()).unwrap();
    let entries = archive_entries(&run.archive);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0, "A_B_C.docx");
}

#[test]
fn colliding_names_keep_last_row() {
    let run = batch::run(
        &orders(&[("A/B", "first", 1.0), ("A:B", "second", 2.0)]),
        &white_logo(),
        &settings(),
    )
    .unwrap();

    let entries = archive_entries(&run.archive);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0, "A_B.docx");
    assert!(document_xml(&entries[0].1).contains("descr=\"A:B  second&#10;2\""));
}

#[test]
fn text_detail_column() {
    let bytes = workbook(&[
        vec![Cell::Text("Name"), Cell::Text("Surname"), Cell::Text("Code")],
        vec![Cell::Text("Carol"), Cell::Text("Diaz"), Cell::Text("SKU-12")],
    ]);
    let run = batch::run(&bytes, &white_logo(), &settings()).unwrap();
    let entries = archive_entries(&run.archive);
    assert!(document_xml(&entries[0].1).contains("descr=\"Carol  Diaz&#10;SKU-12\""));
}

#[test]
fn custom_logo_sets_label_size() {
    let custom = Logo::Custom(DynamicImage::ImageRgb8(RgbImage::from_pixel(
        320,
        480,
        Rgb([255, 255, 255]),
    )));
    let run = batch::run(&orders(&[("Alice", "Smith", 3.0)]), &custom, &settings()).unwrap();
    assert_eq!(run.preview.unwrap().dimensions(), (320, 480));
}

#[test]
fn too_many_rows_fails_before_packaging() {
    let rows: Vec<(String, f64)> = (0..=CAPACITY).map(|i| (format!("Item{}", i), i as f64)).collect();
    let rows: Vec<(&str, &str, f64)> = rows.iter().map(|(n, q)| (n.as_str(), "x", *q)).collect();
    assert_eq!(rows.len(), 677);

    match batch::run(&orders(&rows), &white_logo(), &settings()) {
        Err(LabelError::CapacityExceeded { rows, capacity }) => {
            assert_eq!(rows, 677);
            assert_eq!(capacity, 676);
        }
        other => panic!("expected CapacityExceeded, got {:?}", other.map(|r| r.label_count)),
    }
}

#[test]
fn short_row_fails_whole_run() {
    let bytes = workbook(&[
        vec![Cell::Text("Name"), Cell::Text("Surname")],
        vec![Cell::Text("Alice"), Cell::Text("Smith")],
    ]);
    let result = batch::run(&bytes, &white_logo(), &settings());
    assert!(matches!(result, Err(LabelError::InputFormat(_))));
}

#[test]
fn unparsable_spreadsheet_fails() {
    let result = batch::run(b"id,name\n1,Alice\n", &white_logo(), &settings());
    assert!(matches!(result, Err(LabelError::InputFormat(_))));
}

#[test]
fn header_only_spreadsheet_is_empty_archive() {
    let run = batch::run(&orders(&[]), &white_logo(), &settings()).unwrap();
    assert_eq!(run.label_count, 0);
    assert!(run.preview.is_none());
    assert!(archive_entries(&run.archive).is_empty());
}

#[test]
fn standalone_preview_matches_run_preview() {
    let bytes = orders(&[("Alice", "Smith", 3.0), ("Bob", "Lee", 5.0)]);
    let logo = white_logo();
    let settings = settings();

    let preview = batch::preview(&bytes, &logo, &settings).unwrap().unwrap();
    let run = batch::run(&bytes, &logo, &settings).unwrap();
    assert!(run.preview.unwrap() == preview);
}

#[test]
fn standalone_preview_rejects_what_run_rejects() {
    let rows: Vec<String> = (0..=CAPACITY).map(|i| format!("Item{}", i)).collect();
    let rows: Vec<(&str, &str, f64)> = rows.iter().map(|n| (n.as_str(), "x", 1.0)).collect();
    assert!(matches!(
        batch::preview(&orders(&rows), &white_logo(), &settings()),
        Err(LabelError::CapacityExceeded { rows: 677, .. })
    ));

    assert!(batch::preview(&orders(&[]), &white_logo(), &settings()).unwrap().is_none());
}

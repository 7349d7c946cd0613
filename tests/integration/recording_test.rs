//! Loading recordings from disk.

use std::fs;

use creplay::recording::{self, RecordingFormat};
use tempfile::TempDir;

use crate::helpers::fixture;

fn texts(timeline: &creplay::timeline::Timeline, file: &str) -> Vec<String> {
    timeline
        .events()
        .iter()
        .filter(|e| e.file == file)
        .map(|e| e.text.clone())
        .collect()
}

#[test]
fn loads_srt_fixture() {
    let timeline = recording::load(&fixture("sample.srt")).unwrap();
    assert_eq!(timeline.len(), 4);
    assert_eq!(timeline.files(), vec!["main.rs", "README.md"]);
    assert_eq!(timeline.duration(), 5000);
    assert_eq!(timeline.language_of("README.md"), Some("markdown"));
    assert_eq!(
        texts(&timeline, "main.rs")[1],
        "fn main() {\n    println!(\"hi\");\n}"
    );
}

#[test]
fn loads_csv_fixture_as_snapshots() {
    let timeline = recording::load(&fixture("sample.csv")).unwrap();
    assert_eq!(
        texts(&timeline, "app.js"),
        vec!["let a;", "let a = 1;", "const a = 1;"]
    );
    assert_eq!(texts(&timeline, "style.css"), vec!["body {}"]);
    assert_eq!(timeline.duration(), 1500);

    let css = &timeline.events()[1];
    assert_eq!((css.start_time, css.end_time), (500, 1500));
}

#[test]
fn loads_json_fixture() {
    let timeline = recording::load(&fixture("sample.json")).unwrap();
    assert_eq!(timeline.files(), vec!["notes.txt", "todo.md"]);
    assert_eq!(timeline.event_count("notes.txt"), 2);
    assert_eq!(timeline.duration(), 2000);
}

#[test]
fn every_format_is_detected_from_its_extension() {
    for format in RecordingFormat::ALL {
        let path = fixture(&format!("sample.{}", format.extension()));
        assert_eq!(RecordingFormat::from_path(&path).unwrap(), format);
        assert!(recording::load(&path).is_ok(), "{}", format);
    }
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.txt");
    fs::write(&path, "").unwrap();

    let err = recording::load(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("srt, csv, json"));
}

#[test]
fn missing_file_names_the_path() {
    let err = recording::load(&fixture("missing.srt")).unwrap_err();
    assert!(format!("{:#}", err).contains("missing.srt"));
}

#[test]
fn malformed_srt_reports_the_cue() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.srt");
    fs::write(
        &path,
        "1\n00:00:00,000 --> 00:00:01,000\n{\"text\":\"a\",\"file\":\"a\"}\n\n2\nnot a timing line\n{}\n",
    )
    .unwrap();

    let err = recording::load(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("cue 2"));
}

#[test]
fn events_ending_before_they_start_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("backwards.json");
    fs::write(
        &path,
        r#"[{"sequence":7,"file":"a","startTime":500,"endTime":100,"text":"x"}]"#,
    )
    .unwrap();

    let err = recording::load(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Event 7 for a"));
}

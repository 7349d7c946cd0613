//! CSV change-log recordings.
//!
//! Every row after the header is one change:
//!
//! ```text
//! sequence,time,file,rangeOffset,rangeLength,text,language,type
//! 1,0,"main.js",0,0,"let a;",javascript,tab
//! 2,850,"main.js",5,0," = 1",javascript,content
//! ```
//!
//! `tab` rows carry the whole file; any other row splices `text` into the
//! file's latest snapshot. The parser replays the splices to produce full
//! snapshots.

use std::collections::HashMap;

use anyhow::{bail, Context, Result};

use crate::range::EditDelta;
use crate::timeline::{Event, Timeline};

const FIELD_COUNT: usize = 8;
const TAB_TYPE: &str = "tab";

struct Row<'a> {
    sequence: u64,
    time: u64,
    file: String,
    offset: &'a str,
    length: &'a str,
    text: String,
    language: String,
    kind: &'a str,
}

pub fn parse(content: &str) -> Result<Timeline> {
    let mut events: Vec<Event> = Vec::new();
    let mut open: Vec<bool> = Vec::new();
    let mut latest: HashMap<String, usize> = HashMap::new();

    for (line_num, line) in content.split('\n').enumerate().skip(1) {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let Some(row) = parse_row(line)
            .with_context(|| format!("Failed to parse row on line {}", line_num + 1))?
        else {
            continue;
        };

        let previous = latest.get(&row.file).copied();
        let text = if row.kind == TAB_TYPE {
            row.text
        } else {
            let base = previous.map(|i| events[i].text.as_str()).unwrap_or_default();
            splice(base, &row)
                .with_context(|| format!("Failed to apply change on line {}", line_num + 1))?
        };

        if let Some(i) = previous {
            events[i].end_time = row.time;
            open[i] = false;
        }
        latest.insert(row.file.clone(), events.len());
        events.push(
            Event::new(row.sequence, row.file, row.time, row.time, text)
                .with_language(row.language),
        );
        open.push(true);
    }

    let last_time = events.last().map(|e| e.start_time).unwrap_or(0);
    let count = events.len();
    for (i, event) in events.iter_mut().enumerate() {
        if open[i] && i + 1 < count {
            event.end_time = last_time.max(event.start_time);
        }
    }

    Ok(Timeline::new(events))
}

/// Split a row into typed fields. Rows without an integer sequence are not
/// changes and yield `None`.
fn parse_row(line: &str) -> Result<Option<Row<'_>>> {
    let fields = split_fields(line);
    let Some(Ok(sequence)) = fields.first().map(|f| f.trim().parse::<u64>()) else {
        return Ok(None);
    };
    if fields.len() < FIELD_COUNT {
        bail!(
            "Expected {} fields, found {}",
            FIELD_COUNT,
            fields.len()
        );
    }

    let time = fields[1]
        .trim()
        .parse()
        .with_context(|| format!("Invalid time: {:?}", fields[1]))?;

    Ok(Some(Row {
        sequence,
        time,
        file: strip_quotes(fields[2]).to_string(),
        offset: fields[3].trim(),
        length: fields[4].trim(),
        text: unescape(strip_quotes(fields[5])),
        language: strip_quotes(fields[6].trim()).to_string(),
        kind: strip_quotes(fields[7].trim()),
    }))
}

fn splice(base: &str, row: &Row<'_>) -> Result<String> {
    let offset: usize = row
        .offset
        .parse()
        .with_context(|| format!("Invalid range offset: {:?}", row.offset))?;
    let length: usize = row
        .length
        .parse()
        .with_context(|| format!("Invalid range length: {:?}", row.length))?;
    Ok(EditDelta::new(offset, length, row.text.as_str()).apply(base)?)
}

/// Split on commas outside double quotes. Quotes are kept in the fields.
fn split_fields(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(&line[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    fields.push(&line[start..]);
    fields
}

fn strip_quotes(field: &str) -> &str {
    field
        .strip_prefix('"')
        .and_then(|f| f.strip_suffix('"'))
        .unwrap_or(field)
}

fn unescape(text: &str) -> String {
    text.replace("\"\"", "\"")
        .replace("\\r\\n", "\r\n")
        .replace("\\n", "\n")
        .replace("\\r", "\r")
        .replace("\\t", "\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "sequence,time,file,rangeOffset,rangeLength,text,language,type\n";

    fn csv(rows: &[&str]) -> String {
        let mut content = HEADER.to_string();
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        content
    }

    #[test]
    fn splits_fields_outside_quotes() {
        assert_eq!(
            split_fields(r#"1,2,"a,b",3,"x ""y"", z""#),
            vec!["1", "2", r#""a,b""#, "3", r#""x ""y"", z""#]
        );
    }

    #[test]
    fn unescapes_text() {
        assert_eq!(unescape(r#"a\nb\tc ""q"""#), "a\nb\tc \"q\"");
        assert_eq!(unescape(r"x\r\ny"), "x\r\ny");
    }

    #[test]
    fn replays_changes_into_snapshots() {
        let content = csv(&[
            r#"1,0,"main.js",0,0,"let a;",javascript,tab"#,
            r#"2,800,"main.js",5,0," = 1",javascript,content"#,
            r#"3,1200,"main.js",0,3,"const",javascript,content"#,
        ]);
        let timeline = parse(&content).unwrap();
        let texts: Vec<&str> = timeline.events().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["let a;", "let a = 1;", "const a = 1;"]);

        let windows: Vec<(u64, u64)> = timeline
            .events()
            .iter()
            .map(|e| (e.start_time, e.end_time))
            .collect();
        assert_eq!(windows, vec![(0, 800), (800, 1200), (1200, 1200)]);
        assert_eq!(timeline.events()[0].language, "javascript");
    }

    #[test]
    fn splices_apply_to_the_same_file() {
        let content = csv(&[
            r#"1,0,"a.js",0,0,"aaa",javascript,tab"#,
            r#"2,100,"b.css",0,0,"bbb",css,tab"#,
            r#"3,200,"a.js",3,0,"!",javascript,content"#,
            r#"4,300,"b.css",0,1,"B",css,content"#,
        ]);
        let timeline = parse(&content).unwrap();
        let events = timeline.events();
        assert_eq!(events[2].text, "aaa!");
        assert_eq!(events[3].text, "Bbb");
        // b.css's first event closes at b's next change
        assert_eq!(events[1].end_time, 300);
        // a.js's last event is never closed by a.js and runs to the end
        assert_eq!(events[2].end_time, 300);
        assert_eq!(events[3].end_time, 300);
    }

    #[test]
    fn multiline_text_and_crlf_rows() {
        let content = "sequence,time,file,rangeOffset,rangeLength,text,language,type\r\n\
                       1,0,\"a.py\",0,0,\"def f():\\n    pass\",python,tab\r\n";
        let timeline = parse(content).unwrap();
        assert_eq!(timeline.events()[0].text, "def f():\n    pass");
        assert_eq!(timeline.events()[0].language, "python");
    }

    #[test]
    fn rows_without_sequence_are_skipped() {
        let content = csv(&["", "#,comment", r#"1,0,"a",0,0,"x",text,tab"#]);
        assert_eq!(parse(&content).unwrap().len(), 1);
    }

    #[test]
    fn out_of_range_splice_is_an_error() {
        let content = csv(&[
            r#"1,0,"a",0,0,"abc",text,tab"#,
            r#"2,10,"a",10,2,"x",text,content"#,
        ]);
        let err = parse(&content).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn short_rows_are_an_error() {
        let content = csv(&["1,0,a"]);
        let err = parse(&content).unwrap_err();
        assert!(format!("{:#}", err).contains("Expected 8 fields"));
    }

    #[test]
    fn empty_log_gives_empty_timeline() {
        assert!(parse(HEADER).unwrap().is_empty());
    }
}

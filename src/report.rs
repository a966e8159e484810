use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

const REPORT_HEADER: &str = "OS distribution:";

/// One record of the intermediate dataset, mirroring the per-item yield
/// of the collection loop.
#[derive(Debug, Serialize)]
pub struct OsRecord<'a> {
    #[serde(rename = "OS")]
    pub os: &'a str,
}

/// Count occurrences of each distinct value, sorted by count descending.
/// Ties break on the value itself so the output is deterministic.
pub fn distribution(values: &[String]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut entries: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}

/// Render the distribution as the plain-text report body.
pub fn render(entries: &[(String, usize)]) -> String {
    let mut out = String::from(REPORT_HEADER);
    out.push('\n');
    for (value, count) in entries {
        out.push_str(&format!("{value} — {count}\n"));
    }
    out
}

/// Write the plain-text distribution report.
pub fn write_report(path: impl AsRef<Path>, entries: &[(String, usize)]) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(render(entries).as_bytes())?;
    Ok(())
}

/// Write the record-per-item JSON dataset consumed by the aggregation step.
pub fn write_records(path: impl AsRef<Path>, values: &[String]) -> Result<()> {
    let records: Vec<OsRecord<'_>> = values.iter().map(|os| OsRecord { os }).collect();
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &records)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn counts_sorted_descending() {
        let dist = distribution(&owned(&["A", "B", "A"]));
        assert_eq!(
            dist,
            vec![("A".to_string(), 2), ("B".to_string(), 1)]
        );
    }

    #[test]
    fn ties_break_on_value() {
        let dist = distribution(&owned(&["iOS 16", "Android 12", "Android 12", "iOS 16"]));
        assert_eq!(
            dist,
            vec![("Android 12".to_string(), 2), ("iOS 16".to_string(), 2)]
        );
    }

    #[test]
    fn empty_input_renders_header_only() {
        let dist = distribution(&[]);
        assert!(dist.is_empty());
        assert_eq!(render(&dist), "OS distribution:\n");
    }

    #[test]
    fn report_lines_use_em_dash_format() {
        let dist = distribution(&owned(&["A", "B", "A"]));
        let text = render(&dist);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("OS distribution:"));
        assert_eq!(lines.next(), Some("A — 2"));
        assert_eq!(lines.next(), Some("B — 1"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn records_serialize_with_os_key() {
        let records: Vec<OsRecord<'_>> = vec![OsRecord { os: "Android 12" }];
        let json = serde_json::to_string(&records).unwrap();
        assert_eq!(json, r#"[{"OS":"Android 12"}]"#);
    }
}

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;
use serde::Deserialize;
use tracing::info;

use crate::error::{ConvertError, Result};
use crate::parser::record::{Record, HEADERS};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Csv,
    Jsonl,
}

/// Read the `stat` dump, replacing invalid UTF-8 instead of failing.
pub fn read_input(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| ConvertError::UnreadableInput {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn save(path: &Path, records: &[Record], format: Format) -> Result<()> {
    let file = File::create(path).map_err(|source| ConvertError::CreateOutput {
        path: path.to_path_buf(),
        source,
    })?;
    let mut out = BufWriter::new(file);
    match format {
        Format::Csv => write_csv(&mut out, records)?,
        Format::Jsonl => write_jsonl(&mut out, records)?,
    }
    out.flush()?;
    info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// CSV with a BOM so spreadsheet tools pick up the encoding.
pub fn write_csv<W: Write>(mut out: W, records: &[Record]) -> Result<()> {
    out.write_all(UTF8_BOM)?;
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(HEADERS)?;
    for record in records {
        wtr.write_record(record.values())?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_jsonl<W: Write>(mut out: W, records: &[Record]) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_block, segment};

    fn sample() -> Vec<Record> {
        let text = std::fs::read_to_string("tests/fixtures/coreutils_quoted.txt").unwrap();
        segment(&text).map(|b| parse_block(b, true, "+0000")).collect()
    }

    #[test]
    fn csv_header_and_rows() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &sample()).unwrap();
        assert!(buf.starts_with(UTF8_BOM));

        let mut rdr = csv::Reader::from_reader(&buf[UTF8_BOM.len()..]);
        let headers: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, HEADERS);

        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "/etc");
        assert_eq!(&rows[0][1], "hosts");
        assert_eq!(&rows[1][2], "/usr/share/zoneinfo/Asia/Seoul");
        assert_eq!(&rows[2][14], "2024-05-01 08:20:00.000000000");
    }

    #[test]
    fn csv_quotes_awkward_values() {
        let mut r = Record::new("+0000");
        r.file_name = "a, \"b\".txt".into();
        let mut buf = Vec::new();
        write_csv(&mut buf, &[r]).unwrap();
        let text = String::from_utf8(buf[UTF8_BOM.len()..].to_vec()).unwrap();
        assert!(text.contains("\"a, \"\"b\"\".txt\""));
    }

    #[test]
    fn csv_empty_still_has_header() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[]).unwrap();
        let text = String::from_utf8(buf[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(text.trim_end(), HEADERS.join(","));
    }

    #[test]
    fn jsonl_one_object_per_line_in_schema_order() {
        let mut buf = Vec::new();
        write_jsonl(&mut buf, &sample()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("{\"FilePath\":\"/etc\",\"FileName\":\"hosts\""));
        let v: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(v["Type"], "symbolic link");
        assert_eq!(v["UTCOffset"], "+0900");
    }

    #[test]
    fn read_input_lossy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stat.txt");
        std::fs::write(&path, b"File: /caf\xFF\n").unwrap();
        let text = read_input(&path).unwrap();
        assert_eq!(text, "File: /caf\u{FFFD}\n");
    }

    #[test]
    fn read_input_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_input(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, ConvertError::UnreadableInput { .. }));
    }

    #[test]
    fn save_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        save(&path, &sample(), Format::Csv).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        assert_eq!(String::from_utf8_lossy(&bytes).lines().count(), 4);
    }
}

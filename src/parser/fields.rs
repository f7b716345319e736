use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::blocks::ENTITY_MARKER;
use super::record::Record;
use crate::utils::{normalize_path, split_dir_name, split_time_and_offset};

// Plain ASCII quotes from older coreutils, typographic ones from UTF-8 locales.
const QUOTE: &str = r#"[`'"‘’“”]"#;

static SYMLINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^File:\s*{QUOTE}?(.+?){QUOTE}?\s+->\s+{QUOTE}?(.+?){QUOTE}?$")).unwrap()
});
static PLAIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^File:\s*{QUOTE}?(.+?){QUOTE}?$")).unwrap());
static SIZE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Size:\s*(\d+)\s+Blocks:\s*(\d+)\s+IO Block:\s*(\d+)\s+(.+)").unwrap()
});
static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\S+):\s*(\S+)").unwrap());
static PERMISSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"Access:\s+\(([^)]+)\)\s+Uid:\s+\(\s*(\d+)\s*/\s*([^)]+)\)\s+Gid:\s+\(\s*(\d+)\s*/\s*([^)]+)\)",
    )
    .unwrap()
});
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap());

/// A line recognizer. `matches` decides whether the rule owns the line;
/// `extract` fills the record and reports whether the line had the expected shape.
struct Rule {
    name: &'static str,
    matches: fn(&str) -> bool,
    extract: fn(&str, &mut Record, bool) -> bool,
}

/// Checked in order, first match wins. The permission line is checked before
/// the access timestamp since both start with `Access:`.
static RULES: [Rule; 7] = [
    Rule {
        name: "header",
        matches: |line| line.starts_with(ENTITY_MARKER),
        extract: extract_header,
    },
    Rule {
        name: "size",
        matches: |line| contains_all(line, &["Size:", "Blocks:", "IO Block:"]),
        extract: extract_size,
    },
    Rule {
        name: "device",
        matches: |line| contains_all(line, &["Device:", "Inode:", "Links:"]),
        extract: extract_device,
    },
    Rule {
        name: "permission",
        matches: |line| contains_all(line, &["Access:", "Uid:", "Gid:"]),
        extract: extract_permission,
    },
    Rule {
        name: "access_time",
        matches: |line| line.starts_with("Access:") && DATE_RE.is_match(line),
        extract: |line, record, _| {
            let (time, offset) = split_time_and_offset(&line["Access:".len()..]);
            record.access_time = time;
            if let Some(offset) = offset {
                record.utc_offset = offset.to_string();
            }
            true
        },
    },
    Rule {
        name: "modify_time",
        matches: |line| line.starts_with("Modify:"),
        extract: |line, record, _| {
            record.modify_time = split_time_and_offset(&line["Modify:".len()..]).0;
            true
        },
    },
    Rule {
        name: "change_time",
        matches: |line| line.starts_with("Change:"),
        extract: |line, record, _| {
            record.change_time = split_time_and_offset(&line["Change:".len()..]).0;
            true
        },
    },
];

/// Parse one block of `stat` output into a [`Record`].
///
/// Never fails: lines that match no rule, or match a rule's labels but not
/// its layout, are skipped and their fields stay at the default.
pub fn parse_block(block: &str, split_path: bool, utc_offset: &str) -> Record {
    let mut record = Record::new(utc_offset);

    for line in block.lines().map(str::trim) {
        let Some(rule) = RULES.iter().find(|r| (r.matches)(line)) else {
            continue;
        };
        if !(rule.extract)(line, &mut record, split_path) {
            debug!(rule = rule.name, line, "line skipped");
        }
    }

    record
}

fn contains_all(line: &str, labels: &[&str]) -> bool {
    labels.iter().all(|label| line.contains(label))
}

fn extract_header(line: &str, record: &mut Record, split_path: bool) -> bool {
    let path = if let Some(caps) = SYMLINK_RE.captures(line) {
        record.symbolic_target = caps[2].trim().to_string();
        normalize_path(&caps[1])
    } else if let Some(caps) = PLAIN_RE.captures(line) {
        normalize_path(&caps[1])
    } else {
        return false;
    };

    if split_path {
        let (dir, name) = split_dir_name(&path);
        record.file_path = dir;
        record.file_name = name;
    } else {
        record.file_path = path;
    }
    true
}

fn extract_size(line: &str, record: &mut Record, _: bool) -> bool {
    let Some(caps) = SIZE_RE.captures(line) else {
        return false;
    };
    record.size = caps[1].to_string();
    record.blocks = caps[2].to_string();
    record.io_block = caps[3].to_string();
    record.file_type = caps[4].trim().to_string();
    true
}

fn extract_device(line: &str, record: &mut Record, _: bool) -> bool {
    for caps in LABEL_RE.captures_iter(line) {
        let value = caps[2].to_string();
        match &caps[1] {
            "Device" => record.device = value,
            "Inode" => record.inode = value,
            "Links" => record.links = value,
            _ => {}
        }
    }
    true
}

fn extract_permission(line: &str, record: &mut Record, _: bool) -> bool {
    let Some(caps) = PERMISSION_RE.captures(line) else {
        return false;
    };
    record.access = caps[1].trim().to_string();
    record.uid = format!("{}/{}", &caps[2], caps[3].trim());
    record.gid = format!("{}/{}", &caps[4], caps[5].trim());
    true
}

use serde::Serialize;

/// Column names in output order.
pub const HEADERS: [&str; 17] = [
    "FilePath",
    "FileName",
    "SymbolicTarget",
    "Size",
    "Blocks",
    "IOBlock",
    "Type",
    "Device",
    "Inode",
    "Links",
    "Access",
    "Uid",
    "Gid",
    "UTCOffset",
    "AccessTime",
    "ModifyTime",
    "ChangeTime",
];

/// One file's worth of `stat` output. Empty string means the field was not found.
///
/// Field order matches [`HEADERS`]; serde serializes fields in declaration
/// order, so the CSV header and JSON keys follow the same schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Record {
    pub file_path: String,
    pub file_name: String,
    pub symbolic_target: String,
    pub size: String,
    pub blocks: String,
    #[serde(rename = "IOBlock")]
    pub io_block: String,
    #[serde(rename = "Type")]
    pub file_type: String,
    pub device: String,
    pub inode: String,
    pub links: String,
    pub access: String,
    pub uid: String,
    pub gid: String,
    #[serde(rename = "UTCOffset")]
    pub utc_offset: String,
    pub access_time: String,
    pub modify_time: String,
    pub change_time: String,
}

impl Record {
    pub fn new(utc_offset: &str) -> Self {
        Record {
            utc_offset: utc_offset.to_string(),
            ..Default::default()
        }
    }

    pub fn values(&self) -> [&str; 17] {
        [
            self.file_path.as_str(),
            self.file_name.as_str(),
            self.symbolic_target.as_str(),
            self.size.as_str(),
            self.blocks.as_str(),
            self.io_block.as_str(),
            self.file_type.as_str(),
            self.device.as_str(),
            self.inode.as_str(),
            self.links.as_str(),
            self.access.as_str(),
            self.uid.as_str(),
            self.gid.as_str(),
            self.utc_offset.as_str(),
            self.access_time.as_str(),
            self.modify_time.as_str(),
            self.change_time.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_only_sets_offset() {
        let r = Record::new("+0900");
        for (name, value) in HEADERS.iter().zip(r.values()) {
            if *name == "UTCOffset" {
                assert_eq!(value, "+0900");
            } else {
                assert!(value.is_empty(), "{} should be empty", name);
            }
        }
    }

    #[test]
    fn serialized_keys_match_headers() {
        let json = serde_json::to_value(Record::new("+0000")).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), HEADERS.len());
        for h in HEADERS {
            assert!(obj.contains_key(h), "missing key {}", h);
        }
    }
}

//! Shard row format.
//!
//! Each shard line is a JSON array `[mask, word]`. The pair is modeled as a
//! struct with a hand-written `Deserialize` so that a row with the fields
//! swapped, missing, or padded with extras is rejected at parse time.

use crate::codec::Mask;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeTuple, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One dictionary entry: a word and the mask of its letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardRecord {
    /// Letter mask of the (folded) word.
    pub mask: Mask,
    /// Stored form of the word, folded or original case.
    pub word: String,
}

impl ShardRecord {
    /// Creates a record.
    pub fn new(mask: Mask, word: impl Into<String>) -> Self {
        Self {
            mask,
            word: word.into(),
        }
    }

    /// Parses one shard line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is not a `[mask, word]` array.
    pub fn from_json_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    /// Serializes the record as a single line (without the trailing newline).
    ///
    /// # Errors
    ///
    /// Only fails if serialization itself fails, which plain strings and
    /// integers never do.
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Serialize for ShardRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.mask)?;
        tuple.serialize_element(&self.word)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for ShardRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = ShardRecord;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a [mask, word] pair")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ShardRecord, A::Error> {
                let mask: Mask = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let word: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                if seq.next_element::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(3, &self));
                }
                Ok(ShardRecord { mask, word })
            }
        }

        deserializer.deserialize_seq(RecordVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_pair_array() {
        let record = ShardRecord::new(3, "ab");
        assert_eq!(record.to_json_line().unwrap(), r#"[3,"ab"]"#);
    }

    #[test]
    fn keeps_non_ascii_verbatim() {
        let record = ShardRecord::new(5, "ząb");
        assert_eq!(record.to_json_line().unwrap(), "[5,\"ząb\"]");
    }

    #[test]
    fn parses_pair_array() {
        let record = ShardRecord::from_json_line(r#"[7, "abc"]"#).unwrap();
        assert_eq!(record, ShardRecord::new(7, "abc"));
    }

    #[test]
    fn parses_full_width_mask() {
        let line = format!("[{}, \"x\"]", u64::MAX);
        let record = ShardRecord::from_json_line(&line).unwrap();
        assert_eq!(record.mask, u64::MAX);
    }

    #[test]
    fn rejects_malformed_rows() {
        for line in [
            r#"["abc", 7]"#,
            r#"[7]"#,
            r#"[]"#,
            r#"[7, "abc", 1]"#,
            r#"{"mask": 7, "word": "abc"}"#,
            r#"[-1, "abc"]"#,
            r#"[1.5, "abc"]"#,
            "not json",
        ] {
            assert!(
                ShardRecord::from_json_line(line).is_err(),
                "accepted {line}"
            );
        }
    }
}

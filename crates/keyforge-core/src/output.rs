//! Snapshot file writer
//!
//! Writes the three JSON artifacts of a run. Files are indented with four
//! spaces, keep non-ASCII text as-is and replace whatever was there before.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::info;

use crate::error::{KeyforgeError, Result};
use crate::types::Snapshot;

/// Expansions with their nested cards and houses
pub const KEYFORGE_INFO_FILE: &str = "keyforge_info.json";

/// Every collected card in expansion order
pub const ALL_CARDS_FILE: &str = "all_cards.json";

/// Every distinct house
pub const ALL_HOUSES_FILE: &str = "all_houses.json";

const INDENT: &[u8] = b"    ";

/// Serialize `value` as four-space indented JSON.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(buffer)
}

fn write_json<T: Serialize + ?Sized>(path: PathBuf, value: &T) -> Result<PathBuf> {
    let contents = to_pretty_json(value)?;
    fs::write(&path, contents).map_err(|source| KeyforgeError::Output {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), "wrote snapshot file");
    Ok(path)
}

/// Write `keyforge_info.json`, `all_cards.json` and `all_houses.json` into
/// `dir`, returning the written paths in that order.
///
/// # Errors
/// `KeyforgeError::Output` if a file cannot be written.
pub fn write_snapshot(snapshot: &Snapshot, dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(vec![
        write_json(dir.join(KEYFORGE_INFO_FILE), &snapshot.expansions)?,
        write_json(dir.join(ALL_CARDS_FILE), &snapshot.cards)?,
        write_json(dir.join(ALL_HOUSES_FILE), &snapshot.houses)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Card, Expansion, House};
    use serde_json::{json, Value};

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    fn sample_snapshot() -> Snapshot {
        let mut expansion = Expansion::new("Call of the Archons", 341, 1);
        expansion.cards.push(Card::new(json!({
            "card_title": "Ælbia Stray",
            "card_number": "001",
            "expansion": 341,
            "is_maverick": false
        })));
        expansion.houses.push(House::new(json!({"id": "Brobnar", "name": "Brobnar"})));

        let mut snapshot = Snapshot::default();
        snapshot.add_expansion(expansion);
        snapshot
    }

    #[test]
    fn test_pretty_json_uses_four_spaces() {
        let bytes = to_pretty_json(&json!([{"id": "Dis"}])).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "[\n    {\n        \"id\": \"Dis\"\n    }\n]");
    }

    #[test]
    fn test_pretty_json_keeps_non_ascii() {
        let bytes = to_pretty_json(&json!({"card_title": "Ælbia Stray"})).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("Ælbia Stray"));
        assert!(!text.contains("\\u"));
    }

    #[test]
    fn test_pretty_json_empty_list() {
        let bytes = to_pretty_json(&Vec::<Card>::new()).unwrap();
        assert_eq!(bytes, b"[]");
    }

    #[test]
    fn test_write_snapshot_files() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_snapshot(&sample_snapshot(), dir.path()).unwrap();

        let names: Vec<_> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec![KEYFORGE_INFO_FILE, ALL_CARDS_FILE, ALL_HOUSES_FILE]);

        let info: Value = read_json(&written[0]);
        assert_eq!(info[0]["name"], "Call of the Archons");
        assert_eq!(info[0]["id"], 341);
        assert_eq!(info[0]["number_of_cards"], 1);
        assert_eq!(info[0]["cards"][0]["card_title"], "Ælbia Stray");
        assert_eq!(info[0]["houses"][0]["id"], "Brobnar");

        let cards: Value = read_json(&written[1]);
        assert_eq!(cards.as_array().unwrap().len(), 1);

        let houses: Value = read_json(&written[2]);
        assert_eq!(houses, json!([{"id": "Brobnar", "name": "Brobnar"}]));
    }

    #[test]
    fn test_write_snapshot_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let stale = "stale contents that are much longer than the new file";
        fs::write(dir.path().join(ALL_HOUSES_FILE), stale).unwrap();

        write_snapshot(&Snapshot::default(), dir.path()).unwrap();

        assert_eq!(fs::read_to_string(dir.path().join(ALL_HOUSES_FILE)).unwrap(), "[]");
        assert_eq!(fs::read_to_string(dir.path().join(KEYFORGE_INFO_FILE)).unwrap(), "[]");
    }

    #[test]
    fn test_write_snapshot_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let result = write_snapshot(&Snapshot::default(), &missing);
        match result {
            Err(KeyforgeError::Output { path, .. }) => {
                assert_eq!(path, missing.join(KEYFORGE_INFO_FILE));
            }
            other => panic!("Expected Output error, got {:?}", other),
        }
    }
}

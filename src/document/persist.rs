//! On-disk mirror of the translation map.
//!
//! Entries are joined by a blank line. Each entry is escaped first
//! (`\` → `\\`, newline → `\n`, carriage return → `\r`), so an escaped
//! entry never contains a newline and splitting on `"\n\n"` always yields
//! the original entries. Single-line translations are stored verbatim.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::Path;

use crate::fs::atomic_write;

const ENTRY_SEPARATOR: &str = "\n\n";

fn escape(entry: &str) -> String {
    let mut escaped = String::with_capacity(entry.len());
    for c in entry.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn unescape(entry: &str) -> String {
    let mut unescaped = String::with_capacity(entry.len());
    let mut chars = entry.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => unescaped.push('\n'),
            Some('r') => unescaped.push('\r'),
            Some('\\') => unescaped.push('\\'),
            // Unknown escapes are kept literally
            Some(other) => {
                unescaped.push('\\');
                unescaped.push(other);
            }
            None => unescaped.push('\\'),
        }
    }
    unescaped
}

/// Serializes the translation map to its file format.
pub fn encode(entries: &[String]) -> String {
    entries
        .iter()
        .map(|entry| escape(entry))
        .collect::<Vec<_>>()
        .join(ENTRY_SEPARATOR)
}

/// Parses the file format back into entries.
///
/// Escaped entries never contain raw line breaks, so CRLF line endings and
/// a newline an editor appended after the last entry are dropped.
pub fn decode(contents: &str) -> Vec<String> {
    let contents = contents.replace("\r\n", "\n");
    let mut raw: Vec<&str> = contents.split(ENTRY_SEPARATOR).collect();
    if let Some(last) = raw.pop() {
        raw.push(last.trim_end_matches('\n'));
    }
    raw.into_iter().map(unescape).collect()
}

/// Reads a persisted translation map, or `None` if the file does not exist.
pub fn load(path: &Path) -> Result<Option<Vec<String>>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(decode(&contents))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Writes the full translation map, replacing the previous file atomically.
pub fn save(path: &Path, entries: &[String]) -> Result<()> {
    atomic_write(path, &encode(entries))
}

/// Copies persisted entries into `translations` index by index.
///
/// The map keeps its length: extra persisted entries are ignored and
/// missing ones leave the slot untouched. Returns how many slots were
/// filled with non-empty text.
pub fn merge(translations: &mut [String], persisted: Vec<String>) -> usize {
    let mut restored = 0;
    for (slot, entry) in translations.iter_mut().zip(persisted) {
        if !entry.is_empty() {
            restored += 1;
        }
        *slot = entry;
    }
    restored
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_encode_trailing_untranslated_entry() {
        assert_eq!(encode(&strings(&["Bonjour", ""])), "Bonjour\n\n");
    }

    #[test]
    fn test_decode_trailing_untranslated_entry() {
        assert_eq!(decode("Bonjour\n\n"), strings(&["Bonjour", ""]));
    }

    #[test]
    fn test_consecutive_empty_entries() {
        let entries = strings(&["a", "", "", "b"]);
        assert_eq!(encode(&entries), "a\n\n\n\n\n\nb");
        assert_eq!(decode(&encode(&entries)), entries);
    }

    #[test]
    fn test_entries_containing_separator_survive() {
        let entries = strings(&["line one\n\nline two", "C:\\new\\dir", "crlf\r\n"]);

        let encoded = encode(&entries);

        assert_eq!(encoded.matches(ENTRY_SEPARATOR).count(), 2);
        assert_eq!(decode(&encoded), entries);
    }

    #[test]
    fn test_unknown_escape_kept_literally() {
        assert_eq!(decode("50\\% off\\"), strings(&["50\\% off\\"]));
    }

    #[test]
    fn test_merge_pads_and_truncates() {
        let mut short = vec![String::new(); 3];
        assert_eq!(merge(&mut short, strings(&["uno", ""])), 1);
        assert_eq!(short, strings(&["uno", "", ""]));

        let mut long = vec![String::new(); 2];
        merge(&mut long, strings(&["uno", "dos", "tres"]));
        assert_eq!(long, strings(&["uno", "dos"]));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load(&temp_dir.path().join("doc_French.txt")).unwrap().is_none());
    }

    #[test]
    fn test_load_then_save_is_byte_identical() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc_French.txt");
        let original = "Bonjour\n\n\n\nDeux lignes\\nici\n\nC:\\\\temp";
        fs::write(&path, original).unwrap();

        let mut translations = vec![String::new(); 4];
        merge(&mut translations, load(&path).unwrap().unwrap());
        save(&path, &translations).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), original);
        assert_eq!(translations[2], "Deux lignes\nici");
        assert_eq!(translations[3], "C:\\temp");
    }

    #[test]
    fn test_editor_trailing_newline_is_not_kept() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc_French.txt");
        fs::write(&path, "Bonjour\n\nMonde\n").unwrap();

        let entries = load(&path).unwrap().unwrap();
        assert_eq!(entries, strings(&["Bonjour", "Monde"]));

        save(&path, &entries).unwrap();
        let resaved = fs::read_to_string(&path).unwrap();
        assert_eq!(resaved, "Bonjour\n\nMonde");

        // From here on the file round-trips byte for byte
        save(&path, &load(&path).unwrap().unwrap()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), resaved);
    }

    #[test]
    fn test_trailing_newline_after_untranslated_entry() {
        assert_eq!(decode("Bonjour\n\n\n"), strings(&["Bonjour", ""]));
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(
            decode("Bonjour\r\n\r\nMonde\r\n"),
            strings(&["Bonjour", "Monde"])
        );
    }
}

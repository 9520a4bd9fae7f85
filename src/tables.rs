use anyhow::{anyhow, Context, Result};
use std::{fs::File, io::Read, path::Path};

use crate::modifiers::ModifierType;

/// Writer shorthand codes and the faceset files they stand for.
/// Matching walks this list in order, so a code that is a substring of a
/// later one must come after it to ever be reached.
pub const WRITER_CODES: [(&str, &str); 4] = [
    ("SU", "SU_DreamSunny"),
    ("HI", "MainCharacter_Hikiko"),
    ("MCDW", "MainCharacters_DreamWorld"),
    ("BA", "BA_DreamBasil"),
];

/// Inline style markers, in scan order.
pub const MODIFIER_MARKERS: [(ModifierType, &str); 6] = [
    (ModifierType::WavyGrowing, "[~]"),
    (ModifierType::Growing, "[+]"),
    (ModifierType::SmallerFont, "[-]"),
    (ModifierType::Jumping, "[^]"),
    (ModifierType::Shaking, "[#]"),
    (ModifierType::Wacky, "*"),
];

/// Ordered writer-code → faceset-id table.
///
/// Built once and shared by reference with the message parser. The default
/// holds [`WRITER_CODES`]; a project can replace it from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacesetTable {
    entries: Vec<(String, String)>,
}

impl Default for FacesetTable {
    fn default() -> Self {
        let entries = WRITER_CODES
            .iter()
            .map(|(code, id)| (code.to_string(), id.to_string()))
            .collect();
        FacesetTable { entries }
    }
}

impl FacesetTable {
    /// Builds a table from `(code, faceset_id)` pairs, keeping their order.
    pub fn new<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let entries: Vec<(String, String)> = entries.into_iter().collect();

        if let Some((_, id)) = entries.iter().find(|(code, _)| code.is_empty()) {
            return Err(anyhow!("empty writer code for faceset {}", id));
        }

        Ok(FacesetTable { entries })
    }

    /// Parses a JSON array of `["CODE", "Faceset_Id"]` pairs.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<(String, String)> =
            serde_json::from_str(json).context("faceset table must be a list of [code, id] pairs")?;
        FacesetTable::new(entries)
    }

    pub fn from_json_file(filename: &str) -> Result<Self> {
        let mut file = File::open(Path::new(filename))
            .with_context(|| format!("cannot open faceset table {}", filename))?;
        let mut data = String::new();
        file.read_to_string(&mut data)?;

        let table = FacesetTable::from_json_str(&data)
            .with_context(|| format!("invalid faceset table {}", filename))?;
        log::debug!("loaded {} writer codes from {}", table.len(), filename);
        Ok(table)
    }

    /// First entry whose code occurs anywhere inside `tag`.
    pub fn lookup(&self, tag: &str) -> Option<(&str, &str)> {
        self.entries
            .iter()
            .find(|(code, _)| tag.contains(code.as_str()))
            .map(|(code, id)| (code.as_str(), id.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, i)| (c.as_str(), i.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_keeps_writer_order() {
        let table = FacesetTable::default();
        let codes: Vec<&str> = table.iter().map(|(code, _)| code).collect();
        assert_eq!(codes, vec!["SU", "HI", "MCDW", "BA"]);
    }

    #[test]
    fn lookup_matches_code_inside_tag() {
        let table = FacesetTable::default();
        assert_eq!(table.lookup("[HI 3]"), Some(("HI", "MainCharacter_Hikiko")));
        assert_eq!(
            table.lookup("[MCDW 12]"),
            Some(("MCDW", "MainCharacters_DreamWorld"))
        );
        assert_eq!(table.lookup("[ZZ 1]"), None);
    }

    #[test]
    fn first_listed_code_wins() {
        // "SUHI" contains both SU and HI
        let table = FacesetTable::default();
        assert_eq!(table.lookup("[SUHI 1]"), Some(("SU", "SU_DreamSunny")));
    }

    #[test]
    fn json_table_preserves_order() {
        let table = FacesetTable::from_json_str(
            r#"[["KEL", "KEL_DreamKel"], ["KE", "KE_Other"]]"#,
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("[KEL 1]"), Some(("KEL", "KEL_DreamKel")));
        assert_eq!(table.lookup("[KE 1]"), Some(("KE", "KE_Other")));
    }

    #[test]
    fn json_table_rejects_empty_code() {
        let err = FacesetTable::from_json_str(r#"[["", "Anything"]]"#).unwrap_err();
        assert!(err.to_string().contains("empty writer code"));
    }

    #[test]
    fn json_table_rejects_objects() {
        assert!(FacesetTable::from_json_str(r#"{"SU": "SU_DreamSunny"}"#).is_err());
    }

    #[test]
    fn modifier_markers_are_verbatim() {
        let markers: Vec<&str> = MODIFIER_MARKERS.iter().map(|(_, m)| *m).collect();
        assert_eq!(markers, vec!["[~]", "[+]", "[-]", "[^]", "[#]", "*"]);
    }
}

use anyhow::Result;

use crate::tables::FacesetTable;

/// Settings for a conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    pub facesets: FacesetTable,
    /// Skip lines with fatal errors instead of halting.
    pub keep_going: bool,
    pub scan_modifiers: bool,
    pub strip_modifiers: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig {
            facesets: FacesetTable::default(),
            keep_going: false,
            scan_modifiers: true,
            strip_modifiers: true,
        }
    }
}

impl ConverterConfig {
    /// Default settings with the faceset table replaced by the one in
    /// `filename`, when given.
    pub fn with_faceset_file(filename: Option<&str>) -> Result<Self> {
        let facesets = match filename {
            Some(filename) => FacesetTable::from_json_file(filename)?,
            None => FacesetTable::default(),
        };

        Ok(ConverterConfig {
            facesets,
            ..ConverterConfig::default()
        })
    }
}

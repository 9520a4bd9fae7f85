use anyhow::{Context, Result};
use std::{fs::File, io::Read, path::Path};

/// One non-blank line of a dialogue script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub filename: String,
    pub line_number: usize,
    pub text: String,
}

/// Reads the specified filename and splits it into script lines
pub fn list_script_lines(filename: &str) -> Result<Vec<ScriptLine>> {
    let mut file =
        File::open(Path::new(filename)).with_context(|| format!("cannot open script {}", filename))?;
    let mut data = String::new();
    file.read_to_string(&mut data)
        .with_context(|| format!("script {} is not valid UTF-8", filename))?;

    Ok(split_script_lines(filename, &data))
}

/// Splits script text into numbered lines, dropping blank ones.
pub fn split_script_lines(filename: &str, data: &str) -> Vec<ScriptLine> {
    // Skip BOM if present
    let data = data.strip_prefix('\u{feff}').unwrap_or(data);

    data.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| ScriptLine {
            filename: filename.to_string(),
            line_number: i + 1,
            text: line.to_string(),
        })
        .collect()
}

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

use crate::tables::FacesetTable;

/// Why a single script line could not become a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("Either the text starts with a colon, or there's no colon separating dialogue! Line: {line}")]
    Separator { line: String },

    #[error("Writer used an unknown faceset. Text: {tag}")]
    UnknownFaceset { tag: String },

    #[error("Portrait has no face index. Text: {tag}")]
    MissingFaceIndex { tag: String },

    #[error("Face index {digits} is too large. Text: {tag}")]
    InvalidFaceIndex { tag: String, digits: String },

    #[error("Portrait closes before it opens. Name: {name}")]
    UnbalancedPortrait { name: String },
}

impl MessageError {
    /// A fatal error halts the whole batch unless the caller asked to keep
    /// going. Only a bad separator is skipped by default.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, MessageError::Separator { .. })
    }
}

/// A [`MessageError`] located in a script file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub filename: String,
    pub line_number: usize,
    pub line: String,
    pub kind: MessageError,
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "On line {} of {}: {}",
            self.line_number, self.filename, self.kind
        )
    }
}

impl ParseError {
    pub fn new(filename: String, line_number: usize, line: String, kind: MessageError) -> Self {
        ParseError {
            filename,
            line_number,
            line,
            kind,
        }
    }
}

/// One line of dialogue: who speaks, with which face, saying what.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessageRecord {
    pub text: String,
    pub speaker_name: String,
    pub faceset_id: Option<String>,
    /// Pose within the faceset. 0 both for "no portrait" and for a real
    /// portrait whose index is 0.
    pub face_index: u32,
}

impl fmt::Display for MessageRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.faceset_id {
            Some(faceset) => write!(
                f,
                "{} [{} {}] \"{}\"",
                self.speaker_name, faceset, self.face_index, self.text
            ),
            None => write!(f, "{} \"{}\"", self.speaker_name, self.text),
        }
    }
}

fn face_index_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]+").expect("face index pattern is valid"))
}

/// Byte index of the `name:` separator, if the line has a usable one.
fn find_separator(line: &str) -> Option<usize> {
    match line.find(':') {
        Some(0) | None => None,
        Some(i) => Some(i),
    }
}

/// Splits `Name[CODE n]: text` into a [`MessageRecord`].
///
/// The dialogue starts two characters after the colon, so the colon must be
/// followed by exactly one space; any other character there is dropped. See
/// [`dropped_after_separator`].
pub fn parse_message(line: &str, facesets: &FacesetTable) -> Result<MessageRecord, MessageError> {
    let separator = find_separator(line).ok_or_else(|| MessageError::Separator {
        line: line.to_string(),
    })?;

    let name = &line[..separator];
    let mut after = line[separator + 1..].chars();
    after.next();
    let text = after.as_str().to_string();

    let portrait_start = name.find('[').filter(|&i| i > 0);
    let portrait_end = name.find(']').filter(|&i| i > 0);

    let (start, end) = match (portrait_start, portrait_end) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            return Ok(MessageRecord {
                text,
                speaker_name: name.to_string(),
                faceset_id: None,
                face_index: 0,
            })
        }
    };

    if end < start {
        return Err(MessageError::UnbalancedPortrait {
            name: name.to_string(),
        });
    }

    // e.g. "[SU 1]"
    let portrait = &name[start..=end];

    let (code, faceset) = facesets
        .lookup(portrait)
        .ok_or_else(|| MessageError::UnknownFaceset {
            tag: portrait.to_string(),
        })?;

    let digits = face_index_re()
        .find(portrait)
        .ok_or_else(|| MessageError::MissingFaceIndex {
            tag: portrait.to_string(),
        })?
        .as_str();

    let face_index = digits
        .parse::<u32>()
        .map_err(|_| MessageError::InvalidFaceIndex {
            tag: portrait.to_string(),
            digits: digits.to_string(),
        })?;

    log::trace!("portrait {} resolved via {} to {} #{}", portrait, code, faceset, face_index);

    Ok(MessageRecord {
        text,
        speaker_name: name[..start].to_string(),
        faceset_id: Some(faceset.to_string()),
        face_index,
    })
}

/// The character swallowed after the separator when it is not the expected
/// single space.
pub fn dropped_after_separator(line: &str) -> Option<char> {
    let separator = find_separator(line)?;
    line[separator + 1..].chars().next().filter(|&c| c != ' ')
}

//! Inline text modifiers.
//!
//! Dialogue text carries style markers such as `[~]` (wavy growing) or a bare
//! `*` (wacky text). This module only reports where they are and removes
//! them; rendering the styles is left to the game.

use serde::Serialize;
use std::fmt;

use crate::tables::MODIFIER_MARKERS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ModifierType {
    WavyGrowing,
    Growing,
    SmallerFont,
    Jumping,
    Shaking,
    /// Freeform emphasis toggled by `*`. Has no closing marker.
    Wacky,
}

impl ModifierType {
    pub fn marker(&self) -> &'static str {
        MODIFIER_MARKERS
            .iter()
            .find(|(kind, _)| kind == self)
            .map(|(_, marker)| *marker)
            .unwrap_or_default()
    }
}

impl fmt::Display for ModifierType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ModifierType::WavyGrowing => "wavy growing",
            ModifierType::Growing => "growing",
            ModifierType::SmallerFont => "smaller font",
            ModifierType::Jumping => "jumping",
            ModifierType::Shaking => "shaking",
            ModifierType::Wacky => "wacky",
        };
        write!(f, "{}", name)
    }
}

/// First place a modifier marker shows up in a piece of dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModifierOccurrence {
    #[serde(rename = "type")]
    pub kind: ModifierType,
    /// Offset in characters, not bytes.
    pub start_index: usize,
}

impl fmt::Display for ModifierOccurrence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Type: {}, Start Index: {}", self.kind, self.start_index)
    }
}

/// Finds every modifier used in `text`. Does not apply them.
///
/// Each type is reported at most once, at its first occurrence. Results come
/// back in table order, not in text order.
pub fn scan(text: &str) -> Vec<ModifierOccurrence> {
    let mut rv = Vec::new();

    for (kind, marker) in MODIFIER_MARKERS.iter() {
        if let Some(byte_index) = text.find(marker) {
            rv.push(ModifierOccurrence {
                kind: *kind,
                start_index: text[..byte_index].chars().count(),
            });
        }
    }

    if rv.is_empty() {
        log::trace!("no text modifiers in {:?}", text);
    }

    rv
}

/// Removes every modifier marker from `text`.
pub fn strip(text: &str) -> String {
    let mut rv = strip_once(text);

    // removing a marker can splice a new one together, e.g. "[[~]~]"
    loop {
        let next = strip_once(&rv);
        if next == rv {
            return rv;
        }
        rv = next;
    }
}

fn strip_once(text: &str) -> String {
    MODIFIER_MARKERS
        .iter()
        .fold(text.to_string(), |acc, (_, marker)| acc.replace(marker, ""))
}

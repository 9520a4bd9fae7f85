pub mod config;
pub mod diagnostics;
pub mod lexer;
pub mod modifiers;
pub mod parsers;
pub mod tables;

use anyhow::Result;
use serde::Serialize;
use std::fmt;

use config::ConverterConfig;
use diagnostics::{DiagnosticSink, Severity};
use lexer::{list_script_lines, ScriptLine};
use modifiers::ModifierOccurrence;
use parsers::{dropped_after_separator, parse_message, MessageRecord, ParseError};

/// A parsed line together with what was found in its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    #[serde(flatten)]
    pub record: MessageRecord,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<ModifierOccurrence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plain_text: Option<String>,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.record)?;
        for modifier in &self.modifiers {
            write!(f, "\n    {}", modifier)?;
        }
        Ok(())
    }
}

pub struct MessageVec<'a>(pub &'a [Message]);

impl<'a> fmt::Display for MessageVec<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let strings: Vec<String> = self.0.iter().map(|m| m.to_string()).collect();
        write!(f, "{}", strings.join("\n"))
    }
}

/// Converts script lines into messages, in order.
///
/// Lines with a bad separator are reported and left out. Any other parse
/// error is reported and returned, unless `config.keep_going` is set, in
/// which case that line is left out too.
pub fn convert_lines(
    lines: &[ScriptLine],
    config: &ConverterConfig,
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<Message>> {
    let mut rv = Vec::with_capacity(lines.len());

    for line in lines {
        let record = match parse_message(&line.text, &config.facesets) {
            Ok(record) => record,
            Err(kind) => {
                let fatal = kind.is_fatal();
                let err = ParseError::new(
                    line.filename.clone(),
                    line.line_number,
                    line.text.clone(),
                    kind,
                );
                sink.report(Severity::Error, &err.to_string());

                if fatal && !config.keep_going {
                    return Err(err.into());
                }
                continue;
            }
        };

        if let Some(dropped) = dropped_after_separator(&line.text) {
            sink.report(
                Severity::Warning,
                &format!(
                    "On line {} of {}: expected a space after the colon, dropped {:?}",
                    line.line_number, line.filename, dropped
                ),
            );
        }

        let modifiers = if config.scan_modifiers {
            modifiers::scan(&record.text)
        } else {
            Vec::new()
        };

        let plain_text = if config.strip_modifiers {
            Some(modifiers::strip(&record.text))
        } else {
            None
        };

        rv.push(Message {
            record,
            modifiers,
            plain_text,
        });
    }

    sink.report(
        Severity::Debug,
        &format!("converted {} of {} lines", rv.len(), lines.len()),
    );

    Ok(rv)
}

/// Reads a script file and converts every line of it.
pub fn convert_script_from_file(
    filename: &str,
    config: &ConverterConfig,
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<Message>> {
    let lines = list_script_lines(filename)?;
    sink.report(
        Severity::Info,
        &format!("read {} lines from {}", lines.len(), filename),
    );
    convert_lines(&lines, config, sink)
}

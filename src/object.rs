//! The object-file format exchanged between the assembler and the
//! simulator (§6): one 8-char zero-padded lowercase hex word per line,
//! with an optional trailing ` # <disassembly>` comment the simulator
//! ignores on load (§2b).

use std::path::Path;

use itertools::Itertools;
use thiserror::Error;

use crate::isa;

#[derive(Debug, Error)]
pub enum ObjectError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: could not parse '{text}' as a hex word")]
    ParseLine { line: usize, text: String },
}

/// Render `words` as the object-file text, one line per word.
/// `annotate` adds the disassembly comment column from §2b.
pub fn format_object(words: &[u32], annotate: bool) -> String {
    words
        .iter()
        .map(|&word| {
            if annotate {
                format!("{word:08x} # {}\n", isa::disassemble(word))
            } else {
                format!("{word:08x}\n")
            }
        })
        .join("")
}

/// Parse the object-file text back into its word stream, skipping
/// blank lines and stripping the optional disassembly comment.
pub fn read_object(text: &str) -> Result<Vec<u32>, ObjectError> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let content = line.split('#').next().unwrap_or("").trim();
            if content.is_empty() {
                None
            } else {
                Some((i + 1, content))
            }
        })
        .map(|(line, content)| {
            u32::from_str_radix(content, 16).map_err(|_| ObjectError::ParseLine {
                line,
                text: content.to_string(),
            })
        })
        .collect()
}

pub fn write_object_file(path: &Path, words: &[u32], annotate: bool) -> Result<(), ObjectError> {
    std::fs::write(path, format_object(words, annotate))?;
    Ok(())
}

pub fn read_object_file(path: &Path) -> Result<Vec<u32>, ObjectError> {
    let text = std::fs::read_to_string(path)?;
    read_object(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_and_read_round_trip() {
        let words = vec![0x0050_0093, 0x0010_0073];
        let text = format_object(&words, false);
        assert_eq!(read_object(&text).unwrap(), words);
    }

    #[test]
    fn annotated_lines_still_parse() {
        let words = vec![0x0050_0093];
        let text = format_object(&words, true);
        assert!(text.contains('#'));
        assert_eq!(read_object(&text).unwrap(), words);
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(read_object("\n00500093\n\n").unwrap(), vec![0x0050_0093]);
    }

    #[test]
    fn garbage_line_is_a_parse_error() {
        let err = read_object("not_hex\n").unwrap_err();
        assert!(matches!(err, ObjectError::ParseLine { .. }));
    }
}

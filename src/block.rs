//! Marker block replacement.
//!
//! A block is the text between a literal start marker and the first literal
//! end marker after it. Only the first block in a document is rewritten.

use regex::{NoExpand, Regex};

use crate::error::{Result, UpdateError};

/// Replaces the interior of the first `start ... end` block with `new_line`.
///
/// The markers are kept and the interior becomes exactly one line, so the
/// result reads `start\nnew_line\nend`. Text outside the block is untouched.
pub fn replace_block(text: &str, start: &str, end: &str, new_line: &str) -> Result<String> {
    let pattern = block_pattern(start, end)?;

    if !pattern.is_match(text) {
        return Err(UpdateError::MarkersNotFound {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    let replacement = format!("{start}\n{new_line}\n{end}");
    Ok(pattern.replacen(text, 1, NoExpand(&replacement)).into_owned())
}

fn block_pattern(start: &str, end: &str) -> Result<Regex> {
    let source = format!("(?s){}.*?{}", regex::escape(start), regex::escape(end));
    Ok(Regex::new(&source)?)
}

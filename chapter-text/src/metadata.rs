//! FFmpeg FFMETADATA1 export of chapter titles.

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Build an FFMETADATA1 document listing one `[CHAPTER]` per title.
///
/// No timing keys are written; the text carries no durations. Every entry
/// is newline terminated and values are escaped.
pub fn ffmetadata<S: AsRef<str>>(title: &str, artist: &str, chapters: &[S]) -> String {
    let mut out = String::from(";FFMETADATA1\n");
    out.push_str(&format!("title={}\n", escape_metadata_value(title)));
    out.push_str(&format!("artist={}\n", escape_metadata_value(artist)));

    for chapter in chapters {
        out.push_str("\n[CHAPTER]\n");
        out.push_str(&format!("title={}\n", escape_metadata_value(chapter.as_ref())));
    }

    out
}

/// Write [`ffmetadata`] output to `output_path`.
pub fn write_ffmetadata<S: AsRef<str>>(
    title: &str,
    artist: &str,
    chapters: &[S],
    output_path: &Path,
) -> Result<()> {
    fs::write(output_path, ffmetadata(title, artist, chapters))?;
    Ok(())
}

/// FFmpeg metadata values need to escape: = ; # \ and newlines
fn escape_metadata_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '=' | ';' | '#' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' => escaped.push_str("\\\n"),
            '\r' => {}
            _ => escaped.push(c),
        }
    }

    escaped
}

//! Line reading shared by the segmenter and translation patches.

use std::io::BufRead;

use crate::error::Result;

/// Call `f` with every line of `reader`, terminator stripped.
///
/// Input is decoded lossily: bytes that are not valid UTF-8 become U+FFFD,
/// so such bytes are not reproduced exactly on output.
pub(crate) fn for_each_line<R, F>(mut reader: R, mut f: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(String),
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        f(String::from_utf8_lossy(&buf).into_owned());
    }
}

//! Lossy draining of child process pipes
//!
//! Subprocess output is arbitrary bytes, not guaranteed UTF-8. Invalid
//! sequences are replaced rather than terminating the stream, so one bad
//! byte never swallows the rest of a program's output.

use crate::progress::LogSink;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};

/// Forwards every line from `reader` to the sink as it is produced,
/// replacing invalid UTF-8. Blank lines are dropped. Read errors end the
/// stream; everything received up to that point has already been delivered.
pub async fn forward_lines<R: AsyncRead + Unpin>(reader: R, sink: &dyn LogSink) {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim();
                if !line.is_empty() {
                    sink.info(line);
                }
            }
        }
    }
}

/// Reads a pipe to EOF and returns its contents with invalid UTF-8 replaced
pub async fn collect_lossy<R: AsyncRead + Unpin>(reader: Option<R>) -> String {
    let mut bytes = Vec::new();
    if let Some(mut reader) = reader {
        let _ = reader.read_to_end(&mut bytes).await;
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

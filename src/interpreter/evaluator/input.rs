use std::{collections::VecDeque, io::BufRead};

use tracing::trace;

use crate::{error::RuntimeError, interpreter::evaluator::core::ExecResult};

/// Whitespace-separated integers read lazily from a buffered source.
///
/// Lines are pulled from the reader only when every token of the previous
/// lines has been consumed, so a program that reads nothing never touches
/// the source. A token may carry a leading `+` or `-`. The source is split
/// as bytes, so a token that is not valid UTF-8 is reported as a
/// non-integer rather than as an I/O failure.
///
/// # Example
/// ```
/// use core_interp::interpreter::evaluator::input::DataStream;
///
/// let mut data = DataStream::new("  4\n-7 +2 x".as_bytes());
/// assert_eq!(data.next_integer(1).unwrap(), 4);
/// assert_eq!(data.next_integer(1).unwrap(), -7);
/// assert_eq!(data.next_integer(1).unwrap(), 2);
/// assert!(data.next_integer(1).is_err());
/// ```
#[derive(Debug)]
pub struct DataStream<R> {
    reader:  R,
    pending: VecDeque<Vec<u8>>,
}

impl<R: BufRead> DataStream<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self { reader,
               pending: VecDeque::new() }
    }

    /// Consumes the next token and parses it as an integer.
    ///
    /// `line` is the source line of the `read` statement, used in errors.
    ///
    /// # Errors
    /// - `InputExhausted` when no token is left.
    /// - `InputNotInteger` when the token is not a 64-bit integer. The token
    ///   is consumed either way.
    /// - `Io` when the reader fails.
    pub fn next_integer(&mut self, line: usize) -> ExecResult<i64> {
        let bytes = self.next_token(line)?
                        .ok_or(RuntimeError::InputExhausted { line })?;
        let token = String::from_utf8_lossy(&bytes).into_owned();
        trace!(%token, line, "data token");
        token.parse()
             .map_err(|_| RuntimeError::InputNotInteger { token, line })
    }

    fn next_token(&mut self, line: usize) -> ExecResult<Option<Vec<u8>>> {
        while self.pending.is_empty() {
            let mut buf = Vec::new();
            let read = self.reader
                           .read_until(b'\n', &mut buf)
                           .map_err(|source| RuntimeError::Io { source, line })?;
            if read == 0 {
                return Ok(None);
            }
            self.pending.extend(buf.split(u8::is_ascii_whitespace)
                                   .filter(|token| !token.is_empty())
                                   .map(<[u8]>::to_vec));
        }
        Ok(self.pending.pop_front())
    }
}

use std::io::{BufRead, Read, Result};

/// `BufRead` adaptor that counts the newlines consumed from the inner reader.
///
/// The tokenizer consumes bytes through `consume`, so after each event the
/// count is the line the next token starts on.
#[derive(Debug)]
pub struct LineCounter<R> {
    inner: R,
    line: usize,
}

impl<R> LineCounter<R> {
    #[must_use]
    pub const fn new(inner: R) -> Self {
        Self { inner, line: 1 }
    }

    /// 1-based line of the first unconsumed byte.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }
}

fn count_newlines(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| b == b'\n').count()
}

impl<R: BufRead> Read for LineCounter<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let n = self.inner.read(buf)?;
        self.line += count_newlines(&buf[..n]);
        Ok(n)
    }
}

impl<R: BufRead> BufRead for LineCounter<R> {
    fn fill_buf(&mut self) -> Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        // `consume` always follows a `fill_buf` that returned at least `amt`
        // bytes, so this second call hands back the same buffer without I/O.
        if let Ok(buffered) = self.inner.fill_buf() {
            self.line += count_newlines(&buffered[..amt.min(buffered.len())]);
        }
        self.inner.consume(amt);
    }
}

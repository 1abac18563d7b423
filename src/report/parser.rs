use std::io::BufRead;
use std::path::Path;

use crate::error::Result;
use crate::xml::{Token, XmlCursor};

use super::IssueSink;

const SCOPE_NAME_ATTR: &str = "Name";
const FILE_ATTR: &str = "File";
const LINE_ATTR: &str = "Line";
const RULE_VIOLATED: &str = "RuleViolated";
const KEY_ATTR: &str = "Key";

/// An open scope element. Its location is read once at the start tag and
/// never changes; the frame is dropped at the matching end tag.
#[derive(Debug)]
struct ScopeFrame {
    tag_name: String,
    file: Option<String>,
    line: Option<u32>,
    depth: usize,
}

impl ScopeFrame {
    fn read<R: BufRead>(cursor: &XmlCursor<R>, depth: usize) -> Result<Self> {
        let file = cursor.attribute(FILE_ATTR)?;
        let line = cursor.int_attribute(LINE_ATTR)?.and_then(|raw| {
            let line = u32::try_from(raw).ok().filter(|&l| l >= 1);
            if line.is_none() {
                tracing::debug!(
                    "Ignoring non-positive line {raw} on <{}> at line {}",
                    cursor.name(),
                    cursor.current_line()
                );
            }
            line
        });

        Ok(Self {
            tag_name: cursor.name().to_string(),
            file,
            line,
            depth,
        })
    }

    fn location(&self) -> Option<(&str, u32)> {
        Some((self.file.as_deref()?, self.line?))
    }
}

/// Streams an NDepend report and hands every located violation to a sink.
///
/// Scopes are found anywhere in the document, including below elements that
/// are not scopes themselves. A `RuleViolated` resolves to the innermost open
/// scope; if that scope lacks a file or a line the violation is dropped.
/// Repeated violations are reported repeatedly.
pub struct ReportParser<S> {
    sink: S,
}

impl<S: IssueSink> ReportParser<S> {
    pub const fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Parses the report at `path`, returning the number of issues emitted.
    ///
    /// # Errors
    /// Fails on the first I/O, XML or structural error. Issues emitted before
    /// the failure have already reached the sink.
    pub fn parse(&mut self, path: &Path) -> Result<usize> {
        tracing::debug!("Parsing NDepend report {}", path.display());
        let mut cursor = XmlCursor::open(path)?;
        self.walk(&mut cursor)
    }

    /// Parses report XML held in memory.
    ///
    /// # Errors
    /// Same as [`Self::parse`], without a file path in error messages.
    pub fn parse_str(&mut self, xml: &str) -> Result<usize> {
        let mut cursor = XmlCursor::from_str(xml);
        self.walk(&mut cursor)
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn walk<R: BufRead>(&mut self, cursor: &mut XmlCursor<R>) -> Result<usize> {
        let mut scopes: Vec<ScopeFrame> = Vec::new();
        let mut depth = 0usize;
        let mut emitted = 0usize;

        loop {
            match cursor.advance()? {
                Token::ElementStart => {
                    depth += 1;

                    if cursor.name() == RULE_VIOLATED
                        && let Some((file, line)) = scopes.last().and_then(ScopeFrame::location)
                    {
                        let key = cursor.required_attribute(KEY_ATTR)?;
                        self.sink.on_issue(&key, file, line);
                        emitted += 1;
                    }

                    if cursor.attribute(SCOPE_NAME_ATTR)?.is_some() {
                        scopes.push(ScopeFrame::read(cursor, depth)?);
                    }
                }
                Token::ElementEnd => {
                    if scopes.last().is_some_and(|scope| scope.depth == depth)
                        && let Some(scope) = scopes.pop()
                    {
                        tracing::trace!("Leaving scope <{}>", scope.tag_name);
                    }
                    depth = depth.saturating_sub(1);
                }
                Token::EndOfDocument => {
                    tracing::debug!("Found {emitted} NDepend issue(s)");
                    return Ok(emitted);
                }
            }
        }
    }
}

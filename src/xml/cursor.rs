use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use quick_xml::Reader;
use quick_xml::errors::IllFormedError;
use quick_xml::events::{BytesStart, Event};

use crate::error::{NdependError, ParseError, ParseErrorKind, Result, XmlError};

use super::LineCounter;

/// Kind of token the cursor is positioned on after [`XmlCursor::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    ElementStart,
    ElementEnd,
    EndOfDocument,
}

/// Forward-only cursor over one XML document.
///
/// Text, comments and processing instructions between elements are skipped.
/// A self-closing element yields `ElementStart` followed by `ElementEnd`.
/// A document that ends with elements still open, or that has a second root
/// element, is malformed. The underlying handle is owned by the cursor and released when it drops.
pub struct XmlCursor<R> {
    reader: Reader<LineCounter<R>>,
    buf: Vec<u8>,
    origin: Option<PathBuf>,
    element: Option<BytesStart<'static>>,
    name: String,
    line: usize,
    pending_end: bool,
    /// Local names of the elements not yet closed, outermost first.
    open: Vec<String>,
    root_closed: bool,
}

impl<'a> XmlCursor<&'a [u8]> {
    /// Cursor over in-memory XML text.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &'a str) -> Self {
        Self::from_reader(text.as_bytes(), None)
    }
}

impl XmlCursor<BufReader<File>> {
    /// Opens `path` for a single forward pass.
    ///
    /// # Errors
    /// Returns [`NdependError::FileRead`] naming the path if it cannot be opened.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| NdependError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_reader(
            BufReader::new(file),
            Some(path.to_path_buf()),
        ))
    }
}

impl<R: BufRead> XmlCursor<R> {
    /// Cursor over any buffered reader. `origin` names the document in errors.
    pub fn from_reader(reader: R, origin: Option<PathBuf>) -> Self {
        let mut reader = Reader::from_reader(LineCounter::new(reader));
        reader.config_mut().trim_text(false);
        Self {
            reader,
            buf: Vec::new(),
            origin,
            element: None,
            name: String::new(),
            line: 1,
            pending_end: false,
            open: Vec::new(),
            root_closed: false,
        }
    }

    /// Moves to the next element boundary or the end of the document.
    ///
    /// # Errors
    /// Returns [`NdependError::MalformedXml`] if the input cannot be tokenized.
    pub fn advance(&mut self) -> Result<Token> {
        if self.pending_end {
            self.pending_end = false;
            self.element = None;
            return Ok(Token::ElementEnd);
        }

        loop {
            self.buf.clear();
            let line = self.reader.get_ref().line();
            let event = self
                .reader
                .read_event_into(&mut self.buf)
                .map_err(|source| malformed(self.origin.clone(), line, source))?;

            match event {
                Event::Start(start) => {
                    let start = start.into_owned();
                    self.enter(start, line, false)?;
                    return Ok(Token::ElementStart);
                }
                Event::Empty(start) => {
                    let start = start.into_owned();
                    self.enter(start, line, true)?;
                    return Ok(Token::ElementStart);
                }
                Event::End(end) => {
                    let name = decode(end.local_name().as_ref()).into_owned();
                    self.leave(name, line);
                    return Ok(Token::ElementEnd);
                }
                Event::Eof => {
                    self.element = None;
                    self.line = line;
                    if let Some(unclosed) = self.open.last() {
                        return Err(self.missing_end_tag(unclosed));
                    }
                    return Ok(Token::EndOfDocument);
                }
                _ => {}
            }
        }
    }

    fn enter(
        &mut self,
        start: BytesStart<'static>,
        line: usize,
        self_closing: bool,
    ) -> Result<()> {
        self.name = decode(start.local_name().as_ref()).into_owned();
        self.element = Some(start);
        self.line = line;
        self.pending_end = self_closing;

        if self.open.is_empty() {
            if self.root_closed {
                return Err(self.malformed_here(XmlError::SecondRoot(self.name.clone())));
            }
            if self_closing {
                self.root_closed = true;
            }
        }
        if !self_closing {
            self.open.push(self.name.clone());
        }
        Ok(())
    }

    fn leave(&mut self, name: String, line: usize) {
        self.name = name;
        self.element = None;
        self.line = line;
        self.open.pop();
        if self.open.is_empty() {
            self.root_closed = true;
        }
    }

    /// Local name of the current start or end element.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 1-based line number of the current token.
    #[must_use]
    pub const fn current_line(&self) -> usize {
        self.line
    }

    /// Where the document came from, if it was read from disk.
    #[must_use]
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    /// Value of the attribute with local name `name` on the current start
    /// element. Namespace prefixes are ignored; the match is case-sensitive.
    ///
    /// # Errors
    /// Returns [`NdependError::MalformedXml`] on a malformed attribute list.
    pub fn attribute(&self, name: &str) -> Result<Option<String>> {
        let Some(element) = &self.element else {
            return Ok(None);
        };

        for attr in element.attributes() {
            let attr = attr.map_err(|e| self.malformed_here(quick_xml::Error::from(e)))?;
            if attr.key.local_name().as_ref() == name.as_bytes() {
                let value = attr
                    .unescape_value()
                    .map_err(|e| self.malformed_here(e))?;
                return Ok(Some(value.into_owned()));
            }
        }

        Ok(None)
    }

    /// Like [`Self::attribute`], but a missing attribute is a parse error.
    ///
    /// # Errors
    /// Returns `Missing attribute "<name>" in element <<tag>>` at the current line.
    pub fn required_attribute(&self, name: &str) -> Result<String> {
        self.attribute(name)?.ok_or_else(|| {
            self.parse_error(ParseErrorKind::MissingAttribute {
                attribute: name.to_string(),
                element: self.name.clone(),
            })
        })
    }

    /// Base-10 integer attribute. Absent stays absent.
    ///
    /// # Errors
    /// Returns `Expected an integer instead of "<value>" for the attribute "<name>"`
    /// when the value does not parse.
    pub fn int_attribute(&self, name: &str) -> Result<Option<i32>> {
        let Some(value) = self.attribute(name)? else {
            return Ok(None);
        };

        value.parse::<i32>().map(Some).map_err(|_| {
            self.parse_error(ParseErrorKind::InvalidInteger {
                value,
                attribute: name.to_string(),
            })
        })
    }

    /// Reads the content of the current start element up to its matching end
    /// tag, leaving the cursor on that end tag.
    ///
    /// Direct text and CDATA are concatenated with entities resolved. Nested
    /// markup, including its text, is kept verbatim, so an inline HTML
    /// description comes back as written.
    ///
    /// # Errors
    /// Returns [`NdependError::MalformedXml`] if the document ends first or
    /// cannot be tokenized.
    pub fn element_text(&mut self) -> Result<String> {
        if self.pending_end {
            self.pending_end = false;
            self.element = None;
            return Ok(String::new());
        }

        let mut text = String::new();
        let mut depth = 0usize;

        loop {
            self.buf.clear();
            let line = self.reader.get_ref().line();
            let event = self
                .reader
                .read_event_into(&mut self.buf)
                .map_err(|source| malformed(self.origin.clone(), line, source))?;

            match event {
                Event::Text(t) if depth > 0 => text.push_str(&decode(&t)),
                Event::Text(t) => {
                    let unescaped = t
                        .unescape()
                        .map_err(|source| malformed(self.origin.clone(), line, source))?;
                    text.push_str(&unescaped);
                }
                Event::CData(c) if depth > 0 => {
                    text.push_str("<![CDATA[");
                    text.push_str(&decode(&c));
                    text.push_str("]]>");
                }
                Event::CData(c) => text.push_str(&decode(&c)),
                Event::Start(start) => {
                    depth += 1;
                    self.open.push(decode(start.local_name().as_ref()).into_owned());
                    text.push('<');
                    text.push_str(&decode(&start));
                    text.push('>');
                }
                Event::Empty(start) => {
                    text.push('<');
                    text.push_str(&decode(&start));
                    text.push_str("/>");
                }
                Event::End(end) if depth == 0 => {
                    let name = decode(end.local_name().as_ref()).into_owned();
                    self.leave(name, line);
                    return Ok(text);
                }
                Event::End(end) => {
                    depth -= 1;
                    self.open.pop();
                    text.push_str("</");
                    text.push_str(&decode(end.name().as_ref()));
                    text.push('>');
                }
                Event::Eof => {
                    let unclosed = self.open.last().unwrap_or(&self.name);
                    let source = IllFormedError::MissingEndTag(unclosed.clone());
                    let source = quick_xml::Error::from(source);
                    return Err(malformed(self.origin.clone(), line, source));
                }
                _ => {}
            }
        }
    }

    /// Builds a [`ParseError`] located at the current token.
    #[must_use]
    pub fn parse_error(&self, kind: ParseErrorKind) -> NdependError {
        ParseError::new(kind, self.line, self.origin.clone()).into()
    }

    /// Error for a document that ended while `element` was still open.
    #[must_use]
    pub fn missing_end_tag(&self, element: &str) -> NdependError {
        let source = IllFormedError::MissingEndTag(element.to_string());
        self.malformed_here(quick_xml::Error::from(source))
    }

    fn malformed_here(&self, source: impl Into<XmlError>) -> NdependError {
        malformed(self.origin.clone(), self.line, source)
    }
}

fn malformed(
    origin: Option<PathBuf>,
    line: usize,
    source: impl Into<XmlError>,
) -> NdependError {
    NdependError::MalformedXml {
        origin,
        line,
        source: source.into(),
    }
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

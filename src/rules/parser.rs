use std::iter::FusedIterator;
use std::path::PathBuf;

use crate::error::{ParseErrorKind, Result};
use crate::xml::{Token, XmlCursor};

use super::{RuleRecord, RuleRepository};

const RULE_TAG: &str = "Rule";
const NAME_TAG: &str = "Name";
const DESCRIPTION_TAG: &str = "Description";
const KEY_ATTR: &str = "Key";
const PRIORITY_ATTR: &str = "Priority";
const CATEGORY_ATTR: &str = "Category";

/// Lazily walks a rule catalog, yielding one record per completed `Rule`.
///
/// The first error is yielded once and ends the iteration; records yielded
/// before it stay valid.
pub struct RuleRecords<'a> {
    cursor: XmlCursor<&'a [u8]>,
    done: bool,
}

impl<'a> RuleRecords<'a> {
    #[must_use]
    pub fn new(xml: &'a str) -> Self {
        Self {
            cursor: XmlCursor::from_str(xml),
            done: false,
        }
    }

    /// Like [`Self::new`], naming `origin` in error messages.
    #[must_use]
    pub fn with_origin(xml: &'a str, origin: PathBuf) -> Self {
        Self {
            cursor: XmlCursor::from_reader(xml.as_bytes(), Some(origin)),
            done: false,
        }
    }

    fn next_rule(&mut self) -> Result<Option<RuleRecord>> {
        loop {
            match self.cursor.advance()? {
                Token::ElementStart if self.cursor.name() == RULE_TAG => {
                    return self.read_rule().map(Some);
                }
                Token::EndOfDocument => return Ok(None),
                Token::ElementStart | Token::ElementEnd => {}
            }
        }
    }

    fn read_rule(&mut self) -> Result<RuleRecord> {
        let cursor = &mut self.cursor;
        let key = cursor.required_attribute(KEY_ATTR)?;
        let severity = cursor.required_attribute(PRIORITY_ATTR)?;
        let category = cursor.attribute(CATEGORY_ATTR)?;

        let mut name = None;
        let mut description = None;
        let mut depth = 0usize;

        loop {
            match cursor.advance()? {
                Token::ElementStart if cursor.name() == NAME_TAG => {
                    name = Some(cursor.element_text()?);
                }
                Token::ElementStart if cursor.name() == DESCRIPTION_TAG => {
                    description = Some(cursor.element_text()?);
                }
                Token::ElementStart => depth += 1,
                Token::ElementEnd if depth > 0 => depth -= 1,
                Token::ElementEnd => break,
                Token::EndOfDocument => return Err(cursor.missing_end_tag(RULE_TAG)),
            }
        }

        let name = name.ok_or_else(|| cursor.parse_error(ParseErrorKind::MissingRuleName))?;
        let html_description = description
            .ok_or_else(|| cursor.parse_error(ParseErrorKind::MissingRuleDescription))?;

        Ok(RuleRecord {
            key,
            severity,
            name,
            html_description,
            tags: category.into_iter().collect(),
        })
    }
}

impl Iterator for RuleRecords<'_> {
    type Item = Result<RuleRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.next_rule() {
            Ok(Some(rule)) => Some(Ok(rule)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for RuleRecords<'_> {}

/// Parses `xml` and commits each rule to `repository` as soon as its closing
/// tag is read. Empty text is an empty catalog.
///
/// # Errors
/// Stops at the first structural or XML error. Rules committed before it stay
/// in the repository.
pub fn parse_rule_catalog(
    xml: &str,
    repository: &mut impl RuleRepository,
) -> Result<Vec<RuleRecord>> {
    RuleRecords::new(xml).commit_to(repository)
}

impl RuleRecords<'_> {
    /// Drains the walk, committing each record to `repository` as it is
    /// produced, and returns the records in catalog order.
    ///
    /// # Errors
    /// Returns the first error; records committed before it stay committed.
    pub fn commit_to(self, repository: &mut impl RuleRepository) -> Result<Vec<RuleRecord>> {
        let mut parsed = Vec::new();
        for record in self {
            let record = record?;
            repository.add_rule(record.clone());
            parsed.push(record);
        }
        tracing::debug!("Parsed {} NDepend rule(s)", parsed.len());
        Ok(parsed)
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;

//! Forward-only XML access shared by the report and rule catalog walkers.
//!
//! Both walkers see the document through [`XmlCursor`]: one token at a time,
//! attribute lookup on the current start element, and the 1-based line of the
//! current token for error messages. Nothing else from `quick_xml` leaks out.

mod cursor;
mod line_counter;

pub use cursor::{Token, XmlCursor};
pub use line_counter::LineCounter;

#[cfg(test)]
#[path = "cursor_tests.rs"]
mod tests;

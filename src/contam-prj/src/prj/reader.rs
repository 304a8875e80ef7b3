// Copyright 2021 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Reader: pulls whitespace-delimited tokens out of a line-oriented PRJ
//! stream.
//!
//! Only the unconsumed tokens of the current physical line are buffered.
//! Lines whose first character is `!` are comments and are skipped by
//! every read except `read_raw_section`, which copies lines verbatim.

use std::collections::VecDeque;
use std::io::BufRead;
use std::str::FromStr;

use contam_core::{ScalarLiteral, is_decimal};
use contam_core::{eof_err, format_err, structure_err};
use log::{debug, trace};

use crate::prj::section::{Element, Record};
use crate::prj::Result;

pub const SECTION_TERMINATOR: &str = "-999";
pub const DOCUMENT_TERMINATOR: &str = "* end project file.";

pub struct Reader<'a> {
    input: Box<dyn BufRead + 'a>,
    line: usize,
    pending: VecDeque<String>,
}

impl<'a> Reader<'a> {
    pub fn new(input: impl BufRead + 'a) -> Self {
        Reader {
            input: Box::new(input),
            line: 0,
            pending: VecDeque::new(),
        }
    }

    pub fn from_text(text: &'a str) -> Self {
        Reader::new(text.as_bytes())
    }

    /// The 1-based number of the last physical line consumed, 0 before
    /// anything has been read.
    pub fn line(&self) -> usize {
        self.line
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') {
                buf.pop();
            }
        }
        Ok(Some(buf))
    }

    /// Next physical line that is not a full-line comment.
    fn next_content_line(&mut self, wanted: &str) -> Result<String> {
        loop {
            match self.next_line()? {
                Some(line) if line.starts_with('!') => continue,
                Some(line) => return Ok(line),
                None => return eof_err!(self.line, format!("end of input while reading {wanted}")),
            }
        }
    }

    pub fn read_token(&mut self) -> Result<String> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                if token.starts_with('!') {
                    // trailing comment: the rest of the line goes with it
                    self.pending.clear();
                    continue;
                }
                return Ok(token);
            }
            let line = self.next_content_line("a token")?;
            self.pending.extend(
                line.split([' ', '\t'])
                    .filter(|field| !field.is_empty())
                    .map(str::to_owned),
            );
        }
    }

    pub fn read_int(&mut self) -> Result<i32> {
        let token = self.read_token()?;
        match i32::from_str(&token) {
            Ok(n) => Ok(n),
            Err(_) => format_err!(
                ExpectedInteger,
                self.line,
                format!("failed to read '{token}' as an integer")
            ),
        }
    }

    pub fn read_uint(&mut self) -> Result<u32> {
        let token = self.read_token()?;
        match u32::from_str(&token) {
            Ok(n) => Ok(n),
            Err(_) => format_err!(
                ExpectedUnsigned,
                self.line,
                format!("failed to read '{token}' as an unsigned integer")
            ),
        }
    }

    pub fn read_float(&mut self) -> Result<f32> {
        let token = self.read_number_as_text()?;
        match f32::from_str(&token) {
            Ok(n) => Ok(n),
            Err(_) => format_err!(
                ExpectedNumber,
                self.line,
                format!("failed to read '{token}' as a float")
            ),
        }
    }

    pub fn read_double(&mut self) -> Result<f64> {
        let token = self.read_number_as_text()?;
        match f64::from_str(&token) {
            Ok(n) => Ok(n),
            Err(_) => format_err!(
                ExpectedNumber,
                self.line,
                format!("failed to read '{token}' as a double")
            ),
        }
    }

    /// Reads a token that must be a number, returning its original text.
    pub fn read_number_as_text(&mut self) -> Result<String> {
        let token = self.read_token()?;
        if !is_decimal(&token) {
            return format_err!(
                ExpectedNumber,
                self.line,
                format!("failed to read '{token}' as a number")
            );
        }
        Ok(token)
    }

    pub fn read_literal(&mut self) -> Result<ScalarLiteral> {
        let token = self.read_number_as_text()?;
        ScalarLiteral::new(&token).map_err(|mut err| {
            err.line = Some(self.line);
            err
        })
    }

    /// Drops whatever is left of the current line and returns the next
    /// non-comment line without splitting it.
    pub fn read_whole_line(&mut self) -> Result<String> {
        self.pending.clear();
        self.next_content_line("a line")
    }

    pub fn read_section_terminator(&mut self, context: Option<&str>) -> Result<()> {
        let line = self.read_whole_line()?;
        if !line.starts_with(SECTION_TERMINATOR) {
            let details = match context {
                Some(context) => format!("failed to find {context} section termination"),
                None => "failed to find section termination".to_owned(),
            };
            return structure_err!(MissingSectionTerminator, self.line, details);
        }
        Ok(())
    }

    pub fn read_document_terminator(&mut self) -> Result<()> {
        let line = self.read_whole_line()?;
        if !line.starts_with(DOCUMENT_TERMINATOR) {
            return structure_err!(
                MissingDocumentTerminator,
                self.line,
                format!("expected '{DOCUMENT_TERMINATOR}', found '{line}'")
            );
        }
        Ok(())
    }

    /// Copies lines verbatim, comments included, through the first line
    /// that starts with the section terminator.
    pub fn read_raw_section(&mut self) -> Result<String> {
        self.pending.clear();
        let mut section = String::new();
        loop {
            let line = match self.next_line()? {
                Some(line) => line,
                None => return eof_err!(self.line, "end of input inside a raw section".to_owned()),
            };
            section.push_str(&line);
            section.push('\n');
            if line.starts_with(SECTION_TERMINATOR) {
                break;
            }
        }
        trace!("raw section of {} bytes ending at line {}", section.len(), self.line);
        Ok(section)
    }

    /// Reads a count followed by that many integers; the integers may share
    /// or span lines.
    pub fn read_int_array(&mut self, terminated: bool) -> Result<Vec<i32>> {
        let count = self.read_count()?;
        let mut values = Vec::new();
        for _ in 0..count {
            values.push(self.read_int()?);
        }
        if terminated {
            self.read_section_terminator(None)?;
        }
        Ok(values)
    }

    pub(crate) fn read_count(&mut self) -> Result<usize> {
        let token = self.read_token()?;
        match usize::from_str(&token) {
            Ok(n) => Ok(n),
            Err(_) => format_err!(
                ExpectedUnsigned,
                self.line,
                format!("failed to read '{token}' as a count")
            ),
        }
    }

    pub fn read_section_vector<T: Record>(&mut self, label: Option<&str>) -> Result<Vec<T>> {
        let count = self.read_count()?;
        let mut items = Vec::new();
        for _ in 0..count {
            let mut item = T::default();
            item.read(self)?;
            items.push(item);
        }
        self.read_section_terminator(label)?;
        debug!("read {} {} ending at line {}", count, label.unwrap_or("records"), self.line);
        Ok(items)
    }

    pub fn read_element_vector<T: Element>(&mut self, label: Option<&str>) -> Result<Vec<T>> {
        let count = self.read_count()?;
        let mut items = Vec::new();
        for _ in 0..count {
            items.push(T::read_element(self)?);
        }
        self.read_section_terminator(label)?;
        debug!("read {} {} ending at line {}", count, label.unwrap_or("elements"), self.line);
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contam_core::{ErrorCode, ErrorKind};
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    #[test]
    fn test_tokens_span_lines() {
        let mut reader = Reader::from_text("1 2\n   3\t4\n\n5\n");
        let tokens: Vec<i32> = (0..5).map(|_| reader.read_int().unwrap()).collect();
        assert_eq!(vec![1, 2, 3, 4, 5], tokens);
        assert_eq!(4, reader.line());
    }

    #[test]
    fn test_comment_lines_skipped() {
        let mut reader = Reader::from_text("! header\n!another\n!\n7 8\n! mid\n9\n");
        assert_eq!(7, reader.read_int().unwrap());
        assert_eq!(8, reader.read_int().unwrap());
        assert_eq!(9, reader.read_int().unwrap());
        assert_eq!(6, reader.line());
    }

    #[test]
    fn test_trailing_comment() {
        let mut reader = Reader::from_text("3 ! zones: 4 5\n6\n");
        assert_eq!(3, reader.read_int().unwrap());
        assert_eq!(6, reader.read_int().unwrap());
    }

    #[test]
    fn test_end_of_input() {
        let mut reader = Reader::from_text("1\n! only a comment\n");
        assert_eq!(1, reader.read_int().unwrap());
        let err = reader.read_token().unwrap_err();
        assert_eq!(ErrorKind::EndOfInput, err.kind);
        assert_eq!(Some(2), err.line);
    }

    #[test]
    fn test_numeric_errors() {
        let mut reader = Reader::from_text("x\n-3\n1.5.2\n");
        let err = reader.read_int().unwrap_err();
        assert_eq!(ErrorKind::Format, err.kind);
        assert_eq!(ErrorCode::ExpectedInteger, err.code);
        assert_eq!(Some(1), err.line);
        assert!(err.get_details().unwrap().contains("'x'"));

        let err = reader.read_uint().unwrap_err();
        assert_eq!(ErrorCode::ExpectedUnsigned, err.code);
        assert_eq!(Some(2), err.line);

        let err = reader.read_double().unwrap_err();
        assert_eq!(ErrorCode::ExpectedNumber, err.code);
        assert_eq!(Some(3), err.line);
    }

    #[test]
    fn test_typed_reads() {
        let mut reader = Reader::from_text("12 7 2.5 1e-3 0.50000\n");
        assert_eq!(12, reader.read_uint().unwrap());
        assert_eq!(7, reader.read_int().unwrap());
        assert!(approx_eq!(f32, 2.5, reader.read_float().unwrap()));
        assert!(approx_eq!(f64, 0.001, reader.read_double().unwrap()));
        assert_eq!("0.50000", reader.read_number_as_text().unwrap());
    }

    #[test]
    fn test_literal_error_has_line() {
        let mut reader = Reader::from_text("\n\nabc\n");
        let err = reader.read_literal().unwrap_err();
        assert_eq!(Some(3), err.line);
    }

    #[test]
    fn test_whole_line() {
        let mut reader = Reader::from_text("1 ignored tokens\n! comment\n  a free  text line \r\nnext\n");
        assert_eq!(1, reader.read_int().unwrap());
        assert_eq!("  a free  text line ", reader.read_whole_line().unwrap());
        assert_eq!("next", reader.read_token().unwrap());
    }

    #[test]
    fn test_section_terminator() {
        let mut reader = Reader::from_text("-999\n-9990 extra\n1 2 3\n");
        reader.read_section_terminator(None).unwrap();
        reader.read_section_terminator(None).unwrap();
        let err = reader.read_section_terminator(Some("zone")).unwrap_err();
        assert_eq!(ErrorKind::Structure, err.kind);
        assert_eq!(ErrorCode::MissingSectionTerminator, err.code);
        assert_eq!(Some(3), err.line);
        assert!(err.get_details().unwrap().contains("zone"));
    }

    #[test]
    fn test_document_terminator() {
        let mut reader = Reader::from_text("* end project file.\n* something else\n");
        reader.read_document_terminator().unwrap();
        let err = reader.read_document_terminator().unwrap_err();
        assert_eq!(ErrorCode::MissingDocumentTerminator, err.code);
    }

    #[test]
    fn test_raw_section_is_verbatim() {
        let text = "2 ! kinetic reactions\n! a comment line\n  odd   spacing  \n-999 trailing\n";
        let mut reader = Reader::from_text(text);
        assert_eq!(text, reader.read_raw_section().unwrap());

        let mut reader = Reader::from_text("1\n2\n");
        let err = reader.read_raw_section().unwrap_err();
        assert_eq!(ErrorKind::EndOfInput, err.kind);
    }

    #[test]
    fn test_raw_section_drops_pending_tokens() {
        let mut reader = Reader::from_text("5 leftover\n-999\n");
        assert_eq!(5, reader.read_int().unwrap());
        assert_eq!("-999\n", reader.read_raw_section().unwrap());
    }

    #[test]
    fn test_int_array() {
        let mut reader = Reader::from_text("3 ! contaminants:\n 1\n 2 4\n");
        assert_eq!(vec![1, 2, 4], reader.read_int_array(false).unwrap());

        let mut reader = Reader::from_text("2\n5 6\n-999\n");
        assert_eq!(vec![5, 6], reader.read_int_array(true).unwrap());

        let mut reader = Reader::from_text("0 ! contaminants:\n\n7\n");
        assert!(reader.read_int_array(false).unwrap().is_empty());
        assert_eq!(7, reader.read_int().unwrap());
    }

    #[test]
    fn test_huge_count_fails_cleanly() {
        use crate::prj::elements::AirflowElement;
        use crate::prj::level::Level;

        let huge = "99999999999999999 ! levels:\n-999\n";
        let err = Reader::from_text(huge)
            .read_section_vector::<Level>(Some("level"))
            .unwrap_err();
        assert_eq!(ErrorKind::EndOfInput, err.kind);
        assert_eq!(Some(2), err.line);

        let err = Reader::from_text(huge)
            .read_element_vector::<AirflowElement>(Some("airflow element"))
            .unwrap_err();
        assert_eq!(ErrorKind::EndOfInput, err.kind);

        let err = Reader::from_text("99999999999999999\n1 2\n")
            .read_int_array(false)
            .unwrap_err();
        assert_eq!(ErrorKind::EndOfInput, err.kind);
    }

    fn tokens(text: &str) -> Vec<String> {
        let mut reader = Reader::from_text(text);
        let mut tokens = vec![];
        while let Ok(token) = reader.read_token() {
            tokens.push(token);
        }
        tokens
    }

    proptest! {
        #[test]
        fn comments_do_not_change_tokens(
            lines in prop::collection::vec("[a-z0-9.]{1,6}( [a-z0-9.]{1,6}){0,3}", 1..8),
            comments in prop::collection::vec("![ -~]{0,20}", 1..8),
            gaps in prop::collection::vec(0usize..3, 1..8),
        ) {
            let plain = lines.join("\n") + "\n";
            let mut commented = String::new();
            for (i, line) in lines.iter().enumerate() {
                for j in 0..gaps[i % gaps.len()] {
                    commented.push_str(&comments[(i + j) % comments.len()]);
                    commented.push('\n');
                }
                commented.push_str(line);
                commented.push('\n');
            }
            prop_assert_eq!(tokens(&plain), tokens(&commented));
        }
    }
}

// Copyright 2021 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Section assembly: the `count ! label`, records, `-999` framing shared by
//! every sectioned collection in a PRJ file.

use std::fmt::Display;

use log::debug;

use crate::prj::Result;
use crate::prj::reader::{Reader, SECTION_TERMINATOR};

/// Appends its arguments to a `String` separated by single spaces and
/// finishes the line.  A trailing `; ..` leaves the line open, and a
/// leading `..;` continues an open line.
macro_rules! write_fields {
    ($out:expr; ..; $($field:expr),+ $(,)?) => {{
        let out: &mut String = $out;
        $(
            out.push(' ');
            out.push_str(&$field.to_string());
        )+
        out.push('\n');
    }};
    ($out:expr; $first:expr $(, $rest:expr)*; ..) => {{
        let out: &mut String = $out;
        out.push_str(&$first.to_string());
        $(
            out.push(' ');
            out.push_str(&$rest.to_string());
        )*
    }};
    ($out:expr; $first:expr $(, $rest:expr)* $(,)?) => {{
        let out: &mut String = $out;
        out.push_str(&$first.to_string());
        $(
            out.push(' ');
            out.push_str(&$rest.to_string());
        )*
        out.push('\n');
    }};
}

pub(crate) use write_fields;

/// A fixed-layout record, read into a default-constructed value.
pub trait Record: Default {
    fn read(&mut self, reader: &mut Reader) -> Result<()>;
    fn write(&self, out: &mut String);
}

/// A record from a polymorphic family, built by a factory that dispatches
/// on the record's type tag.
pub trait Element: Sized {
    fn read_element(reader: &mut Reader) -> Result<Self>;
    fn write(&self, out: &mut String);
}

fn write_header(out: &mut String, count: usize, label: Option<&str>) {
    out.push_str(&count.to_string());
    if let Some(label) = label {
        out.push_str(" ! ");
        out.push_str(label);
    }
    out.push('\n');
}

fn write_terminator(out: &mut String) {
    out.push_str(SECTION_TERMINATOR);
    out.push('\n');
}

pub fn write_section_vector<T: Record>(out: &mut String, items: &[T], label: Option<&str>) {
    write_header(out, items.len(), label);
    for item in items {
        item.write(out);
    }
    write_terminator(out);
    debug!("wrote {} {}", items.len(), label.unwrap_or("records"));
}

pub fn write_element_vector<T: Element>(out: &mut String, items: &[T], label: Option<&str>) {
    write_header(out, items.len(), label);
    for item in items {
        item.write(out);
    }
    write_terminator(out);
    debug!("wrote {} {}", items.len(), label.unwrap_or("elements"));
}

/// Writes a flat array: the header line, then every item space-prefixed on
/// a single line.
pub fn write_array<T: Display>(out: &mut String, items: &[T], label: Option<&str>) {
    write_header(out, items.len(), label);
    for item in items {
        out.push(' ');
        out.push_str(&item.to_string());
    }
    out.push('\n');
}

/// Writes `values` each followed by a single space, then ends the line.
pub(crate) fn write_padded<T: Display>(out: &mut String, values: &[T]) {
    for value in values {
        out.push_str(&value.to_string());
        out.push(' ');
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use contam_core::{ErrorCode, ErrorKind};

    #[derive(Debug, Default, PartialEq)]
    struct Pair {
        nr: i32,
        value: i32,
    }

    impl Record for Pair {
        fn read(&mut self, reader: &mut Reader) -> Result<()> {
            self.nr = reader.read_int()?;
            self.value = reader.read_int()?;
            Ok(())
        }

        fn write(&self, out: &mut String) {
            write_fields!(out; self.nr, self.value);
        }
    }

    #[test]
    fn test_write_fields_open_line() {
        let mut out = String::new();
        write_fields!(&mut out; 1, "a"; ..);
        assert_eq!("1 a", out);
        write_fields!(&mut out; ..; 2.5, "b");
        assert_eq!("1 a 2.5 b\n", out);
    }

    #[test]
    fn test_write_section_vector() {
        let mut out = String::new();
        let items = vec![Pair { nr: 1, value: 10 }, Pair { nr: 2, value: 20 }];
        write_section_vector(&mut out, &items, Some("pairs:"));
        assert_eq!("2 ! pairs:\n1 10\n2 20\n-999\n", out);

        let mut out = String::new();
        write_section_vector::<Pair>(&mut out, &[], None);
        assert_eq!("0\n-999\n", out);
    }

    #[test]
    fn test_section_vector_roundtrip() {
        let items = vec![Pair { nr: 1, value: -4 }, Pair { nr: 2, value: 9 }];
        let mut out = String::new();
        write_section_vector(&mut out, &items, Some("pairs:"));
        let mut reader = Reader::from_text(&out);
        let read: Vec<Pair> = reader.read_section_vector(Some("pairs")).unwrap();
        assert_eq!(items, read);
    }

    #[test]
    fn test_section_vector_needs_terminator() {
        // the third line looks like a record but the count says two
        let mut reader = Reader::from_text("2\n1 10\n2 20\n3 30\n-999\n");
        let err = reader.read_section_vector::<Pair>(Some("pair")).unwrap_err();
        assert_eq!(ErrorKind::Structure, err.kind);
        assert_eq!(ErrorCode::MissingSectionTerminator, err.code);
        assert_eq!(Some(4), err.line);
    }

    #[test]
    fn test_write_array() {
        let mut out = String::new();
        write_array(&mut out, &[2, 5], Some("contaminants:"));
        assert_eq!("2 ! contaminants:\n 2 5\n", out);

        let mut out = String::new();
        write_array::<i32>(&mut out, &[], Some("contaminants:"));
        assert_eq!("0 ! contaminants:\n\n", out);
    }

    #[test]
    fn test_write_padded() {
        let mut out = String::new();
        write_padded(&mut out, &[1, 2, 3]);
        assert_eq!("1 2 3 \n", out);
    }
}

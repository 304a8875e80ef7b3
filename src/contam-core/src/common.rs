// Copyright 2021 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fmt;
use std::{error, io, result};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    UnexpectedEof,
    ExpectedInteger,
    ExpectedUnsigned,
    ExpectedNumber,
    MissingSectionTerminator,
    MissingDocumentTerminator,
    InitialConditionCount,
    InitialConditionOrder,
    UnknownAirflowElement,
    UnknownControlNode,
    Io,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ErrorCode::*;
        let name = match self {
            UnexpectedEof => "unexpected_eof",
            ExpectedInteger => "expected_integer",
            ExpectedUnsigned => "expected_unsigned",
            ExpectedNumber => "expected_number",
            MissingSectionTerminator => "missing_section_terminator",
            MissingDocumentTerminator => "missing_document_terminator",
            InitialConditionCount => "initial_condition_count",
            InitialConditionOrder => "initial_condition_order",
            UnknownAirflowElement => "unknown_airflow_element",
            UnknownControlNode => "unknown_control_node",
            Io => "io",
        };

        write!(f, "{name}")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input ran out while a token, line or section was required.
    EndOfInput,
    /// A token did not parse as the required numeric type.
    Format,
    /// A terminator or a section-internal cross check did not match.
    Structure,
    /// A polymorphic record carried a type tag with no registered variant.
    UnknownVariant,
    Io,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub code: ErrorCode,
    /// 1-based physical line of the input at the point of failure.
    pub line: Option<usize>,
    pub details: Option<String>,
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error {
            kind: ErrorKind::Io,
            code: ErrorCode::Io,
            line: None,
            details: Some(err.to_string()),
        }
    }
}

impl Error {
    pub fn new(kind: ErrorKind, code: ErrorCode, details: Option<String>) -> Self {
        Error {
            kind,
            code,
            line: None,
            details,
        }
    }

    pub fn at_line(kind: ErrorKind, code: ErrorCode, line: usize, details: Option<String>) -> Self {
        Error {
            kind,
            code,
            line: Some(line),
            details,
        }
    }

    pub fn get_details(&self) -> Option<String> {
        self.details.clone()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self.kind {
            ErrorKind::EndOfInput => "EndOfInput",
            ErrorKind::Format => "FormatError",
            ErrorKind::Structure => "StructureError",
            ErrorKind::UnknownVariant => "UnknownVariantError",
            ErrorKind::Io => "IoError",
        };
        write!(f, "{}{{{}", kind, self.code)?;
        if let Some(line) = self.line {
            write!(f, " at line {line}")?;
        }
        match self.details {
            Some(ref details) => write!(f, ": {details}}}"),
            None => write!(f, "}}"),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

#[macro_export]
macro_rules! eof_err(
    ($line:expr, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::at_line(
            ErrorKind::EndOfInput,
            ErrorCode::UnexpectedEof,
            $line,
            Some($str),
        ))
    }}
);

#[macro_export]
macro_rules! format_err(
    ($code:tt, $line:expr, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::at_line(
            ErrorKind::Format,
            ErrorCode::$code,
            $line,
            Some($str),
        ))
    }}
);

#[macro_export]
macro_rules! structure_err(
    ($code:tt, $line:expr, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::at_line(
            ErrorKind::Structure,
            ErrorCode::$code,
            $line,
            Some($str),
        ))
    }}
);

#[macro_export]
macro_rules! variant_err(
    ($code:tt, $line:expr, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::at_line(
            ErrorKind::UnknownVariant,
            ErrorCode::$code,
            $line,
            Some($str),
        ))
    }}
);

#[test]
fn test_error_display() {
    let err = Error::at_line(
        ErrorKind::Structure,
        ErrorCode::MissingSectionTerminator,
        42,
        Some("failed to find zone section termination".to_owned()),
    );
    assert_eq!(
        "StructureError{missing_section_terminator at line 42: failed to find zone section termination}",
        format!("{err}")
    );

    let err = Error::new(ErrorKind::Format, ErrorCode::ExpectedNumber, None);
    assert_eq!("FormatError{expected_number}", format!("{err}"));
}

#[test]
fn test_error_macros() {
    let result: Result<()> = structure_err!(InitialConditionOrder, 7, "zone 2".to_owned());
    let err = result.unwrap_err();
    assert_eq!(ErrorKind::Structure, err.kind);
    assert_eq!(ErrorCode::InitialConditionOrder, err.code);
    assert_eq!(Some(7), err.line);
    assert_eq!(Some("zone 2".to_owned()), err.get_details());

    let result: Result<()> = variant_err!(UnknownControlNode, 3, "bogus".to_owned());
    assert_eq!(ErrorKind::UnknownVariant, result.unwrap_err().kind);

    let result: Result<()> = eof_err!(9, "expected a token".to_owned());
    assert_eq!(ErrorCode::UnexpectedEof, result.unwrap_err().code);
}

#[test]
fn test_io_conversion() {
    let err: Error = io::Error::new(io::ErrorKind::NotFound, "no such file").into();
    assert_eq!(ErrorKind::Io, err.kind);
    assert_eq!(None, err.line);
}

#[test]
fn test_error_code_names() {
    use ErrorCode::*;
    let codes = [
        (UnexpectedEof, "unexpected_eof"),
        (ExpectedUnsigned, "expected_unsigned"),
        (MissingDocumentTerminator, "missing_document_terminator"),
        (InitialConditionCount, "initial_condition_count"),
        (UnknownAirflowElement, "unknown_airflow_element"),
        (Io, "io"),
    ];
    for (code, name) in codes {
        assert_eq!(name, code.to_string());
    }
}

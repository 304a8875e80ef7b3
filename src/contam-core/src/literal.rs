// Copyright 2021 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::common::{Error, ErrorCode, ErrorKind, Result};

lazy_static! {
    static ref NUMBER_RE: Regex = Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").unwrap();
}

/// Returns true if `text` is a plain decimal literal, optionally signed and
/// with an exponent.  Spellings like `inf` or `NaN` that Rust's float parser
/// would accept are rejected.
pub fn is_decimal(text: &str) -> bool {
    NUMBER_RE.is_match(text)
}

/// A decimal number that remembers the exact text it was read from.
///
/// Writing a literal back out reproduces its original spelling (`1.50000`
/// stays `1.50000`), while comparisons and arithmetic go through the
/// numeric value.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScalarLiteral {
    text: String,
    value: f64,
}

impl ScalarLiteral {
    pub fn new(text: &str) -> Result<Self> {
        if !is_decimal(text) {
            return Err(Error::new(
                ErrorKind::Format,
                ErrorCode::ExpectedNumber,
                Some(format!("'{text}' is not a decimal number")),
            ));
        }
        let value = f64::from_str(text).map_err(|err| {
            Error::new(
                ErrorKind::Format,
                ErrorCode::ExpectedNumber,
                Some(format!("'{text}': {err}")),
            )
        })?;
        Ok(ScalarLiteral {
            text: text.to_owned(),
            value,
        })
    }

    /// Formats `value` with the shortest text that parses back to the same
    /// double.  Non-finite values have no PRJ spelling and are rejected.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::new(
                ErrorKind::Format,
                ErrorCode::ExpectedNumber,
                Some(format!("{value} has no decimal representation")),
            ));
        }
        let mut text = format!("{value}");
        if !text.contains(['.', 'e', 'E']) {
            text.push_str(".0");
        }
        Ok(ScalarLiteral { text, value })
    }

    pub fn to_double(&self) -> f64 {
        self.value
    }

    pub fn to_text(&self) -> &str {
        &self.text
    }

    /// Replaces the stored text if `text` is a valid number, leaving the
    /// literal untouched otherwise.
    pub fn assign_if_valid(&mut self, text: &str) -> bool {
        match ScalarLiteral::new(text) {
            Ok(literal) => {
                *self = literal;
                true
            }
            Err(_) => false,
        }
    }

    /// Like `assign_if_valid`, for a double.
    pub fn assign_f64(&mut self, value: f64) -> bool {
        match ScalarLiteral::from_f64(value) {
            Ok(literal) => {
                *self = literal;
                true
            }
            Err(_) => false,
        }
    }
}

impl Default for ScalarLiteral {
    fn default() -> Self {
        ScalarLiteral {
            text: "0.0".to_owned(),
            value: 0.0,
        }
    }
}

impl FromStr for ScalarLiteral {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ScalarLiteral::new(s)
    }
}

impl TryFrom<String> for ScalarLiteral {
    type Error = Error;

    fn try_from(text: String) -> Result<Self> {
        ScalarLiteral::new(&text)
    }
}

impl From<ScalarLiteral> for String {
    fn from(literal: ScalarLiteral) -> Self {
        literal.text
    }
}

impl fmt::Display for ScalarLiteral {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq for ScalarLiteral {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialOrd for ScalarLiteral {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

// Copyright 2021 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

#![forbid(unsafe_code)]

pub mod common;
mod literal;
mod results;

pub use common::{Error, ErrorCode, ErrorKind, Result};

pub use literal::{ScalarLiteral, is_decimal};

pub use results::{PathFlowResults, TimeSeries};

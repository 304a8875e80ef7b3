// Copyright 2021 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

#![forbid(unsafe_code)]

use std::io::BufRead;

pub use contam_core::{Error, ErrorCode, ErrorKind, PathFlowResults, Result, TimeSeries};

#[cfg(feature = "file_io")]
mod csv_results;
pub mod prj;

#[cfg(feature = "file_io")]
pub use csv_results::CsvPathFlows;

pub use prj::IndexModel;

pub fn open_prj(reader: &mut dyn BufRead) -> Result<IndexModel> {
    IndexModel::from_reader(reader)
}

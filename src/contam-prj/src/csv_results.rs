// Copyright 2021 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::str::FromStr;

use contam_core::{Error, ErrorCode, ErrorKind, PathFlowResults, Result, TimeSeries, format_err};
use log::{info, warn};

/// Path flow results loaded from a delimited text file.  The first column
/// holds sample times; every other column is headed by the number of the
/// airflow path whose flows it holds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CsvPathFlows {
    times: Vec<f64>,
    flows: HashMap<i32, Vec<f64>>,
}

fn csv_error(err: csv::Error) -> Error {
    Error::new(ErrorKind::Io, ErrorCode::Io, Some(err.to_string()))
}

impl CsvPathFlows {
    pub fn from_path(path: &Path, delimiter: u8) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .from_path(path)
            .map_err(csv_error)?;
        let flows = CsvPathFlows::load(reader)?;
        info!(
            "loaded {} samples for {} paths from {}",
            flows.times.len(),
            flows.flows.len(),
            path.display()
        );
        Ok(flows)
    }

    pub fn from_reader(input: impl io::Read, delimiter: u8) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .from_reader(input);
        CsvPathFlows::load(reader)
    }

    fn load<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let header = reader.headers().map_err(csv_error)?.clone();
        // column index -> path number
        let mut columns: Vec<(usize, i32)> = vec![];
        for (i, name) in header.iter().enumerate().skip(1) {
            match i32::from_str(name.trim()) {
                Ok(nr) => columns.push((i, nr)),
                Err(_) => warn!("ignoring results column '{name}': not a path number"),
            }
        }

        let mut times = vec![];
        let mut flows: HashMap<i32, Vec<f64>> =
            columns.iter().map(|(_, nr)| (*nr, vec![])).collect();
        for result in reader.records() {
            let record = result.map_err(csv_error)?;
            let line = record.position().map_or(0, |pos| pos.line() as usize);
            let value = |i: usize| -> Result<f64> {
                let field = record.get(i).unwrap_or("").trim();
                match f64::from_str(field) {
                    Ok(n) => Ok(n),
                    Err(_) => format_err!(
                        ExpectedNumber,
                        line,
                        format!("failed to read '{field}' in column {} as a number", i + 1)
                    ),
                }
            };
            times.push(value(0)?);
            for (i, nr) in columns.iter() {
                let n = value(*i)?;
                if let Some(series) = flows.get_mut(nr) {
                    series.push(n);
                }
            }
        }

        Ok(CsvPathFlows { times, flows })
    }

    /// The path numbers present, in ascending order.
    pub fn path_numbers(&self) -> Vec<i32> {
        let mut numbers: Vec<i32> = self.flows.keys().copied().collect();
        numbers.sort_unstable();
        numbers
    }
}

impl PathFlowResults for CsvPathFlows {
    fn path_flow(&self, nr: i32) -> Option<TimeSeries> {
        self.flows
            .get(&nr)
            .map(|values| TimeSeries::new(self.times.clone(), values.clone()))
    }

    fn date_times(&self) -> Vec<f64> {
        self.times.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_columns() {
        let text = "time,1,2,note\n0,0.5,-0.25,x\n3600,1.5,0.75,y\n";
        let results = CsvPathFlows::from_reader(text.as_bytes(), b',').unwrap();
        assert_eq!(vec![1, 2], results.path_numbers());
        assert_eq!(vec![0.0, 3600.0], results.date_times());
        let flow = results.path_flow(2).unwrap();
        assert_eq!(vec![-0.25, 0.75], flow.values);
        assert!(results.path_flow(3).is_none());
    }

    #[test]
    fn test_tab_delimited() {
        let text = "t\t7\n0\t 1e-3\n60\t-2\n";
        let results = CsvPathFlows::from_reader(text.as_bytes(), b'\t').unwrap();
        assert_eq!(vec![0.001, -2.0], results.path_flow(7).unwrap().values);
    }

    #[test]
    fn test_bad_number() {
        let text = "time,1\n0,1\n60,oops\n";
        let err = CsvPathFlows::from_reader(text.as_bytes(), b',').unwrap_err();
        assert_eq!(ErrorKind::Format, err.kind);
        assert_eq!(ErrorCode::ExpectedNumber, err.code);
        assert_eq!(Some(3), err.line);
    }
}

// Copyright 2021 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use serde::{Deserialize, Serialize};

use crate::prj::Result;
use crate::prj::reader::Reader;
use crate::prj::section::{Record, write_fields};
use crate::prj::subobjects::{WindPressurePoint, read_records, write_records};

/// Wind pressure coefficient as a function of wind azimuth.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WindPressureProfile {
    pub nr: i32,
    /// 1 linear, 2 cubic spline, 3 trigonometric
    pub kind: i32,
    pub name: String,
    pub desc: String,
    pub coeffs: Vec<WindPressurePoint>,
}

impl Record for WindPressureProfile {
    fn read(&mut self, reader: &mut Reader) -> Result<()> {
        self.nr = reader.read_int()?;
        let npts = reader.read_count()?;
        self.kind = reader.read_int()?;
        self.name = reader.read_token()?;
        self.desc = reader.read_whole_line()?;
        self.coeffs = read_records(reader, npts)?;
        Ok(())
    }

    fn write(&self, out: &mut String) {
        write_fields!(out; self.nr, self.coeffs.len(), self.kind, self.name);
        out.push_str(&self.desc);
        out.push('\n');
        write_records(out, &self.coeffs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_layout() {
        let text = "1 4 2 wall\nlow-rise wall\n0 0.6\n90 -0.3\n180 -0.65\n270 -0.3\n";
        let mut reader = Reader::from_text(text);
        let mut profile = WindPressureProfile::default();
        profile.read(&mut reader).unwrap();
        assert_eq!(2, profile.kind);
        assert_eq!(4, profile.coeffs.len());
        assert_eq!("-0.65", profile.coeffs[2].coef.to_text());

        let mut out = String::new();
        profile.write(&mut out);
        assert_eq!(text, out);
    }
}

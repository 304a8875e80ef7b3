// Copyright 2021 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use contam_core::ScalarLiteral;
use serde::{Deserialize, Serialize};

use crate::prj::Result;
use crate::prj::reader::Reader;
use crate::prj::section::{Record, write_fields};

/// A contaminant species.  Only species with `sflag` set are simulated and
/// appear in the model's contaminant list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub nr: i32,
    pub sflag: i32,
    pub ntflag: i32,
    pub molwt: ScalarLiteral,
    pub mdiam: ScalarLiteral,
    pub edens: ScalarLiteral,
    pub decay: ScalarLiteral,
    pub dm: ScalarLiteral,
    pub ccdef: ScalarLiteral,
    pub cp: ScalarLiteral,
    pub ucc: i32,
    pub umd: i32,
    pub ued: i32,
    pub udm: i32,
    pub ucp: i32,
    pub name: String,
    pub desc: String,
}

impl Species {
    pub fn is_simulated(&self) -> bool {
        self.sflag != 0
    }

    pub fn is_trace(&self) -> bool {
        self.ntflag != 0
    }
}

impl Record for Species {
    fn read(&mut self, reader: &mut Reader) -> Result<()> {
        self.nr = reader.read_int()?;
        self.sflag = reader.read_int()?;
        self.ntflag = reader.read_int()?;
        self.molwt = reader.read_literal()?;
        self.mdiam = reader.read_literal()?;
        self.edens = reader.read_literal()?;
        self.decay = reader.read_literal()?;
        self.dm = reader.read_literal()?;
        self.ccdef = reader.read_literal()?;
        self.cp = reader.read_literal()?;
        self.ucc = reader.read_int()?;
        self.umd = reader.read_int()?;
        self.ued = reader.read_int()?;
        self.udm = reader.read_int()?;
        self.ucp = reader.read_int()?;
        self.name = reader.read_token()?;
        self.desc = reader.read_whole_line()?;
        Ok(())
    }

    fn write(&self, out: &mut String) {
        write_fields!(out;
            self.nr, self.sflag, self.ntflag, self.molwt, self.mdiam, self.edens,
            self.decay, self.dm, self.ccdef, self.cp, self.ucc, self.umd, self.ued,
            self.udm, self.ucp, self.name,
        );
        out.push_str(&self.desc);
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CO2: &str = "1 1 0 44.0098 2e-07 1800 0 2e-05 6.08e-04 1000 0 0 0 0 0 CO2\ncarbon dioxide tracer\n";

    #[test]
    fn test_species_layout() {
        let mut reader = Reader::from_text(CO2);
        let mut species = Species::default();
        species.read(&mut reader).unwrap();
        assert_eq!(1, species.nr);
        assert!(species.is_simulated());
        assert!(!species.is_trace());
        assert_eq!("44.0098", species.molwt.to_text());
        assert_eq!("CO2", species.name);
        assert_eq!("carbon dioxide tracer", species.desc);

        let mut out = String::new();
        species.write(&mut out);
        assert_eq!(CO2, out);
    }

    #[test]
    fn test_empty_description() {
        let text = "2 0 1 18 0 0 0 0 0 0 0 0 0 0 0 H2O\n\n";
        let mut reader = Reader::from_text(text);
        let mut species = Species::default();
        species.read(&mut reader).unwrap();
        assert_eq!("", species.desc);
        let mut out = String::new();
        species.write(&mut out);
        assert_eq!(text, out);
    }
}

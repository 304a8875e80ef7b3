// Copyright 2021 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use contam_core::ScalarLiteral;
use serde::{Deserialize, Serialize};

use crate::prj::Result;
use crate::prj::reader::Reader;
use crate::prj::section::{Record, write_fields};
use crate::prj::subobjects::{Icon, read_records, write_records};

/// A building level (floor) and the sketchpad icons drawn on it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub nr: i32,
    pub refht: ScalarLiteral,
    pub delht: ScalarLiteral,
    pub u_rfht: i32,
    pub u_dlht: i32,
    pub name: String,
    pub icons: Vec<Icon>,
}

impl Record for Level {
    fn read(&mut self, reader: &mut Reader) -> Result<()> {
        self.nr = reader.read_int()?;
        self.refht = reader.read_literal()?;
        self.delht = reader.read_literal()?;
        let nicon = reader.read_count()?;
        self.u_rfht = reader.read_int()?;
        self.u_dlht = reader.read_int()?;
        self.name = reader.read_token()?;
        self.icons = read_records(reader, nicon)?;
        Ok(())
    }

    fn write(&self, out: &mut String) {
        write_fields!(out;
            self.nr, self.refht, self.delht, self.icons.len(), self.u_rfht, self.u_dlht,
            self.name,
        );
        write_records(out, &self.icons);
    }
}

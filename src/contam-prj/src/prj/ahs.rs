// Copyright 2021 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use serde::{Deserialize, Serialize};

use crate::prj::Result;
use crate::prj::reader::Reader;
use crate::prj::section::{Record, write_fields};

/// A simple air handling system: its return and supply zones and its
/// recirculation, outdoor air and exhaust paths, all by 1-based number.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Ahs {
    pub nr: i32,
    pub zone_r: i32,
    pub zone_s: i32,
    pub path_r: i32,
    pub path_s: i32,
    pub path_x: i32,
    pub name: String,
    pub desc: String,
}

impl Record for Ahs {
    fn read(&mut self, reader: &mut Reader) -> Result<()> {
        self.nr = reader.read_int()?;
        self.zone_r = reader.read_int()?;
        self.zone_s = reader.read_int()?;
        self.path_r = reader.read_int()?;
        self.path_s = reader.read_int()?;
        self.path_x = reader.read_int()?;
        self.name = reader.read_token()?;
        self.desc = reader.read_whole_line()?;
        Ok(())
    }

    fn write(&self, out: &mut String) {
        write_fields!(out;
            self.nr, self.zone_r, self.zone_s, self.path_r, self.path_s, self.path_x,
            self.name,
        );
        out.push_str(&self.desc);
        out.push('\n');
    }
}

// Copyright 2021 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use contam_core::ScalarLiteral;
use serde::{Deserialize, Serialize};

use crate::prj::Result;
use crate::prj::reader::Reader;
use crate::prj::section::{Record, write_fields};
use crate::prj::subobjects::literal;

pub mod flags {
    /// pressure is computed rather than fixed
    pub const VAR_P: u32 = 0x1;
    /// concentrations are computed
    pub const VAR_C: u32 = 0x2;
    /// temperature is computed
    pub const VAR_T: u32 = 0x4;
    /// part of a duct system
    pub const SYS_N: u32 = 0x8;
    pub const UNCZN: u32 = 0x10;
    pub const CFDZN: u32 = 0x20;
}

/// Marks the start of the one-dimensional zone fields.
const AXIAL_MARKER: &str = "1D:";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub nr: i32,
    pub flags: u32,
    /// week schedule
    pub ps: i32,
    /// control node
    pub pc: i32,
    /// kinetic reaction
    pub pk: i32,
    /// level
    pub pl: i32,
    pub rel_ht: ScalarLiteral,
    pub vol: ScalarLiteral,
    pub t0: ScalarLiteral,
    pub p0: ScalarLiteral,
    pub name: String,
    pub color: i32,
    pub u_ht: i32,
    pub u_v: i32,
    pub u_t: i32,
    pub u_p: i32,
    pub cdaxis: i32,
    pub cfd: i32,
    pub cfdname: String,
    pub x1: ScalarLiteral,
    pub y1: ScalarLiteral,
    pub h1: ScalarLiteral,
    pub x2: ScalarLiteral,
    pub y2: ScalarLiteral,
    pub h2: ScalarLiteral,
    pub celldx: ScalarLiteral,
    pub axial_d: ScalarLiteral,
    pub u_ad: i32,
    pub u_l: i32,
    /// Initial concentration of each simulated contaminant.  Stored in
    /// the model's initial-condition block, not in the zone record.
    pub ic: Vec<ScalarLiteral>,
}

impl Default for Zone {
    fn default() -> Self {
        Zone {
            nr: 0,
            flags: flags::VAR_P | flags::VAR_C,
            ps: 0,
            pc: 0,
            pk: 0,
            pl: 0,
            rel_ht: ScalarLiteral::default(),
            vol: ScalarLiteral::default(),
            t0: literal("293.15"),
            p0: ScalarLiteral::default(),
            name: "zone".to_owned(),
            color: -1,
            u_ht: 0,
            u_v: 0,
            u_t: 2,
            u_p: 0,
            cdaxis: 0,
            cfd: 0,
            cfdname: "zone.cfd".to_owned(),
            x1: ScalarLiteral::default(),
            y1: ScalarLiteral::default(),
            h1: ScalarLiteral::default(),
            x2: ScalarLiteral::default(),
            y2: ScalarLiteral::default(),
            h2: ScalarLiteral::default(),
            celldx: ScalarLiteral::default(),
            axial_d: ScalarLiteral::default(),
            u_ad: 0,
            u_l: 0,
            ic: vec![],
        }
    }
}

impl Zone {
    pub fn variable_pressure(&self) -> bool {
        self.flags & flags::VAR_P != 0
    }

    pub fn variable_contaminants(&self) -> bool {
        self.flags & flags::VAR_C != 0
    }

    pub fn variable_temperature(&self) -> bool {
        self.flags & flags::VAR_T != 0
    }

    pub fn is_system(&self) -> bool {
        self.flags & flags::SYS_N != 0
    }

    pub fn is_unconditioned(&self) -> bool {
        self.flags & flags::UNCZN != 0
    }

    pub fn is_cfd(&self) -> bool {
        self.flags & flags::CFDZN != 0
    }

    pub fn set_flag(&mut self, flag: u32, on: bool) {
        if on {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }
}

impl Record for Zone {
    fn read(&mut self, reader: &mut Reader) -> Result<()> {
        self.nr = reader.read_int()?;
        self.flags = reader.read_uint()?;
        self.ps = reader.read_int()?;
        self.pc = reader.read_int()?;
        self.pk = reader.read_int()?;
        self.pl = reader.read_int()?;
        self.rel_ht = reader.read_literal()?;
        self.vol = reader.read_literal()?;
        self.t0 = reader.read_literal()?;
        self.p0 = reader.read_literal()?;
        self.name = reader.read_token()?;
        self.color = reader.read_int()?;
        self.u_ht = reader.read_int()?;
        self.u_v = reader.read_int()?;
        self.u_t = reader.read_int()?;
        self.u_p = reader.read_int()?;
        self.cdaxis = reader.read_int()?;
        self.cfd = reader.read_int()?;
        if self.cfd != 0 {
            self.cfdname = reader.read_token()?;
        } else if self.cdaxis != 0 {
            // the marker carries no data
            reader.read_token()?;
            self.x1 = reader.read_literal()?;
            self.y1 = reader.read_literal()?;
            self.h1 = reader.read_literal()?;
            self.x2 = reader.read_literal()?;
            self.y2 = reader.read_literal()?;
            self.h2 = reader.read_literal()?;
            self.celldx = reader.read_literal()?;
            self.axial_d = reader.read_literal()?;
            self.u_ad = reader.read_int()?;
            self.u_l = reader.read_int()?;
        }
        Ok(())
    }

    fn write(&self, out: &mut String) {
        write_fields!(out;
            self.nr, self.flags, self.ps, self.pc, self.pk, self.pl,
            self.rel_ht, self.vol, self.t0, self.p0, self.name, self.color,
            self.u_ht, self.u_v, self.u_t, self.u_p, self.cdaxis, self.cfd;
            ..
        );
        if self.cfd != 0 {
            write_fields!(out; ..; self.cfdname);
        } else if self.cdaxis != 0 {
            write_fields!(out; ..;
                AXIAL_MARKER, self.x1, self.y1, self.h1, self.x2, self.y2, self.h2,
                self.celldx, self.axial_d, self.u_ad, self.u_l,
            );
        } else {
            out.push('\n');
        }
    }
}

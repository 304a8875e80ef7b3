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
    /// exposed to wind
    pub const WIND: u32 = 0x1;
    /// pressure from a WPC file
    pub const WPC_P: u32 = 0x2;
    /// concentration from a WPC file
    pub const WPC_C: u32 = 0x4;
    /// AHS supply path
    pub const AHS_S: u32 = 0x8;
    /// AHS return path
    pub const AHS_R: u32 = 0x10;
    /// AHS outdoor air path
    pub const AHS_O: u32 = 0x20;
    /// AHS exhaust path
    pub const AHS_X: u32 = 0x40;
    /// pressure limits apply
    pub const LIM_P: u32 = 0x80;
    /// flow limits apply
    pub const LIM_F: u32 = 0x100;
    pub const FAN_F: u32 = 0x200;
}

/// Zone number used for the outdoors in `pzn`/`pzm`.
pub const AMBIENT: i32 = -1;

/// A flow path between zone `pzn` and zone `pzm`, either of which may be
/// the ambient.  Positive flow runs from `pzn` to `pzm`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AirflowPath {
    pub nr: i32,
    pub flags: u32,
    pub pzn: i32,
    pub pzm: i32,
    /// airflow element
    pub pe: i32,
    /// filter
    pub pf: i32,
    /// wind pressure profile
    pub pw: i32,
    /// simple AHS
    pub pa: i32,
    /// schedule
    pub ps: i32,
    /// control node
    pub pc: i32,
    /// level
    pub pld: i32,
    pub x: ScalarLiteral,
    pub y: ScalarLiteral,
    pub rel_ht: ScalarLiteral,
    pub mult: ScalarLiteral,
    pub w_pset: ScalarLiteral,
    pub w_pmod: ScalarLiteral,
    pub wazm: ScalarLiteral,
    pub fahs: ScalarLiteral,
    pub xmax: ScalarLiteral,
    pub xmin: ScalarLiteral,
    pub icon: u32,
    pub dir: u32,
    pub u_ht: i32,
    pub u_xy: i32,
    pub u_dp: i32,
    pub u_f: i32,
    pub cfd: i32,
    pub cfd_name: String,
    pub cfd_ptype: i32,
    pub cfd_btype: i32,
    pub cfd_capp: i32,
}

impl Default for AirflowPath {
    fn default() -> Self {
        AirflowPath {
            nr: 0,
            flags: 0,
            pzn: AMBIENT,
            pzm: AMBIENT,
            pe: 0,
            pf: 0,
            pw: 0,
            pa: 0,
            ps: 0,
            pc: 0,
            pld: 0,
            x: ScalarLiteral::default(),
            y: ScalarLiteral::default(),
            rel_ht: ScalarLiteral::default(),
            mult: literal("1.0"),
            w_pset: ScalarLiteral::default(),
            w_pmod: ScalarLiteral::default(),
            wazm: ScalarLiteral::default(),
            fahs: ScalarLiteral::default(),
            xmax: ScalarLiteral::default(),
            xmin: ScalarLiteral::default(),
            icon: 0,
            dir: 0,
            u_ht: 0,
            u_xy: 0,
            u_dp: 0,
            u_f: 0,
            cfd: 0,
            cfd_name: "path.cfd".to_owned(),
            cfd_ptype: 0,
            cfd_btype: 0,
            cfd_capp: 0,
        }
    }
}

impl AirflowPath {
    pub fn is_wind(&self) -> bool {
        self.flags & flags::WIND != 0
    }

    pub fn is_ahs_path(&self) -> bool {
        self.flags & (flags::AHS_S | flags::AHS_R | flags::AHS_O | flags::AHS_X) != 0
    }

    pub fn has_fan(&self) -> bool {
        self.flags & flags::FAN_F != 0
    }

    pub fn set_flag(&mut self, flag: u32, on: bool) {
        if on {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }

    /// True when one end of the path is the ambient.
    pub fn is_exterior(&self) -> bool {
        (self.pzn == AMBIENT) != (self.pzm == AMBIENT)
    }
}

impl Record for AirflowPath {
    fn read(&mut self, reader: &mut Reader) -> Result<()> {
        self.nr = reader.read_int()?;
        self.flags = reader.read_uint()?;
        self.pzn = reader.read_int()?;
        self.pzm = reader.read_int()?;
        self.pe = reader.read_int()?;
        self.pf = reader.read_int()?;
        self.pw = reader.read_int()?;
        self.pa = reader.read_int()?;
        self.ps = reader.read_int()?;
        self.pc = reader.read_int()?;
        self.pld = reader.read_int()?;
        self.x = reader.read_literal()?;
        self.y = reader.read_literal()?;
        self.rel_ht = reader.read_literal()?;
        self.mult = reader.read_literal()?;
        self.w_pset = reader.read_literal()?;
        self.w_pmod = reader.read_literal()?;
        self.wazm = reader.read_literal()?;
        self.fahs = reader.read_literal()?;
        self.xmax = reader.read_literal()?;
        self.xmin = reader.read_literal()?;
        self.icon = reader.read_uint()?;
        self.dir = reader.read_uint()?;
        self.u_ht = reader.read_int()?;
        self.u_xy = reader.read_int()?;
        self.u_dp = reader.read_int()?;
        self.u_f = reader.read_int()?;
        self.cfd = reader.read_int()?;
        if self.cfd != 0 {
            self.cfd_name = reader.read_token()?;
            self.cfd_ptype = reader.read_int()?;
            self.cfd_btype = reader.read_int()?;
            self.cfd_capp = reader.read_int()?;
        }
        Ok(())
    }

    fn write(&self, out: &mut String) {
        write_fields!(out;
            self.nr, self.flags, self.pzn, self.pzm, self.pe, self.pf, self.pw, self.pa,
            self.ps, self.pc, self.pld, self.x, self.y, self.rel_ht, self.mult, self.w_pset,
            self.w_pmod, self.wazm, self.fahs, self.xmax, self.xmin, self.icon, self.dir,
            self.u_ht, self.u_xy, self.u_dp, self.u_f, self.cfd;
            ..
        );
        if self.cfd != 0 {
            write_fields!(out; ..; self.cfd_name, self.cfd_ptype, self.cfd_btype, self.cfd_capp);
        } else {
            out.push('\n');
        }
    }
}

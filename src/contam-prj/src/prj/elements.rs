// Copyright 2021 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Airflow elements: the flow models (orifices, leaks, cracks, doors, fans
//! and so on) that airflow paths refer to by number.
//!
//! Every element shares a header of `nr icon dataType name` followed by a
//! free-text description line.  The `dataType` tag selects the layout of
//! the remaining fields; several tags can share one layout (the three
//! `plr_leak*` tags, for instance).  The tag is kept on the element as read
//! and written back verbatim, it is never derived from the details.

use std::collections::HashMap;
use std::fmt::Display;

use contam_core::{ScalarLiteral, variant_err};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::prj::Result;
use crate::prj::reader::Reader;
use crate::prj::section::{Element, write_fields, write_padded};
use crate::prj::subobjects::{
    AirflowSubelement, FanDataPoint, XyDataPoint, read_records, write_records,
};

trait Field: Sized + Display {
    fn read_field(reader: &mut Reader) -> Result<Self>;
}

impl Field for i32 {
    fn read_field(reader: &mut Reader) -> Result<Self> {
        reader.read_int()
    }
}

impl Field for ScalarLiteral {
    fn read_field(reader: &mut Reader) -> Result<Self> {
        reader.read_literal()
    }
}

/// Declares a details struct whose fields are read in declaration order
/// and written on a single line.
macro_rules! element_details {
    (
        $(#[$meta:meta])*
        $name:ident { $($field:ident: $ty:ty),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            $(pub $field: $ty),+
        }

        impl $name {
            fn read_details(reader: &mut Reader) -> Result<Self> {
                Ok($name {
                    $($field: <$ty as Field>::read_field(reader)?),+
                })
            }

            fn write_details(&self, out: &mut String) {
                write_fields!(out; $(self.$field),+);
            }
        }
    };
}

element_details! {
    /// Powerlaw orifice.
    PlrOrf {
        lam: ScalarLiteral,
        turb: ScalarLiteral,
        expt: ScalarLiteral,
        area: ScalarLiteral,
        dia: ScalarLiteral,
        coef: ScalarLiteral,
        re: ScalarLiteral,
        u_a: i32,
        u_d: i32,
    }
}

element_details! {
    /// Powerlaw leakage area, shared by `plr_leak1` (per item),
    /// `plr_leak2` (per unit length) and `plr_leak3` (per unit area).
    PlrLeak {
        lam: ScalarLiteral,
        turb: ScalarLiteral,
        expt: ScalarLiteral,
        coef: ScalarLiteral,
        pres: ScalarLiteral,
        area1: ScalarLiteral,
        area2: ScalarLiteral,
        area3: ScalarLiteral,
        u_a1: i32,
        u_a2: i32,
        u_a3: i32,
        u_dp: i32,
    }
}

element_details! {
    /// Powerlaw connection (ASCOS).
    PlrConn {
        lam: ScalarLiteral,
        turb: ScalarLiteral,
        expt: ScalarLiteral,
        area: ScalarLiteral,
        coef: ScalarLiteral,
        u_a: i32,
    }
}

element_details! {
    /// Bare powerlaw coefficients, for `plr_qcn` and `plr_fcn`.
    PlrGeneral {
        lam: ScalarLiteral,
        turb: ScalarLiteral,
        expt: ScalarLiteral,
    }
}

element_details! {
    /// Powerlaw fitted to one test point.
    PlrTest1 {
        lam: ScalarLiteral,
        turb: ScalarLiteral,
        expt: ScalarLiteral,
        dp: ScalarLiteral,
        flow: ScalarLiteral,
        u_p: i32,
        u_f: i32,
    }
}

element_details! {
    /// Powerlaw fitted to two test points.
    PlrTest2 {
        lam: ScalarLiteral,
        turb: ScalarLiteral,
        expt: ScalarLiteral,
        dp1: ScalarLiteral,
        f1: ScalarLiteral,
        dp2: ScalarLiteral,
        f2: ScalarLiteral,
        u_p1: i32,
        u_f1: i32,
        u_p2: i32,
        u_f2: i32,
    }
}

element_details! {
    PlrCrack {
        lam: ScalarLiteral,
        turb: ScalarLiteral,
        expt: ScalarLiteral,
        length: ScalarLiteral,
        width: ScalarLiteral,
        u_l: i32,
        u_w: i32,
    }
}

element_details! {
    /// Stairwell.
    PlrStair {
        lam: ScalarLiteral,
        turb: ScalarLiteral,
        expt: ScalarLiteral,
        ht: ScalarLiteral,
        area: ScalarLiteral,
        peo: ScalarLiteral,
        tread: i32,
        u_a: i32,
        u_d: i32,
    }
}

element_details! {
    PlrShaft {
        lam: ScalarLiteral,
        turb: ScalarLiteral,
        expt: ScalarLiteral,
        ht: ScalarLiteral,
        area: ScalarLiteral,
        perim: ScalarLiteral,
        rough: ScalarLiteral,
        u_a: i32,
        u_d: i32,
        u_p: i32,
        u_r: i32,
    }
}

element_details! {
    /// Backdraft damper, for `plr_bdq` and `plr_bdf`.  `cp`/`xp` apply to
    /// positive flow, `cn`/`xn` to negative flow.
    PlrBackDamper {
        lam: ScalarLiteral,
        cp: ScalarLiteral,
        xp: ScalarLiteral,
        cn: ScalarLiteral,
        xn: ScalarLiteral,
    }
}

element_details! {
    /// Quadratic `dP = a*F + b*F^2`, for `qfr_qab` and `qfr_fab`.
    QfrQuadratic {
        a: ScalarLiteral,
        b: ScalarLiteral,
    }
}

element_details! {
    QfrCrack {
        a: ScalarLiteral,
        b: ScalarLiteral,
        length: ScalarLiteral,
        width: ScalarLiteral,
        depth: ScalarLiteral,
        n_b: i32,
        u_l: i32,
        u_w: i32,
        u_d: i32,
    }
}

element_details! {
    QfrTest2 {
        a: ScalarLiteral,
        b: ScalarLiteral,
        dp1: ScalarLiteral,
        f1: ScalarLiteral,
        dp2: ScalarLiteral,
        f2: ScalarLiteral,
        u_p1: i32,
        u_f1: i32,
        u_p2: i32,
        u_f2: i32,
    }
}

element_details! {
    /// Two-way flow through a large opening.
    AfeDor {
        lam: ScalarLiteral,
        turb: ScalarLiteral,
        expt: ScalarLiteral,
        dtmin: ScalarLiteral,
        ht: ScalarLiteral,
        wd: ScalarLiteral,
        cd: ScalarLiteral,
        u_t: i32,
        u_h: i32,
        u_w: i32,
    }
}

element_details! {
    /// Two-way flow through a doorway split into two openings.
    DrPl2 {
        lam: ScalarLiteral,
        turb: ScalarLiteral,
        expt: ScalarLiteral,
        dh: ScalarLiteral,
        ht: ScalarLiteral,
        wd: ScalarLiteral,
        cd: ScalarLiteral,
        u_h: i32,
        u_w: i32,
    }
}

element_details! {
    /// Constant flow, by mass (`fan_cmf`) or by volume (`fan_cvf`).
    AfeFlow {
        flow: ScalarLiteral,
        u_f: i32,
    }
}

/// Fan with a performance curve.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AfeFan {
    pub lam: ScalarLiteral,
    pub turb: ScalarLiteral,
    pub expt: ScalarLiteral,
    pub rdens: ScalarLiteral,
    pub fdf: ScalarLiteral,
    pub sop: ScalarLiteral,
    pub off: ScalarLiteral,
    /// cubic fan performance polynomial
    pub fpc: [ScalarLiteral; 4],
    pub sarea: ScalarLiteral,
    pub u_sa: i32,
    pub data: Vec<FanDataPoint>,
}

impl AfeFan {
    fn read_details(reader: &mut Reader) -> Result<Self> {
        let mut fan = AfeFan {
            lam: reader.read_literal()?,
            turb: reader.read_literal()?,
            expt: reader.read_literal()?,
            rdens: reader.read_literal()?,
            fdf: reader.read_literal()?,
            sop: reader.read_literal()?,
            off: reader.read_literal()?,
            ..Default::default()
        };
        for coef in fan.fpc.iter_mut() {
            *coef = reader.read_literal()?;
        }
        let npts = reader.read_count()?;
        fan.sarea = reader.read_literal()?;
        fan.u_sa = reader.read_int()?;
        fan.data = read_records(reader, npts)?;
        Ok(fan)
    }

    fn write_details(&self, out: &mut String) {
        write_fields!(out;
            self.lam, self.turb, self.expt, self.rdens, self.fdf, self.sop, self.off,
        );
        write_padded(out, &self.fpc);
        write_fields!(out; self.data.len(), self.sarea, self.u_sa);
        write_records(out, &self.data);
    }
}

/// Cubic spline flow curve, for the four `csf_*` tags.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AfeCsf {
    pub u_x: i32,
    pub u_y: i32,
    pub data: Vec<XyDataPoint>,
}

impl AfeCsf {
    fn read_details(reader: &mut Reader) -> Result<Self> {
        let npts = reader.read_count()?;
        let u_x = reader.read_int()?;
        let u_y = reader.read_int()?;
        let data = read_records(reader, npts)?;
        Ok(AfeCsf { u_x, u_y, data })
    }

    fn write_details(&self, out: &mut String) {
        write_fields!(out; self.data.len(), self.u_x, self.u_y);
        write_records(out, &self.data);
    }
}

/// Super element: a stack of other elements.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AfeSup {
    pub sched: i32,
    pub u_h: i32,
    pub subelements: Vec<AirflowSubelement>,
}

impl AfeSup {
    fn read_details(reader: &mut Reader) -> Result<Self> {
        let nse = reader.read_count()?;
        let sched = reader.read_int()?;
        let u_h = reader.read_int()?;
        let subelements = read_records(reader, nse)?;
        Ok(AfeSup {
            sched,
            u_h,
            subelements,
        })
    }

    fn write_details(&self, out: &mut String) {
        write_fields!(out; self.subelements.len(), self.sched, self.u_h);
        write_records(out, &self.subelements);
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ElementDetails {
    PlrOrf(PlrOrf),
    PlrLeak(PlrLeak),
    PlrConn(PlrConn),
    PlrQcn(PlrGeneral),
    PlrFcn(PlrGeneral),
    PlrTest1(PlrTest1),
    PlrTest2(PlrTest2),
    PlrCrack(PlrCrack),
    PlrStair(PlrStair),
    PlrShaft(PlrShaft),
    PlrBdq(PlrBackDamper),
    PlrBdf(PlrBackDamper),
    QfrQab(QfrQuadratic),
    QfrFab(QfrQuadratic),
    QfrCrack(QfrCrack),
    QfrTest2(QfrTest2),
    AfeDor(AfeDor),
    DrPl2(DrPl2),
    AfeCmf(AfeFlow),
    AfeCvf(AfeFlow),
    AfeFan(AfeFan),
    AfeCsf(AfeCsf),
    AfeSup(AfeSup),
}

impl ElementDetails {
    /// The tag written for a new element with these details.
    pub fn default_data_type(&self) -> &'static str {
        use ElementDetails::*;
        match self {
            PlrOrf(_) => "plr_orfc",
            PlrLeak(_) => "plr_leak1",
            PlrConn(_) => "plr_conn",
            PlrQcn(_) => "plr_qcn",
            PlrFcn(_) => "plr_fcn",
            PlrTest1(_) => "plr_test1",
            PlrTest2(_) => "plr_test2",
            PlrCrack(_) => "plr_crack",
            PlrStair(_) => "plr_stair",
            PlrShaft(_) => "plr_shaft",
            PlrBdq(_) => "plr_bdq",
            PlrBdf(_) => "plr_bdf",
            QfrQab(_) => "qfr_qab",
            QfrFab(_) => "qfr_fab",
            QfrCrack(_) => "qfr_crack",
            QfrTest2(_) => "qfr_test2",
            AfeDor(_) => "dor_door",
            DrPl2(_) => "dor_pl2",
            AfeCmf(_) => "fan_cmf",
            AfeCvf(_) => "fan_cvf",
            AfeFan(_) => "fan_fan",
            AfeCsf(_) => "csf_fsp",
            AfeSup(_) => "sup_afe",
        }
    }

    fn write_details(&self, out: &mut String) {
        use ElementDetails::*;
        match self {
            PlrOrf(details) => details.write_details(out),
            PlrLeak(details) => details.write_details(out),
            PlrConn(details) => details.write_details(out),
            PlrQcn(details) | PlrFcn(details) => details.write_details(out),
            PlrTest1(details) => details.write_details(out),
            PlrTest2(details) => details.write_details(out),
            PlrCrack(details) => details.write_details(out),
            PlrStair(details) => details.write_details(out),
            PlrShaft(details) => details.write_details(out),
            PlrBdq(details) | PlrBdf(details) => details.write_details(out),
            QfrQab(details) | QfrFab(details) => details.write_details(out),
            QfrCrack(details) => details.write_details(out),
            QfrTest2(details) => details.write_details(out),
            AfeDor(details) => details.write_details(out),
            DrPl2(details) => details.write_details(out),
            AfeCmf(details) | AfeCvf(details) => details.write_details(out),
            AfeFan(details) => details.write_details(out),
            AfeCsf(details) => details.write_details(out),
            AfeSup(details) => details.write_details(out),
        }
    }
}

type DetailsReader = fn(&mut Reader<'_>) -> Result<ElementDetails>;

lazy_static! {
    static ref AIRFLOW_ELEMENT_TYPES: HashMap<&'static str, DetailsReader> = {
        use ElementDetails as D;
        let mut types: HashMap<&'static str, DetailsReader> = HashMap::new();
        types.insert("plr_orfc", |r| PlrOrf::read_details(r).map(D::PlrOrf));
        types.insert("plr_leak1", |r| PlrLeak::read_details(r).map(D::PlrLeak));
        types.insert("plr_leak2", |r| PlrLeak::read_details(r).map(D::PlrLeak));
        types.insert("plr_leak3", |r| PlrLeak::read_details(r).map(D::PlrLeak));
        types.insert("plr_conn", |r| PlrConn::read_details(r).map(D::PlrConn));
        types.insert("plr_qcn", |r| PlrGeneral::read_details(r).map(D::PlrQcn));
        types.insert("plr_fcn", |r| PlrGeneral::read_details(r).map(D::PlrFcn));
        types.insert("plr_test1", |r| PlrTest1::read_details(r).map(D::PlrTest1));
        types.insert("plr_test2", |r| PlrTest2::read_details(r).map(D::PlrTest2));
        types.insert("plr_crack", |r| PlrCrack::read_details(r).map(D::PlrCrack));
        types.insert("plr_stair", |r| PlrStair::read_details(r).map(D::PlrStair));
        types.insert("plr_shaft", |r| PlrShaft::read_details(r).map(D::PlrShaft));
        types.insert("plr_bdq", |r| PlrBackDamper::read_details(r).map(D::PlrBdq));
        types.insert("plr_bdf", |r| PlrBackDamper::read_details(r).map(D::PlrBdf));
        types.insert("qfr_qab", |r| QfrQuadratic::read_details(r).map(D::QfrQab));
        types.insert("qfr_fab", |r| QfrQuadratic::read_details(r).map(D::QfrFab));
        types.insert("qfr_crack", |r| QfrCrack::read_details(r).map(D::QfrCrack));
        types.insert("qfr_test2", |r| QfrTest2::read_details(r).map(D::QfrTest2));
        types.insert("dor_door", |r| AfeDor::read_details(r).map(D::AfeDor));
        types.insert("dor_pl2", |r| DrPl2::read_details(r).map(D::DrPl2));
        types.insert("fan_cmf", |r| AfeFlow::read_details(r).map(D::AfeCmf));
        types.insert("fan_cvf", |r| AfeFlow::read_details(r).map(D::AfeCvf));
        types.insert("fan_fan", |r| AfeFan::read_details(r).map(D::AfeFan));
        types.insert("csf_fsp", |r| AfeCsf::read_details(r).map(D::AfeCsf));
        types.insert("csf_qsp", |r| AfeCsf::read_details(r).map(D::AfeCsf));
        types.insert("csf_psf", |r| AfeCsf::read_details(r).map(D::AfeCsf));
        types.insert("csf_psq", |r| AfeCsf::read_details(r).map(D::AfeCsf));
        types.insert("sup_afe", |r| AfeSup::read_details(r).map(D::AfeSup));
        types
    };
}

/// True if `data_type` names a registered airflow element layout.
pub fn is_airflow_element_type(data_type: &str) -> bool {
    AIRFLOW_ELEMENT_TYPES.contains_key(data_type)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AirflowElement {
    pub nr: i32,
    pub icon: i32,
    pub data_type: String,
    pub name: String,
    pub desc: String,
    pub details: ElementDetails,
}

impl AirflowElement {
    pub fn new(name: &str, details: ElementDetails) -> Self {
        let data_type = details.default_data_type();
        AirflowElement::with_data_type(data_type, name, details)
    }

    /// Builds an element with an explicit tag.  The tag is not checked
    /// against `details`; it is written out exactly as given.
    pub fn with_data_type(data_type: &str, name: &str, details: ElementDetails) -> Self {
        AirflowElement {
            nr: 0,
            icon: 0,
            data_type: data_type.to_owned(),
            name: name.to_owned(),
            desc: String::new(),
            details,
        }
    }
}

impl Element for AirflowElement {
    fn read_element(reader: &mut Reader) -> Result<Self> {
        let nr = reader.read_int()?;
        let icon = reader.read_int()?;
        let data_type = reader.read_token()?;
        let read_details = match AIRFLOW_ELEMENT_TYPES.get(data_type.as_str()) {
            Some(read_details) => *read_details,
            None => {
                return variant_err!(
                    UnknownAirflowElement,
                    reader.line(),
                    format!("unrecognized airflow element type '{data_type}'")
                );
            }
        };
        let name = reader.read_token()?;
        let desc = reader.read_whole_line()?;
        let details = read_details(reader)?;
        Ok(AirflowElement {
            nr,
            icon,
            data_type,
            name,
            desc,
            details,
        })
    }

    fn write(&self, out: &mut String) {
        write_fields!(out; self.nr, self.icon, self.data_type, self.name);
        out.push_str(&self.desc);
        out.push('\n');
        self.details.write_details(out);
    }
}

// Copyright 2021 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Simulation control: solver settings, simulation period and output
//! selection.

use contam_core::ScalarLiteral;
use serde::{Deserialize, Serialize};

use crate::prj::Result;
use crate::prj::reader::Reader;
use crate::prj::section::{Record, write_fields, write_padded};

pub const SAVE_FLAGS: usize = 16;

/// Airflow and contaminant solver settings, simulation dates and times,
/// and which result files to produce.  Dates are `MmmDD` tokens and times
/// `HH:MM:SS` tokens.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunControl {
    pub sim_af: i32,
    pub afcalc: i32,
    pub afmaxi: i32,
    pub afrcnvg: ScalarLiteral,
    pub afacnvg: ScalarLiteral,
    pub afrelax: ScalarLiteral,
    pub uac2: i32,
    pub pres: ScalarLiteral,
    pub u_pres: i32,
    pub afslae: i32,
    pub afrseq: i32,
    pub aflmaxi: i32,
    pub aflcnvg: ScalarLiteral,
    pub aflinit: i32,
    pub tadj: i32,
    pub sim_mf: i32,
    pub ccmaxi: i32,
    pub ccrcnvg: ScalarLiteral,
    pub ccacnvg: ScalarLiteral,
    pub ccrelax: ScalarLiteral,
    pub uccc: i32,
    pub mfnmthd: i32,
    pub mfnrseq: i32,
    pub mfnmaxi: i32,
    pub mfnrcnvg: ScalarLiteral,
    pub mfnacnvg: ScalarLiteral,
    pub mfnrelax: ScalarLiteral,
    pub mfngamma: ScalarLiteral,
    pub uccn: i32,
    pub mftmthd: i32,
    pub mftrseq: i32,
    pub mftmaxi: i32,
    pub mftrcnvg: ScalarLiteral,
    pub mftacnvg: ScalarLiteral,
    pub mftrelax: ScalarLiteral,
    pub mftgamma: ScalarLiteral,
    pub ucct: i32,
    pub mfvmthd: i32,
    pub mfvrseq: i32,
    pub mfvmaxi: i32,
    pub mfvrcnvg: ScalarLiteral,
    pub mfvacnvg: ScalarLiteral,
    pub mfvrelax: ScalarLiteral,
    pub uccv: i32,
    pub mf_solver: i32,
    pub sim_1dz: i32,
    pub sim_1dd: i32,
    pub celldx: ScalarLiteral,
    pub sim_vjt: i32,
    pub udx: i32,
    pub cvode_mth: i32,
    pub cvode_rcnvg: ScalarLiteral,
    pub cvode_acnvg: ScalarLiteral,
    pub cvode_dtmax: ScalarLiteral,
    pub tsdens: i32,
    pub tsrelax: ScalarLiteral,
    pub tsmaxi: i32,
    pub cnvg_ss: i32,
    pub dens_zp: i32,
    pub stack_d: i32,
    pub dod_mdt: i32,
    pub date_st: String,
    pub time_st: String,
    pub date_0: String,
    pub time_0: String,
    pub date_1: String,
    pub time_1: String,
    pub time_step: String,
    pub time_list: String,
    pub time_scrn: String,
    pub restart: i32,
    pub rstdate: String,
    pub rsttime: String,
    pub list: i32,
    pub do_dlg: i32,
    pub pfsave: i32,
    pub zfsave: i32,
    pub zcsave: i32,
    pub achvol: i32,
    pub achsave: i32,
    pub abwsave: i32,
    pub cbwsave: i32,
    pub expsave: i32,
    pub ebwsave: i32,
    pub zaasave: i32,
    pub zbwsave: i32,
    pub rzfsave: i32,
    pub rzmsave: i32,
    pub rz1save: i32,
    pub csmsave: i32,
    pub srfsave: i32,
    pub logsave: i32,
    pub save: [i32; SAVE_FLAGS],
    pub rvals: Vec<ScalarLiteral>,
    pub bldg_flow_z: i32,
    pub bldg_flow_d: i32,
    pub bldg_flow_c: i32,
    pub cfd_ctype: i32,
    pub cfd_convcpl: ScalarLiteral,
    pub cfd_var: i32,
    pub cfd_zref: i32,
    pub cfd_imax: i32,
    pub cfd_dtcmo: i32,
}

impl Default for RunControl {
    fn default() -> Self {
        RunControl {
            sim_af: 0,
            afcalc: 0,
            afmaxi: 0,
            afrcnvg: ScalarLiteral::default(),
            afacnvg: ScalarLiteral::default(),
            afrelax: ScalarLiteral::default(),
            uac2: 0,
            pres: ScalarLiteral::default(),
            u_pres: 0,
            afslae: 0,
            afrseq: 0,
            aflmaxi: 0,
            aflcnvg: ScalarLiteral::default(),
            aflinit: 0,
            tadj: 0,
            sim_mf: 0,
            ccmaxi: 0,
            ccrcnvg: ScalarLiteral::default(),
            ccacnvg: ScalarLiteral::default(),
            ccrelax: ScalarLiteral::default(),
            uccc: 0,
            mfnmthd: 0,
            mfnrseq: 0,
            mfnmaxi: 0,
            mfnrcnvg: ScalarLiteral::default(),
            mfnacnvg: ScalarLiteral::default(),
            mfnrelax: ScalarLiteral::default(),
            mfngamma: ScalarLiteral::default(),
            uccn: 0,
            mftmthd: 0,
            mftrseq: 0,
            mftmaxi: 0,
            mftrcnvg: ScalarLiteral::default(),
            mftacnvg: ScalarLiteral::default(),
            mftrelax: ScalarLiteral::default(),
            mftgamma: ScalarLiteral::default(),
            ucct: 0,
            mfvmthd: 0,
            mfvrseq: 0,
            mfvmaxi: 0,
            mfvrcnvg: ScalarLiteral::default(),
            mfvacnvg: ScalarLiteral::default(),
            mfvrelax: ScalarLiteral::default(),
            uccv: 0,
            mf_solver: 0,
            sim_1dz: 0,
            sim_1dd: 0,
            celldx: ScalarLiteral::default(),
            sim_vjt: 0,
            udx: 0,
            cvode_mth: 0,
            cvode_rcnvg: ScalarLiteral::default(),
            cvode_acnvg: ScalarLiteral::default(),
            cvode_dtmax: ScalarLiteral::default(),
            tsdens: 0,
            tsrelax: ScalarLiteral::default(),
            tsmaxi: 0,
            cnvg_ss: 0,
            dens_zp: 0,
            stack_d: 0,
            dod_mdt: 0,
            date_st: "Jan01".to_owned(),
            time_st: "00:00:00".to_owned(),
            date_0: "Jan01".to_owned(),
            time_0: "00:00:00".to_owned(),
            date_1: "Jan01".to_owned(),
            time_1: "24:00:00".to_owned(),
            time_step: "00:05:00".to_owned(),
            time_list: "01:00:00".to_owned(),
            time_scrn: "01:00:00".to_owned(),
            restart: 0,
            rstdate: "Jan01".to_owned(),
            rsttime: "00:00:00".to_owned(),
            list: 0,
            do_dlg: 0,
            pfsave: 0,
            zfsave: 0,
            zcsave: 0,
            achvol: 0,
            achsave: 0,
            abwsave: 0,
            cbwsave: 0,
            expsave: 0,
            ebwsave: 0,
            zaasave: 0,
            zbwsave: 0,
            rzfsave: 0,
            rzmsave: 0,
            rz1save: 0,
            csmsave: 0,
            srfsave: 0,
            logsave: 0,
            save: [0; SAVE_FLAGS],
            rvals: vec![],
            bldg_flow_z: 0,
            bldg_flow_d: 0,
            bldg_flow_c: 0,
            cfd_ctype: 0,
            cfd_convcpl: ScalarLiteral::default(),
            cfd_var: 0,
            cfd_zref: 0,
            cfd_imax: 0,
            cfd_dtcmo: 0,
        }
    }
}

impl RunControl {
    pub fn steady_state_airflow(&self) -> bool {
        self.sim_af == 0
    }
}

impl Record for RunControl {
    fn read(&mut self, reader: &mut Reader) -> Result<()> {
        self.sim_af = reader.read_int()?;
        self.afcalc = reader.read_int()?;
        self.afmaxi = reader.read_int()?;
        self.afrcnvg = reader.read_literal()?;
        self.afacnvg = reader.read_literal()?;
        self.afrelax = reader.read_literal()?;
        self.uac2 = reader.read_int()?;
        self.pres = reader.read_literal()?;
        self.u_pres = reader.read_int()?;
        self.afslae = reader.read_int()?;
        self.afrseq = reader.read_int()?;
        self.aflmaxi = reader.read_int()?;
        self.aflcnvg = reader.read_literal()?;
        self.aflinit = reader.read_int()?;
        self.tadj = reader.read_int()?;
        self.sim_mf = reader.read_int()?;
        self.ccmaxi = reader.read_int()?;
        self.ccrcnvg = reader.read_literal()?;
        self.ccacnvg = reader.read_literal()?;
        self.ccrelax = reader.read_literal()?;
        self.uccc = reader.read_int()?;
        self.mfnmthd = reader.read_int()?;
        self.mfnrseq = reader.read_int()?;
        self.mfnmaxi = reader.read_int()?;
        self.mfnrcnvg = reader.read_literal()?;
        self.mfnacnvg = reader.read_literal()?;
        self.mfnrelax = reader.read_literal()?;
        self.mfngamma = reader.read_literal()?;
        self.uccn = reader.read_int()?;
        self.mftmthd = reader.read_int()?;
        self.mftrseq = reader.read_int()?;
        self.mftmaxi = reader.read_int()?;
        self.mftrcnvg = reader.read_literal()?;
        self.mftacnvg = reader.read_literal()?;
        self.mftrelax = reader.read_literal()?;
        self.mftgamma = reader.read_literal()?;
        self.ucct = reader.read_int()?;
        self.mfvmthd = reader.read_int()?;
        self.mfvrseq = reader.read_int()?;
        self.mfvmaxi = reader.read_int()?;
        self.mfvrcnvg = reader.read_literal()?;
        self.mfvacnvg = reader.read_literal()?;
        self.mfvrelax = reader.read_literal()?;
        self.uccv = reader.read_int()?;
        self.mf_solver = reader.read_int()?;
        self.sim_1dz = reader.read_int()?;
        self.sim_1dd = reader.read_int()?;
        self.celldx = reader.read_literal()?;
        self.sim_vjt = reader.read_int()?;
        self.udx = reader.read_int()?;
        self.cvode_mth = reader.read_int()?;
        self.cvode_rcnvg = reader.read_literal()?;
        self.cvode_acnvg = reader.read_literal()?;
        self.cvode_dtmax = reader.read_literal()?;
        self.tsdens = reader.read_int()?;
        self.tsrelax = reader.read_literal()?;
        self.tsmaxi = reader.read_int()?;
        self.cnvg_ss = reader.read_int()?;
        self.dens_zp = reader.read_int()?;
        self.stack_d = reader.read_int()?;
        self.dod_mdt = reader.read_int()?;
        self.date_st = reader.read_token()?;
        self.time_st = reader.read_token()?;
        self.date_0 = reader.read_token()?;
        self.time_0 = reader.read_token()?;
        self.date_1 = reader.read_token()?;
        self.time_1 = reader.read_token()?;
        self.time_step = reader.read_token()?;
        self.time_list = reader.read_token()?;
        self.time_scrn = reader.read_token()?;
        self.restart = reader.read_int()?;
        self.rstdate = reader.read_token()?;
        self.rsttime = reader.read_token()?;
        self.list = reader.read_int()?;
        self.do_dlg = reader.read_int()?;
        self.pfsave = reader.read_int()?;
        self.zfsave = reader.read_int()?;
        self.zcsave = reader.read_int()?;
        self.achvol = reader.read_int()?;
        self.achsave = reader.read_int()?;
        self.abwsave = reader.read_int()?;
        self.cbwsave = reader.read_int()?;
        self.expsave = reader.read_int()?;
        self.ebwsave = reader.read_int()?;
        self.zaasave = reader.read_int()?;
        self.zbwsave = reader.read_int()?;
        self.rzfsave = reader.read_int()?;
        self.rzmsave = reader.read_int()?;
        self.rz1save = reader.read_int()?;
        self.csmsave = reader.read_int()?;
        self.srfsave = reader.read_int()?;
        self.logsave = reader.read_int()?;
        for flag in self.save.iter_mut() {
            *flag = reader.read_int()?;
        }
        let nrvals = reader.read_count()?;
        self.rvals = Vec::new();
        for _ in 0..nrvals {
            self.rvals.push(reader.read_literal()?);
        }
        self.bldg_flow_z = reader.read_int()?;
        self.bldg_flow_d = reader.read_int()?;
        self.bldg_flow_c = reader.read_int()?;
        self.cfd_ctype = reader.read_int()?;
        self.cfd_convcpl = reader.read_literal()?;
        self.cfd_var = reader.read_int()?;
        self.cfd_zref = reader.read_int()?;
        self.cfd_imax = reader.read_int()?;
        self.cfd_dtcmo = reader.read_int()?;
        Ok(())
    }

    fn write(&self, out: &mut String) {
        write_fields!(out;
            self.sim_af, self.afcalc, self.afmaxi, self.afrcnvg, self.afacnvg, self.afrelax,
            self.uac2, self.pres, self.u_pres,
        );
        write_fields!(out;
            self.afslae, self.afrseq, self.aflmaxi, self.aflcnvg, self.aflinit, self.tadj,
        );
        write_fields!(out;
            self.sim_mf, self.ccmaxi, self.ccrcnvg, self.ccacnvg, self.ccrelax, self.uccc,
        );
        write_fields!(out;
            self.mfnmthd, self.mfnrseq, self.mfnmaxi, self.mfnrcnvg, self.mfnacnvg,
            self.mfnrelax, self.mfngamma, self.uccn,
        );
        write_fields!(out;
            self.mftmthd, self.mftrseq, self.mftmaxi, self.mftrcnvg, self.mftacnvg,
            self.mftrelax, self.mftgamma, self.ucct,
        );
        write_fields!(out;
            self.mfvmthd, self.mfvrseq, self.mfvmaxi, self.mfvrcnvg, self.mfvacnvg,
            self.mfvrelax, self.uccv,
        );
        write_fields!(out;
            self.mf_solver, self.sim_1dz, self.sim_1dd, self.celldx, self.sim_vjt, self.udx,
        );
        write_fields!(out;
            self.cvode_mth, self.cvode_rcnvg, self.cvode_acnvg, self.cvode_dtmax,
        );
        write_fields!(out;
            self.tsdens, self.tsrelax, self.tsmaxi, self.cnvg_ss, self.dens_zp, self.stack_d,
            self.dod_mdt,
        );
        write_fields!(out;
            self.date_st, self.time_st, self.date_0, self.time_0, self.date_1, self.time_1,
            self.time_step, self.time_list, self.time_scrn,
        );
        write_fields!(out;
            self.restart, self.rstdate, self.rsttime,
        );
        write_fields!(out;
            self.list, self.do_dlg, self.pfsave, self.zfsave, self.zcsave,
        );
        write_fields!(out;
            self.achvol, self.achsave, self.abwsave, self.cbwsave, self.expsave, self.ebwsave,
            self.zaasave, self.zbwsave,
        );
        write_fields!(out;
            self.rzfsave, self.rzmsave, self.rz1save, self.csmsave, self.srfsave, self.logsave,
        );
        write_padded(out, &self.save);
        out.push_str(&self.rvals.len().to_string());
        out.push('\n');
        write_padded(out, &self.rvals);
        write_fields!(out;
            self.bldg_flow_z, self.bldg_flow_d, self.bldg_flow_c,
        );
        write_fields!(out;
            self.cfd_ctype, self.cfd_convcpl, self.cfd_var, self.cfd_zref, self.cfd_imax,
            self.cfd_dtcmo,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prj::subobjects::literal;

    const SAMPLE: &str = "\
1 0 30 1e-05 1e-05 0.75 0 50 0
1 0 100 1e-06 1 0
0 100 0.0001 1e-15 0.75 0
1 0 100 0.0001 1e-15 0.75 0 0
1 0 100 0.0001 1e-15 0.75 0 0
1 0 100 0.0001 1e-15 0.75 0
0 0 0 0.1 0 0
1 0.001 1e-13 0
0 0.75 100 0 0 1 0
Jan01 00:00:00 Jan01 00:00:00 Jan01 24:00:00 00:05:00 01:00:00 01:00:00
0 Jan01 00:00:00
0 0 1 0 0
0 0 0 0 0 0 0 0
0 0 0 0 0 0
0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 1 
2
0.5 1.25 
0 0 0
0 0.01 0 0 3 0
";

    #[test]
    fn test_run_control_layout() {
        let mut reader = Reader::from_text(SAMPLE);
        let mut rc = RunControl::default();
        rc.read(&mut reader).unwrap();
        assert_eq!(1, rc.sim_af);
        assert!(!rc.steady_state_airflow());
        assert_eq!(30, rc.afmaxi);
        assert_eq!("0.75", rc.afrelax.to_text());
        assert_eq!("24:00:00", rc.time_1);
        assert_eq!(1, rc.pfsave);
        assert_eq!(1, rc.save[15]);
        assert_eq!(vec![literal("0.5"), literal("1.25")], rc.rvals);
        assert_eq!(3, rc.cfd_imax);

        let mut out = String::new();
        rc.write(&mut out);
        assert_eq!(SAMPLE, out);
    }

    #[test]
    fn test_default_run_control_rereads() {
        let rc = RunControl::default();
        let mut out = String::new();
        rc.write(&mut out);
        assert!(out.contains("\n0\n\n"));

        let mut reader = Reader::from_text(&out);
        let mut copy = RunControl::default();
        copy.read(&mut reader).unwrap();
        assert_eq!(rc, copy);
    }
}

// Copyright 2021 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Small value records owned by larger ones: level icons, schedule and
//! curve points, supersite subelements and weather blocks.

use contam_core::ScalarLiteral;
use serde::{Deserialize, Serialize};

use crate::prj::Result;
use crate::prj::reader::Reader;
use crate::prj::section::{Record, write_fields};

/// A sketchpad icon placed on a level.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    pub icon: i32,
    pub col: i32,
    pub row: i32,
    pub nr: i32,
}

impl Record for Icon {
    fn read(&mut self, reader: &mut Reader) -> Result<()> {
        self.icon = reader.read_int()?;
        self.col = reader.read_int()?;
        self.row = reader.read_int()?;
        self.nr = reader.read_int()?;
        Ok(())
    }

    fn write(&self, out: &mut String) {
        write_fields!(out; self.icon, self.col, self.row, self.nr);
    }
}

/// A time of day (`HH:MM:SS`) and the control value that applies from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchedulePoint {
    pub time: String,
    pub ctrl: ScalarLiteral,
}

impl Default for SchedulePoint {
    fn default() -> Self {
        SchedulePoint {
            time: "00:00:00".to_owned(),
            ctrl: ScalarLiteral::default(),
        }
    }
}

impl Record for SchedulePoint {
    fn read(&mut self, reader: &mut Reader) -> Result<()> {
        self.time = reader.read_token()?;
        self.ctrl = reader.read_literal()?;
        Ok(())
    }

    fn write(&self, out: &mut String) {
        write_fields!(out; self.time, self.ctrl);
    }
}

/// Wind pressure coefficient at one azimuth.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WindPressurePoint {
    pub azm: ScalarLiteral,
    pub coef: ScalarLiteral,
}

impl Record for WindPressurePoint {
    fn read(&mut self, reader: &mut Reader) -> Result<()> {
        self.azm = reader.read_literal()?;
        self.coef = reader.read_literal()?;
        Ok(())
    }

    fn write(&self, out: &mut String) {
        write_fields!(out; self.azm, self.coef);
    }
}

/// One point of a fan performance curve.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FanDataPoint {
    pub m_f: ScalarLiteral,
    pub u_mf: i32,
    pub d_p: ScalarLiteral,
    pub u_dp: i32,
    pub r_p: ScalarLiteral,
    pub u_rp: i32,
}

impl Record for FanDataPoint {
    fn read(&mut self, reader: &mut Reader) -> Result<()> {
        self.m_f = reader.read_literal()?;
        self.u_mf = reader.read_int()?;
        self.d_p = reader.read_literal()?;
        self.u_dp = reader.read_int()?;
        self.r_p = reader.read_literal()?;
        self.u_rp = reader.read_int()?;
        Ok(())
    }

    fn write(&self, out: &mut String) {
        write_fields!(out; self.m_f, self.u_mf, self.d_p, self.u_dp, self.r_p, self.u_rp);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct XyDataPoint {
    pub x: ScalarLiteral,
    pub y: ScalarLiteral,
}

impl Record for XyDataPoint {
    fn read(&mut self, reader: &mut Reader) -> Result<()> {
        self.x = reader.read_literal()?;
        self.y = reader.read_literal()?;
        Ok(())
    }

    fn write(&self, out: &mut String) {
        write_fields!(out; self.x, self.y);
    }
}

/// A member of a super element: another element placed at a height.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AirflowSubelement {
    pub nr: i32,
    pub rel_ht: ScalarLiteral,
    pub filt: i32,
}

impl Record for AirflowSubelement {
    fn read(&mut self, reader: &mut Reader) -> Result<()> {
        self.nr = reader.read_int()?;
        self.rel_ht = reader.read_literal()?;
        self.filt = reader.read_int()?;
        Ok(())
    }

    fn write(&self, out: &mut String) {
        write_fields!(out; self.nr, self.rel_ht, self.filt);
    }
}

/// Ambient conditions: temperature, pressure, wind and humidity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub tambt: ScalarLiteral,
    pub barpres: ScalarLiteral,
    pub windspd: ScalarLiteral,
    pub winddir: ScalarLiteral,
    pub relhum: ScalarLiteral,
    pub daytyp: i32,
    pub u_ta: i32,
    pub u_pb: i32,
    pub u_ws: i32,
    pub u_wd: i32,
}

impl Default for Weather {
    fn default() -> Self {
        Weather {
            tambt: literal("293.15"),
            barpres: literal("101325.0"),
            windspd: ScalarLiteral::default(),
            winddir: ScalarLiteral::default(),
            relhum: ScalarLiteral::default(),
            daytyp: 1,
            u_ta: 2,
            u_pb: 0,
            u_ws: 0,
            u_wd: 0,
        }
    }
}

impl Record for Weather {
    fn read(&mut self, reader: &mut Reader) -> Result<()> {
        self.tambt = reader.read_literal()?;
        self.barpres = reader.read_literal()?;
        self.windspd = reader.read_literal()?;
        self.winddir = reader.read_literal()?;
        self.relhum = reader.read_literal()?;
        self.daytyp = reader.read_int()?;
        self.u_ta = reader.read_int()?;
        self.u_pb = reader.read_int()?;
        self.u_ws = reader.read_int()?;
        self.u_wd = reader.read_int()?;
        Ok(())
    }

    fn write(&self, out: &mut String) {
        write_fields!(out;
            self.tambt, self.barpres, self.windspd, self.winddir, self.relhum,
            self.daytyp, self.u_ta, self.u_pb, self.u_ws, self.u_wd,
        );
    }
}

/// Builds a literal from text known to be a valid number.
pub(crate) fn literal(text: &str) -> ScalarLiteral {
    ScalarLiteral::new(text).unwrap_or_default()
}

/// Reads `count` records of `T` in sequence, with no framing.
pub(crate) fn read_records<T: Record>(reader: &mut Reader, count: usize) -> Result<Vec<T>> {
    let mut items = Vec::new();
    for _ in 0..count {
        let mut item = T::default();
        item.read(reader)?;
        items.push(item);
    }
    Ok(items)
}

pub(crate) fn write_records<T: Record>(out: &mut String, items: &[T]) {
    for item in items {
        item.write(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reread<T: Record>(item: &T) -> T {
        let mut out = String::new();
        item.write(&mut out);
        let mut reader = Reader::from_text(&out);
        let mut copy = T::default();
        copy.read(&mut reader).unwrap();
        copy
    }

    #[test]
    fn test_weather_layout() {
        let text = "293.15 101325 4.5 270 0.5 2 2 0 1 0\n";
        let mut reader = Reader::from_text(text);
        let mut weather = Weather::default();
        weather.read(&mut reader).unwrap();
        assert_eq!(2, weather.daytyp);
        assert_eq!("4.5", weather.windspd.to_text());
        assert_eq!(1, weather.u_ws);

        let mut out = String::new();
        weather.write(&mut out);
        assert_eq!(text, out);
        assert_eq!(weather, reread(&weather));
    }

    #[test]
    fn test_fan_point_layout() {
        let mut reader = Reader::from_text("0.5 1 100 0 0.25 2\n");
        let mut point = FanDataPoint::default();
        point.read(&mut reader).unwrap();
        assert_eq!(1, point.u_mf);
        assert_eq!("100", point.d_p.to_text());
        assert_eq!(2, point.u_rp);
        assert_eq!(point, reread(&point));
    }

    #[test]
    fn test_schedule_point_keeps_time_token() {
        let point = SchedulePoint {
            time: "13:30:00".to_owned(),
            ctrl: literal("0.75"),
        };
        let mut out = String::new();
        point.write(&mut out);
        assert_eq!("13:30:00 0.75\n", out);
        assert_eq!(point, reread(&point));
    }

    #[test]
    fn test_icon_and_subelement() {
        let icon = Icon {
            icon: 5,
            col: 12,
            row: 3,
            nr: 1,
        };
        assert_eq!(icon, reread(&icon));

        let sub = AirflowSubelement {
            nr: 2,
            rel_ht: literal("1.5"),
            filt: 0,
        };
        assert_eq!(sub, reread(&sub));
    }
}

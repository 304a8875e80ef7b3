// Copyright 2021 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use serde::{Deserialize, Serialize};

use crate::prj::Result;
use crate::prj::reader::Reader;
use crate::prj::section::{Record, write_fields, write_padded};
use crate::prj::subobjects::{SchedulePoint, read_records, write_records};

/// Number of day-schedule slots in a week schedule: seven days plus
/// holidays and four extra day types.
pub const WEEK_SCHEDULE_DAYS: usize = 12;

/// Control values over one day, as time/value points.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub nr: i32,
    /// 0 for a rectangular (step) profile, 1 for trapezoidal.
    pub shape: i32,
    pub utyp: i32,
    pub ucnv: i32,
    pub name: String,
    pub desc: String,
    pub points: Vec<SchedulePoint>,
}

impl Record for DaySchedule {
    fn read(&mut self, reader: &mut Reader) -> Result<()> {
        self.nr = reader.read_int()?;
        let npts = reader.read_count()?;
        self.shape = reader.read_int()?;
        self.utyp = reader.read_int()?;
        self.ucnv = reader.read_int()?;
        self.name = reader.read_token()?;
        self.desc = reader.read_whole_line()?;
        self.points = read_records(reader, npts)?;
        Ok(())
    }

    fn write(&self, out: &mut String) {
        write_fields!(out;
            self.nr, self.points.len(), self.shape, self.utyp, self.ucnv, self.name,
        );
        out.push_str(&self.desc);
        out.push('\n');
        write_records(out, &self.points);
    }
}

/// Assigns a day schedule (by number) to each day type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekSchedule {
    pub nr: i32,
    pub utyp: i32,
    pub ucnv: i32,
    pub name: String,
    pub desc: String,
    pub j: [i32; WEEK_SCHEDULE_DAYS],
}

impl Record for WeekSchedule {
    fn read(&mut self, reader: &mut Reader) -> Result<()> {
        self.nr = reader.read_int()?;
        self.utyp = reader.read_int()?;
        self.ucnv = reader.read_int()?;
        self.name = reader.read_token()?;
        self.desc = reader.read_whole_line()?;
        for day in self.j.iter_mut() {
            *day = reader.read_int()?;
        }
        Ok(())
    }

    fn write(&self, out: &mut String) {
        write_fields!(out; self.nr, self.utyp, self.ucnv, self.name);
        out.push_str(&self.desc);
        out.push('\n');
        write_padded(out, &self.j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_schedule_layout() {
        let text = "1 3 0 1 0 occupied\nweekday occupancy\n00:00:00 0\n08:00:00 1\n18:00:00 0\n";
        let mut reader = Reader::from_text(text);
        let mut day = DaySchedule::default();
        day.read(&mut reader).unwrap();
        assert_eq!(3, day.points.len());
        assert_eq!("08:00:00", day.points[1].time);
        assert_eq!("weekday occupancy", day.desc);

        let mut out = String::new();
        day.write(&mut out);
        assert_eq!(text, out);
    }

    #[test]
    fn test_week_schedule_layout() {
        let text = "1 0 1 week\nstandard week\n2 1 1 1 1 1 2 2 1 1 1 1 \n";
        let mut reader = Reader::from_text(text);
        let mut week = WeekSchedule::default();
        week.read(&mut reader).unwrap();
        assert_eq!(2, week.j[0]);
        assert_eq!(2, week.j[6]);
        assert_eq!(1, week.j[11]);

        let mut out = String::new();
        week.write(&mut out);
        assert_eq!(text, out);
    }

    #[test]
    fn test_week_schedule_days_may_wrap() {
        let mut reader = Reader::from_text("3 0 0 w\n\n1 2 3 4\n5 6 7 8\n9 10 11 12\n");
        let mut week = WeekSchedule::default();
        week.read(&mut reader).unwrap();
        assert_eq!([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12], week.j);
    }
}

// Copyright 2021 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

mod ahs;
mod control;
mod elements;
mod infiltration;
mod level;
mod model;
mod path;
mod reader;
mod run_control;
mod schedule;
mod section;
mod species;
mod subobjects;
mod wind;
mod zone;

pub use contam_core::Result;

pub use self::ahs::Ahs;
pub use self::control::{CdvDat, ControlDetails, ControlNode};
pub use self::elements::{
    AfeCsf, AfeDor, AfeFan, AfeFlow, AfeSup, AirflowElement, DrPl2, ElementDetails, PlrBackDamper,
    PlrConn, PlrCrack, PlrGeneral, PlrLeak, PlrOrf, PlrShaft, PlrStair, PlrTest1, PlrTest2,
    QfrCrack, QfrQuadratic, QfrTest2, is_airflow_element_type,
};
pub use self::level::Level;
pub use self::model::{IndexModel, RawSection};
pub use self::path::{AMBIENT, AirflowPath};
pub use self::reader::{DOCUMENT_TERMINATOR, Reader, SECTION_TERMINATOR};
pub use self::run_control::{RunControl, SAVE_FLAGS};
pub use self::schedule::{DaySchedule, WEEK_SCHEDULE_DAYS, WeekSchedule};
pub use self::section::{Element, Record};
pub use self::species::Species;
pub use self::subobjects::{
    AirflowSubelement, FanDataPoint, Icon, SchedulePoint, Weather, WindPressurePoint, XyDataPoint,
};
pub use self::wind::WindPressureProfile;

pub use self::zone::Zone;
pub use self::zone::flags as zone_flags;
pub use self::path::flags as path_flags;

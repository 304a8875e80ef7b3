// Copyright 2021 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! The in-memory PRJ document.
//!
//! `IndexModel` owns every typed section, the project header, the embedded
//! run control and the verbatim text of the sections this crate does not
//! interpret.  Reading and writing walk the same fixed document order, so a
//! model read from a file writes back an equivalent file.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use contam_core::{ScalarLiteral, structure_err};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::prj::Result;
use crate::prj::ahs::Ahs;
use crate::prj::control::{ControlDetails, ControlNode};
use crate::prj::elements::{AirflowElement, ElementDetails};
use crate::prj::level::Level;
use crate::prj::path::AirflowPath;
use crate::prj::reader::{DOCUMENT_TERMINATOR, Reader, SECTION_TERMINATOR};
use crate::prj::run_control::RunControl;
use crate::prj::schedule::{DaySchedule, WeekSchedule};
use crate::prj::section::{
    Record, write_array, write_element_vector, write_fields, write_section_vector,
};
use crate::prj::species::Species;
use crate::prj::subobjects::{Weather, literal};
use crate::prj::wind::WindPressureProfile;
use crate::prj::zone::Zone;

/// Sections kept as opaque text, in document order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RawSection {
    KineticReactions,
    FilterElements,
    Filters,
    SourceSinkElements,
    DuctElements,
    ControlSuperElements,
    DuctJunctions,
    JunctionInitialConditions,
    DuctSegments,
    SourceSinks,
    OccupancySchedules,
    Exposures,
    Annotations,
}

impl RawSection {
    pub const ALL: [RawSection; 13] = [
        RawSection::KineticReactions,
        RawSection::FilterElements,
        RawSection::Filters,
        RawSection::SourceSinkElements,
        RawSection::DuctElements,
        RawSection::ControlSuperElements,
        RawSection::DuctJunctions,
        RawSection::JunctionInitialConditions,
        RawSection::DuctSegments,
        RawSection::SourceSinks,
        RawSection::OccupancySchedules,
        RawSection::Exposures,
        RawSection::Annotations,
    ];

    /// The label ContamW writes after the section's count.
    pub fn label(self) -> &'static str {
        use RawSection::*;
        match self {
            KineticReactions => "kinetic reactions:",
            FilterElements => "filter elements:",
            Filters => "filters:",
            SourceSinkElements => "source/sink elements:",
            DuctElements => "duct elements:",
            ControlSuperElements => "control super elements:",
            DuctJunctions => "duct junctions:",
            JunctionInitialConditions => "initial junction concentrations:",
            DuctSegments => "duct segments:",
            SourceSinks => "source/sinks:",
            OccupancySchedules => "occupancy schedules:",
            Exposures => "exposures:",
            Annotations => "annotations:",
        }
    }

    fn empty_text(self) -> String {
        format!("0 ! {}\n{SECTION_TERMINATOR}\n", self.label())
    }
}

macro_rules! int_accessors {
    ($($field:ident, $set:ident;)*) => {
        $(
            pub fn $field(&self) -> i32 {
                self.$field
            }

            pub fn $set(&mut self, value: i32) {
                self.$field = value;
            }
        )*
    };
}

/// Getter, numeric setter and text setter for each literal field.  Both
/// setters leave the field untouched and return false on bad input.
macro_rules! literal_accessors {
    ($($field:ident, $set:ident, $set_text:ident;)*) => {
        $(
            pub fn $field(&self) -> f64 {
                self.$field.to_double()
            }

            pub fn $set(&mut self, value: f64) -> bool {
                self.$field.assign_f64(value)
            }

            pub fn $set_text(&mut self, text: &str) -> bool {
                self.$field.assign_if_valid(text)
            }
        )*
    };
}

macro_rules! string_accessors {
    ($($field:ident, $set:ident;)*) => {
        $(
            pub fn $field(&self) -> &str {
                &self.$field
            }

            pub fn $set(&mut self, value: &str) {
                self.$field = value.to_owned();
            }
        )*
    };
}

macro_rules! collection_accessors {
    ($($field:ident, $field_mut:ident, $set:ident: $ty:ty;)*) => {
        $(
            pub fn $field(&self) -> &[$ty] {
                &self.$field
            }

            pub fn $field_mut(&mut self) -> &mut Vec<$ty> {
                &mut self.$field
            }

            pub fn $set(&mut self, items: Vec<$ty>) {
                self.$field = items;
            }
        )*
    };
}

macro_rules! add_numbered {
    ($($add:ident, $field:ident: $ty:ty;)*) => {
        $(
            /// Appends `item` and numbers it after its position.
            pub fn $add(&mut self, mut item: $ty) -> i32 {
                item.nr = self.$field.len() as i32 + 1;
                let nr = item.nr;
                self.$field.push(item);
                nr
            }
        )*
    };
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexModel {
    valid: bool,

    name: String,
    version: String,
    echo: i32,
    desc: String,

    skheight: i32,
    skwidth: i32,
    def_units: i32,
    def_flows: i32,
    def_t: ScalarLiteral,
    udef_t: i32,
    rel_n: ScalarLiteral,
    wind_h: ScalarLiteral,
    u_wh: i32,
    wind_ao: ScalarLiteral,
    wind_a: ScalarLiteral,

    scale: ScalarLiteral,
    u_scale: i32,
    org_row: i32,
    org_col: i32,
    inv_yaxis: i32,
    show_geom: i32,

    ss_weather: Weather,
    wpt_weather: Weather,

    wth_path: String,
    ctm_path: String,
    cvf_path: String,
    dvf_path: String,
    wpc_file: String,
    ewc_file: String,
    wpc_desc: String,

    x0: ScalarLiteral,
    y0: ScalarLiteral,
    z0: ScalarLiteral,
    angle: ScalarLiteral,
    u_xyz: i32,

    eps_path: ScalarLiteral,
    eps_spcs: ScalarLiteral,
    t_shift: String,
    d_start: String,
    d_end: String,
    use_wpc_wp: i32,
    use_wpc_mf: i32,
    wpctrig: i32,

    latd: ScalarLiteral,
    lgtd: ScalarLiteral,
    tznr: ScalarLiteral,
    altd: ScalarLiteral,
    tgrnd: ScalarLiteral,
    utg: i32,
    u_a: i32,

    run_control: RunControl,

    contaminants: Vec<i32>,
    species: Vec<Species>,
    levels: Vec<Level>,
    day_schedules: Vec<DaySchedule>,
    week_schedules: Vec<WeekSchedule>,
    wind_pressure_profiles: Vec<WindPressureProfile>,
    airflow_elements: Vec<AirflowElement>,
    control_nodes: Vec<ControlNode>,
    ahs: Vec<Ahs>,
    zones: Vec<Zone>,
    airflow_paths: Vec<AirflowPath>,

    raw: BTreeMap<RawSection, String>,
}

impl Default for IndexModel {
    fn default() -> Self {
        IndexModel::new()
    }
}

impl IndexModel {
    /// An empty project.  It stays invalid, and writes nothing, until a
    /// read succeeds or `set_valid` marks it ready to write.
    pub fn new() -> Self {
        IndexModel {
            valid: false,
            name: "ContamW".to_owned(),
            version: "3.1".to_owned(),
            echo: 0,
            desc: String::new(),
            skheight: 58,
            skwidth: 66,
            def_units: 0,
            def_flows: 0,
            def_t: literal("293.15"),
            udef_t: 2,
            rel_n: ScalarLiteral::default(),
            wind_h: literal("10.0"),
            u_wh: 0,
            wind_ao: literal("0.6"),
            wind_a: literal("0.28"),
            scale: literal("1.0"),
            u_scale: 0,
            org_row: 56,
            org_col: 1,
            inv_yaxis: 0,
            show_geom: 0,
            ss_weather: Weather::default(),
            wpt_weather: Weather::default(),
            wth_path: String::new(),
            ctm_path: String::new(),
            cvf_path: String::new(),
            dvf_path: String::new(),
            wpc_file: String::new(),
            ewc_file: String::new(),
            wpc_desc: String::new(),
            x0: ScalarLiteral::default(),
            y0: ScalarLiteral::default(),
            z0: ScalarLiteral::default(),
            angle: ScalarLiteral::default(),
            u_xyz: 0,
            eps_path: literal("0.001"),
            eps_spcs: literal("0.001"),
            t_shift: "00:00:00".to_owned(),
            d_start: "Jan01".to_owned(),
            d_end: "Dec31".to_owned(),
            use_wpc_wp: 0,
            use_wpc_mf: 0,
            wpctrig: 0,
            latd: literal("40.0"),
            lgtd: literal("-90.0"),
            tznr: literal("-6.0"),
            altd: ScalarLiteral::default(),
            tgrnd: literal("283.15"),
            utg: 2,
            u_a: 0,
            run_control: RunControl::default(),
            contaminants: vec![],
            species: vec![],
            levels: vec![],
            day_schedules: vec![],
            week_schedules: vec![],
            wind_pressure_profiles: vec![],
            airflow_elements: vec![],
            control_nodes: vec![],
            ahs: vec![],
            zones: vec![],
            airflow_paths: vec![],
            raw: RawSection::ALL
                .iter()
                .map(|section| (*section, section.empty_text()))
                .collect(),
        }
    }

    pub fn from_reader(input: impl BufRead) -> Result<Self> {
        let mut reader = Reader::new(input);
        let mut model = IndexModel::new();
        model.read(&mut reader)?;
        Ok(model)
    }

    pub fn from_text(text: &str) -> Result<Self> {
        IndexModel::from_reader(text.as_bytes())
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        info!("reading project {}", path.display());
        IndexModel::from_reader(BufReader::new(file))
    }

    /// Writes the project text to `path`, replacing any existing file.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.to_string().as_bytes())?;
        info!("wrote project {}", path.display());
        Ok(())
    }

    /// True once a `read` has fully succeeded.  An invalid model writes as
    /// the empty string.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn set_valid(&mut self, valid: bool) {
        self.valid = valid;
    }

    /// Reads a complete document into this model.  On failure the model is
    /// left partially filled and marked invalid.
    pub fn read(&mut self, reader: &mut Reader) -> Result<()> {
        self.valid = false;

        self.name = reader.read_token()?;
        self.version = reader.read_token()?;
        self.echo = reader.read_int()?;
        self.desc = reader.read_whole_line()?;

        self.skheight = reader.read_int()?;
        self.skwidth = reader.read_int()?;
        self.def_units = reader.read_int()?;
        self.def_flows = reader.read_int()?;
        self.def_t = reader.read_literal()?;
        self.udef_t = reader.read_int()?;
        self.rel_n = reader.read_literal()?;
        self.wind_h = reader.read_literal()?;
        self.u_wh = reader.read_int()?;
        self.wind_ao = reader.read_literal()?;
        self.wind_a = reader.read_literal()?;

        self.scale = reader.read_literal()?;
        self.u_scale = reader.read_int()?;
        self.org_row = reader.read_int()?;
        self.org_col = reader.read_int()?;
        self.inv_yaxis = reader.read_int()?;
        self.show_geom = reader.read_int()?;

        self.ss_weather.read(reader)?;
        self.wpt_weather.read(reader)?;

        self.wth_path = reader.read_whole_line()?;
        self.ctm_path = reader.read_whole_line()?;
        self.cvf_path = reader.read_whole_line()?;
        self.dvf_path = reader.read_whole_line()?;
        self.wpc_file = reader.read_whole_line()?;
        self.ewc_file = reader.read_whole_line()?;
        self.wpc_desc = reader.read_whole_line()?;

        self.x0 = reader.read_literal()?;
        self.y0 = reader.read_literal()?;
        self.z0 = reader.read_literal()?;
        self.angle = reader.read_literal()?;
        self.u_xyz = reader.read_int()?;

        self.eps_path = reader.read_literal()?;
        self.eps_spcs = reader.read_literal()?;
        self.t_shift = reader.read_token()?;
        self.d_start = reader.read_token()?;
        self.d_end = reader.read_token()?;
        self.use_wpc_wp = reader.read_int()?;
        self.use_wpc_mf = reader.read_int()?;
        self.wpctrig = reader.read_int()?;

        self.latd = reader.read_literal()?;
        self.lgtd = reader.read_literal()?;
        self.tznr = reader.read_literal()?;
        self.altd = reader.read_literal()?;
        self.tgrnd = reader.read_literal()?;
        self.utg = reader.read_int()?;
        self.u_a = reader.read_int()?;

        self.run_control = RunControl::default();
        self.run_control.read(reader)?;
        reader.read_section_terminator(Some("run control"))?;
        debug!("read project header and run control through line {}", reader.line());

        self.contaminants = reader.read_int_array(false)?;
        self.species = reader.read_section_vector(Some("species"))?;
        self.levels = reader.read_section_vector(Some("level"))?;
        self.day_schedules = reader.read_section_vector(Some("day schedule"))?;
        self.week_schedules = reader.read_section_vector(Some("week schedule"))?;
        self.wind_pressure_profiles = reader.read_section_vector(Some("wind pressure profile"))?;

        self.read_raw_sections(reader, &RawSection::ALL[..4])?;
        self.airflow_elements = reader.read_element_vector(Some("airflow element"))?;
        self.read_raw_sections(reader, &RawSection::ALL[4..6])?;
        self.control_nodes = reader.read_element_vector(Some("control node"))?;

        self.ahs = reader.read_section_vector(Some("simple AHS"))?;
        self.zones = reader.read_section_vector(Some("zone"))?;
        self.read_zone_initial_conditions(reader)?;
        self.airflow_paths = reader.read_section_vector(Some("airflow path"))?;
        self.read_raw_sections(reader, &RawSection::ALL[6..])?;

        reader.read_document_terminator()?;

        info!(
            "read project with {} zones, {} paths and {} airflow elements",
            self.zones.len(),
            self.airflow_paths.len(),
            self.airflow_elements.len()
        );
        self.valid = true;
        Ok(())
    }

    fn read_raw_sections(&mut self, reader: &mut Reader, sections: &[RawSection]) -> Result<()> {
        for section in sections {
            let text = reader.read_raw_section()?;
            self.raw.insert(*section, text);
        }
        Ok(())
    }

    fn read_zone_initial_conditions(&mut self, reader: &mut Reader) -> Result<()> {
        let count = reader.read_count()?;
        if count != 0 {
            let ncontaminants = self.contaminants.len();
            let expected = ncontaminants * self.zones.len();
            if count != expected {
                return structure_err!(
                    InitialConditionCount,
                    reader.line(),
                    format!(
                        "expected {expected} initial zone concentrations for {} zones and {ncontaminants} contaminants, found {count}",
                        self.zones.len()
                    )
                );
            }
            for (i, zone) in self.zones.iter_mut().enumerate() {
                let nr = reader.read_int()?;
                if nr != i as i32 + 1 {
                    return structure_err!(
                        InitialConditionOrder,
                        reader.line(),
                        format!("initial concentrations for zone {} listed in position {}", nr, i + 1)
                    );
                }
                zone.ic = (0..ncontaminants)
                    .map(|_| reader.read_literal())
                    .collect::<Result<Vec<_>>>()?;
            }
        }
        reader.read_section_terminator(Some("initial zone concentration"))
    }

    fn write(&self, out: &mut String) {
        write_fields!(out; self.name, self.version, self.echo);
        out.push_str(&self.desc);
        out.push('\n');
        write_fields!(out;
            self.skheight, self.skwidth, self.def_units, self.def_flows, self.def_t,
            self.udef_t, self.rel_n, self.wind_h, self.u_wh, self.wind_ao, self.wind_a,
        );
        write_fields!(out;
            self.scale, self.u_scale, self.org_row, self.org_col, self.inv_yaxis, self.show_geom,
        );
        self.ss_weather.write(out);
        self.wpt_weather.write(out);
        for text in [
            &self.wth_path,
            &self.ctm_path,
            &self.cvf_path,
            &self.dvf_path,
            &self.wpc_file,
            &self.ewc_file,
            &self.wpc_desc,
        ] {
            out.push_str(text);
            out.push('\n');
        }
        write_fields!(out; self.x0, self.y0, self.z0, self.angle, self.u_xyz);
        write_fields!(out;
            self.eps_path, self.eps_spcs, self.t_shift, self.d_start, self.d_end,
            self.use_wpc_wp, self.use_wpc_mf, self.wpctrig,
        );
        write_fields!(out;
            self.latd, self.lgtd, self.tznr, self.altd, self.tgrnd, self.utg, self.u_a,
        );

        self.run_control.write(out);
        out.push_str(SECTION_TERMINATOR);
        out.push('\n');

        write_array(out, &self.contaminants, Some("contaminants:"));
        write_section_vector(out, &self.species, Some("species:"));
        write_section_vector(out, &self.levels, Some("levels plus icon data:"));
        write_section_vector(out, &self.day_schedules, Some("day-schedules:"));
        write_section_vector(out, &self.week_schedules, Some("week-schedules:"));
        write_section_vector(
            out,
            &self.wind_pressure_profiles,
            Some("wind pressure profiles:"),
        );

        self.write_raw_sections(out, &RawSection::ALL[..4]);
        write_element_vector(out, &self.airflow_elements, Some("flow elements:"));
        self.write_raw_sections(out, &RawSection::ALL[4..6]);
        write_element_vector(out, &self.control_nodes, Some("control nodes:"));

        write_section_vector(out, &self.ahs, Some("simple AHS:"));
        write_section_vector(out, &self.zones, Some("zones:"));
        self.write_zone_initial_conditions(out);
        write_section_vector(out, &self.airflow_paths, Some("flow paths:"));
        self.write_raw_sections(out, &RawSection::ALL[6..]);

        out.push_str(DOCUMENT_TERMINATOR);
        out.push('\n');
    }

    fn write_raw_sections(&self, out: &mut String, sections: &[RawSection]) {
        for section in sections {
            match self.raw.get(section) {
                Some(text) => out.push_str(text),
                None => out.push_str(&section.empty_text()),
            }
        }
    }

    /// An empty block when no zone holds values.  Otherwise every zone gets
    /// one value per contaminant, and zones with fewer stored values are
    /// padded with zero.
    fn write_zone_initial_conditions(&self, out: &mut String) {
        let ncontaminants = self.contaminants.len();
        let count = if self.zones.iter().all(|zone| zone.ic.is_empty()) {
            0
        } else {
            ncontaminants * self.zones.len()
        };
        out.push_str(&format!("{count} ! initial zone concentrations:\n"));
        if count != 0 {
            for (i, zone) in self.zones.iter().enumerate() {
                out.push_str(&(i + 1).to_string());
                for j in 0..ncontaminants {
                    out.push(' ');
                    match zone.ic.get(j) {
                        Some(value) => out.push_str(value.to_text()),
                        None => out.push_str("0.0"),
                    }
                }
                out.push('\n');
            }
        }
        out.push_str(SECTION_TERMINATOR);
        out.push('\n');
    }

    string_accessors! {
        name, set_name;
        version, set_version;
        desc, set_desc;
        wth_path, set_wth_path;
        ctm_path, set_ctm_path;
        cvf_path, set_cvf_path;
        dvf_path, set_dvf_path;
        wpc_file, set_wpc_file;
        ewc_file, set_ewc_file;
        wpc_desc, set_wpc_desc;
        t_shift, set_t_shift;
        d_start, set_d_start;
        d_end, set_d_end;
    }

    int_accessors! {
        echo, set_echo;
        skheight, set_skheight;
        skwidth, set_skwidth;
        def_units, set_def_units;
        def_flows, set_def_flows;
        udef_t, set_udef_t;
        u_wh, set_u_wh;
        u_scale, set_u_scale;
        org_row, set_org_row;
        org_col, set_org_col;
        inv_yaxis, set_inv_yaxis;
        show_geom, set_show_geom;
        u_xyz, set_u_xyz;
        use_wpc_wp, set_use_wpc_wp;
        use_wpc_mf, set_use_wpc_mf;
        wpctrig, set_wpctrig;
        utg, set_utg;
        u_a, set_u_a;
    }

    literal_accessors! {
        def_t, set_def_t, set_def_t_text;
        rel_n, set_rel_n, set_rel_n_text;
        wind_h, set_wind_h, set_wind_h_text;
        wind_ao, set_wind_ao, set_wind_ao_text;
        wind_a, set_wind_a, set_wind_a_text;
        scale, set_scale, set_scale_text;
        x0, set_x0, set_x0_text;
        y0, set_y0, set_y0_text;
        z0, set_z0, set_z0_text;
        angle, set_angle, set_angle_text;
        eps_path, set_eps_path, set_eps_path_text;
        eps_spcs, set_eps_spcs, set_eps_spcs_text;
        latd, set_latd, set_latd_text;
        lgtd, set_lgtd, set_lgtd_text;
        tznr, set_tznr, set_tznr_text;
        altd, set_altd, set_altd_text;
        tgrnd, set_tgrnd, set_tgrnd_text;
    }

    collection_accessors! {
        species, species_mut, set_species: Species;
        levels, levels_mut, set_levels: Level;
        day_schedules, day_schedules_mut, set_day_schedules: DaySchedule;
        week_schedules, week_schedules_mut, set_week_schedules: WeekSchedule;
        wind_pressure_profiles, wind_pressure_profiles_mut, set_wind_pressure_profiles: WindPressureProfile;
        airflow_elements, airflow_elements_mut, set_airflow_elements: AirflowElement;
        control_nodes, control_nodes_mut, set_control_nodes: ControlNode;
        ahs, ahs_mut, set_ahs: Ahs;
        zones, zones_mut, set_zones: Zone;
        airflow_paths, airflow_paths_mut, set_airflow_paths: AirflowPath;
    }

    add_numbered! {
        add_species, species: Species;
        add_level, levels: Level;
        add_day_schedule, day_schedules: DaySchedule;
        add_week_schedule, week_schedules: WeekSchedule;
        add_wind_pressure_profile, wind_pressure_profiles: WindPressureProfile;
        add_ahs, ahs: Ahs;
        add_zone, zones: Zone;
        add_airflow_path, airflow_paths: AirflowPath;
        add_airflow_element, airflow_elements: AirflowElement;
    }

    pub fn ss_weather(&self) -> &Weather {
        &self.ss_weather
    }

    pub fn ss_weather_mut(&mut self) -> &mut Weather {
        &mut self.ss_weather
    }

    pub fn set_ss_weather(&mut self, weather: Weather) {
        self.ss_weather = weather;
    }

    pub fn wpt_weather(&self) -> &Weather {
        &self.wpt_weather
    }

    pub fn wpt_weather_mut(&mut self) -> &mut Weather {
        &mut self.wpt_weather
    }

    pub fn set_wpt_weather(&mut self, weather: Weather) {
        self.wpt_weather = weather;
    }

    pub fn run_control(&self) -> &RunControl {
        &self.run_control
    }

    pub fn run_control_mut(&mut self) -> &mut RunControl {
        &mut self.run_control
    }

    pub fn set_run_control(&mut self, run_control: RunControl) {
        self.run_control = run_control;
    }

    /// Species numbers of the simulated contaminants.
    pub fn contaminants(&self) -> &[i32] {
        &self.contaminants
    }

    /// Renumbers species by position and lists the simulated ones as
    /// contaminants.  Call after replacing the species list wholesale.
    pub fn rebuild_contaminants(&mut self) {
        self.contaminants.clear();
        for (i, species) in self.species.iter_mut().enumerate() {
            species.nr = i as i32 + 1;
            if species.is_simulated() {
                self.contaminants.push(species.nr);
            }
        }
    }

    /// Puts `element` in place of element `nr`, keeping that number.
    pub fn replace_airflow_element(&mut self, nr: i32, mut element: AirflowElement) -> bool {
        if nr < 1 || nr as usize > self.airflow_elements.len() {
            return false;
        }
        element.nr = nr;
        self.airflow_elements[nr as usize - 1] = element;
        true
    }

    /// Appends `node`, numbering it after its position and, when
    /// `assign_sequence` is set, giving it the same sequence number.
    pub fn add_control_node(&mut self, mut node: ControlNode, assign_sequence: bool) -> i32 {
        node.nr = self.control_nodes.len() as i32 + 1;
        if assign_sequence {
            node.seqnr = node.nr;
        }
        let nr = node.nr;
        self.control_nodes.push(node);
        nr
    }

    /// Number of the first airflow element called `name`, or 0.
    pub fn airflow_element_nr_by_name(&self, name: &str) -> i32 {
        self.airflow_elements
            .iter()
            .find(|element| element.name == name)
            .map_or(0, |element| element.nr)
    }

    fn elements_of_type(&self, data_type: &str) -> Vec<AirflowElement> {
        self.airflow_elements
            .iter()
            .filter(|element| element.data_type == data_type)
            .cloned()
            .collect()
    }

    /// Leakage elements tagged `plr_leak1`.
    pub fn plr_leak1(&self) -> Vec<AirflowElement> {
        self.elements_of_type("plr_leak1")
            .into_iter()
            .filter(|element| matches!(element.details, ElementDetails::PlrLeak(_)))
            .collect()
    }

    pub fn plr_leak2(&self) -> Vec<AirflowElement> {
        self.elements_of_type("plr_leak2")
            .into_iter()
            .filter(|element| matches!(element.details, ElementDetails::PlrLeak(_)))
            .collect()
    }

    pub fn plr_test1(&self) -> Vec<AirflowElement> {
        self.airflow_elements
            .iter()
            .filter(|element| matches!(element.details, ElementDetails::PlrTest1(_)))
            .cloned()
            .collect()
    }

    pub fn cvf_dat(&self) -> Vec<ControlNode> {
        self.control_nodes
            .iter()
            .filter(|node| matches!(node.details, ControlDetails::CvfDat(_)))
            .cloned()
            .collect()
    }

    pub fn raw_section(&self, section: RawSection) -> &str {
        self.raw.get(&section).map_or("", String::as_str)
    }

    /// Replaces the stored text of `section`.  The text is written as
    /// given and must end with a section terminator line to read back.
    pub fn set_raw_section(&mut self, section: RawSection, text: &str) {
        self.raw.insert(section, text.to_owned());
    }
}

impl fmt::Display for IndexModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.valid {
            return Ok(());
        }
        let mut out = String::new();
        self.write(&mut out);
        f.write_str(&out)
    }
}

// Copyright 2021 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fs;
use std::io::BufReader;

use contam_prj::prj::{
    ElementDetails, IndexModel, RawSection, Zone, path_flags, zone_flags,
};
use contam_prj::{ErrorCode, ErrorKind, open_prj};
use float_cmp::approx_eq;

static OFFICE: &str = include_str!("data/office.prj");

/// A document with every optional collection empty.
static MINIMAL: &str = "\
ContamW 3.1 0
minimal
58 66 0 0 293.15 2 0 10 0 0.6 0.28
1 0 56 1 0 0
293.15 101325 0 0 0 1 2 0 0 0
293.15 101325 0 0 0 1 2 0 0 0







0 0 0 0 0
0.001 0.001 00:00:00 Jan01 Dec31 0 0 0
40 -90 -6 0 283.15 2 0
0 0 30 1e-05 1e-05 0.75 0 50 0
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
0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0
0
0 0 0
0 0.01 0 0 3 0
-999
0 ! contaminants:

0 ! species:
-999
0 ! levels plus icon data:
-999
0 ! day-schedules:
-999
0 ! week-schedules:
-999
0 ! wind pressure profiles:
-999
-999
-999
-999
-999
0 ! flow elements:
-999
-999
-999
0 ! control nodes:
-999
0 ! simple AHS:
-999
1 ! zones:
1 3 0 0 0 1 0 30 293.15 0 office -1 0 0 2 0 0 0
-999
0 ! initial zone concentrations:
-999
0 ! flow paths:
-999
-999
-999
-999
-999
-999
-999
-999
* end project file.
";

#[test]
fn test_canonical_file_roundtrips() {
    let model = IndexModel::from_text(OFFICE).unwrap();
    assert!(model.is_valid());
    assert_eq!(OFFICE, model.to_string());
}

#[test]
fn test_second_generation_is_equal() {
    let model = IndexModel::from_text(OFFICE).unwrap();
    let copy = IndexModel::from_text(&model.to_string()).unwrap();
    assert_eq!(model, copy);
}

#[test]
fn test_minimal_document() {
    let model = IndexModel::from_text(MINIMAL).unwrap();
    assert!(model.is_valid());
    assert!(model.species().is_empty());
    assert!(model.contaminants().is_empty());
    assert_eq!(1, model.zones().len());
    assert_eq!("office", model.zones()[0].name);
    assert!(model.zones()[0].ic.is_empty());
    for section in RawSection::ALL {
        assert_eq!("-999\n", model.raw_section(section));
    }

    let copy = IndexModel::from_text(&model.to_string()).unwrap();
    assert_eq!(model, copy);
}

#[test]
fn test_office_contents() {
    let f = fs::File::open("tests/data/office.prj").unwrap();
    let mut f = BufReader::new(f);
    let model = open_prj(&mut f).unwrap();

    assert_eq!("ContamW", model.name());
    assert_eq!("small office test model", model.desc());
    assert_eq!("weather/chicago.wth", model.wth_path());
    assert_eq!("", model.ctm_path());
    assert_eq!("wpc.wpc", model.wpc_file());
    assert_eq!("default pressures", model.wpc_desc());
    assert!(approx_eq!(f64, 41.78, model.latd()));
    assert!(approx_eq!(f64, 4.0, model.ss_weather().windspd.to_double()));
    assert_eq!(1, model.run_control().sim_af);

    assert_eq!(&[1], model.contaminants());
    assert_eq!(2, model.species().len());
    assert_eq!("carbon dioxide", model.species()[0].desc);
    assert_eq!(2, model.levels()[0].icons.len());
    assert_eq!(2, model.day_schedules()[0].points.len());
    assert_eq!(2, model.wind_pressure_profiles()[0].coeffs.len());

    assert_eq!(2, model.airflow_elements().len());
    assert!(matches!(
        model.airflow_elements()[1].details,
        ElementDetails::PlrLeak(_)
    ));
    assert_eq!(2, model.airflow_element_nr_by_name("wall_leak"));
    assert_eq!(0, model.airflow_element_nr_by_name("door"));
    assert!(model.plr_leak1().is_empty());
    assert_eq!(1, model.plr_leak2().len());
    assert!(model.plr_test1().is_empty());
    assert_eq!(1, model.cvf_dat().len());

    let zone = &model.zones()[0];
    assert!(zone.variable_pressure());
    assert_ne!(0, zone.flags & zone_flags::VAR_C);
    assert_eq!(1, zone.ic.len());
    assert_eq!("0.0006", zone.ic[0].to_text());

    let path = &model.airflow_paths()[0];
    assert!(path.is_wind());
    assert_eq!(path_flags::WIND, path.flags);

    assert!(model.raw_section(RawSection::Annotations).contains("! kept exactly as written"));
    assert!(
        model
            .raw_section(RawSection::SourceSinks)
            .starts_with("1 ! source/sinks:\n")
    );
}

#[test]
fn test_comment_lines_are_ignored() {
    let mut commented = String::new();
    for (i, line) in OFFICE.lines().enumerate() {
        if i % 7 == 3 {
            commented.push_str("! interleaved comment\n");
        }
        commented.push_str(line);
        commented.push('\n');
    }
    let plain = IndexModel::from_text(OFFICE).unwrap();
    let model = IndexModel::from_text(&commented).unwrap();
    assert_eq!(plain.zones(), model.zones());
    assert_eq!(plain.airflow_paths(), model.airflow_paths());
    assert_eq!(plain.run_control(), model.run_control());
}

#[test]
fn test_ic_count_must_match() {
    let text = OFFICE.replace(
        "2 ! initial zone concentrations:\n1 0.0006\n2 0.0006\n",
        "3 ! initial zone concentrations:\n1 0.0006\n2 0.0006\n",
    );
    let err = IndexModel::from_text(&text).unwrap_err();
    assert_eq!(ErrorKind::Structure, err.kind);
    assert_eq!(ErrorCode::InitialConditionCount, err.code);
}

#[test]
fn test_ic_order_must_match() {
    let text = OFFICE.replace(
        "1 0.0006\n2 0.0006\n",
        "2 0.0006\n1 0.0006\n",
    );
    let err = IndexModel::from_text(&text).unwrap_err();
    assert_eq!(ErrorCode::InitialConditionOrder, err.code);
}

/// Two contaminants and three zones need six values.
#[test]
fn test_ic_block_for_two_contaminants() {
    let mut model = IndexModel::from_text(OFFICE).unwrap();
    model.species_mut()[1].sflag = 1;
    model.rebuild_contaminants();
    assert_eq!(&[1, 2], model.contaminants());
    model.add_zone(Zone {
        name: "closet".to_owned(),
        ..Default::default()
    });

    let text = model.to_string();
    assert!(text.contains(
        "6 ! initial zone concentrations:\n1 0.0006 0.0\n2 0.0006 0.0\n3 0.0 0.0\n-999\n"
    ));
    let copy = IndexModel::from_text(&text).unwrap();
    assert_eq!(3, copy.zones().len());
    assert_eq!(2, copy.zones()[2].ic.len());

    let five = text.replace("6 ! initial zone", "5 ! initial zone");
    let err = IndexModel::from_text(&five).unwrap_err();
    assert_eq!(ErrorCode::InitialConditionCount, err.code);

    let swapped = text.replace("1 0.0006 0.0\n2 0.0006 0.0\n", "2 0.0006 0.0\n1 0.0006 0.0\n");
    let err = IndexModel::from_text(&swapped).unwrap_err();
    assert_eq!(ErrorCode::InitialConditionOrder, err.code);
}

#[test]
fn test_rebuild_contaminants_renumbers() {
    let mut model = IndexModel::from_text(OFFICE).unwrap();
    let mut species = model.species().to_vec();
    species.reverse();
    model.set_species(species);
    model.rebuild_contaminants();
    assert_eq!("H2O", model.species()[0].name);
    assert_eq!(1, model.species()[0].nr);
    assert_eq!(2, model.species()[1].nr);
    assert_eq!(&[2], model.contaminants());
}

#[test]
fn test_missing_section_terminator() {
    let text = OFFICE.replace("17 20 3 1\n-999\n", "17 20 3 1\n");
    let err = IndexModel::from_text(&text).unwrap_err();
    assert_eq!(ErrorKind::Structure, err.kind);
    assert_eq!(ErrorCode::MissingSectionTerminator, err.code);
    assert!(err.get_details().unwrap().contains("level"));
}

#[test]
fn test_huge_section_count() {
    let text = OFFICE.replace(
        "1 ! levels plus icon data:",
        "99999999999999999 ! levels plus icon data:",
    );
    assert!(IndexModel::from_text(&text).is_err());
}

#[test]
fn test_missing_document_terminator() {
    let text = OFFICE.replace("* end project file.\n", "* end of something\n");
    let err = IndexModel::from_text(&text).unwrap_err();
    assert_eq!(ErrorCode::MissingDocumentTerminator, err.code);

    let truncated = &OFFICE[..OFFICE.len() - "* end project file.\n".len()];
    let err = IndexModel::from_text(truncated).unwrap_err();
    assert_eq!(ErrorKind::EndOfInput, err.kind);
}

#[test]
fn test_unknown_element_type() {
    let text = OFFICE.replace("2 25 plr_leak2 wall_leak", "2 25 plr_bogus wall_leak");
    let err = IndexModel::from_text(&text).unwrap_err();
    assert_eq!(ErrorKind::UnknownVariant, err.kind);
    assert_eq!(ErrorCode::UnknownAirflowElement, err.code);
    assert_eq!(Some(79), err.line);
}

#[test]
fn test_failed_read_writes_nothing() {
    let mut model = IndexModel::new();
    let mut reader = contam_prj::prj::Reader::from_text("ContamW 3.1 zero\n");
    assert!(model.read(&mut reader).is_err());
    assert!(!model.is_valid());
    assert_eq!("", model.to_string());
}

#[test]
fn test_raw_section_replacement() {
    let mut model = IndexModel::from_text(OFFICE).unwrap();
    let exposures = "1 ! exposures:\n! one person\n1 0 0 0\n-999\n";
    model.set_raw_section(RawSection::Exposures, exposures);
    let text = model.to_string();
    assert!(text.contains(exposures));

    let copy = IndexModel::from_text(&text).unwrap();
    assert_eq!(exposures, copy.raw_section(RawSection::Exposures));
}

#[test]
fn test_write_to_file() {
    let model = IndexModel::from_text(OFFICE).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("copy.prj");
    model.write_to(&path).unwrap();
    assert_eq!(OFFICE, fs::read_to_string(&path).unwrap());

    let copy = IndexModel::from_path(&path).unwrap();
    assert_eq!(model, copy);

    let err = IndexModel::from_path(&dir.path().join("missing.prj")).unwrap_err();
    assert_eq!(ErrorKind::Io, err.kind);
}

#[test]
fn test_default_model_is_readable() {
    let mut model = IndexModel::new();
    assert!(!model.is_valid());
    assert_eq!("", model.to_string());

    model.set_valid(true);
    let copy = IndexModel::from_text(&model.to_string()).unwrap();
    assert!(copy.is_valid());
    assert_eq!(model, copy);
}

#[test]
fn test_empty_ic_block_with_contaminants() {
    let text = OFFICE.replace(
        "2 ! initial zone concentrations:\n1 0.0006\n2 0.0006\n-999\n",
        "0 ! initial zone concentrations:\n-999\n",
    );
    let model = IndexModel::from_text(&text).unwrap();
    assert_eq!(&[1], model.contaminants());
    assert!(model.zones().iter().all(|zone| zone.ic.is_empty()));

    assert_eq!(text, model.to_string());
    let copy = IndexModel::from_text(&model.to_string()).unwrap();
    assert_eq!(model, copy);
}

#[test]
fn test_json_roundtrip() {
    let model = IndexModel::from_text(OFFICE).unwrap();
    let json = serde_json::to_string(&model).unwrap();
    let copy: IndexModel = serde_json::from_str(&json).unwrap();
    assert_eq!(model, copy);
    assert_eq!(OFFICE, copy.to_string());
}

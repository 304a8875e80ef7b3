// Copyright 2021 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Infiltration derived from simulated path flows: the share of each
//! exterior path's flow that crosses the envelope in its infiltration
//! direction.

use contam_core::{PathFlowResults, TimeSeries};
use log::warn;

use crate::prj::model::IndexModel;
use crate::prj::path::AMBIENT;

impl IndexModel {
    /// For each zone, the exterior paths that touch it.  A path whose
    /// `pzn` end is ambient is listed as `-nr`; one whose `pzm` end is
    /// ambient as `+nr`.  Zone references outside the model are ignored.
    pub fn zone_exterior_flow_paths(&self) -> Vec<Vec<i32>> {
        let nzones = self.zones().len();
        let mut exterior = vec![vec![]; nzones];
        for path in self.airflow_paths() {
            let (zone, signed_nr) = if path.pzn == AMBIENT {
                (path.pzm, -path.nr)
            } else if path.pzm == AMBIENT {
                (path.pzn, path.nr)
            } else {
                continue;
            };
            if zone >= 1 && zone as usize <= nzones {
                exterior[zone as usize - 1].push(signed_nr);
            }
        }
        exterior
    }

    /// One non-negative infiltration series per zone, summed over the
    /// zone's exterior paths.  Paths missing from `results` contribute
    /// nothing.
    pub fn zone_infiltration(&self, results: &dyn PathFlowResults) -> Vec<TimeSeries> {
        let times = results.date_times();
        self.zone_exterior_flow_paths()
            .into_iter()
            .map(|paths| {
                let mut total = TimeSeries::zeros(times.clone());
                for signed_nr in paths {
                    let Some(flow) = results.path_flow(signed_nr.abs()) else {
                        warn!("no flow results for path {}", signed_nr.abs());
                        continue;
                    };
                    for (sum, value) in total.values.iter_mut().zip(flow.values) {
                        *sum += if signed_nr > 0 {
                            value.max(0.0)
                        } else {
                            (-value).max(0.0)
                        };
                    }
                }
                total
            })
            .collect()
    }

    /// Infiltration through each path in `numbers`.  The first sample is an
    /// initial condition and is dropped whenever there is more than one.
    /// Unknown paths and paths with no ambient end give all-zero series.
    pub fn path_infiltration(
        &self,
        numbers: &[i32],
        results: &dyn PathFlowResults,
    ) -> Vec<TimeSeries> {
        let mut times = results.date_times();
        if times.len() > 1 {
            times.remove(0);
        }
        let paths = self.airflow_paths();
        numbers
            .iter()
            .map(|&nr| {
                let path = match usize::try_from(nr) {
                    Ok(index) if index >= 1 && index <= paths.len() => &paths[index - 1],
                    _ => return TimeSeries::zeros(times.clone()),
                };
                let from_ambient = if path.pzn == AMBIENT {
                    true
                } else if path.pzm == AMBIENT {
                    false
                } else {
                    return TimeSeries::zeros(times.clone());
                };
                let Some(flow) = results.path_flow(nr) else {
                    warn!("no flow results for path {nr}");
                    return TimeSeries::zeros(times.clone());
                };
                let skip = if flow.len() > 1 { 1 } else { 0 };
                let mut values: Vec<f64> = flow
                    .values
                    .into_iter()
                    .skip(skip)
                    .map(|value| {
                        if from_ambient {
                            (-value).max(0.0)
                        } else {
                            value.max(0.0)
                        }
                    })
                    .collect();
                values.resize(times.len(), 0.0);
                TimeSeries::new(times.clone(), values)
            })
            .collect()
    }
}

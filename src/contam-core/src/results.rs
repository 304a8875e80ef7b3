// Copyright 2021 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use serde::{Deserialize, Serialize};

/// A sampled signal: one value per entry in `times`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub times: Vec<f64>,
    pub values: Vec<f64>,
}

impl TimeSeries {
    pub fn new(times: Vec<f64>, values: Vec<f64>) -> Self {
        debug_assert_eq!(times.len(), values.len());
        TimeSeries { times, values }
    }

    pub fn zeros(times: Vec<f64>) -> Self {
        let values = vec![0.0; times.len()];
        TimeSeries { times, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.values.iter().copied())
    }
}

/// Simulation output indexed by airflow path number, as produced by a
/// separate results file.  Flows are signed mass flows; a positive value
/// runs in the path's positive direction.
pub trait PathFlowResults {
    /// The flow history of path `nr` (1-based), if the results contain it.
    fn path_flow(&self, nr: i32) -> Option<TimeSeries>;

    /// Sample times shared by every series.
    fn date_times(&self) -> Vec<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let series = TimeSeries::zeros(vec![0.0, 60.0, 120.0]);
        assert_eq!(3, series.len());
        assert!(series.values.iter().all(|v| *v == 0.0));
        assert!(TimeSeries::default().is_empty());
    }

    #[test]
    fn test_iter_pairs() {
        let series = TimeSeries::new(vec![0.0, 1.0], vec![5.0, -5.0]);
        let pairs: Vec<(f64, f64)> = series.iter().collect();
        assert_eq!(vec![(0.0, 5.0), (1.0, -5.0)], pairs);
    }
}

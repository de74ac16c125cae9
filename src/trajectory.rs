//! Trajectory buffers
//!
//! Fixed-length, contiguous double buffers that the native solver fills in
//! place. Allocated zeroed, seeded from the scenario, read back only after the
//! single solver call returns.

use ndarray::Array2;

use crate::scenario::{BufferLayout, Scenario, Seed};

/// Storage matching a [`BufferLayout`]
#[derive(Debug, Clone, PartialEq)]
pub enum Buffers {
    /// Row-major `steps x vars` array (standard layout, C-contiguous)
    Interleaved(Array2<f64>),
    /// One vector per column, each `steps` long
    Columns(Vec<Vec<f64>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    steps: usize,
    buffers: Buffers,
}

impl Trajectory {
    /// Allocate zeroed buffers for a scenario and apply its seeds
    pub fn allocate(scenario: &Scenario) -> Self {
        let steps = scenario.steps;
        let buffers = match scenario.layout {
            BufferLayout::Interleaved { vars, .. } => {
                Buffers::Interleaved(Array2::<f64>::zeros((steps, vars)))
            }
            BufferLayout::Columns { names } => {
                Buffers::Columns(vec![vec![0.0f64; steps]; names.len()])
            }
        };

        let mut trajectory = Trajectory { steps, buffers };
        for seed in scenario.seeds {
            trajectory.apply_seed(seed);
        }

        log::debug!(
            "[trajectory] allocated {} x {:?} samples for {}",
            steps,
            scenario.layout.column_names(),
            scenario.symbol
        );
        trajectory
    }

    fn apply_seed(&mut self, seed: &Seed) {
        if self.steps == 0 {
            return;
        }
        match *seed {
            Seed::Row { values } => {
                for (col, value) in values.iter().enumerate().take(self.column_count()) {
                    self.set(0, col, *value);
                }
            }
            Seed::First { column, value } => self.set(0, column, value),
            Seed::Fill { column, value } => match &mut self.buffers {
                Buffers::Interleaved(arr) => arr.column_mut(column).fill(value),
                Buffers::Columns(cols) => cols[column].fill(value),
            },
        }
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn column_count(&self) -> usize {
        match &self.buffers {
            Buffers::Interleaved(arr) => arr.ncols(),
            Buffers::Columns(cols) => cols.len(),
        }
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        match &self.buffers {
            Buffers::Interleaved(arr) => arr[[row, col]],
            Buffers::Columns(cols) => cols[col][row],
        }
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        match &mut self.buffers {
            Buffers::Interleaved(arr) => arr[[row, col]] = value,
            Buffers::Columns(cols) => cols[col][row] = value,
        }
    }

    #[cfg(test)]
    fn column(&self, col: usize) -> Vec<f64> {
        match &self.buffers {
            Buffers::Interleaved(arr) => arr.column(col).to_vec(),
            Buffers::Columns(cols) => cols[col].clone(),
        }
    }

    /// Column `y` paired with column `x`, one point per step
    pub fn points(&self, x: usize, y: usize) -> Vec<(f64, f64)> {
        (0..self.steps).map(|i| (self.get(i, x), self.get(i, y))).collect()
    }

    pub fn first_row(&self) -> Vec<f64> {
        (0..self.column_count()).map(|c| self.get(0, c)).collect()
    }

    pub fn buffers(&self) -> &Buffers {
        &self.buffers
    }

    /// Mutable access for the solver adapters
    pub fn buffers_mut(&mut self) -> &mut Buffers {
        &mut self.buffers
    }
}

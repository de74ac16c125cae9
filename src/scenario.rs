//! Scenario configurations
//!
//! One value per driver binary: which symbol to bind, how many steps to take
//! with which step size, how the output buffers are shaped and seeded, and
//! what to plot afterwards.

use serde::Serialize;

/// Shape of the buffers handed to the native solver
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BufferLayout {
    /// One C-contiguous `steps x vars` buffer, one row per step
    Interleaved {
        vars: usize,
        names: &'static [&'static str],
    },
    /// One `steps`-long buffer per named column
    Columns { names: &'static [&'static str] },
}

impl BufferLayout {
    pub fn column_names(&self) -> &'static [&'static str] {
        match self {
            BufferLayout::Interleaved { names, .. } => names,
            BufferLayout::Columns { names } => names,
        }
    }

    pub fn column_count(&self) -> usize {
        match self {
            BufferLayout::Interleaved { vars, .. } => *vars,
            BufferLayout::Columns { names } => names.len(),
        }
    }
}

/// Initial condition written before the solver is called
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Seed {
    /// Write the whole first row of an interleaved buffer
    Row { values: &'static [f64] },
    /// Write element 0 of one column
    First { column: usize, value: f64 },
    /// Constant-initialize a whole column
    Fill { column: usize, value: f64 },
}

/// One plotted line: column `y` against column `x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSpec {
    pub label: &'static str,
    pub x: usize,
    pub y: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scenario {
    pub name: &'static str,
    pub symbol: &'static str,
    pub steps: usize,
    pub dt: f64,
    pub layout: BufferLayout,
    pub seeds: &'static [Seed],
    pub series: &'static [SeriesSpec],
    pub x_label: &'static str,
    pub y_label: &'static str,
}

// ============================================================================
// The five drivers
// ============================================================================

const TIME_STATE: &[&str] = &["t", "x"];
const TIME_TWO_STATES: &[&str] = &["t", "x", "y"];

const X_SERIES: &[SeriesSpec] = &[SeriesSpec { label: "x", x: 0, y: 1 }];

const XY_SERIES: &[SeriesSpec] = &[
    SeriesSpec { label: "x", x: 0, y: 1 },
    SeriesSpec { label: "y", x: 0, y: 2 },
];

/// sin/cos system integrated in one interleaved (t, sin, cos) buffer
pub const TRIG: Scenario = Scenario {
    name: "multi-state",
    symbol: "solve_trig",
    steps: 5000,
    dt: 0.001,
    layout: BufferLayout::Interleaved {
        vars: 3,
        names: &["t", "sin", "cos"],
    },
    seeds: &[Seed::Row {
        values: &[0.0, 0.0, 1.0],
    }],
    series: &[
        SeriesSpec { label: "sin", x: 0, y: 1 },
        SeriesSpec { label: "cos", x: 0, y: 2 },
    ],
    x_label: "time",
    y_label: "value",
};

pub const SINGLE: Scenario = Scenario {
    name: "single-scalar",
    symbol: "solve1",
    steps: 5000,
    dt: 0.001,
    layout: BufferLayout::Columns { names: TIME_STATE },
    seeds: &[],
    series: X_SERIES,
    x_label: "time",
    y_label: "value",
};

pub const TWO_STATE_A: Scenario = Scenario {
    name: "two-state-a",
    symbol: "solve2_1",
    steps: 7000,
    dt: 0.001,
    layout: BufferLayout::Columns {
        names: TIME_TWO_STATES,
    },
    seeds: &[Seed::Fill { column: 2, value: 1.0 }],
    series: XY_SERIES,
    x_label: "time",
    y_label: "value",
};

pub const TWO_STATE_B: Scenario = Scenario {
    name: "two-state-b",
    symbol: "solve2_2",
    steps: 5000,
    dt: 0.001,
    layout: BufferLayout::Columns {
        names: TIME_TWO_STATES,
    },
    seeds: &[Seed::First { column: 1, value: 10.0 }],
    series: XY_SERIES,
    x_label: "time",
    y_label: "value",
};

pub const TWO_STATE_C: Scenario = Scenario {
    name: "two-state-c",
    symbol: "solve2_3",
    steps: 500_000,
    dt: 0.00001,
    layout: BufferLayout::Columns {
        names: TIME_TWO_STATES,
    },
    seeds: &[Seed::First { column: 1, value: 10.0 }],
    series: XY_SERIES,
    x_label: "time",
    y_label: "value",
};

pub static ALL: [Scenario; 5] = [TRIG, SINGLE, TWO_STATE_A, TWO_STATE_B, TWO_STATE_C];

impl Scenario {
    pub fn all() -> &'static [Scenario] {
        &ALL
    }

    /// Total number of doubles across all buffers
    pub fn sample_count(&self) -> usize {
        self.steps * self.layout.column_count()
    }

    /// JSON description used in debug logs
    pub fn describe(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.name.to_string())
    }
}

//! Two-state system C via `solve2_3`: 500000 steps of 1e-5
//!
//! Usage: rk4two3 <library-path>

use std::process::ExitCode;

use rk4_plot_lib::{driver, scenario};

fn main() -> ExitCode {
    driver::run_cli(&scenario::TWO_STATE_C)
}

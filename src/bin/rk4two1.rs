//! Two-state system A via `solve2_1`, y starts at 1
//!
//! Usage: rk4two1 <library-path>

use std::process::ExitCode;

use rk4_plot_lib::{driver, scenario};

fn main() -> ExitCode {
    driver::run_cli(&scenario::TWO_STATE_A)
}

//! Two-state system B via `solve2_2`, x starts at 10
//!
//! Usage: rk4two2 <library-path>

use std::process::ExitCode;

use rk4_plot_lib::{driver, scenario};

fn main() -> ExitCode {
    driver::run_cli(&scenario::TWO_STATE_B)
}

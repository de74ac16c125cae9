//! Single scalar state x(t) via `solve1`
//!
//! Usage: rk4one <library-path>

use std::process::ExitCode;

use rk4_plot_lib::{driver, scenario};

fn main() -> ExitCode {
    driver::run_cli(&scenario::SINGLE)
}

//! sin/cos system in one interleaved (t, sin, cos) buffer via `solve_trig`
//!
//! Usage: rk4multi <library-path>

use std::process::ExitCode;

use rk4_plot_lib::{driver, scenario};

fn main() -> ExitCode {
    driver::run_cli(&scenario::TRIG)
}

//! The parameterized driver shared by all binaries
//!
//! Validate the library path, bind the scenario's symbol, seed the buffers,
//! call the solver once, release the library, then present the chart.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::chart::ChartSpec;
use crate::config::ViewerSettings;
use crate::error::DriverError;
use crate::scenario::Scenario;
use crate::solver::{NativeLoader, Solver, SolverLoader};
use crate::trajectory::Trajectory;
use crate::viewer::{ChartPresenter, TauriViewer};

/// What one successful run did
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub library: PathBuf,
    pub symbol: &'static str,
    pub steps: usize,
    pub dt: f64,
}

/// Resolve the library argument: as given first, then relative to `cwd`.
///
/// The argument is taken as raw `OsStr`, so paths that are not valid UTF-8
/// still resolve. The error names the cwd-joined path, the last one tried.
pub fn resolve_library_path(arg: &OsStr, cwd: &Path) -> Result<PathBuf, DriverError> {
    let given = PathBuf::from(arg);
    if given.is_file() {
        return Ok(given);
    }

    let joined = cwd.join(arg);
    if joined.is_file() {
        return Ok(joined);
    }

    Err(DriverError::LibraryNotFound { path: joined })
}

/// File name shown in the chart title
pub fn library_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Run one scenario end to end
///
/// # Arguments
/// * `args` - Command line arguments without the program name
/// * `cwd` - Directory used to resolve a relative library path
/// * `scenario` - Symbol, buffer shape, seeds and plot setup
/// * `loader` - Binds the solver from the resolved path
/// * `presenter` - Receives the chart after the solver returned
pub fn run<L, P>(
    args: &[OsString],
    cwd: &Path,
    scenario: &Scenario,
    loader: &L,
    presenter: &mut P,
) -> Result<RunReport, DriverError>
where
    L: SolverLoader,
    P: ChartPresenter,
{
    let arg = args.first().ok_or(DriverError::MissingArgument)?;
    if args.len() > 1 {
        log::warn!("[driver] ignoring extra arguments: {:?}", &args[1..]);
    }

    let path = resolve_library_path(arg, cwd)?;
    let library_name = library_file_name(&path);
    log::debug!("[driver] scenario {}", scenario.describe());

    // The solver owns the library handle; it is released at the end of this block.
    let trajectory = {
        let solver = loader.load(&path, scenario)?;
        let mut trajectory = Trajectory::allocate(scenario);
        solver.solve(scenario.steps, scenario.dt, &mut trajectory)?;
        trajectory
    };
    log::info!(
        "[driver] {} from {} returned ({} steps, dt = {})",
        scenario.symbol,
        path.display(),
        scenario.steps,
        scenario.dt
    );

    let chart = ChartSpec::from_trajectory(scenario, &library_name, &trajectory);
    presenter.present(&chart)?;

    Ok(RunReport {
        library: path,
        symbol: scenario.symbol,
        steps: scenario.steps,
        dt: scenario.dt,
    })
}

/// Entry point used by the binaries
pub fn run_cli(scenario: &Scenario) -> ExitCode {
    // Initialize logging
    let _ = env_logger::try_init();

    let args: Vec<OsString> = std::env::args_os().skip(1).collect();
    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Could not determine the working directory: {}", e);
            return ExitCode::from(1);
        }
    };

    let mut viewer = TauriViewer::new(ViewerSettings::load());
    match run(&args, &cwd, scenario, &NativeLoader, &mut viewer) {
        // The Tauri event loop normally exits the process when the window closes
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            // env_logger shows errors by default; keep the message printed once
            if !e.is_validation() {
                log::debug!("[driver] {} failed: {:?}", scenario.symbol, e);
            }
            eprintln!("{}", e);
            ExitCode::from(1)
        }
    }
}

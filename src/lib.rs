//! RK4 plot drivers
//!
//! Loads a native RK4 solver library, calls one exported solver function once
//! and plots the trajectories it wrote into caller-owned buffers.

pub mod chart;
pub mod config;
pub mod driver;
pub mod error;
pub mod scenario;
pub mod solver;
pub mod trajectory;
pub mod viewer;

pub use chart::ChartSpec;
pub use driver::{run, run_cli, RunReport};
pub use error::DriverError;
pub use scenario::Scenario;
pub use solver::{NativeLoader, NativeSolver, Solver, SolverLoader};
pub use trajectory::Trajectory;
pub use viewer::{ChartPresenter, TauriViewer};

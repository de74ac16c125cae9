//! FFI bindings to the native RK4 solver library
//!
//! The solver is compiled separately to a shared library and loaded at runtime.
//! [`Solver`] is the narrow interface the driver calls; [`NativeSolver`] is the
//! adapter that binds one exported symbol and calls it through the C ABI.

use std::path::{Path, PathBuf};
use std::time::Instant;

use libloading::{Library, Symbol};

use crate::error::DriverError;
use crate::scenario::{BufferLayout, Scenario};
use crate::trajectory::{Buffers, Trajectory};

// ============================================================================
// Type definitions for the exported solver signatures
// ============================================================================

/// `void solve_trig(size_t steps, double dt, double* state)`
type SolveInterleaved = unsafe extern "C" fn(steps: usize, dt: f64, state: *mut f64);

/// `void solve1(size_t steps, double dt, double* t, double* x)`
type SolveColumns2 = unsafe extern "C" fn(steps: usize, dt: f64, t: *mut f64, x: *mut f64);

/// `void solve2_N(size_t steps, double dt, double* t, double* x, double* y)`
type SolveColumns3 =
    unsafe extern "C" fn(steps: usize, dt: f64, t: *mut f64, x: *mut f64, y: *mut f64);

/// Calling convention declared for a bound symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverSignature {
    Interleaved { vars: usize },
    Columns2,
    Columns3,
}

impl SolverSignature {
    pub fn for_layout(layout: &BufferLayout) -> Option<Self> {
        match layout {
            BufferLayout::Interleaved { vars, .. } if *vars > 0 => {
                Some(SolverSignature::Interleaved { vars: *vars })
            }
            BufferLayout::Columns { names } => match names.len() {
                2 => Some(SolverSignature::Columns2),
                3 => Some(SolverSignature::Columns3),
                _ => None,
            },
            _ => None,
        }
    }
}

// ============================================================================
// Interfaces
// ============================================================================

/// An external computation that fills trajectory buffers in place
pub trait Solver {
    /// Run the integration once. Blocks until the callee returns.
    fn solve(&self, steps: usize, dt: f64, trajectory: &mut Trajectory) -> Result<(), DriverError>;
}

/// Acquires a [`Solver`] for a scenario from a library path
pub trait SolverLoader {
    type Solver: Solver;

    fn load(&self, path: &Path, scenario: &Scenario) -> Result<Self::Solver, DriverError>;
}

// ============================================================================
// Native adapter
// ============================================================================

/// Loads solvers from shared libraries with `libloading`
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeLoader;

impl SolverLoader for NativeLoader {
    type Solver = NativeSolver;

    fn load(&self, path: &Path, scenario: &Scenario) -> Result<NativeSolver, DriverError> {
        NativeSolver::bind(path, scenario)
    }
}

/// One bound export of a loaded library. The library is closed on drop.
#[derive(Debug)]
pub struct NativeSolver {
    library: Library,
    path: PathBuf,
    symbol: String,
    signature: SolverSignature,
}

impl NativeSolver {
    /// Load the library at `path` and bind the scenario's symbol
    ///
    /// # Arguments
    /// * `path` - Shared library to open
    /// * `scenario` - Supplies the symbol name and the buffer layout
    ///
    /// # Returns
    /// The bound solver, or `LibraryLoad` / `SymbolNotFound` / `UnsupportedLayout`
    pub fn bind(path: &Path, scenario: &Scenario) -> Result<Self, DriverError> {
        let signature = SolverSignature::for_layout(&scenario.layout).ok_or_else(|| {
            DriverError::UnsupportedLayout {
                scenario: scenario.name.to_string(),
            }
        })?;

        let library = unsafe { Library::new(path) }.map_err(|source| DriverError::LibraryLoad {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("[solver] loaded native library from: {}", path.display());

        let solver = NativeSolver {
            library,
            path: path.to_path_buf(),
            symbol: scenario.symbol.to_string(),
            signature,
        };

        // Resolve once up front so a missing export is reported before any buffer work.
        unsafe {
            solver.lookup::<unsafe extern "C" fn()>()?;
        }
        log::info!("[solver] bound {} as {:?}", solver.symbol, solver.signature);

        Ok(solver)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn signature(&self) -> SolverSignature {
        self.signature
    }

    /// Caller must pick `T` matching the symbol's real signature.
    unsafe fn lookup<T>(&self) -> Result<Symbol<'_, T>, DriverError> {
        self.library
            .get(self.symbol.as_bytes())
            .map_err(|source| DriverError::SymbolNotFound {
                symbol: self.symbol.clone(),
                library: self.path.display().to_string(),
                source,
            })
    }
}

fn check_len(expected: usize, actual: usize) -> Result<(), DriverError> {
    if expected == actual {
        Ok(())
    } else {
        Err(DriverError::BufferMismatch { expected, actual })
    }
}

impl Solver for NativeSolver {
    fn solve(&self, steps: usize, dt: f64, trajectory: &mut Trajectory) -> Result<(), DriverError> {
        check_len(steps, trajectory.steps())?;
        let start = Instant::now();

        match (self.signature, trajectory.buffers_mut()) {
            (SolverSignature::Interleaved { vars }, Buffers::Interleaved(arr)) => {
                check_len(steps * vars, arr.len())?;
                check_len(vars, arr.ncols())?;
                let data = arr.as_slice_mut().ok_or(DriverError::BufferMismatch {
                    expected: steps * vars,
                    actual: 0,
                })?;

                unsafe {
                    let func: Symbol<SolveInterleaved> = self.lookup()?;
                    func(steps, dt, data.as_mut_ptr());
                }
            }
            (SolverSignature::Columns2, Buffers::Columns(cols)) => {
                let count = cols.len();
                let [t, x] = cols.as_mut_slice() else {
                    return Err(DriverError::BufferMismatch {
                        expected: 2,
                        actual: count,
                    });
                };
                check_len(steps, t.len())?;
                check_len(steps, x.len())?;

                unsafe {
                    let func: Symbol<SolveColumns2> = self.lookup()?;
                    func(steps, dt, t.as_mut_ptr(), x.as_mut_ptr());
                }
            }
            (SolverSignature::Columns3, Buffers::Columns(cols)) => {
                let count = cols.len();
                let [t, x, y] = cols.as_mut_slice() else {
                    return Err(DriverError::BufferMismatch {
                        expected: 3,
                        actual: count,
                    });
                };
                check_len(steps, t.len())?;
                check_len(steps, x.len())?;
                check_len(steps, y.len())?;

                unsafe {
                    let func: Symbol<SolveColumns3> = self.lookup()?;
                    func(steps, dt, t.as_mut_ptr(), x.as_mut_ptr(), y.as_mut_ptr());
                }
            }
            _ => {
                return Err(DriverError::UnsupportedLayout {
                    scenario: self.symbol.clone(),
                })
            }
        }

        log::info!(
            "[solver] {}({}, {}) returned after {:?}",
            self.symbol,
            steps,
            dt,
            start.elapsed()
        );
        Ok(())
    }
}

impl Drop for NativeSolver {
    fn drop(&mut self) {
        log::debug!("[solver] releasing {}", self.path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario;
    use std::io::Write;

    #[test]
    fn test_signature_for_layouts() {
        assert_eq!(
            SolverSignature::for_layout(&scenario::TRIG.layout),
            Some(SolverSignature::Interleaved { vars: 3 })
        );
        assert_eq!(
            SolverSignature::for_layout(&scenario::SINGLE.layout),
            Some(SolverSignature::Columns2)
        );
        assert_eq!(
            SolverSignature::for_layout(&scenario::TWO_STATE_C.layout),
            Some(SolverSignature::Columns3)
        );
        let four = BufferLayout::Columns {
            names: &["t", "a", "b", "c"],
        };
        assert_eq!(SolverSignature::for_layout(&four), None);
    }

    #[test]
    fn test_bind_rejects_non_library_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not a shared object").unwrap();

        let err = NativeSolver::bind(file.path(), &scenario::SINGLE).unwrap_err();
        assert!(matches!(err, DriverError::LibraryLoad { .. }));
    }

    #[test]
    fn test_bind_unsupported_layout_before_loading() {
        let odd = Scenario {
            layout: BufferLayout::Columns {
                names: &["t", "a", "b", "c"],
            },
            ..scenario::SINGLE
        };
        // Path is never opened: layout is checked first.
        let err = NativeSolver::bind(Path::new("/does/not/exist.so"), &odd).unwrap_err();
        assert!(matches!(err, DriverError::UnsupportedLayout { .. }));
    }

    #[test]
    fn test_check_len() {
        assert!(check_len(3, 3).is_ok());
        assert!(matches!(
            check_len(3, 2),
            Err(DriverError::BufferMismatch { expected: 3, actual: 2 })
        ));
    }
}

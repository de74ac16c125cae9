use std::env;
use std::path::PathBuf;
use std::process::Command;

fn main() {
    // Tauri build
    tauri_build::build();

    // Get the output directory
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Stub solver library used by the integration tests.
    // It exports the same C API as the real RK4 library but writes a known pattern.
    let stub_src = "native/stub_solver.c";
    println!("cargo:rerun-if-changed={}", stub_src);

    let stub_lib = out_dir.join(format!(
        "{}rk4_stub{}",
        env::consts::DLL_PREFIX,
        env::consts::DLL_SUFFIX
    ));

    // Use the C compiler cc detects for this target, but link a shared object
    // ourselves: cc only produces static archives.
    let compiler = cc::Build::new().get_compiler();
    let mut cmd: Command = compiler.to_command();

    if compiler.is_like_msvc() {
        cmd.args(["/nologo", "/LD", "/O2"])
            .arg(stub_src)
            .arg(format!("/Fe{}", stub_lib.display()))
            .arg(format!("/Fo{}\\", out_dir.display()));
    } else {
        cmd.args(["-shared", "-fPIC", "-O2", "-o"])
            .arg(&stub_lib)
            .arg(stub_src);
    }

    let status = cmd
        .status()
        .expect("Failed to run the C compiler. Make sure a C toolchain is installed.");

    if !status.success() {
        panic!("Stub solver library compilation failed!");
    }

    // Set environment variable for the stub library path
    println!("cargo:rustc-env=RK4_STUB_LIB={}", stub_lib.display());
}

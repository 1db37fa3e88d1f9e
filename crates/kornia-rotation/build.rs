use std::env;
use std::fs;
use std::path::Path;

const F32_EXPONENT_VAR: &str = "KORNIA_ROTATION_F32_EPSILON_EXPONENT";
const F64_EXPONENT_VAR: &str = "KORNIA_ROTATION_F64_EPSILON_EXPONENT";

const DEFAULT_F32_EXPONENT: u32 = 6;
const DEFAULT_F64_EXPONENT: u32 = 12;
const MAX_EXPONENT: u32 = 20;

fn read_exponent(var: &str, default: u32) -> u32 {
    println!("cargo:rerun-if-env-changed={var}");

    let Ok(raw) = env::var(var) else {
        return default;
    };

    let exponent: u32 = raw
        .trim()
        .parse()
        .unwrap_or_else(|_| panic!("{var} must be an integer in 0..={MAX_EXPONENT}, got {raw:?}"));

    if exponent > MAX_EXPONENT {
        panic!("{var} must be in 0..={MAX_EXPONENT}, got {exponent}");
    }

    exponent
}

fn main() {
    let f32_exponent = read_exponent(F32_EXPONENT_VAR, DEFAULT_F32_EXPONENT);
    let f64_exponent = read_exponent(F64_EXPONENT_VAR, DEFAULT_F64_EXPONENT);

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let dest = Path::new(&out_dir).join("epsilon.rs");

    let contents = format!(
        "/// Threshold below which `f32` angles and norms are treated as zero.\n\
         pub const F32_EPSILON: f32 = 1e-{f32_exponent};\n\
         /// Threshold below which `f64` angles and norms are treated as zero.\n\
         pub const F64_EPSILON: f64 = 1e-{f64_exponent};\n"
    );

    fs::write(&dest, contents).expect("failed to write epsilon.rs");
    println!("cargo:rerun-if-changed=build.rs");
}

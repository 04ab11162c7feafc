//! Build script for pixmatrix-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates player.toml at compile time
//! - Validates animations/*.maf and generates the embedded animation table

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use pixmatrix_format::inspect;

/// Namespace the animations are listed under
const NAMESPACE: &str = "/animations/";

/// Longest resource name the player accepts
const MAX_NAME_LEN: usize = 32;

/// Largest matrix the codec can stage
const MAX_FRAME_PIXELS: i64 = 1024;

fn main() {
    setup_linker();
    let (width, height) = validate_config();
    embed_animations(width, height);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate player.toml and return the matrix size
fn validate_config() -> (u8, u8) {
    println!("cargo:rerun-if-changed=player.toml");

    let config_content = match fs::read_to_string("player.toml") {
        Ok(content) => content,
        Err(e) => fail("Failed to read player.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in player.toml",
            &e.to_string().lines().map(String::from).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();

    let width = require_int(&config, "matrix", "width", 1, 255, &mut errors);
    let height = require_int(&config, "matrix", "height", 1, 255, &mut errors);
    if let (Some(w), Some(h)) = (width, height) {
        if w * h > MAX_FRAME_PIXELS {
            errors.push(format!(
                "[matrix] {}x{} exceeds {} pixels",
                w, h, MAX_FRAME_PIXELS
            ));
        }
    }

    check_choice(&config, "matrix", "layout", &["serpentine", "progressive"], &mut errors);
    check_int(&config, "player", "cycle_interval_s", 0, 65535, &mut errors);
    check_int(&config, "player", "frame_interval_ms", 1, 65535, &mut errors);
    check_choice(&config, "player", "mode", &["animation", "visualization"], &mut errors);
    check_int(&config, "display", "brightness", 0, 255, &mut errors);
    check_bool(&config, "player", "auto_cycle", &mut errors);
    for key in ["gamma", "serial_mirror"] {
        check_bool(&config, "display", key, &mut errors);
    }

    if !errors.is_empty() {
        fail("Invalid configuration in player.toml", &errors);
    }

    println!("cargo:warning=player.toml validated successfully");
    (width.unwrap_or(0) as u8, height.unwrap_or(0) as u8)
}

/// Validate every animation and write `$OUT_DIR/animations.rs`
fn embed_animations(width: u8, height: u8) {
    println!("cargo:rerun-if-changed=animations");

    let dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap()).join("animations");
    let mut files: Vec<PathBuf> = match fs::read_dir(&dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "maf"))
            .collect(),
        Err(_) => Vec::new(),
    };
    // Namespace order is file name order
    files.sort();

    let mut errors = Vec::new();
    let mut table = Vec::new();

    for path in &files {
        let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
        let name = format!("{}{}", NAMESPACE, file_name);
        if name.len() > MAX_NAME_LEN {
            errors.push(format!("{}: name longer than {} bytes", name, MAX_NAME_LEN));
            continue;
        }

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                errors.push(format!("{}: {}", file_name, e));
                continue;
            }
        };

        match inspect(&bytes) {
            Ok(header) if !header.matches(width, height) => errors.push(format!(
                "{}: {}x{} does not match the {}x{} matrix",
                file_name, header.width, header.height, width, height
            )),
            Ok(header) => {
                println!(
                    "cargo:warning={}: {} frames, {} colors",
                    file_name, header.frame_count, header.palette_len
                );
                table.push((name, path.clone()));
            }
            Err(e) => errors.push(format!("{}: {:?}", file_name, e)),
        }
    }

    if !errors.is_empty() {
        fail("Invalid animations", &errors);
    }
    if table.is_empty() {
        println!("cargo:warning=No animations in animations/, only the splash will show");
    }

    let out = PathBuf::from(env::var("OUT_DIR").unwrap()).join("animations.rs");
    let mut f = File::create(&out).unwrap();
    writeln!(f, "pub const MATRIX_WIDTH: u8 = {};", width).unwrap();
    writeln!(f, "pub const MATRIX_HEIGHT: u8 = {};", height).unwrap();
    writeln!(
        f,
        "pub const MATRIX_PIXELS: usize = {};",
        width as usize * height as usize
    )
    .unwrap();
    writeln!(f, "pub const ANIMATION_NAMESPACE: &str = {:?};", NAMESPACE).unwrap();
    writeln!(f, "pub const MAX_ANIMATIONS: usize = {};", table.len().max(1)).unwrap();
    writeln!(f, "pub static ANIMATIONS: &[(&str, &[u8])] = &[").unwrap();
    for (name, path) in &table {
        writeln!(f, "    ({:?}, include_bytes!({:?})),", name, path_str(path)).unwrap();
    }
    writeln!(f, "];").unwrap();
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn get<'a>(config: &'a toml::Value, section: &str, key: &str) -> Option<&'a toml::Value> {
    config.get(section).and_then(|s| s.get(key))
}

fn require_int(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> Option<i64> {
    if get(config, section, key).is_none() {
        errors.push(format!("[{}] missing '{}'", section, key));
        return None;
    }
    check_int(config, section, key, min, max, errors)
}

fn check_int(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> Option<i64> {
    match get(config, section, key) {
        None => None,
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => Some(*v),
        Some(_) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
            None
        }
    }
}

fn check_bool(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) {
    if let Some(value) = get(config, section, key) {
        if !value.is_bool() {
            errors.push(format!("[{}] {} must be true or false", section, key));
        }
    }
}

fn check_choice(
    config: &toml::Value,
    section: &str,
    key: &str,
    choices: &[&str],
    errors: &mut Vec<String>,
) {
    if let Some(value) = get(config, section, key) {
        if !value.as_str().is_some_and(|v| choices.contains(&v)) {
            errors.push(format!(
                "[{}] {} must be one of: {}",
                section,
                key,
                choices.join(", ")
            ));
        }
    }
}

/// Abort the build with a boxed error report
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        lines
            .iter()
            .map(|line| {
                let truncated = if line.len() > 62 {
                    format!("{}...", &line[..59])
                } else {
                    line.clone()
                };
                format!("║  • {:<62} ║", truncated)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}

//! Build script for shuntcal-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates device.toml and renders it into Rust constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const PROFILES: [&str; 2] = ["interrupt-driven", "polled"];
const PARITIES: [&str; 3] = ["none", "even", "odd"];

/// Upper bound for delay overrides, in milliseconds
const MAX_DELAY_MS: i64 = 10_000;

fn main() {
    setup_linker();
    let config = load_config();
    let device = validate(&config);
    write_constants(&device);
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

/// Validated device settings
struct Device {
    baudrate: u32,
    parity: &'static str,
    profile: &'static str,
    response_pacing_ms: Option<u32>,
    init_interval_ms: Option<u32>,
}

/// Read and parse device.toml
fn load_config() -> toml::Value {
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");
    if !config_path.exists() {
        fail(
            "device.toml not found",
            &["The firmware requires a device.toml in shuntcal-firmware/".to_string()],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read device.toml", &[e.to_string()]),
    };

    match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let lines: Vec<String> = e.to_string().lines().map(str::to_string).collect();
            fail("Invalid TOML syntax in device.toml", &lines)
        }
    }
}

/// Check every field, collecting all problems before failing
fn validate(config: &toml::Value) -> Device {
    let mut errors = Vec::new();

    let uart = config.get("uart").and_then(|v| v.as_table());
    let service = config.get("service").and_then(|v| v.as_table());
    if uart.is_none() {
        errors.push("Missing [uart] section".to_string());
    }
    if service.is_none() {
        errors.push("Missing [service] section".to_string());
    }

    let baudrate = match uart.and_then(|t| t.get("baudrate")) {
        Some(toml::Value::Integer(b)) if (1200..=115_200).contains(b) => *b as u32,
        Some(_) => {
            errors.push("[uart] baudrate must be an integer in 1200-115200".to_string());
            0
        }
        None => 9600,
    };

    let parity = pick(
        uart.and_then(|t| t.get("parity")),
        &PARITIES,
        "none",
        "[uart] parity",
        &mut errors,
    );

    let profile = pick(
        service.and_then(|t| t.get("profile")),
        &PROFILES,
        "interrupt-driven",
        "[service] profile",
        &mut errors,
    );

    let response_pacing_ms = delay_override(service, "response_pacing_ms", &mut errors);
    let init_interval_ms = delay_override(service, "init_interval_ms", &mut errors);

    if !errors.is_empty() {
        fail("Invalid device configuration", &errors);
    }

    println!("cargo:warning=device.toml validated successfully");
    Device {
        baudrate,
        parity,
        profile,
        response_pacing_ms,
        init_interval_ms,
    }
}

/// Match a string field against its allowed values
fn pick(
    value: Option<&toml::Value>,
    allowed: &[&'static str],
    default: &'static str,
    name: &str,
    errors: &mut Vec<String>,
) -> &'static str {
    let Some(value) = value else {
        return default;
    };

    match value.as_str().and_then(|s| allowed.iter().find(|a| **a == s)) {
        Some(found) => *found,
        None => {
            errors.push(format!("{} must be one of: {}", name, allowed.join(", ")));
            default
        }
    }
}

/// Optional millisecond override in [service]
fn delay_override(
    service: Option<&toml::map::Map<String, toml::Value>>,
    key: &str,
    errors: &mut Vec<String>,
) -> Option<u32> {
    match service.and_then(|t| t.get(key)) {
        None => None,
        Some(toml::Value::Integer(ms)) if (0..=MAX_DELAY_MS).contains(ms) => Some(*ms as u32),
        Some(_) => {
            errors.push(format!("[service] {} must be 0-{}", key, MAX_DELAY_MS));
            None
        }
    }
}

/// Render the validated settings as Rust constants in OUT_DIR
fn write_constants(device: &Device) {
    let base = match device.profile {
        "polled" => "DeviceConfig::polled()",
        _ => "DeviceConfig::interrupt_driven()",
    };

    let mut overrides = String::new();
    if let Some(ms) = device.response_pacing_ms {
        overrides.push_str(&format!("    response_pacing_ms: {},\n", ms));
    }
    if let Some(ms) = device.init_interval_ms {
        overrides.push_str(&format!("    init_interval_ms: {},\n", ms));
    }

    let parity = match device.parity {
        "even" => "Parity::Even",
        "odd" => "Parity::Odd",
        _ => "Parity::None",
    };

    let source = format!(
        "// Generated from device.toml by build.rs\n\
         \n\
         /// Service profile\n\
         pub const DEVICE: DeviceConfig = DeviceConfig {{\n\
         {overrides}    ..{base}\n\
         }};\n\
         \n\
         /// Profile name as configured\n\
         pub const PROFILE_NAME: &str = \"{profile}\";\n\
         \n\
         /// Serial line settings\n\
         pub const UART: UartConfig = UartConfig {{\n    \
             baudrate: {baudrate},\n    \
             data_bits: DataBits::Eight,\n    \
             parity: {parity},\n    \
             stop_bits: StopBits::One,\n\
         }};\n",
        overrides = overrides,
        base = base,
        profile = device.profile,
        baudrate = device.baudrate,
        parity = parity,
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("device_config.rs"), source).unwrap();
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
            .map(|e| {
                let e = if e.chars().count() > 62 {
                    format!("{}...", e.chars().take(59).collect::<String>())
                } else {
                    e.clone()
                };
                format!("║  • {:<62} ║", e)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}

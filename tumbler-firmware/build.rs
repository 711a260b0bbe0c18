//! Build script for tumbler-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates device.toml and turns it into Rust constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tumbler_core::config::{report, InputTiming, LinkConfig};

/// SH1106 modules strap their address to one of these
const DISPLAY_ADDRESSES: [u8; 2] = [0x3C, 0x3D];

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DeviceFile {
    link: LinkConfig,
    input: InputTiming,
    display: DisplaySection,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DisplaySection {
    address: u8,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            address: DISPLAY_ADDRESSES[0],
        }
    }
}

fn main() {
    setup_linker();
    let device = load_device_config();
    write_device_config(&device);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse and validate device.toml
fn load_device_config() -> DeviceFile {
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");
    if !config_path.exists() {
        fail("device.toml not found", &["Create one next to Cargo.toml."]);
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read device.toml", &[&e.to_string()]),
    };

    let device: DeviceFile = match toml::from_str(&content) {
        Ok(device) => device,
        Err(e) => {
            let msg = e.to_string();
            let lines: Vec<&str> = msg.lines().collect();
            fail("Invalid device.toml", &lines)
        }
    };

    let mut errors = Vec::new();
    if let Err(e) = device.link.validate() {
        errors.push(format!("[link] {:?}", e));
    }
    if let Err(e) = device.input.validate() {
        errors.push(format!("[input] {:?}", e));
    }
    if !DISPLAY_ADDRESSES.contains(&device.display.address) {
        errors.push(format!(
            "[display] address must be 0x3C or 0x3D, got {:#04X}",
            device.display.address
        ));
    }
    if !errors.is_empty() {
        let refs: Vec<&str> = errors.iter().map(String::as_str).collect();
        fail("Invalid configuration in device.toml", &refs);
    }

    println!("cargo:warning=device.toml validated successfully");
    device
}

/// Emit `device_config.rs` into OUT_DIR
fn write_device_config(device: &DeviceFile) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let link = &device.link;
    let input = &device.input;

    let source = format!(
        "// Generated from device.toml by build.rs\n\
         \n\
         /// Service link settings\n\
         pub const LINK: LinkConfig = LinkConfig {{\n    \
             baudrate: {},\n    \
             timing: LinkTiming {{\n        \
                 wake_hold_us: {},\n        \
                 settle_ms: {},\n        \
                 inter_command_ms: {},\n    \
             }},\n\
         }};\n\
         \n\
         /// Button timing\n\
         pub const INPUT: InputTiming = InputTiming {{\n    \
             debounce_ms: {},\n    \
             long_press_ms: {},\n    \
             repeat_ms: {},\n\
         }};\n\
         \n\
         /// SH1106 I2C address\n\
         pub const DISPLAY_ADDRESS: u8 = {:#04X};\n",
        link.baudrate,
        link.timing.wake_hold_us,
        link.timing.settle_ms,
        link.timing.inter_command_ms,
        input.debounce_ms,
        input.long_press_ms,
        input.repeat_ms,
        device.display.address,
    );

    fs::write(out_dir.join("device_config.rs"), source).unwrap();
}

/// Abort the build with a boxed error message
fn fail(title: &str, details: &[&str]) -> ! {
    let body = details
        .iter()
        .map(|line| {
            let truncated = match report::ellipsis_cut(line, 62) {
                Some(head) => format!("{}{}", head, report::ELLIPSIS),
                None => line.to_string(),
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}

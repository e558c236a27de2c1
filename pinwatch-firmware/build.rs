//! Build script for pinwatch-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates io.toml and compiles it into `$OUT_DIR/io_config.rs`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use pinwatch_core::{parse_pin_string, IoConfig, PinConfig};
use serde::Deserialize;

/// Number of GPIO pins on RP2040
const GPIO_COUNT: u8 = 30;

/// Top-level layout of io.toml
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct IoToml {
    #[serde(default)]
    io: IoConfig,
    poll: PollSection,
    button: ButtonSection,
    led: LedSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PollSection {
    interval_ms: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ButtonSection {
    pin: String,
    debounce_ms: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LedSection {
    pin: String,
}

fn main() {
    setup_linker();
    generate_config();
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
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate io.toml and emit it as Rust constants
fn generate_config() {
    // Re-run if io.toml changes
    println!("cargo:rerun-if-changed=io.toml");

    let config_path = Path::new("io.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: io.toml not found!                                       ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires an io.toml configuration file.            ║\n\
            ║  Please create one in the pinwatch-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read io.toml                                   ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: IoToml = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid io.toml                                          ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    let button = validate_pin("button", &config.button.pin, &mut errors);
    let led = validate_pin("led", &config.led.pin, &mut errors);

    if let (Some(button), Some(led)) = (button, led) {
        if button.pin == led.pin {
            errors.push(format!("[button] and [led] both use gpio{}", button.pin));
        }
    }

    if config.poll.interval_ms == 0 {
        errors.push("[poll] interval_ms must be at least 1".to_string());
    }

    let button_debounce_ms = config
        .button
        .debounce_ms
        .unwrap_or(config.io.default_debounce_ms);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid I/O configuration                                ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    if button_debounce_ms > 0 && button_debounce_ms < config.poll.interval_ms {
        println!(
            "cargo:warning=button debounce ({}ms) is shorter than the poll interval ({}ms)",
            button_debounce_ms, config.poll.interval_ms
        );
    }

    // Both are Some here, errors would have aborted above
    let (Some(button), Some(led)) = (button, led) else {
        unreachable!();
    };

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let generated = render_config(
        &config.io,
        config.poll.interval_ms,
        &button,
        button_debounce_ms,
        &led,
    );
    fs::write(out_dir.join("io_config.rs"), generated).unwrap();

    println!("cargo:warning=io.toml validated successfully");
}

/// Parse a pin string and check it exists on the RP2040
fn validate_pin(section: &str, value: &str, errors: &mut Vec<String>) -> Option<PinConfig> {
    match parse_pin_string(value) {
        Some(pin) if pin.pin < GPIO_COUNT => Some(pin),
        Some(pin) => {
            errors.push(format!(
                "[{}] gpio{} does not exist (0-{})",
                section,
                pin.pin,
                GPIO_COUNT - 1
            ));
            None
        }
        None => {
            errors.push(format!("[{}] invalid pin '{}'", section, value));
            None
        }
    }
}

fn render_config(
    io: &IoConfig,
    poll_interval_ms: u32,
    button: &PinConfig,
    button_debounce_ms: u32,
    led: &PinConfig,
) -> String {
    format!(
        "// Generated from io.toml by build.rs\n\
         \n\
         /// Shared I/O policy\n\
         pub const IO_CONFIG: IoConfig = IoConfig {{\n    \
             invert_input: {},\n    \
             invert_output: {},\n    \
             retain_output_state: {},\n    \
             default_debounce_ms: {},\n    \
             default_pin_mode: PinMode::{:?},\n\
         }};\n\
         \n\
         /// Polling tick interval (ms)\n\
         pub const POLL_INTERVAL_MS: u64 = {};\n\
         \n\
         /// Debounced input\n\
         pub const BUTTON: PinConfig = {};\n\
         \n\
         /// Button debounce duration (ms)\n\
         pub const BUTTON_DEBOUNCE_MS: u32 = {};\n\
         \n\
         /// Output mirroring the debounced button\n\
         pub const LED: PinConfig = {};\n",
        io.invert_input,
        io.invert_output,
        io.retain_output_state,
        io.default_debounce_ms,
        io.default_pin_mode,
        poll_interval_ms,
        render_pin(button),
        button_debounce_ms,
        render_pin(led),
    )
}

fn render_pin(pin: &PinConfig) -> String {
    format!(
        "PinConfig {{ pin: {}, inverted: {}, pull_up: {} }}",
        pin.pin, pin.inverted, pin.pull_up
    )
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

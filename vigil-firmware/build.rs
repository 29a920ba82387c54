//! Build script for vigil-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates vigil.toml at compile time
//! - Renders the validated configuration to `$OUT_DIR/config.rs`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use vigil_core::config::{
    AlertConfig, ConfigError, DisplayHwConfig, DisplayTiming, InitStyle, PanelConfig, PinConfig,
    SamplerConfig,
};

/// Loop timing, kept out of `PanelConfig` since only the binaries use it
struct LoopTiming {
    motion_period_ms: u32,
    intruder_period_ms: u32,
    reset_hold_ms: u32,
    voltmeter_period_ms: u32,
}

fn main() {
    setup_linker();
    let (panel, pclk_hz, timing) = validate_config();
    write_config(&panel, pclk_hz, &timing);
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

/// Validate vigil.toml and build the panel configuration from it
fn validate_config() -> (PanelConfig, u32, LoopTiming) {
    println!("cargo:rerun-if-changed=vigil.toml");

    let config_path = Path::new("vigil.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: vigil.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a vigil.toml configuration file.          ║\n\
            ║  Please create one in the vigil-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read vigil.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in vigil.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    validate_required_sections(&config);

    let mut reader = Reader {
        config: &config,
        errors: Vec::new(),
    };

    let display = read_display(&mut reader);
    let panel = PanelConfig {
        display,
        buzzer: reader.pin("pins", "buzzer"),
        pir: reader.pin("pins", "pir"),
        reset_switch: reader.pin("pins", "reset_switch"),
        alarm_channel: reader.int("sampler", "alarm_channel", 0, 7) as u8,
        diff_channels: reader.channel_pair("sampler", "diff_channels"),
        sampler: SamplerConfig {
            clock_divider: reader.int("sampler", "clock_divider", 0, 255) as u8,
            max_polls: reader.int("sampler", "max_polls", 1, u32::MAX as i64) as u32,
        },
        alert: AlertConfig {
            persistence: reader.int("alert", "persistence", 1, u16::MAX as i64) as u16,
            trigger_below: reader.int("alert", "trigger_below", 0, 4095) as u16,
        },
    };
    let pclk_hz = reader.int("board", "pclk_hz", 1_000_000, 100_000_000) as u32;
    let timing = LoopTiming {
        motion_period_ms: reader.int("loop", "motion_period_ms", 1, 60_000) as u32,
        intruder_period_ms: reader.int("loop", "intruder_period_ms", 1, 60_000) as u32,
        reset_hold_ms: reader.int("loop", "reset_hold_ms", 0, 60_000) as u32,
        voltmeter_period_ms: reader.int("loop", "voltmeter_period_ms", 1, 60_000) as u32,
    };

    error_banner("Invalid configuration values", &reader.errors);

    // Cross-field checks shared with the firmware
    if let Err(e) = panel.validate() {
        error_banner("Inconsistent panel configuration", &[describe(e).to_string()]);
    }

    println!("cargo:warning=vigil.toml validated successfully");
    (panel, pclk_hz, timing)
}

fn read_display(reader: &mut Reader) -> DisplayHwConfig {
    let init_style = match reader.string("display", "init_style").as_deref() {
        Some("paired") | None => InitStyle::Paired,
        Some("nibbles") => InitStyle::Nibbles,
        Some(other) => {
            reader.errors.push(format!(
                "[display] init_style must be 'paired' or 'nibbles', got '{}'",
                other
            ));
            InitStyle::Paired
        }
    };

    let t = "display.timing";
    DisplayHwConfig {
        d4: reader.pin("display", "d4"),
        rs: reader.pin("display", "rs"),
        en: reader.pin("display", "en"),
        timing: DisplayTiming {
            power_up_ms: reader.int(t, "power_up_ms", 0, 1_000) as u32,
            enable_pulse_us: reader.int(t, "enable_pulse_us", 0, 1_000) as u32,
            transfer_settle_us: reader.int(t, "transfer_settle_us", 0, 100_000) as u32,
            command_settle_us: reader.int(t, "command_settle_us", 0, 100_000) as u32,
            data_settle_us: reader.int(t, "data_settle_us", 0, 100_000) as u32,
            clear_settle_us: reader.int(t, "clear_settle_us", 0, 100_000) as u32,
        },
        init_style,
    }
}

/// Typed lookups that record an error and return a placeholder on failure
struct Reader<'a> {
    config: &'a toml::Value,
    errors: Vec<String>,
}

impl Reader<'_> {
    /// Look up `key` in a dotted section path
    fn get(&self, section: &str, key: &str) -> Option<&toml::Value> {
        section
            .split('.')
            .try_fold(self.config, |v, part| v.get(part))
            .and_then(|s| s.get(key))
    }

    fn string(&mut self, section: &str, key: &str) -> Option<String> {
        match self.get(section, key) {
            Some(toml::Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.errors
                    .push(format!("[{}] {} must be a string", section, key));
                None
            }
            None => None,
        }
    }

    fn int(&mut self, section: &str, key: &str, min: i64, max: i64) -> i64 {
        match self.get(section, key) {
            Some(toml::Value::Integer(v)) if (min..=max).contains(v) => *v,
            Some(toml::Value::Integer(_)) => {
                self.errors
                    .push(format!("[{}] {} must be {}-{}", section, key, min, max));
                min
            }
            Some(_) => {
                self.errors
                    .push(format!("[{}] {} must be an integer", section, key));
                min
            }
            None => {
                self.errors.push(format!("[{}] missing '{}'", section, key));
                min
            }
        }
    }

    fn pin(&mut self, section: &str, key: &str) -> PinConfig {
        let Some(spec) = self.string(section, key) else {
            self.errors.push(format!("[{}] missing '{}'", section, key));
            return PinConfig::default();
        };
        match PinConfig::parse(&spec) {
            Ok(pin) => pin,
            Err(_) => {
                self.errors.push(format!(
                    "[{}] {} = '{}' is not a pin (expected P<port>.<pin>)",
                    section, key, spec
                ));
                PinConfig::default()
            }
        }
    }

    fn channel_pair(&mut self, section: &str, key: &str) -> (u8, u8) {
        let pair = match self.get(section, key) {
            Some(toml::Value::Array(items)) if items.len() == 2 => {
                match (items[0].as_integer(), items[1].as_integer()) {
                    (Some(a), Some(b)) if (0..8).contains(&a) && (0..8).contains(&b) => {
                        Some((a as u8, b as u8))
                    }
                    _ => None,
                }
            }
            _ => None,
        };
        pair.unwrap_or_else(|| {
            self.errors.push(format!(
                "[{}] {} must be two channel numbers 0-7",
                section, key
            ));
            (0, 0)
        })
    }
}

fn describe(error: ConfigError) -> &'static str {
    match error {
        ConfigError::InvalidPin => "display d4 must leave room for D5-D7 (pin 28 or lower)",
        ConfigError::PinConflict => "two functions are assigned to the same pin",
        ConfigError::SplitDisplayPort => "display d4, rs and en must be on the same port",
        ConfigError::InvalidTiming => "display timing is below the HD44780 minimum",
        ConfigError::InvalidThreshold => "alert persistence or trigger_below out of range",
        ConfigError::InvalidSampler => "sampler channel or max_polls out of range",
    }
}

/// Validate that required sections exist
fn validate_required_sections(config: &toml::Value) {
    let errors: Vec<String> = ["board", "display", "pins", "sampler", "alert", "loop"]
        .iter()
        .filter(|section| config.get(**section).is_none())
        .map(|section| format!("Missing [{}] section", section))
        .collect();

    error_banner("Missing required sections in vigil.toml", &errors);
}

/// Fail the build with a boxed list of errors, if there are any
fn error_banner(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
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

fn pin_literal(pin: &PinConfig) -> String {
    format!(
        "PinConfig {{ port: {}, pin: {}, inverted: {} }}",
        pin.port, pin.pin, pin.inverted
    )
}

/// Render the configuration as Rust constants
fn write_config(panel: &PanelConfig, pclk_hz: u32, timing: &LoopTiming) {
    let d = &panel.display;
    let t = &d.timing;
    let init_style = match d.init_style {
        InitStyle::Paired => "InitStyle::Paired",
        InitStyle::Nibbles => "InitStyle::Nibbles",
    };

    let source = format!(
        "// Generated by build.rs from vigil.toml\n\
         \n\
         /// Panel wiring and tuning\n\
         pub const PANEL: PanelConfig = PanelConfig {{\n\
         \x20   display: DisplayHwConfig {{\n\
         \x20       d4: {d4},\n\
         \x20       rs: {rs},\n\
         \x20       en: {en},\n\
         \x20       timing: DisplayTiming {{\n\
         \x20           power_up_ms: {power_up},\n\
         \x20           enable_pulse_us: {pulse},\n\
         \x20           transfer_settle_us: {transfer},\n\
         \x20           command_settle_us: {command},\n\
         \x20           data_settle_us: {data},\n\
         \x20           clear_settle_us: {clear},\n\
         \x20       }},\n\
         \x20       init_style: {init_style},\n\
         \x20   }},\n\
         \x20   buzzer: {buzzer},\n\
         \x20   pir: {pir},\n\
         \x20   reset_switch: {reset},\n\
         \x20   alarm_channel: {alarm},\n\
         \x20   diff_channels: ({diff_a}, {diff_b}),\n\
         \x20   sampler: SamplerConfig {{ clock_divider: {clkdiv}, max_polls: {polls} }},\n\
         \x20   alert: AlertConfig {{ persistence: {persistence}, trigger_below: {trigger} }},\n\
         }};\n\
         \n\
         /// Peripheral clock (Hz)\n\
         pub const PCLK_HZ: u32 = {pclk_hz};\n\
         \n\
         pub const MOTION_PERIOD_MS: u32 = {motion};\n\
         pub const INTRUDER_PERIOD_MS: u32 = {intruder};\n\
         /// How long the reset message stays up before sampling resumes\n\
         pub const RESET_HOLD_MS: u32 = {hold};\n\
         pub const VOLTMETER_PERIOD_MS: u32 = {voltmeter};\n",
        d4 = pin_literal(&d.d4),
        rs = pin_literal(&d.rs),
        en = pin_literal(&d.en),
        power_up = t.power_up_ms,
        pulse = t.enable_pulse_us,
        transfer = t.transfer_settle_us,
        command = t.command_settle_us,
        data = t.data_settle_us,
        clear = t.clear_settle_us,
        buzzer = pin_literal(&panel.buzzer),
        pir = pin_literal(&panel.pir),
        reset = pin_literal(&panel.reset_switch),
        alarm = panel.alarm_channel,
        diff_a = panel.diff_channels.0,
        diff_b = panel.diff_channels.1,
        clkdiv = panel.sampler.clock_divider,
        polls = panel.sampler.max_polls,
        persistence = panel.alert.persistence,
        trigger = panel.alert.trigger_below,
        motion = timing.motion_period_ms,
        intruder = timing.intruder_period_ms,
        hold = timing.reset_hold_ms,
        voltmeter = timing.voltmeter_period_ms,
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("config.rs"), source).unwrap();
}

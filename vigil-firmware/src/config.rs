//! Build-time configuration
//!
//! Rendered from `vigil.toml` by `build.rs` after validation, so these
//! values have already passed `PanelConfig::validate`.

use vigil_core::config::{
    AlertConfig, DisplayHwConfig, DisplayTiming, InitStyle, PanelConfig, PinConfig, SamplerConfig,
};

include!(concat!(env!("OUT_DIR"), "/config.rs"));

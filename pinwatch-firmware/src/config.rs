//! Build-time I/O configuration
//!
//! Constants generated from io.toml by build.rs.

use pinwatch_core::{IoConfig, PinConfig, PinMode};

include!(concat!(env!("OUT_DIR"), "/io_config.rs"));

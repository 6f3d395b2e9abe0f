//! Build-time device configuration
//!
//! Rendered from device.toml by build.rs.

use shuntcal_core::DeviceConfig;
use shuntcal_hal::uart::{DataBits, Parity, StopBits, UartConfig};

include!(concat!(env!("OUT_DIR"), "/device_config.rs"));

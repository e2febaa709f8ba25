//! AK8963 3-axis magnetometer driver
//!
//! Reaches the device either directly over I2C or through the MPU-9250's
//! auxiliary I2C master, and polls it without blocking the control loop.
//!
//! ## Usage
//!
//! ```ignore
//! use pico_trail_mag::devices::mag::ak8963::{detect, Ak8963Config, BridgeTransport};
//! use pico_trail_mag::devices::traits::Magnetometer;
//! use pico_trail_mag::platform::SpiRegisters;
//!
//! let transport = BridgeTransport::new(SpiRegisters::new(spi), timer);
//! let mut mag = match detect(transport, Ak8963Config::default()) {
//!     Ok(mag) => mag,
//!     Err(_transport) => return,
//! };
//! mag.init();
//!
//! loop {
//!     if let Some(sample) = mag.poll() {
//!         // use sample
//!     }
//! }
//! ```

pub mod calibration;
pub mod config;
pub mod driver;
pub mod proxy;
pub mod read_cycle;
pub mod registers;
pub mod transport;

pub use calibration::{decode_frame, gain_from_trim, AxisGain};
pub use config::{Ak8963Config, MagMode, ProxyTiming};
pub use driver::{detect, Ak8963};
pub use proxy::{BridgeProxy, QueuedRead};
pub use read_cycle::{ReadCycle, ReadState};
pub use transport::{BridgeTransport, DirectTransport, FrameFetch, MagTransport};

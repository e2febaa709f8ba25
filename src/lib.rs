#![cfg_attr(not(any(test, feature = "mock")), no_std)]

//! pico_trail_mag - AK8963 magnetometer driver for pico_trail
//!
//! This library provides the platform abstraction, the AK8963 driver and its
//! MPU-9250 bridge transport, and the magnetometer capability trait consumed
//! by heading estimation.

// Platform abstraction layer
pub mod platform;

// Device drivers using platform abstraction
pub mod devices;

// Logging and time sources
pub mod core;

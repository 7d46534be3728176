#![no_std]
//! Board support for the flood monitor on an nRF52840.
//!
//! [`FloodBoard`] splits the chip's peripherals into the groups each task
//! owns. The `configure` methods on those groups bring up the drivers.

mod board;
mod resources;

pub use board::*;
pub use resources::*;

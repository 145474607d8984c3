// src/common/mod.rs

pub mod address;
pub mod command;
pub mod error;
pub mod hal_traits;
pub mod timing;
pub mod types;

// Re-export key types for easier access

pub use address::SrfAddr;
pub use command::Command;
pub use error::SrfError;
pub use hal_traits::{SrfInstant, SrfSerial, SrfTimer};
pub use types::{BaudRate, Reading, Status, Unit};

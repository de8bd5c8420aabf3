//! ESP Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Traits, den Farb-Codec und die REST-API als Pure Logic,
//! damit alles auf dem Host getestet werden kann.

#![no_std]

pub mod api;
pub mod color;
pub mod error;
pub mod protocol;
pub mod router;
pub mod strip;
pub mod traits;

// Re-exports für einfachen Zugriff
pub use api::{ApiResponse, CONTENT_TYPE, OutputApi, RESPONSE_HEADERS};
pub use color::{ColorError, HexColor, decode_hex, encode_hex, scale_brightness};
pub use error::ApiError;
pub use protocol::{LedState, OutputState};
pub use router::{Method, Route};
pub use strip::BufferedStrip;
pub use traits::{DigitalOutputs, DriverError, LedStrip, OutputPin, SmartLedWriter};

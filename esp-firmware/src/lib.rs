// Library-Root: Hardware-Anbindung und Tasks der REST-API
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von esp-core
pub use esp_core::{BufferedStrip, OutputApi};

// Embassy Mutex-Typen
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::mutex::Mutex;

use crate::config::{LED_COUNT, OUTPUT_COUNT};
use crate::hal::{GpioOutputs, RmtLedWriter};

// ============================================================================
// Type-Aliase für die Treiber
// ============================================================================
//
// Embassy Tasks dürfen nicht generisch sein, daher konkrete Typen.

/// LED-Strip: Pixel-Buffer im RAM + RMT-Writer
pub type LedStripDriver = BufferedStrip<RmtLedWriter<'static>, LED_COUNT>;

/// GPIO-Outputs laut `config::OUTPUT_PINS`
pub type OutputPinsDriver = GpioOutputs<OUTPUT_COUNT>;

/// REST-API mit beiden Treibern
pub type AppOutputApi = OutputApi<LedStripDriver, OutputPinsDriver>;

/// Gemeinsame API für alle HTTP-Tasks
/// - NoopRawMutex: alle Tasks laufen im selben Executor
pub type SharedOutputApi = Mutex<NoopRawMutex, AppOutputApi>;

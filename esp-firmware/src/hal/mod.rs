// Hardware Abstraction Layer (HAL) Module
//
// Implementiert die Traits aus esp-core für die echte ESP32-C6 Hardware.
// Tests laufen gegen Mocks in esp-tests.

pub mod gpio;
pub mod led_writer;

pub use gpio::GpioOutputs;
pub use led_writer::RmtLedWriter;

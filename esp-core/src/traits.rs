//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

use rgb::RGB8;

/// Fehler-Typ für Treiber-Operationen (LED-Strip und GPIO)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    WriteFailed,
    ReadFailed,
}

/// Trait für SmartLED Hardware-Zugriff
///
/// Abstrahiert das Senden eines kompletten Frames an RGB LEDs (WS2812/Neopixel).
///
/// # Implementierungen
/// - **Production:** RmtLedWriter (ESP32 RMT Peripheral)
/// - **Testing:** MockLedWriter (in-memory Mock)
pub trait SmartLedWriter: Send {
    /// Schreibt alle Pixel-Farben in Strip-Reihenfolge auf die LEDs
    ///
    /// # Fehlerbehandlung
    /// Gibt `DriverError::WriteFailed` zurück wenn Hardware-Zugriff fehlschlägt
    fn write<I: Iterator<Item = RGB8>>(&mut self, pixels: I) -> Result<(), DriverError>;
}

/// Adressierbarer LED-Strip mit Pixel-Buffer
///
/// `set_pixel()` ändert nur den Buffer, erst `show()` überträgt ihn auf die Hardware.
pub trait LedStrip {
    /// Anzahl der Pixel im Strip
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn set_pixel(&mut self, index: usize, color: RGB8) -> Result<(), DriverError>;

    fn pixel(&self, index: usize) -> Result<RGB8, DriverError>;

    /// Überträgt den Buffer auf die LEDs
    fn show(&mut self) -> Result<(), DriverError>;
}

/// Zuordnung logische Output-ID → physischer GPIO-Pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputPin {
    pub id: u32,
    pub pin: u8,
}

/// Digitale Ausgänge (GPIO)
///
/// Die Pins sind bereits als Output konfiguriert, wenn die Implementierung
/// erstellt wurde.
pub trait DigitalOutputs {
    /// Konfigurierte Outputs in fester Reihenfolge
    fn outputs(&self) -> &[OutputPin];

    /// Setzt den Pegel eines Pins (`true` = High)
    fn write(&mut self, pin: u8, on: bool) -> Result<(), DriverError>;

    /// Liest den aktuellen Pegel eines Pins
    fn read(&self, pin: u8) -> Result<bool, DriverError>;
}

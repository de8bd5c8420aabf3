// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
//
// Alles wird einmal beim Start gelesen, nichts ist zur Laufzeit änderbar.

use esp_core::OutputPin;

// ============================================================================
// LED-Strip Konfiguration
// ============================================================================

/// GPIO-Pin für die Datenleitung des Strips (WS2812/Neopixel)
/// Muss zum Peripheral in main.rs passen (GPIO8)
pub const LED_GPIO_PIN: u8 = 8;

/// Anzahl der LEDs im Strip
pub const LED_COUNT: usize = 60;

/// Globale Helligkeit (0-255), wird nur beim Senden angewendet
/// Wert ist gedimmt für Augenschonung
pub const LED_BRIGHTNESS: u8 = 64;

/// RMT Taktfrequenz in MHz
/// 80 MHz ist optimal für WS2812 LED-Timing
pub const RMT_CLOCK_MHZ: u32 = 80;

/// RMT Pulse-Buffer: 24 Bits pro LED (3 Farben * 8 Bits) + 1 Reset
pub const RMT_BUFFER_SIZE: usize = LED_COUNT * 24 + 1;

// ============================================================================
// GPIO-Outputs
// ============================================================================

/// Anzahl der geschalteten GPIO-Outputs
pub const OUTPUT_COUNT: usize = 4;

/// Logische Output-ID → GPIO-Pin
/// Reihenfolge muss zu den Output-Peripherals in main.rs passen
pub const OUTPUT_PINS: [OutputPin; OUTPUT_COUNT] = [
    OutputPin { id: 1, pin: 18 },
    OutputPin { id: 2, pin: 19 },
    OutputPin { id: 3, pin: 20 },
    OutputPin { id: 4, pin: 21 },
];

// ============================================================================
// WiFi Konfiguration
// ============================================================================

/// WiFi SSID (Netzwerk-Name)
/// Wird zur Build-Zeit aus der Environment Variable WIFI_SSID geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_SSID: &str = env!(
    "WIFI_SSID",
    "WiFi SSID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// WiFi Passwort
/// Wird zur Build-Zeit aus der Environment Variable WIFI_PASSWORD geladen
pub const WIFI_PASSWORD: &str = env!(
    "WIFI_PASSWORD",
    "WiFi Password nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Wartezeit nach fehlgeschlagenem Verbindungsversuch
pub const WIFI_RETRY_DELAY_SECS: u64 = 5;

/// Heap-Größe für WiFi (Bytes)
/// WiFi benötigt dynamischen Speicher für Pakete
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
/// picoserve liest Request-Bodies in einen Vec
pub const EXTRA_HEAP_SIZE: usize = 36864; // 36 KB

// ============================================================================
// HTTP Server Konfiguration
// ============================================================================

/// Port der REST-API
pub const HTTP_PORT: u16 = 80;

/// Anzahl paralleler Server-Tasks (je eine Connection gleichzeitig)
/// Muss zu `pool_size` in tasks/http.rs passen
pub const HTTP_TASK_POOL_SIZE: usize = 4;

/// HTTP Buffer-Größe in Bytes
/// Für Request-Line, Headers und Body
pub const HTTP_BUFFER_SIZE: usize = 1024;

/// TCP RX Buffer-Größe in Bytes
pub const TCP_RX_BUFFER_SIZE: usize = 1024;

/// TCP TX Buffer-Größe in Bytes
pub const TCP_TX_BUFFER_SIZE: usize = 1024;

/// JSON-Response Buffer
/// `GET /outputs/` braucht ca. 30 Bytes pro LED: {"id":59,"color":"#rrggbb"},
pub const JSON_RESPONSE_BUFFER_SIZE: usize = 64 + LED_COUNT * 32;

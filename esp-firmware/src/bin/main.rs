// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Heap Allocator (WiFi und picoserve benötigen dynamischen Speicher)
extern crate alloc;

// Embassy Async Runtime
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, Stack, StackResources};
use embassy_time::{Duration, Timer};
use static_cell::StaticCell;

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::rmt::PulseCode;
use esp_hal::rng::Rng;
use esp_hal::timer::timg::TimerGroup;
use esp_hal_smartled::smart_led_buffer;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use esp_output_api::config::{
    EXTRA_HEAP_SIZE, HTTP_TASK_POOL_SIZE, LED_BRIGHTNESS, LED_COUNT, OUTPUT_PINS,
    RMT_BUFFER_SIZE, RMT_CLOCK_MHZ, WIFI_HEAP_SIZE,
};
use esp_output_api::hal::{GpioOutputs, RmtLedWriter};
use esp_output_api::tasks::{connection_task, dhcp_task, http_server_task, net_task};
use esp_output_api::{AppOutputApi, BufferedStrip, LedStripDriver, SharedOutputApi};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert Hardware, WiFi, LED-Strip und GPIO-Outputs,
/// spawnt die Netzwerk- und HTTP-Tasks. Danach schläft main().
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Heap Allocator initialisieren
    // Zwei Bereiche: reclaimed RAM (64 KB) + extra (36 KB)
    esp_alloc::heap_allocator!(
        #[esp_hal::ram(reclaimed)]
        size: WIFI_HEAP_SIZE
    );
    esp_alloc::heap_allocator!(size: EXTRA_HEAP_SIZE);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // ========================================================================
    // LED-Strip
    // ========================================================================

    // RMT Pulse-Buffer muss 'static sein (SmartLedsAdapter hält die Referenz)
    static RMT_BUFFER: StaticCell<[PulseCode; RMT_BUFFER_SIZE]> = StaticCell::new();
    let rmt_buffer = RMT_BUFFER.init(smart_led_buffer!(LED_COUNT));

    let writer = RmtLedWriter::new(
        peripherals.GPIO8,
        peripherals.RMT,
        RMT_CLOCK_MHZ,
        rmt_buffer,
    )
    .expect("Failed to initialize RMT for LED strip");

    // Alle LEDs beim Start ausschalten
    let mut strip: LedStripDriver = BufferedStrip::new(writer, LED_BRIGHTNESS);
    if let Err(e) = strip.clear() {
        defmt::error!("LED: Failed to clear strip at startup: {}", e);
    }
    defmt::info!("LED: Strip cleared, brightness {}/255", strip.brightness());

    // ========================================================================
    // GPIO-Outputs (Reihenfolge wie in config::OUTPUT_PINS)
    // ========================================================================

    let outputs = GpioOutputs::new(
        OUTPUT_PINS,
        [
            Output::new(peripherals.GPIO18, Level::Low, OutputConfig::default()),
            Output::new(peripherals.GPIO19, Level::Low, OutputConfig::default()),
            Output::new(peripherals.GPIO20, Level::Low, OutputConfig::default()),
            Output::new(peripherals.GPIO21, Level::Low, OutputConfig::default()),
        ],
    );

    // Gemeinsame API für alle HTTP-Tasks
    static OUTPUT_API: StaticCell<SharedOutputApi> = StaticCell::new();
    let api = &*OUTPUT_API.init(SharedOutputApi::new(AppOutputApi::new(strip, outputs)));

    defmt::info!(
        "Outputs: {} LEDs, {} GPIO pins ready",
        LED_COUNT,
        OUTPUT_PINS.len()
    );

    // ========================================================================
    // WiFi + Netzwerk-Stack
    // ========================================================================

    static RADIO_INIT: StaticCell<esp_radio::Controller> = StaticCell::new();
    let radio_init =
        RADIO_INIT.init(esp_radio::init().expect("Failed to initialize Wi-Fi/BLE controller"));

    let (wifi_controller, wifi_interface) =
        esp_radio::wifi::new(radio_init, peripherals.WIFI, Default::default())
            .expect("Failed to initialize Wi-Fi");

    // Random seed für TCP/IP Stack (von Hardware RNG)
    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    // Ein Socket pro HTTP-Task + DHCP
    static RESOURCES: StaticCell<StackResources<{ HTTP_TASK_POOL_SIZE + 2 }>> = StaticCell::new();
    let resources = RESOURCES.init(StackResources::new());

    // embassy-net erstellt Stack + Runner (nutzt STA interface für Client-Modus)
    let (stack, runner) = embassy_net::new(
        wifi_interface.sta,
        NetConfig::dhcpv4(Default::default()),
        resources,
        seed,
    );

    // Stack muss 'static sein für Tasks
    static STACK: StaticCell<Stack<'static>> = StaticCell::new();
    let stack = &*STACK.init(stack);

    // ========================================================================
    // Tasks
    // ========================================================================

    spawner.spawn(connection_task(wifi_controller)).unwrap();
    spawner.spawn(net_task(runner)).unwrap();
    spawner.spawn(dhcp_task(stack)).unwrap();

    // Jede Task-Instanz bedient eine Connection gleichzeitig
    for task_id in 0..HTTP_TASK_POOL_SIZE {
        spawner
            .spawn(http_server_task(task_id, stack, api))
            .unwrap();
    }

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}

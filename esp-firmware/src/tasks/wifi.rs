// WiFi Tasks - WLAN-Verbindung, Netzwerk-Stack und DHCP
use defmt::{Debug2Format, error, info, warn};
use embassy_net::{Runner, Stack};
use embassy_time::{Duration, Timer};
use esp_radio::wifi::{ClientConfig, ModeConfig, WifiController, WifiDevice, WifiEvent};

use crate::config::{HTTP_PORT, WIFI_PASSWORD, WIFI_RETRY_DELAY_SECS, WIFI_SSID};

/// Startet den Controller im Station-Modus (falls noch nicht gestartet)
async fn ensure_started(controller: &mut WifiController<'static>) -> bool {
    if !matches!(controller.is_started(), Ok(false)) {
        return true;
    }

    let client_config = ModeConfig::Client(
        ClientConfig::default()
            .with_ssid(WIFI_SSID.into())
            .with_password(WIFI_PASSWORD.into()),
    );

    if let Err(e) = controller.set_config(&client_config) {
        error!("WiFi: Failed to set configuration: {}", Debug2Format(&e));
        return false;
    }

    if let Err(e) = controller.start_async().await {
        error!("WiFi: Failed to start: {}", Debug2Format(&e));
        return false;
    }

    info!("WiFi: Started in station mode");
    true
}

/// WiFi Connection Task
///
/// Verbindet mit dem Access Point und reconnected nach jedem Disconnect.
/// Die REST-API ist erst erreichbar, wenn hier eine Verbindung steht.
#[embassy_executor::task]
pub async fn connection_task(mut controller: WifiController<'static>) {
    info!("WiFi: Starting connection task");

    loop {
        if !ensure_started(&mut controller).await {
            Timer::after(Duration::from_secs(WIFI_RETRY_DELAY_SECS)).await;
            continue;
        }

        info!("WiFi: Connecting to '{}'...", WIFI_SSID);
        if let Err(e) = controller.connect_async().await {
            error!("WiFi: Connection failed: {}", Debug2Format(&e));
            Timer::after(Duration::from_secs(WIFI_RETRY_DELAY_SECS)).await;
            continue;
        }
        info!("WiFi: Connected");

        controller.wait_for_event(WifiEvent::StaDisconnected).await;
        warn!("WiFi: Disconnected from AP, will retry...");

        Timer::after(Duration::from_secs(2)).await;
    }
}

/// Network Task - prozessiert Pakete des embassy-net Stacks
#[embassy_executor::task]
pub async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) -> ! {
    runner.run().await
}

/// DHCP Monitor Task
///
/// Wartet auf eine IP-Adresse und loggt, unter welcher Adresse die
/// REST-API erreichbar ist.
#[embassy_executor::task]
pub async fn dhcp_task(stack: &'static Stack<'static>) {
    stack.wait_link_up().await;
    info!("WiFi: Link is up, waiting for IP address...");

    stack.wait_config_up().await;
    if let Some(config) = stack.config_v4() {
        info!(
            "WiFi: REST-API unter http://{}:{}/outputs/",
            Debug2Format(&config.address.address()),
            HTTP_PORT
        );
        info!("  Gateway: {}", Debug2Format(&config.gateway));
    }
}

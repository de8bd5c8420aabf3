// Task-Modul: Enthält alle Embassy Tasks
//
// Die HTTP-Tasks teilen sich die OutputApi über einen Mutex,
// die WiFi-Tasks halten das Netzwerk am Laufen.

pub mod http;
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use http::http_server_task;
pub use wifi::{connection_task, dhcp_task, net_task};

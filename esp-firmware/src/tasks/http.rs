// HTTP Server Task - REST-API für LED-Strip und GPIO-Outputs
use defmt::{error, info, warn};
use embassy_net::Stack;
use embassy_time::Duration;
use picoserve::io::{Write, embedded_io_async};
use picoserve::request::Request;
use picoserve::response::{Content, IntoResponse, Response, ResponseWriter, StatusCode};
use picoserve::routing::RequestHandlerService;

use esp_core::{CONTENT_TYPE, Method, RESPONSE_HEADERS};

use crate::SharedOutputApi;
use crate::config::*;

/// Fertig gerenderter JSON-Body
///
/// `&str` würde picoserve als `text/plain` ausliefern.
struct JsonBody<'b>(&'b str);

impl Content for JsonBody<'_> {
    fn content_type(&self) -> &'static str {
        CONTENT_TYPE
    }

    fn content_length(&self) -> usize {
        self.0.len()
    }

    async fn write_content<W: Write>(self, mut writer: W) -> Result<(), W::Error> {
        writer.write_all(self.0.as_bytes()).await
    }
}

/// Service für alle Requests
///
/// Routing, Validierung und JSON passieren in `esp_core::OutputApi`,
/// hier wird nur der Request ausgepackt und die Antwort geschrieben.
/// Dadurch bekommen auch unbekannte Pfade einen JSON-Body (404).
struct ApiService {
    api: &'static SharedOutputApi,
}

impl RequestHandlerService<()> for ApiService {
    async fn call_request_handler_service<
        R: embedded_io_async::Read,
        W: ResponseWriter<Error = R::Error>,
    >(
        &self,
        _state: &(),
        _path_parameters: (),
        mut request: Request<'_, R>,
        response_writer: W,
    ) -> Result<picoserve::ResponseSent, W::Error> {
        let method = Method::from_name(request.parts.method());
        let target = request.parts.path().encoded();

        // Body komplett lesen; zu große Bodies werden wie ein leerer Body
        // behandelt und scheitern dann an der Schema-Prüfung
        let body: &[u8] = match request.body_connection.body().read_all().await {
            Ok(body) => body,
            Err(_) => {
                warn!("HTTP: Failed to read request body");
                &[]
            }
        };

        let mut json_buffer = [0u8; JSON_RESPONSE_BUFFER_SIZE];
        let response = {
            // Ein Mutex für alle Treiber-Zugriffe, Lock nur für diesen Request
            let mut api = self.api.lock().await;
            api.handle(method, target, body, &mut json_buffer)
        };

        if response.status >= 500 {
            error!(
                "HTTP: {} {} -> {} {}",
                method.as_str(),
                target,
                response.status,
                response.body
            );
        } else {
            info!(
                "HTTP: {} {} -> {}",
                method.as_str(),
                target,
                response.status
            );
        }

        let connection = request.body_connection.finalize().await?;

        let [allow_origin, allow_methods, allow_headers] = RESPONSE_HEADERS;
        Response::new(StatusCode::new(response.status), JsonBody(response.body))
            .with_header(allow_origin.0, allow_origin.1)
            .with_header(allow_methods.0, allow_methods.1)
            .with_header(allow_headers.0, allow_headers.1)
            .write_to(connection, response_writer)
            .await
    }
}

/// HTTP Server Task - läuft parallel zu anderen Tasks
///
/// **Task Pool:** Diese Task wird `HTTP_TASK_POOL_SIZE`x gespawnt:
/// - Jede Instanz bedient eine Connection gleichzeitig
/// - Hardware-Zugriffe sind über den gemeinsamen Mutex serialisiert
///
/// # Parameter
/// - `task_id`: Eindeutige ID für diese Server-Instanz
/// - `stack`: embassy-net Stack für Netzwerk-Zugriff
/// - `api`: Gemeinsame OutputApi hinter einem Mutex
#[embassy_executor::task(pool_size = HTTP_TASK_POOL_SIZE)]
pub async fn http_server_task(
    task_id: usize,
    stack: &'static Stack<'static>,
    api: &'static SharedOutputApi,
) {
    info!(
        "HTTP: Server task {} starting on port {}...",
        task_id, HTTP_PORT
    );

    let app = picoserve::Router::from_service(ApiService { api });

    // Server-Konfiguration
    let config = picoserve::Config::new(picoserve::Timeouts {
        start_read_request: Some(Duration::from_secs(5)),
        read_request: Some(Duration::from_secs(1)),
        write: Some(Duration::from_secs(1)),
        persistent_start_read_request: Some(Duration::from_secs(5)),
    })
    .keep_connection_alive();

    // HTTP-Buffer für Requests/Responses
    let mut http_buffer = [0u8; HTTP_BUFFER_SIZE];

    // TCP-Buffers für Socket
    let mut rx_buffer = [0u8; TCP_RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TCP_TX_BUFFER_SIZE];

    let server = picoserve::Server::new(&app, &config, &mut http_buffer);

    // task_id ermöglicht mehrere concurrent Server-Instanzen auf einem Port
    let _ = server
        .listen_and_serve(task_id, *stack, HTTP_PORT, &mut rx_buffer, &mut tx_buffer)
        .await;

    info!("HTTP: Server task {} ended", task_id);
}

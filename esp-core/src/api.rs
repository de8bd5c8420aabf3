//! REST-Handler für LED-Strip und GPIO-Outputs
//!
//! `OutputApi` besitzt beide Treiber und ist der einzige Zugriffspunkt auf
//! die Hardware. Die Firmware legt sie hinter einen Mutex, jeder Request
//! läuft also serialisiert.

use rgb::RGB8;

use crate::color::HexColor;
use crate::error::ApiError;
use crate::protocol::{
    ErrorBody, LedBody, LedState, ListWriter, OutputBody, OutputState, SetLedRequest,
    SetOutputRequest, parse_body, write_body,
};
use crate::router::{Method, Route};
use crate::traits::{DigitalOutputs, LedStrip, OutputPin};

/// Fallback falls selbst der Fehler-Body nicht in den Buffer passt
pub const INTERNAL_ERROR_BODY: &str = r#"{"Error":{"Message":"Internal error occurred"}}"#;

/// Content-Type aller Antworten
pub const CONTENT_TYPE: &str = "application/json";

/// CORS-Header, die jede Antwort zusätzlich bekommt
pub const RESPONSE_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, PUT, POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

/// Fertige Antwort: Status + JSON-Body (leer bei 204)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiResponse<'b> {
    pub status: u16,
    pub body: &'b str,
}

impl ApiResponse<'_> {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Ergebnis eines Handlers: Status und Länge des Bodys im Buffer
struct Reply {
    status: u16,
    len: usize,
}

impl Reply {
    fn ok(len: usize) -> Self {
        Self { status: 200, len }
    }
}

pub struct OutputApi<S, P> {
    strip: S,
    outputs: P,
}

impl<S: LedStrip, P: DigitalOutputs> OutputApi<S, P> {
    pub fn new(strip: S, outputs: P) -> Self {
        Self { strip, outputs }
    }

    pub fn strip(&self) -> &S {
        &self.strip
    }

    pub fn strip_mut(&mut self) -> &mut S {
        &mut self.strip
    }

    pub fn outputs(&self) -> &P {
        &self.outputs
    }

    pub fn outputs_mut(&mut self) -> &mut P {
        &mut self.outputs
    }

    // ========================================================================
    // HTTP-Einstieg
    // ========================================================================

    /// Bearbeitet einen Request und schreibt den JSON-Body in `buf`
    ///
    /// Fehler werden nie durchgereicht, sondern als `{"Error":{"Message":...}}`
    /// mit passendem Status beantwortet.
    pub fn handle<'b>(
        &mut self,
        method: Method,
        target: &str,
        body: &[u8],
        buf: &'b mut [u8],
    ) -> ApiResponse<'b> {
        let outcome =
            Route::resolve(method, target).and_then(|route| self.dispatch(route, body, buf));

        let (status, len) = match outcome {
            Ok(reply) => (reply.status, reply.len),
            Err(err) => match write_body(&ErrorBody::from(&err), buf) {
                Ok(len) => (err.status(), len),
                Err(_) => {
                    return ApiResponse {
                        status: ApiError::InternalError.status(),
                        body: INTERNAL_ERROR_BODY,
                    };
                }
            },
        };

        let buf: &'b [u8] = buf;
        match core::str::from_utf8(&buf[..len]) {
            Ok(body) => ApiResponse { status, body },
            Err(_) => ApiResponse {
                status: ApiError::InternalError.status(),
                body: INTERNAL_ERROR_BODY,
            },
        }
    }

    fn dispatch(&mut self, route: Route, body: &[u8], buf: &mut [u8]) -> Result<Reply, ApiError> {
        match route {
            Route::ListLeds => self.write_led_list(buf),
            Route::GetLed(id) => write_body(&LedBody { led: self.led(id)? }, buf).map(Reply::ok),
            Route::SetLed(id) => {
                self.check_led(id)?;
                let request: SetLedRequest = parse_body(body)?;
                let led = self.set_led(id, request.led.color.0)?;
                write_body(&LedBody { led }, buf).map(Reply::ok)
            }
            Route::ListPins => self.write_output_list(buf),
            Route::GetPin(id) => {
                write_body(&OutputBody { output: self.output(id)? }, buf).map(Reply::ok)
            }
            Route::SetPin(id) => {
                self.find_output(id)?;
                let request: SetOutputRequest = parse_body(body)?;
                let output = self.set_output(id, request.output.on)?;
                write_body(&OutputBody { output }, buf).map(Reply::ok)
            }
            Route::SwitchPin { id, on } => {
                write_body(&OutputBody { output: self.set_output(id, on)? }, buf).map(Reply::ok)
            }
            Route::Preflight => Ok(Reply {
                status: 204,
                len: 0,
            }),
        }
    }

    fn write_led_list(&self, buf: &mut [u8]) -> Result<Reply, ApiError> {
        let mut list = ListWriter::begin(buf, "leds")?;
        for index in 0..self.strip.len() {
            let color = self.strip.pixel(index)?;
            list.push(&LedState {
                id: index as u32,
                color: HexColor(color),
            })?;
        }
        list.finish().map(Reply::ok)
    }

    fn write_output_list(&self, buf: &mut [u8]) -> Result<Reply, ApiError> {
        let mut list = ListWriter::begin(buf, "outputs")?;
        for &OutputPin { id, pin } in self.outputs.outputs() {
            let on = self.outputs.read(pin)?;
            list.push(&OutputState { id, pin, on })?;
        }
        list.finish().map(Reply::ok)
    }

    // ========================================================================
    // LED-Strip
    // ========================================================================

    fn check_led(&self, id: u32) -> Result<usize, ApiError> {
        let index = id as usize;
        if index < self.strip.len() {
            Ok(index)
        } else {
            Err(ApiError::LedNotConfigured)
        }
    }

    /// Aktuelle Farbe einer LED
    pub fn led(&self, id: u32) -> Result<LedState, ApiError> {
        let index = self.check_led(id)?;
        let color = self.strip.pixel(index)?;
        Ok(LedState {
            id,
            color: HexColor(color),
        })
    }

    /// Setzt eine LED, überträgt den Strip und liefert den neuen Zustand
    pub fn set_led(&mut self, id: u32, color: RGB8) -> Result<LedState, ApiError> {
        let index = self.check_led(id)?;
        self.strip.set_pixel(index, color)?;
        self.strip.show()?;
        self.led(id)
    }

    // ========================================================================
    // GPIO-Outputs
    // ========================================================================

    fn find_output(&self, id: u32) -> Result<OutputPin, ApiError> {
        self.outputs
            .outputs()
            .iter()
            .find(|output| output.id == id)
            .copied()
            .ok_or(ApiError::OutputNotConfigured)
    }

    /// Aktueller Pegel eines Outputs
    pub fn output(&self, id: u32) -> Result<OutputState, ApiError> {
        let OutputPin { id, pin } = self.find_output(id)?;
        let on = self.outputs.read(pin)?;
        Ok(OutputState { id, pin, on })
    }

    /// Schaltet einen Output und liefert den zurückgelesenen Pegel
    pub fn set_output(&mut self, id: u32, on: bool) -> Result<OutputState, ApiError> {
        let OutputPin { pin, .. } = self.find_output(id)?;
        self.outputs.write(pin, on)?;
        self.output(id)
    }
}

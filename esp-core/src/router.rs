//! Route-Matching für die REST-API
//!
//! Framework-unabhängig: bekommt Methode und Request-Target als Strings,
//! liefert eine `Route` oder den passenden `ApiError`.
//!
//! | Methode | Pfad                 | Route                  |
//! |---------|----------------------|------------------------|
//! | GET     | `/outputs/`          | `ListLeds`             |
//! | GET     | `/outputs/{id}/`     | `GetLed`               |
//! | PUT     | `/outputs/{id}`      | `SetLed`               |
//! | GET     | `/pins/`             | `ListPins`             |
//! | GET     | `/pins/{id}/`        | `GetPin`               |
//! | PUT     | `/pins/{id}`         | `SetPin`               |
//! | POST    | `/pins/{id}/on|off`  | `SwitchPin`            |
//!
//! Der abschließende `/` ist überall optional.

use heapless::Vec;

use crate::error::ApiError;

/// HTTP-Methode (nur die, die die API unterscheidet)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Method {
    Get,
    Put,
    Post,
    Options,
    Other,
}

impl Method {
    /// Methoden-Namen sind case-sensitive (RFC 9110)
    pub fn from_name(name: &str) -> Self {
        match name {
            "GET" => Method::Get,
            "PUT" => Method::Put,
            "POST" => Method::Post,
            "OPTIONS" => Method::Options,
            _ => Method::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Options => "OPTIONS",
            Method::Other => "OTHER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Route {
    ListLeds,
    GetLed(u32),
    SetLed(u32),
    ListPins,
    GetPin(u32),
    SetPin(u32),
    SwitchPin { id: u32, on: bool },
    /// CORS-Preflight auf einen bekannten Pfad
    Preflight,
}

/// Ressource hinter einem Pfad, noch ohne Methode
enum Resource {
    Leds,
    Led(u32),
    Pins,
    Pin(u32),
    PinSwitch(u32, bool),
}

/// Maximale Anzahl Pfad-Segmente (`/pins/{id}/on`)
const MAX_SEGMENTS: usize = 3;

impl Route {
    pub fn resolve(method: Method, target: &str) -> Result<Route, ApiError> {
        let resource = Self::resource(target)?;

        if method == Method::Options {
            return Ok(Route::Preflight);
        }

        match (resource, method) {
            (Resource::Leds, Method::Get) => Ok(Route::ListLeds),
            (Resource::Led(id), Method::Get) => Ok(Route::GetLed(id)),
            (Resource::Led(id), Method::Put) => Ok(Route::SetLed(id)),
            (Resource::Pins, Method::Get) => Ok(Route::ListPins),
            (Resource::Pin(id), Method::Get) => Ok(Route::GetPin(id)),
            (Resource::Pin(id), Method::Put) => Ok(Route::SetPin(id)),
            (Resource::PinSwitch(id, on), Method::Post) => Ok(Route::SwitchPin { id, on }),
            _ => Err(ApiError::MethodNotAllowed),
        }
    }

    fn resource(target: &str) -> Result<Resource, ApiError> {
        let path = match target.split_once('?') {
            Some((path, _query)) => path,
            None => target,
        };
        let path = path.strip_suffix('/').unwrap_or(path);
        let path = path.strip_prefix('/').ok_or(ApiError::NotFound)?;

        let mut segments: Vec<&str, MAX_SEGMENTS> = Vec::new();
        for segment in path.split('/') {
            segments.push(segment).map_err(|_| ApiError::NotFound)?;
        }

        match segments.as_slice() {
            ["outputs"] => Ok(Resource::Leds),
            ["outputs", id] => Ok(Resource::Led(parse_id(id)?)),
            ["pins"] => Ok(Resource::Pins),
            ["pins", id] => Ok(Resource::Pin(parse_id(id)?)),
            ["pins", id, "on"] => Ok(Resource::PinSwitch(parse_id(id)?, true)),
            ["pins", id, "off"] => Ok(Resource::PinSwitch(parse_id(id)?, false)),
            _ => Err(ApiError::NotFound),
        }
    }
}

/// Nur Dezimalziffern; zu große Werte werden auf `u32::MAX` gekappt
/// und scheitern dann an der Konfigurationsprüfung (400 statt 404).
fn parse_id(segment: &str) -> Result<u32, ApiError> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::NotFound);
    }
    Ok(segment.bytes().fold(0u32, |acc, b| {
        acc.saturating_mul(10).saturating_add((b - b'0') as u32)
    }))
}

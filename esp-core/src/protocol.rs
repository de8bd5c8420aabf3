//! JSON-Schema der REST-API
//!
//! Request-Bodies werden typisiert geparst: fehlende oder falsch typisierte
//! Felder führen immer zu `ApiError::InvalidRequestBody`.

use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::error::ApiError;

// ============================================================================
// Requests
// ============================================================================

/// `PUT /outputs/{id}` → `{"led":{"color":"#rrggbb"}}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SetLedRequest {
    pub led: LedUpdate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LedUpdate {
    pub color: HexColor,
}

/// `PUT /pins/{id}` → `{"output":{"on":true}}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SetOutputRequest {
    pub output: OutputUpdate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct OutputUpdate {
    pub on: bool,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedState {
    pub id: u32,
    pub color: HexColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputState {
    pub id: u32,
    pub pin: u8,
    pub on: bool,
}

/// `{"led":{...}}`
#[derive(Debug, Serialize)]
pub struct LedBody {
    pub led: LedState,
}

/// `{"output":{...}}`
#[derive(Debug, Serialize)]
pub struct OutputBody {
    pub output: OutputState,
}

/// `{"Error":{"Message":"..."}}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    #[serde(rename = "Error")]
    pub error: ErrorMessage,
}

#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    #[serde(rename = "Message")]
    pub message: &'static str,
}

impl From<&ApiError> for ErrorBody {
    fn from(err: &ApiError) -> Self {
        Self {
            error: ErrorMessage {
                message: err.message(),
            },
        }
    }
}

/// Schreibt `{"<key>":[...]}` Eintrag für Eintrag in einen Buffer
///
/// Die Einträge werden erst beim Schreiben gelesen, ein Treiber-Fehler
/// bricht den Body also vor dem nächsten Eintrag ab. Der Key muss ein
/// gültiger JSON-Name ohne Escapes sein.
pub struct ListWriter<'b> {
    buf: &'b mut [u8],
    len: usize,
    empty: bool,
}

impl<'b> ListWriter<'b> {
    pub fn begin(buf: &'b mut [u8], key: &str) -> Result<Self, ApiError> {
        let mut list = Self {
            buf,
            len: 0,
            empty: true,
        };
        list.push_raw(b"{\"")?;
        list.push_raw(key.as_bytes())?;
        list.push_raw(b"\":[")?;
        Ok(list)
    }

    pub fn push<T: Serialize>(&mut self, entry: &T) -> Result<(), ApiError> {
        if !self.empty {
            self.push_raw(b",")?;
        }
        self.empty = false;
        self.len += write_body(entry, &mut self.buf[self.len..])?;
        Ok(())
    }

    /// Schließt Array und Objekt, gibt die Gesamtlänge zurück
    pub fn finish(mut self) -> Result<usize, ApiError> {
        self.push_raw(b"]}")?;
        Ok(self.len)
    }

    fn push_raw(&mut self, bytes: &[u8]) -> Result<(), ApiError> {
        let end = self.len + bytes.len();
        self.buf
            .get_mut(self.len..end)
            .ok_or(ApiError::InternalError)?
            .copy_from_slice(bytes);
        self.len = end;
        Ok(())
    }
}

// ============================================================================
// (De-)Serialisierung
// ============================================================================

/// Parst einen Request-Body
pub fn parse_body<'a, T: Deserialize<'a>>(body: &'a [u8]) -> Result<T, ApiError> {
    serde_json_core::from_slice::<T>(body)
        .map(|(value, _)| value)
        .map_err(|_| ApiError::InvalidRequestBody)
}

/// Serialisiert `value` in `buf`, gibt die Anzahl geschriebener Bytes zurück
pub fn write_body<T: Serialize>(value: &T, buf: &mut [u8]) -> Result<usize, ApiError> {
    serde_json_core::to_slice(value, buf).map_err(|_| ApiError::InternalError)
}

//! Fehler-Taxonomie der REST-API
//!
//! Jeder Fehler kennt seinen HTTP-Status und eine feste Meldung für den
//! JSON-Body. Treiber-Details landen nie im Body.

use core::fmt;

use crate::traits::DriverError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ApiError {
    /// LED-ID liegt außerhalb `0..len()` des Strips
    LedNotConfigured,
    /// GPIO-Output-ID ist nicht in der Pin-Tabelle
    OutputNotConfigured,
    /// Body fehlt, ist kein JSON oder passt nicht zum Schema
    InvalidRequestBody,
    /// Kein passender Pfad
    NotFound,
    /// Pfad bekannt, Methode nicht
    MethodNotAllowed,
    /// Treiber-Aufruf fehlgeschlagen
    DriverFailure(DriverError),
    /// Alles andere (z.B. Response-Buffer zu klein)
    InternalError,
}

impl ApiError {
    pub fn status(&self) -> u16 {
        match self {
            ApiError::LedNotConfigured
            | ApiError::OutputNotConfigured
            | ApiError::InvalidRequestBody => 400,
            ApiError::NotFound => 404,
            ApiError::MethodNotAllowed => 405,
            ApiError::DriverFailure(_) | ApiError::InternalError => 500,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ApiError::LedNotConfigured => "The led is not configured to be set",
            ApiError::OutputNotConfigured => "The output is not configured to be set by the app",
            ApiError::InvalidRequestBody => "Invalid request body",
            ApiError::NotFound => "Page not found",
            ApiError::MethodNotAllowed => "Method not allowed",
            ApiError::DriverFailure(_) => "The output hardware reported an error",
            ApiError::InternalError => "Internal error occurred",
        }
    }
}

impl From<DriverError> for ApiError {
    fn from(err: DriverError) -> Self {
        ApiError::DriverFailure(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::DriverFailure(err) => write!(f, "{} ({:?})", self.message(), err),
            _ => f.write_str(self.message()),
        }
    }
}

//! Integration Tests für die REST-API
//!
//! Kompletter Request-Pfad (Routing → Handler → JSON) gegen Mock-Treiber

mod common;

use common::{MockLedWriter, MockOutputs};
use esp_core::{
    BufferedStrip, CONTENT_TYPE, DigitalOutputs, DriverError, LedStrip, Method, OutputApi,
    OutputPin, RESPONSE_HEADERS,
};
use rgb::RGB8;

const STRIP_LENGTH: usize = 60;

const PINS: [OutputPin; 2] = [OutputPin { id: 1, pin: 17 }, OutputPin { id: 2, pin: 27 }];

type TestApi<const N: usize> = OutputApi<BufferedStrip<MockLedWriter, N>, MockOutputs>;

fn api<const N: usize>() -> TestApi<N> {
    OutputApi::new(
        BufferedStrip::new(MockLedWriter::new(), 255),
        MockOutputs::new(&PINS),
    )
}

/// Schickt einen Request durch die API und gibt Status + Body zurück
fn request<S: LedStrip, P: DigitalOutputs>(
    api: &mut OutputApi<S, P>,
    method: &str,
    path: &str,
    body: &str,
) -> (u16, String) {
    let mut buf = [0u8; 4096];
    let response = api.handle(Method::from_name(method), path, body.as_bytes(), &mut buf);
    (response.status, response.body.to_string())
}

fn error_body(message: &str) -> String {
    format!(r#"{{"Error":{{"Message":"{message}"}}}}"#)
}

// ============================================================================
// Tests: LED-Strip
// ============================================================================

#[test]
fn test_get_led_before_any_write_is_off() {
    let mut api = api::<STRIP_LENGTH>();
    let (status, body) = request(&mut api, "GET", "/outputs/0/", "");
    assert_eq!(status, 200);
    assert_eq!(body, r##"{"led":{"id":0,"color":"#000000"}}"##);
}

#[test]
fn test_put_then_get_returns_same_body() {
    let mut api = api::<STRIP_LENGTH>();

    let (status, body) = request(
        &mut api,
        "PUT",
        "/outputs/0",
        r##"{"led":{"color":"#ff0000"}}"##,
    );
    assert_eq!(status, 200);
    assert_eq!(body, r##"{"led":{"id":0,"color":"#ff0000"}}"##);

    let (status, get_body) = request(&mut api, "GET", "/outputs/0/", "");
    assert_eq!(status, 200);
    assert_eq!(get_body, body);
}

#[test]
fn test_put_flushes_strip() {
    let mut api = api::<STRIP_LENGTH>();
    request(
        &mut api,
        "PUT",
        "/outputs/5",
        r##"{"led":{"color":"#00FF00"}}"##,
    );

    let writer = api.strip().writer();
    assert_eq!(writer.write_count, 1);
    assert_eq!(writer.last_frame.len(), STRIP_LENGTH);
    assert_eq!(writer.last_frame[5], RGB8 { r: 0, g: 255, b: 0 });
    assert_eq!(writer.last_frame[4], RGB8::default());
}

#[test]
fn test_put_without_hash_is_normalized() {
    let mut api = api::<STRIP_LENGTH>();
    let (status, body) = request(&mut api, "PUT", "/outputs/3/", r#"{"led":{"color":"A0B1C2"}}"#);
    assert_eq!(status, 200);
    assert_eq!(body, r##"{"led":{"id":3,"color":"#a0b1c2"}}"##);
}

#[test]
fn test_every_configured_led_reports_last_color() {
    let mut api = api::<STRIP_LENGTH>();

    for id in 0..STRIP_LENGTH {
        let color = format!("#{:02x}{:02x}{:02x}", id, 255 - id, id * 2);
        let body = format!(r#"{{"led":{{"color":"{color}"}}}}"#);
        let (status, _) = request(&mut api, "PUT", &format!("/outputs/{id}"), &body);
        assert_eq!(status, 200);
    }

    for id in 0..STRIP_LENGTH {
        let color = format!("#{:02x}{:02x}{:02x}", id, 255 - id, id * 2);
        let (status, body) = request(&mut api, "GET", &format!("/outputs/{id}/"), "");
        assert_eq!(status, 200);
        assert_eq!(body, format!(r#"{{"led":{{"id":{id},"color":"{color}"}}}}"#));
    }
}

#[test]
fn test_get_unconfigured_led() {
    let mut api = api::<STRIP_LENGTH>();
    let (status, body) = request(&mut api, "GET", "/outputs/999/", "");
    assert_eq!(status, 400);
    assert_eq!(body, error_body("The led is not configured to be set"));

    let (status, _) = request(&mut api, "GET", "/outputs/60/", "");
    assert_eq!(status, 400);
}

#[test]
fn test_put_unconfigured_led() {
    let mut api = api::<STRIP_LENGTH>();
    let (status, body) = request(
        &mut api,
        "PUT",
        "/outputs/60",
        r##"{"led":{"color":"#ff0000"}}"##,
    );
    assert_eq!(status, 400);
    assert_eq!(body, error_body("The led is not configured to be set"));
    assert_eq!(api.strip().writer().write_count, 0);
}

#[test]
fn test_put_invalid_bodies_do_not_mutate() {
    let mut api = api::<STRIP_LENGTH>();

    for body in [
        "",
        "not json",
        r#"{"led":{}}"#,
        r##"{"led":{"colour":"#ff0000"}}"##,
        r##"{"color":"#ff0000"}"##,
        r#"{"led":{"color":16711680}}"#,
        r##"{"led":{"color":"#f00"}}"##,
        r##"{"led":{"color":"#ff0000ff"}}"##,
        r##"{"led":{"color":"#gg0000"}}"##,
    ] {
        let (status, response) = request(&mut api, "PUT", "/outputs/0", body);
        assert_eq!(status, 400, "body {body:?}");
        assert_eq!(response, error_body("Invalid request body"));
    }

    assert_eq!(api.strip().writer().write_count, 0);
    assert_eq!(api.strip().pixel(0), Ok(RGB8::default()));
}

#[test]
fn test_list_leds() {
    let mut api = api::<3>();
    request(
        &mut api,
        "PUT",
        "/outputs/1",
        r##"{"led":{"color":"#0000ff"}}"##,
    );

    let (status, body) = request(&mut api, "GET", "/outputs/", "");
    assert_eq!(status, 200);
    assert_eq!(
        body,
        concat!(
            r#"{"leds":["#,
            r##"{"id":0,"color":"#000000"},"##,
            r##"{"id":1,"color":"#0000ff"},"##,
            r##"{"id":2,"color":"#000000"}"##,
            r#"]}"#
        )
    );

    let (status, without_slash) = request(&mut api, "GET", "/outputs", "");
    assert_eq!(status, 200);
    assert_eq!(without_slash, body);
}

#[test]
fn test_driver_failure_on_put() {
    let mut api = api::<STRIP_LENGTH>();
    api.strip_mut().writer_mut().fail_next_write = true;

    let (status, body) = request(
        &mut api,
        "PUT",
        "/outputs/0",
        r##"{"led":{"color":"#ff0000"}}"##,
    );
    assert_eq!(status, 500);
    assert_eq!(body, error_body("The output hardware reported an error"));

    // Nächster Request funktioniert wieder
    let (status, _) = request(
        &mut api,
        "PUT",
        "/outputs/0",
        r##"{"led":{"color":"#ff0000"}}"##,
    );
    assert_eq!(status, 200);
    assert_eq!(api.strip().writer().last_frame[0], RGB8 { r: 255, g: 0, b: 0 });
}

/// Strip, dessen Lesezugriffe immer fehlschlagen
struct BrokenStrip;

impl LedStrip for BrokenStrip {
    fn len(&self) -> usize {
        2
    }

    fn set_pixel(&mut self, _index: usize, _color: RGB8) -> Result<(), DriverError> {
        Ok(())
    }

    fn pixel(&self, _index: usize) -> Result<RGB8, DriverError> {
        Err(DriverError::ReadFailed)
    }

    fn show(&mut self) -> Result<(), DriverError> {
        Ok(())
    }
}

#[test]
fn test_driver_failure_on_list() {
    let mut api = OutputApi::new(BrokenStrip, MockOutputs::new(&PINS));
    let (status, body) = request(&mut api, "GET", "/outputs/", "");
    assert_eq!(status, 500);
    assert_eq!(body, error_body("The output hardware reported an error"));
}

#[test]
fn test_driver_failure_on_single_led() {
    let mut api = OutputApi::new(BrokenStrip, MockOutputs::new(&PINS));
    let (status, body) = request(&mut api, "GET", "/outputs/1/", "");
    assert_eq!(status, 500);
    assert_eq!(body, error_body("The output hardware reported an error"));
}

#[test]
fn test_put_led_read_back_failure() {
    let mut api = OutputApi::new(BrokenStrip, MockOutputs::new(&PINS));
    let (status, body) = request(
        &mut api,
        "PUT",
        "/outputs/0",
        r##"{"led":{"color":"#ff0000"}}"##,
    );
    assert_eq!(status, 500);
    assert_eq!(body, error_body("The output hardware reported an error"));

    // Unbekannte ID bleibt trotzdem ein 400
    let (status, _) = request(&mut api, "GET", "/outputs/2/", "");
    assert_eq!(status, 400);
}

// ============================================================================
// Tests: GPIO-Outputs
// ============================================================================

#[test]
fn test_list_pins() {
    let mut api = api::<1>();
    let (status, body) = request(&mut api, "GET", "/pins/", "");
    assert_eq!(status, 200);
    assert_eq!(
        body,
        r#"{"outputs":[{"id":1,"pin":17,"on":false},{"id":2,"pin":27,"on":false}]}"#
    );
}

#[test]
fn test_switch_pin_on_and_off() {
    let mut api = api::<1>();

    let (status, body) = request(&mut api, "POST", "/pins/2/on", "");
    assert_eq!(status, 200);
    assert_eq!(body, r#"{"output":{"id":2,"pin":27,"on":true}}"#);
    assert!(api.outputs().levels[&27]);

    let (status, body) = request(&mut api, "GET", "/pins/2/", "");
    assert_eq!(status, 200);
    assert_eq!(body, r#"{"output":{"id":2,"pin":27,"on":true}}"#);

    let (status, body) = request(&mut api, "POST", "/pins/2/off/", "");
    assert_eq!(status, 200);
    assert_eq!(body, r#"{"output":{"id":2,"pin":27,"on":false}}"#);
}

#[test]
fn test_put_pin() {
    let mut api = api::<1>();
    let (status, body) = request(&mut api, "PUT", "/pins/1", r#"{"output":{"on":true}}"#);
    assert_eq!(status, 200);
    assert_eq!(body, r#"{"output":{"id":1,"pin":17,"on":true}}"#);

    let (status, body) = request(&mut api, "PUT", "/pins/1", r#"{"output":{}}"#);
    assert_eq!(status, 400);
    assert_eq!(body, error_body("Invalid request body"));
    assert_eq!(api.outputs().write_count, 1);
}

#[test]
fn test_unconfigured_pin() {
    let mut api = api::<1>();
    for (method, path) in [("GET", "/pins/3/"), ("POST", "/pins/3/on"), ("PUT", "/pins/3")] {
        let (status, body) = request(&mut api, method, path, r#"{"output":{"on":true}}"#);
        assert_eq!(status, 400, "{method} {path}");
        assert_eq!(
            body,
            error_body("The output is not configured to be set by the app")
        );
    }
    assert_eq!(api.outputs().write_count, 0);
}

#[test]
fn test_pin_driver_failures() {
    let mut api = api::<1>();
    api.outputs_mut().fail_next_write = true;
    let (status, body) = request(&mut api, "POST", "/pins/1/on", "");
    assert_eq!(status, 500);
    assert_eq!(body, error_body("The output hardware reported an error"));
    assert!(!api.outputs().levels[&17]);

    api.outputs_mut().fail_reads = true;
    let (status, body) = request(&mut api, "GET", "/pins/", "");
    assert_eq!(status, 500);
    assert_eq!(body, error_body("The output hardware reported an error"));

    // Schreiben klappt, Zurücklesen nicht
    let (status, body) = request(&mut api, "PUT", "/pins/1", r#"{"output":{"on":true}}"#);
    assert_eq!(status, 500);
    assert_eq!(body, error_body("The output hardware reported an error"));
    assert!(api.outputs().levels[&17]);

    let (status, _) = request(&mut api, "GET", "/pins/2/", "");
    assert_eq!(status, 500);

    api.outputs_mut().fail_reads = false;
    let (status, body) = request(&mut api, "GET", "/pins/1/", "");
    assert_eq!(status, 200);
    assert_eq!(body, r#"{"output":{"id":1,"pin":17,"on":true}}"#);
}

// ============================================================================
// Tests: Routing & Fehler
// ============================================================================

#[test]
fn test_unmatched_route() {
    let mut api = api::<STRIP_LENGTH>();
    let (status, body) = request(&mut api, "GET", "/nonexistent", "");
    assert_eq!(status, 404);
    assert_eq!(body, error_body("Page not found"));

    let (status, _) = request(&mut api, "GET", "/outputs/abc/", "");
    assert_eq!(status, 404);
}

#[test]
fn test_method_not_allowed() {
    let mut api = api::<STRIP_LENGTH>();
    let (status, body) = request(&mut api, "DELETE", "/outputs/1", "");
    assert_eq!(status, 405);
    assert_eq!(body, error_body("Method not allowed"));
}

#[test]
fn test_preflight() {
    let mut api = api::<STRIP_LENGTH>();
    let (status, body) = request(&mut api, "OPTIONS", "/outputs/1", "");
    assert_eq!(status, 204);
    assert!(body.is_empty());
}

#[test]
fn test_small_buffer_yields_internal_error() {
    let mut api = api::<STRIP_LENGTH>();
    let mut buf = [0u8; 16];
    let response = api.handle(Method::Get, "/outputs/", b"", &mut buf);
    assert_eq!(response.status, 500);
    assert_eq!(response.body, error_body("Internal error occurred"));
    assert!(!response.is_success());
}

#[test]
fn test_list_overflow_reports_internal_error() {
    let mut api = api::<STRIP_LENGTH>();
    // Fehler-Body passt noch, die Liste nicht mehr
    let mut buf = [0u8; 128];
    let response = api.handle(Method::Get, "/outputs/", b"", &mut buf);
    assert_eq!(response.status, 500);
    assert_eq!(response.body, error_body("Internal error occurred"));
}

#[test]
fn test_response_headers() {
    assert_eq!(CONTENT_TYPE, "application/json");
    assert!(RESPONSE_HEADERS.contains(&("Access-Control-Allow-Origin", "*")));
    // Content-Type kommt vom Body, nicht aus der Header-Liste
    assert!(
        RESPONSE_HEADERS
            .iter()
            .all(|(name, _)| !name.eq_ignore_ascii_case("Content-Type"))
    );
}


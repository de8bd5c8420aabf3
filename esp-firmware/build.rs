// Build-Script: Wird vor dem Kompilieren ausgeführt
// WiFi-Credentials aus .env + Linker-Setup für ESP32-C6

/// Variablen, die config.rs per env! einliest
const ENV_KEYS: [&str; 2] = ["WIFI_SSID", "WIFI_PASSWORD"];

/// Linker-Hinweise: Symbol-Präfix → Tipp
const LINKER_HINTS: [(&str, &str); 4] = [
    (
        "_defmt_",
        "`defmt` not found - is `defmt.x` passed as a linker script?",
    ),
    ("_stack_start", "Is the linker script `linkall.x` missing?"),
    (
        "esp_rtos_",
        "`esp-radio` has no scheduler - call `esp_rtos::start` in main.",
    ),
    (
        "malloc",
        "Heap symbols missing - is `esp-alloc` a dependency of the firmware?",
    ),
];

fn main() {
    // Vom Linker als --error-handling-script aufgerufen?
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        linker_hint(&args[1], args.get(2).map(String::as_str).unwrap_or(""));
    }

    // Ohne .env müssen WIFI_SSID/WIFI_PASSWORD als ENV vars gesetzt sein
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  .env file nicht gefunden: {}", e);
        eprintln!("   Setze {} als Environment-Variablen", ENV_KEYS.join(" und "));
    }

    // Werte werden zur Compile-Zeit in den Code eingebacken
    for key in ENV_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
        if let Ok(value) = std::env::var(key) {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
    println!("cargo:rerun-if-changed=.env");

    // Dieses Script als Error-Handler beim Linker registrieren
    match std::env::current_exe() {
        Ok(exe) => println!(
            "cargo:rustc-link-arg=--error-handling-script={}",
            exe.display()
        ),
        Err(e) => eprintln!("⚠️  Linker-Hinweise deaktiviert: {}", e),
    }

    // defmt.x: Symbole für defmt's binäres Log-Format
    println!("cargo:rustc-link-arg=-Tdefmt.x");

    // linkall.x: Flash/RAM-Layout und Startup-Code, muss als LETZTES kommen
    println!("cargo:rustc-link-arg=-Tlinkall.x");
}

/// Gibt einen Tipp für ein undefiniertes Symbol aus und beendet das Script
fn linker_hint(kind: &str, symbol: &str) -> ! {
    if kind != "undefined-symbol" {
        std::process::exit(1);
    }

    if let Some((_, hint)) = LINKER_HINTS
        .iter()
        .find(|(prefix, _)| symbol.starts_with(prefix))
    {
        eprintln!();
        eprintln!("💡 {}", hint);
        eprintln!();
    }
    std::process::exit(0);
}

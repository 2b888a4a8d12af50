//! WASM bindings for VIN and odometer extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js,
//! next to an in-browser text recognizer.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use fieldread_core::extract::{detect_distance_unit, has_valid_check_digit};
use fieldread_core::{extract_from_lines, ExtractionResult, FieldKind};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: Serialize>(result: &ExtractionResult<T>) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(result).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_kind(kind: &str) -> Result<FieldKind, JsValue> {
    kind.parse::<FieldKind>().map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract a VIN from recognized text.
#[wasm_bindgen(js_name = extractVin)]
pub fn extract_vin(text: &str) -> Result<JsValue, JsValue> {
    to_js(&fieldread_core::extract_vin(text))
}

/// Extract an odometer reading from recognized text.
#[wasm_bindgen(js_name = extractMileage)]
pub fn extract_mileage(text: &str) -> Result<JsValue, JsValue> {
    to_js(&fieldread_core::extract_mileage(text))
}

/// Extract a field by name ("vin" or "mileage").
#[wasm_bindgen]
pub fn extract(text: &str, kind: &str) -> Result<JsValue, JsValue> {
    to_js(&fieldread_core::extract(text, parse_kind(kind)?))
}

/// Validate the check digit of a 17-character VIN.
#[wasm_bindgen(js_name = hasValidVinCheckDigit)]
pub fn has_valid_vin_check_digit(vin: &str) -> bool {
    has_valid_check_digit(vin)
}

/// Distance unit ("km" or "mi") mentioned in the text, if any.
#[wasm_bindgen(js_name = detectDistanceUnit)]
pub fn detect_unit(text: &str) -> Option<String> {
    detect_distance_unit(text).map(|unit| unit.symbol().to_string())
}

/// Lines collected from a browser-side text recognizer for one frame.
#[wasm_bindgen]
pub struct RecognizedFrame {
    lines: Vec<String>,
}

#[wasm_bindgen]
impl RecognizedFrame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one recognized line.
    #[wasm_bindgen(js_name = addLine)]
    pub fn add_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    /// All lines joined with newlines.
    #[wasm_bindgen(js_name = text)]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Extract a field by name from the collected lines.
    #[wasm_bindgen]
    pub fn extract(&self, kind: &str) -> Result<JsValue, JsValue> {
        to_js(&extract_from_lines(&self.lines, parse_kind(kind)?))
    }
}

impl Default for RecognizedFrame {
    fn default() -> Self {
        Self::new()
    }
}

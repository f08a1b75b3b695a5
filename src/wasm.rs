use js_sys::{Array, Object, Reflect, Uint8Array};
use wasm_bindgen::prelude::*;

use crate::normalize::Normalization;

/// Build the 9×3 palette for an encoded image held in memory.
///
/// Returns `{ image: Uint8Array, palette: string[] }` where `image` is the PNG
/// palette and `palette` lists the 27 cells as `RRGGBB`, row by row.
#[wasm_bindgen(js_name = generatePalette)]
pub fn generate_palette(input: Vec<u8>, contrast: Option<bool>) -> Result<Object, JsValue> {
    let mode = if contrast.unwrap_or(false) {
        Normalization::Contrast
    } else {
        Normalization::Brightness
    };
    let (png, palette_hex) = crate::palette_bytes(&input, mode)
        .map_err(|e| JsValue::from_str(&format!("Unable to build palette: {e}")))?;

    let palette_js = Array::new();
    for hex in palette_hex {
        palette_js.push(&JsValue::from_str(&hex));
    }

    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("image"), &Uint8Array::from(png.as_slice()))?;
    Reflect::set(&result, &JsValue::from_str("palette"), &palette_js)?;
    Ok(result)
}

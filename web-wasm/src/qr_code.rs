//! QRコード描画（外部JSライブラリ）

use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

#[wasm_bindgen(module = "/js/qr-code.js")]
extern "C" {
    #[wasm_bindgen(js_name = "renderQrCode")]
    fn render_qr_code_js(target: &HtmlElement, text: &str, size: u32) -> bool;
}

/// `target` にペイロードのQRコードを描画する。ライブラリ未読込なら描画しない
pub fn render_qr_code(target: &HtmlElement, payload: &str, size: u32) -> bool {
    let rendered = render_qr_code_js(target, payload, size);
    if !rendered {
        gloo::console::debug!("QRCode library unavailable, skipping code render");
    }
    rendered
}

// Console logging and small formatting helpers shared by the core and the views.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

pub fn clog(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&JsValue::from_str(msg));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg; // no console outside the browser (unit tests)
}

pub fn cwarn(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(msg));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

pub fn cerror(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&JsValue::from_str(msg));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

/// "cumulative / maximum", as shown on the scoreboard and the end screen.
pub fn format_tally(cumulative: u32, maximum: u32) -> String {
    format!("{} / {}", cumulative, maximum)
}

/// Expands the `{id}` placeholder of a photo URL template.
pub fn photo_url(template: &str, photo_id: &str) -> String {
    template.replace("{id}", photo_id)
}

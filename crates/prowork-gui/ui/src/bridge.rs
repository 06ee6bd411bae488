use std::time::Duration;

use gloo::console::log;
use gloo::timers::future::TimeoutFuture;
use prowork_core::Dialogs;
use wasm_bindgen::JsValue;

const TAURI_INTERNALS_KEY: &str =
  "__TAURI_INTERNALS__";

/// True once the host has injected its
/// command interface into the page.
pub fn host_available() -> bool {
  web_sys::window()
    .map(|window| {
      js_sys::Reflect::has(
        &window,
        &JsValue::from_str(
          TAURI_INTERNALS_KEY
        )
      )
      .unwrap_or(false)
    })
    .unwrap_or(false)
}

pub fn sleep(
  delay: Duration
) -> TimeoutFuture {
  let millis =
    u32::try_from(delay.as_millis())
      .unwrap_or(u32::MAX);
  TimeoutFuture::new(millis)
}

/// `window.alert` / `window.confirm`.
pub struct BrowserDialogs;

impl Dialogs for BrowserDialogs {
  fn alert(&self, message: &str) {
    let shown = web_sys::window()
      .map(|window| {
        window
          .alert_with_message(message)
          .is_ok()
      })
      .unwrap_or(false);
    if !shown {
      tracing::warn!(
        message,
        "could not show alert"
      );
    }
  }

  fn confirm(&self, message: &str) -> bool {
    web_sys::window()
      .and_then(|window| {
        window
          .confirm_with_message(message)
          .ok()
      })
      .unwrap_or(false)
  }
}

pub fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}

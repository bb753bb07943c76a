//! Bridge to the tour player runtime.
//!
//! The player exposes a `TourHelpers` helper object and a `tour` object on
//! `window`; both appear asynchronously after the player boots, so every
//! accessor here tolerates their absence and `wait_until_ready` polls for
//! them with a hard timeout. Only synchronous getters exist on the host
//! side, which is why locale changes are polled rather than subscribed.

use catalog::CatalogError;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::{JsCast, JsValue};

fn global_object(name: &str) -> Option<JsValue> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(window.as_ref(), &JsValue::from_str(name)).ok()?;
    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value)
    }
}

fn method_of(target: &JsValue, name: &str) -> Option<js_sys::Function> {
    js_sys::Reflect::get(target, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<js_sys::Function>()
        .ok()
}

fn call_helper(name: &str, args: &[JsValue]) -> Result<JsValue, String> {
    let helpers = global_object("TourHelpers").ok_or("TourHelpers is not available")?;
    let function =
        method_of(&helpers, name).ok_or_else(|| format!("TourHelpers.{name} is not a function"))?;
    let result = match args {
        [] => function.call0(&helpers),
        [only] => function.call1(&helpers, only),
        _ => {
            let list = js_sys::Array::new();
            for arg in args {
                list.push(arg);
            }
            function.apply(&helpers, &list)
        }
    };
    result.map_err(|e| format!("TourHelpers.{name} failed: {e:?}"))
}

/// The tour is ready once the helper object and its component lookup exist.
pub fn is_ready() -> bool {
    global_object("TourHelpers")
        .as_ref()
        .and_then(|helpers| method_of(helpers, "getComponentByName"))
        .is_some()
}

/// Polls for the tour runtime, giving up after `timeout_ms`.
pub async fn wait_until_ready(poll_ms: u32, timeout_ms: u32) -> Result<(), CatalogError> {
    let mut waited = 0u32;
    loop {
        if is_ready() {
            return Ok(());
        }
        if waited >= timeout_ms {
            return Err(CatalogError::HostUnavailable { waited_ms: waited });
        }
        TimeoutFuture::new(poll_ms).await;
        waited += poll_ms;
    }
}

/// Resolves a named panel component to its DOM element.
pub fn panel_by_name(name: &str) -> Option<web_sys::HtmlElement> {
    call_helper("getComponentByName", &[JsValue::from_str(name)])
        .ok()?
        .dyn_into::<web_sys::HtmlElement>()
        .ok()
}

pub fn current_locale() -> Option<String> {
    call_helper("getCurrentLanguage", &[]).ok()?.as_string()
}

/// Label of the media the player is currently displaying.
pub fn current_media_name() -> Option<String> {
    call_helper("getCurrentMediaName", &[]).ok()?.as_string()
}

/// Switches the player to the named media (`window.tour.setMediaByName`).
pub fn navigate_to_media(media_id: &str) -> Result<(), String> {
    let tour = global_object("tour").ok_or("tour runtime is not available")?;
    let set_media =
        method_of(&tour, "setMediaByName").ok_or("tour.setMediaByName is not a function")?;
    set_media
        .call1(&tour, &JsValue::from_str(media_id))
        .map_err(|e| format!("tour.setMediaByName({media_id}) failed: {e:?}"))?;
    Ok(())
}

//! Async loaders for the font JSON and the particle sprites.

use js_sys::Promise;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlImageElement, Response};

use crate::error::{Result, SceneError};

pub async fn fetch_text(url: &str) -> Result<String> {
    let window = web_sys::window().ok_or(SceneError::Missing("window"))?;
    let response: Response = JsFuture::from(window.fetch_with_str(url))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(SceneError::Js(format!(
            "GET {url} returned {}",
            response.status()
        )));
    }
    JsFuture::from(response.text()?)
        .await?
        .as_string()
        .ok_or(SceneError::Missing("response body"))
}

/// Resolves once the browser has decoded the image.
pub async fn load_image(url: &str) -> Result<HtmlImageElement> {
    let image = HtmlImageElement::new()?;
    let promise = Promise::new(&mut |resolve, reject| {
        let onload = Closure::once_into_js(move || {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let onerror = Closure::once_into_js(move || {
            let _ = reject.call0(&JsValue::NULL);
        });
        image.set_onload(Some(onload.unchecked_ref()));
        image.set_onerror(Some(onerror.unchecked_ref()));
    });
    image.set_src(url);

    let loaded = JsFuture::from(promise).await;
    image.set_onload(None);
    image.set_onerror(None);
    loaded.map_err(|_| SceneError::Js(format!("failed to load image {url}")))?;
    Ok(image)
}

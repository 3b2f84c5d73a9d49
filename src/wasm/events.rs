use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Event, EventTarget, HtmlCanvasElement, HtmlInputElement, PointerEvent, WheelEvent};

use super::scene::Scene;
use crate::error::Result;

pub const TEXT_INPUT_ID: &str = "textInput";

/// Registers `handler` for the lifetime of the page.
pub fn listen(target: &EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) -> Result<()> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Current contents of the text field, or empty when the page has none.
pub fn text_input_value(document: &Document) -> String {
    document
        .get_element_by_id(TEXT_INPUT_ID)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

pub fn attach(document: &Document, canvas: &HtmlCanvasElement, scene: &Rc<RefCell<Scene>>) -> Result<()> {
    let window = web_sys::window().ok_or(crate::error::SceneError::Missing("window"))?;

    {
        let scene = scene.clone();
        listen(&window, "click", move |_| {
            if let Err(err) = scene.borrow_mut().spawn_random() {
                tracing::warn!("firework not spawned: {err}");
            }
        })?;
    }

    {
        let scene = scene.clone();
        listen(canvas, "pointerdown", move |event| {
            if let Some(event) = event.dyn_ref::<PointerEvent>() {
                scene
                    .borrow_mut()
                    .controls_mut()
                    .pointer_down(event.client_x() as f32, event.client_y() as f32);
            }
        })?;
    }

    {
        let scene = scene.clone();
        listen(&window, "pointermove", move |event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let mut scene = scene.borrow_mut();
            let height = scene.viewport_height();
            scene
                .controls_mut()
                .pointer_move(event.client_x() as f32, event.client_y() as f32, height);
        })?;
    }

    for kind in ["pointerup", "pointercancel"] {
        let scene = scene.clone();
        listen(&window, kind, move |_| scene.borrow_mut().controls_mut().pointer_up())?;
    }

    {
        let scene = scene.clone();
        listen(canvas, "wheel", move |event| {
            if let Some(wheel) = event.dyn_ref::<WheelEvent>() {
                event.prevent_default();
                scene.borrow_mut().controls_mut().wheel(wheel.delta_y() as f32);
            }
        })?;
    }

    match document.get_element_by_id(TEXT_INPUT_ID) {
        Some(input) => {
            let scene = scene.clone();
            let field = input.clone();
            listen(&input, "input", move |_| {
                if let Some(field) = field.dyn_ref::<HtmlInputElement>() {
                    scene.borrow_mut().set_text_input(&field.value());
                }
            })?;
        }
        None => tracing::warn!(id = TEXT_INPUT_ID, "text field missing; text stays fixed"),
    }

    Ok(())
}

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::window;

use super::scene::Scene;
use crate::error::{Result, SceneError};

/// Hooks window resizes and starts the frame loop.
pub fn start(scene: Rc<RefCell<Scene>>) -> Result<()> {
    let window = window().ok_or(SceneError::Missing("window"))?;

    let resize_closure = {
        let scene = scene.clone();
        Closure::wrap(Box::new(move || {
            if let Err(err) = scene.borrow_mut().resize() {
                tracing::warn!("resize failed: {err}");
            }
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    let performance = window
        .performance()
        .ok_or(SceneError::Missing("performance"))?;

    // `f` holds the frame closure so it can reschedule itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let mut last = performance.now();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let now = performance.now();
        let dt = ((now - last) / 1000.0) as f32;
        last = now;
        scene.borrow_mut().tick(dt);

        let next = f.borrow();
        if let (Some(window), Some(frame)) = (web_sys::window(), next.as_ref()) {
            if let Err(err) = window.request_animation_frame(frame.as_ref().unchecked_ref()) {
                tracing::error!("frame loop stopped: {}", SceneError::from(err));
            }
        }
    }) as Box<dyn FnMut()>));

    let first = g.borrow();
    let frame = first.as_ref().ok_or(SceneError::Missing("frame callback"))?;
    window.request_animation_frame(frame.as_ref().unchecked_ref())?;
    tracing::info!("render loop started");
    Ok(())
}

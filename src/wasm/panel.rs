//! The debug panel: one slider per sky parameter, a colour picker and the
//! text size slider, pinned to the top right corner.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use super::events::{listen, text_input_value};
use super::scene::Scene;
use crate::color::Color;
use crate::error::{Result, SceneError};
use crate::sky::{ParameterRange, SkyParameter};
use crate::text::SIZE_RANGE;

const ROW_STYLE: &str = "display:flex;align-items:center;gap:6px;margin:3px 0";
const LABEL_STYLE: &str = "flex:0 0 110px";
const READOUT_STYLE: &str = "flex:0 0 56px;text-align:right";

pub fn build(document: &Document, scene: &Rc<RefCell<Scene>>) -> Result<()> {
    let (width, sky, text) = {
        let scene = scene.borrow();
        (scene.config().panel_width, *scene.sky_parameters(), *scene.text_params())
    };

    let panel: HtmlElement = create(document, "div")?;
    panel.set_id("debug-panel");
    let style = panel.style();
    for (name, value) in [
        ("position", "fixed"),
        ("top", "0"),
        ("right", "0"),
        ("padding", "8px"),
        ("background", "rgba(20, 20, 20, 0.85)"),
        ("color", "#eee"),
        ("font", "11px monospace"),
        ("z-index", "10"),
    ] {
        style.set_property(name, value)?;
    }
    style.set_property("width", &format!("{width}px"))?;

    // keep panel clicks from launching fireworks
    listen(&panel, "click", |event| event.stop_propagation())?;

    for param in SkyParameter::ALL {
        let scene = scene.clone();
        add_slider(document, &panel, param.label(), param.range(), sky.get(param), move |value| {
            scene.borrow_mut().set_sky_parameter(param, value);
        })?;
    }

    add_color(document, &panel, text.color, {
        let scene = scene.clone();
        move |color| scene.borrow_mut().set_text_color(color)
    })?;

    {
        let scene = scene.clone();
        let doc = document.clone();
        add_slider(document, &panel, "Text Size", SIZE_RANGE, text.size, move |value| {
            let raw = text_input_value(&doc);
            scene.borrow_mut().set_text_size(value, &raw);
        })?;
    }

    document
        .body()
        .ok_or(SceneError::Missing("document body"))?
        .append_child(&panel)?;
    Ok(())
}

fn create<T: JsCast>(document: &Document, tag: &'static str) -> Result<T> {
    document
        .create_element(tag)?
        .dyn_into()
        .map_err(|_| SceneError::Missing(tag))
}

fn row(document: &Document, label: &str) -> Result<Element> {
    let row = document.create_element("label")?;
    row.set_attribute("style", ROW_STYLE)?;
    let name = document.create_element("span")?;
    name.set_attribute("style", LABEL_STYLE)?;
    name.set_text_content(Some(label));
    row.append_child(&name)?;
    Ok(row)
}

fn add_slider(
    document: &Document,
    panel: &Element,
    label: &str,
    range: ParameterRange,
    value: f32,
    on_change: impl Fn(f32) + 'static,
) -> Result<()> {
    let row = row(document, label)?;

    let input: HtmlInputElement = create(document, "input")?;
    input.set_type("range");
    input.set_min(&range.min.to_string());
    input.set_max(&range.max.to_string());
    input.set_step(&range.step.to_string());
    input.set_value(&value.to_string());
    input.set_attribute("style", "flex:1")?;

    let readout = document.create_element("span")?;
    readout.set_attribute("style", READOUT_STYLE)?;
    readout.set_text_content(Some(&range.format(value)));

    let field = input.clone();
    let shown = readout.clone();
    listen(&input, "input", move |_| {
        let value = field.value_as_number() as f32;
        if value.is_finite() {
            shown.set_text_content(Some(&range.format(value)));
            on_change(value);
        }
    })?;

    row.append_child(&input)?;
    row.append_child(&readout)?;
    panel.append_child(&row)?;
    Ok(())
}

fn add_color(
    document: &Document,
    panel: &Element,
    color: Color,
    on_change: impl Fn(Color) + 'static,
) -> Result<()> {
    let row = row(document, "color")?;

    let input: HtmlInputElement = create(document, "input")?;
    input.set_type("color");
    input.set_value(&color.to_css());

    let readout = document.create_element("span")?;
    readout.set_attribute("style", READOUT_STYLE)?;
    readout.set_text_content(Some(&color.to_css()));

    let field = input.clone();
    let shown = readout.clone();
    listen(&input, "input", move |_| {
        let value = field.value();
        match Color::from_css(&value) {
            Some(color) => {
                shown.set_text_content(Some(&value));
                on_change(color);
            }
            None => tracing::warn!(value = %value, "ignoring unparseable colour"),
        }
    })?;

    row.append_child(&input)?;
    row.append_child(&readout)?;
    panel.append_child(&row)?;
    Ok(())
}

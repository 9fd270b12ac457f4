//! Writes dashboard state into the page.

use airquality::legend_lines;
use dashboard::{Dashboard, MapSurface, Readout, Status};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn element(doc: &Document, id: &str) -> Result<Element, JsValue> {
    doc.get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
}

pub fn input(doc: &Document, id: &str) -> Result<HtmlInputElement, JsValue> {
    Ok(element(doc, id)?.dyn_into::<HtmlInputElement>()?)
}

pub fn input_value(doc: &Document, id: &str) -> Result<String, JsValue> {
    Ok(input(doc, id)?.value())
}

fn set_text(doc: &Document, id: &str, text: &str) -> Result<(), JsValue> {
    element(doc, id)?.set_text_content(Some(text));
    Ok(())
}

fn sync_status(doc: &Document, status: Status) -> Result<(), JsValue> {
    let el = element(doc, "status")?;
    el.set_text_content(Some(status.text()));
    let classes = el.class_list();
    classes.toggle_with_force(Status::Active.class(), status.is_ok())?;
    classes.toggle_with_force(Status::Error.class(), !status.is_ok())?;
    Ok(())
}

/// Status indicator and error banner; cheap enough to run after every event.
pub fn sync_chrome<M: MapSurface>(dashboard: &Dashboard<M>) -> Result<(), JsValue> {
    let doc = document()?;
    sync_status(&doc, dashboard.status())?;

    let banner = dashboard.banner();
    let el = element(&doc, "error")?;
    let classes = el.class_list();
    classes.remove_2("error-visible", "error-hidden")?;
    classes.add_1(banner.class())?;
    set_text(&doc, "error-text", banner.text())
}

/// Readout fields, the gauge needle and the coordinate inputs.
pub fn sync_readout(readout: &Readout) -> Result<(), JsValue> {
    let doc = document()?;
    set_text(&doc, "aqi", &readout.aqi)?;
    set_text(&doc, "cat", &readout.category_text)?;
    set_text(&doc, "pollutant", &readout.pollutant)?;
    set_text(&doc, "area", &readout.area)?;
    set_text(&doc, "time", &readout.observed)?;
    set_text(&doc, "address", &readout.address)?;
    set_text(&doc, "lat", &readout.latitude)?;
    set_text(&doc, "lon", &readout.longitude)?;

    element(&doc, "needle")?
        .dyn_into::<HtmlElement>()?
        .style()
        .set_property("left", &format!("{}%", readout.needle_pct))?;

    input(&doc, "lat-input")?.set_value(&readout.latitude);
    input(&doc, "lng-input")?.set_value(&readout.longitude);
    Ok(())
}

pub fn render_legend(doc: &Document) -> Result<(), JsValue> {
    element(doc, "legend")?.set_inner_html(&legend_lines().join("<br />"));
    Ok(())
}

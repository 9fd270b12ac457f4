//! Browser front end for the air-quality dashboard.
//!
//! The host page provides Leaflet, a `#map` container and the form, readout
//! and status elements looked up in [`dom`]. Everything else is wired here at
//! module start.

mod dom;
mod fetch;
mod leaflet;
mod log;

use std::cell::RefCell;

use dashboard::{Dashboard, GeolocationError, PendingRequest, fetch_payload};
use foundation::LatLng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, PositionOptions};

use crate::fetch::FetchTransport;
use crate::leaflet::LeafletMap;

/// Upper bound on device location lookups (milliseconds).
const GEOLOCATION_TIMEOUT_MS: u32 = 10_000;

thread_local! {
    static STATE: RefCell<Option<Dashboard<LeafletMap>>> = const { RefCell::new(None) };
}

/// Runs `f` against the mounted dashboard; returns the default before mount or
/// after teardown.
fn with_dashboard<F, R>(f: F) -> R
where
    F: FnOnce(&mut Dashboard<LeafletMap>) -> R,
    R: Default,
{
    STATE
        .try_with(|state| state.borrow_mut().as_mut().map(f).unwrap_or_default())
        .unwrap_or_default()
}

fn sync_chrome() {
    let result = STATE
        .try_with(|state| match state.borrow().as_ref() {
            Some(dashboard) => dom::sync_chrome(dashboard),
            None => Ok(()),
        })
        .unwrap_or(Ok(()));
    if let Err(err) = result {
        tracing::warn!(?err, "status sync failed");
    }
}

/// Fetches `pending` and applies the outcome. The dashboard is not borrowed
/// while the request is in flight.
fn launch(pending: PendingRequest) {
    sync_chrome();
    spawn_local(async move {
        let transport = FetchTransport;
        let outcome = fetch_payload(&transport, &pending.query, &pending.ticket.token).await;
        let rendered = outcome.is_ok();
        let readout = with_dashboard(|d| {
            if d.complete(&pending.ticket, outcome) && rendered {
                d.readout().cloned()
            } else {
                None
            }
        });
        if let Some(readout) = readout {
            if let Err(err) = dom::sync_readout(&readout) {
                tracing::warn!(?err, "readout sync failed");
            }
        }
        sync_chrome();
    });
}

fn after_submit<E>(pending: Option<Result<PendingRequest, E>>) {
    match pending {
        Some(Ok(pending)) => launch(pending),
        Some(Err(_)) => sync_chrome(),
        None => {}
    }
}

fn on(
    doc: &Document,
    id: &str,
    event: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    dom::element(doc, id)?
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn submit_address() -> Result<(), JsValue> {
    let address = dom::input_value(&dom::document()?, "address-input")?;
    after_submit(with_dashboard(|d| Some(d.submit_address(&address))));
    Ok(())
}

fn submit_coordinates() -> Result<(), JsValue> {
    let doc = dom::document()?;
    let lat = dom::input_value(&doc, "lat-input")?;
    let lng = dom::input_value(&doc, "lng-input")?;
    after_submit(with_dashboard(|d| Some(d.submit_coordinates(&lat, &lng))));
    Ok(())
}

fn located(fix: Result<LatLng, GeolocationError>) {
    match with_dashboard(|d| d.located(fix)) {
        Some(pending) => launch(pending),
        None => sync_chrome(),
    }
}

fn position_coords(position: &JsValue) -> Option<LatLng> {
    let coords = js_sys::Reflect::get(position, &JsValue::from_str("coords")).ok()?;
    let read = |key: &str| {
        js_sys::Reflect::get(&coords, &JsValue::from_str(key))
            .ok()?
            .as_f64()
    };
    Some(LatLng::new(read("latitude")?, read("longitude")?))
}

fn request_location() {
    let Some(geolocation) = web_sys::window().and_then(|w| w.navigator().geolocation().ok())
    else {
        located(Err(GeolocationError::Unsupported));
        return;
    };

    let options = PositionOptions::new();
    options.set_enable_high_accuracy(true);
    options.set_timeout(GEOLOCATION_TIMEOUT_MS);
    options.set_maximum_age(0);

    let success = Closure::once_into_js(|position: JsValue| {
        located(position_coords(&position).ok_or(GeolocationError::Unavailable));
    });
    let failure = Closure::once_into_js(|_err: JsValue| {
        located(Err(GeolocationError::Unavailable));
    });

    if let Err(err) = geolocation.get_current_position_with_error_callback_and_options(
        success.unchecked_ref(),
        Some(failure.unchecked_ref()),
        &options,
    ) {
        tracing::warn!(?err, "geolocation request rejected");
        located(Err(GeolocationError::Unavailable));
    }
}

fn wire_events(doc: &Document) -> Result<(), JsValue> {
    on(doc, "address-form", "submit", |event| {
        event.prevent_default();
        if let Err(err) = submit_address() {
            tracing::warn!(?err, "address submit failed");
        }
    })?;
    on(doc, "coords-form", "submit", |event| {
        event.prevent_default();
        if let Err(err) = submit_coordinates() {
            tracing::warn!(?err, "coordinate submit failed");
        }
    })?;
    on(doc, "gps-btn", "click", |_| request_location())?;
    on(doc, "error-close", "click", |_| {
        with_dashboard(Dashboard::dismiss_error);
        sync_chrome();
    })?;
    Ok(())
}

fn map_clicked(lat: f64, lng: f64) {
    if let Some(pending) = with_dashboard(|d| Some(d.map_clicked(LatLng::new(lat, lng)))) {
        launch(pending);
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    log::init();
    let mounted = STATE
        .try_with(|state| state.borrow().is_some())
        .unwrap_or(true);
    if mounted {
        return Ok(());
    }

    let doc = dom::document()?;
    dom::render_legend(&doc)?;

    let map = LeafletMap::mount("map", map_clicked)?;
    let mut dashboard = Dashboard::new(map);
    let pending = dashboard.start();
    STATE.with(|state| *state.borrow_mut() = Some(dashboard));

    wire_events(&doc)?;
    tracing::info!("dashboard mounted");
    launch(pending);
    Ok(())
}

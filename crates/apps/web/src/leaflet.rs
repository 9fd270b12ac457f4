//! Leaflet-backed [`MapSurface`].
//!
//! Expects the Leaflet script (global `L`) to be loaded by the host page.

use dashboard::{CircleStyle, LayerId, MapSurface};
use foundation::LatLng;
use wasm_bindgen::prelude::*;

const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";
const TILE_MAX_ZOOM: u8 = 19;

#[wasm_bindgen(inline_js = "
let __airq_map = null;
const __airq_layers = new Map();
let __airq_next_layer = 0;

function __airq_track(layer) {
    __airq_next_layer += 1;
    __airq_layers.set(__airq_next_layer, layer);
    return __airq_next_layer;
}

export function airq_map_mount(element_id, tile_url, attribution, max_zoom, on_click) {
    __airq_map = L.map(element_id, { zoomControl: false });
    L.control.zoom({ position: 'bottomleft' }).addTo(__airq_map);
    L.tileLayer(tile_url, { maxZoom: max_zoom, attribution: attribution }).addTo(__airq_map);
    __airq_map.on('click', (event) => on_click(event.latlng.lat, event.latlng.lng));
}

export function airq_map_add_marker(lat, lng) {
    return __airq_track(L.marker([lat, lng]).addTo(__airq_map));
}

export function airq_map_add_circle(lat, lng, radius, color, fill_opacity, weight) {
    return __airq_track(L.circle([lat, lng], {
        radius: radius,
        color: color,
        fillColor: color,
        fillOpacity: fill_opacity,
        weight: weight,
    }).addTo(__airq_map));
}

export function airq_map_remove(id) {
    const layer = __airq_layers.get(id);
    if (layer) {
        __airq_map.removeLayer(layer);
        __airq_layers.delete(id);
    }
}

export function airq_map_set_view(lat, lng, zoom) {
    __airq_map.setView([lat, lng], zoom);
}
")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn airq_map_mount(
        element_id: &str,
        tile_url: &str,
        attribution: &str,
        max_zoom: u8,
        on_click: &Closure<dyn FnMut(f64, f64)>,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    fn airq_map_add_marker(lat: f64, lng: f64) -> Result<u32, JsValue>;

    #[wasm_bindgen(catch)]
    fn airq_map_add_circle(
        lat: f64,
        lng: f64,
        radius: f64,
        color: &str,
        fill_opacity: f64,
        weight: f64,
    ) -> Result<u32, JsValue>;

    #[wasm_bindgen(catch)]
    fn airq_map_remove(id: u32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    fn airq_map_set_view(lat: f64, lng: f64, zoom: u8) -> Result<(), JsValue>;
}

/// Handle to the single Leaflet map on the page.
#[derive(Debug)]
pub struct LeafletMap {
    _on_click: Closure<dyn FnMut(f64, f64)>,
}

impl LeafletMap {
    /// Creates the map inside `element_id`; clicks are reported to `on_click`.
    pub fn mount(
        element_id: &str,
        on_click: impl FnMut(f64, f64) + 'static,
    ) -> Result<Self, JsValue> {
        let on_click = Closure::<dyn FnMut(f64, f64)>::new(on_click);
        airq_map_mount(
            element_id,
            TILE_URL,
            TILE_ATTRIBUTION,
            TILE_MAX_ZOOM,
            &on_click,
        )?;
        Ok(Self {
            _on_click: on_click,
        })
    }
}

impl MapSurface for LeafletMap {
    fn add_marker(&mut self, at: LatLng) -> Option<LayerId> {
        match airq_map_add_marker(at.lat, at.lng) {
            Ok(id) => Some(LayerId(id)),
            Err(err) => {
                tracing::warn!(?err, "marker not added");
                None
            }
        }
    }

    fn add_circle(&mut self, center: LatLng, style: &CircleStyle) -> Option<LayerId> {
        match airq_map_add_circle(
            center.lat,
            center.lng,
            style.radius_m,
            style.color,
            style.fill_opacity,
            style.weight,
        ) {
            Ok(id) => Some(LayerId(id)),
            Err(err) => {
                tracing::warn!(?err, "radius circle not added");
                None
            }
        }
    }

    fn remove_layer(&mut self, id: LayerId) {
        if let Err(err) = airq_map_remove(id.0) {
            tracing::warn!(?err, layer = id.0, "layer not removed");
        }
    }

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        if let Err(err) = airq_map_set_view(center.lat, center.lng, zoom) {
            tracing::warn!(?err, "set_view failed");
        }
    }
}

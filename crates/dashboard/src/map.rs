//! Map overlays.
//!
//! The dashboard keeps exactly two overlays on the map: a marker at the
//! looked-up position and a shaded circle around it colored by category.
//! Each render replaces both and recenters the view.

use std::collections::BTreeMap;

use airquality::Category;
use foundation::LatLng;

/// Where the map opens before any lookup (Philadelphia).
pub const DEFAULT_CENTER: LatLng = LatLng::new(39.9526, -75.1652);
pub const DEFAULT_ZOOM: u8 = 11;

/// Radius of the category circle (meters).
pub const RADIUS_M: f64 = 2400.0;
pub const FILL_OPACITY: f64 = 0.2;
pub const STROKE_WEIGHT: f64 = 2.0;

/// Handle of a layer placed on a [`MapSurface`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub u32);

#[derive(Debug, Clone, PartialEq)]
pub struct CircleStyle {
    pub radius_m: f64,
    /// Stroke and fill color.
    pub color: &'static str,
    pub fill_opacity: f64,
    pub weight: f64,
}

impl CircleStyle {
    pub fn for_category(category: Category) -> Self {
        Self {
            radius_m: RADIUS_M,
            color: category.color(),
            fill_opacity: FILL_OPACITY,
            weight: STROKE_WEIGHT,
        }
    }
}

/// A map the dashboard can draw on.
///
/// `add_*` return `None` when the surface could not place the layer; the
/// dashboard then has nothing to remove on the next render.
pub trait MapSurface {
    fn add_marker(&mut self, at: LatLng) -> Option<LayerId>;
    fn add_circle(&mut self, center: LatLng, style: &CircleStyle) -> Option<LayerId>;
    fn remove_layer(&mut self, id: LayerId);
    fn set_view(&mut self, center: LatLng, zoom: u8);
}

/// Tracks the two overlays currently on the map.
#[derive(Debug, Default)]
pub struct MapOverlays {
    marker: Option<LayerId>,
    radius: Option<LayerId>,
}

impl MapOverlays {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces both overlays and recenters on `at`.
    pub fn show(&mut self, map: &mut impl MapSurface, at: LatLng, category: Category) {
        if let Some(id) = self.marker.take() {
            map.remove_layer(id);
        }
        self.marker = map.add_marker(at);

        if let Some(id) = self.radius.take() {
            map.remove_layer(id);
        }
        self.radius = map.add_circle(at, &CircleStyle::for_category(category));

        map.set_view(at, DEFAULT_ZOOM);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Marker(LatLng),
    Circle { center: LatLng, style: CircleStyle },
}

/// In-memory [`MapSurface`] that records what is on the map.
///
/// Used by the CLI to describe the map and by tests to inspect it.
#[derive(Debug, Default, Clone)]
pub struct RecordingMap {
    next_id: u32,
    layers: BTreeMap<LayerId, Layer>,
    view: Option<(LatLng, u8)>,
}

impl RecordingMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.values()
    }

    pub fn marker(&self) -> Option<LatLng> {
        self.layers().find_map(|layer| match layer {
            Layer::Marker(at) => Some(*at),
            Layer::Circle { .. } => None,
        })
    }

    pub fn circle(&self) -> Option<(LatLng, &CircleStyle)> {
        self.layers().find_map(|layer| match layer {
            Layer::Circle { center, style } => Some((*center, style)),
            Layer::Marker(_) => None,
        })
    }

    pub fn view(&self) -> Option<(LatLng, u8)> {
        self.view
    }

    fn insert(&mut self, layer: Layer) -> LayerId {
        self.next_id += 1;
        let id = LayerId(self.next_id);
        self.layers.insert(id, layer);
        id
    }
}

impl MapSurface for RecordingMap {
    fn add_marker(&mut self, at: LatLng) -> Option<LayerId> {
        Some(self.insert(Layer::Marker(at)))
    }

    fn add_circle(&mut self, center: LatLng, style: &CircleStyle) -> Option<LayerId> {
        Some(self.insert(Layer::Circle {
            center,
            style: style.clone(),
        }))
    }

    fn remove_layer(&mut self, id: LayerId) {
        self.layers.remove(&id);
    }

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.view = Some((center, zoom));
    }
}

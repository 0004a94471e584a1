//! Minimal bindings to the Leaflet global (`L`) loaded by index.html.

use js_sys::{Array, Function, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::MapConfig;
use crate::model::{Coordinate, MapBounds};

#[wasm_bindgen]
extern "C" {
    #[derive(Clone)]
    pub type LeafletMap;
    pub type TileLayer;
    pub type LayerGroup;
    pub type Marker;
    pub type Icon;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    fn new_map(element_id: &str, options: &JsValue) -> LeafletMap;
    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &LeafletMap, center: &JsValue, zoom: f64) -> LeafletMap;
    #[wasm_bindgen(method, js_name = setMaxBounds)]
    fn set_max_bounds(this: &LeafletMap, bounds: &JsValue) -> LeafletMap;
    #[wasm_bindgen(method, js_name = panInsideBounds)]
    fn pan_inside_bounds(this: &LeafletMap, bounds: &JsValue, options: &JsValue) -> LeafletMap;
    #[wasm_bindgen(method)]
    fn on(this: &LeafletMap, event: &str, handler: &Function) -> LeafletMap;
    #[wasm_bindgen(method)]
    fn off(this: &LeafletMap, event: &str, handler: &Function) -> LeafletMap;
    #[wasm_bindgen(method, js_name = invalidateSize)]
    pub fn invalidate_size(this: &LeafletMap) -> LeafletMap;
    #[wasm_bindgen(method)]
    fn remove(this: &LeafletMap) -> LeafletMap;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn new_tile_layer(url: &str, options: &JsValue) -> TileLayer;
    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &TileLayer, map: &LeafletMap) -> TileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = layerGroup)]
    fn new_layer_group() -> LayerGroup;
    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &LayerGroup, map: &LeafletMap) -> LayerGroup;
    #[wasm_bindgen(method, js_name = clearLayers)]
    fn clear_layers(this: &LayerGroup) -> LayerGroup;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    fn new_marker(at: &JsValue, options: &JsValue) -> Marker;
    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &Marker, group: &LayerGroup) -> Marker;

    #[wasm_bindgen(js_namespace = L, js_name = icon)]
    fn new_icon(options: &JsValue) -> Icon;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapOptions {
    zoom_snap: f64,
    max_bounds_viscosity: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileOptions<'a> {
    max_zoom: f64,
    min_zoom: f64,
    attribution: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IconOptions<'a> {
    icon_url: &'a str,
    icon_size: [u32; 2],
    icon_anchor: [u32; 2],
    popup_anchor: [i32; 2],
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_json::to_string(value)
        .ok()
        .and_then(|s| js_sys::JSON::parse(&s).ok())
        .unwrap_or(JsValue::UNDEFINED)
}

fn lat_lng(c: Coordinate) -> JsValue {
    Array::of2(&JsValue::from_f64(c.lat), &JsValue::from_f64(c.lng)).into()
}

fn lat_lng_bounds(b: &MapBounds) -> JsValue {
    Array::of2(&lat_lng(b.south_west), &lat_lng(b.north_east)).into()
}

/// Reads `event.latlng` from a Leaflet mouse event; missing numbers become NaN.
pub fn event_coordinate(event: &JsValue) -> Coordinate {
    let latlng = Reflect::get(event, &JsValue::from_str("latlng")).unwrap_or(JsValue::UNDEFINED);
    let field = |name: &str| {
        Reflect::get(&latlng, &JsValue::from_str(name))
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(f64::NAN)
    };
    Coordinate::new(field("lat"), field("lng"))
}

/// The guess map: a bounded Leaflet map with one layer group for markers.
pub struct GuessMap {
    map: LeafletMap,
    markers: LayerGroup,
    truth_icon: Option<Icon>,
    bounds: JsValue,
    handlers: Vec<(&'static str, Closure<dyn FnMut(JsValue)>)>,
}

impl GuessMap {
    pub fn mount(element_id: &str, cfg: &MapConfig) -> Self {
        let map = new_map(element_id, &to_js(&MapOptions { zoom_snap: cfg.zoom_snap, max_bounds_viscosity: 1.0 }));
        map.set_view(&lat_lng(cfg.center), cfg.zoom);
        new_tile_layer(
            &cfg.tile_url,
            &to_js(&TileOptions { max_zoom: cfg.max_zoom, min_zoom: cfg.min_zoom, attribution: &cfg.attribution }),
        )
        .add_to(&map);
        let bounds = lat_lng_bounds(&cfg.bounds);
        map.set_max_bounds(&bounds);
        let markers = new_layer_group();
        markers.add_to(&map);
        let truth_icon = cfg.truth_icon_url.as_deref().map(|url| {
            new_icon(&to_js(&IconOptions {
                icon_url: url,
                icon_size: [32, 45],
                icon_anchor: [16, 40],
                popup_anchor: [0, -32],
            }))
        });
        let mut gm = Self { map, markers, truth_icon, bounds, handlers: Vec::new() };

        // Keep dragging inside the playable area.
        let drag = {
            let map = gm.map.clone();
            let bounds = gm.bounds.clone();
            Closure::wrap(Box::new(move |_e: JsValue| {
                map.pan_inside_bounds(&bounds, &to_js(&serde_json::json!({ "animate": false })));
            }) as Box<dyn FnMut(JsValue)>)
        };
        gm.listen("drag", drag);
        gm
    }

    pub fn on_click(&mut self, mut handler: impl FnMut(Coordinate) + 'static) {
        let cb = Closure::wrap(Box::new(move |e: JsValue| handler(event_coordinate(&e)))
            as Box<dyn FnMut(JsValue)>);
        self.listen("click", cb);
    }

    fn listen(&mut self, event: &'static str, cb: Closure<dyn FnMut(JsValue)>) {
        self.map.on(event, cb.as_ref().unchecked_ref());
        self.handlers.push((event, cb));
    }

    pub fn clear_markers(&self) {
        self.markers.clear_layers();
    }

    pub fn add_guess_marker(&self, at: Coordinate) {
        new_marker(&lat_lng(at), &JsValue::UNDEFINED).add_to(&self.markers);
    }

    pub fn add_truth_marker(&self, at: Coordinate) {
        let opts = js_sys::Object::new();
        if let Some(icon) = &self.truth_icon {
            let _ = Reflect::set(&opts, &JsValue::from_str("icon"), icon);
        }
        new_marker(&lat_lng(at), &opts).add_to(&self.markers);
    }

    pub fn refresh_size(&self) {
        self.map.invalidate_size();
    }
}

impl Drop for GuessMap {
    fn drop(&mut self) {
        for (event, cb) in &self.handlers {
            self.map.off(event, cb.as_ref().unchecked_ref());
        }
        self.map.remove();
    }
}

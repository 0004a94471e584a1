use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::config::MapConfig;
use crate::leaflet::GuessMap;
use crate::model::Coordinate;
use crate::presenter::{Marker, MarkerKind};

const MAP_ELEMENT_ID: &str = "map";
const SHRINK_DELAY_MS: i32 = 500;

#[derive(Properties, PartialEq, Clone)]
pub struct GuessMapViewProps {
    pub config: MapConfig,
    pub markers: Vec<Marker>,
    pub markers_rev: u64,
    pub hidden: bool,
    pub accepting: bool,
    pub on_click: Callback<Coordinate>,
    pub on_expand: Callback<bool>,
}

#[function_component(GuessMapView)]
pub fn guess_map_view(props: &GuessMapViewProps) -> Html {
    let map_ref = use_mut_ref(|| None::<GuessMap>);
    let on_click_ref = use_mut_ref(|| props.on_click.clone());
    let shrink_timer = use_mut_ref(|| None::<i32>);
    let expanded = use_state(|| false);

    // Map handlers live as long as the map; always route clicks to the latest callback.
    *on_click_ref.borrow_mut() = props.on_click.clone();

    {
        let map_ref = map_ref.clone();
        let on_click_ref = on_click_ref.clone();
        let config = props.config.clone();
        use_effect_with((), move |_| {
            let mut map = GuessMap::mount(MAP_ELEMENT_ID, &config);
            map.on_click(move |at| {
                let cb = on_click_ref.borrow().clone();
                cb.emit(at);
            });
            *map_ref.borrow_mut() = Some(map);
            move || {
                map_ref.borrow_mut().take();
            }
        });
    }

    // Mirror the view model's markers onto Leaflet.
    {
        let map_ref = map_ref.clone();
        let markers = props.markers.clone();
        use_effect_with(props.markers_rev, move |_| {
            if let Some(map) = &*map_ref.borrow() {
                map.clear_markers();
                for m in &markers {
                    match m.kind {
                        MarkerKind::Guess => map.add_guess_marker(m.at),
                        MarkerKind::Truth => map.add_truth_marker(m.at),
                    }
                }
            }
            || ()
        });
    }

    {
        let map_ref = map_ref.clone();
        let on_expand = props.on_expand.clone();
        use_effect_with(*expanded, move |flag| {
            if let Some(map) = &*map_ref.borrow() {
                map.refresh_size();
            }
            on_expand.emit(*flag);
            || ()
        });
    }

    let onmouseenter = {
        let expanded = expanded.clone();
        let shrink_timer = shrink_timer.clone();
        Callback::from(move |_: MouseEvent| {
            if let (Some(id), Some(win)) = (shrink_timer.borrow_mut().take(), web_sys::window()) {
                win.clear_timeout_with_handle(id);
            }
            expanded.set(true);
        })
    };
    let onmouseleave = {
        let expanded = expanded.clone();
        let shrink_timer: Rc<RefCell<Option<i32>>> = shrink_timer.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(win) = web_sys::window() else { return };
            let expanded = expanded.clone();
            let shrink: JsValue = Closure::once_into_js(move || expanded.set(false));
            if let Ok(id) = win.set_timeout_with_callback_and_timeout_and_arguments_0(
                shrink.unchecked_ref(),
                SHRINK_DELAY_MS,
            ) {
                *shrink_timer.borrow_mut() = Some(id);
            }
        })
    };

    let (w, h, opacity) = if *expanded { ("50%", "66%", "1") } else { ("20%", "20%", "0.4") };
    let display = if props.hidden { "display:none;" } else { "" };
    let cursor = if props.accepting { "crosshair" } else { "default" };
    html! {
        <div id={MAP_ELEMENT_ID} {onmouseenter} {onmouseleave}
            style={format!("position:absolute; right:12px; bottom:60px; width:{}; height:{}; opacity:{}; border-radius:8px; cursor:{}; transition:width 0.3s, height 0.3s, opacity 0.3s; {}", w, h, opacity, cursor, display)}>
        </div>
    }
}

mod components;
mod config;
mod error;
mod feed;
mod leaflet;
mod model;
mod net;
mod presenter;
mod scoring;
mod state;
mod util;

use components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}

use wasm_bindgen::prelude::*;
mod api;
mod canvas;
mod error;
mod interop;
mod logging;

#[wasm_bindgen]
pub struct RoadWorld {
    pub(crate) inner: roadscape::World,
    pub(crate) sprites: canvas::SpriteSheet,
}

impl RoadWorld {
    pub fn rs_new(config: roadscape::WorldConfig) -> Result<RoadWorld, roadscape::ConfigError> {
        let inner = roadscape::World::new(roadscape::Graph::new(), config)?;
        Ok(RoadWorld { inner, sprites: canvas::SpriteSheet::default() })
    }
    pub fn rs_world(&self) -> &roadscape::World { &self.inner }
}

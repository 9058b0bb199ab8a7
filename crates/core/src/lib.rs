pub mod error;
pub mod mapgen;
pub mod render;
pub mod types;

pub use error::MapGenError;
pub use mapgen::{GeneratedMap, GeneratorConfig, MapGenerator, generate_map};
pub use render::{NullRenderer, RecordingRenderer, RenderError, Renderer, TextRenderer};
pub use types::*;

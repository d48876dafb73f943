//! Vignette - deterministic generative scene art from free-text prompts.
//!
//! A prompt is hashed into a seed, tokenized into keywords, and rendered
//! as a layered 1024x1024 scene: gradient sky, celestial disc, particle
//! field, one mid-ground motif, one foreground accent. The same prompt
//! always produces the same pixels.

pub mod canvas;
pub mod config;
pub mod generators;
pub mod output;
pub mod palette;
pub mod prompt;

pub use config::VignetteConfig;
pub use generators::{scene::SceneGenerator, Generator};
pub use output::{GenerateError, ImageStore};
pub use palette::Palette;

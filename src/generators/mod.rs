//! Image generators - each renders a prompt in a different strategy.

pub mod scene;

use image::RgbImage;

/// Trait for all prompt-driven generators.
///
/// Implementations must be pure: the same prompt renders the same pixels.
pub trait Generator {
    /// Name of this generator strategy.
    fn name(&self) -> &'static str;

    /// Render the prompt to an RGB image.
    fn render(&self, prompt: &str) -> RgbImage;
}

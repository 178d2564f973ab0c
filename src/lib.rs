//! Artisan story generation from a single image with a vision-language model.
//!
//! The pipeline loads a model, resolves the image from a url or a local path,
//! wraps the instruction into the chat template and extracts the assistant's
//! reply from the decoded output. See [`generate_story`].

mod error;
mod image_source;
mod model;
mod paligemma;
mod prompt;
mod story;

pub use error::{BoxError, FAILURE_MARKER, ImageLoadError, StoryError, StoryStage};
pub use image_source::{ImageSource, decode_image_bytes_rgb8, load_image};
pub use model::{GenerationConfig, GenerationRequest, StoryModel};
pub use paligemma::{PaligemmaStoryteller, PaligemmaStorytellerError};
pub use prompt::{ASSISTANT_MARKER, IMAGE_TOKEN, PARSE_FALLBACK, extract_reply, format_prompt};
pub use story::generate_story;

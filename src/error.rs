/// Prefix shared by every user-facing failure message.
pub const FAILURE_MARKER: &str = "❌";

/// Boxed error coming from a pluggable model backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// An error raised while resolving or decoding the input image.
#[derive(thiserror::Error, Debug)]
pub enum ImageLoadError {
    /// The source is neither a URL nor an existing local file.
    #[error("The specified local image path does not exist: {0}")]
    NotFound(String),

    /// The image could not be fetched over HTTP.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The fetched or local bytes are not a decodable image.
    #[error(transparent)]
    Decode(#[from] image::ImageError),

    /// The kornia reader failed on a local file.
    #[error(transparent)]
    Io(#[from] kornia_io::error::IoError),

    /// The decoded pixels do not form a valid rgb8 image.
    #[error(transparent)]
    Image(#[from] kornia_image::ImageError),
}

/// The stage of the pipeline an error originated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoryStage {
    ModelLoad,
    ImageLoad,
    Generation,
}

impl StoryStage {
    /// Returns the stage as a string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryStage::ModelLoad => "model_load",
            StoryStage::ImageLoad => "image_load",
            StoryStage::Generation => "generation",
        }
    }
}

/// A terminal failure of one of the pipeline stages.
#[derive(thiserror::Error, Debug)]
pub enum StoryError {
    #[error(
        "{marker} Error loading model: {0}\n{hint}",
        marker = FAILURE_MARKER,
        hint = model_load_hint()
    )]
    ModelLoad(#[source] BoxError),

    #[error("{marker} Error loading image: {0}", marker = FAILURE_MARKER)]
    ImageLoad(#[from] ImageLoadError),

    #[error("{marker} Error during text generation: {0}", marker = FAILURE_MARKER)]
    Generation(#[source] BoxError),
}

/// Troubleshooting hint appended to model load failures.
fn model_load_hint() -> &'static str {
    if cfg!(feature = "cuda") {
        "This often happens if you don't have a compatible NVIDIA GPU or if the \
         required drivers (CUDA) are not installed correctly."
    } else {
        "This often happens if the model weights cannot be fetched from the \
         Hugging Face hub or if there is not enough memory to load them."
    }
}

impl StoryError {
    /// Returns the stage that failed.
    pub fn stage(&self) -> StoryStage {
        match self {
            StoryError::ModelLoad(_) => StoryStage::ModelLoad,
            StoryError::ImageLoad(_) => StoryStage::ImageLoad,
            StoryError::Generation(_) => StoryStage::Generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_marker_and_cause() {
        let err = StoryError::ModelLoad("no cuda device".into());
        let msg = err.to_string();
        assert!(msg.starts_with("❌ Error loading model: no cuda device\n"));
        assert!(msg.ends_with(model_load_hint()));
        assert_eq!(err.stage(), StoryStage::ModelLoad);

        let err = StoryError::from(ImageLoadError::NotFound("bowl.jpg".to_string()));
        assert_eq!(
            err.to_string(),
            "❌ Error loading image: The specified local image path does not exist: bowl.jpg"
        );
        assert_eq!(err.stage().as_str(), "image_load");

        let err = StoryError::Generation("out of memory".into());
        assert_eq!(
            err.to_string(),
            "❌ Error during text generation: out of memory"
        );
    }

    #[test]
    fn every_stage_starts_with_marker() {
        let errors = [
            StoryError::ModelLoad("weights unavailable".into()),
            StoryError::ImageLoad(ImageLoadError::NotFound("bowl.jpg".to_string())),
            StoryError::Generation("nan logits".into()),
        ];
        for err in errors {
            let msg = err.to_string();
            assert!(
                msg.starts_with(&format!("{FAILURE_MARKER} Error ")),
                "{}: {msg}",
                err.stage().as_str()
            );
        }
    }

    #[test]
    fn model_load_hint_follows_device_feature() {
        assert_eq!(model_load_hint().contains("CUDA"), cfg!(feature = "cuda"));
    }
}

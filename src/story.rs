use crate::{
    error::{BoxError, StoryError},
    image_source::load_image,
    model::{GenerationConfig, GenerationRequest, StoryModel},
    prompt::{PARSE_FALLBACK, extract_reply, format_prompt},
};

/// Generates a story about the image at `image_source` following `prompt_text`.
///
/// The stages run strictly in order and the first failure is terminal:
///
/// 1. `load_model` is called with `config` to obtain the model and its processor.
/// 2. The image is fetched (http/https urls) or read from disk and decoded to rgb8.
/// 3. The instruction is wrapped into the chat template.
/// 4. The model generates, and the reply after the last assistant marker is returned.
///
/// A decoded output without the assistant marker is not an error: the fixed
/// [`PARSE_FALLBACK`] message is returned instead.
///
/// # Arguments
///
/// * `load_model` - Loads the model; only called once
/// * `image_source` - A url or a path to a local image file
/// * `prompt_text` - The instruction to guide the model
/// * `config` - The sampling configuration
pub fn generate_story<M, E, F>(
    load_model: F,
    image_source: &str,
    prompt_text: &str,
    config: &GenerationConfig,
) -> Result<String, StoryError>
where
    M: StoryModel,
    E: Into<BoxError>,
    F: FnOnce(&GenerationConfig) -> Result<M, E>,
{
    log::info!("Loading AI model... This may take a few moments.");
    let mut model = load_model(config).map_err(|e| fail(StoryError::ModelLoad(e.into())))?;
    log::info!("Model and processor loaded successfully.");

    let image = load_image(image_source).map_err(|e| fail(e.into()))?;
    log::debug!("Decoded image of size {:?}", image.size());

    log::info!("Preparing prompt for the AI...");
    let prompt = format_prompt(prompt_text);

    log::info!("Generating story... Please wait.");
    let decoded = model
        .generate(GenerationRequest {
            prompt: &prompt,
            image: &image,
            max_new_tokens: config.max_new_tokens,
        })
        .map_err(|e| fail(StoryError::Generation(Box::new(e))))?;

    match extract_reply(&decoded) {
        Some(reply) => Ok(reply.to_string()),
        None => {
            log::warn!("Assistant marker not found in the decoded output");
            Ok(PARSE_FALLBACK.to_string())
        }
    }
}

fn fail(err: StoryError) -> StoryError {
    log::error!("{err}");
    err
}

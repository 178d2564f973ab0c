use crate::{
    model::{GenerationConfig, GenerationRequest, StoryModel},
    prompt::IMAGE_TOKEN,
};
use kornia_vlm::paligemma::{Paligemma, PaligemmaConfig, PaligemmaError};
use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
};

/// An error raised by the PaliGemma backend.
#[derive(thiserror::Error, Debug)]
pub enum PaligemmaStorytellerError {
    #[error(transparent)]
    Paligemma(#[from] PaligemmaError),

    /// The text generation pipeline panicked instead of returning an error.
    #[error("text generation aborted: {0}")]
    Panicked(String),
}

/// Story generation backed by the PaliGemma model from `kornia-vlm`.
///
/// The weights and the tokenizer are fetched from the Hugging Face hub on load.
/// With the `cuda` feature the model runs in bf16 on the first CUDA device and
/// falls back to f32 on the cpu when none is available.
pub struct PaligemmaStoryteller(Paligemma);

impl PaligemmaStoryteller {
    /// Loads the model and its processor with the sampling settings of `config`.
    pub fn load(config: &GenerationConfig) -> Result<Self, PaligemmaStorytellerError> {
        let (temp, top_p) = sampling(config);

        let model = Paligemma::new(PaligemmaConfig {
            seed: config.seed,
            temp,
            top_p,
            ..Default::default()
        })?;

        Ok(Self(model))
    }
}

impl StoryModel for PaligemmaStoryteller {
    type Error = PaligemmaStorytellerError;

    fn generate(&mut self, request: GenerationRequest<'_>) -> Result<String, Self::Error> {
        let model = &mut self.0;
        // kornia-vlm panics on sampling failures (e.g. out of memory)
        let reply = catch_generation(AssertUnwindSafe(|| {
            model.inference(request.image, request.prompt, request.max_new_tokens, false)
        }))?;

        // the pipeline only yields the continuation; echo the prompt without
        // its special tokens like a full-sequence decode would
        Ok(format!("{}{}", request.prompt.replace(IMAGE_TOKEN, ""), reply))
    }
}

/// Temperature and nucleus threshold handed to the sampler, none when greedy.
fn sampling(config: &GenerationConfig) -> (Option<f64>, Option<f64>) {
    if config.do_sample {
        (Some(config.temperature), Some(config.top_p))
    } else {
        (None, None)
    }
}

fn catch_generation<F>(f: AssertUnwindSafe<F>) -> Result<String, PaligemmaStorytellerError>
where
    F: FnOnce() -> Result<String, PaligemmaError>,
{
    match panic::catch_unwind(f) {
        Ok(res) => Ok(res?),
        Err(payload) => Err(PaligemmaStorytellerError::Panicked(panic_message(payload))),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(msg) => *msg,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(msg) => msg.to_string(),
            Err(_) => "unknown panic".to_string(),
        },
    }
}

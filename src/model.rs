use kornia_image::{Image, allocator::CpuAllocator};

/// Sampling configuration used for a single generation pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationConfig {
    /// Maximum number of tokens generated after the prompt.
    pub max_new_tokens: usize,
    /// Whether to sample from the distribution instead of taking the argmax.
    pub do_sample: bool,
    /// Sampling temperature, ignored when `do_sample` is false.
    pub temperature: f64,
    /// Nucleus sampling threshold, ignored when `do_sample` is false.
    pub top_p: f64,
    /// Seed of the sampling rng.
    pub seed: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_new_tokens: 500,
            do_sample: true,
            temperature: 0.8,
            top_p: 0.9,
            seed: 299792458,
        }
    }
}

/// Everything a model needs to run one generation pass.
pub struct GenerationRequest<'a> {
    /// The prompt, already formatted with the chat template.
    pub prompt: &'a str,
    /// The decoded rgb8 image referenced by the prompt's image token.
    pub image: &'a Image<u8, 3, CpuAllocator>,
    /// Maximum number of tokens to generate.
    pub max_new_tokens: usize,
}

/// A loaded vision-language model together with its paired processor.
///
/// Implementors return the whole decoded sequence with special tokens removed,
/// i.e. the prompt followed by the generated continuation. The reply is
/// extracted from it by the caller.
pub trait StoryModel {
    /// The error type that can be returned during generation.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Runs a single generation pass and returns the decoded text.
    fn generate(&mut self, request: GenerationRequest<'_>) -> Result<String, Self::Error>;
}

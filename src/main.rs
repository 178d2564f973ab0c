use argh::FromArgs;
use artisan_story::{GenerationConfig, PaligemmaStoryteller, generate_story};
use std::process::ExitCode;

// defaults for the story generator
const DEFAULT_IMAGE_SOURCE: &str = "https://images.unsplash.com/photo-1542062700-94245c327248";
const DEFAULT_PROMPT: &str = "generate descriptive texts that talk about the work of the \
    artisans in detail and generate a heart touching story for the image";

const BANNER_WIDTH: usize = 50;

#[derive(FromArgs)]
/// Generates a story about an artisan's work from an image.
struct StoryArgs {
    /// the url or local path of the image
    #[argh(option, short = 'i', default = "DEFAULT_IMAGE_SOURCE.to_string()")]
    image_source: String,

    /// the instruction to guide the model
    #[argh(option, short = 'p', default = "DEFAULT_PROMPT.to_string()")]
    prompt: String,

    /// the maximum number of generated tokens
    #[argh(option, default = "GenerationConfig::default().max_new_tokens")]
    max_new_tokens: usize,

    /// the sampling temperature
    #[argh(option, default = "GenerationConfig::default().temperature")]
    temperature: f64,

    /// the nucleus sampling threshold
    #[argh(option, default = "GenerationConfig::default().top_p")]
    top_p: f64,

    /// the seed of the sampling rng
    #[argh(option, default = "GenerationConfig::default().seed")]
    seed: u64,

    /// disable sampling and decode greedily
    #[argh(switch)]
    greedy: bool,
}

impl From<&StoryArgs> for GenerationConfig {
    fn from(args: &StoryArgs) -> Self {
        GenerationConfig {
            max_new_tokens: args.max_new_tokens,
            do_sample: !args.greedy,
            temperature: args.temperature,
            top_p: args.top_p,
            seed: args.seed,
        }
    }
}

fn print_story(story: &str) {
    let rule = "=".repeat(BANNER_WIDTH);
    println!("\n{rule}");
    println!("✨ AI Generated Story ✨");
    println!("{rule}\n");
    println!("{story}");
    println!("\n{rule}");
}

fn main() -> ExitCode {
    env_logger::init();
    let args: StoryArgs = argh::from_env();
    let config = GenerationConfig::from(&args);

    match generate_story(
        PaligemmaStoryteller::load,
        &args.image_source,
        &args.prompt,
        &config,
    ) {
        Ok(story) => {
            print_story(&story);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

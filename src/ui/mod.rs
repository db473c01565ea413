pub mod output;
pub mod prompts;

pub use output::{clear_screen, disable_colors, failure, success, warning};
pub use prompts::{AssumeYes, Interactive, Prompter};

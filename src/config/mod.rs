pub mod prompt;
pub mod settings;

pub use prompt::{ PromptConfig, PromptError };
pub use settings::{ AppConfig, ChatModel };

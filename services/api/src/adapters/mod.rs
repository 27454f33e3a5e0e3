pub mod db;
pub mod export;
pub mod gemini_llm;
pub mod openai_llm;

pub use db::DbAdapter;
pub use export::FileExporter;
pub use gemini_llm::GeminiAdapter;
pub use openai_llm::OpenAiChatAdapter;

pub mod openai_script_repository;
pub mod openai_speech_repository;
pub mod polly_speech_repository;
pub mod script_repository;
pub mod speech_repository;

pub use openai_script_repository::OpenAiScriptRepository;
pub use openai_speech_repository::OpenAiSpeechRepository;
pub use polly_speech_repository::PollySpeechRepository;
pub use script_repository::ScriptRepository;
pub use speech_repository::SpeechRepository;

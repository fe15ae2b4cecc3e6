// End-to-end tests for the PodGen Backend API
//
// Each test spawns the full axum application on an ephemeral port with fake
// provider repositories standing in for the external script-generation and
// text-to-speech services. No live service is ever called; tests assert
// response format and error tagging, never generated content.

mod helpers;
mod test_audio;
mod test_generate;
mod test_health;
mod test_upload;
mod test_voices;

// Cold email generation: typed requests, prompt composition, the workflow,
// and the JSON API on top of it.
// All model calls go through llm_client::TextGenerator.

pub mod form;
pub mod handlers;
pub mod prompts;
pub mod request;
pub mod template;
pub mod workflow;

// Resume analysis: prompt building, tolerant parsing of the model reply,
// the analysis record itself and the session slot that holds it.
// All model calls go through llm_client.

pub mod handlers;
pub mod parser;
pub mod prompts;
pub mod result;
pub mod session;

// Resume reader: upload handling and LLM-backed field extraction.
// All completion calls go through llm_client.

pub mod handlers;
pub mod parser;
pub mod prompts;

// Resume extraction: prompt building, the inference round trip, and
// normalization of the model's reply into the canonical record.
// All backend calls go through llm_client.

pub mod classifier;
pub mod handlers;
pub mod normalizer;
pub mod prompts;

pub mod engine;
pub mod protocol;

pub mod command_parser;
pub mod esi;
pub mod extract;
pub mod llm_client;
pub mod pipeline;
pub mod prompt_builder;
pub mod resolver;
pub mod summary_builder;

#[cfg(test)]
pub(crate) mod test_support;

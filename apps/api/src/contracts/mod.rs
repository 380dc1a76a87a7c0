// Contract Generator: contract prompts and generation handler.
// Export of the generated text goes through the shared export endpoints.

pub mod handlers;
pub mod prompts;

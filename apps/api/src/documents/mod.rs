// Document Processing: upload decoding and document prompts.

pub mod decode;
pub mod handlers;
pub mod prompts;

// Document export: generated text as a paginated PDF or as raw markdown.

pub mod handlers;

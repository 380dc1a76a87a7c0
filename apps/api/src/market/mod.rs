// Market Analysis: competitor, trend, SWOT and risk prompts.

pub mod handlers;
pub mod prompts;

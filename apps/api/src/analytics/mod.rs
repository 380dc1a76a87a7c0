// Business Analytics: metrics evaluation, dashboard widgets, insight prompts.
// All completion calls go through llm_client; nothing here talks to the network.

pub mod handlers;
pub mod metrics;
pub mod prompts;
pub mod widgets;

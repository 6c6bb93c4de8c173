// Application pipeline: request defaults, mode switch, summaries.

pub mod handlers;
pub mod pipeline;
pub mod summary;

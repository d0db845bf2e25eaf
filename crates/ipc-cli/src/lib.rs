pub mod cli;
pub mod config;
pub mod fetch;
pub mod logging;
pub mod pipeline;
pub mod summary;

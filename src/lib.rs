pub mod build;
pub mod canister;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod fetch;
pub mod output;
pub mod platform;
pub mod prerender;

pub mod args;
pub mod config;
pub mod error;
pub mod lister;
pub mod manifest;
pub mod pipeline;
pub mod reconcile;

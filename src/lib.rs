pub mod batch;
pub mod cli;
pub mod client_factory;
pub mod commands;
pub mod config;
pub mod error;
pub mod github;
pub mod manifest;
pub mod release_ops;
pub mod report;

// Make mock_github available for integration testing
pub mod mock_github;

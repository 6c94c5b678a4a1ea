pub mod allocator;
pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod levels;

pub mod args;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod estimate;
pub mod project;
pub mod recommend;

// Front-end Module
// Console application built on clap

pub mod app;

pub use app::{run_app, Cli};

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod session;
pub mod ui;

pub use error::{Error, Result};

pub mod app;
pub mod backend;
pub mod config;
pub mod error;
pub(crate) mod event;
pub mod input;
pub mod logging;
pub mod presenter;
pub mod render;
pub mod ui;
pub mod viewer;

#[cfg(test)]
mod test_support;

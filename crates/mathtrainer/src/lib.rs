//! Terminal front end for the arithmetic trainer.

pub mod display;
pub mod session;
pub mod ui;

pub use session::Session;

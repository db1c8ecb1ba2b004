pub mod bootstrap;
pub mod commands;
pub mod dialog;
pub mod error;
pub mod state;

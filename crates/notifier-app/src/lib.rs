pub mod application;
#[cfg(feature = "desktop")]
pub mod presentation;

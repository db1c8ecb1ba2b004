pub mod dtos;
pub mod feedback;
pub mod form;
pub mod services;

pub use feedback::UserFeedback;

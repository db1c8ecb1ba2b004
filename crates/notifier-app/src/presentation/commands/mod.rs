pub mod form;
pub mod search;
pub mod system;

pub use form::*;
pub use search::*;
pub use system::*;

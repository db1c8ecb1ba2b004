// Domain layer - Pure notification model
// No dependencies on infrastructure or presentation layers

pub mod notification;
pub mod shared;

// Re-exports for convenience
pub use shared::{DomainError, ErrorCode, ErrorSeverity};

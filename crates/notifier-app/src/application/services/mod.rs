mod lookup;
mod submitter;

#[cfg(test)]
mod tests;

pub use lookup::{CancelOutcome, NotificationLookupController};
pub use submitter::{NotificationSubmitter, SubmitOutcome};

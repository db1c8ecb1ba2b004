mod draft;
mod gateway;
mod record;
mod value_objects;

pub use draft::{Delivery, NotificationDraft};
pub use gateway::{GatewayError, NotificationGateway};
pub use record::{CreatedNotification, NotificationRecord};
pub use value_objects::{is_valid_email, Channel, EmailConfig, NotificationId, NotificationStatus};

mod avatar;
mod email_address;
mod person_name;
mod rating;
mod slug;

pub use avatar::resolve_avatar;
pub use email_address::EmailAddress;
pub use person_name::PersonName;
pub use rating::Rating;
pub use slug::Slug;

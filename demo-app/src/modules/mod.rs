pub mod health;
pub mod users;

pub use health::HealthModule;
pub use users::UserModule;

pub mod auth;
pub mod command;
pub mod path;
pub mod rate_limit;
pub mod sanitize;

pub use auth::ApiKeyGuard;
pub use command::{CommandGuard, DEFAULT_ALLOWED_COMMANDS};
pub use path::PathGuard;
pub use rate_limit::{FixedWindowLimiter, client_id};
pub use sanitize::sanitize;

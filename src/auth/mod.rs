//! Authentication: password hashing, token issue/verify, register/login.

mod handlers;
pub mod password;
mod token;

pub use handlers::{current_user, login, register};
pub use token::{Claims, TokenService};

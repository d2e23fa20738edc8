//! Identity handlers - registration, login, and account management.

mod delete_user;
mod get_user;
mod list_users;
mod login;
mod register_user;
mod update_profile;

pub use delete_user::{DeleteUserCommand, DeleteUserHandler};
pub use get_user::{GetUserHandler, GetUserQuery};
pub use list_users::{ListUsersHandler, ListUsersQuery};
pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use register_user::{RegisterUserCommand, RegisterUserHandler};
pub use update_profile::{UpdateProfileCommand, UpdateProfileHandler};

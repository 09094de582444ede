pub mod auth;
pub mod draft;
pub mod edit;
pub mod generate;
pub mod respond;

pub use auth::{AuthCommands, auth_command};
pub use draft::{new_command, show_command};
pub use edit::{EditCommands, edit_command};
pub use generate::generate_command;
pub use respond::respond_command;

pub mod credentials;
pub mod store;

pub use credentials::Credentials;
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};

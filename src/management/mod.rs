mod auth;
mod recommend;
pub mod store;

pub use auth::TokenManager;
pub use recommend::Recommender;
pub use store::CredentialStore;
pub use store::FileCredentialStore;
pub use store::MemoryCredentialStore;

mod cache;
pub mod session;

pub use cache::ResultCache;
pub use session::Session;
pub use session::SessionStore;

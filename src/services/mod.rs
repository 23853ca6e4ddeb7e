// Service exports
pub mod appwrite;
pub mod oracle;

pub use appwrite::{AppwriteClient, AppwriteCollections, AppwriteError};
pub use oracle::{score_pool, OracleClient, OracleError};

mod db;
mod memory;
mod store;

pub use db::MongoStore;
pub use memory::InMemoryStore;
pub use store::{DocumentStore, StoreError};

pub mod gateway;
pub mod migration;
pub mod serialization;
pub mod session;
pub mod store;
pub mod traits;

pub use gateway::PersistenceGateway;
pub use migration::Migrator;
pub use serialization::JsonSerializer;
pub use session::{DispatchOutcome, Notification, NotificationLevel, Session};
pub use store::{AtomicWriter, JsonFileStore, MemoryStore};
pub use traits::*;

//! Storage backend trait abstraction
//!
//! One async trait per aggregate. `PgStorage` and `MemoryStorage` implement
//! all of them and `StorageBackend` dispatches between the two.

pub mod chat;
pub mod event;
pub mod meeting;
pub mod prospect;
pub mod sales_rep;
pub mod stats;

pub use chat::MeetingChatStore;
pub use event::EventStore;
pub use meeting::MeetingStore;
pub use prospect::ProspectStore;
pub use sales_rep::SalesRepStore;
pub use stats::StatsStore;

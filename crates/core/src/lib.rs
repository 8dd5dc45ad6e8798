//! Core types for prepdesk
//!
//! Domain types shared by the storage, service and HTTP crates.

mod chat;
mod constants;
mod env_config;
mod error;
mod event;
mod ids;
mod meeting;
mod prospect;
mod resource;
mod sales_rep;
mod stats;

pub use chat::*;
pub use constants::*;
pub use env_config::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use meeting::*;
pub use prospect::*;
pub use resource::*;
pub use sales_rep::*;
pub use stats::*;

//! Core types and capabilities for ChatList
//!
//! Domain entities shared by the storage layer and the command-line front end,
//! plus the small collaborator traits (clock, credential resolver) the store
//! and its callers are wired with.

mod clock;
pub mod constants;
mod credentials;
pub mod env_config;
mod error;
mod id;
mod model;
mod prompt;
mod result;
mod setting;

pub use clock::*;
pub use credentials::*;
pub use error::*;
pub use id::*;
pub use model::*;
pub use prompt::*;
pub use result::*;
pub use setting::*;

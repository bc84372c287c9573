//! Async store traits
//!
//! Narrow data-access contracts for the orchestration layer. `Storage`
//! implements every trait; callers that only need one concern can depend on
//! that trait alone and be tested against a fake.

pub mod model;
pub mod prompt;
pub mod result;
pub mod settings;
pub mod stats;

pub use model::ModelStore;
pub use prompt::PromptStore;
pub use result::ResultStore;
pub use settings::SettingsStore;
pub use stats::StatsStore;

pub(crate) mod export;
pub(crate) mod model;
pub(crate) mod prompt;
pub(crate) mod result;
pub(crate) mod setting;
pub(crate) mod stats;

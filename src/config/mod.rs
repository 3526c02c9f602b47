pub mod loader;
pub mod merged;
pub mod schema;
pub mod source;

pub use loader::ConfigLoader;
pub use merged::{MergedConfig, Overrides};
pub use schema::{Config, VerifyConfig};
pub use source::{FlagSource, SourcedValue};

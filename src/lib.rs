pub mod config;
pub mod errors;
pub mod export;
pub mod graph;
pub mod session;

pub use config::DesignerConfig;
pub use graph::GraphStore;
pub use session::Session;

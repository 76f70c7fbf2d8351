// Module declarations
mod app;
pub mod dashboard;
pub mod splash;
// Re-exports for external use
pub use app::{App, DashboardDeps, UIConfig, run};

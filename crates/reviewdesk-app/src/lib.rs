// ABOUTME: Application layer for reviewdesk, wiring configuration and collaborators into one controller.
// ABOUTME: The controller owns every state slice; the dashboard module aggregates them for the overview.

pub mod config;
pub mod controller;
pub mod dashboard;

pub use config::{ConfigError, DeskConfig};
pub use controller::{Collaborators, ReviewDesk, StepRow};
pub use dashboard::{DashboardOverview, SubmissionFigures};

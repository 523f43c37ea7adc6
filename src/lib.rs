//! Wedding venue price dashboard.
//!
//! A venue table loaded once at start-up is filtered by one selected sector
//! into three views: a paginated table, a price histogram and a scatter map.
//! The views are served by a native egui window ([`app`]) or over HTTP
//! ([`server`]); both keep the selection per session.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod server;
pub mod state;
pub mod ui;
pub mod views;

pub use data::{load_file, Dataset, Venue};
pub use error::LoadError;
pub use state::{DashboardState, Selection, SelectionEvent};
pub use views::{derive_views, DerivedViews};

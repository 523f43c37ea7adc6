use std::sync::Arc;

use eframe::egui;

use crate::data::Dataset;
use crate::state::DashboardState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// The native dashboard window.  One window is one session.
pub struct VenueDashApp {
    pub state: DashboardState,
}

impl VenueDashApp {
    pub fn new(dataset: Arc<Dataset>, default_sector: &str) -> Self {
        Self {
            state: DashboardState::new(dataset, default_sector),
        }
    }
}

impl eframe::App for VenueDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and sector dropdown ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: venue map ----
        egui::TopBottomPanel::bottom("map_panel")
            .resizable(true)
            .default_height(360.0)
            .show(ctx, |ui| {
                plot::venue_map(ui, &self.state);
            });

        // ---- Central panel: table beside histogram ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |cols| {
                panels::venue_table(&mut cols[0], &mut self.state);
                plot::price_histogram(&mut cols[1], &self.state);
            });
        });
    }
}

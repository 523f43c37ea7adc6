use eframe::egui::{self, Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::sector_counts;
use crate::state::DashboardState;

const TABLE_ROW_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Top bar – title and sector dropdown
// ---------------------------------------------------------------------------

/// Render the title and the sector selector.
pub fn top_bar(ui: &mut Ui, state: &mut DashboardState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("Wedding Venue Price Dashboard");
    });
    ui.add_space(4.0);

    let current = state.selection().current().to_string();
    let counts = sector_counts(state.dataset());
    let mut choice: Option<String> = None;

    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Sector");
        egui::ComboBox::from_id_salt("sector_select")
            .selected_text(current.as_str())
            .width(ui.available_width() * 0.6)
            .show_ui(ui, |ui: &mut Ui| {
                for sector in state.selection().options() {
                    let n = counts.get(sector.as_str()).copied().unwrap_or(0);
                    if ui
                        .selectable_label(current == *sector, format!("{sector}  ({n})"))
                        .clicked()
                    {
                        choice = Some(sector.clone());
                    }
                }
            });

        ui.separator();
        ui.label(format!(
            "{} of {} venues",
            state.views().table.len(),
            state.dataset().len()
        ));
    });

    if let Some(sector) = choice {
        state.select(&sector);
    }
}

// ---------------------------------------------------------------------------
// Venue table
// ---------------------------------------------------------------------------

/// Render one page of the venue table with previous/next controls.
pub fn venue_table(ui: &mut Ui, state: &mut DashboardState) {
    let page_count = state.views().table.page_count();
    let mut page = state.table_page();

    ui.horizontal(|ui: &mut Ui| {
        if ui.add_enabled(page > 0, egui::Button::new("◀")).clicked() {
            page -= 1;
        }
        ui.label(format!("Page {} / {page_count}", page + 1));
        if ui
            .add_enabled(page + 1 < page_count, egui::Button::new("▶"))
            .clicked()
        {
            page += 1;
        }
    });
    state.set_table_page(page);

    let table = &state.views().table;
    if table.is_empty() {
        ui.label(RichText::new("No venues in this sector.").italics());
        return;
    }

    let rows = table.page(state.table_page());
    let mut builder = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center));
    for _ in &table.columns {
        builder = builder.column(Column::auto().at_least(80.0).clip(true));
    }

    builder
        .header(22.0, |mut header| {
            for name in &table.columns {
                header.col(|ui| {
                    ui.strong(name.to_uppercase());
                });
            }
        })
        .body(|body| {
            body.rows(TABLE_ROW_HEIGHT, rows.len(), |mut row| {
                let cells = &rows[row.index()];
                for cell in cells {
                    row.col(|ui| {
                        ui.label(cell.to_string());
                    });
                }
            });
        });
}

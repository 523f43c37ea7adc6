use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Plot, PlotPoints, Points};

use crate::color::PriceScale;
use crate::state::DashboardState;

// ---------------------------------------------------------------------------
// Price histogram
// ---------------------------------------------------------------------------

/// Render the price histogram of the selected sector.
pub fn price_histogram(ui: &mut Ui, state: &DashboardState) {
    let views = state.views();
    let histogram = &views.histogram;
    let scale = PriceScale::from_prices(&histogram.values);

    let bars: Vec<Bar> = histogram
        .bins
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width())
                .fill(scale.color_for(bin.center()))
                .name(format!("{:.0} – {:.0}", bin.start, bin.end))
        })
        .collect();

    // Keying the plot on the sector resets zoom when the selection moves.
    Plot::new(("price_histogram", &views.sector))
        .x_axis_label("Venue Price")
        .y_axis_label("Count")
        .include_y(0.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(&views.sector));
        });
}

// ---------------------------------------------------------------------------
// Venue map
// ---------------------------------------------------------------------------

/// Render venue locations on lon/lat axes.  No tile basemap is drawn.
pub fn venue_map(ui: &mut Ui, state: &DashboardState) {
    let views = state.views();
    let map = &views.map;
    let scale = PriceScale::from_prices(&views.histogram.values);

    let mut plot = Plot::new(("venue_map", &views.sector))
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .label_formatter(|name, value| {
            if name.is_empty() {
                format!("lon {:.4}\nlat {:.4}", value.x, value.y)
            } else {
                name.to_owned()
            }
        });

    if let Some(bounds) = map.bounds() {
        let (center_lat, _) = bounds.center();
        // One degree of longitude is cos(lat) as long as one of latitude.
        plot = plot
            .data_aspect(center_lat.to_radians().cos().max(0.1) as f32)
            .include_x(bounds.min_lon)
            .include_x(bounds.max_lon)
            .include_y(bounds.min_lat)
            .include_y(bounds.max_lat);
    }

    plot.show(ui, |plot_ui| {
        for point in &map.points {
            let marker = Points::new(PlotPoints::new(vec![[point.longitude, point.latitude]]))
                .radius(map.marker_size / 2.0)
                .filled(true)
                .color(scale.color_for(point.price))
                .name(format!("{}\nprice={}", point.vendor_name, point.price));
            plot_ui.points(marker);
        }
    });
}


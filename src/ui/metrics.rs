use eframe::egui::{self, RichText, Ui};

use crate::data::aggregate::Summary;

/// The three metric cards in a row.
pub fn summary_row(ui: &mut Ui, summary: &Summary) {
    ui.columns(3, |cols: &mut [Ui]| {
        metric_card(
            &mut cols[0],
            "Total Rentals:",
            summary.total,
            "Total number of bike rentals in the dataset",
        );
        metric_card(
            &mut cols[1],
            "Total Registered Users:",
            summary.registered,
            "Total number of registered users in the dataset",
        );
        metric_card(
            &mut cols[2],
            "Total Casual Users:",
            summary.casual,
            "Total number of casual users in the dataset",
        );
    });
}

fn metric_card(ui: &mut Ui, title: &str, value: u64, help: &str) {
    egui::Frame::group(ui.style())
        .inner_margin(12.0)
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.label(title);
            ui.label(RichText::new(group_digits(value)).size(28.0).strong());
        })
        .response
        .on_hover_text(help);
}

/// `1234567` → `"1,234,567"`.
pub fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

use gtk::gdk;
use log::warn;

pub const PDF_VIEW_CLASS: &str = "pdf-view";
pub const PAGE_LABEL_CLASS: &str = "page-label";

const STYLESHEET: &str = include_str!("style.css");

/// Install the application stylesheet on the default display
pub fn load_stylesheet() {
    let Some(display) = gdk::Display::default() else {
        warn!("No display; skipping stylesheet");
        return;
    };

    let provider = gtk::CssProvider::new();
    provider.load_from_string(STYLESHEET);
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

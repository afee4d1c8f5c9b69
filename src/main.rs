mod error;
mod modes;
mod services;
mod text_map;
mod view_state;
mod widgets;

use env_logger::Env;
use gtk::prelude::*;
use gtk::{Application, gio, glib};
use log::info;

use crate::services::settings::Settings;
use crate::widgets::ReaderWindow;

const APP_ID: &str = "org.gtk_rs.lectern";

fn main() -> glib::ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let app = Application::builder()
        .application_id(APP_ID)
        .flags(gio::ApplicationFlags::HANDLES_OPEN)
        .build();

    app.connect_startup(|_| widgets::style::load_stylesheet());

    app.connect_activate(|app| {
        build_window(app).present();
    });

    app.connect_open(|app, files, _hint| {
        let window = build_window(app);
        window.present();
        // One document at a time; extra arguments are ignored
        if let Some(path) = files.first().and_then(|file| file.path()) {
            window.open_path(&path);
        }
    });

    app.run()
}

fn build_window(app: &Application) -> ReaderWindow {
    if let Some(window) = app.active_window().and_downcast::<ReaderWindow>() {
        return window;
    }
    let settings = Settings::load_or_default();
    info!("Starting {APP_ID}");
    ReaderWindow::new(app, settings)
}

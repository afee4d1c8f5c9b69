use gtk::gio;
use gtk::glib;
use gtk::prelude::*;
use gtk::subclass::prelude::*;
use gtk::{ApplicationWindow, PolicyType, ScrolledWindow};
use log::error;
use std::path::Path;

use crate::error::ReaderError;
use crate::modes::{KeyAction, handle_key};
use crate::services::document::bind_pdfium;
use crate::services::settings::Settings;
use crate::view_state::NavDirection;
use crate::widgets::{PdfView, ReaderHeaderBar};

const WINDOW_TITLE: &str = "PDF Book Reader";

mod imp {
    use super::*;

    pub struct ReaderWindow {
        pub header_bar: ReaderHeaderBar,
        pub pdf_view: PdfView,
    }

    impl Default for ReaderWindow {
        fn default() -> Self {
            Self {
                header_bar: ReaderHeaderBar::new(),
                pdf_view: PdfView::new(),
            }
        }
    }

    #[glib::object_subclass]
    impl ObjectSubclass for ReaderWindow {
        const NAME: &'static str = "LecternWindow";
        type Type = super::ReaderWindow;
        type ParentType = ApplicationWindow;
    }

    impl ObjectImpl for ReaderWindow {
        fn constructed(&self) {
            self.parent_constructed();
            self.obj().setup_widgets();
        }
    }

    impl WidgetImpl for ReaderWindow {}
    impl WindowImpl for ReaderWindow {}
    impl ApplicationWindowImpl for ReaderWindow {}
}

glib::wrapper! {
    pub struct ReaderWindow(ObjectSubclass<imp::ReaderWindow>)
        @extends ApplicationWindow, gtk::Window, gtk::Widget,
        @implements gio::ActionGroup, gio::ActionMap, gtk::Accessible, gtk::Buildable,
                    gtk::ConstraintTarget, gtk::Native, gtk::Root, gtk::ShortcutManager;
}

impl ReaderWindow {
    pub fn new(app: &gtk::Application, settings: Settings) -> Self {
        let window: Self = glib::Object::builder()
            .property("application", app)
            .property("title", WINDOW_TITLE)
            .property("default-width", 1000)
            .property("default-height", 800)
            .build();

        window.init_pdfium(&settings);
        window.imp().pdf_view.apply_settings(settings);
        window
    }

    fn init_pdfium(&self, settings: &Settings) {
        match bind_pdfium(settings.pdfium_library_path.as_deref()) {
            Ok(pdfium) => self.imp().pdf_view.set_pdfium(pdfium),
            // The window stays usable; opening a file will report the problem
            Err(e) => error!("{e}"),
        }
    }

    fn setup_widgets(&self) {
        let imp = self.imp();

        self.set_titlebar(Some(imp.header_bar.widget()));

        let scrolled_window = ScrolledWindow::builder()
            .hscrollbar_policy(PolicyType::Automatic)
            .vscrollbar_policy(PolicyType::Automatic)
            .vexpand(true)
            .hexpand(true)
            .child(&imp.pdf_view)
            .build();

        self.set_child(Some(&scrolled_window));

        self.setup_header_buttons();
        self.setup_page_label();
        self.setup_keyboard_controller();
    }

    fn setup_header_buttons(&self) {
        let imp = self.imp();
        let header = &imp.header_bar;

        for button in header.document_buttons() {
            imp.pdf_view
                .bind_property("has-document", button, "sensitive")
                .sync_create()
                .build();
        }

        let window_weak = self.downgrade();
        header.open_button().connect_clicked(move |_| {
            if let Some(window) = window_weak.upgrade() {
                window.show_open_dialog();
            }
        });

        let window_weak = self.downgrade();
        header.close_button().connect_clicked(move |_| {
            if let Some(window) = window_weak.upgrade() {
                window.close_pdf();
            }
        });

        let view = imp.pdf_view.clone();
        header
            .prev_button()
            .connect_clicked(move |_| view.turn_page(NavDirection::Previous));

        let view = imp.pdf_view.clone();
        header
            .next_button()
            .connect_clicked(move |_| view.turn_page(NavDirection::Next));

        let view = imp.pdf_view.clone();
        header.zoom_in_button().connect_clicked(move |_| view.zoom_in());

        let view = imp.pdf_view.clone();
        header.zoom_out_button().connect_clicked(move |_| view.zoom_out());

        let view = imp.pdf_view.clone();
        header
            .fit_width_button()
            .connect_clicked(move |_| view.fit_to_width());

        let window_weak = self.downgrade();
        header.fullscreen_button().connect_clicked(move |_| {
            if let Some(window) = window_weak.upgrade() {
                window.toggle_fullscreen();
            }
        });
    }

    fn setup_page_label(&self) {
        let header = self.imp().header_bar.clone();
        self.imp().pdf_view.connect_closure(
            "page-changed",
            false,
            glib::closure_local!(move |_view: &PdfView, index: u32, total: u32| {
                header.set_page(index, total);
            }),
        );
    }

    fn setup_keyboard_controller(&self) {
        let controller = gtk::EventControllerKey::new();
        let window_weak = self.downgrade();

        controller.connect_key_pressed(move |_, key, _, modifiers| {
            let Some(window) = window_weak.upgrade() else {
                return glib::Propagation::Proceed;
            };
            let action = handle_key(key, modifiers);
            if action.is_handled() && window.execute_key_action(action) {
                glib::Propagation::Stop
            } else {
                glib::Propagation::Proceed
            }
        });

        self.add_controller(controller);
    }

    /// Returns true when the key was consumed
    fn execute_key_action(&self, action: KeyAction) -> bool {
        let view = &self.imp().pdf_view;
        if action.needs_document() && !view.has_document() {
            return false;
        }

        match action {
            KeyAction::None => return false,
            KeyAction::OpenFile => self.show_open_dialog(),
            KeyAction::CloseFile => self.close_pdf(),
            KeyAction::TurnPage(direction) => view.turn_page(direction),
            KeyAction::MoveSentence(step) => return view.move_sentence(step),
            KeyAction::ZoomIn => view.zoom_in(),
            KeyAction::ZoomOut => view.zoom_out(),
            KeyAction::FitWidth => view.fit_to_width(),
            KeyAction::ToggleFullscreen => self.toggle_fullscreen(),
        }
        true
    }

    fn toggle_fullscreen(&self) {
        if self.is_fullscreen() {
            self.unfullscreen();
        } else {
            self.fullscreen();
        }
    }

    fn show_open_dialog(&self) {
        let pdf_filter = gtk::FileFilter::new();
        pdf_filter.set_name(Some("PDF Files"));
        pdf_filter.add_pattern("*.pdf");
        pdf_filter.add_mime_type("application/pdf");

        let all_filter = gtk::FileFilter::new();
        all_filter.set_name(Some("All Files"));
        all_filter.add_pattern("*");

        let filters = gio::ListStore::new::<gtk::FileFilter>();
        filters.append(&pdf_filter);
        filters.append(&all_filter);

        let dialog = gtk::FileDialog::builder()
            .title("Open PDF Document")
            .filters(&filters)
            .default_filter(&pdf_filter)
            .build();
        let window_weak = self.downgrade();

        dialog.open(Some(self), None::<&gio::Cancellable>, move |result| {
            if let Some(window) = window_weak.upgrade() {
                window.handle_file_dialog_result(result);
            }
        });
    }

    fn handle_file_dialog_result(&self, result: Result<gio::File, glib::Error>) {
        // Dismissing the dialog is not an error
        let Ok(file) = result else {
            return;
        };
        let Some(path) = file.path() else {
            return;
        };
        self.open_path(&path);
    }

    /// Open `path`, reporting failures in a dialog. The current document survives a failure.
    pub fn open_path(&self, path: &Path) {
        match self.imp().pdf_view.load_pdf(path) {
            Ok(()) => {
                self.set_title(Some(&format!("{WINDOW_TITLE} - {}", path.display())));
            }
            Err(e) => {
                error!("{e}");
                self.show_error(&e);
            }
        }
    }

    fn close_pdf(&self) {
        let view = &self.imp().pdf_view;
        if !view.has_document() {
            return;
        }
        view.close_pdf();
        self.set_title(Some(WINDOW_TITLE));
    }

    fn show_error(&self, err: &ReaderError) {
        let dialog = gtk::AlertDialog::builder()
            .modal(true)
            .message("Error Loading PDF")
            .detail(format!("Could not load the selected PDF.\n\n{err}"))
            .build();
        dialog.show(Some(self));
    }
}

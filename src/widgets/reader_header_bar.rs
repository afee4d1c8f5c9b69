use gtk::glib;
use gtk::prelude::*;
use gtk::subclass::prelude::*;
use gtk::{Button, HeaderBar, Label};

use crate::view_state::page_label;
use crate::widgets::style::PAGE_LABEL_CLASS;

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct ReaderHeaderBar {
        pub header_bar: HeaderBar,
        pub open_button: Button,
        pub close_button: Button,
        pub prev_button: Button,
        pub next_button: Button,
        pub zoom_in_button: Button,
        pub zoom_out_button: Button,
        pub fit_width_button: Button,
        pub fullscreen_button: Button,
        pub page_label: Label,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for ReaderHeaderBar {
        const NAME: &'static str = "LecternHeaderBar";
        type Type = super::ReaderHeaderBar;
        type ParentType = glib::Object;
    }

    impl ObjectImpl for ReaderHeaderBar {
        fn constructed(&self) {
            self.parent_constructed();
            self.obj().setup_widgets();
        }
    }
}

glib::wrapper! {
    pub struct ReaderHeaderBar(ObjectSubclass<imp::ReaderHeaderBar>);
}

impl ReaderHeaderBar {
    pub fn new() -> Self {
        glib::Object::builder().build()
    }

    fn setup_widgets(&self) {
        let imp = self.imp();

        imp.header_bar
            .set_title_widget(Some(&Label::new(Some("PDF Book Reader"))));
        imp.header_bar.set_show_title_buttons(true);

        let labelled = [
            (&imp.open_button, "Open PDF", "Open a PDF document (Ctrl+O)"),
            (&imp.close_button, "Close File", "Close the current PDF (Ctrl+W)"),
            (&imp.prev_button, "Previous Page", "Previous page (Left)"),
            (&imp.next_button, "Next Page", "Next page (Right)"),
            (&imp.zoom_in_button, "Zoom In", "Zoom in (+)"),
            (&imp.zoom_out_button, "Zoom Out", "Zoom out (-)"),
            (&imp.fit_width_button, "Fit Width", "Fit page to window width"),
            (&imp.fullscreen_button, "Full Screen", "Toggle Full Screen (F11)"),
        ];
        for (button, label, tooltip) in labelled {
            button.set_label(label);
            button.set_tooltip_text(Some(tooltip));
            button.set_can_focus(false);
            imp.header_bar.pack_start(button);
        }

        imp.page_label.add_css_class(PAGE_LABEL_CLASS);
        imp.page_label.set_margin_start(10);
        imp.page_label.set_margin_end(10);
        imp.header_bar.pack_end(&imp.page_label);
        self.set_page(0, 0);
    }

    /// Returns the HeaderBar widget to be used with set_titlebar()
    pub fn widget(&self) -> &HeaderBar {
        &self.imp().header_bar
    }

    /// Buttons that only make sense with a document open
    pub fn document_buttons(&self) -> [&Button; 6] {
        let imp = self.imp();
        [
            &imp.close_button,
            &imp.prev_button,
            &imp.next_button,
            &imp.zoom_in_button,
            &imp.zoom_out_button,
            &imp.fit_width_button,
        ]
    }

    pub fn set_page(&self, index: u32, total: u32) {
        self.imp()
            .page_label
            .set_text(&page_label(index as usize, total as usize));
    }

    pub fn open_button(&self) -> &Button {
        &self.imp().open_button
    }

    pub fn close_button(&self) -> &Button {
        &self.imp().close_button
    }

    pub fn prev_button(&self) -> &Button {
        &self.imp().prev_button
    }

    pub fn next_button(&self) -> &Button {
        &self.imp().next_button
    }

    pub fn zoom_in_button(&self) -> &Button {
        &self.imp().zoom_in_button
    }

    pub fn zoom_out_button(&self) -> &Button {
        &self.imp().zoom_out_button
    }

    pub fn fit_width_button(&self) -> &Button {
        &self.imp().fit_width_button
    }

    pub fn fullscreen_button(&self) -> &Button {
        &self.imp().fullscreen_button
    }
}

impl Default for ReaderHeaderBar {
    fn default() -> Self {
        Self::new()
    }
}

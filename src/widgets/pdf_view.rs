use glib::Properties;
use glib::subclass::Signal;
use gtk::gdk::ModifierType;
use gtk::glib;
use gtk::graphene;
use gtk::prelude::*;
use gtk::subclass::prelude::*;
use gtk::{Box, EventControllerMotion, GestureClick, GestureDrag, Orientation, Overlay};
use log::{debug, info, warn};
use pdfium_render::prelude::*;
use std::cell::{Cell, RefCell};
use std::path::Path;
use std::sync::OnceLock;

use crate::error::{ReaderError, Result};
use crate::services::document::OpenDocument;
use crate::services::settings::Settings;
use crate::text_map::{PagePoint, PageRect, PageTextMap};
use crate::view_state::{
    ENSURE_VISIBLE_MARGIN, NavDirection, ReaderController, SentenceStep, WHEEL_NOTCH_DELTA,
    anchored_scroll, ensure_visible, pan_scroll,
};
use crate::widgets::style::PDF_VIEW_CLASS;
use crate::widgets::{HighlightOverlay, PageCanvas};

mod imp {
    use super::*;

    #[derive(Properties)]
    #[properties(wrapper_type = super::PdfView)]
    pub struct PdfView {
        pub document: RefCell<Option<OpenDocument>>,
        pub pdfium: Cell<Option<&'static Pdfium>>,
        pub settings: RefCell<Settings>,
        pub controller: RefCell<ReaderController>,
        /// Last pointer position in view coordinates, while inside the view
        pub pointer: Cell<Option<(f64, f64)>>,
        pub(super) canvas: PageCanvas,
        pub(super) overlay: Overlay,
        pub(super) highlight: HighlightOverlay,
        #[property(get, set, default = false)]
        pub has_document: Cell<bool>,
    }

    impl Default for PdfView {
        fn default() -> Self {
            Self {
                document: RefCell::new(None),
                pdfium: Cell::new(None),
                settings: RefCell::new(Settings::default()),
                controller: RefCell::new(ReaderController::default()),
                pointer: Cell::new(None),
                canvas: PageCanvas::new(),
                overlay: Overlay::new(),
                highlight: HighlightOverlay::new(),
                has_document: Cell::new(false),
            }
        }
    }

    #[glib::object_subclass]
    impl ObjectSubclass for PdfView {
        const NAME: &'static str = "LecternPdfView";
        type Type = super::PdfView;
        type ParentType = Box;
    }

    #[glib::derived_properties]
    impl ObjectImpl for PdfView {
        fn constructed(&self) {
            self.parent_constructed();
            self.obj().setup_widgets();
        }

        fn signals() -> &'static [Signal] {
            static SIGNALS: OnceLock<Vec<Signal>> = OnceLock::new();
            SIGNALS.get_or_init(|| {
                // (current index, total pages); 0-indexed
                vec![
                    Signal::builder("page-changed")
                        .param_types([u32::static_type(), u32::static_type()])
                        .build(),
                ]
            })
        }
    }

    impl WidgetImpl for PdfView {}
    impl BoxImpl for PdfView {}
}

glib::wrapper! {
    /// Single-page PDF view with sentence highlighting
    pub struct PdfView(ObjectSubclass<imp::PdfView>)
        @extends Box, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget, gtk::Orientable;
}

impl PdfView {
    pub fn new() -> Self {
        glib::Object::builder().build()
    }

    fn setup_widgets(&self) {
        let imp = self.imp();

        self.set_orientation(Orientation::Vertical);
        self.set_hexpand(true);
        self.set_vexpand(true);
        self.add_css_class(PDF_VIEW_CLASS);

        imp.overlay.set_child(Some(&imp.canvas));
        imp.overlay.add_overlay(&imp.highlight);
        imp.overlay.set_halign(gtk::Align::Center);
        imp.overlay.set_valign(gtk::Align::Start);
        self.append(&imp.overlay);

        self.setup_pointer_tracking();
        self.setup_drag_panning();
        self.setup_zoom_wheel();
    }

    pub fn set_pdfium(&self, pdfium: &'static Pdfium) {
        self.imp().pdfium.set(Some(pdfium));
    }

    pub fn apply_settings(&self, settings: Settings) {
        let imp = self.imp();
        imp.highlight.set_color(settings.highlight_rgba());
        imp.controller.replace(ReaderController::new(&settings));
        imp.settings.replace(settings);
    }

    // ------------------------------------------------------------------
    // Document lifecycle
    // ------------------------------------------------------------------

    /// Open `path`, replacing the current document only on success
    pub fn load_pdf(&self, path: &Path) -> Result<()> {
        let pdfium = self.imp().pdfium.get().ok_or(ReaderError::NoPdfium)?;
        let document = OpenDocument::open(pdfium, path)?;
        let page_count = document.page_count();

        // The previous document is dropped (and closed) here
        self.imp().document.replace(Some(document));
        self.imp().controller.borrow_mut().document_opened(page_count);
        self.set_has_document(true);

        self.display_page();
        self.fit_to_width();
        self.emit_page_changed();
        Ok(())
    }

    pub fn close_pdf(&self) {
        let imp = self.imp();
        if imp.document.take().is_none() {
            return;
        }
        imp.controller.borrow_mut().document_closed();
        imp.canvas.set_texture(None);
        imp.highlight.clear();
        self.set_has_document(false);
        self.apply_zoom();
        self.emit_page_changed();
    }

    /// Render the current page and rebuild its sentences
    ///
    /// The previous page is cleared first, so any failure leaves an empty view.
    fn display_page(&self) {
        let imp = self.imp();
        imp.highlight.clear();
        imp.canvas.set_texture(None);
        imp.controller.borrow_mut().clear_page();

        self.load_current_page();
        self.apply_zoom();
    }

    fn load_current_page(&self) {
        let imp = self.imp();
        let index = imp.controller.borrow().page_index();
        let render_scale = imp.settings.borrow().render_scale;

        let doc_borrow = imp.document.borrow();
        let Some(document) = doc_borrow.as_ref() else {
            return;
        };
        if index >= document.page_count() {
            return;
        }

        let (width, height) = match document.page_size(index) {
            Ok(size) => size,
            Err(e) => {
                warn!("{e}");
                return;
            }
        };

        match document.render_page(index, render_scale) {
            Ok(texture) => imp.canvas.set_texture(Some(texture.upcast())),
            Err(e) => warn!("{e}"),
        }

        let page = document
            .page_text(index)
            .unwrap_or_else(|_| PageTextMap::from_words(index, width, height, Vec::new()));
        imp.controller.borrow_mut().show_page(page);
    }

    pub fn turn_page(&self, direction: NavDirection) {
        let turned = self.imp().controller.borrow_mut().turn_page(direction);
        if let Some(index) = turned {
            info!("Showing page {}", index + 1);
            self.display_page();
            self.emit_page_changed();
        }
    }

    fn emit_page_changed(&self) {
        let (index, total) = {
            let controller = self.imp().controller.borrow();
            (controller.page_index() as u32, controller.page_count() as u32)
        };
        self.emit_by_name::<()>("page-changed", &[&index, &total]);
    }

    // ------------------------------------------------------------------
    // Zoom
    // ------------------------------------------------------------------

    pub fn zoom_level(&self) -> f64 {
        self.imp().controller.borrow().zoom().factor()
    }

    pub fn zoom_in(&self) {
        if !self.has_document() {
            return;
        }
        self.imp().controller.borrow_mut().zoom_mut().step_in();
        self.apply_zoom();
    }

    pub fn zoom_out(&self) {
        if !self.has_document() {
            return;
        }
        self.imp().controller.borrow_mut().zoom_mut().step_out();
        self.apply_zoom();
    }

    pub fn fit_to_width(&self) {
        if !self.has_document() {
            return;
        }
        let viewport_width = self.viewport_width();
        let (page_width, _) = self.imp().controller.borrow().page_size();
        self.imp()
            .controller
            .borrow_mut()
            .zoom_mut()
            .fit_to_width(viewport_width, page_width);
        self.apply_zoom();
    }

    fn viewport_width(&self) -> f64 {
        let allocated = self
            .find_scrolled_window()
            .map(|scrolled| scrolled.width())
            .unwrap_or_else(|| self.width());
        if allocated > 0 {
            return allocated as f64;
        }
        // Not mapped yet on the first load; use the window's requested width
        self.root()
            .and_then(|root| root.downcast::<gtk::Window>().ok())
            .map(|window| window.default_width() as f64)
            .unwrap_or(0.0)
    }

    /// Resize the page to the current zoom factor
    fn apply_zoom(&self) {
        let imp = self.imp();
        let zoom = self.zoom_level();
        let (width, height) = imp.controller.borrow().display_size();
        debug!("Zoom {:.2}", zoom);

        imp.canvas.set_display_size(width, height);

        let margin = if self.has_document() {
            (imp.settings.borrow().page_margin as f64 * zoom).round() as i32
        } else {
            0
        };
        imp.overlay.set_margin_top(margin);
        imp.overlay.set_margin_bottom(margin);
        imp.overlay.set_margin_start(margin);
        imp.overlay.set_margin_end(margin);

        imp.highlight.set_zoom(zoom);
    }

    fn setup_zoom_wheel(&self) {
        let view_weak = self.downgrade();

        let scroll_controller =
            gtk::EventControllerScroll::new(gtk::EventControllerScrollFlags::VERTICAL);
        scroll_controller.set_propagation_phase(gtk::PropagationPhase::Capture);

        scroll_controller.connect_scroll(move |controller, _dx, dy| {
            let ctrl_held = controller
                .current_event_state()
                .contains(ModifierType::CONTROL_MASK);
            match view_weak.upgrade() {
                Some(view) if ctrl_held => {
                    view.zoom_by_wheel(dy);
                    glib::Propagation::Stop
                }
                _ => glib::Propagation::Proceed,
            }
        });

        self.add_controller(scroll_controller);
    }

    /// `dy` is in GTK scroll units (one notch = 1.0, positive = toward the user)
    fn zoom_by_wheel(&self, dy: f64) {
        if !self.has_document() {
            return;
        }
        let delta = -dy * WHEEL_NOTCH_DELTA;
        let old_zoom = self.zoom_level();
        self.imp().controller.borrow_mut().zoom_mut().apply_wheel(delta);
        self.apply_zoom();
        self.anchor_to_pointer(self.zoom_level() / old_zoom);
    }

    /// Scroll so the content under the pointer stays under it after a zoom by `ratio`
    fn anchor_to_pointer(&self, ratio: f64) {
        if (ratio - 1.0).abs() < f64::EPSILON {
            return;
        }
        let Some((x, y)) = self.imp().pointer.get() else {
            return;
        };
        let Some(scrolled) = self.find_scrolled_window() else {
            return;
        };

        let new_x = Self::anchor_adjustment(&scrolled.hadjustment(), x, ratio);
        let new_y = Self::anchor_adjustment(&scrolled.vadjustment(), y, ratio);
        // No motion event follows, but the pointer is now over other content
        self.imp().pointer.set(Some((new_x, new_y)));
    }

    /// Returns the pointer's new position in view coordinates
    fn anchor_adjustment(adjustment: &gtk::Adjustment, position: f64, ratio: f64) -> f64 {
        let pointer = position - adjustment.value();
        let target = anchored_scroll(adjustment.value(), pointer, ratio);
        // The resized page is not laid out yet; make room for the target
        adjustment.set_upper(adjustment.upper().max(target + adjustment.page_size()));
        adjustment.set_value(target);
        adjustment.value() + pointer
    }

    // ------------------------------------------------------------------
    // Hand-drag panning
    // ------------------------------------------------------------------

    fn setup_drag_panning(&self) {
        let drag = GestureDrag::new();
        drag.set_button(gtk::gdk::BUTTON_PRIMARY);

        let view_weak = self.downgrade();
        drag.connect_drag_begin(move |_, _, _| {
            if let Some(view) = view_weak.upgrade() {
                view.set_cursor_from_name(Some("grabbing"));
            }
        });

        let view_weak = self.downgrade();
        drag.connect_drag_update(move |_, offset_x, offset_y| {
            if let Some(view) = view_weak.upgrade() {
                view.pan_by(offset_x, offset_y);
            }
        });

        let view_weak = self.downgrade();
        drag.connect_drag_end(move |_, _, _| {
            if let Some(view) = view_weak.upgrade() {
                view.set_cursor_from_name(None);
            }
        });

        // Shares the press with the click gesture, which locks the sentence
        self.imp().overlay.add_controller(drag);
    }

    fn pan_by(&self, offset_x: f64, offset_y: f64) {
        let Some(scrolled) = self.find_scrolled_window() else {
            return;
        };
        let hadj = scrolled.hadjustment();
        hadj.set_value(pan_scroll(hadj.value(), offset_x));
        let vadj = scrolled.vadjustment();
        vadj.set_value(pan_scroll(vadj.value(), offset_y));
    }

    // ------------------------------------------------------------------
    // Highlighting
    // ------------------------------------------------------------------

    fn setup_pointer_tracking(&self) {
        let imp = self.imp();

        let motion = EventControllerMotion::new();
        let view_weak = self.downgrade();
        motion.connect_motion(move |_, x, y| {
            if let Some(view) = view_weak.upgrade() {
                view.handle_pointer_motion(x, y);
            }
        });
        imp.overlay.add_controller(motion);

        let click = GestureClick::new();
        click.set_button(gtk::gdk::BUTTON_PRIMARY);
        let view_weak = self.downgrade();
        click.connect_pressed(move |_, _, x, y| {
            if let Some(view) = view_weak.upgrade() {
                view.handle_pointer_press(x, y);
            }
        });
        imp.overlay.add_controller(click);

        // Pointer position for zoom anchoring, in view coordinates
        let position = EventControllerMotion::new();
        let view_weak = self.downgrade();
        position.connect_motion(move |_, x, y| {
            if let Some(view) = view_weak.upgrade() {
                view.imp().pointer.set(Some((x, y)));
            }
        });
        let view_weak = self.downgrade();
        position.connect_leave(move |_| {
            if let Some(view) = view_weak.upgrade() {
                view.imp().pointer.set(None);
            }
        });
        self.add_controller(position);
    }

    /// Widget pixels on the page to page points
    fn to_page_point(&self, x: f64, y: f64) -> PagePoint {
        let zoom = self.zoom_level();
        PagePoint::new(x / zoom, y / zoom)
    }

    fn handle_pointer_motion(&self, x: f64, y: f64) {
        let point = self.to_page_point(x, y);
        let changed = self.imp().controller.borrow_mut().pointer_moved(point);
        if changed {
            if let Some(sentence) = self.imp().controller.borrow().hovered_sentence() {
                debug!("Hovering sentence: {}", sentence.text);
            }
            self.refresh_highlights();
        }
    }

    fn handle_pointer_press(&self, x: f64, y: f64) {
        let point = self.to_page_point(x, y);
        let changed = self.imp().controller.borrow_mut().pointer_pressed(point);
        if changed {
            self.refresh_highlights();
        }
    }

    /// Lock the next/previous sentence and bring it into view
    ///
    /// Returns false when the page has no sentences, so the key can propagate.
    pub fn move_sentence(&self, step: SentenceStep) -> bool {
        let target = self.imp().controller.borrow_mut().step_sentence(step);
        let Some(bounds) = target else {
            return false;
        };
        if let Some(sentence) = self.imp().controller.borrow().locked_sentence() {
            debug!("Locked sentence: {}", sentence.text);
        }
        self.refresh_highlights();
        self.scroll_to_page_rect(&bounds);
        true
    }

    fn refresh_highlights(&self) {
        let bands = self.imp().controller.borrow().highlight_bands();
        self.imp().highlight.set_bands(bands);
    }

    fn scroll_to_page_rect(&self, rect: &PageRect) {
        let Some(scrolled) = self.find_scrolled_window() else {
            return;
        };
        let on_screen = rect.scaled(self.zoom_level());
        let top_left = graphene::Point::new(on_screen.x0 as f32, on_screen.y0 as f32);
        let Some(origin) = self.imp().overlay.compute_point(self, &top_left) else {
            return;
        };

        let x0 = origin.x() as f64;
        let y0 = origin.y() as f64;

        let vadj = scrolled.vadjustment();
        vadj.set_value(ensure_visible(
            vadj.value(),
            vadj.page_size(),
            vadj.upper(),
            y0,
            y0 + on_screen.height(),
            ENSURE_VISIBLE_MARGIN,
        ));

        let hadj = scrolled.hadjustment();
        hadj.set_value(ensure_visible(
            hadj.value(),
            hadj.page_size(),
            hadj.upper(),
            x0,
            x0 + on_screen.width(),
            ENSURE_VISIBLE_MARGIN,
        ));
    }

    fn find_scrolled_window(&self) -> Option<gtk::ScrolledWindow> {
        self.parent()?.parent()?.downcast().ok()
    }
}

impl Default for PdfView {
    fn default() -> Self {
        Self::new()
    }
}

use gtk::glib;
use gtk::prelude::*;
use gtk::subclass::prelude::*;
use std::cell::{Cell, RefCell};

use crate::text_map::PageRect;
use crate::view_state::HighlightBands;

mod imp {
    use super::*;

    pub struct HighlightOverlay {
        pub bands: RefCell<HighlightBands>,
        /// Widget pixels per page point
        pub zoom: Cell<f64>,
        pub color: Cell<(f64, f64, f64, f64)>,
    }

    impl Default for HighlightOverlay {
        fn default() -> Self {
            Self {
                bands: RefCell::new(HighlightBands::default()),
                zoom: Cell::new(1.0),
                color: Cell::new((1.0, 1.0, 0.0, 100.0 / 255.0)),
            }
        }
    }

    #[glib::object_subclass]
    impl ObjectSubclass for HighlightOverlay {
        const NAME: &'static str = "LecternHighlightOverlay";
        type Type = super::HighlightOverlay;
        type ParentType = gtk::DrawingArea;
    }

    impl ObjectImpl for HighlightOverlay {
        fn constructed(&self) {
            self.parent_constructed();
            self.obj().setup_drawing();
        }
    }

    impl WidgetImpl for HighlightOverlay {}
    impl DrawingAreaImpl for HighlightOverlay {}
}

glib::wrapper! {
    /// Translucent sentence highlights drawn over the page picture
    pub struct HighlightOverlay(ObjectSubclass<imp::HighlightOverlay>)
        @extends gtk::DrawingArea, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget;
}

impl HighlightOverlay {
    pub fn new() -> Self {
        glib::Object::builder().build()
    }

    fn setup_drawing(&self) {
        // Pointer events go to the page underneath
        self.set_can_target(false);

        let overlay_weak = self.downgrade();
        self.set_draw_func(move |_area, cr, _width, _height| {
            if let Some(overlay) = overlay_weak.upgrade() {
                overlay.draw(cr);
            }
        });
    }

    fn draw(&self, cr: &gtk::cairo::Context) {
        let bands = self.imp().bands.borrow();
        if bands.is_empty() {
            return;
        }
        let zoom = self.imp().zoom.get();
        let (r, g, b, a) = self.imp().color.get();

        cr.set_source_rgba(r, g, b, a);

        // Lock first, hover on top
        for band in bands.locked.iter().chain(bands.hovered.iter()) {
            Self::fill_band(cr, &band.scaled(zoom));
        }
    }

    fn fill_band(cr: &gtk::cairo::Context, rect: &PageRect) {
        cr.rectangle(rect.x0, rect.y0, rect.width(), rect.height());
        let _ = cr.fill();
    }

    pub fn set_color(&self, rgba: (f64, f64, f64, f64)) {
        self.imp().color.set(rgba);
        self.queue_draw();
    }

    pub fn set_zoom(&self, zoom: f64) {
        self.imp().zoom.set(zoom);
        self.queue_draw();
    }

    pub fn set_bands(&self, bands: HighlightBands) {
        self.imp().bands.replace(bands);
        self.queue_draw();
    }

    pub fn clear(&self) {
        self.set_bands(HighlightBands::default());
    }
}

impl Default for HighlightOverlay {
    fn default() -> Self {
        Self::new()
    }
}

use gtk::prelude::*;
use gtk::subclass::prelude::*;
use gtk::{gdk, glib, graphene, gsk};
use std::cell::{Cell, RefCell};

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct PageCanvas {
        pub texture: RefCell<Option<gdk::Texture>>,
        /// On-screen size in widget pixels (page points * zoom)
        pub display_width: Cell<i32>,
        pub display_height: Cell<i32>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for PageCanvas {
        const NAME: &'static str = "LecternPageCanvas";
        type Type = super::PageCanvas;
        type ParentType = gtk::Widget;
    }

    impl ObjectImpl for PageCanvas {}

    impl WidgetImpl for PageCanvas {
        fn measure(&self, orientation: gtk::Orientation, _for_size: i32) -> (i32, i32, i32, i32) {
            let size = match orientation {
                gtk::Orientation::Horizontal => self.display_width.get(),
                _ => self.display_height.get(),
            };
            (size, size, -1, -1)
        }

        fn snapshot(&self, snapshot: &gtk::Snapshot) {
            let Some(texture) = self.texture.borrow().clone() else {
                return;
            };
            let bounds = graphene::Rect::new(
                0.0,
                0.0,
                self.display_width.get() as f32,
                self.display_height.get() as f32,
            );
            // The texture is rendered well above screen resolution; filter on the way down
            snapshot.append_scaled_texture(&texture, gsk::ScalingFilter::Trilinear, &bounds);
        }
    }
}

glib::wrapper! {
    /// Draws a pre-rendered page texture at the current zoom size
    pub struct PageCanvas(ObjectSubclass<imp::PageCanvas>)
        @extends gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget;
}

impl PageCanvas {
    pub fn new() -> Self {
        glib::Object::builder().build()
    }

    pub fn set_texture(&self, texture: Option<gdk::Texture>) {
        self.imp().texture.replace(texture);
        self.queue_draw();
    }

    pub fn set_display_size(&self, width: i32, height: i32) {
        let imp = self.imp();
        imp.display_width.set(width.max(0));
        imp.display_height.set(height.max(0));
        self.queue_resize();
    }
}

impl Default for PageCanvas {
    fn default() -> Self {
        Self::new()
    }
}

//! On-screen zoom factor
//!
//! The page is rasterized once at a fixed scale; zoom only changes the size
//! the picture is drawn at.

use crate::services::settings::Settings;

/// One notch of a mouse wheel, in eighths of a degree
pub const WHEEL_NOTCH_DELTA: f64 = 120.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Zoom {
    factor: f64,
    step: f64,
    min: f64,
    max: f64,
    wheel_divisor: f64,
    fit_width_margin: f64,
    fit_width_min: f64,
}

impl Default for Zoom {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl Zoom {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            factor: 1.0_f64.clamp(settings.min_zoom, settings.max_zoom),
            step: settings.zoom_step,
            min: settings.min_zoom,
            max: settings.max_zoom,
            wheel_divisor: settings.wheel_divisor,
            fit_width_margin: settings.fit_width_margin,
            fit_width_min: settings.fit_width_min,
        }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Set the factor, clamped to the allowed range
    pub fn set_factor(&mut self, factor: f64) {
        if factor.is_finite() {
            self.factor = factor.clamp(self.min, self.max);
        }
    }

    pub fn step_in(&mut self) {
        self.set_factor(self.factor + self.step);
    }

    pub fn step_out(&mut self) {
        self.set_factor(self.factor - self.step);
    }

    /// Apply a wheel delta (positive = away from the user = zoom in)
    pub fn apply_wheel(&mut self, delta: f64) {
        self.set_factor(self.factor + delta / self.wheel_divisor);
    }

    /// Zoom so the page fills the viewport width minus a margin
    pub fn fit_to_width(&mut self, viewport_width: f64, page_width_pts: f64) {
        if page_width_pts <= 0.0 {
            return;
        }
        let desired_width = (viewport_width - self.fit_width_margin).max(self.fit_width_min);
        self.set_factor(desired_width / page_width_pts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_wheel_notch_adds_a_tenth() {
        let mut zoom = Zoom::default();
        zoom.apply_wheel(WHEEL_NOTCH_DELTA);
        assert!(approx(zoom.factor(), 1.1));
        zoom.apply_wheel(-2.0 * WHEEL_NOTCH_DELTA);
        assert!(approx(zoom.factor(), 0.9));
    }

    #[test]
    fn test_steps() {
        let mut zoom = Zoom::default();
        zoom.step_in();
        assert!(approx(zoom.factor(), 1.2));
        zoom.step_out();
        zoom.step_out();
        assert!(approx(zoom.factor(), 0.8));
    }

    #[test]
    fn test_clamped_to_range() {
        let mut zoom = Zoom::default();
        zoom.set_factor(50.0);
        assert_eq!(zoom.factor(), 10.0);
        zoom.step_in();
        assert_eq!(zoom.factor(), 10.0);
        zoom.set_factor(0.15);
        zoom.step_out();
        assert_eq!(zoom.factor(), 0.1);
        zoom.apply_wheel(-100.0 * WHEEL_NOTCH_DELTA);
        assert_eq!(zoom.factor(), 0.1);
        zoom.set_factor(f64::NAN);
        assert_eq!(zoom.factor(), 0.1);
    }

    #[test]
    fn test_fit_to_width() {
        let mut zoom = Zoom::default();
        zoom.fit_to_width(1000.0, 450.0);
        assert!(approx(zoom.factor(), 2.0));
    }

    #[test]
    fn test_fit_to_width_floors_usable_width() {
        let mut zoom = Zoom::default();
        zoom.fit_to_width(150.0, 500.0);
        assert!(approx(zoom.factor(), 0.2));
        zoom.fit_to_width(1000.0, 0.0);
        assert!(approx(zoom.factor(), 0.2));
    }
}

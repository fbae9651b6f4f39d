//! Navigation, scroll, and sidebar state.
//!
//! These mirror what the page toggles on its elements: CSS `active` and
//! `scrolled` classes, reveal-on-scroll `visible` classes, and the body
//! scroll lock while the cart sidebar is open.

use std::collections::BTreeSet;

/// Scroll offset past which the navbar switches to its compact style.
pub const NAVBAR_SCROLL_THRESHOLD: f64 = 50.0;

/// Fraction of an element that must be on screen to reveal it.
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// The viewport's bottom edge is pulled up by this much for reveal checks.
pub const REVEAL_BOTTOM_MARGIN: f64 = 50.0;

/// Mobile menu and its hamburger button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    /// Hamburger clicked.
    pub const fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// A nav link clicked: always closes.
    pub const fn link_clicked(&mut self) {
        self.open = false;
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }
}

/// Top navigation bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navbar {
    scrolled: bool,
}

impl Navbar {
    pub fn on_scroll(&mut self, scroll_y: f64) {
        self.scrolled = scroll_y > NAVBAR_SCROLL_THRESHOLD;
    }

    #[must_use]
    pub const fn is_scrolled(&self) -> bool {
        self.scrolled
    }
}

/// Slide-in cart panel and its overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartSidebar {
    open: bool,
}

impl CartSidebar {
    pub const fn open(&mut self) {
        self.open = true;
    }

    pub const fn close(&mut self) {
        self.open = false;
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Page body scrolling is disabled while the sidebar is open.
    #[must_use]
    pub const fn body_scroll_locked(&self) -> bool {
        self.open
    }
}

#[derive(Debug, Clone)]
struct Observed {
    id: String,
    top: f64,
    height: f64,
}

/// Reveal-on-scroll animation targets.
///
/// Each element is revealed the first time enough of it enters the
/// (margin-adjusted) viewport, and stays revealed.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    observed: Vec<Observed>,
    revealed: BTreeSet<String>,
}

impl RevealTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing an element at document offset `top` with `height`.
    pub fn observe(&mut self, id: impl Into<String>, top: f64, height: f64) {
        self.observed.push(Observed {
            id: id.into(),
            top,
            height: height.max(0.0),
        });
    }

    /// Recompute intersections for the viewport at `scroll_y`. Returns the
    /// ids revealed by this update.
    pub fn update(&mut self, scroll_y: f64, viewport_height: f64) -> Vec<String> {
        let view_top = scroll_y;
        let view_bottom = scroll_y + viewport_height - REVEAL_BOTTOM_MARGIN;

        let mut newly = Vec::new();
        for element in &self.observed {
            if self.revealed.contains(&element.id) {
                continue;
            }
            if intersection_ratio(element, view_top, view_bottom) >= REVEAL_THRESHOLD {
                newly.push(element.id.clone());
            }
        }

        self.revealed.extend(newly.iter().cloned());
        newly
    }

    #[must_use]
    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }
}

fn intersection_ratio(element: &Observed, view_top: f64, view_bottom: f64) -> f64 {
    let bottom = element.top + element.height;
    if element.height <= 0.0 {
        // Zero-height elements count as fully visible once inside the view.
        return if element.top >= view_top && element.top <= view_bottom {
            1.0
        } else {
            0.0
        };
    }
    let overlap = (bottom.min(view_bottom) - element.top.max(view_top)).max(0.0);
    overlap / element.height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_menu_toggle_and_link_close() {
        let mut menu = NavMenu::default();
        menu.toggle();
        assert!(menu.is_open());
        menu.toggle();
        assert!(!menu.is_open());
        menu.toggle();
        menu.link_clicked();
        assert!(!menu.is_open());
    }

    #[test]
    fn test_navbar_threshold_is_exclusive() {
        let mut navbar = Navbar::default();
        navbar.on_scroll(50.0);
        assert!(!navbar.is_scrolled());
        navbar.on_scroll(50.5);
        assert!(navbar.is_scrolled());
        navbar.on_scroll(0.0);
        assert!(!navbar.is_scrolled());
    }

    #[test]
    fn test_sidebar_scroll_lock() {
        let mut sidebar = CartSidebar::default();
        sidebar.open();
        assert!(sidebar.body_scroll_locked());
        sidebar.close();
        assert!(!sidebar.body_scroll_locked());
    }

    #[test]
    fn test_reveal_needs_ten_percent_above_margin() {
        let mut tracker = RevealTracker::new();
        // Viewport 0..800, effective bottom 750.
        tracker.observe("hero", 745.0, 100.0);
        assert!(tracker.update(0.0, 800.0).is_empty());

        tracker.observe("features", 700.0, 100.0);
        assert_eq!(tracker.update(0.0, 800.0), vec!["features".to_string()]);
        assert!(!tracker.is_revealed("hero"));

        // Scrolling 10px more brings hero to 15% visible.
        assert_eq!(tracker.update(10.0, 800.0), vec!["hero".to_string()]);
    }

    #[test]
    fn test_reveal_is_sticky() {
        let mut tracker = RevealTracker::new();
        tracker.observe("card", 100.0, 200.0);
        assert_eq!(tracker.update(0.0, 800.0).len(), 1);
        assert!(tracker.update(5000.0, 800.0).is_empty());
        assert!(tracker.is_revealed("card"));
    }
}

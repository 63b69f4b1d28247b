//! Navigation bar state
//!
//! The bar compacts once the page has scrolled past a small threshold and
//! carries the mobile menu toggle. It reads the virtual scroll position
//! published by the scroll driver.

use crate::content::NAV_LINKS;

#[derive(Clone, Debug, PartialEq)]
pub struct Navbar {
    threshold: f32,
    scrolled: bool,
    menu_open: bool,
}

impl Navbar {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            scrolled: false,
            menu_open: false,
        }
    }

    /// Returns true when the compact state flipped
    pub fn on_scroll(&mut self, position: f32) -> bool {
        let scrolled = position > self.threshold;
        if scrolled == self.scrolled {
            return false;
        }
        self.scrolled = scrolled;
        tracing::trace!(scrolled, position, "navbar: compact state changed");
        true
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    /// Following a link closes the mobile menu
    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn links(&self) -> &'static [(&'static str, &'static str)] {
        &NAV_LINKS
    }
}

impl Default for Navbar {
    fn default() -> Self {
        Self::new(50.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_exclusive() {
        let mut navbar = Navbar::default();
        assert!(!navbar.on_scroll(50.0));
        assert!(!navbar.is_scrolled());

        assert!(navbar.on_scroll(50.5));
        assert!(navbar.is_scrolled());
        assert!(!navbar.on_scroll(400.0));

        assert!(navbar.on_scroll(0.0));
        assert!(!navbar.is_scrolled());
    }

    #[test]
    fn test_menu() {
        let mut navbar = Navbar::default();
        assert!(navbar.toggle_menu());
        navbar.close_menu();
        assert!(!navbar.is_menu_open());
        assert_eq!(navbar.links().len(), 4);
    }
}

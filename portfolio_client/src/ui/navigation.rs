/// Scroll offset after which the navbar switches to its compact style.
pub const SCROLLED_THRESHOLD: f64 = 50.0;
pub const BACK_TO_TOP_THRESHOLD: f64 = 500.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl Section {
    fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollState {
    pub scrolled: bool,
    pub back_to_top_visible: bool,
    /// Section whose navigation link is highlighted.
    pub active_section: Option<String>,
}

impl ScrollState {
    /// The active section only changes when the probe position (a third down
    /// the viewport) lies inside a section.
    pub fn on_scroll(&mut self, scroll_y: f64, viewport_height: f64, sections: &[Section]) {
        self.scrolled = scroll_y > SCROLLED_THRESHOLD;
        self.back_to_top_visible = scroll_y > BACK_TO_TOP_THRESHOLD;

        let probe = scroll_y + viewport_height / 3.0;
        if let Some(section) = sections.iter().rev().find(|s| s.contains(probe)) {
            self.active_section = Some(section.id.clone());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    Toggle,
    LinkClicked,
    ClickedOutside,
    Escape,
}

/// Mobile navigation menu. Page scrolling is locked while it is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn handle(&mut self, event: MenuEvent) -> bool {
        self.open = match event {
            MenuEvent::Toggle => !self.open,
            MenuEvent::LinkClicked | MenuEvent::ClickedOutside | MenuEvent::Escape => false,
        };
        self.open
    }

    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn scroll_locked(self) -> bool {
        self.open
    }
}

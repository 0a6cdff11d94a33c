//! In-page navigation.
//!
//! The page is one long scroll with a fixed set of anchors. Header links do not
//! jump or navigate; they request a smooth scroll to the target section. The
//! same entries appear twice, once in the desktop nav and once in the
//! collapsible mobile menu, and activating a mobile entry also closes the menu.
//!
//! Nothing here is persisted and the current section is not tracked.

/// Every anchored section on the page. Each anchor id appears exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    About,
    Experience,
    Education,
    Projects,
    Skills,
    Achievements,
    Contact,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::About,
        Section::Experience,
        Section::Education,
        Section::Projects,
        Section::Skills,
        Section::Achievements,
        Section::Contact,
    ];

    /// The element id used as the scroll target.
    pub fn anchor(self) -> &'static str {
        match self {
            Section::About => "about",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Projects => "projects",
            Section::Skills => "skills",
            Section::Achievements => "achievements",
            Section::Contact => "contact",
        }
    }

    /// Label shown in the header navigation.
    pub fn label(self) -> &'static str {
        match self {
            Section::About => "About",
            Section::Experience => "Experience",
            Section::Education => "Education",
            Section::Projects => "Projects",
            Section::Skills => "Skills",
            Section::Achievements => "Achievements",
            Section::Contact => "Contact",
        }
    }

    pub fn from_anchor(anchor: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.anchor() == anchor)
    }
}

/// Sections listed in the header (desktop and mobile alike).
pub const NAV_SECTIONS: [Section; 5] = [
    Section::About,
    Section::Experience,
    Section::Education,
    Section::Projects,
    Section::Skills,
];

/// Which navigation surface a link was activated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOrigin {
    Desktop,
    Mobile,
}

impl NavOrigin {
    /// Value of the `data-nav` attribute the browser script keys on.
    pub fn marker(self) -> &'static str {
        match self {
            NavOrigin::Desktop => "desktop",
            NavOrigin::Mobile => "mobile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
}

/// A request to bring a section into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub target: Section,
    pub behavior: ScrollBehavior,
}

/// Header navigation state. Only the mobile menu's visibility is tracked.
#[derive(Debug, Default, Clone)]
pub struct NavState {
    mobile_open: bool,
}

impl NavState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_menu_open(&self) -> bool {
        self.mobile_open
    }

    /// Hamburger button.
    pub fn toggle_menu(&mut self) {
        self.mobile_open = !self.mobile_open;
    }

    /// Handle activation of a nav entry in place of default anchor navigation.
    pub fn activate(&mut self, target: Section, origin: NavOrigin) -> ScrollRequest {
        if origin == NavOrigin::Mobile {
            self.mobile_open = false;
        }
        ScrollRequest {
            target,
            behavior: ScrollBehavior::Smooth,
        }
    }
}

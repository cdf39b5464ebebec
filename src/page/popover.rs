/// Visibility of the launch popover, mirroring the toolkit's `in`/`out` classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopoverVisibility {
    #[default]
    Hidden,
    Shown,
    Dismissed,
}

impl PopoverVisibility {
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            Self::Hidden => None,
            Self::Shown => Some("in"),
            Self::Dismissed => Some("out"),
        }
    }
}

/// Popover attached to the launch button. Content comes from whichever
/// region it was configured with; the popover itself stores no HTML.
#[derive(Debug, Default)]
pub struct Popover {
    content_region: Option<String>,
    visibility: PopoverVisibility,
}

impl Popover {
    pub fn configure(&mut self, content_region: &str) {
        self.content_region = Some(content_region.to_string());
    }

    pub fn content_region(&self) -> Option<&str> {
        self.content_region.as_deref()
    }

    pub fn visibility(&self) -> PopoverVisibility {
        self.visibility
    }

    pub(crate) fn show(&mut self) {
        self.visibility = PopoverVisibility::Shown;
    }

    /// Swap `in` for `out`. Does nothing unless the popover is showing.
    pub fn dismiss(&mut self) -> bool {
        if self.visibility != PopoverVisibility::Shown {
            return false;
        }
        self.visibility = PopoverVisibility::Dismissed;
        true
    }
}

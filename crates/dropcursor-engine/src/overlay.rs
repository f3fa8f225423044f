use crate::geometry::OverlayPlacement;

/// Visual configuration handed to the overlay on every call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CursorStyle {
    /// Background colour; `None` leaves colouring to `class`.
    pub color: Option<String>,
    pub class: Option<String>,
    /// Class applied while hidden. Without it the overlay hides itself
    /// outright.
    pub inactive_class: Option<String>,
}

/// Renders the drop cursor element.
///
/// At most one element exists per view. `show_at` creates it on first use
/// and moves it afterwards; `hide` keeps it around for a quick re-show;
/// `destroy` drops it.
pub trait Overlay {
    fn show_at(&mut self, placement: &OverlayPlacement, style: &CursorStyle);
    fn hide(&mut self, style: &CursorStyle);
    fn destroy(&mut self);
}

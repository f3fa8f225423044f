//! Drop cursor lifecycle state machine.
//!
//! [`Lifecycle::apply`] is a pure transition function: it takes the current
//! state and a [`DragEvent`] and returns the next state together with the
//! [`Effect`]s the view binding has to carry out. It never touches the
//! overlay or the timer itself.
//!
//! ```text
//!            PointerMoved(p)               PointerRejected
//!   Idle ───────────────────▶ Active(p) ───────────────────▶ Suspended(p)
//!    ▲                          │  ▲                              │
//!    │ leave / timer / destroy  │  └──────── PointerMoved(q) ─────┘
//!    └──────────────────────────┘
//! ```
//!
//! Besides the cursor state the machine tracks whether an overlay element
//! exists. A removal timer that fires mid-drag clears the position but only
//! hides the element, so `Idle` can still own a hidden overlay until the
//! drag ends.

use std::time::Duration;

/// Default delay before an idle drag clears the cursor.
pub const IDLE_TIMEOUT: Duration = Duration::from_millis(5000);
/// Default delay between the end of a drag and the cursor going away.
pub const DROP_TIMEOUT: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorState {
    #[default]
    Idle,
    /// Shown at a position.
    Active(usize),
    /// Position retained, overlay hidden: the pointer is over a spot where
    /// nothing may be dropped.
    Suspended(usize),
}

impl CursorState {
    pub fn position(&self) -> Option<usize> {
        match *self {
            CursorState::Idle => None,
            CursorState::Active(pos) | CursorState::Suspended(pos) => Some(pos),
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, CursorState::Active(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    /// The pointer moved over the surface and resolved to a drop target.
    PointerMoved(usize),
    /// The pointer moved over the surface but nothing may be dropped there.
    PointerRejected,
    /// The drag left through the surface's own edge.
    PointerLeftSurfaceEdge,
    /// The drag moved to an element outside the surface.
    PointerLeftEntirely,
    DragEnded,
    Dropped,
    RemovalTimerFired,
    /// The document changed; `max_pos` is its new content size.
    DocumentChanged { max_pos: usize },
    ViewDestroyed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Show (or move) the overlay at a position.
    Render(usize),
    /// Hide the overlay but keep it for re-use.
    Hide,
    /// Drop the overlay.
    Remove,
    /// Replace any pending removal with one after the given delay.
    ScheduleRemoval(Duration),
    CancelRemoval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Removal delay re-armed by every pointer move.
    pub idle: Duration,
    /// Removal delay after a drop or drag end.
    pub drop: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            idle: IDLE_TIMEOUT,
            drop: DROP_TIMEOUT,
        }
    }
}

/// Cursor state, whether a drag is currently over the surface, and whether
/// an overlay element exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lifecycle {
    cursor: CursorState,
    dragging: bool,
    overlay: bool,
}

impl Lifecycle {
    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Whether an overlay element exists, shown or hidden.
    pub fn has_overlay(&self) -> bool {
        self.overlay
    }

    pub fn apply(self, event: DragEvent, timeouts: &Timeouts) -> (Lifecycle, Vec<Effect>) {
        let mut next = self;
        let mut effects = Vec::new();

        match event {
            DragEvent::PointerMoved(target) => {
                next.dragging = true;
                if self.cursor != CursorState::Active(target) {
                    next.cursor = CursorState::Active(target);
                    next.overlay = true;
                    effects.push(Effect::Render(target));
                }
                effects.push(Effect::ScheduleRemoval(timeouts.idle));
            }
            DragEvent::PointerRejected => {
                next.dragging = true;
                if let CursorState::Active(pos) = self.cursor {
                    next.cursor = CursorState::Suspended(pos);
                    effects.push(Effect::Hide);
                }
            }
            DragEvent::PointerLeftSurfaceEdge => {
                next.clear(&mut effects);
            }
            DragEvent::PointerLeftEntirely => {
                next.dragging = false;
                next.clear(&mut effects);
            }
            DragEvent::DragEnded | DragEvent::Dropped => {
                next.dragging = false;
                effects.push(Effect::ScheduleRemoval(timeouts.drop));
            }
            DragEvent::RemovalTimerFired => {
                if self.dragging {
                    if self.cursor.is_visible() {
                        effects.push(Effect::Hide);
                    }
                } else if self.overlay {
                    next.overlay = false;
                    effects.push(Effect::Remove);
                }
                next.cursor = CursorState::Idle;
            }
            DragEvent::DocumentChanged { max_pos } => match self.cursor {
                CursorState::Active(pos) | CursorState::Suspended(pos) if pos > max_pos => {
                    next.clear(&mut effects);
                }
                CursorState::Active(pos) => effects.push(Effect::Render(pos)),
                CursorState::Suspended(_) | CursorState::Idle => {}
            },
            DragEvent::ViewDestroyed => {
                next.dragging = false;
                next.clear(&mut effects);
            }
        }

        if next != self {
            log::trace!("drop cursor {self:?} --{event:?}--> {next:?}");
        }
        (next, effects)
    }

    fn clear(&mut self, effects: &mut Vec<Effect>) {
        effects.push(Effect::CancelRemoval);
        if self.overlay {
            effects.push(Effect::Remove);
        }
        self.cursor = CursorState::Idle;
        self.overlay = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(events: &[DragEvent]) -> (Lifecycle, Vec<Effect>) {
        let timeouts = Timeouts::default();
        let mut state = Lifecycle::default();
        let mut all = Vec::new();
        for &event in events {
            let (next, effects) = state.apply(event, &timeouts);
            state = next;
            all.extend(effects);
        }
        (state, all)
    }

    fn renders(effects: &[Effect]) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e, Effect::Render(_)))
            .count()
    }

    #[test]
    fn repeated_move_to_same_target_renders_once() {
        let (state, effects) = run(&[DragEvent::PointerMoved(5), DragEvent::PointerMoved(5)]);
        assert_eq!(state.cursor(), CursorState::Active(5));
        assert_eq!(renders(&effects), 1);
        insta::assert_debug_snapshot!(effects, @r"
        [
            Render(
                5,
            ),
            ScheduleRemoval(
                5s,
            ),
            ScheduleRemoval(
                5s,
            ),
        ]
        ");
    }

    #[test]
    fn drop_then_timer_removes_once() {
        let (state, effects) = run(&[
            DragEvent::PointerMoved(5),
            DragEvent::Dropped,
            DragEvent::RemovalTimerFired,
        ]);
        assert_eq!(state.cursor(), CursorState::Idle);
        assert!(!state.is_dragging());
        assert_eq!(
            effects,
            vec![
                Effect::Render(5),
                Effect::ScheduleRemoval(IDLE_TIMEOUT),
                Effect::ScheduleRemoval(DROP_TIMEOUT),
                Effect::Remove,
            ]
        );
    }

    #[test]
    fn timer_firing_twice_is_a_no_op() {
        let (state, _) = run(&[
            DragEvent::PointerMoved(5),
            DragEvent::DragEnded,
            DragEvent::RemovalTimerFired,
        ]);
        let (again, effects) = state.apply(DragEvent::RemovalTimerFired, &Timeouts::default());
        assert_eq!(again, state);
        assert!(effects.is_empty());
    }

    #[test]
    fn leaving_through_surface_edge_clears_immediately() {
        let (state, effects) = run(&[
            DragEvent::PointerMoved(3),
            DragEvent::PointerLeftSurfaceEdge,
        ]);
        assert_eq!(state.cursor(), CursorState::Idle);
        assert_eq!(&effects[2..], &[Effect::CancelRemoval, Effect::Remove]);
    }

    #[test]
    fn leaving_entirely_stops_dragging() {
        let (state, effects) = run(&[DragEvent::PointerMoved(3), DragEvent::PointerLeftEntirely]);
        assert_eq!(state, Lifecycle::default());
        assert_eq!(effects.last(), Some(&Effect::Remove));
    }

    #[test]
    fn idle_timeout_mid_drag_hides_and_forgets_position() {
        let (state, effects) = run(&[
            DragEvent::PointerMoved(7),
            DragEvent::RemovalTimerFired,
        ]);
        assert_eq!(state.cursor(), CursorState::Idle);
        assert!(state.has_overlay());
        assert_eq!(effects.last(), Some(&Effect::Hide));

        let (state, effects) = state.apply(DragEvent::PointerMoved(7), &Timeouts::default());
        assert_eq!(state.cursor(), CursorState::Active(7));
        assert_eq!(effects[0], Effect::Render(7));
    }

    #[test]
    fn hidden_overlay_is_removed_once_drag_ends() {
        let (state, effects) = run(&[
            DragEvent::PointerMoved(7),
            DragEvent::RemovalTimerFired,
            DragEvent::RemovalTimerFired,
            DragEvent::DragEnded,
            DragEvent::RemovalTimerFired,
            DragEvent::RemovalTimerFired,
        ]);
        assert_eq!(state, Lifecycle::default());
        assert_eq!(
            effects.iter().filter(|e| **e == Effect::Hide).count(),
            1,
            "second timer while hidden must not hide again"
        );
        assert_eq!(effects.iter().filter(|e| **e == Effect::Remove).count(), 1);
        assert_eq!(effects.last(), Some(&Effect::Remove));
    }

    #[test]
    fn rejected_pointer_suspends_cursor_until_next_move() {
        let (state, effects) = run(&[DragEvent::PointerMoved(2), DragEvent::PointerRejected]);
        assert_eq!(state.cursor(), CursorState::Suspended(2));
        assert_eq!(state.cursor().position(), Some(2));
        assert_eq!(effects.last(), Some(&Effect::Hide));

        let (again, effects) = state.apply(DragEvent::PointerRejected, &Timeouts::default());
        assert_eq!(again, state);
        assert!(effects.is_empty());

        let (state, effects) = state.apply(DragEvent::PointerMoved(2), &Timeouts::default());
        assert_eq!(state.cursor(), CursorState::Active(2));
        assert_eq!(effects[0], Effect::Render(2));
    }

    #[test]
    fn rejected_pointer_without_cursor_only_marks_drag() {
        let (state, effects) = run(&[DragEvent::PointerRejected]);
        assert_eq!(state.cursor(), CursorState::Idle);
        assert!(state.is_dragging());
        assert!(effects.is_empty());
    }

    #[test]
    fn suspended_cursor_leaving_through_surface_edge_is_removed() {
        let (state, effects) = run(&[
            DragEvent::PointerMoved(3),
            DragEvent::PointerRejected,
            DragEvent::PointerLeftSurfaceEdge,
        ]);
        assert_eq!(state.cursor(), CursorState::Idle);
        assert!(!state.has_overlay());
        assert_eq!(&effects[3..], &[Effect::CancelRemoval, Effect::Remove]);
    }

    #[test]
    fn suspended_cursor_past_new_document_end_is_removed() {
        let (state, _) = run(&[DragEvent::PointerMoved(10), DragEvent::PointerRejected]);

        let (kept, effects) = state.apply(DragEvent::DocumentChanged { max_pos: 10 }, &Timeouts::default());
        assert_eq!(kept, state);
        assert!(effects.is_empty());

        let (cleared, effects) = state.apply(DragEvent::DocumentChanged { max_pos: 4 }, &Timeouts::default());
        assert_eq!(cleared.cursor(), CursorState::Idle);
        assert_eq!(effects, vec![Effect::CancelRemoval, Effect::Remove]);
    }

    #[test]
    fn document_change_invalidates_out_of_range_cursor() {
        let (state, _) = run(&[DragEvent::PointerMoved(10)]);

        let (kept, effects) = state.apply(DragEvent::DocumentChanged { max_pos: 10 }, &Timeouts::default());
        assert_eq!(kept.cursor(), CursorState::Active(10));
        assert_eq!(effects, vec![Effect::Render(10)]);

        let (cleared, effects) = state.apply(DragEvent::DocumentChanged { max_pos: 9 }, &Timeouts::default());
        assert_eq!(cleared.cursor(), CursorState::Idle);
        assert_eq!(effects, vec![Effect::CancelRemoval, Effect::Remove]);
    }

    #[test]
    fn destroy_from_idle_only_cancels_timer() {
        let (state, effects) = Lifecycle::default().apply(DragEvent::ViewDestroyed, &Timeouts::default());
        assert_eq!(state, Lifecycle::default());
        assert_eq!(effects, vec![Effect::CancelRemoval]);
    }
}

use std::time::Instant;

use crate::geometry::{self, OverlayPlacement};
use crate::host::{DragLeaveEvent, DragOverEvent, DropEffect, EditorView};
use crate::lifecycle::{CursorState, DragEvent, Effect, Lifecycle};
use crate::options::DropCursorOptions;
use crate::overlay::{CursorStyle, Overlay};
use crate::timer::RemovalTimer;

/// Per-view drop cursor: feeds host drag events through the lifecycle state
/// machine and applies the resulting effects to the overlay and the removal
/// timer.
///
/// ## Usage Pattern
///
/// ```rust,ignore
/// let mut cursor = DropCursorView::new(DropCursorOptions::default(), overlay);
///
/// // From the host's event handlers:
/// let effect = cursor.dragover(&view, &event, Instant::now());
/// cursor.drop(&view, Instant::now());
///
/// // From the host's event loop, so pending removals fire:
/// cursor.tick(&view, Instant::now());
///
/// // After every state update of the host view:
/// cursor.update(&view, doc_changed, Instant::now());
///
/// // On teardown:
/// cursor.destroy();
/// ```
pub struct DropCursorView<O: Overlay> {
    options: DropCursorOptions,
    style: CursorStyle,
    lifecycle: Lifecycle,
    timer: RemovalTimer,
    overlay: O,
}

impl<O: Overlay> DropCursorView<O> {
    pub fn new(options: DropCursorOptions, overlay: O) -> Self {
        let style = options.style();
        Self {
            options,
            style,
            lifecycle: Lifecycle::default(),
            timer: RemovalTimer::default(),
            overlay,
        }
    }

    pub fn cursor_pos(&self) -> Option<usize> {
        self.lifecycle.cursor().position()
    }

    pub fn state(&self) -> CursorState {
        self.lifecycle.cursor()
    }

    pub fn is_dragging(&self) -> bool {
        self.lifecycle.is_dragging()
    }

    pub fn timer(&self) -> &RemovalTimer {
        &self.timer
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn options(&self) -> &DropCursorOptions {
        &self.options
    }

    pub fn dragover(
        &mut self,
        view: &dyn EditorView,
        event: &DragOverEvent,
        now: Instant,
    ) -> DropEffect {
        if !event.has_data_transfer || !view.is_editable() || !view.supports_drop_cursor() {
            return DropEffect::Unchanged;
        }

        let hit = view.pos_at_coords(event.coords);
        let disabled = hit.is_some_and(|hit| {
            hit.inside
                .and_then(|inside| view.document().node_at(inside))
                .is_some_and(|node| node.node_type().drop_cursor().disables(node, &hit))
        });

        match hit {
            Some(hit) if !disabled => {
                let mut target = hit.pos;
                if let Some(slice) = view.dragging_slice()
                    && self.options.should_compute_drop_point(view)
                    && let Some(point) = view.drop_point(target, slice)
                {
                    target = point;
                }
                // A position the host cannot lay out yet leaves the cursor as is.
                if self.placement(view, target).is_none() {
                    log::debug!("cannot place drop cursor at {target}, skipping update");
                    return DropEffect::Move;
                }
                self.dispatch(Some(view), DragEvent::PointerMoved(target), now);
                DropEffect::Move
            }
            _ => {
                log::debug!("no drop target under {:?}", event.coords);
                self.dispatch(Some(view), DragEvent::PointerRejected, now);
                DropEffect::None
            }
        }
    }

    pub fn dragend(&mut self, view: &dyn EditorView, now: Instant) {
        self.dispatch(Some(view), DragEvent::DragEnded, now);
    }

    pub fn drop(&mut self, view: &dyn EditorView, now: Instant) {
        self.dispatch(Some(view), DragEvent::Dropped, now);
    }

    pub fn dragleave(&mut self, view: &dyn EditorView, event: &DragLeaveEvent, now: Instant) {
        if event.target_is_surface {
            self.dispatch(Some(view), DragEvent::PointerLeftSurfaceEdge, now);
        } else if !event.related_inside_surface {
            self.dispatch(Some(view), DragEvent::PointerLeftEntirely, now);
        }
    }

    /// Call after the host view updated; `doc_changed` says whether the
    /// document differs from the previous state.
    pub fn update(&mut self, view: &dyn EditorView, doc_changed: bool, now: Instant) {
        if doc_changed && self.cursor_pos().is_some() {
            let max_pos = view.document().content_size();
            self.dispatch(Some(view), DragEvent::DocumentChanged { max_pos }, now);
        }
    }

    /// Fire the removal timer if it is due. Returns whether it fired.
    pub fn tick(&mut self, view: &dyn EditorView, now: Instant) -> bool {
        if !self.timer.fire_if_due(now) {
            return false;
        }
        self.dispatch(Some(view), DragEvent::RemovalTimerFired, now);
        true
    }

    pub fn destroy(&mut self) {
        self.dispatch(None, DragEvent::ViewDestroyed, Instant::now());
    }

    fn dispatch(&mut self, view: Option<&dyn EditorView>, event: DragEvent, now: Instant) {
        let (next, effects) = self.lifecycle.apply(event, &self.options.timeouts);
        self.lifecycle = next;
        for effect in effects {
            match effect {
                Effect::Render(pos) => {
                    if let Some(view) = view {
                        self.render(view, pos);
                    }
                }
                Effect::Hide => self.overlay.hide(&self.style),
                Effect::Remove => self.overlay.destroy(),
                Effect::ScheduleRemoval(delay) => self.timer.schedule(now, delay),
                Effect::CancelRemoval => self.timer.cancel(),
            }
        }
    }

    fn placement(&self, view: &dyn EditorView, pos: usize) -> Option<OverlayPlacement> {
        let (rect, kind) = geometry::cursor_rect(view, pos, self.options.width)?;
        Some(geometry::place(view, rect, kind))
    }

    fn render(&mut self, view: &dyn EditorView, pos: usize) {
        match self.placement(view, pos) {
            Some(placement) => self.overlay.show_at(&placement, &self.style),
            None => log::debug!("cannot place drop cursor at {pos}"),
        }
    }
}

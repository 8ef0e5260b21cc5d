//! # Drag-and-Drop State Machine
//!
//! ```text
//!            start(source)            drop_on(target)
//!   Idle ───────────────────▶ Dragging ───────────────▶ Idle
//!     ▲                        │    ▲                   (+ DropAction)
//!     │        cancel()        │    │ drag_over(target)
//!     └────────────────────────┘    └──┘
//! ```
//!
//! Only [`DragState::drop_on`] can produce a mutation. `start` and
//! `drag_over` merely record where the gesture is, and `cancel` (a drop
//! outside any valid target) discards it.

/// Where a drag gesture currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        source: usize,
        hover: Option<usize>,
    },
}

/// What a completed drop asks the list to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropAction {
    None,
    Move { from: usize, to: usize },
}

impl DragState {
    pub fn new() -> Self {
        Self::Idle
    }

    /// Begin dragging the item at `source`. A gesture already in progress is abandoned.
    pub fn start(&mut self, source: usize) {
        *self = DragState::Dragging {
            source,
            hover: None,
        };
    }

    /// Record the item currently under the pointer. Never mutates the list.
    pub fn drag_over(&mut self, target: usize) {
        if let DragState::Dragging { hover, .. } = self {
            *hover = Some(target);
        }
    }

    /// Abort the gesture.
    pub fn cancel(&mut self) {
        *self = DragState::Idle;
    }

    /// Finish the gesture over `target`, returning to `Idle`.
    pub fn drop_on(&mut self, target: usize) -> DropAction {
        match std::mem::take(self) {
            DragState::Idle => DropAction::None,
            DragState::Dragging { source, .. } if source == target => DropAction::None,
            DragState::Dragging { source, .. } => DropAction::Move {
                from: source,
                to: target,
            },
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    pub fn source(&self) -> Option<usize> {
        match self {
            DragState::Dragging { source, .. } => Some(*source),
            DragState::Idle => None,
        }
    }

    pub fn hover(&self) -> Option<usize> {
        match self {
            DragState::Dragging { hover, .. } => *hover,
            DragState::Idle => None,
        }
    }
}

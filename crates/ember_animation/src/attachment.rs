//! Visibility gating of attached model instances.

/// Visibility above this threshold shows an attachment.
pub const VISIBILITY_THRESHOLD: f32 = 0.1;

/// Outcome of an [`AttachmentVisibility`] update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentTransition {
    /// The attached instance became visible and restarts `restart_sequence`.
    Shown { restart_sequence: usize },
    /// The attached instance was hidden.
    Hidden,
    Unchanged,
}

/// Tracks whether an attachment's internal instance is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttachmentVisibility {
    visible: bool,
}

impl AttachmentVisibility {
    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Feeds the sampled visibility for this frame.
    pub fn update(&mut self, visibility: f32) -> AttachmentTransition {
        let show = visibility > VISIBILITY_THRESHOLD;
        match (self.visible, show) {
            (false, true) => {
                self.visible = true;
                AttachmentTransition::Shown { restart_sequence: 0 }
            }
            (true, false) => {
                self.visible = false;
                AttachmentTransition::Hidden
            }
            _ => AttachmentTransition::Unchanged,
        }
    }
}

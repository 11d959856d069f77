use std::sync::Arc;

use crate::random::{RandomSource, ThreadRandom};

/// Closed pool of descriptive notes attached to new outfits.
pub const STYLE_NOTES: &[&str] = &[
    "Perfect for a relaxed day out",
    "Great for office meetings",
    "Ideal for casual gatherings",
    "Perfect for date nights",
    "Great for weekend activities",
    "Ideal for professional settings",
    "Perfect for social events",
    "Great for everyday wear",
];

/// Uniform pick from [`STYLE_NOTES`]. Not stable across calls.
#[derive(Clone)]
pub struct StyleNotePicker {
    random: Arc<dyn RandomSource>,
}

impl StyleNotePicker {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    pub fn pick(&self) -> Option<String> {
        self.random.pick(STYLE_NOTES.len()).map(|index| STYLE_NOTES[index].to_string())
    }
}

impl Default for StyleNotePicker {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRandom))
    }
}

impl std::fmt::Debug for StyleNotePicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleNotePicker").finish_non_exhaustive()
    }
}

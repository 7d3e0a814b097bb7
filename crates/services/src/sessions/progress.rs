use study_core::model::percent_of;

/// Aggregated view of session progress, useful for UI.
///
/// `position` is 1-based; an empty session reports `0 of 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub position: usize,
    pub total: usize,
    pub answered: usize,
    pub correct: usize,
}

impl SessionProgress {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            position: 0,
            total: 0,
            answered: 0,
            correct: 0,
        }
    }

    /// Rounded position percentage, 0 for an empty session.
    #[must_use]
    pub fn percent(&self) -> u32 {
        let position = u32::try_from(self.position).unwrap_or(u32::MAX);
        let total = u32::try_from(self.total).unwrap_or(u32::MAX);
        percent_of(position, total)
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.total > 0 && self.position == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_progress_has_no_division_artifact() {
        let progress = SessionProgress::empty();
        assert_eq!(progress.percent(), 0);
        assert!(!progress.is_last());
    }

    #[test]
    fn percent_tracks_position() {
        let progress = SessionProgress {
            position: 1,
            total: 3,
            answered: 0,
            correct: 0,
        };
        assert_eq!(progress.percent(), 33);
    }
}

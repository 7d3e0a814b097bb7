use study_core::model::StudyStats;

/// Receives aggregate stats after every successful submission.
///
/// Values are replacements for whatever the sink held before.
pub trait StatsSink: Send {
    fn publish(&mut self, stats: StudyStats);
}

impl<F> StatsSink for F
where
    F: FnMut(StudyStats) + Send,
{
    fn publish(&mut self, stats: StudyStats) {
        self(stats);
    }
}

/// What a single collection cycle did to the published snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectOutcome {
    /// A fully populated snapshot replaced the previous one.
    Published,
    /// Extraction failed part way and the fields filled so far were published anyway.
    PartiallyPublished,
    /// Elasticsearch is not started yet. Snapshot untouched.
    NotStarted,
    /// The response carried no node entry or no indices section. Snapshot untouched.
    NoNodeStats,
}

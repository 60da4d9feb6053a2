/// The four external capability providers a pipeline run can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Discover,
    Retrieve,
    Filter,
    Summarize,
}

impl StageKind {
    /// Stage name used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            StageKind::Discover => "discover",
            StageKind::Retrieve => "retrieve",
            StageKind::Filter => "filter",
            StageKind::Summarize => "summarize",
        }
    }

    /// Provider script implementing this stage. These names are the external
    /// contract; the scripts live in `StrategyConfig::script_dir`.
    pub fn script(self) -> &'static str {
        match self {
            StageKind::Discover => "researcher.py",
            StageKind::Retrieve => "scraper.py",
            StageKind::Filter => "librarian.py",
            StageKind::Summarize => "summarizer.py",
        }
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

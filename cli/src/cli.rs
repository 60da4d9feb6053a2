use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use newscout_core::task::{SummaryLength, SummaryMode, TaskRequest};

#[derive(Parser, Debug)]
#[command(
    name = "newscout",
    version,
    about = "Drive the newscout research pipeline from the command line"
)]
pub struct Args {
    /// Config file path (defaults to ./newscout.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Single source URL to fetch
    #[arg(long, conflicts_with_all = ["urls", "topic"])]
    pub url: Option<String>,

    /// Comma-separated list of source URLs
    #[arg(long, value_delimiter = ',', conflicts_with = "topic")]
    pub urls: Option<Vec<String>>,

    /// Research topic for source discovery
    #[arg(long)]
    pub topic: Option<String>,

    /// Relevance/summarization criterion
    #[arg(long)]
    pub query: String,

    /// Number of sources to discover for a topic task
    #[arg(long)]
    pub depth: Option<u32>,

    /// Request a synthesized summary in this mode
    #[arg(long, value_enum)]
    pub summary_mode: Option<SummaryModeArg>,

    /// Requested summary length
    #[arg(long, value_enum)]
    pub summary_length: Option<SummaryLengthArg>,

    /// Override the configured interpreter path
    #[arg(long)]
    pub interpreter: Option<String>,

    /// Override the configured provider script directory
    #[arg(long)]
    pub script_dir: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SummaryModeArg {
    Single,
    Multi,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SummaryLengthArg {
    Short,
    Medium,
    Long,
}

impl Args {
    /// Build the raw task request. Shape validation is the pipeline's job;
    /// the CLI only maps flags to fields.
    pub fn to_request(&self) -> TaskRequest {
        TaskRequest {
            url: self.url.clone(),
            urls: self.urls.clone(),
            topic: self.topic.clone(),
            query: Some(self.query.clone()),
            depth: self.depth,
            summary_mode: self.summary_mode.map(|m| match m {
                SummaryModeArg::Single => SummaryMode::Single,
                SummaryModeArg::Multi => SummaryMode::Multi,
            }),
            summary_length: self.summary_length.map(|l| match l {
                SummaryLengthArg::Short => SummaryLength::Short,
                SummaryLengthArg::Medium => SummaryLength::Medium,
                SummaryLengthArg::Long => SummaryLength::Long,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_separated_urls_are_split() {
        let args = Args::parse_from([
            "newscout",
            "--urls",
            "https://a,https://b",
            "--query",
            "q",
        ]);
        let request = args.to_request();
        assert_eq!(
            request.urls,
            Some(vec!["https://a".to_string(), "https://b".to_string()])
        );
    }

    #[test]
    fn summary_flags_map_to_task_fields() {
        let args = Args::parse_from([
            "newscout",
            "--url",
            "https://a",
            "--query",
            "q",
            "--summary-mode",
            "multi",
            "--summary-length",
            "short",
        ]);
        let request = args.to_request();
        assert_eq!(request.summary_mode, Some(SummaryMode::Multi));
        assert_eq!(request.summary_length, Some(SummaryLength::Short));
    }
}

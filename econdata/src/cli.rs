// econdata/src/cli.rs
//
// Single source of truth for the CLI definition (Clap structs).

use clap::Parser;
use econdata_core::application::RunMode;

#[derive(Parser, Debug)]
#[command(name = "econdata")]
#[command(about = "Fetches, validates and publishes public economic datasets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// 📥 Only fetch the raw sources (skip transform and publish)
    #[arg(long)]
    pub ingest_only: bool,

    /// 🔄 Only transform and publish the stored raw bundle (skip fetching)
    #[arg(long)]
    pub transform_only: bool,
}

impl Cli {
    pub fn mode(&self) -> RunMode {
        RunMode::from_flags(self.ingest_only, self.transform_only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_defaults_run_both_phases() {
        let args = Cli::parse_from(["econdata"]);
        assert_eq!(
            args.mode(),
            RunMode {
                ingest: true,
                transform: true
            }
        );
    }

    #[test]
    fn test_cli_parse_ingest_only() {
        let args = Cli::parse_from(["econdata", "--ingest-only"]);
        assert!(args.ingest_only);
        assert!(!args.mode().transform);
    }

    #[test]
    fn test_cli_parse_transform_only() {
        let args = Cli::parse_from(["econdata", "--transform-only"]);
        assert!(!args.mode().ingest);
        assert!(args.mode().transform);
    }

    #[test]
    fn test_cli_rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["econdata", "--select", "pmms"]).is_err());
    }
}

use clap::Parser;

/// geobench - PostGIS vs MongoDB geospatial query benchmark
///
/// Every benchmark parameter is fixed; the binary takes no options beyond
/// `--help` and `--version`. Set `RUST_LOG` for diagnostic logging.
#[derive(Parser, Debug)]
#[command(name = "geobench")]
#[command(about = "Benchmark PostGIS and MongoDB on identical radius and polygon queries", long_about = None)]
#[command(version)]
pub struct Cli {}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_accepts_no_arguments() {
        assert!(Cli::try_parse_from(["geobench"]).is_ok());
    }

    #[test]
    fn test_rejects_unknown_arguments() {
        assert!(Cli::try_parse_from(["geobench", "--points", "10"]).is_err());
        assert!(Cli::try_parse_from(["geobench", "extra"]).is_err());
    }
}

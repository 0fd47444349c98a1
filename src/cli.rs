use clap::Parser;

/// Command line surface.
///
/// The wrapper takes no positional arguments; it is meant to be dropped in
/// wherever the stock Slack launcher would be invoked.
#[derive(Parser, Debug)]
#[command(
    name = "slackfix",
    about = "Launch Slack and re-launch it once with a case-corrected workspace URI",
    version
)]
pub struct Cli {
    /// Verbosity (-v, -vv): each occurrence lowers the log threshold by one level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn no_flags_means_quiet() {
        let cli = Cli::try_parse_from(["slackfix"]).unwrap();
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn verbose_occurrences_are_counted() {
        let cli = Cli::try_parse_from(["slackfix", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);

        let cli = Cli::try_parse_from(["slackfix", "-v", "--verbose", "-v"]).unwrap();
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn positional_arguments_are_rejected() {
        let err = Cli::try_parse_from(["slackfix", "stray"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn unknown_flags_are_rejected() {
        let err = Cli::try_parse_from(["slackfix", "--bogus"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn help_and_version_are_informational() {
        let err = Cli::try_parse_from(["slackfix", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(!err.use_stderr());

        let err = Cli::try_parse_from(["slackfix", "-V"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
        assert!(!err.use_stderr());
    }
}

use std::path::PathBuf;

use clap::Parser;

use crate::APP_VERSION;

/// Command-line surface of the desktop shell. Unknown options make clap
/// print a usage message and exit with a non-zero code; `--help` and
/// `--version` exit with zero.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sipline",
    version = APP_VERSION,
    disable_version_flag = true,
    about = "A free SIP video-phone."
)]
pub(crate) struct CliArgs {
    /// Path of the telephony core configuration file.
    #[arg(long, value_name = "file")]
    pub(crate) config: Option<PathBuf>,

    /// Start with the main window hidden.
    #[cfg(not(target_os = "macos"))]
    #[arg(long)]
    pub(crate) iconified: bool,

    /// Run to the core-ready event, print the result token and exit.
    #[arg(long)]
    pub(crate) selftest: bool,

    /// Enable verbose log output.
    #[arg(short = 'V', long)]
    pub(crate) verbose: bool,

    /// Print version information. The automatic flag is disabled above
    /// because its `-V` short would collide with `--verbose`.
    #[arg(long, action = clap::ArgAction::Version)]
    pub(crate) version: Option<bool>,
}

pub(crate) fn parse_args() -> CliArgs {
    CliArgs::parse()
}

impl CliArgs {
    pub(crate) fn start_iconified(&self) -> bool {
        #[cfg(not(target_os = "macos"))]
        {
            self.iconified
        }
        #[cfg(target_os = "macos")]
        {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CliArgs;
    use clap::Parser;

    #[test]
    fn parse_accepts_the_documented_options() {
        let args =
            CliArgs::try_parse_from(["sipline", "--config", "/tmp/rc.json", "--selftest", "-V"])
                .expect("documented options should parse");
        assert_eq!(
            args.config.as_deref(),
            Some(std::path::Path::new("/tmp/rc.json"))
        );
        assert!(args.selftest);
        assert!(args.verbose);
    }

    #[test]
    fn parse_defaults_to_interactive_mode() {
        let args = CliArgs::try_parse_from(["sipline"]).expect("bare invocation should parse");
        assert!(args.config.is_none());
        assert!(!args.selftest);
        assert!(!args.verbose);
        assert!(!args.start_iconified());
    }

    #[test]
    fn parse_rejects_unknown_options() {
        assert!(CliArgs::try_parse_from(["sipline", "--frobnicate"]).is_err());
    }

    #[test]
    fn long_verbose_spelling_is_accepted() {
        let args = CliArgs::try_parse_from(["sipline", "--verbose"]).expect("should parse");
        assert!(args.verbose);
    }

    #[test]
    fn short_v_is_verbose_and_version_keeps_its_long_flag() {
        let args = CliArgs::try_parse_from(["sipline", "-V"]).expect("short verbose should parse");
        assert!(args.verbose);
        assert!(args.version.is_none());

        let error = CliArgs::try_parse_from(["sipline", "--version"])
            .expect_err("--version short-circuits parsing");
        assert_eq!(error.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}

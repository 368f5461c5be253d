use core::cmp::Ordering;

use clap::{Parser, Subcommand};
use relver::{VersionError, VersionInfo};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Version(#[from] VersionError),

    #[error("Invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter directives, e.g. `debug` or `relver=trace`. Logs are written to stderr.
    #[arg(long, global = true, env = "RELVER_LOG", default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
#[command(arg_required_else_help(true))]
enum Commands {
    /// Prints the parts a version is split into
    Parse {
        /// The version string to parse
        version: String,
    },

    /// Prints the release version: the version without its `-SNAPSHOT` marker
    Release {
        /// The current version string
        version: String,
    },

    /// Prints the version with its last digit segment incremented
    Next {
        /// The current version string
        version: String,
    },

    /// Prints the snapshot version: the release version with `-SNAPSHOT` appended
    Snapshot {
        /// The current version string
        version: String,
    },

    /// Prints the next development version: the next version as a snapshot
    Develop {
        /// The current version string
        version: String,
    },

    /// Compares two versions, printing `<`, `=` or `>`
    Compare {
        /// The left-hand version string
        a: String,

        /// The right-hand version string
        b: String,
    },

    /// Checks whether a version is a snapshot. Exits with 0 if so, 1 otherwise.
    IsSnapshot {
        /// The version string to check
        version: String,
    },
}

type Output = (String, i32);

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli.log) {
        eprintln!("{e}");
        std::process::exit(2);
    }

    debug!(?cli, "parsed arguments");

    match do_work(cli) {
        Ok((output, exit_code)) => {
            println!("{output}");
            std::process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn init_logging(filter: &str) -> Result<(), CliError> {
    let filter = EnvFilter::try_new(filter)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Parses a version argument. Surrounding whitespace is not part of a version given on the
/// command line.
fn parse_arg(version: &str) -> Result<VersionInfo, CliError> {
    Ok(VersionInfo::parse(version.trim())?)
}

fn describe(version: &VersionInfo) -> String {
    let part = |value: Option<&str>| value.unwrap_or_default().to_owned();
    [
        format!("version: {version}"),
        format!("release name: {}", part(version.release_name())),
        format!("alpha annotation: {}", part(version.alpha_annotation())),
        format!(
            "digits: {}",
            version.digits().map(|d| d.join(", ")).unwrap_or_default()
        ),
        format!("build specifier: {}", part(version.build_specifier())),
        format!("snapshot: {}", version.is_snapshot()),
        format!("comparable form: {}", version.comparable_form()),
    ]
    .join("\n")
}

fn do_work(cli: Cli) -> Result<Output, CliError> {
    match cli.command {
        Some(Commands::Parse { version }) => Ok((describe(&parse_arg(&version)?), 0)),
        Some(Commands::Release { version }) => Ok((
            parse_arg(&version)?.release_version_string().to_owned(),
            0,
        )),
        Some(Commands::Next { version }) => {
            Ok((parse_arg(&version)?.next_version()?.to_string(), 0))
        }
        Some(Commands::Snapshot { version }) => {
            Ok((parse_arg(&version)?.snapshot_version_string(), 0))
        }
        Some(Commands::Develop { version }) => Ok((
            parse_arg(&version)?
                .next_version()?
                .snapshot_version_string(),
            0,
        )),
        Some(Commands::Compare { a, b }) => {
            let symbol = match parse_arg(&a)?.compare(&parse_arg(&b)?) {
                Ordering::Less => "<",
                Ordering::Equal => "=",
                Ordering::Greater => ">",
            };
            Ok((symbol.to_string(), 0))
        }
        Some(Commands::IsSnapshot { version }) => Ok(if parse_arg(&version)?.is_snapshot() {
            ("true".to_string(), 0)
        } else {
            ("false".to_string(), 1)
        }),
        None => unreachable!("clap should catch this no-subcommand case"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn run(args: &[&str]) -> Result<Output, CliError> {
        let cli = Cli::try_parse_from(std::iter::once("relver").chain(args.iter().copied()))
            .expect("arguments should parse");
        do_work(cli)
    }

    #[rstest]
    #[case(&["release", "1.0.1-SNAPSHOT"], "1.0.1", 0)]
    #[case(&["release", " releaseCandidateOrName-1.0.1-SNAPSHOT "], "releaseCandidateOrName-1.0.1", 0)]
    #[case(&["next", "rc-1.009"], "rc-1.010", 0)]
    #[case(&["snapshot", "2.4"], "2.4-SNAPSHOT", 0)]
    #[case(&["develop", "1.0.1"], "1.0.2-SNAPSHOT", 0)]
    #[case(&["develop", "releaseNAME-releaseCandidate-1.0.1-SNAPSHOT"], "releaseNAME-releaseCandidate-1.0.2-SNAPSHOT", 0)]
    #[case(&["compare", "1.01.01", "1.01"], ">", 0)]
    #[case(&["compare", "1.0-RC1", "1.0-rc1"], "=", 0)]
    #[case(&["compare", "1.0-SNAPSHOT", "1.0"], "<", 0)]
    #[case(&["compare", "1.0-ga", "1.0"], "=", 0)]
    #[case(&["is-snapshot", "1.0-SNAPSHOT"], "true", 0)]
    #[case(&["is-snapshot", "1.0-snapshot"], "false", 1)]
    fn test_commands(#[case] args: &[&str], #[case] output: &str, #[case] exit_code: i32) {
        let (actual, actual_code) = run(args).unwrap();
        assert_eq!(actual, output);
        assert_eq!(actual_code, exit_code);
    }

    #[test]
    fn test_parse_command() {
        let (output, code) = run(&["parse", "apollo_RC-1.0.07-SNAPSHOT"]).unwrap();
        assert_eq!(code, 0);
        assert!(output.contains("release name: apollo"));
        assert!(output.contains("alpha annotation: RC"));
        assert!(output.contains("digits: 1, 0, 07"));
        assert!(output.contains("build specifier: SNAPSHOT"));
        assert!(output.contains("snapshot: true"));
    }

    #[rstest]
    #[case(&["release", "   "])]
    #[case(&["develop", ""])]
    fn test_blank_version(#[case] args: &[&str]) {
        assert!(matches!(
            run(args),
            Err(CliError::Version(VersionError::Blank))
        ));
    }

    #[test]
    fn test_develop_without_digits() {
        assert!(matches!(
            run(&["develop", "SNAPSHOT"]),
            Err(CliError::Version(VersionError::NoDigitsToIncrement { .. }))
        ));
    }

    #[test]
    fn test_log_flag() {
        let cli = Cli::try_parse_from(["relver", "--log", "relver=debug", "next", "1.0"]).unwrap();
        assert_eq!(cli.log, "relver=debug");
        assert!(EnvFilter::try_new(&cli.log).is_ok());
    }

    #[test]
    fn test_missing_subcommand_args() {
        assert!(Cli::try_parse_from(["relver", "compare", "1.0"]).is_err());
    }
}

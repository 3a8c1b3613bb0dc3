mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "wirecall", version, about = "Wire codec and unary call CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "info",
        env = "WIRECALL_LOG_LEVEL",
        global = true
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    match cmd::run(cli.command, format) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_encode_subcommand() {
        let cli = Cli::try_parse_from(["wirecall", "encode", "--name", "bob"])
            .expect("encode args should parse");
        match cli.command {
            Command::Encode(args) => assert_eq!(args.name, "bob"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_decode_subcommand() {
        let cli = Cli::try_parse_from(["wirecall", "--format", "json", "decode", "0a03626f62"])
            .expect("decode args should parse");
        assert!(matches!(cli.format, Some(OutputFormat::Json)));
        assert!(matches!(cli.command, Command::Decode(_)));
    }

    #[test]
    fn parses_call_flags() {
        let cli = Cli::try_parse_from(["wirecall", "call", "--name", "ada", "--unimplemented"])
            .expect("call args should parse");
        match cli.command {
            Command::Call(args) => {
                assert_eq!(args.name, "ada");
                assert!(args.unimplemented);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "wirecall",
            "version",
            "--log-level",
            "error",
            "--log-format",
            "json",
        ])
        .expect("global flags should parse after subcommand");
        assert_eq!(cli.log_level, LogLevel::Error);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn decode_requires_hex_argument() {
        let err = Cli::try_parse_from(["wirecall", "decode"]).expect_err("hex is required");
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn rejects_unknown_format() {
        let err = Cli::try_parse_from(["wirecall", "--format", "xml", "version"])
            .expect_err("xml is not a format");
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }
}

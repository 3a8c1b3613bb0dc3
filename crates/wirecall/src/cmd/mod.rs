use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod call;
pub mod decode;
pub mod encode;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a HelloReq and print its wire bytes.
    Encode(EncodeArgs),
    /// List the wire units of hex-encoded bytes and decode them as HelloReq.
    Decode(DecodeArgs),
    /// Call SayHello on an in-process server over a loopback channel.
    Call(CallArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Call(args) => call::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Value of the `name` field.
    #[arg(long, default_value = "")]
    pub name: String,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Hex-encoded message bytes (whitespace and `:` are ignored).
    pub hex: String,
}

#[derive(Args, Debug)]
pub struct CallArgs {
    /// Value of `HelloReq.name`.
    #[arg(long, default_value = "")]
    pub name: String,
    /// Serve with the default server that implements nothing.
    #[arg(long)]
    pub unimplemented: bool,
    /// Largest request payload the server accepts, in bytes.
    #[arg(long, value_name = "BYTES", env = "WIRECALL_MAX_REQUEST_SIZE")]
    pub max_request_size: Option<usize>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

use serde::Serialize;
use wirecall_message::{HelloReq, Message};

use crate::cmd::EncodeArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_json, print_raw, print_table, to_hex, OutputFormat};

#[derive(Serialize)]
struct EncodeOutput<'a> {
    message_type: &'static str,
    name: &'a str,
    size: usize,
    hex: String,
}

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let request = HelloReq::new(args.name);
    let wire = request.encode();
    tracing::debug!(size = wire.len(), "encoded request");

    let out = EncodeOutput {
        message_type: HelloReq::TYPE_NAME,
        name: &request.name,
        size: wire.len(),
        hex: to_hex(&wire),
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => print_table(
            &["TYPE", "NAME", "SIZE", "HEX"],
            vec![vec![
                out.message_type.to_string(),
                format!("{:?}", out.name),
                out.size.to_string(),
                out.hex.clone(),
            ]],
        ),
        OutputFormat::Pretty => {
            println!("{} ({} bytes)", out.message_type, out.size);
            println!("  name: {:?}", out.name);
            println!("  hex:  {}", out.hex);
        }
        OutputFormat::Raw => print_raw(&wire),
    }

    Ok(SUCCESS)
}

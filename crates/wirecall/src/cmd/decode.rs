use serde::Serialize;
use wirecall_message::{DecodeError, HelloReq, Message, WireUnits};

use crate::cmd::DecodeArgs;
use crate::exit::{decode_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{parse_hex, print_json, print_table, to_hex, OutputFormat, UnitOutput};

#[derive(Serialize)]
struct HelloReqView {
    name: String,
    unknown_fields: String,
}

#[derive(Serialize)]
struct DecodeOutput {
    size: usize,
    units: Vec<UnitOutput>,
    hello_req: Option<HelloReqView>,
    hello_req_error: Option<String>,
}

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let wire = parse_hex(&args.hex)
        .map_err(|err| CliError::new(USAGE, format!("invalid hex input: {err}")))?;

    let units = WireUnits::new(&wire)
        .map(|unit| unit.map(|unit| UnitOutput::from_unit(&unit)))
        .collect::<Result<Vec<_>, DecodeError>>()
        .map_err(|err| decode_error("malformed wire data", err))?;

    let (hello_req, hello_req_error) = match HelloReq::decode(&wire) {
        Ok(req) => (
            Some(HelloReqView {
                unknown_fields: to_hex(req.unknown_fields().as_bytes()),
                name: req.name,
            }),
            None,
        ),
        Err(err) => {
            tracing::debug!(error = %err, "bytes are not a HelloReq");
            (None, Some(err.to_string()))
        }
    };

    let out = DecodeOutput {
        size: wire.len(),
        units,
        hello_req,
        hello_req_error,
    };
    print_decode(&out, format);

    Ok(SUCCESS)
}

fn print_decode(out: &DecodeOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            print_table(
                &["FIELD", "KIND", "SIZE", "VALUE"],
                out.units
                    .iter()
                    .map(|unit| {
                        vec![
                            unit.field.to_string(),
                            unit.kind.to_string(),
                            unit.size.to_string(),
                            unit.value.clone(),
                        ]
                    })
                    .collect(),
            );
            print_hello_summary(out);
        }
        OutputFormat::Pretty => {
            println!("{} bytes, {} wire units", out.size, out.units.len());
            for unit in &out.units {
                println!(
                    "  #{:<4} {:<16} {:>4}B  {}",
                    unit.field, unit.kind, unit.size, unit.value
                );
            }
            print_hello_summary(out);
        }
        OutputFormat::Raw => {
            if let Some(req) = &out.hello_req {
                println!("{}", req.name);
            }
        }
    }
}

fn print_hello_summary(out: &DecodeOutput) {
    match (&out.hello_req, &out.hello_req_error) {
        (Some(req), _) if req.unknown_fields.is_empty() => {
            println!("{}: name={:?}", HelloReq::TYPE_NAME, req.name)
        }
        (Some(req), _) => println!(
            "{}: name={:?} unknown={}",
            HelloReq::TYPE_NAME,
            req.name,
            req.unknown_fields
        ),
        (None, Some(err)) => println!("{}: {err}", HelloReq::TYPE_NAME),
        (None, None) => {}
    }
}

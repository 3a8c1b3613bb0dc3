use std::fmt::Write as _;
use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use wirecall_message::{RawValue, WireUnit};

#[derive(Clone, Debug, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn print_table(header: &[&str], rows: Vec<Vec<String>>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    for row in rows {
        table.add_row(row);
    }
    println!("{table}");
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut hex, b| {
        let _ = write!(hex, "{b:02x}");
        hex
    })
}

/// Parse hex text. Whitespace, `:` separators and a leading `0x` are ignored.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, String> {
    let trimmed = input.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: String = body
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && *c != ':')
        .collect();

    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(format!("invalid hex digit {bad:?}"));
    }
    if digits.len() % 2 != 0 {
        return Err(format!("odd number of hex digits ({})", digits.len()));
    }

    (0..digits.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|err| err.to_string()))
        .collect()
}

/// One wire unit flattened for display.
#[derive(Debug, Serialize)]
pub struct UnitOutput {
    pub field: u32,
    pub kind: &'static str,
    pub value: String,
    pub size: usize,
}

impl UnitOutput {
    pub fn from_unit(unit: &WireUnit<'_>) -> Self {
        Self {
            field: unit.tag.number,
            kind: unit.tag.kind.name(),
            value: value_preview(&unit.value),
            size: unit.raw.len(),
        }
    }
}

fn value_preview(value: &RawValue<'_>) -> String {
    match value {
        RawValue::Varint(v) => v.to_string(),
        RawValue::Fixed64(v) => format!("{v:#018x}"),
        RawValue::Fixed32(v) => format!("{v:#010x}"),
        RawValue::Bytes(bytes) => payload_preview(bytes),
        RawValue::Group(bytes) => format!("<group {} bytes>", bytes.len()),
    }
}

fn payload_preview(payload: &[u8]) -> String {
    match std::str::from_utf8(payload) {
        Ok(text) if !text.chars().any(char::is_control) => format!("{text:?}"),
        _ => format!("<binary {} bytes: {}>", payload.len(), to_hex(payload)),
    }
}

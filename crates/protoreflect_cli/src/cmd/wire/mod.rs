use protoreflect::reflect::{RawFields, ReflectError, Record};
use tracing::{debug, trace};

use crate::cmd::util::{emit_json, parse_hex};

#[derive(clap::Args)]
pub struct Args {
	/// Hex-encoded records; whitespace is ignored.
	pub hex: String,
	#[arg(long)]
	pub json: bool,
}

/// List the records of a raw wire run and report whether it is well formed.
pub fn run(args: Args) -> protoreflect::reflect::Result<()> {
	let Args { hex, json } = args;
	let raw = RawFields::from_bytes(parse_hex(&hex)?);
	debug!(bytes = raw.len(), "scanning wire run");
	let listing = scan(&raw);

	if json {
		emit_json(&listing);
		return Ok(());
	}

	println!("bytes: {}", listing.bytes);
	println!("valid: {}", listing.valid);
	println!("records: {}", listing.records.len());
	println!("idx\toffset\tlen\tnumber\twire_type");
	for item in &listing.records {
		println!("{}\t{}\t{}\t{}\t{}", item.index, item.offset, item.len, item.number, item.wire_type);
	}
	if let Some(offset) = listing.error_offset {
		println!("error_offset: {offset}");
	}
	Ok(())
}

fn scan(raw: &RawFields) -> WireJson {
	let mut records = Vec::new();
	let mut error_offset = None;
	let mut next_offset = 0;

	for (index, record) in raw.records().enumerate() {
		match record {
			Ok(record) => {
				trace!(index, number = record.number, wire_type = record.wire_type.label(), "record");
				next_offset = record.offset + record.len;
				records.push(RecordJson::new(index, &record));
			}
			Err(err) => {
				let offset = match &err {
					ReflectError::MalformedWire { offset, .. } => *offset,
					_ => next_offset,
				};
				debug!(offset, %err, "wire run stops");
				error_offset = Some(offset);
			}
		}
	}

	WireJson {
		bytes: raw.len(),
		valid: error_offset.is_none(),
		records,
		error_offset,
	}
}

#[derive(Debug, serde::Serialize)]
struct WireJson {
	bytes: usize,
	valid: bool,
	records: Vec<RecordJson>,
	error_offset: Option<usize>,
}

#[derive(Debug, serde::Serialize)]
struct RecordJson {
	index: usize,
	offset: usize,
	len: usize,
	number: u32,
	wire_type: &'static str,
}

impl RecordJson {
	fn new(index: usize, record: &Record) -> Self {
		Self {
			index,
			offset: record.offset,
			len: record.len,
			number: record.number,
			wire_type: record.wire_type.label(),
		}
	}
}

#[cfg(test)]
mod tests;

use protoreflect::reflect::{ReflectError, Result};
use serde::Serialize;

/// Parse hex text into bytes.
///
/// Whitespace is ignored and a leading `0x` is accepted.
pub(crate) fn parse_hex(value: &str) -> Result<Vec<u8>> {
	let invalid = || ReflectError::InvalidHex { value: value.to_owned() };

	let trimmed = value.trim();
	let body = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")).unwrap_or(trimmed);
	let digits: Vec<u8> = body.bytes().filter(|byte| !byte.is_ascii_whitespace()).collect();
	if digits.len() % 2 != 0 {
		return Err(invalid());
	}

	digits
		.chunks(2)
		.map(|pair| match (hex_digit(pair[0]), hex_digit(pair[1])) {
			(Some(high), Some(low)) => Ok((high << 4) | low),
			_ => Err(invalid()),
		})
		.collect()
}

fn hex_digit(byte: u8) -> Option<u8> {
	match byte {
		b'0'..=b'9' => Some(byte - b'0'),
		b'a'..=b'f' => Some(byte - b'a' + 10),
		b'A'..=b'F' => Some(byte - b'A' + 10),
		_ => None,
	}
}

/// Print `payload` as pretty JSON on stdout.
pub(crate) fn emit_json<T: Serialize>(payload: &T) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: json encoding failed: {err}"),
	}
}

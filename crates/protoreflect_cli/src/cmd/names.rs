use protoreflect::names::{to_camel_case, to_pascal_case, to_snake_case};
use tracing::debug;

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	#[arg(required = true)]
	pub idents: Vec<String>,
	#[arg(long)]
	pub json: bool,
}

/// Print the casings of each identifier.
pub fn run(args: Args) -> protoreflect::reflect::Result<()> {
	let Args { idents, json } = args;
	debug!(count = idents.len(), "converting identifiers");
	let rows = convert(&idents);

	if json {
		emit_json(&NamesJson { names: rows });
		return Ok(());
	}

	println!("input\tcamel\tpascal\tsnake");
	for row in &rows {
		println!("{}\t{}\t{}\t{}", row.input, row.camel, row.pascal, row.snake);
	}
	Ok(())
}

fn convert(idents: &[String]) -> Vec<NameRow> {
	idents
		.iter()
		.map(|ident| NameRow {
			input: ident.clone(),
			camel: to_camel_case(ident),
			pascal: to_pascal_case(ident),
			snake: to_snake_case(ident),
		})
		.collect()
}

#[derive(serde::Serialize)]
struct NamesJson {
	names: Vec<NameRow>,
}

#[derive(Debug, PartialEq, Eq, serde::Serialize)]
struct NameRow {
	input: String,
	camel: String,
	pascal: String,
	snake: String,
}

#[cfg(test)]
mod tests {
	use super::convert;

	#[test]
	fn rows_keep_input_order() {
		let rows = convert(&["my_variable_name".to_owned(), "HTTPServer".to_owned()]);
		assert_eq!(rows.len(), 2);
		assert_eq!(rows[0].camel, "myVariableName");
		assert_eq!(rows[0].pascal, "MyVariableName");
		assert_eq!(rows[1].input, "HTTPServer");
		assert_eq!(rows[1].snake, "h_t_t_p_server");
	}
}

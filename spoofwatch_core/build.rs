/*!
# Spoofwatch: Build

Bake the legitimate-site corpus into the library so runtime lookups don't
need to parse anything.
*/

use std::{
	collections::BTreeMap,
	fs::File,
	io::Write,
	path::PathBuf,
};



/// # Build Corpus.
fn main() {
	println!("cargo:rerun-if-changed=skel/legitimate-sites.json");

	let raw = std::fs::read_to_string("skel/legitimate-sites.json")
		.expect("Unable to read legitimate-sites.json.");
	let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(&raw)
		.expect("Unable to parse legitimate-sites.json.");

	let mut out = String::from("/// # Built-In Corpus.\nconst CORPUS: &[(char, &[&str])] = &[\n");
	for (key, sites) in raw {
		let mut chars = key.chars();
		let key = match (chars.next(), chars.next()) {
			(Some(c), None) => c,
			_ => panic!("Corpus keys must be single characters: {key:?}"),
		};

		out.push_str(&format!("\t({key:?}, &["));
		for site in sites {
			let site = site.trim().to_lowercase();
			assert!(! site.is_empty(), "Corpus entries cannot be empty.");
			out.push_str(&format!("{site:?}, "));
		}
		out.push_str("]),\n");
	}
	out.push_str("];\n");

	File::create(out_path("spoofwatch-corpus.rs"))
		.and_then(|mut f| f.write_all(out.as_bytes()).and_then(|()| f.flush()))
		.expect("Unable to save corpus.");
}

/// # Output Path.
///
/// Append the sub-path to OUT_DIR and return it.
fn out_path(stub: &str) -> PathBuf {
	std::fs::canonicalize(std::env::var("OUT_DIR").expect("Missing OUT_DIR."))
		.expect("Missing OUT_DIR.")
		.join(stub)
}

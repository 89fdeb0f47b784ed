/*!
# `Spoofwatch`

Spoofwatch checks URLs for the tricks phishers use to pass one domain off as
another: foreign letters that look Latin, Punycode hosts hiding them, near
misses of popular sites, brand names wedged into unrelated domains, URL
shorteners, and (when online) listings in the PhishTank and URLhaus
databases.

Each URL gets one of three verdicts:

| Level | Meaning |
| ----- | ------- |
| 1 | Nothing found. |
| 2 | Suspicious: lexical or heuristic red flags. |
| 3 | Dangerous: listed by a reputation service. |

The program exits with the worst level minus one, so a clean batch exits
`0`.



## Usage

```bash
spoofwatch [FLAGS] [OPTIONS] [URL]...
```

URLs can be passed directly, or one per line in a file with `-l`/`--list`.

Settings are read from `/etc/spoofwatch.yaml` if present, or whatever
`-c`/`--config` points to.
*/

#![deny(unsafe_code)]

#![warn(
	clippy::filetype_is_file,
	clippy::integer_division,
	clippy::needless_borrow,
	clippy::nursery,
	clippy::pedantic,
	clippy::perf,
	clippy::suboptimal_flops,
	clippy::unneeded_field_pattern,
	macro_use_extern_crate,
	missing_copy_implementations,
	missing_debug_implementations,
	missing_docs,
	non_ascii_idents,
	trivial_casts,
	trivial_numeric_casts,
	unreachable_pub,
	unused_crate_dependencies,
	unused_extern_crates,
	unused_import_braces,
)]

#![allow(clippy::module_name_repetitions)]



mod err;
mod lookup;
mod report;
mod settings;

pub(crate) use err::SpoofwatchError;
use ahash::RandomState;
use clap::Parser;
use fyi_msg::Msg;
use report::Report;
use settings::Settings;
use spoofwatch_core::{
	Assessment,
	ReputationCheck,
};
use std::{
	collections::HashSet,
	path::PathBuf,
};



/// # (Not) Random State.
///
/// Fixed seeds are plenty for deduplication and caching.
pub(crate) const AHASH_STATE: RandomState = RandomState::with_seeds(13, 19, 23, 71);



#[expect(clippy::struct_excessive_bools, reason = "These are CLI switches.")]
#[derive(Debug, Parser)]
#[command(name = "spoofwatch", version, about = "Flag look-alike, homograph, and known-bad URLs.")]
/// # CLI Arguments.
struct Cli {
	/// URL(s) to check.
	urls: Vec<String>,

	#[arg(short, long, value_name = "FILE")]
	/// Use this configuration instead of /etc/spoofwatch.yaml.
	config: Option<PathBuf>,

	#[arg(short, long, value_name = "FILE")]
	/// Read URLs from this file, one per line.
	list: Option<PathBuf>,

	#[arg(long)]
	/// Skip PhishTank and URLhaus lookups.
	offline: bool,

	#[arg(long)]
	/// Print a JSON report to STDOUT instead of text.
	json: bool,

	#[arg(short, long, value_name = "FILE")]
	/// Save a JSON report to this file.
	output: Option<PathBuf>,

	#[arg(short, long, conflicts_with = "verbose")]
	/// Print nothing; rely on the exit code.
	quiet: bool,

	#[arg(short, long)]
	/// Log what each check is doing to STDERR.
	verbose: bool,
}



/// # Main.
fn main() {
	match main__() {
		Ok(code) => { std::process::exit(code); },
		Err(e) => {
			Msg::error(e.to_string()).eprint();
			std::process::exit(1);
		},
	}
}

#[inline]
/// # Actual Main.
fn main__() -> Result<i32, SpoofwatchError> {
	let cli = Cli::parse();

	env_logger::Builder::new()
		.filter_level(
			if cli.verbose { log::LevelFilter::Debug }
			else if cli.quiet { log::LevelFilter::Error }
			else { log::LevelFilter::Warn }
		)
		.parse_default_env()
		.init();

	// Load configuration. If the user specified one, go with that and print an
	// error if the path is invalid. Otherwise look for a config at the default
	// path and go with that if it exists. Otherwise just use the internal
	// default settings.
	let settings =
		if let Some(path) = cli.config.clone()
			.or_else(|| Some(Settings::config()).filter(|x| x.is_file()))
		{
			Settings::try_from(path)?
		}
		else { Settings::default() };

	let urls = gather(&cli)?;
	let filter = settings.filter()?;
	let engine = settings.engine()?;
	let lookup = if cli.offline { None } else { settings.lookup() };
	log::debug!("Analyzers: {}.", engine.names().join(", "));

	// Split off the ignored URLs, then check the rest.
	let (ignored, checked): (Vec<(usize, &String)>, Vec<(usize, &String)>) = urls.iter()
		.enumerate()
		.partition(|(_, u)| filter.is_ignored(u));
	let todo: Vec<&str> = checked.iter().map(|(_, u)| u.as_str()).collect();
	let answers = engine.assess_many(
		&todo,
		lookup.as_ref().map(|l| l as &dyn ReputationCheck),
	);

	// Put everything back in the original order.
	let mut results: Vec<(usize, Assessment)> = ignored.into_iter()
		.map(|(idx, u)| {
			log::info!("Ignoring {u}.");
			(idx, Assessment::ignored(u))
		})
		.chain(checked.into_iter().map(|(idx, _)| idx).zip(answers))
		.collect();
	results.sort_unstable_by_key(|(idx, _)| *idx);
	let results: Vec<Assessment> = results.into_iter().map(|(_, a)| a).collect();

	let report = Report::new(&results);
	if let Some(path) = cli.output.as_deref() {
		report::write_to_file(path, &report.json()?)?;
	}

	if ! cli.quiet {
		if cli.json { println!("{}", report.json()?); }
		else {
			print!("{}", report.text());
			report.summary().eprint();
		}
	}

	Ok(i32::from(report.worst().as_u8().saturating_sub(1)))
}

/// # Gather URLs.
///
/// Collect the URLs from the command line and list file (if any), skipping
/// blanks, comments, and duplicates.
fn gather(cli: &Cli) -> Result<Vec<String>, SpoofwatchError> {
	let mut visited: HashSet<String, RandomState> = HashSet::with_hasher(AHASH_STATE);
	let mut out = Vec::new();

	let mut push = |raw: &str| {
		let raw = raw.trim();
		if ! raw.is_empty() && ! raw.starts_with('#') && visited.insert(raw.to_owned()) {
			out.push(raw.to_owned());
		}
	};

	for url in &cli.urls { push(url); }

	if let Some(path) = cli.list.as_deref() {
		let raw = std::fs::read_to_string(path)
			.map_err(|_| SpoofwatchError::Read(path.to_string_lossy().into_owned()))?;
		for line in raw.lines() { push(line); }
	}

	if out.is_empty() { Err(SpoofwatchError::NoUrls) }
	else { Ok(out) }
}

/*!
# Spoofwatch: Settings
*/

use ahash::RandomState;
use crate::{
	AHASH_STATE,
	lookup::Lookup,
	SpoofwatchError,
};
use regex::RegexSet;
use serde::Deserialize;
use spoofwatch_core::{
	Analyzer,
	Corpus,
	Engine,
	extract_host,
	ImitationAnalyzer,
	ShortenerAnalyzer,
	SimilarityAnalyzer,
};
use spoofwatch_idn::normalize_domain;
use std::{
	collections::HashSet,
	path::PathBuf,
};



#[expect(clippy::struct_excessive_bools, reason = "This is coming from Yaml.")]
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
/// # Settings.
pub(super) struct Settings {
	#[serde(default = "Option::default")]
	corpus: Option<PathBuf>,

	#[serde(default = "default_true")]
	reputation: bool,

	#[serde(default = "Option::default")]
	phishtank_key: Option<String>,

	#[serde(default = "Option::default")]
	urlhaus_key: Option<String>,

	#[serde(default = "default_timeout")]
	timeout: u64,

	#[serde(default = "default_retries")]
	retries: u8,

	#[serde(default = "default_true")]
	similarity: bool,

	#[serde(default = "default_true")]
	shorteners: bool,

	#[serde(default = "default_true")]
	imitation: bool,

	#[serde(default = "Vec::new")]
	ignore: Vec<String>,

	#[serde(default = "Vec::new")]
	ignore_regex: Vec<String>,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			corpus: None,
			reputation: true,
			phishtank_key: None,
			urlhaus_key: None,
			timeout: default_timeout(),
			retries: default_retries(),
			similarity: true,
			shorteners: true,
			imitation: true,
			ignore: Vec::new(),
			ignore_regex: Vec::new(),
		}
	}
}

impl TryFrom<PathBuf> for Settings {
	type Error = SpoofwatchError;

	fn try_from(path: PathBuf) -> Result<Self, Self::Error> {
		std::fs::canonicalize(&path)
			.and_then(std::fs::read_to_string)
			.ok()
			.and_then(|x| serde_yml::from_str::<Self>(&x).ok())
			.ok_or(SpoofwatchError::Config(path))
	}
}

impl Settings {
	/// # Configuration Path.
	pub(super) fn config() -> PathBuf { PathBuf::from("/etc/spoofwatch.yaml") }

	/// # Build Engine.
	///
	/// Analyzers run in the usual order, minus any that were switched off.
	pub(super) fn engine(&self) -> Result<Engine, SpoofwatchError> {
		let mut analyzers: Vec<Box<dyn Analyzer>> = Vec::with_capacity(3);

		if self.similarity {
			let corpus = match self.corpus.as_ref() {
				Some(path) => {
					let raw = std::fs::read_to_string(path)
						.map_err(|_| SpoofwatchError::Corpus(path.clone()))?;
					let corpus = Corpus::from_json(&raw)?;
					log::info!("Loaded {} legitimate sites from {}.", corpus.len(), path.display());
					corpus
				},
				None => Corpus::builtin(),
			};
			analyzers.push(Box::new(SimilarityAnalyzer::new(corpus)));
		}
		if self.shorteners { analyzers.push(Box::new(ShortenerAnalyzer)); }
		if self.imitation { analyzers.push(Box::new(ImitationAnalyzer)); }

		Ok(Engine::new(analyzers))
	}

	/// # Reputation Lookup.
	///
	/// Returns `None` if reputation checks are disabled.
	pub(super) fn lookup(&self) -> Option<Lookup> {
		if self.reputation {
			Some(Lookup::new(
				self.phishtank_key.clone().filter(|k| ! k.trim().is_empty()),
				self.urlhaus_key.clone().filter(|k| ! k.trim().is_empty()),
				self.timeout,
				self.retries,
			))
		}
		else { None }
	}

	/// # Ignore Filter.
	pub(super) fn filter(&self) -> Result<Filter, SpoofwatchError> {
		let mut exact: HashSet<String, RandomState> = HashSet::with_hasher(AHASH_STATE);
		exact.extend(self.ignore.iter().filter_map(|x| {
			let x = normalize_domain(x);
			if x.is_empty() { None }
			else { Some(x) }
		}));

		let regex =
			if self.ignore_regex.is_empty() { None }
			else {
				Some(
					RegexSet::new(&self.ignore_regex)
						.map_err(|e| SpoofwatchError::Regex(e.to_string()))?
				)
			};

		Ok(Filter { exact, regex })
	}
}



#[derive(Debug, Clone)]
/// # Ignore Filter.
///
/// Exact entries match the registrable domain; patterns match the full
/// host.
pub(super) struct Filter {
	exact: HashSet<String, RandomState>,
	regex: Option<RegexSet>,
}

impl Filter {
	/// # Is Ignored?
	pub(super) fn is_ignored(&self, url: &str) -> bool {
		let host = extract_host(url);
		if host.is_empty() { return false; }

		self.exact.contains(&normalize_domain(&host)) ||
		self.regex.as_ref().is_some_and(|r| r.is_match(&host))
	}
}



/// # Default true.
const fn default_true() -> bool { true }

/// # Default Timeout (Seconds).
const fn default_timeout() -> u64 { 5 }

/// # Default Retries.
const fn default_retries() -> u8 { 1 }



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_filters() {
		let settings = Settings::try_from(PathBuf::from("./skel/test.yaml"))
			.expect("Missing settings.");

		assert!(! settings.reputation);
		assert_eq!(settings.timeout, 3);
		assert_eq!(settings.retries, 1);
		assert!(settings.lookup().is_none());

		let filter = settings.filter().expect("Bad filter.");

		// Exact.
		assert!(filter.is_ignored("https://www.intranet-example.com/login"));
		assert!(filter.is_ignored("mail.intranet-example.com"));

		// Pattern.
		assert!(filter.is_ignored("https://staging-42.corp-test.net/"));
		assert!(! filter.is_ignored("https://corp-test.net/"));

		// Everything else.
		assert!(! filter.is_ignored("https://g00gle.com/"));
		assert!(! filter.is_ignored(""));
	}

	#[test]
	fn t_engine() {
		let settings = Settings::try_from(PathBuf::from("./skel/test.yaml"))
			.expect("Missing settings.");
		let engine = settings.engine().expect("Engine failed.");
		assert_eq!(engine.names(), ["domain-similarity", "domain-imitation"]);

		// Defaults run everything.
		let engine = Settings::default().engine().expect("Engine failed.");
		assert_eq!(engine.names(), ["domain-similarity", "shortened-url", "domain-imitation"]);
		assert!(Settings::default().lookup().is_some());
	}

	#[test]
	fn t_bad_config() {
		assert!(matches!(
			Settings::try_from(PathBuf::from("./skel/nope.yaml")),
			Err(SpoofwatchError::Config(_)),
		));

		let settings = Settings {
			ignore_regex: vec![String::from("(unclosed")],
			..Settings::default()
		};
		assert!(matches!(settings.filter(), Err(SpoofwatchError::Regex(_))));

		let settings = Settings {
			corpus: Some(PathBuf::from("./skel/nope.json")),
			..Settings::default()
		};
		assert!(matches!(settings.engine(), Err(SpoofwatchError::Corpus(_))));
	}
}

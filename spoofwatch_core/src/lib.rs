/*!
# `Spoofwatch`: The Hard Bits

This crate holds the detection engine: script classification, homoglyph
lookup, look-alike scoring against a corpus of legitimate sites, and the
verdict logic that ties them together with an (optional) reputation answer.

Nothing in here touches the network. Reputation lookups are supplied by the
caller through [`ReputationCheck`].

## Examples

```
use spoofwatch_core::{Engine, Level};

let engine = Engine::default();

// Cyrillic "о"s and "е" posing as Latin.
let res = engine.assess_offline("xn--ggl-tdd6ba.com");
assert_eq!(res.level, Level::Suspicious);
assert!(res.lexical.has_mixed_scripts);

let res = engine.assess_offline("https://www.example.com/");
assert_eq!(res.level, Level::NotSuspicious);
```
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



mod analyzer;
mod error;
mod homoglyph;
mod lexical;
mod reputation;
mod script;
mod similarity;
mod verdict;

pub use analyzer::{
	Analyzer,
	Assessment,
	Context,
	Engine,
	ImitationAnalyzer,
	ShortenerAnalyzer,
	SimilarityAnalyzer,
};
pub use error::SpoofError;
pub use homoglyph::{
	Confusable,
	confusable,
	is_confusable,
	skeleton,
};
pub use lexical::{
	analyze_lexical,
	extract_host,
	LexicalResult,
	Punycode,
	SuspiciousCharacter,
};
pub use reputation::{
	Reputation,
	ReputationCheck,
	reputation_or_unavailable,
};
pub use script::{
	is_neutral,
	Script,
};
pub use similarity::{
	adjacent,
	calculate_similarity,
	Corpus,
	Difference,
	differences,
	levenshtein,
	SimilarityMatch,
};
pub use verdict::{
	compose_verdict,
	highest_severity,
	IssueKind,
	Level,
	lexical_verdict,
	SecurityIssue,
	Severity,
	Verdict,
};



/// # (Not) Random State.
///
/// Using a fixed seed value for `AHashMap` drops a few dependencies and
/// prevents Valgrind complaining about 64 lingering bytes from the runtime
/// static that would be used otherwise.
///
/// For our purposes, the variability of truly random keys isn't really needed.
pub(crate) const AHASH_STATE: ahash::RandomState = ahash::RandomState::with_seeds(13, 19, 23, 71);

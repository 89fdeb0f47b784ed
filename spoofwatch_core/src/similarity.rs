/*!
# Spoofwatch: Similarity
*/

use crate::{
	AHASH_STATE,
	IssueKind,
	SecurityIssue,
	Severity,
	SpoofError,
};
use serde::Serialize;
use spoofwatch_idn::{
	is_known_domain,
	is_valid_domain,
	normalize_domain,
};
use std::{
	collections::{
		BTreeMap,
		HashMap,
	},
	fmt,
};

include!(concat!(env!("OUT_DIR"), "/spoofwatch-corpus.rs"));



/// # Candidate Threshold.
///
/// Matches at or below this are dropped from search results entirely.
const MIN_CANDIDATE: f64 = 0.6;

/// # Report Threshold.
const MIN_REPORT: f64 = 0.7;

/// # High-Severity Threshold.
const MIN_HIGH: f64 = 0.9;



#[derive(Debug, Clone)]
/// # Legitimate-Site Corpus.
///
/// Known-good domains bucketed by first character, used as the reference set
/// for look-alike detection.
///
/// The default value is empty; use [`Corpus::builtin`] for the bundled list.
pub struct Corpus {
	buckets: HashMap<char, Vec<String>, ahash::RandomState>,
}

impl Default for Corpus {
	fn default() -> Self {
		Self { buckets: HashMap::with_hasher(AHASH_STATE) }
	}
}

impl Corpus {
	#[must_use]
	/// # Built-In Corpus.
	pub fn builtin() -> Self {
		Self::from_buckets(
			CORPUS.iter().map(|(k, v)| (*k, v.iter().map(|s| (*s).to_owned()).collect()))
		)
	}

	/// # From Buckets.
	///
	/// Build a corpus from `(first character, sites)` pairs. Entries are
	/// lowercased; empty entries are ignored. Sites are kept in the order
	/// given, which is also the order ties are broken in.
	pub fn from_buckets<I>(src: I) -> Self
	where I: IntoIterator<Item=(char, Vec<String>)> {
		let mut buckets: HashMap<char, Vec<String>, ahash::RandomState> = HashMap::with_hasher(AHASH_STATE);
		for (k, sites) in src {
			let entry = buckets.entry(k).or_default();
			for site in sites {
				let site = site.trim().to_lowercase();
				if ! site.is_empty() && ! entry.contains(&site) { entry.push(site); }
			}
		}

		buckets.retain(|_, v| ! v.is_empty());
		Self { buckets }
	}

	/// # From JSON.
	///
	/// Parse a corpus from a JSON object mapping single-character keys to
	/// arrays of domains, e.g. `{"g": ["google.com", "github.com"]}`.
	///
	/// ## Errors
	///
	/// Returns an error if the JSON is malformed, a key is not exactly one
	/// character, or the result would be empty.
	pub fn from_json(src: &str) -> Result<Self, SpoofError> {
		let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(src)
			.map_err(|e| SpoofError::CorpusParse(e.to_string()))?;

		let mut out = Vec::with_capacity(raw.len());
		for (k, v) in raw {
			let mut chars = k.chars();
			match (chars.next(), chars.next()) {
				(Some(c), None) => { out.push((c, v)); },
				_ => return Err(SpoofError::CorpusParse(format!("invalid key {k:?}"))),
			}
		}

		let out = Self::from_buckets(out);
		if out.is_empty() { Err(SpoofError::CorpusEmpty) }
		else { Ok(out) }
	}

	#[must_use]
	/// # Is Empty?
	pub fn is_empty(&self) -> bool { self.buckets.is_empty() }

	#[must_use]
	/// # Number of Sites.
	pub fn len(&self) -> usize { self.buckets.values().map(Vec::len).sum() }

	#[must_use]
	/// # Find Similar Sites.
	///
	/// Compare the domain against its own first-character bucket and those of
	/// visually adjacent characters (`0` for `o`, `1` for `l`, …), returning
	/// every site scoring above `0.6`, best first. Ties keep corpus order.
	///
	/// The domain is compared as given; callers wanting the registrable part
	/// should normalize first.
	///
	/// ## Examples
	///
	/// ```
	/// use spoofwatch_core::Corpus;
	///
	/// let corpus = Corpus::builtin();
	/// let res = corpus.find_similar_sites("g00gle.com");
	/// assert_eq!(res[0].legitimate, "google.com");
	///
	/// assert!(corpus.find_similar_sites("").is_empty());
	/// ```
	pub fn find_similar_sites(&self, domain: &str) -> Vec<SimilarityMatch> {
		let Some(first) = domain.chars().next() else { return Vec::new(); };

		let mut out: Vec<SimilarityMatch> = std::iter::once(first)
			.chain(adjacent(first).iter().copied())
			.filter_map(|c| self.buckets.get(&c))
			.flatten()
			.filter_map(|site| {
				let similarity = calculate_similarity(domain, site);
				if MIN_CANDIDATE < similarity {
					Some(SimilarityMatch {
						candidate: domain.to_owned(),
						legitimate: site.clone(),
						similarity,
						differences: differences(domain, site),
					})
				}
				else { None }
			})
			.collect();

		// Stable, so equal scores stay in corpus order.
		out.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
		out
	}

	#[must_use]
	/// # Check Domain.
	///
	/// Normalize the source and look for a close-but-not-identical
	/// legitimate counterpart. Invalid and known domains are skipped.
	///
	/// An issue is returned only if the best match scores above `0.7`; it is
	/// high severity above `0.9`, medium otherwise.
	pub fn check(&self, src: &str) -> Option<SecurityIssue> {
		let domain = normalize_domain(src);
		if ! is_valid_domain(&domain) || is_known_domain(&domain) { return None; }

		let best = self.find_similar_sites(&domain).into_iter().next()?;
		if best.similarity <= MIN_REPORT || best.legitimate == domain { return None; }

		let severity =
			if MIN_HIGH < best.similarity { Severity::High }
			else { Severity::Medium };

		let mut details = best.differences.iter()
			.map(ToString::to_string)
			.collect::<Vec<_>>()
			.join("; ");
		if details.is_empty() { details.push_str("No positional differences."); }

		Some(SecurityIssue::new(
			IssueKind::DomainSimilarity,
			severity,
			format!(
				"Domain {} is {:.0}% similar to {}.",
				domain,
				best.similarity * 100.0,
				best.legitimate,
			),
			details,
		))
	}
}



#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
/// # Positional Difference.
///
/// Positions are one-based character offsets.
pub enum Difference {
	/// # Different Character.
	Substitution {
		/// # Position.
		position: usize,
		/// # Candidate Character.
		found: char,
		/// # Legitimate Character.
		expected: char,
	},

	/// # Extra Character in the Candidate.
	Extra {
		/// # Position.
		position: usize,
		/// # Candidate Character.
		found: char,
	},

	/// # Character Missing From the Candidate.
	Missing {
		/// # Position.
		position: usize,
		/// # Legitimate Character.
		expected: char,
	},
}

impl fmt::Display for Difference {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Substitution { position, found, expected } =>
				write!(f, "Position {position}: '{found}' instead of '{expected}'"),
			Self::Extra { position, found } =>
				write!(f, "Position {position}: extra character '{found}'"),
			Self::Missing { position, expected } =>
				write!(f, "Position {position}: missing character '{expected}'"),
		}
	}
}



#[derive(Debug, Clone, PartialEq, Serialize)]
/// # Similarity Match.
pub struct SimilarityMatch {
	/// # Domain Being Checked.
	pub candidate: String,

	/// # Legitimate Counterpart.
	pub legitimate: String,

	/// # Similarity (0–1).
	pub similarity: f64,

	/// # Positional Differences.
	pub differences: Vec<Difference>,
}



#[must_use]
/// # Adjacent Characters.
///
/// Characters commonly swapped for the given one in look-alike domains.
pub const fn adjacent(ch: char) -> &'static [char] {
	match ch {
		'o' => &['0'],
		'0' => &['o'],
		'l' => &['1', 'i'],
		'1' => &['l', 'i'],
		'i' => &['1', 'l'],
		'e' => &['3'],
		'3' => &['e'],
		'a' => &['@'],
		'@' => &['a'],
		's' => &['5', '$'],
		'5' | '$' => &['s'],
		_ => &[],
	}
}

#[must_use]
/// # Levenshtein Distance.
///
/// The classic insert/delete/substitute edit distance, by character.
pub fn levenshtein(a: &str, b: &str) -> usize {
	let a: Vec<char> = a.chars().collect();
	let b: Vec<char> = b.chars().collect();
	if a.is_empty() { return b.len(); }
	if b.is_empty() { return a.len(); }

	// Two rows of the matrix are all we ever need.
	let mut prev: Vec<usize> = (0..=b.len()).collect();
	let mut row: Vec<usize> = vec![0; b.len() + 1];
	for (i, ca) in a.iter().enumerate() {
		row[0] = i + 1;
		for (j, cb) in b.iter().enumerate() {
			let cost = usize::from(ca != cb);
			row[j + 1] = (prev[j] + cost)
				.min(prev[j + 1] + 1)
				.min(row[j] + 1);
		}
		std::mem::swap(&mut prev, &mut row);
	}

	prev[b.len()]
}

#[allow(clippy::cast_precision_loss)] // Domains are short.
#[must_use]
/// # Similarity.
///
/// Normalized edit similarity: `(max_len - distance) / max_len`. Identical
/// strings, including two empty ones, score `1.0`.
///
/// ## Examples
///
/// ```
/// use spoofwatch_core::calculate_similarity;
///
/// assert_eq!(calculate_similarity("google.com", "google.com"), 1.0);
/// assert_eq!(calculate_similarity("g00gle.com", "google.com"), 0.8);
/// ```
pub fn calculate_similarity(a: &str, b: &str) -> f64 {
	let max = a.chars().count().max(b.chars().count());
	if max == 0 { return 1.0; }

	let dist = levenshtein(a, b);
	(max - dist) as f64 / max as f64
}

#[must_use]
/// # Differences.
///
/// A simple position-by-position comparison, up to the longer length.
pub fn differences(candidate: &str, legitimate: &str) -> Vec<Difference> {
	let a: Vec<char> = candidate.chars().collect();
	let b: Vec<char> = legitimate.chars().collect();

	(0..a.len().max(b.len()))
		.filter_map(|idx| {
			let position = idx + 1;
			match (a.get(idx).copied(), b.get(idx).copied()) {
				(Some(found), Some(expected)) if found != expected =>
					Some(Difference::Substitution { position, found, expected }),
				(Some(found), None) => Some(Difference::Extra { position, found }),
				(None, Some(expected)) => Some(Difference::Missing { position, expected }),
				_ => None,
			}
		})
		.collect()
}

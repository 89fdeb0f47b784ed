/*!
# Spoofwatch: Analyzers

An [`Engine`] runs a URL past an explicit, ordered list of [`Analyzer`]s and
folds their findings together with the lexical and reputation verdict.
*/

use crate::{
	analyze_lexical,
	compose_verdict,
	Corpus,
	extract_host,
	highest_severity,
	IssueKind,
	Level,
	lexical_verdict,
	LexicalResult,
	Reputation,
	reputation_or_unavailable,
	ReputationCheck,
	SecurityIssue,
	Severity,
	skeleton,
	Verdict,
};
use rayon::prelude::*;
use serde::Serialize;
use spoofwatch_idn::{
	is_known_domain,
	is_shortener,
	normalize_domain,
};
use std::{
	borrow::Cow,
	fmt,
};



/// # Watched Brands.
///
/// The label to look for, and the domain that is allowed to use it.
const BRANDS: [(&str, &str); 11] = [
	("amazon", "amazon.com"),
	("apple", "apple.com"),
	("facebook", "facebook.com"),
	("google", "google.com"),
	("instagram", "instagram.com"),
	("linkedin", "linkedin.com"),
	("microsoft", "microsoft.com"),
	("netflix", "netflix.com"),
	("paypal", "paypal.com"),
	("twitter", "twitter.com"),
	("youtube", "youtube.com"),
];



#[derive(Debug, Clone)]
/// # Analysis Context.
///
/// Everything an analyzer might want to know about a URL, worked out once.
pub struct Context {
	/// # Original URL.
	pub url: String,

	/// # Host (ASCII).
	pub host: String,

	/// # Registrable Domain.
	pub domain: String,

	/// # Known Domain?
	pub known: bool,

	/// # Lexical Result.
	pub lexical: LexicalResult,
}

impl Context {
	#[must_use]
	/// # New.
	pub fn new(url: &str) -> Self {
		let host = extract_host(url);
		let domain = normalize_domain(&host);
		let known = is_known_domain(&domain);
		let lexical = analyze_lexical(url);

		Self {
			url: url.trim().to_owned(),
			host,
			domain,
			known,
			lexical,
		}
	}

	/// # Scrutinized Lexical Result.
	///
	/// Known domains are spared homoglyph and mixed-script scrutiny; only a
	/// bad Punycode verdict still counts against them.
	fn scrutinized(&self) -> Cow<'_, LexicalResult> {
		if
			self.known &&
			(self.lexical.has_mixed_scripts || ! self.lexical.suspicious_chars.is_empty())
		{
			let mut out = self.lexical.clone();
			out.has_mixed_scripts = false;
			out.suspicious_chars.clear();
			Cow::Owned(out)
		}
		else { Cow::Borrowed(&self.lexical) }
	}
}



/// # Analyzer.
pub trait Analyzer: Send + Sync {
	/// # Name.
	fn name(&self) -> &'static str;

	/// # Analyze.
	///
	/// Return any issues found; an empty list means all clear.
	fn analyze(&self, ctx: &Context) -> Vec<SecurityIssue>;
}

#[derive(Debug, Clone)]
/// # Similarity Analyzer.
///
/// Flags domains that are a close-but-not-exact match for a site in the
/// corpus.
pub struct SimilarityAnalyzer {
	corpus: Corpus,
}

impl Default for SimilarityAnalyzer {
	#[inline]
	fn default() -> Self { Self::new(Corpus::builtin()) }
}

impl SimilarityAnalyzer {
	#[must_use]
	/// # New.
	pub const fn new(corpus: Corpus) -> Self { Self { corpus } }
}

impl Analyzer for SimilarityAnalyzer {
	fn name(&self) -> &'static str { "domain-similarity" }

	fn analyze(&self, ctx: &Context) -> Vec<SecurityIssue> {
		if ctx.known { return Vec::new(); }
		self.corpus.check(&ctx.domain).into_iter().collect()
	}
}

#[derive(Debug, Clone, Copy, Default)]
/// # Shortener Analyzer.
///
/// Link shorteners hide the real destination.
pub struct ShortenerAnalyzer;

impl Analyzer for ShortenerAnalyzer {
	fn name(&self) -> &'static str { "shortened-url" }

	fn analyze(&self, ctx: &Context) -> Vec<SecurityIssue> {
		if is_shortener(&ctx.host) {
			vec![SecurityIssue::new(
				IssueKind::ShortenedUrl,
				Severity::Medium,
				"Shortened URL detected.",
				format!("{} is a link shortener; the real destination is hidden.", ctx.domain),
			)]
		}
		else { Vec::new() }
	}
}

#[derive(Debug, Clone, Copy, Default)]
/// # Imitation Analyzer.
///
/// Flags hosts that drop a well-known brand name into a domain that
/// doesn't belong to it, like `paypal-login.com` or `google.com.evil.net`.
pub struct ImitationAnalyzer;

impl Analyzer for ImitationAnalyzer {
	fn name(&self) -> &'static str { "domain-imitation" }

	fn analyze(&self, ctx: &Context) -> Vec<SecurityIssue> {
		if ctx.known { return Vec::new(); }

		// Look at look-alike characters as what they pretend to be.
		let fake = skeleton(&ctx.lexical.host);
		BRANDS.iter()
			.filter(|(label, domain)|
				(has_token(&ctx.host, label) || has_token(&fake, label)) &&
				ctx.domain != *domain
			)
			.map(|(_, domain)| SecurityIssue::new(
				IssueKind::DomainImitation,
				Severity::High,
				format!("Possible imitation of {domain}."),
				format!("{} may be trying to pass itself off as {domain}.", ctx.host),
			))
			.collect()
	}
}

/// # Has Token?
///
/// Brand names only count as a whole label or a whole hyphenated piece of
/// one; `amazonaws.com` is not `amazon`.
fn has_token(host: &str, label: &str) -> bool {
	host.split(['.', '-']).any(|t| t == label)
}



#[derive(Debug, Clone, Serialize)]
/// # Assessment.
///
/// The full, aggregated answer for one URL.
pub struct Assessment {
	/// # URL.
	pub url: String,

	/// # Registrable Domain.
	pub domain: String,

	/// # Verdict Level.
	pub level: Level,

	/// # Any Issues?
	pub is_suspicious: bool,

	/// # Highest Issue Severity.
	pub suspicion: Severity,

	/// # Issues.
	pub issues: Vec<SecurityIssue>,

	/// # Lexical Details.
	pub lexical: LexicalResult,
}

impl Assessment {
	#[must_use]
	/// # Ignored.
	///
	/// A placeholder for URLs the caller chose not to analyze.
	pub fn ignored(url: &str) -> Self {
		let host = extract_host(url);
		Self {
			url: url.trim().to_owned(),
			domain: normalize_domain(&host),
			level: Level::NotSuspicious,
			is_suspicious: false,
			suspicion: Severity::Low,
			issues: Vec::new(),
			lexical: analyze_lexical(url),
		}
	}
}



/// # Engine.
///
/// Holds the analyzers and nothing else; it is safe to share between
/// threads.
pub struct Engine {
	analyzers: Vec<Box<dyn Analyzer>>,
}

impl Default for Engine {
	#[inline]
	fn default() -> Self { Self::with_corpus(Corpus::builtin()) }
}

impl fmt::Debug for Engine {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Engine")
			.field("analyzers", &self.names())
			.finish()
	}
}

impl Engine {
	#[must_use]
	/// # New.
	///
	/// Analyzers run in the order given.
	pub fn new(analyzers: Vec<Box<dyn Analyzer>>) -> Self { Self { analyzers } }

	#[must_use]
	/// # With Corpus.
	///
	/// The default analyzer line-up, using a custom corpus for similarity.
	pub fn with_corpus(corpus: Corpus) -> Self {
		Self::new(vec![
			Box::new(SimilarityAnalyzer::new(corpus)),
			Box::new(ShortenerAnalyzer),
			Box::new(ImitationAnalyzer),
		])
	}

	#[must_use]
	/// # Analyzer Names.
	pub fn names(&self) -> Vec<&'static str> {
		self.analyzers.iter().map(|a| a.name()).collect()
	}

	#[must_use]
	/// # Assess.
	///
	/// Analyze a URL, folding in the reputation answer. `None` means the
	/// reputation services were consulted but couldn't answer.
	///
	/// ## Examples
	///
	/// ```
	/// use spoofwatch_core::{Engine, Level, Reputation};
	///
	/// let engine = Engine::default();
	/// let safe = Reputation::clean("Not listed.");
	///
	/// let res = engine.assess("https://g00gle.com/login", Some(&safe));
	/// assert_eq!(res.level, Level::Suspicious);
	/// assert!(res.is_suspicious);
	/// ```
	pub fn assess(&self, url: &str, reputation: Option<&Reputation>) -> Assessment {
		let ctx = Context::new(url);
		let verdict = compose_verdict(&ctx.scrutinized(), reputation);
		self.finish(ctx, verdict)
	}

	#[must_use]
	/// # Assess (Offline).
	///
	/// Same as [`Engine::assess`], but for when reputation was never
	/// requested; no unavailable advisory is added.
	pub fn assess_offline(&self, url: &str) -> Assessment {
		let ctx = Context::new(url);
		let verdict = lexical_verdict(&ctx.scrutinized());
		self.finish(ctx, verdict)
	}

	/// # Assess Many.
	///
	/// Assess a batch of URLs in parallel, consulting `lookup` for each (or
	/// working offline if `None`). Results are returned in input order.
	pub fn assess_many<S>(&self, urls: &[S], lookup: Option<&dyn ReputationCheck>)
	-> Vec<Assessment>
	where S: AsRef<str> + Sync {
		urls.par_iter()
			.map(|url| {
				let url = url.as_ref();
				match lookup {
					Some(lookup) => {
						let rep = reputation_or_unavailable(lookup, url);
						self.assess(url, rep.as_ref())
					},
					None => self.assess_offline(url),
				}
			})
			.collect()
	}

	/// # Finish.
	///
	/// Run the analyzers and build the assessment.
	fn finish(&self, ctx: Context, verdict: Verdict) -> Assessment {
		let Verdict { level, mut issues } = verdict;
		let mut raised = false;
		for analyzer in &self.analyzers {
			let found = analyzer.analyze(&ctx);
			log::debug!("{} found {} issue(s) for {}.", analyzer.name(), found.len(), ctx.url);
			for issue in found {
				if issues.iter().any(|i| i.kind == issue.kind && i.description == issue.description) {
					continue;
				}
				if Severity::Medium <= issue.severity { raised = true; }
				issues.push(issue);
			}
		}

		// Levels only ever go up.
		let level =
			if raised { level.max(Level::Suspicious) }
			else { level };

		Assessment {
			suspicion: highest_severity(&issues),
			is_suspicious: ! issues.is_empty(),
			url: ctx.url,
			domain: ctx.domain,
			level,
			issues,
			lexical: ctx.lexical,
		}
	}
}



#[cfg(test)]
mod tests {
	use super::*;
	use crate::SpoofError;

	/// # Clean Reputation.
	fn clean() -> Reputation { Reputation::clean("Not listed.") }

	#[test]
	fn t_engine_clean() {
		let engine = Engine::default();
		assert_eq!(engine.names(), ["domain-similarity", "shortened-url", "domain-imitation"]);

		for url in ["https://example.com", "https://www.google.com/search?q=x", "mail.google.com"] {
			let res = engine.assess(url, Some(&clean()));
			assert_eq!(res.level, Level::NotSuspicious, "{url} should be clean.");
			assert!(! res.is_suspicious, "{url} should be clean.");
			assert_eq!(res.suspicion, Severity::Low);
		}
	}

	#[test]
	fn t_engine_spoof() {
		let engine = Engine::default();

		let res = engine.assess("xn--ggl-tdd6ba.com", Some(&clean()));
		assert_eq!(res.level, Level::Suspicious);
		assert_eq!(res.suspicion, Severity::High);
		assert!(res.issues.iter().any(|i| i.kind == IssueKind::MixedScripts));
		assert!(res.issues.iter().any(|i| i.kind == IssueKind::DomainImitation));

		let res = engine.assess("https://paypa1.com/signin", Some(&clean()));
		assert_eq!(res.level, Level::Suspicious);
		assert!(res.issues.iter().any(|i| i.kind == IssueKind::DomainSimilarity));
		assert!(res.lexical.suspicious_chars.is_empty());

		let res = engine.assess("https://paypal.com.account-verify.net/", Some(&clean()));
		assert_eq!(res.domain, "account-verify.net");
		assert!(res.issues.iter().any(|i|
			i.kind == IssueKind::DomainImitation && i.description.contains("paypal.com")
		));
	}

	#[test]
	fn t_known_skips_homoglyph() {
		let engine = Engine::default();

		// The registrable part is google.com, so the Cyrillic subdomain
		// gets a pass.
		let res = engine.assess_offline("https://xn--ggl-tdd6ba.google.com/");
		assert_eq!(res.domain, "google.com");
		assert_eq!(res.level, Level::NotSuspicious);
		assert!(res.issues.is_empty());

		// The lexical details are still reported as found.
		assert!(res.lexical.has_mixed_scripts);

		let res = engine.assess("https://xn--ggl-tdd6ba.google.com/", Some(&clean()));
		assert_eq!(res.level, Level::NotSuspicious);
		assert!(res.issues.is_empty());

		// Bad Punycode is never excused.
		let res = engine.assess_offline("xn--abc!.google.com");
		assert_eq!(res.level, Level::Suspicious);
		assert!(res.issues.iter().any(|i| i.kind == IssueKind::InvalidPunycode));

		// Unknown domains get the full treatment.
		let res = engine.assess_offline("https://xn--ggl-tdd6ba.com/");
		assert_eq!(res.level, Level::Suspicious);
		assert!(res.issues.iter().any(|i| i.kind == IssueKind::MixedScripts));
	}

	#[test]
	fn t_imitation_boundaries() {
		let engine = Engine::default();
		let imitates = |url: &str| engine.assess_offline(url)
			.issues
			.iter()
			.any(|i| i.kind == IssueKind::DomainImitation);

		for url in [
			"https://paypal-login.com/",
			"https://paypal.com.account-verify.net/",
			"https://secure-apple-id.net/",
			"xn--ggl-tdd6ba.com",
		] {
			assert!(imitates(url), "{url} should be an imitation.");
		}

		for url in [
			"https://amazonaws.com/",
			"https://s3.amazonaws.com/bucket",
			"https://pineapple.org/",
			"https://www.paypal.com/",
		] {
			assert!(! imitates(url), "{url} should not be an imitation.");
		}

		assert!(has_token("google.com.evil.net", "google"));
		assert!(has_token("my-google-login.com", "google"));
		assert!(! has_token("mygooglelogin.com", "google"));
	}

	#[test]
	fn t_engine_dangerous() {
		let engine = Engine::default();
		let bad = Reputation::dangerous(vec!["URLhaus".to_owned()], "Malware.");

		// Dangerous beats everything, clean lexical or not.
		for url in ["https://example.com", "xn--ggl-tdd6ba.com"] {
			let res = engine.assess(url, Some(&bad));
			assert_eq!(res.level, Level::Dangerous);
			assert_eq!(res.issues[0].kind, IssueKind::ReputationDangerous);
		}
	}

	#[test]
	fn t_engine_unavailable() {
		let engine = Engine::default();
		let res = engine.assess("https://example.com", None);
		assert_eq!(res.level, Level::NotSuspicious);
		assert!(res.is_suspicious);
		assert_eq!(res.suspicion, Severity::Low);
		assert_eq!(res.issues[0].kind, IssueKind::ReputationUnavailable);

		let res = engine.assess_offline("https://example.com");
		assert!(res.issues.is_empty());
	}

	#[test]
	fn t_engine_shortener() {
		let res = Engine::default().assess("https://bit.ly/abc", Some(&clean()));
		assert_eq!(res.level, Level::Suspicious);
		assert_eq!(res.suspicion, Severity::Medium);
		assert_eq!(res.issues[0].kind, IssueKind::ShortenedUrl);
	}

	#[test]
	fn t_engine_custom() {
		/// # Always Complains (Quietly).
		struct Grumpy;

		impl Analyzer for Grumpy {
			fn name(&self) -> &'static str { "grumpy" }
			fn analyze(&self, _ctx: &Context) -> Vec<SecurityIssue> {
				vec![SecurityIssue::new(IssueKind::ShortenedUrl, Severity::Low, "Meh.", "")]
			}
		}

		let engine = Engine::new(vec![Box::new(Grumpy)]);
		assert_eq!(engine.names(), ["grumpy"]);

		// Low-severity findings don't bump the level.
		let res = engine.assess_offline("https://g00gle.com");
		assert_eq!(res.level, Level::NotSuspicious);
		assert!(res.is_suspicious);
		assert_eq!(res.issues.len(), 1);

		// And with no analyzers, only the lexical verdict remains.
		let res = Engine::new(Vec::new()).assess_offline("https://g00gle.com");
		assert!(res.issues.is_empty());
	}

	#[test]
	fn t_assess_many() {
		/// # Flags One Host.
		struct Blocklist;

		impl ReputationCheck for Blocklist {
			fn check(&self, url: &str) -> Result<Reputation, SpoofError> {
				if url.contains("evil") {
					Ok(Reputation::dangerous(vec!["Blocklist".to_owned()], "Listed."))
				}
				else if url.contains("broken") {
					Err(SpoofError::Unavailable("down".to_owned()))
				}
				else { Ok(Reputation::clean("Not listed.")) }
			}
		}

		let engine = Engine::default();
		let urls = ["https://example.com", "https://evil.example.net", "https://broken.example.org"];
		let res = engine.assess_many(&urls, Some(&Blocklist));
		assert_eq!(res.len(), 3);
		assert_eq!(res[0].url, urls[0]);
		assert_eq!(res[0].level, Level::NotSuspicious);
		assert_eq!(res[1].level, Level::Dangerous);
		assert_eq!(res[2].level, Level::NotSuspicious);
		assert_eq!(res[2].issues[0].kind, IssueKind::ReputationUnavailable);

		let res = engine.assess_many(&urls, None);
		assert!(res.iter().all(|r| r.issues.is_empty()));
	}

	#[test]
	fn t_idempotent() {
		let engine = Engine::default();
		for url in ["xn--ggl-tdd6ba.com", "https://paypa1.com", "https://example.com"] {
			let a = engine.assess(url, Some(&clean()));
			let b = engine.assess(url, Some(&clean()));
			assert_eq!(a.level, b.level);
			assert_eq!(a.issues, b.issues);
			assert_eq!(a.lexical, b.lexical);
		}
	}
}

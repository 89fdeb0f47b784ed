/*!
# Spoofwatch: Verdicts
*/

use crate::{
	LexicalResult,
	Reputation,
	skeleton,
};
use serde::{
	Serialize,
	Serializer,
};
use std::fmt;



#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
/// # Severity.
pub enum Severity {
	#[default]
	/// # Low.
	Low,

	/// # Medium.
	Medium,

	/// # High.
	High,
}

impl fmt::Display for Severity {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Severity {
	#[must_use]
	/// # As String Slice.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Low => "low",
			Self::Medium => "medium",
			Self::High => "high",
		}
	}
}



#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
/// # Issue Kind.
pub enum IssueKind {
	/// # Close to a Legitimate Domain.
	DomainSimilarity,

	/// # Contains a Brand Name It Isn't.
	DomainImitation,

	/// # Non-Latin Look-Alike Characters.
	HomoglyphAttack,

	/// # Bad Punycode.
	InvalidPunycode,

	/// # More Than One Script.
	MixedScripts,

	/// # Flagged by a Reputation Service.
	ReputationDangerous,

	/// # Reputation Services Could Not Be Reached.
	ReputationUnavailable,

	/// # Link Shortener.
	ShortenedUrl,
}

impl fmt::Display for IssueKind {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Serialize for IssueKind {
	#[inline]
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where S: Serializer { serializer.serialize_str(self.as_str()) }
}

impl IssueKind {
	#[must_use]
	/// # As String Slice.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::DomainSimilarity => "domain-similarity",
			Self::DomainImitation => "domain-imitation",
			Self::HomoglyphAttack => "homoglyph-attack",
			Self::InvalidPunycode => "invalid-punycode",
			Self::MixedScripts => "mixed-scripts",
			Self::ReputationDangerous => "reputation-dangerous",
			Self::ReputationUnavailable => "api-unavailable",
			Self::ShortenedUrl => "shortened-url",
		}
	}
}



#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
/// # Security Issue.
pub struct SecurityIssue {
	#[serde(rename = "type")]
	/// # Kind.
	pub kind: IssueKind,

	/// # Severity.
	pub severity: Severity,

	/// # Short Description.
	pub description: String,

	/// # Details.
	pub details: String,
}

impl SecurityIssue {
	/// # New.
	pub fn new<D, E>(kind: IssueKind, severity: Severity, description: D, details: E) -> Self
	where D: Into<String>, E: Into<String> {
		Self {
			kind,
			severity,
			description: description.into(),
			details: details.into(),
		}
	}
}



#[repr(u8)]
#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq, Ord, PartialOrd)]
/// # Verdict Level.
pub enum Level {
	#[default]
	/// # Nothing Found.
	NotSuspicious = 1,

	/// # Lexical or Heuristic Red Flags.
	Suspicious = 2,

	/// # Flagged by a Reputation Service.
	Dangerous = 3,
}

impl fmt::Display for Level {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Serialize for Level {
	#[inline]
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where S: Serializer { serializer.serialize_u8(self.as_u8()) }
}

impl Level {
	#[must_use]
	/// # As Number.
	pub const fn as_u8(self) -> u8 { self as u8 }

	#[must_use]
	/// # As String Slice.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::NotSuspicious => "not suspicious",
			Self::Suspicious => "suspicious",
			Self::Dangerous => "dangerous",
		}
	}
}



#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
/// # Verdict.
pub struct Verdict {
	/// # Level.
	pub level: Level,

	/// # Issues Backing the Level.
	pub issues: Vec<SecurityIssue>,
}



#[must_use]
/// # Compose Verdict.
///
/// Combine a lexical result with the (optional) reputation answer. The
/// first matching rule wins:
///
/// 1. A dangerous reputation means [`Level::Dangerous`];
/// 2. A suspicious lexical result means [`Level::Suspicious`];
/// 3. Otherwise [`Level::NotSuspicious`].
///
/// `None` means the reputation services could not be reached. That is
/// never fatal: the lexical result stands on its own, and a low-severity
/// advisory notes the verification is incomplete.
///
/// ## Examples
///
/// ```
/// use spoofwatch_core::{analyze_lexical, compose_verdict, Level, Reputation};
///
/// let lexical = analyze_lexical("https://example.com");
/// assert_eq!(
///     compose_verdict(&lexical, Some(&Reputation::clean("Not listed."))).level,
///     Level::NotSuspicious,
/// );
///
/// let bad = Reputation::dangerous(vec!["PhishTank".to_owned()], "Listed.");
/// assert_eq!(compose_verdict(&lexical, Some(&bad)).level, Level::Dangerous);
/// ```
pub fn compose_verdict(lexical: &LexicalResult, reputation: Option<&Reputation>) -> Verdict {
	let mut out = lexical_verdict(lexical);

	match reputation {
		Some(rep) if rep.is_dangerous => {
			out.level = Level::Dangerous;
			out.issues.insert(0, SecurityIssue::new(
				IssueKind::ReputationDangerous,
				Severity::High,
				format!("Flagged as dangerous by {}.", rep.sources.join(", ")),
				rep.details.clone(),
			));
		},
		Some(_) => {},
		None => out.issues.push(SecurityIssue::new(
			IssueKind::ReputationUnavailable,
			Severity::Low,
			"Verification incomplete.",
			"Reputation services could not be reached; this result is based on local analysis only.",
		)),
	}

	out
}

#[must_use]
/// # Lexical-Only Verdict.
///
/// Rules two and three of [`compose_verdict`], for when reputation was
/// never requested in the first place.
pub fn lexical_verdict(lexical: &LexicalResult) -> Verdict {
	let level =
		if lexical.is_suspicious() { Level::Suspicious }
		else { Level::NotSuspicious };

	Verdict { level, issues: lexical_issues(lexical) }
}

#[must_use]
/// # Highest Severity.
///
/// Returns [`Severity::Low`] for an empty set.
pub fn highest_severity(issues: &[SecurityIssue]) -> Severity {
	issues.iter().map(|i| i.severity).max().unwrap_or_default()
}



/// # Lexical Issues.
fn lexical_issues(lexical: &LexicalResult) -> Vec<SecurityIssue> {
	let mut out = Vec::new();

	if lexical.punycode.is_bad() {
		out.push(SecurityIssue::new(
			IssueKind::InvalidPunycode,
			Severity::High,
			"Invalid Punycode.",
			lexical.explanation.clone(),
		));
	}

	if lexical.has_mixed_scripts {
		out.push(SecurityIssue::new(
			IssueKind::MixedScripts,
			Severity::High,
			"Domain mixes character sets.",
			format!(
				"{} combines {} characters.",
				lexical.host,
				lexical.scripts.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", "),
			),
		));
	}

	if ! lexical.suspicious_chars.is_empty() {
		let list = lexical.suspicious_chars.iter()
			.map(|s| format!("'{}' ({}) at position {}", s.ch, s.script, s.position + 1))
			.collect::<Vec<_>>()
			.join(", ");
		out.push(SecurityIssue::new(
			IssueKind::HomoglyphAttack,
			Severity::High,
			"Domain contains look-alike characters.",
			format!("{list}; reads as {}.", skeleton(&lexical.host)),
		));
	}

	out
}



#[cfg(test)]
mod tests {
	use super::*;
	use crate::analyze_lexical;

	#[test]
	fn t_compose_verdict() {
		let clean = analyze_lexical("https://example.com/");
		let spoof = analyze_lexical("xn--ggl-tdd6ba.com");
		let safe = Reputation::clean("Not listed.");
		let bad = Reputation::dangerous(vec!["PhishTank".to_owned()], "Listed.");

		let v = compose_verdict(&clean, Some(&safe));
		assert_eq!(v.level, Level::NotSuspicious);
		assert!(v.issues.is_empty());

		let v = compose_verdict(&spoof, Some(&safe));
		assert_eq!(v.level, Level::Suspicious);
		assert!(v.issues.iter().any(|i| i.kind == IssueKind::MixedScripts));
		assert!(v.issues.iter().any(|i| i.kind == IssueKind::HomoglyphAttack));

		// Dangerous wins no matter what the lexical result says.
		for lexical in [&clean, &spoof] {
			let v = compose_verdict(lexical, Some(&bad));
			assert_eq!(v.level, Level::Dangerous);
			assert_eq!(v.issues[0].kind, IssueKind::ReputationDangerous);
			assert!(v.issues[0].description.contains("PhishTank"));
		}
	}

	#[test]
	fn t_unavailable() {
		let clean = analyze_lexical("https://example.com/");
		let v = compose_verdict(&clean, None);
		assert_eq!(v.level, Level::NotSuspicious);
		assert_eq!(v.issues.len(), 1);
		assert_eq!(v.issues[0].kind, IssueKind::ReputationUnavailable);
		assert_eq!(v.issues[0].severity, Severity::Low);

		let spoof = analyze_lexical("xn--ggl-tdd6ba.com");
		assert_eq!(compose_verdict(&spoof, None).level, Level::Suspicious);
	}

	#[test]
	fn t_lexical_issues() {
		let v = lexical_verdict(&analyze_lexical("xn--ggl-tdd6ba.com"));
		let homoglyph = v.issues.iter()
			.find(|i| i.kind == IssueKind::HomoglyphAttack)
			.expect("Missing homoglyph issue.");
		assert!(homoglyph.details.contains("reads as google.com"));
		assert!(homoglyph.details.contains("position 2"));

		let v = lexical_verdict(&analyze_lexical("xn--abc!.com"));
		assert_eq!(v.level, Level::Suspicious);
		assert_eq!(v.issues[0].kind, IssueKind::InvalidPunycode);
	}

	#[test]
	fn t_highest_severity() {
		assert_eq!(highest_severity(&[]), Severity::Low);

		let issues = [
			SecurityIssue::new(IssueKind::ShortenedUrl, Severity::Medium, "", ""),
			SecurityIssue::new(IssueKind::ReputationUnavailable, Severity::Low, "", ""),
		];
		assert_eq!(highest_severity(&issues), Severity::Medium);
	}

	#[test]
	fn t_serialize() {
		let issue = SecurityIssue::new(IssueKind::ShortenedUrl, Severity::Medium, "a", "b");
		assert_eq!(
			serde_json::to_string(&issue).expect("Serialize failed."),
			r#"{"type":"shortened-url","severity":"medium","description":"a","details":"b"}"#,
		);
		assert_eq!(serde_json::to_string(&Level::Dangerous).expect("Serialize failed."), "3");
	}
}

/*!
# Spoofwatch: Lexical Analysis

Character-level inspection of a URL's host: which scripts it mixes, which
of its characters are look-alikes, and whether its Punycode is honest.
*/

use crate::{
	is_confusable,
	script::is_neutral,
	Script,
};
use serde::Serialize;
use spoofwatch_idn::{
	roundtrips,
	strip_prefix,
	to_unicode,
};
use std::fmt::Write;
use url::Url;



#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
/// # Punycode Status.
pub enum Punycode {
	/// # No `xn--` Labels.
	Absent,

	/// # Decoded and Round-Tripped.
	Valid,

	/// # Decoded, But Did Not Round-Trip.
	Invalid,

	/// # Could Not Be Decoded.
	Unparseable,
}

impl Punycode {
	#[must_use]
	/// # Is Bad?
	///
	/// Returns `true` for [`Punycode::Invalid`] and [`Punycode::Unparseable`].
	pub const fn is_bad(self) -> bool { matches!(self, Self::Invalid | Self::Unparseable) }
}



#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
/// # Suspicious Character.
pub struct SuspiciousCharacter {
	#[serde(rename = "char")]
	/// # The Character.
	pub ch: char,

	/// # Its Script.
	pub script: Script,

	/// # Zero-Based Character Position Within the Host.
	pub position: usize,

	/// # Surrounding Characters.
	///
	/// Up to three on either side.
	pub context: String,
}



#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
/// # Lexical Result.
pub struct LexicalResult {
	/// # More Than One Script?
	pub has_mixed_scripts: bool,

	/// # Scripts, In Order of Appearance.
	pub scripts: Vec<Script>,

	/// # Non-Latin Look-Alikes.
	pub suspicious_chars: Vec<SuspiciousCharacter>,

	/// # Human-Readable Summary.
	pub explanation: String,

	/// # Analyzed Host.
	///
	/// This is the Unicode form when Punycode decoding succeeded.
	pub host: String,

	/// # Punycode Status.
	pub punycode: Punycode,
}

impl LexicalResult {
	#[must_use]
	/// # Is Suspicious?
	///
	/// True if the host mixes scripts, contains non-Latin look-alikes, or
	/// carries Punycode that doesn't hold up.
	pub fn is_suspicious(&self) -> bool {
		self.has_mixed_scripts ||
		! self.suspicious_chars.is_empty() ||
		self.punycode.is_bad()
	}
}



#[must_use]
/// # Extract Host.
///
/// Parse the host out of a URL. Scheme-less input is retried as `http://`;
/// if nothing parses, the trimmed, lowercased input is returned as-is.
///
/// ## Examples
///
/// ```
/// use spoofwatch_core::extract_host;
///
/// assert_eq!(extract_host("https://Accounts.Google.com/x"), "accounts.google.com");
/// assert_eq!(extract_host("example.com:8080/path"), "example.com");
/// assert_eq!(extract_host("not a url"), "not a url");
/// ```
pub fn extract_host(src: &str) -> String {
	let src = src.trim();
	parse_host(src)
		.or_else(||
			if src.contains("://") { None }
			else { parse_host(&format!("http://{src}")) }
		)
		.unwrap_or_else(|| src.to_lowercase())
}

#[must_use]
/// # Analyze Lexical.
///
/// Inspect the host of a URL character by character.
///
/// Punycode labels are decoded first. A label that fails to decode
/// leaves the ASCII host in place and is flagged as unparseable; one that
/// decodes but doesn't re-encode to the same thing is flagged as invalid.
/// Either way the call itself never fails.
///
/// ## Examples
///
/// ```
/// use spoofwatch_core::{analyze_lexical, Script};
///
/// let res = analyze_lexical("xn--ggl-tdd6ba.com");
/// assert!(res.has_mixed_scripts);
/// assert_eq!(res.scripts, [Script::Latin, Script::Cyrillic]);
/// assert_eq!(res.suspicious_chars.len(), 3);
///
/// let res = analyze_lexical("https://example.com/");
/// assert!(! res.is_suspicious());
/// ```
pub fn analyze_lexical(src: &str) -> LexicalResult {
	let (host, punycode) = decode_host(extract_host(src));

	let chars: Vec<char> = host.chars().collect();
	let mut scripts: Vec<Script> = Vec::new();
	let mut suspicious_chars: Vec<SuspiciousCharacter> = Vec::new();
	for (position, ch) in chars.iter().copied().enumerate() {
		if is_neutral(ch) { continue; }

		let script = Script::from_char(ch);
		if ! script.is_unknown() && ! scripts.contains(&script) {
			scripts.push(script);
		}

		if script != Script::Latin && is_confusable(ch) {
			let start = position.saturating_sub(3);
			let end = chars.len().min(position + 4);
			suspicious_chars.push(SuspiciousCharacter {
				ch,
				script,
				position,
				context: chars[start..end].iter().collect(),
			});
		}
	}

	let has_mixed_scripts = 1 < scripts.len();
	let explanation = explain(&host, punycode, &scripts, &suspicious_chars);

	LexicalResult {
		has_mixed_scripts,
		scripts,
		suspicious_chars,
		explanation,
		host,
		punycode,
	}
}



/// # Parse Host.
fn parse_host(src: &str) -> Option<String> {
	Url::parse(src).ok()
		.and_then(|u| u.host_str().filter(|h| ! h.is_empty()).map(str::to_owned))
}

/// # Decode Host.
///
/// Decode any `xn--` labels, returning the host to analyze along with the
/// Punycode verdict.
fn decode_host(host: String) -> (String, Punycode) {
	if ! host.split('.').any(|l| strip_prefix(l).is_some()) {
		return (host, Punycode::Absent);
	}

	match to_unicode(&host) {
		Ok(decoded) => {
			let status =
				if host.split('.').filter_map(strip_prefix).all(roundtrips) { Punycode::Valid }
				else { Punycode::Invalid };
			(decoded, status)
		},
		Err(e) => {
			log::debug!("Unable to decode {host}: {e}");
			(host, Punycode::Unparseable)
		},
	}
}

/// # Build Explanation.
fn explain(
	host: &str,
	punycode: Punycode,
	scripts: &[Script],
	suspicious: &[SuspiciousCharacter],
) -> String {
	let mut out: Vec<String> = Vec::with_capacity(3);

	match punycode {
		Punycode::Invalid => out.push(
			"Invalid Punycode: the encoded labels do not round-trip, which can indicate a manipulated domain.".to_owned()
		),
		Punycode::Unparseable => out.push(
			"Malformed Punycode: the encoded labels could not be decoded.".to_owned()
		),
		Punycode::Valid => out.push(format!("Internationalized domain; decodes to \"{host}\".")),
		Punycode::Absent => {},
	}

	let mixed = 1 < scripts.len();
	if mixed {
		let list = scripts.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ");
		out.push(format!(
			"Mixed scripts detected ({list}); legitimate domains normally stick to one."
		));
	}

	if ! suspicious.is_empty() {
		let mut list = String::new();
		for (idx, s) in suspicious.iter().enumerate() {
			if idx != 0 { list.push_str(", "); }
			let _res = write!(list, "'{}' ({})", s.ch, s.script);
		}
		out.push(format!(
			"Look-alike characters detected: {list}. These can be used to imitate other domains."
		));
	}
	else if ! mixed {
		out.push(match scripts {
			[one] => format!("Domain uses only {one} characters; no lexical anomalies detected."),
			_ => "Domain uses only standard characters; no lexical anomalies detected.".to_owned(),
		});
	}

	out.join(" ")
}

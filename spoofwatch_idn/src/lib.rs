/*!
# Spoofwatch: IDN

This crate provides the string-level plumbing for [Spoofwatch](https://github.com/Blobfolio/spoofwatch): reducing arbitrary URL-ish input to a registrable domain, validating that domain, and a strict Punycode codec for the internationalized labels in between.

This is a judgey library. "Registrable" is decided against a short, curated list of compound suffixes (`com.br`, `co.uk`, …) rather than the full Public Suffix List; anything else keeps its last two labels.



## Examples

```
use spoofwatch_idn::{is_valid_domain, normalize_domain};

assert_eq!(normalize_domain("https://accounts.google.com/a/b?x=1#y"), "google.com");
assert_eq!(normalize_domain("HTTPS://Mail.Example.co.uk:8443/inbox"), "example.co.uk");
assert!(is_valid_domain("www.site.com.br/path"));
```
*/

#![deny(unsafe_code)]

#![warn(clippy::filetype_is_file)]
#![warn(clippy::integer_division)]
#![warn(clippy::needless_borrow)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::suboptimal_flops)]
#![warn(clippy::unneeded_field_pattern)]
#![warn(macro_use_extern_crate)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(non_ascii_idents)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_crate_dependencies)]
#![warn(unused_extern_crates)]
#![warn(unused_import_braces)]

#![allow(clippy::module_name_repetitions)]



mod puny;
mod tld;

pub use puny::{
	decode,
	encode,
	roundtrips,
	DecodeError,
};



/// # Punycode Prefix.
pub const PREFIX: &str = "xn--";



#[must_use]
/// # Normalize Domain.
///
/// Reduce a URL, host, or domain-ish string to its registrable domain:
///
/// 1. Trim and lowercase;
/// 2. Strip an `http://` or `https://` scheme, then a leading `www.`;
/// 3. Cut at the first `/`, `?`, or `#`, then at the first `:`;
/// 4. Keep the last three labels if the last two form a compound suffix,
///    otherwise the last two.
///
/// Inputs with fewer than two labels are returned as-are (post-cleanup).
/// This never fails, but it also doesn't validate anything; pair it with
/// [`is_valid_domain`] as needed.
///
/// ## Examples
///
/// ```
/// use spoofwatch_idn::normalize_domain;
///
/// assert_eq!(normalize_domain("mail.yahoo.com/inbox"), "yahoo.com");
/// assert_eq!(normalize_domain("subdomain.domain.co.uk"), "domain.co.uk");
/// assert_eq!(normalize_domain("localhost:8080"), "localhost");
/// ```
pub fn normalize_domain(src: &str) -> String {
	let host = src.trim().to_lowercase();
	let mut part = host.as_str();

	if let Some(rest) = part.strip_prefix("https://").or_else(|| part.strip_prefix("http://")) {
		part = rest;
	}
	if let Some(rest) = part.strip_prefix("www.") { part = rest; }
	if let Some(pos) = part.find(['/', '?', '#']) { part = &part[..pos]; }
	if let Some(pos) = part.find(':') { part = &part[..pos]; }

	registrable(part).to_owned()
}

#[must_use]
/// # Is Valid Domain?
///
/// Normalize the source, then make sure the result looks like an ASCII
/// domain: at least three bytes, at least one dot, and only
/// alphanumeric/hyphen labels that neither begin nor end with a hyphen.
///
/// ## Examples
///
/// ```
/// use spoofwatch_idn::is_valid_domain;
///
/// assert!(is_valid_domain("https://www.example.com/"));
/// assert!(is_valid_domain("xn--ggl-tdd6ba.com"));
/// assert!(! is_valid_domain("example"));
/// assert!(! is_valid_domain("exa_mple.com"));
/// ```
pub fn is_valid_domain(src: &str) -> bool { is_valid_normalized(&normalize_domain(src)) }

#[must_use]
/// # Is Known Domain?
///
/// Normalize the source, then check it against the built-in list of
/// well-known legitimate domains, either exactly or as a subdomain of one.
///
/// ## Examples
///
/// ```
/// use spoofwatch_idn::is_known_domain;
///
/// assert!(is_known_domain("https://accounts.google.com/signin"));
/// assert!(is_known_domain("itau.com.br"));
/// assert!(! is_known_domain("g00gle.com"));
/// ```
pub fn is_known_domain(src: &str) -> bool { tld::is_known(&normalize_domain(src)) }

#[must_use]
/// # Is URL Shortener?
///
/// Returns `true` if the host (minus any scheme, `www.`, path, or port)
/// belongs to a well-known link-shortening service.
///
/// ## Examples
///
/// ```
/// assert!(spoofwatch_idn::is_shortener("https://bit.ly/3xyz"));
/// assert!(! spoofwatch_idn::is_shortener("bitly.com"));
/// ```
pub fn is_shortener(src: &str) -> bool { tld::is_shortener(&normalize_domain(src)) }

#[must_use]
/// # Has Safe Suffix?
///
/// Returns `true` for institutional suffixes (`.gov`, `.edu`, `.ac.uk`, …)
/// that are not worth asking a reputation service about.
pub fn has_safe_suffix(src: &str) -> bool { tld::has_safe_suffix(&normalize_domain(src)) }

/// # To Unicode.
///
/// Decode each `xn--` label of a host, leaving the others alone.
///
/// ## Examples
///
/// ```
/// assert_eq!(
///     spoofwatch_idn::to_unicode("xn--fsq.xn--0zwm56d").unwrap(),
///     "\u{4f8b}.\u{6d4b}\u{8bd5}",
/// );
/// ```
///
/// ## Errors
///
/// If any label fails to decode, the first such error is returned.
pub fn to_unicode(host: &str) -> Result<String, DecodeError> {
	let mut out = String::with_capacity(host.len());
	for (idx, label) in host.split('.').enumerate() {
		if idx != 0 { out.push('.'); }
		match strip_prefix(label) {
			Some(ace) => out.push_str(&decode(ace)?),
			None => out.push_str(label),
		}
	}
	Ok(out)
}

#[must_use]
/// # To ASCII.
///
/// Encode each non-ASCII label of a host, prefixing the results with `xn--`.
/// ASCII labels pass through unchanged.
///
/// ## Examples
///
/// ```
/// assert_eq!(
///     spoofwatch_idn::to_ascii("g\u{43e}\u{43e}gl\u{435}.com"),
///     "xn--ggl-tdd6ba.com",
/// );
/// ```
pub fn to_ascii(host: &str) -> String {
	let mut out = String::with_capacity(host.len() + 8);
	for (idx, label) in host.split('.').enumerate() {
		if idx != 0 { out.push('.'); }
		if label.is_ascii() { out.push_str(label); }
		else {
			out.push_str(PREFIX);
			out.push_str(&encode(label));
		}
	}
	out
}

#[must_use]
/// # Strip ACE Prefix.
///
/// Return the part after a (case-insensitive) `xn--` prefix, if any.
pub fn strip_prefix(label: &str) -> Option<&str> {
	label.get(..PREFIX.len())
		.filter(|p| p.eq_ignore_ascii_case(PREFIX))
		.map(|_| &label[PREFIX.len()..])
}



/// # Registrable Part.
///
/// Keep the last two labels, or three when the last two form a compound
/// suffix. Labels are whatever falls between dots, empty or not.
fn registrable(host: &str) -> &str {
	let Some(last) = host.rfind('.') else { return host; };
	let Some(second) = host[..last].rfind('.') else { return host; };

	let cut =
		if tld::is_compound(&host[second + 1..]) { host[..second].rfind('.') }
		else { Some(second) };

	match cut {
		Some(idx) => &host[idx + 1..],
		None => host,
	}
}

/// # Is Valid (Already Normalized)?
fn is_valid_normalized(host: &str) -> bool {
	3 <= host.len() &&
	host.contains('.') &&
	host.split('.').all(|label| {
		let bytes = label.as_bytes();
		match (bytes.first(), bytes.last()) {
			(Some(first), Some(last)) =>
				first.is_ascii_alphanumeric() &&
				last.is_ascii_alphanumeric() &&
				bytes.iter().all(|b| b.is_ascii_alphanumeric() || b'-'.eq(b)),
			_ => false,
		}
	})
}



#[cfg(test)]
mod tests {
	use super::*;
	use brunch as _;

	#[test]
	fn t_normalize_domain() {
		for (raw, expected) in [
			("https://accounts.google.com/a/b?x=1#y", "google.com"),
			("www.site.com.br/path", "site.com.br"),
			("mail.yahoo.com/inbox", "yahoo.com"),
			("subdomain.domain.co.uk", "domain.co.uk"),
			("  HTTP://WWW.Example.COM:8080  ", "example.com"),
			("example.com?q=1", "example.com"),
			("example.com#frag", "example.com"),
			("HTTPS://Mail.Example.co.uk:8443/inbox", "example.co.uk"),
			("a.b.c.d.example.org", "example.org"),
			("gov.br", "gov.br"),
			("localhost", "localhost"),
			("", ""),
			("a..b", ".b"),
			("xn--ggl-tdd6ba.com", "xn--ggl-tdd6ba.com"),
		] {
			assert_eq!(normalize_domain(raw), expected, "Normalizing {raw:?} failed.");
		}
	}

	#[test]
	fn t_normalize_idempotent() {
		for raw in [
			"https://accounts.google.com/a/b?x=1#y",
			"www.site.com.br/path",
			"localhost",
			"a..b",
			"sub.domain.co.uk:443",
		] {
			let once = normalize_domain(raw);
			assert_eq!(normalize_domain(&once), once, "Normalizing {raw:?} is unstable.");
		}
	}

	#[test]
	fn t_is_valid_domain() {
		for raw in ["example.com", "a-b.co", "xn--n3h.com", "www.site.com.br/x", "123.45"] {
			assert!(is_valid_domain(raw), "{raw:?} should be valid.");
		}

		for raw in [
			"", "a.", ".a", "ab", "example", "-a.com", "a-.com", "a..b", "ex_ample.com",
			"g\u{43e}\u{43e}gl\u{435}.com",
		] {
			assert!(! is_valid_domain(raw), "{raw:?} should be invalid.");
		}
	}

	#[test]
	fn t_is_known_domain() {
		assert!(is_known_domain("google.com"));
		assert!(is_known_domain("https://mail.google.com/mail/u/0"));
		assert!(is_known_domain("WWW.PAYPAL.COM"));
		assert!(is_known_domain("shop.amazon.com.br"));
		assert!(is_known_domain("receita.fazenda.gov.br"));
		assert!(! is_known_domain("g00gle.com"));
		assert!(! is_known_domain("paypal.com.evil.net"));
		assert!(! is_known_domain("xn--ggl-tdd6ba.com"));
	}

	#[test]
	fn t_host_conversion() {
		for (ascii, unicode) in [
			("xn--ggl-tdd6ba.com", "g\u{43e}\u{43e}gl\u{435}.com"),
			("xn--n3h.com", "\u{2603}.com"),
			("xn--fsq.xn--0zwm56d", "\u{4f8b}.\u{6d4b}\u{8bd5}"),
			("www.xn--mnchen-3ya.de", "www.m\u{fc}nchen.de"),
			("plain.example.com", "plain.example.com"),
		] {
			assert_eq!(to_unicode(ascii).as_deref(), Ok(unicode));
			assert_eq!(to_ascii(unicode), ascii);
		}

		// Uppercase prefixes are still prefixes.
		assert_eq!(to_unicode("XN--N3H.com").as_deref(), Ok("\u{2603}.com"));

		assert!(to_unicode("xn--abc!.com").is_err());
	}

	#[test]
	fn t_unicode_roundtrip() {
		for host in [
			"g\u{43e}\u{43e}gl\u{435}.com",
			"\u{440}\u{443}\u{441}\u{441}\u{43a}\u{438}\u{439}.\u{440}\u{444}",
			"\u{3b1}\u{3b2}\u{3b3}.gr",
			"ma\u{f1}ana.com",
			"\u{d55c}\u{ad6d}.kr",
		] {
			assert_eq!(to_unicode(&to_ascii(host)).as_deref(), Ok(host));
		}
	}

	#[test]
	fn t_misc() {
		assert!(is_shortener("tinyurl.com/abc"));
		assert!(is_shortener("http://t.co/xyz"));
		assert!(! is_shortener("example.com"));

		assert!(has_safe_suffix("nasa.gov"));
		assert!(has_safe_suffix("https://www.ox.ac.uk/"));
		assert!(! has_safe_suffix("example.com"));

		assert_eq!(strip_prefix("xn--abc"), Some("abc"));
		assert_eq!(strip_prefix("XN--abc"), Some("abc"));
		assert_eq!(strip_prefix("xn-abc"), None);
		assert_eq!(strip_prefix("x"), None);
	}
}

/*!
# Spoofwatch IDN: Static Tables

All lists are kept in byte order so lookups can use a binary search.
*/



/// # Compound Suffixes.
///
/// Two-label public suffixes under which registrations happen at the third
/// level, e.g. `site.com.br`.
const COMPOUND: [&str; 23] = [
	"ac.in", "ac.uk",
	"co.in", "co.jp", "co.kr", "co.uk", "co.za",
	"com.ar", "com.au", "com.br", "com.mx", "com.my", "com.sg",
	"edu.br",
	"gov.br", "gov.in", "gov.uk",
	"mil.br",
	"net.br", "net.in",
	"org.br", "org.in", "org.uk",
];

/// # Known Domains.
///
/// Registrable domains that are treated as legitimate outright. Subdomains
/// of these inherit the status.
const KNOWN: [&str; 52] = [
	"amazon.com", "amazon.com.br", "americanas.com.br", "apple.com",
	"banrisul.com.br", "bb.com.br", "bootstrapcdn.com", "bradesco.com.br",
	"caixa.gov.br", "cloudflare.com", "cloudfront.net", "correios.com.br",
	"discord.com",
	"ebay.com",
	"facebook.com",
	"github.com", "gitlab.com", "globo.com", "gmail.com", "google.com",
	"googleapis.com", "googlemaps.com", "gov.br", "gstatic.com",
	"icloud.com", "ig.com.br", "instagram.com", "itau.com.br", "itunes.com",
	"jquery.com",
	"linkedin.com",
	"mercadolivre.com.br", "meta.com", "microsoft.com", "microsoftonline.com",
	"netflix.com",
	"office.com", "outlook.com",
	"paypal.com",
	"reddit.com",
	"santander.com.br", "sicoob.com.br", "sicredi.com.br", "spotify.com",
	"stackoverflow.com", "submarino.com.br",
	"terra.com.br", "twitter.com",
	"uol.com.br",
	"whatsapp.com", "wikipedia.org",
	"youtube.com",
];

/// # URL Shorteners.
const SHORTENERS: [&str; 7] = [
	"bit.ly", "buff.ly", "goo.gl", "is.gd", "ow.ly", "t.co", "tinyurl.com",
];

/// # Safe Suffixes.
///
/// Institutional suffixes that are not worth asking a reputation service
/// about. Each includes its leading dot.
const SAFE_SUFFIXES: [&str; 10] = [
	".ac.uk", ".edu", ".edu.au", ".edu.br", ".gov", ".gov.br", ".gov.uk",
	".mil", ".mil.br", ".org",
];



#[inline]
/// # Is Compound Suffix?
pub(super) fn is_compound(src: &str) -> bool { COMPOUND.binary_search(&src).is_ok() }

/// # Is Known?
///
/// Match exactly or as a subdomain of any entry.
pub(super) fn is_known(host: &str) -> bool { matches_list(&KNOWN, host) }

/// # Is Shortener?
pub(super) fn is_shortener(host: &str) -> bool { matches_list(&SHORTENERS, host) }

/// # Has Safe Suffix?
pub(super) fn has_safe_suffix(host: &str) -> bool {
	SAFE_SUFFIXES.iter().any(|s| host.ends_with(s))
}

/// # Match Exact or Parent.
///
/// Walk the host from the full value down through each parent, checking
/// each against the (sorted) list.
fn matches_list(list: &[&str], mut host: &str) -> bool {
	loop {
		if list.binary_search(&host).is_ok() { return true; }
		match host.split_once('.') {
			Some((_, rest)) if ! rest.is_empty() => { host = rest; },
			_ => return false,
		}
	}
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_sorted() {
		for list in [&COMPOUND[..], &KNOWN[..], &SHORTENERS[..], &SAFE_SUFFIXES[..]] {
			assert!(list.windows(2).all(|w| w[0] < w[1]), "List is unsorted or has dupes.");
		}
	}

	#[test]
	fn t_matches_list() {
		assert!(is_known("google.com"));
		assert!(is_known("mail.google.com"));
		assert!(is_known("a.b.caixa.gov.br"));
		assert!(! is_known("google.co"));
		assert!(! is_known("notgoogle.com"));
		assert!(! is_known("google.com.evil.com"));
		assert!(! is_known(""));

		assert!(is_shortener("bit.ly"));
		assert!(is_shortener("x.t.co"));
		assert!(! is_shortener("bitly.com"));
	}
}

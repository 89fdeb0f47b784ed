/*!
# Spoofwatch: Reputation Lookups
*/

use ahash::RandomState;
use crate::AHASH_STATE;
use lru::LruCache;
use serde_json::Value;
use spoofwatch_core::{
	extract_host,
	Reputation,
	ReputationCheck,
	SpoofError,
};
use spoofwatch_idn::{
	has_safe_suffix,
	is_known_domain,
};
use std::{
	num::NonZeroUsize,
	sync::Mutex,
	time::{
		Duration,
		Instant,
	},
};
use url::form_urlencoded::Serializer;



/// # Cache Lifetime.
const CACHE_TTL: Duration = Duration::from_secs(15 * 60);

/// # Cache Size.
const CACHE_MAX: NonZeroUsize = match NonZeroUsize::new(100) {
	Some(n) => n,
	None => NonZeroUsize::MIN,
};



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Reputation Service.
pub(super) enum Service {
	/// # PhishTank.
	PhishTank,

	/// # URLhaus.
	UrlHaus,
}

impl Service {
	/// # As Str.
	pub(super) const fn as_str(self) -> &'static str {
		match self {
			Self::PhishTank => "PhishTank",
			Self::UrlHaus => "URLhaus",
		}
	}

	/// # Endpoint.
	const fn endpoint(self) -> &'static str {
		match self {
			Self::PhishTank => "https://checkurl.phishtank.com/checkurl/",
			Self::UrlHaus => "https://urlhaus-api.abuse.ch/v1/url/",
		}
	}

	/// # Request Body.
	fn body(self, url: &str, key: Option<&str>) -> String {
		let mut out = Serializer::new(String::new());
		out.append_pair("url", url);
		if matches!(self, Self::PhishTank) {
			out.append_pair("format", "json");
			if let Some(key) = key { out.append_pair("app_key", key); }
		}
		out.finish()
	}

	/// # Fetch.
	///
	/// Post the query, returning the raw response body if the server
	/// answered with a non-error status.
	fn fetch(self, url: &str, key: Option<&str>, timeout: u64) -> Option<String> {
		let mut req = minreq::post(self.endpoint())
			.with_header("user-agent", concat!("spoofwatch/", env!("CARGO_PKG_VERSION")))
			.with_header("content-type", "application/x-www-form-urlencoded")
			.with_body(self.body(url, key))
			.with_timeout(timeout);

		// URLhaus wants its key as a header.
		if let (Self::UrlHaus, Some(key)) = (self, key) {
			req = req.with_header("auth-key", key);
		}

		let res = req.send().ok()?;
		if (200..=399).contains(&res.status_code) {
			res.as_str().ok().map(str::to_owned)
		}
		else {
			log::debug!("{} answered with HTTP {}.", self.as_str(), res.status_code);
			None
		}
	}

	/// # Parse Response.
	///
	/// Returns `None` if the response doesn't make sense.
	pub(super) fn parse(self, raw: &str) -> Option<Answer> {
		let raw: Value = serde_json::from_str(raw).ok()?;
		match self {
			Self::PhishTank => {
				let results = raw.get("results")?;
				let listed = results.get("in_database").and_then(Value::as_bool)?;
				let valid = results.get("valid").and_then(Value::as_bool).unwrap_or(false);
				if listed && valid {
					let id = results.get("phish_id")
						.map(|v| v.as_str().map_or_else(|| v.to_string(), str::to_owned))
						.unwrap_or_default();
					Some(Answer::Listed(format!("PhishTank lists this URL as phish #{id}.")))
				}
				else { Some(Answer::Clean) }
			},
			Self::UrlHaus => match raw.get("query_status").and_then(Value::as_str)? {
				"ok" => {
					let threat = raw.get("threat").and_then(Value::as_str).unwrap_or("malware");
					let tags = raw.get("tags")
						.and_then(Value::as_array)
						.map(|t| t.iter().filter_map(Value::as_str).collect::<Vec<_>>().join(", "))
						.unwrap_or_default();
					if tags.is_empty() {
						Some(Answer::Listed(format!("URLhaus lists this URL ({threat}).")))
					}
					else {
						Some(Answer::Listed(format!("URLhaus lists this URL ({threat}; {tags}).")))
					}
				},
				"no_results" => Some(Answer::Clean),
				_ => None,
			},
		}
	}
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Service Answer.
pub(super) enum Answer {
	/// # Not Listed.
	Clean,

	/// # Listed, With Details.
	Listed(String),
}



#[derive(Debug)]
/// # Result Cache.
///
/// Answers keyed by host. Reads only peek, so the oldest write is the
/// first to go.
struct Cache(LruCache<String, (Instant, Reputation), RandomState>);

impl Cache {
	/// # New.
	fn new() -> Self { Self(LruCache::with_hasher(CACHE_MAX, AHASH_STATE)) }

	/// # Get.
	fn get(&mut self, host: &str, now: Instant) -> Option<Reputation> {
		let (when, rep) = self.0.peek(host)?;
		if now.saturating_duration_since(*when) < CACHE_TTL { return Some(rep.clone()); }

		// Expired.
		self.0.pop(host);
		None
	}

	/// # Insert.
	fn insert(&mut self, host: String, rep: Reputation, now: Instant) {
		self.0.put(host, (now, rep));
	}
}



#[derive(Debug)]
/// # Lookup.
///
/// Query PhishTank, then URLhaus if PhishTank had nothing to say, with a
/// short-lived per-host cache in front.
pub(super) struct Lookup {
	phishtank_key: Option<String>,
	urlhaus_key: Option<String>,
	timeout: u64,
	retries: u8,
	cache: Mutex<Cache>,
}

impl Lookup {
	/// # New.
	pub(super) fn new(
		phishtank_key: Option<String>,
		urlhaus_key: Option<String>,
		timeout: u64,
		retries: u8,
	) -> Self {
		Self {
			phishtank_key,
			urlhaus_key,
			timeout: timeout.max(1),
			retries,
			cache: Mutex::new(Cache::new()),
		}
	}

	/// # Query One Service.
	///
	/// Try up to `retries + 1` times.
	fn query(&self, service: Service, url: &str) -> Option<Answer> {
		let key = match service {
			Service::PhishTank => self.phishtank_key.as_deref(),
			Service::UrlHaus => self.urlhaus_key.as_deref(),
		};

		for attempt in 0..=self.retries {
			if let Some(ans) = service.fetch(url, key, self.timeout).and_then(|raw| service.parse(&raw)) {
				return Some(ans);
			}
			log::debug!("{} attempt #{} failed for {url}.", service.as_str(), attempt + 1);
		}

		None
	}
}

impl ReputationCheck for Lookup {
	fn check(&self, url: &str) -> Result<Reputation, SpoofError> {
		let host = extract_host(url);
		if is_known_domain(&host) || has_safe_suffix(&host) {
			return Ok(Reputation::clean("Known-safe domain; lookup skipped."));
		}

		if let Some(rep) = self.cache.lock().ok().and_then(|mut c| c.get(&host, Instant::now())) {
			return Ok(rep);
		}

		let mut answered: Vec<&str> = Vec::new();
		let mut sources: Vec<String> = Vec::new();
		let mut details: Vec<String> = Vec::new();
		for service in [Service::PhishTank, Service::UrlHaus] {
			// One strike is enough.
			if ! sources.is_empty() { break; }

			match self.query(service, url) {
				Some(Answer::Clean) => { answered.push(service.as_str()); },
				Some(Answer::Listed(d)) => {
					answered.push(service.as_str());
					sources.push(service.as_str().to_owned());
					details.push(d);
				},
				None => log::warn!("{} is unavailable.", service.as_str()),
			}
		}

		if answered.is_empty() {
			return Err(SpoofError::Unavailable(String::from("PhishTank and URLhaus did not respond")));
		}

		let rep =
			if sources.is_empty() {
				Reputation::clean(format!("Not listed by {}.", answered.join(" or ")))
			}
			else { Reputation::dangerous(sources, details.join(" ")) };

		if let Ok(mut c) = self.cache.lock() { c.insert(host, rep.clone(), Instant::now()); }
		Ok(rep)
	}
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_parse_phishtank() {
		let s = Service::PhishTank;
		assert_eq!(
			s.parse(r#"{"results":{"url":"x","in_database":true,"phish_id":"123","valid":true}}"#),
			Some(Answer::Listed(String::from("PhishTank lists this URL as phish #123."))),
		);
		assert_eq!(
			s.parse(r#"{"results":{"url":"x","in_database":true,"phish_id":9,"valid":false}}"#),
			Some(Answer::Clean),
		);
		assert_eq!(s.parse(r#"{"results":{"url":"x","in_database":false}}"#), Some(Answer::Clean));
		assert_eq!(s.parse(r#"{"errortext":"nope"}"#), None);
		assert_eq!(s.parse("<html>"), None);
	}

	#[test]
	fn t_parse_urlhaus() {
		let s = Service::UrlHaus;
		assert_eq!(
			s.parse(r#"{"query_status":"ok","threat":"malware_download","tags":["elf","mozi"]}"#),
			Some(Answer::Listed(String::from("URLhaus lists this URL (malware_download; elf, mozi)."))),
		);
		assert_eq!(
			s.parse(r#"{"query_status":"ok","threat":"malware_download","tags":null}"#),
			Some(Answer::Listed(String::from("URLhaus lists this URL (malware_download)."))),
		);
		assert_eq!(s.parse(r#"{"query_status":"no_results"}"#), Some(Answer::Clean));
		assert_eq!(s.parse(r#"{"query_status":"invalid_url"}"#), None);
	}

	#[test]
	fn t_body() {
		assert_eq!(
			Service::PhishTank.body("https://a.com/?x=1&y=2", Some("k")),
			"url=https%3A%2F%2Fa.com%2F%3Fx%3D1%26y%3D2&format=json&app_key=k",
		);
		assert_eq!(Service::UrlHaus.body("http://a.com", Some("k")), "url=http%3A%2F%2Fa.com");
	}

	#[test]
	fn t_cache() {
		let mut cache = Cache::new();
		let now = Instant::now();

		cache.insert(String::from("a.com"), Reputation::clean("a"), now);
		assert_eq!(cache.get("a.com", now).map(|r| r.details), Some(String::from("a")));
		assert!(cache.get("b.com", now).is_none());

		// Expiration.
		assert!(cache.get("a.com", now + CACHE_TTL).is_none());
		assert!(cache.0.is_empty());

		// Eviction.
		for i in 0..=CACHE_MAX.get() {
			cache.insert(format!("{i}.com"), Reputation::clean(""), now);
		}
		assert_eq!(cache.0.len(), CACHE_MAX.get());
		assert!(cache.get("0.com", now).is_none());
		assert!(cache.get("1.com", now).is_some());
	}

	#[test]
	fn t_cache_fifo() {
		let mut cache = Cache::new();
		let now = Instant::now();
		for i in 0..CACHE_MAX.get() {
			cache.insert(format!("{i}.com"), Reputation::clean(""), now);
		}

		// Reading the oldest entry doesn't save it.
		assert!(cache.get("0.com", now).is_some());
		cache.insert(String::from("new.com"), Reputation::clean(""), now);
		assert!(cache.get("0.com", now).is_none());
		assert!(cache.get("new.com", now).is_some());

		// Rewriting does, and refreshes the answer.
		cache.insert(String::from("1.com"), Reputation::clean("again"), now);
		cache.insert(String::from("newer.com"), Reputation::clean(""), now);
		assert_eq!(cache.get("1.com", now).map(|r| r.details), Some(String::from("again")));
		assert!(cache.get("2.com", now).is_none());
	}

	#[test]
	fn t_known_skips_network() {
		// These never reach the network, so they work offline.
		let lookup = Lookup::new(None, None, 1, 0);
		for url in ["https://mail.google.com/", "https://www.nasa.gov/", "https://www.ox.ac.uk/"] {
			let rep = lookup.check(url).expect("Known domains should not fail.");
			assert!(! rep.is_dangerous);
		}
	}
}

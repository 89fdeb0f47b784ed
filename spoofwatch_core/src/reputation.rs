/*!
# Spoofwatch: Reputation

The engine doesn't talk to the network itself; reputation lookups come in
through [`ReputationCheck`].
*/

use crate::SpoofError;
use serde::Serialize;



#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
/// # Reputation.
pub struct Reputation {
	/// # Dangerous?
	pub is_dangerous: bool,

	/// # Sources That Flagged It.
	pub sources: Vec<String>,

	/// # Details.
	pub details: String,
}

impl Reputation {
	/// # Clean.
	pub fn clean<S>(details: S) -> Self
	where S: Into<String> {
		Self {
			is_dangerous: false,
			sources: Vec::new(),
			details: details.into(),
		}
	}

	/// # Dangerous.
	pub fn dangerous<S>(sources: Vec<String>, details: S) -> Self
	where S: Into<String> {
		Self {
			is_dangerous: true,
			sources,
			details: details.into(),
		}
	}
}



/// # Reputation Check.
///
/// Implementations should apply their own timeouts; the engine calls this
/// from multiple threads at once.
pub trait ReputationCheck: Send + Sync {
	/// # Check URL.
	///
	/// ## Errors
	///
	/// Return [`SpoofError::Unavailable`] if no answer could be had.
	fn check(&self, url: &str) -> Result<Reputation, SpoofError>;
}

/// # Reputation (Or Unavailable).
///
/// Run the check, logging and discarding any error.
pub fn reputation_or_unavailable(checker: &dyn ReputationCheck, url: &str) -> Option<Reputation> {
	match checker.check(url) {
		Ok(rep) => Some(rep),
		Err(e) => {
			log::warn!("Reputation lookup failed for {url}: {e}");
			None
		},
	}
}



#[cfg(test)]
mod tests {
	use super::*;

	/// # Always Fails.
	struct Offline;

	impl ReputationCheck for Offline {
		fn check(&self, _url: &str) -> Result<Reputation, SpoofError> {
			Err(SpoofError::Unavailable("test".to_owned()))
		}
	}

	/// # Flags Everything.
	struct Paranoid;

	impl ReputationCheck for Paranoid {
		fn check(&self, url: &str) -> Result<Reputation, SpoofError> {
			Ok(Reputation::dangerous(vec!["Paranoid".to_owned()], url))
		}
	}

	#[test]
	fn t_reputation_or_unavailable() {
		assert!(reputation_or_unavailable(&Offline, "https://example.com").is_none());

		let rep = reputation_or_unavailable(&Paranoid, "https://example.com")
			.expect("Missing reputation.");
		assert!(rep.is_dangerous);
		assert_eq!(rep.sources, ["Paranoid"]);
		assert_eq!(rep.details, "https://example.com");
	}
}

/*!
# Spoofwatch: Errors
*/

use std::{
	error::Error,
	fmt,
};



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Error.
pub enum SpoofError {
	/// # Corpus Is Empty.
	CorpusEmpty,

	/// # Corpus Could Not Be Parsed.
	CorpusParse(String),

	/// # Reputation Service Unavailable.
	Unavailable(String),
}

impl Error for SpoofError {}

impl fmt::Display for SpoofError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())?;
		match self {
			Self::CorpusParse(s) | Self::Unavailable(s) => write!(f, " ({s})"),
			Self::CorpusEmpty => Ok(()),
		}
	}
}

impl SpoofError {
	#[must_use]
	/// # As String Slice.
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::CorpusEmpty => "The legitimate-site corpus is empty.",
			Self::CorpusParse(_) => "Unable to parse the legitimate-site corpus.",
			Self::Unavailable(_) => "Reputation service unavailable.",
		}
	}
}

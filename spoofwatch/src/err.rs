/*!
# Spoofwatch: Errors
*/

use spoofwatch_core::SpoofError;
use std::{
	fmt,
	path::PathBuf,
};



#[derive(Debug, Clone)]
/// # Error.
pub(super) enum SpoofwatchError {
	/// # Invalid Configuration.
	Config(PathBuf),

	/// # Core Error.
	Core(SpoofError),

	/// # Invalid Corpus.
	Corpus(PathBuf),

	/// # Nothing to Check.
	NoUrls,

	/// # Read Issue.
	Read(String),

	/// # Bad Ignore Pattern.
	Regex(String),

	/// # Write Issue.
	Write(String),
}

impl std::error::Error for SpoofwatchError {}

impl From<SpoofError> for SpoofwatchError {
	#[inline]
	fn from(src: SpoofError) -> Self { Self::Core(src) }
}

impl fmt::Display for SpoofwatchError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())?;
		match self {
			Self::Config(p) | Self::Corpus(p) => write!(f, " \x1b[2m({})\x1b[0m", p.display()),
			Self::Core(e) => write!(f, " \x1b[2m({e})\x1b[0m"),
			Self::Read(s) | Self::Regex(s) | Self::Write(s) =>
				write!(f, " \x1b[2m({s})\x1b[0m"),
			Self::NoUrls => Ok(()),
		}
	}
}

impl SpoofwatchError {
	/// # As String Slice.
	pub(super) const fn as_str(&self) -> &'static str {
		match self {
			Self::Config(_) => "Invalid configuration.",
			Self::Core(_) => "Analysis setup failed.",
			Self::Corpus(_) => "Invalid legitimate-site corpus.",
			Self::NoUrls => "There are no URLs to check!",
			Self::Read(_) => "Unable to read file.",
			Self::Regex(_) => "Invalid ignore pattern.",
			Self::Write(_) => "Unable to write file.",
		}
	}
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_display() {
		assert_eq!(SpoofwatchError::NoUrls.to_string(), "There are no URLs to check!");
		assert_eq!(
			SpoofwatchError::Read(String::from("/tmp/x")).to_string(),
			"Unable to read file. \x1b[2m(/tmp/x)\x1b[0m",
		);
		assert!(
			SpoofwatchError::from(SpoofError::CorpusEmpty)
				.to_string()
				.contains("corpus is empty")
		);
	}
}

/*!
# Spoofwatch: Scripts
*/

use serde::{
	Serialize,
	Serializer,
};
use std::fmt;



/// # Script Ranges.
///
/// Order matters: the first range containing a code point wins.
const RANGES: &[(u32, u32, Script)] = &[
	(0x0000, 0x007F, Script::Latin),
	(0x0080, 0x00FF, Script::Latin),
	(0x0100, 0x017F, Script::Latin),
	(0x0180, 0x024F, Script::Latin),
	(0x1E00, 0x1EFF, Script::Latin),

	(0x0400, 0x04FF, Script::Cyrillic),
	(0x0500, 0x052F, Script::Cyrillic),
	(0x2DE0, 0x2DFF, Script::Cyrillic),
	(0xA640, 0xA69F, Script::Cyrillic),

	(0x0370, 0x03FF, Script::Greek),
	(0x1F00, 0x1FFF, Script::Greek),

	(0x0600, 0x06FF, Script::Arabic),
	(0x0750, 0x077F, Script::Arabic),
	(0x08A0, 0x08FF, Script::Arabic),
	(0xFB50, 0xFDFF, Script::Arabic),
	(0xFE70, 0xFEFF, Script::Arabic),

	(0x4E00, 0x9FFF, Script::Chinese),
	(0x3400, 0x4DBF, Script::Chinese),

	(0x3040, 0x309F, Script::Japanese),
	(0x30A0, 0x30FF, Script::Japanese),

	(0xAC00, 0xD7AF, Script::Korean),
	(0x1100, 0x11FF, Script::Korean),
	(0x3130, 0x318F, Script::Korean),

	(0x0E00, 0x0E7F, Script::Thai),

	(0x0590, 0x05FF, Script::Hebrew),
];



#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq, Ord, PartialOrd)]
/// # Writing System.
pub enum Script {
	/// # Latin (Including Extended Blocks).
	Latin,

	/// # Cyrillic.
	Cyrillic,

	/// # Greek.
	Greek,

	/// # Arabic.
	Arabic,

	/// # Chinese (CJK Ideographs).
	Chinese,

	/// # Japanese (Kana).
	Japanese,

	/// # Korean (Hangul).
	Korean,

	/// # Thai.
	Thai,

	/// # Hebrew.
	Hebrew,

	/// # None of the Above.
	Unknown,
}

impl fmt::Display for Script {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Serialize for Script {
	#[inline]
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where S: Serializer { serializer.serialize_str(self.as_str()) }
}

impl From<char> for Script {
	#[inline]
	fn from(src: char) -> Self { Self::from_char(src) }
}

impl Script {
	#[must_use]
	/// # From Character.
	///
	/// Classify a character by code point.
	///
	/// ## Examples
	///
	/// ```
	/// use spoofwatch_core::Script;
	///
	/// assert_eq!(Script::from_char('a'), Script::Latin);
	/// assert_eq!(Script::from_char('\u{43e}'), Script::Cyrillic);
	/// assert_eq!(Script::from_char('\u{2603}'), Script::Unknown);
	/// ```
	pub fn from_char(ch: char) -> Self {
		let cp = u32::from(ch);
		RANGES.iter()
			.find(|(lo, hi, _)| (*lo..=*hi).contains(&cp))
			.map_or(Self::Unknown, |(_, _, s)| *s)
	}

	#[must_use]
	/// # As String Slice.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Latin => "Latin",
			Self::Cyrillic => "Cyrillic",
			Self::Greek => "Greek",
			Self::Arabic => "Arabic",
			Self::Chinese => "Chinese",
			Self::Japanese => "Japanese",
			Self::Korean => "Korean",
			Self::Thai => "Thai",
			Self::Hebrew => "Hebrew",
			Self::Unknown => "Unknown",
		}
	}

	#[must_use]
	/// # Is Unknown?
	pub const fn is_unknown(self) -> bool { matches!(self, Self::Unknown) }
}



#[must_use]
/// # Is Neutral?
///
/// Dots, hyphens, underscores, and ASCII digits appear in hosts of every
/// script, so they don't count toward any.
pub const fn is_neutral(ch: char) -> bool {
	matches!(ch, '.' | '-' | '_' | '0'..='9')
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_from_char() {
		for (ch, expected) in [
			('a', Script::Latin),
			('Z', Script::Latin),
			('@', Script::Latin),
			('\u{e9}', Script::Latin),
			('\u{131}', Script::Latin),
			('\u{251}', Script::Latin),
			('\u{1e9e}', Script::Latin),
			('\u{430}', Script::Cyrillic),
			('\u{501}', Script::Cyrillic),
			('\u{a651}', Script::Cyrillic),
			('\u{3b1}', Script::Greek),
			('\u{1f00}', Script::Greek),
			('\u{627}', Script::Arabic),
			('\u{fe8d}', Script::Arabic),
			('\u{4f8b}', Script::Chinese),
			('\u{3400}', Script::Chinese),
			('\u{3042}', Script::Japanese),
			('\u{30a2}', Script::Japanese),
			('\u{d55c}', Script::Korean),
			('\u{e01}', Script::Thai),
			('\u{5d0}', Script::Hebrew),
			('\u{578}', Script::Unknown),
			('\u{2603}', Script::Unknown),
			('\u{1f600}', Script::Unknown),
		] {
			assert_eq!(Script::from_char(ch), expected, "Wrong script for {ch:?}.");
		}
	}

	#[test]
	fn t_is_neutral() {
		for ch in ['.', '-', '_', '0', '9'] { assert!(is_neutral(ch)); }
		for ch in ['a', '/', '\u{430}', '\u{2603}'] { assert!(! is_neutral(ch)); }
	}

	#[test]
	fn t_serialize() {
		assert_eq!(
			serde_json::to_string(&[Script::Latin, Script::Cyrillic]).expect("Serialize failed."),
			r#"["Latin","Cyrillic"]"#,
		);
	}
}

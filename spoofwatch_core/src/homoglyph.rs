/*!
# Spoofwatch: Homoglyphs
*/

use crate::Script;
use serde::Serialize;



/// # Confusables.
///
/// Characters that render (near-)identically to a lowercase Latin letter in
/// most hostname fonts. Sorted by code point.
const CONFUSABLES: [(char, char, &str); 39] = [
	('\u{131}', 'i', "LATIN SMALL LETTER DOTLESS I"),
	('\u{251}', 'a', "LATIN SMALL LETTER ALPHA"),

	('\u{3b1}', 'a', "GREEK SMALL LETTER ALPHA"),
	('\u{3b5}', 'e', "GREEK SMALL LETTER EPSILON"),
	('\u{3b9}', 'i', "GREEK SMALL LETTER IOTA"),
	('\u{3ba}', 'k', "GREEK SMALL LETTER KAPPA"),
	('\u{3bd}', 'v', "GREEK SMALL LETTER NU"),
	('\u{3bf}', 'o', "GREEK SMALL LETTER OMICRON"),
	('\u{3c1}', 'p', "GREEK SMALL LETTER RHO"),
	('\u{3c5}', 'u', "GREEK SMALL LETTER UPSILON"),
	('\u{3c7}', 'x', "GREEK SMALL LETTER CHI"),
	('\u{3f2}', 'c', "GREEK LUNATE SIGMA SYMBOL"),

	('\u{42c}', 'b', "CYRILLIC CAPITAL LETTER SOFT SIGN"),
	('\u{430}', 'a', "CYRILLIC SMALL LETTER A"),
	('\u{432}', 'v', "CYRILLIC SMALL LETTER VE"),
	('\u{433}', 'r', "CYRILLIC SMALL LETTER GHE"),
	('\u{435}', 'e', "CYRILLIC SMALL LETTER IE"),
	('\u{43a}', 'k', "CYRILLIC SMALL LETTER KA"),
	('\u{43c}', 'm', "CYRILLIC SMALL LETTER EM"),
	('\u{43d}', 'n', "CYRILLIC SMALL LETTER EN"),
	('\u{43e}', 'o', "CYRILLIC SMALL LETTER O"),
	('\u{440}', 'p', "CYRILLIC SMALL LETTER ER"),
	('\u{441}', 'c', "CYRILLIC SMALL LETTER ES"),
	('\u{442}', 't', "CYRILLIC SMALL LETTER TE"),
	('\u{443}', 'y', "CYRILLIC SMALL LETTER U"),
	('\u{445}', 'x', "CYRILLIC SMALL LETTER HA"),
	('\u{455}', 's', "CYRILLIC SMALL LETTER DZE"),
	('\u{456}', 'i', "CYRILLIC SMALL LETTER BYELORUSSIAN-UKRAINIAN I"),
	('\u{458}', 'j', "CYRILLIC SMALL LETTER JE"),
	('\u{4bb}', 'h', "CYRILLIC SMALL LETTER SHHA"),
	('\u{4cf}', 'l', "CYRILLIC SMALL LETTER PALOCHKA"),
	('\u{501}', 'd', "CYRILLIC SMALL LETTER KOMI DE"),
	('\u{51b}', 'q', "CYRILLIC SMALL LETTER QA"),
	('\u{51d}', 'w', "CYRILLIC SMALL LETTER WE"),

	('\u{570}', 'h', "ARMENIAN SMALL LETTER HO"),
	('\u{578}', 'n', "ARMENIAN SMALL LETTER VO"),
	('\u{57d}', 'u', "ARMENIAN SMALL LETTER SEH"),
	('\u{581}', 'g', "ARMENIAN SMALL LETTER CO"),
	('\u{585}', 'o', "ARMENIAN SMALL LETTER OH"),
];



#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
/// # Confusable Character.
pub struct Confusable {
	/// # The Character.
	pub ch: char,

	/// # What It Passes For.
	pub latin: char,

	/// # Unicode Name.
	pub name: &'static str,
}

impl Confusable {
	#[must_use]
	/// # Actual Script.
	///
	/// Note that a few confusables are themselves Latin.
	pub fn script(&self) -> Script { Script::from_char(self.ch) }
}



#[must_use]
/// # Look Up Confusable.
///
/// ## Examples
///
/// ```
/// let c = spoofwatch_core::confusable('\u{43e}').unwrap();
/// assert_eq!(c.latin, 'o');
/// assert_eq!(c.script(), spoofwatch_core::Script::Cyrillic);
///
/// assert!(spoofwatch_core::confusable('o').is_none());
/// ```
pub fn confusable(ch: char) -> Option<Confusable> {
	CONFUSABLES.binary_search_by_key(&ch, |(c, _, _)| *c)
		.ok()
		.map(|idx| {
			let (ch, latin, name) = CONFUSABLES[idx];
			Confusable { ch, latin, name }
		})
}

#[must_use]
#[inline]
/// # Is Confusable?
pub fn is_confusable(ch: char) -> bool {
	CONFUSABLES.binary_search_by_key(&ch, |(c, _, _)| *c).is_ok()
}

#[must_use]
/// # Skeleton.
///
/// Replace every confusable with its Latin twin, i.e. show what a string
/// _reads_ as.
///
/// ## Examples
///
/// ```
/// assert_eq!(
///     spoofwatch_core::skeleton("g\u{43e}\u{43e}gl\u{435}.com"),
///     "google.com",
/// );
/// ```
pub fn skeleton(src: &str) -> String {
	src.chars()
		.map(|c| confusable(c).map_or(c, |c| c.latin))
		.collect()
}

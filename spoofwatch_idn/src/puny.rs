/*!
# Spoofwatch IDN: Punycode

A strict [RFC 3492](https://www.rfc-editor.org/rfc/rfc3492) Bootstring codec.

This is a reworking of the punycode handling provided by the excellent [idna](https://github.com/servo/rust-url/) crate.

Decoding never panics; malformed labels are reported with a [`DecodeError`]
so callers can treat them as a signal rather than a crash. Encoding is total.

The original license:

Copyright 2016 The rust-url developers.

Licensed under the Apache License, Version 2.0 [LICENSE-APACHE](http://www.apache.org/licenses/LICENSE-2.0)
or the [MIT license](http://opensource.org/licenses/MIT) at your option.
This file may not be copied, modified, or distributed except according to
those terms.
*/

#![allow(clippy::integer_division)]

use std::{
	error::Error,
	fmt,
};



// Bootstring parameters for Punycode.
const BASE: u32 = 36;
const T_MIN: u32 = 1;
const T_MAX: u32 = 26;
const SKEW: u32 = 38;
const DAMP: u32 = 700;
const INITIAL_BIAS: u32 = 72;
const INITIAL_N: u32 = 0x80;
const DELIMITER: char = '-';



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Decode Error.
pub enum DecodeError {
	/// # Not a Base-36 Digit.
	BadDigit(char),

	/// # Decodes Outside the Unicode Range.
	InvalidCodePoint(u32),

	/// # Non-ASCII Basic Part.
	NonAsciiBasic,

	/// # Arithmetic Overflow.
	Overflow,

	/// # Input Ended Mid-Integer.
	Truncated,
}

impl Error for DecodeError {}

impl fmt::Display for DecodeError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())?;
		match self {
			Self::BadDigit(c) => write!(f, " ({c:?})"),
			Self::InvalidCodePoint(n) => write!(f, " (U+{n:04X})"),
			_ => Ok(()),
		}
	}
}

impl DecodeError {
	#[must_use]
	/// # As String Slice.
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::BadDigit(_) => "Invalid Punycode digit.",
			Self::InvalidCodePoint(_) => "Punycode decodes to an invalid code point.",
			Self::NonAsciiBasic => "Punycode basic part contains non-ASCII characters.",
			Self::Overflow => "Punycode integer overflow.",
			Self::Truncated => "Punycode input ended unexpectedly.",
		}
	}
}



/// # Decode Label.
///
/// Decode a single ACE label body, i.e. the part _after_ the `xn--` prefix.
/// Digits are matched case-insensitively.
///
/// ## Examples
///
/// ```
/// assert_eq!(
///     spoofwatch_idn::decode("ggl-tdd6ba").unwrap(),
///     "g\u{43e}\u{43e}gl\u{435}",
/// );
/// assert!(spoofwatch_idn::decode("a!").is_err());
/// ```
///
/// ## Errors
///
/// Returns an error if the label contains illegal digits, ends mid-integer,
/// overflows, or otherwise decodes to something that is not a valid string.
pub fn decode(input: &str) -> Result<String, DecodeError> {
	// Basic code points are copied as-are before the last delimiter.
	let (base, input) = match input.rfind(DELIMITER) {
		None => ("", input),
		Some(position) => (
			&input[..position],
			if position > 0 { &input[position + 1..] }
			else { input },
		),
	};

	if ! base.is_ascii() { return Err(DecodeError::NonAsciiBasic); }

	let mut out: Vec<char> = base.chars().collect();
	let mut code_point = INITIAL_N;
	let mut bias = INITIAL_BIAS;
	let mut i: u32 = 0;
	let mut iter = input.chars().peekable();
	while iter.peek().is_some() {
		let previous_i = i;
		let mut weight: u32 = 1;
		let mut k = BASE;

		// Decode a generalized variable-length integer into delta, which gets
		// added to i.
		loop {
			let c = iter.next().ok_or(DecodeError::Truncated)?;
			let digit = digit_to_value(c).ok_or(DecodeError::BadDigit(c))?;

			i = digit.checked_mul(weight)
				.and_then(|d| i.checked_add(d))
				.ok_or(DecodeError::Overflow)?;

			let t = threshold(k, bias);
			if digit < t { break; }

			weight = weight.checked_mul(BASE - t).ok_or(DecodeError::Overflow)?;
			k += BASE;
		}

		let length = u32::try_from(out.len() + 1).map_err(|_| DecodeError::Overflow)?;
		bias = adapt(i - previous_i, length, previous_i == 0);

		code_point = code_point.checked_add(i / length).ok_or(DecodeError::Overflow)?;
		i %= length;

		let c = char::from_u32(code_point)
			.ok_or(DecodeError::InvalidCodePoint(code_point))?;
		out.insert(i as usize, c);
		i += 1;
	}

	Ok(out.into_iter().collect())
}

#[must_use]
/// # Encode Label.
///
/// Return the ACE body for a label (without the `xn--` prefix). Labels that
/// are already pure ASCII are returned unchanged, with no trailing delimiter.
///
/// ## Examples
///
/// ```
/// assert_eq!(spoofwatch_idn::encode("\u{2603}"), "n3h");
/// assert_eq!(spoofwatch_idn::encode("google"), "google");
/// ```
pub fn encode(input: &str) -> String {
	if input.is_ascii() { return input.to_owned(); }

	let mut out = String::with_capacity(input.len() + 8);
	encode_into(input, &mut out);
	out
}

#[must_use]
/// # Round Trip?
///
/// Decode an ACE body and re-encode the result, returning `true` if the two
/// agree (ignoring case). Labels that fail to decode return `false`.
///
/// Well-formed Punycode always survives the trip; labels that don't can be
/// the product of an encoder playing games. An empty body (a bare `xn--`)
/// encodes nothing, so it never counts.
pub fn roundtrips(input: &str) -> bool {
	! input.is_empty() &&
	decode(input).is_ok_and(|dec| encode(&dec).eq_ignore_ascii_case(input))
}

#[allow(clippy::cast_possible_truncation)] // Code points are u32.
/// # Encode Into.
///
/// All arithmetic is done in `u64`; even the largest code point multiplied
/// by a label far longer than DNS permits cannot overflow it.
fn encode_into(input: &str, output: &mut String) {
	let mut input_length: u64 = 0;
	let mut basic_length: u64 = 0;
	for c in input.chars() {
		input_length += 1;
		if c.is_ascii() {
			output.push(c);
			basic_length += 1;
		}
	}

	if basic_length > 0 { output.push(DELIMITER); }

	let mut code_point = u64::from(INITIAL_N);
	let mut delta: u64 = 0;
	let mut bias = INITIAL_BIAS;
	let mut processed = basic_length;
	while processed < input_length {
		// Find the next largest code point. There will always be one while
		// unprocessed characters remain.
		let Some(min_code_point) = input.chars()
			.map(|c| u64::from(u32::from(c)))
			.filter(|&c| c >= code_point)
			.min()
		else { break; };

		// Advance the decoder's <code_point,i> state to <min_code_point,0>.
		delta += (min_code_point - code_point) * (processed + 1);
		code_point = min_code_point;

		for c in input.chars().map(|c| u64::from(u32::from(c))) {
			if c < code_point { delta += 1; }
			else if c == code_point {
				// Represent delta as a generalized variable-length integer.
				let mut q = delta;
				let mut k = BASE;
				loop {
					let t = u64::from(threshold(k, bias));
					if q < t { break; }

					let base_t = u64::from(BASE) - t;
					output.push(value_to_digit((t + (q - t) % base_t) as u32));
					q = (q - t) / base_t;
					k += BASE;
				}
				output.push(value_to_digit(q as u32));

				bias = adapt_wide(delta, processed + 1, processed == basic_length);
				delta = 0;
				processed += 1;
			}
		}

		delta += 1;
		code_point += 1;
	}
}



#[inline]
/// # Bias Adaptation.
fn adapt(delta: u32, num_points: u32, first_time: bool) -> u32 {
	adapt_wide(u64::from(delta), u64::from(num_points), first_time)
}

#[allow(clippy::cast_possible_truncation)] // The result never exceeds a few hundred.
/// # Bias Adaptation (Wide).
fn adapt_wide(mut delta: u64, num_points: u64, first_time: bool) -> u32 {
	let base = u64::from(BASE);
	let t_min = u64::from(T_MIN);
	delta /= if first_time { u64::from(DAMP) } else { 2 };
	delta += delta / num_points;
	let mut k = 0;
	while delta > ((base - t_min) * u64::from(T_MAX)) / 2 {
		delta /= base - t_min;
		k += base;
	}
	(k + (((base - t_min + 1) * delta) / (delta + u64::from(SKEW)))) as u32
}

#[inline]
/// # Digit Threshold.
const fn threshold(k: u32, bias: u32) -> u32 {
	if k <= bias { T_MIN }
	else if k >= bias + T_MAX { T_MAX }
	else { k - bias }
}

#[inline]
/// # Digit to Value.
const fn digit_to_value(c: char) -> Option<u32> {
	match c {
		'0'..='9' => Some(c as u32 - '0' as u32 + 26),
		'A'..='Z' => Some(c as u32 - 'A' as u32),
		'a'..='z' => Some(c as u32 - 'a' as u32),
		_ => None,
	}
}

#[allow(clippy::cast_possible_truncation)] // Values are always < 36.
#[inline]
/// # Value to Digit.
const fn value_to_digit(value: u32) -> char {
	if value < 26 { (value as u8 + b'a') as char }
	else { (value as u8 - 26 + b'0') as char }
}

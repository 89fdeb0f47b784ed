/*!
# Spoofwatch: Reporting
*/

use crate::SpoofwatchError;
use dactyl::NiceU64;
use fyi_msg::Msg;
use serde::Serialize;
use spoofwatch_core::{
	Assessment,
	Level,
};
use std::{
	fmt::Write,
	path::Path,
};
use utc2k::FmtUtc2k;



#[derive(Debug, Serialize)]
/// # Report.
pub(super) struct Report<'a> {
	/// # Generated (UTC).
	generated: String,

	/// # Total URLs.
	total: usize,

	/// # Level 2 Count.
	suspicious: usize,

	/// # Level 3 Count.
	dangerous: usize,

	/// # The Answers.
	results: &'a [Assessment],
}

impl<'a> Report<'a> {
	/// # New.
	pub(super) fn new(results: &'a [Assessment]) -> Self {
		let suspicious = results.iter().filter(|r| r.level == Level::Suspicious).count();
		let dangerous = results.iter().filter(|r| r.level == Level::Dangerous).count();
		Self {
			generated: FmtUtc2k::now().to_string(),
			total: results.len(),
			suspicious,
			dangerous,
			results,
		}
	}

	/// # Worst Level.
	pub(super) fn worst(&self) -> Level {
		self.results.iter().map(|r| r.level).max().unwrap_or_default()
	}

	/// # JSON.
	pub(super) fn json(&self) -> Result<String, SpoofwatchError> {
		serde_json::to_string_pretty(self)
			.map_err(|e| SpoofwatchError::Write(e.to_string()))
	}

	/// # Plain Text.
	///
	/// One block per URL: the verdict line, then any issues indented
	/// beneath it.
	pub(super) fn text(&self) -> String {
		let mut out = String::new();
		for res in self.results {
			let _res = writeln!(out, "{}", verdict_msg(res));
			for issue in &res.issues {
				let _res = writeln!(
					out,
					"    \x1b[2m[{}]\x1b[0m {}: {}",
					issue.severity,
					issue.description,
					issue.details,
				);
			}
		}

		out
	}

	/// # Summary.
	pub(super) fn summary(&self) -> Msg {
		let msg = format!(
			"{} checked; {} suspicious, {} dangerous.",
			plural(self.total, "URL", "URLs"),
			NiceU64::from(self.suspicious).as_str(),
			NiceU64::from(self.dangerous).as_str(),
		);

		match self.worst() {
			Level::NotSuspicious => Msg::success(msg),
			Level::Suspicious => Msg::warning(msg),
			Level::Dangerous => Msg::error(msg),
		}
		.with_newline(true)
	}
}



/// # Verdict Message.
fn verdict_msg(res: &Assessment) -> Msg {
	let msg = format!("{} \x1b[2m({})\x1b[0m", res.url, res.level);
	match res.level {
		Level::NotSuspicious => Msg::success(msg),
		Level::Suspicious => Msg::warning(msg),
		Level::Dangerous => Msg::error(msg),
	}
}

/// # Nice Plural.
fn plural(num: usize, one: &str, many: &str) -> String {
	format!(
		"{} {}",
		NiceU64::from(num).as_str(),
		if num == 1 { one } else { many },
	)
}

/// # Write to File.
pub(super) fn write_to_file(dst: &Path, data: &str) -> Result<(), SpoofwatchError> {
	write_atomic::write_file(dst, data.as_bytes())
		.map_err(|_| SpoofwatchError::Write(dst.to_string_lossy().into_owned()))
}

/*!
# Benchmark: `spoofwatch_idn::normalize_domain`
*/

use brunch::{
	Bench,
	benches,
};
use spoofwatch_idn::{
	is_known_domain,
	is_valid_domain,
	normalize_domain,
};

benches!(
	Bench::new("spoofwatch_idn::normalize_domain(blobfolio.com)")
		.run(|| normalize_domain("blobfolio.com")),

	Bench::new("spoofwatch_idn::normalize_domain(https://accounts.google.com/a/b?x=1#y)")
		.run(|| normalize_domain("https://accounts.google.com/a/b?x=1#y")),

	Bench::new("spoofwatch_idn::normalize_domain(www.site.com.br/path)")
		.run(|| normalize_domain("www.site.com.br/path")),

	Bench::spacer(),

	Bench::new("spoofwatch_idn::is_valid_domain(another.sub.domain.blobfolio.com)")
		.run(|| is_valid_domain("another.sub.domain.blobfolio.com")),

	Bench::new("spoofwatch_idn::is_known_domain(https://mail.google.com/mail/u/0)")
		.run(|| is_known_domain("https://mail.google.com/mail/u/0")),
);

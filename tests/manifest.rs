//! Guards on the dependency setup the browser build relies on.

const MANIFEST: &str = include_str!("../Cargo.toml");

#[test]
fn rand_does_not_pull_an_os_entropy_backend() {
	let rand_line = MANIFEST
		.lines()
		.find(|l| l.trim_start().starts_with("rand ="))
		.expect("rand dependency declared");
	assert!(rand_line.contains("default-features = false"));
	assert!(rand_line.contains("\"std_rng\""));
	// `std` and `getrandom` both enable getrandom, which needs a js backend on wasm32.
	assert!(!rand_line.contains("\"std\""));
	assert!(!rand_line.contains("getrandom"));
}

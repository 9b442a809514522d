use std::{fs, path::Path};

use cyan::{BufferConsole, Cyan};

/// Run a script file and collect what it printed, followed by the rendered
/// error if it failed.
fn run_script(path: &Path) -> String {
	let mut cyan = Cyan::with_console(BufferConsole::new());
	let result = cyan.run_file(path);
	let mut output = cyan.console_mut().take_output();
	if let Err(e) = result {
		output.push_str(&e.to_display_string());
		output.push('\n');
	}
	output
}

#[test]
fn test_cyan_scripts() {
	// Relative to the package root, so paths in tracebacks stay stable.
	let directory = Path::new("tests").join("scripts");
	let mut scripts: Vec<_> = fs::read_dir(&directory)
		.unwrap()
		.map(|entry| entry.unwrap().path())
		.filter(|path| path.extension().is_some_and(|extension| extension == "cyan"))
		.collect();
	scripts.sort();
	assert!(!scripts.is_empty());

	for script in scripts {
		let expected = fs::read_to_string(script.with_extension("out")).unwrap();
		assert_eq!(run_script(&script), expected, "{}", script.display());
	}
}

#[test]
fn test_missing_file() {
	let error = run_script(Path::new("tests/scripts/missing.cyan"));
	assert!(error.starts_with("InternalError: Failed open source file tests/scripts/missing.cyan"), "{error}");
}

use std::{fs, path::Path};

use core_interp::{config::Config, interpret};
use walkdir::WalkDir;

fn read_sibling(path: &Path, extension: &str) -> Option<String> {
    fs::read_to_string(path.with_extension(extension)).ok()
}

#[test]
fn golden_programs_match() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/programs").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "core"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let data = read_sibling(path, "data").unwrap_or_default();

        let mut out = Vec::new();
        let result = interpret(&source, data.as_bytes(), &mut out, &Config::default());
        let out = String::from_utf8(out).expect("output is UTF-8");

        match (read_sibling(path, "out"), read_sibling(path, "err")) {
            (Some(expected), None) => {
                if let Err(e) = result {
                    panic!("{path:?} failed: {e}");
                }
                assert_eq!(out, expected, "wrong output for {path:?}");
            },
            (None, Some(expected)) => {
                let Err(e) = result else {
                    panic!("{path:?} succeeded but was expected to fail");
                };
                assert!(e.to_string().contains(expected.trim()),
                        "{path:?}: expected {:?}, got {:?}",
                        expected.trim(),
                        e.to_string());
            },
            _ => panic!("{path:?} needs exactly one of a .out or a .err file"),
        }
        count += 1;
    }

    assert!(count > 0, "No programs found in tests/programs");
}

extern crate libtest_mimic;

use std::error::Error;
use std::path::{Path, PathBuf};
use std::{fs, io};

use libtest_mimic::{Arguments, Failed, Trial};
use yamlet_core::Parser;
use yamlet_test_bench::write_event;

const TEST_SIZE: usize = 440;

#[derive(Default)]
struct TestData {
    desc: String,
    input_yaml: PathBuf,
    is_error: bool,
    test_event: PathBuf,
}

fn perform_test(data: TestData) -> Result<(), Failed> {
    let input_yaml = fs::read_to_string(&data.input_yaml)?;
    let mut actual_event = String::with_capacity(input_yaml.len());
    let mut is_error = false;
    for res in Parser::new_from_str(&input_yaml) {
        match res {
            Ok((ev, _)) => {
                write_event(&mut actual_event, &ev);
                actual_event.push('\n');
            }
            Err(_) => {
                is_error = true;
                break;
            }
        }
    }

    if is_error || data.is_error {
        if is_error != data.is_error {
            return Err(format!("expected error: {}, got error: {is_error}", data.is_error).into());
        }
        return Ok(());
    }

    let expected_event = adjusted_test_event(&data.test_event)?;
    if actual_event != expected_event {
        return Err(format!("expected:\n{expected_event}\ngot:\n{actual_event}").into());
    }
    Ok(())
}

/// Event files mark explicit documents and flow collections, the rendered events do not.
fn adjusted_test_event(path: &Path) -> io::Result<String> {
    let transform_events = fs::read_to_string(path)?
        .replace("+DOC ---", "+DOC")
        .replace("-DOC ...", "-DOC")
        .replace("+MAP {}", "+MAP")
        .replace("+SEQ []", "+SEQ");
    Ok(transform_events)
}

/// The reader only speaks YAML 1.1, documents declaring another version are skipped.
fn is_other_version(path: &Path) -> bool {
    fs::read_to_string(path)
        .map(|input| input.lines().any(|line| line.starts_with("%YAML") && !line.contains("1.1")))
        .unwrap_or(false)
}

fn collect_test_suite(
    path: &Path,
    ignore_list: &[&str],
    tests: &mut Vec<Trial>,
) -> Result<(), Box<dyn Error>> {
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let dir_name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type()?.is_dir() && !ignore_list.contains(&dir_name.as_str()) {
            collect_test(dir_name, &entry.path(), ignore_list, tests)?;
        }
    }
    Ok(())
}

fn collect_test(
    dir_name: String,
    test_dir_path: &Path,
    ignore_list: &[&str],
    tests: &mut Vec<Trial>,
) -> Result<(), Box<dyn Error>> {
    let mut test_data = TestData::default();
    let mut is_dir = false;
    for entry in fs::read_dir(test_dir_path)? {
        let entry = entry?;
        let filename = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type()?.is_dir() {
            if !ignore_list.contains(&filename.as_str()) {
                let dir_name = format!("{dir_name}/{filename}");
                collect_test(dir_name, &entry.path(), ignore_list, tests)?;
                is_dir = true;
            }
            continue;
        }
        match filename.as_str() {
            "===" => {
                if let Ok(desc) = fs::read_to_string(entry.path()) {
                    test_data.desc = desc.trim().to_string();
                }
            }
            "in.yaml" => test_data.input_yaml = entry.path(),
            "error" => test_data.is_error = true,
            "test.event" => test_data.test_event = entry.path(),
            _ => {}
        }
    }

    if !is_dir && test_data.input_yaml.is_file() {
        let ignored = is_other_version(&test_data.input_yaml);
        let name = format!("{} ({})", dir_name, test_data.desc);
        let test = Trial::test(name, move || perform_test(test_data)).with_ignored_flag(ignored);
        tests.push(test);
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Arguments::from_args();
    let ignore_list = [".git", "name", "tags"];

    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("yaml-test-suite");

    let mut tests = Vec::with_capacity(TEST_SIZE);
    if path.is_dir() {
        collect_test_suite(&path, &ignore_list, &mut tests)?;
    }

    libtest_mimic::run(&args, tests).exit();
}

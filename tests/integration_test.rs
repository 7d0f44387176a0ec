// Integration tests for the gocluster binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const ABC: &str = "A B 0.9\nA C 0.1\nB C 0.2\n";

fn gocluster(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_gocluster"))
		.args(args)
		.env("NO_COLOR", "1")
		.env_remove("GOCLUSTER_DEADLINE_SECS")
		.output()
		.expect("Failed to run gocluster")
}

fn write_input(dir: &Path, name: &str, contents: &str) -> String {
	let path = dir.join(name);
	fs::write(&path, contents).unwrap();
	path.to_string_lossy().into_owned()
}

/// (term, label, is_medoid) per report line
fn parse_report(text: &str) -> Vec<(String, usize, bool)> {
	text.lines()
		.map(|line| {
			let fields: Vec<&str> = line.split('\t').collect();
			assert_eq!(fields.len(), 3, "bad report line: {:?}", line);
			let flag = match fields[2] {
				"True" => true,
				"False" => false,
				other => panic!("unexpected medoid flag {:?}", other),
			};
			(fields[0].to_string(), fields[1].parse().unwrap(), flag)
		})
		.collect()
}

fn assert_abc_grouping(report: &[(String, usize, bool)]) {
	let terms: Vec<&str> = report.iter().map(|(t, _, _)| t.as_str()).collect();
	assert_eq!(terms, vec!["A", "B", "C"]);
	assert_eq!(report[0].1, report[1].1);
	assert_ne!(report[0].1, report[2].1);
	assert!(report[2].2, "singleton C must be its own medoid");
	assert_eq!(report.iter().filter(|r| r.2).count(), 2);
}

#[test]
fn test_help_display() {
	let output = gocluster(&["--help"]);
	assert!(output.status.success(), "Help command failed");

	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("embed") && stdout.contains("cluster") && stdout.contains("run"));
}

#[test]
fn test_version_display() {
	let output = gocluster(&["--version"]);
	assert!(output.status.success(), "Version command failed");

	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("gocluster"), "Expected 'gocluster' in version output");
}

#[test]
fn test_run_without_embedding_to_stdout() {
	let dir = tempfile::tempdir().unwrap();
	let input = write_input(dir.path(), "sims.txt", ABC);

	let output = gocluster(&["run", "-i", &input, "--no-embed", "-k", "2", "--affinity", "global"]);
	assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

	assert_abc_grouping(&parse_report(&String::from_utf8_lossy(&output.stdout)));
}

#[test]
fn test_run_writes_report_and_export() {
	let dir = tempfile::tempdir().unwrap();
	let input = write_input(dir.path(), "sims.txt", ABC);
	let report_path = dir.path().join("clusters.tsv");
	let export_path = dir.path().join("clusters.json");

	let output = gocluster(&[
		"run",
		"-i",
		&input,
		"-o",
		report_path.to_str().unwrap(),
		"--export",
		export_path.to_str().unwrap(),
		"-k",
		"2",
		"--affinity",
		"global",
	]);
	assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

	assert_abc_grouping(&parse_report(&fs::read_to_string(&report_path).unwrap()));

	let export: serde_json::Value = serde_json::from_str(&fs::read_to_string(&export_path).unwrap()).unwrap();
	assert_eq!(export["total_terms"], 3);
	assert_eq!(export["clusters"].as_array().unwrap().len(), 2);
	assert_eq!(export["params"]["affinity"], "global");
}

#[test]
fn test_embed_then_cluster() {
	let dir = tempfile::tempdir().unwrap();
	let input = write_input(dir.path(), "sims.txt", ABC);
	let coords_path = dir.path().join("coords.tsv");

	let output = gocluster(&["embed", "-i", &input, "-o", coords_path.to_str().unwrap()]);
	assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

	let coords = fs::read_to_string(&coords_path).unwrap();
	assert_eq!(coords.lines().count(), 3);
	for line in coords.lines() {
		let fields: Vec<&str> = line.split('\t').collect();
		assert_eq!(fields.len(), 3);
		for value in &fields[1..] {
			let decimals = value.split('.').nth(1).map_or(0, str::len);
			assert_eq!(decimals, 3, "coordinate {:?} is not written with 3 decimals", value);
		}
	}

	let output = gocluster(&[
		"cluster",
		"-i",
		coords_path.to_str().unwrap(),
		"-k",
		"2",
		"--affinity",
		"global",
	]);
	assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
	assert_abc_grouping(&parse_report(&String::from_utf8_lossy(&output.stdout)));
}

#[test]
fn test_malformed_input_fails_with_diagnostic() {
	let dir = tempfile::tempdir().unwrap();
	let input = write_input(dir.path(), "sims.txt", "A B 0.9\nA C\n");
	let report_path = dir.path().join("clusters.tsv");

	let output = gocluster(&["run", "-i", &input, "-o", report_path.to_str().unwrap()]);
	assert!(!output.status.success());

	let stderr = String::from_utf8_lossy(&output.stderr);
	let diagnostic = stderr.lines().find(|l| l.contains("malformed input")).expect("no diagnostic line");
	assert!(diagnostic.contains("line 2"));
	assert!(!report_path.exists(), "no report may be written on failure");
}

#[test]
fn test_cluster_count_above_terms_fails() {
	let dir = tempfile::tempdir().unwrap();
	let input = write_input(dir.path(), "sims.txt", ABC);

	let output = gocluster(&["run", "-i", &input, "-k", "4"]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("dimension mismatch"));
}

#[test]
fn test_missing_pair_is_rejected() {
	let dir = tempfile::tempdir().unwrap();
	let input = write_input(dir.path(), "sims.txt", "A B 0.9\nA C 0.1\n");

	let output = gocluster(&["run", "-i", &input, "--no-embed", "-k", "2"]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("distance matrix"));
}

// Library-level tests for the clustering pipeline

use gocluster::core::SimilarityRecord;
use gocluster::{AffinityMode, Pipeline, PipelineConfig};

/// Three groups of four GO terms: 0.9 similar inside a group, 0.05 across
fn three_groups() -> Vec<SimilarityRecord> {
	let terms: Vec<String> = (0..12).map(|i| format!("GO:{:07}", 1000 + i)).collect();
	let mut records = Vec::new();
	for i in 0..terms.len() {
		for j in (i + 1)..terms.len() {
			let similarity = if i / 4 == j / 4 { 0.9 } else { 0.05 };
			records.push(SimilarityRecord::new(terms[i].as_str(), terms[j].as_str(), similarity));
		}
	}
	records
}

fn assert_three_groups(labels: &[usize]) {
	for group in labels.chunks(4) {
		assert!(group.iter().all(|&l| l == group[0]), "group split: {:?}", labels);
	}
	assert_ne!(labels[0], labels[4]);
	assert_ne!(labels[0], labels[8]);
	assert_ne!(labels[4], labels[8]);
}

#[test]
fn test_auto_count_finds_three_groups_on_raw_distances() {
	let config = PipelineConfig {
		affinity: AffinityMode::Global,
		embed: false,
		..PipelineConfig::default()
	};
	let report = Pipeline::new(config).run(&three_groups()).unwrap();

	assert_eq!(report.n_clusters, 3);
	assert_three_groups(&report.labels);
	assert_eq!(report.medoid_flags.iter().filter(|&&m| m).count(), 3);
}

#[test]
fn test_auto_count_finds_three_groups_after_embedding() {
	let report = Pipeline::default().run(&three_groups()).unwrap();

	assert_eq!(report.n_clusters, 3);
	assert_three_groups(&report.labels);
}

#[test]
fn test_medoid_belongs_to_its_cluster() {
	let report = Pipeline::new(PipelineConfig {
		clusters: Some(3),
		..PipelineConfig::default()
	})
	.run(&three_groups())
	.unwrap();

	for cluster in &report.clusters {
		assert!(cluster.members.contains(&cluster.medoid));
		assert_eq!(report.clusters.iter().filter(|c| c.medoid == cluster.medoid).count(), 1);
	}
	let total: usize = report.clusters.iter().map(|c| c.members.len()).sum();
	assert_eq!(total, report.total_terms());
}

#[test]
fn test_fixed_seed_is_reproducible() {
	let pipeline = Pipeline::new(PipelineConfig {
		clusters: Some(4),
		..PipelineConfig::default()
	});
	let first = pipeline.run(&three_groups()).unwrap();
	let second = pipeline.run(&three_groups()).unwrap();

	assert_eq!(first.labels, second.labels);
	assert_eq!(first.medoid_flags, second.medoid_flags);
}

#[test]
fn test_record_order_does_not_change_grouping() {
	let mut records = three_groups();
	records.reverse();
	for record in records.iter_mut().step_by(3) {
		std::mem::swap(&mut record.first, &mut record.second);
	}

	let config = PipelineConfig {
		affinity: AffinityMode::Global,
		clusters: Some(3),
		embed: false,
		..PipelineConfig::default()
	};
	let report = Pipeline::new(config).run(&records).unwrap();

	// Terms are indexed in first-seen order, so map labels back by name
	let mut by_name: Vec<(String, usize)> = report
		.terms
		.iter()
		.map(|t| t.to_string())
		.zip(report.labels.iter().copied())
		.collect();
	by_name.sort();
	let labels: Vec<usize> = by_name.into_iter().map(|(_, l)| l).collect();
	assert_three_groups(&labels);
}

#[test]
fn test_labels_follow_first_appearance() {
	let report = Pipeline::new(PipelineConfig {
		clusters: Some(3),
		..PipelineConfig::default()
	})
	.run(&three_groups())
	.unwrap();

	assert_eq!(report.labels[0], 0);
	assert_eq!(report.labels[4], 1);
	assert_eq!(report.labels[8], 2);
}

mod common;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Cursor;

use common::DemoDataset;
use doco::prelude::*;
use rstest::{
    fixture,
    rstest,
};

#[fixture]
fn dataset() -> DemoDataset { DemoDataset::default() }

fn phase(
    dataset: &DemoDataset,
    config: DocoConfig,
) -> anyhow::Result<PhasingOutcome> {
    let mappings = dataset.read_mappings(&config)?;
    let annotation = dataset.read_annotation()?;
    DocoPipeline::new(config).phase(mappings, &annotation)
}

fn doco_of<'a>(
    dictionary: &'a PhasingDictionary,
    transcript: &str,
) -> Option<&'a str> {
    dictionary
        .get(transcript)
        .map(|entry| entry.doco.as_str())
}

#[rstest]
#[case::unique(true, "PF_D,PF_C;;; GeneB")]
#[case::repeated(false, "PF_D,PF_C,PF_C;;; GeneB")]
fn phasing_dictionary(
    dataset: DemoDataset,
    #[case] unique_domain: bool,
    #[case] tx2_doco: &str,
) -> anyhow::Result<()> {
    let outcome = phase(
        &dataset,
        DocoConfig::default().with_unique_domain(unique_domain),
    )?;
    let dictionary = &outcome.dictionary;

    assert_eq!(doco_of(dictionary, "tx1"), Some("PF_A,PF_B;;; GeneA"));
    assert_eq!(doco_of(dictionary, "tx2"), Some(tx2_doco));
    assert_eq!(doco_of(dictionary, "tx3"), Some(";;; GeneB"));
    assert_eq!(doco_of(dictionary, "tx4"), Some(";;; GeneC"));
    assert_eq!(doco_of(dictionary, "tx5"), None);

    let report = &outcome.report;
    assert_eq!(report.mapping_rows, 8);
    assert_eq!(report.rejected_rows, 1);
    assert_eq!(report.duplicate_rows, if unique_domain { 1 } else { 0 });
    assert_eq!(report.phased_transcripts, 4);
    assert_eq!(report.annotated_transcripts, 4);
    assert_eq!(report.domainless_transcripts, 2);
    assert_eq!(report.distinct_docos, 4);
    assert_eq!(report.unmatched_count_rows, None);
    Ok(())
}

#[rstest]
fn dictionary_covers_annotation(dataset: DemoDataset) -> anyhow::Result<()> {
    let outcome = phase(&dataset, DocoConfig::default())?;
    let annotated = dataset
        .annotation
        .iter()
        .map(|(t, _)| t.to_string())
        .collect::<BTreeSet<_>>();
    let in_dictionary = outcome
        .dictionary
        .entries()
        .iter()
        .map(|e| e.transcript.clone())
        .collect::<BTreeSet<_>>();
    assert_eq!(annotated, in_dictionary);

    for entry in outcome.dictionary.entries() {
        let doco: DoCo = entry.doco.parse()?;
        assert_eq!(doco.gene(), Some(entry.gene.as_str()));
    }
    Ok(())
}

#[rstest]
fn phased_rows_are_ordered(dataset: DemoDataset) -> anyhow::Result<()> {
    let outcome = phase(&dataset, DocoConfig::default().with_unique_domain(true))?;
    let domains = |transcript: &str| {
        outcome
            .phased
            .iter()
            .filter(|p| p.mapping.transcript == transcript)
            .filter_map(|p| p.mapping.domain.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(domains("tx1"), vec!["PF_A", "PF_B"]);
    assert_eq!(domains("tx2"), vec!["PF_D", "PF_C"]);
    assert!(outcome
        .phased
        .iter()
        .all(|p| p.mapping.domain.as_deref() != Some("PF_X")));
    Ok(())
}

#[rstest]
fn coordinate_tokens(dataset: DemoDataset) -> anyhow::Result<()> {
    let outcome = phase(
        &dataset,
        DocoConfig::default()
            .with_unique_domain(true)
            .with_coordinates(true),
    )?;
    assert_eq!(
        doco_of(&outcome.dictionary, "tx2"),
        Some("PF_D::chr1:5300-5400(-),PF_C::chr1:5100-5200(-);;; GeneB")
    );
    assert_eq!(
        doco_of(&outcome.dictionary, "tx1"),
        Some("PF_A::chr1:1050-2100(+),PF_B::chr1:2000-2100(+);;; GeneA")
    );
    Ok(())
}

#[rstest]
fn gtf_annotation_matches_table(dataset: DemoDataset) -> anyhow::Result<()> {
    let config = DocoConfig::default().with_unique_domain(true);
    let from_table = phase(&dataset, config.clone())?;

    let annotation = TranscriptAnnotation::from_gtf(Cursor::new(dataset.annotation_gtf()))?;
    let from_gtf = DocoPipeline::new(config.clone())
        .phase(dataset.read_mappings(&config)?, &annotation)?;

    assert_eq!(from_table.dictionary, from_gtf.dictionary);
    Ok(())
}

#[rstest]
fn full_run(dataset: DemoDataset) -> anyhow::Result<()> {
    let pipeline = DocoPipeline::new(DocoConfig::default().with_unique_domain(true));
    let counts = dataset.read_counts()?;
    let (outcome, doco_counts) = pipeline.run(
        dataset.read_mappings(pipeline.config())?,
        &dataset.read_annotation()?,
        &counts,
    )?;

    assert_eq!(outcome.report.unmatched_count_rows, Some(1));
    assert_eq!(doco_counts.unmatched(), 1);
    assert_eq!(
        doco_counts.docos()?,
        vec![
            ";;;",
            ";;; GeneB",
            ";;; GeneC",
            "PF_A,PF_B;;; GeneA",
            "PF_D,PF_C;;; GeneB"
        ]
    );
    assert_eq!(doco_counts.value("PF_A,PF_B;;; GeneA", "s1")?, Some(10.0));
    assert_eq!(doco_counts.value(";;;", "s2")?, Some(5.0));
    assert_eq!(doco_counts.value(";;; GeneC", "s2")?, Some(4.0));

    for (sample, expected) in [("s1", 26.0), ("s2", 15.0)] {
        let total: f64 = doco_counts
            .docos()?
            .iter()
            .map(|doco| doco_counts.value(doco, sample))
            .collect::<anyhow::Result<Vec<_>>>()?
            .into_iter()
            .flatten()
            .sum();
        assert_eq!(total, expected);
    }
    Ok(())
}

#[rstest]
fn files_roundtrip(dataset: DemoDataset) -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let dictionary_path = dir.path().join("dictionary.tsv");
    let counts_path = dir.path().join("doco_counts.tsv");

    let outcome = phase(&dataset, DocoConfig::default().with_unique_domain(true))?;
    outcome
        .dictionary
        .write_tsv(File::create(&dictionary_path)?)?;

    let dictionary = PhasingDictionary::from_tsv(File::open(&dictionary_path)?)?;
    assert_eq!(dictionary, outcome.dictionary);

    let doco_counts = DocoPipeline::default().aggregate(&dataset.read_counts()?, &dictionary)?;
    doco_counts.write_tsv(File::create(&counts_path)?)?;

    let written = std::fs::read_to_string(&counts_path)?;
    let mut lines = written.lines();
    assert_eq!(lines.next(), Some("DoCo\ts1\ts2"));
    assert_eq!(lines.count(), 5);
    Ok(())
}

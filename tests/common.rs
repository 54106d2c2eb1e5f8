#![allow(dead_code)]

use std::io::Cursor;

use doco::prelude::*;
use itertools::Itertools;

pub const MAPPING_HEADER: &str = "Transcript\tGene\tDomain\tchrom\tstrand\tdomainStart\tdomainEnd\texonStarts\texonEnds\tchromStarts\tblockSizes";

/// One overlap-table row with absolute exons and absolute blocks; blocks
/// are converted to the BED12-like relative layout on output.
#[derive(Debug, Clone)]
pub struct DemoMapping {
    pub transcript: &'static str,
    pub gene:       &'static str,
    pub domain:     Option<&'static str>,
    pub chrom:      &'static str,
    pub strand:     char,
    pub exons:      Vec<(u64, u64)>,
    pub blocks:     Vec<(u64, u64)>,
}

impl DemoMapping {
    fn line(&self) -> String {
        let exon_starts = self.exons.iter().map(|e| e.0).join(",");
        let exon_ends = self.exons.iter().map(|e| e.1).join(",");
        match self.domain {
            None => {
                format!(
                    "{}\t{}\t\t{}\t{}\t\t\t{}\t{}\t\t",
                    self.transcript, self.gene, self.chrom, self.strand, exon_starts, exon_ends
                )
            },
            Some(domain) => {
                let start = self.blocks.first().map(|b| b.0).unwrap_or_default();
                let end = self.blocks.last().map(|b| b.1).unwrap_or_default();
                let offsets = self.blocks.iter().map(|b| b.0 - start).join(",");
                let sizes = self.blocks.iter().map(|b| b.1 - b.0).join(",");
                format!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    self.transcript,
                    self.gene,
                    domain,
                    self.chrom,
                    self.strand,
                    start,
                    end,
                    exon_starts,
                    exon_ends,
                    offsets,
                    sizes
                )
            },
        }
    }
}

/// Small but complete DoCo dataset.
///
/// * `tx1` (+): `PF_A` spans exons 1-2, `PF_B` sits in exon 2, `PF_X`
///   skips exon 2 and is rejected.
/// * `tx2` (-): `PF_C` (listed twice) and `PF_D` in a single exon.
/// * `tx3`: examined, no domain.
/// * `tx4`: annotated only.
/// * `tx5`: has a domain but is not annotated.
pub struct DemoDataset {
    pub mappings:   Vec<DemoMapping>,
    pub annotation: Vec<(&'static str, &'static str)>,
    pub counts:     Vec<(&'static str, i64, i64)>,
}

impl Default for DemoDataset {
    fn default() -> Self {
        let tx1_exons = vec![(1000, 1100), (2000, 2100), (3000, 3100)];
        let tx2_exons = vec![(5000, 5500)];
        let demo = |transcript, gene, domain, strand, exons: &Vec<(u64, u64)>, blocks| {
            DemoMapping {
                transcript,
                gene,
                domain,
                chrom: "chr1",
                strand,
                exons: exons.clone(),
                blocks,
            }
        };

        Self {
            mappings:   vec![
                demo("tx1", "GeneA", Some("PF_B"), '+', &tx1_exons, vec![(2000, 2100)]),
                demo(
                    "tx1",
                    "GeneA",
                    Some("PF_A"),
                    '+',
                    &tx1_exons,
                    vec![(1050, 1100), (2000, 2100)],
                ),
                demo(
                    "tx1",
                    "GeneA",
                    Some("PF_X"),
                    '+',
                    &tx1_exons,
                    vec![(1050, 1100), (3000, 3050)],
                ),
                demo("tx2", "GeneB", Some("PF_C"), '-', &tx2_exons, vec![(5100, 5200)]),
                demo("tx2", "GeneB", Some("PF_D"), '-', &tx2_exons, vec![(5300, 5400)]),
                demo("tx2", "GeneB", Some("PF_C"), '-', &tx2_exons, vec![(5100, 5200)]),
                demo("tx3", "GeneB", None, '-', &vec![(7000, 7100)], vec![]),
                demo("tx5", "GeneD", Some("PF_E"), '+', &vec![(100, 200)], vec![(120, 150)]),
            ],
            annotation: vec![
                ("tx1", "GeneA"),
                ("tx2", "GeneB"),
                ("tx3", "GeneB"),
                ("tx4", "GeneC"),
            ],
            counts:     vec![
                ("tx1.1", 10, 1),
                ("tx2", 5, 2),
                ("tx3", 3, 3),
                ("tx4", 1, 4),
                ("txZ", 7, 5),
            ],
        }
    }
}

impl DemoDataset {
    pub fn mapping_tsv(&self) -> String {
        std::iter::once(MAPPING_HEADER.to_string())
            .chain(self.mappings.iter().map(DemoMapping::line))
            .join("\n")
            + "\n"
    }

    pub fn annotation_tsv(&self) -> String {
        std::iter::once("Transcript\tGene".to_string())
            .chain(
                self.annotation
                    .iter()
                    .map(|(t, g)| format!("{}\t{}", t, g)),
            )
            .join("\n")
            + "\n"
    }

    /// The annotated transcripts as GTF, one exon per transcript.
    pub fn annotation_gtf(&self) -> String {
        self.annotation
            .iter()
            .enumerate()
            .map(|(idx, (t, g))| {
                let start = 10_000 * (idx + 1) + 1;
                format!(
                    "chr1\tdemo\texon\t{}\t{}\t.\t+\t.\tgene_id \"{}\"; transcript_id \"{}\";",
                    start,
                    start + 99,
                    g,
                    t
                )
            })
            .join("\n")
            + "\n"
    }

    pub fn counts_tsv(&self) -> String {
        std::iter::once("Transcript\ts1\ts2".to_string())
            .chain(
                self.counts
                    .iter()
                    .map(|(t, a, b)| format!("{}\t{}\t{}", t, a, b)),
            )
            .join("\n")
            + "\n"
    }

    pub fn read_mappings(
        &self,
        config: &DocoConfig,
    ) -> anyhow::Result<Vec<DomainMapping>> {
        MappingReader::new(config.columns.clone()).read(Cursor::new(self.mapping_tsv()))
    }

    pub fn read_annotation(&self) -> anyhow::Result<TranscriptAnnotation> {
        TranscriptAnnotation::from_tsv(
            Cursor::new(self.annotation_tsv()),
            &AnnotationColumns::default(),
        )
    }

    pub fn read_counts(&self) -> anyhow::Result<CountMatrix> {
        CountMatrix::from_tsv(Cursor::new(self.counts_tsv()), "Transcript")
    }
}

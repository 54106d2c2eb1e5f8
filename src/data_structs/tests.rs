use std::io::Cursor;
use std::str::FromStr;

use rstest::rstest;

use super::doco::{
    domain_token,
    UNMATCHED_DOCO,
};
use super::*;

#[rstest]
#[case::forward("+", Strand::Forward)]
#[case::reverse("-", Strand::Reverse)]
#[case::unknown(".", Strand::None)]
#[case::garbage("?", Strand::None)]
fn test_strand_parsing(
    #[case] input: &str,
    #[case] expected: Strand,
) {
    assert_eq!(Strand::from_str(input).unwrap(), expected);
}

#[test]
fn test_strand_display_roundtrip() {
    for strand in [Strand::Forward, Strand::Reverse, Strand::None] {
        assert_eq!(Strand::from_str(&strand.to_string()).unwrap(), strand);
    }
}

#[test]
fn test_span_contains() {
    let exon = Span::new(1000, 1100);
    assert!(exon.contains(&Span::new(1000, 1100)));
    assert!(exon.contains(&Span::new(1050, 1100)));
    assert!(!exon.contains(&Span::new(990, 1050)));
    assert!(!exon.contains(&Span::new(1050, 1101)));
    assert_eq!(exon.length(), 100);
}

#[test]
fn test_span_try_new_rejects_inverted() {
    assert!(Span::try_new(10, 5).is_err());
    assert!(Span::try_new(5, 5).is_ok());
}

#[test]
fn test_mapping_sorts_structure() {
    let mapping = DomainMapping::new(
        "tx1",
        "geneA",
        Some("PF1".into()),
        "chr1",
        Strand::Forward,
        None,
        vec![Span::new(300, 400), Span::new(100, 200)],
        vec![Span::new(350, 380), Span::new(150, 200)],
    );
    assert_eq!(mapping.exons[0], Span::new(100, 200));
    assert_eq!(mapping.blocks[0], Span::new(150, 200));
    assert_eq!(mapping.domain_start(), Some(150));
}

#[test]
fn test_doco_display() {
    let doco = DoCo::new(vec!["D1".into(), "D2".into()], "GeneA");
    assert_eq!(doco.to_string(), "D1,D2;;; GeneA");
    assert_eq!(DoCo::domainless("GeneC").to_string(), ";;; GeneC");
    assert_eq!(DoCo::unmatched().to_string(), UNMATCHED_DOCO);
}

#[rstest]
#[case("D1,D2;;; GeneA")]
#[case(";;; GeneC")]
#[case(";;;")]
#[case("PF1::chr1:100-200(+),PF2::chr1:300-400(+);;; G")]
fn test_doco_parse_display_identity(#[case] doco: &str) {
    assert_eq!(DoCo::from_str(doco).unwrap().to_string(), doco);
}

#[test]
fn test_doco_parse_parts() {
    let doco = DoCo::from_str("D1,D2;;; GeneA").unwrap();
    assert_eq!(doco.domains(), ["D1".to_string(), "D2".to_string()]);
    assert_eq!(doco.gene(), Some("GeneA"));
    assert!(DoCo::from_str(";;; GeneC").unwrap().is_domainless());
    assert!(DoCo::from_str(";;;").unwrap().is_unmatched());
    assert!(DoCo::from_str("D1,D2").is_err());
}

#[test]
fn test_domain_token() {
    let span = Some(Span::new(100, 200));
    assert_eq!(domain_token("PF1", "chr1", span, Strand::Reverse, false), "PF1");
    assert_eq!(
        domain_token("PF1", "chr1", span, Strand::Reverse, true),
        "PF1::chr1:100-200(-)"
    );
}

#[test]
fn test_annotation_keeps_first_gene() {
    let mut annotation = TranscriptAnnotation::new();
    annotation.insert("tx1", "geneA");
    annotation.insert("tx2", "geneB");
    annotation.insert("tx1", "geneZ");
    assert_eq!(annotation.len(), 2);
    assert_eq!(annotation.gene("tx1"), Some("geneA"));
    assert_eq!(
        annotation.iter().map(|(t, _)| t).collect::<Vec<_>>(),
        vec!["tx1", "tx2"]
    );
}

#[test]
fn test_annotation_from_tsv() {
    let tsv = "Transcript\tGene\textra\ntx1\tgeneA\t1\ntx2\tgeneB\t2\n";
    let annotation =
        TranscriptAnnotation::from_tsv(Cursor::new(tsv), &AnnotationColumns::default()).unwrap();
    assert_eq!(annotation.len(), 2);
    assert_eq!(annotation.gene("tx2"), Some("geneB"));
}

#[test]
fn test_annotation_custom_columns() {
    let tsv = "name\tgeneName\ntx1\tgeneA\n";
    let columns = AnnotationColumns::default()
        .with_transcript("name".into())
        .with_gene("geneName".into());
    let annotation = TranscriptAnnotation::from_tsv(Cursor::new(tsv), &columns).unwrap();
    assert!(annotation.contains("tx1"));
}

#[test]
fn test_annotation_missing_column_is_error() {
    let tsv = "Transcript\tSymbol\ntx1\tgeneA\n";
    let res = TranscriptAnnotation::from_tsv(Cursor::new(tsv), &AnnotationColumns::default());
    assert!(res.is_err());
}

#[test]
fn test_dictionary_rejects_duplicates() {
    let entries = vec![
        PhasingEntry::new("tx1", ";;; g", "g"),
        PhasingEntry::new("tx1", "D1;;; g", "g"),
    ];
    assert!(PhasingDictionary::try_new(entries).is_err());
}

#[test]
fn test_dictionary_tsv_roundtrip() {
    let dictionary = PhasingDictionary::try_new(vec![
        PhasingEntry::new("Tx1", "D1,D2;;; GeneA", "GeneA"),
        PhasingEntry::new("Tx3", ";;; GeneC", "GeneC"),
    ])
    .unwrap();
    let mut buffer = Vec::new();
    dictionary.write_tsv(&mut buffer).unwrap();

    let written = String::from_utf8(buffer.clone()).unwrap();
    assert!(written.starts_with("Transcript\tDoCo\tGene\n"));

    let read = PhasingDictionary::from_tsv(Cursor::new(buffer)).unwrap();
    assert_eq!(read, dictionary);
    assert_eq!(read.n_docos(), 2);
}

#[test]
fn test_dictionary_missing_column_is_error() {
    let tsv = "Transcript\tGene\nTx1\tGeneA\n";
    assert!(PhasingDictionary::from_tsv(Cursor::new(tsv)).is_err());
}

#[test]
fn test_domain_extent_falls_back_to_blocks() {
    let mapping = DomainMapping::new(
        "tx1",
        "geneA",
        Some("PF1".into()),
        "chr1",
        Strand::Forward,
        None,
        vec![Span::new(100, 200), Span::new(300, 400)],
        vec![Span::new(350, 380), Span::new(150, 200)],
    );
    assert_eq!(mapping.domain_extent(), Some(Span::new(150, 380)));

    let no_domain = DomainMapping::without_domain("tx2", "geneB", "chr1", Strand::None, vec![]);
    assert_eq!(no_domain.domain_extent(), None);
}

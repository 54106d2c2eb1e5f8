//! Phasing dictionary construction.

use hashbrown::HashMap;
use log::{
    info,
    warn,
};

use super::phase::{
    collapse_phased,
    PhasedMapping,
};
use crate::data_structs::{
    DoCo,
    PhasingDictionary,
    PhasingEntry,
    TranscriptAnnotation,
};

/// Builds one (Transcript, DoCo, Gene) entry per annotated transcript.
///
/// Transcripts present in the phased table keep their DoCo; all other
/// annotated transcripts get the domain-less DoCo of their gene. The
/// resulting transcript set equals the annotation's, in annotation order.
pub fn build_dictionary(
    phased: &[PhasedMapping],
    annotation: &TranscriptAnnotation,
) -> anyhow::Result<PhasingDictionary> {
    let phased_entries: HashMap<String, PhasingEntry> = collapse_phased(phased)
        .into_iter()
        .map(|e| (e.transcript.clone(), e))
        .collect();

    let unannotated = phased_entries
        .keys()
        .filter(|t| !annotation.contains(t))
        .count();
    if unannotated > 0 {
        warn!(
            "{} phased transcripts are absent from the transcript annotation and were left out",
            unannotated
        );
    }

    let mut n_domainless = 0;
    let entries = annotation
        .iter()
        .map(|(transcript, gene)| {
            match phased_entries.get(transcript) {
                Some(entry) => entry.clone(),
                None => {
                    n_domainless += 1;
                    PhasingEntry::new(transcript, DoCo::domainless(gene).to_string(), gene)
                },
            }
        })
        .collect::<Vec<_>>();

    let dictionary = PhasingDictionary::try_new(entries)?;
    info!(
        "Phasing dictionary: {} transcripts, {} DoCos, {} transcripts without domain overlap",
        dictionary.len(),
        dictionary.n_docos(),
        n_domainless
    );
    Ok(dictionary)
}

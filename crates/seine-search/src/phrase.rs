//! The phrase gate: does a document contain a phrase?
//!
//! A document matches `[t1..tk]` (k ≥ 2) iff some position `π` has `t1` at
//! `π`, `t2` at `π + 1`, and so on. Single-stem phrases only require any
//! posting. The gate is boolean; scoring happens elsewhere.

use seine_index::PostingMap;
use seine_types::DocId;
use std::collections::{BTreeSet, HashMap};

/// Documents passing the gate for one phrase, given the loaded posting maps
/// of every term involved.
pub fn matching_docs(
    phrase: &[String],
    term_postings: &HashMap<String, PostingMap>,
) -> BTreeSet<DocId> {
    // Intersection of the documents containing every stem.
    let mut docs: Option<BTreeSet<DocId>> = None;
    for stem in phrase {
        let stem_docs: BTreeSet<DocId> = term_postings
            .get(stem)
            .map(|map| map.keys().copied().collect())
            .unwrap_or_default();
        docs = Some(match docs {
            None => stem_docs,
            Some(acc) => acc.intersection(&stem_docs).copied().collect(),
        });
        if docs.as_ref().is_some_and(BTreeSet::is_empty) {
            return BTreeSet::new();
        }
    }
    let docs = docs.unwrap_or_default();

    if phrase.len() < 2 {
        return docs;
    }
    docs.into_iter()
        .filter(|doc| has_consecutive_run(phrase, *doc, term_postings))
        .collect()
}

fn has_consecutive_run(
    phrase: &[String],
    doc: DocId,
    term_postings: &HashMap<String, PostingMap>,
) -> bool {
    let Some(first) = term_postings
        .get(&phrase[0])
        .and_then(|map| map.get(&doc))
    else {
        return false;
    };

    first.positions().iter().any(|&start| {
        phrase[1..].iter().enumerate().all(|(offset, stem)| {
            let position = start + offset as u32 + 1;
            term_postings
                .get(stem)
                .and_then(|map| map.get(&doc))
                .is_some_and(|posting| posting.contains_position(position))
        })
    })
}

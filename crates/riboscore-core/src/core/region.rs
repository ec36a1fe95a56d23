use serde::{Deserialize, Serialize};

/// A maximal run of alphanumeric label characters in a structure
/// annotation, denoting one binding arm of a candidate.
///
/// The offsets index into the annotation and, by the equal-length
/// invariant, into the candidate sequence as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub start: usize,
    pub len: usize,
}

impl Region {
    /// End offset, exclusive.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// The arm substring of `sequence` selected by this region.
    ///
    /// Offsets are byte offsets; both sequence and annotation are ASCII by
    /// the time regions are extracted.
    pub fn arm<'s>(&self, sequence: &'s str) -> &'s str {
        &sequence[self.start..self.end()]
    }
}

/// Splits a structure annotation into its ordered binding-arm regions.
///
/// A single left-to-right scan classifies each byte as a label
/// (`[0-9a-zA-Z]`) or not, and emits every maximal label run. Regions are
/// disjoint, non-empty, and ordered by position.
pub fn extract_regions(annotation: &str) -> Vec<Region> {
    let mut regions = Vec::new();
    let mut run_start: Option<usize> = None;

    for (i, b) in annotation.bytes().enumerate() {
        if b.is_ascii_alphanumeric() {
            run_start.get_or_insert(i);
        } else if let Some(start) = run_start.take() {
            regions.push(Region {
                start,
                len: i - start,
            });
        }
    }

    if let Some(start) = run_start {
        regions.push(Region {
            start,
            len: annotation.len() - start,
        });
    }

    regions
}

/// Splits a region into the maximal sub-runs whose positions are unpaired
/// (`'.'`) in the folded structure.
///
/// Used by the accessibility scorer to restrict melting evaluation to the
/// stretches of an arm that are actually single-stranded on the target.
pub fn unpaired_subruns(region: &Region, folded: &str) -> Vec<Region> {
    let bytes = folded.as_bytes();
    let mut runs = Vec::new();
    let mut run_start: Option<usize> = None;

    for i in region.start..region.end() {
        if bytes[i] == b'.' {
            run_start.get_or_insert(i);
        } else if let Some(start) = run_start.take() {
            runs.push(Region {
                start,
                len: i - start,
            });
        }
    }

    if let Some(start) = run_start {
        runs.push(Region {
            start,
            len: region.end() - start,
        });
    }

    runs
}

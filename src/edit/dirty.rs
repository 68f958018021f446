// SPDX-FileCopyrightText: 2026 Rolodex contributors
// SPDX-License-Identifier: MIT

use super::RegionId;

/// Cells whose rendered value differs from the committed record, with the
/// pre-edit baseline needed to revert them on cancel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtyMarker {
    cells: Vec<DirtyCell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirtyCell {
    region: RegionId,
    baseline: String,
}

impl DirtyCell {
    pub fn region(&self) -> RegionId {
        self.region
    }

    pub fn baseline(&self) -> &str {
        &self.baseline
    }
}

impl DirtyMarker {
    /// Records a cell the first time it becomes dirty. Later edits of the
    /// same cell keep the original baseline.
    pub fn record(&mut self, region: RegionId, baseline: String) {
        if self.contains(region) {
            return;
        }
        self.cells.push(DirtyCell { region, baseline });
    }

    pub fn contains(&self, region: RegionId) -> bool {
        self.cells.iter().any(|cell| cell.region == region)
    }

    pub fn cells(&self) -> &[DirtyCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{DirtyMarker, RegionId};

    #[test]
    fn first_baseline_wins() {
        let mut dirty = DirtyMarker::default();
        dirty.record(RegionId(3), "Okafor".to_owned());
        dirty.record(RegionId(3), "Smith".to_owned());

        assert_eq!(dirty.len(), 1);
        assert_eq!(dirty.cells()[0].baseline(), "Okafor");
        assert!(dirty.contains(RegionId(3)));
        assert!(!dirty.contains(RegionId(4)));
    }
}

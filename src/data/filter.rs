use std::collections::BTreeSet;

use crate::regions::{Region, REGIONS};

// ---------------------------------------------------------------------------
// Region filter: which regions the user wants to see
// ---------------------------------------------------------------------------

/// Names of the selected regions. Empty means nothing is shown.
pub type RegionFilter = BTreeSet<&'static str>;

/// Initialise a [`RegionFilter`] with every region selected.
pub fn init_region_filter() -> RegionFilter {
    REGIONS.iter().map(|r| r.name).collect()
}

/// Selected regions, in display order (not alphabetical).
pub fn selected_regions(filter: &RegionFilter) -> Vec<&'static Region> {
    REGIONS
        .iter()
        .filter(|r| filter.contains(r.name))
        .collect()
}

/// States to fetch for the current selection, in display order.
pub fn states_for(filter: &RegionFilter) -> Vec<&'static str> {
    selected_regions(filter)
        .into_iter()
        .flat_map(|r| r.states.iter().copied())
        .collect()
}

/// Flip one region in or out of the selection.
pub fn toggle_region(filter: &mut RegionFilter, name: &'static str) {
    if !filter.remove(name) {
        filter.insert(name);
    }
}

//! Priority-ordered overlap removal across the whole zone table.

use crate::core::targets;
use crate::zone::Zone;
use tracing::{debug, warn};

/// Rewrites every zone's fragments so that all surviving fragments, across
/// all zones, are pairwise disjoint.
///
/// Zones are visited in priority order (their index in `zones`): each zone's
/// base box is subtracted from the fragments of every later zone. Earlier
/// zones are never modified by later ones, so zone 0 always keeps its whole
/// base as one fragment.
///
/// A later zone whose fragments vanish entirely is totally eclipsed; that is
/// reported as a warning and the zone stays, permanently empty.
pub(crate) fn remove_overlaps(zones: &mut [Zone]) {
    for i in 0..zones.len() {
        for j in (i + 1)..zones.len() {
            let Some(overlap) = zones[i].base().intersect(zones[j].base()) else {
                continue;
            };

            // Split the slice so we can carve `inner` while naming `outer`
            let (head, tail) = zones.split_at_mut(j);
            let (outer, inner) = (&head[i], &mut tail[0]);

            let had_fragments = !inner.fragments().is_empty();
            inner.split_by_overlap(&overlap);

            if had_fragments && inner.fragments().is_empty() {
                warn!(target: targets::RESOLVER, "TOTAL ECLIPSE of {inner} by {outer}");
            }
        }
    }

    debug!(
        target: targets::RESOLVER,
        zones = zones.len(),
        fragments = zones.iter().map(|z| z.fragments().len()).sum::<usize>(),
        "overlap removal complete"
    );
}

use zonemap_engine::core::types::Coord;
use zonemap_engine::descriptor::ZoneDescriptor;
use zonemap_engine::geom::point::Point;
use zonemap_engine::manager::ZoneManager;

pub fn descriptor(name: &str, kind: &str, pos1: &[Coord], pos2: &[Coord]) -> ZoneDescriptor {
    ZoneDescriptor::new(name, kind, pos1, pos2)
}

pub fn pt(coords: &[Coord]) -> Point { Point::from(coords) }

/// Reference answer for `zone_of`, straight from the descriptors: the first
/// zone (in priority order) whose inclusive box contains the point wins.
pub fn expected_zone(descriptors: &[ZoneDescriptor], pos: &Point) -> Option<usize> {
    descriptors.iter().position(|d| {
        d.pos1.iter().zip(d.pos2.iter()).enumerate().all(|(axis, (&a, &b))| {
            let (lo, hi) = (a.min(b), a.max(b));
            lo <= pos[axis] && pos[axis] <= hi
        })
    })
}

/// Checks the geometric invariants every built manager must satisfy:
/// fragments are pairwise disjoint across all zones, stay inside their own
/// zone's base box, and never touch a higher-priority zone's base box.
pub fn assert_invariants(manager: &ZoneManager) {
    let zones = manager.zones();

    for zone in zones {
        for fragment in zone.fragments() {
            assert_eq!(
                fragment.aabb().intersect(zone.base()).as_ref(),
                Some(fragment.aabb()),
                "{fragment} sticks out of its zone's base {}",
                zone.base()
            );
            for earlier in &zones[..zone.original_id()] {
                assert!(
                    fragment.aabb().intersect(earlier.base()).is_none(),
                    "{fragment} trespasses on higher-priority {earlier}"
                );
            }
        }
    }

    let all: Vec<_> = zones.iter().flat_map(|z| z.fragments()).collect();
    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            assert!(a.aabb().intersect(b.aabb()).is_none(), "{a} overlaps {b}");
        }
    }
}

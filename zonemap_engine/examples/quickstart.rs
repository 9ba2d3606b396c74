//! Minimal tour of the engine: two overlapping zones, a few lookups, and the
//! tree the queries run against.

use zonemap_engine::descriptor::ZoneDescriptor;
use zonemap_engine::geom::point::Point;
use zonemap_engine::manager::ZoneManager;

fn main() {
    // Two zones overlapping at a corner. Order matters: Alice comes first,
    // so she keeps the contested cells
    let descriptors = [
        ZoneDescriptor::new("Alice", "Eggs", vec![1, 2], vec![3, 4]),
        ZoneDescriptor::new("Bob", "Spam", vec![2, 3], vec![4, 5]),
    ];

    let manager = ZoneManager::new(&descriptors).expect("descriptors are well-formed");

    for coords in [[3, 3], [4, 5], [0, 0]] {
        let pos = Point::from(coords);
        match manager.zone_of(&pos) {
            Some(zone) => println!("{pos} belongs to {zone}"),
            None => println!("{pos} belongs to no zone"),
        }
    }

    // Where the two inputs collided, before the overlap was carved away
    for overlap in manager.overlapping_zones() {
        println!("{overlap}");
    }

    println!("{}", manager.tree());
}

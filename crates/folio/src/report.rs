//! Plain-text dump of computed orbit layouts for `folio layout`.

use orbit::{OrbitLayout, OrbitSystem};
use std::fmt::Write;

pub fn layout_table(system: &OrbitSystem, layout: &OrbitLayout) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} (accent {}, base {}s)",
        system.title, system.accent, system.base_duration_secs
    );

    for (index, ring) in layout.rings.iter().enumerate() {
        let _ = writeln!(
            out,
            "  ring {} {:<18} r={:>6.1}  {:>5.1}s {:?}",
            index, ring.category, ring.radius, ring.rotation.duration_secs, ring.rotation.direction
        );
        for item in &ring.items {
            let _ = writeln!(
                out,
                "    {:<16} {:>6.1}°  ({:>7.2}, {:>7.2})  {} {}",
                item.id,
                item.polar.angle_degrees,
                item.offset.dx,
                item.offset.dy,
                item.visual.glyph,
                item.visual.color
            );
        }
    }
    out
}

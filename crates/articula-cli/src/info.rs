//! Derived dimensions of a built rig, for `articula info`.

use std::fmt;

use articula::mesh::Solid;
use articula::{ChainLink, Rig, RigKind};
use serde::Serialize;

/// Mesh size and enclosed volume of one part.
#[derive(Debug, Clone, Serialize)]
pub struct PartInfo {
    pub vertices: usize,
    pub triangles: usize,
    pub volume: f64,
}

impl PartInfo {
    fn of(solid: &Solid) -> Self {
        Self {
            vertices: solid.num_vertices(),
            triangles: solid.num_triangles(),
            volume: solid.volume(),
        }
    }
}

/// Fit and range of one link.
#[derive(Debug, Clone, Serialize)]
pub struct LinkInfo {
    pub name: String,
    pub kind: String,
    pub male_radius: f64,
    pub clearance: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub range: [f64; 2],
    /// Child attachment origin in the link's moving frame.
    pub child_offset: [f64; 3],
    pub fixed: PartInfo,
    pub moving: PartInfo,
}

impl LinkInfo {
    fn of(link: &ChainLink) -> Self {
        let joint = link.joint();
        let fit = joint.fit();
        let range = joint.range();
        let tip = joint.child_attachment().origin();
        Self {
            name: link.name().to_string(),
            kind: joint.kind().to_string(),
            male_radius: fit.male_radius(),
            clearance: fit.clearance(),
            inner_radius: fit.inner_radius(),
            outer_radius: fit.outer_radius(),
            range: [range.min, range.max],
            child_offset: [tip.x, tip.y, tip.z],
            fixed: PartInfo::of(joint.fixed_solid()),
            moving: PartInfo::of(joint.template_moving_solid()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RigInfo {
    pub rig: String,
    pub links: Vec<LinkInfo>,
}

impl RigInfo {
    pub fn new(kind: RigKind, rig: &Rig) -> Self {
        Self {
            rig: kind.to_string(),
            links: rig.chain.links().iter().map(LinkInfo::of).collect(),
        }
    }
}

impl fmt::Display for RigInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "articula rig: {}", self.rig)?;
        for (i, link) in self.links.iter().enumerate() {
            let unit = if link.kind == "slider" { "mm" } else { "deg" };
            writeln!(f, "\n  {}: {} ({})", i + 1, link.name, link.kind)?;
            writeln!(
                f,
                "    male radius {:.3}, clearance {:.3}",
                link.male_radius, link.clearance
            )?;
            writeln!(
                f,
                "    inner radius {:.3}, outer radius {:.3}",
                link.inner_radius, link.outer_radius
            )?;
            writeln!(
                f,
                "    range [{:.3}, {:.3}] {unit}",
                link.range[0], link.range[1]
            )?;
            let [x, y, z] = link.child_offset;
            writeln!(f, "    child offset ({x:.3}, {y:.3}, {z:.3})")?;
            for (role, part) in [("fixed", &link.fixed), ("moving", &link.moving)] {
                writeln!(
                    f,
                    "    {role:<6} {} vertices, {} triangles, {:.1} mm^3",
                    part.vertices, part.triangles, part.volume
                )?;
            }
        }
        Ok(())
    }
}

//! Region boundaries and the containment index.
//!
//! A [`RegionIndex`] maps region names to closed boundary rings and answers
//! "which region contains this point" by ray-casting against each boundary
//! in dataset order.

use std::path::Path;

use geo_types::{Coord, LineString};
use tracing::{debug, info};

use crate::dataset::{self, DataError, RegionRecord};
use crate::geometry::{on_segment, orientation, segments_intersect, Orientation};

/// A named region with its boundary ring.
///
/// Boundaries are clockwise rings whose first and last coordinates coincide,
/// so a ring of `n` points contributes `n - 1` edges. Rings with fewer than
/// two points have no edges and contain nothing.
#[derive(Debug, Clone)]
pub struct Region {
    pub name: String,
    pub boundary: LineString<f64>,
}

impl Region {
    /// Ray-cast containment test against this region's boundary.
    ///
    /// Casts a ray from `point` to a far-west extreme and counts edge
    /// crossings; an odd count means the point is inside. A point lying
    /// exactly on an edge's line is resolved by that edge's bounding box
    /// alone and ends the scan for the whole ring, which also means a point
    /// level with a horizontal edge can answer for the ring before the
    /// crossing count completes.
    pub fn contains(&self, point: Coord<f64>) -> bool {
        // f64::MIN rather than NEG_INFINITY: an infinite abscissa turns the
        // cross products into 0 * inf = NaN for edges level with the point,
        // and NaN compares false everywhere.
        let extreme = Coord {
            x: f64::MIN,
            y: point.y,
        };

        let mut crossings = 0u32;
        for edge in self.boundary.lines() {
            if !segments_intersect(edge.start, edge.end, point, extreme) {
                continue;
            }
            if orientation(edge.start, point, edge.end) == Orientation::Colinear {
                return on_segment(edge.start, point, edge.end);
            }
            crossings += 1;
        }

        crossings % 2 == 1
    }

    /// Axis-aligned bounding box `(min_x, min_y, max_x, max_y)` of the
    /// boundary, or `None` for an empty ring.
    pub fn bbox(&self) -> Option<(f64, f64, f64, f64)> {
        let mut coords = self.boundary.coords();
        let first = coords.next()?;

        Some(coords.fold(
            (first.x, first.y, first.x, first.y),
            |(min_x, min_y, max_x, max_y), c| {
                (
                    min_x.min(c.x),
                    min_y.min(c.y),
                    max_x.max(c.x),
                    max_y.max(c.y),
                )
            },
        ))
    }
}

/// Immutable name-to-boundary index over a boundary dataset.
///
/// Built once from ordered dataset records and read-only afterwards, so it
/// can be shared freely across query threads. Rebuild and swap the value to
/// pick up a new dataset.
pub struct RegionIndex {
    regions: Vec<Region>,
}

impl RegionIndex {
    /// Build the index from ordered dataset records.
    ///
    /// Records keep their dataset order, which is the order queries scan
    /// regions in. A record re-using an earlier name replaces that region's
    /// boundary but keeps its original scan position. Boundaries are taken
    /// as-is; nothing checks that rings are closed or clockwise.
    pub fn build(records: Vec<RegionRecord>) -> Self {
        let mut regions: Vec<Region> = Vec::with_capacity(records.len());

        for record in records {
            let ring: Vec<Coord<f64>> = record
                .border
                .into_iter()
                .map(|[x, y]| Coord { x, y })
                .collect();
            let boundary = LineString::new(ring);

            match regions.iter().position(|r| r.name == record.state) {
                Some(slot) => regions[slot].boundary = boundary,
                None => regions.push(Region {
                    name: record.state,
                    boundary,
                }),
            }
        }

        info!("indexed {} regions", regions.len());
        Self { regions }
    }

    /// Load a newline-delimited JSON dataset and build the index from it.
    ///
    /// Any unreadable or malformed line aborts the load with a [`DataError`];
    /// there is no partially-built index to observe.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        Ok(Self::build(dataset::load_records(path)?))
    }

    /// Name of the first region containing `point`, in dataset order.
    ///
    /// `None` means no known region contains the point; that is an ordinary
    /// answer, not a failure.
    pub fn locate(&self, point: Coord<f64>) -> Option<&str> {
        let name = self
            .regions
            .iter()
            .find(|region| region.contains(point))
            .map(|region| region.name.as_str());

        debug!(
            "locate ({}, {}) -> {}",
            point.x,
            point.y,
            name.unwrap_or("none")
        );
        name
    }

    /// Number of indexed regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Iterate over regions in scan order.
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }
}

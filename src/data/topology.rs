//! World map ingestion.
//!
//! The canonical input is a TopoJSON countries topology (world-atlas layout):
//! quantized delta-encoded arcs, a transform, and an `objects.countries`
//! geometry collection whose features carry `properties.name`. A GeoJSON
//! `FeatureCollection` is accepted as an alternative; its shared borders are
//! recovered by edge deduplication since GeoJSON has no arc sharing.

use std::collections::HashMap;

use ordered_float::OrderedFloat;
use serde::Deserialize;
use serde_json::Value;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::types::GeoPoint;
use crate::error::{GlobeError, GlobeResult};

/// World-atlas 110m countries topology, the dataset the animation was built
/// against.
pub const WORLD_ATLAS_URL: &str =
    "https://cdn.jsdelivr.net/npm/world-atlas@2/countries-110m.json";

/// One polygon of a country: an exterior ring plus optional holes, lon/lat
/// degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub rings: SmallVec<[Vec<GeoPoint>; 1]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    /// Feature name as it appears in the dataset; empty when the feature
    /// carries no name (such a country can never be highlighted).
    pub name: String,
    pub polygons: Vec<Polygon>,
}

/// Immutable world geometry: country polygons plus the shared-border mesh.
///
/// Each border line string appears exactly once even though two countries
/// share it, so strokes never double up.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldMap {
    pub countries: Vec<Country>,
    pub borders: Vec<Vec<GeoPoint>>,
}

impl WorldMap {
    pub fn from_topojson_str(json: &str) -> GlobeResult<Self> {
        let topology: Topology = serde_json::from_str(json)
            .map_err(|err| GlobeError::Topology(err.to_string()))?;
        topology.into_world_map()
    }

    pub fn from_geojson_str(json: &str) -> GlobeResult<Self> {
        let collection: FeatureCollection = serde_json::from_str(json)
            .map_err(|err| GlobeError::Topology(err.to_string()))?;
        collection.into_world_map()
    }

    /// Downloads and decodes the topology from `url`
    /// (see [`WORLD_ATLAS_URL`]).
    #[cfg(feature = "fetch")]
    pub fn fetch_topojson(url: &str) -> GlobeResult<Self> {
        let body = ureq::get(url)
            .call()
            .map_err(|err| GlobeError::Fetch {
                url: url.to_owned(),
                message: err.to_string(),
            })?
            .into_string()
            .map_err(|err| GlobeError::Fetch {
                url: url.to_owned(),
                message: err.to_string(),
            })?;
        Self::from_topojson_str(&body)
    }

    /// Looks up a country by its canonical dataset name.
    #[must_use]
    pub fn country(&self, name: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.name == name)
    }
}

// ---------------------------------------------------------------------------
// TopoJSON
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct Topology {
    #[serde(rename = "type")]
    kind: String,
    transform: Option<Transform>,
    arcs: Vec<Vec<Vec<f64>>>,
    objects: HashMap<String, TopoObject>,
}

#[derive(Debug, Deserialize)]
struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct TopoObject {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    geometries: Vec<TopoGeometry>,
}

#[derive(Debug, Deserialize)]
struct TopoGeometry {
    /// `None` for null geometries, which render nothing.
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    arcs: Value,
    #[serde(default)]
    properties: Option<FeatureProperties>,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    #[serde(default)]
    name: Option<String>,
}

impl Topology {
    fn into_world_map(self) -> GlobeResult<WorldMap> {
        if self.kind != "Topology" {
            return Err(GlobeError::Topology(format!(
                "expected type \"Topology\", got \"{}\"",
                self.kind
            )));
        }

        let countries_object = self
            .objects
            .get("countries")
            .ok_or_else(|| GlobeError::Topology("missing objects.countries".to_owned()))?;
        if countries_object.kind != "GeometryCollection" {
            return Err(GlobeError::Topology(format!(
                "objects.countries must be a GeometryCollection, got \"{}\"",
                countries_object.kind
            )));
        }

        let decoded_arcs = self.decode_arcs()?;

        let mut countries = Vec::with_capacity(countries_object.geometries.len());
        // Arc index -> (first geometry using it, shared with another geometry).
        let mut arc_usage: HashMap<usize, (usize, bool)> = HashMap::new();

        for (geometry_index, geometry) in countries_object.geometries.iter().enumerate() {
            let name = geometry
                .properties
                .as_ref()
                .and_then(|p| p.name.clone())
                .unwrap_or_default();
            if name.is_empty() {
                warn!(geometry_index, "country feature without a name");
            }

            let polygon_arcs = polygon_arc_lists(geometry)?;
            let mut polygons = Vec::with_capacity(polygon_arcs.len());
            for ring_lists in &polygon_arcs {
                let mut rings: SmallVec<[Vec<GeoPoint>; 1]> =
                    SmallVec::with_capacity(ring_lists.len());
                for ring in ring_lists {
                    for &arc_ref in ring {
                        let index = resolve_arc_index(arc_ref, decoded_arcs.len())?;
                        arc_usage
                            .entry(index)
                            .and_modify(|(owner, shared)| {
                                if *owner != geometry_index {
                                    *shared = true;
                                }
                            })
                            .or_insert((geometry_index, false));
                    }
                    rings.push(assemble_ring(&decoded_arcs, ring)?);
                }
                polygons.push(Polygon { rings });
            }
            countries.push(Country { name, polygons });
        }

        // The `(a, b) => a !== b` mesh: arcs referenced by two distinct
        // geometries, each emitted once.
        let mut shared: Vec<usize> = arc_usage
            .iter()
            .filter_map(|(&index, &(_, shared))| shared.then_some(index))
            .collect();
        shared.sort_unstable();
        let borders: Vec<Vec<GeoPoint>> = shared
            .into_iter()
            .map(|index| decoded_arcs[index].clone())
            .collect();

        debug!(
            countries = countries.len(),
            border_arcs = borders.len(),
            "decoded world topology"
        );
        Ok(WorldMap { countries, borders })
    }

    fn decode_arcs(&self) -> GlobeResult<Vec<Vec<GeoPoint>>> {
        let mut decoded = Vec::with_capacity(self.arcs.len());
        for (arc_index, arc) in self.arcs.iter().enumerate() {
            let mut points = Vec::with_capacity(arc.len());
            let mut x = 0.0;
            let mut y = 0.0;
            for position in arc {
                if position.len() < 2 {
                    return Err(GlobeError::Topology(format!(
                        "arc {arc_index} contains a position with fewer than 2 values"
                    )));
                }
                let point = match &self.transform {
                    Some(transform) => {
                        // Quantized arcs are delta-encoded after the first
                        // position.
                        x += position[0];
                        y += position[1];
                        GeoPoint::new(
                            x * transform.scale[0] + transform.translate[0],
                            y * transform.scale[1] + transform.translate[1],
                        )
                    }
                    None => GeoPoint::new(position[0], position[1]),
                };
                if !point.is_finite() {
                    return Err(GlobeError::Topology(format!(
                        "arc {arc_index} decodes to a non-finite coordinate"
                    )));
                }
                points.push(point);
            }
            decoded.push(points);
        }
        Ok(decoded)
    }
}

/// Normalizes Polygon/MultiPolygon arc lists to MultiPolygon shape:
/// polygons -> rings -> signed arc references.
fn polygon_arc_lists(geometry: &TopoGeometry) -> GlobeResult<Vec<Vec<Vec<i64>>>> {
    fn ring_list(value: &Value) -> GlobeResult<Vec<Vec<i64>>> {
        let rings = value
            .as_array()
            .ok_or_else(|| GlobeError::Topology("polygon arcs must be an array".to_owned()))?;
        rings
            .iter()
            .map(|ring| {
                ring.as_array()
                    .ok_or_else(|| GlobeError::Topology("ring arcs must be an array".to_owned()))?
                    .iter()
                    .map(|v| {
                        v.as_i64().ok_or_else(|| {
                            GlobeError::Topology("arc reference must be an integer".to_owned())
                        })
                    })
                    .collect()
            })
            .collect()
    }

    match geometry.kind.as_deref() {
        Some("Polygon") => Ok(vec![ring_list(&geometry.arcs)?]),
        Some("MultiPolygon") => geometry
            .arcs
            .as_array()
            .ok_or_else(|| GlobeError::Topology("multipolygon arcs must be an array".to_owned()))?
            .iter()
            .map(ring_list)
            .collect(),
        None => Ok(Vec::new()),
        Some(other) => Err(GlobeError::Topology(format!(
            "unsupported geometry type \"{other}\" in objects.countries"
        ))),
    }
}

fn resolve_arc_index(arc_ref: i64, arc_count: usize) -> GlobeResult<usize> {
    let index = if arc_ref < 0 { !arc_ref } else { arc_ref } as usize;
    if index >= arc_count {
        return Err(GlobeError::Topology(format!(
            "arc reference {arc_ref} out of range ({arc_count} arcs)"
        )));
    }
    Ok(index)
}

fn assemble_ring(decoded_arcs: &[Vec<GeoPoint>], ring: &[i64]) -> GlobeResult<Vec<GeoPoint>> {
    let mut points: Vec<GeoPoint> = Vec::new();
    for &arc_ref in ring {
        let index = resolve_arc_index(arc_ref, decoded_arcs.len())?;
        let arc = &decoded_arcs[index];
        if arc_ref < 0 {
            append_deduped(&mut points, arc.iter().rev().copied());
        } else {
            append_deduped(&mut points, arc.iter().copied());
        }
    }
    Ok(points)
}

fn append_deduped(points: &mut Vec<GeoPoint>, source: impl Iterator<Item = GeoPoint>) {
    for point in source {
        if points.last() != Some(&point) {
            points.push(point);
        }
    }
}

// ---------------------------------------------------------------------------
// GeoJSON
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<FeatureProperties>,
    geometry: Option<FeatureGeometry>,
}

#[derive(Debug, Deserialize)]
struct FeatureGeometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: Value,
}

type EdgeKey = (
    (OrderedFloat<f64>, OrderedFloat<f64>),
    (OrderedFloat<f64>, OrderedFloat<f64>),
);

fn edge_key(a: GeoPoint, b: GeoPoint) -> EdgeKey {
    let pa = (OrderedFloat(a.lon), OrderedFloat(a.lat));
    let pb = (OrderedFloat(b.lon), OrderedFloat(b.lat));
    if pa <= pb { (pa, pb) } else { (pb, pa) }
}

impl FeatureCollection {
    fn into_world_map(self) -> GlobeResult<WorldMap> {
        if self.kind != "FeatureCollection" {
            return Err(GlobeError::Topology(format!(
                "expected type \"FeatureCollection\", got \"{}\"",
                self.kind
            )));
        }

        let mut countries = Vec::with_capacity(self.features.len());
        for feature in &self.features {
            let name = feature
                .properties
                .as_ref()
                .and_then(|p| p.name.clone())
                .unwrap_or_default();
            let polygons = match &feature.geometry {
                Some(geometry) => geojson_polygons(geometry)?,
                None => Vec::new(),
            };
            countries.push(Country { name, polygons });
        }

        let borders = shared_edge_mesh(&countries);
        debug!(
            countries = countries.len(),
            border_runs = borders.len(),
            "decoded world feature collection"
        );
        Ok(WorldMap { countries, borders })
    }
}

fn geojson_polygons(geometry: &FeatureGeometry) -> GlobeResult<Vec<Polygon>> {
    fn ring(value: &Value) -> GlobeResult<Vec<GeoPoint>> {
        value
            .as_array()
            .ok_or_else(|| GlobeError::Topology("ring must be an array".to_owned()))?
            .iter()
            .map(|position| {
                let pair = position
                    .as_array()
                    .filter(|p| p.len() >= 2)
                    .ok_or_else(|| {
                        GlobeError::Topology("position must be a [lon, lat] array".to_owned())
                    })?;
                match (pair[0].as_f64(), pair[1].as_f64()) {
                    (Some(lon), Some(lat)) => Ok(GeoPoint::new(lon, lat)),
                    _ => Err(GlobeError::Topology(
                        "position coordinates must be numbers".to_owned(),
                    )),
                }
            })
            .collect()
    }

    fn polygon(value: &Value) -> GlobeResult<Polygon> {
        let rings = value
            .as_array()
            .ok_or_else(|| GlobeError::Topology("polygon must be an array of rings".to_owned()))?
            .iter()
            .map(ring)
            .collect::<GlobeResult<SmallVec<[Vec<GeoPoint>; 1]>>>()?;
        Ok(Polygon { rings })
    }

    match geometry.kind.as_str() {
        "Polygon" => Ok(vec![polygon(&geometry.coordinates)?]),
        "MultiPolygon" => geometry
            .coordinates
            .as_array()
            .ok_or_else(|| GlobeError::Topology("multipolygon must be an array".to_owned()))?
            .iter()
            .map(polygon)
            .collect(),
        other => Err(GlobeError::Topology(format!(
            "unsupported geometry type \"{other}\""
        ))),
    }
}

/// Recovers the shared-border mesh from bare polygons: an edge drawn by two
/// different countries is a border, emitted once as part of a contiguous run.
fn shared_edge_mesh(countries: &[Country]) -> Vec<Vec<GeoPoint>> {
    let mut edge_owner: HashMap<EdgeKey, (usize, bool)> = HashMap::new();
    for (country_index, country) in countries.iter().enumerate() {
        for polygon in &country.polygons {
            for ring in &polygon.rings {
                for pair in ring.windows(2) {
                    edge_owner
                        .entry(edge_key(pair[0], pair[1]))
                        .and_modify(|(owner, shared)| {
                            if *owner != country_index {
                                *shared = true;
                            }
                        })
                        .or_insert((country_index, false));
                }
            }
        }
    }

    // Walk each ring once, emitting maximal runs of shared edges owned by the
    // walking country so every border appears exactly once.
    let mut borders: Vec<Vec<GeoPoint>> = Vec::new();
    for (country_index, country) in countries.iter().enumerate() {
        for polygon in &country.polygons {
            for ring in &polygon.rings {
                let mut run: Vec<GeoPoint> = Vec::new();
                for pair in ring.windows(2) {
                    let (owner, shared) = edge_owner[&edge_key(pair[0], pair[1])];
                    if shared && owner == country_index {
                        if run.is_empty() {
                            run.push(pair[0]);
                        }
                        run.push(pair[1]);
                    } else if run.len() > 1 {
                        borders.push(std::mem::take(&mut run));
                    } else {
                        run.clear();
                    }
                }
                if run.len() > 1 {
                    borders.push(run);
                }
            }
        }
    }
    borders
}

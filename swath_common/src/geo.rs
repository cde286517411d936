/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “Swath” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

/// geometries on the WGS84 surface as we need them for hub queries: bounding boxes,
/// areas-of-interest and footprint intersection tests. Following swath design principles
/// we build on existing crates, which in this domain are [geo](https://docs.rs/geo) and
/// [geojson](https://docs.rs/geojson). All coordinates are lon/lat degrees

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Serialize,Deserialize};
use geo::{BoundingRect, Centroid, Coord, Intersects, LineString, Point, Polygon, Rect};
use geojson::GeoJson;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::angle::{Latitude,Longitude};

pub type GeoGeometry = geo::Geometry<f64>;

pub type Result<T> = std::result::Result<T, GeoError>;

#[derive(Error,Debug)]
pub enum GeoError {
    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("GeoJSON error {0}")]
    GeoJsonError( #[from] geojson::Error),

    #[error("WKT parse error {0}")]
    WktError( String ),

    #[error("no usable geometry in {0}")]
    NoGeometry( String ),
}

/* #region GeoRect ***********************************************************************************************/

/// a lon/lat aligned bounding box. This is what bbox-oriented hub queries (Earth Explorer,
/// STAC) are built from
#[derive(Debug,Clone,Copy,Serialize,Deserialize)]
pub struct GeoRect {
    west: Longitude,
    south: Latitude,
    east: Longitude,
    north: Latitude,
}

impl GeoRect {
    pub fn from_wsen (west: Longitude, south: Latitude, east: Longitude, north: Latitude) -> Self {
        GeoRect { west, south, east, north }
    }

    pub fn from_wsen_degrees (west: f64, south: f64, east: f64, north: f64) -> Self {
        GeoRect {
            west: Longitude::from_degrees(west),
            south: Latitude::from_degrees(south),
            east: Longitude::from_degrees(east),
            north: Latitude::from_degrees(north),
        }
    }

    #[inline] pub fn west(&self)->Longitude { self.west }
    #[inline] pub fn east(&self)->Longitude { self.east }
    #[inline] pub fn south(&self)->Latitude { self.south }
    #[inline] pub fn north(&self)->Latitude { self.north }

    pub fn to_rect (&self)->Rect<f64> {
        Rect::new(
            Coord { x: self.west.degrees(), y: self.south.degrees() },
            Coord { x: self.east.degrees(), y: self.north.degrees() },
        )
    }

    pub fn to_polygon (&self)->Polygon<f64> {
        self.to_rect().to_polygon()
    }

    /// [west,south,east,north] degrees, the order STAC and Earth Explorer expect
    pub fn wsen_degrees (&self)->[f64;4] {
        [self.west.degrees(), self.south.degrees(), self.east.degrees(), self.north.degrees()]
    }
}

impl fmt::Display for GeoRect {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{},{},{}]", self.west.degrees(), self.south.degrees(), self.east.degrees(), self.north.degrees())
    }
}

/* #endregion GeoRect */

/* #region Aoi ***********************************************************************************************/

lazy_static! {
    // first (exterior) ring of a WKT polygon, e.g. POLYGON ((30 10, 40 40, 20 40, 30 10))
    static ref WKT_POLYGON_RE: Regex = Regex::new( r"^\s*POLYGON\s*\(\(([^)]+)\)").unwrap();
}

/// an area of interest used to bound hub queries. Can be created from a bounding box,
/// a WKT polygon string or a GeoJSON file/string holding a polygon feature
#[derive(Debug,Clone)]
pub enum Aoi {
    Bbox(GeoRect),
    Polygon(Polygon<f64>),
}

impl Aoi {
    pub fn from_bbox (rect: GeoRect)->Self {
        Aoi::Bbox(rect)
    }

    pub fn from_bbox_degrees (west: f64, south: f64, east: f64, north: f64)->Self {
        Aoi::Bbox( GeoRect::from_wsen_degrees( west, south, east, north))
    }

    pub fn from_wkt (wkt: &str)->Result<Self> {
        let cap = WKT_POLYGON_RE.captures( wkt.trim())
            .ok_or_else(|| GeoError::WktError( format!("not a WKT polygon: {wkt}")))?;

        let mut coords: Vec<Coord<f64>> = Vec::new();
        for pair in cap[1].split(',') {
            let mut it = pair.split_whitespace();
            let x = it.next().and_then(|s| s.parse::<f64>().ok());
            let y = it.next().and_then(|s| s.parse::<f64>().ok());
            match (x,y) {
                (Some(x),Some(y)) => coords.push( Coord{x,y}),
                _ => return Err( GeoError::WktError( format!("invalid WKT vertex '{pair}'")))
            }
        }
        if coords.len() < 4 {
            return Err( GeoError::WktError( format!("degenerate WKT polygon: {wkt}")));
        }

        Ok( Aoi::Polygon( Polygon::new( LineString::from(coords), Vec::new())) )
    }

    pub fn from_geojson_str (s: &str)->Result<Self> {
        let gj = GeoJson::from_str(s)?;
        let geom = first_geometry(&gj).ok_or_else(|| GeoError::NoGeometry("GeoJSON input".into()))?;

        match geojson_to_geo( geom)? {
            geo::Geometry::Polygon(p) => Ok( Aoi::Polygon(p)),
            geo::Geometry::Rect(r) => Ok( Aoi::Polygon( r.to_polygon())),
            other => Err( GeoError::NoGeometry( format!("unsupported AOI geometry {other:?}")))
        }
    }

    pub fn from_geojson_file (path: impl AsRef<Path>)->Result<Self> {
        let s = fs::read_to_string( path.as_ref())?;
        Self::from_geojson_str(&s)
    }

    /// create an Aoi from a string spec, which is either the pathname of a GeoJSON file
    /// or an inline WKT polygon
    pub fn from_spec (spec: &str)->Result<Self> {
        let path = Path::new(spec);
        if path.is_file() {
            Self::from_geojson_file(path)
        } else {
            Self::from_wkt(spec)
        }
    }

    pub fn to_polygon (&self)->Polygon<f64> {
        match self {
            Aoi::Bbox(rect) => rect.to_polygon(),
            Aoi::Polygon(p) => p.clone(),
        }
    }

    pub fn bbox (&self)->GeoRect {
        match self {
            Aoi::Bbox(rect) => *rect,
            Aoi::Polygon(p) => {
                // a polygon always has a bounding rect
                let r = p.bounding_rect().unwrap();
                GeoRect::from_wsen_degrees( r.min().x, r.min().y, r.max().x, r.max().y)
            }
        }
    }

    /// WKT representation as used in DHuS footprint "Intersects(..)" clauses
    pub fn to_wkt (&self)->String {
        polygon_to_wkt( &self.to_polygon())
    }

    pub fn centroid (&self)->Option<Point<f64>> {
        self.to_polygon().centroid()
    }

    pub fn intersects (&self, geom: &GeoGeometry)->bool {
        match self {
            Aoi::Bbox(rect) => rect.to_rect().intersects(geom),
            Aoi::Polygon(p) => p.intersects(geom),
        }
    }
}

pub fn polygon_to_wkt (p: &Polygon<f64>)->String {
    let mut s = String::with_capacity( 16 + p.exterior().0.len() * 24);
    s.push_str("POLYGON((");
    for (i,c) in p.exterior().0.iter().enumerate() {
        if i > 0 { s.push(','); }
        s.push_str( &format!("{} {}", c.x, c.y));
    }
    s.push_str("))");
    s
}

/* #endregion Aoi */

/* #region GeoJSON conversion ********************************************************************************/

/// pick the first geometry of a GeoJSON document (feature collection, single feature or bare geometry)
pub fn first_geometry (gj: &GeoJson)->Option<&geojson::Geometry> {
    match gj {
        GeoJson::FeatureCollection(fc) => fc.features.first().and_then(|f| f.geometry.as_ref()),
        GeoJson::Feature(f) => f.geometry.as_ref(),
        GeoJson::Geometry(g) => Some(g),
    }
}

pub fn geojson_to_geo (g: &geojson::Geometry)->Result<GeoGeometry> {
    GeoGeometry::try_from( g.value.clone()).map_err(|e| GeoError::NoGeometry( e.to_string()))
}

pub fn geo_to_geojson (g: &GeoGeometry)->geojson::Geometry {
    geojson::Geometry::new( geojson::Value::from(g))
}

pub fn geometry_bounds (g: &GeoGeometry)->Option<GeoRect> {
    g.bounding_rect().map( |r| GeoRect::from_wsen_degrees( r.min().x, r.min().y, r.max().x, r.max().y))
}

/* #endregion GeoJSON conversion */

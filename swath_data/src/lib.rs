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

//! the swath metadata query/filter/download pipeline: per-hub clients (Earth Explorer,
//! Copernicus DHuS, STAC catalogs, local metadata directories) that normalize their
//! heterogeneous responses into a common `SceneMeta` record, plus `SceneCollection`
//! filter/export conveniences and download helpers that stream products to disk

use std::fmt::Debug;
use std::fs::File;
use std::io::Write;
use std::path::{Path,PathBuf};

use async_trait::async_trait;
use chrono::{DateTime,Utc};
use serde::{Deserialize,Serialize};
use serde_json::Value;
use strum::{Display,EnumString};
use tracing::{debug,info,warn};

use swath_common::datetime::DateRange;
use swath_common::geo::{geo_to_geojson, geojson_to_geo, geometry_bounds, Aoi, GeoRect};

mod errors;
pub use errors::*;

pub mod earthexplorer;
pub use earthexplorer::*;

pub mod copernicus;
pub use copernicus::*;

pub mod localdir;
pub use localdir::*;

pub mod stac;
pub use stac::*;

pub mod landsat;
pub use landsat::*;

mod quicklook;
pub use quicklook::*;

/* #region platform / hub enums ******************************************************************************/

pub use swath_common::platform::Platform;

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize,Display)]
pub enum Datahub {
    EarthExplorer,
    Copernicus,
    Stac,
    LocalDir,
}

/* #endregion platform / hub enums */

/* #region normalized scene record ***************************************************************************/

/// satellite image metadata harmonized across the different hubs. Only field presence
/// is guaranteed - providers that do not report a value leave the respective Option empty
#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneMeta {
    pub id: String,

    pub platform: Platform,

    #[serde(default)]
    pub product_type: String,

    #[serde(default)]
    pub orbit_direction: String,

    #[serde(default)]
    pub orbit_number: Option<u32>,

    #[serde(default)]
    pub relative_orbit_number: Option<u32>,

    #[serde(default)]
    pub acquisition_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub ingestion_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub cloud_cover_percentage: Option<f64>,

    #[serde(default)]
    pub format: String,

    #[serde(default)]
    pub size: String,

    pub src_id: String,

    #[serde(default)]
    pub src_url: String,

    pub src_uuid: String,

    /// scene footprint in WGS84. Not part of the flat record - it travels as the
    /// geometry of the GeoJSON feature representation
    #[serde(skip)]
    pub footprint: Option<geojson::Geometry>,
}

impl SceneMeta {
    pub fn footprint_bounds (&self)->Option<GeoRect> {
        let geom = geojson_to_geo( self.footprint.as_ref()?).ok()?;
        geometry_bounds(&geom)
    }

    pub fn intersects (&self, aoi: &Aoi)->bool {
        match self.footprint.as_ref().and_then(|f| geojson_to_geo(f).ok()) {
            Some(geom) => aoi.intersects(&geom),
            None => false
        }
    }

    pub fn to_json (&self)->Result<String> {
        Ok( serde_json::to_string(self)? )
    }

    /// GeoJSON feature with the flat record as properties and the footprint as geometry
    pub fn to_feature (&self)->Result<geojson::Feature> {
        let props = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            _ => return Err( record_error("scene record did not serialize to an object"))
        };

        Ok( geojson::Feature {
            bbox: None,
            geometry: self.footprint.clone(),
            id: None,
            properties: Some(props),
            foreign_members: None,
        })
    }

    pub fn from_feature (feature: &geojson::Feature)->Result<Self> {
        let props = feature.properties.clone()
            .ok_or_else(|| record_error("feature without properties"))?;

        let mut meta: SceneMeta = serde_json::from_value( Value::Object(props))?;
        meta.footprint = feature.geometry.clone();
        Ok(meta)
    }

    pub fn from_feature_json (json: &str)->Result<Self> {
        let feature: geojson::Feature = serde_json::from_str(json)?;
        Self::from_feature(&feature)
    }

    /// save as GeoJSON file in target_dir, with src_id as file name
    pub fn save (&self, target_dir: impl AsRef<Path>)->Result<PathBuf> {
        let path = target_dir.as_ref().join( format!("{}.json", self.src_id));
        let feature = self.to_feature()?;
        let mut file = File::create(&path)?;
        file.write_all( serde_json::to_string(&feature)?.as_bytes())?;
        Ok(path)
    }
}

/* #endregion normalized scene record */

/* #region scene collection **********************************************************************************/

/// an ordered collection of `SceneMeta` records as returned by hub queries, with
/// filter and export conveniences
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct SceneCollection {
    pub scenes: Vec<SceneMeta>,
}

impl SceneCollection {
    pub fn new (scenes: Vec<SceneMeta>)->Self {
        SceneCollection { scenes }
    }

    pub fn len (&self)->usize { self.scenes.len() }
    pub fn is_empty (&self)->bool { self.scenes.is_empty() }

    pub fn iter (&self)->impl Iterator<Item=&SceneMeta> {
        self.scenes.iter()
    }

    /// keep only scenes for which the predicate holds
    pub fn filter (mut self, pred: impl Fn(&SceneMeta)->bool)->Self {
        self.scenes.retain(|m| pred(m));
        self
    }

    /// keep only scenes whose named record field equals the given value,
    /// e.g. ("productType", "S2MSI1C")
    pub fn filter_field (mut self, field: &str, value: &Value)->Result<Self> {
        let mut kept: Vec<SceneMeta> = Vec::with_capacity( self.scenes.len());
        for m in self.scenes.into_iter() {
            let props = serde_json::to_value(&m)?;
            if props.get(field) == Some(value) {
                kept.push(m);
            }
        }
        self.scenes = kept;
        Ok(self)
    }

    /// sort by acquisition date, oldest first (scenes without one go first)
    pub fn sort_by_acquisition_date (mut self)->Self {
        self.scenes.sort_by_key(|m| m.acquisition_date);
        self
    }

    pub fn to_feature_collection (&self)->Result<geojson::FeatureCollection> {
        let mut features: Vec<geojson::Feature> = Vec::with_capacity( self.scenes.len());
        for m in &self.scenes {
            features.push( m.to_feature()?);
        }
        Ok( geojson::FeatureCollection { bbox: None, features, foreign_members: None } )
    }

    /// flat-record CSV export for tabular analysis (footprints are not included)
    pub fn to_csv (&self)->Result<String> {
        let mut writer = csv::Writer::from_writer( Vec::new());
        for m in &self.scenes {
            writer.serialize(m)?;
        }
        let buf = writer.into_inner().map_err(|e| SwathDataError::MiscError( e.to_string()))?;
        String::from_utf8(buf).map_err(|e| SwathDataError::MiscError( e.to_string()))
    }

    /// save all scenes to GeoJSON files in target_dir, with src_ids as file names
    pub fn save (&self, target_dir: impl AsRef<Path>)->Result<()> {
        let target_dir = target_dir.as_ref();
        for m in &self.scenes {
            m.save(target_dir)?;
        }
        Ok(())
    }
}

impl IntoIterator for SceneCollection {
    type Item = SceneMeta;
    type IntoIter = std::vec::IntoIter<SceneMeta>;

    fn into_iter (self)->Self::IntoIter {
        self.scenes.into_iter()
    }
}

/* #endregion scene collection */

/// load a hub config (RON) from a file, e.g. a `CopernicusConfig` with a
/// different deployment URL
pub fn load_config<T> (path: impl AsRef<Path>)->Result<T> where T: serde::de::DeserializeOwned {
    let text = std::fs::read_to_string( path.as_ref())?;
    ron::from_str(&text).map_err(|e| SwathDataError::MiscError( e.to_string()))
}

/* #region query / hub abstraction ***************************************************************************/

/// hub-independent query parameters: platform, area of interest, acquisition time
/// range and optional cloud cover bounds (percent, ignored for SAR platforms)
#[derive(Debug,Clone)]
pub struct SceneQuery {
    pub platform: Platform,
    pub aoi: Aoi,
    pub date: DateRange,
    pub cloud_cover: Option<(f64,f64)>,
}

impl SceneQuery {
    pub fn new (platform: Platform, aoi: Aoi, date: DateRange)->Self {
        SceneQuery { platform, aoi, date, cloud_cover: None }
    }

    pub fn with_cloud_cover (mut self, min: f64, max: f64)->Self {
        self.cloud_cover = Some((min,max));
        self
    }

    /// cloud cover bounds to apply, suppressed for SAR platforms
    pub fn effective_cloud_cover (&self)->Option<(f64,f64)> {
        if self.platform.is_sar() { None } else { self.cloud_cover }
    }
}

/// the common interface of remote hubs and local metadata directories. Download
/// operations take the normalized record so hubs do not have to re-query the
/// provider for footprints or source ids
#[async_trait]
pub trait Hub {
    fn datahub (&self)->Datahub;

    /// query scene metadata and normalize it into a SceneCollection
    async fn query_scenes (&mut self, query: &SceneQuery)->Result<SceneCollection>;

    /// download the product image data of a scene into target_dir, returning the
    /// pathname of the stored product. Complete local files are skipped
    async fn download_scene (&mut self, scene: &SceneMeta, target_dir: &Path)->Result<PathBuf>;

    /// download a quicklook of the scene into target_dir (with a world file sidecar
    /// for rough geocoding)
    async fn download_quicklook (&mut self, scene: &SceneMeta, target_dir: &Path)->Result<PathBuf>;

    /// log out of / disconnect from the hub
    async fn close (&mut self)->Result<()> { Ok(()) }
}

/* #endregion query / hub abstraction */

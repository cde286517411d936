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

//! Earth Explorer (USGS machine-to-machine JSON API) hub client. Metadata search runs
//! against the EE API, product downloads are served from the public Landsat mirror
//! (EE itself is slow for bulk data, see the `landsat` module)

use std::fs;
use std::path::{Path,PathBuf};

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use serde::{de::DeserializeOwned,Deserialize,Serialize};
use serde_json::{json,Value};
use tracing::{debug,info,warn};

use swath_common::datetime::parse_date_spec;
use swath_common::env_get;
use swath_common::fs::pack;
use swath_common::geo::geojson_to_geo;

use crate::errors::*;
use crate::landsat::LandsatProduct;
use crate::quicklook::save_quicklook;
use crate::{Datahub, Hub, Platform, SceneCollection, SceneMeta, SceneQuery};

/* #region config ********************************************************************************************/

#[derive(Clone,Serialize,Deserialize,Debug)]
pub struct EarthExplorerConfig {
    /// API endpoint root
    pub url: String,

    /// cap for scene-search result sets
    pub max_results: u32,
}

impl Default for EarthExplorerConfig {
    fn default ()->Self {
        EarthExplorerConfig {
            url: "https://m2m.cr.usgs.gov/api/api/json/stable".to_string(),
            max_results: 10000,
        }
    }
}

/* #endregion config */

/* #region API payloads **************************************************************************************/

/// the EE response envelope - payloads are carried in `data`, failures in the error fields
#[derive(Deserialize,Debug)]
struct EeResponse<T> {
    data: Option<T>,

    #[serde(rename = "errorCode")]
    error_code: Option<String>,

    #[serde(rename = "errorMessage")]
    error_message: Option<String>,
}

#[derive(Deserialize,Debug,Clone)]
#[serde(rename_all = "camelCase")]
pub struct EeScene {
    pub display_id: String,
    pub entity_id: String,

    #[serde(default)]
    pub cloud_cover: Option<f64>,

    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub acquisition_date: Option<String>,

    #[serde(default)]
    pub modified_date: Option<String>,

    #[serde(default)]
    pub data_access_url: Option<String>,

    #[serde(default)]
    pub browse_url: Option<String>,

    #[serde(default)]
    pub spatial_footprint: Option<geojson::Geometry>,
}

#[derive(Deserialize,Debug)]
struct EeSearchResults {
    #[serde(default)]
    results: Vec<EeScene>,
}

/* #endregion API payloads */

lazy_static! {
    // WRS path/row as reported in EE scene summaries, e.g. ".., Path: 218, Row: 68"
    static ref PATH_ROW_RE: Regex = Regex::new( r"Path:\s*(\d+),\s*Row:\s*(\d+)").unwrap();
    static ref DATASET_RE: Regex = Regex::new( r"dataset_name=([^&]+)").unwrap();
}

pub struct EarthExplorerHub {
    config: EarthExplorerConfig,
    client: Client,
    user: String,
    pw: String,
    token: Option<String>,
}

impl EarthExplorerHub {
    pub fn new (config: EarthExplorerConfig, user: String, pw: String)->Self {
        EarthExplorerHub { config, client: Client::new(), user, pw, token: None }
    }

    /// connect with credentials from the EARTHEXPLORER_USER / EARTHEXPLORER_PW environment
    pub async fn connect ()->Result<Self> {
        let user = env_get("EARTHEXPLORER_USER")?;
        let pw = env_get("EARTHEXPLORER_PW")?;
        Self::connect_with( EarthExplorerConfig::default(), user, pw).await
    }

    pub async fn connect_with (config: EarthExplorerConfig, user: String, pw: String)->Result<Self> {
        let mut hub = Self::new( config, user, pw);
        hub.login().await?;
        Ok(hub)
    }

    async fn login (&mut self)->Result<()> {
        let url = format!("{}/login", self.config.url);
        let payload = json!({ "username": self.user, "password": self.pw });

        let response = self.client.post(&url).json(&payload).send().await
            .map_err( swath_common::net::NetError::HttpError)?;
        let envelope: EeResponse<String> = response.json().await
            .map_err( swath_common::net::NetError::HttpError)?;

        match envelope.data {
            Some(token) => {
                debug!("logged into Earth Explorer as {}", self.user);
                self.token = Some(token);
                Ok(())
            }
            None => Err( SwathDataError::AuthError(
                format!("Earth Explorer: {}", envelope.error_message.unwrap_or_default())))
        }
    }

    /// POST an API operation. A rejected token triggers exactly one re-login and retry
    async fn request<T> (&mut self, op: &str, payload: &Value)->Result<T> where T: DeserializeOwned {
        let url = format!("{}/{}", self.config.url, op);

        for attempt in 0..2 {
            let token = self.token.clone().ok_or_else(|| SwathDataError::AuthError("not logged in".into()))?;
            let response = self.client.post(&url)
                .header( "X-Auth-Token", token)
                .json(payload)
                .send().await.map_err( swath_common::net::NetError::HttpError)?;

            let envelope: EeResponse<T> = response.json().await
                .map_err( swath_common::net::NetError::HttpError)?;

            if let Some(code) = &envelope.error_code {
                if code.starts_with("AUTH") && attempt == 0 {
                    warn!("Earth Explorer token rejected ({code}), re-authenticating");
                    self.login().await?;
                    continue;
                }
                return Err( query_error( format!("{}: {}", code, envelope.error_message.unwrap_or_default())))
            }

            return envelope.data.ok_or_else(|| query_error( format!("empty {op} response")))
        }
        unreachable!()
    }

    /// full EE records for given scene entity ids (quicklook URLs, footprints)
    pub async fn scene_metadata (&mut self, platform: Platform, entity_ids: &[&str])->Result<Vec<EeScene>> {
        let payload = json!({ "datasetName": platform.to_string(), "entityIds": entity_ids });
        self.request( "metadata", &payload).await
    }

    pub fn normalize_scene (&self, platform: Platform, scene: &EeScene)->Result<SceneMeta> {
        let now = chrono::Utc::now();

        // the dataset name is only reported as a query parameter of the access URL
        let platform = scene.data_access_url.as_deref()
            .and_then(|url| DATASET_RE.captures(url))
            .and_then(|cap| cap[1].parse::<Platform>().ok())
            .unwrap_or(platform);

        let (orbit_number, relative_orbit_number) = match PATH_ROW_RE.captures(&scene.summary) {
            Some(cap) => (cap[1].parse().ok(), cap[2].parse().ok()),
            None => (None,None)
        };

        Ok( SceneMeta {
            id: scene.display_id.clone(),
            platform,
            product_type: "L1TP".to_string(),
            orbit_direction: "DESCENDING".to_string(),
            orbit_number,
            relative_orbit_number,
            acquisition_date: scene.acquisition_date.as_deref().and_then(|s| parse_date_spec(s, now).ok()),
            ingestion_date: scene.modified_date.as_deref().and_then(|s| parse_date_spec(s, now).ok()),
            cloud_cover_percentage: scene.cloud_cover.map(|c| (c * 100.0).round() / 100.0),
            format: "GeoTIFF".to_string(),
            size: String::new(),
            src_id: scene.display_id.clone(),
            src_url: scene.data_access_url.clone().unwrap_or_default(),
            src_uuid: scene.entity_id.clone(),
            footprint: scene.spatial_footprint.clone(),
        })
    }
}

#[async_trait]
impl Hub for EarthExplorerHub {
    fn datahub (&self)->Datahub { Datahub::EarthExplorer }

    async fn query_scenes (&mut self, query: &SceneQuery)->Result<SceneCollection> {
        let bbox = query.aoi.bbox();
        let [west,south,east,north] = bbox.wsen_degrees();

        let mut scene_filter = json!({
            "spatialFilter": {
                "filterType": "mbr",
                "lowerLeft":  { "latitude": south, "longitude": west },
                "upperRight": { "latitude": north, "longitude": east }
            },
            "acquisitionFilter": {
                "start": query.date.query_start(),
                "end": query.date.query_end()
            }
        });
        if let Some((min,max)) = query.effective_cloud_cover() {
            scene_filter["cloudCoverFilter"] = json!({ "min": min as i64, "max": max as i64, "includeUnknown": true });
        }

        let payload = json!({
            "datasetName": query.platform.to_string(),
            "maxResults": self.config.max_results,
            "sceneFilter": scene_filter
        });

        let results: EeSearchResults = self.request( "scene-search", &payload).await?;
        info!("Earth Explorer query returned {} scene(s)", results.results.len());

        let mut scenes: Vec<SceneMeta> = Vec::with_capacity( results.results.len());
        for s in &results.results {
            match self.normalize_scene( query.platform, s) {
                Ok(meta) => scenes.push(meta),
                Err(e) => warn!("dropping malformed EE record {}: {e}", s.entity_id)
            }
        }

        Ok( SceneCollection::new(scenes) )
    }

    /// download the product files from the public Landsat mirror, then compress the
    /// product directory into a single archive and remove the originals
    async fn download_scene (&mut self, scene: &SceneMeta, target_dir: &Path)->Result<PathBuf> {
        let product = LandsatProduct::new( &scene.src_id)?;
        let product_dir = product.download( &self.client, target_dir, None).await?;

        let zip_path = target_dir.join( format!("{}.zip", scene.src_id));
        pack( &product_dir, &zip_path)?;
        fs::remove_dir_all(&product_dir)?;

        info!("stored {} to {:?}", scene.src_id, zip_path);
        Ok(zip_path)
    }

    async fn download_quicklook (&mut self, scene: &SceneMeta, target_dir: &Path)->Result<PathBuf> {
        let meta = self.scene_metadata( scene.platform, &[scene.src_uuid.as_str()]).await?;
        let rec = meta.first().ok_or_else(|| query_error( format!("no EE metadata for {}", scene.src_uuid)))?;

        let url = rec.browse_url.as_deref()
            .ok_or_else(|| query_error( format!("no browse URL for {}", scene.src_uuid)))?;
        let bounds = rec.spatial_footprint.as_ref()
            .and_then(|f| geojson_to_geo(f).ok())
            .and_then(|g| swath_common::geo::geometry_bounds(&g))
            .ok_or_else(|| record_error( format!("no footprint bounds for {}", scene.src_uuid)))?;

        let req = self.client.get(url).basic_auth( &self.user, Some(&self.pw));
        save_quicklook( req, &bounds, &rec.display_id, target_dir).await
    }

    async fn close (&mut self)->Result<()> {
        if self.token.is_some() {
            let _: Option<Value> = self.request( "logout", &json!({})).await.ok();
            self.token = None;
        }
        Ok(())
    }
}

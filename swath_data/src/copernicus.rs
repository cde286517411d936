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

//! Copernicus DHuS hub client (SciHub and compatible deployments). Metadata queries go
//! through the OpenSearch endpoint with `start`/`rows` paging, product and quicklook
//! retrieval through the OData endpoints. The DHuS JSON feed collapses single-element
//! arrays into bare objects and types all typed fields as name/content pairs - the
//! normalization below untangles both

use std::path::{Path,PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize,Serialize};
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug,info,warn};

use swath_common::datetime::{parse_date_spec,secs};
use swath_common::env_get;
use swath_common::fs::file_length;
use swath_common::geo::{geo_to_geojson, Aoi};
use swath_common::net::{content_length_of, download_request, from_json, NetError};

use crate::errors::*;
use crate::quicklook::save_quicklook;
use crate::{Datahub, Hub, Platform, SceneCollection, SceneMeta, SceneQuery};

/* #region config ********************************************************************************************/

#[derive(Clone,Serialize,Deserialize,Debug)]
pub struct CopernicusConfig {
    /// DHuS deployment root (e.g. https://scihub.copernicus.eu/dhus)
    pub url: String,

    /// OpenSearch page size
    pub rows: u32,

    /// delay before the re-auth retry
    pub retry_delay: Duration,
}

impl Default for CopernicusConfig {
    fn default ()->Self {
        CopernicusConfig {
            url: "https://scihub.copernicus.eu/dhus".to_string(),
            rows: 100,
            retry_delay: secs(5),
        }
    }
}

/* #endregion config */

/* #region DHuS feed *****************************************************************************************/

/// single-element arrays arrive as bare objects in the DHuS JSON rendering
#[derive(Deserialize,Debug)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec (self)->Vec<T> {
        match self {
            OneOrMany::Many(v) => v,
            OneOrMany::One(x) => vec![x],
        }
    }

    pub fn as_slice (&self)->&[T] {
        match self {
            OneOrMany::Many(v) => v.as_slice(),
            OneOrMany::One(x) => std::slice::from_ref(x),
        }
    }
}

impl<T> Default for OneOrMany<T> {
    fn default ()->Self { OneOrMany::Many(Vec::new()) }
}

#[derive(Deserialize,Debug)]
pub struct DhusField {
    pub name: String,

    #[serde(default)]
    pub content: Value,
}

#[derive(Deserialize,Debug)]
pub struct DhusLink {
    pub href: String,

    #[serde(default)]
    pub rel: Option<String>,
}

#[derive(Deserialize,Debug)]
pub struct DhusEntry {
    pub title: String,
    pub id: String,

    #[serde(default)]
    pub link: OneOrMany<DhusLink>,

    #[serde(default)]
    pub str: OneOrMany<DhusField>,

    #[serde(default)]
    pub int: OneOrMany<DhusField>,

    #[serde(default)]
    pub date: OneOrMany<DhusField>,

    #[serde(default)]
    pub double: OneOrMany<DhusField>,
}

#[derive(Deserialize,Debug,Default)]
struct DhusFeed {
    #[serde(rename = "opensearch:totalResults", default)]
    total_results: Option<Value>,

    #[serde(default)]
    entry: Option<OneOrMany<DhusEntry>>,
}

#[derive(Deserialize,Debug)]
struct DhusEnvelope {
    #[serde(default)]
    feed: DhusFeed,
}

fn field_value (fields: &[DhusField], name: &str)->Option<Value> {
    fields.iter().find(|f| f.name == name).map(|f| f.content.clone())
}

fn str_field (fields: &[DhusField], name: &str)->Option<String> {
    field_value( fields, name).and_then(|v| v.as_str().map(|s| s.to_string()))
}

fn num_field (fields: &[DhusField], name: &str)->Option<f64> {
    match field_value( fields, name)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None
    }
}

/* #endregion DHuS feed */

pub struct CopernicusHub {
    config: CopernicusConfig,
    client: Client,
    user: String,
    pw: String,
}

impl CopernicusHub {
    /// connect with credentials from the COPERNICUS_USER / COPERNICUS_PW environment
    pub fn connect ()->Result<Self> {
        Self::connect_config( CopernicusConfig::default())
    }

    pub fn connect_config (config: CopernicusConfig)->Result<Self> {
        let user = env_get("COPERNICUS_USER")?;
        let pw = env_get("COPERNICUS_PW")?;
        Ok( Self::connect_with( config, user, pw) )
    }

    pub fn connect_with (config: CopernicusConfig, user: String, pw: String)->Self {
        CopernicusHub { config, client: Client::new(), user, pw }
    }

    /// the OpenSearch query term for a SceneQuery
    pub fn build_query (query: &SceneQuery)->String {
        let mut q = format!("platformname:{} AND beginposition:[{} TO {}]",
            query.platform, query.date.query_start(), query.date.query_end());

        q.push_str( &format!(" AND footprint:\"Intersects({})\"", query.aoi.to_wkt()));

        if let Some((min,max)) = query.effective_cloud_cover() {
            q.push_str( &format!(" AND cloudcoverpercentage:[{} TO {}]", min as i64, max as i64));
        }
        q
    }

    async fn search_page (&self, q: &str, start: u32)->Result<(u64,Vec<DhusEntry>)> {
        let url = format!("{}/search", self.config.url);
        let start = start.to_string();
        let rows = self.config.rows.to_string();

        let mut attempt = 0;
        loop {
            let req = self.client.get(&url)
                .basic_auth( &self.user, Some(&self.pw))
                .query( &[
                    ("format", "json"),
                    ("q", q),
                    ("start", start.as_str()),
                    ("rows", rows.as_str()),
                ]);

            let result: std::result::Result<DhusEnvelope,NetError> = async {
                let response = req.send().await?;
                from_json(response).await
            }.await;

            match result {
                Err( NetError::AuthError(msg)) if attempt == 0 => {
                    attempt += 1;
                    warn!("DHuS rejected credentials ({msg}), retrying once");
                    sleep( self.config.retry_delay).await;
                }
                Err(e) => return Err(e.into()),
                Ok(envelope) => {
                    let total = match envelope.feed.total_results {
                        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
                        Some(Value::String(s)) => s.parse().unwrap_or(0),
                        _ => 0
                    };
                    let entries = envelope.feed.entry.map(|e| e.into_vec()).unwrap_or_default();
                    return Ok( (total, entries) )
                }
            }
        }
    }

    pub fn normalize_entry (&self, entry: &DhusEntry)->Result<SceneMeta> {
        let now = chrono::Utc::now();

        let strs = entry.str.as_slice();
        let ints = entry.int.as_slice();
        let dates = entry.date.as_slice();
        let doubles = entry.double.as_slice();

        let identifier = str_field( strs, "identifier").unwrap_or_else(|| entry.title.clone());
        let platform = str_field( strs, "platformname")
            .and_then(|p| p.parse::<Platform>().ok())
            .ok_or_else(|| record_error( format!("no platformname in entry {}", entry.id)))?;

        // DHuS reports the footprint as WKT
        let footprint = str_field( strs, "footprint")
            .and_then(|wkt| Aoi::from_wkt(&wkt).ok())
            .map(|aoi| geo_to_geojson( &geo::Geometry::Polygon( aoi.to_polygon())));

        let download_link = match &entry.link {
            OneOrMany::Many(links) => links.iter().find(|l| l.rel.is_none()).map(|l| l.href.clone()),
            OneOrMany::One(l) => Some( l.href.clone()),
        };

        Ok( SceneMeta {
            id: identifier.clone(),
            platform,
            product_type: str_field( strs, "producttype").unwrap_or_default(),
            orbit_direction: str_field( strs, "orbitdirection").unwrap_or_default(),
            orbit_number: num_field( ints, "orbitnumber").map(|n| n as u32),
            relative_orbit_number: num_field( ints, "relativeorbitnumber").map(|n| n as u32),
            acquisition_date: str_field( dates, "beginposition").and_then(|s| parse_date_spec( &s, now).ok()),
            ingestion_date: str_field( dates, "ingestiondate").and_then(|s| parse_date_spec( &s, now).ok()),
            cloud_cover_percentage: num_field( doubles, "cloudcoverpercentage").map(|c| (c * 100.0).round() / 100.0),
            format: str_field( strs, "format").unwrap_or_default(),
            size: str_field( strs, "size").unwrap_or_default(),
            src_id: identifier,
            src_url: download_link.unwrap_or_default(),
            src_uuid: entry.id.clone(),
            footprint,
        })
    }

    fn product_url (&self, uuid: &str)->String {
        format!("{}/odata/v1/Products('{}')/$value", self.config.url, uuid)
    }

    fn quicklook_url (&self, uuid: &str)->String {
        format!("{}/odata/v1/Products('{}')/Products('Quicklook')/$value", self.config.url, uuid)
    }
}

#[async_trait]
impl Hub for CopernicusHub {
    fn datahub (&self)->Datahub { Datahub::Copernicus }

    async fn query_scenes (&mut self, query: &SceneQuery)->Result<SceneCollection> {
        let q = Self::build_query(query);
        debug!("DHuS query: {q}");

        let mut scenes: Vec<SceneMeta> = Vec::new();
        let mut start = 0;

        loop {
            let (total,entries) = self.search_page( &q, start).await?;
            if entries.is_empty() { break }

            start += entries.len() as u32;
            for entry in &entries {
                match self.normalize_entry(entry) {
                    Ok(meta) => scenes.push(meta),
                    Err(e) => warn!("dropping malformed DHuS entry {}: {e}", entry.id)
                }
            }
            if scenes.len() as u64 >= total { break }
        }

        info!("DHuS query returned {} scene(s)", scenes.len());
        Ok( SceneCollection::new(scenes) )
    }

    /// download the product archive via OData. An existing local file of the advertised
    /// size is not retrieved again, a size mismatch after retrieval is an error
    async fn download_scene (&mut self, scene: &SceneMeta, target_dir: &Path)->Result<PathBuf> {
        let url = self.product_url( &scene.src_uuid);
        let path = target_dir.join( format!("{}.zip", scene.src_id));

        let remote_len = content_length_of(
            self.client.head(&url).basic_auth( &self.user, Some(&self.pw))).await.ok();

        if let (Some(local_len), Some(remote_len)) = (file_length(&path), remote_len) {
            if local_len == remote_len {
                info!("product {} already downloaded", scene.src_id);
                return Ok(path)
            }
        }

        let mut attempt = 0;
        let written = loop {
            let req = self.client.get(&url).basic_auth( &self.user, Some(&self.pw));
            match download_request( req, &path).await {
                Err( NetError::AuthError(msg)) if attempt == 0 => {
                    attempt += 1;
                    warn!("DHuS rejected credentials ({msg}), retrying once");
                    sleep( self.config.retry_delay).await;
                }
                Err(e) => return Err(e.into()),
                Ok(len) => break len
            }
        };

        if let Some(remote_len) = remote_len {
            if written != remote_len {
                std::fs::remove_file(&path)?;
                return Err( SwathDataError::MiscError(
                    format!("size mismatch for {} ({written} of {remote_len} bytes)", scene.src_id)))
            }
        }

        info!("stored {} to {:?}", scene.src_id, path);
        Ok(path)
    }

    async fn download_quicklook (&mut self, scene: &SceneMeta, target_dir: &Path)->Result<PathBuf> {
        let bounds = scene.footprint_bounds()
            .ok_or_else(|| record_error( format!("no footprint bounds for {}", scene.src_id)))?;

        let url = self.quicklook_url( &scene.src_uuid);
        let req = self.client.get(&url).basic_auth( &self.user, Some(&self.pw));
        save_quicklook( req, &bounds, &scene.src_id, target_dir).await
    }
}

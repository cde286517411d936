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

//! hub adapter over `swath_stac`: runs item-search queries against a STAC catalog and
//! normalizes the returned items into `SceneMeta` records. Which catalog collection a
//! platform maps to is configuration (catalogs name them differently)

use std::path::{Path,PathBuf};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize,Serialize};
use serde_json::json;
use tracing::{debug,info,warn};

use swath_common::datetime::parse_date_spec;
use swath_common::geo::geo_to_geojson;
use swath_common::net::get_differing_size_file;
use swath_stac::{Asset, Item, Search, StacClient};

use crate::errors::*;
use crate::quicklook::save_quicklook;
use crate::{Datahub, Hub, Platform, SceneCollection, SceneMeta, SceneQuery};

/* #region config ********************************************************************************************/

#[derive(Clone,Serialize,Deserialize,Debug)]
pub struct StacHubConfig {
    /// STAC API endpoint root
    pub url: String,

    /// platform -> catalog collection id
    pub collections: Vec<(Platform,String)>,

    /// cap for query result sets
    pub max_results: u32,
}

impl Default for StacHubConfig {
    fn default ()->Self {
        StacHubConfig {
            url: "https://earth-search.aws.element84.com/v1".to_string(),
            collections: vec![
                (Platform::Sentinel1, "sentinel-1-grd".to_string()),
                (Platform::Sentinel2, "sentinel-2-l2a".to_string()),
                (Platform::Landsat8, "landsat-c2-l2".to_string()),
            ],
            max_results: 1000,
        }
    }
}

/* #endregion config */

pub struct StacHub {
    config: StacHubConfig,
    client: StacClient,

    /// separate plain client for asset downloads
    http: Client,
}

impl StacHub {
    pub fn new (config: StacHubConfig)->Self {
        let client = StacClient::new( &config.url);
        StacHub { config, client, http: Client::new() }
    }

    /// catalog endpoint from the STAC_API_URL environment variable
    pub fn from_env ()->Result<Self> {
        let client = StacClient::from_env()?;
        let config = StacHubConfig { url: client.url().to_string(), ..StacHubConfig::default() };
        Ok( StacHub { config, client, http: Client::new() } )
    }

    fn collection_for (&self, platform: Platform)->Option<&str> {
        self.config.collections.iter()
            .find(|(p,_)| *p == platform)
            .map(|(_,c)| c.as_str())
    }

    /// normalize a STAC item into the common record shape
    pub fn item_to_scene (&self, platform: Platform, item: &Item)->Result<SceneMeta> {
        let now = chrono::Utc::now();
        let props = &item.properties;

        let product_type = props.str_field("product_type")
            .or_else(|| props.str_field("s2:product_type"))
            .or_else(|| props.str_field("sar:product_type"))
            .unwrap_or("")
            .to_string();

        let data_asset = preferred_asset(item);

        Ok( SceneMeta {
            id: item.id.clone(),
            platform,
            product_type,
            orbit_direction: props.str_field("sat:orbit_state").unwrap_or("").to_uppercase(),
            orbit_number: props.i64_field("sat:absolute_orbit").map(|n| n as u32),
            relative_orbit_number: props.i64_field("sat:relative_orbit").map(|n| n as u32),
            acquisition_date: props.datetime,
            ingestion_date: props.str_field("created").and_then(|s| parse_date_spec( s, now).ok()),
            cloud_cover_percentage: item.cloud_cover().map(|c| (c * 100.0).round() / 100.0),
            format: data_asset.and_then(|a| a.media_type.clone()).unwrap_or_default(),
            size: String::new(),
            src_id: item.id.clone(),
            src_url: item.self_href()
                .map(|s| s.to_string())
                .or_else(|| data_asset.map(|a| a.href.clone()))
                .unwrap_or_default(),
            src_uuid: item.id.clone(),
            footprint: item.geometry.clone(),
        })
    }
}

/// the asset to download for a scene: an explicit "data" role wins, then the
/// common visual/data keys
fn preferred_asset (item: &Item)->Option<&Asset> {
    item.assets.values()
        .find(|a| a.roles.as_ref().is_some_and(|r| r.iter().any(|s| s == "data")))
        .or_else(|| item.asset("visual"))
        .or_else(|| item.asset("data"))
}

fn thumbnail_asset (item: &Item)->Option<&Asset> {
    item.asset("thumbnail")
        .or_else(|| item.assets.values().find(|a|
            a.roles.as_ref().is_some_and(|r| r.iter().any(|s| s == "thumbnail" || s == "overview"))))
}

#[async_trait]
impl Hub for StacHub {
    fn datahub (&self)->Datahub { Datahub::Stac }

    async fn query_scenes (&mut self, query: &SceneQuery)->Result<SceneCollection> {
        let geom = geo_to_geojson( &geo::Geometry::Polygon( query.aoi.to_polygon()));

        let mut search = Search::new()
            .with_intersects(geom)
            .with_datetime_range( &query.date.start, &query.date.end)
            .with_limit( self.config.max_results);

        if let Some(collection) = self.collection_for( query.platform) {
            search = search.with_collections( &[collection]);
        } else {
            warn!("no collection configured for {}, searching the whole catalog", query.platform);
        }

        if let Some((min,max)) = query.effective_cloud_cover() {
            search.query = Some( json!({ "eo:cloud_cover": { "gte": min, "lt": max } }));
        }

        let items = self.client.get_items(&search).await?;

        let mut scenes: Vec<SceneMeta> = Vec::with_capacity( items.len());
        for item in &items {
            match self.item_to_scene( query.platform, item) {
                Ok(meta) => {
                    // not all endpoints implement the query extension, so filter again
                    if let Some((min,max)) = query.effective_cloud_cover() {
                        let cc = meta.cloud_cover_percentage.unwrap_or(0.0);
                        if cc < min || cc >= max { continue }
                    }
                    scenes.push(meta);
                }
                Err(e) => warn!("dropping STAC item {}: {e}", item.id)
            }
        }

        info!("STAC query returned {} scene(s)", scenes.len());
        Ok( SceneCollection::new(scenes) )
    }

    async fn download_scene (&mut self, scene: &SceneMeta, target_dir: &Path)->Result<PathBuf> {
        let search = Search { ids: Some( vec![scene.src_uuid.clone()]), limit: Some(1), ..Search::default() };
        let items = self.client.get_items(&search).await?;
        let item = items.first()
            .ok_or_else(|| query_error( format!("item {} no longer in catalog", scene.src_uuid)))?;

        let asset = preferred_asset(item)
            .ok_or_else(|| query_error( format!("no data asset on item {}", item.id)))?;

        let path = get_differing_size_file( &self.http, &asset.href, &None, target_dir).await?;
        info!("stored {} to {:?}", scene.src_id, path);
        Ok(path)
    }

    async fn download_quicklook (&mut self, scene: &SceneMeta, target_dir: &Path)->Result<PathBuf> {
        let search = Search { ids: Some( vec![scene.src_uuid.clone()]), limit: Some(1), ..Search::default() };
        let items = self.client.get_items(&search).await?;
        let item = items.first()
            .ok_or_else(|| query_error( format!("item {} no longer in catalog", scene.src_uuid)))?;

        let asset = thumbnail_asset(item)
            .ok_or_else(|| query_error( format!("no thumbnail asset on item {}", item.id)))?;
        let bounds = scene.footprint_bounds()
            .ok_or_else(|| record_error( format!("no footprint bounds for {}", scene.src_id)))?;

        save_quicklook( self.http.get(&asset.href), &bounds, &scene.src_id, target_dir).await
    }
}

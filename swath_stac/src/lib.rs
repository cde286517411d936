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

//! data structures and a search client for the
//! [STAC API](https://github.com/radiantearth/stac-api-spec) item-search and collections
//! endpoints. The structures are plain serde mappings of the wire format - unknown
//! item properties are preserved so provider extensions (eo:, sar:, sat:) stay accessible

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime,Utc};
use serde::{Deserialize,Serialize};
use serde_json::{Map,Value};

mod errors;
pub use errors::*;

pub mod client;
pub use client::*;

/* #region STAC structures ************************************************************************************/

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct Link {
    pub href: String,
    pub rel: String,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct Asset {
    pub href: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct ItemProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<DateTime<Utc>>,

    /// extension fields (eo:cloud_cover, sat:orbit_state, ..) as delivered by the catalog
    #[serde(flatten)]
    pub extra: Map<String,Value>,
}

impl ItemProperties {
    pub fn str_field<'a> (&'a self, key: &str)->Option<&'a str> {
        self.extra.get(key).and_then(|v| v.as_str())
    }
    pub fn f64_field (&self, key: &str)->Option<f64> {
        self.extra.get(key).and_then(|v| v.as_f64())
    }
    pub fn i64_field (&self, key: &str)->Option<i64> {
        self.extra.get(key).and_then(|v| v.as_i64())
    }
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct Item {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stac_version: Option<String>,

    pub geometry: Option<geojson::Geometry>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,

    pub properties: ItemProperties,

    #[serde(default)]
    pub links: Vec<Link>,

    #[serde(default)]
    pub assets: HashMap<String,Asset>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
}

impl Item {
    pub fn cloud_cover (&self)->Option<f64> {
        self.properties.f64_field("eo:cloud_cover")
    }
    pub fn platform<'a> (&'a self)->Option<&'a str> {
        self.properties.str_field("platform")
    }
    pub fn self_href<'a> (&'a self)->Option<&'a str> {
        self.links.iter().find(|l| l.rel == "self").map(|l| l.href.as_str())
    }
    pub fn asset<'a> (&'a self, key: &str)->Option<&'a Asset> {
        self.assets.get(key)
    }
}

/// search result context (STAC context extension; some servers use the OGC
/// numberMatched/numberReturned fields instead, see `ItemCollection::matched`)
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct Context {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub returned: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct ItemCollection {
    #[serde(default)]
    pub features: Vec<Value>, // raw features so the configured ItemReader decides how to map them

    #[serde(default)]
    pub links: Vec<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,

    #[serde(rename = "numberMatched", skip_serializing_if = "Option::is_none")]
    pub number_matched: Option<u64>,
}

impl ItemCollection {
    pub fn matched (&self)->Option<u64> {
        self.context.as_ref().and_then(|c| c.matched).or(self.number_matched)
    }

    pub fn next_href<'a> (&'a self)->Option<&'a str> {
        self.links.iter().find(|l| l.rel == "next").map(|l| l.href.as_str())
    }
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct Collection {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent: Option<Value>,

    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug,Clone,Deserialize)]
pub struct Collections {
    #[serde(default)]
    pub collections: Vec<Collection>,

    #[serde(default)]
    pub links: Vec<Link>,
}

/* #endregion STAC structures */

/* #region search parameters **********************************************************************************/

/// item-search parameters, see the
/// [query parameter table](https://github.com/radiantearth/stac-api-spec/tree/master/item-search#query-parameter-table)
#[derive(Debug,Clone,Default,Serialize)]
pub struct Search {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f64;4]>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub intersects: Option<geojson::Geometry>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub collections: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Value>,
}

impl Search {
    pub fn new ()->Self { Search::default() }

    pub fn with_bbox (mut self, bbox: [f64;4])->Self { self.bbox = Some(bbox); self }
    pub fn with_intersects (mut self, geom: geojson::Geometry)->Self { self.intersects = Some(geom); self }
    pub fn with_collections (mut self, ids: &[&str])->Self {
        self.collections = Some( ids.iter().map(|s| s.to_string()).collect()); self
    }
    pub fn with_limit (mut self, limit: u32)->Self { self.limit = Some(limit); self }

    pub fn with_datetime_range (mut self, start: &DateTime<Utc>, end: &DateTime<Utc>)->Self {
        self.datetime = Some( format!("{}/{}",
            start.format("%Y-%m-%dT%H:%M:%SZ"), end.format("%Y-%m-%dT%H:%M:%SZ")));
        self
    }

    /// query parameter pairs for the GET fallback - spatial parameters are stringified
    pub fn to_query_pairs (&self)->Vec<(String,String)> {
        let mut pairs: Vec<(String,String)> = Vec::new();

        if let Some(bbox) = &self.bbox {
            pairs.push(("bbox".into(), bbox.map(|v| v.to_string()).join(",")));
        }
        if let Some(geom) = &self.intersects {
            pairs.push(("intersects".into(), serde_json::to_string(geom).unwrap_or_default()));
        }
        if let Some(dt) = &self.datetime {
            pairs.push(("datetime".into(), dt.clone()));
        }
        if let Some(cols) = &self.collections {
            pairs.push(("collections".into(), cols.join(",")));
        }
        if let Some(ids) = &self.ids {
            pairs.push(("ids".into(), ids.join(",")));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".into(), limit.to_string()));
        }
        pairs
    }
}

/* #endregion search parameters */

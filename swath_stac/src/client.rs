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

use reqwest::{Client,Response,StatusCode};
use serde_json::Value;
use tracing::{debug,info};

use swath_common::env_get;

use crate::errors::*;
use crate::{Collection, Collections, Item, ItemCollection, Search};

/// how a raw search feature is turned into an Item. Replace the default to rebuild
/// asset hrefs for the file system in use (e.g. a local mirror of the catalog)
pub type ItemReader = fn(Value)->Result<Item>;

pub fn default_item_reader (feature: Value)->Result<Item> {
    serde_json::from_value(feature).map_err(|e| SwathStacError::JsonError( e.to_string()))
}

/// default number of items a search returns if the Search does not set its own limit
pub const DEFAULT_SEARCH_LIMIT: usize = 100;

pub struct StacClient {
    url: String, // endpoint root, normalized to no trailing slash
    client: Client,
    read_item: ItemReader,
}

impl StacClient {
    pub fn new (url: &str)->Self {
        StacClient {
            url: url.trim_end_matches('/').to_string(),
            client: Client::new(),
            read_item: default_item_reader,
        }
    }

    /// endpoint from the STAC_API_URL environment variable
    pub fn from_env ()->Result<Self> {
        let url = env_get("STAC_API_URL")
            .map_err(|_| SwathStacError::NoEndpointError("STAC_API_URL not set".into()))?;
        Ok( Self::new( &url) )
    }

    pub fn with_item_reader (mut self, read_item: ItemReader)->Self {
        self.read_item = read_item;
        self
    }

    pub fn url (&self)->&str { &self.url }

    fn search_url (&self)->String {
        format!("{}/search", self.url)
    }

    /// POST the search, falling back to GET with stringified spatial parameters if the
    /// endpoint answers 405 (static catalogs frequently only implement GET search)
    async fn query (&self, url: &str, search: &Search)->Result<ItemCollection> {
        let response = self.client.post(url).json(search).send().await?;

        let response = if response.status() == StatusCode::METHOD_NOT_ALLOWED {
            debug!("POST not allowed on {url}, falling back to GET");
            self.client.get(url).query( &search.to_query_pairs()).send().await?
        } else {
            response
        };

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err( api_error( format!("{status}: {text}")))
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice( &bytes).map_err(|e| SwathStacError::JsonError( e.to_string()))
    }

    /// lightweight query to get the number of results to expect
    pub async fn count (&self, search: &Search)->Result<u64> {
        let mut probe = search.clone();
        probe.limit = Some(1);

        let page = self.query( &self.search_url(), &probe).await?;
        page.matched().ok_or_else(|| api_error("endpoint reports no match count"))
    }

    /// get items matching the search, following rel="next" page links until the
    /// requested limit is reached or the result set is exhausted
    pub async fn get_items (&self, search: &Search)->Result<Vec<Item>> {
        let limit = search.limit.map(|l| l as usize).unwrap_or(DEFAULT_SEARCH_LIMIT);
        let mut items: Vec<Item> = Vec::new();
        let mut next_page: Option<String> = Some( self.search_url());

        while let Some(url) = next_page.take() {
            let page = self.query( &url, search).await?;
            next_page = page.next_href().map(|href| href.to_string());

            for feature in page.features {
                if items.len() == limit {
                    next_page = None;
                    break;
                }
                items.push( (self.read_item)(feature)?);
            }
        }

        info!("STAC search returned {} item(s)", items.len());
        Ok(items)
    }

    /// get all collections of the catalog
    pub async fn get_collections (&self)->Result<Vec<Collection>> {
        let url = format!("{}/collections", self.url);
        let response = self.client.get(&url).send().await?;
        let cols: Collections = json_checked(response).await?;
        Ok( cols.collections )
    }

    /// get a single collection by id
    pub async fn get_collection (&self, collection_id: &str)->Result<Collection> {
        let url = format!("{}/collections/{}", self.url, collection_id);
        let response = self.client.get(&url).send().await?;
        json_checked(response).await
    }
}

async fn json_checked<T> (response: Response)->Result<T> where T: serde::de::DeserializeOwned {
    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        return Err( api_error( format!("{status}: {text}")))
    }
    let bytes = response.bytes().await?;
    serde_json::from_slice( &bytes).map_err(|e| SwathStacError::JsonError( e.to_string()))
}

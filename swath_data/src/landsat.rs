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

//! Landsat product downloads from the public Google Cloud Storage mirror. Earth
//! Explorer is the place to search Landsat metadata but is slow for bulk data - the
//! mirror serves the collection-1 band files directly, keyed by product id

use std::path::{Path,PathBuf};

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use tracing::{debug,info};

use swath_common::fs::ensure_dir;
use swath_common::net::get_differing_size_file;

use crate::errors::*;

pub const LANDSAT_BASE_URL: &str = "https://storage.googleapis.com/gcp-public-data-landsat";

lazy_static! {
    // e.g. LC08_L1TP_218068_20191031_20191031_01_RT
    static ref PRODUCT_ID_RE: Regex =
        Regex::new( r"^(L[COTEM]0[45789])_(\w{4})_(\d{3})(\d{3})_(\d{8})_(\d{8})_(\d{2})_(\w{2})$").unwrap();
}

/// the fields encoded in a Landsat product identifier
#[derive(Debug,Clone,PartialEq)]
pub struct LandsatProductId {
    pub sensor: String,
    pub correction: String,
    pub path: u32,
    pub row: u32,
    pub acquisition_date: NaiveDate,
    pub processing_date: NaiveDate,
    pub collection: u32,
    pub tier: String,
}

pub fn parse_product_id (product_id: &str)->Result<LandsatProductId> {
    let cap = PRODUCT_ID_RE.captures(product_id)
        .ok_or_else(|| record_error( format!("not a Landsat product id: {product_id}")))?;

    let parse_date = |s: &str| NaiveDate::parse_from_str( s, "%Y%m%d")
        .map_err(|_| record_error( format!("invalid date in product id: {product_id}")));

    Ok( LandsatProductId {
        sensor: cap[1].to_string(),
        correction: cap[2].to_string(),
        path: cap[3].parse().unwrap(),
        row: cap[4].parse().unwrap(),
        acquisition_date: parse_date(&cap[5])?,
        processing_date: parse_date(&cap[6])?,
        collection: cap[7].parse().unwrap(),
        tier: cap[8].to_string(),
    })
}

/// per-sensor file labels available on the mirror
fn sensor_files (sensor: &str)->Result<Vec<String>> {
    let bands: &[&str] = match sensor {
        "LC08" | "LC09" => &["B1","B2","B3","B4","B5","B6","B7","B8","B9","B10","B11"],
        "LE07" => &["B1","B2","B3","B4","B5","B6_VCID_1","B6_VCID_2","B7","B8"],
        "LT04" | "LT05" => &["B1","B2","B3","B4","B5","B6","B7"],
        other => return Err( record_error( format!("unknown Landsat sensor {other}")))
    };

    let mut files: Vec<String> = bands.iter().map(|b| format!("{b}.TIF")).collect();
    files.push("BQA.TIF".to_string());
    files.push("MTL.txt".to_string());
    files.push("ANG.txt".to_string());
    Ok(files)
}

/// a downloadable Landsat product on the GCS mirror
pub struct LandsatProduct {
    pub product_id: String,
    pub meta: LandsatProductId,
    base_url: String,
}

impl LandsatProduct {
    pub fn new (product_id: &str)->Result<Self> {
        let meta = parse_product_id(product_id)?;
        let base_url = format!("{}/{}/{:02}/{:03}/{:03}/{}/",
            LANDSAT_BASE_URL, meta.sensor, meta.collection, meta.path, meta.row, product_id);

        Ok( LandsatProduct { product_id: product_id.to_string(), meta, base_url } )
    }

    /// all file labels this product provides
    pub fn available_files (&self)->Result<Vec<String>> {
        sensor_files( &self.meta.sensor)
    }

    pub fn url_for (&self, label: &str)->String {
        if label.contains("README") {
            format!("{}{}", self.base_url, label)
        } else {
            format!("{}{}_{}", self.base_url, self.product_id, label)
        }
    }

    /// download the product files into `<out_dir>/<product_id>/`. Files that are already
    /// complete locally are skipped. `files` restricts the download to a subset of the
    /// available labels. Returns the product directory
    pub async fn download (&self, client: &Client, out_dir: &Path, files: Option<&[String]>)->Result<PathBuf> {
        let dst_dir = out_dir.join(&self.product_id);
        ensure_dir(&dst_dir)?;

        let available = self.available_files()?;
        let labels: Vec<&String> = match files {
            Some(sel) => available.iter().filter(|l| sel.contains(l)).collect(),
            None => available.iter().collect()
        };

        let n_files = labels.len();
        for label in labels {
            let url = self.url_for(label);
            debug!("retrieving {url}");
            get_differing_size_file( client, &url, &None, &dst_dir).await?;
        }

        info!("downloaded {} file(s) of {}", n_files, self.product_id);
        Ok(dst_dir)
    }
}

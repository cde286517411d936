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

//! quicklook retrieval: fetch the preview JPEG of a scene, crop the no-data borders
//! and store it with an ESRI world file sidecar that shifts the image to the location
//! of the scene footprint (a rough geocoding, good enough for browsing)

use std::fs::File;
use std::io::Write;
use std::path::{Path,PathBuf};

use image::RgbImage;
use reqwest::RequestBuilder;
use tracing::{debug,info};

use swath_common::geo::GeoRect;
use swath_common::net::NetError;

use crate::errors::*;

/// values below this count as JPEG compression noise when cropping no-data borders
const NOISE_THRESHOLD: u8 = 50;

/// content bounding box (x0,y0,x1,y1 inclusive) of all pixels with a channel above the
/// noise threshold, or None for an entirely dark image
pub fn content_window (img: &RgbImage)->Option<(u32,u32,u32,u32)> {
    let (w,h) = img.dimensions();
    let (mut x0, mut y0, mut x1, mut y1) = (w, h, 0u32, 0u32);
    let mut found = false;

    for (x,y,p) in img.enumerate_pixels() {
        if p.0.iter().any(|&v| v >= NOISE_THRESHOLD) {
            found = true;
            if x < x0 { x0 = x }
            if y < y0 { y0 = y }
            if x > x1 { x1 = x }
            if y > y1 { y1 = y }
        }
    }

    if found { Some((x0,y0,x1,y1)) } else { None }
}

/// retrieve a quicklook image with the prepared request, crop it to its content and
/// save it as `<src_id>.jpg` plus world file into target_dir
pub async fn save_quicklook (req: RequestBuilder, bounds: &GeoRect, src_id: &str, target_dir: &Path)->Result<PathBuf> {
    let response = req.send().await.map_err(NetError::HttpError)?;
    if !response.status().is_success() {
        return Err( NetError::OpFailed( format!("quicklook request failed with {}", response.status())).into())
    }
    let bytes = response.bytes().await.map_err(NetError::HttpError)?;

    let img = image::load_from_memory(&bytes)?.to_rgb8();
    let cropped = match content_window(&img) {
        Some((x0,y0,x1,y1)) => image::imageops::crop_imm( &img, x0, y0, x1-x0+1, y1-y0+1).to_image(),
        None => img
    };

    let path = target_dir.join( format!("{src_id}.jpg"));
    cropped.save(&path)?;

    write_quicklook_worldfile( &path, bounds, cropped.width(), cropped.height())?;

    info!("saved quicklook {:?}", path);
    Ok(path)
}

/// world file (.jgw) for an image covering the given footprint bounds. Pixel sizes are
/// planar degrees of the bounds divided by the image dimensions
pub fn write_quicklook_worldfile (image_path: &Path, bounds: &GeoRect, width: u32, height: u32)->Result<PathBuf> {
    let [west,south,east,north] = bounds.wsen_degrees();
    let dist_x = (east - west) / width as f64;
    let dist_y = (north - south) / height as f64;

    let path = image_path.with_extension("jgw");
    let mut file = File::create(&path)?;
    writeln!( file, "{dist_x}")?;
    writeln!( file, "{}", 0.0)?;
    writeln!( file, "{}", 0.0)?;
    writeln!( file, "{}", -dist_y)?;
    writeln!( file, "{west}")?;
    writeln!( file, "{north}")?;

    Ok(path)
}

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

//! GeoTIFF read/write on the pure-Rust `tiff` crate. Georeferencing goes through the
//! ModelPixelScale/ModelTiepoint tags plus a minimal GeoKey directory carrying the
//! EPSG code. Rasters with more than one band are stored band-sequential as one
//! grayscale IFD per band, each tagged with the same georeferencing

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ndarray::{Array3, Axis};
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::{colortype, TiffEncoder};
use tiff::tags::Tag;
use tracing::debug;

use crate::errors::*;
use crate::{GeoTransform, RasterImage};

const TAG_MODEL_PIXEL_SCALE: u16 = 33550;
const TAG_MODEL_TIEPOINT: u16 = 33922;
const TAG_GEO_KEY_DIRECTORY: u16 = 34735;

const KEY_GT_MODEL_TYPE: u16 = 1024;
const KEY_GT_RASTER_TYPE: u16 = 1025;
const KEY_GEOGRAPHIC_TYPE: u16 = 2048;
const KEY_PROJECTED_CS_TYPE: u16 = 3072;

const MODEL_TYPE_PROJECTED: u16 = 1;
const MODEL_TYPE_GEOGRAPHIC: u16 = 2;
const RASTER_PIXEL_IS_AREA: u16 = 1;

/// the sample type a raster is written with. `Min` picks the smallest type that can
/// represent the data without loss
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum RasterDtype {
    U8,
    U16,
    F32,
    Min,
}

fn is_geographic (epsg: u32)->bool {
    epsg == 4326 || (4000..5000).contains(&epsg)
}

fn geo_key_directory (epsg: u32)->[u16;16] {
    let (model,loc_key) = if is_geographic(epsg) {
        (MODEL_TYPE_GEOGRAPHIC, KEY_GEOGRAPHIC_TYPE)
    } else {
        (MODEL_TYPE_PROJECTED, KEY_PROJECTED_CS_TYPE)
    };

    [
        1, 1, 0, 3, // version, revision, minor, key count
        KEY_GT_MODEL_TYPE, 0, 1, model,
        KEY_GT_RASTER_TYPE, 0, 1, RASTER_PIXEL_IS_AREA,
        loc_key, 0, 1, epsg as u16,
    ]
}

fn minimum_dtype (img: &RasterImage)->RasterDtype {
    let mut dtype = RasterDtype::U8;

    for &v in img.array().iter() {
        if !v.is_finite() || v.fract() != 0.0 || v < 0.0 || v > 65535.0 {
            return RasterDtype::F32
        }
        if v > 255.0 { dtype = RasterDtype::U16 }
    }
    dtype
}

/* #region writing ********************************************************************************************/

pub fn write_geotiff (img: &RasterImage, path: &Path, dtype: RasterDtype)->Result<()> {
    let dtype = if dtype == RasterDtype::Min { minimum_dtype(img) } else { dtype };

    let file = File::create(path)?;
    let mut encoder = TiffEncoder::new(file)?;

    let gt = img.transform.as_array();
    let pixel_scale = [gt[1], gt[5].abs(), 0.0];
    let tiepoint = [0.0, 0.0, 0.0, gt[0], gt[3], 0.0];
    let geo_keys = geo_key_directory( img.epsg);

    let (cols,rows) = (img.cols() as u32, img.rows() as u32);

    for band in img.array().axis_iter( Axis(0)) {
        let band = band.to_owned();
        let samples = band.as_slice().unwrap(); // owned standard-layout array

        match dtype {
            RasterDtype::U8 => {
                let data: Vec<u8> = samples.iter().map(|&v| v.clamp(0.0,255.0).round() as u8).collect();
                let mut image = encoder.new_image::<colortype::Gray8>( cols, rows)?;
                image.encoder().write_tag( Tag::Unknown(TAG_MODEL_PIXEL_SCALE), &pixel_scale[..])?;
                image.encoder().write_tag( Tag::Unknown(TAG_MODEL_TIEPOINT), &tiepoint[..])?;
                image.encoder().write_tag( Tag::Unknown(TAG_GEO_KEY_DIRECTORY), &geo_keys[..])?;
                image.write_data(&data)?;
            }
            RasterDtype::U16 => {
                let data: Vec<u16> = samples.iter().map(|&v| v.clamp(0.0,65535.0).round() as u16).collect();
                let mut image = encoder.new_image::<colortype::Gray16>( cols, rows)?;
                image.encoder().write_tag( Tag::Unknown(TAG_MODEL_PIXEL_SCALE), &pixel_scale[..])?;
                image.encoder().write_tag( Tag::Unknown(TAG_MODEL_TIEPOINT), &tiepoint[..])?;
                image.encoder().write_tag( Tag::Unknown(TAG_GEO_KEY_DIRECTORY), &geo_keys[..])?;
                image.write_data(&data)?;
            }
            _ => {
                let mut image = encoder.new_image::<colortype::Gray32Float>( cols, rows)?;
                image.encoder().write_tag( Tag::Unknown(TAG_MODEL_PIXEL_SCALE), &pixel_scale[..])?;
                image.encoder().write_tag( Tag::Unknown(TAG_MODEL_TIEPOINT), &tiepoint[..])?;
                image.encoder().write_tag( Tag::Unknown(TAG_GEO_KEY_DIRECTORY), &geo_keys[..])?;
                image.write_data(samples)?;
            }
        }
    }

    debug!("wrote {} band(s) to {:?}", img.n_bands(), path);
    Ok(())
}

/* #endregion writing */

/* #region reading ********************************************************************************************/

fn samples_to_f32 (result: DecodingResult)->Result<Vec<f32>> {
    Ok( match result {
        DecodingResult::U8(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::U16(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::U32(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::I8(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::I16(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::I32(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::F32(v) => v,
        DecodingResult::F64(v) => v.into_iter().map(|x| x as f32).collect(),
        _ => return Err( unsupported("TIFF sample format"))
    })
}

pub fn read_geotiff (path: &Path)->Result<RasterImage> {
    let file = BufReader::new( File::open(path)?);
    let mut decoder = Decoder::new(file)?;

    let (cols,rows) = decoder.dimensions()?;

    let pixel_scale = decoder.find_tag( Tag::Unknown(TAG_MODEL_PIXEL_SCALE))?
        .map(|v| v.into_f64_vec()).transpose()?
        .ok_or_else(|| SwathRasterError::NotGeoreferencedError( format!("{path:?} has no pixel scale")))?;
    let tiepoint = decoder.find_tag( Tag::Unknown(TAG_MODEL_TIEPOINT))?
        .map(|v| v.into_f64_vec()).transpose()?
        .ok_or_else(|| SwathRasterError::NotGeoreferencedError( format!("{path:?} has no tiepoint")))?;

    if pixel_scale.len() < 2 || tiepoint.len() < 6 {
        return Err( SwathRasterError::NotGeoreferencedError( format!("{path:?} has malformed geo tags")))
    }
    let transform = GeoTransform::from_origin( tiepoint[3], tiepoint[4], pixel_scale[0], pixel_scale[1]);

    let epsg = decoder.find_tag( Tag::Unknown(TAG_GEO_KEY_DIRECTORY))?
        .map(|v| v.into_u32_vec()).transpose()?
        .and_then(|keys| epsg_of_geo_keys(&keys))
        .unwrap_or(0);

    let mut planes: Vec<Vec<f32>> = Vec::new();
    loop {
        let (c,r) = decoder.dimensions()?;
        if (c,r) != (cols,rows) {
            return Err( unsupported( format!("mixed band dimensions in {path:?}")))
        }
        planes.push( samples_to_f32( decoder.read_image()?)?);

        if !decoder.more_images() { break }
        decoder.next_image()?;
    }

    let n_bands = planes.len();
    let data: Vec<f32> = planes.concat();
    let arr = Array3::from_shape_vec( (n_bands, rows as usize, cols as usize), data)
        .map_err(|e| unsupported( e.to_string()))?;

    Ok( RasterImage::new( arr, transform, epsg) )
}

fn epsg_of_geo_keys (keys: &[u32])->Option<u32> {
    // 4-tuples after the header: key id, tag location, count, value
    let mut epsg = None;
    for entry in keys.get(4..).unwrap_or(&[]).chunks(4) {
        if entry.len() == 4 && entry[1] == 0 {
            if entry[0] == KEY_PROJECTED_CS_TYPE as u32 {
                return Some(entry[3])
            }
            if entry[0] == KEY_GEOGRAPHIC_TYPE as u32 {
                epsg = Some(entry[3]);
            }
        }
    }
    epsg
}

/* #endregion reading */

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

//! digital number to top-of-atmosphere conversion, as described in
//! <https://www.usgs.gov/land-resources/nli/landsat/using-usgs-landsat-level-1-data-product>.
//! Landsat bands are rescaled with the factors from the product MTL file (reflectance
//! bands to TOA reflectance, thermal bands to at-sensor brightness temperature),
//! Sentinel-2 L1C digital numbers are a fixed 1e4 reflectance scale

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use ndarray::{Array3, Axis};
use regex::Regex;

use swath_common::platform::Platform;

use crate::errors::*;

pub const SENTINEL2_SCALE: f32 = 10000.0;

/* #region MTL metadata ***************************************************************************************/

lazy_static! {
    // MTL lines are KEY = value, values optionally quoted
    static ref MTL_LINE_RE: Regex = Regex::new( r#"^\s*(\w+)\s*=\s*"?([^"]*?)"?\s*$"#).unwrap();
}

/// the flattened key/value pairs of a Landsat MTL file (group nesting carries no
/// information for the rescale factors, all keys are unique)
#[derive(Debug,Clone)]
pub struct MtlMetadata {
    values: HashMap<String,String>,
}

impl MtlMetadata {
    pub fn from_str (text: &str)->Self {
        let mut values: HashMap<String,String> = HashMap::new();

        for line in text.lines() {
            if let Some(cap) = MTL_LINE_RE.captures(line) {
                let key = cap[1].to_string();
                if key == "GROUP" || key == "END_GROUP" { continue }
                values.insert( key, cap[2].to_string());
            }
        }

        MtlMetadata { values }
    }

    pub fn from_file (path: impl AsRef<Path>)->Result<Self> {
        let text = fs::read_to_string( path.as_ref())?;
        Ok( Self::from_str(&text) )
    }

    pub fn get<'a> (&'a self, key: &str)->Option<&'a str> {
        self.values.get(key).map(|s| s.as_str())
    }

    pub fn f64 (&self, key: &str)->Result<f64> {
        self.get(key)
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| SwathRasterError::MtlError( format!("no numeric field {key}")))
    }
}

/* #endregion MTL metadata */

/* #region band lookup ****************************************************************************************/

/// MTL band id for a wavelength name, per platform
pub fn lookup_band (platform: Platform, wavelength: &str)->Result<&'static str> {
    let band = match platform {
        Platform::Landsat5 => match wavelength {
            "blue" => "1", "green" => "2", "red" => "3", "nir" => "4",
            "swir1" => "5", "tirs" => "6", "swir2" => "7",
            _ => return Err( SwathRasterError::MtlError( format!("unknown Landsat-5 wavelength {wavelength}")))
        },
        Platform::Landsat7 => match wavelength {
            "blue" => "1", "green" => "2", "red" => "3", "nir" => "4", "swir1" => "5",
            "tirs1" => "6_VCID_1", "tirs2" => "6_VCID_2", "swir2" => "7", "pan" => "8",
            _ => return Err( SwathRasterError::MtlError( format!("unknown Landsat-7 wavelength {wavelength}")))
        },
        Platform::Landsat8 => match wavelength {
            "aerosol" => "1", "blue" => "2", "green" => "3", "red" => "4", "nir" => "5",
            "swir1" => "6", "swir2" => "7", "pan" => "8", "cirrus" => "9",
            "tirs1" => "10", "tirs2" => "11",
            _ => return Err( SwathRasterError::MtlError( format!("unknown Landsat-8 wavelength {wavelength}")))
        },
        other => return Err( unsupported( format!("band lookup for {other}")))
    };
    Ok(band)
}

pub fn lookup_bands (platform: Platform, wavelengths: &[&str])->Result<Vec<&'static str>> {
    wavelengths.iter().map(|w| lookup_band( platform, &w.to_lowercase())).collect()
}

fn is_thermal_band (platform: Platform, band: &str)->bool {
    if platform == Platform::Landsat8 {
        band == "10" || band == "11"
    } else {
        band.starts_with('6')
    }
}

/* #endregion band lookup */

/* #region conversion *****************************************************************************************/

/// rescale a thermal band to at-sensor brightness temperature [K]:
/// L = ML*dn + AL,  T = K2 / ln(K1/L + 1)
fn brightness_temp (dn: f32, ml: f64, al: f64, k1: f64, k2: f64)->f32 {
    let radiance = ml * dn as f64 + al;
    (k2 / (k1 / radiance + 1.0).ln()) as f32
}

/// rescale a reflectance band to TOA reflectance corrected for sun angle:
/// rho = (MR*dn + AR) / sin(sun_elevation)
fn reflectance (dn: f32, mr: f64, ar: f64, sin_sun_elevation: f64)->f32 {
    ((mr * dn as f64 + ar) / sin_sun_elevation) as f32
}

/// convert a (bands,rows,cols) digital number array to TOA values in place. The array
/// bands have to be stacked in the order of the `wavelengths` list
pub fn dn2toa (arr: &mut Array3<f32>, platform: Platform, mtl: Option<&MtlMetadata>, wavelengths: Option<&[&str]>)->Result<()> {
    if platform.is_landsat() {
        let mtl = mtl.ok_or_else(|| SwathRasterError::MtlError( format!("MTL metadata required for {platform}")))?;
        let wavelengths = wavelengths.ok_or_else(|| SwathRasterError::MtlError("wavelength list required for Landsat".into()))?;

        let bands = lookup_bands( platform, wavelengths)?;
        if bands.len() != arr.shape()[0] {
            return Err( SwathRasterError::MtlError(
                format!("{} wavelengths for {} array bands", bands.len(), arr.shape()[0])))
        }

        let sun_elevation = mtl.f64("SUN_ELEVATION")?.to_radians().sin();

        for (idx,band) in bands.iter().enumerate() {
            let mut plane = arr.index_axis_mut( Axis(0), idx);

            if is_thermal_band( platform, band) {
                let k1 = mtl.f64( &format!("K1_CONSTANT_BAND_{band}"))?;
                let k2 = mtl.f64( &format!("K2_CONSTANT_BAND_{band}"))?;
                let ml = mtl.f64( &format!("RADIANCE_MULT_BAND_{band}"))?;
                let al = mtl.f64( &format!("RADIANCE_ADD_BAND_{band}"))?;

                plane.mapv_inplace(|dn| brightness_temp( dn, ml, al, k1, k2));

            } else {
                let mr = mtl.f64( &format!("REFLECTANCE_MULT_BAND_{band}"))?;
                let ar = mtl.f64( &format!("REFLECTANCE_ADD_BAND_{band}"))?;

                plane.mapv_inplace(|dn| reflectance( dn, mr, ar, sun_elevation));
            }
        }
        Ok(())

    } else if platform == Platform::Sentinel2 {
        arr.mapv_inplace(|dn| dn / SENTINEL2_SCALE);
        Ok(())

    } else {
        Err( unsupported( format!("dn2toa for {platform} [Landsat-5/7/8, Sentinel-2]")))
    }
}

/* #endregion conversion */

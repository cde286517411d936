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

use ndarray::Array3;
use swath_common::platform::Platform;
use swath_raster::toa::{dn2toa, lookup_bands, MtlMetadata};

const MTL: &str = r#"GROUP = L1_METADATA_FILE
  GROUP = IMAGE_ATTRIBUTES
    SUN_ELEVATION = 30.0
  END_GROUP = IMAGE_ATTRIBUTES
  GROUP = RADIOMETRIC_RESCALING
    REFLECTANCE_MULT_BAND_4 = 2.0E-05
    REFLECTANCE_ADD_BAND_4 = -0.1
    RADIANCE_MULT_BAND_10 = 3.342E-04
    RADIANCE_ADD_BAND_10 = 0.1
  END_GROUP = RADIOMETRIC_RESCALING
  GROUP = TIRS_THERMAL_CONSTANTS
    K1_CONSTANT_BAND_10 = 774.8853
    K2_CONSTANT_BAND_10 = 1321.0789
  END_GROUP = TIRS_THERMAL_CONSTANTS
END_GROUP = L1_METADATA_FILE
END
"#;

#[test]
fn test_mtl_parsing () {
    let mtl = MtlMetadata::from_str(MTL);

    assert_eq!( mtl.f64("SUN_ELEVATION").unwrap(), 30.0);
    assert_eq!( mtl.f64("REFLECTANCE_MULT_BAND_4").unwrap(), 2.0e-5);
    assert_eq!( mtl.f64("K2_CONSTANT_BAND_10").unwrap(), 1321.0789);
    assert!( mtl.f64("NO_SUCH_FIELD").is_err());
    assert!( mtl.get("GROUP").is_none()); // structure keys are not values
}

#[test]
fn test_lookup_bands () {
    assert_eq!( lookup_bands( Platform::Landsat8, &["Red","NIR","TIRS1"]).unwrap(), vec!["4","5","10"]);
    assert_eq!( lookup_bands( Platform::Landsat7, &["tirs1"]).unwrap(), vec!["6_VCID_1"]);
    assert_eq!( lookup_bands( Platform::Landsat5, &["tirs"]).unwrap(), vec!["6"]);
    assert!( lookup_bands( Platform::Landsat5, &["cirrus"]).is_err());
}

#[test]
fn test_landsat8_reflectance_and_thermal () {
    let mtl = MtlMetadata::from_str(MTL);

    // band 0 = red (reflectance), band 1 = tirs1 (brightness temperature)
    let mut arr = Array3::from_elem( (2,2,2), 10000.0f32);
    dn2toa( &mut arr, Platform::Landsat8, Some(&mtl), Some(&["red","tirs1"])).unwrap();

    // rho = (2e-5 * 10000 - 0.1) / sin(30 deg) = 0.1 / 0.5
    assert!( (arr[[0,0,0]] - 0.2).abs() < 1e-6);

    // L = 3.342e-4 * 10000 + 0.1 = 3.442; T = K2 / ln(K1/L + 1)
    let expected = 1321.0789 / (774.8853f64 / 3.442 + 1.0).ln();
    assert!( (arr[[1,0,0]] as f64 - expected).abs() < 1e-3);
}

#[test]
fn test_sentinel2_scale () {
    let mut arr = Array3::from_elem( (1,2,2), 5000.0f32);
    dn2toa( &mut arr, Platform::Sentinel2, None, None).unwrap();
    assert_eq!( arr[[0,0,0]], 0.5);
}

#[test]
fn test_dn2toa_rejects_bad_input () {
    let mut arr = Array3::from_elem( (1,2,2), 1.0f32);

    // Landsat without MTL
    assert!( dn2toa( &mut arr, Platform::Landsat8, None, Some(&["red"])).is_err());

    // unsupported platform
    assert!( dn2toa( &mut arr, Platform::Sentinel1, None, None).is_err());

    // band count mismatch
    let mtl = MtlMetadata::from_str(MTL);
    assert!( dn2toa( &mut arr, Platform::Landsat8, Some(&mtl), Some(&["red","nir"])).is_err());
}

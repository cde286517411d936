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
use swath_raster::{GeoTransform, RasterDtype, RasterImage, write_world_file};

fn test_image (bands: usize)->RasterImage {
    let mut arr = Array3::zeros( (bands,4,6));
    for ((b,r,c), v) in arr.indexed_iter_mut() {
        *v = (b * 100 + r * 6 + c) as f32;
    }
    RasterImage::new( arr, GeoTransform::from_origin( 10.0, 50.0, 0.25, 0.25), 4326)
}

#[test]
fn test_single_band_roundtrip () {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("scene.tif");

    let img = test_image(1);
    img.write_geotiff( &path, RasterDtype::F32).unwrap();

    let restored = RasterImage::from_geotiff(&path).unwrap();
    assert_eq!( restored.n_bands(), 1);
    assert_eq!( restored.rows(), 4);
    assert_eq!( restored.cols(), 6);
    assert_eq!( restored.epsg, 4326);
    assert_eq!( restored.transform, img.transform);
    assert_eq!( restored.array(), img.array());
}

#[test]
fn test_multiband_roundtrip_u16 () {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("stack.tif");

    let img = test_image(3);
    img.write_geotiff( &path, RasterDtype::U16).unwrap();

    let restored = RasterImage::from_geotiff(&path).unwrap();
    assert_eq!( restored.n_bands(), 3);
    assert_eq!( restored.array(), img.array()); // integral test values survive u16
}

#[test]
fn test_min_dtype_selection () {
    let tmp = tempfile::tempdir().unwrap();

    // values 0..23 fit into u8
    let img = test_image(1);
    img.write_geotiff( tmp.path().join("u8.tif"), RasterDtype::Min).unwrap();
    let restored = RasterImage::from_geotiff( tmp.path().join("u8.tif")).unwrap();
    assert_eq!( restored.array(), img.array());

    // fractional values force f32
    let mut img = test_image(1);
    img.array_mut()[[0,0,0]] = 0.5;
    img.write_geotiff( tmp.path().join("f32.tif"), RasterDtype::Min).unwrap();
    let restored = RasterImage::from_geotiff( tmp.path().join("f32.tif")).unwrap();
    assert_eq!( restored.array()[[0,0,0]], 0.5);
}

#[test]
fn test_projected_epsg () {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("utm.tif");

    let mut img = test_image(1);
    img.epsg = 32632; // UTM 32N
    img.transform = GeoTransform::from_origin( 500000.0, 5300000.0, 10.0, 10.0);
    img.write_geotiff( &path, RasterDtype::U8).unwrap();

    let restored = RasterImage::from_geotiff(&path).unwrap();
    assert_eq!( restored.epsg, 32632);
    assert_eq!( restored.transform.origin(), (500000.0, 5300000.0));
}

#[test]
fn test_world_file () {
    let tmp = tempfile::tempdir().unwrap();
    let img_path = tmp.path().join("scene.tif");

    let gt = GeoTransform::from_origin( 10.0, 50.0, 0.25, 0.25);
    let path = write_world_file( &img_path, &gt).unwrap();
    assert!( path.ends_with("scene.tfw"));

    let lines: Vec<f64> = std::fs::read_to_string(&path).unwrap()
        .lines().map(|l| l.parse().unwrap()).collect();
    assert_eq!( lines[0], 0.25);
    assert_eq!( lines[3], -0.25);
    assert_eq!( lines[4], 10.125); // pixel center convention
    assert_eq!( lines[5], 49.875);
}

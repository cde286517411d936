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

use image::{Rgb,RgbImage};
use swath_common::geo::GeoRect;
use swath_data::{content_window, write_quicklook_worldfile};

#[test]
fn test_content_window () {
    // dark frame with a bright 3x2 block at (4,5)
    let mut img = RgbImage::from_pixel( 10, 10, Rgb([10,10,10]));
    for x in 4..7 {
        for y in 5..7 {
            img.put_pixel( x, y, Rgb([200,180,90]));
        }
    }

    assert_eq!( content_window(&img), Some((4,5,6,6)));

    let dark = RgbImage::from_pixel( 4, 4, Rgb([5,5,5]));
    assert_eq!( content_window(&dark), None);
}

#[test]
fn test_worldfile () {
    let tmp = tempfile::tempdir().unwrap();
    let img_path = tmp.path().join("scene.jpg");

    let bounds = GeoRect::from_wsen_degrees( 10.0, 40.0, 12.0, 41.0);
    let path = write_quicklook_worldfile( &img_path, &bounds, 200, 100).unwrap();
    assert!( path.ends_with("scene.jgw"));

    let lines: Vec<f64> = std::fs::read_to_string(&path).unwrap()
        .lines().map(|l| l.parse().unwrap()).collect();
    assert_eq!( lines.len(), 6);
    assert_eq!( lines[0], 0.01);  // (12-10)/200
    assert_eq!( lines[1], 0.0);
    assert_eq!( lines[2], 0.0);
    assert_eq!( lines[3], -0.01); // -(41-40)/100
    assert_eq!( lines[4], 10.0);  // upper left x
    assert_eq!( lines[5], 41.0);  // upper left y
}

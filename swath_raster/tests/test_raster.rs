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

use ndarray::{Array3, s};
use swath_raster::{BandOrder, GeoTransform, RasterImage, Window};

/// 2 bands, 10 rows, 20 cols, 0.5 deg pixels, origin at (10E,50N)
fn test_image ()->RasterImage {
    let mut arr = Array3::zeros( (2,10,20));
    for ((b,r,c), v) in arr.indexed_iter_mut() {
        *v = (b * 1000 + r * 20 + c) as f32;
    }
    RasterImage::new( arr, GeoTransform::from_origin( 10.0, 50.0, 0.5, 0.5), 4326)
}

#[test]
fn test_transform_math () {
    let gt = GeoTransform::from_origin( 10.0, 50.0, 0.5, 0.5);

    assert!( gt.is_north_up());
    assert_eq!( gt.xy(0,0), (10.0,50.0));
    assert_eq!( gt.xy(4,2), (12.0,49.0));
    assert_eq!( gt.bounds( 20, 10), [10.0, 45.0, 20.0, 50.0]);

    let wt = gt.window_transform( 2, 2);
    assert_eq!( wt.origin(), (11.0,49.0));
}

#[test]
fn test_band_order_views () {
    let mut img = test_image();

    assert_eq!( img.view().shape(), &[2,10,20]);
    assert_eq!( img.view()[[1,2,3]], 1043.0);

    img.band_order = BandOrder::Last;
    assert_eq!( img.view().shape(), &[10,20,2]);
    assert_eq!( img.view()[[2,3,1]], 1043.0);
}

#[test]
fn test_valid_data_window () {
    let mut arr = Array3::zeros( (1,10,20));
    arr.slice_mut( s![0, 2..5, 3..9]).fill(7.0);
    let img = RasterImage::new( arr, GeoTransform::from_origin( 10.0, 50.0, 0.5, 0.5), 4326);

    let w = img.valid_data_window(0.0).unwrap();
    assert_eq!( w, Window::new( 3, 2, 6, 3));

    let bounds = img.valid_data_bounds(0.0).unwrap();
    assert_eq!( bounds, [11.5, 47.5, 14.5, 49.0]);

    let empty = RasterImage::new( Array3::zeros((1,4,4)), GeoTransform::from_origin(0.0,0.0,1.0,1.0), 4326);
    assert!( empty.valid_data_window(0.0).is_none());
}

#[test]
fn test_mask_crop () {
    let mut img = test_image();
    img.mask_bbox( &[11.0, 48.0, 13.0, 49.5], true, 0.0).unwrap();

    // 4 cols x 3 rows of 0.5 deg pixels starting at col 2, row 1
    assert_eq!( img.cols(), 4);
    assert_eq!( img.rows(), 3);
    assert_eq!( img.transform.origin(), (11.0,49.5));
    assert_eq!( img.array()[[0,0,0]], 22.0); // former (row 1, col 2)
}

#[test]
fn test_mask_without_crop () {
    let mut img = test_image();
    img.mask_bbox( &[11.0, 48.0, 13.0, 49.5], false, -1.0).unwrap();

    assert_eq!( img.cols(), 20);
    assert_eq!( img.array()[[0,0,0]], -1.0);   // outside
    assert_eq!( img.array()[[0,1,2]], 22.0);   // inside, unchanged
    assert_eq!( img.nodata, Some(-1.0));
}

#[test]
fn test_mask_outside_raster_fails () {
    let mut img = test_image();
    assert!( img.mask_bbox( &[100.0, 0.0, 101.0, 1.0], true, 0.0).is_err());
}

#[test]
fn test_pad_to_bbox () {
    let mut img = test_image();
    img.pad_to_bbox( &[9.0, 45.0, 21.0, 51.0], -9.0).unwrap();

    // one degree of 0.5 deg fill pixels left, right and top, none at the bottom
    assert_eq!( img.cols(), 24);
    assert_eq!( img.rows(), 12);
    assert_eq!( img.transform.origin(), (9.0,51.0));
    assert_eq!( img.array()[[0,0,0]], -9.0);
    assert_eq!( img.array()[[0,2,2]], 0.0); // first original pixel
    assert_eq!( img.array()[[0,2,3]], 1.0);
}

#[test]
fn test_tiles () {
    let img = test_image();

    let tiles = img.tiles( 8, 4, 0);
    assert_eq!( tiles.len(), 9); // ceil(20/8) x ceil(10/4)
    assert_eq!( tiles[0], Window::new( 0, 0, 8, 4));
    assert_eq!( tiles[2].width, 4); // clipped right edge
    assert!( tiles.iter().all(|t| !t.is_empty()));

    let tiles = img.tiles( 8, 4, 2);
    assert_eq!( tiles[0], Window::new( 0, 0, 10, 6)); // clipped at origin, grown elsewhere
    assert_eq!( tiles[1], Window::new( 6, 0, 12, 6));
}

#[test]
fn test_subset () {
    let img = test_image();

    let (slice,bounds) = img.subset( &Window::new( 2, 1, 4, 3), 1).unwrap();
    assert_eq!( slice.shape(), &[3,4]);
    assert_eq!( slice[[0,0]], 1022.0);
    assert_eq!( bounds, [11.0, 48.0, 13.0, 49.5]);

    assert!( img.subset( &Window::new( 0, 0, 2, 2), 7).is_err());
}

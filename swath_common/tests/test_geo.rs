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

use swath_common::geo::{geojson_to_geo, geometry_bounds, Aoi, GeoRect};

#[test]
fn test_bbox_aoi () {
    let aoi = Aoi::from_bbox_degrees( 8.9, 47.2, 9.5, 47.8);
    let bbox = aoi.bbox();

    assert_eq!( bbox.west().degrees(), 8.9);
    assert_eq!( bbox.south().degrees(), 47.2);
    assert_eq!( bbox.east().degrees(), 9.5);
    assert_eq!( bbox.north().degrees(), 47.8);

    let p = aoi.to_polygon();
    assert_eq!( p.exterior().0.len(), 5); // closed ring
}

#[test]
fn test_wkt_aoi () {
    let wkt = "POLYGON ((149.766922 -24.439564, 153.728622 -23.51771, 154.075058 -24.737713, 150.077042 -25.668921, 149.766922 -24.439564))";
    let aoi = Aoi::from_wkt(wkt).unwrap();

    let bbox = aoi.bbox();
    println!("wkt aoi bbox: {bbox}");
    assert!( (bbox.west().degrees() - 149.766922).abs() < 1e-9);
    assert!( (bbox.north().degrees() - (-23.51771)).abs() < 1e-9);

    let out = aoi.to_wkt();
    assert!( out.starts_with("POLYGON(("));
    assert!( out.contains("149.766922 -24.439564"));
}

#[test]
fn test_wkt_rejects_garbage () {
    assert!( Aoi::from_wkt("LINESTRING (0 0, 1 1)").is_err());
    assert!( Aoi::from_wkt("POLYGON ((10 10, 20 20))").is_err()); // degenerate ring
}

#[test]
fn test_geojson_aoi () {
    let gj = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature",
              "properties": {},
              "geometry": { "type": "Polygon", "coordinates": [[[8.0,47.0],[9.0,47.0],[9.0,48.0],[8.0,48.0],[8.0,47.0]]] } }
        ]
    }"#;
    let aoi = Aoi::from_geojson_str(gj).unwrap();
    let bbox = aoi.bbox();
    assert_eq!( bbox.wsen_degrees(), [8.0, 47.0, 9.0, 48.0]);
}

#[test]
fn test_intersects_footprint () {
    let aoi = Aoi::from_bbox_degrees( 8.0, 47.0, 9.0, 48.0);

    let inside = geojson::Geometry::new( geojson::Value::Polygon(
        vec![vec![vec![8.5,47.5],vec![8.8,47.5],vec![8.8,47.8],vec![8.5,47.8],vec![8.5,47.5]]]));
    let outside = geojson::Geometry::new( geojson::Value::Polygon(
        vec![vec![vec![12.0,50.0],vec![12.5,50.0],vec![12.5,50.5],vec![12.0,50.5],vec![12.0,50.0]]]));

    assert!( aoi.intersects( &geojson_to_geo(&inside).unwrap()));
    assert!( !aoi.intersects( &geojson_to_geo(&outside).unwrap()));
}

#[test]
fn test_geometry_bounds () {
    let g = geojson::Geometry::new( geojson::Value::Polygon(
        vec![vec![vec![10.0,40.0],vec![11.0,40.0],vec![11.0,41.5],vec![10.0,41.5],vec![10.0,40.0]]]));
    let bounds = geometry_bounds( &geojson_to_geo(&g).unwrap()).unwrap();
    assert_eq!( bounds.wsen_degrees(), [10.0, 40.0, 11.0, 41.5]);
}

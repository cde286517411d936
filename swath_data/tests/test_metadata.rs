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

use chrono::{DateTime,Utc};
use serde_json::json;
use swath_data::{Platform, SceneCollection, SceneMeta};

fn utc (s: &str)->DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

fn test_scene (src_id: &str, product_type: &str, date: &str, cloud: Option<f64>)->SceneMeta {
    SceneMeta {
        id: src_id.to_string(),
        platform: Platform::Sentinel2,
        product_type: product_type.to_string(),
        orbit_direction: "DESCENDING".to_string(),
        orbit_number: Some(24412),
        relative_orbit_number: Some(65),
        acquisition_date: Some( utc(date)),
        ingestion_date: Some( utc(date)),
        cloud_cover_percentage: cloud,
        format: "SAFE".to_string(),
        size: "1.04 GB".to_string(),
        src_id: src_id.to_string(),
        src_url: format!("https://hub.example.com/odata/v1/Products('{src_id}')/$value"),
        src_uuid: format!("uuid-{src_id}"),
        footprint: Some( geojson::Geometry::new( geojson::Value::Polygon(
            vec![vec![vec![11.0,48.0],vec![12.0,48.0],vec![12.0,49.0],vec![11.0,49.0],vec![11.0,48.0]]]))),
    }
}

#[test]
fn test_feature_roundtrip () {
    let meta = test_scene( "S2A_MSIL2A_20200221T102041_N0214_R065_T32UQC_20200221T120618", "S2MSI2A",
                           "2020-02-21T10:20:41Z", Some(7.91));

    let feature = meta.to_feature().unwrap();
    let props = feature.properties.as_ref().unwrap();
    assert_eq!( props.get("platform"), Some(&json!("Sentinel-2")));
    assert_eq!( props.get("productType"), Some(&json!("S2MSI2A")));
    assert!( feature.geometry.is_some());

    let json = serde_json::to_string(&feature).unwrap();
    let restored = SceneMeta::from_feature_json(&json).unwrap();

    assert_eq!( restored.src_id, meta.src_id);
    assert_eq!( restored.platform, Platform::Sentinel2);
    assert_eq!( restored.acquisition_date, meta.acquisition_date);
    assert_eq!( restored.cloud_cover_percentage, Some(7.91));
    assert!( restored.footprint.is_some());
}

#[test]
fn test_save_and_reload () {
    let tmp = tempfile::tempdir().unwrap();
    let meta = test_scene( "S2B_MSIL1C_20200301T101039_N0209_R022_T32TMT_20200301T121000", "S2MSI1C",
                           "2020-03-01T10:10:39Z", Some(33.1));

    let path = meta.save( tmp.path()).unwrap();
    assert!( path.ends_with("S2B_MSIL1C_20200301T101039_N0209_R022_T32TMT_20200301T121000.json"));

    let json = std::fs::read_to_string(&path).unwrap();
    let restored = SceneMeta::from_feature_json(&json).unwrap();
    assert_eq!( restored.product_type, "S2MSI1C");
}

#[test]
fn test_collection_filters () {
    let scenes = SceneCollection::new( vec![
        test_scene( "a", "S2MSI1C", "2020-01-03T10:00:00Z", Some(10.0)),
        test_scene( "b", "S2MSI2A", "2020-01-01T10:00:00Z", Some(55.0)),
        test_scene( "c", "S2MSI2A", "2020-01-02T10:00:00Z", None),
    ]);

    let l2a = scenes.clone().filter_field( "productType", &json!("S2MSI2A")).unwrap();
    assert_eq!( l2a.len(), 2);

    let clear = scenes.clone().filter(|m| m.cloud_cover_percentage.unwrap_or(0.0) < 20.0);
    assert_eq!( clear.len(), 2); // "a" and the unknown-cover "c"

    let sorted = scenes.sort_by_acquisition_date();
    let ids: Vec<&str> = sorted.iter().map(|m| m.src_id.as_str()).collect();
    assert_eq!( ids, vec!["b","c","a"]);
}

#[test]
fn test_collection_exports () {
    let scenes = SceneCollection::new( vec![
        test_scene( "a", "S2MSI1C", "2020-01-03T10:00:00Z", Some(10.0)),
        test_scene( "b", "S2MSI2A", "2020-01-01T10:00:00Z", Some(55.0)),
    ]);

    let fc = scenes.to_feature_collection().unwrap();
    assert_eq!( fc.features.len(), 2);

    let csv = scenes.to_csv().unwrap();
    let mut lines = csv.lines();
    let header = lines.next().unwrap();
    assert!( header.starts_with("id,platform,productType"));
    assert_eq!( lines.count(), 2);
    assert!( csv.contains("Sentinel-2"));
}

#[test]
fn test_collection_save () {
    let tmp = tempfile::tempdir().unwrap();
    let scenes = SceneCollection::new( vec![
        test_scene( "a", "S2MSI1C", "2020-01-03T10:00:00Z", Some(10.0)),
        test_scene( "b", "S2MSI2A", "2020-01-01T10:00:00Z", Some(55.0)),
    ]);

    scenes.save( tmp.path()).unwrap();
    assert!( tmp.path().join("a.json").is_file());
    assert!( tmp.path().join("b.json").is_file());
}

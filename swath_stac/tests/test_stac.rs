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

use swath_stac::{default_item_reader, Item, ItemCollection, Search};

const ITEM: &str = r#"{
    "type": "Feature",
    "stac_version": "1.0.0",
    "id": "S2A_MSIL2A_20200221T102041_N0214_R065_T32UQC_20200221T120618",
    "geometry": { "type": "Polygon", "coordinates": [[[11.0,48.0],[12.0,48.0],[12.0,49.0],[11.0,49.0],[11.0,48.0]]] },
    "bbox": [11.0, 48.0, 12.0, 49.0],
    "properties": {
        "datetime": "2020-02-21T10:20:41Z",
        "platform": "sentinel-2a",
        "eo:cloud_cover": 7.91,
        "sat:orbit_state": "descending",
        "sat:relative_orbit": 65
    },
    "collection": "sentinel-2-l2a",
    "links": [
        { "href": "https://earth-search.example.com/v1/collections/sentinel-2-l2a/items/x", "rel": "self" }
    ],
    "assets": {
        "visual": { "href": "https://example.com/TCI.tif", "type": "image/tiff; application=geotiff", "roles": ["visual"] }
    }
}"#;

const PAGE: &str = r#"{
    "type": "FeatureCollection",
    "features": [],
    "links": [
        { "href": "https://earth-search.example.com/v1/search?page=2", "rel": "next" },
        { "href": "https://earth-search.example.com/v1/search", "rel": "self" }
    ],
    "context": { "matched": 42, "returned": 0, "limit": 100 }
}"#;

#[test]
fn test_item_parsing () {
    let item: Item = serde_json::from_str(ITEM).unwrap();

    assert_eq!( item.id, "S2A_MSIL2A_20200221T102041_N0214_R065_T32UQC_20200221T120618");
    assert_eq!( item.collection.as_deref(), Some("sentinel-2-l2a"));
    assert_eq!( item.cloud_cover(), Some(7.91));
    assert_eq!( item.platform(), Some("sentinel-2a"));
    assert_eq!( item.properties.str_field("sat:orbit_state"), Some("descending"));
    assert_eq!( item.properties.i64_field("sat:relative_orbit"), Some(65));
    assert!( item.self_href().unwrap().starts_with("https://earth-search"));
    assert!( item.asset("visual").is_some());
    assert!( item.geometry.is_some());
}

#[test]
fn test_item_reader_hook () {
    let v: serde_json::Value = serde_json::from_str(ITEM).unwrap();
    let item = default_item_reader(v).unwrap();
    assert_eq!( item.cloud_cover(), Some(7.91));

    assert!( default_item_reader( serde_json::json!({"not":"an item"})).is_err());
}

#[test]
fn test_page_links_and_context () {
    let page: ItemCollection = serde_json::from_str(PAGE).unwrap();

    assert_eq!( page.next_href(), Some("https://earth-search.example.com/v1/search?page=2"));
    assert_eq!( page.matched(), Some(42));

    // OGC style count field
    let page: ItemCollection = serde_json::from_str( r#"{ "features": [], "links": [], "numberMatched": 7 }"#).unwrap();
    assert_eq!( page.matched(), Some(7));
    assert_eq!( page.next_href(), None);
}

#[test]
fn test_search_query_pairs () {
    let search = Search::new()
        .with_bbox( [8.9, 47.2, 9.5, 47.8])
        .with_collections( &["sentinel-2-l2a"])
        .with_limit( 50);

    let pairs = search.to_query_pairs();
    assert!( pairs.contains( &("bbox".to_string(), "8.9,47.2,9.5,47.8".to_string())));
    assert!( pairs.contains( &("collections".to_string(), "sentinel-2-l2a".to_string())));
    assert!( pairs.contains( &("limit".to_string(), "50".to_string())));

    // POST body keeps bbox as an array
    let body = serde_json::to_value(&search).unwrap();
    assert!( body["bbox"].is_array());
    assert!( body.get("intersects").is_none());
}

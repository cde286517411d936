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

use serde::{Serialize,Deserialize};
use strum::{Display,EnumString};

/// the image platforms we can query and process. The serialized values are the
/// respective provider-facing names (DHuS platformname, Earth Explorer dataset name)
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize,Display,EnumString)]
pub enum Platform {
    #[serde(rename = "Sentinel-1")] #[strum(serialize = "Sentinel-1")]
    Sentinel1,

    #[serde(rename = "Sentinel-2")] #[strum(serialize = "Sentinel-2")]
    Sentinel2,

    #[serde(rename = "Sentinel-3")] #[strum(serialize = "Sentinel-3")]
    Sentinel3,

    #[serde(rename = "LANDSAT_TM_C1")] #[strum(serialize = "LANDSAT_TM_C1")]
    Landsat5,

    #[serde(rename = "LANDSAT_ETM_C1")] #[strum(serialize = "LANDSAT_ETM_C1")]
    Landsat7,

    #[serde(rename = "LANDSAT_8_C1")] #[strum(serialize = "LANDSAT_8_C1")]
    Landsat8,
}

impl Platform {
    /// SAR acquisitions have no cloud cover - hubs must not constrain them with one
    pub fn is_sar (&self)->bool {
        matches!( self, Platform::Sentinel1)
    }

    pub fn is_landsat (&self)->bool {
        matches!( self, Platform::Landsat5 | Platform::Landsat7 | Platform::Landsat8)
    }
}

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

use std::fmt;
use serde::{Serialize,Deserialize};

#[inline]
pub fn normalize_90 (d: f64) -> f64 {
    let x = d % 360.0;

    if x < -90.0 { -180.0 - x }
    else if x > 90.0 { 180.0 - x }
    else { x }
}

#[inline]
pub fn normalize_180 (d: f64) -> f64 {
    let x = d % 360.0;

    if x < -180.0 { 360.0 + x }
    else if x > 180.0 { x - 360.0 }
    else { x }
}

#[inline]
pub fn normalize_360 (d: f64) -> f64 {
    let x = d % 360.0;
    if x < 0.0 { 360.0 + x } else { x }
}

/// geodetic latitude in degrees, normalized to [-90,90]
#[derive(Debug,Clone,Copy,PartialEq,PartialOrd,Serialize,Deserialize)]
#[serde(transparent)]
pub struct Latitude(f64);

impl Latitude {
    pub fn from_degrees (d: f64)->Self { Latitude( normalize_90(d)) }
    pub fn degrees (&self)->f64 { self.0 }
}

impl fmt::Display for Latitude {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}deg", self.0)
    }
}

/// geodetic longitude in degrees, normalized to [-180,180]
#[derive(Debug,Clone,Copy,PartialEq,PartialOrd,Serialize,Deserialize)]
#[serde(transparent)]
pub struct Longitude(f64);

impl Longitude {
    pub fn from_degrees (d: f64)->Self { Longitude( normalize_180(d)) }
    pub fn degrees (&self)->f64 { self.0 }
}

impl fmt::Display for Longitude {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}deg", self.0)
    }
}

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

//! common primitives shared by the swath workspace crates: normalized angles, bounding
//! boxes and areas-of-interest, flexible date(range) parsing, filesystem and archive
//! helpers, and chunked HTTP retrieval

use std::io::{Error as IOError, ErrorKind};

pub mod angle;
pub mod geo;
pub mod datetime;
pub mod fs;
pub mod net;
pub mod platform;

/// get an environment variable or fail with an error that names it.
/// Hub credentials are only read through this so a missing login does not
/// surface as an anonymous VarError deep inside a request
pub fn env_get (key: &str)->Result<String,IOError> {
    std::env::var(key).map_err(|_| IOError::new( ErrorKind::NotFound, format!("no environment variable {key}")))
}

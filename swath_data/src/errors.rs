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

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SwathDataError>;

#[derive(Error,Debug)]
pub enum SwathDataError {
    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("net error {0}")]
    NetError( #[from] swath_common::net::NetError),

    #[error("geometry error {0}")]
    GeoError( #[from] swath_common::geo::GeoError),

    #[error("date error {0}")]
    DateError( #[from] swath_common::datetime::DateError),

    #[error("STAC error {0}")]
    StacError( #[from] swath_stac::SwathStacError),

    #[error("serde error {0}")]
    SerdeError( #[from] serde_json::Error),

    #[error("CSV error {0}")]
    CsvError( #[from] csv::Error),

    #[error("image error {0}")]
    ImageError( #[from] image::ImageError),

    #[error("authentication failed for {0}")]
    AuthError( String ),

    #[error("hub query failed: {0}")]
    QueryError( String ),

    #[error("invalid scene record: {0}")]
    RecordError( String ),

    #[error("{0} not supported for {1}")]
    NotSupportedError( &'static str, crate::Datahub ),

    #[error("misc error {0}")]
    MiscError( String ),
}

pub fn query_error (msg: impl ToString)->SwathDataError {
    SwathDataError::QueryError( msg.to_string())
}

pub fn record_error (msg: impl ToString)->SwathDataError {
    SwathDataError::RecordError( msg.to_string())
}

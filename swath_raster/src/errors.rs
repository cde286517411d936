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

pub type Result<T> = std::result::Result<T, SwathRasterError>;

#[derive(Error,Debug)]
pub enum SwathRasterError {
    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("TIFF error {0}")]
    TiffError( #[from] tiff::TiffError),

    #[error("not a GeoTIFF: {0}")]
    NotGeoreferencedError( String ),

    #[error("MTL parse error {0}")]
    MtlError( String ),

    #[error("unsupported operation: {0}")]
    UnsupportedError( String ),

    #[error("invalid window {0}")]
    WindowError( String ),
}

pub fn unsupported (msg: impl ToString)->SwathRasterError {
    SwathRasterError::UnsupportedError( msg.to_string())
}

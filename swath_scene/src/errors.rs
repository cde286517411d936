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

pub type Result<T> = std::result::Result<T, SwathSceneError>;

#[derive(Error,Debug)]
pub enum SwathSceneError {
    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("XML parse error {0}")]
    XmlError( #[from] quick_xml::Error),

    #[error("scene name parse error {0}")]
    FilenameError( String ),

    #[error("missing element {0} in {1}")]
    MissingElementError( &'static str, String ),

    #[error("misc error {0}")]
    MiscError( String ),
}

pub fn filename_error (msg: impl ToString)->SwathSceneError {
    SwathSceneError::FilenameError( msg.to_string())
}

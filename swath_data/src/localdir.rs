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

//! hub implementation over a local directory of previously saved per-scene GeoJSON
//! records (the format `SceneMeta::save` writes). Queries filter the stored records
//! by platform, acquisition time, AOI intersection and cloud cover - downloads are
//! not supported since the directory only holds metadata

use std::fs;
use std::path::{Path,PathBuf};

use async_trait::async_trait;
use tracing::{debug,info,warn};

use swath_common::fs::collect_files;

use crate::errors::*;
use crate::{Datahub, Hub, SceneCollection, SceneMeta, SceneQuery};

pub struct LocalDirHub {
    dir: PathBuf,

    /// substring patterns that select which json files count as scene records
    /// (empty means all of them)
    substrs: Vec<String>,
}

impl LocalDirHub {
    pub fn new (dir: impl AsRef<Path>)->Result<Self> {
        Self::with_substrs( dir, Vec::new())
    }

    pub fn with_substrs (dir: impl AsRef<Path>, substrs: Vec<String>)->Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.is_dir() {
            return Err( SwathDataError::MiscError( format!("no metadata directory {dir:?}")))
        }
        Ok( LocalDirHub { dir, substrs } )
    }

    fn metadata_files (&self)->Result<Vec<PathBuf>> {
        let files = collect_files(&self.dir)?;
        Ok( files.into_iter()
            .filter(|p| {
                let Some(name) = p.file_name().and_then(|n| n.to_str()) else { return false };
                name.ends_with(".json")
                    && (self.substrs.is_empty() || self.substrs.iter().any(|s| name.contains(s.as_str())))
            })
            .collect())
    }

    fn read_scene (&self, path: &Path)->Result<SceneMeta> {
        let json = fs::read_to_string(path)?;
        SceneMeta::from_feature_json(&json)
            .map_err(|e| SwathDataError::RecordError( format!("{:?} is not a valid metadata file: {e}", path.file_name().unwrap_or_default())))
    }

    /// the stored record of a specific product
    pub fn scene_metadata (&self, product_id: &str)->Result<SceneMeta> {
        for path in self.metadata_files()? {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.contains(product_id) {
                    return self.read_scene(&path)
                }
            }
        }
        Err( SwathDataError::MiscError( format!("no metadata for {product_id} in {:?}", self.dir)))
    }
}

#[async_trait]
impl Hub for LocalDirHub {
    fn datahub (&self)->Datahub { Datahub::LocalDir }

    async fn query_scenes (&mut self, query: &SceneQuery)->Result<SceneCollection> {
        let (min_cc,max_cc) = query.effective_cloud_cover().unwrap_or( (0.0, 100.0));
        let mut scenes: Vec<SceneMeta> = Vec::new();

        for path in self.metadata_files()? {
            let meta = self.read_scene(&path)?; // a broken record file is an error, not a skip

            if meta.platform != query.platform { continue }

            let Some(acquired) = meta.acquisition_date else {
                warn!("record {} has no acquisition date", meta.src_id);
                continue
            };
            if !query.date.contains(&acquired) { continue }

            if !meta.intersects(&query.aoi) { continue }

            let cc = meta.cloud_cover_percentage.unwrap_or(0.0);
            if cc < min_cc || cc >= max_cc { continue }

            scenes.push(meta);
        }

        info!("{} of the stored scene(s) match", scenes.len());
        Ok( SceneCollection::new(scenes) )
    }

    async fn download_scene (&mut self, _scene: &SceneMeta, _target_dir: &Path)->Result<PathBuf> {
        Err( SwathDataError::NotSupportedError( "download_scene", Datahub::LocalDir))
    }

    async fn download_quicklook (&mut self, _scene: &SceneMeta, _target_dir: &Path)->Result<PathBuf> {
        Err( SwathDataError::NotSupportedError( "download_quicklook", Datahub::LocalDir))
    }
}

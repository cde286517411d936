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

//! helpers for satellite scenes that are already on disk: locating (possibly zipped)
//! Sentinel SAFE products in a directory, decoding their file name conventions and
//! extracting footprint/processing info from `manifest.safe` and annotation XML.
//! Naming conventions follow
//! <https://sentinel.esa.int/web/sentinel/user-guides/sentinel-1-sar/naming-conventions>

use std::fs::{self,File};
use std::path::{Path,PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use geo::{Centroid, Coord, LineString, Point, Polygon};
use lazy_static::lazy_static;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use strum::{Display,EnumString};
use tempfile::TempDir;
use tracing::debug;
use zip::read::ZipArchive;

mod errors;
pub use errors::*;

/* #region scene discovery *************************************************************************************/

lazy_static! {
    // top level Sentinel-1/-2/-3 product folder names, e.g. S1A_IW_GRDH_...
    static ref SCENE_RE: Regex = Regex::new( r"^S[1-3]._").unwrap();
}

/// a Sentinel scene directory, possibly backed by a temp dir the scene zip was
/// extracted into (which lives as long as this object)
#[derive(Debug)]
pub struct SentinelScene {
    pub path: PathBuf,
    pub ident: String,

    temp_dir: Option<TempDir>,
}

impl SentinelScene {
    fn from_dir (path: PathBuf, ident: String)->Self {
        SentinelScene { path, ident, temp_dir: None }
    }

    fn from_zip (zip_path: &Path, ident: String)->Result<Self> {
        let temp_dir = TempDir::new()?;
        let file = File::open(zip_path)?;
        let mut archive = ZipArchive::new(file).map_err( std::io::Error::other)?;
        archive.extract( temp_dir.path()).map_err( std::io::Error::other)?;

        // the archive either holds the scene dir or its contents directly
        let extracted = temp_dir.path().join(&ident);
        let path = if extracted.is_dir() { extracted } else { temp_dir.path().to_path_buf() };

        debug!("extracted scene {} to {:?}", ident, path);
        Ok( SentinelScene { path, ident, temp_dir: Some(temp_dir) } )
    }

    pub fn manifest_path (&self)->PathBuf {
        self.path.join("manifest.safe")
    }
}

/// scan `indir` for Sentinel scenes, extracting zipped ones into temp dirs.
/// Works for Sentinel-1, -2 and -3 products
pub fn collect_sentinel_scenes (indir: impl AsRef<Path>)->Result<Vec<SentinelScene>> {
    let mut scenes: Vec<SentinelScene> = Vec::new();

    for entry in fs::read_dir( indir.as_ref())? {
        let path = entry?.path();
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else { continue };
        if !SCENE_RE.is_match(stem) { continue }

        if path.extension().and_then(|e| e.to_str()) == Some("zip") {
            scenes.push( SentinelScene::from_zip( &path, stem.to_string())?);
        } else if path.is_dir() {
            scenes.push( SentinelScene::from_dir( path.clone(), stem.to_string()));
        }
    }

    Ok(scenes)
}

/* #endregion scene discovery */

/* #region filename decoding ***********************************************************************************/

#[derive(Debug,Clone,Copy,PartialEq,Eq,Display,EnumString)]
pub enum Polarization {
    VV, VH, HH, HV
}

/// get polarizations from the file name of a Sentinel-1 scene. Single polarization
/// products return one entry, dual products return both if `dual` is set
///
/// example: `S1A_IW_GRDH_1SDV_20200113T074619_20200113T074644_030782_03875C_6591.SAFE.zip` -> [VV,VH]
pub fn polarizations_from_s1_filename (filename: &str, dual: bool)->Result<Vec<Polarization>> {
    use Polarization::*;

    let code = filename.get(13..16).ok_or_else(|| filename_error( format!("S1 name too short: {filename}")))?;
    let pols: &[Polarization] = match code {
        "SSV" => &[VV],
        "SSH" => &[HH],
        "SDV" => &[VV,VH],
        "SDH" => &[HH,HV],
        other => return Err( filename_error( format!("unknown S1 polarization code {other}")))
    };

    if dual {
        Ok( pols.to_vec() )
    } else {
        Ok( vec![pols[0]] )
    }
}

fn parse_scene_dtg (s: &str)->Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str( s, "%Y%m%dT%H%M%S")
        .or_else(|_| NaiveDateTime::parse_from_str( s, "%Y%m%d%H%M%S"))
        .map(|ndt| ndt.and_utc())
        .map_err(|_| filename_error( format!("not a scene timestamp: {s}")))
}

/// get the start (or stop) acquisition timestamp from a Sentinel product folder or file name.
/// Works for S1, S2 (post 2016-12-06 compact naming) and S3
pub fn timestamp_from_sentinel_filename (filename: &str, start_date: bool)->Result<DateTime<Utc>> {
    if filename.starts_with("S2") {
        let field = filename.split('_').nth(2)
            .ok_or_else(|| filename_error( format!("short S2 name: {filename}")))?;
        parse_scene_dtg(field)

    } else if filename.starts_with("S1") {
        let n = if start_date { 4 } else { 5 };
        let field = filename.split('_').nth(n)
            .ok_or_else(|| filename_error( format!("short S1 name: {filename}")))?;
        parse_scene_dtg(field)

    } else {
        // S3 names have fixed-position timestamps
        let range = if start_date { 16..31 } else { 32..47 };
        let field = filename.get(range)
            .ok_or_else(|| filename_error( format!("short S3 name: {filename}")))?;
        parse_scene_dtg(field)
    }
}

/* #endregion filename decoding */

/* #region manifest / annotation parsing ***********************************************************************/

fn xml_reader (path: &Path)->Result<Reader<std::io::BufReader<File>>> {
    let mut reader = Reader::from_file(path).map_err(SwathSceneError::XmlError)?;
    reader.trim_text(true);
    Ok(reader)
}

/// footprint polygon of a scene from its `manifest.safe`. The manifest stores the
/// frame coordinates as lat,lon pairs which are flipped here to lon/lat order
pub fn footprint_from_manifest (xml_path: impl AsRef<Path>)->Result<Polygon<f64>> {
    let xml_path = xml_path.as_ref();
    let mut reader = xml_reader(xml_path)?;
    let mut buf = Vec::new();
    let mut in_coordinates = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                in_coordinates = e.name().local_name().as_ref() == b"coordinates";
            }
            Event::End(_) => { in_coordinates = false; }
            Event::Text(e) if in_coordinates => {
                let txt = e.unescape()?;
                let mut coords: Vec<Coord<f64>> = Vec::new();
                for pair in txt.split_whitespace() {
                    let mut it = pair.split(',');
                    let lat = it.next().and_then(|s| s.parse::<f64>().ok());
                    let lon = it.next().and_then(|s| s.parse::<f64>().ok());
                    match (lon,lat) {
                        (Some(lon),Some(lat)) => coords.push( Coord { x: lon, y: lat }),
                        _ => return Err( SwathSceneError::MiscError( format!("invalid footprint vertex '{pair}'")))
                    }
                }
                if coords.len() < 3 {
                    return Err( SwathSceneError::MiscError( format!("degenerate footprint in {xml_path:?}")));
                }
                return Ok( Polygon::new( LineString::from(coords), Vec::new()) )
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Err( SwathSceneError::MissingElementError( "coordinates", format!("{xml_path:?}")))
}

/// country of the processing facility from `manifest.safe`
pub fn origin_from_manifest (xml_path: impl AsRef<Path>)->Result<String> {
    attr_from_manifest( xml_path.as_ref(), b"facility", b"country")
}

/// IPF processor version from `manifest.safe`
pub fn ipf_from_manifest (xml_path: impl AsRef<Path>)->Result<f64> {
    let version = attr_from_manifest( xml_path.as_ref(), b"software", b"version")?;
    version.parse().map_err(|_| SwathSceneError::MiscError( format!("not an IPF version: {version}")))
}

fn attr_from_manifest (xml_path: &Path, elem: &[u8], attr_name: &[u8])->Result<String> {
    let mut reader = xml_reader(xml_path)?;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) => {
                if e.name().local_name().as_ref() == elem {
                    for attr in e.attributes() {
                        let attr = attr.map_err(|e| SwathSceneError::MiscError( e.to_string()))?;
                        if attr.key.local_name().as_ref() == attr_name {
                            return Ok( attr.unescape_value()?.to_string() )
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Err( SwathSceneError::MissingElementError( "manifest attribute", format!("{xml_path:?}")))
}

const DEGREES_PER_10M: f64 = 8.983152841195215e-5;

/// range pixel spacing of a scene in meters and degrees, read from the annotation XML
/// of the given polarization. Tested for Sentinel-1
pub fn pixel_spacing (scene_dir: impl AsRef<Path>, polarization: Polarization)->Result<(f64,f64)> {
    let annotation_dir = scene_dir.as_ref().join("annotation");
    let pol_tag = polarization.to_string().to_lowercase();

    for entry in fs::read_dir(&annotation_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|s| s.to_str()) else { continue };
        if !name.ends_with(".xml") { continue }
        if name.split('-').nth(3) != Some(pol_tag.as_str()) { continue }

        let mut reader = xml_reader(&path)?;
        let mut buf = Vec::new();
        let mut in_spacing = false;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    in_spacing = e.name().local_name().as_ref() == b"rangePixelSpacing";
                }
                Event::End(_) => { in_spacing = false; }
                Event::Text(e) if in_spacing => {
                    let meters: f64 = e.unescape()?.trim().parse()
                        .map_err(|_| SwathSceneError::MiscError( format!("invalid rangePixelSpacing in {path:?}")))?;
                    return Ok( (meters, (meters / 10.0) * DEGREES_PER_10M) )
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
    }

    Err( SwathSceneError::MissingElementError( "rangePixelSpacing", format!("{annotation_dir:?}")))
}

/* #endregion manifest / annotation parsing */

/* #region UTM projection **************************************************************************************/

const UTM_BANDS: &[u8] = b"CDEFGHJKLMNPQRSTUVWX";

/// UTM zone (number and latitude band letter) containing the given lon/lat position
pub fn utm_zone (lon: f64, lat: f64)->(u32,char) {
    let zone = ((lon + 180.0) / 6.0).floor() as u32 % 60 + 1;

    let idx = (((lat + 80.0) / 8.0).floor() as i32).clamp( 0, (UTM_BANDS.len() - 1) as i32);
    (zone, UTM_BANDS[idx as usize] as char)
}

/// proj-string of the UTM zone the footprint centroid is located in. The footprint
/// itself might cover multiple UTM zones
pub fn proj_string (footprint: &Polygon<f64>)->Result<String> {
    let c: Point<f64> = footprint.centroid()
        .ok_or( SwathSceneError::MiscError( "footprint has no centroid".to_string()))?;
    let (zone,band) = utm_zone( c.x(), c.y());

    Ok( format!("+proj=utm +zone={zone}{band}, +ellps=WGS84 +datum=WGS84 +units=m +no_defs") )
}

/* #endregion UTM projection */

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

use std::fs::{self,File};
use std::io::{self,Read,Write,Error as IOError,ErrorKind};
use std::path::{Path,PathBuf};

use zip::read::ZipArchive;
use zip::write::{SimpleFileOptions,ZipWriter};

type Result<T> = std::result::Result<T,std::io::Error>;

pub fn filename<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().file_name().and_then(|ostr| ostr.to_str())
}

pub fn extension<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().extension().and_then(|ostr| ostr.to_str())
}

pub fn filestem<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().file_stem().and_then(|ostr| ostr.to_str())
}

pub fn filename_of_path (path: impl AsRef<Path>)->Result<String> {
    let path = path.as_ref();

    Ok( path.file_name()
        .ok_or( IOError::new( ErrorKind::InvalidInput, format!("not a valid filename {path:?}")) )?
        .to_str().ok_or( IOError::new( ErrorKind::InvalidInput, format!("invalid char in filename {path:?}")) )?
        .to_string())
}

pub fn ensure_dir (path: impl AsRef<Path>)->io::Result<()> {
    let path = path.as_ref();
    if !path.is_dir() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// check if dir pathname exists and is writable, try to create dir otherwise
pub fn ensure_writable_dir (path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        let md = fs::metadata(&path)?;
        if md.permissions().readonly() {
            Err( IOError::new( ErrorKind::PermissionDenied, format!("output dir {:?} not writable", &path)))
        } else {
            Ok(())
        }
    } else {
        fs::create_dir_all(path)
    }
}

pub fn file_length <P: AsRef<Path>> (path: P) -> Option<u64> {
    fs::metadata(path).ok().map( |meta| meta.len() )
}

/// collect regular files under `dir` (recursively), sorted by pathname
pub fn collect_files (dir: impl AsRef<Path>)->io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();
    visit_files( dir.as_ref(), &mut files)?;
    files.sort();
    Ok(files)
}

fn visit_files (dir: &Path, files: &mut Vec<PathBuf>)->io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            visit_files( &path, files)?;
        } else if path.is_file() {
            files.push(path);
        }
    }
    Ok(())
}

/* #region zip archives ***************************************************************************************/

/// create `zip_path` from the contents of `src_dir` (relative pathnames inside the archive).
/// Returns the archive pathname
pub fn pack (src_dir: impl AsRef<Path>, zip_path: impl AsRef<Path>)->io::Result<PathBuf> {
    let src_dir = src_dir.as_ref();
    let zip_path = zip_path.as_ref();

    let file = File::create(zip_path)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    let mut buf: Vec<u8> = Vec::new();
    for path in collect_files(src_dir)? {
        let rel = path.strip_prefix(src_dir)
            .map_err(|e| IOError::new( ErrorKind::InvalidInput, e.to_string()))?;
        let name = rel.to_str()
            .ok_or( IOError::new( ErrorKind::InvalidInput, format!("invalid archive entry name {rel:?}")))?;

        writer.start_file( name, options).map_err( io::Error::other)?;
        buf.clear();
        File::open(&path)?.read_to_end(&mut buf)?;
        writer.write_all(&buf)?;
    }
    writer.finish().map_err( io::Error::other)?;

    Ok( zip_path.to_path_buf() )
}

/// unpack a zip archive into `extract_dir` (which is created if it does not exist)
pub fn unpack (zip_path: impl AsRef<Path>, extract_dir: impl AsRef<Path>)->io::Result<()> {
    let extract_dir = extract_dir.as_ref();
    ensure_dir(extract_dir)?;

    let file = File::open( zip_path.as_ref())?;
    let mut archive = ZipArchive::new(file).map_err( io::Error::other)?;
    archive.extract(extract_dir).map_err( io::Error::other)?;
    Ok(())
}

/* #endregion zip archives */

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

use std::fs;
use swath_common::fs::{collect_files, ensure_writable_dir, file_length, pack, unpack};

#[test]
fn test_pack_unpack_roundtrip () {
    let tmp = tempfile::tempdir().unwrap();

    let src = tmp.path().join("LC08_L1TP_218068_20191031");
    fs::create_dir_all( src.join("sub")).unwrap();
    fs::write( src.join("band1.TIF"), b"not really a tif").unwrap();
    fs::write( src.join("sub/MTL.txt"), b"GROUP = L1_METADATA_FILE").unwrap();

    let zip_path = tmp.path().join("LC08_L1TP_218068_20191031.zip");
    let archive = pack( &src, &zip_path).unwrap();
    assert!( archive.is_file());
    assert!( file_length(&archive).unwrap() > 0);

    let dst = tmp.path().join("unpacked");
    unpack( &archive, &dst).unwrap();

    assert_eq!( fs::read( dst.join("band1.TIF")).unwrap(), b"not really a tif");
    assert_eq!( fs::read( dst.join("sub/MTL.txt")).unwrap(), b"GROUP = L1_METADATA_FILE");
}

#[test]
fn test_collect_files_sorted () {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir_all( tmp.path().join("b")).unwrap();
    fs::write( tmp.path().join("b/2.json"), b"{}").unwrap();
    fs::write( tmp.path().join("a.json"), b"{}").unwrap();

    let files = collect_files( tmp.path()).unwrap();
    assert_eq!( files.len(), 2);
    assert!( files[0].ends_with("a.json"));
    assert!( files[1].ends_with("b/2.json"));
}

#[test]
fn test_ensure_writable_dir () {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("cache/products");
    ensure_writable_dir(&dir).unwrap();
    assert!( dir.is_dir());
}

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
use swath_scene::*;

const MANIFEST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xfdu:XFDU xmlns:xfdu="urn:ccsds:schema:xfdu:1" xmlns:gml="http://www.opengis.net/gml" xmlns:safe="http://www.esa.int/safe/sentinel-1.0">
  <metadataSection>
    <metadataObject ID="processing">
      <metadataWrap>
        <xmlData>
          <safe:processing name="SLC Post Processing">
            <safe:facility country="United Kingdom" name="UPA" organisation="ESA" site="Airbus DS-Newport">
              <safe:software name="Sentinel-1 IPF" version="2.82"/>
            </safe:facility>
          </safe:processing>
        </xmlData>
      </metadataWrap>
    </metadataObject>
    <metadataObject ID="measurementFrameSet">
      <metadataWrap>
        <xmlData>
          <safe:frameSet>
            <safe:frame>
              <safe:footPrint srsName="http://www.opengis.net/gml/srs/epsg.xml#4326">
                <gml:coordinates>-24.439564,149.766922 -23.517710,153.728622 -24.737713,154.075058 -25.668921,150.077042</gml:coordinates>
              </safe:footPrint>
            </safe:frame>
          </safe:frameSet>
        </xmlData>
      </metadataWrap>
    </metadataObject>
  </metadataSection>
</xfdu:XFDU>
"#;

const ANNOTATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<product>
  <imageAnnotation>
    <imageInformation>
      <rangePixelSpacing>4.000000e+01</rangePixelSpacing>
      <azimuthPixelSpacing>4.000000e+01</azimuthPixelSpacing>
    </imageInformation>
  </imageAnnotation>
</product>
"#;

#[test]
fn test_polarizations_from_s1_filename () {
    use Polarization::*;

    let dh = "MMM_BB_TTTR_1SDH_YYYYMMDDTHHMMSS_YYYYMMDDTHHMMSS_OOOOOO_DDDDDD_CCCC.SAFE.zip";
    let sh = "MMM_BB_TTTR_1SSH_YYYYMMDDTHHMMSS_YYYYMMDDTHHMMSS_OOOOOO_DDDDDD_CCCC.SAFE.zip";
    let sv = "MMM_BB_TTTR_2SSV_YYYYMMDDTHHMMSS_YYYYMMDDTHHMMSS_OOOOOO_DDDDDD_CCCC.SAFE.zip";
    let dv = "MMM_BB_TTTR_1SDV_YYYYMMDDTHHMMSS_YYYYMMDDTHHMMSS_OOOOOO_DDDDDD_CCCC.SAFE.zip";

    assert_eq!( polarizations_from_s1_filename( dh, false).unwrap(), vec![HH]);
    assert_eq!( polarizations_from_s1_filename( sh, false).unwrap(), vec![HH]);
    assert_eq!( polarizations_from_s1_filename( sv, false).unwrap(), vec![VV]);
    assert_eq!( polarizations_from_s1_filename( dv, true).unwrap(), vec![VV,VH]);
    assert_eq!( polarizations_from_s1_filename( dh, true).unwrap(), vec![HH,HV]);

    assert!( polarizations_from_s1_filename( "S1A_short", false).is_err());
}

#[test]
fn test_timestamp_from_sentinel_filename () {
    let s1 = "S1A_IW_GRDH_1SDV_20200113T074619_20200113T074644_030782_03875C_6591.SAFE";
    let start = timestamp_from_sentinel_filename( s1, true).unwrap();
    let stop = timestamp_from_sentinel_filename( s1, false).unwrap();
    assert_eq!( start.to_rfc3339(), "2020-01-13T07:46:19+00:00");
    assert_eq!( stop.to_rfc3339(), "2020-01-13T07:46:44+00:00");

    let s2 = "S2A_MSIL2A_20200221T102041_N0214_R065_T32UQC_20200221T120618.SAFE";
    let start = timestamp_from_sentinel_filename( s2, true).unwrap();
    assert_eq!( start.to_rfc3339(), "2020-02-21T10:20:41+00:00");

    let s3 = "S3A_OL_1_EFR____20200113T074619_20200113T074919_20200114T120000_0179_050_035_2160_LN1_O_NT_002.SEN3";
    let start = timestamp_from_sentinel_filename( s3, true).unwrap();
    let stop = timestamp_from_sentinel_filename( s3, false).unwrap();
    assert_eq!( start.to_rfc3339(), "2020-01-13T07:46:19+00:00");
    assert_eq!( stop.to_rfc3339(), "2020-01-13T07:49:19+00:00");
}

#[test]
fn test_manifest_parsing () {
    let tmp = tempfile::tempdir().unwrap();
    let manifest = tmp.path().join("manifest.safe");
    fs::write( &manifest, MANIFEST).unwrap();

    let footprint = footprint_from_manifest(&manifest).unwrap();
    let ext = footprint.exterior();
    assert_eq!( ext.0[0].x, 149.766922);
    assert_eq!( ext.0[0].y, -24.439564);

    assert_eq!( origin_from_manifest(&manifest).unwrap(), "United Kingdom");
    assert_eq!( ipf_from_manifest(&manifest).unwrap(), 2.82);

    let proj = proj_string(&footprint).unwrap();
    assert_eq!( proj, "+proj=utm +zone=56J, +ellps=WGS84 +datum=WGS84 +units=m +no_defs");
}

#[test]
fn test_pixel_spacing () {
    let tmp = tempfile::tempdir().unwrap();
    let annotation_dir = tmp.path().join("annotation");
    fs::create_dir_all(&annotation_dir).unwrap();
    fs::write( annotation_dir.join("s1a-iw-grd-hh-20200113t074619-20200113t074644-030782-03875c-001.xml"), ANNOTATION).unwrap();

    let (meters,degrees) = pixel_spacing( tmp.path(), Polarization::HH).unwrap();
    assert_eq!( meters, 40.0);
    assert!( (degrees - 0.0003593261136478086).abs() < 1e-15);

    assert!( pixel_spacing( tmp.path(), Polarization::VV).is_err());
}

#[test]
fn test_collect_sentinel_scenes () {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir_all( tmp.path().join("S1A_IW_GRDH_1SDV_20200113T074619_20200113T074644_030782_03875C_6591.SAFE")).unwrap();
    fs::create_dir_all( tmp.path().join("not_a_scene")).unwrap();

    let scenes = collect_sentinel_scenes( tmp.path()).unwrap();
    assert_eq!( scenes.len(), 1);
    assert!( scenes[0].ident.starts_with("S1A_IW_GRDH"));
}

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

//! the swath image-array abstraction: an in-memory raster (band-sequential f32) with an
//! affine geo transform, configurable band ordering for array consumers, window/tile
//! math, bbox masking/padding, digital-number to top-of-atmosphere conversion and
//! GeoTIFF I/O. All pixel math assumes north-up images (no rotation terms)

use std::path::Path;

use ndarray::{Array2, Array3, ArrayView3, Axis, s};
use tracing::debug;

use swath_common::platform::Platform;

mod errors;
pub use errors::*;

pub mod toa;
pub use toa::*;

pub mod geotiff;
pub use geotiff::*;

/* #region geo transform / windows ****************************************************************************/

/// affine transform mapping pixel space to geographic space, stored in GDAL order:
/// [origin_x, pixel_width, 0, origin_y, 0, -pixel_height]
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct GeoTransform([f64;6]);

impl GeoTransform {
    pub fn new (gt: [f64;6])->Self {
        GeoTransform(gt)
    }

    pub fn from_origin (origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64)->Self {
        GeoTransform( [origin_x, pixel_width, 0.0, origin_y, 0.0, -pixel_height.abs()])
    }

    pub fn as_array (&self)->[f64;6] { self.0 }

    pub fn origin (&self)->(f64,f64) { (self.0[0], self.0[3]) }
    pub fn pixel_width (&self)->f64 { self.0[1] }
    pub fn pixel_height (&self)->f64 { self.0[5].abs() }

    pub fn is_north_up (&self)->bool {
        self.0[2] == 0.0 && self.0[4] == 0.0 && self.0[5] < 0.0
    }

    /// geographic coordinates of the upper-left corner of pixel (col,row)
    pub fn xy (&self, col: isize, row: isize)->(f64,f64) {
        ( self.0[0] + col as f64 * self.0[1],
          self.0[3] + row as f64 * self.0[5] )
    }

    /// the transform of a window at (col_off,row_off) of this raster
    pub fn window_transform (&self, col_off: isize, row_off: isize)->GeoTransform {
        let (x,y) = self.xy( col_off, row_off);
        GeoTransform( [x, self.0[1], self.0[2], y, self.0[4], self.0[5]])
    }

    /// [min_x, min_y, max_x, max_y] of a raster of the given size
    pub fn bounds (&self, cols: usize, rows: usize)->[f64;4] {
        let (x0,y0) = self.xy(0,0);
        let (x1,y1) = self.xy( cols as isize, rows as isize);
        [ x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1) ]
    }
}

/// a pixel window (possibly extending past the raster edges before intersection)
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct Window {
    pub col_off: isize,
    pub row_off: isize,
    pub width: usize,
    pub height: usize,
}

impl Window {
    pub fn new (col_off: isize, row_off: isize, width: usize, height: usize)->Self {
        Window { col_off, row_off, width, height }
    }

    pub fn is_empty (&self)->bool {
        self.width == 0 || self.height == 0
    }

    /// clip this window to another one (normally the full raster extent)
    pub fn intersection (&self, other: &Window)->Window {
        let col0 = self.col_off.max(other.col_off);
        let row0 = self.row_off.max(other.row_off);
        let col1 = (self.col_off + self.width as isize).min( other.col_off + other.width as isize);
        let row1 = (self.row_off + self.height as isize).min( other.row_off + other.height as isize);

        Window {
            col_off: col0,
            row_off: row0,
            width: (col1 - col0).max(0) as usize,
            height: (row1 - row0).max(0) as usize,
        }
    }
}

/* #endregion geo transform / windows */

/// order in which array consumers want the axes: bands-first (bands,rows,cols) is the
/// native raster layout, bands-last (rows,cols,bands) the common image layout
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum BandOrder {
    First,
    Last,
}

/* #region RasterImage ****************************************************************************************/

/// an in-memory multi-band raster with geo referencing. Pixel data is band-sequential
/// f32 internally - the `view` accessor exposes it in the configured band order
#[derive(Debug,Clone)]
pub struct RasterImage {
    arr: Array3<f32>, // (bands, rows, cols)

    pub band_order: BandOrder,
    pub transform: GeoTransform,
    pub epsg: u32,
    pub nodata: Option<f32>,
}

impl RasterImage {
    pub fn new (arr: Array3<f32>, transform: GeoTransform, epsg: u32)->Self {
        RasterImage { arr, band_order: BandOrder::First, transform, epsg, nodata: None }
    }

    pub fn with_band_order (mut self, band_order: BandOrder)->Self {
        self.band_order = band_order;
        self
    }

    pub fn with_nodata (mut self, nodata: f32)->Self {
        self.nodata = Some(nodata);
        self
    }

    pub fn from_geotiff (path: impl AsRef<Path>)->Result<Self> {
        read_geotiff( path.as_ref())
    }

    pub fn n_bands (&self)->usize { self.arr.shape()[0] }
    pub fn rows (&self)->usize { self.arr.shape()[1] }
    pub fn cols (&self)->usize { self.arr.shape()[2] }

    /// the native bands-first array
    pub fn array (&self)->&Array3<f32> { &self.arr }

    pub fn array_mut (&mut self)->&mut Array3<f32> { &mut self.arr }

    /// array view in the configured band order
    pub fn view (&self)->ArrayView3<f32> {
        match self.band_order {
            BandOrder::First => self.arr.view(),
            BandOrder::Last => self.arr.view().permuted_axes( [1,2,0]),
        }
    }

    pub fn bounds (&self)->[f64;4] {
        self.transform.bounds( self.cols(), self.rows())
    }

    fn full_window (&self)->Window {
        Window::new( 0, 0, self.cols(), self.rows())
    }

    /// geographic bounds of a pixel window
    pub fn window_bounds (&self, w: &Window)->[f64;4] {
        self.transform.window_transform( w.col_off, w.row_off).bounds( w.width, w.height)
    }

    /// pixel window covering the given geographic bbox (clipped to the raster)
    pub fn window_of_bounds (&self, bbox: &[f64;4])->Result<Window> {
        if !self.transform.is_north_up() {
            return Err( unsupported("window math on rotated transform"))
        }
        let (x0,y0) = self.transform.origin();
        let pw = self.transform.pixel_width();
        let ph = self.transform.pixel_height();

        let col0 = ((bbox[0] - x0) / pw).floor() as isize;
        let col1 = ((bbox[2] - x0) / pw).ceil() as isize;
        let row0 = ((y0 - bbox[3]) / ph).floor() as isize;
        let row1 = ((y0 - bbox[1]) / ph).ceil() as isize;

        let w = Window::new( col0, row0, (col1-col0).max(0) as usize, (row1-row0).max(0) as usize);
        Ok( w.intersection( &self.full_window()) )
    }

    /* #region valid data *************************************************************************************/

    /// smallest window containing all pixels that differ from the nodata value
    pub fn valid_data_window (&self, nodata: f32)->Option<Window> {
        let (rows,cols) = (self.rows(), self.cols());
        let (mut c0, mut r0, mut c1, mut r1) = (cols as isize, rows as isize, -1isize, -1isize);

        for band in self.arr.axis_iter( Axis(0)) {
            for ((row,col),&v) in band.indexed_iter() {
                if v != nodata {
                    if (col as isize) < c0 { c0 = col as isize }
                    if (row as isize) < r0 { r0 = row as isize }
                    if (col as isize) > c1 { c1 = col as isize }
                    if (row as isize) > r1 { r1 = row as isize }
                }
            }
        }

        if c1 < 0 { return None }
        Some( Window::new( c0, r0, (c1-c0+1) as usize, (r1-r0+1) as usize) )
    }

    /// bounding box covering the raster's valid data pixels
    pub fn valid_data_bounds (&self, nodata: f32)->Option<[f64;4]> {
        self.valid_data_window(nodata).map(|w| self.window_bounds(&w))
    }

    /* #endregion valid data */

    /* #region mask / pad *************************************************************************************/

    /// mask the area outside the bbox with the nodata value, optionally cropping the
    /// raster to the bbox window
    pub fn mask_bbox (&mut self, bbox: &[f64;4], crop: bool, nodata: f32)->Result<()> {
        let w = self.window_of_bounds(bbox)?;
        if w.is_empty() {
            return Err( SwathRasterError::WindowError( format!("bbox {bbox:?} outside raster")))
        }

        if crop {
            let (c0,r0) = (w.col_off as usize, w.row_off as usize);
            self.arr = self.arr.slice( s![.., r0..r0+w.height, c0..c0+w.width]).to_owned();
            self.transform = self.transform.window_transform( w.col_off, w.row_off);
        } else {
            let (c0,r0) = (w.col_off, w.row_off);
            let (c1,r1) = (c0 + w.width as isize, r0 + w.height as isize);
            for ((_,row,col), v) in self.arr.indexed_iter_mut() {
                let (row,col) = (row as isize, col as isize);
                if row < r0 || row >= r1 || col < c0 || col >= c1 {
                    *v = nodata;
                }
            }
        }

        self.nodata = Some(nodata);
        Ok(())
    }

    /// grow the raster with fill pixels until it covers the bbox, adjusting the
    /// transform. Use before masking with a bbox that extends past the raster bounds
    pub fn pad_to_bbox (&mut self, bbox: &[f64;4], fill: f32)->Result<()> {
        if !self.transform.is_north_up() {
            return Err( unsupported("padding on rotated transform"))
        }
        let bounds = self.bounds();
        let pw = self.transform.pixel_width();
        let ph = self.transform.pixel_height();

        let left = (((bounds[0] - bbox[0]) / pw).ceil()).max(0.0) as usize;
        let right = (((bbox[2] - bounds[2]) / pw).ceil()).max(0.0) as usize;
        let top = (((bbox[3] - bounds[3]) / ph).ceil()).max(0.0) as usize;
        let bottom = (((bounds[1] - bbox[1]) / ph).ceil()).max(0.0) as usize;

        if left == 0 && right == 0 && top == 0 && bottom == 0 {
            return Ok(())
        }

        let (bands,rows,cols) = (self.n_bands(), self.rows(), self.cols());
        let mut padded = Array3::from_elem( (bands, rows+top+bottom, cols+left+right), fill);
        padded.slice_mut( s![.., top..top+rows, left..left+cols]).assign(&self.arr);

        self.arr = padded;
        self.transform = self.transform.window_transform( -(left as isize), -(top as isize));
        Ok(())
    }

    /* #endregion mask / pad */

    /* #region tiles / subsets ********************************************************************************/

    /// tile windows of the given size covering the raster, optionally grown by
    /// `overlap` pixels on each side (and clipped at the raster edges)
    pub fn tiles (&self, width: usize, height: usize, overlap: usize)->Vec<Window> {
        let full = self.full_window();
        let mut windows: Vec<Window> = Vec::new();

        let mut row_off = 0;
        while row_off < self.rows() {
            let mut col_off = 0;
            while col_off < self.cols() {
                let w = Window::new(
                    col_off as isize - overlap as isize,
                    row_off as isize - overlap as isize,
                    width + 2*overlap,
                    height + 2*overlap
                );
                windows.push( w.intersection(&full));
                col_off += width;
            }
            row_off += height;
        }

        windows
    }

    /// slice of one band for a tile window, together with the window's geo bounds
    pub fn subset (&self, w: &Window, band: usize)->Result<(Array2<f32>,[f64;4])> {
        if band >= self.n_bands() {
            return Err( SwathRasterError::WindowError( format!("no band {band}")))
        }
        let clipped = w.intersection( &self.full_window());
        if clipped.is_empty() {
            return Err( SwathRasterError::WindowError( format!("window {w:?} outside raster")))
        }

        let (c0,r0) = (clipped.col_off as usize, clipped.row_off as usize);
        let slice = self.arr.slice( s![band, r0..r0+clipped.height, c0..c0+clipped.width]).to_owned();

        Ok( (slice, self.window_bounds(&clipped)) )
    }

    /* #endregion tiles / subsets */

    /// convert digital numbers to top-of-atmosphere values in place, see `toa`
    pub fn dn2toa (&mut self, platform: Platform, mtl: Option<&MtlMetadata>, wavelengths: Option<&[&str]>)->Result<()> {
        toa::dn2toa( &mut self.arr, platform, mtl, wavelengths)
    }

    /// write as GeoTIFF (single IFD for one band, one IFD per band otherwise)
    pub fn write_geotiff (&self, path: impl AsRef<Path>, dtype: RasterDtype)->Result<()> {
        write_geotiff( self, path.as_ref(), dtype)
    }
}

/* #endregion RasterImage */

/// write a world file sidecar for a raster stored at `image_path` (pixel-center
/// convention, extension derived from the image extension)
pub fn write_world_file (image_path: impl AsRef<Path>, transform: &GeoTransform)->Result<std::path::PathBuf> {
    use std::io::Write;

    let image_path = image_path.as_ref();
    let ext = image_path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    let world_ext = match ext.as_str() {
        "jpg" | "jpeg" => "jgw",
        "png" => "pgw",
        "tif" | "tiff" => "tfw",
        _ => "wld",
    };

    let gt = transform.as_array();
    let a = gt[1];
    let d = gt[4];
    let b = gt[2];
    let e = gt[5];
    let c = gt[0] + 0.5*a + 0.5*b;
    let f = gt[3] + 0.5*d + 0.5*e;

    let path = image_path.with_extension(world_ext);
    let mut file = std::fs::File::create(&path)?;
    writeln!( file, "{a:.12}")?;
    writeln!( file, "{d:.12}")?;
    writeln!( file, "{b:.12}")?;
    writeln!( file, "{e:.12}")?;
    writeln!( file, "{c:.12}")?;
    writeln!( file, "{f:.12}")?;

    Ok(path)
}

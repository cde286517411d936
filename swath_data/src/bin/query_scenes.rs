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

//! query a hub for scene metadata and optionally download products/quicklooks, e.g.
//! ```text
//! query_scenes --hub copernicus --platform Sentinel-2 --aoi "8.9,47.2,9.5,47.8" \
//!              --start NOW-14DAYS --end NOW --max-cloud 30 --quicklook
//! ```

use std::path::PathBuf;

use anyhow::{anyhow,Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use swath_common::datetime::DateRange;
use swath_common::geo::Aoi;
use swath_data::{
    CopernicusHub, EarthExplorerHub, Hub, LocalDirHub, Platform, SceneQuery, StacHub,
};

#[derive(Parser,Debug)]
#[command(about = "query satellite image metadata and download products")]
struct Args {
    /// hub to query [copernicus, earthexplorer, stac, dir]
    #[arg(short = 'H', long, default_value = "copernicus")]
    hub: String,

    /// metadata directory (only for --hub dir)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// hub config file (RON) for the copernicus/stac hubs
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// image platform (provider name, e.g. Sentinel-2 or LANDSAT_8_C1)
    #[arg(short, long, default_value = "Sentinel-2")]
    platform: String,

    /// area of interest: bounding box "west,south,east,north", WKT polygon or GeoJSON file
    #[arg(short, long)]
    aoi: String,

    /// acquisition start (NOW-<n>DAYS, yyyyMMdd, RFC3339)
    #[arg(long, default_value = "NOW-14DAYS")]
    start: String,

    /// acquisition end
    #[arg(long, default_value = "NOW")]
    end: String,

    /// maximum scene cloud cover in percent
    #[arg(long)]
    max_cloud: Option<f64>,

    /// download the matching products
    #[arg(short, long)]
    download: bool,

    /// download quicklooks of the matching products
    #[arg(short, long)]
    quicklook: bool,

    /// save the normalized metadata records as GeoJSON files
    #[arg(long)]
    save_meta: bool,

    /// print the result collection as CSV
    #[arg(long)]
    csv: bool,

    /// output directory for downloads and saved metadata
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
}

fn parse_aoi (spec: &str)->Result<Aoi> {
    let parts: Vec<f64> = spec.split(',').filter_map(|s| s.trim().parse().ok()).collect();
    if parts.len() == 4 {
        Ok( Aoi::from_bbox_degrees( parts[0], parts[1], parts[2], parts[3]))
    } else {
        Aoi::from_spec(spec).map_err(|e| anyhow!("invalid AOI: {e}"))
    }
}

async fn create_hub (args: &Args)->Result<Box<dyn Hub + Send>> {
    Ok( match args.hub.as_str() {
        "copernicus" => {
            let config = args.config.as_ref().map(|p| swath_data::load_config(p)).transpose()?.unwrap_or_default();
            Box::new( CopernicusHub::connect_config(config)?)
        }
        "earthexplorer" => Box::new( EarthExplorerHub::connect().await?),
        "stac" => match &args.config {
            Some(path) => Box::new( StacHub::new( swath_data::load_config(path)?)),
            None => Box::new( StacHub::from_env()?),
        },
        "dir" => {
            let dir = args.dir.as_ref().ok_or( anyhow!("--dir required for the dir hub"))?;
            Box::new( LocalDirHub::new(dir)?)
        }
        other => return Err( anyhow!("unknown hub {other} [copernicus, earthexplorer, stac, dir]"))
    })
}

#[tokio::main]
async fn main ()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let platform: Platform = args.platform.parse()
        .map_err(|_| anyhow!("unknown platform {}", args.platform))?;
    let aoi = parse_aoi(&args.aoi)?;
    let date = DateRange::from_specs( &args.start, &args.end)?;

    let mut query = SceneQuery::new( platform, aoi, date);
    if let Some(max_cloud) = args.max_cloud {
        query = query.with_cloud_cover( 0.0, max_cloud);
    }

    let mut hub = create_hub(&args).await?;
    let scenes = hub.query_scenes(&query).await?.sort_by_acquisition_date();

    println!("{} scene(s) match", scenes.len());
    for m in scenes.iter() {
        let date = m.acquisition_date.map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string()).unwrap_or_default();
        let cloud = m.cloud_cover_percentage.map(|c| format!("{c:5.1}%")).unwrap_or_else(|| "    -".to_string());
        println!("{date}  {cloud}  {}", m.src_id);
    }

    if args.csv {
        print!("{}", scenes.to_csv()?);
    }

    if args.save_meta || args.download || args.quicklook {
        std::fs::create_dir_all(&args.out_dir)?;
    }
    if args.save_meta {
        scenes.save(&args.out_dir)?;
    }

    for m in scenes.iter() {
        if args.quicklook {
            hub.download_quicklook( m, &args.out_dir).await?;
        }
        if args.download {
            hub.download_scene( m, &args.out_dir).await?;
        }
    }

    hub.close().await?;
    Ok(())
}

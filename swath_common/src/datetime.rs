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

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Timelike, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize,Deserialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DateError>;

#[derive(Error,Debug)]
pub enum DateError {
    #[error("invalid date spec '{0}'")]
    InvalidSpec( String ),

    #[error("invalid date range {0}..{1}")]
    InvalidRange( DateTime<Utc>, DateTime<Utc> ),
}

#[inline] pub fn secs (n: u64)->Duration { Duration::from_secs(n) }
#[inline] pub fn minutes (n: u64)->Duration { Duration::from_secs(n * 60) }
#[inline] pub fn hours (n: u64)->Duration { Duration::from_secs(n * 3600) }
#[inline] pub fn days (n: u64)->Duration { Duration::from_secs(n * 86400) }

/// return the full hour for given DateTime (minutes, seconds and nanos all zeroed)
pub fn full_hour<Tz:TimeZone> (dt: &DateTime<Tz>)->DateTime<Tz> {
    dt.with_minute(0).unwrap().with_second(0).unwrap().with_nanosecond(0).unwrap()
}

/// the timestamp format hub queries expect (DHuS and Earth Explorer both take
/// second resolution Zulu timestamps)
pub fn format_query_date (dt: &DateTime<Utc>)->String {
    dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

lazy_static! {
    // NOW, NOW-3DAYS, NOW+12HOURS etc.
    static ref NOW_RE: Regex = Regex::new( r"^NOW(?:([+-])(\d+)\s*(MINUTE|HOUR|DAY|WEEK|MONTH)S?)?$").unwrap();
    static ref YMD_RE: Regex = Regex::new( r"^(\d{4})(\d{2})(\d{2})$").unwrap();
}

/// parse a user-facing date spec into a concrete UTC timestamp, relative to `now`.
/// Accepted forms are the ones the hubs accept in their query languages:
///    NOW, NOW-<n>MINUTE(S)|HOUR(S)|DAY(S)|WEEK(S)|MONTH(S)
///    yyyyMMdd, yyyy-MM-dd
///    RFC3339 timestamps (e.g. 2020-01-13T07:46:19Z)
/// MONTH counts as 30 days (DHuS convention)
pub fn parse_date_spec (spec: &str, now: DateTime<Utc>)->Result<DateTime<Utc>> {
    let s = spec.trim();

    if let Some(cap) = NOW_RE.captures(s) {
        let dt = match (cap.get(1), cap.get(2), cap.get(3)) {
            (Some(sign), Some(n), Some(unit)) => {
                let n: i64 = n.as_str().parse().map_err(|_| DateError::InvalidSpec(s.to_string()))?;
                let delta = match unit.as_str() {
                    "MINUTE" => TimeDelta::minutes(n),
                    "HOUR" => TimeDelta::hours(n),
                    "DAY" => TimeDelta::days(n),
                    "WEEK" => TimeDelta::weeks(n),
                    "MONTH" => TimeDelta::days(30 * n),
                    _ => return Err( DateError::InvalidSpec(s.to_string()))
                };
                if sign.as_str() == "-" { now - delta } else { now + delta }
            }
            _ => now
        };
        return Ok(dt)
    }

    if let Some(cap) = YMD_RE.captures(s) {
        let y: i32 = cap[1].parse().map_err(|_| DateError::InvalidSpec(s.to_string()))?;
        let m: u32 = cap[2].parse().map_err(|_| DateError::InvalidSpec(s.to_string()))?;
        let d: u32 = cap[3].parse().map_err(|_| DateError::InvalidSpec(s.to_string()))?;
        let nd = NaiveDate::from_ymd_opt( y, m, d).ok_or_else(|| DateError::InvalidSpec(s.to_string()))?;
        return Ok( nd.and_hms_opt(0,0,0).unwrap().and_utc() )
    }

    if let Ok(nd) = NaiveDate::parse_from_str( s, "%Y-%m-%d") {
        return Ok( nd.and_hms_opt(0,0,0).unwrap().and_utc() )
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok( dt.with_timezone(&Utc) )
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str( s, "%Y-%m-%dT%H:%M:%S") {
        return Ok( ndt.and_utc() )
    }

    Err( DateError::InvalidSpec( s.to_string()) )
}

/// a half-open [start,end) acquisition time interval as used by all hub queries
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new (start: DateTime<Utc>, end: DateTime<Utc>)->Result<Self> {
        if start < end {
            Ok( DateRange { start, end } )
        } else {
            Err( DateError::InvalidRange( start, end) )
        }
    }

    pub fn from_specs (start: &str, end: &str)->Result<Self> {
        let now = Utc::now();
        Self::new( parse_date_spec( start, now)?, parse_date_spec( end, now)?)
    }

    pub fn contains (&self, dt: &DateTime<Utc>)->bool {
        *dt >= self.start && *dt < self.end
    }

    pub fn query_start (&self)->String { format_query_date(&self.start) }
    pub fn query_end (&self)->String { format_query_date(&self.end) }
}

impl fmt::Display for DateRange {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.query_start(), self.query_end())
    }
}

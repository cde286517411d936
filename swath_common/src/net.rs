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

///! common utility functions for network operations

use std::io::Write;
use std::path::{Path,PathBuf};

use reqwest::{header::HeaderMap, Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned,Serialize};
use thiserror::Error;
use tracing::info;

use crate::fs::file_length;

pub type Result<T> = std::result::Result<T, NetError>;

#[derive(Error,Debug)]
pub enum NetError {
    #[error("IO error: {0}")]
    IOError( #[from] std::io::Error),

    #[error("http error: {0}")]
    HttpError( #[from] reqwest::Error),

    #[error("not found: {0}")]
    NotFoundError( String ),

    #[error("not authorized: {0}")]
    AuthError( String ),

    #[error("JSON error: {0}")]
    JsonError( String ),

    #[error("operation failed: {0}")]
    OpFailed( String ),
}

pub fn op_failed (msg: impl ToString)->NetError {
    NetError::OpFailed( msg.to_string())
}

pub fn url_file_name<'a> (url: &'a str) -> Option<&'a str> {
    let path = url.split('?').next()?;
    let name = path.rsplit('/').next()?;
    if name.is_empty() { None } else { Some(name) }
}

fn check_status (status: StatusCode, url: &str)->Result<()> {
    match status {
        StatusCode::OK => Ok(()),
        StatusCode::NOT_FOUND => Err( NetError::NotFoundError( url.to_string())),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err( NetError::AuthError( format!("{} for {}", status.as_str(), url))),
        other => Err( NetError::OpFailed( format!("response status {} for {}", other.as_str(), url)))
    }
}

/// the reqwest::Response::json() alternative does not preserve enough error information
pub async fn from_json<T> (response: Response)->Result<T> where T: DeserializeOwned {
    let url = response.url().to_string();
    check_status( response.status(), &url)?;

    let bytes = response.bytes().await?;
    serde_json::from_slice( &bytes).map_err(|e| NetError::JsonError( e.to_string()))
}

pub async fn get_json<T> (client: &Client, url: &str)->Result<T> where T: DeserializeOwned {
    let response = client.get(url).send().await?;
    from_json(response).await
}

pub async fn post_json_query<T,U> (client: &Client, url: &str, data: &T)->Result<U>
    where T: Serialize, U: DeserializeOwned
{
    let response = client.post(url).json(data).send().await?;
    from_json(response).await
}

/// retrieve the response of a prepared request in chunks and store it in `path`.
/// The data goes to a temp file in the target directory first so that partial downloads
/// never become visible under the final pathname
pub async fn download_request (req: RequestBuilder, path: impl AsRef<Path>)->Result<u64> {
    let path = path.as_ref();
    let dir = path.parent().ok_or( op_failed( format!("no parent dir for {path:?}")))?;

    let mut response = req.send().await?;
    check_status( response.status(), response.url().as_str())?;

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    let mut len: u64 = 0;
    while let Some(chunk) = response.chunk().await? {
        len += chunk.len() as u64;
        file.write_all(&chunk)?;
    }
    file.flush()?;

    file.persist(path).map_err(|e| NetError::IOError(e.error))?;
    Ok(len)
}

/// fetch file from URL using HTTP GET method. Retrieve in chunks to support large files.
/// Note this requires a full URL
pub async fn download_url (client: &Client, url: &str, opt_headers: &Option<HeaderMap>, path: impl AsRef<Path>)->Result<u64> {
    let mut req = client.get(url);
    if let Some(headermap) = opt_headers {
        req = req.headers( headermap.clone());
    }
    download_request( req, path).await
}

pub async fn get_file (client: &Client, url: &str, opt_headers: &Option<HeaderMap>, dir: impl AsRef<Path>)->Result<PathBuf> {
    if let Some(fname) = url_file_name(url) {
        let path = dir.as_ref().join(fname);
        download_url( client, url, opt_headers, &path).await?;
        Ok(path)
    } else {
        Err( op_failed( format!("not a file URL: {url}")))
    }
}

/// like get_file but skips retrieval if there already is a local file of the same length.
/// We assume equal length means same content, which is how incomplete downloads are detected
pub async fn get_differing_size_file (client: &Client, url: &str, opt_headers: &Option<HeaderMap>, dir: impl AsRef<Path>)->Result<PathBuf> {
    if let Some(fname) = url_file_name(url) {
        let path = dir.as_ref().join(fname);

        if let Some(local_len) = file_length(&path) {
            if let Ok(remote_len) = get_content_length( client, url, opt_headers).await {
                if local_len == remote_len {
                    info!("file {} already downloaded", fname);
                    return Ok(path)
                }
            }
        }

        download_url( client, url, opt_headers, &path).await?;
        Ok(path)
    } else {
        Err( op_failed( format!("not a file URL: {url}")))
    }
}

/// get content-length of URL without retrieving the actual content
pub async fn get_content_length (client: &Client, url: &str, opt_headers: &Option<HeaderMap>)->Result<u64> {
    let mut req = client.head(url);
    if let Some(headermap) = opt_headers {
        req = req.headers( headermap.clone());
    }
    content_length_of(req).await
}

/// content-length reported for a prepared HEAD request (use this if the request
/// needs authentication or special headers)
pub async fn content_length_of (req: RequestBuilder)->Result<u64> {
    let response = req.send().await?;
    check_status( response.status(), response.url().as_str())?;

    let headers = response.headers();
    if let Some(content_length) = headers.get("content-length") {
        content_length.to_str()
            .map_err(|_| op_failed("invalid header value"))?
            .parse()
            .map_err(|_| op_failed("invalid content-length"))
    } else {
        Err( op_failed("no content-length"))
    }
}

use anyhow::{Context, Result};
use std::collections::HashMap;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::constant::MAX_REQUEST_BYTES;

#[derive(Debug)]
pub enum Method {
    GET,
    POST,
    PUT,
    DELETE,
    OPTIONS,
}

impl TryFrom<&str> for Method {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, anyhow::Error> {
        match value {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "DELETE" => Ok(Method::DELETE),
            "OPTIONS" => Ok(Method::OPTIONS),
            _ => Err(anyhow::anyhow!("Method not supported")),
        }
    }
}

#[derive(Debug)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub params: Option<std::collections::HashMap<String, String>>,
    pub headers: std::collections::HashMap<String, String>,
    pub body: Option<String>,
}

impl Request {
    pub async fn new<Reader: AsyncRead + Unpin>(mut reader: Reader) -> Result<Self> {
        let mut buffer = [0; MAX_REQUEST_BYTES];
        let mut size = 0;
        // The head and the body can arrive in separate segments; read until
        // content-length bytes of body are in or the peer closes.
        loop {
            let read = reader
                .read(&mut buffer[size..])
                .await
                .context("Failed to read stream")?;
            size += read;
            if size >= MAX_REQUEST_BYTES {
                return Err(anyhow::anyhow!("Request too large"));
            }
            if read == 0 || Self::is_complete(&buffer[..size]) {
                break;
            }
        }
        let request = String::from_utf8_lossy(&buffer[..size]);
        let mut parts = request.split("\r\n\r\n");
        let head = parts.next().context("Headline Error")?;
        // Body
        let body = parts.next().map_or(None, |b| Some(b.to_string()));

        // Method and path
        let mut head_line = head.lines();
        let first: &str = head_line.next().context("Empty Request")?;
        let mut request_parts: std::str::SplitWhitespace<'_> = first.split_whitespace();
        let method: Method = request_parts
            .next()
            .ok_or(anyhow::anyhow!("missing method"))
            .and_then(TryInto::try_into)
            .context("Missing Method")?;
        let url = request_parts.next().context("No Path")?;
        let (path, params) = Self::extract_query_param(url);

        // Headers
        let mut headers = HashMap::new();
        for line in head_line {
            if let Some((k, v)) = line.split_once(":") {
                headers.insert(k.trim().to_lowercase(), v.trim().to_string());
            }
        }
        Ok(Request {
            method,
            path,
            headers,
            body,
            params,
        })
    }

    fn is_complete(bytes: &[u8]) -> bool {
        let Some(head_end) = bytes.windows(4).position(|window| window == b"\r\n\r\n") else {
            return false;
        };
        let head = String::from_utf8_lossy(&bytes[..head_end]);
        let content_length = head
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(key, _)| key.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        bytes.len() - head_end - 4 >= content_length
    }

    fn extract_query_param(url: &str) -> (String, Option<HashMap<String, String>>) {
        if let Some(pos) = url.find('?') {
            let path = &url[0..pos];
            let query_string = &url[pos + 1..];

            let params: HashMap<_, _> = query_string
                .split('&')
                .filter_map(|pair| {
                    let mut kv = pair.split('=');
                    Some((kv.next()?.to_string(), kv.next()?.to_string()))
                })
                .collect();

            (path.to_string(), Some(params))
        } else {
            (url.to_string(), None)
        }
    }
}

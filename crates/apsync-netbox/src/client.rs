// NetBox HTTP client
//
// Wraps `reqwest::Client` with token auth, URL construction, pagination
// following, and error mapping. Per-kind endpoints (sites, devices, etc.)
// are implemented as inherent methods in separate modules to keep this
// one focused on transport mechanics.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::Paginated;

/// Markers NetBox puts in 400 bodies when a natural key collides.
const DUPLICATE_KEY_MARKERS: [&str; 2] = ["must be unique", "already exists"];

/// Async client for the NetBox REST API.
///
/// Token-authenticated JSON REST under `{base}/api/`. List responses are
/// paginated; [`get_list`](Self::get_list) follows `next` links so callers
/// always see the full result set.
pub struct NetboxClient {
    http: reqwest::Client,
    base_url: Url,
}

impl NetboxClient {
    /// Build a client from a base URL and API token.
    ///
    /// The token is injected as a default `Authorization: Token ...` header
    /// on every request and marked sensitive so it never appears in logs.
    pub fn new(base_url: Url, token: &SecretString) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Token {}", token.expose_secret()))
            .map_err(|e| Error::Authentication {
                message: format!("token is not a valid header value: {e}"),
            })?;
        auth.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth);
        headers.insert(
            reqwest::header::ACCEPT,
            HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        Ok(Self { http, base_url })
    }

    /// Wrap a pre-built `reqwest::Client` (caller manages auth headers).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The configured NetBox root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build `{base}/api/{path}/` for an endpoint path like `dcim/devices`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_matches('/');
        Ok(Url::parse(&format!("{base}/api/{path}/"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET a filtered list, following pagination until exhausted.
    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, Error> {
        let mut url = self.api_url(path)?;
        url.query_pairs_mut().extend_pairs(params);

        let mut results = Vec::new();
        let mut next = Some(url);
        while let Some(url) = next.take() {
            debug!("GET {url}");
            let resp = self.http.get(url).send().await?;
            let page: Paginated<T> = handle_response(resp).await?;
            results.extend(page.results);
            if let Some(n) = page.next {
                next = Some(Url::parse(&n)?);
            }
        }
        Ok(results)
    }

    /// GET a filtered list and return the first match, if any.
    ///
    /// Natural-key filters are expected to match at most one object; extra
    /// matches are the remote's problem, the first one wins here.
    pub(crate) async fn find_one<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Option<T>, Error> {
        Ok(self.get_list(path, params).await?.into_iter().next())
    }

    /// POST a JSON body, returning the created object.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("POST {url}");
        let resp = self.http.post(url).json(body).send().await?;
        handle_response(resp).await
    }

    /// PATCH an object by id, returning the updated object.
    pub(crate) async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        id: u64,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let url = self.api_url(&format!("{path}/{id}"))?;
        debug!("PATCH {url}");
        let resp = self.http.patch(url).json(body).send().await?;
        handle_response(resp).await
    }
}

/// Map a response into a typed payload or the error taxonomy.
///
/// 400 bodies carrying a uniqueness-violation message become
/// [`Error::Conflict`] so the reconciler can recover by re-fetching.
async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::Authentication {
            message: format!("HTTP {status}: {}", preview(&body)),
        });
    }

    if status == reqwest::StatusCode::BAD_REQUEST {
        let body = resp.text().await.unwrap_or_default();
        let lowered = body.to_ascii_lowercase();
        if DUPLICATE_KEY_MARKERS.iter().any(|m| lowered.contains(m)) {
            return Err(Error::Conflict { reason: body });
        }
        return Err(Error::Api {
            status: status.as_u16(),
            message: preview(&body).to_owned(),
        });
    }

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::Api {
            status: status.as_u16(),
            message: preview(&body).to_owned(),
        });
    }

    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(&body)),
    })
}

/// Body prefix for error messages, cut on a char boundary.
fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

/// Remote catalog API client
///
/// All business logic lives behind the HTTP API; this module is the thin
/// boundary in front of it. `CatalogGateway` covers the product CRUD
/// endpoints plus sign-in, and shares its cookie jar with `SessionGuard`
/// so the session cookie from `/api/sign` rides along on every call.
///
/// Calls are single-shot: no timeout, no cancellation, no retry. A second
/// attempt only ever happens because the user triggers one.

use log::{debug, warn};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::data::Product;
use crate::state::form::ProductPayload;

/// Sign-in form fields, posted as JSON to `/api/sign`.
#[derive(Serialize, Debug, Clone, Default)]
pub struct Credentials {
    pub username: String,
    #[serde(rename = "idNumber")]
    pub id_number: String,
    pub password: String,
}

#[derive(Deserialize, Debug)]
struct AuthCheck {
    authenticated: bool,
}

/// Client for the product endpoints of the remote API.
#[derive(Debug, Clone)]
pub struct CatalogGateway {
    client: Client,
    base_url: String,
}

impl CatalogGateway {
    /// Build a gateway for `base_url` with a cookie jar for the session.
    pub fn new(base_url: String) -> Result<Self, ApiError> {
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self { client, base_url })
    }

    /// Guard sharing this gateway's session cookie.
    pub fn session_guard(&self) -> SessionGuard {
        SessionGuard {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
        }
    }

    /// `POST /api/sign` — exchange credentials for a session cookie.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let res = self
            .client
            .post(format!("{}/api/sign", self.base_url))
            .json(credentials)
            .send()
            .await?;
        expect_success(res.status())
    }

    /// `GET /api/products` — the full catalog.
    pub async fn list(&self) -> Result<Vec<Product>, ApiError> {
        let res = self
            .client
            .get(format!("{}/api/products", self.base_url))
            .send()
            .await?;
        expect_success(res.status())?;

        let products: Vec<Product> = res.json().await?;
        debug!("fetched {} products", products.len());
        Ok(products)
    }

    /// `GET /api/product/{id}` — one product for the edit form.
    pub async fn fetch_one(&self, id: &str) -> Result<Product, ApiError> {
        let res = self
            .client
            .get(format!("{}/api/product/{}", self.base_url, id))
            .send()
            .await?;
        expect_success(res.status())?;
        Ok(res.json().await?)
    }

    /// `POST /api/add/product` — multipart create.
    pub async fn create(&self, payload: ProductPayload) -> Result<(), ApiError> {
        let res = self
            .client
            .post(format!("{}/api/add/product", self.base_url))
            .multipart(multipart_body(payload))
            .send()
            .await?;
        expect_success(res.status())
    }

    /// `PUT /api/product/edit/{id}` — multipart update; omitting the image
    /// part keeps the existing upload.
    pub async fn update(&self, id: &str, payload: ProductPayload) -> Result<(), ApiError> {
        let res = self
            .client
            .put(format!("{}/api/product/edit/{}", self.base_url, id))
            .multipart(multipart_body(payload))
            .send()
            .await?;
        expect_success(res.status())
    }

    /// `DELETE /api/product/{id}`.
    pub async fn remove(&self, id: &str) -> Result<(), ApiError> {
        let res = self
            .client
            .delete(format!("{}/api/product/{}", self.base_url, id))
            .send()
            .await?;
        expect_success(res.status())
    }

    /// Raw bytes of a product's uploaded image, for the native preview
    /// widgets. `url` is the absolute `imageLink` the API served.
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let res = self.client.get(url).send().await?;
        expect_success(res.status())?;
        Ok(res.bytes().await?.to_vec())
    }
}

/// The authentication check every guarded screen runs on entry.
#[derive(Debug, Clone)]
pub struct SessionGuard {
    client: Client,
    base_url: String,
}

impl SessionGuard {
    /// `GET /api/auth/check`. Any failure counts as "not authenticated"
    /// and routes the caller to the sign-in screen.
    pub async fn check(&self) -> bool {
        let result = async {
            let res = self
                .client
                .get(format!("{}/api/auth/check", self.base_url))
                .send()
                .await?;
            expect_success(res.status())?;
            Ok::<AuthCheck, ApiError>(res.json().await?)
        }
        .await;

        match result {
            Ok(check) => check.authenticated,
            Err(e) => {
                warn!("auth check failed: {}", e);
                false
            }
        }
    }
}

fn expect_success(status: reqwest::StatusCode) -> Result<(), ApiError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::Rejected(status))
    }
}

/// Fixed multipart shape: `title`, `description`, `sizes` (JSON array of
/// string-valued rows) and, only when staged, the file under `image`.
fn multipart_body(payload: ProductPayload) -> Form {
    let mut form = Form::new()
        .text("title", payload.title)
        .text("description", payload.description)
        .text("sizes", payload.sizes_json);

    if let Some(part) = payload.image {
        form = form.part("image", Part::bytes(part.bytes).file_name(part.file_name));
    }

    form
}

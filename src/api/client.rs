use std::time::Instant;

use log::{error, info, warn};
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

use crate::auth::session::Session;
use crate::error::AppError;

const BASE_URL: &str = "https://api.delta.electrolux.com/api";
const APP_NAME: &str = "Wellbeing";
const CLIENT_VERSION: &str = "1.8.16400";
const OS_PLATFORM: &str = "iOS";

/// Total attempts per logical API call, counting the first one.
const MAX_AUTH_ATTEMPTS: u32 = 3;

/// Client for the Electrolux Delta API.
///
/// Holds no authentication state of its own; tokens live in the [`Session`]
/// the caller passes into each operation.
pub struct DeltaApi {
    client: reqwest::Client,
    base_url: String,
    verbose: u8,
}

fn build_http_client() -> Result<reqwest::Client, AppError> {
    Ok(reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .build()?)
}

impl DeltaApi {
    pub fn new(verbose: u8) -> Result<Self, AppError> {
        Self::with_base_url(BASE_URL.to_string(), verbose)
    }

    /// Build a client against a non-default API host.
    pub fn with_base_url(base_url: String, verbose: u8) -> Result<Self, AppError> {
        Ok(Self {
            client: build_http_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            verbose,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn trace(&self, level: u8, message: &str) {
        if self.verbose >= level {
            eprintln!("{}", message);
        }
    }

    /// Execute exactly one HTTP request and decode the body as JSON.
    ///
    /// Status codes are returned uninterpreted; policy belongs to the caller.
    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        bearer: Option<&str>,
    ) -> Result<(StatusCode, Value), AppError> {
        self.trace(1, &format!(">>>> {} {}", method, url));

        let mut request = self
            .client
            .request(method, url)
            .header("Content-Type", "application/json");
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            self.trace(2, &serde_json::to_string_pretty(body)?);
            request = request.body(serde_json::to_string(body)?);
        }

        let started = Instant::now();
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        self.trace(
            1,
            &format!(
                "<<<< {} bytes in {:.3} s",
                bytes.len(),
                started.elapsed().as_secs_f64()
            ),
        );

        let content: Value = serde_json::from_slice(&bytes)?;
        self.trace(2, &serde_json::to_string_pretty(&content)?);

        Ok((status, content))
    }

    /// Ask the update server whether the client version is still current.
    ///
    /// Purely observational; callers in the auth flow treat a connection
    /// failure here as non-fatal.
    pub async fn check_for_update(&self) -> Result<Value, AppError> {
        let payload = json!({ "Version": CLIENT_VERSION, "Platform": OS_PLATFORM });

        let (_, content) = self
            .request(
                Method::POST,
                &self.url(&format!("updates/{}", APP_NAME)),
                Some(&payload),
                None,
            )
            .await?;

        match content.get("forceUpdate").and_then(Value::as_bool) {
            Some(true) => info!("Back-end API needs to be updated"),
            _ => error!("Invalid response from update server"),
        }

        Ok(content)
    }

    /// Exchange the client secret for a client token.
    ///
    /// A connection failure leaves the session untouched and is not an error;
    /// the token simply stays absent and a later login fails cleanly.
    pub async fn refresh_client_token(&self, session: &mut Session) -> Result<(), AppError> {
        match self.check_for_update().await {
            Ok(_) => {}
            Err(AppError::Connection(err)) => warn!("Update check failed: {}", err),
            Err(err) => return Err(err),
        }

        let payload = json!({ "ClientSecret": session.credentials.client_secret });

        let content = match self
            .request(
                Method::POST,
                &self.url(&format!("Clients/{}", APP_NAME)),
                Some(&payload),
                None,
            )
            .await
        {
            Ok((_, content)) => content,
            Err(AppError::Connection(err)) => {
                error!("Connection error: {}", err);
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        match content.get("accessToken").and_then(Value::as_str) {
            Some(token) => {
                session.tokens.client_token = Some(token.to_string());
                Ok(())
            }
            None => {
                let description = content
                    .get("codeDescription")
                    .and_then(Value::as_str)
                    .unwrap_or("no access token in response");
                Err(AppError::Auth {
                    message: format!("error refreshing client token: {}", description),
                })
            }
        }
    }

    /// Log in and store a user token in the session.
    ///
    /// Always re-derives the client token first; the vendor rotates both
    /// tokens together, so a cached client token is never reused.
    pub async fn refresh_user_token(&self, session: &mut Session) -> Result<(), AppError> {
        self.refresh_client_token(session).await?;

        let client_token = session
            .tokens
            .client_token
            .clone()
            .ok_or_else(|| AppError::Auth {
                message: "no client token available for login".into(),
            })?;

        let payload = json!({
            "userName": session.credentials.username,
            "password": session.credentials.password,
        });

        let (_, content) = self
            .request(
                Method::POST,
                &self.url("Users/Login"),
                Some(&payload),
                Some(&client_token),
            )
            .await?;

        match content.get("accessToken").and_then(Value::as_str) {
            Some(token) if !token.is_empty() => {
                session.tokens.user_token = Some(token.to_string());
                Ok(())
            }
            _ => {
                let description = content
                    .get("codeDescription")
                    .and_then(Value::as_str)
                    .unwrap_or("login rejected by server");
                Err(AppError::Auth {
                    message: format!("login error: {}", description),
                })
            }
        }
    }

    /// Check that the configured credentials can complete a full login.
    pub async fn verify_credentials(&self, session: &mut Session) -> Result<(), AppError> {
        self.refresh_user_token(session).await
    }

    /// Make an API call, re-authenticating and retrying on a 4xx response.
    ///
    /// The first call of a fresh session deliberately goes out without a
    /// bearer token; the resulting 401 drives the initial login. Any 4xx is
    /// treated the same way, so a malformed command also burns through the
    /// retry budget before surfacing (see DESIGN.md).
    pub async fn fetch(
        &self,
        session: &mut Session,
        path: &str,
        method: Method,
        body: Option<Value>,
    ) -> Result<Value, AppError> {
        let url = self.url(path);

        for _ in 0..MAX_AUTH_ATTEMPTS {
            let bearer = session.tokens.user_token.clone();
            let (status, content) = self
                .request(method.clone(), &url, body.as_ref(), bearer.as_deref())
                .await?;

            if status == StatusCode::OK {
                return Ok(content);
            }

            if status.is_client_error() {
                error!("Request to {} failed with status {}", path, status.as_u16());
                self.refresh_user_token(session).await?;
            } else {
                return Err(AppError::Server {
                    status: status.as_u16(),
                });
            }
        }

        Err(AppError::AuthExhausted {
            attempts: MAX_AUTH_ATTEMPTS,
        })
    }

    /// List all appliances registered to the account.
    pub async fn get_appliances(&self, session: &mut Session) -> Result<Value, AppError> {
        self.fetch(session, "Domains/Appliances", Method::POST, None)
            .await
    }

    /// Get a single appliance record by its vendor identifier.
    pub async fn get_appliance(
        &self,
        session: &mut Session,
        appliance_id: &str,
    ) -> Result<Value, AppError> {
        self.fetch(
            session,
            &format!("Appliances/{}", appliance_id),
            Method::POST,
            None,
        )
        .await
    }

    /// Send a command payload to an appliance. The payload is passed through
    /// opaquely; the API is the source of truth for valid fields.
    pub async fn send_command(
        &self,
        session: &mut Session,
        appliance_id: &str,
        command: Value,
    ) -> Result<Value, AppError> {
        self.fetch(
            session,
            &format!("Appliances/{}/Commands", appliance_id),
            Method::PUT,
            Some(command),
        )
        .await
    }
}

//! JWT authentication middleware for protecting API endpoints.
//!
//! The middleware extracts the Bearer token from the Authorization
//! header, verifies it as an access token with the process-wide signing
//! secret, and injects an [`AuthContext`] into the request extensions.
//! Handlers receive the context through its `FromRequest` implementation.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::{
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use jsonwebtoken::{decode, DecodingKey, Validation};
use uuid::Uuid;

use da_core::domain::entities::token::{Claims, TokenType};
use da_shared::{ErrorResponse, JwtConfig};

/// User authentication context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID extracted from JWT claims
    pub user_id: Uuid,
    /// JWT ID of the access token
    pub jti: String,
}

impl AuthContext {
    /// Creates an authentication context from verified access-token claims
    fn from_claims(claims: &Claims) -> Result<Self, Error> {
        let user_id = claims
            .user_id()
            .map_err(|_| unauthorized("Invalid token"))?;
        Ok(Self {
            user_id,
            jti: claims.jti.clone(),
        })
    }
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let context = req.extensions().get::<AuthContext>().cloned();
        ready(context.ok_or_else(|| unauthorized("Authentication required")))
    }
}

/// Build a 401 error carrying the standard JSON error body
fn unauthorized(message: &'static str) -> Error {
    InternalError::from_response(
        message,
        HttpResponse::Unauthorized().json(ErrorResponse::new("unauthorized", message)),
    )
    .into()
}

/// JWT authentication middleware factory
pub struct JwtAuth {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtAuth {
    /// Creates the middleware from the shared JWT configuration.
    ///
    /// The validation rules mirror the ones the token service signs with:
    /// issuer, audience, expiry, and not-before are all enforced.
    pub fn from_config(config: &JwtConfig) -> Self {
        let algorithm = match config.algorithm.as_str() {
            "HS384" => jsonwebtoken::Algorithm::HS384,
            "HS512" => jsonwebtoken::Algorithm::HS512,
            _ => jsonwebtoken::Algorithm::HS256,
        };

        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            decoding_key: self.decoding_key.clone(),
            validation: self.validation.clone(),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let decoding_key = self.decoding_key.clone();
        let validation = self.validation.clone();

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => return Err(unauthorized("Missing or invalid Authorization header")),
            };

            let claims = match decode::<Claims>(&token, &decoding_key, &validation) {
                Ok(data) => data.claims,
                Err(e) => {
                    log::debug!("Access token rejected: {}", e);
                    return Err(unauthorized("Invalid or expired access token"));
                }
            };

            // Refresh tokens must never authenticate a protected request
            if claims.token_type != TokenType::Access {
                return Err(unauthorized("Invalid or expired access token"));
            }

            let context = AuthContext::from_claims(&claims)?;
            req.extensions_mut().insert(context);

            service.call(req).await
        })
    }
}

/// Pull the token out of a `Authorization: Bearer <token>` header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

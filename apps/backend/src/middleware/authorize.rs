use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::TokenClaims;
use crate::error::AppError;
use crate::logging::security;

/// Role gate. Must be wrapped inside [`super::Authenticate`], i.e. registered
/// before it on the route:
///
/// get_or_head()
///     .to(admin)
///     .wrap(Authorize::roles(["admin"]))
///     .wrap(Authenticate)
#[derive(Clone)]
pub struct Authorize {
    allowed: Rc<[String]>,
}

impl Authorize {
    pub fn roles<I, R>(roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self {
            allowed: roles.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Authorize
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthorizeMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthorizeMiddleware {
            service: Rc::new(service),
            allowed: Rc::clone(&self.allowed),
        }))
    }
}

pub struct AuthorizeMiddleware<S> {
    service: Rc<S>,
    allowed: Rc<[String]>,
}

impl<S, B> Service<ServiceRequest> for AuthorizeMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let allowed = Rc::clone(&self.allowed);

        Box::pin(async move {
            let checked = check_role(req.extensions().get::<TokenClaims>(), &allowed);
            if let Err(err) = checked {
                return Ok(req.error_response(err).map_into_right_body());
            }
            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

fn check_role(claims: Option<&TokenClaims>, allowed: &[String]) -> Result<(), AppError> {
    let claims = claims.ok_or_else(AppError::authentication_required)?;

    if claims.has_role_in(allowed) {
        Ok(())
    } else {
        security::access_denied(&claims.user_id, claims.role.as_deref(), allowed);
        Err(AppError::forbidden_insufficient_role())
    }
}

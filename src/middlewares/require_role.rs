/*!
 * 角色守卫
 *
 * 读取 RequireJWT 写入的 `SessionUser`，角色不在允许列表中时返回 403。
 * 没有会话说明外层漏挂了 RequireJWT，按 401 处理。
 *
 * ```rust,ignore
 * web::scope("/api/v1/teacher")
 *     .wrap(RequireRole::teacher())
 *     .wrap(RequireJWT) // 最后挂载的最先执行
 *     .route("/dashboard", web::get().to(get_dashboard))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{info, warn};

use crate::models::{ErrorCode, auth::entities::SessionUser, users::entities::UserRole};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    allowed: &'static [UserRole],
}

impl RequireRole {
    /// 允许列表中的任一角色通过
    pub const fn any_of(allowed: &'static [UserRole]) -> Self {
        Self { allowed }
    }

    pub const fn teacher() -> Self {
        Self::any_of(&[UserRole::Teacher])
    }

    pub const fn student() -> Self {
        Self::any_of(&[UserRole::Student])
    }

    fn permits(&self, role: UserRole) -> bool {
        self.allowed.contains(&role)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            guard: self.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    guard: RequireRole,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let guard = self.guard.clone();

        Box::pin(async move {
            let session = req.extensions().get::<SessionUser>().copied();

            let Some(session) = session else {
                warn!("Role check reached without a session; is RequireJWT mounted?");
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Authentication required",
                    )
                    .map_into_right_body(),
                ));
            };

            if guard.permits(session.role) {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            info!(
                "User {} ({}) denied access to {}; allowed roles: {:?}",
                session.id,
                session.role,
                req.path(),
                guard.allowed
            );
            Ok(req.into_response(
                create_error_response(StatusCode::FORBIDDEN, ErrorCode::Forbidden, "Access denied")
                    .map_into_right_body(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permits_only_listed_roles() {
        assert!(RequireRole::teacher().permits(UserRole::Teacher));
        assert!(!RequireRole::teacher().permits(UserRole::Student));
        assert!(RequireRole::student().permits(UserRole::Student));

        let both = RequireRole::any_of(&[UserRole::Student, UserRole::Teacher]);
        assert!(both.permits(UserRole::Teacher));
        assert!(both.permits(UserRole::Student));
    }
}

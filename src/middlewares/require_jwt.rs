/*!
 * 会话校验中间件
 *
 * 验证会话令牌（HS256 JWT）的签名与过期时间，只有通过的请求才能进入受保护路由。
 * 纯校验，不查库也不走缓存。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::RequireJWT;
 *
 * App::new().service(
 *     web::scope("/api/v1/tasks")
 *         .wrap(RequireJWT)
 *         .route("", web::get().to(list_tasks)),
 * );
 * ```
 *
 * 处理程序中通过 `RequireJWT::extract_session(&req)` 取得 `SessionUser`。
 *
 * ## 认证流程
 *
 * 1. 先读取名为 `jwt.cookie_name`（默认 `auth_token`）的 Cookie
 * 2. 没有 Cookie 时回退到 `Authorization: Bearer <TOKEN>`
 * 3. 令牌有效则把 `SessionUser { id, role }` 放入请求扩展
 * 4. 缺失、签名错误或已过期一律返回 401
 */

use crate::models::ErrorCode;
use crate::models::auth::entities::SessionUser;
use crate::models::users::entities::UserRole;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, info};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireJWT;

/// 校验令牌并得到会话用户
pub fn verify_session(token: &str) -> Result<SessionUser, String> {
    let claims = JwtUtils::verify_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid or expired session".to_string()
    })?;

    let id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| "Invalid user ID in session".to_string())?;
    let role = claims
        .role
        .parse::<UserRole>()
        .map_err(|_| "Invalid role in session".to_string())?;

    Ok(SessionUser { id, role })
}

// 辅助函数：提取并验证会话
fn extract_and_validate_session(req: &ServiceRequest) -> Result<SessionUser, String> {
    let token =
        JwtUtils::extract_token(req.request()).ok_or_else(|| "Missing session token".to_string())?;
    verify_session(&token)
}
impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
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
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            // 验证会话
            match extract_and_validate_session(&req) {
                Ok(session) => {
                    debug!("Session authentication successful for ID: {}", session.id);
                    req.extensions_mut().insert(session);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 取出当前会话，只在挂了 RequireJWT 的路由里有值
    pub fn extract_session(req: &actix_web::HttpRequest) -> Option<SessionUser> {
        req.extensions().get::<SessionUser>().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_session_ok() {
        let token = JwtUtils::generate_session_token(7, "STUDENT").unwrap();
        let session = verify_session(&token).unwrap();
        assert_eq!(session.id, 7);
        assert_eq!(session.role, UserRole::Student);
    }

    #[test]
    fn test_verify_session_rejects_bad_role() {
        let token = JwtUtils::generate_session_token(7, "ADMIN").unwrap();
        assert!(verify_session(&token).is_err());
    }

    #[test]
    fn test_verify_session_rejects_garbage() {
        assert!(verify_session("not.a.jwt").is_err());
    }
}

//! 認可ミドルウェア
//!
//! `from_fn_with_state` でルーター全体に適用する。

use super::{AccessKeys, Privilege};
use std::borrow::Cow;
use crate::common::error::ApiError;
use axum::{
    extract::{Request, State},
    http::{header, Method},
    middleware::Next,
    response::Response,
};

/// `Authorization` ヘッダーの値（UTF-8でない値も未一致のキーとして扱う）
fn authorization_header(request: &Request) -> Option<Cow<'_, str>> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .map(|h| String::from_utf8_lossy(h.as_bytes()))
}

/// HTTPメソッドから要求権限を決める（参照系は読み取り、それ以外は管理者）
pub fn required_privilege(method: &Method) -> Privilege {
    if *method == Method::GET || *method == Method::HEAD {
        Privilege::Read
    } else {
        Privilege::Admin
    }
}

/// `Authorization` ヘッダーのキーを検証するミドルウェア
///
/// `route_layer` で適用し、未マッチのルートには作用させない。
pub async fn require_access(
    State(keys): State<AccessKeys>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let required = required_privilege(request.method());
    let privilege = {
        let presented = authorization_header(&request);
        keys.authorize(presented.as_deref(), required)?
    };
    tracing::trace!(?privilege, path = %request.uri().path(), "Request authorized");
    Ok(next.run(request).await)
}

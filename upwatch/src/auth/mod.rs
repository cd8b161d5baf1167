//! アクセス制御
//!
//! `Authorization` ヘッダーの値をそのままキーとして扱う2段階の権限モデル。
//! 管理者キーは全ルート、読み取りキーは読み取りルートのみ許可する。

/// 認可ミドルウェア
pub mod middleware;

use crate::common::error::ApiError;
use sha2::{Digest, Sha256};

/// ルートが要求する権限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
    /// 一覧・ステータス参照
    Read,
    /// 作成・更新・削除
    Admin,
}

/// 設定済みアクセスキー（SHA-256ダイジェストのみ保持）
#[derive(Clone)]
pub struct AccessKeys {
    read: [u8; 32],
    admin: [u8; 32],
}

impl std::fmt::Debug for AccessKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessKeys").finish_non_exhaustive()
    }
}

impl AccessKeys {
    /// 平文キーからダイジェストを作成
    pub fn new(read_key: &str, admin_key: &str) -> Self {
        Self {
            read: digest(read_key.trim()),
            admin: digest(admin_key.trim()),
        }
    }

    /// 提示されたキーに与えられる権限（該当なしは `None`）
    pub fn privilege_of(&self, presented: &str) -> Option<Privilege> {
        let presented = digest(presented.trim());
        if presented == self.admin {
            Some(Privilege::Admin)
        } else if presented == self.read {
            Some(Privilege::Read)
        } else {
            None
        }
    }

    /// `Authorization` ヘッダーの値を検証する
    ///
    /// - ヘッダーなし・空 → `Authentication`（401）
    /// - 権限不足・不一致 → `Authorization`（403）
    pub fn authorize(&self, header: Option<&str>, required: Privilege) -> Result<Privilege, ApiError> {
        let presented = header.map(str::trim).unwrap_or_default();
        if presented.is_empty() {
            return Err(ApiError::Authentication(
                "missing Authorization header".to_string(),
            ));
        }

        match (self.privilege_of(presented), required) {
            (Some(Privilege::Admin), _) => Ok(Privilege::Admin),
            (Some(Privilege::Read), Privilege::Read) => Ok(Privilege::Read),
            (Some(Privilege::Read), Privilege::Admin) => Err(ApiError::Authorization(
                "read key used on admin route".to_string(),
            )),
            (None, _) => Err(ApiError::Authorization("unrecognized key".to_string())),
        }
    }
}

fn digest(key: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(key.as_bytes()));
    out
}

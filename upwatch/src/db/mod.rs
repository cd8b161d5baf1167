//! データベースアクセス層
//!
//! SQLiteベースのデータ永続化

/// データベースマイグレーション
pub mod migrations;

/// 監視対象の永続化
pub mod monitors;

/// Repository traitパターン（テスタビリティ向上）
pub mod traits;

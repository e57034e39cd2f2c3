// src/domain/user_model.rs

use super::user_role::UserRole;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub email: String,

    pub name: String,

    pub role: String,

    pub profile_image_url: String,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
            is_active: Set(true),                        // デフォルトでアクティブ
            role: Set(UserRole::Pending.to_string()),    // 承認待ちで作成
            profile_image_url: Set("/user.png".to_string()),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            // 更新の場合のみ updated_at を更新
            self.updated_at = Set(Utc::now());
        }
        Ok(self)
    }
}

impl Model {
    /// ロール文字列を列挙型に変換（不明な値は承認待ち扱い）
    pub fn user_role(&self) -> UserRole {
        self.role.parse().unwrap_or_default()
    }

    pub fn to_summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role.clone(),
            profile_image_url: self.profile_image_url.clone(),
        }
    }

    pub fn to_claims(&self) -> UserClaims {
        UserClaims {
            user_id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.user_role(),
            is_active: self.is_active,
        }
    }
}

/// ユーザーディレクトリから取得する一覧用の表現
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub profile_image_url: String,
}

impl From<Model> for UserSummary {
    fn from(user: Model) -> Self {
        user.to_summary()
    }
}

/// JWT のクレーム用のユーザー情報
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub is_active: bool,
}

impl UserClaims {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn is_verified(&self) -> bool {
        self.role.is_verified()
    }
}

// src/repository/user_repository.rs

use crate::domain::user_model::{self, Entity as UserEntity, UserSummary};
use crate::domain::user_role::UserRole;
use crate::error::AppResult;
use async_trait::async_trait;
use sea_orm::entity::*;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    Condition, DbConn, DbErr, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

/// 一覧取得の絞り込み条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// メールアドレスまたは名前の部分一致（大文字小文字を区別しない）
    pub query: Option<String>,
    pub role: Option<UserRole>,
}

/// 一覧取得の結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPage {
    pub users: Vec<UserSummary>,
    pub total: u64,
}

/// ローカルのユーザーディレクトリ
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// 条件に合うユーザーを作成日時順で取得
    async fn list_users(&self, filter: &UserFilter, skip: u64, limit: u64) -> AppResult<UserPage>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<user_model::Model>>;
}

#[derive(Debug)]
pub struct UserRepository {
    db: DbConn,
}

impl UserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// ユーザーをメールアドレスで検索
    pub async fn find_by_email(&self, email: &str) -> Result<Option<user_model::Model>, DbErr> {
        UserEntity::find()
            .filter(user_model::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    fn build_condition(filter: &UserFilter) -> Condition {
        let mut condition = Condition::all();

        if let Some(q) = filter.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let search_term = format!("%{}%", q);
            condition = condition.add(
                Condition::any()
                    .add(
                        Expr::col((UserEntity, user_model::Column::Email)).ilike(&search_term),
                    )
                    .add(Expr::col((UserEntity, user_model::Column::Name)).ilike(&search_term)),
            );
        }

        if let Some(role) = filter.role {
            condition = condition.add(user_model::Column::Role.eq(role.as_str()));
        }

        condition
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn list_users(&self, filter: &UserFilter, skip: u64, limit: u64) -> AppResult<UserPage> {
        let condition = Self::build_condition(filter);

        let total = UserEntity::find()
            .filter(condition.clone())
            .count(&self.db)
            .await?;

        let users = UserEntity::find()
            .filter(condition)
            .order_by(user_model::Column::CreatedAt, Order::Asc)
            .order_by(user_model::Column::Id, Order::Asc)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(UserPage {
            users: users.into_iter().map(UserSummary::from).collect(),
            total,
        })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<user_model::Model>> {
        Ok(UserEntity::find_by_id(id).one(&self.db).await?)
    }
}

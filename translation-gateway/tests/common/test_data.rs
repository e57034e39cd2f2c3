// tests/common/test_data.rs

use chrono::{Duration, Utc};
use translation_gateway::domain::user_model;
use uuid::Uuid;

/// テスト用ユーザーを作成（作成日時は呼び出し順に並ぶよう秒単位でずらす）
pub fn user(email: &str, role: &str, order: i64) -> user_model::Model {
    let created_at = Utc::now() - Duration::days(1) + Duration::seconds(order);
    user_model::Model {
        id: Uuid::new_v4(),
        email: email.to_string(),
        name: email.split('@').next().unwrap_or_default().to_string(),
        role: role.to_string(),
        profile_image_url: "/user.png".to_string(),
        is_active: true,
        created_at,
        updated_at: created_at,
    }
}

pub fn admin() -> user_model::Model {
    user("admin@example.com", "admin", 0)
}

pub fn member() -> user_model::Model {
    user("member@example.com", "user", 1)
}

pub fn pending() -> user_model::Model {
    user("pending@example.com", "pending", 2)
}

pub fn inactive() -> user_model::Model {
    let mut user = user("inactive@example.com", "user", 3);
    user.is_active = false;
    user
}

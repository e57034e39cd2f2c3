// src/bin/issue_token.rs
//
// 既存ユーザーのアクセストークンを発行する運用ツール
//
//   cargo run --bin issue-token -- admin@example.com

use std::env;
use std::io::{self, Write};
use translation_gateway::config::AppConfig;
use translation_gateway::db::create_db_pool;
use translation_gateway::repository::user_repository::UserRepository;
use translation_gateway::utils::jwt::JwtManager;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let email = match env::args().nth(1) {
        Some(email) => email,
        None => {
            // インタラクティブにメールアドレスを入力
            print!("Enter user email: ");
            io::stdout().flush()?;

            let mut email = String::new();
            io::stdin().read_line(&mut email)?;
            email
        }
    };
    let email = email.trim();

    if email.is_empty() {
        eprintln!("Error: Email cannot be empty");
        std::process::exit(1);
    }

    let config = AppConfig::from_env()?;
    let db = create_db_pool(&config).await?;
    let repository = UserRepository::new(db);

    let Some(user) = repository.find_by_email(email).await? else {
        eprintln!("Error: No user found for {}", email);
        std::process::exit(1);
    };

    if !user.is_active {
        eprintln!("Warning: {} is inactive; the token will be rejected", email);
    }

    let jwt_manager = JwtManager::new(config.jwt.clone())?;
    let token = jwt_manager.generate_access_token(user.to_claims())?;
    let claims = jwt_manager.verify_access_token(&token)?;

    println!("\n=== Access Token Issued ===");
    println!("User: {} ({})", user.email, user.role);
    println!(
        "Expires at: {} ({} minutes)",
        jwt_manager.get_access_token_expires_at(&claims),
        jwt_manager.access_token_expiry_minutes()
    );
    println!("\nAuthorization: Bearer {}", token);

    Ok(())
}

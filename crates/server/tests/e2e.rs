use std::net::SocketAddr;
use std::path::PathBuf;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

use configs::AppConfig;

struct TestApp {
    base_url: String,
    data_dir: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.data_dir);
    }
}

fn test_config(data_dir: &PathBuf) -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.storage.data_dir = data_dir.to_string_lossy().to_string();
    cfg.auth.jwt_secret = "test-secret".into();
    cfg
}

async fn start_server_in(data_dir: PathBuf) -> anyhow::Result<TestApp> {
    let cfg = test_config(&data_dir);
    let store = server::startup::open_store(&cfg).await?;
    let app = server::startup::build_app(store, &cfg);

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, data_dir })
}

async fn start_server() -> anyhow::Result<TestApp> {
    // isolated data dir per test run
    let data_dir = std::env::temp_dir().join(format!("insightblog-e2e-{}", Uuid::new_v4()));
    start_server_in(data_dir).await
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("reqwest client")
}

async fn login_admin(c: &reqwest::Client, app: &TestApp) -> anyhow::Result<()> {
    let res = c.post(format!("{}/auth/login", app.base_url))
        .json(&json!({"email": "admin@example.com", "password": "admin123"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(())
}

async fn category_id(c: &reqwest::Client, app: &TestApp, slug: &str) -> anyhow::Result<String> {
    let categories = c.get(format!("{}/api/categories", app.base_url)).send().await?.json::<Vec<Value>>().await?;
    let id = categories
        .iter()
        .find(|cat| cat["slug"] == slug)
        .and_then(|cat| cat["id"].as_str())
        .unwrap_or_default();
    Ok(id.to_string())
}

#[tokio::test]
async fn e2e_public_health_and_openapi() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");

    let doc = client().get(format!("{}/api-docs/openapi.json", app.base_url)).send().await?.json::<Value>().await?;
    assert!(doc["paths"].get("/admin/posts").is_some());
    Ok(())
}

#[tokio::test]
async fn e2e_fresh_store_is_seeded() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let categories = c.get(format!("{}/api/categories", app.base_url)).send().await?.json::<Vec<Value>>().await?;
    let names: Vec<&str> = categories.iter().filter_map(|cat| cat["name"].as_str()).collect();
    assert_eq!(names, vec!["Technology", "Lifestyle", "Education"]);

    login_admin(&c, &app).await?;
    let users = c.get(format!("{}/admin/users", app.base_url)).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "admin@example.com");
    assert!(users[0].get("password").is_none());

    for key in ["blog_users", "blog_categories", "blog_posts", "blog_comments"] {
        assert!(app.data_dir.join(format!("{key}.json")).exists(), "{key} written at seed");
    }
    Ok(())
}

#[tokio::test]
async fn e2e_cookie_session_and_logout() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.post(format!("{}/auth/register", app.base_url))
        .json(&json!({"name": "Tester", "email": "tester@example.com", "password": "S3curePass!"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res.headers().get("set-cookie").is_some());

    // cookie jar carries auth_token
    let me = c.get(format!("{}/auth/me", app.base_url)).send().await?;
    assert_eq!(me.status(), HttpStatusCode::OK);
    assert_eq!(me.json::<Value>().await?["email"], "tester@example.com");
    assert!(app.data_dir.join("blog_auth_user.json").exists());

    let res = c.post(format!("{}/auth/logout", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    assert!(!app.data_dir.join("blog_auth_user.json").exists());
    let me = c.get(format!("{}/auth/me", app.base_url)).send().await?;
    assert_eq!(me.status(), HttpStatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn e2e_protected_with_expired_token_unauthorized() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    use jsonwebtoken::{encode, EncodingKey, Header};
    #[derive(serde::Serialize)]
    struct Claims { sub: String, uid: Uuid, adm: bool, exp: usize, iat: usize }
    let now = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH)?.as_secs() as usize;
    let claims = Claims { sub: "admin@example.com".into(), uid: Uuid::new_v4(), adm: true, exp: now.saturating_sub(600), iat: now.saturating_sub(1200) };
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret("test-secret".as_bytes()))?;

    let res = c.get(format!("{}/admin/stats", app.base_url))
        .header("Authorization", format!("Bearer {}", token))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn e2e_admin_content_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    login_admin(&c, &app).await?;
    let tech = category_id(&c, &app, "technology").await?;

    let res = c.post(format!("{}/admin/posts", app.base_url))
        .json(&json!({"title": "Draft idea", "content": "wip", "excerpt": "wip", "categoryId": tech}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let draft = res.json::<Value>().await?;
    assert_eq!(draft["isPublished"], false);

    let res = c.post(format!("{}/admin/posts", app.base_url))
        .json(&json!({"title": "Draft idea", "content": "again", "excerpt": "again", "categoryId": tech}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);
    assert_eq!(res.json::<Value>().await?["error"], "conflict");

    let public = c.get(format!("{}/api/posts", app.base_url)).send().await?.json::<Value>().await?;
    assert_eq!(public["total"], 0);

    let id = draft["id"].as_str().unwrap_or_default();
    let res = c.put(format!("{}/admin/posts/{id}", app.base_url))
        .json(&json!({"title": "Final idea", "slug": "final-idea", "content": "done", "excerpt": "done", "categoryId": tech, "isPublished": true, "tags": [" rust ", ""]}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let published = res.json::<Value>().await?;
    assert!(published["publishedAt"].is_string());
    assert_eq!(published["tags"], json!(["rust"]));
    assert_eq!(published["createdAt"], draft["createdAt"]);

    let page = c.get(format!("{}/api/posts?page=1&per_page=10", app.base_url)).send().await?.json::<Value>().await?;
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["slug"], "final-idea");

    let in_cat = c.get(format!("{}/api/categories/technology/posts", app.base_url)).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(in_cat.len(), 1);

    let drafts = c.get(format!("{}/admin/posts?status=draft", app.base_url)).send().await?.json::<Vec<Value>>().await?;
    assert!(drafts.is_empty());
    let found = c.get(format!("{}/admin/posts?query=FINAL", app.base_url)).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(found.len(), 1);

    let res = c.delete(format!("{}/admin/categories/{tech}", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);

    let res = c.delete(format!("{}/admin/posts/{id}", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let res = c.delete(format!("{}/admin/posts/{id}", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = c.get(format!("{}/api/posts/{id}", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_category_management() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    login_admin(&c, &app).await?;

    let res = c.post(format!("{}/admin/categories", app.base_url))
        .json(&json!({"name": "Open Source", "description": "Community projects"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<Value>().await?;
    assert_eq!(created["slug"], "open-source");
    let id = created["id"].as_str().unwrap_or_default();

    let res = c.put(format!("{}/admin/categories/{id}", app.base_url))
        .json(&json!({"name": "Open Source", "slug": "oss"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["slug"], "oss");

    let res = c.put(format!("{}/admin/categories/{}", app.base_url, Uuid::new_v4()))
        .json(&json!({"name": "Ghost"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.delete(format!("{}/admin/categories/{id}", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let res = c.get(format!("{}/api/categories/oss/posts", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_moderation_queue() -> anyhow::Result<()> {
    let app = start_server().await?;
    let admin = client();
    login_admin(&admin, &app).await?;
    let tech = category_id(&admin, &app, "technology").await?;
    let post = admin.post(format!("{}/admin/posts", app.base_url))
        .json(&json!({"title": "Ownership", "content": "borrowing", "excerpt": "rules", "categoryId": tech, "isPublished": true}))
        .send().await?.json::<Value>().await?;
    let post_id = post["id"].as_str().unwrap_or_default().to_string();

    let reader = client();
    reader.post(format!("{}/auth/register", app.base_url))
        .json(&json!({"name": "Jane Reader", "email": "jane@example.com", "password": "janepass"}))
        .send().await?;
    let res = reader.post(format!("{}/api/posts/{post_id}/comments", app.base_url))
        .json(&json!({"content": "Great explanation"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let comment_id = res.json::<Value>().await?["id"].as_str().unwrap_or_default().to_string();

    let res = reader.get(format!("{}/admin/comments", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::FORBIDDEN);

    let pending = admin.get(format!("{}/admin/comments?status=pending&query=jane", app.base_url))
        .send().await?.json::<Vec<Value>>().await?;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["authorName"], "Jane Reader");
    assert_eq!(pending[0]["postTitle"], "Ownership");

    let stats = admin.get(format!("{}/admin/stats", app.base_url)).send().await?.json::<Value>().await?;
    assert_eq!(stats["pendingComments"], 1);

    for _ in 0..2 {
        let res = admin.post(format!("{}/admin/comments/{comment_id}/approve", app.base_url)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::OK);
    }
    let visible = reader.get(format!("{}/api/posts/{post_id}/comments", app.base_url)).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(visible.len(), 1);

    let res = admin.delete(format!("{}/admin/comments/{comment_id}", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let res = admin.post(format!("{}/admin/comments/{comment_id}/approve", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_data_survives_restart() -> anyhow::Result<()> {
    let data_dir = std::env::temp_dir().join(format!("insightblog-e2e-{}", Uuid::new_v4()));
    let cfg = test_config(&data_dir);

    let first = server::startup::open_store(&cfg).await?;
    let tech = first.category_by_slug("technology").await?.map(|c| c.id).unwrap_or_default();
    let admin = first.user_by_email("admin@example.com").await?.map(|u| u.id).unwrap_or_default();
    let post = first.save_post(models::NewPost {
        title: "Persisted".into(),
        slug: None,
        content: "still here".into(),
        excerpt: "still".into(),
        cover_image: None,
        category_id: tech,
        author_id: admin,
        is_published: true,
        read_time: Some(3),
        tags: vec![],
    }).await?;
    drop(first);

    let app = start_server_in(data_dir).await?;
    let res = client().get(format!("{}/api/posts/slug/persisted", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["id"], post.id.to_string());
    assert_eq!(body["readTime"], 3);

    let categories = client().get(format!("{}/api/categories", app.base_url)).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(categories.len(), 3, "reseeding never duplicates");
    Ok(())
}

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::{Category, Comment, Post, User, UserProfile};

#[test]
fn user_round_trips_with_camel_case_keys() {
    let user = User {
        id: Uuid::new_v4(),
        name: "Admin User".into(),
        email: "admin@example.com".into(),
        password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
        is_admin: true,
        avatar: None,
        created_at: Utc::now(),
    };
    let v = serde_json::to_value(&user).unwrap();
    assert_eq!(v["isAdmin"], json!(true));
    assert!(v.get("createdAt").is_some());
    assert!(v.get("avatar").is_none(), "absent optionals are omitted");

    let back: User = serde_json::from_value(v).unwrap();
    assert_eq!(back, user);
}

#[test]
fn profile_never_carries_password() {
    let user = User {
        id: Uuid::new_v4(),
        name: "N".into(),
        email: "n@example.com".into(),
        password: "hash".into(),
        is_admin: false,
        avatar: Some("https://img.example.com/n.png".into()),
        created_at: Utc::now(),
    };
    let v = serde_json::to_value(UserProfile::from(&user)).unwrap();
    assert!(v.get("password").is_none());
    assert_eq!(v["avatar"], json!("https://img.example.com/n.png"));
}

#[test]
fn post_accepts_minimal_blob() {
    let id = Uuid::new_v4();
    let blob = json!({
        "id": id,
        "title": "T",
        "slug": "t",
        "content": "C",
        "excerpt": "E",
        "categoryId": Uuid::new_v4(),
        "authorId": Uuid::new_v4(),
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z",
        "isPublished": false
    });
    let post: Post = serde_json::from_value(blob).unwrap();
    assert_eq!(post.id, id);
    assert!(post.tags.is_empty());
    assert!(post.read_time.is_none());
    assert!(post.published_at.is_none());
}

#[test]
fn category_and_comment_field_names() {
    let cat = Category { id: Uuid::new_v4(), name: "Technology".into(), slug: "technology".into(), description: None };
    let v = serde_json::to_value(&cat).unwrap();
    assert_eq!(v.as_object().unwrap().len(), 3);

    let comment = Comment {
        id: Uuid::new_v4(),
        post_id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        content: "hi".into(),
        created_at: Utc::now(),
        is_approved: false,
    };
    let v = serde_json::to_value(&comment).unwrap();
    assert!(v.get("postId").is_some());
    assert!(v.get("userId").is_some());
    assert_eq!(v["isApproved"], json!(false));
}

use codehub::commits::CommitCreate;
use codehub::error::Error;
use codehub::issues::{IssueCreate, IssueStatus, IssueUpdate};
use codehub::page::Page;
use codehub::repositories::{RepositoryCreate, RepositoryUpdate};
use codehub::search::SearchKind;
use codehub::users::{UserCreate, UserUpdate};
use codehub::Codehub;
use reqwest::StatusCode;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CREATED_AT: &str = "2024-01-05T10:20:30";

fn repository(id: u64, name: &str, stars: u64) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "A demo repository",
        "owner_id": 1,
        "owner": {"id": 1, "username": "alice", "avatar_url": null},
        "is_public": true,
        "created_at": CREATED_AT,
        "updated_at": CREATED_AT,
        "stars_count": stars
    })
}

fn issue(id: u64, status: &str) -> Value {
    json!({
        "id": id,
        "repository_id": 7,
        "creator_id": 1,
        "creator": {"id": 1, "username": "alice"},
        "title": "Bug",
        "description": null,
        "status": status,
        "created_at": CREATED_AT,
        "updated_at": CREATED_AT
    })
}

fn commit(id: u64, hash: &str) -> Value {
    json!({
        "id": id,
        "repository_id": 7,
        "author_id": 1,
        "author": {"id": 1, "username": "alice"},
        "message": "Initial commit",
        "hash": hash,
        "created_at": CREATED_AT
    })
}

fn user(id: u64, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{}@example.com", username),
        "bio": null,
        "avatar_url": null,
        "created_at": CREATED_AT
    })
}

#[tokio::test]
async fn test_get_repository() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repository(7, "demo", 3)))
        .mount(&mock_server)
        .await;

    let codehub = Codehub::new(&mock_server.uri()).unwrap();
    let repo = codehub.repositories().get(7).await.unwrap();

    assert_eq!(repo.id, 7);
    assert_eq!(repo.name, "demo");
    assert_eq!(repo.stars_count, 3);
    assert_eq!(repo.full_name(), "alice/demo");
}

#[tokio::test]
async fn test_list_repositories_sends_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos"))
        .and(query_param("skip", "20"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "repositories": [repository(21, "one", 0), repository(22, "two", 5)],
            "total": 22
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let codehub = Codehub::new(&mock_server.uri()).unwrap();
    let list = codehub
        .repositories()
        .list(Page::first(20).next())
        .await
        .unwrap();

    assert_eq!(list.total, 22);
    let names: Vec<&str> = list.repositories.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["one", "two"]);
}

#[tokio::test]
async fn test_missing_repository_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/99"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"detail": "Repository with id 99 not found"})),
        )
        .mount(&mock_server)
        .await;

    let codehub = Codehub::new(&mock_server.uri()).unwrap();
    let result = codehub.repositories().get(99).await;

    match result.err().unwrap() {
        Error::NotFound { message } => assert_eq!(message, "Repository with id 99 not found"),
        e => panic!("Expected NotFound, got {:?}", e),
    }
}

#[tokio::test]
async fn test_server_error_is_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let codehub = Codehub::new(&mock_server.uri()).unwrap();
    let result = codehub.users().get(1).await;

    match result.err().unwrap() {
        Error::Status { status, message } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(message, "Internal Server Error");
        }
        e => panic!("Expected Status, got {:?}", e),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/7/commits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&mock_server)
        .await;

    let codehub = Codehub::new(&mock_server.uri()).unwrap();
    let result = codehub.commits().list(7, Page::default()).await;

    match result.err().unwrap() {
        Error::Decode(msg) => assert!(msg.contains("/repos/7/commits")),
        e => panic!("Expected Decode, got {:?}", e),
    }
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Nothing listens on the discard port.
    let codehub = Codehub::new("http://127.0.0.1:9").unwrap();
    let result = codehub.repositories().get(1).await;
    assert!(matches!(result, Err(Error::Transport(_))));
}

#[tokio::test]
async fn test_create_validation_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let codehub = Codehub::new(&mock_server.uri()).unwrap();

    let result = codehub
        .repositories()
        .create(&RepositoryCreate::new("  ", 1))
        .await;
    assert!(matches!(result, Err(Error::Validation(_))));

    let result = codehub.users().create(&UserCreate::new("bob", "")).await;
    match result.err().unwrap() {
        Error::Validation(msg) => assert_eq!(msg, "Email is required"),
        e => panic!("Expected Validation, got {:?}", e),
    }

    let result = codehub.issues().create(7, &IssueCreate::new(1, "")).await;
    assert!(matches!(result, Err(Error::Validation(_))));

    let result = codehub.commits().create(7, &CommitCreate::new(1, "")).await;
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
async fn test_update_sends_only_supplied_fields() {
    let mock_server = MockServer::start().await;

    let mut updated = repository(7, "demo", 3);
    updated["description"] = json!("Now with docs");

    Mock::given(method("PUT"))
        .and(path("/repos/7"))
        .and(body_json(json!({"description": "Now with docs"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(updated))
        .expect(1)
        .mount(&mock_server)
        .await;

    let codehub = Codehub::new(&mock_server.uri()).unwrap();
    let update = RepositoryUpdate {
        description: Some("Now with docs".to_string()),
        ..Default::default()
    };
    assert!(!update.is_empty());
    assert!(RepositoryUpdate::default().is_empty());
    let repo = codehub.repositories().update(7, &update).await.unwrap();

    assert_eq!(repo.description.as_deref(), Some("Now with docs"));
    assert_eq!(repo.name, "demo");
    assert!(repo.is_public);
}

#[tokio::test]
async fn test_issue_list_filters_by_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/7/issues"))
        .and(query_param("status", "closed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "issues": [issue(3, "closed")],
            "total": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let codehub = Codehub::new(&mock_server.uri()).unwrap();
    let list = codehub
        .issues()
        .list(7, Some(IssueStatus::Closed), Page::default())
        .await
        .unwrap();

    assert_eq!(list.total, 1);
    assert_eq!(list.issues[0].status, IssueStatus::Closed);
}

#[tokio::test]
async fn test_issue_status_update_and_delete() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/repos/7/issues/3"))
        .and(body_json(json!({"status": "closed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(issue(3, "closed")))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/repos/7/issues/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let codehub = Codehub::new(&mock_server.uri()).unwrap();
    let issues = codehub.issues();

    let closed = issues
        .update(7, 3, &IssueUpdate::status(IssueStatus::Closed))
        .await
        .unwrap();
    assert_eq!(closed.status, IssueStatus::Closed);

    issues.delete(7, 3).await.unwrap();
}

#[tokio::test]
async fn test_user_lookup_by_username() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/username/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user(1, "alice")))
        .mount(&mock_server)
        .await;

    let codehub = Codehub::new(&mock_server.uri()).unwrap();
    let alice = codehub.users().get_by_username("alice").await.unwrap();

    assert_eq!(alice.id, 1);
    assert_eq!(alice.email, "alice@example.com");
    assert!(alice.bio.is_none());
}

#[tokio::test]
async fn test_user_list_create_update_delete() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("skip", "0"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [user(1, "alice"), user(2, "bob")],
            "total": 2
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut created = user(3, "carol");
    created["avatar_url"] = json!("https://example.com/carol.png");
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_json(json!({
            "username": "carol",
            "email": "carol@example.com",
            "avatar_url": "https://example.com/carol.png"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(created))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut updated = user(3, "carol");
    updated["bio"] = json!("Writes parsers");
    Mock::given(method("PUT"))
        .and(path("/users/3"))
        .and(body_json(json!({"bio": "Writes parsers"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(updated))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/users/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let codehub = Codehub::new(&mock_server.uri()).unwrap();
    let users = codehub.users();

    let list = users.list(Page::default()).await.unwrap();
    assert_eq!(list.total, 2);
    assert_eq!(list.users[1].username, "bob");

    let data = UserCreate::new("carol", "carol@example.com")
        .with_avatar_url("https://example.com/carol.png");
    let carol = users.create(&data).await.unwrap();
    assert_eq!(carol.id, 3);
    assert_eq!(carol.avatar_url.as_deref(), Some("https://example.com/carol.png"));

    let update = UserUpdate {
        bio: Some("Writes parsers".to_string()),
        ..Default::default()
    };
    let carol = users.update(3, &update).await.unwrap();
    assert_eq!(carol.bio.as_deref(), Some("Writes parsers"));

    users.delete(3).await.unwrap();
}

#[tokio::test]
async fn test_commit_get_and_create() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/7/commits/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(commit(2, "abc123")))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Without a hash the backend assigns one, so the key must not be sent.
    Mock::given(method("POST"))
        .and(path("/repos/7/commits"))
        .and(body_json(json!({"author_id": 1, "message": "Initial commit"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(commit(3, "f00dfeed")))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/repos/7/commits"))
        .and(body_json(json!({"author_id": 1, "message": "Initial commit", "hash": "c0ffee"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(commit(4, "c0ffee")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let codehub = Codehub::new(&mock_server.uri()).unwrap();
    let commits = codehub.commits();

    let fetched = commits.get(7, 2).await.unwrap();
    assert_eq!(fetched.hash, "abc123");
    assert_eq!(fetched.author.unwrap().username, "alice");

    let assigned = commits
        .create(7, &CommitCreate::new(1, "Initial commit"))
        .await
        .unwrap();
    assert_eq!(assigned.id, 3);
    assert_eq!(assigned.hash, "f00dfeed");

    let supplied = commits
        .create(7, &CommitCreate::new(1, "Initial commit").with_hash("c0ffee"))
        .await
        .unwrap();
    assert_eq!(supplied.hash, "c0ffee");
}

#[tokio::test]
async fn test_missing_commit_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/7/commits/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Commit not found"})))
        .mount(&mock_server)
        .await;

    let codehub = Codehub::new(&mock_server.uri()).unwrap();

    match codehub.commits().get(7, 99).await.err().unwrap() {
        Error::NotFound { message } => assert_eq!(message, "Commit not found"),
        e => panic!("Expected NotFound, got {:?}", e),
    }
}

#[tokio::test]
async fn test_repositories_by_owner_and_delete() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/user/1"))
        .and(query_param("skip", "20"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "repositories": [repository(21, "late", 0)],
            "total": 21
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/repos/21"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let codehub = Codehub::new(&mock_server.uri()).unwrap();
    let repositories = codehub.repositories();

    let owned = repositories
        .list_by_owner(1, Page::first(20).next())
        .await
        .unwrap();
    assert_eq!(owned.total, 21);
    assert_eq!(owned.repositories[0].owner_id, 1);

    repositories.delete(21).await.unwrap();
}

#[tokio::test]
async fn test_issue_create_body_has_no_status() {
    let mock_server = MockServer::start().await;

    let mut created = issue(5, "open");
    created["description"] = json!("Steps to reproduce");
    Mock::given(method("POST"))
        .and(path("/repos/7/issues"))
        .and(body_json(json!({
            "creator_id": 1,
            "title": "Bug",
            "description": "Steps to reproduce"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(created))
        .expect(1)
        .mount(&mock_server)
        .await;

    let codehub = Codehub::new(&mock_server.uri()).unwrap();
    let data = IssueCreate::new(1, "Bug").with_description("Steps to reproduce");

    let body = serde_json::to_value(&data).unwrap();
    assert!(body.get("status").is_none());

    let created = codehub.issues().create(7, &data).await.unwrap();
    assert_eq!(created.status, IssueStatus::Open);
    assert_eq!(created.description.as_deref(), Some("Steps to reproduce"));
}

#[tokio::test]
async fn test_star_relation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/user/1/starred"))
        .and(query_param("skip", "0"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "repositories": [repository(7, "demo", 1)],
            "total": 1
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repository(7, "demo", 1)))
        .mount(&mock_server)
        .await;

    let codehub = Codehub::new(&mock_server.uri()).unwrap();

    let starred = codehub
        .repositories()
        .starred_by(1, Page::default())
        .await
        .unwrap();
    assert_eq!(starred.total, 1);
    assert_eq!(starred.repositories[0].id, 7);

    assert_eq!(codehub.stars().count(7).await.unwrap(), 1);
    assert!(codehub.stars().is_starred(1, 7).await.unwrap());
    assert!(!codehub.stars().is_starred(1, 8).await.unwrap());
}

#[tokio::test]
async fn test_is_starred_walks_every_page() {
    let mock_server = MockServer::start().await;

    let first: Vec<Value> = (1..=100).map(|id| repository(id, "filler", 0)).collect();
    Mock::given(method("GET"))
        .and(path("/repos/user/1/starred"))
        .and(query_param("skip", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "repositories": first,
            "total": 101
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/user/1/starred"))
        .and(query_param("skip", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "repositories": [repository(250, "late", 1)],
            "total": 101
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let codehub = Codehub::new(&mock_server.uri()).unwrap();
    assert!(codehub.stars().is_starred(1, 250).await.unwrap());
}

#[tokio::test]
async fn test_double_star_is_reported_not_fatal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/7/star"))
        .and(query_param("user_id", "1"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Repository already starred"})),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/repos/8/star"))
        .and(query_param("user_id", "1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Star not found"})))
        .mount(&mock_server)
        .await;

    let codehub = Codehub::new(&mock_server.uri()).unwrap();
    let stars = codehub.stars();

    match stars.star(1, 7).await.err().unwrap() {
        Error::Status { status, message } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(message, "Repository already starred");
        }
        e => panic!("Expected Status, got {:?}", e),
    }

    let err = stars.unstar(1, 8).await.err().unwrap();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_blank_search_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let codehub = Codehub::new(&mock_server.uri()).unwrap();
    let result = codehub
        .search()
        .search("   ", SearchKind::All, Page::default())
        .await;
    assert!(matches!(result, Err(Error::Validation(_))));
}

// Scenario: a created repository reads back with what was sent.
#[tokio::test]
async fn test_create_then_get_repository() {
    let mock_server = MockServer::start().await;

    let mut created = repository(12, "demo", 0);
    created["description"] = Value::Null;

    Mock::given(method("POST"))
        .and(path("/repos"))
        .and(body_json(json!({"name": "demo", "owner_id": 1, "is_public": true})))
        .respond_with(ResponseTemplate::new(201).set_body_json(created.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(created))
        .mount(&mock_server)
        .await;

    let codehub = Codehub::new(&mock_server.uri()).unwrap();
    let repositories = codehub.repositories();

    let repo = repositories
        .create(&RepositoryCreate::new("demo", 1).with_public(true))
        .await
        .unwrap();
    let fetched = repositories.get(repo.id).await.unwrap();

    assert_eq!(fetched.name, "demo");
    assert!(fetched.is_public);
    assert_eq!(fetched.stars_count, 0);
}

// Scenario: star then unstar leaves the pair unstarred.
#[tokio::test]
async fn test_star_then_unstar() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/7/star"))
        .and(query_param("user_id", "1"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"message": "Repository starred successfully"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/repos/7/star"))
        .and(query_param("user_id", "1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/user/1/starred"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "repositories": [],
            "total": 0
        })))
        .mount(&mock_server)
        .await;

    let codehub = Codehub::new(&mock_server.uri()).unwrap();
    let repositories = codehub.repositories();

    repositories.star(7, 1).await.unwrap();
    repositories.unstar(7, 1).await.unwrap();
    assert!(!codehub.stars().is_starred(1, 7).await.unwrap());
}

// Scenario: issues are opened without sending a status.
#[tokio::test]
async fn test_new_issue_defaults_to_open() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/7/issues"))
        .and(body_json(json!({"creator_id": 1, "title": "Bug"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(issue(4, "open")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let codehub = Codehub::new(&mock_server.uri()).unwrap();
    let created = codehub
        .issues()
        .create(7, &IssueCreate::new(1, "Bug"))
        .await
        .unwrap();

    assert_eq!(created.status, IssueStatus::Open);
    assert_eq!(created.title, "Bug");
}

// Scenario: one matching repository and no users.
#[tokio::test]
async fn test_search_partitions_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "demo"))
        .and(query_param("type", "all"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [],
            "users_total": 0,
            "repositories": [repository(7, "demo", 0)],
            "repositories_total": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let codehub = Codehub::new(&mock_server.uri()).unwrap();
    let results = codehub
        .search()
        .search("demo", SearchKind::All, Page::first(20))
        .await
        .unwrap();

    assert_eq!(results.repositories.len(), 1);
    assert_eq!(results.repositories_total, 1);
    assert!(results.users.is_empty());
    assert_eq!(results.users_total, 0);
}

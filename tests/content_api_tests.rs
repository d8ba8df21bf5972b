use site_backend::settings::AppEnvironment;

use test_utils::TestApp;

#[tokio::test]
async fn lists_posts_newest_first_including_scheduled_outside_production() {
    let app = TestApp::spawn(AppEnvironment::Testing);

    let res = app.get("/api/v1/posts").await;
    assert_eq!(res.status(), 200);

    let posts: Vec<serde_json::Value> = res.json().await.unwrap();
    let names: Vec<_> = posts.iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["future-post", "second-post", "first-post"]);
}

#[tokio::test]
async fn production_hides_scheduled_posts() {
    let app = TestApp::spawn(AppEnvironment::Production);

    let res = app.get("/api/v1/posts").await;
    assert_eq!(res.status(), 200);

    let posts: Vec<serde_json::Value> = res.json().await.unwrap();
    let names: Vec<_> = posts.iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["second-post", "first-post"]);
}

#[tokio::test]
async fn latest_post_is_the_newest_published_one() {
    let app = TestApp::spawn(AppEnvironment::Production);

    let res = app.get("/api/v1/posts/latest").await;
    assert_eq!(res.status(), 200);

    let post: serde_json::Value = res.json().await.unwrap();
    assert_eq!(post["name"], "second-post");
}

#[tokio::test]
async fn serves_a_single_post_with_derived_links() {
    let app = TestApp::spawn(AppEnvironment::Testing);

    let res = app.get("/api/v1/posts/first-post").await;
    assert_eq!(res.status(), 200);

    let post: serde_json::Value = res.json().await.unwrap();
    assert_eq!(post["name"], "first-post");
    assert_eq!(post["title"], "First post");
    assert_eq!(post["image"]["src"], "assets/a.png");
    assert_eq!(post["tags"], serde_json::json!(["rust", "web"]));
    assert_eq!(post["markdown"], "Body of the first post.\n");
    assert_eq!(
        post["editHref"],
        "https://github.com/nsaunders/writing/edit/master/posts/first-post/index.md"
    );
    assert!(
        post["discussionHref"]
            .as_str()
            .unwrap()
            .starts_with("https://x.com/search?q=")
    );
}

#[tokio::test]
async fn missing_post_maps_to_404_naming_the_post() {
    let app = TestApp::spawn(AppEnvironment::Testing);

    let res = app.get("/api/v1/posts/missing-post").await;
    assert_eq!(res.status(), 404);

    let body: serde_json::Value = res.json().await.unwrap();
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("missing-post"), "got: {}", error);
    assert!(error.contains("404"), "got: {}", error);
}

#[tokio::test]
async fn lists_assets_across_nested_directories() {
    let app = TestApp::spawn(AppEnvironment::Testing);

    let res = app.get("/api/v1/posts/first-post/assets").await;
    assert_eq!(res.status(), 200);

    let mut assets: Vec<String> = res.json().await.unwrap();
    assets.sort();
    assert_eq!(
        assets,
        vec![
            "/posts/first-post/assets/a.png",
            "/posts/first-post/assets/sub/b.png"
        ]
    );
}

#[tokio::test]
async fn proxies_an_asset_with_its_content_type() {
    let app = TestApp::spawn(AppEnvironment::Testing);

    let res = app.get("/api/v1/posts/first-post/assets/a.png").await;
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "image/png");
    assert_eq!(res.bytes().await.unwrap().as_ref(), test_utils::PNG_BYTES);
}

#[tokio::test]
async fn unknown_asset_extension_is_404() {
    let app = TestApp::spawn(AppEnvironment::Testing);

    let res = app.get("/api/v1/posts/first-post/assets/a.exe").await;
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn serves_a_page() {
    let app = TestApp::spawn(AppEnvironment::Testing);

    let res = app.get("/api/v1/pages/about").await;
    assert_eq!(res.status(), 200);

    let page: serde_json::Value = res.json().await.unwrap();
    assert_eq!(page["name"], "about");
    assert_eq!(page["markdown"], test_utils::ABOUT_PAGE);
}

#[tokio::test]
async fn lists_pinned_projects_with_scraped_fields() {
    let app = TestApp::spawn(AppEnvironment::Testing);

    let res = app.get("/api/v1/projects").await;
    assert_eq!(res.status(), 200);

    let projects: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(projects.len(), 2);

    // Owner falls back to the profile username; missing counters read 0.
    assert_eq!(projects[0]["owner"], "nsaunders");
    assert_eq!(projects[0]["name"], "writing");
    assert_eq!(projects[0]["stars"], 0);
    assert_eq!(projects[0]["language"]["color"], "black");

    assert_eq!(projects[1]["owner"], "someone");
    assert_eq!(projects[1]["name"], "css-hooks");
    assert_eq!(projects[1]["stars"], 1204);
    assert_eq!(projects[1]["forks"], 37);
    assert_eq!(projects[1]["language"]["name"], "Rust");
    assert_eq!(projects[1]["language"]["color"], "#dea584");
}

#[tokio::test]
async fn features_the_first_pinned_project_with_a_story() {
    let app = TestApp::spawn(AppEnvironment::Testing);

    let res = app.get("/api/v1/projects/featured").await;
    assert_eq!(res.status(), 200);

    let featured: serde_json::Value = res.json().await.unwrap();
    assert_eq!(featured["owner"], "nsaunders");
    assert_eq!(featured["name"], "writing");
    assert_eq!(featured["story"], test_utils::WRITING_STORY);
}

#[tokio::test]
async fn fetches_project_stats_without_credentials() {
    let app = TestApp::spawn(AppEnvironment::Testing);

    // The fake answers 500 if the Authorization header leaks through.
    let res = app.get("/api/v1/projects/someone/css-hooks/stats").await;
    assert_eq!(res.status(), 200);

    let stats: serde_json::Value = res.json().await.unwrap();
    assert_eq!(stats["stars"], 42);
    assert_eq!(stats["forks"], 7);
}

#[tokio::test]
async fn home_and_health_respond() {
    let app = TestApp::spawn(AppEnvironment::Testing);

    let res = app.get("/").await;
    assert_eq!(res.status(), 200);

    let res = app.get("/health").await;
    assert_eq!(res.status(), 200);
    let health: serde_json::Value = res.json().await.unwrap();
    assert_eq!(health["status"], "healthy");
}

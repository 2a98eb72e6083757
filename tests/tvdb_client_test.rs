//! HTTP-level tests for the TheTVDB client against a mock server.

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tvindex::clock::ManualClock;
use tvindex::config::ApiConfig;
use tvindex::provider::{CatalogSource, TimeoutBreaker, TvdbClient, DEFAULT_COOL_DOWN};
use tvindex::session::Catalog;
use tvindex_common::{Error, Language, ShowId};

const TOKEN: &str = "test-token";

async fn server_with_login() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({"apikey": "KEY"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": TOKEN})))
        .expect(1)
        .mount(&server)
        .await;
    server
}

fn api(server: &MockServer) -> ApiConfig {
    ApiConfig {
        api_url: server.uri(),
        apikey: Some("KEY".into()),
        timeout_secs: 2,
        ..ApiConfig::default()
    }
}

fn client(server: &MockServer) -> (TvdbClient, Arc<TimeoutBreaker>) {
    let breaker = Arc::new(TimeoutBreaker::new(DEFAULT_COOL_DOWN, ManualClock::shared()));
    let client = TvdbClient::new(&api(server), breaker.clone()).unwrap();
    (client, breaker)
}

#[tokio::test]
async fn search_sends_token_and_language() {
    let server = server_with_login().await;
    Mock::given(method("GET"))
        .and(path("/search/series"))
        .and(query_param("name", "scrubs"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("accept-language", "de"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": 76156, "seriesName": "Scrubs", "firstAired": "2001-10-02", "network": "NBC"},
                {"id": 99, "seriesName": null}
            ]
        })))
        .mount(&server)
        .await;

    let (client, _) = client(&server);
    let candidates = client
        .search_by_name("scrubs", Language::parse("de").unwrap())
        .await
        .unwrap();

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].id, ShowId::new(76156));
    assert_eq!(candidates[0].series_name.as_deref(), Some("Scrubs"));
    assert_eq!(candidates[0].language_id, Some(14));
    assert_eq!(candidates[1].series_name, None);
}

#[tokio::test]
async fn search_404_is_empty() {
    let server = server_with_login().await;
    Mock::given(method("GET"))
        .and(path("/search/series"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"Error": "Resource not found"})))
        .mount(&server)
        .await;

    let (client, _) = client(&server);
    let candidates = client.search_by_name("zzz", Language::ENGLISH).await.unwrap();
    assert!(candidates.is_empty());
}

#[tokio::test]
async fn token_is_reused_across_requests() {
    let server = server_with_login().await;
    Mock::given(method("GET"))
        .and(path("/series/76156"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"id": 76156, "seriesName": "Scrubs"}})),
        )
        .expect(2)
        .mount(&server)
        .await;

    let (client, _) = client(&server);
    client.fetch_metadata(ShowId::new(76156), Language::ENGLISH).await.unwrap();
    let record = client.fetch_metadata(ShowId::new(76156), Language::ENGLISH).await.unwrap();
    assert_eq!(record.text("seriesName"), Some("Scrubs"));
    // `expect(1)` on /login is verified when the server drops.
}

#[tokio::test]
async fn metadata_404_is_show_not_found() {
    let server = server_with_login().await;
    Mock::given(method("GET"))
        .and(path("/series/1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (client, _) = client(&server);
    let err = client.fetch_metadata(ShowId::new(1), Language::ENGLISH).await.unwrap_err();
    assert_matches!(err, Error::ShowNotFound(_));
}

#[tokio::test]
async fn server_error_is_fetch_error() {
    let server = server_with_login().await;
    Mock::given(method("GET"))
        .and(path("/series/76156"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let (client, _) = client(&server);
    let err = client.fetch_metadata(ShowId::new(76156), Language::ENGLISH).await.unwrap_err();
    assert_matches!(err, Error::Fetch { ref what, .. } if what == "series");
}

#[tokio::test]
async fn episodes_follow_next_links() {
    let server = server_with_login().await;
    Mock::given(method("GET"))
        .and(path("/series/76156/episodes"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"airedSeason": 2, "airedEpisodeNumber": 1, "episodeName": "My Overkill"}],
            "links": {"first": 1, "last": 2, "next": null, "prev": 1}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/series/76156/episodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"airedSeason": 1, "airedEpisodeNumber": 1, "episodeName": "My First Day"},
                {"airedSeason": 1, "airedEpisodeNumber": 2, "episodeName": "My Mentor"}
            ],
            "links": {"first": 1, "last": 2, "next": 2, "prev": null}
        })))
        .mount(&server)
        .await;

    let (client, _) = client(&server);
    let episodes = client
        .fetch_episodes(ShowId::new(76156), Language::ENGLISH)
        .await
        .unwrap();
    let names: Vec<_> = episodes.iter().filter_map(|e| e.text("episodeName")).collect();
    assert_eq!(names, vec!["My First Day", "My Mentor", "My Overkill"]);
}

#[tokio::test]
async fn banners_query_each_key_type() {
    let server = server_with_login().await;
    Mock::given(method("GET"))
        .and(path("/series/76156/images"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"fanart": 1, "poster": 1, "series": 0}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/series/76156/images/query"))
        .and(query_param("keyType", "fanart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 1, "keyType": "fanart", "resolution": "1920x1080", "fileName": "fanart/original/1.jpg"}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/series/76156/images/query"))
        .and(query_param("keyType", "poster"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 2, "keyType": "poster", "resolution": "680x1000", "fileName": "posters/2.jpg"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client(&server);
    let banners = client.fetch_banners(ShowId::new(76156)).await.unwrap();
    assert_eq!(banners.len(), 2);
}

#[tokio::test]
async fn unauthorized_triggers_one_relogin() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": TOKEN})))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/series/76156/actors"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/series/76156/actors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 43638, "name": "John C. McGinley", "image": "actors/43638.jpg"}]
        })))
        .mount(&server)
        .await;

    let (client, _) = client(&server);
    let actors = client.fetch_actors(ShowId::new(76156)).await.unwrap();
    assert_eq!(actors[0].text("name"), Some("John C. McGinley"));
}

#[tokio::test]
async fn failed_login_is_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (client, _) = client(&server);
    let err = client.search_by_name("scrubs", Language::ENGLISH).await.unwrap_err();
    assert_matches!(err, Error::Fetch { ref what, .. } if what == "login");
}

#[tokio::test]
async fn timeout_trips_the_breaker() {
    let server = server_with_login().await;
    Mock::given(method("GET"))
        .and(path("/series/76156"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let api = ApiConfig {
        timeout_secs: 1,
        ..api(&server)
    };
    let breaker = Arc::new(TimeoutBreaker::new(DEFAULT_COOL_DOWN, ManualClock::shared()));
    let client = TvdbClient::new(&api, breaker.clone()).unwrap();

    let err = client.fetch_metadata(ShowId::new(76156), Language::ENGLISH).await.unwrap_err();
    assert_matches!(err, Error::Fetch { .. });
    assert_matches!(breaker.check(false), Err(Error::RecentTimeout(_)));
}

#[tokio::test]
async fn catalog_over_http_end_to_end() {
    let server = server_with_login().await;
    Mock::given(method("GET"))
        .and(path("/search/series"))
        .and(query_param("name", "Scrubs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 76156, "seriesName": "Scrubs"}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/series/76156"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": 76156, "seriesName": "Scrubs", "poster": "posters/76156-2.jpg"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/series/76156/episodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"airedSeason": 1, "airedEpisodeNumber": 24, "episodeName": "My Last Day", "filename": "episodes/76156/1.jpg"},
                {"airedSeason": null, "airedEpisodeNumber": 1, "episodeName": "Broken"}
            ],
            "links": {"next": null}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = tvindex::config::Config::default();
    config.api = api(&server);
    let breaker = Arc::new(TimeoutBreaker::new(DEFAULT_COOL_DOWN, ManualClock::shared()));
    let catalog = Catalog::from_config(&config, breaker).unwrap();

    let show = catalog.lookup("Scrubs").await.unwrap();
    assert_eq!(
        show.get("poster").unwrap().as_str(),
        Some("http://thetvdb.com/banners/posters/76156-2.jpg")
    );
    let episode = show.season(1).unwrap().episode(24).unwrap();
    assert_eq!(
        episode.get("filename").unwrap().as_str(),
        Some("http://thetvdb.com/banners/episodes/76156/1.jpg")
    );
    assert_eq!(show.episode_count(), 1);

    catalog.lookup("Scrubs").await.unwrap();
}

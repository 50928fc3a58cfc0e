use std::time::Duration;

use httpmock::prelude::*;
use reelmark_core::{MediaType, Platform, ResultErrorCode};
use reelmark_enrich::{EnrichConfig, Endpoints, EnrichmentError, Resolver};
use serde_json::json;

/// Resolver with every collaborator pointed at the mock server.
fn resolver(server: &MockServer, youtube_key: bool, tmdb_key: bool) -> Resolver {
    let config = EnrichConfig {
        youtube_api_key: youtube_key.then(|| "yt-key".to_string()),
        tmdb_api_key: tmdb_key.then(|| "tmdb-key".to_string()),
        endpoints: Endpoints::all_at(&server.base_url()),
        ..Default::default()
    };
    Resolver::new(config).unwrap()
}

fn mock_youtube_video(server: &MockServer, duration: &str) {
    server.mock(|when, then| {
        when.method(GET)
            .path("/youtube/v3/videos")
            .query_param("id", "dQw4w9WgXcQ");
        then.status(200).json_body(json!({
            "items": [{
                "snippet": {
                    "title": "Rick Astley - Never Gonna Give You Up (Official Video)",
                    "thumbnails": {
                        "high": { "url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg" }
                    }
                },
                "contentDetails": { "duration": duration }
            }]
        }));
    });
}

#[tokio::test]
async fn video_without_catalog_match_keeps_platform_values() {
    let server = MockServer::start();
    mock_youtube_video(&server, "PT3M33S");
    let search = server.mock(|when, then| {
        when.method(GET)
            .path("/tmdb/3/search/multi")
            .query_param("query", "Rick Astley Never Gonna Give You Up");
        then.status(200).json_body(json!({ "results": [] }));
    });

    let enrichment = resolver(&server, true, true)
        .enrich("https://youtu.be/dQw4w9WgXcQ")
        .await;

    search.assert();
    let result = enrichment.result;
    assert_eq!(result.provider, Platform::YouTube);
    assert_eq!(result.runtime_minutes, Some(4));
    assert_eq!(
        result.title.as_deref(),
        Some("Rick Astley - Never Gonna Give You Up (Official Video)")
    );
    assert_eq!(result.media_type, MediaType::Unknown);
    assert!(result.error.is_none());
    assert!(enrichment.failure.is_none());
}

#[tokio::test]
async fn catalog_poster_beats_platform_thumbnail() {
    let server = MockServer::start();
    mock_youtube_video(&server, "PT3M33S");
    server.mock(|when, then| {
        when.method(GET).path("/tmdb/3/search/multi");
        then.status(200).json_body(json!({
            "results": [{
                "media_type": "movie",
                "id": 1001,
                "title": "Never Gonna Give You Up",
                "release_date": "1987-07-27",
                "poster_path": "/rick.jpg"
            }]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/tmdb/3/movie/1001");
        then.status(200).json_body(json!({ "runtime": 0 }));
    });

    let result = resolver(&server, true, true)
        .enrich("https://youtu.be/dQw4w9WgXcQ")
        .await
        .result;

    assert_eq!(
        result.poster_url,
        Some(format!("{}/tmdb/t/p/w500/rick.jpg", server.base_url()))
    );
    assert_eq!(result.title.as_deref(), Some("Never Gonna Give You Up"));
    // Catalog has no runtime: the platform duration stays.
    assert_eq!(result.runtime_minutes, Some(4));
    assert_eq!(result.external_catalog_id, Some(1001));
    assert_eq!(result.provider, Platform::YouTube);
}

#[tokio::test]
async fn review_site_title_is_replaced_by_catalog_title() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/title/tt0111161/");
        then.status(200).body(
            r#"<html><head>
            <meta property="og:title" content="The Shawshank Redemption (1994) - IMDb">
            <meta property="og:image" content="https://m.media-amazon.com/images/shawshank.jpg">
            </head></html>"#,
        );
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/tmdb/3/search/multi")
            .query_param("api_key", "tmdb-key");
        then.status(200).json_body(json!({
            "results": [
                { "media_type": "person", "id": 4027, "name": "Frank Darabont" },
                {
                    "media_type": "movie",
                    "id": 278,
                    "title": "The Shawshank Redemption",
                    "overview": "Imprisoned in the 1940s for the double murder of his wife and her lover...",
                    "release_date": "1994-09-23",
                    "poster_path": "/shawshank.jpg",
                    "backdrop_path": "/prison.jpg"
                }
            ]
        }));
    });
    let details = server.mock(|when, then| {
        when.method(GET).path("/tmdb/3/movie/278");
        then.status(200).json_body(json!({ "runtime": 142 }));
    });

    let result = resolver(&server, false, true)
        .enrich_as(Platform::Imdb, &server.url("/title/tt0111161/"))
        .await
        .result;

    details.assert();
    assert_eq!(result.title.as_deref(), Some("The Shawshank Redemption"));
    assert_eq!(result.release_year, Some(1994));
    assert_eq!(result.media_type, MediaType::Movie);
    assert_eq!(result.runtime_minutes, Some(142));
    assert_eq!(result.external_catalog_id, Some(278));
    assert_eq!(
        result.backdrop_url,
        Some(format!("{}/tmdb/t/p/original/prison.jpg", server.base_url()))
    );
    assert_eq!(result.provider, Platform::Imdb);
}

#[tokio::test]
async fn forum_post_title_is_looked_up_in_the_catalog() {
    let server = MockServer::start();
    let listing = server.mock(|when, then| {
        when.method(GET)
            .path("/r/movies/comments/abc123/heat_rewatch.json")
            .header("user-agent", reelmark_enrich::fetch::FORUM_USER_AGENT);
        then.status(200).json_body(json!([
            { "data": { "children": [ { "data": { "title": "Heat (1995) | rewatched it last night" } } ] } },
            { "data": { "children": [] } }
        ]));
    });
    let search = server.mock(|when, then| {
        when.method(GET)
            .path("/tmdb/3/search/multi")
            .query_param("query", "Heat");
        then.status(200).json_body(json!({
            "results": [{
                "media_type": "movie",
                "id": 949,
                "title": "Heat",
                "release_date": "1995-12-15",
                "poster_path": "/heat.jpg"
            }]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/tmdb/3/movie/949");
        then.status(200).json_body(json!({ "runtime": 170 }));
    });

    let enrichment = resolver(&server, false, true)
        .enrich_as(
            Platform::Reddit,
            &server.url("/r/movies/comments/abc123/heat_rewatch/?utm_source=share"),
        )
        .await;

    listing.assert();
    search.assert();
    let result = enrichment.result;
    assert_eq!(result.provider, Platform::Reddit);
    assert_eq!(result.title.as_deref(), Some("Heat"));
    assert_eq!(result.release_year, Some(1995));
    assert_eq!(result.runtime_minutes, Some(170));
    assert_eq!(result.external_catalog_id, Some(949));
    assert_eq!(
        result.poster_url,
        Some(format!("{}/tmdb/t/p/w500/heat.jpg", server.base_url()))
    );
    assert!(enrichment.failure.is_none());
}

#[tokio::test]
async fn page_data_is_the_fallback_when_catalog_is_unavailable() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/film/heat/");
        then.status(200).body(
            r#"<meta property="og:title" content="Heat (1995)">
               <meta property="og:image" content="/heat.jpg">
               <meta property="og:description" content="A heist thriller.">"#,
        );
    });
    server.mock(|when, then| {
        when.method(GET).path("/tmdb/3/search/multi");
        then.status(503);
    });

    let result = resolver(&server, false, true)
        .enrich_as(Platform::Letterboxd, &server.url("/film/heat/"))
        .await
        .result;

    assert_eq!(result.title.as_deref(), Some("Heat (1995)"));
    assert_eq!(result.poster_url, Some(server.url("/heat.jpg")));
    assert_eq!(result.description.as_deref(), Some("A heist thriller."));
    assert!(result.external_catalog_id.is_none());
    assert!(result.error.is_none());
}

#[tokio::test]
async fn forbidden_page_is_flagged_blocked() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/private");
        then.status(403);
    });

    let enrichment = resolver(&server, false, true)
        .enrich(&server.url("/private"))
        .await;

    let result = enrichment.result;
    assert_eq!(result.provider, Platform::Generic);
    assert!(result.blocked);
    assert!(result.poster_url.is_none());
    assert_eq!(
        result.error.map(|e| e.code),
        Some(ResultErrorCode::Blocked)
    );
    assert_eq!(
        enrichment.failure,
        Some(EnrichmentError::Blocked { status: 403 })
    );
}

#[tokio::test]
async fn page_without_titles_reports_no_metadata() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/empty");
        then.status(200).body("<html><body><p>nothing here</p></body></html>");
    });
    let search = server.mock(|when, then| {
        when.method(GET).path("/tmdb/3/search/multi");
        then.status(200).json_body(json!({ "results": [] }));
    });

    let result = resolver(&server, false, true)
        .enrich(&server.url("/empty"))
        .await
        .result;

    search.assert_hits(0);
    assert!(!result.blocked);
    assert_eq!(
        result.error.map(|e| e.code),
        Some(ResultErrorCode::NoMetadata)
    );
}

#[tokio::test]
async fn server_error_degrades_to_provider_only() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/flaky");
        then.status(502);
    });

    let result = resolver(&server, false, false)
        .enrich_as(Platform::Netflix, &server.url("/flaky"))
        .await
        .result;

    assert_eq!(result.provider, Platform::Netflix);
    assert!(result.error.is_none());
    assert!(!result.blocked);
    assert!(!result.is_usable());
}

#[tokio::test]
async fn provider_is_the_origin_even_when_catalog_supplies_everything() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/twitter/oembed");
        then.status(200).json_body(json!({
            "html": "<blockquote><p>Finally watched Past Lives (2023) 😭</p>&mdash; a fan</blockquote>"
        }));
    });
    let search = server.mock(|when, then| {
        when.method(GET)
            .path("/tmdb/3/search/multi")
            .query_param("query", "Finally watched Past Lives");
        then.status(200).json_body(json!({
            "results": [{ "media_type": "movie", "id": 666277, "title": "Past Lives", "release_date": "2023-06-02" }]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/tmdb/3/movie/666277");
        then.status(200).json_body(json!({ "runtime": 106 }));
    });

    let result = resolver(&server, false, true)
        .enrich_as(Platform::Twitter, "https://x.com/fan/status/1")
        .await
        .result;

    search.assert();
    assert_eq!(result.provider, Platform::Twitter);
    assert_eq!(result.title.as_deref(), Some("Past Lives"));
    assert_eq!(result.runtime_minutes, Some(106));
}

#[tokio::test]
async fn oembed_without_catalog_match_returns_provider_only() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/tiktok/oembed");
        then.status(200).json_body(json!({ "title": "my cat reviews movies" }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/tmdb/3/search/multi");
        then.status(200).json_body(json!({ "results": [] }));
    });

    let result = resolver(&server, false, true)
        .enrich_as(Platform::TikTok, "https://www.tiktok.com/@cat/video/1")
        .await
        .result;

    assert_eq!(result.provider, Platform::TikTok);
    assert!(result.title.is_none());
    assert!(result.error.is_none());
}

#[tokio::test]
async fn slow_origin_hits_the_deadline() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/slow");
        then.status(200)
            .delay(Duration::from_secs(3))
            .body("<title>too late</title>");
    });

    let config = EnrichConfig {
        deadline: Duration::from_millis(200),
        endpoints: Endpoints::all_at(&server.base_url()),
        ..Default::default()
    };
    let enrichment = Resolver::new(config)
        .unwrap()
        .enrich(&server.url("/slow"))
        .await;

    assert!(matches!(enrichment.failure, Some(EnrichmentError::Timeout(_))));
    assert_eq!(
        enrichment.result.error.map(|e| e.code),
        Some(ResultErrorCode::Timeout)
    );
}

#[tokio::test]
async fn classification_is_stable_for_malformed_input() {
    let resolver = Resolver::new(EnrichConfig::default()).unwrap();
    for raw in ["", "not a url", "http://", "youtu.be/dQw4w9WgXcQ"] {
        let first = resolver.enrich(raw).await;
        let second = resolver.enrich(raw).await;
        assert_eq!(first.result.provider, Platform::Generic, "{raw:?}");
        assert_eq!(first, second);
    }
}

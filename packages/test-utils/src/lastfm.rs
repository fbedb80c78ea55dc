//! Mock Last.fm web service
//!
//! Provides a [`MockLastfmServer`] that answers Last.fm method calls with
//! canned JSON or XML bodies. Every mock matches on the `method` and
//! `api_key` query parameters, the same way the real service routes calls.

use std::collections::HashMap;

use serde_json::json;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock Last.fm server for client tests
///
/// This struct wraps a [`wiremock::MockServer`] and provides convenience methods
/// for the artist methods, error envelopes and transport failures.
pub struct MockLastfmServer {
    server: MockServer,
    api_key: String,
}

impl MockLastfmServer {
    /// Start a new mock server with the default API key
    pub async fn start() -> Self {
        Self::start_with_api_key("test-api-key").await
    }

    /// Start a new mock server with a custom API key
    pub async fn start_with_api_key(api_key: &str) -> Self {
        let server = MockServer::start().await;
        Self {
            server,
            api_key: api_key.to_string(),
        }
    }

    /// Get the server URL
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Get the API key the mocks expect
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Access the underlying wiremock server for custom mocks
    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    fn given(&self, lastfm_method: &str) -> wiremock::MockBuilder {
        Mock::given(method("GET"))
            .and(query_param("method", lastfm_method))
            .and(query_param("api_key", self.api_key.as_str()))
    }

    /// Mount a JSON body for a Last.fm method
    pub async fn mock_method_json(&self, lastfm_method: &str, body: serde_json::Value) {
        self.given(lastfm_method)
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mount an XML body for a Last.fm method
    pub async fn mock_method_xml(&self, lastfm_method: &str, body: &str) {
        self.given(lastfm_method)
            .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_owned(), "text/xml"))
            .mount(&self.server)
            .await;
    }

    /// Mount a successful `artist.getTopTags` response
    pub async fn mock_top_tags(&self, artist: &str, tags: &[TagFixture]) {
        self.mock_method_json("artist.getTopTags", TagFixture::list_json(artist, tags))
            .await;
    }

    /// Mount a successful `artist.getInfo` response
    pub async fn mock_artist_info(&self, artist: &ArtistInfoFixture) {
        self.mock_method_json("artist.getInfo", artist.to_json()).await;
    }

    /// Mount a successful `artist.getTopAlbums` response
    pub async fn mock_top_albums(&self, artist: &str, albums: &[AlbumFixture]) {
        self.mock_method_json("artist.getTopAlbums", AlbumFixture::list_json(artist, albums))
            .await;
    }

    /// Mount a successful `artist.getTopTracks` response
    pub async fn mock_top_tracks(&self, artist: &str, tracks: &[TrackFixture]) {
        self.mock_method_json("artist.getTopTracks", TrackFixture::list_json(artist, tracks))
            .await;
    }

    /// Mount a successful `artist.getSimilar` response
    pub async fn mock_similar(&self, artist: &str, similar: &[SimilarArtistFixture]) {
        self.mock_method_json(
            "artist.getSimilar",
            SimilarArtistFixture::list_json(artist, similar),
        )
        .await;
    }

    /// Mount a Last.fm JSON error envelope (e.g. code 6, artist not found)
    pub async fn mock_api_error(&self, lastfm_method: &str, code: i32, message: &str) {
        self.given(lastfm_method)
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": code,
                "message": message
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a Last.fm XML error envelope
    pub async fn mock_api_error_xml(&self, lastfm_method: &str, code: i32, message: &str) {
        let body = format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<lfm status=\"failed\">\n  <error code=\"{}\">{}</error>\n</lfm>",
            code, message
        );
        self.given(lastfm_method)
            .respond_with(ResponseTemplate::new(400).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Mount a bare HTTP status (e.g. 500 or 429) for every call
    pub async fn mock_status(&self, status_code: u16) {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status_code))
            .mount(&self.server)
            .await;
    }

    /// Mount a body that is neither JSON nor XML
    pub async fn mock_malformed(&self, lastfm_method: &str) {
        self.given(lastfm_method)
            .respond_with(ResponseTemplate::new(200).set_body_string("<<< not a response"))
            .mount(&self.server)
            .await;
    }

    /// Query parameters of every request received so far, in arrival order
    pub async fn received_params(&self) -> Vec<HashMap<String, String>> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| {
                request
                    .url
                    .query_pairs()
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .collect()
    }
}

fn image_json(base: &str) -> serde_json::Value {
    json!([
        {"#text": format!("https://lastfm.freetls.fastly.net/i/u/34s/{}.png", base), "size": "small"},
        {"#text": format!("https://lastfm.freetls.fastly.net/i/u/174s/{}.png", base), "size": "large"}
    ])
}

fn artist_url(name: &str) -> String {
    format!("https://www.last.fm/music/{}", name.replace(' ', "+"))
}

/// Fixture for a top tag entry
#[derive(Debug, Clone)]
pub struct TagFixture {
    pub name: String,
    pub count: u32,
}

impl TagFixture {
    pub fn new(name: &str, count: u32) -> Self {
        Self {
            name: name.to_string(),
            count,
        }
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "count": self.count,
            "name": self.name,
            "url": format!("https://www.last.fm/tag/{}", self.name.replace(' ', "+"))
        })
    }

    /// Full `artist.getTopTags` JSON body
    pub fn list_json(artist: &str, tags: &[TagFixture]) -> serde_json::Value {
        json!({
            "toptags": {
                "tag": tags.iter().map(|t| t.to_json()).collect::<Vec<_>>(),
                "@attr": {"artist": artist}
            }
        })
    }

    /// Full `artist.getTopTags` XML body
    pub fn list_xml(artist: &str, tags: &[TagFixture]) -> String {
        let entries: String = tags
            .iter()
            .map(|t| {
                format!(
                    "    <tag>\n      <name>{}</name>\n      <count>{}</count>\n      <url>https://www.last.fm/tag/{}</url>\n    </tag>\n",
                    t.name,
                    t.count,
                    t.name.replace(' ', "+")
                )
            })
            .collect();
        format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<lfm status=\"ok\">\n  <toptags artist=\"{}\">\n{}  </toptags>\n</lfm>",
            artist, entries
        )
    }
}

/// Fixture for `artist.getInfo`
#[derive(Debug, Clone)]
pub struct ArtistInfoFixture {
    pub name: String,
    pub mbid: Option<String>,
    pub listeners: u64,
    pub playcount: u64,
    pub user_playcount: Option<u64>,
    pub on_tour: bool,
    pub tags: Vec<String>,
    pub similar: Vec<String>,
    pub summary: String,
}

impl ArtistInfoFixture {
    /// Create a fixture with plausible defaults
    pub fn new(name: &str, mbid: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            mbid: mbid.map(str::to_string),
            listeners: 4_500_000,
            playcount: 600_000_000,
            user_playcount: None,
            on_tour: false,
            tags: vec!["alternative".to_string(), "rock".to_string()],
            similar: vec!["Thom Yorke".to_string(), "Muse".to_string()],
            summary: format!("{} is a band.", name),
        }
    }

    /// Convert to a full `artist.getInfo` JSON body
    pub fn to_json(&self) -> serde_json::Value {
        let mut stats = json!({
            "listeners": self.listeners.to_string(),
            "playcount": self.playcount.to_string()
        });
        if let Some(user_playcount) = self.user_playcount {
            stats["userplaycount"] = json!(user_playcount.to_string());
        }

        json!({
            "artist": {
                "name": self.name,
                "mbid": self.mbid.clone().unwrap_or_default(),
                "url": artist_url(&self.name),
                "image": image_json("artist"),
                "streamable": "0",
                "ontour": if self.on_tour { "1" } else { "0" },
                "stats": stats,
                "similar": {
                    "artist": self.similar.iter().map(|name| json!({
                        "name": name,
                        "url": artist_url(name),
                        "image": image_json("similar")
                    })).collect::<Vec<_>>()
                },
                "tags": {
                    "tag": self.tags.iter().map(|tag| json!({
                        "name": tag,
                        "url": format!("https://www.last.fm/tag/{}", tag)
                    })).collect::<Vec<_>>()
                },
                "bio": {
                    "links": {"link": {"#text": "", "rel": "original", "href": artist_url(&self.name)}},
                    "published": "10 Feb 2006, 20:50",
                    "summary": self.summary,
                    "content": format!("{} Read more on Last.fm.", self.summary)
                }
            }
        })
    }

    /// Convert to a full `artist.getInfo` XML body
    pub fn to_xml(&self) -> String {
        let similar: String = self
            .similar
            .iter()
            .map(|name| {
                format!(
                    "      <artist>\n        <name>{}</name>\n        <url>{}</url>\n      </artist>\n",
                    name,
                    artist_url(name)
                )
            })
            .collect();
        let tags: String = self
            .tags
            .iter()
            .map(|tag| {
                format!(
                    "      <tag>\n        <name>{}</name>\n        <url>https://www.last.fm/tag/{}</url>\n      </tag>\n",
                    tag, tag
                )
            })
            .collect();
        let user_playcount = self
            .user_playcount
            .map(|n| format!("      <userplaycount>{}</userplaycount>\n", n))
            .unwrap_or_default();

        format!(
            concat!(
                "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n",
                "<lfm status=\"ok\">\n",
                "  <artist>\n",
                "    <name>{name}</name>\n",
                "    <mbid>{mbid}</mbid>\n",
                "    <url>{url}</url>\n",
                "    <image size=\"small\">https://lastfm.freetls.fastly.net/i/u/34s/artist.png</image>\n",
                "    <image size=\"large\">https://lastfm.freetls.fastly.net/i/u/174s/artist.png</image>\n",
                "    <streamable>0</streamable>\n",
                "    <ontour>{ontour}</ontour>\n",
                "    <stats>\n",
                "      <listeners>{listeners}</listeners>\n",
                "      <playcount>{playcount}</playcount>\n",
                "{user_playcount}",
                "    </stats>\n",
                "    <similar>\n{similar}    </similar>\n",
                "    <tags>\n{tags}    </tags>\n",
                "    <bio>\n",
                "      <published>10 Feb 2006, 20:50</published>\n",
                "      <summary>{summary}</summary>\n",
                "      <content>{summary} Read more on Last.fm.</content>\n",
                "    </bio>\n",
                "  </artist>\n",
                "</lfm>"
            ),
            name = self.name,
            mbid = self.mbid.clone().unwrap_or_default(),
            url = artist_url(&self.name),
            ontour = if self.on_tour { 1 } else { 0 },
            listeners = self.listeners,
            playcount = self.playcount,
            user_playcount = user_playcount,
            similar = similar,
            tags = tags,
            summary = self.summary,
        )
    }
}

/// Fixture for a top album entry
#[derive(Debug, Clone)]
pub struct AlbumFixture {
    pub name: String,
    pub artist: String,
    pub playcount: u64,
}

impl AlbumFixture {
    pub fn new(name: &str, artist: &str, playcount: u64) -> Self {
        Self {
            name: name.to_string(),
            artist: artist.to_string(),
            playcount,
        }
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "name": self.name,
            "playcount": self.playcount,
            "url": format!("{}/{}", artist_url(&self.artist), self.name.replace(' ', "+")),
            "artist": {
                "name": self.artist,
                "mbid": "",
                "url": artist_url(&self.artist)
            },
            "image": image_json("album")
        })
    }

    /// Full `artist.getTopAlbums` JSON body
    pub fn list_json(artist: &str, albums: &[AlbumFixture]) -> serde_json::Value {
        json!({
            "topalbums": {
                "album": albums.iter().map(|a| a.to_json()).collect::<Vec<_>>(),
                "@attr": {
                    "artist": artist,
                    "page": "1",
                    "perPage": "50",
                    "totalPages": "1",
                    "total": albums.len().to_string()
                }
            }
        })
    }
}

/// Fixture for a top track entry
#[derive(Debug, Clone)]
pub struct TrackFixture {
    pub name: String,
    pub artist: String,
    pub playcount: u64,
    pub listeners: u64,
}

impl TrackFixture {
    pub fn new(name: &str, artist: &str, playcount: u64, listeners: u64) -> Self {
        Self {
            name: name.to_string(),
            artist: artist.to_string(),
            playcount,
            listeners,
        }
    }

    /// Convert to JSON value with the given chart position
    pub fn to_json(&self, rank: usize) -> serde_json::Value {
        json!({
            "name": self.name,
            "playcount": self.playcount.to_string(),
            "listeners": self.listeners.to_string(),
            "mbid": "",
            "url": format!("{}/_/{}", artist_url(&self.artist), self.name.replace(' ', "+")),
            "streamable": "0",
            "artist": {
                "name": self.artist,
                "mbid": "",
                "url": artist_url(&self.artist)
            },
            "image": image_json("track"),
            "@attr": {"rank": rank.to_string()}
        })
    }

    /// Full `artist.getTopTracks` JSON body, ranked in slice order
    pub fn list_json(artist: &str, tracks: &[TrackFixture]) -> serde_json::Value {
        json!({
            "toptracks": {
                "track": tracks
                    .iter()
                    .enumerate()
                    .map(|(i, t)| t.to_json(i + 1))
                    .collect::<Vec<_>>(),
                "@attr": {
                    "artist": artist,
                    "page": "1",
                    "perPage": "50",
                    "totalPages": "1",
                    "total": tracks.len().to_string()
                }
            }
        })
    }
}

/// Fixture for a similar artist entry
#[derive(Debug, Clone)]
pub struct SimilarArtistFixture {
    pub name: String,
    pub match_score: String,
}

impl SimilarArtistFixture {
    pub fn new(name: &str, match_score: &str) -> Self {
        Self {
            name: name.to_string(),
            match_score: match_score.to_string(),
        }
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "name": self.name,
            "mbid": "",
            "match": self.match_score,
            "url": artist_url(&self.name),
            "image": image_json("similar"),
            "streamable": "0"
        })
    }

    /// Full `artist.getSimilar` JSON body
    pub fn list_json(artist: &str, similar: &[SimilarArtistFixture]) -> serde_json::Value {
        json!({
            "similarartists": {
                "artist": similar.iter().map(|s| s.to_json()).collect::<Vec<_>>(),
                "@attr": {"artist": artist}
            }
        })
    }
}

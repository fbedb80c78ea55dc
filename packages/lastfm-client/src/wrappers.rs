//! Response envelopes mirroring the Last.fm body layout
//!
//! These types are only used to deserialize responses and are discarded
//! once the inner records are extracted. The same types decode JSON and XML
//! bodies: in XML the `<lfm>` root element is skipped, attributes arrive as
//! `@name` keys and element text as `$text`.

use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;

use crate::models::{
    ArtistInfo, ArtistStats, ArtistSummary, Biography, Image, SimilarArtist, Tag, TopAlbum,
    TopTag, TopTrack,
};

// Scalar helpers
//
// Last.fm sends the same counter as a JSON number in one method and as a
// numeric string in the next. XML elements reach `deserialize_any` as a map
// holding a single `$text` entry.

struct ScalarText;

impl<'de> Visitor<'de> for ScalarText {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, a string or an element with text content")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Some(if v { "1" } else { "0" }.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(self)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut text = None;
        while let Some(key) = map.next_key::<String>()? {
            if key == "$text" || key == "#text" {
                text = Some(map.next_value::<String>()?);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(text)
    }
}

pub(crate) fn lenient_text<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    d.deserialize_any(ScalarText)
}

pub(crate) fn lenient_u64<'de, D>(d: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(d)?.and_then(|s| s.trim().parse().ok()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn rank(value: Option<u64>) -> Option<u32> {
    value.and_then(|n| u32::try_from(n).ok())
}

// Error envelopes

/// Last.fm API error response (JSON)
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: i32,
    pub message: String,
}

/// `<lfm status="...">` root of an XML response
#[derive(Debug, Deserialize)]
pub(crate) struct XmlStatus {
    #[serde(rename = "@status")]
    pub status: String,
    pub error: Option<XmlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct XmlError {
    #[serde(rename = "@code")]
    pub code: i32,
    #[serde(rename = "$text", default)]
    pub message: String,
}

// Shared pieces

#[derive(Debug, Deserialize)]
pub(crate) struct RawImage {
    #[serde(rename = "#text", alias = "$text", default)]
    pub url: String,
    #[serde(alias = "@size", default)]
    pub size: String,
}

impl From<RawImage> for Image {
    fn from(raw: RawImage) -> Self {
        Self {
            size: raw.size,
            url: raw.url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawArtistRef {
    pub name: String,
    #[serde(default)]
    pub mbid: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl From<RawArtistRef> for ArtistSummary {
    fn from(raw: RawArtistRef) -> Self {
        Self {
            name: raw.name,
            mbid: non_empty(raw.mbid),
            url: non_empty(raw.url),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RankAttr {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub rank: Option<u64>,
}

fn images(raw: Vec<RawImage>) -> Vec<Image> {
    raw.into_iter().map(Into::into).collect()
}

// artist.getTopTags

#[derive(Debug, Deserialize)]
pub(crate) struct TopTagsWrapper {
    pub toptags: TopTagList,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopTagList {
    #[serde(default)]
    pub tag: Vec<RawTopTag>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTopTag {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub count: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
}

impl From<RawTopTag> for TopTag {
    fn from(raw: RawTopTag) -> Self {
        Self {
            name: raw.name,
            count: raw.count.and_then(|n| u32::try_from(n).ok()),
            url: non_empty(raw.url),
        }
    }
}

// artist.getInfo

#[derive(Debug, Deserialize)]
pub(crate) struct ArtistInfoWrapper {
    pub artist: RawArtistInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawArtistInfo {
    pub name: String,
    #[serde(default)]
    pub mbid: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image: Vec<RawImage>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub ontour: Option<u64>,
    #[serde(default)]
    pub stats: Option<RawStats>,
    #[serde(default)]
    pub similar: Option<RawSimilarList>,
    #[serde(default)]
    pub tags: Option<RawTagList>,
    #[serde(default)]
    pub bio: Option<RawBio>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawStats {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub listeners: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub playcount: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub userplaycount: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSimilarList {
    #[serde(default)]
    pub artist: Vec<RawArtistRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTagList {
    #[serde(default)]
    pub tag: Vec<RawTag>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTag {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawBio {
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
}

impl From<RawArtistInfo> for ArtistInfo {
    fn from(raw: RawArtistInfo) -> Self {
        let stats = raw
            .stats
            .map(|s| ArtistStats {
                listeners: s.listeners.unwrap_or(0),
                playcount: s.playcount.unwrap_or(0),
                user_playcount: s.userplaycount,
            })
            .unwrap_or_default();

        Self {
            name: raw.name,
            mbid: non_empty(raw.mbid),
            url: non_empty(raw.url),
            images: images(raw.image),
            on_tour: raw.ontour.unwrap_or(0) != 0,
            stats,
            similar: raw
                .similar
                .map(|list| list.artist.into_iter().map(Into::into).collect())
                .unwrap_or_default(),
            tags: raw
                .tags
                .map(|list| {
                    list.tag
                        .into_iter()
                        .map(|t| Tag {
                            name: t.name,
                            url: non_empty(t.url),
                        })
                        .collect()
                })
                .unwrap_or_default(),
            bio: raw.bio.map(|b| Biography {
                published: non_empty(b.published),
                summary: b.summary,
                content: b.content,
            }),
        }
    }
}

// artist.getTopAlbums

#[derive(Debug, Deserialize)]
pub(crate) struct TopAlbumsWrapper {
    pub topalbums: TopAlbumList,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopAlbumList {
    #[serde(default)]
    pub album: Vec<RawTopAlbum>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTopAlbum {
    pub name: String,
    #[serde(default)]
    pub mbid: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub playcount: Option<u64>,
    /// XML carries the chart position as an attribute
    #[serde(rename = "@rank", default, deserialize_with = "lenient_u64")]
    pub rank: Option<u64>,
    /// JSON nests it under `@attr`
    #[serde(rename = "@attr", default)]
    pub attr: Option<RankAttr>,
    pub artist: RawArtistRef,
    #[serde(default)]
    pub image: Vec<RawImage>,
}

impl From<RawTopAlbum> for TopAlbum {
    fn from(raw: RawTopAlbum) -> Self {
        Self {
            name: raw.name,
            mbid: non_empty(raw.mbid),
            url: non_empty(raw.url),
            playcount: raw.playcount.unwrap_or(0),
            rank: rank(raw.rank.or_else(|| raw.attr.and_then(|a| a.rank))),
            artist: raw.artist.into(),
            images: images(raw.image),
        }
    }
}

// artist.getTopTracks

#[derive(Debug, Deserialize)]
pub(crate) struct TopTracksWrapper {
    pub toptracks: TopTrackList,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopTrackList {
    #[serde(default)]
    pub track: Vec<RawTopTrack>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTopTrack {
    pub name: String,
    #[serde(default)]
    pub mbid: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub playcount: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub listeners: Option<u64>,
    #[serde(rename = "@rank", default, deserialize_with = "lenient_u64")]
    pub rank: Option<u64>,
    #[serde(rename = "@attr", default)]
    pub attr: Option<RankAttr>,
    pub artist: RawArtistRef,
    #[serde(default)]
    pub image: Vec<RawImage>,
}

impl From<RawTopTrack> for TopTrack {
    fn from(raw: RawTopTrack) -> Self {
        Self {
            name: raw.name,
            mbid: non_empty(raw.mbid),
            url: non_empty(raw.url),
            playcount: raw.playcount.unwrap_or(0),
            listeners: raw.listeners.unwrap_or(0),
            rank: rank(raw.rank.or_else(|| raw.attr.and_then(|a| a.rank))),
            artist: raw.artist.into(),
            images: images(raw.image),
        }
    }
}

// artist.getSimilar

#[derive(Debug, Deserialize)]
pub(crate) struct SimilarArtistsWrapper {
    pub similarartists: SimilarArtistList,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SimilarArtistList {
    #[serde(default)]
    pub artist: Vec<RawSimilarArtist>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSimilarArtist {
    pub name: String,
    #[serde(default)]
    pub mbid: Option<String>,
    #[serde(rename = "match", default, deserialize_with = "lenient_text")]
    pub match_score: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl From<RawSimilarArtist> for SimilarArtist {
    fn from(raw: RawSimilarArtist) -> Self {
        let raw_score = raw.match_score.unwrap_or_default();
        let parsed: f64 = raw_score.trim().parse().unwrap_or_else(|e| {
            tracing::warn!(
                artist = %raw.name,
                raw_score = %raw_score,
                error = %e,
                "Failed to parse match_score, defaulting to 0.0"
            );
            0.0
        });

        // Clamp the score to [0.0, 1.0]
        let match_score = if parsed.is_finite() {
            parsed.clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            name: raw.name,
            mbid: non_empty(raw.mbid),
            match_score,
            url: non_empty(raw.url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accept_numbers_and_strings() {
        let tags: TopTagsWrapper = serde_json::from_str(
            r#"{"toptags":{"tag":[
                {"name":"rock","count":100,"url":"https://www.last.fm/tag/rock"},
                {"name":"indie","count":"42"},
                {"name":"odd","count":"n/a"}
            ]}}"#,
        )
        .unwrap();

        let tags: Vec<TopTag> = tags.toptags.tag.into_iter().map(Into::into).collect();
        assert_eq!(tags[0].count, Some(100));
        assert_eq!(tags[1].count, Some(42));
        assert_eq!(tags[1].url, None);
        assert_eq!(tags[2].count, None);
    }

    #[test]
    fn test_missing_list_is_empty() {
        let tags: TopTagsWrapper = serde_json::from_str(r#"{"toptags":{}}"#).unwrap();
        assert!(tags.toptags.tag.is_empty());
    }

    #[test]
    fn test_similar_artist_parsing() {
        let raw = RawSimilarArtist {
            name: "Test Artist".to_string(),
            mbid: Some("abc123".to_string()),
            match_score: Some("0.75".to_string()),
            url: Some("https://last.fm/artist/test".to_string()),
        };

        let artist: SimilarArtist = raw.into();
        assert_eq!(artist.name, "Test Artist");
        assert_eq!(artist.mbid, Some("abc123".to_string()));
        assert!((artist.match_score - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_similar_artist_score_is_clamped() {
        let raw = RawSimilarArtist {
            name: "Loud".to_string(),
            mbid: None,
            match_score: Some("7.5".to_string()),
            url: None,
        };
        let artist: SimilarArtist = raw.into();
        assert!((artist.match_score - 1.0).abs() < f64::EPSILON);

        let raw = RawSimilarArtist {
            name: "Broken".to_string(),
            mbid: None,
            match_score: Some("not a number".to_string()),
            url: None,
        };
        let artist: SimilarArtist = raw.into();
        assert_eq!(artist.match_score, 0.0);
    }

    #[test]
    fn test_empty_mbid_becomes_none() {
        let raw = RawArtistRef {
            name: "Test Artist".to_string(),
            mbid: Some("".to_string()),
            url: None,
        };

        let artist: ArtistSummary = raw.into();
        assert!(artist.mbid.is_none());
    }

    #[test]
    fn test_top_track_rank_from_json_attr() {
        let wrapper: TopTracksWrapper = serde_json::from_str(
            r##"{"toptracks":{"track":[{
                "name":"Creep",
                "playcount":"1000",
                "listeners":"250",
                "mbid":"",
                "url":"https://www.last.fm/music/Radiohead/_/Creep",
                "artist":{"name":"Radiohead","mbid":"a74b1b7f-71a5-4011-9441-d0b5e4122711","url":"https://www.last.fm/music/Radiohead"},
                "image":[{"#text":"https://img/small.png","size":"small"}],
                "@attr":{"rank":"3"}
            }]}}"##,
        )
        .unwrap();

        let track: TopTrack = wrapper.toptracks.track.into_iter().next().unwrap().into();
        assert_eq!(track.rank, Some(3));
        assert_eq!(track.playcount, 1000);
        assert_eq!(track.listeners, 250);
        assert_eq!(track.mbid, None);
        assert_eq!(track.artist.name, "Radiohead");
        assert_eq!(track.images[0].size, "small");
    }

    #[test]
    fn test_artist_info_from_xml() {
        let body = r#"<?xml version="1.0" encoding="utf-8"?>
<lfm status="ok">
  <artist>
    <name>Radiohead</name>
    <mbid>a74b1b7f-71a5-4011-9441-d0b5e4122711</mbid>
    <url>https://www.last.fm/music/Radiohead</url>
    <image size="small">https://img/small.png</image>
    <image size="large">https://img/large.png</image>
    <streamable>0</streamable>
    <ontour>1</ontour>
    <stats>
      <listeners>5000</listeners>
      <playcount>90000</playcount>
    </stats>
    <similar>
      <artist>
        <name>Thom Yorke</name>
        <url>https://www.last.fm/music/Thom+Yorke</url>
      </artist>
    </similar>
    <tags>
      <tag>
        <name>alternative</name>
        <url>https://www.last.fm/tag/alternative</url>
      </tag>
    </tags>
    <bio>
      <published>01 Jan 2006, 00:00</published>
      <summary>English rock band.</summary>
      <content>English rock band from Abingdon.</content>
    </bio>
  </artist>
</lfm>"#;

        let wrapper: ArtistInfoWrapper = quick_xml::de::from_str(body).unwrap();
        let info: ArtistInfo = wrapper.artist.into();

        assert_eq!(info.name, "Radiohead");
        assert!(info.on_tour);
        assert_eq!(info.stats.listeners, 5000);
        assert_eq!(info.stats.playcount, 90000);
        assert_eq!(info.images.len(), 2);
        assert_eq!(info.images[1].size, "large");
        assert_eq!(info.images[1].url, "https://img/large.png");
        assert_eq!(info.similar[0].name, "Thom Yorke");
        assert_eq!(info.tags[0].name, "alternative");
        assert_eq!(
            info.bio.as_ref().map(|b| b.summary.as_str()),
            Some("English rock band.")
        );
    }

    #[test]
    fn test_top_album_rank_from_xml_attribute() {
        let body = r#"<lfm status="ok">
  <topalbums artist="Radiohead" page="1" perPage="50">
    <album rank="1">
      <name>OK Computer</name>
      <playcount>123</playcount>
      <url>https://www.last.fm/music/Radiohead/OK+Computer</url>
      <artist>
        <name>Radiohead</name>
        <mbid>a74b1b7f-71a5-4011-9441-d0b5e4122711</mbid>
        <url>https://www.last.fm/music/Radiohead</url>
      </artist>
    </album>
  </topalbums>
</lfm>"#;

        let wrapper: TopAlbumsWrapper = quick_xml::de::from_str(body).unwrap();
        let album: TopAlbum = wrapper.topalbums.album.into_iter().next().unwrap().into();

        assert_eq!(album.name, "OK Computer");
        assert_eq!(album.rank, Some(1));
        assert_eq!(album.playcount, 123);
        assert_eq!(
            album.artist.mbid.as_deref(),
            Some("a74b1b7f-71a5-4011-9441-d0b5e4122711")
        );
        assert!(album.images.is_empty());
    }
}

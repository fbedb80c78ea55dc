//! Last.fm API response models

use serde::{Deserialize, Serialize};

/// A tag applied to an artist, with its usage weight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopTag {
    /// Tag name (e.g., "rock", "electronic")
    pub name: String,
    /// Tag count/weight
    pub count: Option<u32>,
    /// URL to Last.fm tag page
    pub url: Option<String>,
}

/// A tag listed in an artist's details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub url: Option<String>,
}

/// Artwork at one of the sizes Last.fm publishes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Size label ("small", "medium", "large", "extralarge", "mega")
    pub size: String,
    pub url: String,
}

/// Reference to an artist embedded in other records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistSummary {
    /// Artist name
    pub name: String,
    /// MusicBrainz ID (if available)
    pub mbid: Option<String>,
    /// URL to Last.fm artist page
    pub url: Option<String>,
}

/// Listening statistics for an artist
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistStats {
    pub listeners: u64,
    pub playcount: u64,
    /// Plays by the user named in the request, when one was given
    pub user_playcount: Option<u64>,
}

/// Artist biography
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Biography {
    pub published: Option<String>,
    /// Short HTML summary
    pub summary: String,
    /// Full HTML content
    pub content: String,
}

/// Artist metadata returned by `artist.getInfo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistInfo {
    /// Artist name (corrected when autocorrect was requested)
    pub name: String,
    /// MusicBrainz ID (if available)
    pub mbid: Option<String>,
    /// URL to Last.fm artist page
    pub url: Option<String>,
    pub images: Vec<Image>,
    /// Whether the artist is currently touring
    pub on_tour: bool,
    pub stats: ArtistStats,
    /// Similar artists, as listed on the artist page
    pub similar: Vec<ArtistSummary>,
    pub tags: Vec<Tag>,
    pub bio: Option<Biography>,
}

/// A similar artist from Last.fm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarArtist {
    /// Artist name
    pub name: String,
    /// MusicBrainz ID (if available)
    pub mbid: Option<String>,
    /// Similarity score (0.0 - 1.0)
    pub match_score: f64,
    /// URL to Last.fm artist page
    pub url: Option<String>,
}

/// An album from an artist's top albums chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopAlbum {
    pub name: String,
    pub mbid: Option<String>,
    pub url: Option<String>,
    pub playcount: u64,
    /// Chart position, starting at 1
    pub rank: Option<u32>,
    pub artist: ArtistSummary,
    pub images: Vec<Image>,
}

/// A track from an artist's top tracks chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopTrack {
    pub name: String,
    pub mbid: Option<String>,
    pub url: Option<String>,
    pub playcount: u64,
    pub listeners: u64,
    /// Chart position, starting at 1
    pub rank: Option<u32>,
    pub artist: ArtistSummary,
    pub images: Vec<Image>,
}

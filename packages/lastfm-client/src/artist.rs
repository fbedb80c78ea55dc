//! Artist resource client
//!
//! Wraps the `artist.*` family of Last.fm methods. Each operation maps its
//! arguments onto query parameters, executes the call and strips the
//! response envelope. When no envelope comes back (network failure, Last.fm
//! error, malformed body) the operation returns `None`; an artist with no
//! entries yields `Some(vec![])`.

use tracing::{debug, instrument};

use crate::client::LastfmClient;
use crate::models::{ArtistInfo, SimilarArtist, TopAlbum, TopTag, TopTrack};
use crate::request::MethodCall;
use crate::wrappers::{
    ArtistInfoWrapper, SimilarArtistsWrapper, TopAlbumsWrapper, TopTagsWrapper, TopTracksWrapper,
};

/// How an artist is identified in a call
///
/// A name lookup sends `artist`, an id lookup sends `mbid`; the two are
/// never sent together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtistRef {
    /// Free-text artist name
    Name(String),
    /// MusicBrainz artist id
    Mbid(String),
}

impl ArtistRef {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn mbid(mbid: impl Into<String>) -> Self {
        Self::Mbid(mbid.into())
    }

    /// Add the identifying parameter, plus `autocorrect` for name lookups
    fn apply<'a>(&self, call: MethodCall<'a>, autocorrect: bool) -> MethodCall<'a> {
        match self {
            Self::Name(name) => call
                .with_param("artist", name)
                .with_param("autocorrect", autocorrect),
            Self::Mbid(mbid) => call.with_param("mbid", mbid),
        }
    }
}

impl std::fmt::Display for ArtistRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{}", name),
            Self::Mbid(mbid) => write!(f, "mbid:{}", mbid),
        }
    }
}

/// Options for [`ArtistApi::top_tags`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopTagsOptions {
    /// Let Last.fm correct a misspelled artist name (default: off)
    pub autocorrect: bool,
}

impl TopTagsOptions {
    pub fn autocorrect(mut self, autocorrect: bool) -> Self {
        self.autocorrect = autocorrect;
        self
    }
}

/// Options for [`ArtistApi::info`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistInfoOptions {
    /// Let Last.fm correct a misspelled artist name; name lookups only (default: off)
    pub autocorrect: bool,
    /// Include this user's playcount in the stats (default: none)
    pub username: Option<String>,
    /// ISO 639 language for the biography (default: none, service language)
    pub lang: Option<String>,
}

impl ArtistInfoOptions {
    pub fn autocorrect(mut self, autocorrect: bool) -> Self {
        self.autocorrect = autocorrect;
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

/// Options for [`ArtistApi::top_albums`] and [`ArtistApi::top_tracks`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopListOptions {
    /// Page to fetch (default: none, the service starts at 1)
    pub page: Option<u32>,
    /// Entries per page (default: none, the service uses 50)
    pub limit: Option<u32>,
    /// Let Last.fm correct a misspelled artist name; name lookups only (default: off)
    pub autocorrect: bool,
}

impl TopListOptions {
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn autocorrect(mut self, autocorrect: bool) -> Self {
        self.autocorrect = autocorrect;
        self
    }
}

/// Options for [`ArtistApi::similar`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimilarOptions {
    /// Maximum number of similar artists (default: none, the service uses 100)
    pub limit: Option<u32>,
    /// Let Last.fm correct a misspelled artist name; name lookups only (default: off)
    pub autocorrect: bool,
}

impl SimilarOptions {
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn autocorrect(mut self, autocorrect: bool) -> Self {
        self.autocorrect = autocorrect;
        self
    }
}

/// Last.fm artist API
#[derive(Debug, Clone, Copy)]
pub struct ArtistApi<'a> {
    client: &'a LastfmClient,
}

impl<'a> ArtistApi<'a> {
    pub(crate) fn new(client: &'a LastfmClient) -> Self {
        Self { client }
    }

    pub(crate) fn top_tags_call(&self, artist: &str, options: &TopTagsOptions) -> MethodCall<'a> {
        self.client
            .method("artist.getTopTags")
            .with_param("artist", artist)
            .with_param("autocorrect", options.autocorrect)
    }

    pub(crate) fn info_call(
        &self,
        artist: &ArtistRef,
        options: &ArtistInfoOptions,
    ) -> MethodCall<'a> {
        artist
            .apply(self.client.method("artist.getInfo"), options.autocorrect)
            .with_param("username", &options.username)
            .with_param("lang", &options.lang)
    }

    pub(crate) fn top_albums_call(
        &self,
        artist: &ArtistRef,
        options: &TopListOptions,
    ) -> MethodCall<'a> {
        artist
            .apply(self.client.method("artist.getTopAlbums"), options.autocorrect)
            .with_param("page", options.page)
            .with_param("limit", options.limit)
    }

    pub(crate) fn top_tracks_call(
        &self,
        artist: &ArtistRef,
        options: &TopListOptions,
    ) -> MethodCall<'a> {
        artist
            .apply(self.client.method("artist.getTopTracks"), options.autocorrect)
            .with_param("page", options.page)
            .with_param("limit", options.limit)
    }

    pub(crate) fn similar_call(
        &self,
        artist: &ArtistRef,
        options: &SimilarOptions,
    ) -> MethodCall<'a> {
        artist
            .apply(self.client.method("artist.getSimilar"), options.autocorrect)
            .with_param("limit", options.limit)
    }

    /// Get the top tags for an artist, ordered by popularity
    ///
    /// Sends `artist` and `autocorrect` (`"0"` unless enabled).
    #[instrument(skip(self))]
    pub async fn top_tags(&self, artist: &str, options: &TopTagsOptions) -> Option<Vec<TopTag>> {
        let wrapper: TopTagsWrapper = self.top_tags_call(artist, options).execute().await?;
        let tags: Vec<TopTag> = wrapper.toptags.tag.into_iter().map(Into::into).collect();

        debug!(artist = %artist, tag_count = tags.len(), "Found artist tags");

        Some(tags)
    }

    /// Get the metadata for an artist, including biography
    ///
    /// A name lookup sends `artist` and `autocorrect`; an mbid lookup sends
    /// `mbid` only. `username` and `lang` are sent when set and non-empty.
    #[instrument(skip(self))]
    pub async fn info(
        &self,
        artist: &ArtistRef,
        options: &ArtistInfoOptions,
    ) -> Option<ArtistInfo> {
        let wrapper: ArtistInfoWrapper = self.info_call(artist, options).execute().await?;
        let info = ArtistInfo::from(wrapper.artist);

        debug!(artist = %artist, name = %info.name, "Found artist info");

        Some(info)
    }

    /// Get the top albums for an artist
    #[instrument(skip(self))]
    pub async fn top_albums(
        &self,
        artist: &ArtistRef,
        options: &TopListOptions,
    ) -> Option<Vec<TopAlbum>> {
        let wrapper: TopAlbumsWrapper = self.top_albums_call(artist, options).execute().await?;
        let albums: Vec<TopAlbum> = wrapper
            .topalbums
            .album
            .into_iter()
            .map(Into::into)
            .collect();

        debug!(artist = %artist, result_count = albums.len(), "Found top albums");

        Some(albums)
    }

    /// Get the top tracks for an artist
    #[instrument(skip(self))]
    pub async fn top_tracks(
        &self,
        artist: &ArtistRef,
        options: &TopListOptions,
    ) -> Option<Vec<TopTrack>> {
        let wrapper: TopTracksWrapper = self.top_tracks_call(artist, options).execute().await?;
        let tracks: Vec<TopTrack> = wrapper
            .toptracks
            .track
            .into_iter()
            .map(Into::into)
            .collect();

        debug!(artist = %artist, result_count = tracks.len(), "Found top tracks");

        Some(tracks)
    }

    /// Get artists similar to the given one, most similar first
    #[instrument(skip(self))]
    pub async fn similar(
        &self,
        artist: &ArtistRef,
        options: &SimilarOptions,
    ) -> Option<Vec<SimilarArtist>> {
        let wrapper: SimilarArtistsWrapper = self.similar_call(artist, options).execute().await?;
        let artists: Vec<SimilarArtist> = wrapper
            .similarartists
            .artist
            .into_iter()
            .map(Into::into)
            .collect();

        debug!(artist = %artist, result_count = artists.len(), "Found similar artists");

        Some(artists)
    }
}

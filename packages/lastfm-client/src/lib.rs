//! Typed Last.fm web service client
//!
//! This crate builds Last.fm method calls, executes them and unwraps the
//! response envelopes into plain records:
//! - Artist top tags, top albums and top tracks
//! - Artist metadata and biography
//! - Similar artist discovery
//!
//! Resource operations return `None` when the service produced no result.
//! The underlying [`MethodCall::try_execute`] keeps the failure cause for
//! callers that need to tell an empty answer from a failed call.
//!
//! # Example
//!
//! ```rust,no_run
//! use scrobblekit_lastfm_client::{ArtistInfoOptions, ArtistRef, LastfmClient, TopTagsOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = LastfmClient::new("your_api_key")?;
//! let artist = client.artist();
//!
//! // Get artist tags, correcting typos in the name
//! let options = TopTagsOptions::default().autocorrect(true);
//! for tag in artist.top_tags("Radiohaed", &options).await.unwrap_or_default() {
//!     println!("{}: {:?}", tag.name, tag.count);
//! }
//!
//! // Look up an artist by MusicBrainz id
//! let mbid = ArtistRef::mbid("a74b1b7f-71a5-4011-9441-d0b5e4122711");
//! if let Some(info) = artist.info(&mbid, &ArtistInfoOptions::default().lang("en")).await {
//!     println!("{} has {} listeners", info.name, info.stats.listeners);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Variables
//!
//! - `LASTFM_API_KEY`: API key for Last.fm (required by [`LastfmClient::from_env`])
//! - `LASTFM_API_URL`, `LASTFM_FORMAT`, `LASTFM_TIMEOUT`,
//!   `LASTFM_CONNECT_TIMEOUT`, `LASTFM_USER_AGENT`: optional overrides

mod artist;
mod client;
mod decode;
mod error;
mod models;
mod request;
mod wrappers;

pub use artist::{
    ArtistApi, ArtistInfoOptions, ArtistRef, SimilarOptions, TopListOptions, TopTagsOptions,
};
pub use client::{ApiKeyStatus, LastfmClient};
pub use error::{LastfmError, LastfmResult};
pub use models::{
    ArtistInfo, ArtistStats, ArtistSummary, Biography, Image, SimilarArtist, Tag, TopAlbum,
    TopTag, TopTrack,
};
pub use request::{MethodCall, ParamValue};
pub use scrobblekit_shared_config::{LastfmConfig, ResponseFormat};

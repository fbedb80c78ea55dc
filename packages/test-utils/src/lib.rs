//! Shared test utilities for the scrobblekit workspace
//!
//! This crate provides a mock Last.fm web service for testing without
//! network access, plus fixtures that render realistic response bodies.
//!
//! # Example
//!
//! ```rust,ignore
//! use scrobblekit_test_utils::{MockLastfmServer, TagFixture};
//!
//! #[tokio::test]
//! async fn test_with_mock() {
//!     let server = MockLastfmServer::start().await;
//!     server.mock_top_tags(&[TagFixture::new("rock", 100)]).await;
//!
//!     // Point the client at server.url() with server.api_key()
//! }
//! ```

mod lastfm;

pub use lastfm::{
    AlbumFixture, ArtistInfoFixture, MockLastfmServer, SimilarArtistFixture, TagFixture,
    TrackFixture,
};

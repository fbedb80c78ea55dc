use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use scrobblekit_lastfm_client::{
    ArtistInfoOptions, ArtistRef, LastfmClient, SimilarOptions, TopListOptions, TopTagsOptions,
};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Query Last.fm artist metadata from the command line
#[derive(Debug, Parser)]
#[command(name = "scrobblekit", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Top tags for an artist, most popular first
    TopTags {
        /// Artist name
        artist: String,
        #[arg(long)]
        autocorrect: bool,
    },
    /// Artist metadata and biography
    Info {
        #[command(flatten)]
        target: Target,
        /// Include this user's playcount
        #[arg(long)]
        username: Option<String>,
        /// Biography language (ISO 639)
        #[arg(long)]
        lang: Option<String>,
    },
    /// Top albums for an artist
    TopAlbums {
        #[command(flatten)]
        target: Target,
        #[command(flatten)]
        paging: Paging,
    },
    /// Top tracks for an artist
    TopTracks {
        #[command(flatten)]
        target: Target,
        #[command(flatten)]
        paging: Paging,
    },
    /// Similar artists
    Similar {
        #[command(flatten)]
        target: Target,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Check that LASTFM_API_KEY is accepted
    CheckKey,
}

#[derive(Debug, Args)]
struct Target {
    /// Artist name, or MusicBrainz id with --mbid
    artist: String,
    /// Treat the argument as a MusicBrainz id
    #[arg(long)]
    mbid: bool,
    /// Let Last.fm correct a misspelled name
    #[arg(long)]
    autocorrect: bool,
}

impl Target {
    fn artist_ref(&self) -> ArtistRef {
        if self.mbid {
            ArtistRef::mbid(&self.artist)
        } else {
            ArtistRef::name(&self.artist)
        }
    }
}

#[derive(Debug, Args)]
struct Paging {
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    limit: Option<u32>,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to serialize result")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scrobblekit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = LastfmClient::from_env().context("failed to create Last.fm client")?;
    let artist = client.artist();

    tracing::debug!(command = ?cli.command, "Running command");

    match cli.command {
        Command::TopTags {
            artist: name,
            autocorrect,
        } => {
            let options = TopTagsOptions::default().autocorrect(autocorrect);
            print_json(&artist.top_tags(&name, &options).await)?;
        }
        Command::Info {
            target,
            username,
            lang,
        } => {
            let options = ArtistInfoOptions {
                autocorrect: target.autocorrect,
                username,
                lang,
            };
            print_json(&artist.info(&target.artist_ref(), &options).await)?;
        }
        Command::TopAlbums { target, paging } => {
            let options = TopListOptions {
                page: paging.page,
                limit: paging.limit,
                autocorrect: target.autocorrect,
            };
            print_json(&artist.top_albums(&target.artist_ref(), &options).await)?;
        }
        Command::TopTracks { target, paging } => {
            let options = TopListOptions {
                page: paging.page,
                limit: paging.limit,
                autocorrect: target.autocorrect,
            };
            print_json(&artist.top_tracks(&target.artist_ref(), &options).await)?;
        }
        Command::Similar { target, limit } => {
            let options = SimilarOptions {
                limit,
                autocorrect: target.autocorrect,
            };
            print_json(&artist.similar(&target.artist_ref(), &options).await)?;
        }
        Command::CheckKey => {
            let status = client.validate_api_key().await;
            tracing::info!(status = ?status, "API key check finished");
            println!("{:?}", status);
        }
    }

    Ok(())
}

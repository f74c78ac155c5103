use blogadmin::model::BlogStatus;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "blogadmin")]
#[command(version, about = "Manage blog posts with soft delete and timed purge", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the post collection and blogadmin.toml
    #[arg(long, global = true, env = "BLOGADMIN_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new post
    #[command(alias = "n")]
    Create {
        /// Title of the post
        #[arg(short, long)]
        title: String,

        #[command(flatten)]
        fields: PostFields,
    },

    /// List posts
    #[command(alias = "ls")]
    List {
        /// Only posts whose title contains this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Only posts with this status (draft or published)
        #[arg(long)]
        status: Option<BlogStatus>,

        /// Page to show, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Show deleted posts waiting to be purged
        #[arg(long)]
        deleted: bool,
    },

    /// Show one post
    #[command(alias = "v")]
    Show {
        /// Id of the post
        id: String,
    },

    /// Edit a post
    #[command(alias = "e")]
    Edit {
        /// Id of the post
        id: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        #[command(flatten)]
        fields: PostFields,

        /// Remove the post's image
        #[arg(long, conflicts_with = "image")]
        clear_image: bool,
    },

    /// Delete a post (purged for good after the retention window)
    #[command(alias = "rm")]
    Delete {
        /// Id of the post
        id: String,
    },
}

/// Optional post fields shared by `create` and `edit`.
#[derive(Args, Debug, Default)]
pub struct PostFields {
    /// Post body
    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(short, long)]
    pub category: Option<String>,

    #[arg(short, long)]
    pub author: Option<String>,

    /// Path to a JPG or PNG image, inlined into the post
    #[arg(short, long)]
    pub image: Option<PathBuf>,

    /// Publish date (YYYY-MM-DD)
    #[arg(long)]
    pub publish_date: Option<String>,

    /// draft or published
    #[arg(long)]
    pub status: Option<BlogStatus>,
}

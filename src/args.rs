use clap::{Parser, Subcommand};
use github_client::{DEFAULT_GITHUB_URL, DEFAULT_UPLOAD_URL};
use secrecy::SecretString;
use std::path::PathBuf;
use std::{fmt::Display, str::FromStr};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// API OAuth access token
    #[clap(short, long, env)]
    pub api_token: Option<SecretString>,

    /// API base URL, ending with a slash
    #[clap(long, env, default_value = DEFAULT_GITHUB_URL)]
    pub api_url: String,

    /// Upload base URL, ending with a slash
    #[clap(long, env, default_value = DEFAULT_UPLOAD_URL)]
    pub upload_url: String,

    /// User-Agent header sent with every request
    #[clap(long, env)]
    pub user_agent: Option<String>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show core and search rate limits
    RateLimit,

    /// Show a user
    User {
        login: String,
    },

    /// GET a path relative to the API URL and print the response
    Get {
        path: String,

        /// Page to start from
        #[clap(long, parse(try_from_str=page_in_range))]
        page: Option<u32>,

        /// Items per page
        #[clap(long, parse(try_from_str=per_page_in_range))]
        per_page: Option<u32>,

        /// Follow `next` links until the last page
        #[clap(long)]
        all: bool,

        /// Print the body as received instead of pretty JSON
        #[clap(long)]
        raw: bool,
    },

    /// Upload a file to a path relative to the upload URL
    Upload {
        path: String,

        #[clap(short, long)]
        file: PathBuf,

        /// Content-Type of the file
        #[clap(short, long)]
        media_type: String,

        /// Asset name, defaults to the file name
        #[clap(short, long)]
        name: Option<String>,
    },
}

fn page_in_range(value: &str) -> clap::Result<u32, String> {
    number_in_range(value, 1, u32::MAX, "page".to_string())
}

fn per_page_in_range(value: &str) -> clap::Result<u32, String> {
    number_in_range(value, 1, 100, "per_page".to_string())
}

fn number_in_range<T>(value: &str, min: T, max: T, name: String) -> clap::Result<T, String>
where
    T: FromStr + PartialOrd + Display,
    <T as FromStr>::Err: Display,
{
    value.parse::<T>().map_err(|err| format!("{}", err)).and_then(|value| {
        if value < min || value > max {
            return Err(format!("{} is not in range {} .. {}.", name, min, max));
        }
        Ok(value)
    })
}

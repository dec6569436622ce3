mod args;

pub use args::{Args, Command};

use anyhow::Context;
use github_client::{add_options, GithubClient, GithubClientBuilder, ListOptions, Method, UploadOptions};
use github_types::{stringify, ReleaseAsset, User};
use log::{debug, info, warn};
use reqwest::header::{self, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Runs the command in `args`, writing its output to `out`.
pub async fn run<W: AsyncWrite + Unpin + Send>(args: Args, out: &mut W) -> anyhow::Result<()> {
    let client = client(&args)?;
    match args.command {
        Command::RateLimit => {
            let (limits, _) = client.rate_limits().await?;
            let core = limits.core.map(|rate| stringify(&rate)).unwrap_or_else(|| "-".to_string());
            let search = limits.search.map(|rate| stringify(&rate)).unwrap_or_else(|| "-".to_string());
            out.write_all(format!("core: {}\nsearch: {}\n", core, search).as_bytes()).await?;
        }
        Command::User { login } => {
            let request = client.new_request(Method::GET, &format!("users/{}", login))?;
            let (user, _): (User, _) = client.send_json(request).await?;
            out.write_all(format!("{}\n", user).as_bytes()).await?;
        }
        Command::Get {
            path,
            page,
            per_page,
            all,
            raw,
        } => get(&client, out, &path, ListOptions { page, per_page }, all, raw).await?,
        Command::Upload {
            path,
            file,
            media_type,
            name,
        } => {
            let name = match name {
                Some(name) => name,
                None => file
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .with_context(|| format!("{} has no file name", file.display()))?,
            };
            let reader = tokio::fs::File::open(&file)
                .await
                .with_context(|| format!("Cannot open {}", file.display()))?;
            let size = reader.metadata().await?.len();
            info!("Uploading {} ({} bytes) as {}", file.display(), size, name);
            let path = add_options(&path, &UploadOptions { name: Some(name) });
            let request = client.new_upload_request(&path, reader, size, &media_type)?;
            let (asset, _): (ReleaseAsset, _) = client.send_json(request).await?;
            out.write_all(format!("{}\n", asset).as_bytes()).await?;
        }
    }
    out.flush().await?;
    Ok(())
}

async fn get<W: AsyncWrite + Unpin + Send>(
    client: &GithubClient,
    out: &mut W,
    path: &str,
    mut options: ListOptions,
    all: bool,
    raw: bool,
) -> anyhow::Result<()> {
    loop {
        let request = client.new_request(Method::GET, &add_options(path, &options))?;
        let response = if raw {
            client.send_raw(request, &mut *out).await?
        } else {
            let (value, response): (serde_json::Value, _) = client.send_json(request).await?;
            let pretty = serde_json::to_string_pretty(&value)?;
            out.write_all(format!("{}\n", pretty).as_bytes()).await?;
            response
        };
        debug!("Pages: {:?}", response.pages);
        if let Some(rate) = response.rate {
            info!("Remaining requests: {}/{} until {}", rate.remaining, rate.limit, rate.reset);
        }
        let current = options.page.unwrap_or(1);
        match response.pages.next {
            Some(next) if all && next > current => options.page = Some(next),
            Some(next) if all => {
                warn!("Next page {} does not follow page {}, stopping", next, current);
                return Ok(());
            }
            _ => return Ok(()),
        }
    }
}

fn client(args: &Args) -> anyhow::Result<GithubClient> {
    let mut headers = HeaderMap::new();
    if let Some(token) = &args.api_token {
        headers.insert(header::AUTHORIZATION, authorization(token)?);
    }
    let http = reqwest::Client::builder().default_headers(headers).build()?;
    let mut builder = GithubClientBuilder::default()
        .with_http_client(http)
        .with_github_url(&args.api_url)
        .with_upload_url(&args.upload_url);
    if let Some(user_agent) = &args.user_agent {
        builder = builder.try_with_user_agent(user_agent)?;
    }
    Ok(builder.build()?)
}

fn authorization(token: &SecretString) -> anyhow::Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("token {}", token.expose_secret()))?;
    value.set_sensitive(true);
    Ok(value)
}

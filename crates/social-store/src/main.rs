//! social-feed: headless driver for the state core
//!
//! ```text
//! social-feed login <email>              password is read from stdin
//! social-feed feed [home|following|profile <id>] [--pages N]
//! social-feed notifications
//! social-feed logout
//! ```

use anyhow::{bail, Context, Result};
use social_api::{ReqwestApiClient, TokenResolver};
use social_config::{AppConfig, Session, SessionData};
use social_store::domain_models::{FeedKind, ProfileId};
use social_store::middleware::LoggingMiddleware;
use social_store::thunks::{self, SharedApi};
use social_store::{logger, AppState, Store};
use std::io::BufRead;
use std::sync::Arc;

#[derive(Debug, PartialEq)]
enum Command {
    Login { email: String },
    Feed { feed: FeedKind, pages: usize },
    Notifications,
    Logout,
}

fn parse_args(args: &[String]) -> Result<Command> {
    let mut args = args.iter().map(String::as_str);
    match args.next() {
        Some("login") => match args.next() {
            Some(email) => Ok(Command::Login {
                email: email.to_string(),
            }),
            None => bail!("usage: social-feed login <email>"),
        },
        Some("feed") => {
            let mut feed = FeedKind::Home;
            let mut pages = 1;
            while let Some(arg) = args.next() {
                match arg {
                    "home" => feed = FeedKind::Home,
                    "following" => feed = FeedKind::Following,
                    "profile" => {
                        let id = args.next().context("profile feed needs a profile id")?;
                        feed = FeedKind::Profile(ProfileId::new(id));
                    }
                    "--pages" => {
                        pages = args
                            .next()
                            .context("--pages needs a number")?
                            .parse()
                            .context("--pages needs a number")?;
                    }
                    other => bail!("unknown feed argument '{}'", other),
                }
            }
            Ok(Command::Feed { feed, pages })
        }
        Some("notifications") => Ok(Command::Notifications),
        Some("logout") => Ok(Command::Logout),
        Some(other) => bail!("unknown command '{}'", other),
        None => bail!("usage: social-feed <login|feed|notifications|logout>"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let log_file = logger::init()?;
    log::info!("Starting social-feed, logging to {}", log_file.display());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args)?;

    let config = AppConfig::load();
    let token = TokenResolver::new().resolve();
    let api: SharedApi = Arc::new(ReqwestApiClient::new(config.api_base_url.clone(), token)?);

    let store = Store::new(AppState::default());
    store.add_middleware(LoggingMiddleware::new());

    let result = run(command, &store, api, &config).await;
    if let Err(ref err) = result {
        log::error!("Command failed: {:#}", err);
    }
    log::info!("Exiting social-feed");
    result
}

async fn run(command: Command, store: &Store, api: SharedApi, config: &AppConfig) -> Result<()> {
    let page_size = config.page_size as usize;

    match command {
        Command::Login { email } => {
            let mut password = String::new();
            std::io::stdin()
                .lock()
                .read_line(&mut password)
                .context("Failed to read password from stdin")?;

            let auth = store
                .thunk(thunks::login(api, email, password.trim_end().to_string()))
                .await?;

            let mut session = Session::load();
            session.set_credentials(SessionData {
                access_token: Some(auth.access_token.clone()),
                refresh_token: auth.refresh_token.clone(),
                user_id: auth.user.as_ref().map(|u| u.id.clone()),
                profile_id: auth.user.as_ref().map(|u| u.profile_id().to_string()),
                expires_at: auth.expires_at,
            });
            session.save().context("Failed to save session")?;
            println!("Signed in");
        }
        Command::Feed { feed, pages } => {
            store.thunk(thunks::fetch_feed(api.clone(), feed, page_size)).await?;
            for _ in 1..pages {
                if store.thunk(thunks::load_more(api.clone(), page_size)).await?.is_none() {
                    break;
                }
            }

            let state = store.get_state();
            for post in &state.posts.items {
                let author = post
                    .author
                    .as_ref()
                    .and_then(|a| a.label())
                    .unwrap_or(post.author_id.as_str());
                println!(
                    "{}  {}  [+{} -{} 💬{}]",
                    author, post.content, post.like_count, post.dislike_count, post.comment_count
                );
            }
            if state.posts.has_more {
                println!("... more available");
            }
        }
        Command::Notifications => {
            let session = Session::load();
            store.thunk(thunks::load_current_user(api.clone(), session)).await?;
            store.thunk(thunks::fetch_notifications(api)).await?;

            let state = store.get_state();
            println!("{} unread", state.notifications.unread_count);
            for notification in &state.notifications.items {
                let marker = if notification.is_read { " " } else { "•" };
                println!(
                    "{} {}  {}",
                    marker,
                    notification.created_at.format("%Y-%m-%d %H:%M"),
                    notification.describe()
                );
            }
        }
        Command::Logout => {
            store.thunk(thunks::logout(api, None)).await?;
            let mut session = Session::load();
            session.clear();
            session.save().context("Failed to save session")?;
            println!("Signed out");
        }
    }
    Ok(())
}

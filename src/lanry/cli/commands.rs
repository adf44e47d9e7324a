//! # CLI Layer
//!
//! One UI client for lanry. This is the only place that:
//! - parses arguments
//! - touches stdout, stderr and stdin
//! - installs the log subscriber
//! - decides exit codes (via `main.rs`)
//!
//! Each `handle_*` calls one `LanryApi` method and prints its `CmdResult`.
//! The session is closed before returning so the active chapter is flushed.

use super::render::{print_chapter_list, print_chapter_texts, print_messages};
use super::setup::{Cli, Commands};
use chrono::Utc;
use clap::Parser;
use lanry::api::{LanryApi, UploadOptions};
use lanry::client::LanryClient;
use lanry::commands::export::default_archive_name;
use lanry::editor::{edit_chapter_text, get_editor};
use lanry::error::{LanryError, Result};
use lanry::init::{base_dir_from_env, initialize};
use lanry::store::fs_backend::FsBackend;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: LanryApi<FsBackend>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    let result = match cli.command {
        None | Some(Commands::List) => handle_list(&mut ctx),
        Some(Commands::Add { id, title }) => handle_add(&mut ctx, id, title.join(" ")),
        Some(Commands::View { ids }) => handle_view(&mut ctx, &ids),
        Some(Commands::Write { id, file }) => handle_write(&mut ctx, id, file),
        Some(Commands::Edit { id }) => handle_edit(&mut ctx, id),
        Some(Commands::Path { ids }) => handle_paths(&mut ctx, &ids),
        Some(Commands::Export { ids, output, plain }) => handle_export(&mut ctx, ids, output, plain),
        Some(Commands::Upload {
            id,
            novel,
            email,
            password,
            age_rating,
            publish_at,
            author_thoughts,
            volume,
        }) => {
            let options = UploadOptions {
                novel_id: novel,
                email,
                password,
                age_rating: age_rating.unwrap_or(ctx.api.config().default_age_rating),
                publish_at,
                author_thoughts,
                volume_id: volume,
            };
            handle_upload(&mut ctx, id, &options)
        }
        Some(Commands::Init) => handle_init(&ctx),
        Some(Commands::Config) => handle_config(&ctx),
    };

    if let Some(status) = ctx.api.close() {
        debug!(?status, "final flush");
    }
    result
}

/// Logs go to stderr. `RUST_LOG` wins; otherwise `-v` selects debug, default warn.
fn init_logging(verbose: bool) {
    let default = if verbose { "lanry=debug" } else { "lanry=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let base_dir = base_dir_from_env(cli.dir.as_deref())?;
    let ctx = initialize(&base_dir)?;
    Ok(AppContext { api: ctx.api })
}

fn handle_list(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.list_chapters()?;
    print_chapter_list(&result.listed_chapters);
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &mut AppContext, id: u32, title: String) -> Result<()> {
    let result = ctx.api.add_chapter(id, &title)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &mut AppContext, ids: &[u32]) -> Result<()> {
    let result = ctx.api.view_chapters(ids)?;
    print_chapter_texts(&result.chapter_texts);
    Ok(())
}

fn handle_write(ctx: &mut AppContext, id: u32, file: Option<PathBuf>) -> Result<()> {
    let content = match file {
        Some(path) => std::fs::read_to_string(&path)?,
        None => {
            let mut stdin = std::io::stdin();
            if stdin.is_terminal() {
                return Err(LanryError::Api(
                    "Nothing to write: pipe the chapter text in or pass --file".to_string(),
                ));
            }
            let mut buffer = String::new();
            stdin.read_to_string(&mut buffer)?;
            buffer
        }
    };

    let result = ctx.api.write_chapter(id, &content)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, id: u32) -> Result<()> {
    let editor = get_editor()?;
    let result = ctx
        .api
        .edit_chapter(id, |chapter, body| edit_chapter_text(&editor, chapter, body))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_paths(ctx: &mut AppContext, ids: &[u32]) -> Result<()> {
    let result = ctx.api.chapter_paths(ids)?;
    for path in &result.chapter_paths {
        println!("{}", path.display());
    }
    Ok(())
}

fn handle_export(
    ctx: &mut AppContext,
    ids: Vec<u32>,
    output: Option<PathBuf>,
    plain: bool,
) -> Result<()> {
    let result = if plain {
        let &[id] = ids.as_slice() else {
            return Err(LanryError::Api(
                "--plain exports exactly one chapter".to_string(),
            ));
        };
        let output = output.unwrap_or_else(|| PathBuf::from(format!("Chapter_{:03}.txt", id)));
        ctx.api.export_chapter_text(id, &output)?
    } else {
        let output = output.unwrap_or_else(|| PathBuf::from(default_archive_name(Utc::now())));
        ctx.api.export_chapters(&ids, &output)?
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_upload(ctx: &mut AppContext, id: u32, options: &UploadOptions) -> Result<()> {
    let client = LanryClient::from_config(ctx.api.config())?;
    let result = ctx.api.upload_chapter(&client, id, options)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.show_config()?;
    print_messages(&result.messages);
    Ok(())
}

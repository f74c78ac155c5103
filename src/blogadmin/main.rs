use blogadmin::api::{BlogApi, ListFilter};
use blogadmin::config::BlogConfig;
use blogadmin::error::{BlogError, Result};
use blogadmin::model::{parse_publish_date, BlogStatus, NewRecord, RecordPatch};
use blogadmin::store::fs_backend::FsBackend;
use blogadmin::store::RecordStore;
use blogadmin::validate::load_image;
use chrono::NaiveDate;
use clap::Parser;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

mod args;
mod render;
use args::{Cli, Commands, PostFields};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: BlogApi<FsBackend>,
    config: BlogConfig,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Create { title, fields }) => handle_create(&ctx, title, fields),
        Some(Commands::List {
            search,
            status,
            page,
            deleted,
        }) => handle_list(&ctx, search, status, page, deleted),
        Some(Commands::Show { id }) => handle_show(&ctx, &id),
        Some(Commands::Edit {
            id,
            title,
            fields,
            clear_image,
        }) => handle_edit(&ctx, &id, title, fields, clear_image),
        Some(Commands::Delete { id }) => handle_delete(&ctx, &id),
        None => handle_list(&ctx, None, None, 1, false),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    ProjectDirs::from("com", "blogadmin", "blogadmin")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| BlogError::Store("Could not determine data directory".to_string()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli)?;
    let config = BlogConfig::load(&data_dir)?;
    tracing::debug!(data_dir = %data_dir.display(), ?config, "starting");

    let store = RecordStore::with_backend(FsBackend::new(&data_dir))
        .with_key(config.storage_key.clone())
        .with_retention(config.retention());
    let api = BlogApi::new(store);

    Ok(AppContext { api, config })
}

fn handle_create(ctx: &AppContext, title: String, fields: PostFields) -> Result<()> {
    let image = match &fields.image {
        Some(path) => Some(inline_image(ctx, path)?),
        None => None,
    };
    let publish_date = match fields.publish_date.as_deref() {
        Some(raw) => parse_optional_date(raw)?,
        None => None,
    };

    let data = NewRecord {
        title,
        description: fields.description.unwrap_or_default(),
        category: fields.category.unwrap_or_default(),
        author: fields.author.unwrap_or_default(),
        image,
        publish_date,
        status: fields.status.unwrap_or_default(),
    };

    let result = ctx.api.create_post(data)?;
    for dr in &result.affected_records {
        println!("{}", dr.record.id);
    }
    render::print_messages(&result.messages);
    Ok(())
}

fn handle_list(
    ctx: &AppContext,
    search: Option<String>,
    status: Option<BlogStatus>,
    page: usize,
    deleted: bool,
) -> Result<()> {
    let filter = ListFilter {
        search,
        status,
        page,
        page_size: ctx.config.page_size(),
        deleted,
    };
    let result = ctx.api.list_posts(filter)?;
    render::print_records(&result.listed_records);
    if let Some(page) = &result.page {
        render::print_page(page);
    }
    render::print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, id: &str) -> Result<()> {
    let result = ctx.api.view_post(id)?;
    for dr in &result.listed_records {
        render::print_full_record(dr);
    }
    render::print_messages(&result.messages);
    Ok(())
}

fn handle_edit(
    ctx: &AppContext,
    id: &str,
    title: Option<String>,
    fields: PostFields,
    clear_image: bool,
) -> Result<()> {
    let image = if clear_image {
        Some(None)
    } else {
        match &fields.image {
            Some(path) => Some(Some(inline_image(ctx, path)?)),
            None => None,
        }
    };
    let publish_date = match fields.publish_date.as_deref() {
        Some(raw) => Some(parse_optional_date(raw)?),
        None => None,
    };

    let patch = RecordPatch {
        title,
        description: fields.description,
        category: fields.category,
        author: fields.author,
        image,
        publish_date,
        status: fields.status,
    };

    let result = ctx.api.update_post(id, &patch)?;
    render::print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &AppContext, id: &str) -> Result<()> {
    let result = ctx.api.delete_post(id)?;
    render::print_messages(&result.messages);
    Ok(())
}

fn inline_image(ctx: &AppContext, path: &Path) -> Result<String> {
    load_image(path, ctx.config.max_image_bytes)
}

// An empty date argument clears the field.
fn parse_optional_date(raw: &str) -> Result<Option<NaiveDate>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(parse_publish_date(raw)?))
}

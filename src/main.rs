mod logging;

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use embed_editor::{
    MAX_FIELDS, Session,
    form::{FieldInput, Form},
    storage::LocalStore,
};
use reqwest::Url;

const DEFAULT_PAGE_URL: &str = "http://localhost:8080/";

/// Discord WebHook Embed Editor
#[derive(Parser)]
struct Args {
    /// Directory the saved form is kept in (defaults to the local data directory)
    #[arg(long)]
    store_dir: Option<PathBuf>,

    /// Page URL that share links are built on
    #[arg(long, default_value = DEFAULT_PAGE_URL)]
    page_url: Url,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Edit the embed interactively (default)
    Edit {
        /// Share link to restore the form from
        #[arg(long)]
        url: Option<Url>,
    },

    /// Print the embed built from the given inputs
    Preview(FormArgs),

    /// Store the given inputs locally
    Save(FormArgs),

    /// Print the locally stored embed
    Load,

    /// Print a share link for the given inputs
    Share(FormArgs),

    /// Send the embed to the WebHook
    Send(FormArgs),
}

#[derive(ClapArgs)]
struct FormArgs {
    /// The Discord WebHook URL the embed is sent to
    #[arg(short, long, default_value = "")]
    webhook_url: String,

    #[arg(short, long, default_value = "")]
    title: String,

    #[arg(short, long, default_value = "")]
    description: String,

    /// `#rrggbb` or a decimal number
    #[arg(short, long, default_value = "#ffffff")]
    color: String,

    /// Footer icon image URL
    #[arg(short, long, default_value = "")]
    icon: String,

    /// Thumbnail image URL
    #[arg(long, default_value = "")]
    thumbnail: String,

    /// A field as `name=value`; may be repeated
    #[arg(short, long = "field", value_parser = parse_field)]
    fields: Vec<FieldInput>,
}

impl FormArgs {
    fn into_form(self) -> Result<Form> {
        let mut form = Form {
            webhook_url: self.webhook_url,
            title: self.title,
            description: self.description,
            color: self.color,
            icon_image: self.icon,
            thumbnail_image: self.thumbnail,
            ..Form::default()
        };
        for field in self.fields {
            form.fields
                .add(field)
                .with_context(|| format!("Too many fields (at most {MAX_FIELDS})"))?;
        }
        Ok(form)
    }
}

fn parse_field(arg: &str) -> Result<FieldInput, String> {
    arg.split_once('=')
        .map(|(name, value)| FieldInput::new(name, value))
        .ok_or_else(|| format!("expected `name=value`, got {arg:?}"))
}

/// Only the commands that save or load need this.
fn resolve_store(store_dir: Option<PathBuf>) -> Result<LocalStore> {
    let store = match store_dir {
        Some(dir) => LocalStore::new(dir),
        None => LocalStore::default_location()?,
    };
    log::debug!("Using store directory {}", store.dir().display());
    Ok(store)
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init();

    let stdout = io::stdout().lock();
    let page_url = args.page_url;
    let command = args.command.unwrap_or(Command::Edit { url: None });

    match command {
        Command::Edit { url } => {
            let store = resolve_store(args.store_dir)?;
            let mut session = Session::new(Form::default(), page_url, stdout)
                .with_store(store)
                .with_prompt();
            session.init()?;
            if let Some(url) = url {
                session.restore_from_url(&url)?;
            }
            session.run(io::stdin().lock())?;
        }
        Command::Preview(form) => {
            Session::new(form.into_form()?, page_url, stdout).refresh_preview()?;
        }
        Command::Save(form) => {
            let store = resolve_store(args.store_dir)?;
            Session::new(form.into_form()?, page_url, stdout)
                .with_store(store)
                .save()?;
        }
        Command::Load => {
            let store = resolve_store(args.store_dir)?;
            Session::new(Form::default(), page_url, stdout)
                .with_store(store)
                .load()?;
        }
        Command::Share(form) => {
            Session::new(form.into_form()?, page_url, stdout).share()?;
        }
        Command::Send(form) => {
            Session::new(form.into_form()?, page_url, stdout).send()?;
        }
    }

    io::stdout().flush().context("Could not flush stdout")?;
    Ok(())
}

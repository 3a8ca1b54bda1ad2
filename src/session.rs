use std::{
    fmt::Display,
    io::{BufRead, Write},
};

use anyhow::{Context, Result};
use colored::Colorize as _;
use reqwest::{Url, blocking::Client};

use crate::{
    FormData,
    discord::{self, Submission},
    form::{FieldInput, Form, Input},
    preview, share,
    storage::LocalStore,
};

const HELP: &str = "\
Commands:
  set <input> [text]         inputs: webhook, title, description, color, icon, thumbnail
  field add [name=value]     append a field (max 5)
  field remove <n>           remove field n
  field name <n> [text]      change the name of field n
  field value <n> [text]     change the value of field n
  preview                    show the embed
  save | load                store or restore the form locally
  share                      print a share link
  open <link>                restore the form from a share link
  send                       post the embed to the webhook
  quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Notice {
    Success,
    Failure,
}

/// An editing session over one [`Form`].
///
/// Every change to the form re-renders the preview. User-facing notices and
/// the preview go to `out`, diagnostics go to the log.
pub struct Session<W> {
    form: Form,
    store: Option<LocalStore>,
    page_url: Url,
    http_client: Option<Client>,
    share_url: Option<Url>,
    prompt: bool,
    out: W,
}

impl<W: Write> Session<W> {
    #[must_use]
    pub fn new(form: Form, page_url: Url, out: W) -> Self {
        Self {
            form,
            store: None,
            page_url,
            http_client: None,
            share_url: None,
            prompt: false,
            out,
        }
    }

    /// Without a store, `save` and `load` only report that nothing can be stored.
    #[must_use]
    pub fn with_store(mut self, store: LocalStore) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn with_http_client(mut self, http_client: Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Print `> ` before reading each command.
    #[must_use]
    pub fn with_prompt(mut self) -> Self {
        self.prompt = true;
        self
    }

    #[must_use]
    pub const fn form(&self) -> &Form {
        &self.form
    }

    /// The link produced by the last `share`.
    #[must_use]
    pub const fn share_url(&self) -> Option<&Url> {
        self.share_url.as_ref()
    }

    /// Makes sure there is at least one field pair and shows the preview.
    pub fn init(&mut self) -> Result<()> {
        if self.form.fields.is_empty() {
            // cannot hit the limit on an empty list
            let _ = self.form.fields.add(FieldInput::default());
        }
        self.refresh_preview()
    }

    pub fn run(&mut self, input: impl BufRead) -> Result<()> {
        let mut lines = input.lines();
        loop {
            if self.prompt {
                write!(self.out, "> ")?;
                self.out.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            let line = line.context("Could not read command")?;
            if self.execute(&line)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Runs one command line.
    ///
    /// # Errors
    /// Only output failures; bad commands are reported to the user instead.
    pub fn execute(&mut self, line: &str) -> Result<Flow> {
        let (command, rest) = split_word(line.trim());
        match command {
            "" => {}
            "set" => self.set_command(rest)?,
            "field" => self.field_command(rest)?,
            "preview" => self.refresh_preview()?,
            "save" => self.save()?,
            "load" => self.load()?,
            "share" => self.share()?,
            "open" => match Url::parse(rest) {
                Ok(url) => self.restore_from_url(&url)?,
                Err(e) => self.notify(Notice::Failure, format!("Invalid link: {e}"))?,
            },
            "send" => self.send()?,
            "help" => writeln!(self.out, "{HELP}")?,
            "quit" | "exit" => return Ok(Flow::Quit),
            other => {
                self.notify(Notice::Failure, format!("Unknown command {other:?}, try `help`"))?;
            }
        }
        Ok(Flow::Continue)
    }

    fn set_command(&mut self, rest: &str) -> Result<()> {
        let (name, value) = split_word(rest);
        match name.parse::<Input>() {
            Ok(input) => {
                self.form.set_input(input, value);
                self.refresh_preview()
            }
            Err(e) => self.notify(Notice::Failure, e),
        }
    }

    fn field_command(&mut self, rest: &str) -> Result<()> {
        let (action, rest) = split_word(rest);
        if action == "add" {
            let input = match rest.split_once('=') {
                Some((name, value)) => FieldInput::new(name, value),
                None => FieldInput::new(rest, ""),
            };
            return self.add_field(input);
        }

        let (index, text) = split_word(rest);
        let Some(index) = parse_index(index) else {
            return self.notify(Notice::Failure, format!("Invalid field number {index:?}"));
        };
        match action {
            "remove" => self.remove_field(index),
            "name" | "value" => {
                let Some(field) = self.form.fields.get_mut(index) else {
                    return self.notify(Notice::Failure, format!("There is no field {}", index + 1));
                };
                if action == "name" {
                    field.name = text.to_string();
                } else {
                    field.value = text.to_string();
                }
                self.refresh_preview()
            }
            _ => self.notify(Notice::Failure, format!("Unknown field action {action:?}")),
        }
    }

    pub fn add_field(&mut self, input: FieldInput) -> Result<()> {
        match self.form.fields.add(input) {
            Ok(_) => self.refresh_preview(),
            Err(e) => self.notify(Notice::Failure, e),
        }
    }

    /// Removes the field at the zero-based `index`.
    pub fn remove_field(&mut self, index: usize) -> Result<()> {
        if self.form.fields.remove(index).is_none() {
            return self.notify(Notice::Failure, format!("There is no field {}", index + 1));
        }
        self.refresh_preview()
    }

    pub fn refresh_preview(&mut self) -> Result<()> {
        let text = preview::render(&self.form.build_embed())?;
        writeln!(self.out, "{}", "--- preview ---".dimmed())?;
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    fn restore(&mut self, data: &FormData) -> Result<()> {
        self.form.set_form_data(data);
        self.refresh_preview()
    }

    /// Restores the form from the `data` parameter of a share link.
    ///
    /// Broken data is only logged; the form keeps its current values.
    pub fn restore_from_url(&mut self, url: &Url) -> Result<()> {
        match share::data_from_url(url) {
            Ok(Some(data)) => {
                self.restore(&data)?;
                log::info!("Restored form from URL parameter");
            }
            Ok(None) => log::debug!("URL has no {:?} parameter", share::DATA_PARAM),
            Err(e) => log::error!("Could not restore form from URL parameter: {e:#}"),
        }
        Ok(())
    }

    pub fn save(&mut self) -> Result<()> {
        let Some(store) = &self.store else {
            return self.notify(Notice::Failure, "No local storage available");
        };
        let data = self.form.collect_form_data();
        match store.save(&data) {
            Ok(()) => self.notify(Notice::Success, "Saved to local storage!"),
            Err(e) => {
                log::error!("{e:?}");
                self.notify(Notice::Failure, format!("Could not save: {e:#}"))
            }
        }
    }

    pub fn load(&mut self) -> Result<()> {
        let Some(store) = &self.store else {
            return self.notify(Notice::Failure, "No local storage available");
        };
        match store.load() {
            Ok(Some(data)) => {
                self.restore(&data)?;
                self.notify(Notice::Success, "Loaded from local storage!")
            }
            Ok(None) => self.notify(Notice::Failure, "No saved data"),
            Err(e) => {
                log::error!("{e:?}");
                self.notify(Notice::Failure, "Could not load saved data")
            }
        }
    }

    pub fn share(&mut self) -> Result<()> {
        let data = self.form.collect_form_data();
        let url = share::share_url(&self.page_url, &data)?;
        writeln!(self.out, "{url}")?;
        self.share_url = Some(url);
        Ok(())
    }

    pub fn send(&mut self) -> Result<()> {
        let data = self.form.collect_form_data();
        let http_client = self.http_client.get_or_insert_with(Client::new).clone();
        match discord::submit_with(http_client, &data) {
            Ok(Submission::MissingUrl) => {
                self.notify(Notice::Failure, "Please enter a webhook URL")
            }
            Ok(Submission::Sent) => self.notify(Notice::Success, "Sent successfully!"),
            Ok(outcome @ Submission::Rejected(_)) => {
                let reason = outcome.reason().unwrap_or_default();
                self.notify(Notice::Failure, format!("Send failed: {reason}"))
            }
            Err(e) => {
                log::error!("{e:?}");
                self.notify(Notice::Failure, format!("Send error: {e:#}"))
            }
        }
    }

    fn notify(&mut self, notice: Notice, message: impl Display) -> Result<()> {
        let message = message.to_string();
        let line = match notice {
            Notice::Success => message.as_str().green(),
            Notice::Failure => message.as_str().red(),
        };
        writeln!(self.out, "{line}")?;
        Ok(())
    }
}

fn split_word(string: &str) -> (&str, &str) {
    let string = string.trim_start();
    match string.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (string, ""),
    }
}

/// Turns a 1-based field number into an index.
fn parse_index(string: &str) -> Option<usize> {
    string.parse::<usize>().ok()?.checked_sub(1)
}

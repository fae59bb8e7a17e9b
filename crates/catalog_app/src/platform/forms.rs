//! One-shot `add-book` / `add-reader` commands.

use anyhow::{anyhow, bail, Context, Result};
use catalog_core::{BookDraft, ChoiceField, MutationReply, ReaderDraft, ADD_NEW};
use catalog_engine::{EngineEvent, EngineHandle, Mutation};
use catalog_logging::{catalog_info, catalog_warn};
use clap::Args;

use super::config::AppConfig;
use super::effects::map_reply;

#[derive(Debug, Clone, Args)]
pub struct BookArgs {
    #[arg(long)]
    pub inv_number: String,
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub author: String,
    #[arg(long, default_value = "")]
    pub isbn: String,
    /// Existing genre, or `add_new` together with --new-genre.
    #[arg(long, default_value = "")]
    pub genre: String,
    #[arg(long)]
    pub new_genre: Option<String>,
    #[arg(long, default_value = "")]
    pub publish_year: String,
    #[arg(long, default_value = "")]
    pub price: String,
    #[arg(long)]
    pub donation: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ReaderArgs {
    #[arg(long)]
    pub reader_no: String,
    #[arg(long)]
    pub full_name: String,
    #[arg(long, default_value = "")]
    pub city: String,
    #[arg(long, default_value = "")]
    pub address: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long, default_value = "")]
    pub email: String,
    /// Existing profession, or `add_new` together with --new-profession.
    #[arg(long, default_value = "")]
    pub profession: String,
    #[arg(long)]
    pub new_profession: Option<String>,
    /// Existing education, or `add_new` together with --new-education.
    #[arg(long, default_value = "")]
    pub education: String,
    #[arg(long)]
    pub new_education: Option<String>,
    #[arg(long, default_value = "")]
    pub gender: String,
    #[arg(long)]
    pub under_14: bool,
}

impl BookArgs {
    pub fn draft(&self) -> BookDraft {
        BookDraft {
            inv_number: self.inv_number.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            isbn: self.isbn.clone(),
            genre: choice(&self.genre, self.new_genre.as_deref()),
            publish_year: self.publish_year.clone(),
            price: self.price.clone(),
            is_donation: self.donation,
            cover_image: String::new(),
        }
    }
}

impl ReaderArgs {
    pub fn draft(&self) -> ReaderDraft {
        ReaderDraft {
            reader_no: self.reader_no.clone(),
            full_name: self.full_name.clone(),
            city: self.city.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            profession: choice(&self.profession, self.new_profession.as_deref()),
            education: choice(&self.education, self.new_education.as_deref()),
            gender: self.gender.clone(),
            is_under_14: self.under_14,
        }
    }
}

/// A `--new-*` value alone implies "add new".
fn choice(selected: &str, new_value: Option<&str>) -> ChoiceField {
    match new_value {
        Some(value) if selected.is_empty() || selected == ADD_NEW => ChoiceField::add_new(value),
        _ => ChoiceField::selected(selected),
    }
}

pub fn run_add_book(config: &AppConfig, args: &BookArgs) -> Result<()> {
    let messages = config.messages();
    let submission = args
        .draft()
        .to_submission()
        .map_err(|err| anyhow!(err.message(&messages)))?;
    let body = serde_json::to_value(&submission).context("encoding book")?;
    submit(config, Mutation::CreateBook(body))
}

pub fn run_add_reader(config: &AppConfig, args: &ReaderArgs) -> Result<()> {
    let messages = config.messages();
    let submission = args
        .draft()
        .to_submission()
        .map_err(|err| anyhow!(err.message(&messages)))?;
    let body = serde_json::to_value(&submission).context("encoding reader")?;
    submit(config, Mutation::CreateReader(body))
}

fn submit(config: &AppConfig, mutation: Mutation) -> Result<()> {
    let engine = EngineHandle::new(config.client_settings()).context("starting catalog engine")?;
    catalog_info!("Submitting {:?}", mutation);
    engine.mutate(mutation);

    let reply = match engine.recv_timeout(config.reply_timeout()) {
        Some(EngineEvent::MutationCompleted { result, .. }) => result.map(map_reply),
        Some(other) => bail!("unexpected engine event: {other:?}"),
        None => bail!("no reply from the catalog backend"),
    };

    match reply {
        Ok(reply) => report(reply),
        Err(err) => {
            catalog_warn!("Submission failed: {}", err);
            Err(anyhow::Error::new(err).context(config.messages().mutation_error))
        }
    }
}

fn report(reply: MutationReply) -> Result<()> {
    if reply.is_success() {
        println!("{}", reply.message);
        Ok(())
    } else {
        bail!("{}", reply.message)
    }
}

//! Form drafts for the book and reader dialogs.
//!
//! A draft holds raw field text as typed. Converting it to a submission
//! resolves "add new" choices and reports the first missing value.

use serde::{Deserialize, Serialize};

use crate::{ItemRecord, Messages};

/// Select-box value that switches a choice over to its free-text input.
pub const ADD_NEW: &str = "add_new";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChoiceField {
    pub selected: String,
    pub new_value: String,
}

impl ChoiceField {
    pub fn selected(value: impl Into<String>) -> Self {
        Self {
            selected: value.into(),
            new_value: String::new(),
        }
    }

    pub fn add_new(value: impl Into<String>) -> Self {
        Self {
            selected: ADD_NEW.to_string(),
            new_value: value.into(),
        }
    }

    pub fn wants_new_value(&self) -> bool {
        self.selected == ADD_NEW
    }

    /// `None` when "add new" is selected but nothing was typed.
    pub fn resolve(&self) -> Option<String> {
        if self.wants_new_value() {
            let value = self.new_value.trim();
            (!value.is_empty()).then(|| value.to_string())
        } else {
            Some(self.selected.clone())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    MissingGenre,
    MissingProfession,
    MissingEducation,
}

impl FormError {
    pub fn message(self, messages: &Messages) -> &'static str {
        match self {
            FormError::MissingGenre => messages.missing_genre,
            FormError::MissingProfession => messages.missing_profession,
            FormError::MissingEducation => messages.missing_education,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    InvNumber,
    Title,
    Author,
    Isbn,
    Genre,
    NewGenre,
    PublishYear,
    Price,
    IsDonation,
}

impl BookField {
    pub fn parse(name: &str) -> Option<Self> {
        let field = match name.trim().to_ascii_lowercase().as_str() {
            "inv_number" | "inv" => BookField::InvNumber,
            "title" => BookField::Title,
            "author" => BookField::Author,
            "isbn" => BookField::Isbn,
            "genre" => BookField::Genre,
            "new_genre" => BookField::NewGenre,
            "publish_year" | "year" => BookField::PublishYear,
            "price" => BookField::Price,
            "is_donation" | "donation" => BookField::IsDonation,
            _ => return None,
        };
        Some(field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookDraft {
    pub inv_number: String,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub genre: ChoiceField,
    pub publish_year: String,
    pub price: String,
    pub is_donation: bool,
    pub cover_image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSubmission {
    pub inv_number: String,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub genre: String,
    pub publish_year: String,
    pub price: String,
    pub is_donation: bool,
}

impl BookDraft {
    /// Missing values become empty fields, like a freshly reset form.
    pub fn from_record(record: &ItemRecord) -> Self {
        Self {
            inv_number: record.id.clone(),
            title: record.title.clone().unwrap_or_default(),
            author: record.author.clone().unwrap_or_default(),
            isbn: record.isbn.clone().unwrap_or_default(),
            genre: ChoiceField::selected(record.category.clone().unwrap_or_default()),
            publish_year: record.year.map(|y| y.to_string()).unwrap_or_default(),
            price: record.price.map(|p| p.to_string()).unwrap_or_default(),
            is_donation: record.is_donation,
            cover_image: record.cover_image.clone().unwrap_or_default(),
        }
    }

    pub fn set(&mut self, field: BookField, value: impl Into<String>) {
        let value = value.into();
        match field {
            BookField::InvNumber => self.inv_number = value,
            BookField::Title => self.title = value,
            BookField::Author => self.author = value,
            BookField::Isbn => self.isbn = value,
            BookField::Genre => self.genre.selected = value,
            BookField::NewGenre => self.genre.new_value = value,
            BookField::PublishYear => self.publish_year = value,
            BookField::Price => self.price = value,
            BookField::IsDonation => self.is_donation = parse_flag(&value),
        }
    }

    pub fn to_submission(&self) -> Result<BookSubmission, FormError> {
        let genre = self.genre.resolve().ok_or(FormError::MissingGenre)?;
        Ok(BookSubmission {
            inv_number: self.inv_number.trim().to_string(),
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            isbn: self.isbn.trim().to_string(),
            genre,
            publish_year: self.publish_year.trim().to_string(),
            price: self.price.trim().to_string(),
            is_donation: self.is_donation,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReaderDraft {
    pub reader_no: String,
    pub full_name: String,
    pub city: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub profession: ChoiceField,
    pub education: ChoiceField,
    pub gender: String,
    pub is_under_14: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderSubmission {
    pub reader_no: String,
    pub full_name: String,
    pub city: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub profession: String,
    pub education: String,
    pub gender: String,
    pub is_under_14: bool,
}

impl ReaderDraft {
    /// Profession is checked before education.
    pub fn to_submission(&self) -> Result<ReaderSubmission, FormError> {
        let profession = self
            .profession
            .resolve()
            .ok_or(FormError::MissingProfession)?;
        let education = self
            .education
            .resolve()
            .ok_or(FormError::MissingEducation)?;
        Ok(ReaderSubmission {
            reader_no: self.reader_no.trim().to_string(),
            full_name: self.full_name.trim().to_string(),
            city: self.city.trim().to_string(),
            address: self.address.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            profession,
            education,
            gender: self.gender.clone(),
            is_under_14: self.is_under_14,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationStatus {
    Success,
    Error,
}

/// Backend answer to a create/edit/delete. `message` is shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationReply {
    pub status: MutationStatus,
    pub message: String,
}

impl MutationReply {
    pub fn is_success(&self) -> bool {
        self.status == MutationStatus::Success
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    CreateBook,
    CreateReader,
    EditBook,
    DeleteBook,
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on" | "да"
    )
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    Bulgarian,
    English,
}

/// User-facing strings. Everything the controller shows goes through here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub no_results: &'static str,
    pub load_error: &'static str,
    pub item_load_error: &'static str,
    pub mutation_error: &'static str,
    pub available: &'static str,
    pub borrowed: &'static str,
    pub previous: &'static str,
    pub next: &'static str,
    pub edit: &'static str,
    pub delete: &'static str,
    pub delete_confirm: &'static str,
    pub missing_genre: &'static str,
    pub missing_profession: &'static str,
    pub missing_education: &'static str,
    pub columns: [&'static str; 7],
}

impl Messages {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::Bulgarian => Self::bulgarian(),
            Locale::English => Self::english(),
        }
    }

    pub fn bulgarian() -> Self {
        Self {
            no_results: "Няма намерени книги.",
            load_error: "Грешка при зареждане на книгите.",
            item_load_error: "Грешка при зареждане на данните за книгата.",
            mutation_error: "Възникна грешка при записа.",
            available: "Налична",
            borrowed: "Заета",
            previous: "Предишна",
            next: "Следваща",
            edit: "Редактирай",
            delete: "Изтрий",
            delete_confirm: "Сигурни ли сте, че искате да изтриете тази книга?",
            missing_genre: "Моля, въведете име за новия жанр.",
            missing_profession: "Моля, въведете нова професия.",
            missing_education: "Моля, въведете ново образование.",
            columns: [
                "Инв. №",
                "Заглавие",
                "Автор",
                "Жанр",
                "Година",
                "Наличност",
                "Действия",
            ],
        }
    }

    pub fn english() -> Self {
        Self {
            no_results: "No books found.",
            load_error: "Failed to load books.",
            item_load_error: "Failed to load the book details.",
            mutation_error: "The change could not be saved.",
            available: "Available",
            borrowed: "Borrowed",
            previous: "Previous",
            next: "Next",
            edit: "Edit",
            delete: "Delete",
            delete_confirm: "Are you sure you want to delete this book?",
            missing_genre: "Please enter a name for the new genre.",
            missing_profession: "Please enter a new profession.",
            missing_education: "Please enter a new education level.",
            columns: [
                "Inv. No",
                "Title",
                "Author",
                "Genre",
                "Year",
                "Availability",
                "Actions",
            ],
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::bulgarian()
    }
}

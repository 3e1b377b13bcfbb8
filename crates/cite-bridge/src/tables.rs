//! Static mapping tables between the record model and CSL.
//!
//! These tables are data, not behavior: the mapper walks them in order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source item types known to the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    Book,
    BookSection,
    JournalArticle,
    MagazineArticle,
    NewspaperArticle,
    Thesis,
    EncyclopediaArticle,
    DictionaryEntry,
    ConferencePaper,
    Letter,
    Manuscript,
    Interview,
    Film,
    Artwork,
    Webpage,
    Report,
    Bill,
    Case,
    Hearing,
    Patent,
    Statute,
    Email,
    Map,
    BlogPost,
    InstantMessage,
    ForumPost,
    AudioRecording,
    Presentation,
    VideoRecording,
    TvBroadcast,
    RadioBroadcast,
    Podcast,
    ComputerProgram,
    Document,
    Note,
    Attachment,
    /// Any item type name the tables do not recognize.
    Other,
}

impl ItemType {
    /// The record store's name for this item type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Book => "book",
            ItemType::BookSection => "bookSection",
            ItemType::JournalArticle => "journalArticle",
            ItemType::MagazineArticle => "magazineArticle",
            ItemType::NewspaperArticle => "newspaperArticle",
            ItemType::Thesis => "thesis",
            ItemType::EncyclopediaArticle => "encyclopediaArticle",
            ItemType::DictionaryEntry => "dictionaryEntry",
            ItemType::ConferencePaper => "conferencePaper",
            ItemType::Letter => "letter",
            ItemType::Manuscript => "manuscript",
            ItemType::Interview => "interview",
            ItemType::Film => "film",
            ItemType::Artwork => "artwork",
            ItemType::Webpage => "webpage",
            ItemType::Report => "report",
            ItemType::Bill => "bill",
            ItemType::Case => "case",
            ItemType::Hearing => "hearing",
            ItemType::Patent => "patent",
            ItemType::Statute => "statute",
            ItemType::Email => "email",
            ItemType::Map => "map",
            ItemType::BlogPost => "blogPost",
            ItemType::InstantMessage => "instantMessage",
            ItemType::ForumPost => "forumPost",
            ItemType::AudioRecording => "audioRecording",
            ItemType::Presentation => "presentation",
            ItemType::VideoRecording => "videoRecording",
            ItemType::TvBroadcast => "tvBroadcast",
            ItemType::RadioBroadcast => "radioBroadcast",
            ItemType::Podcast => "podcast",
            ItemType::ComputerProgram => "computerProgram",
            ItemType::Document => "document",
            ItemType::Note => "note",
            ItemType::Attachment => "attachment",
            ItemType::Other => "other",
        }
    }

    /// Map this item type to its CSL type.
    ///
    /// Hearings, statutes, audio recordings, podcasts and computer programs
    /// have no close CSL equivalent; their targets are approximations.
    pub fn csl_type(&self) -> CslType {
        match self {
            ItemType::Book => CslType::Book,
            ItemType::BookSection => CslType::Chapter,
            ItemType::JournalArticle => CslType::ArticleJournal,
            ItemType::MagazineArticle => CslType::ArticleMagazine,
            ItemType::NewspaperArticle => CslType::ArticleNewspaper,
            ItemType::Thesis => CslType::Thesis,
            ItemType::EncyclopediaArticle => CslType::Chapter,
            ItemType::DictionaryEntry => CslType::Chapter,
            ItemType::ConferencePaper => CslType::PaperConference,
            ItemType::Letter => CslType::PersonalCommunication,
            ItemType::Manuscript => CslType::Manuscript,
            ItemType::Interview => CslType::Interview,
            ItemType::Film => CslType::MotionPicture,
            ItemType::Artwork => CslType::Graphic,
            ItemType::Webpage => CslType::Webpage,
            ItemType::Report => CslType::Report,
            ItemType::Bill => CslType::Bill,
            ItemType::Case => CslType::LegalCase,
            ItemType::Hearing => CslType::Bill,
            ItemType::Patent => CslType::Patent,
            ItemType::Statute => CslType::Bill,
            ItemType::Email => CslType::PersonalCommunication,
            ItemType::Map => CslType::Map,
            ItemType::BlogPost => CslType::Webpage,
            ItemType::InstantMessage => CslType::PersonalCommunication,
            ItemType::ForumPost => CslType::Webpage,
            ItemType::AudioRecording => CslType::Song,
            ItemType::Presentation => CslType::Speech,
            ItemType::VideoRecording => CslType::MotionPicture,
            ItemType::TvBroadcast => CslType::Broadcast,
            ItemType::RadioBroadcast => CslType::Broadcast,
            ItemType::Podcast => CslType::Song,
            ItemType::ComputerProgram => CslType::Book,
            ItemType::Document | ItemType::Note | ItemType::Attachment | ItemType::Other => {
                CslType::Article
            }
        }
    }

    /// Periodical article types whose URL is dropped when they carry page numbers.
    pub fn is_paginated_periodical(&self) -> bool {
        matches!(
            self,
            ItemType::JournalArticle | ItemType::NewspaperArticle | ItemType::MagazineArticle
        )
    }
}

impl FromStr for ItemType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "book" => ItemType::Book,
            "bookSection" => ItemType::BookSection,
            "journalArticle" => ItemType::JournalArticle,
            "magazineArticle" => ItemType::MagazineArticle,
            "newspaperArticle" => ItemType::NewspaperArticle,
            "thesis" => ItemType::Thesis,
            "encyclopediaArticle" => ItemType::EncyclopediaArticle,
            "dictionaryEntry" => ItemType::DictionaryEntry,
            "conferencePaper" => ItemType::ConferencePaper,
            "letter" => ItemType::Letter,
            "manuscript" => ItemType::Manuscript,
            "interview" => ItemType::Interview,
            "film" => ItemType::Film,
            "artwork" => ItemType::Artwork,
            "webpage" => ItemType::Webpage,
            "report" => ItemType::Report,
            "bill" => ItemType::Bill,
            "case" => ItemType::Case,
            "hearing" => ItemType::Hearing,
            "patent" => ItemType::Patent,
            "statute" => ItemType::Statute,
            "email" => ItemType::Email,
            "map" => ItemType::Map,
            "blogPost" => ItemType::BlogPost,
            "instantMessage" => ItemType::InstantMessage,
            "forumPost" => ItemType::ForumPost,
            "audioRecording" => ItemType::AudioRecording,
            "presentation" => ItemType::Presentation,
            "videoRecording" => ItemType::VideoRecording,
            "tvBroadcast" => ItemType::TvBroadcast,
            "radioBroadcast" => ItemType::RadioBroadcast,
            "podcast" => ItemType::Podcast,
            "computerProgram" => ItemType::ComputerProgram,
            "document" => ItemType::Document,
            "note" => ItemType::Note,
            "attachment" => ItemType::Attachment,
            _ => ItemType::Other,
        })
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CSL item types produced by the mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CslType {
    Article,
    ArticleJournal,
    ArticleMagazine,
    ArticleNewspaper,
    Bill,
    Book,
    Broadcast,
    Chapter,
    Graphic,
    Interview,
    #[serde(rename = "legal_case")]
    LegalCase,
    Manuscript,
    Map,
    #[serde(rename = "motion_picture")]
    MotionPicture,
    PaperConference,
    Patent,
    #[serde(rename = "personal_communication")]
    PersonalCommunication,
    Report,
    Song,
    Speech,
    Thesis,
    Webpage,
}

impl CslType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CslType::Article => "article",
            CslType::ArticleJournal => "article-journal",
            CslType::ArticleMagazine => "article-magazine",
            CslType::ArticleNewspaper => "article-newspaper",
            CslType::Bill => "bill",
            CslType::Book => "book",
            CslType::Broadcast => "broadcast",
            CslType::Chapter => "chapter",
            CslType::Graphic => "graphic",
            CslType::Interview => "interview",
            CslType::LegalCase => "legal_case",
            CslType::Manuscript => "manuscript",
            CslType::Map => "map",
            CslType::MotionPicture => "motion_picture",
            CslType::PaperConference => "paper-conference",
            CslType::Patent => "patent",
            CslType::PersonalCommunication => "personal_communication",
            CslType::Report => "report",
            CslType::Song => "song",
            CslType::Speech => "speech",
            CslType::Thesis => "thesis",
            CslType::Webpage => "webpage",
        }
    }
}

impl fmt::Display for CslType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which half of the field map to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldForm {
    Long,
    Short,
}

/// A CSL text variable and the source fields that can supply it, in priority order.
pub type FieldMapping = (&'static str, &'static [&'static str]);

/// The CSL variable fed by the record's web locator.
pub const URL_VARIABLE: &str = "URL";

const LONG_FIELDS: &[FieldMapping] = &[
    ("title", &["title"]),
    // reporter and code belong in the base-field mapping of the store
    ("container-title", &["publicationTitle", "reporter", "code"]),
    ("collection-title", &["seriesTitle", "series"]),
    ("collection-number", &["seriesNumber"]),
    ("publisher", &["publisher", "distributor"]),
    ("publisher-place", &["place"]),
    ("authority", &["court"]),
    ("page", &["pages"]),
    ("volume", &["volume"]),
    ("issue", &["issue"]),
    ("number-of-volumes", &["numberOfVolumes"]),
    ("edition", &["edition"]),
    ("version", &["version"]),
    ("section", &["section"]),
    ("genre", &["type", "artworkSize"]),
    ("medium", &["medium"]),
    ("archive", &["archive"]),
    ("archive_location", &["archiveLocation"]),
    ("event", &["meetingName", "conferenceName"]),
    ("event-place", &["place"]),
    ("abstract", &["abstractNote"]),
    (URL_VARIABLE, &["url"]),
    ("DOI", &["DOI"]),
    ("ISBN", &["ISBN"]),
    ("call-number", &["callNumber"]),
    ("note", &["extra"]),
    ("number", &["number"]),
    ("references", &["history"]),
];

const SHORT_FIELDS: &[FieldMapping] = &[
    ("title", &["shortTitle", "title"]),
    ("container-title", &["journalAbbreviation"]),
    // lets subsequent citations of untitled items fall back to the genre
    ("genre", &["shortTitle", "type"]),
];

/// The text-variable field map for the given form.
pub fn field_map(form: FieldForm) -> &'static [FieldMapping] {
    match form {
        FieldForm::Long => LONG_FIELDS,
        FieldForm::Short => SHORT_FIELDS,
    }
}

/// Map a creator role to its CSL name variable.
pub fn name_variable(role: &str) -> Option<&'static str> {
    match role {
        "author" => Some("author"),
        "editor" => Some("editor"),
        "translator" => Some("translator"),
        "seriesEditor" => Some("collection-editor"),
        "bookAuthor" => Some("container-author"),
        _ => None,
    }
}

/// The role every item type's primary creator is normalized to.
pub const PRIMARY_ROLE: &str = "author";

/// CSL date variables and the source fields holding them.
pub const DATE_FIELDS: &[(&str, &str)] = &[("issued", "date"), ("accessed", "accessDate")];

/// Locator labels understood by citation engines.
///
/// The mapper does not read these. They are exported for callers that
/// build citation requests and need to validate a locator label first.
pub const LOCATOR_LABELS: &[&str] = &[
    "page",
    "book",
    "chapter",
    "column",
    "figure",
    "folio",
    "issue",
    "line",
    "note",
    "opus",
    "paragraph",
    "part",
    "section",
    "sub verbo",
    "volume",
    "verse",
];

/// Check whether `label` is a known locator label.
pub fn is_locator_label(label: &str) -> bool {
    LOCATOR_LABELS.contains(&label)
}

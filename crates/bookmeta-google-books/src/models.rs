//! Google Books volume schemas and their mapping to `Book`

use bookmeta_core::{authors_from_names, validate_isbn10, validate_isbn13, validate_url, Book, Url};
use serde::Deserialize;

/// Response of `/volumes`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VolumesResponse {
    pub total_items: u64,
    pub items: Option<Vec<Volume>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Volume {
    pub id: String,
    pub volume_info: VolumeInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VolumeInfo {
    pub title: String,
    #[allow(dead_code)]
    pub subtitle: Option<String>,
    pub authors: Option<Vec<String>>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub page_count: Option<f64>,
    pub image_links: Option<ImageLinks>,
    pub industry_identifiers: Option<Vec<IndustryIdentifier>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImageLinks {
    pub small_thumbnail: Option<String>,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IndustryIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub identifier: String,
}

/// Identifier of the first entry carrying `label` (`ISBN_10`, `ISBN_13`)
fn identifier_with_label<'a>(
    identifiers: &'a [IndustryIdentifier],
    label: &str,
) -> Option<&'a str> {
    identifiers
        .iter()
        .find(|id| id.kind == label)
        .map(|id| id.identifier.as_str())
}

/// Prefer the full thumbnail over the small one. Google serves images
/// over plain http, so the scheme is always upgraded to https.
pub(crate) fn cover_image_url(links: Option<&ImageLinks>) -> Option<Url> {
    let links = links?;
    let url = links
        .thumbnail
        .as_deref()
        .or(links.small_thumbnail.as_deref())?;
    validate_url(&url.replacen("http://", "https://", 1))
}

pub(crate) fn volume_to_book(volume: Volume) -> Option<Book> {
    let info = volume.volume_info;
    let identifiers = info.industry_identifiers.unwrap_or_default();
    let cover = cover_image_url(info.image_links.as_ref());

    let book = Book::new(info.title)?
        .with_authors(authors_from_names(info.authors.unwrap_or_default()))
        .with_publisher(info.publisher)
        .with_publish_date(info.published_date)
        .with_isbn10(identifier_with_label(&identifiers, "ISBN_10").and_then(validate_isbn10))
        .with_isbn13(identifier_with_label(&identifiers, "ISBN_13").and_then(validate_isbn13))
        .with_page_count(info.page_count)
        .with_cover_image_url(cover);

    Some(book)
}

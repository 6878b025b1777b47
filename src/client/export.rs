use crate::domain::model::CatalogItem;
use crate::utils::error::{ImdbError, Result};
use chrono::NaiveDate;
use csv::ByteRecord;
use reqwest::header::{HeaderMap, CONTENT_DISPOSITION};
use reqwest::Response;

const RATED_ON_FORMAT: &str = "%Y-%m-%d";

/// Column layout of an imdb export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// `Position,Const,Created,Modified,Description,Title,URL,Title Type,...`
    List,
    /// `Const,Your Rating,Date Rated,Title,URL,Title Type,...`
    Rating,
}

impl ExportKind {
    fn min_columns(self) -> usize {
        match self {
            ExportKind::List => 8,
            ExportKind::Rating => 6,
        }
    }
}

/// Decodes an export body. Row 0 is the header and is always dropped; any
/// bad row fails the whole export.
pub fn parse_export(kind: ExportKind, body: &[u8]) -> Result<Vec<CatalogItem>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body);

    let mut items = Vec::new();
    for (index, record) in reader.byte_records().enumerate() {
        let record = record
            .map_err(|e| ImdbError::malformed(format!("error reading imdb export: {}", e)))?;
        if index == 0 {
            continue;
        }
        if record.len() < kind.min_columns() {
            return Err(ImdbError::malformed(format!(
                "row {} has {} columns, expected at least {}",
                index,
                record.len(),
                kind.min_columns()
            )));
        }

        let item = match kind {
            ExportKind::List => {
                CatalogItem::unrated(column(&record, 1, index)?, column(&record, 7, index)?)
            }
            ExportKind::Rating => parse_rating_row(&record, index)?,
        };
        items.push(item);
    }

    Ok(items)
}

/// Only the columns the row is read from have to be UTF-8.
fn column(record: &ByteRecord, field: usize, index: usize) -> Result<&str> {
    let bytes = record.get(field).unwrap_or_default();
    std::str::from_utf8(bytes).map_err(|e| {
        ImdbError::malformed(format!(
            "column {} on row {} is not valid utf-8: {}",
            field, index, e
        ))
    })
}

fn parse_rating_row(record: &ByteRecord, index: usize) -> Result<CatalogItem> {
    let raw_value = column(record, 1, index)?;
    let value: u8 = raw_value.trim().parse().map_err(|e| {
        ImdbError::malformed(format!(
            "error parsing imdb rating value {:?} on row {}: {}",
            raw_value, index, e
        ))
    })?;
    if !(1..=10).contains(&value) {
        return Err(ImdbError::malformed(format!(
            "imdb rating value {} on row {} is outside 1-10",
            value, index
        )));
    }

    let raw_date = column(record, 2, index)?;
    let rated_on = NaiveDate::parse_from_str(raw_date.trim(), RATED_ON_FORMAT).map_err(|e| {
        ImdbError::malformed(format!(
            "error parsing imdb rating date {:?} on row {}: {}",
            raw_date, index, e
        ))
    })?;

    Ok(CatalogItem::rated(
        column(record, 0, index)?,
        column(record, 5, index)?,
        value,
        rated_on,
    ))
}

/// Display name of a list export, taken from its download filename.
pub fn list_name_from_headers(headers: &HeaderMap) -> Result<String> {
    let value = headers
        .get(CONTENT_DISPOSITION)
        .ok_or_else(|| {
            ImdbError::malformed("error reading header Content-Disposition from imdb response")
        })?
        .to_str()
        .map_err(|e| ImdbError::malformed(format!("Content-Disposition is not text: {}", e)))?;

    list_name_from_content_disposition(value)
}

pub fn list_name_from_content_disposition(value: &str) -> Result<String> {
    let filename = disposition_filename(value).ok_or_else(|| {
        ImdbError::malformed(format!("error parsing media type from header: {:?}", value))
    })?;

    let name = filename.split('.').next().unwrap_or_default();
    if name.is_empty() {
        return Err(ImdbError::malformed(format!(
            "export filename {:?} has no name part",
            filename
        )));
    }
    Ok(name.to_string())
}

fn disposition_filename(value: &str) -> Option<String> {
    let mut parts = split_params(value).into_iter();
    let disposition = parts.next()?;
    if disposition.is_empty() || disposition.contains(char::is_whitespace) {
        return None;
    }

    let mut plain = None;
    let mut extended = None;
    for part in parts {
        if part.is_empty() {
            continue;
        }
        let (key, raw) = part.split_once('=')?;
        match key.trim().to_ascii_lowercase().as_str() {
            "filename" => plain = Some(unquote(raw.trim())),
            "filename*" => extended = decode_ext_value(raw.trim()),
            _ => {}
        }
    }

    extended.or(plain).filter(|name| !name.is_empty())
}

/// Splits on `;` outside of quoted strings.
fn split_params(value: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut escaped = false;

    for c in value.chars() {
        if escaped {
            current.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' if quoted => {
                current.push(c);
                escaped = true;
            }
            '"' => {
                quoted = !quoted;
                current.push(c);
            }
            ';' if !quoted => parts.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(c),
        }
    }
    parts.push(current.trim().to_string());
    parts
}

fn unquote(raw: &str) -> String {
    match raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        Some(inner) => {
            let mut out = String::with_capacity(inner.len());
            let mut chars = inner.chars();
            while let Some(c) = chars.next() {
                if c == '\\' {
                    if let Some(next) = chars.next() {
                        out.push(next);
                    }
                } else {
                    out.push(c);
                }
            }
            out
        }
        None => raw.to_string(),
    }
}

/// RFC 5987 `charset'lang'percent-encoded`; only UTF-8 is accepted.
fn decode_ext_value(raw: &str) -> Option<String> {
    let mut pieces = raw.splitn(3, '\'');
    let charset = pieces.next()?;
    let _language = pieces.next()?;
    let encoded = pieces.next()?;
    if !charset.eq_ignore_ascii_case("utf-8") {
        return None;
    }

    urlencoding::decode(encoded).ok().map(|name| name.into_owned())
}

/// Reads a list export response into its display name and items.
pub async fn read_list_export(response: Response) -> Result<(String, Vec<CatalogItem>)> {
    let name = list_name_from_headers(response.headers())?;
    let body = response.bytes().await?;
    let items = parse_export(ExportKind::List, &body)?;
    Ok((name, items))
}

pub async fn read_rating_export(response: Response) -> Result<Vec<CatalogItem>> {
    let body = response.bytes().await?;
    parse_export(ExportKind::Rating, &body)
}

/// Turns a list display name into the slug used on the sync target:
/// lower-case, words joined by `-`, anything outside `[a-z0-9-]` removed.
pub fn format_slug(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    const LIST_EXPORT: &str = "\
Position,Const,Created,Modified,Description,Title,URL,Title Type,IMDb Rating
1,tt0111161,2021-01-01,2021-01-01,,The Shawshank Redemption,https://www.imdb.com/title/tt0111161/,movie,9.3
2,tt0903747,2021-01-02,2021-01-02,,\"Breaking Bad\",https://www.imdb.com/title/tt0903747/,tvSeries,9.5
";

    const RATING_EXPORT: &str = "\
Const,Your Rating,Date Rated,Title,URL,Title Type
tt0111161,9,2020-05-01,,,movie
tt0068646,10,2019-12-24,The Godfather,https://www.imdb.com/title/tt0068646/,movie
";

    #[test]
    fn test_list_mode_reads_id_and_type() {
        let items = parse_export(ExportKind::List, LIST_EXPORT.as_bytes()).unwrap();
        assert_eq!(
            items,
            vec![
                CatalogItem::unrated("tt0111161", "movie"),
                CatalogItem::unrated("tt0903747", "tvSeries"),
            ]
        );
        assert!(items.iter().all(|i| i.rating.is_none()));
    }

    #[test]
    fn test_header_row_always_dropped() {
        // Header row shaped like data must still be skipped.
        let body = "0,tt0000001,a,b,c,d,e,movie\n1,tt0000002,a,b,c,d,e,short\n";
        let items = parse_export(ExportKind::List, body.as_bytes()).unwrap();
        assert_eq!(items, vec![CatalogItem::unrated("tt0000002", "short")]);

        let header_only = "Position,Const,Created,Modified,Description,Title,URL,Title Type\n";
        assert!(parse_export(ExportKind::List, header_only.as_bytes())
            .unwrap()
            .is_empty());
        assert!(parse_export(ExportKind::List, b"").unwrap().is_empty());
    }

    #[test]
    fn test_rating_mode_row() {
        let items = parse_export(ExportKind::Rating, RATING_EXPORT.as_bytes()).unwrap();
        assert_eq!(items.len(), 2);
        let first = &items[0];
        assert_eq!(first.external_id, "tt0111161");
        assert_eq!(first.title_type, "movie");
        assert_eq!(first.rating(), Some(9));
        assert_eq!(first.rated_on(), NaiveDate::from_ymd_opt(2020, 5, 1));
        assert!(items
            .iter()
            .all(|i| i.rating().is_some() == i.rated_on().is_some()));
    }

    #[test]
    fn test_lenient_quotes_and_ragged_rows() {
        let body = "h\n1,tt01,x,y,a \"quoted\" word,T,u,movie,extra,more\n2,tt02,x,y,,T,u,short\n";
        let items = parse_export(ExportKind::List, body.as_bytes()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].external_id, "tt01");
        assert_eq!(items[1].title_type, "short");
    }

    #[test]
    fn test_short_row_is_malformed() {
        let body = "h\n1,tt01,x\n";
        let err = parse_export(ExportKind::List, body.as_bytes()).unwrap_err();
        assert!(matches!(err, ImdbError::MalformedExportError { .. }));
    }

    #[test]
    fn test_non_utf8_in_unread_column_is_ignored() {
        let body = b"h\n1,tt02,x,y,Caf\xE9,T,u,movie\n";
        let items = parse_export(ExportKind::List, body).unwrap();
        assert_eq!(items, vec![CatalogItem::unrated("tt02", "movie")]);
    }

    #[test]
    fn test_non_utf8_in_id_column_is_malformed() {
        let body = b"h\n1,tt\xE902,x,y,z,T,u,movie\n";
        let err = parse_export(ExportKind::List, body).unwrap_err();
        assert!(matches!(err, ImdbError::MalformedExportError { .. }));
    }

    #[test]
    fn test_bad_rating_value_fails_whole_export() {
        let body = "h\ntt01,9,2020-05-01,,,movie\ntt02,nine,2020-05-01,,,movie\n";
        let err = parse_export(ExportKind::Rating, body.as_bytes()).unwrap_err();
        assert!(matches!(err, ImdbError::MalformedExportError { .. }));

        let out_of_range = "h\ntt01,11,2020-05-01,,,movie\n";
        assert!(parse_export(ExportKind::Rating, out_of_range.as_bytes()).is_err());
    }

    #[test]
    fn test_bad_rating_date_fails() {
        let body = "h\ntt01,9,01/05/2020,,,movie\n";
        let err = parse_export(ExportKind::Rating, body.as_bytes()).unwrap_err();
        assert!(matches!(err, ImdbError::MalformedExportError { .. }));
    }

    #[test]
    fn test_list_name_from_quoted_filename() {
        let name =
            list_name_from_content_disposition("attachment; filename=\"Sci-Fi Favourites.csv\"")
                .unwrap();
        assert_eq!(name, "Sci-Fi Favourites");
    }

    #[test]
    fn test_list_name_takes_segment_before_first_dot() {
        let name = list_name_from_content_disposition("attachment; filename=Vol.2 picks.csv")
            .unwrap();
        assert_eq!(name, "Vol");
    }

    #[test]
    fn test_list_name_quoted_semicolon() {
        let name =
            list_name_from_content_disposition("attachment; filename=\"Watch; Later.csv\"; size=10")
                .unwrap();
        assert_eq!(name, "Watch; Later");
    }

    #[test]
    fn test_list_name_extended_filename() {
        let name = list_name_from_content_disposition(
            "attachment; filename=\"fallback.csv\"; filename*=UTF-8''Caf%C3%A9%20Nights.csv",
        )
        .unwrap();
        assert_eq!(name, "Café Nights");
    }

    #[test]
    fn test_extended_filename_keeps_plus_and_broken_escapes_literal() {
        let name = list_name_from_content_disposition(
            "attachment; filename*=UTF-8''Rock+Roll%+1.csv",
        )
        .unwrap();
        assert_eq!(name, "Rock+Roll%+1");
        assert!(!name.contains('\u{1}'));
    }

    #[test]
    fn test_list_name_missing_or_broken_header() {
        assert!(list_name_from_headers(&HeaderMap::new()).is_err());
        assert!(list_name_from_content_disposition("attachment").is_err());
        assert!(list_name_from_content_disposition("attachment; filename").is_err());
        assert!(list_name_from_content_disposition("").is_err());

        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_DISPOSITION,
            HeaderValue::from_static("attachment; filename=\"ls1.csv\""),
        );
        assert_eq!(list_name_from_headers(&headers).unwrap(), "ls1");
    }

    #[test]
    fn test_format_slug_examples() {
        assert_eq!(format_slug("Sci-Fi Favourites!"), "sci-fi-favourites");
        assert_eq!(format_slug("  My   List  "), "my-list");
        assert_eq!(format_slug("Top 10 (2023)"), "top-10-2023");
        assert_eq!(format_slug("Café Nights"), "caf-nights");
        assert_eq!(format_slug(""), "");
    }

    #[test]
    fn test_format_slug_idempotent_and_charset() {
        let inputs = [
            "Sci-Fi Favourites!",
            "  My   List  ",
            "ÀÉÎ mixed_Case\tTabs\nNewlines",
            "--already-a-slug--",
            "émoji 🎬 night",
        ];
        for input in inputs {
            let once = format_slug(input);
            assert_eq!(format_slug(&once), once);
            assert!(once
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }
    }
}

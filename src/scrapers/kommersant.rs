//! Kommersant rubric archive scraper.
//!
//! The site publishes one archive listing per rubric and calendar day at
//! `/archive/rubric/<id>/day/<YYYY-MM-DD>/`. Each teaser on that page is an
//! `<article>` element carrying the headline and a relative link in `data-*`
//! attributes, with the publication label in a `p.uho__tag` child.
//!
//! # URL Pattern
//!
//! Links on the listing keep the `/day/` segment of the listing path. The
//! article page itself lives at the same path with that segment removed, see
//! [`canonical_article_url`].
//!
//! # Article Text
//!
//! Article paragraphs are `p.doc__text`; lead paragraphs additionally carry
//! `doc__intro`. The body selector therefore matches the intro as well, and
//! by default the intro is repeated at the start of the body.

use crate::config::HarvestConfig;
use crate::error::HarvestError;
use crate::models::ArticleSummary;
use crate::scrapers::{Listing, SeenUrls};
use crate::utils::{element_text, join_texts, strip_path_segment};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument};
use url::Url;

static LISTING_ITEM: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("article.uho.rubric_lenta__item.js-article").expect("listing item selector")
});
static LISTING_DATE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p.uho__tag").expect("listing date selector"));
static INTRO_PARAGRAPH: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p.doc__text.doc__intro").expect("intro selector"));
static BODY_PARAGRAPH: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p.doc__text").expect("body selector"));

const TITLE_ATTR: &str = "data-article-title";
const URL_ATTR: &str = "data-article-url";
const INTRO_CLASS: &str = "doc__intro";
const LISTING_ONLY_SEGMENT: &str = "day";

/// Fetch one day's archive listing and return the summaries not yet seen.
///
/// A non-success status yields [`Listing::NotFound`]; every new URL is added
/// to `seen` before it is returned.
#[instrument(level = "info", skip(client, config, seen))]
pub async fn index_day(
    client: &Client,
    config: &HarvestConfig,
    date: NaiveDate,
    seen: &mut SeenUrls,
) -> Result<Listing, HarvestError> {
    let listing_url = config.listing_url(date)?;
    let response = client.get(listing_url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
        debug!(%listing_url, %status, "Listing request did not succeed");
        return Ok(Listing::NotFound {
            status: status.as_u16(),
        });
    }

    let html = response.text().await?;
    let summaries = parse_listing(&html, &config.base()?, listing_url.as_str())?;
    let listed = summaries.len();

    let fresh: Vec<ArticleSummary> = summaries
        .into_iter()
        .filter(|s| seen.insert(&s.url))
        .collect();

    info!(
        listed,
        new = fresh.len(),
        seen_total = seen.len(),
        "Indexed archive listing"
    );
    Ok(Listing::Found(fresh))
}

/// Read every teaser on a listing page, in document order.
///
/// Hrefs are resolved against `base`. `page_url` is only used in errors.
pub fn parse_listing(
    html: &str,
    base: &Url,
    page_url: &str,
) -> Result<Vec<ArticleSummary>, HarvestError> {
    let document = Html::parse_document(html);
    document
        .select(&LISTING_ITEM)
        .map(|item| parse_listing_item(item, base, page_url))
        .collect()
}

fn parse_listing_item(
    item: ElementRef<'_>,
    base: &Url,
    page_url: &str,
) -> Result<ArticleSummary, HarvestError> {
    let missing = |what| HarvestError::MalformedListing {
        url: page_url.to_string(),
        missing: what,
    };

    let title = item.value().attr(TITLE_ATTR).ok_or_else(|| missing(TITLE_ATTR))?;
    let date_label = item
        .select(&LISTING_DATE)
        .next()
        .map(element_text)
        .ok_or_else(|| missing("p.uho__tag"))?;
    let href = item.value().attr(URL_ATTR).ok_or_else(|| missing(URL_ATTR))?;
    let url = base.join(href).map_err(|source| HarvestError::InvalidUrl {
        url: href.to_string(),
        source,
    })?;

    Ok(ArticleSummary {
        title: title.to_string(),
        date_label,
        url: url.to_string(),
    })
}

/// Article page URL for a link taken from the archive listing.
pub fn canonical_article_url(listing_link: &str) -> String {
    strip_path_segment(listing_link, LISTING_ONLY_SEGMENT)
}

/// Download an article page and extract its text.
#[instrument(level = "info", skip(client))]
pub async fn fetch_article(
    client: &Client,
    url: &str,
    exclude_intro_from_body: bool,
) -> Result<String, HarvestError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(HarvestError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.text().await?;
    let content = extract_content(&body, exclude_intro_from_body);
    debug!(bytes = content.len(), "Parsed article");
    Ok(content)
}

/// Intro text, a blank line, then body text. Body alone when there is no intro.
pub fn extract_content(html: &str, exclude_intro_from_body: bool) -> String {
    let document = Html::parse_document(html);

    let intro = join_texts(document.select(&INTRO_PARAGRAPH));
    let body = join_texts(document.select(&BODY_PARAGRAPH).filter(|p| {
        !exclude_intro_from_body || !p.value().classes().any(|c| c == INTRO_CLASS)
    }));

    if intro.is_empty() {
        body
    } else {
        format!("{intro}\n\n{body}")
    }
}

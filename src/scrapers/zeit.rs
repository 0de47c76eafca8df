//! DIE ZEIT issue index scraper.
//!
//! Each print issue has an XML index at `http://xml.zeit.de/<year>/<week>/index`.
//! The index groups articles into `<region title="...">` sections; every
//! `<container>` in a region is one article, described by the attributes and
//! children of its first `<block>`:
//!
//! ```text
//! <region title="Politik">
//!   <container>
//!     <block href="http://xml.zeit.de/2019/49/spd-vorsitz" ressort="politik"
//!            contenttype="article" author="A. Example;B. Other" genre="kommentar">
//!       <supertitle>SPD</supertitle>
//!       <title>Neue Spitze</title>
//!     </block>
//!   </container>
//! </region>
//! ```
//!
//! The documents declare ISO-8859-1, so bodies are decoded byte-for-byte as
//! Latin-1 rather than UTF-8.

use crate::error::{Error, Result};
use crate::models::ArticleRecord;
use crate::utils::{normalize_text, truncate_for_log};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::borrow::Cow;
use tracing::{debug, info, instrument, warn};

/// Base endpoint of the XML article metadata service.
pub const DEFAULT_BASE_URL: &str = "http://xml.zeit.de/";

/// Issues fetched when none are configured.
pub const DEFAULT_ISSUES: [&str; 2] = ["2019/49", "2019/51"];

const CONTAINER_LOG_LIMIT: usize = 300;

/// A self-closed start tag such as `<supertitle/>` or `<block href="..." />`.
static EMPTY_ELEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"<([A-Za-z][A-Za-z0-9:._-]*)((?:\s+[^\s=/>]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'>]+))?)*)\s*/>"#,
    )
    .expect("static regex")
});

/// HTML void elements; the HTML parser already treats these as empty.
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

static REGION: Lazy<Selector> = Lazy::new(|| sel("region[title]"));
static CONTAINER: Lazy<Selector> = Lazy::new(|| sel("container"));
static BLOCK: Lazy<Selector> = Lazy::new(|| sel("block"));
static SUPERTITLE: Lazy<Selector> = Lazy::new(|| sel("supertitle"));
static TITLE: Lazy<Selector> = Lazy::new(|| sel("title"));

fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Build the index URL for an issue: `<base><issue>/index`.
///
/// Plain concatenation; `base_url` is expected to end with `/`.
pub fn index_url(base_url: &str, issue: &str) -> String {
    format!("{base_url}{issue}/index")
}

/// Decode a body as ISO-8859-1, one character per byte.
pub fn decode_latin1(bytes: &[u8]) -> String {
    encoding_rs::mem::decode_latin1(bytes).into_owned()
}

/// Rewrite XML empty-element tags (`<tag .../>`) to an explicit open/close
/// pair.
///
/// The HTML parser ignores `/>` on non-void elements, which would leave
/// `<supertitle/>` or `<block .../>` open and nest the following siblings
/// inside them.
pub fn expand_empty_elements(raw: &str) -> Cow<'_, str> {
    EMPTY_ELEMENT.replace_all(raw, |caps: &Captures<'_>| {
        let name = &caps[1];
        if VOID_ELEMENTS.contains(&name.to_ascii_lowercase().as_str()) {
            caps[0].to_string()
        } else {
            format!("<{name}{}></{name}>", &caps[2])
        }
    })
}

/// Fetch the raw index document for one issue.
///
/// Transport failures and non-success statuses are returned as
/// [`Error::Fetch`]; nothing is retried.
#[instrument(level = "info", skip(client, base_url))]
pub async fn fetch_index(client: &Client, base_url: &str, issue: &str) -> Result<String> {
    let url = index_url(base_url, issue);
    let fetch_err = |source| Error::Fetch {
        issue: issue.to_string(),
        source,
    };

    info!(%url, "Fetching issue index");
    let bytes = client
        .get(&url)
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(fetch_err)?
        .bytes()
        .await
        .map_err(fetch_err)?;

    debug!(%url, bytes = bytes.len(), "Fetched issue index");
    Ok(decode_latin1(&bytes))
}

/// Extract one [`ArticleRecord`] per article container in an index document.
///
/// Empty-element tags are expanded first (see [`expand_empty_elements`]).
/// Sections are `region` elements that carry a `title` attribute and have at
/// least one child element. A container with several blocks is logged and
/// read from its first block; a container with none, or a block without
/// `supertitle`/`title` children, fails the whole issue.
#[instrument(level = "info", skip(raw))]
pub fn parse_index(raw: &str, issue: &str) -> Result<Vec<ArticleRecord>> {
    let document = Html::parse_document(&expand_empty_elements(raw));
    let mut articles = Vec::new();

    let sections = document
        .select(&REGION)
        .filter(|region| region.children().any(|child| child.value().is_element()));

    for region in sections {
        let section = region.value().attr("title").unwrap_or_default();
        for container in region.select(&CONTAINER) {
            articles.push(parse_container(container, section, issue)?);
        }
    }

    info!(count = articles.len(), "Parsed issue index");
    Ok(articles)
}

fn parse_container(container: ElementRef<'_>, section: &str, issue: &str) -> Result<ArticleRecord> {
    let mut blocks = container.select(&BLOCK);
    let Some(block) = blocks.next() else {
        return Err(Error::NoBlock {
            issue: issue.to_string(),
            section: section.to_string(),
            container: truncate_for_log(&container.html(), CONTAINER_LOG_LIMIT),
        });
    };

    let extra = blocks.count();
    if extra > 0 {
        warn!(
            issue,
            section,
            blocks = extra + 1,
            container = %truncate_for_log(&container.html(), CONTAINER_LOG_LIMIT),
            "Article with more than one block; only the first block will be interpreted"
        );
    }

    let child_text = |selector: &Selector, field: &'static str| {
        block
            .select(selector)
            .next()
            .map(|el| normalize_text(el.text()))
            .ok_or_else(|| Error::MissingRequiredField {
                issue: issue.to_string(),
                section: section.to_string(),
                container: truncate_for_log(&container.html(), CONTAINER_LOG_LIMIT),
                field,
            })
    };
    let super_title = child_text(&SUPERTITLE, "supertitle")?;
    let title = child_text(&TITLE, "title")?;

    let el = block.value();
    let attr = |name: &str| el.attr(name).unwrap_or_default().to_string();

    Ok(ArticleRecord {
        link: attr("href"),
        sections: vec![section.to_string()],
        sub_section: attr("ressort"),
        content_type: attr("contenttype"),
        super_title,
        title,
        genre: el.attr("genre").map(str::to_string),
        authors: attr("author").split(';').map(str::to_string).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// In-memory log sink for asserting on emitted diagnostics.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    const INDEX: &str = r#"<?xml version="1.0" encoding="ISO-8859-1"?>
<centerpage>
  <body>
    <region title="Politik">
      <container>
        <block href="http://xml.zeit.de/2019/49/spd-vorsitz" ressort="deutschland"
               contenttype="article" author="A. Example;B. Other" genre="kommentar">
          <supertitle>SPD</supertitle>
          <title>Neue
            Spitze</title>
        </block>
      </container>
    </region>
    <region title="Wissen">
      <container>
        <block href="http://xml.zeit.de/2019/49/klima" ressort="wissen"
               contenttype="article" author="C. Third">
          <supertitle>Klima</supertitle>
          <title>Heiße Jahre</title>
        </block>
      </container>
    </region>
    <region title="Leer"></region>
    <region><container><block href="x"><supertitle>s</supertitle><title>t</title></block></container></region>
  </body>
</centerpage>"#;

    #[test]
    fn test_index_url() {
        assert_eq!(
            index_url(DEFAULT_BASE_URL, "2019/49"),
            "http://xml.zeit.de/2019/49/index"
        );
    }

    #[test]
    fn test_decode_latin1_maps_high_bytes() {
        assert_eq!(decode_latin1(b"M\xfcller \xdf"), "Müller ß");
        // 0x80..0x9F are C1 controls in Latin-1, not windows-1252 punctuation
        assert_eq!(decode_latin1(b"\x80"), "\u{80}");
    }

    #[test]
    fn test_parse_index_extracts_fields() {
        let articles = parse_index(INDEX, "2019/49").unwrap();
        assert_eq!(articles.len(), 2);

        let first = &articles[0];
        assert_eq!(first.link, "http://xml.zeit.de/2019/49/spd-vorsitz");
        assert_eq!(first.sections, vec!["Politik"]);
        assert_eq!(first.sub_section, "deutschland");
        assert_eq!(first.content_type, "article");
        assert_eq!(first.super_title, "SPD");
        assert_eq!(first.title, "Neue Spitze");
        assert_eq!(first.genre.as_deref(), Some("kommentar"));
        assert_eq!(first.authors, vec!["A. Example", "B. Other"]);

        let second = &articles[1];
        assert_eq!(second.sections, vec!["Wissen"]);
        assert_eq!(second.title, "Heiße Jahre");
        assert_eq!(second.genre, None);
    }

    #[test]
    fn test_parse_index_keeps_empty_author_segments() {
        let raw = r#"<region title="R"><container>
            <block href="l" author="A;;B"><supertitle>s</supertitle><title>t</title></block>
        </container></region>"#;
        let articles = parse_index(raw, "2019/49").unwrap();
        assert_eq!(articles[0].authors, vec!["A", "", "B"]);
    }

    #[test]
    fn test_parse_index_missing_author_is_single_empty_entry() {
        let raw = r#"<region title="R"><container>
            <block href="l"><supertitle>s</supertitle><title>t</title></block>
        </container></region>"#;
        let articles = parse_index(raw, "2019/49").unwrap();
        assert_eq!(articles[0].authors, vec![""]);
    }

    #[test]
    fn test_parse_index_uses_first_of_several_blocks() {
        let raw = r#"<region title="R"><container>
            <block href="first" author="A"><supertitle>s1</supertitle><title>t1</title></block>
            <block href="second" author="B"><supertitle>s2</supertitle><title>t2</title></block>
        </container></region>"#;
        let articles = parse_index(raw, "2019/49").unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].link, "first");
        assert_eq!(articles[0].title, "t1");
    }

    #[test]
    fn test_parse_index_container_without_block_fails() {
        let raw = r#"<region title="R"><container><p>nothing</p></container></region>"#;
        let err = parse_index(raw, "2019/49").unwrap_err();
        match err {
            Error::NoBlock { issue, section, .. } => {
                assert_eq!(issue, "2019/49");
                assert_eq!(section, "R");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_index_missing_title_fails() {
        let raw = r#"<region title="R"><container>
            <block href="l"><supertitle>s</supertitle></block>
        </container></region>"#;
        let err = parse_index(raw, "2019/51").unwrap_err();
        assert!(matches!(
            err,
            Error::MissingRequiredField { field: "title", .. }
        ));
    }

    #[test]
    fn test_parse_index_missing_supertitle_fails() {
        let raw = r#"<region title="R"><container>
            <block href="l"><title>t</title></block>
        </container></region>"#;
        let err = parse_index(raw, "2019/51").unwrap_err();
        assert!(matches!(
            err,
            Error::MissingRequiredField { field: "supertitle", .. }
        ));
    }

    #[test]
    fn test_expand_empty_elements() {
        assert_eq!(
            expand_empty_elements(r#"<supertitle/><block href="http://x/y" author="A" /><br/>"#),
            r#"<supertitle></supertitle><block href="http://x/y" author="A"></block><br/>"#
        );
        assert_eq!(expand_empty_elements("<title>a/b</title>"), "<title>a/b</title>");
    }

    #[test]
    fn test_parse_index_empty_supertitle_stays_empty() {
        let raw = r#"<region title="R"><container>
            <block href="l" author="A"><supertitle/><title>Echter Titel</title></block>
        </container></region>"#;
        let articles = parse_index(raw, "2019/49").unwrap();
        assert_eq!(articles[0].super_title, "");
        assert_eq!(articles[0].title, "Echter Titel");
    }

    #[test]
    fn test_parse_index_self_closed_region_is_not_a_section() {
        let raw = r#"<region title="Leer"/><region title="Politik"><container>
            <block href="l" author="A"><supertitle>s</supertitle><title>t</title></block>
        </container></region>"#;
        let articles = parse_index(raw, "2019/49").unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].sections, vec!["Politik"]);
    }

    #[test]
    fn test_parse_index_self_closed_block_does_not_adopt_siblings() {
        let raw = r#"<region title="R"><container>
            <block href="b"/><supertitle>s2</supertitle><title>t2</title>
        </container></region>"#;
        let err = parse_index(raw, "2019/49").unwrap_err();
        assert!(matches!(
            err,
            Error::MissingRequiredField { field: "supertitle", .. }
        ));
    }

    #[test]
    fn test_parse_index_warns_on_several_blocks() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        let raw = r#"<region title="R"><container>
            <block href="first" author="A"><supertitle>s1</supertitle><title>t1</title></block>
            <block href="second" author="B"><supertitle>s2</supertitle><title>t2</title></block>
        </container></region>"#;
        let articles =
            tracing::subscriber::with_default(subscriber, || parse_index(raw, "2019/49")).unwrap();
        assert_eq!(articles.len(), 1);

        let output = logs.contents();
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("more than one block"), "{output}");
        assert!(output.contains("2019/49"), "{output}");
        assert!(output.contains(r#"href="first""#), "{output}");
    }

    #[test]
    fn test_parse_index_single_block_does_not_warn() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        tracing::subscriber::with_default(subscriber, || parse_index(INDEX, "2019/49")).unwrap();
        assert!(!logs.contents().contains("more than one block"));
    }

    #[tokio::test]
    async fn test_fetch_index_decodes_latin1_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2019/49/index"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"<title>Gr\xfc\xdfe</title>".to_vec()))
            .mount(&server)
            .await;

        let base = format!("{}/", server.uri());
        let body = fetch_index(&Client::new(), &base, "2019/49").await.unwrap();
        assert_eq!(body, "<title>Grüße</title>");
    }

    #[tokio::test]
    async fn test_fetch_index_error_status_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let base = format!("{}/", server.uri());
        let err = fetch_index(&Client::new(), &base, "2019/52").await.unwrap_err();
        match err {
            Error::Fetch { issue, .. } => assert_eq!(issue, "2019/52"),
            other => panic!("unexpected error: {other}"),
        }
    }
}

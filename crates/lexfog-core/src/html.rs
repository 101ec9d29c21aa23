//! Annotated HTML rendering.
//!
//! Renders the layout collected by [`StatsCollector`](crate::stats::StatsCollector)
//! as one `<p>` per paragraph, marking hard words with `<mark>` and wrapping
//! long sentences in `<span class="long_sentence">`. The result always passes
//! through [`sanitize`], which keeps only those three elements.

use std::collections::HashSet;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::document::Word;
use crate::stats::{DocumentStats, SentenceLayout};

/// Class of the span wrapping a long sentence.
pub const LONG_SENTENCE_CLASS: &str = "long_sentence";

/// Elements that survive sanitizing.
const ALLOWED_ELEMENTS: &[&str] = &["p", "mark", "span"];

/// Render the annotated document.
#[tracing::instrument(skip_all, fields(paragraphs = stats.layout.len()))]
pub fn annotate(stats: &DocumentStats<'_>) -> String {
    let mut html = String::new();

    for paragraph in &stats.layout {
        html.push_str("<p>");
        for (i, sentence) in paragraph.sentences.iter().enumerate() {
            if i > 0 {
                html.push(' ');
            }
            render_sentence(sentence, &stats.hard_words, &mut html);
        }
        html.push_str("</p>");
    }

    sanitize(&html)
}

fn render_sentence(sentence: &SentenceLayout<'_>, hard_words: &HashSet<&str>, html: &mut String) {
    if sentence.is_long {
        html.push_str("<span class=\"");
        html.push_str(LONG_SENTENCE_CLASS);
        html.push_str("\">");
    }

    for (i, placed) in sentence.words.iter().enumerate() {
        if i > 0 && !placed.glued {
            html.push(' ');
        }
        let orth = html_escape::encode_text(placed.word.orth());
        if is_marked(placed.word, hard_words) {
            html.push_str("<mark>");
            html.push_str(&orth);
            html.push_str("</mark>");
        } else {
            html.push_str(&orth);
        }
    }

    if sentence.is_long {
        html.push_str("</span>");
    }
}

/// A word is marked when its surface form or any of its lemmas is hard.
fn is_marked(word: &Word, hard_words: &HashSet<&str>) -> bool {
    hard_words.contains(word.orth())
        || word
            .readings()
            .any(|reading| hard_words.contains(reading.base.as_str()))
}

/// Strip everything but `<p>`, `<mark>` and `<span class>` from `markup`.
///
/// Text of dropped elements is kept (escaped); comments, processing
/// instructions and doctype declarations are removed. Malformed input is cut
/// at the first error and every element still open is closed.
pub fn sanitize(markup: &str) -> String {
    let mut reader = Reader::from_str(markup);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;

    let mut out = String::with_capacity(markup.len());
    let mut open: Vec<Option<&'static str>> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let kept = allowed(&e);
                if let Some(name) = kept {
                    write_start(name, &e, &mut out);
                }
                open.push(kept);
            }
            Ok(Event::Empty(e)) => {
                if let Some(name) = allowed(&e) {
                    write_start(name, &e, &mut out);
                    write_end(name, &mut out);
                }
            }
            Ok(Event::End(_)) => {
                if let Some(Some(name)) = open.pop() {
                    write_end(name, &mut out);
                }
            }
            Ok(Event::Text(e)) => match e.decode() {
                Ok(text) => out.push_str(&html_escape::encode_text(&text)),
                Err(err) => tracing::warn!(error = %err, "dropping undecodable text"),
            },
            Ok(Event::CData(e)) => {
                let raw = String::from_utf8_lossy(&e);
                out.push_str(&html_escape::encode_text(&raw));
            }
            Ok(Event::GeneralRef(e)) => {
                let Ok(name) = e.decode() else {
                    continue;
                };
                let entity = format!("&{name};");
                match quick_xml::escape::unescape(&entity) {
                    Ok(resolved) => out.push_str(&html_escape::encode_text(&resolved)),
                    Err(_) => out.push_str(&html_escape::encode_text(&entity)),
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    position = reader.buffer_position(),
                    "malformed markup truncated"
                );
                break;
            }
        }
    }

    while let Some(kept) = open.pop() {
        if let Some(name) = kept {
            write_end(name, &mut out);
        }
    }
    out
}

fn allowed(e: &BytesStart<'_>) -> Option<&'static str> {
    let local = e.local_name();
    ALLOWED_ELEMENTS
        .iter()
        .copied()
        .find(|name| local.as_ref().eq_ignore_ascii_case(name.as_bytes()))
}

fn write_start(name: &str, e: &BytesStart<'_>, out: &mut String) {
    out.push('<');
    out.push_str(name);
    if name == "span"
        && let Some(class) = class_attribute(e)
    {
        out.push_str(" class=\"");
        out.push_str(&html_escape::encode_double_quoted_attribute(&class));
        out.push('"');
    }
    out.push('>');
}

fn write_end(name: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn class_attribute(e: &BytesStart<'_>) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref().eq_ignore_ascii_case(b"class"))
        .map(|attr| {
            let raw = String::from_utf8_lossy(&attr.value);
            quick_xml::escape::unescape(&raw)
                .map(|value| value.into_owned())
                .unwrap_or_else(|_| raw.into_owned())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringOptions;
    use crate::document::{Paragraph, Reading, Sentence, TaggedDocument, Token};
    use crate::stats::StatsCollector;
    use crate::syllables::{Language, SyllableOracle};

    /// Every word with a `~` is hard.
    struct Tilde;

    impl SyllableOracle for Tilde {
        fn count_syllables(&self, word: &str, _language: Language) -> usize {
            if word.contains('~') { 9 } else { 1 }
        }
    }

    fn word(orth: &str) -> Token {
        Word::new(orth, Reading::new(orth, "subst")).into()
    }

    fn punct(orth: &str) -> Token {
        Word::new(orth, Reading::new(orth, "interp")).into()
    }

    fn render(paragraphs: Vec<Vec<Vec<Token>>>) -> String {
        let doc = TaggedDocument::new(
            paragraphs
                .into_iter()
                .map(|p| Paragraph::new(p.into_iter().map(Sentence::new).collect()))
                .collect(),
        );
        let options = ScoringOptions::default();
        let stats = StatsCollector::new(&Tilde, &options).collect(&doc).unwrap();
        annotate(&stats)
    }

    #[test]
    fn joins_words_and_honors_no_space() {
        let html = render(vec![vec![
            vec![word("Ala"), word("ma"), word("kota"), Token::NoSpace, punct(".")],
            vec![word("Tak"), Token::NoSpace, punct("!")],
        ]]);
        assert_eq!(html, "<p>Ala ma kota. Tak!</p>");
    }

    #[test]
    fn no_space_affects_only_the_next_word() {
        let html = render(vec![vec![vec![
            punct("("),
            Token::NoSpace,
            word("a"),
            word("b"),
        ]]]);
        assert_eq!(html, "<p>(a b</p>");
    }

    #[test]
    fn marks_hard_words() {
        let html = render(vec![vec![vec![word("x~y"), word("kot")]]]);
        assert_eq!(html, "<p><mark>x~y</mark> kot</p>");
    }

    #[test]
    fn marks_word_whose_lemma_is_hard_elsewhere() {
        let inflected: Token = Word::with_readings(
            "domy",
            vec![Reading::new("dom", "subst"), Reading::new("do~m", "subst")],
        )
        .unwrap()
        .into();
        // "do~m" only becomes hard through a later surface form
        let html = render(vec![vec![vec![inflected, word("do~m")]]]);
        assert_eq!(html, "<p><mark>domy</mark> <mark>do~m</mark></p>");
    }

    #[test]
    fn wraps_long_sentences() {
        let long: Vec<Token> = (0..21).map(|_| word("a")).collect();
        let html = render(vec![vec![long, vec![word("b")]]]);
        let expected = format!("<p><span class=\"long_sentence\">{}</span> b</p>", ["a"; 21].join(" "));
        assert_eq!(html, expected);
    }

    #[test]
    fn empty_paragraphs_render_empty() {
        let html = render(vec![vec![vec![word("a")]], vec![]]);
        assert_eq!(html, "<p>a</p><p></p>");
    }

    #[test]
    fn markup_in_orth_is_neutralized() {
        let html = render(vec![vec![vec![
            word("<script>alert(1)</script>"),
            word("a&b"),
        ]]]);
        assert!(!html.contains("<script"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a&amp;b"));
    }

    #[test]
    fn sanitize_keeps_only_allowlisted_elements() {
        let dirty = r#"<p>one <b>two</b> <span class="long_sentence" onclick="x()">three</span><!-- c --><mark>four</mark></p>"#;
        assert_eq!(
            sanitize(dirty),
            r#"<p>one two <span class="long_sentence">three</span><mark>four</mark></p>"#
        );
    }

    #[test]
    fn sanitize_drops_script_tags_but_escapes_text() {
        let dirty = "<p><script>alert(&quot;x&quot;)</script></p>";
        assert_eq!(sanitize(dirty), "<p>alert(\"x\")</p>");
    }

    #[test]
    fn sanitize_closes_elements_left_open() {
        assert_eq!(sanitize("<p><mark>a"), "<p><mark>a</mark></p>");
    }

    #[test]
    fn rendering_is_idempotent() {
        let paragraphs = vec![vec![vec![word("x~y"), Token::NoSpace, punct(",")]]];
        assert_eq!(render(paragraphs.clone()), render(paragraphs));
    }
}

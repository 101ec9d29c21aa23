//! Reading tagger output into a [`TaggedDocument`].
//!
//! The tagger speaks CCL XML:
//!
//! ```xml
//! <chunkList>
//!   <chunk type="p" id="p1">
//!     <sentence>
//!       <tok>
//!         <orth>Ala</orth>
//!         <lex disamb="1"><base>Ala</base><ctag>subst:sg:nom:f</ctag></lex>
//!       </tok>
//!       <ns/>
//!       <tok><orth>.</orth><lex disamb="1"><base>.</base><ctag>interp</ctag></lex></tok>
//!     </sentence>
//!   </chunk>
//! </chunkList>
//! ```
//!
//! Each `chunk` becomes a paragraph and `ns` a no-space marker. Readings
//! marked `disamb="1"` are moved ahead of the others so the chosen one
//! becomes the primary reading. Elements this reader does not know (`ann`,
//! `prop`, ...) are skipped.
//!
//! Documents can also be stored as JSON, in the serde shape of
//! [`TaggedDocument`].

use camino::Utf8Path;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::document::{Paragraph, Reading, Sentence, TaggedDocument, Token, Word};
use crate::error::{DocumentError, DocumentResult};

/// Serialized forms of a tagged document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocumentFormat {
    /// CCL XML as produced by the tagger.
    #[default]
    Ccl,
    /// JSON in the shape of [`TaggedDocument`].
    Json,
}

impl DocumentFormat {
    /// Guess the format from a file extension: `.json` is JSON, anything
    /// else CCL.
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Ccl,
        }
    }

    /// Parse `input` in this format.
    ///
    /// # Errors
    ///
    /// See [`parse_ccl`] and [`parse_json`].
    pub fn parse(self, input: &str) -> DocumentResult<TaggedDocument> {
        match self {
            Self::Ccl => parse_ccl(input),
            Self::Json => parse_json(input),
        }
    }
}

/// Parse a JSON-encoded document.
///
/// # Errors
///
/// [`DocumentError::Empty`] for blank input, [`DocumentError::Json`] when
/// decoding fails, including words without readings.
pub fn parse_json(input: &str) -> DocumentResult<TaggedDocument> {
    if input.trim().is_empty() {
        return Err(DocumentError::Empty);
    }
    Ok(serde_json::from_str(input)?)
}

/// Parse CCL XML.
///
/// # Errors
///
/// - [`DocumentError::Empty`] for blank input or XML without a `chunkList`.
/// - [`DocumentError::Xml`] for malformed XML.
/// - [`DocumentError::MissingOrth`] / [`DocumentError::MissingReading`] for
///   incomplete tokens.
#[tracing::instrument(skip_all, fields(input_len = input.len()))]
pub fn parse_ccl(input: &str) -> DocumentResult<TaggedDocument> {
    if input.trim().is_empty() {
        return Err(DocumentError::Empty);
    }

    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(false);

    let mut builder = Builder::default();
    let mut depth = 0usize;

    loop {
        let event = reader.read_event().map_err(|err| DocumentError::Xml {
            position: reader.error_position(),
            message: err.to_string(),
        })?;
        match event {
            Event::Start(e) => {
                depth += 1;
                builder.open(&e);
            }
            Event::Empty(e) => {
                builder.open(&e);
                builder.close(e.local_name().as_ref())?;
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                builder.close(e.local_name().as_ref())?;
            }
            Event::Text(e) => {
                if builder.wants_text() {
                    let text = e.decode().map_err(|err| DocumentError::Xml {
                        position: reader.buffer_position(),
                        message: err.to_string(),
                    })?;
                    builder.text.push_str(&text);
                }
            }
            Event::CData(e) => {
                if builder.wants_text() {
                    builder.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::GeneralRef(e) => {
                if builder.wants_text() {
                    let name = e.decode().map_err(|err| DocumentError::Xml {
                        position: reader.buffer_position(),
                        message: err.to_string(),
                    })?;
                    let entity = format!("&{name};");
                    let resolved =
                        quick_xml::escape::unescape(&entity).map_err(|err| DocumentError::Xml {
                            position: reader.buffer_position(),
                            message: err.to_string(),
                        })?;
                    builder.text.push_str(&resolved);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(DocumentError::Xml {
            position: reader.buffer_position(),
            message: format!("input ends with {depth} unclosed element(s)"),
        });
    }

    let document = builder.finish()?;
    tracing::debug!(
        paragraphs = document.paragraphs.len(),
        sentences = document.sentence_count(),
        "tagger output parsed"
    );
    Ok(document)
}

/// Text-bearing fields of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Orth,
    Base,
    Ctag,
}

#[derive(Debug, Default)]
struct PendingLex {
    base: Option<String>,
    ctag: Option<String>,
    disamb: bool,
}

#[derive(Debug, Default)]
struct PendingTok {
    index: usize,
    orth: Option<String>,
    chosen: Vec<Reading>,
    others: Vec<Reading>,
}

#[derive(Debug, Default)]
struct Builder {
    saw_root: bool,
    paragraphs: Vec<Paragraph>,
    paragraph: Option<Vec<Sentence>>,
    sentence: Option<Vec<Token>>,
    /// 1-based number of the current sentence, for error messages.
    sentence_number: usize,
    tok: Option<PendingTok>,
    lex: Option<PendingLex>,
    field: Option<Field>,
    text: String,
}

impl Builder {
    const fn wants_text(&self) -> bool {
        self.field.is_some()
    }

    fn open(&mut self, e: &BytesStart<'_>) {
        match e.local_name().as_ref() {
            b"chunkList" => self.saw_root = true,
            b"chunk" => {
                self.flush_paragraph(false);
                self.paragraph = Some(Vec::new());
            }
            b"sentence" => {
                self.sentence_number += 1;
                self.sentence = Some(Vec::new());
            }
            b"tok" => {
                let index = self.sentence.as_ref().map_or(0, Vec::len);
                self.tok = Some(PendingTok {
                    index,
                    ..PendingTok::default()
                });
            }
            b"lex" if self.tok.is_some() => {
                let disamb = e
                    .try_get_attribute("disamb")
                    .ok()
                    .flatten()
                    .is_some_and(|attr| attr.value.as_ref() == b"1");
                self.lex = Some(PendingLex {
                    disamb,
                    ..PendingLex::default()
                });
            }
            b"orth" if self.tok.is_some() && self.lex.is_none() => self.start_field(Field::Orth),
            b"base" if self.lex.is_some() => self.start_field(Field::Base),
            b"ctag" if self.lex.is_some() => self.start_field(Field::Ctag),
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8]) -> DocumentResult<()> {
        match name {
            b"chunk" => self.flush_paragraph(true),
            b"sentence" => {
                if let Some(tokens) = self.sentence.take() {
                    self.paragraph
                        .get_or_insert_with(Vec::new)
                        .push(Sentence::new(tokens));
                }
            }
            b"tok" => {
                if let Some(tok) = self.tok.take() {
                    let word = self.finish_tok(tok)?;
                    self.sentence.get_or_insert_with(Vec::new).push(word.into());
                }
            }
            b"ns" => {
                if let Some(tokens) = self.sentence.as_mut() {
                    tokens.push(Token::NoSpace);
                }
            }
            b"lex" => {
                if let (Some(lex), Some(tok)) = (self.lex.take(), self.tok.as_mut())
                    && let (Some(base), Some(ctag)) = (lex.base, lex.ctag)
                    && !ctag.is_empty()
                {
                    let reading = Reading::new(base, ctag);
                    if lex.disamb {
                        tok.chosen.push(reading);
                    } else {
                        tok.others.push(reading);
                    }
                }
            }
            b"orth" | b"base" | b"ctag" => self.end_field(),
            _ => {}
        }
        Ok(())
    }

    fn start_field(&mut self, field: Field) {
        self.field = Some(field);
        self.text.clear();
    }

    fn end_field(&mut self) {
        let Some(field) = self.field.take() else {
            return;
        };
        let value = self.text.trim().to_string();
        self.text.clear();
        match field {
            Field::Orth => {
                if let Some(tok) = self.tok.as_mut() {
                    tok.orth = Some(value);
                }
            }
            Field::Base => {
                if let Some(lex) = self.lex.as_mut() {
                    lex.base = Some(value);
                }
            }
            Field::Ctag => {
                if let Some(lex) = self.lex.as_mut() {
                    lex.ctag = Some(value);
                }
            }
        }
    }

    fn finish_tok(&self, tok: PendingTok) -> DocumentResult<Word> {
        let orth = match tok.orth {
            Some(orth) if !orth.is_empty() => orth,
            _ => {
                return Err(DocumentError::MissingOrth {
                    sentence: self.sentence_number,
                    index: tok.index,
                });
            }
        };
        let mut readings = tok.chosen;
        readings.extend(tok.others);
        Word::with_readings(orth.clone(), readings).ok_or_else(|| DocumentError::MissingReading {
            sentence: self.sentence_number,
            orth,
        })
    }

    /// Push the open paragraph; `keep_empty` also keeps one with no sentences.
    fn flush_paragraph(&mut self, keep_empty: bool) {
        if let Some(sentences) = self.paragraph.take()
            && (keep_empty || !sentences.is_empty())
        {
            self.paragraphs.push(Paragraph::new(sentences));
        }
    }

    fn finish(mut self) -> DocumentResult<TaggedDocument> {
        if !self.saw_root {
            return Err(DocumentError::Empty);
        }
        self.flush_paragraph(false);
        Ok(TaggedDocument::new(self.paragraphs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(orth: &str, base: &str, ctag: &str) -> String {
        format!("<tok><orth>{orth}</orth><lex disamb=\"1\"><base>{base}</base><ctag>{ctag}</ctag></lex></tok>")
    }

    fn ccl(chunks: &[&[&str]]) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE chunkList SYSTEM \"ccl.dtd\">\n<chunkList>\n",
        );
        for (i, sentences) in chunks.iter().enumerate() {
            xml.push_str(&format!("<chunk type=\"p\" id=\"p{}\">\n", i + 1));
            for sentence in *sentences {
                xml.push_str("<sentence>");
                xml.push_str(sentence);
                xml.push_str("</sentence>\n");
            }
            xml.push_str("</chunk>\n");
        }
        xml.push_str("</chunkList>\n");
        xml
    }

    #[test]
    fn reads_paragraphs_sentences_and_markers() {
        let s1 = [
            tok("Ala", "Ala", "subst:sg:nom:f"),
            tok("ma", "mieć", "fin:sg:ter:imperf"),
            tok("kota", "kot", "subst:sg:acc:m2"),
            "<ns/>".to_string(),
            tok(".", ".", "interp"),
        ]
        .concat();
        let s2 = tok("Tak", "tak", "qub");
        let xml = ccl(&[&[s1.as_str(), s2.as_str()], &[], &[s2.as_str()]]);

        let doc = parse_ccl(&xml).unwrap();
        assert_eq!(doc.paragraphs.len(), 3);
        assert_eq!(doc.paragraphs[0].sentences.len(), 2);
        assert!(doc.paragraphs[1].is_empty());

        let tokens = &doc.paragraphs[0].sentences[0].tokens;
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[3], Token::NoSpace);
        let kota = tokens[2].as_word().unwrap();
        assert_eq!(kota.orth(), "kota");
        assert_eq!(kota.primary().base, "kot");
        assert_eq!(kota.primary().coarse_class(), "subst");
    }

    #[test]
    fn disambiguated_reading_becomes_primary() {
        let xml = ccl(&[&["<tok><orth>mam</orth>\
            <lex><base>mama</base><ctag>subst:pl:gen:f</ctag></lex>\
            <lex disamb=\"1\"><base>mieć</base><ctag>fin:sg:pri:imperf</ctag></lex>\
            </tok>"]]);
        let doc = parse_ccl(&xml).unwrap();
        let word = doc.paragraphs[0].sentences[0].tokens[0].as_word().unwrap();
        assert_eq!(word.primary().base, "mieć");
        let bases: Vec<&str> = word.readings().map(|r| r.base.as_str()).collect();
        assert_eq!(bases, ["mieć", "mama"]);
    }

    #[test]
    fn entities_are_unescaped() {
        let xml = ccl(&[&[tok("&lt;b&gt;&amp;&#65;", "x", "subst").as_str()]]);
        let doc = parse_ccl(&xml).unwrap();
        let word = doc.paragraphs[0].sentences[0].tokens[0].as_word().unwrap();
        assert_eq!(word.orth(), "<b>&A");
    }

    #[test]
    fn unknown_elements_are_skipped() {
        let body = "<tok><orth>Kraków</orth><lex disamb=\"1\"><base>Kraków</base><ctag>subst:sg:nom:m3</ctag></lex>\
            <ann chan=\"place\">1</ann><prop key=\"x\">y</prop></tok>";
        let doc = parse_ccl(&ccl(&[&[body]])).unwrap();
        let word = doc.paragraphs[0].sentences[0].tokens[0].as_word().unwrap();
        assert_eq!(word.orth(), "Kraków");
    }

    #[test]
    fn token_without_orth_is_rejected() {
        let body = format!(
            "{}<tok><lex><base>x</base><ctag>subst</ctag></lex></tok>",
            tok("a", "a", "subst")
        );
        let xml = ccl(&[&[body.as_str()]]);
        match parse_ccl(&xml) {
            Err(DocumentError::MissingOrth { sentence, index }) => {
                assert_eq!(sentence, 1);
                assert_eq!(index, 1);
            }
            other => panic!("expected MissingOrth, got {other:?}"),
        }
    }

    #[test]
    fn token_without_complete_reading_is_rejected() {
        let xml = ccl(&[&["<tok><orth>kot</orth><lex><base>kot</base></lex></tok>"]]);
        match parse_ccl(&xml) {
            Err(DocumentError::MissingReading { orth, .. }) => assert_eq!(orth, "kot"),
            other => panic!("expected MissingReading, got {other:?}"),
        }
    }

    #[test]
    fn malformed_xml_is_rejected() {
        let err = parse_ccl("<chunkList><chunk><sentence></chunk></chunkList>").unwrap_err();
        assert!(matches!(err, DocumentError::Xml { .. }), "{err:?}");

        let err = parse_ccl("<chunkList><chunk>").unwrap_err();
        assert!(matches!(err, DocumentError::Xml { .. }), "{err:?}");
    }

    #[test]
    fn blank_or_foreign_input_is_empty() {
        assert!(matches!(parse_ccl("  \n"), Err(DocumentError::Empty)));
        assert!(matches!(parse_ccl("<html><p>hi</p></html>"), Err(DocumentError::Empty)));
    }

    #[test]
    fn json_documents_round_trip_through_serde() {
        let xml = ccl(&[&[tok("kot", "kot", "subst").as_str()]]);
        let doc = parse_ccl(&xml).unwrap();
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(DocumentFormat::Json.parse(&json).unwrap(), doc);
    }

    #[test]
    fn json_word_without_readings_is_rejected() {
        let json = r#"{"paragraphs":[{"sentences":[{"tokens":[{"kind":"word","orth":"kot","readings":[]}]}]}]}"#;
        assert!(matches!(parse_json(json), Err(DocumentError::Json(_))));
        assert!(matches!(parse_json(""), Err(DocumentError::Empty)));
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(DocumentFormat::from_path(Utf8Path::new("a/b.JSON")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Utf8Path::new("a/b.xml")), DocumentFormat::Ccl);
        assert_eq!(DocumentFormat::from_path(Utf8Path::new("ccl")), DocumentFormat::Ccl);
    }
}

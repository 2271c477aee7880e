// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::chapters::{Chapter, ChapterRegistry};
use crate::config::Options;
use crate::escape::{escape_latex, escape_verbatim};
use crate::index::{index_entries, index_see};
use crate::token::{Token, TokenKind};
use crate::{Error, Result};

static HIDDEN_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bhidden:\s*true").unwrap());

/// Replaced by the linked chapter's number inside chapter links.
const CHAPTER_NUMBER_MARKER: char = '?';

/// State carried from one token to the next during a single rendering pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// Inside a raw LaTeX block: text passes through unescaped.
    pub raw: bool,
    /// An epigraph was just opened and its first paragraph must abut the opening quotes.
    pub quote: bool,
    /// Number of the chapter targeted by the enclosing link, if any.
    pub linked_chapter: Option<usize>,
}

pub struct Renderer<'a> {
    chapters: &'a ChapterRegistry,
    chapter: &'a Chapter,
    options: &'a Options,
}

impl<'a> Renderer<'a> {
    pub fn new(chapters: &'a ChapterRegistry, chapter: &'a Chapter, options: &'a Options) -> Self {
        Self {
            chapters,
            chapter,
            options,
        }
    }

    pub fn render(&self, tokens: &[Token]) -> Result<String> {
        let (out, _) = self.render_with_context(tokens, RenderContext::default())?;
        Ok(out)
    }

    /// Renders `tokens` starting from `context` and returns the context left after the last
    /// token.
    pub fn render_with_context(
        &self,
        tokens: &[Token],
        context: RenderContext,
    ) -> Result<(String, RenderContext)> {
        let mut out = String::new();
        let mut context = context;
        for (index, token) in tokens.iter().enumerate() {
            let (text, next_context) = self.render_token(token, tokens.get(index + 1), context)?;
            out.push_str(&text);
            context = next_context;
        }
        Ok((out, context))
    }

    fn render_token(
        &self,
        token: &Token,
        next: Option<&Token>,
        context: RenderContext,
    ) -> Result<(String, RenderContext)> {
        let text = match token.kind {
            TokenKind::Inline => return self.render_with_context(&token.children, context),

            TokenKind::ParagraphOpen => {
                let label = self.label(token);
                if context.quote {
                    let context = RenderContext {
                        quote: false,
                        ..context
                    };
                    return Ok((label, context));
                }
                format!("\n\n{label}")
            }
            TokenKind::ParagraphClose => String::new(),

            TokenKind::HeadingOpen => self.heading_open(token)?,
            TokenKind::HeadingClose => "}".to_string(),

            TokenKind::BulletListOpen => "\n\n\\begin{itemize}".to_string(),
            TokenKind::BulletListClose => "\n\\end{itemize}".to_string(),
            TokenKind::OrderedListOpen => "\n\n\\begin{enumerate}".to_string(),
            TokenKind::OrderedListClose => "\n\\end{enumerate}".to_string(),
            TokenKind::ListItemOpen => "\n\\item ".to_string(),
            TokenKind::ListItemClose => String::new(),

            TokenKind::TableOpen => "\n\n\\noindent\\begin{tabular}{ll}".to_string(),
            TokenKind::TableClose => "\n\\end{tabular}".to_string(),
            TokenKind::TbodyOpen | TokenKind::TbodyClose | TokenKind::TrOpen => String::new(),
            TokenKind::TrClose => "\n\\tabularnewline".to_string(),
            TokenKind::TdOpen => "\n".to_string(),
            TokenKind::TdClose => match next {
                Some(next) if next.kind == TokenKind::TdOpen => " &".to_string(),
                _ => String::new(),
            },

            TokenKind::Fence => self.fence(token),
            TokenKind::CodeInline => format!("\\lstinline`{}`", escape_verbatim(&token.content)),

            TokenKind::StrongOpen => "\\textbf{".to_string(),
            TokenKind::EmOpen => "\\emph{".to_string(),
            TokenKind::SubOpen => "\\textsubscript{".to_string(),
            TokenKind::SupOpen => "\\textsuperscript{".to_string(),
            TokenKind::StrongClose
            | TokenKind::EmClose
            | TokenKind::SubClose
            | TokenKind::SupClose => "}".to_string(),

            TokenKind::Text => render_text(&token.content, context),
            TokenKind::Hardbreak => "\\break\n".to_string(),
            TokenKind::Softbreak => " ".to_string(),

            TokenKind::LinkOpen => {
                let href = token.attr("href").unwrap_or_default();
                match self.chapters.resolve(href) {
                    Some(link) => {
                        tracing::trace!(href, label = %link.label, "resolved chapter link");
                        let context = RenderContext {
                            linked_chapter: Some(link.index),
                            ..context
                        };
                        return Ok((format!("\\hyperref[{}]{{", link.label), context));
                    }
                    None => format!("\\href{{{href}}}{{"),
                }
            }
            TokenKind::LinkClose => {
                let context = RenderContext {
                    linked_chapter: None,
                    ..context
                };
                return Ok(("}".to_string(), context));
            }

            TokenKind::MetaIndex => index_entries(&token.args),
            TokenKind::MetaIndexSee => index_see(
                token.arg(0).unwrap_or(&Value::Null),
                token.arg(1).unwrap_or(&Value::Null),
            ),
            TokenKind::MetaFigure => self.figure(token),

            TokenKind::MetaLatexOpen => {
                return Ok((String::new(), RenderContext { raw: true, ..context }));
            }
            TokenKind::MetaLatexClose => {
                return Ok((String::new(), RenderContext { raw: false, ..context }));
            }

            TokenKind::MetaQuoteOpen => {
                if is_epigraph(token) {
                    let context = RenderContext {
                        quote: true,
                        ..context
                    };
                    let open = "\n\n\\epigraphhead[30]{\n\\epigraph{\\hspace*{-.1cm}\\itshape``";
                    return Ok((open.to_string(), context));
                }
                "\n\n\\begin{quote}".to_string()
            }
            TokenKind::MetaQuoteClose => {
                let context = RenderContext {
                    quote: false,
                    ..context
                };
                return Ok((quote_close(token), context));
            }

            // Hints are stripped upstream for print; any leftovers render as nothing.
            TokenKind::MetaHintOpen | TokenKind::MetaHintClose => String::new(),
        };
        Ok((text, context))
    }

    /// `\label` for tokens carrying an `id` attribute, scoped by the chapter slug.
    fn label(&self, token: &Token) -> String {
        token
            .attr("id")
            .map(|id| format!("\\label{{{}.{id}}}", self.chapter.slug))
            .unwrap_or_default()
    }

    fn heading_open(&self, token: &Token) -> Result<String> {
        let command = match token.tag.as_str() {
            "h1" => {
                let star = if self.chapter.unnumbered { "*" } else { "" };
                return Ok(format!("\\label{{{}}}\\chapter{star}{{", self.chapter.slug));
            }
            "h2" => "section",
            "h3" => "subsection",
            "h4" => "subsubsection",
            other => return Err(Error::UnsupportedHeading(other.to_string())),
        };
        Ok(format!("\n\n{}\\{command}{{", self.label(token)))
    }

    fn fence(&self, token: &Token) -> String {
        if HIDDEN_FENCE.is_match(&token.info) {
            return String::new();
        }
        format!(
            "\n\n{}\\begin{{lstlisting}}\n{}\n\\end{{lstlisting}}\n\\noindent",
            self.label(token),
            token.content.trim_end()
        )
    }

    fn figure(&self, token: &Token) -> String {
        let args = token.arg(0);
        let url = args
            .and_then(|args| args.get("url"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        let width = args
            .and_then(|args| args.get("width"))
            .and_then(Value::as_str)
            .filter(|width| !width.is_empty())
            .unwrap_or(self.options.default_figure_width.as_str());

        format!(
            "\n\n\\vskip 1.5ex\n\\includegraphics[width={width}]{{{}}}\n\\vskip 1.5ex",
            self.image_path(url)
        )
    }

    /// Vector images are included through the PDF the build generates next to them.
    fn image_path(&self, url: &str) -> String {
        let Some(stem) = url.strip_suffix(".svg") else {
            return url.to_string();
        };
        match stem.strip_prefix(self.options.source_image_dir.as_str()) {
            Some(rest) => format!("{}{rest}.pdf", self.options.generated_image_dir),
            None => format!("{stem}.pdf"),
        }
    }
}

fn render_text(content: &str, context: RenderContext) -> String {
    let content = match context.linked_chapter {
        Some(number) => content.replace(CHAPTER_NUMBER_MARKER, &number.to_string()),
        None => content.to_string(),
    };
    if context.raw {
        content
    } else {
        escape_latex(&content)
    }
}

fn is_epigraph(token: &Token) -> bool {
    token
        .arg(0)
        .and_then(|args| args.get("chapter"))
        .is_some_and(is_truthy)
}

fn quote_field<'t>(token: &'t Token, name: &str) -> Option<&'t str> {
    token
        .arg(0)
        .and_then(|args| args.get(name))
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

fn quote_close(token: &Token) -> String {
    let attribution = match quote_field(token, "author") {
        Some(author) => {
            let title = quote_field(token, "title")
                .map(|title| format!(", {}", escape_latex(title)))
                .unwrap_or_default();
            format!("\n{{---{}{title}}}", escape_latex(author))
        }
        None => String::new(),
    };

    if is_epigraph(token) {
        format!("''}}%{attribution}\n}}")
    } else {
        format!("{attribution}\n\\end{{quote}}")
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

//! The token stream handed over by the markdown transform stage.
//!
//! Tokens arrive as JSON in the markdown-it shape. The `type` field is mapped onto the closed
//! [`TokenKind`] vocabulary while loading, so a type the renderer has no rule for is rejected
//! before any output is produced.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use crate::{Error, Result};

macro_rules! token_kinds {
    ($($variant:ident => $name:literal,)*) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum TokenKind {
            $($variant,)*
        }

        impl TokenKind {
            /// The `type` tag used for this kind in the serialized stream.
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }

        impl FromStr for TokenKind {
            type Err = Error;

            fn from_str(name: &str) -> Result<Self> {
                match name {
                    $($name => Ok(Self::$variant),)*
                    _ => Err(Error::UnknownTokenType(name.to_string())),
                }
            }
        }
    };
}

token_kinds! {
    ParagraphOpen => "paragraph_open",
    ParagraphClose => "paragraph_close",
    HeadingOpen => "heading_open",
    HeadingClose => "heading_close",
    BulletListOpen => "bullet_list_open",
    BulletListClose => "bullet_list_close",
    OrderedListOpen => "ordered_list_open",
    OrderedListClose => "ordered_list_close",
    ListItemOpen => "list_item_open",
    ListItemClose => "list_item_close",
    TableOpen => "table_open",
    TableClose => "table_close",
    TbodyOpen => "tbody_open",
    TbodyClose => "tbody_close",
    TrOpen => "tr_open",
    TrClose => "tr_close",
    TdOpen => "td_open",
    TdClose => "td_close",
    Fence => "fence",
    CodeInline => "code_inline",
    StrongOpen => "strong_open",
    StrongClose => "strong_close",
    EmOpen => "em_open",
    EmClose => "em_close",
    SubOpen => "sub_open",
    SubClose => "sub_close",
    SupOpen => "sup_open",
    SupClose => "sup_close",
    LinkOpen => "link_open",
    LinkClose => "link_close",
    Text => "text",
    Inline => "inline",
    Hardbreak => "hardbreak",
    Softbreak => "softbreak",
    MetaIndex => "meta_index",
    MetaIndexSee => "meta_indexsee",
    MetaFigure => "meta_figure",
    MetaLatexOpen => "meta_latex_open",
    MetaLatexClose => "meta_latex_close",
    MetaQuoteOpen => "meta_quote_open",
    MetaQuoteClose => "meta_quote_close",
    MetaHintOpen => "meta_hint_open",
    MetaHintClose => "meta_hint_close",
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// HTML tag name of the construct, e.g. `h2` for a second-level heading.
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub content: String,
    /// Fence info string.
    pub info: String,
    /// Parameters of meta tokens, kept as loose JSON since their shape differs per kind.
    pub args: Vec<Value>,
    pub children: Vec<Token>,
    pub hash_id: Option<String>,
}

impl Token {
    pub fn new(kind: TokenKind) -> Self {
        Self {
            kind,
            tag: String::new(),
            attrs: Vec::new(),
            content: String::new(),
            info: String::new(),
            args: Vec::new(),
            children: Vec::new(),
            hash_id: None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new(TokenKind::Text).with_content(content)
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = info.into();
        self
    }

    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }

    pub fn with_children(mut self, children: Vec<Token>) -> Self {
        self.children = children;
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }
}

#[derive(Deserialize)]
struct RawToken {
    #[serde(rename = "type")]
    kind: String,
    tag: Option<String>,
    attrs: Option<Vec<(String, String)>>,
    content: Option<String>,
    info: Option<String>,
    args: Option<Vec<Value>>,
    children: Option<Vec<RawToken>>,
    #[serde(rename = "hashID")]
    hash_id: Option<String>,
}

impl TryFrom<RawToken> for Token {
    type Error = Error;

    fn try_from(raw: RawToken) -> Result<Self> {
        let children = raw
            .children
            .unwrap_or_default()
            .into_iter()
            .map(Token::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            kind: raw.kind.parse()?,
            tag: raw.tag.unwrap_or_default(),
            attrs: raw.attrs.unwrap_or_default(),
            content: raw.content.unwrap_or_default(),
            info: raw.info.unwrap_or_default(),
            args: raw.args.unwrap_or_default(),
            children,
            hash_id: raw.hash_id,
        })
    }
}

/// The transform stage either dumps the bare token list or its full result object.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawStream {
    Tokens(Vec<RawToken>),
    Transformed { tokens: Vec<RawToken> },
}

pub fn parse_tokens(json: &str) -> Result<Vec<Token>> {
    let raw = match serde_json::from_str::<RawStream>(json)? {
        RawStream::Tokens(tokens) | RawStream::Transformed { tokens } => tokens,
    };
    raw.into_iter().map(Token::try_from).collect()
}
